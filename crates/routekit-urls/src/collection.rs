//! Hierarchical groups of bound routes.
//!
//! A [`RouteCollection`] maps names to leaves ([`BoundRoute`]) and nested
//! collections. Entries are addressed with colon-separated paths such as
//! `"api:users:detail"`, and the whole tree can be rebased onto a root path
//! and location without touching the original.
//!
//! # Examples
//!
//! ```
//! use routekit_urls::param::Int;
//! use routekit_urls::{BoundRoute, Route, RouteCollection, values};
//!
//! let users = RouteCollection::builder()
//! 	.route("list", BoundRoute::new(Route::parse("/users").unwrap()))
//! 	.route("detail", BoundRoute::new(Route::parse("/users/{id:int}").unwrap()))
//! 	.build()
//! 	.unwrap();
//! let api = RouteCollection::builder().mount("users", users).build().unwrap();
//!
//! let per_request = api.rebase("/app", Some("https://example.com"));
//! let url = per_request.url("users:detail", values! { id = 3 }).unwrap();
//! assert_eq!(url.to_string(), "https://example.com/app/users/3");
//! ```

use crate::bound::BoundRoute;
use crate::error::{RouteResult, StructuralError};
use crate::param::ParamValue;
use crate::url::Url;
use indexmap::IndexMap;
use indexmap::map::Entry as MapEntry;

/// One named entry of a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
	Route(BoundRoute),
	Collection(RouteCollection),
}

impl Entry {
	fn rebased(&self, root: &str, location: Option<&str>) -> Self {
		match self {
			Self::Route(route) => Self::Route(route.rebased(root, location)),
			Self::Collection(collection) => Self::Collection(collection.rebase(root, location)),
		}
	}
}

/// Immutable tree of named routes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteCollection {
	entries: IndexMap<String, Entry>,
}

impl RouteCollection {
	pub fn builder() -> RouteCollectionBuilder {
		RouteCollectionBuilder::default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entries in declaration order.
	pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
		self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
	}

	pub fn route(&self, name: &str) -> Option<&BoundRoute> {
		match self.entries.get(name) {
			Some(Entry::Route(route)) => Some(route),
			_ => None,
		}
	}

	pub fn collection(&self, name: &str) -> Option<&RouteCollection> {
		match self.entries.get(name) {
			Some(Entry::Collection(collection)) => Some(collection),
			_ => None,
		}
	}

	/// Looks up a leaf by colon-separated path, e.g. `"api:users:detail"`.
	pub fn resolve(&self, path: &str) -> Option<&BoundRoute> {
		let (parents, leaf) = match path.rsplit_once(':') {
			Some((parents, leaf)) => (Some(parents), leaf),
			None => (None, path),
		};
		let mut current = self;
		for name in parents.into_iter().flat_map(|parents| parents.split(':')) {
			current = current.collection(name)?;
		}
		current.route(leaf)
	}

	/// Resolves `path` and interpolates `values` into its route.
	///
	/// # Errors
	///
	/// Returns [`StructuralError::UnknownEntry`] when `path` names no route,
	/// and the interpolation error of [`BoundRoute::url`] otherwise.
	pub fn url<I, K, V>(&self, path: &str, values: I) -> RouteResult<Url>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<ParamValue>,
	{
		let route = self
			.resolve(path)
			.ok_or_else(|| StructuralError::UnknownEntry(path.to_string()))?;
		Ok(route.url(values)?)
	}

	/// New tree of the same shape whose every leaf renders under `root` and
	/// `location`. The original collection is left as is.
	pub fn rebase(&self, root: &str, location: Option<&str>) -> Self {
		tracing::debug!(root, location, entries = self.entries.len(), "rebasing route collection");
		Self {
			entries: self
				.entries
				.iter()
				.map(|(name, entry)| (name.clone(), entry.rebased(root, location)))
				.collect(),
		}
	}
}

/// Builder for [`RouteCollection`].
///
/// The first name declared twice is reported by [`RouteCollectionBuilder::build`].
#[derive(Debug, Default)]
#[must_use]
pub struct RouteCollectionBuilder {
	entries: IndexMap<String, Entry>,
	duplicate: Option<String>,
}

impl RouteCollectionBuilder {
	pub fn route(self, name: impl Into<String>, route: impl Into<BoundRoute>) -> Self {
		self.insert(name.into(), Entry::Route(route.into()))
	}

	/// Nests `collection` under `name`.
	pub fn mount(self, name: impl Into<String>, collection: RouteCollection) -> Self {
		self.insert(name.into(), Entry::Collection(collection))
	}

	fn insert(mut self, name: String, entry: Entry) -> Self {
		match self.entries.entry(name) {
			MapEntry::Occupied(occupied) => {
				if self.duplicate.is_none() {
					self.duplicate = Some(occupied.key().clone());
				}
			}
			MapEntry::Vacant(vacant) => {
				vacant.insert(entry);
			}
		}
		self
	}

	/// # Errors
	///
	/// Returns [`StructuralError::DuplicateEntry`] when a name was declared
	/// more than once.
	pub fn build(self) -> Result<RouteCollection, StructuralError> {
		match self.duplicate {
			Some(name) => Err(StructuralError::DuplicateEntry(name)),
			None => Ok(RouteCollection {
				entries: self.entries,
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{InterpolationError, RouteError};
	use crate::param::{Int, Str};
	use crate::route::Route;
	use crate::values;
	use rstest::{fixture, rstest};

	#[fixture]
	fn tree() -> RouteCollection {
		let posts = RouteCollection::builder()
			.route(
				"detail",
				(Route::root() / "posts" / Int::new("id")).finish().unwrap(),
			)
			.build()
			.unwrap();
		RouteCollection::builder()
			.route(
				"user",
				(Route::root() / "users" / Str::new("name")).finish().unwrap(),
			)
			.mount("posts", posts)
			.build()
			.unwrap()
	}

	#[rstest]
	fn test_resolve_nested(tree: RouteCollection) {
		assert_eq!(
			tree.resolve("posts:detail").unwrap().to_string(),
			"/posts/{id:int}"
		);
		assert!(tree.resolve("user").is_some());
		assert!(tree.resolve("posts").is_none());
		assert!(tree.resolve("posts:missing").is_none());
		assert!(tree.resolve("user:detail").is_none());
	}

	#[rstest]
	fn test_rebase_is_deep_and_non_mutating(tree: RouteCollection) {
		// Act
		let rebased = tree.rebase("/my-app", Some("http://www.example.com:8000"));

		// Assert
		assert_eq!(
			rebased.url("posts:detail", values! { id = 5 }).unwrap().to_string(),
			"http://www.example.com:8000/my-app/posts/5"
		);
		assert_eq!(
			rebased.url("user", values! { name = "bob" }).unwrap().to_string(),
			"http://www.example.com:8000/my-app/users/bob"
		);
		assert_eq!(
			tree.url("posts:detail", values! { id = 5 }).unwrap().to_string(),
			"/posts/5"
		);
	}

	#[rstest]
	fn test_rebase_keeps_shape(tree: RouteCollection) {
		// Act
		let rebased = tree.rebase("/x", None);

		// Assert
		let names: Vec<_> = rebased.entries().map(|(name, _)| name).collect();
		assert_eq!(names, vec!["user", "posts"]);
		assert_eq!(rebased.collection("posts").unwrap().len(), 1);
	}

	#[rstest]
	fn test_duplicate_entry_rejected() {
		// Arrange
		let route = Route::parse("/a").unwrap();

		// Act
		let result = RouteCollection::builder()
			.route("a", route.clone())
			.mount("a", RouteCollection::default())
			.build();

		// Assert
		assert_eq!(
			result.unwrap_err(),
			StructuralError::DuplicateEntry("a".to_string())
		);
	}

	#[rstest]
	fn test_url_unknown_path(tree: RouteCollection) {
		let err = tree.url("nope", values! {}).unwrap_err();
		assert_eq!(
			err,
			RouteError::Structural(StructuralError::UnknownEntry("nope".to_string()))
		);
	}

	#[rstest]
	fn test_url_reports_interpolation_error(tree: RouteCollection) {
		let err = tree.url("user", values! {}).unwrap_err();
		assert!(matches!(
			err,
			RouteError::Interpolation(InterpolationError::MissingValues(_))
		));
	}
}
