//! Routes ready to produce URLs.

use crate::error::InterpolationError;
use crate::param::ParamValue;
use crate::route::Route;
use crate::url::Url;
use std::fmt;
use std::sync::Arc;

/// A [`Route`] paired with the root and location its URLs are rendered
/// against.
///
/// The route itself is shared; rebasing only swaps the prefix, so a bound
/// route can be rebased per request cheaply.
///
/// # Examples
///
/// ```
/// use routekit_urls::param::Int;
/// use routekit_urls::{BoundRoute, Route, values};
///
/// let route = (Route::root() / "posts" / Int::new("id")).finish().unwrap();
/// let bound = BoundRoute::new(route);
/// let url = bound.rebased("/blog", None).url(values! { id = 7 }).unwrap();
/// assert_eq!(url.to_string(), "/blog/posts/7");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoundRoute {
	route: Arc<Route>,
	root: Option<String>,
	location: Option<String>,
}

impl BoundRoute {
	pub fn new(route: Route) -> Self {
		Self {
			route: Arc::new(route),
			root: None,
			location: None,
		}
	}

	pub fn route(&self) -> &Route {
		&self.route
	}

	pub fn root(&self) -> Option<&str> {
		self.root.as_deref()
	}

	pub fn location(&self) -> Option<&str> {
		self.location.as_deref()
	}

	/// Interpolates `values` and applies this binding's root and location.
	///
	/// # Errors
	///
	/// See [`Route::as_url`].
	pub fn url<I, K, V>(&self, values: I) -> Result<Url, InterpolationError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<ParamValue>,
	{
		let mut url = self.route.as_url(values)?;
		if let Some(root) = &self.root {
			url = url.with_root(root.as_str());
		}
		if let Some(location) = &self.location {
			url = url.with_location(location.as_str());
		}
		Ok(url)
	}

	/// Same route rendered under another root path and location.
	pub fn rebased(&self, root: impl Into<String>, location: Option<&str>) -> Self {
		Self {
			route: Arc::clone(&self.route),
			root: Some(root.into()),
			location: location.map(str::to_string),
		}
	}
}

impl From<Route> for BoundRoute {
	fn from(route: Route) -> Self {
		Self::new(route)
	}
}

impl fmt::Display for BoundRoute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.route)
	}
}
