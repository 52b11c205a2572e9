//! Seam to the engine that matches incoming paths.
//!
//! The router hands canonical template text to a [`Dispatcher`] and never
//! interprets request paths itself. Implementations own the matching table.

use crate::error::DispatchError;
use http::Method;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;

/// Identity of the object owning a group of responders.
///
/// Responders registered together under one identity share a resource in
/// the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(Cow<'static, str>);

impl ResourceId {
	/// Resource collecting responders that belong to no particular object.
	pub const CATCHALL: Self = Self(Cow::Borrowed("catchall"));

	pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
		Self(name.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Default for ResourceId {
	fn default() -> Self {
		Self::CATCHALL
	}
}

impl fmt::Display for ResourceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&'static str> for ResourceId {
	fn from(name: &'static str) -> Self {
		Self::new(name)
	}
}

impl From<String> for ResourceId {
	fn from(name: String) -> Self {
		Self::new(name)
	}
}

/// A path matched by [`Dispatcher::find`].
#[derive(Debug)]
pub struct DispatchMatch<'a, H> {
	pub resource: &'a ResourceId,
	pub responders: &'a IndexMap<Method, H>,
	/// Raw captured values by parameter name.
	pub params: IndexMap<String, String>,
}

/// Matching engine consuming canonical templates.
pub trait Dispatcher {
	type Handler;

	/// Adds `responders` of `resource` under `template`.
	fn register(
		&mut self,
		template: &str,
		resource: ResourceId,
		responders: IndexMap<Method, Self::Handler>,
	) -> Result<(), DispatchError>;

	/// Matches a request path.
	fn find(&self, path: &str) -> Option<DispatchMatch<'_, Self::Handler>>;

	/// Builds the matching table once every route is registered.
	fn compile(&mut self) -> Result<(), DispatchError> {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_resource_id_default_is_catchall() {
		assert_eq!(ResourceId::default(), ResourceId::CATCHALL);
		assert_eq!(ResourceId::default().to_string(), "catchall");
	}

	#[rstest]
	fn test_resource_id_from_owned_and_static() {
		assert_eq!(ResourceId::from("users"), ResourceId::from("users".to_string()));
		assert_eq!(ResourceId::new("users").as_str(), "users");
	}
}
