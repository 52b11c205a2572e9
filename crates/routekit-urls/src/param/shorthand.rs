//! Compact parameter declarations.
//!
//! A shorthand names a parameter and says how to derive its kind. The shapes
//! are a closed set and are resolved explicitly when the route is composed:
//!
//! | Shorthand                          | Resolves to                     |
//! |------------------------------------|---------------------------------|
//! | `Shorthand::bare("id")`            | [`Str`](super::Str)             |
//! | `Shorthand::typed::<i64>("id")`    | kind declaring that value type  |
//! | `Shorthand::factory("id", f)`      | [`Custom`](super::Custom)       |
//! | `Shorthand::alias("id", "int")`    | kind with that grammar suffix   |
//! | `Shorthand::kind("id", Kind::Int)` | that kind, default constraints  |

use super::{Custom, Kind, Parameter, ValueType};
use crate::error::ShorthandError;
use std::fmt;
use std::sync::Arc;

/// User factory producing a parameter for a given name.
pub type ParamFactory = Arc<dyn Fn(&str) -> Parameter + Send + Sync>;

/// Single-entry parameter declaration awaiting resolution.
#[derive(Clone)]
pub enum Shorthand {
	Bare(String),
	Typed { name: String, value_type: ValueType },
	Factory { name: String, factory: ParamFactory },
	Alias { name: String, alias: String },
	Kind { name: String, kind: Kind },
}

impl Shorthand {
	pub fn bare(name: impl Into<String>) -> Self {
		Self::Bare(name.into())
	}

	pub fn typed<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
		Self::Typed {
			name: name.into(),
			value_type: ValueType::of::<T>(),
		}
	}

	pub fn factory<F>(name: impl Into<String>, factory: F) -> Self
	where
		F: Fn(&str) -> Parameter + Send + Sync + 'static,
	{
		Self::Factory {
			name: name.into(),
			factory: Arc::new(factory),
		}
	}

	pub fn alias(name: impl Into<String>, alias: impl Into<String>) -> Self {
		Self::Alias {
			name: name.into(),
			alias: alias.into(),
		}
	}

	pub fn kind(name: impl Into<String>, kind: Kind) -> Self {
		Self::Kind {
			name: name.into(),
			kind,
		}
	}

	pub fn name(&self) -> &str {
		match self {
			Self::Bare(name) => name,
			Self::Typed { name, .. }
			| Self::Factory { name, .. }
			| Self::Alias { name, .. }
			| Self::Kind { name, .. } => name,
		}
	}

	/// Resolves the declaration into a concrete parameter.
	///
	/// # Errors
	///
	/// Returns [`ShorthandError::UnsupportedType`] for a value type no built-in
	/// kind declares, and [`ShorthandError::UnknownAlias`] for an unknown alias.
	///
	/// # Examples
	///
	/// ```
	/// use routekit_urls::param::Shorthand;
	///
	/// let param = Shorthand::typed::<i64>("page").resolve().unwrap();
	/// assert_eq!(param.to_string(), "{page:int}");
	///
	/// assert!(Shorthand::alias("page", "integer").resolve().is_err());
	/// ```
	pub fn resolve(self) -> Result<Parameter, ShorthandError> {
		match self {
			Self::Bare(name) => Ok(Kind::Str.param(name)),
			Self::Typed { name, value_type } => match Kind::from_value_type(value_type) {
				Some(kind) => Ok(kind.param(name)),
				None => Err(ShorthandError::UnsupportedType {
					name,
					type_name: value_type.name(),
				}),
			},
			Self::Factory { name, factory } => {
				Ok(Custom::new(name, |name| factory(name)).into())
			}
			Self::Alias { name, alias } => match Kind::from_alias(&alias) {
				Some(kind) => Ok(kind.param(name)),
				None => Err(ShorthandError::UnknownAlias { name, alias }),
			},
			Self::Kind { name, kind } => Ok(kind.param(name)),
		}
	}
}

impl fmt::Debug for Shorthand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bare(name) => f.debug_tuple("Bare").field(name).finish(),
			Self::Typed { name, value_type } => f
				.debug_struct("Typed")
				.field("name", name)
				.field("value_type", &value_type.name())
				.finish(),
			Self::Factory { name, .. } => f
				.debug_struct("Factory")
				.field("name", name)
				.finish_non_exhaustive(),
			Self::Alias { name, alias } => f
				.debug_struct("Alias")
				.field("name", name)
				.field("alias", alias)
				.finish(),
			Self::Kind { name, kind } => f
				.debug_struct("Kind")
				.field("name", name)
				.field("kind", kind)
				.finish(),
		}
	}
}
