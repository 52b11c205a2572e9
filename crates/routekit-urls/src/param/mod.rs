//! Typed route parameters.
//!
//! A [`Parameter`] is a named placeholder inside a route template. The set of
//! kinds is closed ([`Str`], [`Int`], [`Float`], [`Uuid`], [`Datetime`],
//! [`Path`]) and extended through [`Custom`], which wraps whatever a user
//! factory produces.
//!
//! Every kind knows three things:
//!
//! - its grammar fragment, e.g. `{id:int(min=1)}`
//! - how to turn a [`ParamValue`] into path text
//! - the [`ValueType`] a responder must declare for it under strict validation

mod kinds;
pub mod shorthand;
mod value;

pub use kinds::{Custom, DEFAULT_DATETIME_FORMAT, Datetime, Float, FloatBound, Int, Path, Str, Uuid};
pub use shorthand::Shorthand;
pub use value::{ParamValue, ValueType};

pub(crate) use value::format_float;

use crate::error::InterpolationError;
use std::fmt;

/// Behaviour shared by every parameter kind.
pub trait TypedParam {
	/// Identifier of the parameter, unique within a route.
	fn name(&self) -> &str;

	/// Canonical template fragment, braces included.
	fn grammar_fragment(&self) -> String;

	/// Converts a value into path text.
	///
	/// # Errors
	///
	/// Returns [`InterpolationError::TypeMismatch`] when the value has a shape
	/// this kind cannot render.
	fn interpolate(&self, value: &ParamValue) -> Result<String, InterpolationError>;

	/// Type a responder must declare for this parameter.
	fn value_type(&self) -> ValueType;
}

/// Built-in kind tag, used by shorthand resolution and the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	Str,
	Int,
	Float,
	Uuid,
	Datetime,
	Path,
}

impl Kind {
	/// Looks up a kind by its textual alias.
	///
	/// Accepts the grammar suffixes (`int`, `float`, `uuid`, `dt`, `path`)
	/// plus `str` for the implicit text kind.
	pub fn from_alias(alias: &str) -> Option<Self> {
		match alias {
			"str" => Some(Self::Str),
			"int" => Some(Self::Int),
			"float" => Some(Self::Float),
			"uuid" => Some(Self::Uuid),
			"dt" => Some(Self::Datetime),
			"path" => Some(Self::Path),
			_ => None,
		}
	}

	/// Kind whose declared value type is exactly `value_type`.
	pub fn from_value_type(value_type: ValueType) -> Option<Self> {
		if value_type.is::<String>() {
			Some(Self::Str)
		} else if value_type.is::<i64>() {
			Some(Self::Int)
		} else if value_type.is::<f64>() {
			Some(Self::Float)
		} else if value_type.is::<uuid::Uuid>() {
			Some(Self::Uuid)
		} else if value_type.is::<chrono::DateTime<chrono::FixedOffset>>() {
			Some(Self::Datetime)
		} else {
			None
		}
	}

	/// Parameter of this kind with default constraints.
	pub fn param(self, name: impl Into<String>) -> Parameter {
		match self {
			Self::Str => Str::new(name).into(),
			Self::Int => Int::new(name).into(),
			Self::Float => Float::new(name).into(),
			Self::Uuid => Uuid::new(name).into(),
			Self::Datetime => Datetime::new(name).into(),
			Self::Path => Path::new(name).into(),
		}
	}
}

/// A named, typed placeholder.
///
/// # Examples
///
/// ```
/// use routekit_urls::param::{Int, Parameter, TypedParam};
///
/// let param: Parameter = Int::new("page").with_min(1).into();
/// assert_eq!(param.name(), "page");
/// assert_eq!(param.to_string(), "{page:int(min=1)}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
	Str(Str),
	Int(Int),
	Float(Float),
	Uuid(Uuid),
	Datetime(Datetime),
	Path(Path),
	Custom(Custom),
}

impl Parameter {
	/// Same parameter under another name.
	pub(crate) fn renamed(self, name: String) -> Self {
		match self {
			Self::Str(mut p) => {
				p.name = name;
				Self::Str(p)
			}
			Self::Int(mut p) => {
				p.name = name;
				Self::Int(p)
			}
			Self::Float(mut p) => {
				p.name = name;
				Self::Float(p)
			}
			Self::Uuid(mut p) => {
				p.name = name;
				Self::Uuid(p)
			}
			Self::Datetime(mut p) => {
				p.name = name;
				Self::Datetime(p)
			}
			Self::Path(mut p) => {
				p.name = name;
				Self::Path(p)
			}
			Self::Custom(p) => Self::Custom(p.renamed(name)),
		}
	}

	/// The datetime parameter behind this one, looking through [`Custom`].
	pub(crate) fn as_datetime(&self) -> Option<&Datetime> {
		match self {
			Self::Datetime(p) => Some(p),
			Self::Custom(p) => p.delegate().as_datetime(),
			_ => None,
		}
	}

	fn as_typed(&self) -> &dyn TypedParam {
		match self {
			Self::Str(p) => p,
			Self::Int(p) => p,
			Self::Float(p) => p,
			Self::Uuid(p) => p,
			Self::Datetime(p) => p,
			Self::Path(p) => p,
			Self::Custom(p) => p,
		}
	}
}

impl TypedParam for Parameter {
	fn name(&self) -> &str {
		self.as_typed().name()
	}

	fn grammar_fragment(&self) -> String {
		self.as_typed().grammar_fragment()
	}

	fn interpolate(&self, value: &ParamValue) -> Result<String, InterpolationError> {
		self.as_typed().interpolate(value)
	}

	fn value_type(&self) -> ValueType {
		self.as_typed().value_type()
	}
}

impl fmt::Display for Parameter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.grammar_fragment())
	}
}

macro_rules! impl_into_parameter {
	($($kind:ident),* $(,)?) => {
		$(
			impl From<$kind> for Parameter {
				fn from(param: $kind) -> Self {
					Self::$kind(param)
				}
			}
		)*
	};
}

impl_into_parameter!(Str, Int, Float, Uuid, Datetime, Path, Custom);

/// Whether `name` can be used as a parameter identifier
/// (`[A-Za-z_][A-Za-z0-9_]*`).
pub(crate) fn is_valid_name(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
		_ => return false,
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
