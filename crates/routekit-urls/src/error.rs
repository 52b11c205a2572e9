//! Error types for route composition, template parsing and interpolation.
//!
//! All of these surface on the build/registration path. Rendering an
//! already-built [`Url`](crate::Url) never fails.

use thiserror::Error;

/// Result type for route operations.
pub type RouteResult<T> = Result<T, RouteError>;

/// What went wrong while parsing a template.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
	#[error("unmatched opening brace")]
	UnbalancedOpenBrace,

	#[error("unmatched closing brace")]
	UnbalancedCloseBrace,

	#[error("nested opening brace inside a parameter")]
	NestedBrace,

	#[error("parameter name is empty")]
	EmptyName,

	#[error("parameter name is not a valid identifier")]
	InvalidName,

	#[error("unknown parameter kind '{0}'")]
	UnknownKind(String),

	#[error("parameter kind '{0}' does not take arguments")]
	UnexpectedArguments(String),

	#[error("malformed arguments: {0}")]
	MalformedArguments(String),

	#[error("duplicate parameter name '{0}'")]
	DuplicateName(String),
}

/// Template parse failure.
///
/// `position` is the byte offset of the offending fragment within the
/// template text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position}: '{fragment}'")]
pub struct SyntaxError {
	pub kind: SyntaxErrorKind,
	pub position: usize,
	pub fragment: String,
}

impl SyntaxError {
	pub(crate) fn new(kind: SyntaxErrorKind, position: usize, fragment: impl Into<String>) -> Self {
		Self {
			kind,
			position,
			fragment: fragment.into(),
		}
	}
}

/// A shorthand declaration could not be resolved to a parameter.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShorthandError {
	#[error("shorthand '{name}': type {type_name} has no parameter kind")]
	UnsupportedType {
		name: String,
		type_name: &'static str,
	},

	#[error("shorthand '{name}': unknown kind alias '{alias}'")]
	UnknownAlias { name: String, alias: String },
}

/// Route shape violations detected while composing or registering a route.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
	#[error("route must begin with slash ({0})")]
	MissingLeadingSlash(String),

	#[error("duplicate parameter name '{0}' in route")]
	DuplicateParameter(String),

	#[error("invalid parameter name '{0}'")]
	InvalidParameterName(String),

	#[error("literal '{0}' must not contain braces")]
	BraceInLiteral(String),

	#[error("datetime format '{0}' must not contain both quote characters")]
	UnquotableFormat(String),

	#[error(transparent)]
	Shorthand(#[from] ShorthandError),

	#[error("duplicate collection entry '{0}'")]
	DuplicateEntry(String),

	#[error("no route named '{0}'")]
	UnknownEntry(String),
}

/// Values could not be interpolated into a route.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
	#[error("missing values for parameters: {0:?}")]
	MissingValues(Vec<String>),

	#[error("unexpected values for unknown parameters: {0:?}")]
	UnexpectedValues(Vec<String>),

	#[error("parameter '{parameter}' expects {expected}, got {found}")]
	TypeMismatch {
		parameter: String,
		expected: &'static str,
		found: &'static str,
	},

	#[error("parameter '{parameter}' could not be formatted with '{format}'")]
	Format { parameter: String, format: String },

	#[error("query value for '{key}' contains non-scalar elements")]
	MalformedQuery { key: String },
}

/// Umbrella error for everything in this crate.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
	#[error("template syntax error: {0}")]
	Syntax(#[from] SyntaxError),

	#[error(transparent)]
	Structural(#[from] StructuralError),

	#[error(transparent)]
	Interpolation(#[from] InterpolationError),
}

impl From<ShorthandError> for RouteError {
	fn from(err: ShorthandError) -> Self {
		Self::Structural(StructuralError::Shorthand(err))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_syntax_error_display_names_fragment() {
		let err = SyntaxError::new(
			SyntaxErrorKind::UnknownKind("bogus".to_string()),
			5,
			"{x:bogus}",
		);

		assert_eq!(
			err.to_string(),
			"unknown parameter kind 'bogus' at position 5: '{x:bogus}'"
		);
	}

	#[rstest]
	fn test_shorthand_error_lifts_into_route_error() {
		let err: RouteError = ShorthandError::UnknownAlias {
			name: "a".to_string(),
			alias: "nope".to_string(),
		}
		.into();

		assert!(matches!(
			err,
			RouteError::Structural(StructuralError::Shorthand(_))
		));
		assert!(err.to_string().contains("unknown kind alias 'nope'"));
	}

	#[rstest]
	fn test_missing_slash_message() {
		let err = StructuralError::MissingLeadingSlash("foo/bar".to_string());
		assert_eq!(err.to_string(), "route must begin with slash (foo/bar)");
	}
}
