//! Error types for route registration.

use http::Method;
use routekit_urls::{RouteError, StructuralError};
use thiserror::Error;

/// Result of a registration call.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// A responder signature does not fit the route it is registered for.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	#[error("name must begin with {prefix} ({name})")]
	ResponderName { name: String, prefix: String },

	#[error("wrong req parameter")]
	WrongRequestParameter,

	#[error("wrong resp parameter")]
	WrongResponseParameter,

	/// Names present on one side only, sorted.
	#[error("no matching argument and keyword-parameter: {0:?}")]
	NoMatchingArgument(Vec<String>),

	#[error("parameter {0} must have no default value")]
	MustHaveNoDefault(String),

	#[error("missing type annotation for parameter {0}")]
	MissingAnnotation(String),

	#[error("type annotation mismatch for parameter {parameter} ({declared} vs {expected})")]
	AnnotationMismatch {
		parameter: String,
		declared: &'static str,
		expected: &'static str,
	},
}

/// Failure reported by a [`Dispatcher`](crate::Dispatcher) implementation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
	#[error("route '{template}' conflicts with an existing registration")]
	Conflict { template: String },

	#[error("dispatcher rejected '{template}': {reason}")]
	Rejected { template: String, reason: String },

	#[error("dispatcher failed to compile: {0}")]
	Compile(String),
}

/// Registration of a route failed; nothing was registered for that call
/// unless the dispatcher itself failed midway.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
	#[error(transparent)]
	Route(#[from] RouteError),

	#[error("Handler {handler} ({method}) validation error: {source}")]
	Handler {
		handler: String,
		method: Method,
		#[source]
		source: ValidationError,
	},

	#[error(transparent)]
	Dispatch(#[from] DispatchError),
}

impl From<StructuralError> for RegistrationError {
	fn from(err: StructuralError) -> Self {
		Self::Route(err.into())
	}
}

/// Router settings could not be loaded.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
	#[error("file error: {0}")]
	FileError(String),

	#[error("parse error: {0}")]
	ParseError(String),
}
