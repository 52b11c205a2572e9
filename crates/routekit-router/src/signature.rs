//! Declared responder signatures and their validation against a route.
//!
//! A responder is called as `responder(req, resp, **route_values)`, so under
//! strict registration its signature must:
//!
//! - start with two positional parameters without defaults (request and
//!   response)
//! - declare one keyword-only parameter per route parameter, with the same
//!   name, the parameter's value type and no default
//!
//! Extra positional parameters and a trailing `**kwargs`-style catch-all are
//! ignored.

use crate::error::ValidationError;
use routekit_urls::{Route, TypedParam, ValueType};
use std::collections::BTreeSet;

/// How an argument can be bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
	PositionalOnly,
	PositionalOrKeyword,
	VarPositional,
	KeywordOnly,
	VarKeyword,
}

/// One declared argument of a responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
	pub name: String,
	pub kind: ArgKind,
	pub annotation: Option<ValueType>,
	pub has_default: bool,
}

impl Arg {
	fn is_plain_positional(&self) -> bool {
		matches!(
			self.kind,
			ArgKind::PositionalOnly | ArgKind::PositionalOrKeyword
		) && !self.has_default
	}
}

/// Declared signature of a responder, built argument by argument in
/// declaration order.
///
/// # Examples
///
/// ```
/// use routekit_router::HandlerSignature;
///
/// let signature = HandlerSignature::new("on_get")
/// 	.positional("req")
/// 	.positional("resp")
/// 	.keyword::<i64>("id")
/// 	.var_keyword("kwargs");
/// assert_eq!(signature.args().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSignature {
	name: String,
	args: Vec<Arg>,
}

impl HandlerSignature {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			args: Vec::new(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn args(&self) -> &[Arg] {
		&self.args
	}

	fn push(mut self, name: impl Into<String>, kind: ArgKind, annotation: Option<ValueType>, has_default: bool) -> Self {
		self.args.push(Arg {
			name: name.into(),
			kind,
			annotation,
			has_default,
		});
		self
	}

	/// Positional-or-keyword argument without default.
	pub fn positional(self, name: impl Into<String>) -> Self {
		self.push(name, ArgKind::PositionalOrKeyword, None, false)
	}

	pub fn positional_only(self, name: impl Into<String>) -> Self {
		self.push(name, ArgKind::PositionalOnly, None, false)
	}

	pub fn positional_with_default(self, name: impl Into<String>) -> Self {
		self.push(name, ArgKind::PositionalOrKeyword, None, true)
	}

	/// `*args`.
	pub fn var_positional(self, name: impl Into<String>) -> Self {
		self.push(name, ArgKind::VarPositional, None, false)
	}

	/// Keyword-only argument declaring value type `T`.
	pub fn keyword<T: ?Sized + 'static>(self, name: impl Into<String>) -> Self {
		self.push(name, ArgKind::KeywordOnly, Some(ValueType::of::<T>()), false)
	}

	pub fn keyword_untyped(self, name: impl Into<String>) -> Self {
		self.push(name, ArgKind::KeywordOnly, None, false)
	}

	pub fn keyword_with_default<T: ?Sized + 'static>(self, name: impl Into<String>) -> Self {
		self.push(name, ArgKind::KeywordOnly, Some(ValueType::of::<T>()), true)
	}

	/// `**kwargs`.
	pub fn var_keyword(self, name: impl Into<String>) -> Self {
		self.push(name, ArgKind::VarKeyword, None, false)
	}
}

/// Checks that `signature` can serve `route`.
///
/// An empty `prefix` skips the responder-name check.
///
/// # Errors
///
/// Returns the first violated rule, checked in this order: name prefix,
/// request argument, response argument, keyword name sets, then per route
/// parameter default, annotation presence and annotation type.
pub fn validate_responder(
	signature: &HandlerSignature,
	route: &Route,
	prefix: &str,
) -> Result<(), ValidationError> {
	if !signature.name.starts_with(prefix) {
		return Err(ValidationError::ResponderName {
			name: signature.name.clone(),
			prefix: prefix.to_string(),
		});
	}

	let mut args = signature.args.iter();
	if !args.next().is_some_and(Arg::is_plain_positional) {
		return Err(ValidationError::WrongRequestParameter);
	}
	if !args.next().is_some_and(Arg::is_plain_positional) {
		return Err(ValidationError::WrongResponseParameter);
	}
	let keywords: Vec<&Arg> = args.filter(|arg| arg.kind == ArgKind::KeywordOnly).collect();

	let route_names: BTreeSet<&str> = route.params().map(|param| param.name()).collect();
	let keyword_names: BTreeSet<&str> = keywords.iter().map(|arg| arg.name.as_str()).collect();
	// sorted, as both sets are ordered
	let diff: Vec<String> = route_names
		.symmetric_difference(&keyword_names)
		.map(|name| name.to_string())
		.collect();
	if !diff.is_empty() {
		return Err(ValidationError::NoMatchingArgument(diff));
	}

	for param in route.params() {
		let Some(arg) = keywords.iter().find(|arg| arg.name == param.name()) else {
			continue;
		};
		if arg.has_default {
			return Err(ValidationError::MustHaveNoDefault(arg.name.clone()));
		}
		let Some(declared) = arg.annotation else {
			return Err(ValidationError::MissingAnnotation(arg.name.clone()));
		};
		let expected = param.value_type();
		if declared != expected {
			return Err(ValidationError::AnnotationMismatch {
				parameter: arg.name.clone(),
				declared: declared.name(),
				expected: expected.name(),
			});
		}
	}
	Ok(())
}
