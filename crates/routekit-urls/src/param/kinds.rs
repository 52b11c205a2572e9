//! The built-in parameter kinds.
//!
//! Each kind renders its own grammar fragment (`{name:kind(args)}`) and
//! converts a [`ParamValue`] into path text.

use super::value::{ParamValue, ValueType, format_float};
use super::{Parameter, TypedParam};
use crate::error::InterpolationError;
use chrono::{DateTime, FixedOffset};
use std::fmt::{self, Write as _};

/// Interpolation format used by [`Datetime`] when none is given.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

fn mismatch(name: &str, expected: &'static str, value: &ParamValue) -> InterpolationError {
	InterpolationError::TypeMismatch {
		parameter: name.to_string(),
		expected,
		found: value.shape(),
	}
}

fn fragment(name: &str, kind: Option<&str>, args: &[String]) -> String {
	let mut out = String::with_capacity(name.len() + 16);
	out.push('{');
	out.push_str(name);
	if let Some(kind) = kind {
		out.push(':');
		out.push_str(kind);
		if !args.is_empty() {
			out.push('(');
			out.push_str(&args.join(", "));
			out.push(')');
		}
	}
	out.push('}');
	out
}

/// Plain text parameter matching a single path component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Str {
	pub(crate) name: String,
}

impl Str {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}
}

impl TypedParam for Str {
	fn name(&self) -> &str {
		&self.name
	}

	fn grammar_fragment(&self) -> String {
		fragment(&self.name, None, &[])
	}

	fn interpolate(&self, value: &ParamValue) -> Result<String, InterpolationError> {
		match value {
			ParamValue::Str(text) => Ok(text.clone()),
			other => Err(mismatch(&self.name, "string", other)),
		}
	}

	fn value_type(&self) -> ValueType {
		ValueType::of::<String>()
	}
}

/// Integer parameter with optional inclusive bounds.
///
/// `digit_width` is handed to the matcher verbatim; any value, including zero
/// or a negative number, is emitted as given.
///
/// # Examples
///
/// ```
/// use routekit_urls::param::{Int, TypedParam};
///
/// let param = Int::new("foo").with_min(1).with_max(10).with_digit_width(3);
/// assert_eq!(param.grammar_fragment(), "{foo:int(3, min=1, max=10)}");
/// assert_eq!(Int::new("foo").grammar_fragment(), "{foo:int}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Int {
	pub(crate) name: String,
	min: Option<i64>,
	max: Option<i64>,
	digit_width: Option<i64>,
}

impl Int {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			min: None,
			max: None,
			digit_width: None,
		}
	}

	pub fn with_min(mut self, min: i64) -> Self {
		self.min = Some(min);
		self
	}

	pub fn with_max(mut self, max: i64) -> Self {
		self.max = Some(max);
		self
	}

	pub fn with_digit_width(mut self, digit_width: i64) -> Self {
		self.digit_width = Some(digit_width);
		self
	}

	pub fn min(&self) -> Option<i64> {
		self.min
	}

	pub fn max(&self) -> Option<i64> {
		self.max
	}

	pub fn digit_width(&self) -> Option<i64> {
		self.digit_width
	}
}

impl TypedParam for Int {
	fn name(&self) -> &str {
		&self.name
	}

	fn grammar_fragment(&self) -> String {
		let mut args = Vec::new();
		if let Some(width) = self.digit_width {
			args.push(width.to_string());
		}
		if let Some(min) = self.min {
			args.push(format!("min={min}"));
		}
		if let Some(max) = self.max {
			args.push(format!("max={max}"));
		}
		fragment(&self.name, Some("int"), &args)
	}

	fn interpolate(&self, value: &ParamValue) -> Result<String, InterpolationError> {
		match value {
			ParamValue::Int(number) => Ok(number.to_string()),
			other => Err(mismatch(&self.name, "integer", other)),
		}
	}

	fn value_type(&self) -> ValueType {
		ValueType::of::<i64>()
	}
}

/// Bound of a [`Float`] parameter.
///
/// Integral bounds render without a fractional part (`min=1`), float bounds
/// keep theirs (`min=1.0`), so a parsed template compiles back verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FloatBound {
	Int(i64),
	Float(f64),
}

impl FloatBound {
	pub fn value(self) -> f64 {
		match self {
			Self::Int(number) => number as f64,
			Self::Float(number) => number,
		}
	}
}

impl fmt::Display for FloatBound {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(number) => write!(f, "{number}"),
			Self::Float(number) => f.write_str(&format_float(*number)),
		}
	}
}

impl From<i64> for FloatBound {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<i32> for FloatBound {
	fn from(value: i32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<f64> for FloatBound {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

/// Floating point parameter.
///
/// `finite` defaults to `true` and is only emitted when disabled; the check
/// itself belongs to the matcher.
///
/// # Examples
///
/// ```
/// use routekit_urls::param::{Float, TypedParam};
///
/// let param = Float::new("foo").with_min(1).with_finite(false);
/// assert_eq!(param.grammar_fragment(), "{foo:float(min=1, finite=False)}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Float {
	pub(crate) name: String,
	min: Option<FloatBound>,
	max: Option<FloatBound>,
	finite: bool,
}

impl Float {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			min: None,
			max: None,
			finite: true,
		}
	}

	pub fn with_min(mut self, min: impl Into<FloatBound>) -> Self {
		self.min = Some(min.into());
		self
	}

	pub fn with_max(mut self, max: impl Into<FloatBound>) -> Self {
		self.max = Some(max.into());
		self
	}

	pub fn with_finite(mut self, finite: bool) -> Self {
		self.finite = finite;
		self
	}

	pub fn min(&self) -> Option<FloatBound> {
		self.min
	}

	pub fn max(&self) -> Option<FloatBound> {
		self.max
	}

	pub fn finite(&self) -> bool {
		self.finite
	}
}

impl TypedParam for Float {
	fn name(&self) -> &str {
		&self.name
	}

	fn grammar_fragment(&self) -> String {
		let mut args = Vec::new();
		if let Some(min) = self.min {
			args.push(format!("min={min}"));
		}
		if let Some(max) = self.max {
			args.push(format!("max={max}"));
		}
		if !self.finite {
			args.push("finite=False".to_string());
		}
		fragment(&self.name, Some("float"), &args)
	}

	fn interpolate(&self, value: &ParamValue) -> Result<String, InterpolationError> {
		match value {
			ParamValue::Float(number) => Ok(format_float(*number)),
			ParamValue::Int(number) => Ok(format_float(*number as f64)),
			other => Err(mismatch(&self.name, "float", other)),
		}
	}

	fn value_type(&self) -> ValueType {
		ValueType::of::<f64>()
	}
}

/// UUID parameter, interpolated in canonical hyphenated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uuid {
	pub(crate) name: String,
}

impl Uuid {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}
}

impl TypedParam for Uuid {
	fn name(&self) -> &str {
		&self.name
	}

	fn grammar_fragment(&self) -> String {
		fragment(&self.name, Some("uuid"), &[])
	}

	fn interpolate(&self, value: &ParamValue) -> Result<String, InterpolationError> {
		match value {
			ParamValue::Uuid(id) => Ok(id.hyphenated().to_string()),
			other => Err(mismatch(&self.name, "UUID", other)),
		}
	}

	fn value_type(&self) -> ValueType {
		ValueType::of::<uuid::Uuid>()
	}
}

/// Date/time parameter.
///
/// The format string is emitted verbatim, double-quoted unless it contains a
/// double quote, in which case single quotes are used. Quotes are never
/// escaped, so a format holding both kinds has no template text and is
/// rejected when the route is composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datetime {
	pub(crate) name: String,
	format_string: Option<String>,
}

impl Datetime {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			format_string: None,
		}
	}

	pub fn with_format(mut self, format_string: impl Into<String>) -> Self {
		self.format_string = Some(format_string.into());
		self
	}

	pub fn format_string(&self) -> Option<&str> {
		self.format_string.as_deref()
	}

	/// Quote that can enclose the format in template text, if any.
	pub(crate) fn format_quote(&self) -> Option<char> {
		match self.format_string.as_deref() {
			Some(format) if format.contains('"') => (!format.contains('\'')).then_some('\''),
			_ => Some('"'),
		}
	}

	fn effective_format(&self) -> &str {
		self.format_string
			.as_deref()
			.unwrap_or(DEFAULT_DATETIME_FORMAT)
	}
}

impl TypedParam for Datetime {
	fn name(&self) -> &str {
		&self.name
	}

	fn grammar_fragment(&self) -> String {
		match &self.format_string {
			Some(format_string) => {
				let quote = self.format_quote().unwrap_or('"');
				fragment(&self.name, Some("dt"), &[format!("{quote}{format_string}{quote}")])
			}
			None => fragment(&self.name, Some("dt"), &[]),
		}
	}

	fn interpolate(&self, value: &ParamValue) -> Result<String, InterpolationError> {
		match value {
			ParamValue::DateTime(dt) => format_datetime(&self.name, dt, self.effective_format()),
			other => Err(mismatch(&self.name, "datetime", other)),
		}
	}

	fn value_type(&self) -> ValueType {
		ValueType::of::<DateTime<FixedOffset>>()
	}
}

// chrono reports unsupported specifiers through fmt::Error; `to_string`
// would panic on it.
fn format_datetime(
	name: &str,
	dt: &DateTime<FixedOffset>,
	format_string: &str,
) -> Result<String, InterpolationError> {
	let mut out = String::new();
	write!(out, "{}", dt.format(format_string)).map_err(|_| InterpolationError::Format {
		parameter: name.to_string(),
		format: format_string.to_string(),
	})?;
	Ok(out)
}

/// Path parameter. Matches and produces text that may contain `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
	pub(crate) name: String,
}

impl Path {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}
}

impl TypedParam for Path {
	fn name(&self) -> &str {
		&self.name
	}

	fn grammar_fragment(&self) -> String {
		fragment(&self.name, Some("path"), &[])
	}

	fn interpolate(&self, value: &ParamValue) -> Result<String, InterpolationError> {
		match value {
			ParamValue::Str(text) => Ok(text.clone()),
			other => Err(mismatch(&self.name, "string", other)),
		}
	}

	fn value_type(&self) -> ValueType {
		ValueType::of::<String>()
	}
}

/// Parameter produced by a user factory.
///
/// The factory runs once, at construction, with the parameter name. The
/// produced parameter always carries that name, whatever the factory chose.
/// Grammar and interpolation delegate to it; the declared value type is the
/// caller's, falling back to the delegate's.
///
/// # Examples
///
/// ```
/// use routekit_urls::param::{Custom, Int, TypedParam};
///
/// let param = Custom::new("int3", |name| Int::new(name).with_digit_width(-4).into());
/// assert_eq!(param.grammar_fragment(), "{int3:int(-4)}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Custom {
	delegate: Box<Parameter>,
	value_type: Option<ValueType>,
}

impl Custom {
	pub fn new<F>(name: impl Into<String>, factory: F) -> Self
	where
		F: FnOnce(&str) -> Parameter,
	{
		let name = name.into();
		let delegate = factory(&name).renamed(name);
		Self {
			delegate: Box::new(delegate),
			value_type: None,
		}
	}

	/// Declares the value type responders must accept for this parameter.
	pub fn with_value_type<T: ?Sized + 'static>(mut self) -> Self {
		self.value_type = Some(ValueType::of::<T>());
		self
	}

	pub fn delegate(&self) -> &Parameter {
		&self.delegate
	}

	pub(crate) fn renamed(self, name: String) -> Self {
		Self {
			delegate: Box::new(self.delegate.renamed(name)),
			value_type: self.value_type,
		}
	}
}

impl TypedParam for Custom {
	fn name(&self) -> &str {
		self.delegate.name()
	}

	fn grammar_fragment(&self) -> String {
		self.delegate.grammar_fragment()
	}

	fn interpolate(&self, value: &ParamValue) -> Result<String, InterpolationError> {
		self.delegate.interpolate(value)
	}

	fn value_type(&self) -> ValueType {
		self.value_type
			.unwrap_or_else(|| self.delegate.value_type())
	}
}
