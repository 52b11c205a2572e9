//! Runtime values substituted into parameters, and the static value types
//! parameters declare for responder signature checks.

use chrono::{DateTime, FixedOffset, TimeZone};
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Declared value type of a parameter.
///
/// Two value types are equal when they name the same Rust type. The
/// built-in kinds declare `String`, `i64`, `f64`, [`uuid::Uuid`] and
/// `DateTime<FixedOffset>`.
#[derive(Debug, Clone, Copy)]
pub struct ValueType {
	id: TypeId,
	name: &'static str,
}

impl ValueType {
	/// Value type of `T`.
	///
	/// # Examples
	///
	/// ```
	/// use routekit_urls::ValueType;
	///
	/// assert_eq!(ValueType::of::<i64>(), ValueType::of::<i64>());
	/// assert_ne!(ValueType::of::<i64>(), ValueType::of::<i32>());
	/// ```
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: std::any::type_name::<T>(),
		}
	}

	/// Fully qualified type name, for diagnostics.
	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn is<T: ?Sized + 'static>(&self) -> bool {
		self.id == TypeId::of::<T>()
	}
}

impl PartialEq for ValueType {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for ValueType {}

impl Hash for ValueType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// A concrete value to interpolate into a route parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
	Str(String),
	Int(i64),
	Float(f64),
	Uuid(uuid::Uuid),
	DateTime(DateTime<FixedOffset>),
}

impl ParamValue {
	/// Human readable shape, used in type mismatch errors.
	pub fn shape(&self) -> &'static str {
		match self {
			Self::Str(_) => "string",
			Self::Int(_) => "integer",
			Self::Float(_) => "float",
			Self::Uuid(_) => "UUID",
			Self::DateTime(_) => "datetime",
		}
	}
}

impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_string())
	}
}

impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<&String> for ParamValue {
	fn from(value: &String) -> Self {
		Self::Str(value.clone())
	}
}

macro_rules! impl_from_integer {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for ParamValue {
				fn from(value: $ty) -> Self {
					Self::Int(i64::from(value))
				}
			}
		)*
	};
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for ParamValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<f32> for ParamValue {
	fn from(value: f32) -> Self {
		Self::Float(f64::from(value))
	}
}

impl From<uuid::Uuid> for ParamValue {
	fn from(value: uuid::Uuid) -> Self {
		Self::Uuid(value)
	}
}

impl<Tz: TimeZone> From<DateTime<Tz>> for ParamValue {
	fn from(value: DateTime<Tz>) -> Self {
		Self::DateTime(value.fixed_offset())
	}
}

/// Renders a float the way the matching grammar expects: always with a
/// fractional part or exponent (`3` becomes `3.0`), exponents signed and at
/// least two digits wide (`1e+16`, `1e-07`), non-finite values lowercase.
pub(crate) fn format_float(value: f64) -> String {
	if value.is_nan() {
		return "nan".to_string();
	}
	if value.is_infinite() {
		return if value > 0.0 { "inf" } else { "-inf" }.to_string();
	}
	// Debug switches to scientific notation outside 1e-4..1e16
	let text = format!("{value:?}");
	match text.split_once('e') {
		Some((mantissa, exponent)) => {
			let (sign, digits) = match exponent.strip_prefix('-') {
				Some(digits) => ('-', digits),
				None => ('+', exponent),
			};
			format!("{mantissa}e{sign}{digits:0>2}")
		}
		None => text,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Utc;
	use rstest::rstest;

	#[rstest]
	#[case(3.0, "3.0")]
	#[case(3.14, "3.14")]
	#[case(-0.5, "-0.5")]
	#[case(100.0, "100.0")]
	#[case(0.0001, "0.0001")]
	#[case(1e16, "1e+16")]
	#[case(1.5e16, "1.5e+16")]
	#[case(1e-7, "1e-07")]
	#[case(-2.5e-5, "-2.5e-05")]
	#[case(1e123, "1e+123")]
	#[case(f64::NAN, "nan")]
	#[case(f64::INFINITY, "inf")]
	#[case(f64::NEG_INFINITY, "-inf")]
	fn test_format_float(#[case] value: f64, #[case] expected: &str) {
		assert_eq!(format_float(value), expected);
	}

	#[rstest]
	fn test_value_type_equality_by_type() {
		assert_eq!(ValueType::of::<String>(), ValueType::of::<String>());
		assert_ne!(ValueType::of::<String>(), ValueType::of::<&str>());
		assert!(ValueType::of::<f64>().is::<f64>());
	}

	#[rstest]
	fn test_datetime_conversion_keeps_instant() {
		// Arrange
		let now = Utc::now();

		// Act
		let value = ParamValue::from(now);

		// Assert
		match value {
			ParamValue::DateTime(dt) => assert_eq!(dt, now.fixed_offset()),
			other => panic!("unexpected value {other:?}"),
		}
	}

	#[rstest]
	fn test_integer_widening() {
		assert_eq!(ParamValue::from(7u8), ParamValue::Int(7));
		assert_eq!(ParamValue::from(-7i32), ParamValue::Int(-7));
	}
}
