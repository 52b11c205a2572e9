//! Query-string values and their coercion into `key=value` pairs.

use crate::error::InterpolationError;
use crate::param::format_float;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Form encoding: everything but `[A-Za-z0-9_.~-]` is escaped, space becomes `+`.
const FORM: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'_')
	.remove(b'.')
	.remove(b'-')
	.remove(b'~')
	.remove(b' ');

/// A value passed to [`Url::with_query`](crate::Url::with_query).
///
/// Scalars render as text (`Bool` as `true`/`false`). `None` omits the key.
/// A sequence of scalars repeats the key once per element.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
	None,
	Bool(bool),
	Str(String),
	Int(i64),
	Float(f64),
	Seq(Vec<QueryValue>),
}

impl QueryValue {
	fn scalar_text(&self) -> Option<String> {
		match self {
			Self::Bool(true) => Some("true".to_string()),
			Self::Bool(false) => Some("false".to_string()),
			Self::Str(text) => Some(text.clone()),
			Self::Int(number) => Some(number.to_string()),
			Self::Float(number) => Some(format_float(*number)),
			Self::None | Self::Seq(_) => None,
		}
	}
}

impl From<&str> for QueryValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_string())
	}
}

impl From<String> for QueryValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<&String> for QueryValue {
	fn from(value: &String) -> Self {
		Self::Str(value.clone())
	}
}

impl From<bool> for QueryValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

macro_rules! impl_from_integer {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for QueryValue {
				fn from(value: $ty) -> Self {
					Self::Int(i64::from(value))
				}
			}
		)*
	};
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for QueryValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<f32> for QueryValue {
	fn from(value: f32) -> Self {
		Self::Float(f64::from(value))
	}
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::None, Into::into)
	}
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
	fn from(values: Vec<T>) -> Self {
		Self::Seq(values.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<QueryValue>, const N: usize> From<[T; N]> for QueryValue {
	fn from(values: [T; N]) -> Self {
		Self::Seq(values.into_iter().map(Into::into).collect())
	}
}

/// What to do with a sequence holding non-scalar elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryPolicy {
	/// Drop the key silently.
	#[default]
	SkipMalformed,
	/// Fail with [`InterpolationError::MalformedQuery`].
	Reject,
}

/// Coerces keyword values into ordered query pairs.
pub(crate) fn make_query<I, K, V>(
	pairs: I,
	policy: QueryPolicy,
) -> Result<Vec<(String, String)>, InterpolationError>
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Into<QueryValue>,
{
	let mut query = Vec::new();
	for (key, value) in pairs {
		let key = key.into();
		match value.into() {
			QueryValue::None => {}
			QueryValue::Seq(items) => {
				let texts: Option<Vec<String>> = items.iter().map(QueryValue::scalar_text).collect();
				match (texts, policy) {
					(Some(texts), _) => query.extend(texts.into_iter().map(|text| (key.clone(), text))),
					(None, QueryPolicy::SkipMalformed) => {
						tracing::debug!(key = %key, "dropping query key with non-scalar elements");
					}
					(None, QueryPolicy::Reject) => {
						return Err(InterpolationError::MalformedQuery { key });
					}
				}
			}
			scalar => {
				if let Some(text) = scalar.scalar_text() {
					query.push((key, text));
				}
			}
		}
	}
	Ok(query)
}

fn form_encode(text: &str) -> String {
	utf8_percent_encode(text, FORM).to_string().replace(' ', "+")
}

/// Renders pairs as `application/x-www-form-urlencoded` text.
pub(crate) fn encode_query(pairs: &[(String, String)]) -> String {
	pairs
		.iter()
		.map(|(key, value)| format!("{}={}", form_encode(key), form_encode(value)))
		.collect::<Vec<_>>()
		.join("&")
}
