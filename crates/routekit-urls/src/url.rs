//! Immutable URL values.
//!
//! A [`Url`] is a root prefix, an optional location (scheme, host and port),
//! path segments, query pairs and an optional fragment. Every operation
//! returns a new value.
//!
//! Rendering percent-encodes the joined root and segments with `/` kept
//! literal, prepends the location verbatim, form-encodes the query and
//! percent-encodes the fragment.

use crate::error::InterpolationError;
use crate::query::{QueryPolicy, QueryValue, encode_query, make_query};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Bound, Div, RangeBounds};

/// Everything but `[A-Za-z0-9_.~-]` and `/`.
const PATH: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'_')
	.remove(b'.')
	.remove(b'-')
	.remove(b'~')
	.remove(b'/');

const FRAGMENT: &AsciiSet = PATH;

/// An interpolated URL.
///
/// Equality and hashing use the rendered text, so two Urls built differently
/// but rendering identically are interchangeable as map keys.
///
/// # Examples
///
/// ```
/// use routekit_urls::{Url, query};
///
/// let url = Url::new(Some(""), ["foo", "bar baz"])
/// 	.with_query(query! { page = 2, tags = ["a", "b"], draft = None })
/// 	.with_fragment("top");
/// assert_eq!(url.to_string(), "/foo/bar%20baz?page=2&tags=a&tags=b#top");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Url {
	root: Option<String>,
	location: Option<String>,
	segments: Vec<String>,
	query: Vec<(String, String)>,
	fragment: Option<String>,
}

impl Url {
	pub fn new<R, I, S>(root: Option<R>, segments: I) -> Self
	where
		R: Into<String>,
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			root: root.map(Into::into),
			segments: segments.into_iter().map(Into::into).collect(),
			..Self::default()
		}
	}

	pub fn root(&self) -> Option<&str> {
		self.root.as_deref()
	}

	pub fn location(&self) -> Option<&str> {
		self.location.as_deref()
	}

	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	pub fn query(&self) -> &[(String, String)] {
		&self.query
	}

	pub fn fragment(&self) -> Option<&str> {
		self.fragment.as_deref()
	}

	/// New Url with the query replaced.
	///
	/// `None` values are skipped and sequences repeat the key. A sequence
	/// holding non-scalar elements is dropped; see [`Url::with_query_policy`]
	/// to reject it instead.
	pub fn with_query<I, K, V>(&self, pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<QueryValue>,
	{
		let query = make_query(pairs, QueryPolicy::SkipMalformed).unwrap_or_default();
		Self {
			query,
			..self.clone()
		}
	}

	/// New Url with the query replaced, applying `policy` to malformed
	/// sequences.
	///
	/// # Errors
	///
	/// Returns [`InterpolationError::MalformedQuery`] under
	/// [`QueryPolicy::Reject`].
	pub fn with_query_policy<I, K, V>(
		&self,
		policy: QueryPolicy,
		pairs: I,
	) -> Result<Self, InterpolationError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<QueryValue>,
	{
		let query = make_query(pairs, policy)?;
		Ok(Self {
			query,
			..self.clone()
		})
	}

	/// New Url with the fragment replaced. `#` is added on rendering, even for
	/// an empty fragment.
	pub fn with_fragment(&self, fragment: impl Into<String>) -> Self {
		Self {
			fragment: Some(fragment.into()),
			..self.clone()
		}
	}

	/// New Url with the root prefix replaced. The root may contain slashes and
	/// is percent-encoded with the path.
	pub fn with_root(&self, root: impl Into<String>) -> Self {
		Self {
			root: Some(root.into()),
			..self.clone()
		}
	}

	/// New Url with the location replaced. The location is never escaped; an
	/// empty location is ignored on rendering.
	pub fn with_location(&self, location: impl Into<String>) -> Self {
		Self {
			location: Some(location.into()),
			..self.clone()
		}
	}

	/// New Url keeping only the segments in `range`, clamped to the segment
	/// count. Root, location, query and fragment are kept.
	pub fn slice(&self, range: impl RangeBounds<usize>) -> Self {
		let len = self.segments.len();
		let start = match range.start_bound() {
			Bound::Included(&start) => start,
			Bound::Excluded(&start) => start.saturating_add(1),
			Bound::Unbounded => 0,
		}
		.min(len);
		let end = match range.end_bound() {
			Bound::Included(&end) => end.saturating_add(1),
			Bound::Excluded(&end) => end,
			Bound::Unbounded => len,
		}
		.clamp(start, len);
		Self {
			segments: self.segments[start..end].to_vec(),
			..self.clone()
		}
	}

	/// New Url holding only the segment at `index`.
	pub fn segment(&self, index: usize) -> Option<Self> {
		self.segments.get(index).map(|segment| Self {
			segments: vec![segment.clone()],
			..self.clone()
		})
	}

	fn appended(&self, segment: String) -> Self {
		let mut url = self.clone();
		url.segments.push(segment);
		url
	}

	fn prepended(&self, segment: String) -> Self {
		let mut url = self.clone();
		url.segments.insert(0, segment);
		url
	}

	/// Rendered, percent-encoded text.
	pub fn render(&self) -> String {
		let mut path = String::new();
		if let Some(root) = &self.root {
			path.push_str(root);
			for segment in &self.segments {
				path.push('/');
				path.push_str(segment);
			}
		} else {
			path = self.segments.join("/");
		}

		let mut out = match self.location.as_deref() {
			Some(location) if !location.is_empty() => location.to_string(),
			_ => String::new(),
		};
		out.extend(utf8_percent_encode(&path, PATH));

		if !self.query.is_empty() {
			out.push('?');
			out.push_str(&encode_query(&self.query));
		}
		if let Some(fragment) = &self.fragment {
			out.push('#');
			out.extend(utf8_percent_encode(fragment, FRAGMENT));
		}
		out
	}

	/// Rendered text with HTML-unsafe characters entity-escaped, ready for
	/// attribute values and markup.
	pub fn to_html(&self) -> String {
		html_escape(&self.render()).into_owned()
	}
}

fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

impl fmt::Display for Url {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}

impl PartialEq for Url {
	fn eq(&self, other: &Self) -> bool {
		self.render() == other.render()
	}
}

impl Eq for Url {}

impl Hash for Url {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.render().hash(state);
	}
}

impl Serialize for Url {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl From<&Url> for String {
	fn from(url: &Url) -> Self {
		url.render()
	}
}

impl Div<&str> for &Url {
	type Output = Url;

	fn div(self, rhs: &str) -> Url {
		self.appended(rhs.to_string())
	}
}

impl Div<&str> for Url {
	type Output = Url;

	fn div(mut self, rhs: &str) -> Url {
		self.segments.push(rhs.to_string());
		self
	}
}

impl Div<String> for Url {
	type Output = Url;

	fn div(mut self, rhs: String) -> Url {
		self.segments.push(rhs);
		self
	}
}

impl Div<&Url> for &str {
	type Output = Url;

	fn div(self, rhs: &Url) -> Url {
		rhs.prepended(self.to_string())
	}
}

impl Div<Url> for &str {
	type Output = Url;

	fn div(self, mut rhs: Url) -> Url {
		rhs.segments.insert(0, self.to_string());
		rhs
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::query;
	use rstest::rstest;
	use std::collections::HashSet;

	fn sample() -> Url {
		Url::new(Some(""), ["foo", "bar", "1", "12"])
	}

	#[rstest]
	fn test_render_rooted() {
		assert_eq!(sample().to_string(), "/foo/bar/1/12");
	}

	#[rstest]
	fn test_render_unrooted() {
		let url = Url::new(None::<String>, ["foo", "bar"]);
		assert_eq!(url.to_string(), "foo/bar");
	}

	#[rstest]
	fn test_root_and_location() {
		// Arrange
		let url = Url::new(None::<String>, ["foo", "bar", "1", "12"]);

		// Act
		let rooted = url.with_root("/my-app");
		let located = rooted.with_location("http://www.example.com:8000");

		// Assert
		assert_eq!(rooted.to_string(), "/my-app/foo/bar/1/12");
		assert_eq!(
			located.to_string(),
			"http://www.example.com:8000/my-app/foo/bar/1/12"
		);
	}

	#[rstest]
	fn test_root_escaped_location_verbatim() {
		let url = sample()
			.with_root("/my app")
			.with_location("http://ex ample.com");
		assert_eq!(url.to_string(), "http://ex ample.com/my%20app/foo/bar/1/12");
	}

	#[rstest]
	fn test_empty_location_ignored() {
		assert_eq!(sample().with_location("").to_string(), "/foo/bar/1/12");
	}

	#[rstest]
	#[case("foo,foo", "/foo%2Cfoo")]
	#[case("a b", "/a%20b")]
	#[case("ü", "/%C3%BC")]
	#[case("a/b", "/a/b")]
	#[case("~_.-", "/~_.-")]
	fn test_path_escaping(#[case] segment: &str, #[case] expected: &str) {
		assert_eq!(Url::new(Some(""), [segment]).to_string(), expected);
	}

	#[rstest]
	fn test_query_and_fragment() {
		// Act
		let url = sample()
			.with_query(query! { q = " , ,ё", page = 3 })
			.with_fragment("sec 1");

		// Assert
		assert_eq!(
			url.to_string(),
			"/foo/bar/1/12?q=+%2C+%2C%D1%91&page=3#sec%201"
		);
	}

	#[rstest]
	fn test_empty_fragment_still_rendered() {
		assert_eq!(sample().with_fragment("").to_string(), "/foo/bar/1/12#");
	}

	#[rstest]
	fn test_empty_query_omits_question_mark() {
		let url = sample().with_query(query! { gone = None });
		assert_eq!(url.to_string(), "/foo/bar/1/12");
	}

	#[rstest]
	fn test_with_query_replaces() {
		let url = sample()
			.with_query(query! { a = 1 })
			.with_query(query! { b = 2 });
		assert_eq!(url.to_string(), "/foo/bar/1/12?b=2");
	}

	#[rstest]
	fn test_with_query_policy_rejects() {
		let result = sample().with_query_policy(
			QueryPolicy::Reject,
			vec![("bad", QueryValue::Seq(vec![QueryValue::None]))],
		);
		assert!(matches!(
			result,
			Err(InterpolationError::MalformedQuery { .. })
		));
	}

	#[rstest]
	fn test_append_and_prepend() {
		// Arrange
		let url = Url::new(None::<String>, ["b"]);

		// Act
		let appended = &url / "c";
		let prepended = "a" / &appended;

		// Assert
		assert_eq!(appended.to_string(), "b/c");
		assert_eq!(prepended.to_string(), "a/b/c");
		assert_eq!(url.to_string(), "b");
	}

	#[rstest]
	#[case(1, 3, "/bar/1")]
	#[case(0, 2, "/foo/bar")]
	#[case(3, 10, "/12")]
	#[case(9, 12, "")]
	#[case(3, 1, "")]
	fn test_slice_is_clamped(#[case] start: usize, #[case] end: usize, #[case] expected: &str) {
		assert_eq!(sample().slice(start..end).to_string(), expected);
	}

	#[rstest]
	fn test_open_slices() {
		assert_eq!(sample().slice(2..).to_string(), "/1/12");
		assert_eq!(sample().slice(..=1).to_string(), "/foo/bar");
		assert_eq!(sample().slice(..).to_string(), "/foo/bar/1/12");
	}

	#[rstest]
	fn test_segment_index() {
		let url = sample().with_fragment("x");
		assert_eq!(url.segment(1).unwrap().to_string(), "/bar#x");
		assert!(url.segment(4).is_none());
	}

	#[rstest]
	fn test_equality_by_rendered_text() {
		// Arrange
		let a = Url::new(Some("/a"), ["b"]);
		let b = Url::new(None::<String>, ["/a", "b"]);

		// Act
		let set: HashSet<Url> = [a.clone(), b.clone()].into_iter().collect();

		// Assert
		assert_eq!(a, b);
		assert_eq!(set.len(), 1);
	}

	#[rstest]
	fn test_to_html_escapes() {
		let url = sample().with_query(query! { a = 1, b = "<x>" });
		assert_eq!(url.to_html(), "/foo/bar/1/12?a=1&amp;b=%3Cx%3E");
	}

	#[rstest]
	fn test_html_escape_borrows_clean_text() {
		assert_eq!(html_escape("/plain"), Cow::Borrowed("/plain"));
	}
}
