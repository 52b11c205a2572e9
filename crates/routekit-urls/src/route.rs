//! Structural route model and its composition algebra.
//!
//! A [`Route`] is an ordered list of [`Segment`]s; a segment is a run of
//! literal text and [`Parameter`] chunks with no separator between them.
//! Routes are immutable: every composition step yields a new value.
//!
//! # Examples
//!
//! ```
//! use routekit_urls::param::{Int, Str};
//! use routekit_urls::{Route, Shorthand};
//!
//! let route = (Route::root()
//! 	/ "users"
//! 	/ Str::new("user")
//! 	/ ("post_" + Int::new("post") + ".html")
//! 	/ Shorthand::typed::<f64>("score"))
//! 	.finish()
//! 	.unwrap();
//!
//! assert_eq!(
//! 	route.to_string(),
//! 	"/users/{user}/post_{post:int}.html/{score:float}"
//! );
//! ```

use crate::error::{InterpolationError, RouteError, RouteResult, StructuralError, SyntaxError};
use crate::param::{
	Custom, Datetime, Float, Int, ParamValue, Parameter, Path, Shorthand, Str, TypedParam, Uuid,
	is_valid_name,
};
use crate::url::Url;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;
use std::ops::{Add, Div};
use std::str::FromStr;

/// One piece of a segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
	Literal(String),
	Param(Parameter),
}

impl fmt::Display for Chunk {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(text) => f.write_str(text),
			Self::Param(param) => f.write_str(&param.grammar_fragment()),
		}
	}
}

/// A single `/`-delimited component of a route.
///
/// Adjacent literals are merged and empty literals dropped, so the same
/// sequence of text and parameters always has the same structure however it
/// was concatenated. An empty segment renders as the empty string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segment {
	chunks: Vec<Chunk>,
}

impl Segment {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn chunks(&self) -> &[Chunk] {
		&self.chunks
	}

	pub fn is_empty(&self) -> bool {
		self.chunks.is_empty()
	}

	pub fn params(&self) -> impl Iterator<Item = &Parameter> {
		self.chunks.iter().filter_map(|chunk| match chunk {
			Chunk::Param(param) => Some(param),
			Chunk::Literal(_) => None,
		})
	}

	pub(crate) fn push_literal(&mut self, text: &str) {
		if text.is_empty() {
			return;
		}
		if let Some(Chunk::Literal(last)) = self.chunks.last_mut() {
			last.push_str(text);
		} else {
			self.chunks.push(Chunk::Literal(text.to_string()));
		}
	}

	pub(crate) fn push_param(&mut self, param: Parameter) {
		self.chunks.push(Chunk::Param(param));
	}

	fn append(&mut self, other: Segment) {
		for chunk in other.chunks {
			match chunk {
				Chunk::Literal(text) => self.push_literal(&text),
				Chunk::Param(param) => self.push_param(param),
			}
		}
	}

	// Text that the template grammar could not read back.
	fn check_text(&self) -> Result<(), StructuralError> {
		for chunk in &self.chunks {
			match chunk {
				Chunk::Literal(text) if text.contains(['{', '}']) => {
					return Err(StructuralError::BraceInLiteral(text.clone()));
				}
				Chunk::Param(param) => {
					if let Some(dt) = param.as_datetime()
						&& dt.format_quote().is_none()
					{
						return Err(StructuralError::UnquotableFormat(
							dt.format_string().unwrap_or_default().to_string(),
						));
					}
				}
				Chunk::Literal(_) => {}
			}
		}
		Ok(())
	}

	fn interpolate(
		&self,
		values: &IndexMap<String, ParamValue>,
	) -> Result<String, InterpolationError> {
		let mut out = String::new();
		for chunk in &self.chunks {
			match chunk {
				Chunk::Literal(text) => out.push_str(text),
				Chunk::Param(param) => {
					// presence is checked by the caller
					if let Some(value) = values.get(param.name()) {
						out.push_str(&param.interpolate(value)?);
					}
				}
			}
		}
		Ok(out)
	}
}

impl fmt::Display for Segment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for chunk in &self.chunks {
			write!(f, "{chunk}")?;
		}
		Ok(())
	}
}

impl From<&str> for Segment {
	fn from(text: &str) -> Self {
		let mut segment = Self::default();
		segment.push_literal(text);
		segment
	}
}

impl From<String> for Segment {
	fn from(text: String) -> Self {
		Self::from(text.as_str())
	}
}

impl<T: Into<Segment>> Add<T> for Segment {
	type Output = Segment;

	fn add(mut self, rhs: T) -> Segment {
		self.append(rhs.into());
		self
	}
}

impl Add<Segment> for &str {
	type Output = Segment;

	fn add(self, rhs: Segment) -> Segment {
		Segment::from(self) + rhs
	}
}

impl Add<Segment> for String {
	type Output = Segment;

	fn add(self, rhs: Segment) -> Segment {
		Segment::from(self) + rhs
	}
}

// Literal/parameter concatenation without `/` builds a partial segment.
macro_rules! impl_segment_concat {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Segment {
				fn from(param: $ty) -> Self {
					let mut segment = Self::default();
					segment.push_param(param.into());
					segment
				}
			}

			impl From<$ty> for Piece {
				fn from(param: $ty) -> Self {
					Self::Param(param.into())
				}
			}

			impl<T: Into<Segment>> Add<T> for $ty {
				type Output = Segment;

				fn add(self, rhs: T) -> Segment {
					Segment::from(self) + rhs
				}
			}

			impl Add<$ty> for &str {
				type Output = Segment;

				fn add(self, rhs: $ty) -> Segment {
					Segment::from(self) + rhs
				}
			}

			impl Add<$ty> for String {
				type Output = Segment;

				fn add(self, rhs: $ty) -> Segment {
					Segment::from(self) + rhs
				}
			}
		)*
	};
}

impl_segment_concat!(Parameter, Str, Int, Float, Uuid, Datetime, Path, Custom);

/// Anything that can be appended to a route with `/`.
#[derive(Debug, Clone)]
pub enum Piece {
	Literal(String),
	Param(Parameter),
	Shorthand(Shorthand),
	Segment(Segment),
	/// Literals, parameters and shorthands merged into one segment.
	Group(Vec<Piece>),
}

impl Piece {
	fn into_segment(self) -> Result<Segment, StructuralError> {
		let segment = match self {
			Self::Literal(text) => Segment::from(text),
			Self::Param(param) => Segment::from(param),
			Self::Shorthand(shorthand) => Segment::from(shorthand.resolve()?),
			Self::Segment(segment) => segment,
			Self::Group(pieces) => {
				let mut segment = Segment::default();
				for piece in pieces {
					segment.append(piece.into_segment()?);
				}
				segment
			}
		};
		segment.check_text()?;
		Ok(segment)
	}
}

impl From<&str> for Piece {
	fn from(text: &str) -> Self {
		Self::Literal(text.to_string())
	}
}

impl From<String> for Piece {
	fn from(text: String) -> Self {
		Self::Literal(text)
	}
}

impl From<Shorthand> for Piece {
	fn from(shorthand: Shorthand) -> Self {
		Self::Shorthand(shorthand)
	}
}

impl From<Segment> for Piece {
	fn from(segment: Segment) -> Self {
		Self::Segment(segment)
	}
}

impl From<Vec<Piece>> for Piece {
	fn from(pieces: Vec<Piece>) -> Self {
		Self::Group(pieces)
	}
}

impl<const N: usize> From<[Piece; N]> for Piece {
	fn from(pieces: [Piece; N]) -> Self {
		Self::Group(pieces.into())
	}
}

/// Structural model of a URL template.
///
/// Every parameter name in a route is unique.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
	segments: Vec<Segment>,
}

impl Route {
	/// Route without any segment; renders as `""`.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Route holding a single empty segment. Appending to it yields paths
	/// that start with `/`.
	pub fn root() -> Self {
		Self {
			segments: vec![Segment::default()],
		}
	}

	/// Builds a route from ready-made segments.
	///
	/// # Errors
	///
	/// Fails on invalid or duplicate parameter names and on literals
	/// containing braces.
	pub fn from_segments(
		segments: impl IntoIterator<Item = Segment>,
	) -> Result<Self, StructuralError> {
		segments
			.into_iter()
			.try_fold(Self::empty(), |route, segment| {
				route.push(Piece::Segment(segment))
			})
	}

	/// Segments the parser has already validated.
	pub(crate) fn from_validated(segments: Vec<Segment>) -> Self {
		Self { segments }
	}

	/// Parses a template string; see [`crate::template::parse`].
	pub fn parse(template: &str) -> Result<Self, SyntaxError> {
		crate::template::parse(template)
	}

	/// Returns a new route with `piece` appended as one more segment.
	///
	/// # Errors
	///
	/// Fails when the piece brings a parameter whose name is invalid or
	/// already used, when a shorthand cannot be resolved, or when a literal
	/// contains braces.
	pub fn join(&self, piece: impl Into<Piece>) -> Result<Self, StructuralError> {
		self.clone().push(piece.into())
	}

	fn push(mut self, piece: Piece) -> Result<Self, StructuralError> {
		let segment = piece.into_segment()?;
		let mut seen: HashSet<&str> = self.params().map(|p| p.name()).collect();
		for param in segment.params() {
			let name = param.name();
			if !is_valid_name(name) {
				return Err(StructuralError::InvalidParameterName(name.to_string()));
			}
			if !seen.insert(name) {
				return Err(StructuralError::DuplicateParameter(name.to_string()));
			}
		}
		self.segments.push(segment);
		Ok(self)
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	pub fn len(&self) -> usize {
		self.segments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// Whether the first segment is empty, i.e. the template starts with `/`.
	pub fn is_rooted(&self) -> bool {
		self.segments.first().is_some_and(Segment::is_empty)
	}

	/// All parameters in template order.
	pub fn params(&self) -> impl Iterator<Item = &Parameter> {
		self.segments.iter().flat_map(Segment::params)
	}

	pub fn param_names(&self) -> Vec<&str> {
		self.params().map(|p| p.name()).collect()
	}

	pub fn param(&self, name: &str) -> Option<&Parameter> {
		self.params().find(|p| p.name() == name)
	}

	/// Canonical template text.
	pub fn template(&self) -> String {
		crate::template::compile(self)
	}

	/// Interpolates values into a [`Url`].
	///
	/// The value names must match the route's parameter names exactly. For a
	/// rooted route the leading empty segment becomes the Url's empty root, so
	/// [`Url::with_root`] rebases it.
	///
	/// # Errors
	///
	/// Returns [`InterpolationError::MissingValues`] or
	/// [`InterpolationError::UnexpectedValues`] when the names differ, and the
	/// parameter's own error when a value cannot be converted.
	///
	/// # Examples
	///
	/// ```
	/// use routekit_urls::param::{Int, Str};
	/// use routekit_urls::{Route, values};
	///
	/// let route = (Route::root() / "foo" / Str::new("name") / Int::new("id"))
	/// 	.finish()
	/// 	.unwrap();
	/// let url = route.as_url(values! { name = "bar", id = 12 }).unwrap();
	/// assert_eq!(url.to_string(), "/foo/bar/12");
	/// ```
	pub fn as_url<I, K, V>(&self, values: I) -> Result<Url, InterpolationError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<ParamValue>,
	{
		let values: IndexMap<String, ParamValue> = values
			.into_iter()
			.map(|(name, value)| (name.into(), value.into()))
			.collect();

		let missing: Vec<String> = self
			.params()
			.filter(|p| !values.contains_key(p.name()))
			.map(|p| p.name().to_string())
			.collect();
		if !missing.is_empty() {
			return Err(InterpolationError::MissingValues(missing));
		}

		let mut unexpected: Vec<String> = values
			.keys()
			.filter(|name| self.param(name).is_none())
			.cloned()
			.collect();
		if !unexpected.is_empty() {
			unexpected.sort();
			return Err(InterpolationError::UnexpectedValues(unexpected));
		}

		let mut texts = self
			.segments
			.iter()
			.map(|segment| segment.interpolate(&values))
			.collect::<Result<Vec<_>, _>>()?;

		let url = if self.is_rooted() {
			let root = texts.remove(0);
			Url::new(Some(root), texts)
		} else {
			Url::new(None::<String>, texts)
		};
		tracing::trace!(template = %self, url = %url, "interpolated route");
		Ok(url)
	}
}

impl fmt::Display for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.template())
	}
}

impl FromStr for Route {
	type Err = SyntaxError;

	fn from_str(template: &str) -> Result<Self, Self::Err> {
		Self::parse(template)
	}
}

/// Outcome of a `/` composition chain.
///
/// The first failing step is kept and later steps are skipped; call
/// [`PendingRoute::finish`] to get the route or the error.
#[derive(Debug, Clone)]
#[must_use = "a composed route does nothing until finished"]
pub struct PendingRoute(Result<Route, StructuralError>);

impl PendingRoute {
	pub fn finish(self) -> Result<Route, StructuralError> {
		self.0
	}
}

impl From<Route> for PendingRoute {
	fn from(route: Route) -> Self {
		Self(Ok(route))
	}
}

impl<P: Into<Piece>> Div<P> for Route {
	type Output = PendingRoute;

	fn div(self, rhs: P) -> PendingRoute {
		PendingRoute(self.push(rhs.into()))
	}
}

impl<P: Into<Piece>> Div<P> for &Route {
	type Output = PendingRoute;

	fn div(self, rhs: P) -> PendingRoute {
		PendingRoute(self.join(rhs))
	}
}

impl<P: Into<Piece>> Div<P> for PendingRoute {
	type Output = PendingRoute;

	fn div(self, rhs: P) -> PendingRoute {
		PendingRoute(self.0.and_then(|route| route.push(rhs.into())))
	}
}

/// Conversion into a [`Route`], parsing template text when needed.
pub trait IntoRoute {
	fn into_route(self) -> RouteResult<Route>;
}

impl IntoRoute for Route {
	fn into_route(self) -> RouteResult<Route> {
		Ok(self)
	}
}

impl IntoRoute for &Route {
	fn into_route(self) -> RouteResult<Route> {
		Ok(self.clone())
	}
}

impl IntoRoute for PendingRoute {
	fn into_route(self) -> RouteResult<Route> {
		self.finish().map_err(RouteError::from)
	}
}

impl IntoRoute for &str {
	fn into_route(self) -> RouteResult<Route> {
		Route::parse(self).map_err(RouteError::from)
	}
}

impl IntoRoute for String {
	fn into_route(self) -> RouteResult<Route> {
		self.as_str().into_route()
	}
}
