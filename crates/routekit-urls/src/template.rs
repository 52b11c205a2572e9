//! Canonical template text.
//!
//! [`compile`] renders a [`Route`] to the grammar consumed by dispatch
//! engines and [`parse`] reads it back:
//!
//! ```text
//! template   := segment ("/" segment)*
//! segment    := (literal | param)*
//! param      := "{" name [":" kind] "}"
//! kind       := "int" ["(" int_args ")"]
//!             | "float" ["(" float_args ")"]
//!             | "uuid" | "dt" ["(" quoted_format ")"] | "path"
//! int_args   := [digit_width] ["," "min=" int] ["," "max=" int]
//! float_args := ["min=" num] ["," "max=" num] ["," "finite=False"]
//! ```
//!
//! For every route built with the composition operators,
//! `compile(&parse(&compile(route))?) == compile(route)`.

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::param::{Datetime, Float, FloatBound, Int, Parameter, Path, Str, TypedParam, Uuid, is_valid_name};
use crate::route::{Route, Segment};
use std::collections::HashSet;

/// Renders a route as canonical template text.
pub fn compile(route: &Route) -> String {
	route
		.segments()
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("/")
}

/// Parses canonical template text into a route.
///
/// Empty segment text (consecutive or trailing `/`) yields an empty segment,
/// so `""` parses to a route with a single empty segment.
///
/// # Errors
///
/// Fails fast on the first unbalanced or nested brace, unknown kind suffix,
/// malformed argument list or repeated parameter name. The error carries the
/// byte offset and the offending fragment.
///
/// # Examples
///
/// ```
/// use routekit_urls::template::{compile, parse};
///
/// let route = parse("/users/{id:int(min=1)}/{slug}").unwrap();
/// assert_eq!(route.param_names(), vec!["id", "slug"]);
/// assert_eq!(compile(&route), "/users/{id:int(min=1)}/{slug}");
///
/// assert!(parse("/users/{id").is_err());
/// ```
pub fn parse(template: &str) -> Result<Route, SyntaxError> {
	let mut segments = Vec::new();
	let mut current = Segment::default();
	let mut literal = String::new();
	let mut seen = HashSet::new();
	let mut pos = 0;

	while let Some(ch) = template[pos..].chars().next() {
		match ch {
			'/' => {
				current.push_literal(&literal);
				literal.clear();
				segments.push(std::mem::take(&mut current));
				pos += 1;
			}
			'{' => {
				let end = find_closing_brace(template, pos)?;
				let span = &template[pos..=end];
				let param = parse_param(span)
					.map_err(|kind| SyntaxError::new(kind, pos, span))?;
				if !seen.insert(param.name().to_string()) {
					return Err(SyntaxError::new(
						SyntaxErrorKind::DuplicateName(param.name().to_string()),
						pos,
						span,
					));
				}
				current.push_literal(&literal);
				literal.clear();
				current.push_param(param);
				pos = end + 1;
			}
			'}' => {
				return Err(SyntaxError::new(
					SyntaxErrorKind::UnbalancedCloseBrace,
					pos,
					"}",
				));
			}
			_ => {
				literal.push(ch);
				pos += ch.len_utf8();
			}
		}
	}
	current.push_literal(&literal);
	segments.push(current);

	let route = Route::from_validated(segments);
	tracing::debug!(template, params = ?route.param_names(), "parsed route template");
	Ok(route)
}

// Quoted text inside a parameter may contain braces.
fn find_closing_brace(template: &str, start: usize) -> Result<usize, SyntaxError> {
	let mut quote: Option<char> = None;
	for (offset, ch) in template[start + 1..].char_indices() {
		let at = start + 1 + offset;
		match (quote, ch) {
			(Some(open), c) if c == open => quote = None,
			(Some(_), _) => {}
			(None, '"' | '\'') => quote = Some(ch),
			(None, '{') => {
				return Err(SyntaxError::new(
					SyntaxErrorKind::NestedBrace,
					at,
					&template[start..=at],
				));
			}
			(None, '}') => return Ok(at),
			_ => {}
		}
	}
	Err(SyntaxError::new(
		SyntaxErrorKind::UnbalancedOpenBrace,
		start,
		&template[start..],
	))
}

fn parse_param(span: &str) -> Result<Parameter, SyntaxErrorKind> {
	let body = &span[1..span.len() - 1];
	let (name, kind) = match body.split_once(':') {
		Some((name, kind)) => (name, Some(kind)),
		None => (body, None),
	};
	if name.is_empty() {
		return Err(SyntaxErrorKind::EmptyName);
	}
	if !is_valid_name(name) {
		return Err(SyntaxErrorKind::InvalidName);
	}

	let Some(kind) = kind else {
		return Ok(Str::new(name).into());
	};
	let (kind, args) = match kind.split_once('(') {
		Some((kind, rest)) => match rest.strip_suffix(')') {
			Some(args) => (kind, Some(args)),
			None => {
				return Err(SyntaxErrorKind::MalformedArguments(
					"missing closing parenthesis".to_string(),
				));
			}
		},
		None => (kind, None),
	};

	match kind {
		"int" => parse_int(name, args),
		"float" => parse_float(name, args),
		"dt" => parse_datetime(name, args),
		"uuid" | "path" if args.is_some() => {
			Err(SyntaxErrorKind::UnexpectedArguments(kind.to_string()))
		}
		"uuid" => Ok(Uuid::new(name).into()),
		"path" => Ok(Path::new(name).into()),
		other => Err(SyntaxErrorKind::UnknownKind(other.to_string())),
	}
}

fn malformed(message: String) -> SyntaxErrorKind {
	SyntaxErrorKind::MalformedArguments(message)
}

/// Splits on commas outside quotes.
fn split_args(args: &str) -> Result<Vec<&str>, SyntaxErrorKind> {
	if args.trim().is_empty() {
		return Ok(Vec::new());
	}
	let mut parts = Vec::new();
	let mut quote: Option<char> = None;
	let mut start = 0;
	for (at, ch) in args.char_indices() {
		match (quote, ch) {
			(Some(open), c) if c == open => quote = None,
			(Some(_), _) => {}
			(None, '"' | '\'') => quote = Some(ch),
			(None, ',') => {
				parts.push(args[start..at].trim());
				start = at + 1;
			}
			_ => {}
		}
	}
	if quote.is_some() {
		return Err(malformed("unterminated quote".to_string()));
	}
	parts.push(args[start..].trim());
	if parts.iter().any(|part| part.is_empty()) {
		return Err(malformed("empty argument".to_string()));
	}
	Ok(parts)
}

fn parse_i64(value: &str) -> Result<i64, SyntaxErrorKind> {
	value
		.trim()
		.parse()
		.map_err(|_| malformed(format!("'{value}' is not an integer")))
}

fn parse_int(name: &str, args: Option<&str>) -> Result<Parameter, SyntaxErrorKind> {
	let mut param = Int::new(name);
	let mut given = HashSet::new();
	for (index, arg) in split_args(args.unwrap_or_default())?.into_iter().enumerate() {
		let (key, value) = match arg.split_once('=') {
			Some((key, value)) => (key.trim(), value),
			None if index == 0 => ("num_digits", arg),
			None => {
				return Err(malformed(format!(
					"positional argument '{arg}' must come first"
				)));
			}
		};
		if !given.insert(key) {
			return Err(malformed(format!("argument '{key}' given twice")));
		}
		let value = parse_i64(value)?;
		param = match key {
			"num_digits" => param.with_digit_width(value),
			"min" => param.with_min(value),
			"max" => param.with_max(value),
			other => return Err(malformed(format!("unknown int argument '{other}'"))),
		};
	}
	Ok(param.into())
}

fn parse_bound(value: &str) -> Result<FloatBound, SyntaxErrorKind> {
	let value = value.trim();
	if let Ok(int) = value.parse::<i64>() {
		return Ok(FloatBound::Int(int));
	}
	value
		.parse::<f64>()
		.map(FloatBound::Float)
		.map_err(|_| malformed(format!("'{value}' is not a number")))
}

fn parse_float(name: &str, args: Option<&str>) -> Result<Parameter, SyntaxErrorKind> {
	let mut param = Float::new(name);
	let mut given = HashSet::new();
	for arg in split_args(args.unwrap_or_default())? {
		let Some((key, value)) = arg.split_once('=') else {
			return Err(malformed(format!(
				"float arguments are keyword only, got '{arg}'"
			)));
		};
		let key = key.trim();
		if !given.insert(key) {
			return Err(malformed(format!("argument '{key}' given twice")));
		}
		param = match key {
			"min" => param.with_min(parse_bound(value)?),
			"max" => param.with_max(parse_bound(value)?),
			"finite" => match value.trim() {
				"True" => param.with_finite(true),
				"False" => param.with_finite(false),
				other => return Err(malformed(format!("finite expects True or False, got '{other}'"))),
			},
			other => return Err(malformed(format!("unknown float argument '{other}'"))),
		};
	}
	Ok(param.into())
}

fn parse_datetime(name: &str, args: Option<&str>) -> Result<Parameter, SyntaxErrorKind> {
	let Some(args) = args else {
		return Ok(Datetime::new(name).into());
	};
	match split_args(args)?.as_slice() {
		[format] => {
			let inner = ['"', '\''].into_iter().find_map(|quote| {
				format
					.strip_prefix(quote)
					.and_then(|rest| rest.strip_suffix(quote))
					.filter(|inner| !inner.contains(quote))
			});
			match inner {
				Some(format_string) => Ok(Datetime::new(name).with_format(format_string).into()),
				None => Err(malformed(format!("format '{format}' must be quoted"))),
			}
		}
		_ => Err(malformed("dt takes exactly one quoted format".to_string())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case("")]
	#[case("/")]
	#[case("/foo/bar/")]
	#[case("//a//")]
	#[case("relative/{x}")]
	#[case("/{foo}/s/{bar:int}/{baz:float(min=-10.33, max=50.123)}/{far:int(3, max=42)}/{uu:uuid}/{dt:dt(\"%Y\")}/user_{user}_id/")]
	#[case("/{a:int(-1, max=10)}")]
	#[case("/{a:int(0)}")]
	#[case("/{a:float(min=1, finite=False)}")]
	#[case("/{a:float(min=1.0, max=2.5)}")]
	#[case("/{rest:path}")]
	#[case("/files/{when:dt(\"%Y/%m/%d\")}.tar")]
	#[case("/{a}{b:int}{c:uuid}")]
	#[case("/{d:dt('%Y\"x')}")]
	#[case("/{d:dt(\"%H'%M\")}")]
	#[case("/{a:float(min=1e-07, max=1e+16)}")]
	fn test_canonical_text_round_trips(#[case] template: &str) {
		// Act
		let route = parse(template).unwrap();

		// Assert
		assert_eq!(compile(&route), template);
	}

	#[rstest]
	#[case("/{a:int(num_digits=3)}", "/{a:int(3)}")]
	#[case("/{a:int( 3 ,max=4 )}", "/{a:int(3, max=4)}")]
	#[case("/{a:int()}", "/{a:int}")]
	#[case("/{a:float(finite=True)}", "/{a:float}")]
	#[case("/{a:dt('%Y')}", "/{a:dt(\"%Y\")}")]
	fn test_parse_normalizes(#[case] template: &str, #[case] expected: &str) {
		assert_eq!(compile(&parse(template).unwrap()), expected);
	}

	#[rstest]
	fn test_empty_segments_preserved() {
		let route = parse("/a//b/").unwrap();
		assert_eq!(route.len(), 5);
		assert!(route.segments()[2].is_empty());
		assert!(route.segments()[4].is_empty());
	}

	#[rstest]
	fn test_parsed_constraints() {
		// Act
		let route = parse("/{far:int(3, max=42)}").unwrap();

		// Assert
		match route.param("far") {
			Some(Parameter::Int(int)) => {
				assert_eq!(int.digit_width(), Some(3));
				assert_eq!(int.max(), Some(42));
				assert_eq!(int.min(), None);
			}
			other => panic!("unexpected parameter {other:?}"),
		}
	}

	#[rstest]
	#[case("/{a", SyntaxErrorKind::UnbalancedOpenBrace, 1)]
	#[case("/a}", SyntaxErrorKind::UnbalancedCloseBrace, 2)]
	#[case("/{a{b}}", SyntaxErrorKind::NestedBrace, 3)]
	#[case("/{}", SyntaxErrorKind::EmptyName, 1)]
	#[case("/{:int}", SyntaxErrorKind::EmptyName, 1)]
	#[case("/{1a}", SyntaxErrorKind::InvalidName, 1)]
	#[case("/{a:str}", SyntaxErrorKind::UnknownKind("str".to_string()), 1)]
	#[case("/{a:integer}", SyntaxErrorKind::UnknownKind("integer".to_string()), 1)]
	#[case("/{a:uuid(4)}", SyntaxErrorKind::UnexpectedArguments("uuid".to_string()), 1)]
	#[case("/x/{a}/{a:int}", SyntaxErrorKind::DuplicateName("a".to_string()), 7)]
	fn test_syntax_errors(
		#[case] template: &str,
		#[case] kind: SyntaxErrorKind,
		#[case] position: usize,
	) {
		// Act
		let err = parse(template).unwrap_err();

		// Assert
		assert_eq!(err.kind, kind);
		assert_eq!(err.position, position);
	}

	#[rstest]
	#[case("/{a:int(x)}")]
	#[case("/{a:int(min=1, 3)}")]
	#[case("/{a:int(min=1, min=2)}")]
	#[case("/{a:int(step=2)}")]
	#[case("/{a:float(1.5)}")]
	#[case("/{a:float(finite=maybe)}")]
	#[case("/{a:dt(%Y)}")]
	#[case("/{a:dt(\"%Y\", \"%m\")}")]
	#[case("/{a:int(3}")]
	#[case("/{a:int(1,,2)}")]
	#[case("/{a:dt(\"%Y\" \"%m\")}")]
	fn test_malformed_arguments(#[case] template: &str) {
		let err = parse(template).unwrap_err();
		assert!(
			matches!(err.kind, SyntaxErrorKind::MalformedArguments(_)),
			"{template}: {err}"
		);
	}

	#[rstest]
	fn test_error_names_fragment() {
		let err = parse("/ok/{id:bogus}/x").unwrap_err();
		assert_eq!(err.fragment, "{id:bogus}");
		assert_eq!(err.to_string(), "unknown parameter kind 'bogus' at position 4: '{id:bogus}'");
	}

	fn literal() -> impl Strategy<Value = String> {
		"[a-z0-9_.~-]{0,6}"
	}

	// One quote kind per format, braces and separators included.
	fn datetime_format() -> impl Strategy<Value = String> {
		prop_oneof!["[%YmdHM{}(),/ \"-]{0,8}", "[%YmdHM{}(),/ '-]{0,8}"]
	}

	fn param(name: String) -> BoxedStrategy<Parameter> {
		let n = name.clone();
		let d = name.clone();
		prop_oneof![
			Just(Str::new(name.clone()).into()),
			(proptest::option::of(-5i64..50), proptest::option::of(-100i64..100), proptest::option::of(-100i64..100))
				.prop_map(move |(width, min, max)| {
					let mut int = Int::new(n.clone());
					if let Some(width) = width {
						int = int.with_digit_width(width);
					}
					if let Some(min) = min {
						int = int.with_min(min);
					}
					if let Some(max) = max {
						int = int.with_max(max);
					}
					int.into()
				}),
			Just(Float::new(name.clone()).with_min(-1.5).with_finite(false).into()),
			Just(Float::new(name.clone()).with_min(1e-7).with_max(1.5e16).into()),
			Just(Uuid::new(name.clone()).into()),
			datetime_format().prop_map(move |format| Datetime::new(d.clone()).with_format(format).into()),
			Just(Path::new(name).into()),
		]
		.boxed()
	}

	fn route() -> impl Strategy<Value = Route> {
		proptest::collection::vec((literal(), proptest::bool::ANY, literal()), 0..6).prop_flat_map(
			|shape| {
				let params: Vec<_> = shape
					.iter()
					.enumerate()
					.map(|(i, _)| param(format!("p{i}")))
					.collect();
				(Just(shape), params)
			},
		)
		.prop_map(|(shape, params)| {
			let mut route = Route::root();
			for ((prefix, with_param, suffix), param) in shape.into_iter().zip(params) {
				let mut segment = Segment::from(prefix);
				if with_param {
					segment = segment + param;
				}
				route = (route / (segment + suffix)).finish().unwrap();
			}
			route
		})
	}

	proptest! {
		#[test]
		fn test_compile_parse_compile_is_stable(route in route()) {
			let text = compile(&route);
			let reparsed = parse(&text).unwrap();
			prop_assert_eq!(compile(&reparsed), text);
		}
	}
}
