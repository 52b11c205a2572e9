/// Builds interpolation values for [`Route::as_url`](crate::Route::as_url).
///
/// ```
/// use routekit_urls::{ParamValue, values};
///
/// let values = values! { name = "bob", id = 3 };
/// assert_eq!(values[1], ("id", ParamValue::Int(3)));
/// ```
#[macro_export]
macro_rules! values {
	($($name:ident = $value:expr),* $(,)?) => {{
		let values: ::std::vec::Vec<(&'static str, $crate::ParamValue)> = ::std::vec![
			$((::std::stringify!($name), $crate::ParamValue::from($value))),*
		];
		values
	}};
}

/// Builds query arguments for [`Url::with_query`](crate::Url::with_query).
///
/// A value may be any expression convertible into
/// [`QueryValue`](crate::QueryValue), a bracketed list whose elements may have
/// different types, or `None` to omit the key.
///
/// ```
/// use routekit_urls::{QueryValue, query};
///
/// let args = query! { k1 = true, b = [1, 2, "bla"], z = None };
/// assert_eq!(args.len(), 3);
/// assert_eq!(args[2], ("z", QueryValue::None));
/// ```
#[macro_export]
macro_rules! query {
	(@acc [$($out:expr,)*]) => {{
		let query: ::std::vec::Vec<(&'static str, $crate::QueryValue)> = ::std::vec![$($out,)*];
		query
	}};
	(@acc [$($out:expr,)*] $key:ident = None $(, $($rest:tt)*)?) => {
		$crate::query!(@acc [
			$($out,)*
			(::std::stringify!($key), $crate::QueryValue::None),
		] $($($rest)*)?)
	};
	(@acc [$($out:expr,)*] $key:ident = [$($item:expr),* $(,)?] $(, $($rest:tt)*)?) => {
		$crate::query!(@acc [
			$($out,)*
			(
				::std::stringify!($key),
				$crate::QueryValue::Seq(::std::vec![$($crate::QueryValue::from($item)),*]),
			),
		] $($($rest)*)?)
	};
	(@acc [$($out:expr,)*] $key:ident = $value:expr $(, $($rest:tt)*)?) => {
		$crate::query!(@acc [
			$($out,)*
			(::std::stringify!($key), $crate::QueryValue::from($value)),
		] $($($rest)*)?)
	};
	($($body:tt)*) => {
		$crate::query!(@acc [] $($body)*)
	};
}

/// Groups literals, parameters and shorthands into one route segment.
///
/// ```
/// use routekit_urls::param::Uuid;
/// use routekit_urls::{Route, segment};
///
/// let route = (Route::root() / segment!["user_", Uuid::new("id"), "_profile"])
/// 	.finish()
/// 	.unwrap();
/// assert_eq!(route.to_string(), "/user_{id:uuid}_profile");
/// ```
#[macro_export]
macro_rules! segment {
	($($piece:expr),* $(,)?) => {
		$crate::Piece::Group(::std::vec![$($crate::Piece::from($piece)),*])
	};
}

#[cfg(test)]
mod tests {
	use crate::{ParamValue, Piece, QueryValue};
	use rstest::rstest;

	#[rstest]
	fn test_values_keep_order() {
		let values = values! { b = 1, a = "x", };
		assert_eq!(
			values,
			vec![("b", ParamValue::Int(1)), ("a", ParamValue::Str("x".to_string()))]
		);
	}

	#[rstest]
	fn test_query_mixed_forms() {
		// Act
		let args = query! { k1 = true, q = 333, b = [1, 2, 3, 4, "bla"], z = None, f = "444" };

		// Assert
		assert_eq!(args[0], ("k1", QueryValue::Bool(true)));
		assert_eq!(args[1], ("q", QueryValue::Int(333)));
		assert_eq!(
			args[2].1,
			QueryValue::Seq(vec![
				QueryValue::Int(1),
				QueryValue::Int(2),
				QueryValue::Int(3),
				QueryValue::Int(4),
				QueryValue::Str("bla".to_string()),
			])
		);
		assert_eq!(args[3], ("z", QueryValue::None));
		assert_eq!(args[4], ("f", QueryValue::Str("444".to_string())));
	}

	#[rstest]
	fn test_query_empty() {
		assert!(query! {}.is_empty());
	}

	#[rstest]
	fn test_segment_builds_group() {
		let piece = segment!["a", "b"];
		assert!(matches!(piece, Piece::Group(ref pieces) if pieces.len() == 2));
	}
}
