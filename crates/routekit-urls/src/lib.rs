//! # routekit-urls
//!
//! Typed route templates and URL construction:
//!
//! - **Typed parameters**: a closed set of kinds (`str`, `int`, `float`, `uuid`,
//!   `dt`, `path`) plus user factories, each with its own grammar fragment and
//!   interpolation rule
//! - **Route algebra**: routes composed with `/` from literals, parameters,
//!   partial segments and shorthands
//! - **Template compiler/parser**: canonical text that round-trips through
//!   [`template::parse`] and [`template::compile`]
//! - **Url values**: immutable, with exact path, query and fragment encoding
//! - **Route collections**: named, nested groups of bound routes that can be
//!   rebased onto a root path and location per request
//!
//! # Examples
//!
//! ```
//! use routekit_urls::param::{Float, Int, Str, Uuid};
//! use routekit_urls::{Route, query, values};
//!
//! let route = (Route::root()
//! 	/ "foo" / "bar"
//! 	/ Str::new("str1")
//! 	/ Int::new("int1")
//! 	/ "sep" / Float::new("float1")
//! 	/ "" / Uuid::new("uuid1")
//! 	/ "")
//! 	.finish()
//! 	.unwrap();
//! assert_eq!(
//! 	route.template(),
//! 	"/foo/bar/{str1}/{int1:int}/sep/{float1:float}//{uuid1:uuid}/"
//! );
//!
//! let id = uuid::Uuid::nil();
//! let url = route
//! 	.as_url(values! { str1 = "1", int1 = 2, float1 = 3.14, uuid1 = id })
//! 	.unwrap()
//! 	.with_query(query! { page = 2 });
//! assert_eq!(
//! 	url.to_string(),
//! 	format!("/foo/bar/1/2/sep/3.14//{id}/?page=2")
//! );
//! ```

pub mod bound;
pub mod collection;
pub mod error;
mod macros;
pub mod param;
pub mod query;
pub mod route;
pub mod template;
pub mod url;

pub use bound::BoundRoute;
pub use collection::{Entry, RouteCollection, RouteCollectionBuilder};
pub use error::{
	InterpolationError, RouteError, RouteResult, ShorthandError, StructuralError, SyntaxError,
	SyntaxErrorKind,
};
pub use param::{Kind, ParamValue, Parameter, Shorthand, TypedParam, ValueType};
pub use query::{QueryPolicy, QueryValue};
pub use route::{Chunk, IntoRoute, PendingRoute, Piece, Route, Segment};
pub use template::{compile, parse};
pub use url::Url;
