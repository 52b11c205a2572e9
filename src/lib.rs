//! # Routekit
//!
//! Typed route templates and URL construction for request routers.
//!
//! Routes are declared once, either composed with `/` from literals and typed
//! parameters or parsed from their canonical template text. The same route
//! then feeds a path-matching engine at registration time and builds outbound
//! URLs at request time.
//!
//! ## Feature Flags
//!
//! - `router` (default) - registration layer with strict responder signature
//!   validation and the [`Dispatcher`](router::Dispatcher) seam
//!
//! ## Quick Example
//!
//! ```
//! use routekit::prelude::*;
//!
//! let route = (Route::root() / "users" / Str::new("name") / Int::new("id"))
//! 	.finish()
//! 	.unwrap();
//! assert_eq!(route.template(), "/users/{name}/{id:int}");
//!
//! let url = route
//! 	.as_url(values! { name = "ann", id = 4 })
//! 	.unwrap()
//! 	.with_query(query! { tab = "posts", draft = None })
//! 	.with_location("https://example.com");
//! assert_eq!(url.to_string(), "https://example.com/users/ann/4?tab=posts");
//! ```

#[cfg(feature = "router")]
pub mod router;
pub mod urls;

pub use routekit_urls::{
	BoundRoute, IntoRoute, Parameter, Route, RouteCollection, RouteError, RouteResult, Url, query,
	segment, values,
};

#[cfg(feature = "router")]
pub use routekit_router::{Router, RouterSettings};

/// Everyday types.
pub mod prelude {
	pub use crate::{
		BoundRoute, IntoRoute, Parameter, Route, RouteCollection, RouteError, RouteResult, Url,
		query, segment, values,
	};
	pub use routekit_urls::param::{
		Custom, Datetime, Float, Int, Kind, ParamValue, Path, Shorthand, Str, TypedParam, Uuid,
	};
	pub use routekit_urls::{Piece, QueryPolicy, QueryValue, Segment};

	#[cfg(feature = "router")]
	pub use crate::{Router, RouterSettings};
	#[cfg(feature = "router")]
	pub use routekit_router::{
		Dispatcher, Endpoint, HandlerSignature, ResourceId, Responder, validate_responder,
	};
}
