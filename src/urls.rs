//! Route templates, parameters and URL values.
//!
//! # Examples
//!
//! ```
//! use routekit::urls::{Route, values};
//!
//! let route = Route::parse("/posts/{slug}").unwrap();
//! let url = route.as_url(values! { slug = "hello world" }).unwrap();
//! assert_eq!(url.to_string(), "/posts/hello%20world");
//! ```

pub use routekit_urls::*;
