//! Route registration and strict responder validation.
//!
//! # Examples
//!
//! ```
//! use routekit::router::{
//! 	DispatchError, DispatchMatch, Dispatcher, Endpoint, HandlerSignature, ResourceId,
//! 	Responder, Router, RouterSettings,
//! };
//!
//! #[derive(Default)]
//! struct Templates(Vec<String>);
//!
//! impl Dispatcher for Templates {
//! 	type Handler = fn();
//!
//! 	fn register(
//! 		&mut self,
//! 		template: &str,
//! 		_resource: ResourceId,
//! 		_responders: indexmap::IndexMap<http::Method, fn()>,
//! 	) -> Result<(), DispatchError> {
//! 		self.0.push(template.to_string());
//! 		Ok(())
//! 	}
//!
//! 	fn find(&self, _path: &str) -> Option<DispatchMatch<'_, fn()>> {
//! 		None
//! 	}
//! }
//!
//! fn show() {}
//!
//! let mut router = Router::with_settings(Templates::default(), RouterSettings::strict());
//! let on_get = HandlerSignature::new("on_get")
//! 	.positional("req")
//! 	.positional("resp")
//! 	.keyword::<String>("slug");
//! router
//! 	.add("/posts/{slug}", [Endpoint::new("posts").get(Responder::new(on_get, show as fn()))])
//! 	.unwrap();
//! assert_eq!(router.dispatcher().0, ["/posts/{slug}"]);
//! ```

pub use routekit_router::*;
