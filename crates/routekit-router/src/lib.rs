//! # routekit-router
//!
//! Registration layer between route templates and a path-matching engine:
//!
//! - **Router**: parses or accepts a [`Route`](routekit_urls::Route), checks
//!   it starts with `/` and hands the canonical template to a [`Dispatcher`]
//! - **Strict validation**: responders declare a [`HandlerSignature`] whose
//!   keyword-only arguments must match the route's parameters by name and
//!   value type
//! - **Settings**: [`RouterSettings`] loadable from TOML
//!
//! The matching engine itself is not part of this crate; implement
//! [`Dispatcher`] to plug one in.

pub mod dispatcher;
pub mod endpoint;
pub mod error;
pub mod router;
pub mod settings;
pub mod signature;

pub use dispatcher::{DispatchMatch, Dispatcher, ResourceId};
pub use endpoint::{Endpoint, Responder};
pub use error::{
	DispatchError, RegistrationError, RegistrationResult, SettingsError, ValidationError,
};
pub use router::Router;
pub use settings::RouterSettings;
pub use signature::{Arg, ArgKind, HandlerSignature, validate_responder};
