//! Responders grouped by resource for registration.

use crate::dispatcher::ResourceId;
use crate::signature::HandlerSignature;
use http::Method;
use indexmap::IndexMap;

/// A handler paired with its declared signature.
#[derive(Debug, Clone)]
pub struct Responder<H> {
	signature: HandlerSignature,
	handler: H,
}

impl<H> Responder<H> {
	pub fn new(signature: HandlerSignature, handler: H) -> Self {
		Self { signature, handler }
	}

	pub fn signature(&self) -> &HandlerSignature {
		&self.signature
	}

	pub fn handler(&self) -> &H {
		&self.handler
	}

	pub fn into_handler(self) -> H {
		self.handler
	}
}

/// The responders of one resource, keyed by HTTP method.
///
/// # Examples
///
/// ```
/// use routekit_router::{Endpoint, HandlerSignature, Responder};
///
/// let on_get = HandlerSignature::new("on_get").positional("req").positional("resp");
/// let endpoint = Endpoint::new("users").get(Responder::new(on_get, "list users"));
/// assert_eq!(endpoint.methods().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint<H> {
	resource: ResourceId,
	responders: IndexMap<Method, Responder<H>>,
}

impl<H> Endpoint<H> {
	pub fn new(resource: impl Into<ResourceId>) -> Self {
		Self {
			resource: resource.into(),
			responders: IndexMap::new(),
		}
	}

	/// Endpoint of the catch-all resource.
	pub fn catchall() -> Self {
		Self::new(ResourceId::CATCHALL)
	}

	pub fn from_parts(
		resource: impl Into<ResourceId>,
		responders: impl IntoIterator<Item = (Method, Responder<H>)>,
	) -> Self {
		Self {
			resource: resource.into(),
			responders: responders.into_iter().collect(),
		}
	}

	/// Sets the responder for `method`, replacing any previous one.
	pub fn on(mut self, method: Method, responder: Responder<H>) -> Self {
		self.responders.insert(method, responder);
		self
	}

	pub fn get(self, responder: Responder<H>) -> Self {
		self.on(Method::GET, responder)
	}

	pub fn post(self, responder: Responder<H>) -> Self {
		self.on(Method::POST, responder)
	}

	pub fn put(self, responder: Responder<H>) -> Self {
		self.on(Method::PUT, responder)
	}

	pub fn delete(self, responder: Responder<H>) -> Self {
		self.on(Method::DELETE, responder)
	}

	pub fn options(self, responder: Responder<H>) -> Self {
		self.on(Method::OPTIONS, responder)
	}

	pub fn resource(&self) -> &ResourceId {
		&self.resource
	}

	pub fn methods(&self) -> impl Iterator<Item = &Method> {
		self.responders.keys()
	}

	pub fn responders(&self) -> impl Iterator<Item = (&Method, &Responder<H>)> {
		self.responders.iter()
	}

	pub fn is_empty(&self) -> bool {
		self.responders.is_empty()
	}

	/// Splits into the resource and its bare handlers.
	pub(crate) fn into_handlers(self) -> (ResourceId, IndexMap<Method, H>) {
		let handlers = self
			.responders
			.into_iter()
			.map(|(method, responder)| (method, responder.into_handler()))
			.collect();
		(self.resource, handlers)
	}
}
