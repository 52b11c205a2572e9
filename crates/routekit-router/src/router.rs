//! Route registration.

use crate::dispatcher::{DispatchMatch, Dispatcher, ResourceId};
use crate::endpoint::{Endpoint, Responder};
use crate::error::{RegistrationError, RegistrationResult};
use crate::settings::RouterSettings;
use crate::signature::validate_responder;
use http::Method;
use routekit_urls::{BoundRoute, InterpolationError, IntoRoute, QueryValue, StructuralError, Url};

/// Registers routes with a [`Dispatcher`], optionally validating responder
/// signatures first.
///
/// # Examples
///
/// ```
/// use indexmap::IndexMap;
/// use routekit_router::{
/// 	DispatchError, DispatchMatch, Dispatcher, Endpoint, HandlerSignature, ResourceId,
/// 	Responder, Router, RouterSettings,
/// };
/// use routekit_urls::values;
///
/// #[derive(Default)]
/// struct Table(Vec<(String, ResourceId, IndexMap<http::Method, &'static str>)>);
///
/// impl Dispatcher for Table {
/// 	type Handler = &'static str;
///
/// 	fn register(
/// 		&mut self,
/// 		template: &str,
/// 		resource: ResourceId,
/// 		responders: IndexMap<http::Method, &'static str>,
/// 	) -> Result<(), DispatchError> {
/// 		self.0.push((template.to_string(), resource, responders));
/// 		Ok(())
/// 	}
///
/// 	fn find(&self, _path: &str) -> Option<DispatchMatch<'_, &'static str>> {
/// 		None
/// 	}
/// }
///
/// let mut router = Router::with_settings(Table::default(), RouterSettings::strict());
/// let on_get = HandlerSignature::new("on_get")
/// 	.positional("req")
/// 	.positional("resp")
/// 	.keyword::<i64>("id");
/// let user = router
/// 	.add("/users/{id:int}", [Endpoint::new("users").get(Responder::new(on_get, "show"))])
/// 	.unwrap();
///
/// assert_eq!(user.url(values! { id = 7 }).unwrap().to_string(), "/users/7");
/// assert_eq!(router.dispatcher().0[0].0, "/users/{id:int}");
/// ```
#[derive(Debug)]
pub struct Router<D: Dispatcher> {
	dispatcher: D,
	settings: RouterSettings,
}

impl<D: Dispatcher + Default> Default for Router<D> {
	fn default() -> Self {
		Self::new(D::default())
	}
}

impl<D: Dispatcher> Router<D> {
	pub fn new(dispatcher: D) -> Self {
		Self::with_settings(dispatcher, RouterSettings::default())
	}

	pub fn with_settings(dispatcher: D, settings: RouterSettings) -> Self {
		Self {
			dispatcher,
			settings,
		}
	}

	pub fn settings(&self) -> &RouterSettings {
		&self.settings
	}

	pub fn dispatcher(&self) -> &D {
		&self.dispatcher
	}

	pub fn dispatcher_mut(&mut self) -> &mut D {
		&mut self.dispatcher
	}

	pub fn into_dispatcher(self) -> D {
		self.dispatcher
	}

	/// Registers `route` for every endpoint and returns it bound for URL
	/// building.
	///
	/// Template text is parsed first. Under strict settings every responder
	/// of every endpoint is validated before anything reaches the
	/// dispatcher, so a failing call registers nothing. Endpoints without
	/// responders are skipped.
	///
	/// # Errors
	///
	/// - [`RegistrationError::Route`] when the template does not parse or
	///   does not begin with `/`
	/// - [`RegistrationError::Handler`] naming the first responder that fails
	///   validation
	/// - [`RegistrationError::Dispatch`] when the dispatcher refuses the route
	pub fn add<R, E>(&mut self, route: R, endpoints: E) -> RegistrationResult<BoundRoute>
	where
		R: IntoRoute,
		E: IntoIterator<Item = Endpoint<D::Handler>>,
	{
		let route = route.into_route()?;
		let template = route.template();
		if !template.starts_with('/') {
			return Err(StructuralError::MissingLeadingSlash(template).into());
		}

		let endpoints: Vec<_> = endpoints
			.into_iter()
			.filter(|endpoint| !endpoint.is_empty())
			.collect();

		if self.settings.strict {
			for endpoint in &endpoints {
				for (method, responder) in endpoint.responders() {
					validate_responder(
						responder.signature(),
						&route,
						&self.settings.responder_prefix,
					)
					.map_err(|source| RegistrationError::Handler {
						handler: responder.signature().name().to_string(),
						method: method.clone(),
						source,
					})?;
				}
			}
		}

		for endpoint in endpoints {
			let (resource, handlers) = endpoint.into_handlers();
			tracing::debug!(
				template = %template,
				resource = %resource,
				methods = ?handlers.keys().collect::<Vec<_>>(),
				strict = self.settings.strict,
				"registering route"
			);
			self.dispatcher.register(&template, resource, handlers)?;
		}

		Ok(BoundRoute::new(route))
	}

	/// Registers the responders of a single resource.
	///
	/// # Errors
	///
	/// See [`Router::add`].
	pub fn add_route<R, I>(
		&mut self,
		route: R,
		resource: impl Into<ResourceId>,
		responders: I,
	) -> RegistrationResult<BoundRoute>
	where
		R: IntoRoute,
		I: IntoIterator<Item = (Method, Responder<D::Handler>)>,
	{
		self.add(route, [Endpoint::from_parts(resource, responders)])
	}

	/// Replaces the query of `url`, treating malformed sequences as the
	/// settings' query policy says.
	///
	/// # Errors
	///
	/// Returns [`InterpolationError::MalformedQuery`] under
	/// [`QueryPolicy::Reject`](routekit_urls::QueryPolicy::Reject).
	pub fn with_query<I, K, V>(&self, url: &Url, pairs: I) -> Result<Url, InterpolationError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<QueryValue>,
	{
		url.with_query_policy(self.settings.query_policy, pairs)
	}

	/// Matches a request path through the dispatcher.
	pub fn find(&self, path: &str) -> Option<DispatchMatch<'_, D::Handler>> {
		self.dispatcher.find(path)
	}

	/// Lets the dispatcher build its matching table.
	///
	/// # Errors
	///
	/// Returns [`RegistrationError::Dispatch`] when the dispatcher fails.
	pub fn compile(&mut self) -> RegistrationResult<()> {
		self.dispatcher.compile()?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{DispatchError, ValidationError};
	use crate::signature::HandlerSignature;
	use indexmap::IndexMap;
	use routekit_urls::param::{Int, Str};
	use routekit_urls::{QueryPolicy, Route, RouteError, query, values};
	use rstest::{fixture, rstest};

	type Registration = (String, ResourceId, IndexMap<Method, &'static str>);

	#[derive(Debug, Default)]
	struct Recording {
		registrations: Vec<Registration>,
		compiled: bool,
		refuse: Option<String>,
	}

	impl Dispatcher for Recording {
		type Handler = &'static str;

		fn register(
			&mut self,
			template: &str,
			resource: ResourceId,
			responders: IndexMap<Method, &'static str>,
		) -> Result<(), DispatchError> {
			if self.refuse.as_deref() == Some(template) {
				return Err(DispatchError::Conflict {
					template: template.to_string(),
				});
			}
			self.registrations
				.push((template.to_string(), resource, responders));
			Ok(())
		}

		fn find(&self, path: &str) -> Option<DispatchMatch<'_, &'static str>> {
			self.registrations
				.iter()
				.find(|(template, _, _)| template == path)
				.map(|(_, resource, responders)| DispatchMatch {
					resource,
					responders,
					params: IndexMap::new(),
				})
		}

		fn compile(&mut self) -> Result<(), DispatchError> {
			self.compiled = true;
			Ok(())
		}
	}

	fn on(name: &str, handler: &'static str) -> Responder<&'static str> {
		Responder::new(
			HandlerSignature::new(name)
				.positional("req")
				.positional("resp")
				.keyword::<String>("name")
				.keyword::<i64>("id"),
			handler,
		)
	}

	fn bad(name: &str) -> Responder<&'static str> {
		Responder::new(
			HandlerSignature::new(name)
				.positional("req")
				.positional("resp")
				.keyword::<String>("name")
				.keyword::<String>("id"),
			"bad",
		)
	}

	#[fixture]
	fn route() -> Route {
		(Route::root() / "users" / Str::new("name") / Int::new("id"))
			.finish()
			.unwrap()
	}

	#[fixture]
	fn strict() -> Router<Recording> {
		Router::with_settings(Recording::default(), RouterSettings::strict())
	}

	#[rstest]
	fn test_add_registers_per_resource(mut strict: Router<Recording>, route: Route) {
		// Act
		let bound = strict
			.add(
				&route,
				[
					Endpoint::new("users").get(on("on_get", "show")),
					Endpoint::new("admin")
						.put(on("on_put", "update"))
						.delete(on("on_delete", "remove")),
					Endpoint::new("empty"),
				],
			)
			.unwrap();

		// Assert
		let registrations = &strict.dispatcher().registrations;
		assert_eq!(registrations.len(), 2);
		assert_eq!(registrations[0].0, "/users/{name}/{id:int}");
		assert_eq!(registrations[0].1, ResourceId::from("users"));
		assert_eq!(
			registrations[1].2.keys().cloned().collect::<Vec<_>>(),
			vec![Method::PUT, Method::DELETE]
		);
		assert_eq!(
			bound
				.url(values! { name = "ann", id = 4 })
				.unwrap()
				.to_string(),
			"/users/ann/4"
		);
	}

	#[rstest]
	fn test_strict_failure_registers_nothing(mut strict: Router<Recording>, route: Route) {
		// Act
		let err = strict
			.add(
				route,
				[
					Endpoint::new("users").get(on("on_get", "show")),
					Endpoint::new("admin").post(bad("on_post")),
				],
			)
			.unwrap_err();

		// Assert
		match err {
			RegistrationError::Handler {
				handler,
				method,
				source,
			} => {
				assert_eq!(handler, "on_post");
				assert_eq!(method, Method::POST);
				assert!(matches!(source, ValidationError::AnnotationMismatch { .. }));
			}
			other => panic!("unexpected error {other:?}"),
		}
		assert!(strict.dispatcher().registrations.is_empty());
	}

	#[rstest]
	fn test_lenient_router_skips_validation(route: Route) {
		// Arrange
		let mut router = Router::new(Recording::default());

		// Act
		let result = router.add_route(route, "users", [(Method::GET, bad("get"))]);

		// Assert
		assert!(result.is_ok());
		assert_eq!(router.dispatcher().registrations.len(), 1);
	}

	#[rstest]
	fn test_custom_prefix(route: Route) {
		// Arrange
		let settings = RouterSettings::strict().with_responder_prefix("handle_");
		let mut router = Router::with_settings(Recording::default(), settings);

		// Act
		let err = router
			.add_route(&route, "users", [(Method::GET, on("on_get", "show"))])
			.unwrap_err();
		let ok = router.add_route(&route, "users", [(Method::GET, on("handle_get", "show"))]);

		// Assert
		assert!(matches!(
			err,
			RegistrationError::Handler {
				source: ValidationError::ResponderName { .. },
				..
			}
		));
		assert!(ok.is_ok());
	}

	#[rstest]
	fn test_template_text_is_parsed(mut strict: Router<Recording>) {
		let bound = strict
			.add("/users/{name}/{id:int}", [Endpoint::catchall().get(on("on_get", "show"))])
			.unwrap();
		assert_eq!(bound.route().param_names(), vec!["name", "id"]);
	}

	#[rstest]
	#[case("users/{id:int}")]
	#[case("")]
	fn test_leading_slash_required(mut strict: Router<Recording>, #[case] template: &str) {
		let err = strict
			.add(template, Vec::<Endpoint<&'static str>>::new())
			.unwrap_err();
		assert!(matches!(
			err,
			RegistrationError::Route(RouteError::Structural(
				StructuralError::MissingLeadingSlash(_)
			))
		));
	}

	#[rstest]
	fn test_bad_template_surfaces_syntax_error(mut strict: Router<Recording>) {
		let err = strict
			.add("/users/{id", Vec::<Endpoint<&'static str>>::new())
			.unwrap_err();
		assert!(matches!(err, RegistrationError::Route(RouteError::Syntax(_))));
	}

	#[rstest]
	fn test_dispatch_error_propagates(route: Route) {
		// Arrange
		let dispatcher = Recording {
			refuse: Some("/users/{name}/{id:int}".to_string()),
			..Recording::default()
		};
		let mut router = Router::new(dispatcher);

		// Act
		let err = router
			.add_route(route, "users", [(Method::GET, on("on_get", "show"))])
			.unwrap_err();

		// Assert
		assert!(matches!(
			err,
			RegistrationError::Dispatch(DispatchError::Conflict { .. })
		));
	}

	#[rstest]
	fn test_find_and_compile(mut strict: Router<Recording>, route: Route) {
		// Arrange
		strict
			.add_route(route, "users", [(Method::GET, on("on_get", "show"))])
			.unwrap();

		// Act
		strict.compile().unwrap();
		let found = strict.find("/users/{name}/{id:int}").unwrap();

		// Assert
		assert_eq!(found.resource, &ResourceId::from("users"));
		assert_eq!(found.responders.get(&Method::GET), Some(&"show"));
		assert!(strict.dispatcher().compiled);
	}

	#[rstest]
	fn test_query_follows_settings_policy(route: Route) {
		// Arrange
		let lenient = Router::new(Recording::default());
		let rejecting = Router::with_settings(
			Recording::default(),
			RouterSettings::default().with_query_policy(QueryPolicy::Reject),
		);
		let url = route.as_url(values! { name = "ann", id = 4 }).unwrap();
		let pairs = || query! { tab = "posts", bad = [vec![1, 2]] };

		// Act
		let kept = lenient.with_query(&url, pairs()).unwrap();
		let err = rejecting.with_query(&url, pairs()).unwrap_err();

		// Assert
		assert_eq!(kept.to_string(), "/users/ann/4?tab=posts");
		assert_eq!(
			err,
			InterpolationError::MalformedQuery {
				key: "bad".to_string()
			}
		);
	}
}
