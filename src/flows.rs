//! Token issuance built on the injected transport and clock.

pub mod singleflight;

mod client_credentials;

pub use singleflight::*;

// self
use crate::{_prelude::*, auth::AuthConfig, clock::Clock, http::HttpClient};

/// Exchanges client credentials for bearer tokens.
///
/// Every call to [`get_token`](AuthorizationService::get_token) performs a fresh exchange: there
/// is no cache and no guard against parallel callers. Wrap the service in a
/// [`SingleflightAuthorizationService`] when concurrent callers should share one exchange.
#[derive(Clone)]
pub struct AuthorizationService {
	/// Credentials, scope, and issuer host.
	pub config: AuthConfig,
	/// Transport used for the token request.
	pub http_client: Arc<dyn HttpClient>,
	/// Time source used to compute `expires_at`.
	pub clock: Arc<dyn Clock>,
}
impl AuthorizationService {
	/// Creates a service over the provided transport and clock.
	pub fn new(config: AuthConfig, http_client: Arc<dyn HttpClient>, clock: Arc<dyn Clock>) -> Self {
		Self { config, http_client, clock }
	}
}
impl Debug for AuthorizationService {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationService")
			.field("tenant_id", &self.config.tenant_id)
			.field("client_id", &self.config.client_id)
			.field("scope", &self.config.scope)
			.field("token_endpoint", &self.config.token_endpoint())
			.finish()
	}
}

#[cfg(test)]
pub(crate) mod testing {
	//! In-process transport fakes shared by flow tests.

	// self
	use crate::{
		_prelude::*,
		error::TransportError,
		http::{HttpClient, HttpFuture, HttpRequest, HttpResponse},
	};

	/// Replies with a canned response and records every request it sees.
	#[derive(Default)]
	pub(crate) struct RecordingHttpClient {
		pub(crate) status: u16,
		pub(crate) status_text: &'static str,
		pub(crate) body: &'static str,
		pub(crate) requests: Mutex<Vec<HttpRequest>>,
	}
	impl RecordingHttpClient {
		pub(crate) fn replying(status: u16, status_text: &'static str, body: &'static str) -> Self {
			Self { status, status_text, body, requests: Default::default() }
		}

		pub(crate) fn recorded(&self) -> Vec<HttpRequest> {
			self.requests.lock().clone()
		}
	}
	impl HttpClient for RecordingHttpClient {
		fn send<'a>(&'a self, request: &'a HttpRequest) -> HttpFuture<'a, HttpResponse> {
			Box::pin(async move {
				self.requests.lock().push(request.clone());

				tokio::task::yield_now().await;

				Ok(HttpResponse::new(
					self.status,
					self.status_text,
					[("content-type".to_owned(), "application/json".to_owned())],
					self.body.as_bytes(),
				))
			})
		}
	}

	/// Fails every exchange with a refused connection and counts the attempts.
	#[derive(Default)]
	pub(crate) struct RefusingHttpClient {
		pub(crate) attempts: Mutex<usize>,
	}
	impl HttpClient for RefusingHttpClient {
		fn send<'a>(&'a self, _request: &'a HttpRequest) -> HttpFuture<'a, HttpResponse> {
			Box::pin(async move {
				*self.attempts.lock() += 1;

				Err(TransportError::network(std::io::Error::new(
					std::io::ErrorKind::ConnectionRefused,
					"connection refused",
				))
				.into())
			})
		}
	}
}
