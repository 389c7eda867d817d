//! Client Credentials exchange against the fixed token endpoint.

// self
use crate::{
	_prelude::*,
	auth::{AuthToken, TokenResponse},
	flows::AuthorizationService,
	http::HttpRequest,
	obs::{self, OperationKind, OperationSpan, Outcome},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

impl AuthorizationService {
	/// Performs one `client_credentials` exchange and stamps the result with an expiry from the
	/// injected clock.
	///
	/// A non-2xx reply fails with [`Error::HttpStatus`]; transport failures pass through as
	/// [`Error::Transport`]. Nothing is retried.
	pub async fn get_token(&self) -> Result<AuthToken> {
		const KIND: OperationKind = OperationKind::GetToken;

		let span = OperationSpan::new(KIND, "client_credentials");

		obs::record_outcome(KIND, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let request = self.token_request();
				let response =
					self.http_client.send(&request).await?.ensure_success_status_code()?;
				let payload = response.json::<TokenResponse>()?;

				Ok(AuthToken::issue(payload, self.clock.as_ref()))
			})
			.await;

		obs::record_outcome(KIND, Outcome::of(&result));

		result
	}

	/// Request descriptor sent by [`get_token`](AuthorizationService::get_token).
	pub fn token_request(&self) -> HttpRequest {
		HttpRequest::post(self.config.token_endpoint())
			.header("Content-Type", FORM_CONTENT_TYPE)
			.body(self.config.token_request_form())
	}
}
