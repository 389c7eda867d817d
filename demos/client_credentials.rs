//! Plays the consumer side: bootstrap the registry from environment-style settings, fetch a token,
//! call an API with it, and report whether the token is still valid.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use oauth2_registry::{
	bootstrap::{self, AUTHORIZATION_SERVICE, BootstrapConfig, CLOCK, HTTP_CLIENT},
	http::HttpRequest,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/demo-tenant/oauth2/v2.0/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let api_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1.0/me").header("authorization", "Bearer demo-access");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"displayName\":\"Demo Service\"}");
		})
		.await;
	let authority = server.base_url();
	let api_base = server.url("/v1.0");
	let config = BootstrapConfig::from_lookup(|name| match name {
		BootstrapConfig::TENANT_ID_VAR => Some("demo-tenant".into()),
		BootstrapConfig::CLIENT_ID_VAR => Some("demo-client".into()),
		BootstrapConfig::CLIENT_SECRET_VAR => Some("super-secret".into()),
		BootstrapConfig::AUTHORITY_VAR => Some(authority.clone()),
		BootstrapConfig::HTTP_BASE_URL_VAR => Some(api_base.clone()),
		_ => None,
	})?;
	let registry = bootstrap::bootstrap(config)?;
	let authorization = registry.get(AUTHORIZATION_SERVICE)?;
	let http_client = registry.get(HTTP_CLIENT)?;
	let clock = registry.get(CLOCK)?;
	let token = authorization.get_token().await?;
	let response = http_client
		.send(&HttpRequest::get("/me").header("Authorization", token.authorization_value()))
		.await?
		.ensure_success_status_code()?;
	let valid = token.expires_at > clock.now();

	println!("Profile: {}.", response.text());
	println!("Token expires at {} ({}).", token.expires_at, if valid { "valid" } else { "expired" });

	token_mock.assert_async().await;
	api_mock.assert_async().await;

	Ok(())
}
