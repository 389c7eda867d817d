//! Client-credentials configuration.

// crates.io
use url::form_urlencoded;
// self
use crate::{_prelude::*, auth::Secret};

/// Credentials and scope used for the `client_credentials` exchange.
///
/// Values are taken as supplied; empty strings are passed through to the token endpoint
/// unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
	/// Directory (tenant) identifier templated into the token endpoint path.
	pub tenant_id: String,
	/// Application (client) identifier.
	pub client_id: String,
	/// Client secret sent in the form body.
	pub client_secret: Secret,
	/// Requested scope.
	pub scope: String,
	/// Scheme + host of the token issuer.
	pub authority: String,
}
impl AuthConfig {
	/// Issuer host used unless overridden.
	pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";
	/// Scope requested unless overridden.
	pub const DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";
	/// Grant type sent with every exchange.
	pub const GRANT_TYPE: &str = "client_credentials";

	/// Creates a configuration with the default scope and authority.
	pub fn new(
		tenant_id: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<Secret>,
	) -> Self {
		Self {
			tenant_id: tenant_id.into(),
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			..Default::default()
		}
	}

	/// Replaces the requested scope.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = scope.into();

		self
	}

	/// Points the issuer at another host, keeping the fixed path template.
	pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
		self.authority = authority.into();

		self
	}

	/// Token endpoint: `{authority}/{tenant_id}/oauth2/v2.0/token`.
	pub fn token_endpoint(&self) -> String {
		format!("{}/{}/oauth2/v2.0/token", self.authority.trim_end_matches('/'), self.tenant_id)
	}

	/// Form-encoded exchange body in fixed field order.
	pub fn token_request_form(&self) -> String {
		form_urlencoded::Serializer::new(String::new())
			.append_pair("grant_type", Self::GRANT_TYPE)
			.append_pair("client_id", &self.client_id)
			.append_pair("client_secret", self.client_secret.expose())
			.append_pair("scope", &self.scope)
			.finish()
	}
}
impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			tenant_id: String::new(),
			client_id: String::new(),
			client_secret: Secret::default(),
			scope: Self::DEFAULT_SCOPE.into(),
			authority: Self::DEFAULT_AUTHORITY.into(),
		}
	}
}
