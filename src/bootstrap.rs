//! Process-start wiring: build the clock, transport, and token issuer, then register them under
//! fixed keys.

// self
use crate::{
	_prelude::*,
	auth::AuthConfig,
	clock::Clock,
	error::ConfigError,
	flows::AuthorizationService,
	http::{HttpClient, HttpClientConfig},
	registry::{ServiceKey, ServiceRegistry},
};
#[cfg(feature = "reqwest")]
use crate::{
	clock::SystemClock,
	http::ReqwestHttpClient,
	obs::{self, OperationKind, OperationSpan, Outcome},
};

/// Key of the shared [`Clock`].
pub const CLOCK: ServiceKey<dyn Clock> = ServiceKey::new("clock");
/// Key of the shared [`HttpClient`].
pub const HTTP_CLIENT: ServiceKey<dyn HttpClient> = ServiceKey::new("http_client");
/// Key of the [`AuthorizationService`].
pub const AUTHORIZATION_SERVICE: ServiceKey<AuthorizationService> =
	ServiceKey::new("authorization_service");

/// Everything bootstrap needs from the outside world.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
	/// Token issuer configuration.
	pub auth: AuthConfig,
	/// Transport configuration.
	pub http: HttpClientConfig,
}
impl BootstrapConfig {
	/// Tenant identifier variable.
	pub const TENANT_ID_VAR: &str = "APP_TENANT_ID";
	/// Client identifier variable.
	pub const CLIENT_ID_VAR: &str = "APP_CLIENT_ID";
	/// Client secret variable.
	pub const CLIENT_SECRET_VAR: &str = "APP_CLIENT_SECRET";
	/// Scope variable.
	pub const SCOPE_VAR: &str = "APP_SCOPE";
	/// Issuer host variable.
	pub const AUTHORITY_VAR: &str = "APP_AUTHORITY";
	/// Transport base URL variable.
	pub const HTTP_BASE_URL_VAR: &str = "APP_HTTP_BASE_URL";
	/// Transport timeout variable, in milliseconds.
	pub const HTTP_TIMEOUT_MS_VAR: &str = "APP_HTTP_TIMEOUT_MS";

	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads the configuration through `lookup`.
	///
	/// Missing credentials become empty strings. Empty scope, authority, and base URL values count
	/// as unset, as does a timeout of `0`.
	pub fn from_lookup<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let present = |name: &str| lookup(name).filter(|value: &String| !value.is_empty());
		let mut auth = AuthConfig::new(
			lookup(Self::TENANT_ID_VAR).unwrap_or_default(),
			lookup(Self::CLIENT_ID_VAR).unwrap_or_default(),
			lookup(Self::CLIENT_SECRET_VAR).unwrap_or_default(),
		);

		if let Some(scope) = present(Self::SCOPE_VAR) {
			auth.scope = scope;
		}
		if let Some(authority) = present(Self::AUTHORITY_VAR) {
			auth.authority = authority;
		}

		let mut http = HttpClientConfig {
			base_url: present(Self::HTTP_BASE_URL_VAR),
			..Default::default()
		};

		if let Some(raw) = present(Self::HTTP_TIMEOUT_MS_VAR) {
			let timeout_ms = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
				name: Self::HTTP_TIMEOUT_MS_VAR,
				value: raw.clone(),
			})?;

			if timeout_ms != 0 {
				http.timeout_ms = timeout_ms;
			}
		}

		Ok(Self { auth, http })
	}
}

/// Builds the default services and returns the populated registry.
///
/// Construction order is clock, transport, token issuer. The first failure is returned and no
/// registry is produced.
#[cfg(feature = "reqwest")]
pub fn bootstrap(config: BootstrapConfig) -> Result<ServiceRegistry> {
	const KIND: OperationKind = OperationKind::Bootstrap;

	let _span = OperationSpan::new(KIND, "bootstrap").entered();

	obs::record_outcome(KIND, Outcome::Attempt);

	let result = build_default(config);

	obs::record_outcome(KIND, Outcome::of(&result));

	result
}

#[cfg(feature = "reqwest")]
fn build_default(config: BootstrapConfig) -> Result<ServiceRegistry> {
	let clock: Arc<dyn Clock> = Arc::new(SystemClock);
	let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new(&config.http)?);

	Ok(bootstrap_with(config.auth, clock, http_client))
}

/// Registers caller-built transport and clock plus an [`AuthorizationService`] wired to them.
pub fn bootstrap_with(
	auth: AuthConfig,
	clock: Arc<dyn Clock>,
	http_client: Arc<dyn HttpClient>,
) -> ServiceRegistry {
	let authorization =
		Arc::new(AuthorizationService::new(auth, http_client.clone(), clock.clone()));
	let registry = ServiceRegistry::new();

	registry.register(CLOCK, clock);
	registry.register(HTTP_CLIENT, http_client);
	registry.register(AUTHORIZATION_SERVICE, authorization);

	registry
}
