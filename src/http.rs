//! Transport primitives.
//!
//! [`HttpClient`] is the crate's only dependency on an HTTP stack. It turns a borrowed
//! [`HttpRequest`] into an [`HttpResponse`] and fails only when the exchange cannot complete
//! (DNS, connect, TLS, timeout). Error statuses come back as ordinary responses; callers opt into
//! failing on them through [`HttpResponse::ensure_success_status_code`].

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;

// std
#[cfg(feature = "reqwest")] use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, error::ConfigError};
#[cfg(feature = "reqwest")] use crate::obs::{self, OperationKind, OperationSpan, Outcome};

/// Boxed future returned by [`HttpClient::send`].
pub type HttpFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Sends request descriptors over the network.
///
/// Implementations must be `Send + Sync + 'static` so a single instance can be shared behind an
/// `Arc<dyn HttpClient>` by the registry and every service that depends on it.
pub trait HttpClient
where
	Self: 'static + Send + Sync,
{
	/// Performs the exchange described by `request`.
	fn send<'a>(&'a self, request: &'a HttpRequest) -> HttpFuture<'a, HttpResponse>;
}

/// Fixed transport configuration supplied at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
	/// Prefix applied to every relative request URL.
	pub base_url: Option<String>,
	/// Overall request timeout in milliseconds.
	pub timeout_ms: u64,
}
impl HttpClientConfig {
	/// Timeout applied when none is configured.
	pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

	/// Sets the base URL prefix.
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());

		self
	}

	/// Timeout actually applied by a transport; `0` means unset and falls back to
	/// [`DEFAULT_TIMEOUT_MS`](Self::DEFAULT_TIMEOUT_MS).
	pub fn effective_timeout_ms(&self) -> u64 {
		if self.timeout_ms == 0 { Self::DEFAULT_TIMEOUT_MS } else { self.timeout_ms }
	}

	/// Sets the overall request timeout.
	pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
		self.timeout_ms = timeout_ms;

		self
	}
}
impl Default for HttpClientConfig {
	fn default() -> Self {
		Self { base_url: None, timeout_ms: Self::DEFAULT_TIMEOUT_MS }
	}
}

/// Joins `url` onto `base` unless `url` is already absolute.
///
/// Exactly one `/` separates the two parts regardless of trailing or leading slashes.
pub fn resolve_url(base: Option<&Url>, url: &str) -> Result<Url> {
	let invalid =
		|source| Error::from(ConfigError::InvalidRequestUrl { url: url.to_owned(), source });

	match Url::parse(url) {
		Ok(absolute) => Ok(absolute),
		Err(url::ParseError::RelativeUrlWithoutBase) => match base {
			Some(base) => {
				let joined = if url.is_empty() {
					base.as_str().to_owned()
				} else {
					format!(
						"{}/{}",
						base.as_str().trim_end_matches('/'),
						url.trim_start_matches('/')
					)
				};

				Url::parse(&joined).map_err(invalid)
			},
			None => Err(invalid(url::ParseError::RelativeUrlWithoutBase)),
		},
		Err(source) => Err(invalid(source)),
	}
}

/// Status text used when a status code has no canonical reason phrase.
pub const UNKNOWN_STATUS_TEXT: &str = "Unknown Status";

#[cfg(feature = "reqwest")]
fn reason_phrase(status: reqwest::StatusCode) -> &'static str {
	status.canonical_reason().unwrap_or(UNKNOWN_STATUS_TEXT)
}

/// Reqwest-backed [`HttpClient`] with a fixed base URL and timeout.
///
/// Redirects are followed with reqwest's default policy, so the response is the final one.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
	client: ReqwestClient,
	base_url: Option<Url>,
	timeout: StdDuration,
}
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client from `config`, failing on an unparsable base URL or a transport that
	/// cannot be constructed.
	pub fn new(config: &HttpClientConfig) -> Result<Self> {
		let base_url = config
			.base_url
			.as_deref()
			.map(|raw| {
				Url::parse(raw)
					.map_err(|source| ConfigError::InvalidBaseUrl { url: raw.to_owned(), source })
			})
			.transpose()?;
		let timeout = StdDuration::from_millis(config.effective_timeout_ms());
		let client = ReqwestClient::builder()
			.timeout(timeout)
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self { client, base_url, timeout })
	}

	/// Base URL applied to relative request URLs.
	pub fn base_url(&self) -> Option<&Url> {
		self.base_url.as_ref()
	}

	/// Overall request timeout.
	pub fn timeout(&self) -> StdDuration {
		self.timeout
	}

	async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
		let url = resolve_url(self.base_url.as_ref(), &request.url)?;
		let method = match request.method {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
		};
		let mut builder = self.client.request(method, url);

		for (name, value) in &request.headers {
			builder = builder.header(name.as_str(), value.as_str());
		}

		match &request.body {
			Some(RequestBody::Text(text)) => builder = builder.body(text.clone()),
			Some(RequestBody::Json(value)) => {
				let payload = serde_json::to_vec(value).map_err(ConfigError::from)?;

				if request.header_value("content-type").is_none() {
					builder = builder.header("content-type", "application/json");
				}

				builder = builder.body(payload);
			},
			None => {},
		}

		let response = builder.send().await?;
		let status = response.status();
		let mut headers = BTreeMap::<String, String>::new();

		for (name, value) in response.headers() {
			let value = String::from_utf8_lossy(value.as_bytes());

			match headers.get_mut(name.as_str()) {
				Some(existing) => {
					existing.push_str(", ");
					existing.push_str(&value);
				},
				None => {
					headers.insert(name.as_str().to_owned(), value.into_owned());
				},
			}
		}

		let body = response.bytes().await?;

		Ok(HttpResponse::new(
			status.as_u16(),
			reason_phrase(status),
			headers,
			body.to_vec(),
		))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.client
	}
}
#[cfg(feature = "reqwest")]
impl HttpClient for ReqwestHttpClient {
	fn send<'a>(&'a self, request: &'a HttpRequest) -> HttpFuture<'a, HttpResponse> {
		const KIND: OperationKind = OperationKind::HttpSend;

		Box::pin(async move {
			let span = OperationSpan::new(KIND, "reqwest");

			obs::record_outcome(KIND, Outcome::Attempt);

			let result = span.instrument(self.execute(request)).await;

			obs::record_outcome(KIND, Outcome::of(&result));

			result
		})
	}
}
