//! Crate-level error types shared by the transport, token issuer, and service registry.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// Transport failures and HTTP error statuses are kept apart: a completed exchange with a
/// non-2xx status is a normal [`HttpResponse`](crate::http::HttpResponse) and only turns into
/// [`Error::HttpStatus`] once the caller asks for it via
/// [`ensure_success_status_code`](crate::http::HttpResponse::ensure_success_status_code).
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Service registry lookup failure.
	#[error(transparent)]
	Registry(#[from] RegistryError),

	/// Exchange completed with a status outside `[200, 300)`.
	#[error("Response status code does not indicate success: {status} ({status_text}).")]
	HttpStatus {
		/// Numeric HTTP status code.
		status: u16,
		/// Canonical reason phrase for the status.
		status_text: String,
	},
	/// Response body could not be decoded into the declared shape.
	#[error("Response body could not be decoded.")]
	ResponseParse {
		/// Structured parsing failure including the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}

/// Configuration and request construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Configured base URL cannot be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Raw base URL.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request URL cannot be parsed or resolved against the base URL.
	#[error("Request URL `{url}` is invalid.")]
	InvalidRequestUrl {
		/// Raw request URL.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request could not be assembled by the transport (bad header name or value).
	#[error("HTTP request could not be built.")]
	InvalidRequest {
		/// Transport-specific builder failure.
		#[source]
		source: BoxError,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	RequestBody(#[from] serde_json::Error),
	/// Environment variable holds a value of the wrong shape.
	#[error("Environment variable `{name}` holds an invalid value `{value}`.")]
	InvalidEnv {
		/// Variable name.
		name: &'static str,
		/// Raw value.
		value: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures: the exchange could not complete.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while sending the request.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request exceeded the configured overall timeout.
	#[error("Request timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for Error {
	fn from(e: ReqwestError) -> Self {
		if e.is_builder() {
			ConfigError::InvalidRequest { source: Box::new(e) }.into()
		} else if e.is_timeout() {
			TransportError::timeout(e).into()
		} else {
			TransportError::network(e).into()
		}
	}
}

/// Service registry failures.
///
/// Both variants indicate a wiring bug rather than an operational condition.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum RegistryError {
	/// No instance was registered under the key.
	#[error("Service `{key}` is not registered.")]
	NotRegistered {
		/// Requested key.
		key: String,
	},
	/// An instance exists under the key but was registered through a key of another type.
	#[error("Service `{key}` is not registered as `{expected}`.")]
	TypeMismatch {
		/// Requested key.
		key: String,
		/// Type name requested by the caller.
		expected: &'static str,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn http_status_error_names_status_and_text() {
		let err = Error::HttpStatus { status: 400, status_text: "Bad Request".into() };
		let message = err.to_string();

		assert!(message.contains("400"));
		assert!(message.contains("Bad Request"));
	}

	#[test]
	fn registry_error_converts_with_key_in_message() {
		let err: Error = RegistryError::NotRegistered { key: "missing".into() }.into();

		assert!(matches!(err, Error::Registry(RegistryError::NotRegistered { .. })));
		assert!(err.to_string().contains("missing"));
		assert!(err.to_string().contains("not registered"));
	}

	#[test]
	fn transport_error_exposes_source() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
		let err: Error = TransportError::network(io).into();
		let source = StdError::source(&err)
			.expect("Transport error should expose the original failure as its source.");

		assert_eq!(source.to_string(), "refused");
	}
}
