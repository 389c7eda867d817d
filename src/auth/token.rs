//! Bearer token issued by the client-credentials exchange.

// self
use crate::{_prelude::*, auth::Secret, clock::Clock};

/// Token endpoint payload.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
	/// Issued access token.
	pub access_token: Secret,
	/// Token type, typically `Bearer`.
	pub token_type: String,
	/// Lifetime in seconds counted from issuance.
	pub expires_in: i64,
}

/// Immutable bearer token with its absolute expiry.
///
/// The token carries no validity check of its own; consumers compare
/// [`expires_at`](AuthToken::expires_at) against their own clock.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
	/// Access token secret; callers must avoid logging it.
	pub access_token: Secret,
	/// Token type used as the `Authorization` scheme.
	pub token_type: String,
	/// Lifetime in seconds as reported by the issuer.
	pub expires_in: i64,
	/// Issuance instant plus [`expires_in`](AuthToken::expires_in).
	pub expires_at: OffsetDateTime,
}
impl AuthToken {
	/// Stamps `response` with an expiry computed from `clock`.
	pub fn issue(response: TokenResponse, clock: &dyn Clock) -> Self {
		let expires_at = clock.add_seconds(clock.now(), response.expires_in);

		Self {
			access_token: response.access_token,
			token_type: response.token_type,
			expires_in: response.expires_in,
			expires_at,
		}
	}

	/// Value for the `Authorization` header: `"{token_type} {access_token}"`.
	pub fn authorization_value(&self) -> String {
		format!("{} {}", self.token_type, self.access_token.expose())
	}
}
impl Debug for AuthToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthToken")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("expires_in", &self.expires_in)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;
	use crate::clock::FixedClock;

	fn response(expires_in: i64) -> TokenResponse {
		serde_json::from_value(serde_json::json!({
			"access_token": "X",
			"token_type": "Bearer",
			"expires_in": expires_in,
		}))
		.expect("Token payload fixture should deserialize.")
	}

	#[test]
	fn issue_adds_lifetime_to_clock_now() {
		let clock = FixedClock::new(macros::datetime!(2023-01-01 12:00 UTC));
		let token = AuthToken::issue(response(3600), &clock);

		assert_eq!(token.access_token.expose(), "X");
		assert_eq!(token.token_type, "Bearer");
		assert_eq!(token.expires_in, 3600);
		assert_eq!(token.expires_at, macros::datetime!(2023-01-01 13:00 UTC));
	}

	#[test]
	fn authorization_value_joins_type_and_token() {
		let clock = FixedClock::new(macros::datetime!(2023-01-01 12:00 UTC));
		let token = AuthToken::issue(response(60), &clock);

		assert_eq!(token.authorization_value(), "Bearer X");
	}

	#[test]
	fn debug_redacts_access_token() {
		let clock = FixedClock::new(macros::datetime!(2023-01-01 12:00 UTC));
		let rendered = format!("{:?}", AuthToken::issue(response(60), &clock));

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("\"X\""));
	}

	#[test]
	fn payload_ignores_extra_fields() {
		let payload: TokenResponse = serde_json::from_str(
			"{\"access_token\":\"a\",\"token_type\":\"Bearer\",\"expires_in\":10,\"ext_expires_in\":10}",
		)
		.expect("Extra fields should be ignored.");

		assert_eq!(payload.expires_in, 10);
	}
}
