//! Uniform response shape produced by every transport.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::_prelude::*;

/// Completed HTTP exchange.
///
/// Any status code, including 4xx and 5xx, yields a response; success is a property derived from
/// the status and checked on demand.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpResponse {
	status: u16,
	status_text: String,
	headers: BTreeMap<String, String>,
	body: Vec<u8>,
}
impl HttpResponse {
	/// Assembles a response. Header names are stored lower-cased.
	pub fn new(
		status: u16,
		status_text: impl Into<String>,
		headers: impl IntoIterator<Item = (String, String)>,
		body: impl Into<Vec<u8>>,
	) -> Self {
		let headers =
			headers.into_iter().map(|(name, value)| (name.to_ascii_lowercase(), value)).collect();

		Self { status, status_text: status_text.into(), headers, body: body.into() }
	}

	/// Numeric status code.
	pub fn status(&self) -> u16 {
		self.status
	}

	/// Reason phrase accompanying the status code.
	pub fn status_text(&self) -> &str {
		&self.status_text
	}

	/// Response headers keyed by lower-cased name.
	pub fn headers(&self) -> &BTreeMap<String, String> {
		&self.headers
	}

	/// Looks up a header value ignoring the name's case.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
	}

	/// Raw body bytes.
	pub fn body(&self) -> &[u8] {
		&self.body
	}

	/// Body decoded as UTF-8, replacing invalid sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Decodes the body as JSON into `T`.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut de = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| Error::ResponseParse { source, status: self.status })
	}

	/// Returns `true` iff the status lies in `[200, 300)`.
	pub fn is_success_status_code(&self) -> bool {
		is_success_status(self.status)
	}

	/// Passes the response through when successful, otherwise fails with
	/// [`Error::HttpStatus`] carrying the status and status text.
	pub fn ensure_success_status_code(self) -> Result<Self> {
		if self.is_success_status_code() {
			Ok(self)
		} else {
			Err(Error::HttpStatus { status: self.status, status_text: self.status_text })
		}
	}
}
impl Debug for HttpResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("HttpResponse")
			.field("status", &self.status)
			.field("status_text", &self.status_text)
			.field("headers", &self.headers)
			.field("body_len", &self.body.len())
			.finish()
	}
}

/// Success predicate shared by every response.
pub fn is_success_status(status: u16) -> bool {
	(200..300).contains(&status)
}
