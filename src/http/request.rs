//! Outbound request descriptor.

// self
use crate::{_prelude::*, error::ConfigError};

/// HTTP methods accepted by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
}
impl Method {
	/// Returns the method token as sent on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Request payload: a raw string or a JSON document.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
	/// Sent verbatim.
	Text(String),
	/// Serialized as JSON; `Content-Type: application/json` is added unless already set.
	Json(serde_json::Value),
}
impl From<String> for RequestBody {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
impl From<&str> for RequestBody {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}
impl From<serde_json::Value> for RequestBody {
	fn from(value: serde_json::Value) -> Self {
		Self::Json(value)
	}
}

/// Description of a single outbound request.
///
/// Transports borrow the descriptor and build their own wire message from it, so a descriptor
/// can be sent any number of times and is never altered by sending.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
	/// Request method.
	pub method: Method,
	/// Absolute URL, or a path resolved against the transport's base URL.
	pub url: String,
	/// Header map keyed by lower-cased name.
	pub headers: BTreeMap<String, String>,
	/// Optional payload.
	pub body: Option<RequestBody>,
}
impl HttpRequest {
	/// Creates a body-less request.
	pub fn new(method: Method, url: impl Into<String>) -> Self {
		Self { method, url: url.into(), headers: BTreeMap::new(), body: None }
	}

	/// Shorthand for a `GET` request.
	pub fn get(url: impl Into<String>) -> Self {
		Self::new(Method::Get, url)
	}

	/// Shorthand for a `POST` request.
	pub fn post(url: impl Into<String>) -> Self {
		Self::new(Method::Post, url)
	}

	/// Adds or replaces a header. Names are compared case-insensitively.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		let mut name = name.into();

		name.make_ascii_lowercase();
		self.headers.insert(name, value.into());

		self
	}

	/// Sets the payload.
	pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
		self.body = Some(body.into());

		self
	}

	/// Serializes `value` into a JSON payload.
	pub fn json<T>(self, value: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		let value = serde_json::to_value(value).map_err(ConfigError::from)?;

		Ok(self.body(RequestBody::Json(value)))
	}

	/// Looks up a header value ignoring the name's case.
	pub fn header_value(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_collects_headers_and_body() {
		let request = HttpRequest::post("/items")
			.header("Content-Type", "text/plain")
			.header("X-Trace", "1")
			.body("payload");

		assert_eq!(request.method, Method::Post);
		assert_eq!(request.url, "/items");
		assert_eq!(request.header_value("content-type"), Some("text/plain"));
		assert_eq!(request.header_value("x-trace"), Some("1"));
		assert_eq!(request.body, Some(RequestBody::Text("payload".into())));
	}

	#[test]
	fn header_replaces_regardless_of_case() {
		let request = HttpRequest::get("/items")
			.header("Content-Type", "text/plain")
			.header("content-type", "application/json");

		assert_eq!(request.headers.len(), 1);
		assert_eq!(request.headers.get("content-type").map(String::as_str), Some("application/json"));
		assert_eq!(request.header_value("CONTENT-TYPE"), Some("application/json"));
	}

	#[test]
	fn json_body_serializes_structures() {
		#[derive(Serialize)]
		struct Item<'a> {
			name: &'a str,
			count: u32,
		}

		let request = HttpRequest::post("/items")
			.json(&Item { name: "widget", count: 3 })
			.expect("Serializable payload should convert to JSON.");

		assert_eq!(
			request.body,
			Some(RequestBody::Json(serde_json::json!({ "name": "widget", "count": 3 })))
		);
	}

	#[test]
	fn method_serializes_uppercase() {
		assert_eq!(Method::Get.to_string(), "GET");
		assert_eq!(
			serde_json::to_string(&Method::Post).expect("Method should serialize."),
			"\"POST\""
		);
	}
}
