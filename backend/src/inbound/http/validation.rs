//! Request body decoding for inbound HTTP adapters.
//!
//! Handlers receive raw bytes and decode them here so that malformed JSON,
//! non-object payloads, and unknown fields all surface as the same
//! `invalid_request` error body instead of Actix's plain-text extractor
//! errors. An empty body decodes as `{}`.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::domain::Error;

/// Message returned for bodies that are not a JSON object of known fields.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body";

fn invalid_json(reason: impl Into<String>) -> Error {
    Error::invalid_request(INVALID_JSON_MESSAGE).with_details(json!({ "reason": reason.into() }))
}

/// Decode a JSON object body into `T`.
///
/// # Examples
/// ```
/// use serde::Deserialize;
/// use users_api::inbound::http::validation::parse_json_object;
///
/// #[derive(Deserialize, Default)]
/// #[serde(deny_unknown_fields)]
/// struct Payload {
///     name: Option<String>,
/// }
///
/// let empty: Payload = parse_json_object(b"").expect("empty body is {}");
/// assert!(empty.name.is_none());
/// assert!(parse_json_object::<Payload>(b"{\"nope\":1}").is_err());
/// ```
pub fn parse_json_object<T>(body: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(Value::Object(serde_json::Map::new()))
            .map_err(|err| invalid_json(err.to_string()));
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|err| invalid_json(err.to_string()))?;
    if !value.is_object() {
        return Err(invalid_json("request body must be a JSON object"));
    }
    serde_json::from_value(value).map_err(|err| invalid_json(err.to_string()))
}
