//! Request dispatch and response classification.
//!
//! # Design
//! The upstream API does not use status codes consistently: authorization
//! failures sometimes arrive as 200 with the HTML login page, and server
//! errors may be JSON or a rendered HTML page. `classify` therefore looks at
//! both the status and the shape of the body, and is a pure function of
//! `(method, url, response)` so it can be tested without a network.
//!
//! `Dispatcher::send` issues exactly one request per call, never retries and
//! never swallows a failure.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{Error, Result};
use crate::html;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Issues requests and classifies responses.
pub struct Dispatcher {
    transport: Box<dyn Transport>,
    api_key: Option<String>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Dispatcher over the default blocking transport.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_transport(UreqTransport::new(), api_key)
    }

    pub fn with_transport(transport: impl Transport + 'static, api_key: Option<String>) -> Self {
        Self {
            transport: Box::new(transport),
            api_key,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the request without sending it.
    pub fn build_request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<HttpRequest> {
        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        if let Some(key) = &self.api_key {
            headers.push((API_KEY_HEADER.to_string(), key.clone()));
        }

        let body = match body {
            Some(value) => {
                headers.push(("content-type".to_string(), "application/json".to_string()));
                Some(
                    serde_json::to_string(value)
                        .map_err(|e| Error::Serialization(e.to_string()))?,
                )
            }
            None => None,
        };

        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body,
        })
    }

    /// Send one request and return the decoded payload.
    pub fn send(&self, method: HttpMethod, url: &str, body: Option<&Value>) -> Result<Value> {
        let request = self.build_request(method, url, body)?;
        debug!(%method, url, "dispatching request");
        let response = self.transport.execute(&request)?;
        debug!(%method, url, status = response.status, "classifying response");
        classify(method, url, &response)
    }

    /// Send one request and decode the payload into `T`.
    pub fn send_as<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<T> {
        let payload = self.send(method, url, body)?;
        serde_json::from_value(payload).map_err(|e| Error::Deserialization(e.to_string()))
    }
}

/// Map a response to its payload or the matching error.
pub fn classify(method: HttpMethod, url: &str, response: &HttpResponse) -> Result<Value> {
    match response.status {
        500 => Err(classify_server_error(url, &response.body)),
        404 => Err(Error::NotFound),
        405 => {
            error!(%method, url, "method not allowed; this is a client defect");
            Err(Error::MethodNotAllowed {
                method,
                url: url.to_string(),
            })
        }
        403 => Err(Error::AccessDenied),
        200 => match serde_json::from_str::<Value>(&response.body) {
            Ok(payload) => Ok(payload),
            Err(_) if html::is_login_page(&response.body) => {
                warn!(url, "received the login page instead of a JSON payload");
                Err(Error::AccessDenied)
            }
            Err(_) => {
                warn!(url, "200 response is neither JSON nor the login page");
                Err(Error::unexpected(url, response.body.clone()))
            }
        },
        status => {
            warn!(url, status, "unexpected status code");
            Err(Error::unexpected(url, response.body.clone()))
        }
    }
}

fn classify_server_error(url: &str, body: &str) -> Error {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        if let (Some(Value::String(kind)), Some(message)) =
            (map.get("type"), map.get("message"))
        {
            warn!(url, kind = %kind, "server reported an exception");
            return Error::api(kind.as_str(), exception_message(message));
        }
    }

    match html::error_page(body) {
        Some(page) => {
            warn!(url, kind = %page.kind, "server rendered an error page");
            Error::api(page.kind, page.message)
        }
        None => {
            warn!(url, "server error body could not be parsed");
            Error::unexpected(url, body)
        }
    }
}

/// The `message` of a JSON exception; a non-string value keeps its JSON text.
fn exception_message(message: &Value) -> String {
    match message {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
