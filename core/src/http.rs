//! HTTP transport types and the blocking transport used by the dispatcher.
//!
//! # Design
//! Requests and responses are described as plain data. The dispatcher builds
//! an `HttpRequest`, hands it to a `Transport` and classifies the returned
//! `HttpResponse`. Keeping the transport behind a trait lets tests script
//! responses without a network, while `UreqTransport` performs the real
//! round-trip.
//!
//! A transport only fails when no HTTP status is available at all (DNS,
//! connection refused, TLS). Every status code, including 4xx/5xx, comes
//! back as an `HttpResponse` so the dispatcher can classify it.

use std::fmt;

use tracing::trace;

use crate::error::{Error, Result};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Executes one HTTP round-trip.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Blocking transport backed by a `ureq` agent.
///
/// Status codes are never turned into errors by the agent; classification is
/// left entirely to the dispatcher.
///
/// Bodies are read up to `body_limit` bytes (`DEFAULT_BODY_LIMIT` unless
/// changed). A body past the limit is a transport error.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    body_limit: u64,
}

/// Largest response body read by default: 1 GiB. Media listings of big
/// libraries run well past ureq's own 10 MiB default.
pub const DEFAULT_BODY_LIMIT: u64 = 1024 * 1024 * 1024;

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self::with_agent(agent)
    }

    /// Wrap a caller-configured agent (proxy, TLS roots, ...).
    ///
    /// The agent must be built with `http_status_as_error(false)`, otherwise
    /// 4xx/5xx responses surface as transport errors.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self {
            agent,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, limit: u64) -> Self {
        self.body_limit = limit;
        self
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let transport_err = |e: ureq::Error| Error::Transport {
            url: request.url.clone(),
            message: e.to_string(),
        };

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Delete => {
                let mut builder = self.agent.delete(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post | HttpMethod::Put => {
                let mut builder = if request.method == HttpMethod::Post {
                    self.agent.post(&request.url)
                } else {
                    self.agent.put(&request.url)
                };
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(transport_err)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.body_limit)
            .lossy_utf8(true)
            .read_to_string()
            .map_err(transport_err)?;

        trace!(status, bytes = body.len(), url = %request.url, "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_renders_upper_case() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "http://radio.test/api/status".to_string(),
            headers: vec![("X-API-Key".to_string(), "secret".to_string())],
            body: None,
        };
        assert_eq!(req.header("x-api-key"), Some("secret"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn transport_refused_connection_is_transport_error() {
        let transport = UreqTransport::new();
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "http://127.0.0.1:1/api/status".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let err = transport.execute(&req).unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
    }

    /// Serve one canned `200` response on a local port and return its URL.
    fn serve_once(body: String) -> String {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let head = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body.as_bytes());
        });
        format!("http://{addr}/api/station/1/files")
    }

    fn large_listing() -> String {
        let entry = r#"{"id":1,"path":"library/artist/album/track.mp3","title":"Track"}"#;
        let count = 11 * 1024 * 1024 / entry.len() + 1;
        format!("[{}]", vec![entry; count].join(","))
    }

    #[test]
    fn body_over_ten_mebibytes_is_read_whole() {
        let body = large_listing();
        assert!(body.len() > 10 * 1024 * 1024);
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: serve_once(body.clone()),
            headers: Vec::new(),
            body: None,
        };
        let response = UreqTransport::new().execute(&req).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body.len(), body.len());
    }

    #[test]
    fn body_past_configured_limit_is_transport_error() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: serve_once("[1,2,3,4,5,6,7,8,9]".to_string()),
            headers: Vec::new(),
            body: None,
        };
        let err = UreqTransport::new()
            .with_body_limit(4)
            .execute(&req)
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
    }
}
