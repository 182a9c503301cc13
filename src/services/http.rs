//! HTTP transport seam
//!
//! Everything that talks to GitHub goes through [`HttpTransport`], so the
//! fetch logic can be exercised against scripted responses in tests.

use crate::types::Result;
use std::time::Duration;

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Header list passed to a transport
pub type Headers = [(&'static str, String)];

/// Status and raw body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, lossily decoded (for error messages)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Minimal synchronous request/response client
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str, headers: &Headers) -> Result<HttpResponse>;

    fn post(&self, url: &str, headers: &Headers, body: Vec<u8>) -> Result<HttpResponse>;
}

/// Production transport backed by `reqwest::blocking`
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<HttpResponse> {
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, headers: &Headers) -> Result<HttpResponse> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        self.send(request)
    }

    fn post(&self, url: &str, headers: &Headers, body: Vec<u8>) -> Result<HttpResponse> {
        let mut request = self.client.post(url).body(body);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        self.send(request)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted transport for tests

    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: &'static str,
        pub url: String,
        pub headers: Vec<(&'static str, String)>,
        pub body: Vec<u8>,
    }

    impl RecordedRequest {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }
    }

    type Responder = dyn Fn(&str) -> Result<HttpResponse> + Send + Sync;

    /// Answers every request through `responder(url)` and records it
    pub struct ScriptedTransport {
        responder: Box<Responder>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl ScriptedTransport {
        pub fn new<F>(responder: F) -> Self
        where
            F: Fn(&str) -> Result<HttpResponse> + Send + Sync + 'static,
        {
            Self {
                responder: Box::new(responder),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn record(&self, method: &'static str, url: &str, headers: &Headers, body: Vec<u8>) {
            self.requests.lock().unwrap().push(RecordedRequest {
                method,
                url: url.to_string(),
                headers: headers.to_vec(),
                body,
            });
        }
    }

    impl HttpTransport for ScriptedTransport {
        fn get(&self, url: &str, headers: &Headers) -> Result<HttpResponse> {
            self.record("GET", url, headers, Vec::new());
            (self.responder)(url)
        }

        fn post(&self, url: &str, headers: &Headers, body: Vec<u8>) -> Result<HttpResponse> {
            self.record("POST", url, headers, body);
            (self.responder)(url)
        }
    }
}
