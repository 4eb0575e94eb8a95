use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use yansi::Paint;

use super::error::ApiError;
use crate::config::ConsoleConfig;
use crate::models::{ApiErrorBody, Envelope};

/// Which group of endpoints a call belongs to. The family picks the base URL
/// and how the body is shaped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiFamily {
    /// Infrastructure, identity and tenants: `{success, message, data, ...}`.
    Enveloped,
    /// VM endpoints: the resource itself, errors as `{status, message, ...}`.
    Bare,
}

/// Immutable client settings, fixed when the client is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub vm_api_base_url: String,
    pub timeout: Duration,
    /// Echo every request as a curl command on stderr.
    pub verbose: bool,
}

impl ClientConfig {
    pub fn from_console(config: &ConsoleConfig) -> Self {
        Self {
            api_base_url: config.api_base_url.clone(),
            vm_api_base_url: config.vm_api_base_url.clone(),
            timeout: config.request_timeout,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn base_url(&self, family: ApiFamily) -> &str {
        match family {
            ApiFamily::Enveloped => &self.api_base_url,
            ApiFamily::Bare => &self.vm_api_base_url,
        }
    }
}

/// HTTP client for both API families. Cheap to clone; clones share the
/// connection pool and configuration.
#[derive(Clone, Debug)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

type Query<'a> = &'a [(&'a str, String)];

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        family: ApiFamily,
        path: &str,
        query: Query<'_>,
    ) -> Result<T, ApiError> {
        let body = self.send(family, Method::GET, path, query, None).await?;
        decode(family, &body)
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        family: ApiFamily,
        path: &str,
        payload: &impl Serialize,
    ) -> Result<T, ApiError> {
        let payload = to_json(payload)?;
        let body = self.send(family, Method::POST, path, &[], Some(payload)).await?;
        decode(family, &body)
    }

    /// Enveloped create. An accepted request whose envelope carries no
    /// `data` yields `Ok(None)`.
    pub(crate) async fn create<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &impl Serialize,
    ) -> Result<Option<T>, ApiError> {
        let payload = to_json(payload)?;
        let body = self
            .send(ApiFamily::Enveloped, Method::POST, path, &[], Some(payload))
            .await?;
        open_envelope(&body)
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        family: ApiFamily,
        path: &str,
        payload: &impl Serialize,
    ) -> Result<T, ApiError> {
        let payload = to_json(payload)?;
        let body = self.send(family, Method::PUT, path, &[], Some(payload)).await?;
        decode(family, &body)
    }

    /// POST whose response carries nothing the caller needs.
    pub(crate) async fn post_empty(
        &self,
        family: ApiFamily,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<(), ApiError> {
        let body = self
            .send(family, Method::POST, path, &[], payload.cloned())
            .await?;
        decode_empty(family, &body)
    }

    pub(crate) async fn delete(&self, family: ApiFamily, path: &str) -> Result<(), ApiError> {
        let body = self.send(family, Method::DELETE, path, &[], None).await?;
        decode_empty(family, &body)
    }

    /// GET that keeps the envelope, for endpoints whose `data` is free-form.
    pub(crate) async fn get_envelope(&self, path: &str) -> Result<Envelope<Value>, ApiError> {
        let body = self
            .send(ApiFamily::Enveloped, Method::GET, path, &[], None)
            .await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send(
        &self,
        family: ApiFamily,
        method: Method,
        path: &str,
        query: Query<'_>,
        payload: Option<Value>,
    ) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}{}", self.config.base_url(family), path);
        if self.config.verbose {
            log_curl(&method, &url, query, payload.as_ref());
        }
        tracing::debug!(method = %method, url = %url, "api request");

        let mut req = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(ref p) = payload {
            req = req.json(p);
        }

        let started = Instant::now();
        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let err = self.transport_error(e);
                tracing::warn!(method = %method, url = %url, error = %err, "api request failed");
                return Err(err);
            }
        };
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?
            .to_vec();
        tracing::debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api response"
        );
        if self.config.verbose {
            log_response(status.as_u16(), &body);
        }

        if !status.is_success() {
            let message = ApiErrorBody::parse(&body)
                .and_then(|b| b.server_message().map(str::to_string));
            let err = ApiError::Status {
                status: status.as_u16(),
                message,
            };
            tracing::warn!(method = %method, url = %url, error = %err, "api error response");
            return Err(err);
        }
        Ok(body)
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Transport(format!(
                "timeout of {}ms exceeded",
                self.config.timeout.as_millis()
            ))
        } else {
            ApiError::from(err)
        }
    }
}

fn to_json(payload: &impl Serialize) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<T: DeserializeOwned>(family: ApiFamily, body: &[u8]) -> Result<T, ApiError> {
    match family {
        ApiFamily::Bare => {
            serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
        }
        ApiFamily::Enveloped => open_envelope(body)?
            .ok_or_else(|| ApiError::Decode("response carried no data".to_string())),
    }
}

fn open_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, ApiError> {
    let envelope: Envelope<T> =
        serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(ApiError::Rejected {
            message: envelope.message.unwrap_or_default(),
            error_code: envelope.error_code,
        });
    }
    Ok(envelope.data)
}

fn decode_empty(family: ApiFamily, body: &[u8]) -> Result<(), ApiError> {
    if family == ApiFamily::Bare || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }
    // Only the success flag matters here; anything else the server sent is ignored.
    match serde_json::from_slice::<Envelope<Value>>(body) {
        Ok(envelope) if !envelope.success => Err(ApiError::Rejected {
            message: envelope.message.unwrap_or_default(),
            error_code: envelope.error_code,
        }),
        _ => Ok(()),
    }
}

fn log_curl(method: &Method, url: &str, query: Query<'_>, payload: Option<&Value>) {
    let mut url_for_log = url.to_string();
    if !query.is_empty() {
        let query_string = query
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<String>>()
            .join("&");
        url_for_log = format!("{}?{}", url_for_log, query_string);
    }

    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!(
        "-X {}",
        Paint::new(method.as_str()).fg(yansi::Color::Yellow).bold()
    ));
    parts.push(format!("'{}'", Paint::new(&url_for_log).fg(yansi::Color::Cyan)));

    if let Some(d) = payload {
        parts.push(format!(
            "{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
        ));
        let json_str = serde_json::to_string_pretty(d).unwrap_or_default();
        let escaped_json = json_str.replace('\'', "'\\''");
        parts.push(format!(
            "{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
        ));
    }
    eprintln!("Request:\n{}", parts.join(" "));
}

fn log_response(status: u16, body: &[u8]) {
    let text = String::from_utf8_lossy(body);
    // Grayed out so the request line stays the focus.
    eprintln!(
        "Response ({}):\n{}",
        status,
        Paint::new(&*text).rgb(100, 100, 100)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vm;

    #[test]
    fn test_enveloped_unwraps_data() {
        let body = br#"{"success":true,"message":"ok","data":[1,2,3]}"#;
        let data: Vec<u32> = decode(ApiFamily::Enveloped, body).unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn test_enveloped_rejection_surfaces_message() {
        let body = br#"{"success":false,"message":"name taken","errorCode":"CONFLICT"}"#;
        let err = decode::<Vec<u32>>(ApiFamily::Enveloped, body).unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                message: "name taken".into(),
                error_code: Some("CONFLICT".into())
            }
        );
        assert_eq!(decode_empty(ApiFamily::Enveloped, body).unwrap_err().message(), "name taken");
    }

    #[test]
    fn test_accepted_create_may_omit_data() {
        let body = br#"{"success":true,"message":"accepted","data":null}"#;
        assert_eq!(open_envelope::<Vec<u32>>(body).unwrap(), None);
        assert!(matches!(
            decode::<Vec<u32>>(ApiFamily::Enveloped, body),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_bare_decode_mismatch_is_decode_error() {
        let err = decode::<Vm>(ApiFamily::Bare, b"[]").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_empty_bodies_are_fine() {
        assert!(decode_empty(ApiFamily::Enveloped, b"").is_ok());
        assert!(decode_empty(ApiFamily::Bare, b"not json").is_ok());
        assert!(decode_empty(ApiFamily::Enveloped, br#"{"success":true}"#).is_ok());
    }
}
