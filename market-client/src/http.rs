//! HTTP client for the marketplace REST API
//!
//! Every call attaches the session's bearer token and unwraps the
//! `{success, message, data, pagination}` envelope. A 401 from any endpoint
//! expires the session before the error is returned. Without a token to
//! expire (a rejected login) the backend's message is kept instead.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{ApiResponse, Page};

use crate::session::Session;
use crate::{ClientConfig, ClientError, ClientResult};

/// Error body returned by the backend
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for making network requests to the backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the bearer token, if any
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path)));
        self.send(request).await.and_then(into_data)
    }

    /// GET whose payload is irrelevant; returns the backend message, if any
    pub async fn get_ack<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<Option<String>> {
        let request = self.authorize(self.client.get(self.url(path)).query(query));
        let envelope: ApiResponse<serde_json::Value> = self.send(request).await?;
        Ok(envelope.message)
    }

    /// GET a list endpoint, keeping its pagination
    pub async fn get_page<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<Page<T>> {
        let request = self.authorize(self.client.get(self.url(path)).query(query));
        let envelope: ApiResponse<Vec<T>> = self.send(request).await?;
        let data = envelope.data.unwrap_or_default();
        Ok(match envelope.pagination {
            Some(pagination) => Page { data, pagination },
            None => Page::single(data),
        })
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        self.send(request).await.and_then(into_data)
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.put(self.url(path)).json(body));
        self.send(request).await.and_then(into_data)
    }

    /// Make a PUT request without body
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.put(self.url(path)));
        self.send(request).await.and_then(into_data)
    }

    /// Make a DELETE request, ignoring any payload
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.authorize(self.client.delete(self.url(path)));
        self.send::<serde_json::Value>(request).await.map(|_| ())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ClientResult<ApiResponse<T>> {
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<ApiResponse<T>> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(&text);
            tracing::debug!(status = status.as_u16(), %message, "API request failed");
            return Err(match status {
                StatusCode::UNAUTHORIZED if self.session.expire() => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(message),
                StatusCode::NOT_FOUND => ClientError::NotFound(message),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    ClientError::BadRequest(message)
                }
                _ => ClientError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let envelope: ApiResponse<T> = if text.trim().is_empty() {
            ApiResponse::empty()
        } else {
            serde_json::from_str(&text)?
        };

        if !envelope.success {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope.message.unwrap_or_default(),
            });
        }
        Ok(envelope)
    }
}

/// Extract `data`, failing when the backend left it out
fn into_data<T>(envelope: ApiResponse<T>) -> ClientResult<T> {
    envelope
        .data
        .ok_or_else(|| ClientError::InvalidResponse("Missing response data".into()))
}

/// Best message available from an error body
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.message.or(parsed.error).unwrap_or_default(),
        Err(_) => body.trim().chars().take(200).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"message": "Hết chỗ"}"#), "Hết chỗ");
        assert_eq!(error_message(r#"{"error": "Bad token"}"#), "Bad token");
        assert_eq!(error_message(r#"{"success": false}"#), "");
        assert_eq!(error_message("Gateway Timeout"), "Gateway Timeout");
    }

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::new("http://localhost:5000/api/");
        let client = HttpClient::new(&config, Session::new()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.url("/bookings"), "http://localhost:5000/api/bookings");
        assert_eq!(client.url("bookings/1"), "http://localhost:5000/api/bookings/1");
    }

    #[test]
    fn test_missing_data_is_invalid_response() {
        let envelope: ApiResponse<u32> = ApiResponse::empty();
        assert!(matches!(into_data(envelope), Err(ClientError::InvalidResponse(_))));
    }
}
