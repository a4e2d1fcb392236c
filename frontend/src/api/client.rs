use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    api::types::{ApiError, ServerErrorBody},
    config,
};

#[cfg(all(test, not(target_arch = "wasm32")))]
pub use mock_registry::{register_mock, MockResponse, TestResponder};

/// Raw outcome of an HTTP exchange that reached the server.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => config::await_api_base_url().await,
        }
    }

    pub(crate) async fn url(&self, path: &str) -> String {
        format!("{}{}", self.resolved_base_url().await, path)
    }

    /// Sends the request; only transport failures are errors at this level.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<HttpReply, ApiError> {
        let request = builder.build().map_err(|err| {
            log::error!("failed to build request: {}", err);
            ApiError::connectivity()
        })?;
        let method = request.method().clone();
        let url = request.url().to_string();

        if let Some(mocked) = mocked_reply(&request) {
            return mocked;
        }

        let response = self.client.execute(request).await.map_err(|err| {
            log::warn!("{} {} failed: {}", method, url, err);
            ApiError::connectivity()
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|err| {
            log::warn!("{} {} returned an unreadable body: {}", method, url, err);
            ApiError::connectivity()
        })?;
        log::debug!("{} {} -> {}", method, url, status);
        Ok(HttpReply { status, body })
    }

    /// Maps a reply onto the backend's `{}` / `{error}` contract.
    ///
    /// Any 2xx status is a success and its body is not read, so an empty or
    /// non-JSON acknowledgement is still accepted.
    ///
    /// A non-success status with a JSON body is an application error carrying
    /// the server message (or `fallback`); without a JSON body it is treated
    /// as a connectivity failure.
    pub(crate) fn map_ack_response(reply: HttpReply, fallback: &str) -> Result<(), ApiError> {
        if reply.status.is_success() {
            return Ok(());
        }
        match serde_json::from_str::<ServerErrorBody>(&reply.body) {
            Ok(body) => {
                let message = body
                    .error
                    .filter(|msg| !msg.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_string());
                log::warn!("backend rejected request ({}): {}", reply.status, message);
                Err(ApiError::application(message))
            }
            Err(_) => {
                log::warn!("backend answered {} without a structured body", reply.status);
                Err(ApiError::connectivity())
            }
        }
    }

    pub(crate) fn map_json_response<T>(reply: HttpReply) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        if !reply.status.is_success() {
            log::warn!("backend answered {}", reply.status);
            return Err(ApiError::connectivity());
        }
        serde_json::from_str(&reply.body).map_err(|err| {
            log::error!("failed to parse response: {}", err);
            ApiError::connectivity()
        })
    }

    pub(crate) async fn post_ack<T>(&self, path: &str, payload: &T, fallback: &str) -> Result<(), ApiError>
    where
        T: Serialize,
    {
        let url = self.url(path).await;
        let reply = self.send(self.http_client().post(url).json(payload)).await?;
        Self::map_ack_response(reply, fallback)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
fn mocked_reply(request: &reqwest::Request) -> Option<Result<HttpReply, ApiError>> {
    let responder = mock_registry::find(request.url().as_str())?;
    Some(responder.respond(request).map(MockResponse::into_reply))
}

#[cfg(not(all(test, not(target_arch = "wasm32"))))]
fn mocked_reply(_request: &reqwest::Request) -> Option<Result<HttpReply, ApiError>> {
    None
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod mock_registry {
    use super::HttpReply;
    use crate::api::ApiError;
    use reqwest::StatusCode;
    use serde_json::Value;
    use std::sync::{Arc, Mutex, OnceLock};

    pub trait TestResponder: Send + Sync {
        fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError>;
    }

    #[derive(Clone, Debug)]
    pub struct MockResponse {
        status: u16,
        body: String,
    }

    impl MockResponse {
        pub fn json(status: u16, body: Value) -> Self {
            Self {
                status,
                body: body.to_string(),
            }
        }

        pub fn text(status: u16, body: impl Into<String>) -> Self {
            Self {
                status,
                body: body.into(),
            }
        }

        pub(super) fn into_reply(self) -> HttpReply {
            HttpReply {
                status: StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body: self.body,
            }
        }
    }

    type Registry = Mutex<Vec<(String, Arc<dyn TestResponder>)>>;

    fn registry() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(|| Mutex::new(Vec::new()))
    }

    pub fn register_mock(base_url: String, responder: Arc<dyn TestResponder>) {
        let mut routes = registry().lock().expect("mock registry lock");
        routes.retain(|(base, _)| base != &base_url);
        routes.push((base_url, responder));
    }

    pub(super) fn find(url: &str) -> Option<Arc<dyn TestResponder>> {
        let routes = registry().lock().ok()?;
        routes
            .iter()
            .find(|(base, _)| {
                url.strip_prefix(base.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            })
            .map(|(_, responder)| responder.clone())
    }
}
