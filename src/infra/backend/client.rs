use crate::error::AppError;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Thin JSON client for the scheduling backend. Every call carries the
/// configured bearer token; non-2xx answers are mapped onto [`AppError`].
pub struct BackendClient {
    client: Client,
    base_url: String,
    token: String,
}

impl BackendClient {
    pub fn new(base_url: String, token: String, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalWithMsg(format!("Failed to build backend client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        if self.token.is_empty() {
            builder
        } else {
            builder.header("Authorization", format!("Bearer {}", self.token))
        }
    }

    async fn execute(&self, builder: RequestBuilder, path: &str) -> Result<Response, AppError> {
        let res = builder.send().await.map_err(|e| {
            let msg = format!("Backend connection error on {}: {}", path, e);
            error!("{}", msg);
            AppError::Upstream(msg)
        })?;

        let status = res.status();
        debug!(status = status.as_u16(), "backend answered {}", path);

        if status.is_success() {
            return Ok(res);
        }

        let text = res.text().await.unwrap_or_default();
        Err(map_status(status, &text, path))
    }

    async fn decode<T: DeserializeOwned>(res: Response, path: &str) -> Result<T, AppError> {
        res.json::<T>().await.map_err(|e| {
            let msg = format!("Unexpected backend payload on {}: {}", path, e);
            error!("{}", msg);
            AppError::Upstream(msg)
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, AppError> {
        let res = self.execute(self.request(Method::GET, path).query(query), path).await?;
        Self::decode(res, path).await
    }

    /// Like [`get_json`](Self::get_json) but a 404 is an empty answer.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, AppError> {
        match self.get_json(path, &[]).await {
            Ok(value) => Ok(Some(value)),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let res = self.execute(self.request(method, path).json(body), path).await?;
        Self::decode(res, path).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.execute(self.request(Method::DELETE, path), path).await?;
        Ok(())
    }
}

/// Pulls a human readable message out of an error body: `{"error": ..}`,
/// `{"message": ..}` or the raw text.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

pub(crate) fn map_status(status: StatusCode, body: &str, path: &str) -> AppError {
    let message = extract_message(body);
    match status {
        StatusCode::CONFLICT => {
            warn!("Backend reported conflict on {}: {}", path, message);
            AppError::Conflict(message)
        }
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AppError::Validation(message),
        StatusCode::UNAUTHORIZED => AppError::Unauthorized,
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        _ => {
            let msg = format!("Backend failed on {}. Status: {}, Body: {}", path, status, body);
            error!("{}", msg);
            AppError::Upstream(msg)
        }
    }
}
