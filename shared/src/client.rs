use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::protocol::{
    ApiRequest, HttpMethod, LOGIN_PATH, LOGOUT_PATH, LoginRequest, LoginResponse, PageResponse,
};
use crate::session::Role;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: &Value) -> Self {
        self.body = Some(body.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 传输层抽象：浏览器中由 fetch 实现，测试中由 Mock 实现。
/// 只有网络不可达时才返回 Err，非 2xx 响应照常返回。
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

// =========================================================
// API 客户端
// =========================================================

/// The single configured client used by every screen.
///
/// Wraps the backend base URL; a 401 from any call fires the unauthorized
/// hook (the frontend clears the session there) before the error is returned.
#[derive(Clone)]
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl<T> fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
            on_unauthorized: None,
        }
    }

    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends one request and decodes the body.
    ///
    /// Empty bodies decode to `Null`; bodies that are not JSON (plain-text
    /// messages such as "Teacher deleted") decode to a JSON string.
    pub async fn send(&self, req: &ApiRequest) -> ApiResult<Value> {
        let mut http = HttpRequest::new(&req.url(&self.base_url), req.method)
            .with_header("Accept", "application/json");
        if let Some(body) = &req.body {
            http = http
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        let resp = self
            .transport
            .send(http)
            .await
            .map_err(|e| e.in_op(req.operation))?;

        if !resp.ok() {
            let err = ApiError::from_response(resp.status, &resp.body).in_op(req.operation);
            if err.is_unauthorized() {
                if let Some(hook) = &self.on_unauthorized {
                    hook();
                }
            }
            return Err(err);
        }

        let body = resp.body.trim();
        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
    }

    pub async fn get(&self, path: &str, params: &[(&str, String)]) -> ApiResult<Value> {
        let req = params
            .iter()
            .fold(ApiRequest::get(path).named("api.get"), |req, (k, v)| {
                req.with_query(k, v)
            });
        self.send(&req).await
    }

    pub async fn post(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.send(&ApiRequest::post(path).with_body(body).named("api.post"))
            .await
    }

    pub async fn put(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.send(&ApiRequest::put(path).with_body(body).named("api.put"))
            .await
    }

    pub async fn patch(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.send(&ApiRequest::patch(path).with_body(body).named("api.patch"))
            .await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.send(&ApiRequest::delete(path).named("api.delete")).await
    }

    /// Runs a list request and decodes the page.
    pub async fn fetch_page(&self, req: &ApiRequest) -> ApiResult<PageResponse> {
        let value = self.send(req).await?;
        PageResponse::from_value(value).map_err(|e| e.in_op(req.operation))
    }

    /// Returns the role granted by the backend.
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<Role> {
        let body = serde_json::to_value(credentials)?;
        let req = ApiRequest::post(LOGIN_PATH).with_body(body).named("auth.login");
        let value = self.send(&req).await?;
        let resp: LoginResponse =
            serde_json::from_value(value).map_err(|e| ApiError::from(e).in_op("auth.login"))?;
        Ok(resp.role)
    }

    pub async fn logout(&self) -> ApiResult<()> {
        let req = ApiRequest::post(LOGOUT_PATH).named("auth.logout");
        self.send(&req).await.map(|_| ())
    }
}

// =========================================================
// 测试工具: MockTransport
// =========================================================


#[cfg(test)]
mod tests;
