//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现共享层的 [`Transport`]，
//! 所有请求携带 cookie (`credentials: include`)。

use schooladmin_shared::{ApiError, ApiResult, HttpRequest, HttpResponse, Transport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

/// HTTP 错误类型
#[derive(Debug)]
pub enum HttpError {
    /// 请求构建失败
    RequestBuildFailed(String),
    /// 网络请求失败
    NetworkError(String),
    /// 响应解析失败
    ResponseParseFailed(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::RequestBuildFailed(msg) => write!(f, "request could not be built: {}", msg),
            HttpError::NetworkError(msg) => write!(f, "network error: {}", msg),
            HttpError::ResponseParseFailed(msg) => write!(f, "unreadable response: {}", msg),
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::ResponseParseFailed(_) => ApiError::decode(e.to_string()),
            _ => ApiError::transport(e.to_string()),
        }
    }
}

/// 读取响应状态与文本
async fn read_response(response: Response) -> Result<HttpResponse, HttpError> {
    let status = response.status();
    let promise = response
        .text()
        .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

    let text = JsFuture::from(promise)
        .await
        .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

    Ok(HttpResponse {
        status,
        body: text.as_string().unwrap_or_default(),
    })
}

/// 发送一次 fetch 请求
async fn fetch(req: HttpRequest) -> Result<HttpResponse, HttpError> {
    let headers = Headers::new()
        .map_err(|e| HttpError::RequestBuildFailed(format!("Headers: {:?}", e)))?;

    for (key, value) in &req.headers {
        headers
            .set(key, value)
            .map_err(|e| HttpError::RequestBuildFailed(format!("header {}: {:?}", key, e)))?;
    }

    let opts = RequestInit::new();
    opts.set_method(req.method.as_str());
    opts.set_headers(&headers.into());
    opts.set_credentials(RequestCredentials::Include);

    if let Some(body) = &req.body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(&req.url, &opts)
        .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;

    let window =
        web_sys::window().ok_or_else(|| HttpError::NetworkError("no window".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

    let response: Response = resp_value
        .dyn_into()
        .map_err(|e| HttpError::ResponseParseFailed(format!("not a Response: {:?}", e)))?;

    read_response(response).await
}

/// 浏览器传输层
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let method = req.method;
        let url = req.url.clone();
        let result = fetch(req).await;
        match &result {
            Ok(resp) if !resp.ok() => {
                log_error!("[Api] {} {} -> {}", method.as_str(), url, resp.status)
            }
            Err(e) => log_error!("[Api] {} {} failed: {}", method.as_str(), url, e),
            _ => {}
        }
        Ok(result?)
    }
}
