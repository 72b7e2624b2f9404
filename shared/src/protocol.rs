use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Record;
use crate::error::{ApiError, ApiResult};
use crate::session::Role;

pub const LOGIN_PATH: &str = "/userauthdata/login";
pub const LOGOUT_PATH: &str = "/userauthdata/logout";

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Percent-encodes one path segment (spaces become `%20`, not `+`).
pub fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

// =========================================================
// Request Definitions
// =========================================================

/// One backend call, relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Operation name recorded in error traces, e.g. "student.update".
    pub operation: &'static str,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            operation: "api.request",
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn named(mut self, operation: &'static str) -> Self {
        self.operation = operation;
        self
    }

    /// Full URL against `base_url` (trailing slash tolerated).
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let mut url = if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        };
        if !self.query.is_empty() {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

// =========================================================
// Response Definitions
// =========================================================

/// One page of a paged list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    pub content: Vec<Record>,
    #[serde(rename = "totalPages", default)]
    pub total_pages: usize,
}

impl PageResponse {
    /// Accepts either `{content, totalPages}` or a bare array, which is
    /// treated as one complete page.
    pub fn from_value(value: Value) -> ApiResult<Self> {
        match value {
            Value::Array(items) => Ok(Self {
                total_pages: if items.is_empty() { 0 } else { 1 },
                content: records_from(items)?,
            }),
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            Value::Null => Ok(Self {
                content: Vec::new(),
                total_pages: 0,
            }),
            other => Err(ApiError::decode(format!(
                "expected a page of records, got {}",
                other
            ))),
        }
    }
}

fn records_from(items: Vec<Value>) -> ApiResult<Vec<Record>> {
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(map),
            other => Err(ApiError::decode(format!("expected a record, got {}", other))),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "regNo")]
    pub reg_no: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub role: Role,
    #[serde(default)]
    pub message: Option<String>,
}

/// Human-readable text of a mutation response (`message` field, a bare
/// string, or nothing).
pub fn response_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
