use std::fmt;

// =========================================================
// 错误类别
// =========================================================

/// 错误类别
/// 由 HTTP 状态码或传输层故障决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 请求未能到达后端 (网络故障、请求构建失败)
    Transport,
    /// 401: 会话失效，需要清除角色
    Unauthorized,
    /// 403: 已登录但无权限
    Forbidden,
    /// 404: 资源未找到
    NotFound,
    /// 其他 4xx: 后端拒绝了提交的数据
    Rejected,
    /// 5xx: 后端内部错误
    Server,
    /// 响应体无法解析
    Decode,
}

impl ApiErrorKind {
    /// 将非 2xx 状态码映射为错误类别
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            500..=599 => ApiErrorKind::Server,
            _ => ApiErrorKind::Rejected,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Transport => "NETWORK_ERROR",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::Forbidden => "FORBIDDEN",
            ApiErrorKind::NotFound => "RESOURCE_NOT_FOUND",
            ApiErrorKind::Rejected => "REQUEST_REJECTED",
            ApiErrorKind::Server => "SERVER_ERROR",
            ApiErrorKind::Decode => "DECODE_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// API 调用错误
///
/// - kind: 错误类别
/// - message: 面向用户的消息
/// - status: HTTP 状态码（传输失败时为空）
/// - spans: 操作追踪，如 "student.list" -> "api.get"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub status: Option<u16>,
    spans: Vec<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            spans: Vec::new(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    /// 由非 2xx 响应构造。后端返回的短文本会作为消息展示。
    pub fn from_response(status: u16, body: &str) -> Self {
        let kind = ApiErrorKind::from_status(status);
        let body = body.trim();
        let message = if !body.is_empty() && body.len() <= 200 && !body.starts_with('<') {
            body.to_string()
        } else {
            format!("request failed with status {}", status)
        };
        Self {
            kind,
            message,
            status: Some(status),
            spans: Vec::new(),
        }
    }

    /// 添加操作追踪
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(operation.into());
        self
    }

    pub fn spans(&self) -> &[String] {
        &self.spans
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;
        if !self.spans.is_empty() {
            write!(f, " | trace: {}", self.spans.join(" -> "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::decode(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiErrorKind::from_status(401), ApiErrorKind::Unauthorized);
        assert_eq!(ApiErrorKind::from_status(403), ApiErrorKind::Forbidden);
        assert_eq!(ApiErrorKind::from_status(404), ApiErrorKind::NotFound);
        assert_eq!(ApiErrorKind::from_status(409), ApiErrorKind::Rejected);
        assert_eq!(ApiErrorKind::from_status(503), ApiErrorKind::Server);
    }

    #[test]
    fn server_text_becomes_message() {
        let e = ApiError::from_response(400, "Reg No already exists");
        assert_eq!(e.message, "Reg No already exists");
        assert_eq!(e.status, Some(400));

        let e = ApiError::from_response(500, "<html>boom</html>");
        assert_eq!(e.message, "request failed with status 500");
    }

    #[test]
    fn display_includes_trace() {
        let e = ApiError::transport("offline")
            .in_op("api.get")
            .in_op("student.list");
        assert_eq!(
            e.to_string(),
            "[NETWORK_ERROR] offline | trace: api.get -> student.list"
        );
    }
}
