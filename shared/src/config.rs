// =========================================================
// 常量定义
// =========================================================
pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const KEY_API_BASE: &str = "SCHOOLADMIN_API_BASE";
pub const KEY_PAGE_SIZE: &str = "SCHOOLADMIN_PAGE_SIZE";
pub const KEY_SESSION: &str = "SCHOOLADMIN_SESSION";
pub const KEY_LOGOUT_URL: &str = "SCHOOLADMIN_LOGOUT_URL";

/// Where the session role lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPersistence {
    /// Lost on reload.
    #[default]
    Memory,
    /// Mirrored to LocalStorage and restored at startup.
    Browser,
}

impl SessionPersistence {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "browser" | "local" | "localstorage" => SessionPersistence::Browser,
            _ => SessionPersistence::Memory,
        }
    }
}

// =========================================================
// 运行时配置
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: usize,
    pub session_persistence: SessionPersistence,
    /// External page opened after logout; the login route when unset.
    pub logout_redirect: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Builds the configuration from a key lookup, falling back to the
    /// defaults for missing, blank or malformed values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_base_url: var(KEY_API_BASE)
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            page_size: var(KEY_PAGE_SIZE)
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            session_persistence: var(KEY_SESSION)
                .map(|v| SessionPersistence::parse(&v))
                .unwrap_or_default(),
            logout_redirect: var(KEY_LOGOUT_URL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_base_url, "/api");
        assert_eq!(cfg.page_size, 10);
        assert_eq!(cfg.session_persistence, SessionPersistence::Memory);
        assert_eq!(cfg.logout_redirect, None);
    }

    #[test]
    fn explicit_values() {
        let cfg = config(&[
            (KEY_API_BASE, "https://school.example/api/"),
            (KEY_PAGE_SIZE, "25"),
            (KEY_SESSION, "Browser"),
            (KEY_LOGOUT_URL, "https://school.example/"),
        ]);
        assert_eq!(cfg.api_base_url, "https://school.example/api");
        assert_eq!(cfg.page_size, 25);
        assert_eq!(cfg.session_persistence, SessionPersistence::Browser);
        assert_eq!(cfg.logout_redirect.as_deref(), Some("https://school.example/"));
    }

    #[test]
    fn malformed_values_fall_back() {
        let cfg = config(&[(KEY_PAGE_SIZE, "0"), (KEY_SESSION, "disk"), (KEY_LOGOUT_URL, "  ")]);
        assert_eq!(cfg.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(cfg.session_persistence, SessionPersistence::Memory);
        assert_eq!(cfg.logout_redirect, None);

        assert_eq!(config(&[(KEY_PAGE_SIZE, "ten")]).page_size, DEFAULT_PAGE_SIZE);
    }
}
