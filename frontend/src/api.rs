use crate::auth::AuthContext;
use crate::web::FetchTransport;
use leptos::prelude::*;
use schooladmin_shared::{ApiClient, AppConfig, config};

/// 浏览器中使用的 API 客户端
pub type SchoolApi = ApiClient<FetchTransport>;

/// 读取编译期注入的配置 (`SCHOOLADMIN_*` 环境变量)
pub fn load_config() -> AppConfig {
    AppConfig::from_lookup(|key| {
        let value = match key {
            config::KEY_API_BASE => option_env!("SCHOOLADMIN_API_BASE"),
            config::KEY_PAGE_SIZE => option_env!("SCHOOLADMIN_PAGE_SIZE"),
            config::KEY_SESSION => option_env!("SCHOOLADMIN_SESSION"),
            config::KEY_LOGOUT_URL => option_env!("SCHOOLADMIN_LOGOUT_URL"),
            _ => None,
        };
        value.map(str::to_string)
    })
}

/// 创建唯一的 API 客户端；任何 401 都会清除会话
pub fn create_api(config: &AppConfig, auth: AuthContext) -> SchoolApi {
    ApiClient::new(config.api_base_url.clone(), FetchTransport).with_unauthorized_hook(move || {
        log_info!("[Api] Session rejected by the backend");
        auth.clear_role();
    })
}

pub fn use_api() -> SchoolApi {
    use_context::<SchoolApi>().expect("SchoolApi should be provided")
}

pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig should be provided")
}
