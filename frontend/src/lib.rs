//! 学校管理控制台前端
//!
//! 采用 Context-Driven 架构：
//! - `schooladmin_shared::route`: 路由定义与守卫（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `components`: UI 组件层

#[macro_use]
mod log;

mod api;
mod auth;
mod components {
    pub mod class_teacher_dialog;
    pub mod crud_screen;
    pub mod dashboard;
    pub mod data_table;
    pub mod entity_modal;
    pub mod layout;
    pub mod login;
    pub mod toast;
    pub mod unauthorized;
}

use crate::api::{create_api, load_config};
use crate::auth::{AuthContext, init_auth};
use crate::components::crud_screen::CrudScreenPage;
use crate::components::dashboard::DashboardPage;
use crate::components::layout::DashboardLayout;
use crate::components::login::LoginPage;
use crate::components::unauthorized::UnauthorizedPage;

use leptos::prelude::*;
use schooladmin_shared::AppRoute;
use schooladmin_shared::entities::{FEES, STUDENTS, SUBJECTS, TEACHERS};

// 原生 Web API 封装模块
pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;

    pub use http::FetchTransport;
    pub use storage::LocalStorage;
}

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。守卫已在路由服务中执行。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Unauthorized => view! { <UnauthorizedPage /> }.into_any(),
        AppRoute::Dashboard => view! {
            <DashboardLayout>
                <DashboardPage />
            </DashboardLayout>
        }
        .into_any(),
        AppRoute::Students => view! {
            <DashboardLayout>
                <CrudScreenPage spec=STUDENTS />
            </DashboardLayout>
        }
        .into_any(),
        AppRoute::Teachers => view! {
            <DashboardLayout>
                <CrudScreenPage spec=TEACHERS />
            </DashboardLayout>
        }
        .into_any(),
        AppRoute::Subjects => view! {
            <DashboardLayout>
                <CrudScreenPage spec=SUBJECTS />
            </DashboardLayout>
        }
        .into_any(),
        AppRoute::Fees => view! {
            <DashboardLayout>
                <CrudScreenPage spec=FEES />
            </DashboardLayout>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 读取配置
    let config = load_config();
    log_info!(
        "[App] API base {}, page size {}, session {:?}",
        config.api_base_url,
        config.page_size,
        config.session_persistence
    );

    // 2. 创建认证上下文并按配置恢复会话
    let auth_ctx = AuthContext::new(config.session_persistence);
    init_auth(&auth_ctx);
    provide_context(auth_ctx);

    // 3. 唯一的 API 客户端；401 会清除会话
    provide_context(create_api(&config, auth_ctx));
    provide_context(config);

    // 4. 会话信号注入路由服务（解耦）
    let session = auth_ctx.session_signal();

    view! {
        <Router session=session>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
