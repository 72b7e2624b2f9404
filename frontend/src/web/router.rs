//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 每次导航（主动跳转、浏览器前进后退、会话变化）都经过
//! [`AppRoute::resolve`] 守卫，页面只会渲染守卫放行的路由。

use leptos::prelude::*;
use schooladmin_shared::{AppRoute, Session};
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 离开应用，跳转到外部地址（例如注销后的门户页）
pub fn redirect_external(url: &str) {
    log_info!("[Router] Leaving the console for {}", url);
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
}

/// 路由器服务
///
/// 通过注入的会话信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    session: Signal<Session>,
}

impl RouterService {
    fn new(session: Signal<Session>) -> Self {
        let requested = AppRoute::from_path(&current_path());
        let initial = session.with_untracked(|s| requested.resolve(s));
        if initial != requested {
            log_info!("[Router] {} is not available, showing {}", requested, initial);
        }
        // 根路径等别名统一为规范路径
        replace_history_state(initial.to_path());
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            session,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 加载
    pub fn navigate_to_route(&self, target: AppRoute) {
        let resolved = self.session.with_untracked(|s| target.resolve(s));
        if resolved != target {
            log_info!("[Router] Access to {} denied, redirecting to {}", target, resolved);
        }
        if resolved == self.current_route.get_untracked() {
            return;
        }
        push_history_state(resolved.to_path());
        self.set_route.set(resolved);
    }

    /// 浏览器后退/前进按钮同样经过守卫
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let session = self.session;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            let resolved = session.with_untracked(|s| target.resolve(s));
            if resolved != target {
                log_info!("[Router] History entry {} blocked, showing {}", target, resolved);
                replace_history_state(resolved.to_path());
            }
            set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话变化时重新校验当前页面（登录后离开登录页，注销后离开受保护页面）
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session = self.session;

        Effect::new(move |_| {
            let route = current_route.get_untracked();
            let resolved = session.with(|s| route.resolve(s));
            if resolved != route {
                log_info!("[Router] Session changed, redirecting {} -> {}", route, resolved);
                push_history_state(resolved.to_path());
                set_route.set(resolved);
            }
        });
    }
}

fn provide_router(session: Signal<Session>) -> RouterService {
    let router = RouterService::new(session);

    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 会话信号，由认证模块注入
    session: Signal<Session>,
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// 路由出口组件
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，点击时经由路由服务导航
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(into)] class: Signal<String>,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate_to_route(to);
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
