//! 认证模块
//!
//! 持有会话（当前角色），与路由系统解耦：
//! 路由服务只通过注入的会话信号检查访问权限。

use crate::api::SchoolApi;
use crate::web::LocalStorage;
use leptos::prelude::*;
use schooladmin_shared::protocol::LoginRequest;
use schooladmin_shared::{ApiResult, Role, Session, SessionPersistence, SessionSnapshot};

const STORAGE_SESSION_KEY: &str = "schooladmin_session";

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: ReadSignal<Session>,
    set_session: WriteSignal<Session>,
    persistence: SessionPersistence,
}

impl AuthContext {
    pub fn new(persistence: SessionPersistence) -> Self {
        let (session, set_session) = signal(Session::new());
        Self {
            session,
            set_session,
            persistence,
        }
    }

    /// 会话信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<Session> {
        self.session.into()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.with(|s| s.get_role().cloned())
    }

    pub fn set_role(&self, role: Role) {
        log_info!("[Auth] Signed in as {}", role);
        self.set_session.update(|s| s.set_role(role));
        self.persist();
    }

    /// 清除角色。路由服务监听会话变化，会自动离开受保护页面。
    pub fn clear_role(&self) {
        if self.session.with_untracked(|s| !s.is_authenticated()) {
            return;
        }
        log_info!("[Auth] Session cleared");
        self.set_session.update(|s| s.clear_role());
        self.persist();
    }

    fn persist(&self) {
        if self.persistence != SessionPersistence::Browser {
            return;
        }
        let snapshot = self.session.with_untracked(|s| s.snapshot());
        if snapshot.role.is_some() {
            LocalStorage::set_json(STORAGE_SESSION_KEY, &snapshot);
        } else {
            LocalStorage::delete(STORAGE_SESSION_KEY);
        }
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 仅在 `browser` 模式下从 LocalStorage 恢复角色；`memory` 模式每次加载都从未登录开始。
pub fn init_auth(ctx: &AuthContext) {
    if ctx.persistence != SessionPersistence::Browser {
        LocalStorage::delete(STORAGE_SESSION_KEY);
        return;
    }
    if let Some(snapshot) = LocalStorage::get_json::<SessionSnapshot>(STORAGE_SESSION_KEY) {
        let restored = Session::restore(snapshot);
        if let Some(role) = restored.get_role() {
            log_info!("[Auth] Restored session for {}", role);
        }
        ctx.set_session.set(restored);
    }
}

/// 登录：成功后写入角色，导航由路由服务的会话监听处理
pub async fn login(
    ctx: &AuthContext,
    api: &SchoolApi,
    reg_no: String,
    password: String,
) -> ApiResult<Role> {
    let credentials = LoginRequest { reg_no, password };
    let role = api.login(&credentials).await?;
    ctx.set_role(role.clone());
    Ok(role)
}

/// 注销：仅在后端确认后清除角色；失败时保持登录状态
pub async fn logout(ctx: &AuthContext, api: &SchoolApi) -> ApiResult<()> {
    api.logout().await.inspect_err(|e| {
        log_error!("[Auth] Logout failed: {}", e);
    })?;
    ctx.clear_role();
    Ok(())
}
