//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、访问规则以及守卫后的最终落点。

use std::fmt::Display;

use crate::guard::{self, GuardDecision, RoleRequirement};
use crate::session::{Role, Session};

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 登录页面
    Login,
    /// 无权限提示页
    Unauthorized,
    /// 控制面板 (任意已登录角色)
    #[default]
    Dashboard,
    /// 学生管理 (Admin)
    Students,
    /// 教师管理 (Admin)
    Teachers,
    /// 科目管理 (Admin)
    Subjects,
    /// 学费概览 (Admin)
    Fees,
    /// 页面未找到
    NotFound,
}

/// 路由访问规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// 任何人可访问
    Public,
    /// 仅未登录用户（登录页），已登录用户会被送往面板
    GuestOnly,
    /// 需要登录且角色满足要求
    Protected(RoleRequirement),
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        match path {
            "/login" => Self::Login,
            "/unauthorized" => Self::Unauthorized,
            "" | "/" | "/dashboard" => Self::Dashboard,
            "/student-details" => Self::Students,
            "/teacher-details" => Self::Teachers,
            "/subjects" => Self::Subjects,
            "/fee-details" => Self::Fees,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Unauthorized => "/unauthorized",
            Self::Dashboard => "/dashboard",
            Self::Students => "/student-details",
            Self::Teachers => "/teacher-details",
            Self::Subjects => "/subjects",
            Self::Fees => "/fee-details",
            Self::NotFound => "/404",
        }
    }

    /// 菜单与标题使用的名称
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Unauthorized => "Unauthorized",
            Self::Dashboard => "Dashboard",
            Self::Students => "Students",
            Self::Teachers => "Teacher Details",
            Self::Subjects => "Subjects",
            Self::Fees => "Fee",
            Self::NotFound => "Not Found",
        }
    }

    /// **核心守卫规则：定义该路由的访问条件**
    pub fn access(&self) -> Access {
        match self {
            Self::Login => Access::GuestOnly,
            Self::Unauthorized | Self::NotFound => Access::Public,
            Self::Dashboard => Access::Protected(RoleRequirement::Authenticated),
            Self::Students | Self::Teachers | Self::Subjects | Self::Fees => {
                Access::Protected(RoleRequirement::One(Role::Admin))
            }
        }
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 角色不足时的重定向目标
    pub fn forbidden_redirect() -> Self {
        Self::Unauthorized
    }

    /// 认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 执行守卫，返回实际应显示的路由。
    ///
    /// 返回值与 `self` 不同即表示发生了重定向。
    pub fn resolve(&self, session: &Session) -> AppRoute {
        match self.access() {
            Access::Public => *self,
            Access::GuestOnly if session.is_authenticated() => Self::auth_success_redirect(),
            Access::GuestOnly => *self,
            Access::Protected(requirement) => match guard::check(session, &requirement) {
                GuardDecision::Render => *self,
                GuardDecision::RedirectLogin => Self::auth_failure_redirect(),
                GuardDecision::RedirectUnauthorized => Self::forbidden_redirect(),
            },
        }
    }

    /// 当前会话能否进入该路由（菜单过滤用）
    pub fn permits(&self, session: &Session) -> bool {
        self.resolve(session) == *self
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::Login,
            AppRoute::Unauthorized,
            AppRoute::Dashboard,
            AppRoute::Students,
            AppRoute::Teachers,
            AppRoute::Subjects,
            AppRoute::Fees,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn path_normalisation() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/student-details/"), AppRoute::Students);
        assert_eq!(AppRoute::from_path("/subjects?page=2"), AppRoute::Subjects);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn logged_out_visitor_is_sent_to_login() {
        let session = Session::new();
        assert_eq!(AppRoute::Students.resolve(&session), AppRoute::Login);
        assert_eq!(AppRoute::Dashboard.resolve(&session), AppRoute::Login);
        assert_eq!(AppRoute::Login.resolve(&session), AppRoute::Login);
        assert_eq!(AppRoute::NotFound.resolve(&session), AppRoute::NotFound);
    }

    #[test]
    fn under_privileged_visitor_is_sent_to_unauthorized() {
        let session = Session::with_role(Role::Student);
        assert_eq!(AppRoute::Teachers.resolve(&session), AppRoute::Unauthorized);
        assert_eq!(AppRoute::Dashboard.resolve(&session), AppRoute::Dashboard);
    }

    #[test]
    fn authenticated_user_skips_login_page() {
        let session = Session::with_role(Role::Teacher);
        assert_eq!(AppRoute::Login.resolve(&session), AppRoute::Dashboard);
    }

    #[test]
    fn admin_reaches_admin_routes() {
        let session = Session::with_role(Role::Admin);
        assert!(AppRoute::Students.permits(&session));
        assert!(AppRoute::Subjects.permits(&session));
        assert!(AppRoute::Fees.permits(&session));
        assert!(!AppRoute::Fees.permits(&Session::with_role(Role::Teacher)));
    }
}
