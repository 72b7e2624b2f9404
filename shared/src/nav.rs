//! Role menu shown in the sidebar.

use crate::route::AppRoute;
use crate::session::{Role, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub title: &'static str,
    pub route: AppRoute,
}

impl MenuItem {
    const fn new(title: &'static str, route: AppRoute) -> Self {
        Self { title, route }
    }

    pub fn path(&self) -> &'static str {
        self.route.to_path()
    }
}

/// Menu entries for a role. Unrecognized roles get nothing.
pub fn menu_for(role: &Role) -> Vec<MenuItem> {
    match role {
        Role::Admin => vec![
            MenuItem::new("Dashboard", AppRoute::Dashboard),
            MenuItem::new("Students", AppRoute::Students),
            MenuItem::new("Teacher Details", AppRoute::Teachers),
            MenuItem::new("Subjects", AppRoute::Subjects),
            MenuItem::new("Fee", AppRoute::Fees),
        ],
        Role::Teacher | Role::ClassTeacher | Role::Student => {
            vec![MenuItem::new("Dashboard", AppRoute::Dashboard)]
        }
        Role::Unrecognized(_) => Vec::new(),
    }
}

/// Menu for the current session; empty when logged out.
pub fn session_menu(session: &Session) -> Vec<MenuItem> {
    session.get_role().map(menu_for).unwrap_or_default()
}
