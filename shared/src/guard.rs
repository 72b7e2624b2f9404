//! Route guard decisions.
//!
//! Pure function of the session and a route's access rule; the router in the
//! frontend turns the decision into a History redirect.

use crate::session::{Role, Session};

/// Roles admitted by a protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Any authenticated role, including unrecognized ones.
    Authenticated,
    One(Role),
    AnyOf(Vec<Role>),
}

impl RoleRequirement {
    pub fn admits(&self, role: &Role) -> bool {
        match self {
            RoleRequirement::Authenticated => true,
            RoleRequirement::One(required) => required == role,
            // An empty set places no restriction beyond authentication.
            RoleRequirement::AnyOf(roles) => roles.is_empty() || roles.contains(role),
        }
    }
}

impl From<Role> for RoleRequirement {
    fn from(role: Role) -> Self {
        RoleRequirement::One(role)
    }
}

impl From<Vec<Role>> for RoleRequirement {
    fn from(roles: Vec<Role>) -> Self {
        RoleRequirement::AnyOf(roles)
    }
}

/// Outcome of guarding one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    RedirectLogin,
    RedirectUnauthorized,
}

/// **Core guard rule**: logged out → login, role not admitted → unauthorized,
/// otherwise render.
pub fn check(session: &Session, requirement: &RoleRequirement) -> GuardDecision {
    match session.get_role() {
        None => GuardDecision::RedirectLogin,
        Some(role) if requirement.admits(role) => GuardDecision::Render,
        Some(_) => GuardDecision::RedirectUnauthorized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_roles() -> Vec<Role> {
        vec![
            Role::Admin,
            Role::Teacher,
            Role::ClassTeacher,
            Role::Student,
            Role::Unrecognized("Guest".to_string()),
        ]
    }

    #[test]
    fn logged_out_always_goes_to_login() {
        let session = Session::new();
        for requirement in [
            RoleRequirement::Authenticated,
            RoleRequirement::One(Role::Admin),
            RoleRequirement::AnyOf(vec![]),
        ] {
            assert_eq!(check(&session, &requirement), GuardDecision::RedirectLogin);
        }
    }

    #[test]
    fn access_granted_iff_role_in_set() {
        let sets = vec![
            vec![Role::Admin],
            vec![Role::Admin, Role::ClassTeacher],
            vec![Role::Teacher, Role::Student],
            vec![],
        ];
        for role in all_roles() {
            let session = Session::with_role(role.clone());
            for set in &sets {
                let decision = check(&session, &RoleRequirement::AnyOf(set.clone()));
                let expected = if set.is_empty() || set.contains(&role) {
                    GuardDecision::Render
                } else {
                    GuardDecision::RedirectUnauthorized
                };
                assert_eq!(decision, expected, "role {role} against {set:?}");
            }
        }
    }

    #[test]
    fn single_role_requirement() {
        let requirement: RoleRequirement = Role::Admin.into();
        assert_eq!(
            check(&Session::with_role(Role::Admin), &requirement),
            GuardDecision::Render
        );
        assert_eq!(
            check(&Session::with_role(Role::Teacher), &requirement),
            GuardDecision::RedirectUnauthorized
        );
    }

    #[test]
    fn no_requirement_admits_any_authenticated_role() {
        for role in all_roles() {
            assert_eq!(
                check(&Session::with_role(role), &RoleRequirement::Authenticated),
                GuardDecision::Render
            );
        }
    }
}
