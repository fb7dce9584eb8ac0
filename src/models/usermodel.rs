use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppRole {
    Student,
    Owner,
}

impl AppRole {
    pub fn to_str(&self) -> &str {
        match self {
            AppRole::Student => "student",
            AppRole::Owner => "owner",
        }
    }
}

pub const AUTH_PATH: &str = "/auth";

/// Landing page for a signed-in user. Anyone without the owner role goes to
/// the student dashboard.
pub fn dashboard_path(role: Option<AppRole>) -> &'static str {
    match role {
        Some(AppRole::Owner) => "/owner",
        _ => "/student",
    }
}

/// The authenticated caller, decoded from the access token for one request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub role: Option<AppRole>,
    #[serde(skip_serializing)]
    pub access_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToAuth,
    RedirectTo(&'static str),
}

/// Gate for role-protected routes: anonymous callers are sent to sign in,
/// callers with the wrong role are sent to their own dashboard.
pub fn route_guard(session: Option<&SessionUser>, required_role: Option<AppRole>) -> RouteDecision {
    let Some(session) = session else {
        return RouteDecision::RedirectToAuth;
    };

    match required_role {
        Some(required) if session.role != Some(required) => {
            RouteDecision::RedirectTo(dashboard_path(session.role))
        }
        _ => RouteDecision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Option<AppRole>) -> SessionUser {
        SessionUser {
            user_id: Uuid::new_v4(),
            email: Some("someone@example.com".to_string()),
            role,
            access_token: "token".to_string(),
        }
    }

    #[test]
    fn anonymous_is_sent_to_auth() {
        assert_eq!(route_guard(None, None), RouteDecision::RedirectToAuth);
        assert_eq!(
            route_guard(None, Some(AppRole::Owner)),
            RouteDecision::RedirectToAuth
        );
    }

    #[test]
    fn wrong_role_goes_to_own_dashboard() {
        let student = session(Some(AppRole::Student));
        assert_eq!(
            route_guard(Some(&student), Some(AppRole::Owner)),
            RouteDecision::RedirectTo("/student")
        );

        let owner = session(Some(AppRole::Owner));
        assert_eq!(
            route_guard(Some(&owner), Some(AppRole::Student)),
            RouteDecision::RedirectTo("/owner")
        );

        let unassigned = session(None);
        assert_eq!(
            route_guard(Some(&unassigned), Some(AppRole::Owner)),
            RouteDecision::RedirectTo("/student")
        );
    }

    #[test]
    fn matching_or_unrestricted_role_is_allowed() {
        let owner = session(Some(AppRole::Owner));
        assert_eq!(route_guard(Some(&owner), Some(AppRole::Owner)), RouteDecision::Allow);
        assert_eq!(route_guard(Some(&owner), None), RouteDecision::Allow);
    }
}
