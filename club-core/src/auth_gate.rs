use club_types::SessionState;

pub const LOGIN_ROUTE: &str = "/login";
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// What a route should do given the current session.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Session is still resolving; show nothing yet.
    Wait,
    Redirect(String),
    Render,
}

/// Route-level session guard. Protected routes bounce anonymous visitors
/// to the login page; public-only routes (login, signup) bounce signed-in
/// users to the dashboard. Fails closed while the session is loading.
#[derive(Debug, Clone)]
pub struct AuthGate {
    pub require_auth: bool,
    pub redirect_to: String,
}

impl AuthGate {
    pub fn protected() -> Self {
        Self {
            require_auth: true,
            redirect_to: LOGIN_ROUTE.to_string(),
        }
    }

    pub fn public_only() -> Self {
        Self {
            require_auth: false,
            redirect_to: DASHBOARD_ROUTE.to_string(),
        }
    }

    pub fn protected_with_redirect(redirect_to: &str) -> Self {
        Self {
            require_auth: true,
            redirect_to: redirect_to.to_string(),
        }
    }

    pub fn evaluate(&self, session: &SessionState) -> GateDecision {
        match session {
            SessionState::Loading => GateDecision::Wait,
            SessionState::Authenticated(_) => {
                if self.require_auth {
                    GateDecision::Render
                } else {
                    GateDecision::Redirect(self.redirect_to.clone())
                }
            }
            SessionState::Anonymous => {
                if self.require_auth {
                    GateDecision::Redirect(self.redirect_to.clone())
                } else {
                    GateDecision::Render
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_types::User;
    use uuid::Uuid;

    fn signed_in() -> SessionState {
        SessionState::Authenticated(User {
            id: Uuid::new_v4(),
            email: "manager@example.com".to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    #[test]
    fn test_protected_route_redirects_anonymous() {
        let gate = AuthGate::protected();
        assert_eq!(
            gate.evaluate(&SessionState::Anonymous),
            GateDecision::Redirect(LOGIN_ROUTE.to_string())
        );
    }

    #[test]
    fn test_protected_route_renders_for_signed_in() {
        let gate = AuthGate::protected();
        assert_eq!(gate.evaluate(&signed_in()), GateDecision::Render);
    }

    #[test]
    fn test_public_only_route_redirects_signed_in() {
        let gate = AuthGate::public_only();
        assert_eq!(
            gate.evaluate(&signed_in()),
            GateDecision::Redirect(DASHBOARD_ROUTE.to_string())
        );
        assert_eq!(gate.evaluate(&SessionState::Anonymous), GateDecision::Render);
    }

    #[test]
    fn test_loading_session_waits() {
        // Fail closed: nothing renders and nothing redirects until the
        // session fetch resolves.
        assert_eq!(
            AuthGate::protected().evaluate(&SessionState::Loading),
            GateDecision::Wait
        );
        assert_eq!(
            AuthGate::public_only().evaluate(&SessionState::Loading),
            GateDecision::Wait
        );
    }

    #[test]
    fn test_custom_redirect_target() {
        let gate = AuthGate::protected_with_redirect("/welcome");
        assert_eq!(
            gate.evaluate(&SessionState::Anonymous),
            GateDecision::Redirect("/welcome".to_string())
        );
    }
}
