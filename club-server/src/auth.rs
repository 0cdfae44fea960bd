use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use club_types::{SessionState, User};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("{0}")]
    Rejected(String),
    #[error("Auth service unreachable")]
    ServiceUnreachable,
}

/// Tokens handed back after a successful sign-in or sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
struct SupabaseUser {
    id: Uuid,
    email: Option<String>,
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: SupabaseUser,
}

#[derive(Debug, Deserialize)]
struct SupabaseErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

/// Adapter over the Supabase GoTrue REST endpoints. In dev mode no
/// network calls are made and tokens are parsed locally.
pub struct AuthService {
    client: Client,
    base_url: String,
    anon_key: String,
    dev_mode: bool,
}

impl AuthService {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            dev_mode: false,
        }
    }

    pub fn new_dev_mode() -> Self {
        Self {
            client: Client::new(),
            base_url: "http://localhost".to_string(),
            anon_key: "dev".to_string(),
            dev_mode: true,
        }
    }

    fn user_from_response(user: SupabaseUser) -> User {
        User {
            id: user.id,
            email: user.email.unwrap_or_else(|| "unknown@example.com".to_string()),
            created_at: user
                .created_at
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
        }
    }

    async fn rejection_message(response: reqwest::Response) -> String {
        match response.json::<SupabaseErrorBody>().await {
            Ok(body) => body
                .error_description
                .or(body.msg)
                .or(body.message)
                .unwrap_or_else(|| "Request rejected".to_string()),
            Err(_) => "Request rejected".to_string(),
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AuthError> {
        if self.dev_mode {
            return self.validate_dev_token(token);
        }

        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Session fetch failed: {:?}", e);
                AuthError::ServiceUnreachable
            })?;

        if !response.status().is_success() {
            return Err(AuthError::InvalidToken);
        }

        let user: SupabaseUser = response.json().await.map_err(|e| {
            tracing::warn!("Malformed user payload from auth service: {:?}", e);
            AuthError::InvalidToken
        })?;

        Ok(Self::user_from_response(user))
    }

    /// Resolves an optional bearer token to a session. Any failure is
    /// treated as no session rather than an error.
    pub async fn session_state(&self, token: Option<&str>) -> SessionState {
        match token {
            Some(token) => match self.validate_token(token).await {
                Ok(user) => SessionState::Authenticated(user),
                Err(e) => {
                    tracing::debug!("Session resolution failed, treating as anonymous: {}", e);
                    SessionState::Anonymous
                }
            },
            None => SessionState::Anonymous,
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        if self.dev_mode {
            return Ok(Self::dev_session(email));
        }

        let response = self
            .client
            .post(format!(
                "{}/auth/v1/token?grant_type=password",
                self.base_url
            ))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|_| AuthError::ServiceUnreachable)?;

        if !response.status().is_success() {
            return Err(AuthError::Rejected(Self::rejection_message(response).await));
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|_| AuthError::Rejected("Malformed sign-in response".to_string()))?;

        Ok(AuthSession {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user: Self::user_from_response(tokens.user),
        })
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        if self.dev_mode {
            return Ok(Self::dev_session(email));
        }

        let response = self
            .client
            .post(format!("{}/auth/v1/signup", self.base_url))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|_| AuthError::ServiceUnreachable)?;

        if !response.status().is_success() {
            return Err(AuthError::Rejected(Self::rejection_message(response).await));
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|_| AuthError::Rejected("Malformed sign-up response".to_string()))?;

        Ok(AuthSession {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user: Self::user_from_response(tokens.user),
        })
    }

    pub async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        if self.dev_mode {
            return Ok(());
        }

        let response = self
            .client
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|_| AuthError::ServiceUnreachable)?;

        if !response.status().is_success() {
            return Err(AuthError::InvalidToken);
        }
        Ok(())
    }

    /// Dev tokens are "user_id:email". A bare email is also accepted and
    /// gets a generated id.
    fn validate_dev_token(&self, token: &str) -> Result<User, AuthError> {
        let parts: Vec<&str> = token.splitn(2, ':').collect();
        match parts.as_slice() {
            [id, email] => Ok(User {
                id: Uuid::parse_str(id).map_err(|_| AuthError::InvalidToken)?,
                email: email.to_string(),
                created_at: chrono::Utc::now().to_rfc3339(),
            }),
            [email] if email.contains('@') => Ok(User {
                id: Uuid::new_v4(),
                email: email.to_string(),
                created_at: chrono::Utc::now().to_rfc3339(),
            }),
            _ => Err(AuthError::InvalidToken),
        }
    }

    fn dev_session(email: &str) -> AuthSession {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        AuthSession {
            access_token: format!("{}:{}", user.id, user.email),
            refresh_token: "dev-refresh".to_string(),
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dev_token_round_trip() {
        let auth = AuthService::new_dev_mode();
        let session = auth.sign_in("manager@example.com", "password").await.unwrap();

        let user = auth.validate_token(&session.access_token).await.unwrap();
        assert_eq!(user.id, session.user.id);
        assert_eq!(user.email, "manager@example.com");
    }

    #[tokio::test]
    async fn test_dev_token_rejects_garbage() {
        let auth = AuthService::new_dev_mode();
        let result = auth.validate_token("not-a-valid-token").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_session_state_fails_closed() {
        let auth = AuthService::new_dev_mode();

        assert!(matches!(
            auth.session_state(None).await,
            SessionState::Anonymous
        ));
        assert!(matches!(
            auth.session_state(Some("bogus")).await,
            SessionState::Anonymous
        ));

        let session = auth.sign_in("a@b.com", "pw").await.unwrap();
        assert!(matches!(
            auth.session_state(Some(&session.access_token)).await,
            SessionState::Authenticated(_)
        ));
    }
}
