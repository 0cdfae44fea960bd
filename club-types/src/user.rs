use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Identity observed from the external auth service. Only the fields the
/// application actually reads are carried here.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub created_at: String, // ISO 8601 string for simplicity
}

/// Session state as seen by route guards: either still resolving, resolved
/// to a signed-in user, or resolved to nobody. A failed session fetch maps
/// to `Anonymous` at the adapter boundary.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SessionState {
    Loading,
    Authenticated(User),
    Anonymous,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}
