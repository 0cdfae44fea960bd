use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ConversationError {
    /// User input is disabled while a scripted turn is in flight.
    InputDisabled,
    EmptyMessage,
    NoActiveConversation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ValidationError {
    FirstNameRequired,
    LastNameRequired,
    ClubOrUnemployedRequired,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::FirstNameRequired => "First name is required",
            ValidationError::LastNameRequired => "Last name is required",
            ValidationError::ClubOrUnemployedRequired => {
                "Pick a club or choose to start unemployed"
            }
        }
    }
}
