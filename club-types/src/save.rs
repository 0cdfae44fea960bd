use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// One persisted manager-career instance belonging to a user.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaveMetadata {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub manager_name: String,
    pub date_created: String, // ISO 8601 string
    pub date_last_opened: String,
    pub most_recent_team: Option<String>,
    pub most_recent_place: Option<String>,
    pub most_recent_season: Option<String>,
}

/// Satellite record created alongside a save, holding the manager profile
/// collected by the creation wizard. One-to-one with `SaveMetadata`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ManagerInfo {
    pub id: Uuid,
    pub save_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub birth_place: String,
    pub date_of_birth: Option<String>,
    pub favorite_team: String,
    pub selected_club: Option<String>,
    pub coaching_license: String,
    pub playing_experience: String,
}

/// The accumulated wizard form. `selected_club` and `unemployed` are
/// mutually exclusive; the wizard enforces this when either is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ManagerForm {
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub birth_place: String,
    pub date_of_birth: Option<String>,
    pub favorite_team: String,
    pub selected_club: Option<String>,
    pub unemployed: bool,
    pub coaching_license: String,
    pub playing_experience: String,
}

impl ManagerForm {
    pub fn manager_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}
