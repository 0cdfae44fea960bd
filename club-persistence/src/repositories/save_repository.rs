use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::entities::{save_metadata, temp_manager_info};
use club_types::{ManagerForm, ManagerInfo, SaveMetadata};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("save {0} not found")]
    SaveNotFound(Uuid),
}

pub struct SaveRepository {
    db: DatabaseConnection,
}

impl SaveRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_save(model: save_metadata::Model) -> SaveMetadata {
        SaveMetadata {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            manager_name: model.manager_name,
            date_created: model.date_created.to_rfc3339(),
            date_last_opened: model.date_last_opened.to_rfc3339(),
            most_recent_team: model.most_recent_team,
            most_recent_place: model.most_recent_place,
            most_recent_season: model.most_recent_season,
        }
    }

    fn model_to_manager_info(model: temp_manager_info::Model) -> ManagerInfo {
        ManagerInfo {
            id: model.id,
            save_id: model.save_id,
            first_name: model.first_name,
            last_name: model.last_name,
            nationality: model.nationality,
            birth_place: model.birth_place,
            date_of_birth: model.date_of_birth,
            favorite_team: model.favorite_team,
            selected_club: model.selected_club,
            coaching_license: model.coaching_license,
            playing_experience: model.playing_experience,
        }
    }

    /// All saves belonging to a user, most recently opened first.
    pub async fn list_saves(&self, user_id: Uuid) -> Result<Vec<SaveMetadata>, PersistenceError> {
        let models = save_metadata::Entity::find()
            .filter(save_metadata::Column::UserId.eq(user_id))
            .order_by_desc(save_metadata::Column::DateLastOpened)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Self::model_to_save).collect())
    }

    pub async fn find_save(&self, save_id: Uuid) -> Result<Option<SaveMetadata>, PersistenceError> {
        let model = save_metadata::Entity::find_by_id(save_id).one(&self.db).await?;
        Ok(model.map(Self::model_to_save))
    }

    pub async fn create_save(
        &self,
        user_id: Uuid,
        name: &str,
        manager_name: &str,
    ) -> Result<SaveMetadata, PersistenceError> {
        let now = chrono::Utc::now();
        let model = save_metadata::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id),
            name: ActiveValue::Set(name.to_string()),
            manager_name: ActiveValue::Set(manager_name.to_string()),
            date_created: ActiveValue::Set(now.into()),
            date_last_opened: ActiveValue::Set(now.into()),
            most_recent_team: ActiveValue::Set(None),
            most_recent_place: ActiveValue::Set(None),
            most_recent_season: ActiveValue::Set(None),
        };

        let result = save_metadata::Entity::insert(model).exec(&self.db).await?;
        let created = save_metadata::Entity::find_by_id(result.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or(PersistenceError::SaveNotFound(result.last_insert_id))?;

        Ok(Self::model_to_save(created))
    }

    /// Bumps a save's last-opened timestamp. Callers treat failures here
    /// as non-critical; opening a save proceeds regardless.
    pub async fn touch_save(&self, save_id: Uuid) -> Result<(), PersistenceError> {
        let model = save_metadata::Entity::find_by_id(save_id)
            .one(&self.db)
            .await?
            .ok_or(PersistenceError::SaveNotFound(save_id))?;

        let mut active: save_metadata::ActiveModel = model.into();
        active.date_last_opened = ActiveValue::Set(chrono::Utc::now().into());
        save_metadata::Entity::update(active).exec(&self.db).await?;
        Ok(())
    }

    /// Inserts the wizard profile for a save. Blank license and experience
    /// fields fall back to the signup defaults.
    pub async fn create_manager_info(
        &self,
        save_id: Uuid,
        form: &ManagerForm,
    ) -> Result<ManagerInfo, PersistenceError> {
        let coaching_license = if form.coaching_license.trim().is_empty() {
            "None".to_string()
        } else {
            form.coaching_license.clone()
        };
        let playing_experience = if form.playing_experience.trim().is_empty() {
            "Amateur".to_string()
        } else {
            form.playing_experience.clone()
        };

        let model = temp_manager_info::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            save_id: ActiveValue::Set(save_id),
            first_name: ActiveValue::Set(form.first_name.clone()),
            last_name: ActiveValue::Set(form.last_name.clone()),
            nationality: ActiveValue::Set(form.nationality.clone()),
            birth_place: ActiveValue::Set(form.birth_place.clone()),
            date_of_birth: ActiveValue::Set(form.date_of_birth.clone()),
            favorite_team: ActiveValue::Set(form.favorite_team.clone()),
            selected_club: ActiveValue::Set(form.selected_club.clone()),
            coaching_license: ActiveValue::Set(coaching_license),
            playing_experience: ActiveValue::Set(playing_experience),
        };

        let result = temp_manager_info::Entity::insert(model).exec(&self.db).await?;
        let created = temp_manager_info::Entity::find_by_id(result.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or(PersistenceError::SaveNotFound(save_id))?;

        Ok(Self::model_to_manager_info(created))
    }

    /// Creates the save record, then its manager profile. The two inserts
    /// are not wrapped in a transaction; if the second fails the new save
    /// remains listed without a profile, and the caller sees the error.
    pub async fn create_manager_and_save(
        &self,
        user_id: Uuid,
        save_name: &str,
        form: &ManagerForm,
    ) -> Result<(SaveMetadata, ManagerInfo), PersistenceError> {
        let save = self
            .create_save(user_id, save_name, &form.manager_name())
            .await?;

        match self.create_manager_info(save.id, form).await {
            Ok(info) => Ok((save, info)),
            Err(e) => {
                tracing::warn!(
                    save_id = %save.id,
                    "manager info insert failed, save record left without a profile: {}",
                    e
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;
    use migration::{Migrator, MigratorTrait};
    use std::time::Duration;
    use uuid::Uuid;

    async fn setup_test_db() -> SaveRepository {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SaveRepository::new(db)
    }

    fn test_form(first: &str, last: &str) -> ManagerForm {
        ManagerForm {
            first_name: first.to_string(),
            last_name: last.to_string(),
            nationality: "England".to_string(),
            birth_place: "Birmingham".to_string(),
            favorite_team: "Aston Villa".to_string(),
            selected_club: Some("Aston Villa".to_string()),
            ..ManagerForm::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_list_saves() {
        let repo = setup_test_db().await;
        let user_id = Uuid::new_v4();

        let save = repo
            .create_save(user_id, "Career One", "Alex Ferguson")
            .await
            .unwrap();
        assert_eq!(save.user_id, user_id);
        assert_eq!(save.manager_name, "Alex Ferguson");
        assert_eq!(save.most_recent_team, None);

        let saves = repo.list_saves(user_id).await.unwrap();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].id, save.id);
    }

    #[tokio::test]
    async fn test_list_saves_scoped_to_owner() {
        let repo = setup_test_db().await;
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        repo.create_save(alice, "Alice Career", "Alice M").await.unwrap();
        repo.create_save(bob, "Bob Career", "Bob M").await.unwrap();

        let saves = repo.list_saves(alice).await.unwrap();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].name, "Alice Career");

        assert!(repo.list_saves(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_saves_ordered_by_last_opened_descending() {
        let repo = setup_test_db().await;
        let user_id = Uuid::new_v4();

        let first = repo.create_save(user_id, "First", "M One").await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = repo.create_save(user_id, "Second", "M Two").await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let third = repo.create_save(user_id, "Third", "M Three").await.unwrap();

        let saves = repo.list_saves(user_id).await.unwrap();
        let ids: Vec<Uuid> = saves.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);

        // Re-opening the oldest save moves it to the front.
        tokio::time::sleep(Duration::from_millis(10)).await;
        repo.touch_save(first.id).await.unwrap();

        let saves = repo.list_saves(user_id).await.unwrap();
        let ids: Vec<Uuid> = saves.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![first.id, third.id, second.id]);
    }

    #[tokio::test]
    async fn test_touch_missing_save() {
        let repo = setup_test_db().await;
        let result = repo.touch_save(Uuid::new_v4()).await;
        assert!(matches!(result, Err(PersistenceError::SaveNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_manager_and_save() {
        let repo = setup_test_db().await;
        let user_id = Uuid::new_v4();

        let (save, info) = repo
            .create_manager_and_save(user_id, "New Career", &test_form("Unai", "Emery"))
            .await
            .unwrap();

        assert_eq!(save.manager_name, "Unai Emery");
        assert_eq!(info.save_id, save.id);
        assert_eq!(info.selected_club.as_deref(), Some("Aston Villa"));
        // Blank license and experience take the signup defaults.
        assert_eq!(info.coaching_license, "None");
        assert_eq!(info.playing_experience, "Amateur");
    }

    #[tokio::test]
    async fn test_failed_manager_info_leaves_save_listed() {
        let repo = setup_test_db().await;
        let user_id = Uuid::new_v4();

        let save = repo.create_save(user_id, "Career", "Jane Doe").await.unwrap();
        repo.create_manager_info(save.id, &test_form("Jane", "Doe"))
            .await
            .unwrap();

        // A second profile for the same save violates the unique key,
        // standing in for the second insert of the two-step write failing.
        let result = repo
            .create_manager_info(save.id, &test_form("Jane", "Doe"))
            .await;
        assert!(result.is_err());

        // The save record itself is untouched and still listed.
        let saves = repo.list_saves(user_id).await.unwrap();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].id, save.id);
    }

    #[tokio::test]
    async fn test_find_save() {
        let repo = setup_test_db().await;
        let user_id = Uuid::new_v4();

        let save = repo.create_save(user_id, "Career", "M").await.unwrap();
        let found = repo.find_save(save.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Career");

        assert!(repo.find_save(Uuid::new_v4()).await.unwrap().is_none());
    }
}
