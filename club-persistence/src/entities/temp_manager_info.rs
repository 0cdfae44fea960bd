use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "temp_manager_info")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::save_metadata::Entity",
        from = "Column::SaveId",
        to = "super::save_metadata::Column::Id"
    )]
    SaveMetadata,
}

impl Related<super::save_metadata::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaveMetadata.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
