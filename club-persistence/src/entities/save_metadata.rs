use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "save_metadata")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub manager_name: String,
    pub date_created: DateTimeWithTimeZone,
    pub date_last_opened: DateTimeWithTimeZone,
    pub most_recent_team: Option<String>,
    pub most_recent_place: Option<String>,
    pub most_recent_season: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::temp_manager_info::Entity")]
    TempManagerInfo,
}

impl Related<super::temp_manager_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TempManagerInfo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
