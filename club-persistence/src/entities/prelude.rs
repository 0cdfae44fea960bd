pub use super::save_metadata::Entity as SaveMetadata;
pub use super::temp_manager_info::Entity as TempManagerInfo;
