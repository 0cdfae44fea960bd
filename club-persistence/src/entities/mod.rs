pub mod prelude;
pub mod save_metadata;
pub mod temp_manager_info;
