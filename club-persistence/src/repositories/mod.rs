pub mod save_repository;

pub use save_repository::*;
