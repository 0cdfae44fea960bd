pub mod auth_gate;
pub mod conversation;
pub mod datasets;
pub mod scripts;
pub mod tables;
pub mod wizard;

// Re-export main components
pub use auth_gate::*;
pub use conversation::*;
pub use datasets::*;
pub use scripts::*;
pub use tables::*;
pub use wizard::*;
