pub mod conversation;
pub mod errors;
pub mod inbox;
pub mod messages;
pub mod save;
pub mod squad;
pub mod user;

// Re-export all types
pub use conversation::*;
pub use errors::*;
pub use inbox::*;
pub use messages::*;
pub use save::*;
pub use squad::*;
pub use user::*;
