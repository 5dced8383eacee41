pub mod admin;
pub mod backstop;
pub mod context;
pub mod keeper;
pub mod user;

pub use admin::*;
pub use backstop::*;
pub use context::*;
pub use keeper::*;
pub use user::*;
