pub mod auction;
pub mod backstop;
pub mod clock;
pub mod events;
pub mod oracle;
pub mod paused_operations;
pub mod pool;
pub mod reserve;
pub mod reserve_map;
#[allow(clippy::module_inception)]
pub mod state;
pub mod user;
