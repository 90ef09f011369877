pub mod config;
pub mod events;
pub mod state;
pub mod status;
pub mod time;
