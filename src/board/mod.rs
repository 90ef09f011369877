pub(super) mod bluetooth;
pub(super) mod config;
pub(super) mod platform;
