// Common library for shared code between the dashboard server and its tests

pub mod badge;
pub mod client;
pub mod config;
pub mod errors;
pub mod format;
pub mod models;
pub mod poller;
