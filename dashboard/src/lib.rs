// Dashboard server library: router, state, templates, and HTMX handlers.
// The binary in main.rs wires these to configuration and the poll loop.

pub mod handlers;
pub mod routes;
pub mod state;
pub mod templates;
