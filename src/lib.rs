pub mod components;
pub mod config;
pub mod directory;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod session;
pub mod templates_structs;
