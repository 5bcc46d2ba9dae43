//! # Agent Microsite Library
//!
//! Multi-tenant insurance agent microsite: per-agent profile pages, a
//! searchable directory and lead capture, backed by a SeaORM database.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod intake;
pub mod models;
pub mod render;
pub mod repositories;
pub mod resolver;
pub mod seeds;
pub mod server;
pub mod telemetry;
pub use migration;
