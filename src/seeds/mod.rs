//! Database seeding functionality
//!
//! Startup fixtures for the agents table. How existing rows are treated is
//! controlled by [`SeedPolicy`].

pub mod agent;

pub use agent::{SeedPolicy, fixture_agents, seed_agents};
