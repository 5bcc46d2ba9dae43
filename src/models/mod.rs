//! # Data Models
//!
//! SeaORM entities for the agent microsite.

pub mod agent;
pub mod lead;

pub use agent::Entity as Agent;
pub use lead::Entity as Lead;
