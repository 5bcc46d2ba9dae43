//! # Repository Layer
//!
//! Repository implementations that encapsulate SeaORM operations for the
//! agents and leads tables.

pub mod agent;
pub mod lead;

pub use agent::AgentRepository;
pub use lead::{LeadRepository, NewLead};
