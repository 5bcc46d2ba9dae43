//! # Lead Repository
//!
//! Append-only persistence for lead-capture submissions.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::error::RepositoryError;
use crate::models::lead::{ActiveModel as LeadActiveModel, Model as LeadModel};

/// A validated submission ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub agent_handle: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub interest: Option<String>,
    pub marketing_consent: bool,
    pub transactional_consent: bool,
    pub consent: bool,
}

/// Repository for lead database operations
pub struct LeadRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LeadRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append one lead row. No uniqueness is enforced.
    pub async fn insert(&self, lead: NewLead) -> Result<LeadModel, RepositoryError> {
        if lead.agent_handle.is_empty() {
            return Err(RepositoryError::validation_error("agent_handle is required"));
        }

        let model = LeadActiveModel {
            agent_handle: Set(lead.agent_handle),
            first_name: Set(lead.first_name),
            last_name: Set(lead.last_name),
            email: Set(lead.email),
            phone: Set(lead.phone),
            interest: Set(lead.interest),
            marketing_consent: Set(lead.marketing_consent),
            transactional_consent: Set(lead.transactional_consent),
            consent: Set(lead.consent),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        model
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
