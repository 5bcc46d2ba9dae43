//! Lead intake: validation of the lead-capture form and consent derivation.

use serde::Deserialize;
use thiserror::Error;

use crate::repositories::NewLead;

/// Value browsers send for a checked checkbox without an explicit `value`.
const CHECKED: &str = "on";

/// Raw urlencoded body of `POST /submit`. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadSubmission {
    pub agent_handle: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub interest: Option<String>,
    pub sms_marketing: Option<String>,
    pub sms_transactional: Option<String>,
}

/// Opt-in choices derived from the two SMS checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsentFlags {
    pub marketing: bool,
    pub transactional: bool,
    /// `marketing || transactional`
    pub consent: bool,
}

impl ConsentFlags {
    pub fn from_checkboxes(sms_marketing: Option<&str>, sms_transactional: Option<&str>) -> Self {
        let marketing = sms_marketing == Some(CHECKED);
        let transactional = sms_transactional == Some(CHECKED);
        Self {
            marketing,
            transactional,
            consent: marketing || transactional,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Missing required fields.")]
    MissingAgentHandle,
}

impl LeadSubmission {
    /// Validate the submission and derive its consent flags.
    ///
    /// Only `agent_handle` is required; the contact fields pass through
    /// unchanged.
    pub fn into_new_lead(self) -> Result<NewLead, IntakeError> {
        let agent_handle = self
            .agent_handle
            .filter(|handle| !handle.is_empty())
            .ok_or(IntakeError::MissingAgentHandle)?;

        let flags = ConsentFlags::from_checkboxes(
            self.sms_marketing.as_deref(),
            self.sms_transactional.as_deref(),
        );

        Ok(NewLead {
            agent_handle,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            interest: self.interest,
            marketing_consent: flags.marketing,
            transactional_consent: flags.transactional,
            consent: flags.consent,
        })
    }
}
