//! Agent seeding functionality
//!
//! Inserts the fixture agents at startup. Two policies exist because
//! deployments disagree on whether a boot should reset the table:
//!
//! * [`SeedPolicy::IfEmpty`] only inserts into an empty table.
//! * [`SeedPolicy::Always`] clears the table and inserts the fixtures again.
//!
//! Seeding is not transactional; concurrent readers during startup may observe
//! a partially seeded table.

use std::{fmt, str::FromStr};

use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::models::agent;
use crate::repositories::AgentRepository;

/// How startup seeding treats rows that already exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedPolicy {
    /// Delete every agent, then insert the fixtures.
    Always,
    /// Insert the fixtures only when no agent exists.
    #[default]
    IfEmpty,
}

impl FromStr for SeedPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "if-empty" | "if_empty" => Ok(Self::IfEmpty),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for SeedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("always"),
            Self::IfEmpty => f.write_str("if-empty"),
        }
    }
}

/// Fixture data for one seeded agent
#[derive(Debug, Clone)]
pub struct AgentFixture {
    pub subdomain: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub brand_name: &'static str,
    pub phone_number: &'static str,
    pub email: &'static str,
    pub privacy_policy_url: Option<&'static str>,
    pub about_me: Option<&'static str>,
    pub city: Option<&'static str>,
    pub state: Option<&'static str>,
    pub zip_code: Option<&'static str>,
    pub avatar_url: Option<&'static str>,
}

impl AgentFixture {
    fn into_active_model(self) -> agent::ActiveModel {
        agent::ActiveModel {
            subdomain: Set(self.subdomain.to_string()),
            first_name: Set(self.first_name.to_string()),
            last_name: Set(self.last_name.to_string()),
            brand_name: Set(self.brand_name.to_string()),
            phone_number: Set(self.phone_number.to_string()),
            email: Set(self.email.to_string()),
            privacy_policy_url: Set(self.privacy_policy_url.map(str::to_string)),
            about_me: Set(self.about_me.map(str::to_string)),
            city: Set(self.city.map(str::to_string)),
            state: Set(self.state.map(str::to_string)),
            zip_code: Set(self.zip_code.map(str::to_string)),
            avatar_url: Set(self.avatar_url.map(str::to_string)),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

/// The agents every fresh deployment starts with.
pub fn fixture_agents() -> Vec<AgentFixture> {
    vec![
        AgentFixture {
            subdomain: "jay-bloom",
            first_name: "Jay",
            last_name: "Bloom",
            brand_name: "Quility Switchboard Funnel",
            phone_number: "(555) 123-4567",
            email: "jay@links-insure.com",
            privacy_policy_url: Some("https://links-insure.com/privacy"),
            about_me: Some(
                "Jay Bloom is a dedicated insurance professional with over 15 years of experience \
                 helping families secure their financial future. Specializing in life insurance and \
                 mortgage protection, Jay is committed to providing personalized service and finding \
                 the best coverage options for his clients.",
            ),
            city: Some("Austin"),
            state: Some("TX"),
            zip_code: Some("78701"),
            avatar_url: Some("https://randomuser.me/api/portraits/men/32.jpg"),
        },
        AgentFixture {
            subdomain: "gavin-morel",
            first_name: "Gavin",
            last_name: "Morel",
            brand_name: "Quility Switchboard Funnel",
            phone_number: "(555) 987-6543",
            email: "gavin@links-insure.com",
            privacy_policy_url: Some("https://links-insure.com/privacy"),
            about_me: Some(
                "Gavin Morel is passionate about making insurance simple and accessible. With a \
                 focus on education and transparency, he guides his clients through the complexities \
                 of insurance policies to ensure they have the protection they need.",
            ),
            city: Some("Dallas"),
            state: Some("TX"),
            zip_code: Some("75201"),
            avatar_url: Some("https://randomuser.me/api/portraits/men/45.jpg"),
        },
    ]
}

/// Seeds the agents table according to `policy`.
///
/// Returns the number of agents inserted (zero when an `IfEmpty` seed finds
/// existing rows).
pub async fn seed_agents(db: &DatabaseConnection, policy: SeedPolicy) -> Result<usize> {
    let repo = AgentRepository::new(db);

    match policy {
        SeedPolicy::IfEmpty => {
            let existing = repo.count().await.context("counting existing agents")?;
            if existing > 0 {
                log::info!(
                    "Agents table already has {} rows, skipping seed",
                    existing
                );
                return Ok(0);
            }
        }
        SeedPolicy::Always => {
            let removed = repo.delete_all().await.context("clearing agents table")?;
            log::info!("Cleared {} agents before reseeding", removed);
        }
    }

    let mut inserted = 0;
    for fixture in fixture_agents() {
        let subdomain = fixture.subdomain;
        match repo.create(fixture.into_active_model()).await {
            Ok(agent) => {
                log::info!("Seeded agent '{}' (id {})", agent.subdomain, agent.id);
                inserted += 1;
            }
            Err(e) => {
                log::error!("Failed to seed agent '{}': {}", subdomain, e);
                return Err(e).with_context(|| format!("seeding agent '{}'", subdomain));
            }
        }
    }

    log::info!("Agent seeding completed ({} inserted, policy {})", inserted, policy);
    Ok(inserted)
}
