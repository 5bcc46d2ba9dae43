//! Lead entity model
//!
//! Write-only record of a lead-capture form submission.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Subdomain of the agent the form was submitted for (not FK-enforced)
    pub agent_handle: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub interest: Option<String>,

    pub marketing_consent: bool,
    pub transactional_consent: bool,

    /// Always `marketing_consent || transactional_consent`
    pub consent: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
