//! Agent entity model
//!
//! One agent profile. `subdomain` is the public slug used by the profile
//! routes and as a host label.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "agents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Unique slug identifying the agent
    #[sea_orm(unique)]
    pub subdomain: String,

    pub first_name: String,
    pub last_name: String,
    pub brand_name: String,
    pub phone_number: String,
    pub email: String,

    /// Literal URL, rendered without escaping
    pub privacy_policy_url: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub about_me: Option<String>,

    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,

    /// Literal URL, rendered without escaping
    pub avatar_url: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Display name as shown on the profile and directory cards.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
