//! # Agent Repository
//!
//! Lookup and directory search over the agents table, plus the bulk
//! operations used by startup seeding.

use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::error::RepositoryError;
use crate::models::agent::{self, Entity as Agent, Model as AgentModel};

/// Escape character used in directory search `LIKE` patterns.
const LIKE_ESCAPE: char = '!';

/// Repository for agent database operations
pub struct AgentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AgentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Exact match on `subdomain`; at most one record.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<AgentModel>, RepositoryError> {
        Agent::find()
            .filter(agent::Column::Subdomain.eq(slug))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// All agents in insertion order.
    pub async fn list_all(&self) -> Result<Vec<AgentModel>, RepositoryError> {
        Agent::find()
            .order_by_asc(agent::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Directory search.
    ///
    /// An empty term lists every agent. Otherwise returns agents whose first
    /// name, last name, city or zip code contains `term`, ignoring case. The
    /// term is matched literally: `%` and `_` are not wildcards.
    pub async fn search(&self, term: &str) -> Result<Vec<AgentModel>, RepositoryError> {
        if term.is_empty() {
            return self.list_all().await;
        }

        let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
        let condition = Condition::any()
            .add(lower_like(agent::Column::FirstName, &pattern))
            .add(lower_like(agent::Column::LastName, &pattern))
            .add(lower_like(agent::Column::City, &pattern))
            .add(lower_like(agent::Column::ZipCode, &pattern));

        Agent::find()
            .filter(condition)
            .order_by_asc(agent::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn count(&self) -> Result<u64, RepositoryError> {
        Agent::find()
            .count(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn create(&self, agent: agent::ActiveModel) -> Result<AgentModel, RepositoryError> {
        agent
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Remove every agent row. Only used by the `always` seeding policy.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = Agent::delete_many()
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(result.rows_affected)
    }
}

fn lower_like(column: agent::Column, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col((Agent, column))))
        .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if c == LIKE_ESCAPE || c == '%' || c == '_' {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
