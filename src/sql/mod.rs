//! Lightweight SQL execution over named-placeholder templates
//!
//! `#{name}` placeholders become bound `?` parameters; `${name}` splices are
//! substituted into the text before binding. Results come back as
//! [`QueryRows`], convertible into mappings or records.

pub mod connection;
pub mod request;
pub mod rows;
pub mod sqlite;
pub mod template;

pub use connection::SqlConnection;
pub use request::{Query, QueryResponse, SqlRequest, Update, UpdateResponse};
pub use rows::QueryRows;
pub use sqlite::SqliteConnection;
pub use template::{RenderedSql, SqlTemplate};

use crate::error::Result;
use crate::types::Mapping;

/// Runs `sql` as an autocommit query and returns camel-cased row mappings
pub fn select<C: SqlConnection + ?Sized>(conn: &mut C, sql: &str) -> Result<Vec<Mapping>> {
    let response = SqlRequest::query(SqlTemplate::new(sql)).execute(conn)?;
    Ok(response.to_mappings(true))
}
