//! Connection abstraction the request layer executes against

use crate::error::Result;
use crate::types::Value;

use super::rows::QueryRows;

/// A database session able to run positional-parameter SQL.
///
/// Implementations start in autocommit mode; `begin` opens an explicit
/// transaction that lasts until `commit` or `rollback`.
pub trait SqlConnection {
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<QueryRows>;

    /// Returns the number of affected rows
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<usize>;

    fn begin(&mut self) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;

    fn in_transaction(&self) -> bool;
}
