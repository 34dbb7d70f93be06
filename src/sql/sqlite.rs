//! SQLite backend via rusqlite

use std::path::Path;

use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection};
use tracing::{debug, instrument};

use super::connection::SqlConnection;
use super::rows::QueryRows;
use crate::error::{Result, SqlError};
use crate::types::{Value, DATE_TIME_FORMAT};

/// Binds a [`Value`] as a SQLite parameter
struct Param<'a>(&'a Value);

impl ToSql for Param<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Bool(v) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*v))),
            Value::Int(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            Value::Float(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            Value::String(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Value::Bytes(v) => ToSqlOutput::Borrowed(ValueRef::Blob(&v[..])),
            Value::DateTime(v) => ToSqlOutput::Owned(SqlValue::Text(v.format(DATE_TIME_FORMAT).to_string())),
            Value::List(_) | Value::Map(_) => ToSqlOutput::Owned(SqlValue::Text(self.0.to_json().to_string())),
        })
    }
}

fn from_sql(cell: ValueRef<'_>) -> Value {
    match cell {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Int(v),
        ValueRef::Real(v) => Value::Float(v),
        ValueRef::Text(v) => Value::String(String::from_utf8_lossy(v).into_owned()),
        ValueRef::Blob(v) => Value::Bytes(v.to_vec()),
    }
}

/// [`SqlConnection`] over a `rusqlite::Connection`
pub struct SqliteConnection {
    connection: Connection,
}

impl SqliteConnection {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening SQLite database {}", path.display());
        Ok(Self::from_connection(Connection::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    /// Runs several `;`-separated statements without parameters
    pub fn execute_batch(&mut self, sql: &str) -> Result<()> {
        self.connection.execute_batch(sql)?;
        Ok(())
    }

    pub fn inner(&self) -> &Connection {
        &self.connection
    }

    pub fn into_inner(self) -> Connection {
        self.connection
    }
}

impl SqlConnection for SqliteConnection {
    #[instrument(skip(self, params), fields(params = params.len()))]
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<QueryRows> {
        let mut stmt = self.connection.prepare_cached(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_owned).collect();
        let width = columns.len();

        let mut result = QueryRows::new(columns);
        let mut rows = stmt.query(params_from_iter(params.iter().map(Param)))?;
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(width);
            for index in 0..width {
                cells.push(from_sql(row.get_ref(index)?));
            }
            result.rows.push(cells);
        }
        debug!(rows = result.len(), "Query finished");
        Ok(result)
    }

    #[instrument(skip(self, params), fields(params = params.len()))]
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<usize> {
        let mut stmt = self.connection.prepare_cached(sql)?;
        let affected = stmt.execute(params_from_iter(params.iter().map(Param)))?;
        debug!(affected, "Statement executed");
        Ok(affected)
    }

    fn begin(&mut self) -> Result<()> {
        if self.in_transaction() {
            return Err(SqlError::Transaction("transaction already open".into()).into());
        }
        self.connection.execute_batch("BEGIN")?;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if !self.in_transaction() {
            return Err(SqlError::Transaction("no open transaction to commit".into()).into());
        }
        self.connection.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        if !self.in_transaction() {
            return Err(SqlError::Transaction("no open transaction to roll back".into()).into());
        }
        self.connection.execute_batch("ROLLBACK")?;
        Ok(())
    }

    fn in_transaction(&self) -> bool {
        !self.connection.is_autocommit()
    }
}
