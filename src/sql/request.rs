//! Query and update requests with optional explicit transactions

use std::marker::PhantomData;

use tracing::{debug, instrument, warn};

use super::connection::SqlConnection;
use super::rows::QueryRows;
use super::template::SqlTemplate;
use crate::error::Result;
use crate::types::{Mapping, Record, Value};

/// Marker for row-returning requests
#[derive(Debug, Clone, Copy)]
pub struct Query;

/// Marker for row-modifying requests
#[derive(Debug, Clone, Copy)]
pub struct Update;

/// A rendered-on-execute SQL template plus its transaction mode.
///
/// Requests run in autocommit mode unless [`open_transaction`] is called, in
/// which case the connection is left inside a transaction that the returned
/// response must [`commit`](QueryResponse::commit) or roll back.
///
/// [`open_transaction`]: SqlRequest::open_transaction
#[derive(Debug, Clone)]
pub struct SqlRequest<K> {
    template: SqlTemplate,
    transactional: bool,
    _kind: PhantomData<K>,
}

impl<K> SqlRequest<K> {
    fn with_template(template: SqlTemplate) -> Self {
        Self {
            template,
            transactional: false,
            _kind: PhantomData,
        }
    }

    pub fn open_transaction(mut self) -> Self {
        self.transactional = true;
        self
    }

    pub fn close_transaction(mut self) -> Self {
        self.transactional = false;
        self
    }

    pub fn is_transactional(&self) -> bool {
        self.transactional
    }

    pub fn template(&self) -> &SqlTemplate {
        &self.template
    }

    /// Renders the template and runs `op`, beginning a transaction first when
    /// asked to. A transaction begun here is rolled back if `op` fails.
    fn run<C, R>(&self, conn: &mut C, op: impl FnOnce(&mut C, &str, &[Value]) -> Result<R>) -> Result<R>
    where
        C: SqlConnection + ?Sized,
    {
        let rendered = self.template.render()?;
        let began = self.transactional && !conn.in_transaction();
        if began {
            conn.begin()?;
        }

        match op(conn, &rendered.sql, &rendered.values) {
            Ok(result) => Ok(result),
            Err(err) => {
                if began {
                    if let Err(rollback) = conn.rollback() {
                        warn!("Rollback after failed statement also failed: {}", rollback);
                    }
                }
                Err(err)
            }
        }
    }
}

impl SqlRequest<Query> {
    pub fn query(template: SqlTemplate) -> Self {
        Self::with_template(template)
    }

    #[instrument(skip_all, fields(sql = self.template.text(), transactional = self.transactional))]
    pub fn execute<'c, C>(&self, conn: &'c mut C) -> Result<QueryResponse<'c, C>>
    where
        C: SqlConnection + ?Sized,
    {
        let rows = self.run(conn, |conn, sql, values| conn.query(sql, values))?;
        debug!(rows = rows.len(), "Query request finished");
        Ok(QueryResponse { conn, rows })
    }
}

impl SqlRequest<Update> {
    pub fn update(template: SqlTemplate) -> Self {
        Self::with_template(template)
    }

    #[instrument(skip_all, fields(sql = self.template.text(), transactional = self.transactional))]
    pub fn execute<'c, C>(&self, conn: &'c mut C) -> Result<UpdateResponse<'c, C>>
    where
        C: SqlConnection + ?Sized,
    {
        let affected = self.run(conn, |conn, sql, values| conn.execute(sql, values))?;
        debug!(affected, "Update request finished");
        Ok(UpdateResponse { conn, affected })
    }
}

/// Rows of an executed query, still holding the connection for
/// commit or rollback
pub struct QueryResponse<'c, C: SqlConnection + ?Sized> {
    conn: &'c mut C,
    rows: QueryRows,
}

impl<C: SqlConnection + ?Sized> QueryResponse<'_, C> {
    pub fn rows(&self) -> &QueryRows {
        &self.rows
    }

    pub fn into_rows(self) -> QueryRows {
        self.rows
    }

    pub fn to_mappings(&self, camel: bool) -> Vec<Mapping> {
        self.rows.to_mappings(camel)
    }

    pub fn to_records<T: Record + Default>(&self) -> Result<Vec<T>> {
        self.rows.to_records()
    }

    pub fn commit(&mut self) -> Result<&mut Self> {
        self.conn.commit()?;
        Ok(self)
    }

    pub fn rollback(&mut self) -> Result<&mut Self> {
        self.conn.rollback()?;
        Ok(self)
    }
}

/// Affected-row count of an executed update
pub struct UpdateResponse<'c, C: SqlConnection + ?Sized> {
    conn: &'c mut C,
    affected: usize,
}

impl<C: SqlConnection + ?Sized> UpdateResponse<'_, C> {
    pub fn affected(&self) -> usize {
        self.affected
    }

    pub fn commit(&mut self) -> Result<&mut Self> {
        self.conn.commit()?;
        Ok(self)
    }

    pub fn rollback(&mut self) -> Result<&mut Self> {
        self.conn.rollback()?;
        Ok(self)
    }
}
