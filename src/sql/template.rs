//! Named-placeholder SQL templates

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::trace;

use crate::error::{Error, Result, SqlError};
use crate::types::{IntoValue, Value};
use crate::utils::{capture_with, is_blank};

lazy_static! {
    /// `${name}`: spliced into the SQL text as-is
    static ref SPLICE: Regex = Regex::new(r"\$\{\s*(\S+?)\s*\}").unwrap();
    /// `#{name}`: bound as a positional `?` parameter
    static ref BIND: Regex = Regex::new(r"#\{\s*(\S+?)\s*\}").unwrap();
}

/// SQL text plus the values bound to its `?` markers, in order
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSql {
    pub sql: String,
    pub values: Vec<Value>,
}

/// SQL text with `#{name}` bind placeholders and `${name}` splices.
///
/// ```ignore
/// let rendered = SqlTemplate::new("SELECT * FROM ${table} WHERE id = #{id}")
///     .param("table", "users")
///     .param("id", 7)
///     .render()?;
/// assert_eq!(rendered.sql, "SELECT * FROM users WHERE id = ?");
/// ```
///
/// Splices are substituted first and are not escaped; only pass trusted text
/// through them.
#[derive(Debug, Clone, Default)]
pub struct SqlTemplate {
    sql: String,
    params: HashMap<String, Value>,
}

impl SqlTemplate {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: HashMap::new(),
        }
    }

    pub fn sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = sql.into();
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl IntoValue) -> Self {
        self.params.insert(name.into(), value.into_value());
        self
    }

    pub fn text(&self) -> &str {
        &self.sql
    }

    /// Resolves splices, then turns every bind placeholder into `?`.
    ///
    /// Fails when a referenced parameter is missing, or when the rendered SQL
    /// has more `?` markers than collected values (a bare `?` in the text or
    /// in a splice). Every bind placeholder yields exactly one marker, so
    /// there are never more values than markers.
    pub fn render(&self) -> Result<RenderedSql> {
        if is_blank(&self.sql) {
            return Err(Error::invalid_argument("sql must not be empty"));
        }
        if self.params.keys().any(|name| is_blank(name)) {
            return Err(Error::invalid_argument("sql parameter name must not be empty"));
        }

        let mut missing = None;
        let spliced = SPLICE.replace_all(&self.sql, |caps: &Captures<'_>| {
            let name = &caps[1];
            match self.params.get(name) {
                Some(value) => value.to_string(),
                None => {
                    missing.get_or_insert_with(|| name.to_string());
                    String::new()
                }
            }
        });
        if let Some(name) = missing {
            return Err(SqlError::MissingParameter(name).into());
        }

        let mut values = Vec::new();
        for name in capture_with(&BIND, &spliced, 1) {
            let value = self
                .params
                .get(&name)
                .ok_or(SqlError::MissingParameter(name.clone()))?;
            values.push(value.clone());
        }
        let sql = BIND.replace_all(&spliced, "?").into_owned();

        let markers = sql.matches('?').count();
        if values.len() < markers {
            return Err(SqlError::ParameterCount {
                markers,
                values: values.len(),
            }
            .into());
        }

        trace!(sql = %sql, bound = values.len(), "Rendered SQL template");
        Ok(RenderedSql { sql, values })
    }
}
