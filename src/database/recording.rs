//! In memory `Session` that records every statement
//!
//! Suppliers inserted through `INSERT INTO suppliers` receive increasing ids starting at 1,
//! so lookups by company name behave like the `SERIAL` column of the real table.

use std::collections::HashMap;

use crate::error::{ServiceError, ServiceResult};
use crate::models::SqlValue;

use super::Session;

#[derive(Debug, PartialEq, Clone)]
pub struct Statement {
    pub query: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    pub fn starts_with(&self, prefix: &str) -> bool {
        normalize(&self.query).starts_with(prefix)
    }
}

#[derive(Debug, Default)]
pub struct RecordingSession {
    pub statements: Vec<Statement>,
    pub scripts: Vec<String>,
    /// Column types reported per table
    pub columns: HashMap<String, Vec<String>>,
    /// Product names present in `products`
    pub products: Vec<String>,
    /// Statements starting with this prefix fail with a database error
    pub fail_on: Option<String>,
    /// Number of matching statements that still succeed before `fail_on` applies
    pub fail_after: usize,
    supplier_ids: HashMap<String, i32>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(mut self, table: &str, types: &[&str]) -> Self {
        self.columns.insert(
            table.to_owned(),
            types.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn with_products(mut self, names: &[&str]) -> Self {
        self.products = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn failing_on(self, prefix: &str) -> Self {
        self.failing_after(prefix, 0)
    }

    /// Let `count` statements starting with `prefix` pass, fail every later one
    pub fn failing_after(mut self, prefix: &str, count: usize) -> Self {
        self.fail_on = Some(prefix.to_owned());
        self.fail_after = count;
        self
    }

    /// Recorded statements starting with `prefix`
    pub fn matching(&self, prefix: &str) -> Vec<&Statement> {
        self.statements
            .iter()
            .filter(|s| s.starts_with(prefix))
            .collect()
    }

    /// Index of the first recorded statement starting with `prefix`
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.statements.iter().position(|s| s.starts_with(prefix))
    }

    fn record(&mut self, query: &str, params: &[SqlValue]) -> ServiceResult<()> {
        if let Some(prefix) = &self.fail_on {
            if normalize(query).starts_with(prefix.as_str())
                && self.matching(prefix).len() >= self.fail_after
            {
                return Err(ServiceError::Database(format!("rejected: {}", prefix)));
            }
        }
        self.statements.push(Statement {
            query: query.to_owned(),
            params: params.to_vec(),
        });
        Ok(())
    }
}

/// Collapse whitespace so multi-line statements compare by their leading keywords
fn normalize(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Session for RecordingSession {
    async fn execute(&mut self, query: &str, params: &[SqlValue]) -> ServiceResult<u64> {
        self.record(query, params)?;
        let query = normalize(query);

        if query.starts_with("INSERT INTO suppliers") {
            if let Some(SqlValue::Text(name)) = params.first() {
                let next_id = self.supplier_ids.len() as i32 + 1;
                self.supplier_ids.entry(name.clone()).or_insert(next_id);
            }
            return Ok(1);
        }

        if query.starts_with("UPDATE products") {
            if let Some(SqlValue::Text(name)) = params.get(1) {
                return Ok(self.products.iter().filter(|p| *p == name).count() as u64);
            }
            return Ok(0);
        }

        Ok(if query.starts_with("INSERT") { 1 } else { 0 })
    }

    async fn execute_script(&mut self, script: &str) -> ServiceResult<()> {
        if let Some(prefix) = &self.fail_on {
            if normalize(script).starts_with(prefix.as_str()) {
                return Err(ServiceError::Database(format!("rejected: {}", prefix)));
            }
        }
        self.scripts.push(script.to_owned());
        Ok(())
    }

    async fn fetch_id(&mut self, query: &str, params: &[SqlValue]) -> ServiceResult<Option<i32>> {
        self.record(query, params)?;
        match params.first() {
            Some(SqlValue::Text(name)) => Ok(self.supplier_ids.get(name).copied()),
            _ => Ok(None),
        }
    }

    async fn column_types(&mut self, table: &str) -> ServiceResult<Vec<String>> {
        Ok(self.columns.get(table).cloned().unwrap_or_default())
    }
}
