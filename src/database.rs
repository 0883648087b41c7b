use log::debug;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, Executor};

use crate::env;
use crate::error::ServiceResult;
use crate::models::SqlValue;

#[cfg(test)]
pub mod recording;

/// Statement level access to the database
///
/// Implemented for a live postgres connection and, in tests, for a recorder that
/// captures every issued statement.
#[allow(async_fn_in_trait)]
pub trait Session {
    /// Execute a single parameterized statement, returns the number of affected rows.
    async fn execute(&mut self, query: &str, params: &[SqlValue]) -> ServiceResult<u64>;

    /// Execute a script of one or more statements verbatim, without parameters.
    async fn execute_script(&mut self, script: &str) -> ServiceResult<()>;

    /// Fetch the integer in the first column of the first row, if there is any row.
    async fn fetch_id(&mut self, query: &str, params: &[SqlValue]) -> ServiceResult<Option<i32>>;

    /// Base types of the columns of `table`, in column order. Length and precision
    /// modifiers are left out, they are checked when the value is assigned to the column.
    async fn column_types(&mut self, table: &str) -> ServiceResult<Vec<String>>;
}

impl Session for PgConnection {
    async fn execute(&mut self, query: &str, params: &[SqlValue]) -> ServiceResult<u64> {
        debug!("execute: {}", query.trim());
        let mut statement = sqlx::query(query);
        for param in params {
            statement = match param {
                SqlValue::Text(value) => statement.bind(value.as_str()),
                SqlValue::Integer(value) => statement.bind(*value),
                SqlValue::Null => statement.bind(None::<String>),
            };
        }

        let result = statement.execute(&mut *self).await?;
        Ok(result.rows_affected())
    }

    async fn execute_script(&mut self, script: &str) -> ServiceResult<()> {
        // unparameterized strings use the simple query protocol, which allows multiple statements
        Executor::execute(&mut *self, script).await?;
        Ok(())
    }

    async fn fetch_id(&mut self, query: &str, params: &[SqlValue]) -> ServiceResult<Option<i32>> {
        debug!("fetch: {}", query.trim());
        let mut statement = sqlx::query_scalar::<_, i32>(query);
        for param in params {
            statement = match param {
                SqlValue::Text(value) => statement.bind(value.as_str()),
                SqlValue::Integer(value) => statement.bind(*value),
                SqlValue::Null => statement.bind(None::<String>),
            };
        }

        Ok(statement.fetch_optional(&mut *self).await?)
    }

    async fn column_types(&mut self, table: &str) -> ServiceResult<Vec<String>> {
        let types = sqlx::query_scalar::<_, String>(
            r#"
                SELECT format_type(a.atttypid, NULL)
                FROM pg_attribute a
                WHERE a.attrelid = $1::regclass AND a.attnum > 0 AND NOT a.attisdropped
                ORDER BY a.attnum
            "#,
        )
        .bind(quote_ident(table))
        .fetch_all(&mut *self)
        .await?;

        Ok(types)
    }
}

/// Connection parameters of the configured server for the given database
pub fn connect_options(database: &str) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(env::DATABASE_HOST.as_str())
        .port(*env::DATABASE_PORT)
        .username(env::DATABASE_USER.as_str())
        .password(env::DATABASE_PASSWORD.as_str())
        .database(database)
}

/// Open a single connection, there is no pool behind it
pub async fn connect(options: &PgConnectOptions) -> ServiceResult<PgConnection> {
    let connection = PgConnection::connect_with(options).await?;
    Ok(connection)
}

/// Quote an sql identifier, embedded quotes are doubled
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
