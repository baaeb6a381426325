//! PostgreSQL migration backend for tenant databases.

use crate::error::{DbError, DbResult};
use crate::tls::TlsBuilder;
use crate::traits::{is_nullable_flag, ColumnDescriptor, MigrationConnection};
use ::postgres::config::SslMode as PgSslMode;
use ::postgres::{Client, Config as PgConfig};
use td_core::DatabaseConfig;

const APPLICATION_NAME: &str = "tenantdb";

/// PostgreSQL database backend.
///
/// Owns one blocking client; dropping the backend closes the connection.
pub struct PostgresBackend {
    client: Client,
}

impl PostgresBackend {
    /// Connect to the database described by `config`, always over TLS.
    pub fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        let pg_config = build_pg_config(config)?;
        let tls = TlsBuilder::new(config.ssl_mode).build()?;

        log::info!(
            "Connecting to {} (ssl_mode={})",
            config.describe(),
            config.ssl_mode
        );
        let client = pg_config
            .connect(tls)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", config.describe(), e)))?;
        Ok(Self { client })
    }

    fn transaction_control(&mut self, sql: &str) -> DbResult<()> {
        self.client
            .batch_execute(sql)
            .map_err(|e| DbError::TransactionError(format!("{sql} failed: {}", describe_error(&e))))
    }
}

/// Translate connection settings into a driver config.
///
/// Connection strings are parsed by the driver; malformed ones are reported as
/// connection errors. TLS is forced on regardless of any `sslmode` inside the
/// connection string. `connect_timeout_secs` applies only when the connection
/// string sets no `connect_timeout` of its own.
pub fn build_pg_config(config: &DatabaseConfig) -> DbResult<PgConfig> {
    config
        .validate("database")
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

    let mut pg = match &config.url {
        Some(url) => url
            .parse::<PgConfig>()
            .map_err(|e| DbError::ConnectionError(format!("malformed connection string: {e}")))?,
        None => {
            let mut pg = PgConfig::new();
            // validate() guarantees host and user for the discrete form
            pg.host(config.host.as_deref().unwrap_or_default())
                .port(config.port)
                .dbname(&config.dbname)
                .user(config.user.as_deref().unwrap_or_default());
            pg
        }
    };

    if pg.get_hosts().is_empty() {
        return Err(DbError::ConnectionError(
            "connection string does not name a host".to_string(),
        ));
    }

    let password = config
        .resolve_password()
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;
    if let Some(password) = password {
        pg.password(password);
    }

    // a connect_timeout inside the connection string wins over the config value
    if pg.get_connect_timeout().is_none() {
        pg.connect_timeout(config.connect_timeout());
    }
    pg.ssl_mode(PgSslMode::Require)
        .application_name(APPLICATION_NAME);
    Ok(pg)
}

/// Prefer the server's message and SQLSTATE over the generic driver text.
fn describe_error(err: &::postgres::Error) -> String {
    match err.as_db_error() {
        Some(db) => format!(
            "{}: {} (SQLSTATE {})",
            db.severity(),
            db.message(),
            db.code().code()
        ),
        None => err.to_string(),
    }
}

impl MigrationConnection for PostgresBackend {
    fn db_type(&self) -> &'static str {
        "postgres"
    }

    fn default_schema(&self) -> &'static str {
        "public"
    }

    fn begin(&mut self) -> DbResult<()> {
        self.transaction_control("BEGIN")
    }

    fn execute(&mut self, sql: &str) -> DbResult<()> {
        self.client
            .batch_execute(sql)
            .map_err(|e| DbError::ExecutionError(describe_error(&e)))
    }

    fn commit(&mut self) -> DbResult<()> {
        self.transaction_control("COMMIT")
    }

    fn rollback(&mut self) -> DbResult<()> {
        self.transaction_control("ROLLBACK")
    }

    fn table_exists(&mut self, schema: &str, table: &str) -> DbResult<bool> {
        let row = self
            .client
            .query_one(
                "SELECT EXISTS (SELECT 1 FROM information_schema.tables \
                 WHERE table_schema::text = $1 AND table_name::text = $2 \
                 AND table_type = 'BASE TABLE')",
                &[&schema, &table],
            )
            .map_err(|e| DbError::CatalogError(format!("table lookup failed: {}", describe_error(&e))))?;
        row.try_get(0)
            .map_err(|e| DbError::CatalogError(format!("row error: {e}")))
    }

    fn list_tables(&mut self, schema: &str) -> DbResult<Vec<String>> {
        let rows = self
            .client
            .query(
                "SELECT table_name::text FROM information_schema.tables \
                 WHERE table_schema::text = $1 AND table_type = 'BASE TABLE' \
                 ORDER BY table_name",
                &[&schema],
            )
            .map_err(|e| {
                DbError::CatalogError(format!("table listing failed: {}", describe_error(&e)))
            })?;
        rows.iter()
            .map(|row| row.try_get::<_, String>(0))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::CatalogError(format!("row error: {e}")))
    }

    fn list_columns(&mut self, schema: &str, table: &str) -> DbResult<Vec<ColumnDescriptor>> {
        let rows = self
            .client
            .query(
                "SELECT column_name::text, data_type::text, is_nullable::text, \
                 column_default::text \
                 FROM information_schema.columns \
                 WHERE table_schema::text = $1 AND table_name::text = $2 \
                 ORDER BY ordinal_position",
                &[&schema, &table],
            )
            .map_err(|e| {
                DbError::CatalogError(format!("column listing failed: {}", describe_error(&e)))
            })?;
        rows.iter()
            .map(|row| -> Result<ColumnDescriptor, ::postgres::Error> {
                let nullable: String = row.try_get(2)?;
                Ok(ColumnDescriptor {
                    name: row.try_get(0)?,
                    data_type: row.try_get(1)?,
                    nullable: is_nullable_flag(&nullable),
                    default: row.try_get(3)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::CatalogError(format!("row error: {e}")))
    }
}

#[cfg(test)]
#[path = "postgres_test.rs"]
mod tests;
