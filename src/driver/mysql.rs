//! MySQL connector backed by `sqlx`.
//!
//! # Responsibilities
//! - Parse a `mysql://` endpoint descriptor into connect options once
//! - Dial the host inside a dial scope
//! - Forward prepare / begin / close to the sqlx connection

use std::str::FromStr;

use sqlx::mysql::{MySql, MySqlConnectOptions, MySqlConnection, MySqlStatement};
use sqlx::{ConnectOptions, Connection as _, Executor, Transaction};

use crate::driver::{Connection, Connector, DriverError, DriverInfo, DriverResult};
use crate::resilience::DialScope;

/// Connector bound to a single MySQL host.
#[derive(Debug, Clone)]
pub struct MySqlHostConnector {
    options: MySqlConnectOptions,
}

impl MySqlHostConnector {
    /// Create a connector from already-built options.
    pub fn new(options: MySqlConnectOptions) -> Self {
        Self { options }
    }

    /// Connect options this connector dials with.
    pub fn options(&self) -> &MySqlConnectOptions {
        &self.options
    }
}

impl FromStr for MySqlHostConnector {
    type Err = DriverError;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let options = MySqlConnectOptions::from_str(descriptor)
            .map_err(|e| DriverError::InvalidEndpoint(e.to_string()))?;
        Ok(Self::new(options))
    }
}

impl Connector for MySqlHostConnector {
    type Connection = MySqlHostConnection;
    type Error = DriverError;

    async fn connect(&self, scope: &DialScope) -> DriverResult<MySqlHostConnection> {
        let conn = scope.run(self.options.connect()).await??;
        Ok(MySqlHostConnection { conn })
    }

    fn driver(&self) -> DriverInfo {
        DriverInfo::MYSQL
    }
}

/// An established connection to one MySQL host.
#[derive(Debug)]
pub struct MySqlHostConnection {
    conn: MySqlConnection,
}

impl MySqlHostConnection {
    /// The underlying sqlx connection.
    pub fn inner_mut(&mut self) -> &mut MySqlConnection {
        &mut self.conn
    }
}

impl Connection for MySqlHostConnection {
    type Statement = MySqlStatement<'static>;
    type Transaction<'c>
        = Transaction<'c, MySql>
    where
        Self: 'c;

    async fn prepare(&mut self, query: &str) -> DriverResult<MySqlStatement<'static>> {
        let statement = (&mut self.conn).prepare(query).await?;
        Ok(sqlx::Statement::to_owned(&statement))
    }

    async fn begin(&mut self) -> DriverResult<Transaction<'_, MySql>> {
        Ok(self.conn.begin().await?)
    }

    async fn close(self) -> DriverResult<()> {
        Ok(self.conn.close().await?)
    }
}
