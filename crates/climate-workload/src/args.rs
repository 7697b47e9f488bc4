//! CLI argument definitions for the database connection.

use crate::connection::{
    ConnectionConfig, DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_USER,
};
use clap::Args;

/// Connection arguments. Every one has a default, so running without
/// arguments targets the reference database.
#[derive(Args, Clone, Debug)]
pub struct ConnectionArgs {
    /// MySQL server host
    #[arg(long, env = "CLIMATE_DB_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// MySQL server port
    #[arg(long, env = "CLIMATE_DB_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// MySQL user
    #[arg(long, env = "CLIMATE_DB_USER", default_value = DEFAULT_USER)]
    pub user: String,

    /// MySQL password
    #[arg(long, env = "CLIMATE_DB_PASSWORD", default_value = DEFAULT_PASSWORD, hide_env_values = true)]
    pub password: String,

    /// Database holding the ClimateData table
    #[arg(long, env = "CLIMATE_DB_NAME", default_value = DEFAULT_DATABASE)]
    pub database: String,
}

impl From<ConnectionArgs> for ConnectionConfig {
    fn from(args: ConnectionArgs) -> Self {
        ConnectionConfig {
            host: args.host,
            port: args.port,
            user: args.user,
            password: args.password,
            database: args.database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        connection: ConnectionArgs,
    }

    #[test]
    fn test_overrides() {
        let cli = TestCli::parse_from(["test", "--host", "db.internal", "--port", "3307"]);
        let config: ConnectionConfig = cli.connection.into();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 3307);
        assert_eq!(config.database, DEFAULT_DATABASE);
    }
}
