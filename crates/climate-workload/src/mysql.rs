//! MySQL-backed store.

use crate::connection::ConnectionConfig;
use crate::error::WorkloadError;
use crate::store::{ClimateStore, StoreConnector, TABLE_NAME};
use async_trait::async_trait;
use climate_generator::{ClimateRecord, Predicate, UpdateRule};
use mysql_async::{prelude::*, Conn, Row};
use tracing::debug;

/// Opens a fresh MySQL connection for every worker.
#[derive(Debug, Clone)]
pub struct MySqlConnector {
    config: ConnectionConfig,
}

impl MySqlConnector {
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

#[async_trait]
impl StoreConnector for MySqlConnector {
    type Store = MySqlStore;

    async fn connect(&self) -> Result<MySqlStore, WorkloadError> {
        let conn = Conn::new(self.config.opts())
            .await
            .map_err(WorkloadError::Connect)?;
        debug!("Connected to {}", self.config.masked_url());
        Ok(MySqlStore { conn })
    }
}

/// One MySQL connection. Statements run with the server's default
/// autocommit, so each insert and update is committed on its own.
pub struct MySqlStore {
    conn: Conn,
}

#[async_trait]
impl ClimateStore for MySqlStore {
    async fn ensure_table(&mut self) -> Result<(), WorkloadError> {
        let sql = generate_create_table();
        debug!("DDL: {}", sql);
        self.conn.query_drop(sql).await?;
        Ok(())
    }

    async fn insert(&mut self, record: &ClimateRecord) -> Result<(), WorkloadError> {
        self.conn
            .exec_drop(
                insert_statement(),
                (
                    record.location.name().to_string(),
                    record.record_date.format("%Y-%m-%d").to_string(),
                    record.temperature,
                    record.precipitation,
                    record.humidity,
                ),
            )
            .await?;
        Ok(())
    }

    async fn select_where(
        &mut self,
        predicate: &Predicate,
        limit: usize,
    ) -> Result<usize, WorkloadError> {
        let rows: Vec<Row> = self.conn.query(select_statement(predicate, limit)).await?;
        Ok(rows.len())
    }

    async fn update_where(&mut self, rule: &UpdateRule) -> Result<u64, WorkloadError> {
        self.conn.query_drop(rule.to_sql(TABLE_NAME)).await?;
        Ok(self.conn.affected_rows())
    }

    async fn close(self) -> Result<(), WorkloadError> {
        self.conn.disconnect().await?;
        Ok(())
    }
}

/// Parameterized INSERT for one record.
pub fn insert_statement() -> String {
    format!(
        "INSERT INTO {TABLE_NAME} (location, record_date, temperature, precipitation, humidity) \
         VALUES (?, ?, ?, ?, ?)"
    )
}

/// SELECT with the predicate inlined; predicates only ever hold constants
/// from the fixed list.
pub fn select_statement(predicate: &Predicate, limit: usize) -> String {
    format!("SELECT * FROM {TABLE_NAME} WHERE {predicate} LIMIT {limit}")
}

/// Generate the CREATE TABLE statement for the climate table.
pub fn generate_create_table() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS `{TABLE_NAME}` (\
         `id` INT NOT NULL AUTO_INCREMENT, \
         `location` VARCHAR(100) NOT NULL, \
         `record_date` DATE NOT NULL, \
         `temperature` FLOAT, \
         `precipitation` FLOAT, \
         `humidity` FLOAT, \
         PRIMARY KEY (`id`))"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SELECT_LIMIT;
    use climate_generator::{Column, Location};

    #[test]
    fn test_insert_statement() {
        assert_eq!(
            insert_statement(),
            "INSERT INTO ClimateData (location, record_date, temperature, precipitation, humidity) \
             VALUES (?, ?, ?, ?, ?)"
        );
    }

    #[test]
    fn test_select_statement() {
        let predicate = Predicate::LocationEq(Location::Tokyo);
        assert_eq!(
            select_statement(&predicate, SELECT_LIMIT),
            "SELECT * FROM ClimateData WHERE location = 'Tokyo' LIMIT 10"
        );

        let compound = Predicate::gt(Column::Temperature, 25.0)
            .and(Predicate::lt(Column::Humidity, 60.0));
        assert_eq!(
            select_statement(&compound, SELECT_LIMIT),
            "SELECT * FROM ClimateData WHERE temperature > 25 AND humidity < 60 LIMIT 10"
        );
    }

    #[test]
    fn test_generate_create_table() {
        let sql = generate_create_table();

        assert!(sql.contains("CREATE TABLE IF NOT EXISTS `ClimateData`"));
        assert!(sql.contains("`location` VARCHAR(100) NOT NULL"));
        assert!(sql.contains("`record_date` DATE NOT NULL"));
        assert!(sql.contains("`temperature` FLOAT"));
        assert!(sql.contains("`precipitation` FLOAT"));
        assert!(sql.contains("`humidity` FLOAT"));
        assert!(sql.contains("PRIMARY KEY (`id`)"));
    }

    #[tokio::test]
    async fn test_connect_to_closed_port_fails() {
        let connector = MySqlConnector::new(ConnectionConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..Default::default()
        });

        let result = connector.connect().await;
        assert!(matches!(result, Err(WorkloadError::Connect(_))));
    }
}
