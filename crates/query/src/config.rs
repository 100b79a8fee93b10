//! Builder configuration

use serde::{Deserialize, Serialize};

/// SQL dialect used for keyword text at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgres,
    MySql,
    Sqlite,
}

/// Configuration for a [`QueryBuilder`](crate::QueryBuilder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Dialect used by `render`
    pub dialect: Dialect,
    /// Node slots reserved per arena chunk
    pub node_chunk_size: usize,
    /// Initial capacity of the render buffer
    pub buffer_capacity: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Postgres,
            node_chunk_size: 64,
            buffer_capacity: 256,
        }
    }
}

impl QueryConfig {
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_config_default() {
        let config = QueryConfig::default();
        assert_eq!(config.dialect, Dialect::Postgres);
        assert_eq!(config.node_chunk_size, 64);
        assert_eq!(config.buffer_capacity, 256);
    }

    #[test]
    fn test_query_config_from_json() {
        let config: QueryConfig =
            serde_json::from_str(r#"{ "dialect": "sqlite", "node_chunk_size": 16 }"#).unwrap();
        assert_eq!(config.dialect, Dialect::Sqlite);
        assert_eq!(config.node_chunk_size, 16);
        assert_eq!(config.buffer_capacity, 256);

        let config: QueryConfig = serde_json::from_str(r#"{ "dialect": "mysql" }"#).unwrap();
        assert_eq!(config.dialect, Dialect::MySql);
    }
}
