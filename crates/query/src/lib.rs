//! # elif-query: SQL query builder for elif.rs
//!
//! Clause calls (`select`, `from`, `join`, `where_`, `order_by`, ...) grow
//! an arena-backed tree that mirrors the statement's clause structure.
//! Rendering flattens the tree into SQL text for the configured dialect.
//!
//! ```rust
//! use elif_query::QueryBuilder;
//!
//! let mut query = QueryBuilder::new();
//! query.from("users").unwrap();
//! query.where_("id", "<", 100).or_where("age", ">=", 18);
//!
//! assert_eq!(query.render(), "SELECT * FROM users WHERE id < 100 OR age >= 18");
//! ```

pub mod arena;
pub mod config;
pub mod error;
pub mod keyword;
mod nested;
pub mod query;
pub mod tree;


pub use arena::{ArenaStats, NodeArena, NodeId, NodeText};
pub use config::{Dialect, QueryConfig};
pub use error::{QueryError, QueryResult};
pub use keyword::Keyword;
pub use query::*;
