//! Query Builder Module - clause calls that grow a statement tree

pub mod builder;
pub mod condition;
pub mod dml;
pub mod joins;
pub mod ordering;
pub mod pagination;
pub mod select;
pub mod sql_generation;
pub mod types;
pub mod where_clause;

pub use builder::QueryBuilder;
pub use condition::{expand_template, value_sql, Condition};
pub use types::{Command, ConditionClause, JoinType, Logic, OrderDirection};
