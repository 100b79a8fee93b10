//! Query Builder JOIN operations

use serde_json::Value;

use crate::arena::{NodeId, NodeText};
use crate::nested::{FrameKind, Handoff};

use super::builder::QueryBuilder;
use super::types::JoinType;

impl QueryBuilder {
    /// Add a join without conditions; follow with `on` calls
    pub fn join_kind(&mut self, join_type: JoinType, table: &str) -> &mut Self {
        self.add_join(join_type, Some(table));
        self
    }

    /// Add INNER JOIN to the query
    pub fn join<T: Into<Value>>(
        &mut self,
        table: &str,
        column: &str,
        operator: &str,
        value: T,
    ) -> &mut Self {
        self.join_on(JoinType::Inner, table, column, operator, value)
    }

    /// Add LEFT JOIN to the query
    pub fn left_join<T: Into<Value>>(
        &mut self,
        table: &str,
        column: &str,
        operator: &str,
        value: T,
    ) -> &mut Self {
        self.join_on(JoinType::Left, table, column, operator, value)
    }

    /// Add RIGHT JOIN to the query
    pub fn right_join<T: Into<Value>>(
        &mut self,
        table: &str,
        column: &str,
        operator: &str,
        value: T,
    ) -> &mut Self {
        self.join_on(JoinType::Right, table, column, operator, value)
    }

    /// Add FULL JOIN to the query
    pub fn full_join<T: Into<Value>>(
        &mut self,
        table: &str,
        column: &str,
        operator: &str,
        value: T,
    ) -> &mut Self {
        self.join_on(JoinType::Full, table, column, operator, value)
    }

    /// Add CROSS JOIN to the query
    pub fn cross_join(&mut self, table: &str) -> &mut Self {
        self.join_kind(JoinType::Cross, table)
    }

    /// Add a join whose ON conditions are built by `build`
    pub fn join_with<F>(&mut self, join_type: JoinType, table: &str, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        if self.add_join(join_type, Some(table)).is_some() {
            build(self);
        }
        self
    }

    /// Join a subquery built by `build`. Alias it and add `on` calls afterwards.
    pub fn join_sub<F>(&mut self, join_type: JoinType, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        if let Some(join) = self.add_join(join_type, None) {
            let sub = self.arena.push_child(join, NodeText::default());
            self.with_frame(sub, FrameKind::Subquery, Handoff::JoinTable, build);
        }
        self
    }

    /// Add a join whose ON right-hand side is a subquery built by `build`
    pub fn join_on_sub<F>(
        &mut self,
        join_type: JoinType,
        table: &str,
        column: &str,
        operator: &str,
        build: F,
    ) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        if self.add_join(join_type, Some(table)).is_some() {
            self.on_sub(column, operator, build);
        }
        self
    }

    fn join_on<T: Into<Value>>(
        &mut self,
        join_type: JoinType,
        table: &str,
        column: &str,
        operator: &str,
        value: T,
    ) -> &mut Self {
        if self.add_join(join_type, Some(table)).is_some() {
            self.on(column, operator, value);
        }
        self
    }

    fn add_join(&mut self, join_type: JoinType, table: Option<&str>) -> Option<NodeId> {
        let root = self.statement_root_or_warn("JOIN")?;
        let join = self.arena.insert_clause(root, join_type.keyword());
        let leaf = table.map(|table| {
            self.arena
                .push_child(join, NodeText::Owned(table.to_string()))
        });

        let frame = self.frame_mut();
        frame.join = match join_type {
            JoinType::Cross => None,
            _ => Some(join),
        };
        frame.alias = leaf;
        Some(join)
    }
}
