//! Query Builder WHERE, ON and HAVING operations
//!
//! Every condition goes through one combinator: find or create the clause
//! node, append a fragment prefixed by AND/OR (nothing for the first one),
//! optionally wrap it in NOT, then attach either a leaf or a nested scope.

use serde_json::Value;

use crate::arena::{NodeId, NodeText};
use crate::keyword::Keyword;
use crate::nested::{FrameKind, Handoff};

use super::builder::QueryBuilder;
use super::condition::Condition;
use super::types::{ConditionClause, Logic};

/// What a condition fragment carries
enum Fragment {
    Leaf(Condition),
    /// Optional lead text (`id IN`, `EXISTS`) followed by a nested scope
    Nested(Option<NodeText>),
}

impl QueryBuilder {
    /// Append `condition` to `clause`, combined by `logic`
    pub fn filter(
        &mut self,
        clause: ConditionClause,
        logic: Logic,
        condition: Condition,
    ) -> &mut Self {
        self.combine(clause, logic, Fragment::Leaf(condition));
        self
    }

    /// Append a nested scope to `clause`, led by `lead`, filled by `build`
    fn filter_nested<F>(
        &mut self,
        clause: ConditionClause,
        logic: Logic,
        lead: Option<NodeText>,
        kind: FrameKind,
        build: F,
    ) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let handoff = match clause {
            ConditionClause::On => Handoff::JoinCondition,
            ConditionClause::Where | ConditionClause::Having => Handoff::Detached,
        };
        if let Some(sub) = self.combine(clause, logic, Fragment::Nested(lead)) {
            self.with_frame(sub, kind, handoff, build);
        }
        self
    }

    fn combine(
        &mut self,
        clause: ConditionClause,
        logic: Logic,
        fragment: Fragment,
    ) -> Option<NodeId> {
        let top = self.condition_root(clause)?;
        let first = self.arena.first_child(top).is_none();

        let prefix = if first { Keyword::None } else { logic.keyword() };
        let item = self.arena.push_child(top, NodeText::Keyword(prefix));

        let mut attach = item;
        if logic.is_negated() {
            if first {
                self.arena.set_text(item, NodeText::Keyword(Keyword::Not));
            } else {
                attach = self.arena.push_child(item, NodeText::Keyword(Keyword::Not));
            }
        }

        match fragment {
            Fragment::Leaf(condition) => {
                self.arena
                    .push_child(attach, NodeText::Owned(condition.to_sql()));
                None
            }
            Fragment::Nested(lead) => {
                if let Some(lead) = lead {
                    self.arena.push_child(attach, lead);
                }
                Some(self.arena.push_child(attach, NodeText::default()))
            }
        }
    }

    /// Node that conditions of `clause` attach under in the current scope
    fn condition_root(&mut self, clause: ConditionClause) -> Option<NodeId> {
        let frame = self.frame();
        let (kind, root, join) = (frame.kind, frame.root, frame.join);
        if kind == FrameKind::Group {
            return Some(root);
        }

        match clause {
            ConditionClause::Where => Some(self.arena.find_or_insert_clause(root, Keyword::Where)),
            ConditionClause::Having => {
                Some(self.arena.find_or_insert_clause(root, Keyword::Having))
            }
            ConditionClause::On => {
                let Some(join) = join else {
                    tracing::warn!("ON ignored: no join to attach to");
                    return None;
                };
                let on = match self.arena.find_child_keyword(join, Keyword::On) {
                    Some(on) => on,
                    None => self.arena.push_child(join, NodeText::Keyword(Keyword::On)),
                };
                Some(on)
            }
        }
    }

    // WHERE

    /// Add WHERE condition with custom operator
    pub fn where_<T: Into<Value>>(&mut self, column: &str, operator: &str, value: T) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::And, Condition::compare(column, operator, value))
    }

    pub fn or_where<T: Into<Value>>(
        &mut self,
        column: &str,
        operator: &str,
        value: T,
    ) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::Or, Condition::compare(column, operator, value))
    }

    pub fn where_not<T: Into<Value>>(
        &mut self,
        column: &str,
        operator: &str,
        value: T,
    ) -> &mut Self {
        self.filter(
            ConditionClause::Where,
            Logic::AndNot,
            Condition::compare(column, operator, value),
        )
    }

    pub fn or_where_not<T: Into<Value>>(
        &mut self,
        column: &str,
        operator: &str,
        value: T,
    ) -> &mut Self {
        self.filter(
            ConditionClause::Where,
            Logic::OrNot,
            Condition::compare(column, operator, value),
        )
    }

    /// Equality from two strings; `operand` containing `%` is a value template
    pub fn where_pair(&mut self, column: &str, operand: &str, args: &[Value]) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::And, Condition::pair(column, operand, args))
    }

    pub fn or_where_pair(&mut self, column: &str, operand: &str, args: &[Value]) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::Or, Condition::pair(column, operand, args))
    }

    /// Add raw WHERE condition, passed through verbatim
    pub fn where_raw(&mut self, sql: &str) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::And, Condition::raw(sql))
    }

    pub fn or_where_raw(&mut self, sql: &str) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::Or, Condition::raw(sql))
    }

    pub fn where_not_raw(&mut self, sql: &str) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::AndNot, Condition::raw(sql))
    }

    /// Add raw WHERE condition from a `%` template
    pub fn where_template(&mut self, template: &str, args: &[Value]) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::And, Condition::template(template, args))
    }

    pub fn or_where_template(&mut self, template: &str, args: &[Value]) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::Or, Condition::template(template, args))
    }

    pub fn where_between<T: Into<Value>>(&mut self, column: &str, low: T, high: T) -> &mut Self {
        self.filter(
            ConditionClause::Where,
            Logic::And,
            Condition::between(column, low, high, false),
        )
    }

    pub fn or_where_between<T: Into<Value>>(&mut self, column: &str, low: T, high: T) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::Or, Condition::between(column, low, high, false))
    }

    pub fn where_not_between<T: Into<Value>>(
        &mut self,
        column: &str,
        low: T,
        high: T,
    ) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::And, Condition::between(column, low, high, true))
    }

    pub fn where_in<I, T>(&mut self, column: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.filter(ConditionClause::Where, Logic::And, Condition::in_list(column, values, false))
    }

    pub fn or_where_in<I, T>(&mut self, column: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.filter(ConditionClause::Where, Logic::Or, Condition::in_list(column, values, false))
    }

    pub fn where_not_in<I, T>(&mut self, column: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.filter(ConditionClause::Where, Logic::And, Condition::in_list(column, values, true))
    }

    pub fn where_null(&mut self, column: &str) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::And, Condition::null(column, false))
    }

    pub fn or_where_null(&mut self, column: &str) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::Or, Condition::null(column, false))
    }

    pub fn where_not_null(&mut self, column: &str) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::And, Condition::null(column, true))
    }

    pub fn or_where_not_null(&mut self, column: &str) -> &mut Self {
        self.filter(ConditionClause::Where, Logic::Or, Condition::null(column, true))
    }

    /// `WHERE <column> <operator> (subquery)`
    pub fn where_sub<F>(&mut self, column: &str, operator: &str, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let lead = NodeText::Owned(format!("{} {}", column, operator));
        self.filter_nested(
            ConditionClause::Where,
            Logic::And,
            Some(lead),
            FrameKind::Subquery,
            build,
        )
    }

    pub fn or_where_sub<F>(&mut self, column: &str, operator: &str, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let lead = NodeText::Owned(format!("{} {}", column, operator));
        self.filter_nested(
            ConditionClause::Where,
            Logic::Or,
            Some(lead),
            FrameKind::Subquery,
            build,
        )
    }

    pub fn where_in_sub<F>(&mut self, column: &str, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.where_sub(column, "IN", build)
    }

    pub fn where_not_in_sub<F>(&mut self, column: &str, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.where_sub(column, "NOT IN", build)
    }

    /// Add EXISTS subquery condition
    pub fn where_exists<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.exists(Logic::And, build)
    }

    pub fn or_where_exists<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.exists(Logic::Or, build)
    }

    /// Add NOT EXISTS subquery condition
    pub fn where_not_exists<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.exists(Logic::AndNot, build)
    }

    fn exists<F>(&mut self, logic: Logic, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let lead = NodeText::Keyword(Keyword::Exists);
        self.filter_nested(ConditionClause::Where, logic, Some(lead), FrameKind::Subquery, build)
    }

    /// Bracketed group of WHERE conditions
    pub fn where_group<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.filter_nested(ConditionClause::Where, Logic::And, None, FrameKind::Group, build)
    }

    pub fn or_where_group<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.filter_nested(ConditionClause::Where, Logic::Or, None, FrameKind::Group, build)
    }

    pub fn where_not_group<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.filter_nested(ConditionClause::Where, Logic::AndNot, None, FrameKind::Group, build)
    }

    pub fn or_where_not_group<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.filter_nested(ConditionClause::Where, Logic::OrNot, None, FrameKind::Group, build)
    }

    // ON

    /// Add an ON condition to the current join
    pub fn on<T: Into<Value>>(&mut self, column: &str, operator: &str, value: T) -> &mut Self {
        self.filter(ConditionClause::On, Logic::And, Condition::compare(column, operator, value))
    }

    pub fn or_on<T: Into<Value>>(&mut self, column: &str, operator: &str, value: T) -> &mut Self {
        self.filter(ConditionClause::On, Logic::Or, Condition::compare(column, operator, value))
    }

    pub fn on_raw(&mut self, sql: &str) -> &mut Self {
        self.filter(ConditionClause::On, Logic::And, Condition::raw(sql))
    }

    /// `ON <column> <operator> (subquery)`
    pub fn on_sub<F>(&mut self, column: &str, operator: &str, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let lead = NodeText::Owned(format!("{} {}", column, operator));
        self.filter_nested(ConditionClause::On, Logic::And, Some(lead), FrameKind::Subquery, build)
    }

    pub fn or_on_sub<F>(&mut self, column: &str, operator: &str, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let lead = NodeText::Owned(format!("{} {}", column, operator));
        self.filter_nested(ConditionClause::On, Logic::Or, Some(lead), FrameKind::Subquery, build)
    }

    pub fn on_group<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.filter_nested(ConditionClause::On, Logic::And, None, FrameKind::Group, build)
    }

    pub fn or_on_group<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.filter_nested(ConditionClause::On, Logic::Or, None, FrameKind::Group, build)
    }

    // HAVING

    pub fn having<T: Into<Value>>(&mut self, column: &str, operator: &str, value: T) -> &mut Self {
        self.filter(
            ConditionClause::Having,
            Logic::And,
            Condition::compare(column, operator, value),
        )
    }

    pub fn or_having<T: Into<Value>>(
        &mut self,
        column: &str,
        operator: &str,
        value: T,
    ) -> &mut Self {
        self.filter(ConditionClause::Having, Logic::Or, Condition::compare(column, operator, value))
    }

    pub fn having_raw(&mut self, sql: &str) -> &mut Self {
        self.filter(ConditionClause::Having, Logic::And, Condition::raw(sql))
    }

    /// `HAVING <column> <operator> (subquery)`
    pub fn having_sub<F>(&mut self, column: &str, operator: &str, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let lead = NodeText::Owned(format!("{} {}", column, operator));
        self.filter_nested(
            ConditionClause::Having,
            Logic::And,
            Some(lead),
            FrameKind::Subquery,
            build,
        )
    }

    pub fn or_having_sub<F>(&mut self, column: &str, operator: &str, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let lead = NodeText::Owned(format!("{} {}", column, operator));
        self.filter_nested(
            ConditionClause::Having,
            Logic::Or,
            Some(lead),
            FrameKind::Subquery,
            build,
        )
    }

    pub fn having_group<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.filter_nested(ConditionClause::Having, Logic::And, None, FrameKind::Group, build)
    }
}
