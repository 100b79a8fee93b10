//! Query Builder ORDER BY and GROUP BY operations

use crate::arena::NodeText;
use crate::keyword::Keyword;

use super::builder::QueryBuilder;
use super::types::OrderDirection;

impl QueryBuilder {
    /// Add GROUP BY columns
    pub fn group_by<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.list_clause(Keyword::GroupBy, "GROUP BY", columns)
    }

    /// Add ORDER BY columns
    pub fn order_by<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.list_clause(Keyword::OrderBy, "ORDER BY", columns)
    }

    /// Add ORDER BY columns sorted descending
    pub fn order_by_desc<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.order_by(columns).desc()
    }

    pub fn asc(&mut self) -> &mut Self {
        self.direction(OrderDirection::Asc)
    }

    pub fn desc(&mut self) -> &mut Self {
        self.direction(OrderDirection::Desc)
    }

    /// Set the direction of the last ORDER BY column
    pub fn direction(&mut self, direction: OrderDirection) -> &mut Self {
        let Some(root) = self.statement_root_or_warn("ORDER BY") else {
            return self;
        };
        let Some(order_by) = self.arena.find_clause(root, Keyword::OrderBy) else {
            tracing::warn!("{} ignored: no ORDER BY column", direction);
            return self;
        };

        let last = self.arena.last_child(order_by);
        match last.and_then(|id| self.arena.keyword_of(id)) {
            Some(keyword) if keyword.is_direction() => {
                if let Some(last) = last {
                    self.arena
                        .set_text(last, NodeText::Keyword(direction.keyword()));
                }
            }
            _ => {
                self.arena
                    .push_child(order_by, NodeText::Keyword(direction.keyword()));
            }
        }
        self
    }

    fn list_clause<I, S>(
        &mut self,
        keyword: Keyword,
        operation: &'static str,
        columns: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<S> = columns.into_iter().collect();
        if columns.is_empty() {
            return self;
        }
        let Some(root) = self.statement_root_or_warn(operation) else {
            return self;
        };

        let clause = self.arena.find_or_insert_clause(root, keyword);
        self.append_columns(clause, columns);
        self
    }
}
