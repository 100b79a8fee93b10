//! Query Builder SELECT and FROM operations

use crate::arena::{NodeId, NodeText};
use crate::error::{QueryError, QueryResult};
use crate::keyword::Keyword;
use crate::nested::{FrameKind, Handoff};

use super::builder::QueryBuilder;
use super::types::Command;

impl QueryBuilder {
    /// Add columns to the projection, creating `SELECT` if needed
    pub fn select<I, S>(&mut self, columns: I) -> QueryResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<S> = columns.into_iter().collect();
        if columns.is_empty() {
            return Ok(self);
        }
        let select = self.projection("SELECT")?;

        // `SELECT DISTINCT *` placeholder gives way to real columns
        if let Some(first) = self.arena.first_child(select) {
            if self.arena.get(first).text.is_keyword(Keyword::Asterisk) {
                self.arena.remove_child(select, first);
            }
        }

        if let Some(last) = self.append_columns(select, columns) {
            self.frame_mut().alias = Some(last);
        }
        Ok(self)
    }

    /// Add a custom SELECT expression
    pub fn select_raw(&mut self, expression: &str) -> QueryResult<&mut Self> {
        self.select([expression])
    }

    /// Turn the projection into `SELECT DISTINCT`
    pub fn distinct(&mut self) -> &mut Self {
        let Some(root) = self.statement_root_or_warn("DISTINCT") else {
            return self;
        };

        match self.frame().command {
            None => {
                let select = self.arena.insert_clause(root, Keyword::SelectDistinct);
                self.arena
                    .push_child(select, NodeText::Keyword(Keyword::Asterisk));
                self.frame_mut().command = Some(select);
            }
            Some(command) => match self.arena.keyword_of(command) {
                Some(Keyword::Select) => self
                    .arena
                    .set_text(command, NodeText::Keyword(Keyword::SelectDistinct)),
                Some(Keyword::SelectDistinct) => {}
                other => tracing::warn!(
                    "DISTINCT ignored on a {} statement",
                    Command::from_keyword(other)
                ),
            },
        }
        self
    }

    /// Set the FROM table
    pub fn from(&mut self, table: &str) -> QueryResult<&mut Self> {
        let from = self.table_clause()?;
        let leaf = self
            .arena
            .push_child(from, NodeText::Owned(table.to_string()));
        self.frame_mut().alias = Some(leaf);
        Ok(self)
    }

    /// Select FROM a subquery built by `build`
    pub fn from_sub<F>(&mut self, build: F) -> QueryResult<&mut Self>
    where
        F: FnOnce(&mut Self),
    {
        let from = self.table_clause()?;
        let sub = self.arena.push_child(from, NodeText::default());
        self.with_frame(sub, FrameKind::Subquery, Handoff::Table, build);
        Ok(self)
    }

    /// Alias the most recent table, join target or projected column
    pub fn alias(&mut self, name: &str) -> &mut Self {
        let Some(target) = self.frame().alias else {
            tracing::debug!("AS {} ignored: nothing to alias", name);
            return self;
        };

        if let Some(next) = self.arena.get(target).next() {
            if self.arena.get(next).text.is_keyword(Keyword::As) {
                match self.arena.first_child(next) {
                    Some(leaf) => self.arena.set_text(leaf, NodeText::Owned(name.to_string())),
                    None => {
                        self.arena.push_child(next, NodeText::Owned(name.to_string()));
                    }
                }
                return self;
            }
        }

        let alias = self.arena.allocate_with(NodeText::Keyword(Keyword::As));
        self.arena
            .push_child(alias, NodeText::Owned(name.to_string()));
        self.arena.insert_after(target, alias);
        self
    }

    /// Find or create the scope's SELECT node
    fn projection(&mut self, operation: &'static str) -> QueryResult<NodeId> {
        let root = self.statement_root(operation)?;

        match self.frame().command {
            Some(command) => match self.arena.keyword_of(command) {
                Some(Keyword::Select | Keyword::SelectDistinct) => Ok(command),
                other => Err(QueryError::command_conflict(
                    Command::from_keyword(other),
                    operation,
                )),
            },
            None => {
                let select = self.arena.insert_clause(root, Keyword::Select);
                self.frame_mut().command = Some(select);
                Ok(select)
            }
        }
    }

    /// Create the scope's table clause, failing if one exists
    fn table_clause(&mut self) -> QueryResult<NodeId> {
        let root = self.statement_root("FROM")?;
        if self.frame().name.is_some() {
            tracing::warn!("FROM called twice in the same scope");
            return Err(QueryError::TableAlreadySet);
        }

        let keyword = match self.command_keyword() {
            Some(Keyword::Truncate) => Keyword::TruncateTable,
            _ => Keyword::From,
        };
        let from = self.arena.insert_clause(root, keyword);
        self.frame_mut().name = Some(from);
        Ok(from)
    }

    pub(crate) fn command_keyword(&self) -> Option<Keyword> {
        self.frame()
            .command
            .and_then(|command| self.arena.keyword_of(command))
    }
}
