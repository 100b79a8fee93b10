//! Query Builder DELETE, TRUNCATE and UNION operations

use crate::arena::NodeText;
use crate::error::QueryResult;
use crate::keyword::Keyword;
use crate::nested::{FrameKind, Handoff};

use super::builder::QueryBuilder;

impl QueryBuilder {
    /// Make the statement a DELETE
    pub fn delete(&mut self) -> QueryResult<&mut Self> {
        self.set_command(Keyword::Delete, "DELETE")
    }

    /// Make the statement a TRUNCATE
    pub fn truncate(&mut self) -> QueryResult<&mut Self> {
        self.set_command(Keyword::Truncate, "TRUNCATE")
    }

    /// Append a UNION branch built by `build`
    pub fn union<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.union_branch(Keyword::Union, build)
    }

    /// Append a UNION ALL branch built by `build`
    pub fn union_all<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.union_branch(Keyword::UnionAll, build)
    }

    fn union_branch<F>(&mut self, keyword: Keyword, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let Some(root) = self.statement_root_or_warn("UNION") else {
            return self;
        };

        let union = self.arena.insert_clause(root, keyword);
        let branch = self.arena.push_child(union, NodeText::default());
        self.with_frame(branch, FrameKind::Union, Handoff::Detached, build);
        self
    }

    fn set_command(&mut self, keyword: Keyword, operation: &'static str) -> QueryResult<&mut Self> {
        let root = self.statement_root(operation)?;

        match self.frame().command {
            Some(command) => {
                // Projected columns have no meaning for DELETE/TRUNCATE
                let alias = self.frame().alias;
                if self.arena.children(command).any(|c| Some(c) == alias) {
                    self.frame_mut().alias = None;
                }
                self.arena.clear_children(command);
                self.arena.set_text(command, NodeText::Keyword(keyword));
            }
            None => {
                let command = self.arena.insert_clause(root, keyword);
                self.frame_mut().command = Some(command);
            }
        }

        if let Some(name) = self.frame().name {
            let table_keyword = match keyword {
                Keyword::Truncate => Keyword::TruncateTable,
                _ => Keyword::From,
            };
            self.arena.set_text(name, NodeText::Keyword(table_keyword));
        }
        Ok(self)
    }
}
