//! Query Builder SQL generation
//!
//! Depth-first, left-to-right walk of the clause tree. Each non-empty
//! payload is written followed by one space; a comma pulls back the space
//! before it, and the trailing space is trimmed at the end.

use std::fmt;

use crate::arena::{NodeArena, NodeId, NodeText};
use crate::config::Dialect;
use crate::keyword::Keyword;

use super::builder::QueryBuilder;

impl QueryBuilder {
    /// Render into the builder's buffer using the configured dialect
    pub fn render(&mut self) -> &str {
        let dialect = self.config.dialect;
        self.render_with(dialect)
    }

    /// Render into the builder's buffer using `dialect`
    pub fn render_with(&mut self, dialect: Dialect) -> &str {
        let mut buffer = std::mem::take(&mut self.buffer);
        self.write_sql(dialect, &mut buffer);
        self.buffer = buffer;
        &self.buffer
    }

    /// Convert the query to an owned SQL string
    pub fn to_sql(&self) -> String {
        let mut sql = String::with_capacity(self.config.buffer_capacity);
        self.write_sql(self.config.dialect, &mut sql);
        sql
    }

    /// Close any scopes still open, then render and hand over the SQL
    pub fn into_sql(mut self) -> String {
        self.close_all();
        let mut sql = std::mem::take(&mut self.buffer);
        self.write_sql(self.config.dialect, &mut sql);
        sql
    }

    fn write_sql(&self, dialect: Dialect, out: &mut String) {
        out.clear();

        if self.frames.len() > 1 {
            tracing::warn!(
                "Rendering with {} nested scope(s) still open",
                self.frames.len() - 1
            );
        }

        if self.frames[0].needs_projection() {
            out.push_str(Keyword::Select.text(dialect));
            out.push(' ');
            out.push_str(Keyword::Asterisk.text(dialect));
            out.push(' ');
        }

        write_nodes(&self.arena, self.arena.first_child(self.root), dialect, out);

        if out.ends_with(' ') {
            out.pop();
        }
        tracing::debug!("Rendered SQL ({} bytes): {}", out.len(), out);
    }
}

fn write_nodes(arena: &NodeArena, mut cursor: Option<NodeId>, dialect: Dialect, out: &mut String) {
    while let Some(id) = cursor {
        let node = arena.get(id);
        let text = match &node.text {
            NodeText::Keyword(keyword) => keyword.text(dialect),
            NodeText::Owned(text) => text.as_str(),
        };

        if !text.is_empty() {
            if node.text.is_keyword(Keyword::Comma) && out.ends_with(' ') {
                out.pop();
            }
            out.push_str(text);
            out.push(' ');
        }

        if node.child().is_some() {
            write_nodes(arena, node.child(), dialect, out);
        }
        cursor = node.next();
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
