//! Query Builder - Core builder implementation

use crate::arena::{ArenaStats, NodeArena, NodeId, NodeText};
use crate::config::QueryConfig;
use crate::error::{QueryError, QueryResult};
use crate::keyword::Keyword;
use crate::nested::{Frame, FrameKind};

use super::types::Command;

/// Query builder that assembles a statement as a clause tree
///
/// Clause calls find or create their slot in the innermost open scope, so
/// they can arrive in any order. Rendering walks the tree and never
/// mutates it.
#[derive(Debug)]
pub struct QueryBuilder {
    pub(crate) arena: NodeArena,
    pub(crate) root: NodeId,
    pub(crate) frames: Vec<Frame>,
    pub(crate) buffer: String,
    pub(crate) config: QueryConfig,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuilder {
    /// Create a new query builder
    pub fn new() -> Self {
        Self::with_config(QueryConfig::default())
    }

    /// Create a query builder with custom configuration
    pub fn with_config(config: QueryConfig) -> Self {
        let mut arena = NodeArena::new(config.node_chunk_size);
        let root = arena.allocate();

        Self {
            arena,
            root,
            frames: vec![Frame::new(root, FrameKind::Statement)],
            buffer: String::with_capacity(config.buffer_capacity),
            config,
        }
    }

    /// Release every node and scope and start over empty
    pub fn clear(&mut self) -> &mut Self {
        tracing::debug!(
            "Clearing query builder ({} live nodes, {} open scopes)",
            self.arena.live(),
            self.frames.len()
        );

        self.arena.release_all();
        self.root = self.arena.allocate();
        self.frames.clear();
        self.frames.push(Frame::new(self.root, FrameKind::Statement));
        self.buffer.clear();
        self
    }

    /// The explicitly set top-level command
    pub fn command(&self) -> Command {
        let command = self.frames[0].command;
        Command::from_keyword(command.and_then(|c| self.arena.keyword_of(c)))
    }

    /// Number of open scopes, 1 at top level
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    /// Root of the innermost scope when it can take statement clauses
    pub(crate) fn statement_root(&self, operation: &'static str) -> QueryResult<NodeId> {
        let frame = self.frame();
        if frame.kind == FrameKind::Group {
            return Err(QueryError::NotInStatement(operation));
        }
        Ok(frame.root)
    }

    /// Like `statement_root`, for calls that report misuse as a notice
    pub(crate) fn statement_root_or_warn(&self, operation: &'static str) -> Option<NodeId> {
        match self.statement_root(operation) {
            Ok(root) => Some(root),
            Err(err) => {
                tracing::warn!("{}, call ignored", err);
                None
            }
        }
    }

    /// Append `columns` to a list clause, comma-separated. Returns the last leaf.
    pub(crate) fn append_columns<I, S>(&mut self, clause: NodeId, columns: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut last = None;
        for column in columns {
            if self.arena.first_child(clause).is_some() {
                self.arena.push_child(clause, NodeText::Keyword(Keyword::Comma));
            }
            let leaf = self
                .arena
                .push_child(clause, NodeText::Owned(column.as_ref().to_string()));
            last = Some(leaf);
        }
        last
    }
}
