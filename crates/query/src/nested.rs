//! Nested Context Stack - one frame per open statement scope
//!
//! A frame records where fragments of its scope attach and caches handles
//! to the scope's command, table clause, alias target and current join.
//! The handles are arena indices and die with the frame.

use crate::arena::{NodeId, NodeText};
use crate::keyword::Keyword;
use crate::query::builder::QueryBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameKind {
    /// Top-level statement
    Statement,
    /// Parenthesized subquery (from, join, where, exists)
    Subquery,
    /// UNION branch, never parenthesized
    Union,
    /// Bracketed condition group
    Group,
}

/// What the enclosing frame's cached handles point at once a scope closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Handoff {
    /// Subquery in FROM: becomes the alias target, join is cleared
    Table,
    /// Subquery joined as a table: becomes the alias target, join stays current
    JoinTable,
    /// Scope inside the current join's ON: alias is cleared, join stays current
    JoinCondition,
    /// Both handles are cleared
    Detached,
}

#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub root: NodeId,
    pub kind: FrameKind,
    pub handoff: Handoff,
    pub command: Option<NodeId>,
    pub name: Option<NodeId>,
    pub alias: Option<NodeId>,
    pub join: Option<NodeId>,
}

impl Frame {
    pub fn new(root: NodeId, kind: FrameKind) -> Self {
        Self {
            root,
            kind,
            handoff: Handoff::Detached,
            command: None,
            name: None,
            alias: None,
            join: None,
        }
    }

    /// A statement scope with a table but no command projects `*`
    pub fn needs_projection(&self) -> bool {
        self.kind != FrameKind::Group && self.command.is_none() && self.name.is_some()
    }
}

impl QueryBuilder {
    pub(crate) fn frame(&self) -> &Frame {
        // The top-level frame is never popped
        &self.frames[self.frames.len() - 1]
    }

    pub(crate) fn frame_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub(crate) fn open_frame(&mut self, root: NodeId, kind: FrameKind, handoff: Handoff) {
        let mut frame = Frame::new(root, kind);
        frame.handoff = handoff;
        self.frames.push(frame);
        tracing::debug!("Opened {:?} scope at depth {}", kind, self.frames.len());
    }

    /// Close the innermost frame. Returns false at top level.
    pub(crate) fn close_frame(&mut self) -> bool {
        if self.frames.len() <= 1 {
            tracing::warn!("No nested scope to close");
            return false;
        }
        let Some(frame) = self.frames.pop() else {
            return false;
        };

        if frame.needs_projection() {
            let select = self.arena.insert_clause(frame.root, Keyword::Select);
            self.arena
                .push_child(select, NodeText::Keyword(Keyword::Asterisk));
        }

        if frame.kind != FrameKind::Union {
            let open = self
                .arena
                .allocate_with(NodeText::Keyword(Keyword::OpenParen));
            self.arena.prepend_child(frame.root, open);
            self.arena
                .push_child(frame.root, NodeText::Keyword(Keyword::CloseParen));
        }

        let outer = self.frame_mut();
        outer.alias = match frame.handoff {
            Handoff::Table | Handoff::JoinTable => Some(frame.root),
            Handoff::JoinCondition | Handoff::Detached => None,
        };
        if matches!(frame.handoff, Handoff::Table | Handoff::Detached) {
            outer.join = None;
        }

        tracing::debug!("Closed {:?} scope, depth now {}", frame.kind, self.frames.len());
        true
    }

    /// Open a frame rooted at `root`, let `build` fill it, then close it
    pub(crate) fn with_frame<F>(
        &mut self,
        root: NodeId,
        kind: FrameKind,
        handoff: Handoff,
        build: F,
    ) where
        F: FnOnce(&mut Self),
    {
        let depth = self.frames.len();
        self.open_frame(root, kind, handoff);
        build(self);

        // Scopes left open inside the callback belong to this one
        while self.frames.len() > depth {
            self.close_frame();
        }
    }

    /// Close every frame above the top level
    pub(crate) fn close_all(&mut self) {
        while self.frames.len() > 1 {
            self.close_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_frame_wraps_in_parens_and_projects() {
        let mut query = QueryBuilder::new();
        let root = query.arena.allocate();
        query.open_frame(root, FrameKind::Subquery, Handoff::Table);

        let from = query.arena.insert_clause(root, Keyword::From);
        query
            .arena
            .push_child(from, NodeText::Owned("users".to_string()));
        query.frame_mut().name = Some(from);

        assert!(query.close_frame());
        assert_eq!(query.depth(), 1);

        let keywords: Vec<_> = query
            .arena
            .children(root)
            .map(|c| query.arena.keyword_of(c))
            .collect();
        assert_eq!(
            keywords,
            vec![
                Some(Keyword::OpenParen),
                Some(Keyword::Select),
                Some(Keyword::From),
                Some(Keyword::CloseParen)
            ]
        );
        assert_eq!(query.frame().alias, Some(root));
    }

    #[test]
    fn test_union_frame_is_not_wrapped() {
        let mut query = QueryBuilder::new();
        let root = query.arena.allocate();
        query.open_frame(root, FrameKind::Union, Handoff::Detached);
        query.frame_mut().alias = Some(root);

        assert!(query.close_frame());
        assert_eq!(query.arena.first_child(root), None);
        assert_eq!(query.frame().alias, None);
    }

    #[test]
    fn test_close_frame_hands_off_join() {
        let mut query = QueryBuilder::new();
        let join = query.arena.allocate();

        for (handoff, keeps_join) in [
            (Handoff::Table, false),
            (Handoff::JoinTable, true),
            (Handoff::JoinCondition, true),
            (Handoff::Detached, false),
        ] {
            query.frame_mut().join = Some(join);
            let root = query.arena.allocate();
            query.open_frame(root, FrameKind::Subquery, handoff);
            assert!(query.close_frame());
            assert_eq!(query.frame().join.is_some(), keeps_join, "{:?}", handoff);
        }
    }

    #[test]
    fn test_top_level_frame_cannot_close() {
        let mut query = QueryBuilder::new();
        assert!(!query.close_frame());
        assert_eq!(query.depth(), 1);
    }

    #[test]
    fn test_with_frame_closes_frames_left_open() {
        let mut query = QueryBuilder::new();
        let root = query.arena.allocate();
        query.with_frame(root, FrameKind::Group, Handoff::Detached, |q| {
            let inner = q.arena.allocate();
            q.open_frame(inner, FrameKind::Group, Handoff::Detached);
            assert_eq!(q.depth(), 3);
        });
        assert_eq!(query.depth(), 1);
    }
}
