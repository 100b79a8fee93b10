//! Query Tree - link operations over arena nodes
//!
//! A node's children are a singly linked sibling list. Read depth-first and
//! left to right, the payloads spell out the SQL statement.

use crate::arena::{NodeArena, NodeId, NodeText};
use crate::keyword::Keyword;

/// Iterator over the direct children of a node
pub struct Children<'a> {
    arena: &'a NodeArena,
    cursor: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        self.cursor = self.arena.get(current).next;
        Some(current)
    }
}

impl NodeArena {
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            arena: self,
            cursor: self.get(parent).child,
        }
    }

    pub fn first_child(&self, parent: NodeId) -> Option<NodeId> {
        self.get(parent).child
    }

    pub fn last_child(&self, parent: NodeId) -> Option<NodeId> {
        self.children(parent).last()
    }

    pub fn keyword_of(&self, id: NodeId) -> Option<Keyword> {
        self.get(id).text.keyword()
    }

    pub fn set_text(&mut self, id: NodeId, text: NodeText) {
        self.get_mut(id).text = text;
    }

    pub fn append_child(&mut self, parent: NodeId, id: NodeId) {
        match self.last_child(parent) {
            Some(last) => self.get_mut(last).next = Some(id),
            None => self.get_mut(parent).child = Some(id),
        }
    }

    pub fn prepend_child(&mut self, parent: NodeId, id: NodeId) {
        let first = self.get(parent).child;
        self.get_mut(id).next = first;
        self.get_mut(parent).child = Some(id);
    }

    /// Link `id` as the sibling immediately following `prev`
    pub fn insert_after(&mut self, prev: NodeId, id: NodeId) {
        let next = self.get(prev).next;
        self.get_mut(id).next = next;
        self.get_mut(prev).next = Some(id);
    }

    /// Allocate a node with `text` and append it under `parent`
    pub fn push_child(&mut self, parent: NodeId, text: NodeText) -> NodeId {
        let id = self.allocate_with(text);
        self.append_child(parent, id);
        id
    }

    /// Detach `id` from `parent`'s child list. Returns false if it is not a child.
    pub fn unlink_child(&mut self, parent: NodeId, id: NodeId) -> bool {
        let next = self.get(id).next;

        if self.get(parent).child == Some(id) {
            self.get_mut(parent).child = next;
            self.get_mut(id).next = None;
            return true;
        }

        let prev = self.children(parent).find(|c| self.get(*c).next == Some(id));
        match prev {
            Some(prev) => {
                self.get_mut(prev).next = next;
                self.get_mut(id).next = None;
                true
            }
            None => false,
        }
    }

    /// Unlink and release `id` with its subtree
    pub fn remove_child(&mut self, parent: NodeId, id: NodeId) {
        if self.unlink_child(parent, id) {
            self.release(id);
        }
    }

    /// Release every child of `parent`
    pub fn clear_children(&mut self, parent: NodeId) {
        let mut child = self.get_mut(parent).child.take();
        while let Some(c) = child {
            child = self.get_mut(c).next.take();
            self.release(c);
        }
    }

    pub fn find_child_keyword(&self, parent: NodeId, keyword: Keyword) -> Option<NodeId> {
        self.children(parent)
            .find(|c| self.get(*c).text.is_keyword(keyword))
    }

    /// Find the clause headed by `keyword` among `parent`'s children.
    ///
    /// Clauses are kept in rank order, so the scan stops at the first
    /// clause ranked after `keyword`.
    pub fn find_clause(&self, parent: NodeId, keyword: Keyword) -> Option<NodeId> {
        let rank = keyword.rank()?;
        for child in self.children(parent) {
            let child_keyword = self.keyword_of(child);
            if child_keyword == Some(keyword) {
                return Some(child);
            }
            if child_keyword.and_then(Keyword::rank).is_some_and(|r| r > rank) {
                break;
            }
        }
        None
    }

    /// Insert a new clause node after every sibling of equal or lower rank
    pub fn insert_clause(&mut self, parent: NodeId, keyword: Keyword) -> NodeId {
        let rank = keyword.rank().unwrap_or(u8::MAX);
        let id = self.allocate_with(NodeText::Keyword(keyword));

        let mut prev = None;
        for child in self.children(parent) {
            let child_rank = self.keyword_of(child).and_then(Keyword::rank).unwrap_or(0);
            if child_rank > rank {
                break;
            }
            prev = Some(child);
        }

        match prev {
            Some(prev) => self.insert_after(prev, id),
            None => self.prepend_child(parent, id),
        }
        id
    }

    pub fn find_or_insert_clause(&mut self, parent: NodeId, keyword: Keyword) -> NodeId {
        match self.find_clause(parent, keyword) {
            Some(id) => id,
            None => self.insert_clause(parent, keyword),
        }
    }
}
