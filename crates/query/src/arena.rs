//! Node Arena - slot storage for query tree nodes
//!
//! Nodes live in a single growable vector and are addressed by [`NodeId`].
//! Capacity is reserved in fixed-size chunks so that call-heavy clause
//! building does not reallocate on every node. Released nodes go onto a
//! free-index stack and are handed out again, most recently freed first.

use crate::keyword::Keyword;

/// Handle to a node slot inside a [`NodeArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Text payload of a node
///
/// Keywords are stored as tags and resolved to text at render time.
/// Everything else (table names, rendered conditions, literals) is owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeText {
    Keyword(Keyword),
    Owned(String),
}

impl NodeText {
    /// Keyword tag of this payload, if it is one
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            NodeText::Keyword(keyword) => Some(*keyword),
            NodeText::Owned(_) => None,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }
}

impl Default for NodeText {
    fn default() -> Self {
        NodeText::Keyword(Keyword::None)
    }
}

/// A single tree node: payload plus first-child and next-sibling links
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub text: NodeText,
    pub(crate) next: Option<NodeId>,
    pub(crate) child: Option<NodeId>,
}

impl Node {
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn child(&self) -> Option<NodeId> {
        self.child
    }
}

/// Allocation statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Slots ever carved (live + free)
    pub slots: usize,
    /// Slots currently on the free list
    pub free: usize,
    /// Chunks reserved since the last `release_all`
    pub chunks: usize,
}

/// Chunked node allocator with free-list recycling
#[derive(Debug)]
pub struct NodeArena {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    chunk_size: usize,
    chunks: usize,
}

impl NodeArena {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            chunk_size: chunk_size.max(1),
            chunks: 0,
        }
    }

    /// Hand out a zeroed node, reusing the most recently released slot if any
    pub fn allocate(&mut self) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = Node::default();
            return id;
        }

        if self.nodes.len() == self.nodes.capacity() {
            self.nodes.reserve_exact(self.chunk_size);
            self.chunks += 1;
        }

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::default());
        id
    }

    /// Allocate a node carrying `text`
    pub fn allocate_with(&mut self, text: NodeText) -> NodeId {
        let id = self.allocate();
        self.nodes[id.index()].text = text;
        id
    }

    /// Release `id` together with its whole child subtree.
    ///
    /// The node's siblings are not touched; callers unlink the node first.
    /// Owned payloads are dropped, slots are pushed onto the free list.
    pub fn release(&mut self, id: NodeId) {
        let mut pending = vec![id];

        while let Some(current) = pending.pop() {
            let node = std::mem::take(&mut self.nodes[current.index()]);

            let mut child = node.child;
            while let Some(c) = child {
                pending.push(c);
                child = self.nodes[c.index()].next;
            }

            self.free.push(current);
        }
    }

    /// Drop every node and every chunk
    pub fn release_all(&mut self) {
        self.nodes = Vec::new();
        self.free.clear();
        self.chunks = 0;
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes currently in use
    pub fn live(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            slots: self.nodes.len(),
            free: self.free.len(),
            chunks: self.chunks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_carves_chunks() {
        let mut arena = NodeArena::new(4);
        for _ in 0..5 {
            arena.allocate();
        }

        let stats = arena.stats();
        assert_eq!(stats.slots, 5);
        assert_eq!(stats.chunks, 2);
        assert_eq!(arena.live(), 5);
    }

    #[test]
    fn test_release_recycles_most_recent_first() {
        let mut arena = NodeArena::new(8);
        let a = arena.allocate();
        let b = arena.allocate();

        arena.release(a);
        arena.release(b);

        assert_eq!(arena.allocate(), b);
        assert_eq!(arena.allocate(), a);
        assert_eq!(arena.stats().slots, 2);
    }

    #[test]
    fn test_release_frees_subtree_and_resets_slot() {
        let mut arena = NodeArena::new(8);
        let parent = arena.allocate_with(NodeText::Keyword(Keyword::Where));
        let first = arena.allocate_with(NodeText::Owned("a = 1".to_string()));
        let second = arena.allocate_with(NodeText::Owned("b = 2".to_string()));
        arena.get_mut(parent).child = Some(first);
        arena.get_mut(first).next = Some(second);

        arena.release(parent);
        assert_eq!(arena.live(), 0);
        assert_eq!(arena.stats().free, 3);

        let reused = arena.allocate();
        let node = arena.get(reused);
        assert_eq!(node.text, NodeText::Keyword(Keyword::None));
        assert!(node.child().is_none());
        assert!(node.next().is_none());
    }

    #[test]
    fn test_release_all_empties_arena() {
        let mut arena = NodeArena::new(2);
        for _ in 0..3 {
            arena.allocate();
        }

        arena.release_all();
        assert_eq!(arena.stats(), ArenaStats::default());
        assert_eq!(arena.live(), 0);
    }
}
