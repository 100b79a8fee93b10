//! Query Builder pagination operations

use crate::arena::{NodeId, NodeText};
use crate::keyword::Keyword;

use super::builder::QueryBuilder;

impl QueryBuilder {
    /// Add LIMIT clause, overwriting a previous limit
    pub fn limit(&mut self, count: u64) -> &mut Self {
        let Some(limit) = self.limit_node("LIMIT") else {
            return self;
        };
        self.arena.set_text(limit, NodeText::Keyword(Keyword::Limit));

        let text = NodeText::Owned(count.to_string());
        match self.arena.first_child(limit) {
            Some(first) if !self.arena.get(first).text.is_keyword(Keyword::Offset) => {
                self.arena.set_text(first, text);
            }
            _ => {
                let leaf = self.arena.allocate_with(text);
                self.arena.prepend_child(limit, leaf);
            }
        }
        self
    }

    /// Add OFFSET clause, overwriting a previous offset
    pub fn offset(&mut self, count: u64) -> &mut Self {
        let Some(limit) = self.limit_node("OFFSET") else {
            return self;
        };

        let offset = match self.arena.find_child_keyword(limit, Keyword::Offset) {
            Some(offset) => offset,
            None => self
                .arena
                .push_child(limit, NodeText::Keyword(Keyword::Offset)),
        };

        let text = NodeText::Owned(count.to_string());
        match self.arena.first_child(offset) {
            Some(leaf) => self.arena.set_text(leaf, text),
            None => {
                self.arena.push_child(offset, text);
            }
        }
        self
    }

    /// Add pagination (LIMIT + OFFSET), pages counted from 1
    pub fn paginate(&mut self, per_page: u64, page: u64) -> &mut Self {
        let page = page.max(1);
        let skip = (page - 1).checked_mul(per_page).unwrap_or_else(|| {
            tracing::warn!("Page {} of {} rows overflows OFFSET, clamped", page, per_page);
            u64::MAX
        });
        self.limit(per_page).offset(skip)
    }

    /// Find the LIMIT slot, creating an offset-only one if missing
    fn limit_node(&mut self, operation: &'static str) -> Option<NodeId> {
        let root = self.statement_root_or_warn(operation)?;

        let existing = self
            .arena
            .find_clause(root, Keyword::Limit)
            .or_else(|| self.arena.find_clause(root, Keyword::LimitAll));
        Some(match existing {
            Some(limit) => limit,
            None => self.arena.insert_clause(root, Keyword::LimitAll),
        })
    }
}
