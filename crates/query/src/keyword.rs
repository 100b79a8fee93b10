//! Keyword Interner - canonical clause and operator keywords
//!
//! Keywords are carried on nodes as tags, so finding "the WHERE node of this
//! scope" or checking clause order is a tag comparison. Text is looked up
//! from the tag only when rendering, which is also where dialect differences
//! are applied.

use crate::config::Dialect;

/// Canonical keyword tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// Placeholder with no visible text
    None,
    Select,
    SelectDistinct,
    Delete,
    Truncate,
    From,
    /// Table clause of a TRUNCATE statement
    TruncateTable,
    Join,
    LeftJoin,
    RightJoin,
    FullJoin,
    CrossJoin,
    On,
    Where,
    And,
    Or,
    Not,
    Exists,
    GroupBy,
    Having,
    Union,
    UnionAll,
    OrderBy,
    Asc,
    Desc,
    Limit,
    /// LIMIT slot holding only an OFFSET
    LimitAll,
    Offset,
    As,
    Comma,
    OpenParen,
    CloseParen,
    Asterisk,
}

impl Keyword {
    /// Canonical text for `dialect`
    pub fn text(self, dialect: Dialect) -> &'static str {
        match (self, dialect) {
            (Keyword::LimitAll, Dialect::Postgres) => "",
            (Keyword::LimitAll, Dialect::MySql) => "LIMIT 18446744073709551615",
            (Keyword::LimitAll, Dialect::Sqlite) => "LIMIT -1",
            (Keyword::Truncate, Dialect::Sqlite) => "DELETE",
            (Keyword::TruncateTable, Dialect::Sqlite) => "FROM",
            (keyword, _) => keyword.canonical(),
        }
    }

    fn canonical(self) -> &'static str {
        match self {
            Keyword::None => "",
            Keyword::Select => "SELECT",
            Keyword::SelectDistinct => "SELECT DISTINCT",
            Keyword::Delete => "DELETE",
            Keyword::Truncate => "TRUNCATE",
            Keyword::From => "FROM",
            Keyword::TruncateTable => "TABLE",
            Keyword::Join => "JOIN",
            Keyword::LeftJoin => "LEFT JOIN",
            Keyword::RightJoin => "RIGHT JOIN",
            Keyword::FullJoin => "FULL JOIN",
            Keyword::CrossJoin => "CROSS JOIN",
            Keyword::On => "ON",
            Keyword::Where => "WHERE",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
            Keyword::Exists => "EXISTS",
            Keyword::GroupBy => "GROUP BY",
            Keyword::Having => "HAVING",
            Keyword::Union => "UNION",
            Keyword::UnionAll => "UNION ALL",
            Keyword::OrderBy => "ORDER BY",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
            Keyword::Limit | Keyword::LimitAll => "LIMIT",
            Keyword::Offset => "OFFSET",
            Keyword::As => "AS",
            Keyword::Comma => ",",
            Keyword::OpenParen => "(",
            Keyword::CloseParen => ")",
            Keyword::Asterisk => "*",
        }
    }

    /// Position of a top-level clause inside a statement scope.
    ///
    /// `None` for keywords that never head a clause.
    pub fn rank(self) -> Option<u8> {
        let rank = match self {
            Keyword::Select | Keyword::SelectDistinct | Keyword::Delete | Keyword::Truncate => 0,
            Keyword::From | Keyword::TruncateTable => 1,
            Keyword::Join
            | Keyword::LeftJoin
            | Keyword::RightJoin
            | Keyword::FullJoin
            | Keyword::CrossJoin => 2,
            Keyword::Where => 3,
            Keyword::GroupBy => 4,
            Keyword::Having => 5,
            Keyword::Union | Keyword::UnionAll => 6,
            Keyword::OrderBy => 7,
            Keyword::Limit | Keyword::LimitAll => 8,
            _ => return None,
        };
        Some(rank)
    }

    pub fn is_command(self) -> bool {
        self.rank() == Some(0)
    }

    pub fn is_direction(self) -> bool {
        matches!(self, Keyword::Asc | Keyword::Desc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_ranks_follow_sql_order() {
        let order = [
            Keyword::Select,
            Keyword::From,
            Keyword::LeftJoin,
            Keyword::Where,
            Keyword::GroupBy,
            Keyword::Having,
            Keyword::UnionAll,
            Keyword::OrderBy,
            Keyword::Limit,
        ];

        for pair in order.windows(2) {
            assert!(pair[0].rank() < pair[1].rank(), "{:?} before {:?}", pair[0], pair[1]);
        }
        assert_eq!(Keyword::Comma.rank(), None);
        assert_eq!(Keyword::And.rank(), None);
    }

    #[test]
    fn test_dialect_text() {
        assert_eq!(Keyword::LimitAll.text(Dialect::Postgres), "");
        assert_eq!(Keyword::LimitAll.text(Dialect::Sqlite), "LIMIT -1");
        assert_eq!(Keyword::Truncate.text(Dialect::MySql), "TRUNCATE");
        assert_eq!(Keyword::TruncateTable.text(Dialect::Sqlite), "FROM");
        assert_eq!(Keyword::GroupBy.text(Dialect::MySql), "GROUP BY");
    }

    #[test]
    fn test_command_keywords() {
        assert!(Keyword::SelectDistinct.is_command());
        assert!(Keyword::Truncate.is_command());
        assert!(!Keyword::From.is_command());
        assert!(Keyword::Desc.is_direction());
    }
}
