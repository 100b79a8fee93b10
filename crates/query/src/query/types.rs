//! Query Builder Types - Core enums for clause building

use std::fmt;

use crate::keyword::Keyword;

/// Top-level SQL command of a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    None,
    Select,
    Delete,
    Truncate,
}

impl Command {
    pub(crate) fn from_keyword(keyword: Option<Keyword>) -> Self {
        match keyword {
            Some(Keyword::Select | Keyword::SelectDistinct) => Command::Select,
            Some(Keyword::Delete) => Command::Delete,
            Some(Keyword::Truncate) => Command::Truncate,
            _ => Command::None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::None => write!(f, "NONE"),
            Command::Select => write!(f, "SELECT"),
            Command::Delete => write!(f, "DELETE"),
            Command::Truncate => write!(f, "TRUNCATE"),
        }
    }
}

/// Join types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinType {
    pub(crate) fn keyword(self) -> Keyword {
        match self {
            JoinType::Inner => Keyword::Join,
            JoinType::Left => Keyword::LeftJoin,
            JoinType::Right => Keyword::RightJoin,
            JoinType::Full => Keyword::FullJoin,
            JoinType::Cross => Keyword::CrossJoin,
        }
    }
}

/// How a new condition combines with the ones before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logic {
    And,
    Or,
    AndNot,
    OrNot,
}

impl Logic {
    pub(crate) fn keyword(self) -> Keyword {
        match self {
            Logic::And | Logic::AndNot => Keyword::And,
            Logic::Or | Logic::OrNot => Keyword::Or,
        }
    }

    pub fn is_negated(self) -> bool {
        matches!(self, Logic::AndNot | Logic::OrNot)
    }
}

/// Condition-bearing clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionClause {
    Where,
    On,
    Having,
}

/// Order by direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub(crate) fn keyword(self) -> Keyword {
        match self {
            OrderDirection::Asc => Keyword::Asc,
            OrderDirection::Desc => Keyword::Desc,
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "ASC"),
            OrderDirection::Desc => write!(f, "DESC"),
        }
    }
}
