//! Relation tokens and their direction
//!
//! Evidence paths mark an inverse edge with a leading `~`. The marker is
//! decoded once into [`Direction`] so downstream code never re-inspects the
//! raw string.

use std::fmt;

/// Marker prefix for an inverse relation
pub const INVERSE_MARKER: char = '~';

/// Direction of a relation relative to the written order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `A -r-> B` as written
    Forward,

    /// `~r`: the edge runs from the other node back to the written head
    Inverse,
}

/// A relation name together with its direction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationToken {
    /// Relation name without the inverse marker
    pub name: String,

    /// Edge direction
    pub direction: Direction,
}

impl RelationToken {
    /// Decode a raw evidence token, stripping exactly one leading `~`
    ///
    /// # Examples
    ///
    /// ```
    /// use claimgraph_domain::{Direction, RelationToken};
    ///
    /// let token = RelationToken::parse("~birth place");
    /// assert_eq!(token.name, "birth place");
    /// assert_eq!(token.direction, Direction::Inverse);
    ///
    /// let token = RelationToken::parse("starring");
    /// assert_eq!(token.direction, Direction::Forward);
    /// ```
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(INVERSE_MARKER) {
            Some(name) => Self::inverse(name),
            None => Self::forward(raw),
        }
    }

    /// Create a forward relation
    pub fn forward(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: Direction::Forward,
        }
    }

    /// Create an inverse relation
    pub fn inverse(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: Direction::Inverse,
        }
    }

    /// Whether the token carried the `~` marker
    pub fn is_inverse(&self) -> bool {
        self.direction == Direction::Inverse
    }

    /// The same relation seen from the other end
    pub fn reversed(&self) -> Self {
        let direction = match self.direction {
            Direction::Forward => Direction::Inverse,
            Direction::Inverse => Direction::Forward,
        };
        Self {
            name: self.name.clone(),
            direction,
        }
    }
}

impl fmt::Display for RelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Forward => write!(f, "{}", self.name),
            Direction::Inverse => write!(f, "{}{}", INVERSE_MARKER, self.name),
        }
    }
}
