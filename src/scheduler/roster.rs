use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A team taking part in the league. Matching and display use `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
}

/// A pitch matches can be played on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: Uuid,
    pub name: String,
}

/// An official that can be assigned to a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referee {
    pub id: Uuid,
    pub name: String,
}

impl Team {
    /// Register a team under a freshly generated identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Field {
    /// Register a field under a freshly generated identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Referee {
    /// Register a referee under a freshly generated identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
