use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub remaining: u32,
}

impl Team {
    pub fn new(name: impl Into<String>, wins: u32, losses: u32, remaining: u32) -> Self {
        Team {
            name: name.into(),
            wins,
            losses,
            remaining,
        }
    }

    /// Best final win total this team can still reach.
    pub fn ceiling(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.remaining)
    }
}

/// Index of a team inside the division that issued it. An id is only
/// meaningful for that division; `Division::check` validates foreign ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TeamId(pub(crate) usize);

impl TeamId {
    pub fn index(self) -> usize {
        self.0
    }
}
