use serde::{Deserialize, Serialize};

/// A team member. Reference data: seeded once, never mutated, referenced by id
/// from project owners/members and task assignees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    /// Avatar URL or initials
    pub avatar: String,
}

impl TeamMember {
    /// Up to two initials from the member's name
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(|c| c.to_uppercase())
            .collect()
    }
}
