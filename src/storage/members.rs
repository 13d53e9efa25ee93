//! Household member registry
//!
//! A book always has at least one member. A fresh or reset book holds only
//! the owner ("Me"), whose id is fixed so it survives a reset.

use crate::error::LedgerError;
use crate::models::{Member, MemberId};

/// Registered members, in the order they joined
#[derive(Debug, Clone)]
pub struct MemberRegistry {
    members: Vec<Member>,
}

impl Default for MemberRegistry {
    fn default() -> Self {
        Self {
            members: vec![Member::owner()],
        }
    }
}

impl MemberRegistry {
    /// Registry holding only the owner
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted members; an empty list falls back to the owner
    pub fn from_vec(members: Vec<Member>) -> Self {
        if members.is_empty() {
            return Self::default();
        }
        Self { members }
    }

    /// Register a member
    pub fn insert(&mut self, member: Member) {
        self.members.push(member);
    }

    /// Unregister a member, refusing to leave the household empty
    pub fn remove(&mut self, id: MemberId) -> Result<Member, LedgerError> {
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| LedgerError::member_not_found(id.to_string()))?;
        if self.members.len() == 1 {
            return Err(LedgerError::Validation(
                "Cannot remove the last household member".into(),
            ));
        }
        Ok(self.members.remove(index))
    }

    /// Get a member by id
    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Look up by full id, short id (`mem-1a2b3c4d`) or name (case-insensitive)
    pub fn find(&self, identifier: &str) -> Option<&Member> {
        let identifier = identifier.trim();
        if let Ok(id) = identifier.parse::<MemberId>() {
            if let Some(member) = self.get(id) {
                return Some(member);
            }
        }
        self.members
            .iter()
            .find(|m| m.id.to_string() == identifier)
            .or_else(|| {
                self.members
                    .iter()
                    .find(|m| m.name.eq_ignore_ascii_case(identifier))
            })
    }

    /// The member transactions are attributed to by default
    pub fn primary(&self) -> Option<&Member> {
        self.members.first()
    }

    /// All members
    pub fn all(&self) -> &[Member] {
        &self.members
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Never true for a registry built through this API
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberRole;

    #[test]
    fn test_starts_with_owner() {
        let registry = MemberRegistry::new();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.primary().map(|m| m.name.as_str()), Some("Me"));
        assert_eq!(MemberRegistry::from_vec(Vec::new()).all(), registry.all());
    }

    #[test]
    fn test_last_member_cannot_be_removed() {
        let mut registry = MemberRegistry::new();
        let owner = Member::owner().id;

        assert!(registry.remove(owner).unwrap_err().is_validation());
        assert_eq!(registry.len(), 1);

        registry.insert(Member::new("Awa", MemberRole::Editor));
        assert_eq!(registry.remove(owner).unwrap().name, "Me");
        assert_eq!(registry.primary().map(|m| m.name.as_str()), Some("Awa"));
    }

    #[test]
    fn test_remove_unknown_is_not_found() {
        let mut registry = MemberRegistry::new();
        registry.insert(Member::new("Awa", MemberRole::Viewer));

        assert!(registry.remove(MemberId::new()).unwrap_err().is_not_found());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_find_by_name_or_short_id() {
        let mut registry = MemberRegistry::new();
        let awa = Member::new("Awa", MemberRole::Editor);
        let short = awa.id.to_string();
        registry.insert(awa);

        assert_eq!(registry.find("awa").map(|m| m.id.to_string()), Some(short.clone()));
        assert_eq!(registry.find(&short).map(|m| m.name.as_str()), Some("Awa"));
        assert!(registry.find("Koffi").is_none());
    }
}
