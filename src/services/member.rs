//! Household member service
//!
//! Members are the people transactions are attributed to. The registry is
//! never left empty.

use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Member, MemberId, MemberRole};
use crate::storage::{Section, Storage};

/// Service for household members
pub struct MemberService<'a> {
    storage: &'a Storage,
}

impl<'a> MemberService<'a> {
    /// Create a new member service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a member
    pub fn add(
        &self,
        name: &str,
        email: Option<&str>,
        role: MemberRole,
    ) -> LedgerResult<Member> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("Member name cannot be empty".into()));
        }

        let mut member = Member::new(name, role);
        member.email = email.map(str::trim).filter(|e| !e.is_empty()).map(String::from);

        {
            let mut book = self.storage.write()?;
            book.members.insert(member.clone());
            self.storage.persist(&book, &[Section::Members])?;
        }

        info!(member = %member.id, name = %member.name, role = %member.role, "member added");
        self.storage.audit(AuditEntry::create(
            EntityType::Member,
            member.id.to_string(),
            Some(member.name.clone()),
            &member,
        ));

        Ok(member)
    }

    /// Remove a member
    ///
    /// Transactions keep their attribution to the removed id.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown id
    /// - `Validation` when `id` is the last remaining member
    pub fn remove(&self, id: MemberId) -> LedgerResult<Member> {
        let member = {
            let mut book = self.storage.write()?;
            let member = book.members.remove(id)?;
            self.storage.persist(&book, &[Section::Members])?;
            member
        };

        info!(member = %member.id, name = %member.name, "member removed");
        self.storage.audit(AuditEntry::delete(
            EntityType::Member,
            member.id.to_string(),
            Some(member.name.clone()),
            &member,
        ));

        Ok(member)
    }

    /// Find a member by ID, short ID, or name
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Member>> {
        Ok(self.storage.read()?.members.find(identifier).cloned())
    }

    /// Find a member, failing with `NotFound` when there is none
    pub fn require(&self, identifier: &str) -> LedgerResult<Member> {
        self.find(identifier)?
            .ok_or_else(|| LedgerError::member_not_found(identifier))
    }

    /// All members, in the order they joined
    pub fn list(&self) -> LedgerResult<Vec<Member>> {
        Ok(self.storage.read()?.members.all().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_starts_with_owner() {
        let storage = Storage::in_memory();
        let members = MemberService::new(&storage).list().unwrap();

        assert_eq!(members, vec![Member::owner()]);
        assert_eq!(members[0].role, MemberRole::Admin);
    }

    #[test]
    fn test_add_and_find_member() {
        let storage = Storage::in_memory();
        let service = MemberService::new(&storage);

        let awa = service
            .add("  Awa ", Some("awa@example.com"), MemberRole::Viewer)
            .unwrap();

        assert_eq!(awa.name, "Awa");
        assert_eq!(service.require("awa").unwrap().id, awa.id);
        assert_eq!(service.require(&awa.id.to_string()).unwrap().id, awa.id);
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let storage = Storage::in_memory();
        let err = MemberService::new(&storage)
            .add("   ", None, MemberRole::Editor)
            .unwrap_err();

        assert!(err.is_validation());
    }

    #[test]
    fn test_last_member_cannot_be_removed() {
        let storage = Storage::in_memory();
        let service = MemberService::new(&storage);
        let awa = service.add("Awa", None, MemberRole::Editor).unwrap();

        service.remove(Member::owner().id).unwrap();
        let err = service.remove(awa.id).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.list().unwrap(), vec![awa]);

        assert!(service.remove(MemberId::new()).unwrap_err().is_not_found());
        assert!(service.require("nobody").unwrap_err().is_not_found());
    }
}
