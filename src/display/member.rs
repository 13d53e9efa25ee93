//! Member display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Member;

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Joined")]
    joined: String,
}

impl From<&Member> for MemberRow {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            name: member.name.clone(),
            email: member.email.clone().unwrap_or_default(),
            role: member.role.to_string(),
            joined: member.joined_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Format household members as a table
pub fn format_member_list(members: &[Member]) -> String {
    let mut table = Table::new(members.iter().map(MemberRow::from));
    table.with(Style::rounded());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberRole;

    #[test]
    fn test_member_list_shows_roles() {
        let mut awa = Member::new("Awa", MemberRole::Viewer);
        awa.email = Some("awa@example.com".into());

        let output = format_member_list(&[Member::owner(), awa]);
        assert!(output.contains("mem-00000000"));
        assert!(output.contains("admin"));
        assert!(output.contains("awa@example.com"));
        assert!(output.contains("1970-01-01"));
    }
}
