use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatMemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
    #[serde(other)]
    Unknown,
}

impl ChatMemberStatus {
    /// Statuses that grant the vip tier
    pub const fn is_vip(&self) -> bool {
        matches!(
            self,
            ChatMemberStatus::Creator | ChatMemberStatus::Administrator | ChatMemberStatus::Member
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ChatUser {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChatMember {
    pub status: ChatMemberStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<ChatUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vip_statuses() {
        const TEST_CASE_PAIRS: &[(&str, bool)] = &[
            (r#""creator""#, true),
            (r#""administrator""#, true),
            (r#""member""#, true),
            (r#""restricted""#, false),
            (r#""left""#, false),
            (r#""kicked""#, false),
            (r#""owner""#, false),
        ];
        for (json, vip) in TEST_CASE_PAIRS {
            let status: ChatMemberStatus = serde_json::from_str(json).unwrap();
            assert_eq!(status.is_vip(), *vip, "{json}");
        }
    }
}
