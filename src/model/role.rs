use serde::{Deserialize, Serialize};

/// Coarse privilege tier of a user
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Vip,
    #[default]
    Free,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Vip => "vip",
            Role::Free => "free",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "vip" => Ok(Role::Vip),
            "free" => Ok(Role::Free),
            other => Err(crate::Error::unexpected(format!("unknown role {}", other))),
        }
    }
}
