//! Role domain models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in role, ordered by the product's role hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Client,
    TeamMember,
    TeamLead,
    Admin,
    SuperAdmin,
}

impl Role {
    /// 按层级从低到高排列
    pub const ALL: [Role; 5] = [
        Role::Client,
        Role::TeamMember,
        Role::TeamLead,
        Role::Admin,
        Role::SuperAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::TeamMember => "TEAM_MEMBER",
            Role::TeamLead => "TEAM_LEAD",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }

    /// Human-readable name used in suggestion reasons
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Client => "Client",
            Role::TeamMember => "Team Member",
            Role::TeamLead => "Team Lead",
            Role::Admin => "Admin",
            Role::SuperAdmin => "Super Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for role names outside the closed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    /// 与 serde 反序列化同一规则：只接受 "TEAM_LEAD" 这类写法，拼写错误不做纠正
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
