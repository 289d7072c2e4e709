use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Expired,
}

impl Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            SubscriptionStatus::Active => "ACTIVE",
            SubscriptionStatus::Expired => "EXPIRED",
        };
        write!(f, "{}", status)
    }
}

impl SubscriptionStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(SubscriptionStatus::Active),
            "EXPIRED" => Some(SubscriptionStatus::Expired),
            _ => None,
        }
    }
}
