use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionType {
    Basic,
    Classic,
}

impl Display for SubscriptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subscription_type = match self {
            SubscriptionType::Basic => "BASIC",
            SubscriptionType::Classic => "CLASSIC",
        };
        write!(f, "{}", subscription_type)
    }
}

impl SubscriptionType {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "BASIC" => Some(SubscriptionType::Basic),
            "CLASSIC" => Some(SubscriptionType::Classic),
            _ => None,
        }
    }
}
