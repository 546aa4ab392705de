use serde::{Deserialize, Serialize};

use super::access::GroupAccess;

/// A volunteer as supplied by the directory, keyed by Discord id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub did: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub groups: Vec<GroupMembership>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// An organization as seen from one person's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMembership {
    pub gid: i64,
    pub name: String,
    #[serde(default)]
    pub access_level: Option<GroupAccess>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub tid: i64,
    pub name: String,
}

impl Person {
    pub fn new(did: impl Into<String>, name: impl Into<String>) -> Self {
        Person {
            did: did.into(),
            name: name.into(),
            email: None,
            phone: None,
            groups: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// `email • phone`, whichever are present, or "No contact info".
    pub fn contact_line(&self) -> String {
        let parts: Vec<&str> = [self.email.as_deref(), self.phone.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            "No contact info".to_string()
        } else {
            parts.join(" • ")
        }
    }

    pub fn email_or_na(&self) -> &str {
        non_empty_or_na(self.email.as_deref())
    }

    pub fn phone_or_na(&self) -> &str {
        non_empty_or_na(self.phone.as_deref())
    }
}

fn non_empty_or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "N/A",
    }
}
