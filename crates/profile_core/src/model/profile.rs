//! Profile records: personal info, experiences and skills.

use serde::{Deserialize, Serialize};

/// Singleton record under `personalInfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "super::lenient_opt_string")]
    pub name: Option<String>,
    /// Rich text (HTML fragment) written by the admin editor.
    #[serde(deserialize_with = "super::lenient_opt_string")]
    pub bio: Option<String>,
    #[serde(deserialize_with = "super::lenient_opt_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "super::lenient_opt_string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "super::lenient_opt_string")]
    pub school: Option<String>,
    #[serde(deserialize_with = "super::lenient_opt_string")]
    pub qq: Option<String>,
}

impl PersonalInfo {
    pub fn name(&self) -> Option<&str> {
        super::non_empty(&self.name)
    }

    pub fn bio(&self) -> Option<&str> {
        super::non_empty(&self.bio)
    }

    pub fn email(&self) -> Option<&str> {
        super::non_empty(&self.email)
    }

    pub fn phone(&self) -> Option<&str> {
        super::non_empty(&self.phone)
    }

    pub fn school(&self) -> Option<&str> {
        super::non_empty(&self.school)
    }

    pub fn qq(&self) -> Option<&str> {
        super::non_empty(&self.qq)
    }
}

/// Timeline partition an experience belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceKind {
    Education,
    Work,
    /// Any other `type` value, including a missing one.
    #[default]
    #[serde(other)]
    Other,
}

/// One timeline entry. Sequence order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    #[serde(rename = "type", deserialize_with = "super::lenient_or_default")]
    pub kind: ExperienceKind,
    #[serde(deserialize_with = "super::lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub company: String,
    /// Bullet items separated by `;`.
    #[serde(deserialize_with = "super::lenient_string")]
    pub description: String,
}

impl Experience {
    /// Splits `description` into trimmed bullet items.
    ///
    /// Every `;`-separated fragment yields one item, empty ones included.
    pub fn bullets(&self) -> Vec<String> {
        self.description
            .split(';')
            .map(|item| item.trim().to_string())
            .collect()
    }
}

/// One skill card; `level` is a percentage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    #[serde(deserialize_with = "super::lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "super::lenient_i64")]
    pub level: i64,
}
