//! Render projections: store state in, view-model out.
//!
//! # Responsibility
//! - Read one storage slice per projection and build a structured view.
//! - Leave page mutation to `crate::render`.
//!
//! # Invariants
//! - Projections never fail; unreadable data falls back to documented
//!   defaults or placeholders.
//! - Only the photo projection writes (legacy key cleanup).

pub mod experience;
pub mod messages;
pub mod personal_info;
pub mod photo;
pub mod skills;

/// Identifies one projection, e.g. for change dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectionKind {
    Photo,
    Experience,
    PersonalInfo,
    Skills,
    Messages,
}

impl ProjectionKind {
    /// Start-up render order.
    pub const ALL: [ProjectionKind; 5] = [
        Self::Photo,
        Self::Experience,
        Self::PersonalInfo,
        Self::Skills,
        Self::Messages,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Experience => "experience",
            Self::PersonalInfo => "personal_info",
            Self::Skills => "skills",
            Self::Messages => "messages",
        }
    }
}
