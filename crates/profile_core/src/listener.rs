//! Storage change notification routing.
//!
//! Maps a mutated key to the projections that must re-run. Keys not listed
//! here are ignored; ordering across contexts is last-write-wins.

use crate::keys;
use crate::projection::ProjectionKind;

/// Projections affected by a change to `key`, in re-run order.
pub fn projections_for(key: &str) -> &'static [ProjectionKind] {
    match key {
        keys::EXPERIENCES => &[ProjectionKind::Experience],
        keys::PERSONAL_INFO => &[ProjectionKind::PersonalInfo, ProjectionKind::Photo],
        keys::PERSONAL_PHOTO | keys::AVATAR_PHOTO | keys::ABOUT_PHOTO => {
            &[ProjectionKind::Photo, ProjectionKind::PersonalInfo]
        }
        keys::SKILLS => &[ProjectionKind::Skills],
        keys::MESSAGES => &[ProjectionKind::Messages],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::projections_for;
    use crate::projection::ProjectionKind;

    #[test]
    fn skills_change_runs_only_skills() {
        assert_eq!(projections_for("skills"), &[ProjectionKind::Skills]);
    }

    #[test]
    fn personal_info_change_runs_info_and_photos() {
        assert_eq!(
            projections_for("personalInfo"),
            &[ProjectionKind::PersonalInfo, ProjectionKind::Photo]
        );
    }

    #[test]
    fn every_photo_slot_runs_photos_then_info() {
        for key in ["avatarPhoto", "aboutPhoto", "personalPhoto"] {
            assert_eq!(
                projections_for(key),
                &[ProjectionKind::Photo, ProjectionKind::PersonalInfo]
            );
        }
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        assert!(projections_for("adminPassword").is_empty());
        assert!(projections_for("loginAttempts").is_empty());
        assert!(projections_for("photos").is_empty());
    }
}
