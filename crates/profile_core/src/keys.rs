//! Storage key names shared with the admin surface.

pub const EXPERIENCES: &str = "experiences";
pub const PERSONAL_INFO: &str = "personalInfo";
pub const SKILLS: &str = "skills";
pub const MESSAGES: &str = "messages";

pub const AVATAR_PHOTO: &str = "avatarPhoto";
pub const ABOUT_PHOTO: &str = "aboutPhoto";
/// Single photo used by earlier versions for both regions.
pub const PERSONAL_PHOTO: &str = "personalPhoto";
/// Bulk photo array from earlier versions; deleted on sight.
pub const LEGACY_PHOTOS: &str = "photos";

pub const ADMIN_PASSWORD: &str = "adminPassword";
pub const LOGIN_ATTEMPTS: &str = "loginAttempts";
pub const LOGIN_LOCK_DATA: &str = "loginLockData";

/// Session-scoped key, written to the session store only.
pub const ADMIN_LOGIN_TIME: &str = "adminLoginTime";
