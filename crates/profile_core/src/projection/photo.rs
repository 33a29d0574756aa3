//! Hero and about photo selection.
//!
//! Candidate order per region, first usable value wins:
//! - hero: `avatarPhoto`, then `personalPhoto`, then placeholder.
//! - about: `aboutPhoto`, then `personalPhoto`, then placeholder.

use crate::keys;
use crate::store::{KeyValueStore, StoreResult};
use log::{info, warn};

/// Prefix of a self-describing embedded image (`data:` URL).
pub const EMBEDDED_IMAGE_PREFIX: &str = "data:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoOrigin {
    /// The region's own slot.
    Dedicated,
    /// The shared `personalPhoto` slot.
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSlot {
    Image { source: String, origin: PhotoOrigin },
    Placeholder,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoView {
    pub hero: PhotoSlot,
    pub about: PhotoSlot,
}

impl PhotoView {
    pub fn error() -> Self {
        Self {
            hero: PhotoSlot::Error,
            about: PhotoSlot::Error,
        }
    }
}

pub fn is_embedded_image(value: &str) -> bool {
    value.starts_with(EMBEDDED_IMAGE_PREFIX)
}

/// Builds the photo view and drops the legacy `photos` array.
///
/// Any store failure degrades both regions to `PhotoSlot::Error`.
pub fn project(store: &dyn KeyValueStore) -> PhotoView {
    match try_project(store) {
        Ok(view) => view,
        Err(err) => {
            warn!(
                "event=projection_render module=projection projection=photo status=error error={}",
                err
            );
            PhotoView::error()
        }
    }
}

fn try_project(store: &dyn KeyValueStore) -> StoreResult<PhotoView> {
    let avatar = store.get(keys::AVATAR_PHOTO)?;
    let about = store.get(keys::ABOUT_PHOTO)?;
    let legacy = store.get(keys::PERSONAL_PHOTO)?;

    if store.get(keys::LEGACY_PHOTOS)?.is_some() {
        store.remove(keys::LEGACY_PHOTOS)?;
        info!("event=legacy_cleanup module=projection projection=photo status=ok key=photos");
    }

    Ok(PhotoView {
        hero: select(&[
            (avatar.as_deref(), PhotoOrigin::Dedicated),
            (legacy.as_deref(), PhotoOrigin::Legacy),
        ]),
        about: select(&[
            (about.as_deref(), PhotoOrigin::Dedicated),
            (legacy.as_deref(), PhotoOrigin::Legacy),
        ]),
    })
}

fn select(candidates: &[(Option<&str>, PhotoOrigin)]) -> PhotoSlot {
    candidates
        .iter()
        .find_map(|(value, origin)| {
            value.filter(|value| is_embedded_image(value)).map(|source| PhotoSlot::Image {
                source: source.to_string(),
                origin: *origin,
            })
        })
        .unwrap_or(PhotoSlot::Placeholder)
}

#[cfg(test)]
mod tests {
    use super::{project, PhotoOrigin, PhotoSlot};
    use crate::db::DbError;
    use crate::keys;
    use crate::store::{KeyValueStore, MemoryStore, StoreError, StoreResult};

    const AVATAR: &str = "data:image/png;base64,AAAA";
    const LEGACY: &str = "data:image/jpeg;base64,BBBB";

    #[test]
    fn region_slot_beats_legacy_photo() {
        let store = MemoryStore::new();
        store.set(keys::AVATAR_PHOTO, AVATAR).unwrap();
        store.set(keys::PERSONAL_PHOTO, LEGACY).unwrap();

        let view = project(&store);

        assert_eq!(
            view.hero,
            PhotoSlot::Image {
                source: AVATAR.to_string(),
                origin: PhotoOrigin::Dedicated
            }
        );
        assert_eq!(
            view.about,
            PhotoSlot::Image {
                source: LEGACY.to_string(),
                origin: PhotoOrigin::Legacy
            }
        );
    }

    #[test]
    fn values_without_embedded_prefix_are_ignored() {
        let store = MemoryStore::new();
        store.set(keys::AVATAR_PHOTO, "https://example.com/me.png").unwrap();
        store.set(keys::ABOUT_PHOTO, "").unwrap();

        let view = project(&store);

        assert_eq!(view.hero, PhotoSlot::Placeholder);
        assert_eq!(view.about, PhotoSlot::Placeholder);
    }

    #[test]
    fn removes_legacy_photo_array() {
        let store = MemoryStore::new();
        store.set(keys::LEGACY_PHOTOS, r#"["data:a","data:b"]"#).unwrap();

        project(&store);

        assert_eq!(store.get(keys::LEGACY_PHOTOS).unwrap(), None);
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Db(DbError::Sqlite(
                rusqlite::Error::InvalidQuery,
            )))
        }

        fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Ok(())
        }

        fn remove(&self, _key: &str) -> StoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn read_failure_degrades_both_regions() {
        let view = project(&BrokenStore);
        assert_eq!(view.hero, PhotoSlot::Error);
        assert_eq!(view.about, PhotoSlot::Error);
    }
}
