//! Education and work timelines.

use crate::keys;
use crate::model::profile::{Experience, ExperienceKind};
use crate::store::{KeyValueStore, StoreJsonExt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineItem {
    pub date: String,
    pub title: String,
    pub company: String,
    pub bullets: Vec<String>,
}

impl From<&Experience> for TimelineItem {
    fn from(value: &Experience) -> Self {
        Self {
            date: value.date.clone(),
            title: value.title.clone(),
            company: value.company.clone(),
            bullets: value.bullets(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceView {
    pub education: Vec<TimelineItem>,
    pub work: Vec<TimelineItem>,
}

pub fn project(store: &dyn KeyValueStore) -> ExperienceView {
    let experiences: Vec<Experience> = store.read_json_list(keys::EXPERIENCES).unwrap_or_default();
    partition(&experiences)
}

/// Splits experiences by kind, keeping relative order. `Other` is dropped.
pub fn partition(experiences: &[Experience]) -> ExperienceView {
    let mut view = ExperienceView::default();
    for experience in experiences {
        match experience.kind {
            ExperienceKind::Education => view.education.push(experience.into()),
            ExperienceKind::Work => view.work.push(experience.into()),
            ExperienceKind::Other => {}
        }
    }
    view
}
