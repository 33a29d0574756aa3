//! Headline, description, about paragraphs and contact details.
//!
//! About block policy, first match wins:
//! 1. bio with top-level elements → one element per paragraph slot;
//! 2. bio without elements → whole bio into the first slot;
//! 3. no bio → fixed default paragraphs.

use crate::keys;
use crate::markup::{plain_text, top_level_elements};
use crate::model::profile::PersonalInfo;
use crate::store::{KeyValueStore, StoreJsonExt};

pub const DEFAULT_DESCRIPTION: &str =
    "我是一名充满激情的开发者，专注于创造令人惊叹的数字体验";

pub const DEFAULT_ABOUT_PARAGRAPHS: [&str; 3] = [
    "我是一名热爱编程和设计的开发者，拥有丰富的项目经验和扎实的技术功底。",
    "我的技术栈包括HTML、CSS、JavaScript、React等前端技术，以及Python、Node.js等后端技术。",
    "除了技术之外，我还喜欢摄影、旅行和阅读。这些爱好不仅丰富了我的生活，也为我的设计和开发工作带来了灵感。",
];

pub const CONTACT_LABEL_EMAIL: &str = "邮箱";
pub const CONTACT_LABEL_PHONE: &str = "电话";
pub const CONTACT_LABEL_ADDRESS: &str = "地址";
pub const CONTACT_LABEL_QQ: &str = "QQ";
/// Marker identifying the appended QQ entry.
pub const QQ_MARKER: &str = "qq";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AboutContent {
    /// Rich-text sections, one per paragraph slot.
    Sections(Vec<String>),
    /// Rich text without sections, all into the first slot.
    Flood(String),
    /// Plain-text fallback paragraphs.
    Defaults,
}

/// Contact values to apply; `None` leaves the rendered value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub school: Option<String>,
    pub qq: Option<String>,
}

impl ContactUpdate {
    /// Value for an existing entry with the given visible label.
    pub fn value_for_label(&self, label: &str) -> Option<&str> {
        match label.trim() {
            CONTACT_LABEL_EMAIL => self.email.as_deref(),
            CONTACT_LABEL_PHONE => self.phone.as_deref(),
            CONTACT_LABEL_ADDRESS => self.school.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalInfoView {
    /// `None` keeps the page's static headline.
    pub headline: Option<String>,
    /// `None` keeps the page's static description.
    pub description: Option<String>,
    pub about: AboutContent,
    pub contacts: ContactUpdate,
}

pub fn project(store: &dyn KeyValueStore) -> PersonalInfoView {
    let info: PersonalInfo = store.read_json(keys::PERSONAL_INFO).unwrap_or_default();
    view_for(&info)
}

pub fn view_for(info: &PersonalInfo) -> PersonalInfoView {
    let bio = info.bio();

    let description = bio.map(|bio| {
        let text = plain_text(bio);
        if text.is_empty() {
            DEFAULT_DESCRIPTION.to_string()
        } else {
            text
        }
    });

    let about = match bio {
        Some(bio) => {
            let sections = top_level_elements(bio);
            if sections.is_empty() {
                AboutContent::Flood(bio.to_string())
            } else {
                AboutContent::Sections(sections)
            }
        }
        None => AboutContent::Defaults,
    };

    PersonalInfoView {
        headline: info.name().map(|name| format!("我是{name}")),
        description,
        about,
        contacts: ContactUpdate {
            email: info.email().map(str::to_string),
            phone: info.phone().map(str::to_string),
            school: info.school().map(str::to_string),
            qq: info.qq().map(str::to_string),
        },
    }
}
