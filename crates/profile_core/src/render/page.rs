//! In-memory model of the page regions projections write into.
//!
//! A region set to `None` (or an empty slot list) is absent from the
//! document; renderers skip it.

/// One entry in the contact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem {
    /// Visible heading text, used to match stored fields.
    pub label: String,
    /// Visible value text (not markup).
    pub value: String,
    /// `data-info` marker for entries added at runtime.
    pub marker: Option<String>,
}

impl ContactItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            marker: None,
        }
    }
}

/// Contact section; hosts the lazily created message list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSection {
    /// Inner HTML of the message list, once created.
    pub messages_display: Option<String>,
}

/// Regions of the profile page. HTML fields hold inner HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub hero_photo: Option<String>,
    pub about_photo: Option<String>,
    pub education_timeline: Option<String>,
    pub work_timeline: Option<String>,
    /// Text content of the hero headline.
    pub hero_title: Option<String>,
    /// Text content of the hero description.
    pub hero_description: Option<String>,
    /// Inner HTML of each about paragraph slot.
    pub about_paragraphs: Vec<String>,
    pub contact_info: Option<Vec<ContactItem>>,
    pub skills_grid: Option<String>,
    pub contact_section: Option<ContactSection>,
}

impl Page {
    /// Page with no regions at all.
    pub fn blank() -> Self {
        Self::default()
    }

    /// The static document as shipped, before any projection runs.
    pub fn standard() -> Self {
        Self {
            hero_photo: Some(String::new()),
            about_photo: Some(String::new()),
            education_timeline: Some(String::new()),
            work_timeline: Some(String::new()),
            hero_title: Some("我是开发者".to_string()),
            hero_description: Some(
                "我是一名充满激情的开发者，专注于创造令人惊叹的数字体验".to_string(),
            ),
            about_paragraphs: vec![String::new(), String::new(), String::new()],
            contact_info: Some(vec![
                ContactItem::new("邮箱", "example@email.com"),
                ContactItem::new("电话", "+86 123 4567 8910"),
                ContactItem::new("地址", "中国，北京"),
            ]),
            skills_grid: Some(String::new()),
            contact_section: Some(ContactSection::default()),
        }
    }

    /// Present regions as `(name, rendered content)` pairs, in document order.
    pub fn regions(&self) -> Vec<(String, String)> {
        let mut regions = Vec::new();

        push_region(&mut regions, "hero-title", &self.hero_title);
        push_region(&mut regions, "hero-description", &self.hero_description);
        push_region(&mut regions, "hero-photo", &self.hero_photo);
        push_region(&mut regions, "about-photo", &self.about_photo);
        for (index, paragraph) in self.about_paragraphs.iter().enumerate() {
            regions.push((format!("about-text-{}", index + 1), paragraph.clone()));
        }
        push_region(&mut regions, "education-timeline", &self.education_timeline);
        push_region(&mut regions, "work-timeline", &self.work_timeline);
        push_region(&mut regions, "skills-grid", &self.skills_grid);
        if let Some(items) = &self.contact_info {
            for item in items {
                regions.push((format!("contact:{}", item.label), item.value.clone()));
            }
        }
        let messages = self
            .contact_section
            .as_ref()
            .and_then(|section| section.messages_display.clone());
        push_region(&mut regions, "messages-display", &messages);

        regions
    }
}

fn push_region(regions: &mut Vec<(String, String)>, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        regions.push((name.to_string(), value.clone()));
    }
}
