//! Applies projection view-models to a `Page`.
//!
//! # Invariants
//! - A missing region is skipped; the other regions still render.
//! - Applying the same view twice yields the same page.

pub mod page;
pub mod templates;

use crate::markup::escape_html;
use crate::projection::experience::ExperienceView;
use crate::projection::messages::MessagesView;
use crate::projection::personal_info::{
    AboutContent, PersonalInfoView, CONTACT_LABEL_QQ, DEFAULT_ABOUT_PARAGRAPHS, QQ_MARKER,
};
use crate::projection::photo::PhotoView;
use crate::projection::skills::SkillsView;
use page::{ContactItem, Page};
use templates::{PhotoRegion, EMPTY_EDUCATION_HTML, EMPTY_WORK_HTML};

pub fn apply_photos(page: &mut Page, view: &PhotoView, admin_entry_path: &str) {
    if let Some(hero) = page.hero_photo.as_mut() {
        *hero = templates::photo_html(PhotoRegion::Hero, &view.hero, admin_entry_path);
    }
    if let Some(about) = page.about_photo.as_mut() {
        *about = templates::photo_html(PhotoRegion::About, &view.about, admin_entry_path);
    }
}

pub fn apply_experiences(page: &mut Page, view: &ExperienceView) {
    if let Some(education) = page.education_timeline.as_mut() {
        *education = templates::timeline_html(&view.education, EMPTY_EDUCATION_HTML);
    }
    if let Some(work) = page.work_timeline.as_mut() {
        *work = templates::timeline_html(&view.work, EMPTY_WORK_HTML);
    }
}

pub fn apply_personal_info(page: &mut Page, view: &PersonalInfoView) {
    if let (Some(title), Some(headline)) = (page.hero_title.as_mut(), view.headline.as_ref()) {
        title.clone_from(headline);
    }
    if let (Some(target), Some(description)) =
        (page.hero_description.as_mut(), view.description.as_ref())
    {
        target.clone_from(description);
    }

    apply_about(&mut page.about_paragraphs, &view.about);

    if let Some(items) = page.contact_info.as_mut() {
        for item in items.iter_mut() {
            if let Some(value) = view.contacts.value_for_label(&item.label) {
                item.value = value.to_string();
            }
        }

        if let Some(qq) = view.contacts.qq.as_deref() {
            match items
                .iter_mut()
                .find(|item| item.marker.as_deref() == Some(QQ_MARKER))
            {
                Some(existing) => existing.value = qq.to_string(),
                None => items.push(ContactItem {
                    label: CONTACT_LABEL_QQ.to_string(),
                    value: qq.to_string(),
                    marker: Some(QQ_MARKER.to_string()),
                }),
            }
        }
    }
}

fn apply_about(slots: &mut [String], about: &AboutContent) {
    if slots.is_empty() {
        return;
    }

    match about {
        AboutContent::Sections(sections) => {
            for (slot, section) in slots.iter_mut().zip(sections) {
                slot.clone_from(section);
            }
        }
        AboutContent::Flood(bio) => slots[0].clone_from(bio),
        AboutContent::Defaults => {
            for (slot, text) in slots.iter_mut().zip(DEFAULT_ABOUT_PARAGRAPHS) {
                *slot = escape_html(text);
            }
        }
    }
}

pub fn apply_skills(page: &mut Page, view: &SkillsView) {
    if let Some(grid) = page.skills_grid.as_mut() {
        *grid = templates::skills_html(&view.cards);
    }
}

/// Renders messages, creating the list inside the contact section on first use.
pub fn apply_messages(page: &mut Page, view: &MessagesView) {
    let Some(section) = page.contact_section.as_mut() else {
        return;
    };
    section.messages_display = Some(templates::messages_html(view));
}
