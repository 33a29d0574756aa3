//! HTML fragments for each view-model.
//!
//! Every interpolated value goes through `escape_html`; bio sections are the
//! only markup passed through, and they are applied by `apply_personal_info`.

use crate::markup::escape_html;
use crate::projection::experience::TimelineItem;
use crate::projection::messages::{MessageCard, MessagesView};
use crate::projection::photo::{PhotoOrigin, PhotoSlot};
use crate::projection::skills::{SkillCard, SkillIcon};

pub const EMPTY_EDUCATION_HTML: &str =
    r#"<p class="timeline-empty" style="text-align: center; padding: 40px; color: var(--text-medium);">暂无教育经历</p>"#;
pub const EMPTY_WORK_HTML: &str =
    r#"<p class="timeline-empty" style="text-align: center; padding: 40px; color: var(--text-medium);">暂无工作经历</p>"#;
pub const EMPTY_MESSAGES_HTML: &str =
    r#"<p class="messages-empty" style="text-align: center; color: var(--text-medium);">暂无留言</p>"#;
pub const PHOTO_ERROR_HTML: &str = r#"<div class="placeholder-photo placeholder-error">加载失败</div>"#;

const CAMERA_ICON: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="40" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">"#,
    r#"<path d="M23 19a2 2 0 0 1-2 2H3a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2h4l2-3h6l2 3h4a2 2 0 0 1 2 2z"></path>"#,
    r#"<circle cx="12" cy="13" r="4"></circle></svg>"#
);
const PICTURE_ICON: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="50" height="50" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">"#,
    r#"<rect x="3" y="3" width="18" height="18" rx="2" ry="2"></rect>"#,
    r#"<circle cx="8.5" cy="8.5" r="1.5"></circle><polyline points="21 15 16 10 5 21"></polyline></svg>"#
);

/// Which photo region is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoRegion {
    Hero,
    About,
}

pub fn photo_html(region: PhotoRegion, slot: &PhotoSlot, admin_entry_path: &str) -> String {
    match slot {
        PhotoSlot::Image { source, origin } => {
            let alt = match (region, origin) {
                (_, PhotoOrigin::Legacy) => "个人照片",
                (PhotoRegion::Hero, PhotoOrigin::Dedicated) => "个人头像",
                (PhotoRegion::About, PhotoOrigin::Dedicated) => "关于我照片",
            };
            let class = match region {
                PhotoRegion::Hero => "profile-photo profile-photo-round",
                PhotoRegion::About => "profile-photo profile-photo-card",
            };
            format!(
                r#"<img src="{}" alt="{}" class="{}">"#,
                escape_html(source),
                alt,
                class
            )
        }
        PhotoSlot::Placeholder => {
            let link = escape_html(admin_entry_path);
            match region {
                PhotoRegion::Hero => format!(
                    r#"<a class="placeholder-photo placeholder-hero" href="{link}" target="_blank">{CAMERA_ICON}</a>"#
                ),
                PhotoRegion::About => format!(
                    r#"<a class="placeholder-photo placeholder-about" href="{link}" target="_blank">{PICTURE_ICON}<div>点击添加照片</div></a>"#
                ),
            }
        }
        PhotoSlot::Error => PHOTO_ERROR_HTML.to_string(),
    }
}

pub fn timeline_html(items: &[TimelineItem], empty_html: &str) -> String {
    if items.is_empty() {
        return empty_html.to_string();
    }

    items
        .iter()
        .map(|item| {
            let bullets: String = item
                .bullets
                .iter()
                .map(|bullet| format!("<li>{}</li>", escape_html(bullet)))
                .collect();
            format!(
                concat!(
                    r#"<div class="timeline-item">"#,
                    r#"<div class="timeline-date">{}</div>"#,
                    r#"<div class="timeline-content"><h3>{}</h3>"#,
                    r#"<div class="timeline-company">{}</div><ul>{}</ul></div></div>"#
                ),
                escape_html(&item.date),
                escape_html(&item.title),
                escape_html(&item.company),
                bullets
            )
        })
        .collect()
}

pub fn skills_html(cards: &[SkillCard]) -> String {
    cards.iter().map(skill_card_html).collect()
}

fn skill_card_html(card: &SkillCard) -> String {
    let level = card.level;
    format!(
        concat!(
            r#"<div class="skill-item"><div class="skill-icon">{}</div><h3>{}</h3>"#,
            r#"<div class="skill-level-bar" style="background: linear-gradient(to right, var(--primary-color) 0%, var(--primary-color) {level}%, var(--border-color) {level}%, var(--border-color) 100%); height: 8px; border-radius: 4px; margin: 10px 0;"></div>"#,
            r#"<p>{}</p><div class="skill-level-text">熟练程度: {level}%</div></div>"#
        ),
        skill_icon_svg(card.icon),
        escape_html(&card.name),
        escape_html(&card.description),
        level = level
    )
}

fn skill_icon_svg(icon: SkillIcon) -> &'static str {
    match icon {
        SkillIcon::Monitor => concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="48" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
            r#"<rect x="2" y="3" width="20" height="14" rx="2" ry="2"></rect><line x1="8" y1="21" x2="16" y2="21"></line><line x1="12" y1="17" x2="12" y2="21"></line></svg>"#
        ),
        SkillIcon::Globe => concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="48" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
            r#"<circle cx="12" cy="12" r="10"></circle><line x1="2" y1="12" x2="22" y2="12"></line>"#,
            r#"<path d="M12 2a15.3 15.3 0 0 1 4 10 15.3 15.3 0 0 1-4 10 15.3 15.3 0 0 1-4-10 15.3 15.3 0 0 1 4-10z"></path></svg>"#
        ),
        SkillIcon::Layers => concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="48" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
            r#"<polygon points="12 2 2 7 12 12 22 7 12 2"></polygon><polyline points="2 17 12 22 22 17"></polyline><polyline points="2 12 12 17 22 12"></polyline></svg>"#
        ),
        SkillIcon::Stack => concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="48" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
            r#"<path d="M12 2L2 7L12 12L22 7L12 2Z"></path><path d="M2 17L12 22L22 17"></path><path d="M2 12L12 17L22 12"></path></svg>"#
        ),
    }
}

pub fn messages_html(view: &MessagesView) -> String {
    match view {
        MessagesView::Empty => EMPTY_MESSAGES_HTML.to_string(),
        MessagesView::List(cards) => cards.iter().map(message_card_html).collect(),
    }
}

fn message_card_html(card: &MessageCard) -> String {
    let reply = card
        .reply
        .as_ref()
        .map(|reply| {
            format!(
                concat!(
                    r#"<div class="message-reply"><div class="reply-header">"#,
                    r#"<span class="reply-badge">管理员回复</span><span class="reply-date">{}</span></div>"#,
                    r#"<div class="reply-content"><p>{}</p></div></div>"#
                ),
                escape_html(&reply.date_text),
                escape_html(&reply.content)
            )
        })
        .unwrap_or_default();

    format!(
        concat!(
            r#"<div class="message-item" data-id="{}"><div class="message-header">"#,
            r#"<h4>{}</h4><span class="message-date">{}</span></div>"#,
            r#"<div class="message-content"><p>{}</p></div>{}</div>"#
        ),
        escape_html(&card.id),
        escape_html(&card.name),
        escape_html(&card.date_text),
        escape_html(&card.body),
        reply
    )
}
