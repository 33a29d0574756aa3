//! Skill cards with proficiency bars.

use crate::keys;
use crate::model::profile::Skill;
use crate::store::{KeyValueStore, StoreJsonExt};

/// Icon drawn on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillIcon {
    Monitor,
    Globe,
    Layers,
    /// Generic icon for stored skills.
    Stack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCard {
    pub name: String,
    /// Clamped to `0..=100`.
    pub level: u8,
    pub description: String,
    pub icon: SkillIcon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillsView {
    pub cards: Vec<SkillCard>,
    /// `true` when nothing is stored and the illustrative cards are shown.
    pub fallback: bool,
}

const FALLBACK_SKILLS: [(&str, i64, &str, SkillIcon); 3] = [
    (
        "前端开发",
        85,
        "HTML、CSS、JavaScript、React、Vue等前端技术",
        SkillIcon::Monitor,
    ),
    ("后端开发", 75, "Python、Node.js、Express等后端技术", SkillIcon::Globe),
    ("UI/UX设计", 70, "Figma、Photoshop等设计工具", SkillIcon::Layers),
];

pub fn project(store: &dyn KeyValueStore) -> SkillsView {
    let skills: Vec<Skill> = store.read_json_list(keys::SKILLS).unwrap_or_default();
    cards_for(&skills)
}

pub fn cards_for(skills: &[Skill]) -> SkillsView {
    if skills.is_empty() {
        return SkillsView {
            cards: FALLBACK_SKILLS
                .iter()
                .map(|(name, level, description, icon)| SkillCard {
                    name: (*name).to_string(),
                    level: clamp_level(*level),
                    description: (*description).to_string(),
                    icon: *icon,
                })
                .collect(),
            fallback: true,
        };
    }

    SkillsView {
        cards: skills
            .iter()
            .map(|skill| {
                let level = clamp_level(skill.level);
                SkillCard {
                    name: skill.name.clone(),
                    level,
                    description: format!("熟练程度：{level}%"),
                    icon: SkillIcon::Stack,
                }
            })
            .collect(),
        fallback: false,
    }
}

pub fn clamp_level(level: i64) -> u8 {
    level.clamp(0, 100) as u8
}
