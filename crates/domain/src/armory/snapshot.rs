//! The assembled character snapshot.

use serde::Serialize;
use serde_json::Value;

use super::SubResourceKind;

/// Everything known about one character.
///
/// Always serializes to the same eight keys: `profile` carries the mandatory
/// body, every other key carries its body or `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSnapshot {
    pub profile: Value,
    pub skills: Option<Value>,
    pub gems: Option<Value>,
    pub arkpassive: Option<Value>,
    pub siblings: Option<Value>,
    pub engravings: Option<Value>,
    pub cards: Option<Value>,
    pub arkgrid: Option<Value>,
}

impl CharacterSnapshot {
    /// Start a snapshot from the profile body with every optional section empty.
    pub fn new(profile: Value) -> Self {
        Self {
            profile,
            skills: None,
            gems: None,
            arkpassive: None,
            siblings: None,
            engravings: None,
            cards: None,
            arkgrid: None,
        }
    }

    /// Store an optional section. The profile is fixed at construction, so
    /// `Profile` is ignored here.
    pub fn set_section(&mut self, kind: SubResourceKind, body: Option<Value>) {
        let slot = match kind {
            SubResourceKind::Profile => return,
            SubResourceKind::CombatSkills => &mut self.skills,
            SubResourceKind::Gems => &mut self.gems,
            SubResourceKind::Arkpassive => &mut self.arkpassive,
            SubResourceKind::Siblings => &mut self.siblings,
            SubResourceKind::Engravings => &mut self.engravings,
            SubResourceKind::Cards => &mut self.cards,
            SubResourceKind::Arkgrid => &mut self.arkgrid,
        };
        *slot = body;
    }

    pub fn section(&self, kind: SubResourceKind) -> Option<&Value> {
        match kind {
            SubResourceKind::Profile => Some(&self.profile),
            SubResourceKind::CombatSkills => self.skills.as_ref(),
            SubResourceKind::Gems => self.gems.as_ref(),
            SubResourceKind::Arkpassive => self.arkpassive.as_ref(),
            SubResourceKind::Siblings => self.siblings.as_ref(),
            SubResourceKind::Engravings => self.engravings.as_ref(),
            SubResourceKind::Cards => self.cards.as_ref(),
            SubResourceKind::Arkgrid => self.arkgrid.as_ref(),
        }
    }

    /// Optional sections that came back empty.
    pub fn missing_sections(&self) -> Vec<SubResourceKind> {
        SubResourceKind::OPTIONAL
            .into_iter()
            .filter(|kind| self.section(*kind).is_none())
            .collect()
    }
}
