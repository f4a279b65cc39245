//! Catalog of armory sub-resources.
//!
//! Every lookup fetches the same eight sub-resources. Only `Profile` is
//! mandatory; the rest are enrichments that may come back empty.

use std::fmt;

/// Placeholder substituted with the character name in every path template.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// One armory endpoint that contributes a section of the character snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubResourceKind {
    Profile,
    CombatSkills,
    Gems,
    Arkpassive,
    Siblings,
    Engravings,
    Cards,
    Arkgrid,
}

impl SubResourceKind {
    /// Every sub-resource, mandatory first.
    pub const ALL: [SubResourceKind; 8] = [
        SubResourceKind::Profile,
        SubResourceKind::CombatSkills,
        SubResourceKind::Gems,
        SubResourceKind::Arkpassive,
        SubResourceKind::Siblings,
        SubResourceKind::Engravings,
        SubResourceKind::Cards,
        SubResourceKind::Arkgrid,
    ];

    /// The best-effort sub-resources fetched after the profile succeeds.
    pub const OPTIONAL: [SubResourceKind; 7] = [
        SubResourceKind::CombatSkills,
        SubResourceKind::Gems,
        SubResourceKind::Arkpassive,
        SubResourceKind::Siblings,
        SubResourceKind::Engravings,
        SubResourceKind::Cards,
        SubResourceKind::Arkgrid,
    ];

    /// Path relative to the armory API base, containing [`NAME_PLACEHOLDER`].
    pub fn path_template(&self) -> &'static str {
        match self {
            Self::Profile => "/armories/characters/{name}/profiles",
            Self::CombatSkills => "/armories/characters/{name}/combat-skills",
            Self::Gems => "/armories/characters/{name}/gems",
            Self::Arkpassive => "/armories/characters/{name}/arkpassive",
            Self::Siblings => "/characters/{name}/siblings",
            Self::Engravings => "/armories/characters/{name}/engravings",
            Self::Cards => "/armories/characters/{name}/cards",
            Self::Arkgrid => "/armories/characters/{name}/arkgrid",
        }
    }

    /// A failed mandatory fetch aborts the whole lookup.
    pub fn is_mandatory(&self) -> bool {
        matches!(self, Self::Profile)
    }

    /// Key under which this sub-resource appears in the snapshot JSON.
    pub fn response_key(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::CombatSkills => "skills",
            Self::Gems => "gems",
            Self::Arkpassive => "arkpassive",
            Self::Siblings => "siblings",
            Self::Engravings => "engravings",
            Self::Cards => "cards",
            Self::Arkgrid => "arkgrid",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::CombatSkills => "combat-skills",
            Self::Gems => "gems",
            Self::Arkpassive => "arkpassive",
            Self::Siblings => "siblings",
            Self::Engravings => "engravings",
            Self::Cards => "cards",
            Self::Arkgrid => "arkgrid",
        }
    }
}

impl fmt::Display for SubResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
