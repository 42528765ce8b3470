use serde::{Deserialize, Serialize};

/// Snow surface category used to select a glide product.
///
/// Carries only the identifying tag. Display names live in the presentation
/// layer, keyed by [`SnowType::id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnowType {
    NewFallen,
    MoistNewFallen,
    FineGrained,
    MoistFineGrained,
    OldGrained,
    TransformedMoistFine,
    FrozenCorn,
    WetCorn,
    VeryWetCorn,
}

impl SnowType {
    pub const ALL: [SnowType; 9] = [
        SnowType::NewFallen,
        SnowType::MoistNewFallen,
        SnowType::FineGrained,
        SnowType::MoistFineGrained,
        SnowType::OldGrained,
        SnowType::TransformedMoistFine,
        SnowType::FrozenCorn,
        SnowType::WetCorn,
        SnowType::VeryWetCorn,
    ];

    /// Stable identifier, identical to the serde representation.
    pub fn id(self) -> &'static str {
        match self {
            SnowType::NewFallen => "new-fallen",
            SnowType::MoistNewFallen => "moist-new-fallen",
            SnowType::FineGrained => "fine-grained",
            SnowType::MoistFineGrained => "moist-fine-grained",
            SnowType::OldGrained => "old-grained",
            SnowType::TransformedMoistFine => "transformed-moist-fine",
            SnowType::FrozenCorn => "frozen-corn",
            SnowType::WetCorn => "wet-corn",
            SnowType::VeryWetCorn => "very-wet-corn",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn swix_group(self) -> SwixGroup {
        match self {
            SnowType::NewFallen | SnowType::MoistNewFallen => SwixGroup::NewSnow,
            SnowType::FineGrained | SnowType::MoistFineGrained => SwixGroup::FineGrained,
            SnowType::OldGrained | SnowType::TransformedMoistFine => SwixGroup::OldGrained,
            SnowType::WetCorn | SnowType::VeryWetCorn => SwixGroup::Wet,
            SnowType::FrozenCorn => SwixGroup::Frozen,
        }
    }

    pub fn is_wet(self) -> bool {
        self.swix_group() == SwixGroup::Wet
    }
}

impl std::fmt::Display for SnowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Five-group simplification of [`SnowType`], numbered 1–5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SwixGroup {
    NewSnow = 1,
    FineGrained = 2,
    OldGrained = 3,
    Wet = 4,
    Frozen = 5,
}

impl SwixGroup {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(SwixGroup::NewSnow),
            2 => Some(SwixGroup::FineGrained),
            3 => Some(SwixGroup::OldGrained),
            4 => Some(SwixGroup::Wet),
            5 => Some(SwixGroup::Frozen),
            _ => None,
        }
    }

    /// Snow types that map onto this group, in declaration order.
    pub fn snow_types(self) -> impl Iterator<Item = SnowType> {
        SnowType::ALL.into_iter().filter(move |t| t.swix_group() == self)
    }
}

impl From<SwixGroup> for u8 {
    fn from(g: SwixGroup) -> u8 {
        g.number()
    }
}

impl TryFrom<u8> for SwixGroup {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        SwixGroup::from_number(n).ok_or_else(|| format!("swix group {n} is outside 1–5"))
    }
}
