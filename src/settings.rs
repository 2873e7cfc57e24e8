//! Effect configuration
//!
//! Supplied by the host (usually as JSON) and read at spawn/draw time.
//! Changing the configuration never mutates particles already alive.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Fallback palette used when the host supplies none
pub const DEFAULT_PALETTE: [&str; 7] = [
    "#ff0000", "#ff7f00", "#ffff00", "#00ff00", "#0000ff", "#4b0082", "#9400d3",
];

/// Cool-white colors for lightning particles
pub const LIGHTNING_PALETTE: [&str; 4] = ["#ffffff", "#e0f7ff", "#b3e5fc", "#81d4fa"];

/// Sparkle color
pub const SPARKLE_COLOR: &str = "#ffffff";

/// Bubble color (translucent white)
pub const BUBBLE_COLOR: &str = "rgba(255, 255, 255, 0.3)";

/// Intensity tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IntensityTier {
    Low,
    #[default]
    Medium,
    High,
}

impl IntensityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntensityTier::Low => "low",
            IntensityTier::Medium => "medium",
            IntensityTier::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(IntensityTier::Low),
            "medium" | "med" => Some(IntensityTier::Medium),
            "high" => Some(IntensityTier::High),
            _ => None,
        }
    }

    /// Particles created by a single trail spawn call
    pub fn particle_count(&self) -> usize {
        match self {
            IntensityTier::Low => 3,
            IntensityTier::Medium => 5,
            IntensityTier::High => 8,
        }
    }

    /// `max_life` of trail particles (ticks)
    pub fn trail_length(&self) -> u32 {
        match self {
            IntensityTier::Low => 10,
            IntensityTier::Medium => 15,
            IntensityTier::High => 25,
        }
    }

    /// Radius of the cursor glow halo (px)
    pub fn glow_radius(&self) -> f32 {
        match self {
            IntensityTier::Low => 20.0,
            IntensityTier::Medium => 30.0,
            IntensityTier::High => 40.0,
        }
    }
}

/// Individually toggleable effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// Continuous color-cycling line following the pointer
    Rainbow,
    Trail,
    Sparkles,
    Bubbles,
    Comet,
    Lightning,
    /// Radial burst on click
    Fireworks,
    /// Radial gradient under the pointer (render-only)
    Glow,
}

impl EffectKind {
    pub const ALL: [EffectKind; 8] = [
        EffectKind::Rainbow,
        EffectKind::Trail,
        EffectKind::Sparkles,
        EffectKind::Bubbles,
        EffectKind::Comet,
        EffectKind::Lightning,
        EffectKind::Fireworks,
        EffectKind::Glow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Rainbow => "rainbow",
            EffectKind::Trail => "trail",
            EffectKind::Sparkles => "sparkles",
            EffectKind::Bubbles => "bubbles",
            EffectKind::Comet => "comet",
            EffectKind::Lightning => "lightning",
            EffectKind::Fireworks => "fireworks",
            EffectKind::Glow => "glow",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

/// Which effects are active
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum EnabledEffects {
    /// The `"all"` wildcard
    #[default]
    All,
    Only(BTreeSet<EffectKind>),
}

impl EnabledEffects {
    pub fn none() -> Self {
        EnabledEffects::Only(BTreeSet::new())
    }

    pub fn only(kinds: impl IntoIterator<Item = EffectKind>) -> Self {
        EnabledEffects::Only(kinds.into_iter().collect())
    }

    pub fn contains(&self, kind: EffectKind) -> bool {
        match self {
            EnabledEffects::All => true,
            EnabledEffects::Only(set) => set.contains(&kind),
        }
    }

    /// Parse host-supplied effect names; unknown names are skipped
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.as_ref();
            if name.trim().eq_ignore_ascii_case("all") {
                return EnabledEffects::All;
            }
            match EffectKind::parse(name) {
                Some(kind) => {
                    set.insert(kind);
                }
                None => log::warn!("Ignoring unknown effect name: {:?}", name),
            }
        }
        EnabledEffects::Only(set)
    }
}

impl From<Vec<String>> for EnabledEffects {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(&names)
    }
}

impl From<EnabledEffects> for Vec<String> {
    fn from(effects: EnabledEffects) -> Self {
        match effects {
            EnabledEffects::All => vec!["all".to_string()],
            EnabledEffects::Only(set) => set.iter().map(|k| k.as_str().to_string()).collect(),
        }
    }
}

/// Host-supplied effect configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectConfig {
    pub enabled_effects: EnabledEffects,
    pub intensity: IntensityTier,
    /// Primary palette (empty = rainbow default)
    pub palette: Vec<String>,
    /// Extra colors merged into the palette for trail/rainbow only
    pub extra_palette: Vec<String>,
    /// Soft cap on live particles; spawns past it are dropped. `None` = unbounded.
    pub particle_budget: Option<usize>,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            enabled_effects: EnabledEffects::All,
            intensity: IntensityTier::Medium,
            palette: Vec::new(),
            extra_palette: Vec::new(),
            particle_budget: None,
        }
    }
}

impl EffectConfig {
    /// Config with only the given effects turned on
    pub fn with_effects(kinds: impl IntoIterator<Item = EffectKind>) -> Self {
        Self {
            enabled_effects: EnabledEffects::only(kinds),
            ..Self::default()
        }
    }

    pub fn is_enabled(&self, kind: EffectKind) -> bool {
        self.enabled_effects.contains(kind)
    }

    /// Primary palette, falling back to the rainbow default when empty
    pub fn palette(&self) -> Vec<&str> {
        let colors: Vec<&str> = self
            .palette
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();
        if colors.is_empty() {
            DEFAULT_PALETTE.to_vec()
        } else {
            colors
        }
    }

    /// Primary palette plus `extra_palette` (trail and rainbow colors)
    pub fn combined_palette(&self) -> Vec<&str> {
        let mut colors = self.palette();
        colors.extend(
            self.extra_palette
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty()),
        );
        colors
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
