//! TOML scenario files describing a headless session.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use shadow_gate_core::{
    balance::{STARTING_LIVES, STARTING_MANA},
    DefenderKind, Layout, SlotId, Vec2,
};
use shadow_gate_world::Config;

const DEFAULT_WAVES: u32 = 3;

/// Session description loaded from disk.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    #[serde(default = "default_waves")]
    pub(crate) waves: u32,
    #[serde(default)]
    layout: Option<LayoutSpec>,
    #[serde(default)]
    starting_mana: Option<f32>,
    #[serde(default)]
    starting_lives: Option<u32>,
    #[serde(default)]
    build: Vec<BuildOrder>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutSpec {
    path: Vec<[f32; 2]>,
    #[serde(default)]
    slots: Vec<[f32; 2]>,
}

/// Placement attempted once the treasury can cover it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BuildOrder {
    pub(crate) slot: u32,
    pub(crate) kind: DefenderKind,
}

impl BuildOrder {
    pub(crate) const fn slot_id(&self) -> SlotId {
        SlotId::new(self.slot)
    }
}

fn default_waves() -> u32 {
    DEFAULT_WAVES
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            waves: DEFAULT_WAVES,
            layout: None,
            starting_mana: None,
            starting_lives: None,
            build: vec![
                BuildOrder {
                    slot: 0,
                    kind: DefenderKind::Melee,
                },
                BuildOrder {
                    slot: 1,
                    kind: DefenderKind::Ranged,
                },
            ],
        }
    }
}

impl Scenario {
    /// Reads and parses the scenario stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario at {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid scenario in {}", path.display()))
    }

    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse scenario toml contents")
    }

    /// Placements in the order they should be attempted.
    pub(crate) fn build_orders(&self) -> &[BuildOrder] {
        &self.build
    }

    /// Builds the world configuration, validating any custom layout.
    pub(crate) fn world_config(&self) -> Result<Config> {
        let layout = match &self.layout {
            Some(custom) => Layout::new(points(&custom.path), points(&custom.slots))
                .context("scenario layout is invalid")?,
            None => Layout::default(),
        };

        Ok(Config::new(
            layout,
            self.starting_mana.unwrap_or(STARTING_MANA),
            self.starting_lives.unwrap_or(STARTING_LIVES),
        ))
    }
}

fn points(raw: &[[f32; 2]]) -> Vec<Vec2> {
    raw.iter().copied().map(Vec2::from_array).collect()
}
