use serde::{Deserialize, Serialize};

use crate::core::diagnostics::Diagnostics;
use crate::core::error::WorldError;

use super::World;

/// Host-provided world parameters. Every field is optional at parse time;
/// `resolve` decides which omissions are fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorldConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Added to every animate body's vertical velocity each tick.
    pub gravity: Option<i32>,
    /// Tick period in milliseconds.
    pub frame_rate: Option<u32>,
}

impl WorldConfig {
    pub fn new(width: u32, height: u32, gravity: i32, frame_rate: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            gravity: Some(gravity),
            frame_rate: Some(frame_rate),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, WorldError> {
        serde_json::from_str(json).map_err(|e| WorldError::Config(e.to_string()))
    }
}

/// Validated, immutable-after-construction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) gravity: i32,
    pub(crate) frame_rate: u32,
}

pub(super) fn resolve(config: &WorldConfig, diagnostics: &dyn Diagnostics) -> Result<Settings, WorldError> {
    let fail = |err: WorldError| {
        diagnostics.error(&format!("Error: {}", err));
        err
    };

    let (width, height) = match (config.width, config.height) {
        (Some(w), Some(h)) => (w, h),
        _ => return Err(fail(WorldError::MissingDimensions)),
    };
    if width == 0 || height == 0 {
        return Err(fail(WorldError::EmptyDimensions { width, height }));
    }

    let gravity = match config.gravity {
        Some(g) => g,
        None => {
            diagnostics.warn("Warning: no gravity defined for the world, using 0");
            0
        }
    };

    let frame_rate = match config.frame_rate {
        Some(0) => return Err(fail(WorldError::ZeroFrameRate)),
        Some(ms) => ms,
        None => return Err(fail(WorldError::MissingFrameRate)),
    };

    Ok(Settings { width, height, gravity, frame_rate })
}

/// Change gravity at runtime. Every registered body picks it up on its next tick.
pub(super) fn set_gravity(world: &mut World, gravity: i32) {
    world.settings.gravity = gravity;
    for body in world.bodies.values_mut() {
        body.gravity = gravity;
    }
}
