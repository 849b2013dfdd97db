//! BodySpec - what a host hands to `World::add_body`
//!
//! Geometry arrives as plain numbers (JSON numbers from a JS host), so it is
//! validated here: integral, non-negative and inside the world.

use serde::Deserialize;

use crate::core::error::SpawnError;
use crate::core::rect::Rect;

use super::body::{BodyKind, Velocity};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocitySpec {
    pub left: f64,
    pub top: f64,
    pub max_left: f64,
    pub max_top: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodySpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: BodyKind,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub velocity: Option<VelocitySpec>,
    #[serde(default)]
    pub active: Option<bool>,
}

fn default_kind() -> BodyKind {
    BodyKind::Animate
}

/// A spec that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidSpec {
    pub(crate) name: String,
    pub(crate) kind: BodyKind,
    pub(crate) rect: Rect,
    pub(crate) velocity: Velocity,
    pub(crate) active: bool,
}

impl BodySpec {
    pub fn new(name: &str, kind: BodyKind, left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            name: Some(name.to_string()),
            kind,
            left: left as f64,
            top: top as f64,
            width: width as f64,
            height: height as f64,
            velocity: None,
            active: None,
        }
    }

    pub fn animate(name: &str, left: i32, top: i32, width: i32, height: i32) -> Self {
        Self::new(name, BodyKind::Animate, left, top, width, height)
    }

    pub fn non_animate(name: &str, left: i32, top: i32, width: i32, height: i32) -> Self {
        Self::new(name, BodyKind::NonAnimate, left, top, width, height)
    }

    pub fn with_velocity(mut self, velocity: Velocity) -> Self {
        self.velocity = Some(VelocitySpec {
            left: velocity.left as f64,
            top: velocity.top as f64,
            max_left: velocity.max_left as f64,
            max_top: velocity.ascent_floor as f64,
        });
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = Some(false);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, SpawnError> {
        serde_json::from_str(json).map_err(|e| SpawnError::Spec(e.to_string()))
    }

    pub(crate) fn validate(&self, world_width: u32, world_height: u32) -> Result<ValidSpec, SpawnError> {
        let name = match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => return Err(SpawnError::MissingName),
        };

        let dims = [
            ("left", self.left),
            ("top", self.top),
            ("width", self.width),
            ("height", self.height),
        ];
        let mut ints = [0i32; 4];
        for (slot, (field, value)) in ints.iter_mut().zip(dims) {
            if !is_integral(value) {
                return Err(SpawnError::Fractional { name, field });
            }
            if value < 0.0 {
                return Err(SpawnError::Negative { name, field });
            }
            *slot = value as i32;
        }
        let [left, top, width, height] = ints.map(i64::from);
        if left + width > world_width as i64 {
            return Err(SpawnError::OutOfBounds { name, axis: "width" });
        }
        if top + height > world_height as i64 {
            return Err(SpawnError::OutOfBounds { name, axis: "height" });
        }
        let rect = Rect::new(ints[0], ints[1], ints[2], ints[3]);

        let velocity = match self.velocity {
            None => Velocity::default(),
            Some(v) => {
                let fields = [
                    ("left", v.left),
                    ("top", v.top),
                    ("maxLeft", v.max_left),
                    ("maxTop", v.max_top),
                ];
                for (field, value) in fields {
                    if !is_integral(value) {
                        return Err(SpawnError::FractionalVelocity { name, field });
                    }
                }
                Velocity::new(v.left as i32, v.top as i32, v.max_left as i32, v.max_top as i32)
            }
        };

        Ok(ValidSpec {
            name,
            kind: self.kind,
            rect,
            velocity,
            active: self.active.unwrap_or(true),
        })
    }
}

/// Whole number that also fits an `i32` cell coordinate.
fn is_integral(value: f64) -> bool {
    value.is_finite()
        && value.fract() == 0.0
        && value >= i32::MIN as f64
        && value <= i32::MAX as f64
}
