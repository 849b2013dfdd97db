use thiserror::Error;

/// Construction failures. A world that fails here never renders or ticks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("world width or height is undefined; both must be positive numbers")]
    MissingDimensions,
    #[error("world dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
    #[error("no frame rate defined for the world")]
    MissingFrameRate,
    #[error("frame rate must be a positive number of milliseconds")]
    ZeroFrameRate,
    #[error("invalid world config: {0}")]
    Config(String),
}

/// Reasons a body registration is rejected. The world is left unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    #[error("body is missing a 'name' attribute")]
    MissingName,
    #[error("a body named '{0}' already exists")]
    DuplicateName(String),
    #[error("{name}.{field} can not be fractional")]
    Fractional { name: String, field: &'static str },
    #[error("{name}.{field} can not be negative; make the world larger than the screen to support offscreen bodies")]
    Negative { name: String, field: &'static str },
    #[error("{name} total {axis} can not exceed the bounds of the world")]
    OutOfBounds { name: String, axis: &'static str },
    #[error("{name}.velocity.{field} can not be fractional")]
    FractionalVelocity { name: String, field: &'static str },
    #[error("invalid body spec: {0}")]
    Spec(String),
}
