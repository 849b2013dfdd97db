//! Per-frame systems. Movement and collision resolution for animate bodies.

pub mod motion;
