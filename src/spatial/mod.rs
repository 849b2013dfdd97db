//! Spatial structures: the static occupancy map and its probes.

pub mod occupancy;
