//! Public host bindings.

pub mod wasm;
