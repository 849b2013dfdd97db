//! Core building blocks shared by every layer: geometry, errors, diagnostics.

// Safety macros are exported first so the spatial layer can use them.
#[macro_use]
pub mod utils;
pub mod diagnostics;
pub mod error;
pub mod rect;
