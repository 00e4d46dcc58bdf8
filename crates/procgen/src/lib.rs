//! Procedural generation for Project Manta.
//!
//! Everything here is deterministic per seed: terrain heightfields keyed
//! by mission terrain kind, mission scene dressing (city blocks, asteroid
//! fields), and the background star field.

pub mod dressing;
pub mod starfield;
pub mod terrain;

pub use dressing::*;
pub use starfield::*;
pub use terrain::*;
