//! Core engine types and utilities for Project Manta.
//!
//! This crate provides the foundational types used across all systems:
//! - Pose and transform math for the spacecraft and scene objects
//! - Frame timing
//! - Adaptive performance monitoring (quality levels 1-4)
//! - Transition detection for edge-triggered effects

pub mod edge;
pub mod perf;
pub mod pose;
pub mod time;

pub use edge::*;
pub use perf::*;
pub use pose::*;
pub use time::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
