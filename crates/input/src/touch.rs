//! Single-pointer touch drag tracking.
//!
//! The first touch pointer is tracked from press to release; per-frame
//! deltas map linearly to yaw/pitch in the control layer. Deltas reset to
//! zero the moment the pointer lifts.

use glam::Vec2;
use winit::event::{Touch, TouchPhase};

/// Tracks one touch pointer and its frame-to-frame movement.
#[derive(Debug, Default)]
pub struct TouchTracker {
    active: bool,
    /// Pointer id being tracked; other pointers are ignored.
    pointer_id: Option<u64>,
    start: Vec2,
    current: Vec2,
    delta: Vec2,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a winit touch event.
    pub fn process(&mut self, touch: &Touch) {
        let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
        self.process_pointer(touch.id, touch.phase, position);
    }

    /// Process a raw pointer event (id, phase, window position in pixels).
    pub fn process_pointer(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        match phase {
            TouchPhase::Started => {
                if self.pointer_id.is_none() {
                    self.pointer_id = Some(id);
                    self.active = true;
                    self.start = position;
                    self.current = position;
                    self.delta = Vec2::ZERO;
                }
            }
            TouchPhase::Moved => {
                if self.pointer_id == Some(id) {
                    self.delta += position - self.current;
                    self.current = position;
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.pointer_id == Some(id) {
                    self.pointer_id = None;
                    self.active = false;
                    self.delta = Vec2::ZERO;
                }
            }
        }
    }

    /// Take the accumulated drag delta for this frame (pixels).
    /// Returns zero while no drag is active.
    pub fn take_delta(&mut self) -> Vec2 {
        let delta = self.delta;
        self.delta = Vec2::ZERO;
        delta
    }

    /// Whether a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Position where the current drag started.
    pub fn start_position(&self) -> Vec2 {
        self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_accumulates_delta() {
        let mut tracker = TouchTracker::new();
        tracker.process_pointer(1, TouchPhase::Started, Vec2::new(100.0, 100.0));
        assert!(tracker.is_active());
        tracker.process_pointer(1, TouchPhase::Moved, Vec2::new(110.0, 95.0));
        tracker.process_pointer(1, TouchPhase::Moved, Vec2::new(115.0, 95.0));
        let delta = tracker.take_delta();
        assert_eq!(delta, Vec2::new(15.0, -5.0));
        // Taking the delta drains it.
        assert_eq!(tracker.take_delta(), Vec2::ZERO);
    }

    #[test]
    fn release_resets_delta() {
        let mut tracker = TouchTracker::new();
        tracker.process_pointer(1, TouchPhase::Started, Vec2::ZERO);
        tracker.process_pointer(1, TouchPhase::Moved, Vec2::new(50.0, 0.0));
        tracker.process_pointer(1, TouchPhase::Ended, Vec2::new(50.0, 0.0));
        assert!(!tracker.is_active());
        assert_eq!(tracker.take_delta(), Vec2::ZERO);
    }

    #[test]
    fn second_pointer_is_ignored() {
        let mut tracker = TouchTracker::new();
        tracker.process_pointer(1, TouchPhase::Started, Vec2::ZERO);
        tracker.process_pointer(2, TouchPhase::Started, Vec2::new(500.0, 500.0));
        tracker.process_pointer(2, TouchPhase::Moved, Vec2::new(600.0, 500.0));
        assert_eq!(tracker.take_delta(), Vec2::ZERO);
        tracker.process_pointer(1, TouchPhase::Moved, Vec2::new(10.0, 0.0));
        assert_eq!(tracker.take_delta(), Vec2::new(10.0, 0.0));
    }
}
