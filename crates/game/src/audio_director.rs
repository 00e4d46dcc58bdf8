//! Edge-triggered audio direction: state transitions become cues.
//!
//! The director never touches the audio backend itself; it derives cues
//! from flag transitions so the mapping is testable without a device.

use engine_core::EdgeTrigger;

use crate::state::GameState;

/// Registered sound names.
pub const SOUND_AMBIENT: &str = "ambient";
pub const SOUND_PLASMA_HUM: &str = "plasma_hum";
pub const SOUND_CLOAK_ACTIVATE: &str = "cloak_activate";
pub const SOUND_THRUSTER_BOOST: &str = "thruster_boost";

/// A playback request derived from a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// One-shot cloak activation sweep.
    CloakActivate,
    /// Start the looping plasma hum.
    PlasmaHumStart,
    /// Stop the looping plasma hum.
    PlasmaHumStop,
    /// One-shot thruster cue when hover engages.
    ThrusterBoost,
}

/// Watches the cloak / plasma / hover flags and emits cues exactly once
/// per transition.
#[derive(Debug)]
pub struct AudioDirector {
    cloak: EdgeTrigger<bool>,
    plasma: EdgeTrigger<bool>,
    hover: EdgeTrigger<bool>,
}

impl AudioDirector {
    /// Detectors start at `false`, so a session that begins with plasma
    /// active fires the hum-start cue on the first observation.
    pub fn new() -> Self {
        Self {
            cloak: EdgeTrigger::new(false),
            plasma: EdgeTrigger::new(false),
            hover: EdgeTrigger::new(false),
        }
    }

    /// Observe the current state and collect cues for any transitions.
    pub fn cues(&mut self, state: &GameState) -> Vec<AudioCue> {
        let mut cues = Vec::new();

        if let Some(edge) = self.cloak.observe(state.cloaking_active) {
            if edge.rose() {
                cues.push(AudioCue::CloakActivate);
            }
        }

        if let Some(edge) = self.plasma.observe(state.plasma_active) {
            if edge.rose() {
                cues.push(AudioCue::PlasmaHumStart);
            } else {
                cues.push(AudioCue::PlasmaHumStop);
            }
        }

        if let Some(edge) = self.hover.observe(state.hover_mode) {
            if edge.rose() {
                cues.push(AudioCue::ThrusterBoost);
            }
        }

        cues
    }

    /// Naive inverse-distance volume scalar for the plasma hum.
    pub fn hum_volume(state: &GameState) -> f64 {
        let distance = state.pose().position.length();
        (1.0 - distance as f64 * 0.01).max(0.1)
    }
}

impl Default for AudioDirector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls;
    use glam::Vec3;

    #[test]
    fn session_start_begins_hum() {
        let mut director = AudioDirector::new();
        let state = GameState::default(); // plasma active by default
        let cues = director.cues(&state);
        assert_eq!(cues, vec![AudioCue::PlasmaHumStart]);
        // Observing the same state again is a no-op.
        assert!(director.cues(&state).is_empty());
    }

    /// Plasma is on at session start; toggling off then on restores
    /// thrust 1.0 and fires exactly one hum-start cue for the rising edge.
    #[test]
    fn plasma_off_on_fires_single_start() {
        let mut director = AudioDirector::new();
        let mut state = GameState::default();
        director.cues(&state); // consume the session-start edge

        state.apply(controls::toggle_plasma(&state));
        assert_eq!(director.cues(&state), vec![AudioCue::PlasmaHumStop]);

        state.apply(controls::toggle_plasma(&state));
        assert_eq!(state.thrust_level, 1.0);
        let cues = director.cues(&state);
        assert_eq!(
            cues.iter()
                .filter(|c| **c == AudioCue::PlasmaHumStart)
                .count(),
            1
        );
        // A patch re-asserting the already-set value produces no cue.
        state.apply(crate::state::StatePatch {
            plasma_active: Some(true),
            ..Default::default()
        });
        assert!(director.cues(&state).is_empty());
    }

    #[test]
    fn cloak_cue_only_on_activation() {
        let mut director = AudioDirector::new();
        let mut state = GameState::default();
        director.cues(&state);

        state.apply(controls::toggle_cloak(&state));
        assert_eq!(director.cues(&state), vec![AudioCue::CloakActivate]);

        // Deactivation plays nothing for the cloak.
        state.apply(controls::toggle_cloak(&state));
        assert!(director.cues(&state).is_empty());
    }

    #[test]
    fn hum_volume_inverse_distance() {
        let mut state = GameState::default();
        assert!((AudioDirector::hum_volume(&state) - 1.0).abs() < 1e-9);

        state.apply(crate::state::StatePatch {
            spacecraft: Some(engine_core::Pose::new(
                Vec3::new(0.0, 0.0, 50.0),
                Vec3::ZERO,
            )),
            ..Default::default()
        });
        assert!((AudioDirector::hum_volume(&state) - 0.5).abs() < 1e-6);

        // Far away clamps at the 0.1 floor.
        state.apply(crate::state::StatePatch {
            spacecraft: Some(engine_core::Pose::new(
                Vec3::new(0.0, 0.0, 5000.0),
                Vec3::ZERO,
            )),
            ..Default::default()
        });
        assert_eq!(AudioDirector::hum_volume(&state), 0.1);
    }
}
