//! Control mapping: keyboard table, touch drag, and on-screen tap targets.
//!
//! Keyboard movement is per-keystroke, not time-integrated: each delivered
//! keypress (including OS key repeat) steps the pose by a fixed amount and
//! emits a full replacement pose.

use engine_core::Pose;
use glam::Vec2;
use input::KeyCode;

use crate::state::{GameState, StatePatch};

/// Translation step per keystroke, world units.
pub const POSITION_STEP: f32 = 2.0;
/// Rotation step per keystroke, radians.
pub const ROTATION_STEP: f32 = 0.1;
/// Touch drag to rotation, radians per pixel.
pub const TOUCH_LOOK_RATE: f32 = 0.01;
/// Cloak intensity applied when the cloak toggles on.
pub const CLOAK_ON_INTENSITY: f32 = 0.8;
/// Thrust level restored when plasma toggles on.
pub const PLASMA_ON_THRUST: f32 = 1.0;

/// Map one keystroke to a state patch. Returns `None` for unbound keys.
pub fn patch_for_key(state: &GameState, key: KeyCode) -> Option<StatePatch> {
    let pose = state.pose();
    let mut position = pose.position;
    let mut rotation = pose.rotation;

    let moved = match key {
        KeyCode::KeyW | KeyCode::ArrowUp => {
            position.z -= POSITION_STEP;
            true
        }
        KeyCode::KeyS | KeyCode::ArrowDown => {
            position.z += POSITION_STEP;
            true
        }
        KeyCode::KeyA | KeyCode::ArrowLeft => {
            rotation.y += ROTATION_STEP;
            true
        }
        KeyCode::KeyD | KeyCode::ArrowRight => {
            rotation.y -= ROTATION_STEP;
            true
        }
        KeyCode::KeyQ => {
            rotation.z += ROTATION_STEP;
            true
        }
        KeyCode::KeyE => {
            rotation.z -= ROTATION_STEP;
            true
        }
        KeyCode::ShiftLeft | KeyCode::ShiftRight => {
            position.y += POSITION_STEP;
            true
        }
        KeyCode::ControlLeft | KeyCode::ControlRight => {
            position.y -= POSITION_STEP;
            true
        }
        _ => false,
    };
    if moved {
        return Some(StatePatch {
            spacecraft: Some(Pose::new(position, rotation)),
            ..Default::default()
        });
    }

    match key {
        KeyCode::Space => Some(StatePatch {
            hover_mode: Some(!state.hover_mode),
            ..Default::default()
        }),
        KeyCode::KeyF => Some(toggle_cloak(state)),
        KeyCode::KeyP => Some(toggle_plasma(state)),
        KeyCode::KeyR => Some(reset_pose()),
        KeyCode::Tab => Some(StatePatch {
            sensor_mode: Some(state.sensor_mode.cycle()),
            ..Default::default()
        }),
        _ => None,
    }
}

/// Cloak toggle: on sets intensity to 0.8, off drops it to 0.
pub fn toggle_cloak(state: &GameState) -> StatePatch {
    let activating = !state.cloaking_active;
    StatePatch {
        cloaking_active: Some(activating),
        cloaking_intensity: Some(if activating { CLOAK_ON_INTENSITY } else { 0.0 }),
        ..Default::default()
    }
}

/// Plasma toggle: on restores thrust 1.0, off drops it to 0.
pub fn toggle_plasma(state: &GameState) -> StatePatch {
    let activating = !state.plasma_active;
    StatePatch {
        plasma_active: Some(activating),
        thrust_level: Some(if activating { PLASMA_ON_THRUST } else { 0.0 }),
        ..Default::default()
    }
}

/// Reset: origin pose, zero velocity.
pub fn reset_pose() -> StatePatch {
    StatePatch {
        spacecraft: Some(Pose::default()),
        velocity: Some(0.0),
        ..Default::default()
    }
}

/// Map a touch drag delta (pixels) to a yaw/pitch rotation patch.
pub fn patch_for_touch_drag(
    state: &GameState,
    delta: Vec2,
    sensitivity: f32,
) -> Option<StatePatch> {
    if delta == Vec2::ZERO {
        return None;
    }
    let pose = state.pose();
    let mut rotation = pose.rotation;
    rotation.y += delta.x * TOUCH_LOOK_RATE * sensitivity;
    rotation.x += delta.y * TOUCH_LOOK_RATE * sensitivity;
    Some(StatePatch {
        spacecraft: Some(Pose::new(pose.position, rotation)),
        ..Default::default()
    })
}

/// On-screen tap target actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    ToggleCloak,
    TogglePlasma,
    ResetPose,
}

/// A circular on-screen control.
#[derive(Debug, Clone, Copy)]
pub struct TapTarget {
    pub action: TapAction,
    pub center: Vec2,
    pub radius: f32,
}

/// Tap target radius in pixels.
pub const TAP_RADIUS: f32 = 24.0;

/// The cloak / plasma / reset buttons stacked at the lower right; the
/// HUD draws circles at exactly these spots.
pub fn tap_targets(screen_w: f32, screen_h: f32) -> [TapTarget; 3] {
    let x = screen_w - 48.0;
    [
        TapTarget {
            action: TapAction::ToggleCloak,
            center: Vec2::new(x, screen_h - 176.0),
            radius: TAP_RADIUS,
        },
        TapTarget {
            action: TapAction::TogglePlasma,
            center: Vec2::new(x, screen_h - 116.0),
            radius: TAP_RADIUS,
        },
        TapTarget {
            action: TapAction::ResetPose,
            center: Vec2::new(x, screen_h - 56.0),
            radius: TAP_RADIUS,
        },
    ]
}

/// Which tap target, if any, contains `point`.
pub fn hit_test(targets: &[TapTarget], point: Vec2) -> Option<TapAction> {
    targets
        .iter()
        .find(|t| point.distance(t.center) <= t.radius)
        .map(|t| t.action)
}

/// Patch for a tapped on-screen control.
pub fn patch_for_tap(state: &GameState, action: TapAction) -> StatePatch {
    match action {
        TapAction::ToggleCloak => toggle_cloak(state),
        TapAction::TogglePlasma => toggle_plasma(state),
        TapAction::ResetPose => reset_pose(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SensorMode;
    use glam::Vec3;

    fn apply_key(state: &mut GameState, key: KeyCode) {
        if let Some(patch) = patch_for_key(state, key) {
            state.apply(patch);
        }
    }

    #[test]
    fn movement_table_steps() {
        let mut state = GameState::default();
        apply_key(&mut state, KeyCode::KeyW);
        assert_eq!(state.pose().position.z, -2.0);
        apply_key(&mut state, KeyCode::ArrowDown);
        assert_eq!(state.pose().position.z, 0.0);
        apply_key(&mut state, KeyCode::ShiftLeft);
        assert_eq!(state.pose().position.y, 2.0);
        apply_key(&mut state, KeyCode::ControlLeft);
        assert_eq!(state.pose().position.y, 0.0);
        apply_key(&mut state, KeyCode::KeyA);
        assert!((state.pose().rotation.y - 0.1).abs() < 1e-6);
        apply_key(&mut state, KeyCode::KeyQ);
        assert!((state.pose().rotation.z - 0.1).abs() < 1e-6);
        apply_key(&mut state, KeyCode::KeyE);
        assert!(state.pose().rotation.z.abs() < 1e-6);
    }

    /// Cloak toggle literals: false -> true sets 0.8, true -> false sets 0.
    #[test]
    fn cloak_toggle_intensity_literals() {
        let mut state = GameState::default();
        apply_key(&mut state, KeyCode::KeyF);
        assert!(state.cloaking_active);
        assert_eq!(state.cloaking_intensity, 0.8);
        apply_key(&mut state, KeyCode::KeyF);
        assert!(!state.cloaking_active);
        assert_eq!(state.cloaking_intensity, 0.0);
    }

    /// Plasma off then on restores thrust to exactly 1.0.
    #[test]
    fn plasma_toggle_restores_thrust() {
        let mut state = GameState::default();
        assert!(state.plasma_active);
        apply_key(&mut state, KeyCode::KeyP);
        assert!(!state.plasma_active);
        assert_eq!(state.thrust_level, 0.0);
        apply_key(&mut state, KeyCode::KeyP);
        assert!(state.plasma_active);
        assert_eq!(state.thrust_level, 1.0);
    }

    /// Reset control zeroes position, rotation, and velocity.
    #[test]
    fn reset_zeroes_pose_and_velocity() {
        let mut state = GameState::default();
        state.apply(StatePatch {
            spacecraft: Some(engine_core::Pose::new(
                Vec3::new(10.0, -4.0, 8.0),
                Vec3::new(0.5, 1.0, -0.3),
            )),
            velocity: Some(33.0),
            ..Default::default()
        });
        apply_key(&mut state, KeyCode::KeyR);
        assert_eq!(state.pose().position, Vec3::ZERO);
        assert_eq!(state.pose().rotation, Vec3::ZERO);
        assert_eq!(state.velocity, 0.0);
    }

    /// Tab alternates strictly radar/thermal, never quantum.
    #[test]
    fn tab_cycles_two_sensor_modes() {
        let mut state = GameState::default();
        let mut seen = Vec::new();
        for _ in 0..6 {
            apply_key(&mut state, KeyCode::Tab);
            seen.push(state.sensor_mode);
        }
        assert!(seen.iter().all(|m| *m != SensorMode::Quantum));
        assert_eq!(seen[0], SensorMode::Thermal);
        assert_eq!(seen[1], SensorMode::Radar);
    }

    #[test]
    fn unbound_key_produces_no_patch() {
        let state = GameState::default();
        assert!(patch_for_key(&state, KeyCode::KeyZ).is_none());
    }

    #[test]
    fn touch_drag_maps_linearly() {
        let state = GameState::default();
        let patch = patch_for_touch_drag(&state, Vec2::new(30.0, -10.0), 1.0).unwrap();
        let pose = patch.spacecraft.unwrap();
        assert!((pose.rotation.y - 0.3).abs() < 1e-5);
        assert!((pose.rotation.x + 0.1).abs() < 1e-5);
        // Zero delta maps to no patch at all.
        assert!(patch_for_touch_drag(&state, Vec2::ZERO, 1.0).is_none());
    }

    #[test]
    fn tap_targets_hit_test() {
        let targets = tap_targets(800.0, 600.0);
        let cloak = targets[0];
        assert_eq!(
            hit_test(&targets, cloak.center),
            Some(TapAction::ToggleCloak)
        );
        assert_eq!(hit_test(&targets, Vec2::new(10.0, 10.0)), None);

        let mut state = GameState::default();
        state.apply(patch_for_tap(&state, TapAction::TogglePlasma));
        assert!(!state.plasma_active);
        assert_eq!(state.thrust_level, 0.0);
    }
}
