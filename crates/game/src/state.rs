//! Game state record, patches, and the shallow-merge reducer.

use engine_core::Pose;
use procgen::TerrainKind;

/// High-level application mode carried in the state record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Menu,
    Flight,
    Mission,
}

/// Mission selection: drives terrain generation and scene dressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionType {
    Reconnaissance,
    DeepSpace,
    ElectronicWarfare,
}

impl MissionType {
    pub const ALL: [MissionType; 3] = [
        MissionType::Reconnaissance,
        MissionType::DeepSpace,
        MissionType::ElectronicWarfare,
    ];

    pub fn terrain_kind(&self) -> TerrainKind {
        match self {
            MissionType::Reconnaissance => TerrainKind::Urban,
            MissionType::DeepSpace => TerrainKind::DeepSpace,
            MissionType::ElectronicWarfare => TerrainKind::Mountain,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MissionType::Reconnaissance => "Urban Reconnaissance",
            MissionType::DeepSpace => "Deep Space Mission",
            MissionType::ElectronicWarfare => "Electronic Warfare",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MissionType::Reconnaissance => {
                "Covert surveillance of metropolitan areas using advanced cloaking"
            }
            MissionType::DeepSpace => {
                "Investigate anomalies in the asteroid belt and Jovian system"
            }
            MissionType::ElectronicWarfare => {
                "Tactical operations with advanced countermeasures"
            }
        }
    }

    pub fn difficulty(&self) -> &'static str {
        match self {
            MissionType::Reconnaissance => "Moderate",
            MissionType::DeepSpace => "Advanced",
            MissionType::ElectronicWarfare => "Expert",
        }
    }

    pub fn duration(&self) -> &'static str {
        match self {
            MissionType::Reconnaissance => "15-25 min",
            MissionType::DeepSpace => "30-45 min",
            MissionType::ElectronicWarfare => "20-35 min",
        }
    }

    /// HUD label (upper-case mission name).
    pub fn hud_label(&self) -> &'static str {
        match self {
            MissionType::Reconnaissance => "RECONNAISSANCE",
            MissionType::DeepSpace => "DEEP SPACE",
            MissionType::ElectronicWarfare => "ELECTRONIC WARFARE",
        }
    }
}

/// Sensor suite mode. `Quantum` is declared but the mode key only cycles
/// between `Radar` and `Thermal`; the third value stays unreachable from
/// that control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorMode {
    Radar,
    Thermal,
    Quantum,
}

impl SensorMode {
    /// The Tab cycle: Radar <-> Thermal. A hypothetical Quantum value
    /// falls back to Radar, matching the two-valued mutator.
    pub fn cycle(self) -> Self {
        match self {
            SensorMode::Radar => SensorMode::Thermal,
            SensorMode::Thermal | SensorMode::Quantum => SensorMode::Radar,
        }
    }

    pub fn hud_label(&self) -> &'static str {
        match self {
            SensorMode::Radar => "RADAR",
            SensorMode::Thermal => "THERMAL",
            SensorMode::Quantum => "QUANTUM",
        }
    }
}

/// The single mutable game record. Created once with fixed defaults and
/// only ever changed through [`GameState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Spacecraft pose; `None` means "no spacecraft yet". Reads go
    /// through [`GameState::pose`], the one defaulting site.
    pub spacecraft: Option<Pose>,
    pub velocity: f32,
    pub cloaking_active: bool,
    /// Meaningful only while cloaking is active.
    pub cloaking_intensity: f32,
    pub plasma_active: bool,
    pub thrust_level: f32,
    pub power_level: f32,
    pub hover_mode: bool,
    pub mission_active: bool,
    pub mission_type: MissionType,
    pub sensor_mode: SensorMode,
    pub game_mode: GameMode,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            spacecraft: Some(Pose::default()),
            velocity: 0.0,
            cloaking_active: false,
            cloaking_intensity: 0.0,
            plasma_active: true,
            thrust_level: 1.0,
            power_level: 100.0,
            hover_mode: false,
            mission_active: false,
            mission_type: MissionType::Reconnaissance,
            sensor_mode: SensorMode::Radar,
            game_mode: GameMode::Menu,
        }
    }
}

impl GameState {
    /// The spacecraft pose, defaulting to the origin when unset.
    pub fn pose(&self) -> Pose {
        self.spacecraft.unwrap_or_default()
    }

    /// Shallow-merge `patch` into the record: every present field
    /// replaces the current value, absent fields are untouched. The
    /// nested pose is replaced wholesale, never merged per-field.
    pub fn apply(&mut self, patch: StatePatch) {
        if let Some(pose) = patch.spacecraft {
            self.spacecraft = Some(pose);
        }
        if let Some(velocity) = patch.velocity {
            self.velocity = velocity;
        }
        if let Some(active) = patch.cloaking_active {
            self.cloaking_active = active;
        }
        if let Some(intensity) = patch.cloaking_intensity {
            self.cloaking_intensity = intensity;
        }
        if let Some(active) = patch.plasma_active {
            self.plasma_active = active;
        }
        if let Some(thrust) = patch.thrust_level {
            self.thrust_level = thrust;
        }
        if let Some(power) = patch.power_level {
            self.power_level = power;
        }
        if let Some(hover) = patch.hover_mode {
            self.hover_mode = hover;
        }
        if let Some(active) = patch.mission_active {
            self.mission_active = active;
        }
        if let Some(mission) = patch.mission_type {
            self.mission_type = mission;
        }
        if let Some(sensor) = patch.sensor_mode {
            self.sensor_mode = sensor;
        }
        if let Some(mode) = patch.game_mode {
            self.game_mode = mode;
        }
    }
}

/// A shallow patch: `Some` fields overwrite, `None` fields leave the
/// record unchanged. No validation, no versioning, no undo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch {
    pub spacecraft: Option<Pose>,
    pub velocity: Option<f32>,
    pub cloaking_active: Option<bool>,
    pub cloaking_intensity: Option<f32>,
    pub plasma_active: Option<bool>,
    pub thrust_level: Option<f32>,
    pub power_level: Option<f32>,
    pub hover_mode: Option<bool>,
    pub mission_active: Option<bool>,
    pub mission_type: Option<MissionType>,
    pub sensor_mode: Option<SensorMode>,
    pub game_mode: Option<GameMode>,
}

impl StatePatch {
    pub fn is_empty(&self) -> bool {
        *self == StatePatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn defaults_match_session_start() {
        let state = GameState::default();
        assert_eq!(state.pose(), Pose::default());
        assert_eq!(state.velocity, 0.0);
        assert!(!state.cloaking_active);
        assert_eq!(state.cloaking_intensity, 0.0);
        assert!(state.plasma_active);
        assert_eq!(state.thrust_level, 1.0);
        assert_eq!(state.power_level, 100.0);
        assert_eq!(state.mission_type, MissionType::Reconnaissance);
        assert_eq!(state.sensor_mode, SensorMode::Radar);
        assert_eq!(state.game_mode, GameMode::Menu);
    }

    /// Shallow-merge law: every key in the patch takes its value, every
    /// absent key is unchanged.
    #[test]
    fn apply_is_a_shallow_merge() {
        let mut state = GameState::default();
        let before = state.clone();

        state.apply(StatePatch {
            velocity: Some(42.0),
            hover_mode: Some(true),
            ..Default::default()
        });

        assert_eq!(state.velocity, 42.0);
        assert!(state.hover_mode);
        // Everything absent from the patch is untouched.
        assert_eq!(state.spacecraft, before.spacecraft);
        assert_eq!(state.cloaking_active, before.cloaking_active);
        assert_eq!(state.plasma_active, before.plasma_active);
        assert_eq!(state.thrust_level, before.thrust_level);
        assert_eq!(state.mission_type, before.mission_type);
        assert_eq!(state.game_mode, before.game_mode);
    }

    /// The nested pose is replaced wholesale, not merged per-field.
    #[test]
    fn pose_patch_replaces_wholesale() {
        let mut state = GameState::default();
        state.apply(StatePatch {
            spacecraft: Some(Pose::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3))),
            ..Default::default()
        });
        state.apply(StatePatch {
            spacecraft: Some(Pose::new(Vec3::new(9.0, 0.0, 0.0), Vec3::ZERO)),
            ..Default::default()
        });
        let pose = state.pose();
        assert_eq!(pose.position, Vec3::new(9.0, 0.0, 0.0));
        // Rotation came along with the replacement, not from the old pose.
        assert_eq!(pose.rotation, Vec3::ZERO);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut state = GameState::default();
        let before = state.clone();
        state.apply(StatePatch::default());
        assert_eq!(state, before);
    }

    /// Tab alternates strictly Radar <-> Thermal; Quantum is never
    /// reached through the cycle.
    #[test]
    fn sensor_cycle_is_two_valued() {
        let mut mode = SensorMode::Radar;
        for _ in 0..10 {
            mode = mode.cycle();
            assert_ne!(mode, SensorMode::Quantum);
        }
        assert_eq!(SensorMode::Radar.cycle(), SensorMode::Thermal);
        assert_eq!(SensorMode::Thermal.cycle(), SensorMode::Radar);
        // Even a hand-set Quantum drops back into the two-cycle.
        assert_eq!(SensorMode::Quantum.cycle(), SensorMode::Radar);
    }

    #[test]
    fn mission_terrain_mapping() {
        assert_eq!(
            MissionType::Reconnaissance.terrain_kind(),
            TerrainKind::Urban
        );
        assert_eq!(MissionType::DeepSpace.terrain_kind(), TerrainKind::DeepSpace);
        assert_eq!(
            MissionType::ElectronicWarfare.terrain_kind(),
            TerrainKind::Mountain
        );
    }
}
