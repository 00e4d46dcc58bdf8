//! Adaptive rendering quality: frame-time sampling and quality levels 1-4.

use std::time::Duration;

/// Lowest quality level.
pub const MIN_LEVEL: u8 = 1;
/// Highest quality level.
pub const MAX_LEVEL: u8 = 4;

/// Frames per sampling batch.
const BATCH_SIZE: u32 = 60;
/// Mean frame time above this (sub-30fps) drops the level.
const SLOW_FRAME_MS: f32 = 33.0;
/// Mean frame time below this (over-70fps) raises the level.
const FAST_FRAME_MS: f32 = 14.0;

/// Clamp an arbitrary level to the valid [1, 4] range.
pub fn clamp_level(level: u8) -> u8 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Monitors frame timing in batches of 60 and derives a quality level.
///
/// No hysteresis band beyond the batching and no smoothing filter; a
/// workload that sits right at a threshold can oscillate between levels
/// once per batch.
#[derive(Debug)]
pub struct PerformanceMonitor {
    level: u8,
    frame_count: u32,
    total_frame_ms: f32,
    /// Mean frame time of the last completed batch, in milliseconds.
    frame_time_ms: f32,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self {
            level: MAX_LEVEL,
            frame_count: 0,
            total_frame_ms: 0.0,
            frame_time_ms: 1000.0 / 60.0,
        }
    }

    /// Seed the starting level from a device capability probe.
    pub fn with_probe(probe: &CapabilityProbe) -> Self {
        let mut monitor = Self::new();
        monitor.level = probe.score();
        log::info!(
            "Capability probe: {:?} -> quality level {}",
            probe,
            monitor.level
        );
        monitor
    }

    /// Record one frame. Every 60 frames the mean frame time is evaluated
    /// and the level steps down (mean > 33 ms) or up (mean < 14 ms).
    pub fn record_frame(&mut self, delta: Duration) {
        self.total_frame_ms += delta.as_secs_f32() * 1000.0;
        self.frame_count += 1;

        if self.frame_count >= BATCH_SIZE {
            let avg = self.total_frame_ms / self.frame_count as f32;
            self.frame_time_ms = avg;

            if avg > SLOW_FRAME_MS {
                let next = clamp_level(self.level.saturating_sub(1));
                if next != self.level {
                    log::info!("Frame time {:.1} ms, lowering quality to {}", avg, next);
                }
                self.level = next;
            } else if avg < FAST_FRAME_MS {
                let next = clamp_level(self.level + 1);
                if next != self.level {
                    log::info!("Frame time {:.1} ms, raising quality to {}", avg, next);
                }
                self.level = next;
            }

            self.frame_count = 0;
            self.total_frame_ms = 0.0;
        }
    }

    /// Current quality level in [1, 4].
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Mean frame time of the last completed batch, in milliseconds.
    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }

    /// Override the level directly (clamped).
    pub fn set_level(&mut self, level: u8) {
        self.level = clamp_level(level);
    }
}

/// One-time device capability probe taken at startup.
#[derive(Debug, Clone)]
pub struct CapabilityProbe {
    /// GPU renderer/adapter name as reported by the backend.
    pub adapter_name: String,
    /// Logical core count.
    pub logical_cores: usize,
    /// Window scale factor (HiDPI displays render more pixels).
    pub scale_factor: f64,
}

impl CapabilityProbe {
    pub fn new(adapter_name: impl Into<String>, scale_factor: f64) -> Self {
        Self {
            adapter_name: adapter_name.into(),
            logical_cores: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            scale_factor,
        }
    }

    /// Heuristic score: base 2, +1 for many cores, +1 for a discrete GPU
    /// name, +1 for a non-HiDPI display. Clamped to [1, 4].
    pub fn score(&self) -> u8 {
        let mut score: u8 = 2;
        if self.logical_cores >= 8 {
            score += 1;
        }
        if self.adapter_name.contains("RTX") || self.adapter_name.contains("RX") {
            score += 1;
        }
        if self.scale_factor <= 1.0 {
            score += 1;
        }
        clamp_level(score)
    }
}

/// Concrete render settings derived from a quality level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualitySettings {
    pub star_count: u32,
    pub shadow_map_size: u32,
    pub shadows_enabled: bool,
    pub plasma_particles: u32,
    pub atmosphere_particles: u32,
    pub post_processing: bool,
    pub volumetric_glow: bool,
    pub terrain_wireframe: bool,
}

impl QualitySettings {
    pub fn for_level(level: u8) -> Self {
        let level = clamp_level(level);
        Self {
            star_count: if level > 3 {
                5000
            } else if level > 2 {
                3000
            } else {
                1500
            },
            shadow_map_size: if level > 3 {
                2048
            } else if level > 2 {
                1024
            } else {
                512
            },
            shadows_enabled: level > 2,
            plasma_particles: if level > 3 {
                2000
            } else if level > 2 {
                1000
            } else {
                500
            },
            atmosphere_particles: if level > 3 {
                1000
            } else if level >= 2 {
                500
            } else {
                0
            },
            post_processing: level > 2,
            volumetric_glow: level > 3,
            terrain_wireframe: level < 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(monitor: &mut PerformanceMonitor, count: u32, ms: f32) {
        for _ in 0..count {
            monitor.record_frame(Duration::from_secs_f32(ms / 1000.0));
        }
    }

    #[test]
    fn level_is_clamped() {
        assert_eq!(clamp_level(0), 1);
        assert_eq!(clamp_level(200), 4);
        let mut monitor = PerformanceMonitor::new();
        monitor.set_level(0);
        assert_eq!(monitor.level(), 1);
        monitor.set_level(9);
        assert_eq!(monitor.level(), 4);
    }

    #[test]
    fn slow_batch_drops_level() {
        let mut monitor = PerformanceMonitor::new();
        assert_eq!(monitor.level(), 4);
        frames(&mut monitor, 60, 40.0);
        assert_eq!(monitor.level(), 3);
        // Level never falls below the floor, however slow the frames.
        frames(&mut monitor, 300, 100.0);
        assert_eq!(monitor.level(), 1);
    }

    #[test]
    fn fast_batch_raises_level() {
        let mut monitor = PerformanceMonitor::new();
        monitor.set_level(2);
        frames(&mut monitor, 60, 8.0);
        assert_eq!(monitor.level(), 3);
        frames(&mut monitor, 120, 8.0);
        assert_eq!(monitor.level(), 4);
    }

    #[test]
    fn mid_band_holds_level() {
        let mut monitor = PerformanceMonitor::new();
        monitor.set_level(3);
        frames(&mut monitor, 240, 20.0);
        assert_eq!(monitor.level(), 3);
    }

    #[test]
    fn no_adjustment_before_full_batch() {
        let mut monitor = PerformanceMonitor::new();
        frames(&mut monitor, 59, 100.0);
        assert_eq!(monitor.level(), 4);
    }

    #[test]
    fn probe_score_bounds() {
        let weak = CapabilityProbe {
            adapter_name: "llvmpipe".into(),
            logical_cores: 2,
            scale_factor: 2.0,
        };
        assert_eq!(weak.score(), 2);

        let strong = CapabilityProbe {
            adapter_name: "NVIDIA GeForce RTX 4080".into(),
            logical_cores: 16,
            scale_factor: 1.0,
        };
        assert_eq!(strong.score(), 4);
    }

    #[test]
    fn quality_tables_per_level() {
        let low = QualitySettings::for_level(1);
        assert_eq!(low.star_count, 1500);
        assert!(!low.shadows_enabled);
        assert_eq!(low.atmosphere_particles, 0);
        assert!(low.terrain_wireframe);

        let high = QualitySettings::for_level(4);
        assert_eq!(high.star_count, 5000);
        assert_eq!(high.shadow_map_size, 2048);
        assert_eq!(high.plasma_particles, 2000);
        assert!(high.shadows_enabled && high.volumetric_glow);
    }
}
