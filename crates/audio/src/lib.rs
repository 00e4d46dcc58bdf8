//! Audio system using Kira: looped and one-shot playback of embedded
//! placeholder tones. No asset files; every cue is synthesised at startup.

pub mod tone;

use anyhow::Result;
use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    sound::PlaybackState,
    tween::Tween,
};
use std::collections::HashMap;
use std::io::Cursor;

use tone::ToneSpec;

/// Main audio system managing registered sounds and live handles.
pub struct AudioSystem {
    manager: AudioManager,
    sounds: HashMap<String, StaticSoundData>,
    /// Named loops currently playing (plasma hum, ambient bed).
    loops: HashMap<String, StaticSoundHandle>,
    /// Fire-and-forget one-shots, drained once stopped.
    one_shots: Vec<StaticSoundHandle>,
}

impl AudioSystem {
    /// Create a new audio system on the default backend.
    pub fn new() -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())?;
        Ok(Self {
            manager,
            sounds: HashMap::new(),
            loops: HashMap::new(),
            one_shots: Vec::new(),
        })
    }

    /// Synthesise and register a placeholder tone under `name`.
    pub fn register_tone(&mut self, name: &str, spec: ToneSpec) -> Result<()> {
        let wav = tone::render_wav(spec);
        let sound_data = StaticSoundData::from_cursor(Cursor::new(wav))?;
        self.sounds.insert(name.to_string(), sound_data);
        Ok(())
    }

    /// Play a registered sound once at the given volume.
    pub fn play(&mut self, name: &str, volume: f64) -> Result<()> {
        if let Some(sound_data) = self.sounds.get(name) {
            let settings = StaticSoundSettings::new().volume(volume);
            let handle = self.manager.play(sound_data.clone().with_settings(settings))?;
            self.one_shots.push(handle);
        } else {
            log::warn!("Unknown sound cue: {}", name);
        }
        Ok(())
    }

    /// Start a registered sound looping under its name. Restarting an
    /// already-running loop is a no-op.
    pub fn start_loop(&mut self, name: &str, volume: f64) -> Result<()> {
        if self.is_looping(name) {
            return Ok(());
        }
        if let Some(sound_data) = self.sounds.get(name) {
            let settings = StaticSoundSettings::new().volume(volume).loop_region(..);
            let handle = self.manager.play(sound_data.clone().with_settings(settings))?;
            self.loops.insert(name.to_string(), handle);
        } else {
            log::warn!("Unknown loop cue: {}", name);
        }
        Ok(())
    }

    /// Stop a named loop if it is running.
    pub fn stop_loop(&mut self, name: &str) {
        if let Some(mut handle) = self.loops.remove(name) {
            let _ = handle.stop(Tween::default());
        }
    }

    /// Whether a named loop is currently playing.
    pub fn is_looping(&self, name: &str) -> bool {
        self.loops
            .get(name)
            .map(|h| h.state() != PlaybackState::Stopped)
            .unwrap_or(false)
    }

    /// Adjust the volume of a running loop (used for the naive
    /// inverse-distance scaling of the plasma hum).
    pub fn set_loop_volume(&mut self, name: &str, volume: f64) {
        if let Some(handle) = self.loops.get_mut(name) {
            let _ = handle.set_volume(volume, Tween::default());
        }
    }

    /// Drop finished one-shot handles.
    pub fn cleanup(&mut self) {
        self.one_shots
            .retain(|handle| handle.state() != PlaybackState::Stopped);
    }

    /// Stop everything (loops and one-shots).
    pub fn stop_all(&mut self) {
        for (_, mut handle) in self.loops.drain() {
            let _ = handle.stop(Tween::default());
        }
        for handle in &mut self.one_shots {
            let _ = handle.stop(Tween::default());
        }
        self.one_shots.clear();
    }

    /// Set master volume (0.0 to 1.0).
    pub fn set_master_volume(&mut self, volume: f64) {
        let _ = self
            .manager
            .main_track()
            .set_volume(volume, Tween::default());
    }
}

impl Drop for AudioSystem {
    fn drop(&mut self) {
        self.stop_all();
    }
}

// Re-export for convenience
pub use kira;
