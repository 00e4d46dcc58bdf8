//! Project Manta - TR-3B anti-gravity flight simulator.

mod audio_director;
mod config;
mod controls;
mod effects;
mod events;
mod hud;
mod scene;
mod state;

use anyhow::Result;
use audio::{tone::ToneSpec, AudioSystem};
use audio_director::{
    AudioCue, AudioDirector, SOUND_AMBIENT, SOUND_CLOAK_ACTIVATE, SOUND_PLASMA_HUM,
    SOUND_THRUSTER_BOOST,
};
use config::GameConfig;
use engine_core::{CapabilityProbe, PerformanceMonitor, Time};
use input::{InputState, TouchTracker};
use renderer::{Camera, Renderer};
use scene::Scene;
use state::{GameMode, GameState, MissionType, StatePatch};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowId},
};

/// Which screen is driving the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GamePhase {
    Loading,
    MainMenu,
    Flying,
}

/// Loading-bar state: progress advances by random steps on a 200 ms
/// cadence; the screen hands off after a fixed three seconds.
pub(crate) struct LoadingState {
    elapsed: f32,
    pub progress: f32,
    step_timer: f32,
}

/// Seconds the loading screen stays up.
const LOADING_DURATION: f32 = 3.0;
/// Seconds between loading-bar increments.
const LOADING_STEP_INTERVAL: f32 = 0.2;

impl LoadingState {
    fn new() -> Self {
        Self {
            elapsed: 0.0,
            progress: 0.0,
            step_timer: 0.0,
        }
    }

    /// Returns true once the loading screen is done.
    fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.step_timer += dt;
        while self.step_timer >= LOADING_STEP_INTERVAL {
            self.step_timer -= LOADING_STEP_INTERVAL;
            self.progress = (self.progress + rand::random::<f32>() * 15.0).min(100.0);
        }
        self.elapsed >= LOADING_DURATION
    }
}

/// Top-level game: renderer, input, state record, scene, and overlays.
pub struct Game {
    pub(crate) running: bool,
    pub(crate) phase: GamePhase,
    pub(crate) renderer: Renderer,
    pub(crate) camera: Camera,
    pub(crate) time: Time,
    pub(crate) input: InputState,
    pub(crate) touch: TouchTracker,
    pub(crate) perf: PerformanceMonitor,
    pub(crate) state: GameState,
    pub(crate) scene: Scene,
    pub(crate) director: AudioDirector,
    pub(crate) audio: Option<AudioSystem>,
    pub(crate) config: GameConfig,
    pub(crate) menu_selected: usize,
    pub(crate) loading: LoadingState,
    session_seed: u64,
}

impl Game {
    async fn new(window: Arc<Window>, config: GameConfig) -> Result<Self> {
        let mut renderer = Renderer::new(window.clone()).await?;

        let probe = CapabilityProbe::new(renderer.adapter_name(), window.scale_factor());
        let perf = PerformanceMonitor::with_probe(&probe);

        let mut camera = Camera::default();
        let size = window.inner_size();
        camera.set_aspect(size.width, size.height);

        let session_seed: u64 = rand::random();
        let scene = Scene::new(
            &mut renderer,
            MissionType::Reconnaissance,
            perf.level(),
            session_seed,
        );

        let audio = match Self::init_audio(&config) {
            Ok(audio) => Some(audio),
            Err(e) => {
                log::warn!("Audio disabled: {}", e);
                None
            }
        };

        Ok(Self {
            running: true,
            phase: GamePhase::Loading,
            renderer,
            camera,
            time: Time::new(),
            input: InputState::new(),
            touch: TouchTracker::new(),
            perf,
            state: GameState::default(),
            scene,
            director: AudioDirector::new(),
            audio,
            config,
            menu_selected: 0,
            loading: LoadingState::new(),
            session_seed,
        })
    }

    /// Bring up the audio backend and synthesise the placeholder cues.
    fn init_audio(config: &GameConfig) -> Result<AudioSystem> {
        let mut audio = AudioSystem::new()?;
        audio.register_tone(SOUND_AMBIENT, ToneSpec::steady(55.0, 2.0, 0.25))?;
        audio.register_tone(SOUND_PLASMA_HUM, ToneSpec::steady(110.0, 1.0, 0.4))?;
        audio.register_tone(SOUND_CLOAK_ACTIVATE, ToneSpec::sweep(880.0, 220.0, 0.7, 0.6))?;
        audio.register_tone(SOUND_THRUSTER_BOOST, ToneSpec::sweep(80.0, 320.0, 0.5, 0.5))?;
        audio.set_master_volume(config.master_volume);
        Ok(audio)
    }

    /// One frame of game logic.
    fn update(&mut self) {
        self.time.update();
        let dt = self.time.delta_seconds();
        self.perf.record_frame(self.time.delta());

        match self.phase {
            GamePhase::Loading => {
                if self.loading.advance(dt) {
                    self.phase = GamePhase::MainMenu;
                }
            }
            GamePhase::MainMenu => {}
            GamePhase::Flying => {
                let drag = self.touch.take_delta();
                if let Some(patch) =
                    controls::patch_for_touch_drag(&self.state, drag, self.config.touch_sensitivity)
                {
                    self.state.apply(patch);
                }

                self.scene.update(dt, &self.state);
                self.camera.follow(self.state.pose().position, dt);
                self.drive_audio();
            }
        }

        self.renderer.update_camera(&self.camera);
        self.input.begin_frame();
    }

    /// Turn state transitions into playback and keep the hum volume
    /// tracking the craft's distance from the origin.
    fn drive_audio(&mut self) {
        let cues = self.director.cues(&self.state);
        let Some(audio) = self.audio.as_mut() else {
            return;
        };

        for cue in cues {
            let result = match cue {
                AudioCue::CloakActivate => audio.play(SOUND_CLOAK_ACTIVATE, 0.7),
                AudioCue::PlasmaHumStart => audio.start_loop(SOUND_PLASMA_HUM, 0.5),
                AudioCue::PlasmaHumStop => {
                    audio.stop_loop(SOUND_PLASMA_HUM);
                    Ok(())
                }
                AudioCue::ThrusterBoost => audio.play(SOUND_THRUSTER_BOOST, 0.6),
            };
            if let Err(e) = result {
                log::warn!("Audio cue failed: {}", e);
            }
        }

        if self.state.plasma_active {
            audio.set_loop_volume(
                SOUND_PLASMA_HUM,
                AudioDirector::hum_volume(&self.state) * 0.5,
            );
        }
        audio.cleanup();
    }

    fn render(&mut self) -> Result<()> {
        let (output, mut encoder) = self.renderer.begin_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let level = self.perf.level();
        match self.phase {
            GamePhase::Flying => {
                self.scene.render(
                    &mut self.renderer,
                    &mut encoder,
                    &view,
                    &self.state,
                    self.time.elapsed_seconds(),
                    level,
                );
            }
            _ => {
                self.scene
                    .render_backdrop(&mut self.renderer, &mut encoder, &view, level);
            }
        }

        let overlay = hud::build(self);
        self.renderer
            .render_overlay(&mut encoder, &view, &overlay.vertices, &overlay.indices);
        self.renderer.end_frame(output, encoder);
        Ok(())
    }

    /// Menu start intent: mark the mission active and rebuild the scene
    /// for the selected mission (particle buffers resize here and only
    /// here).
    fn start_mission(&mut self) {
        let mission = MissionType::ALL[self.menu_selected];
        self.state.apply(StatePatch {
            game_mode: Some(GameMode::Flight),
            mission_active: Some(true),
            mission_type: Some(mission),
            ..Default::default()
        });

        let seed = self.session_seed.wrapping_add(self.menu_selected as u64);
        self.scene = Scene::new(&mut self.renderer, mission, self.perf.level(), seed);
        self.phase = GamePhase::Flying;

        if let Some(audio) = self.audio.as_mut() {
            if let Err(e) = audio.start_loop(SOUND_AMBIENT, 0.3) {
                log::warn!("Ambient loop failed: {}", e);
            }
        }
        log::info!("Mission start: {}", mission.title());
    }

    fn return_to_menu(&mut self) {
        self.state.apply(StatePatch {
            game_mode: Some(GameMode::Menu),
            mission_active: Some(false),
            ..Default::default()
        });
        self.phase = GamePhase::MainMenu;
    }
}

/// Application handler for winit.
struct App {
    config: GameConfig,
    game: Option<Game>,
}

impl App {
    fn new(config: GameConfig) -> Self {
        Self { config, game: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.game.is_none() {
            let mut window_attrs = Window::default_attributes()
                .with_title("Project Manta")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window_width,
                    self.config.window_height,
                ));
            if self.config.fullscreen {
                window_attrs = window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            match pollster::block_on(Game::new(window.clone(), self.config.clone())) {
                Ok(game) => {
                    self.game = Some(game);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Failed to initialize game: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(game) = &mut self.game {
            if game.handle_window_event(event) || !game.running {
                event_loop.exit();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║                     PROJECT  MANTA                       ║");
    println!("╠══════════════════════════════════════════════════════════╣");
    println!("║  CONTROLS:                                               ║");
    println!("║    W/S or Up/Down - Fore/aft   │  A/D or L/R - Yaw       ║");
    println!("║    Q/E            - Roll       │  Shift/Ctrl - Climb     ║");
    println!("║    F - Cloak      P - Plasma   │  Space      - Hover     ║");
    println!("║    R - Reset pose              │  Tab        - Sensors   ║");
    println!("║    Touch drag - Look           │  Esc        - Menu      ║");
    println!("╚══════════════════════════════════════════════════════════╝");

    log::info!("Starting Project Manta");

    let config = GameConfig::load();
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
