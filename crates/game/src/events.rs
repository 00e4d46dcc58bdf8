//! Window and device event handling for the game loop.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, Touch, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::controls;
use crate::state::MissionType;
use crate::{Game, GamePhase};

impl Game {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.running = false;
                true
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                self.camera.set_aspect(size.width, size.height);
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.input.process_keyboard(key, event.state);
                    if event.state.is_pressed() {
                        self.handle_key(key);
                    }
                }
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if state == ElementState::Pressed
                    && button == MouseButton::Left
                    && self.phase == GamePhase::Flying
                {
                    self.handle_tap(self.input.cursor_position());
                }
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_cursor_position((position.x, position.y));
                false
            }
            WindowEvent::Touch(touch) => {
                self.handle_touch(touch);
                false
            }
            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(e) = self.render() {
                    log::error!("Render error: {}", e);
                }
                self.renderer.window.request_redraw();
                false
            }
            _ => false,
        }
    }

    /// Keystroke dispatch per phase. Key repeat re-enters here, which is
    /// exactly what the per-keystroke movement table expects.
    fn handle_key(&mut self, key: KeyCode) {
        match self.phase {
            GamePhase::Loading => {}
            GamePhase::MainMenu => match key {
                KeyCode::ArrowUp | KeyCode::KeyW => {
                    self.menu_selected = self.menu_selected.saturating_sub(1);
                }
                KeyCode::ArrowDown | KeyCode::KeyS => {
                    self.menu_selected = (self.menu_selected + 1).min(MissionType::ALL.len() - 1);
                }
                KeyCode::Enter | KeyCode::NumpadEnter | KeyCode::Space => {
                    self.start_mission();
                }
                KeyCode::Escape => {
                    self.running = false;
                }
                _ => {}
            },
            GamePhase::Flying => {
                if key == KeyCode::Escape {
                    self.return_to_menu();
                    return;
                }
                if let Some(patch) = controls::patch_for_key(&self.state, key) {
                    self.state.apply(patch);
                }
            }
        }
    }

    /// Single-pointer touch: taps on the on-screen targets fire their
    /// action; everything else feeds the drag tracker.
    fn handle_touch(&mut self, touch: Touch) {
        if self.phase != GamePhase::Flying {
            return;
        }
        let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
        if touch.phase == winit::event::TouchPhase::Started && self.try_tap(position) {
            return;
        }
        self.touch.process(&touch);
    }

    /// Mouse click on the tap targets (desktop stand-in for touch taps).
    fn handle_tap(&mut self, position: Vec2) {
        self.try_tap(position);
    }

    fn try_tap(&mut self, position: Vec2) -> bool {
        let (w, h) = self.renderer.dimensions();
        let targets = controls::tap_targets(w as f32, h as f32);
        if let Some(action) = controls::hit_test(&targets, position) {
            let patch = controls::patch_for_tap(&self.state, action);
            self.state.apply(patch);
            true
        } else {
            false
        }
    }
}
