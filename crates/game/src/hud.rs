//! Screen-space overlays: loading screen, main menu, and the flight HUD.
//!
//! Everything is read-mostly over game state; the only animation here is
//! cosmetic (radar sweep, plasma gauge wobble) and runs off wall-clock
//! time, not game data.

use renderer::OverlayTextBuilder;

use crate::controls::{self, TapAction};
use crate::state::{GameMode, MissionType, SensorMode};
use crate::{Game, GamePhase};

const CYAN: [f32; 4] = [0.0, 0.85, 1.0, 1.0];
const CYAN_DIM: [f32; 4] = [0.0, 0.85, 1.0, 0.35];
const GREEN: [f32; 4] = [0.3, 1.0, 0.4, 1.0];
const SLATE: [f32; 4] = [0.68, 0.72, 0.80, 1.0];
const SLATE_DIM: [f32; 4] = [0.45, 0.48, 0.55, 1.0];
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const RED: [f32; 4] = [1.0, 0.35, 0.3, 1.0];
const YELLOW: [f32; 4] = [1.0, 0.85, 0.3, 1.0];
const PANEL_BG: [f32; 4] = [0.0, 0.0, 0.0, 0.55];

/// Staged loading status strings.
const LOADING_STEPS: [&str; 6] = [
    "Initializing Anti-Gravity Systems...",
    "Calibrating Mercury Plasma Rings...",
    "Activating Metamaterial Cloaking...",
    "Synchronizing Quantum Communications...",
    "Loading Mission Parameters...",
    "Systems Ready - Standby for Launch",
];

/// Build the overlay for the current phase.
pub(crate) fn build(game: &Game) -> OverlayTextBuilder {
    let (w, h) = game.renderer.dimensions();
    let (sw, sh) = (w as f32, h as f32);
    let mut tb = OverlayTextBuilder::new(sw, sh);

    match game.phase {
        GamePhase::Loading => build_loading(&mut tb, game, sw, sh),
        GamePhase::MainMenu => build_menu(&mut tb, game, sw, sh),
        GamePhase::Flying => build_flight_hud(&mut tb, game, sw, sh),
    }

    tb
}

fn centered_text(tb: &mut OverlayTextBuilder, sw: f32, y: f32, text: &str, scale: f32, color: [f32; 4]) {
    let x = (sw - OverlayTextBuilder::text_width(text, scale)) * 0.5;
    tb.add_text(x, y, text, scale, color);
}

/// Ring of rotated segments approximating a circle outline.
fn add_circle(tb: &mut OverlayTextBuilder, cx: f32, cy: f32, r: f32, thickness: f32, color: [f32; 4]) {
    let segments = 24;
    let seg_half = std::f32::consts::PI * r / segments as f32;
    for i in 0..segments {
        let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
        let sx = cx + angle.cos() * r;
        let sy = cy + angle.sin() * r;
        tb.add_rotated_rect(
            sx,
            sy,
            seg_half,
            thickness * 0.5,
            angle + std::f32::consts::FRAC_PI_2,
            color,
        );
    }
}

/// Panel background with a thin accent line along the top.
fn panel(tb: &mut OverlayTextBuilder, x: f32, y: f32, w: f32, h: f32) {
    tb.add_rect(x, y, w, h, PANEL_BG);
    tb.add_rect(x, y, w, 1.0, CYAN_DIM);
}

// ---- Loading screen ----

fn build_loading(tb: &mut OverlayTextBuilder, game: &Game, sw: f32, sh: f32) {
    let progress = game.loading.progress;

    centered_text(tb, sw, sh * 0.22, "PROJECT", 7.0, CYAN);
    centered_text(tb, sw, sh * 0.22 + 64.0, "MANTA", 7.0, CYAN);
    centered_text(
        tb,
        sw,
        sh * 0.22 + 140.0,
        "ANTI-GRAVITY FLIGHT SIMULATOR",
        1.6,
        CYAN_DIM,
    );

    let bar_w = 384.0;
    let bar_x = (sw - bar_w) * 0.5;
    let bar_y = sh * 0.62;
    tb.add_bar(
        bar_x,
        bar_y,
        bar_w,
        8.0,
        progress / 100.0,
        [0.12, 0.15, 0.2, 1.0],
        CYAN,
    );

    let step = ((progress / 100.0 * LOADING_STEPS.len() as f32) as usize)
        .min(LOADING_STEPS.len() - 1);
    centered_text(tb, sw, bar_y + 20.0, LOADING_STEPS[step], 1.2, SLATE);
    centered_text(
        tb,
        sw,
        bar_y + 44.0,
        &format!("{}%", progress.round() as u32),
        1.6,
        CYAN,
    );

    centered_text(
        tb,
        sw,
        sh - 40.0,
        "CLASSIFICATION: UNCLASSIFIED TECHNICAL SPECIFICATION",
        1.0,
        SLATE_DIM,
    );
}

// ---- Main menu ----

fn build_menu(tb: &mut OverlayTextBuilder, game: &Game, sw: f32, sh: f32) {
    centered_text(tb, sw, 48.0, "PROJECT MANTA", 4.0, CYAN);
    centered_text(
        tb,
        sw,
        92.0,
        "ADVANCED ANTI-GRAVITY FLIGHT SIMULATOR",
        1.3,
        CYAN_DIM,
    );

    // Mission selection (left column)
    let list_x = sw * 0.08;
    let list_w = sw * 0.42;
    let mut y = 150.0;
    tb.add_text(list_x, y, "SELECT MISSION", 1.8, CYAN);
    y += 32.0;

    for (index, mission) in MissionType::ALL.iter().enumerate() {
        let selected = index == game.menu_selected;
        let height = 64.0;
        panel(tb, list_x, y, list_w, height);
        if selected {
            tb.add_rect(list_x, y, 3.0, height, CYAN);
        }
        let title_color = if selected { CYAN } else { SLATE };
        tb.add_text(list_x + 14.0, y + 8.0, mission.title(), 1.5, title_color);
        let meta = format!("{} / {}", mission.difficulty(), mission.duration());
        let meta_x = list_x + list_w - OverlayTextBuilder::text_width(&meta, 1.0) - 10.0;
        tb.add_text(meta_x, y + 10.0, &meta, 1.0, SLATE_DIM);
        tb.add_text(list_x + 14.0, y + 34.0, mission.description(), 1.0, SLATE);
        y += height + 12.0;
    }

    y += 12.0;
    panel(tb, list_x, y, list_w, 34.0);
    centered_text_in(tb, list_x, list_w, y + 9.0, "INITIATE MISSION  [ENTER]", 1.5, GREEN);

    // TR-3B specification panel (right column)
    let spec_x = sw * 0.56;
    let spec_w = sw * 0.36;
    let mut sy = 150.0;
    tb.add_text(spec_x, sy, "TR-3B SPECIFICATIONS", 1.8, CYAN);
    sy += 32.0;
    panel(tb, spec_x, sy, spec_w, 230.0);
    let mut line = sy + 10.0;
    for (header, rows) in [
        ("Dimensions", &["183m wingspan x 61m length x 15m height"][..]),
        (
            "Propulsion",
            &["Mercury plasma ring array", "89.2% mass reduction capability"][..],
        ),
        (
            "Cloaking System",
            &[
                "Metamaterial adaptive camouflage",
                "Visual, thermal & radar stealth",
            ][..],
        ),
        (
            "Sensor Suite",
            &[
                "Synthetic Aperture Radar",
                "Multi-spectral imaging",
                "Quantum communication array",
            ][..],
        ),
    ] {
        tb.add_text(spec_x + 12.0, line, header, 1.2, CYAN);
        line += 16.0;
        for row in rows {
            tb.add_text(spec_x + 12.0, line, row, 1.0, SLATE);
            line += 13.0;
        }
        line += 8.0;
    }

    centered_text(
        tb,
        sw,
        sh - 56.0,
        "UP/DOWN SELECT MISSION - ENTER LAUNCH - ESC QUIT",
        1.1,
        SLATE,
    );
    centered_text(
        tb,
        sw,
        sh - 36.0,
        "Use WASD/Arrow keys for desktop control - Touch gestures for mobile control",
        1.0,
        SLATE_DIM,
    );
}

fn centered_text_in(
    tb: &mut OverlayTextBuilder,
    x: f32,
    w: f32,
    y: f32,
    text: &str,
    scale: f32,
    color: [f32; 4],
) {
    let tx = x + (w - OverlayTextBuilder::text_width(text, scale)) * 0.5;
    tb.add_text(tx, y, text, scale, color);
}

// ---- Flight HUD ----

fn build_flight_hud(tb: &mut OverlayTextBuilder, game: &Game, sw: f32, sh: f32) {
    let state = &game.state;
    let pose = state.pose();
    let t = game.time.elapsed_seconds();

    // Frame stats (top-left corner, above the status panel)
    let fps_line = format!(
        "FPS: {:.0}  QUALITY: {}",
        game.time.fps(),
        game.perf.level()
    );
    tb.add_text_with_bg(8.0, 8.0, &fps_line, 1.0, GREEN, PANEL_BG);

    // Left status panel
    let px = 8.0;
    let py = 34.0;
    panel(tb, px, py, 190.0, 88.0);
    tb.add_text(px + 8.0, py + 6.0, "TR-3B STATUS", 1.1, CYAN);
    tb.add_text(
        px + 8.0,
        py + 24.0,
        &format!("ALT: {:>8.1}m", pose.position.y * 10.0),
        1.0,
        WHITE,
    );
    tb.add_text(
        px + 8.0,
        py + 38.0,
        &format!("SPD: {:>8.1} m/s", state.velocity),
        1.0,
        WHITE,
    );
    tb.add_text(
        px + 8.0,
        py + 52.0,
        &format!("HDG: {:>8.1} deg", pose.heading_degrees()),
        1.0,
        WHITE,
    );
    let hover_color = if state.hover_mode { GREEN } else { SLATE_DIM };
    tb.add_text(
        px + 8.0,
        py + 66.0,
        &format!("HOV: {:>8}", if state.hover_mode { "ON" } else { "OFF" }),
        1.0,
        hover_color,
    );

    // Mission panel (top center)
    let mw = 200.0;
    let mx = (sw - mw) * 0.5;
    panel(tb, mx, 8.0, mw, 54.0);
    tb.add_text(mx + 8.0, 14.0, "MISSION", 1.1, CYAN);
    tb.add_text(mx + 8.0, 30.0, state.mission_type.hud_label(), 1.0, SLATE);
    let (mission_status, mission_color) = if state.mission_active {
        ("ACTIVE", GREEN)
    } else {
        ("STANDBY", YELLOW)
    };
    tb.add_text(mx + 8.0, 44.0, mission_status, 1.0, mission_color);

    // Systems panel (top right)
    let sx = sw - 198.0;
    panel(tb, sx, 8.0, 190.0, 70.0);
    tb.add_text(sx + 8.0, 14.0, "SYSTEMS", 1.1, CYAN);
    tb.add_text(
        sx + 8.0,
        30.0,
        &format!("PWR:   {:>4.0}%", state.power_level),
        1.0,
        GREEN,
    );
    let (cloak_text, cloak_color) = if state.cloaking_active {
        ("CLOAK: ACTIVE", GREEN)
    } else {
        ("CLOAK: OFFLINE", SLATE_DIM)
    };
    tb.add_text(sx + 8.0, 44.0, cloak_text, 1.0, cloak_color);
    tb.add_text(sx + 8.0, 58.0, "NAV:   ONLINE", 1.0, GREEN);

    // Center crosshair
    let cx = sw * 0.5;
    let cy = sh * 0.5;
    add_circle(tb, cx, cy, 16.0, 2.0, [0.0, 0.85, 1.0, 0.6]);
    tb.add_rect(cx - 2.0, cy - 2.0, 4.0, 4.0, CYAN);
    centered_text(tb, sw, cy - 34.0, "TARGET", 1.0, CYAN_DIM);

    // Sensor suite (bottom left)
    let bx = 8.0;
    let by = sh - 110.0;
    panel(tb, bx, by, 210.0, 100.0);
    tb.add_text(bx + 8.0, by + 6.0, "SENSOR SUITE", 1.1, CYAN);
    tb.add_text(bx + 8.0, by + 24.0, "SAR:     SCANNING", 1.0, GREEN);
    tb.add_text(bx + 8.0, by + 38.0, "THERMAL: ACTIVE", 1.0, GREEN);
    tb.add_text(bx + 8.0, by + 52.0, "QUANTUM: LINKED", 1.0, CYAN);
    let mode_line = format!("MODE:    {}", state.sensor_mode.hud_label());
    let mode_color = match state.sensor_mode {
        SensorMode::Radar => CYAN,
        SensorMode::Thermal => YELLOW,
        SensorMode::Quantum => WHITE,
    };
    tb.add_text(bx + 8.0, by + 70.0, &mode_line, 1.0, mode_color);
    tb.add_text(bx + 8.0, by + 84.0, "[TAB] CYCLE", 1.0, SLATE_DIM);

    // Plasma array gauges (bottom right, left of the tap targets)
    let pw = 210.0;
    let pax = sw - pw - 96.0;
    let pay = sh - 96.0;
    panel(tb, pax, pay, pw, 86.0);
    tb.add_text(pax + 8.0, pay + 6.0, "PLASMA ARRAY", 1.1, CYAN);
    for (index, label) in ["TOP ", "PORT", "STBD"].iter().enumerate() {
        let row_y = pay + 24.0 + index as f32 * 18.0;
        // Fabricated wobble from wall-clock time, not game data.
        let fill = if state.plasma_active {
            (85.0 + (t * 10.0 + index as f32).sin() * 10.0) / 100.0
        } else {
            0.0
        };
        tb.add_text(pax + 8.0, row_y, label, 1.0, SLATE);
        tb.add_bar(
            pax + 42.0,
            row_y + 1.0,
            110.0,
            6.0,
            fill,
            [0.12, 0.15, 0.2, 1.0],
            CYAN,
        );
        tb.add_text(
            pax + 158.0,
            row_y,
            &format!("{:>3.0}%", fill * 100.0),
            1.0,
            CYAN,
        );
    }

    // Radar display (right edge, vertically centered)
    let rx = sw - 76.0;
    let ry = sh * 0.5;
    tb.add_rect(rx - 56.0, ry - 56.0, 112.0, 112.0, PANEL_BG);
    add_circle(tb, rx, ry, 48.0, 1.5, CYAN_DIM);
    add_circle(tb, rx, ry, 32.0, 1.0, [0.0, 0.85, 1.0, 0.2]);
    add_circle(tb, rx, ry, 16.0, 1.0, [0.0, 0.85, 1.0, 0.12]);
    // Sweep needle: one revolution every 4 seconds.
    let sweep = t * std::f32::consts::TAU / 4.0;
    tb.add_rotated_rect(
        rx + sweep.cos() * 24.0,
        ry + sweep.sin() * 24.0,
        24.0,
        1.0,
        sweep,
        [0.0, 0.85, 1.0, 0.8],
    );
    // Contact blips (decorative)
    let pulse = 0.5 + 0.5 * (t * 4.0).sin();
    tb.add_rect(rx + 18.0, ry - 26.0, 3.0, 3.0, [1.0, 0.35, 0.3, pulse]);
    tb.add_rect(rx - 28.0, ry + 20.0, 3.0, 3.0, [1.0, 0.85, 0.3, pulse]);

    // On-screen tap targets (cloak / plasma / reset)
    for target in controls::tap_targets(sw, sh) {
        let (label, active) = match target.action {
            TapAction::ToggleCloak => ("C", state.cloaking_active),
            TapAction::TogglePlasma => ("P", state.plasma_active),
            TapAction::ResetPose => ("R", false),
        };
        let ring_color = if active { CYAN } else { SLATE_DIM };
        let fill = if active {
            [0.0, 0.85, 1.0, 0.15]
        } else {
            [0.0, 0.0, 0.0, 0.4]
        };
        tb.add_rect(
            target.center.x - target.radius,
            target.center.y - target.radius,
            target.radius * 2.0,
            target.radius * 2.0,
            fill,
        );
        add_circle(tb, target.center.x, target.center.y, target.radius, 2.0, ring_color);
        let label_color = match target.action {
            TapAction::ResetPose => RED,
            _ => ring_color,
        };
        tb.add_text(
            target.center.x - 4.0,
            target.center.y - 5.0,
            label,
            1.4,
            label_color,
        );
    }

    // ORACLE AI status + key legend (bottom center)
    centered_text(
        tb,
        sw,
        sh - 64.0,
        "ORACLE AI: All systems nominal - Standing by for orders",
        1.0,
        CYAN,
    );
    centered_text(
        tb,
        sw,
        sh - 24.0,
        "WASD: FLIGHT  F: CLOAK  P: PLASMA  SPACE: HOVER  R: RESET  TAB: SENSORS",
        1.0,
        SLATE_DIM,
    );

    // Game mode marker, bottom left corner under the sensor panel
    if state.game_mode == GameMode::Mission {
        tb.add_text(8.0, sh - 12.0, "MISSION LINK ENGAGED", 1.0, GREEN);
    }
}
