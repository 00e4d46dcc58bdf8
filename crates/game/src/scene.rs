//! Scene composition: rebuilds the frame's draw lists from game state
//! plus elapsed time, and owns the per-mission GPU meshes.

use engine_core::QualitySettings;
use glam::{Mat4, Quat, Vec3};
use procgen::{generate_stars, Dressing, TerrainConfig, TerrainData, TerrainKind};
use renderer::{InstanceData, Mesh, Renderer};

use crate::effects::{AtmosphereField, PlasmaExhaust, RING_CENTERS, RING_Z};
use crate::state::{GameState, MissionType};

/// Sun direction shared by the lit passes and the shadow light.
const SUN_DIRECTION: Vec3 = Vec3::new(1.0, 1.0, 0.5);
/// Half-extent of the shadow light's orthographic box around the craft.
const SHADOW_EXTENT: f32 = 200.0;

/// Exhaust particle billboard size.
const EXHAUST_SIZE: f32 = 0.3;
/// Exhaust tint (#00aaff).
const EXHAUST_COLOR: [f32; 3] = [0.0, 0.667, 1.0];
/// Glow orb tint (#0088ff).
const GLOW_COLOR: [f32; 3] = [0.0, 0.533, 1.0];

/// Everything built per mission: meshes, particle buffers, dressing.
/// Particle buffers are sized from the quality level at build time and
/// stay that size until the next mission rebuild.
pub struct Scene {
    hull_mesh: Mesh,
    ring_mesh: Mesh,
    cloak_mesh: Mesh,
    particle_mesh: Mesh,
    dressing_mesh: Option<Mesh>,
    terrain_mesh: Mesh,
    star_mesh: Mesh,
    star_count: u32,

    dressing_instances: Vec<InstanceData>,
    exhaust: PlasmaExhaust,
    atmosphere: AtmosphereField,
    atmosphere_color: [f32; 4],

    ring_angles: [f32; 3],
    cloak_spin: (f32, f32),
}

impl Scene {
    /// Build the scene for a mission. `level` sizes the particle buffers,
    /// the star cloud, and the shadow map.
    pub fn new(renderer: &mut Renderer, mission: MissionType, level: u8, seed: u64) -> Self {
        let settings = QualitySettings::for_level(level);
        let kind = mission.terrain_kind();
        let device = renderer.device();

        let terrain = TerrainData::generate(TerrainConfig {
            kind,
            seed,
            ..Default::default()
        });
        let terrain_mesh = Mesh::from_pod(device, &terrain.vertices, &terrain.indices);

        let dressing = Dressing::generate(kind, seed);
        let dressing_mesh = match &dressing {
            Dressing::Blocks(_) => Some(Mesh::cube(device)),
            Dressing::Asteroids(_) => Some(Mesh::asteroid(device)),
            Dressing::None => None,
        };
        let dressing_instances = dressing
            .instances()
            .iter()
            .map(|d| InstanceData::new(d.transform.to_matrix().to_cols_array_2d(), d.color))
            .collect();

        let stars = generate_stars(settings.star_count, seed);
        let star_mesh = Mesh::from_pod(device, &stars, &[]);

        let atmosphere_color = if kind == TerrainKind::DeepSpace {
            [1.0, 1.0, 1.0, 0.6]
        } else {
            [0.667, 0.667, 0.667, 0.6]
        };

        let scene = Self {
            hull_mesh: Mesh::tri_hull(device),
            ring_mesh: Mesh::torus(device, 7.6, 0.5, 8, 32),
            cloak_mesh: Mesh::sphere(device, 40.0, 32, 32),
            particle_mesh: Mesh::billboard_quad(device, 1.0),
            dressing_mesh,
            terrain_mesh,
            star_mesh,
            star_count: settings.star_count,
            dressing_instances,
            exhaust: PlasmaExhaust::new(settings.plasma_particles, seed),
            atmosphere: AtmosphereField::new(settings.atmosphere_particles, seed.wrapping_add(1)),
            atmosphere_color,
            ring_angles: [0.0; 3],
            cloak_spin: (0.0, 0.0),
        };

        renderer.set_shadow_map_size(settings.shadow_map_size);
        log::info!(
            "Scene built: {:?} terrain, {} stars, {} exhaust particles, {} shadow map",
            kind,
            settings.star_count,
            settings.plasma_particles,
            settings.shadow_map_size
        );

        scene
    }

    /// Advance per-frame kinematics: ring spin, cloak field rotation,
    /// exhaust orbits.
    pub fn update(&mut self, dt: f32, state: &GameState) {
        for (index, angle) in self.ring_angles.iter_mut().enumerate() {
            *angle += dt * (2.0 + index as f32 * 0.5);
        }
        self.cloak_spin.0 += dt * 0.05;
        self.cloak_spin.1 += dt * 0.1;

        if state.plasma_active {
            self.exhaust.update(dt, state.thrust_level);
        }
    }

    /// Record the full frame: shadow pass, star clear pass, terrain,
    /// dressing, hull, effects. Overlay is drawn by the caller afterwards.
    pub fn render(
        &self,
        renderer: &mut Renderer,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        state: &GameState,
        time: f32,
        level: u8,
    ) {
        // Live settings: stars, shadows, and wireframe adapt to the
        // current level; particle buffers keep their build-time size.
        let live = QualitySettings::for_level(level);
        let pose = state.pose();
        let plasma_power = if state.plasma_active {
            state.thrust_level
        } else {
            0.0
        };

        renderer.update_effects(time, state.cloaking_intensity, plasma_power, 1.0);
        renderer.update_terrain(
            SUN_DIRECTION.normalize(),
            [0.01, 0.01, 0.03],
            0.0008,
            time,
        );

        // Shadow pass over the hull and dressing.
        let hull_instances = [InstanceData::new(
            pose.to_matrix().to_cols_array_2d(),
            [1.0, 1.0, 1.0, 1.0],
        )];
        renderer.update_shadow_light(
            SUN_DIRECTION,
            pose.position,
            SHADOW_EXTENT,
            live.shadows_enabled,
        );
        if live.shadows_enabled {
            renderer.render_shadow_instanced(encoder, &self.hull_mesh, &hull_instances, true);
            if let Some(mesh) = &self.dressing_mesh {
                renderer.render_shadow_instanced(encoder, mesh, &self.dressing_instances, false);
            }
        }

        // Color passes; the star pass clears the frame.
        let star_draw = self.star_count.min(live.star_count);
        renderer.render_stars(encoder, view, &self.star_mesh, star_draw);
        renderer.render_terrain(encoder, view, &self.terrain_mesh, live.terrain_wireframe);
        if let Some(mesh) = &self.dressing_mesh {
            renderer.render_scene_instanced(encoder, view, mesh, &self.dressing_instances);
        }
        renderer.render_hull(encoder, view, &self.hull_mesh, &hull_instances);

        if state.plasma_active {
            let ring_instances = self.ring_instances(pose.position);
            renderer.render_plasma(encoder, view, &self.ring_mesh, &ring_instances);
        }

        let particles = self.particle_instances(state, pose.position);
        renderer.render_particles(encoder, view, &self.particle_mesh, &particles);

        if state.cloaking_intensity > 0.0 {
            let cloak_model = Mat4::from_rotation_translation(
                Quat::from_rotation_y(self.cloak_spin.1) * Quat::from_rotation_x(self.cloak_spin.0),
                pose.position,
            );
            let cloak_instances = [InstanceData::new(
                cloak_model.to_cols_array_2d(),
                [1.0, 1.0, 1.0, 1.0],
            )];
            renderer.render_cloak(encoder, view, &self.cloak_mesh, &cloak_instances);
        }
    }

    /// Stars-only pass for the loading screen and main menu backdrop.
    pub fn render_backdrop(
        &self,
        renderer: &mut Renderer,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        level: u8,
    ) {
        let live = QualitySettings::for_level(level);
        renderer.render_stars(
            encoder,
            view,
            &self.star_mesh,
            self.star_count.min(live.star_count),
        );
    }

    /// The three plasma ring tori at the hull vertices, each spinning at
    /// its own rate.
    fn ring_instances(&self, origin: Vec3) -> Vec<InstanceData> {
        RING_CENTERS
            .iter()
            .zip(self.ring_angles)
            .map(|(center, angle)| {
                let position = origin + Vec3::new(center.x, center.y, RING_Z);
                let model =
                    Mat4::from_rotation_translation(Quat::from_rotation_z(angle), position);
                InstanceData::new(model.to_cols_array_2d(), [1.0, 1.0, 1.0, 1.0])
            })
            .collect()
    }

    /// Billboard instances: exhaust swarm + glow orbs (plasma on) and the
    /// ambient atmosphere dust.
    fn particle_instances(&self, state: &GameState, origin: Vec3) -> Vec<InstanceData> {
        let mut instances = Vec::with_capacity(
            self.exhaust.particles.len() + RING_CENTERS.len() + self.atmosphere.positions.len(),
        );

        if state.plasma_active {
            let alpha = state.thrust_level * 0.8;
            for p in &self.exhaust.particles {
                let model = Mat4::from_scale_rotation_translation(
                    Vec3::splat(EXHAUST_SIZE),
                    Quat::IDENTITY,
                    origin + p.position,
                );
                instances.push(InstanceData::new(
                    model.to_cols_array_2d(),
                    [EXHAUST_COLOR[0], EXHAUST_COLOR[1], EXHAUST_COLOR[2], alpha],
                ));
            }

            // Soft glow orb over each ring.
            let glow_alpha = state.thrust_level * 0.1;
            for center in RING_CENTERS {
                let position = origin + Vec3::new(center.x, center.y, RING_Z);
                let model = Mat4::from_scale_rotation_translation(
                    Vec3::splat(16.0),
                    Quat::IDENTITY,
                    position,
                );
                instances.push(InstanceData::new(
                    model.to_cols_array_2d(),
                    [GLOW_COLOR[0], GLOW_COLOR[1], GLOW_COLOR[2], glow_alpha],
                ));
            }
        }

        for position in &self.atmosphere.positions {
            let model = Mat4::from_scale_rotation_translation(
                Vec3::splat(0.5),
                Quat::IDENTITY,
                *position,
            );
            instances.push(InstanceData::new(
                model.to_cols_array_2d(),
                self.atmosphere_color,
            ));
        }

        instances
    }
}
