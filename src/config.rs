/*
 * Configuration Module
 *
 * Scene configuration loaded from YAML.
 *
 * A scene file describes the window, the tick rate and the initial
 * placement of every entity. It is read once at startup and turned into a
 * ready Simulation by SceneConfig::build.
 *
 * Example scene file:
 *
 * window:
 *   title: "Magnetism Simulation"
 *   width: 400
 *   height: 400
 *
 * tick_rate: 60.0
 *
 * dipoles:
 *   - position: [200.0, 150.0]
 *     orientation_degrees: 90.0
 *   - position: [200.0, 250.0]
 *     orientation_degrees: -90.0
 *     strength: 10.0          # optional, as are radius/separation/field_lines
 *
 * free_dipoles:
 *   - position: [200.0, 200.0]
 *
 * animation:                  # optional
 *   sources: [0, 1]
 *   step: 0.1
 *   max_strength: 10.0
 */

use nannou::prelude::*;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::{self, StrengthCycle};
use crate::bounds::{self, Bounds};
use crate::dipole::{self, Dipole};
use crate::error::{MagnetError, MagnetResult};
use crate::ferrite::{self, FreeDipole};
use crate::params::DEFAULT_TICK_RATE;
use crate::scene::{Scene, SourceId};
use crate::simulation::Simulation;
use crate::tracer::FieldLineTracer;

/// Window title and simulation area. The area doubles as the tracing bounds.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Magnetism Simulation".to_string(),
            width: bounds::DEFAULT_WIDTH,
            height: bounds::DEFAULT_HEIGHT,
        }
    }
}

/// Initial state of one field source
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DipoleConfig {
    pub position: [f32; 2],
    #[serde(default)]
    pub orientation_degrees: f32, // 0 points north up the screen, positive turns clockwise
    #[serde(default = "default_strength")]
    pub strength: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_separation")]
    pub separation: f32,
    #[serde(default = "default_field_lines")]
    pub field_lines: usize, // seeds per pole
}

/// Initial state of one ferrite. Orientation is not configurable, the first
/// tick aligns it with the field.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct FreeDipoleConfig {
    pub position: [f32; 2],
    #[serde(default = "default_ferrite_length")]
    pub length: f32,
    #[serde(default = "default_ferrite_width")]
    pub width: f32,
    #[serde(default = "default_sample_step")]
    pub sample_step: f32,
}

/// Strength hand-over between dipoles, addressed by their index in `dipoles`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    pub sources: Vec<usize>,
    #[serde(default = "default_step")]
    pub step: f32,
    #[serde(default = "default_max_strength")]
    pub max_strength: f32,
}

/// Top-level scene configuration
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SceneConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f32,
    #[serde(default)]
    pub dipoles: Vec<DipoleConfig>,
    #[serde(default)]
    pub free_dipoles: Vec<FreeDipoleConfig>,
    #[serde(default)]
    pub animation: Option<AnimationConfig>,
}

fn default_strength() -> f32 {
    dipole::DEFAULT_STRENGTH
}

fn default_radius() -> f32 {
    dipole::DEFAULT_RADIUS
}

fn default_separation() -> f32 {
    dipole::DEFAULT_SEPARATION
}

fn default_field_lines() -> usize {
    dipole::DEFAULT_FIELD_LINES
}

fn default_ferrite_length() -> f32 {
    ferrite::DEFAULT_LENGTH
}

fn default_ferrite_width() -> f32 {
    ferrite::DEFAULT_WIDTH
}

fn default_sample_step() -> f32 {
    ferrite::DEFAULT_SAMPLE_STEP
}

fn default_step() -> f32 {
    animation::DEFAULT_STEP
}

fn default_max_strength() -> f32 {
    animation::DEFAULT_MAX_STRENGTH
}

fn default_tick_rate() -> f32 {
    DEFAULT_TICK_RATE
}

impl Default for SceneConfig {
    /// Three dipoles in a triangle handing their strength around, with a
    /// ferrite in the middle.
    fn default() -> Self {
        let dipole = |x: f32, y: f32, orientation_degrees: f32, strength: f32| DipoleConfig {
            position: [x, y],
            orientation_degrees,
            strength,
            radius: dipole::DEFAULT_RADIUS,
            separation: dipole::DEFAULT_SEPARATION,
            field_lines: dipole::DEFAULT_FIELD_LINES,
        };

        Self {
            window: WindowConfig::default(),
            tick_rate: DEFAULT_TICK_RATE,
            dipoles: vec![
                dipole(200.0, 90.0, 0.0, animation::DEFAULT_MAX_STRENGTH),
                dipole(100.0, 290.0, 120.0, 0.0),
                dipole(300.0, 290.0, 240.0, 0.0),
            ],
            free_dipoles: vec![FreeDipoleConfig {
                position: [200.0, 223.0],
                length: ferrite::DEFAULT_LENGTH,
                width: ferrite::DEFAULT_WIDTH,
                sample_step: ferrite::DEFAULT_SAMPLE_STEP,
            }],
            animation: Some(AnimationConfig {
                sources: vec![0, 1, 2],
                step: animation::DEFAULT_STEP,
                max_strength: animation::DEFAULT_MAX_STRENGTH,
            }),
        }
    }
}

impl SceneConfig {
    pub fn load(path: impl AsRef<Path>) -> MagnetResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let config: SceneConfig = serde_yaml::from_reader(BufReader::new(file))?;
        log::info!(
            "loaded scene {:?}: {} dipoles, {} ferrites",
            path,
            config.dipoles.len(),
            config.free_dipoles.len()
        );
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> MagnetResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn bounds(&self) -> MagnetResult<Bounds> {
        Bounds::new(self.window.width, self.window.height)
    }

    /// Validate every entry and assemble the simulation.
    pub fn build(&self) -> MagnetResult<Simulation> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(MagnetError::Config(format!("tick rate must be positive, got {}", self.tick_rate)));
        }

        let bounds = self.bounds()?;
        let mut scene = Scene::new();

        for entry in &self.dipoles {
            let dipole = Dipole::new(
                vec2(entry.position[0], entry.position[1]),
                entry.orientation_degrees.to_radians(),
                entry.strength,
                entry.radius,
                entry.separation,
                entry.field_lines,
            )?;
            scene.attach_source(dipole);
        }

        for entry in &self.free_dipoles {
            let ferrite = FreeDipole::with_sample_step(
                vec2(entry.position[0], entry.position[1]),
                entry.length,
                entry.width,
                entry.sample_step,
            )?;
            scene.attach_free_dipole(ferrite);
        }

        let count = scene.sources().len();
        let mut simulation = Simulation::new(scene, bounds, FieldLineTracer::default());

        if let Some(animation) = &self.animation {
            if let Some(&index) = animation.sources.iter().find(|&&index| index >= count) {
                return Err(MagnetError::UnknownSource { index, count });
            }
            if !(animation.step.is_finite() && animation.step > 0.0) {
                return Err(MagnetError::Config(format!("animation step must be positive, got {}", animation.step)));
            }
            if !(animation.max_strength.is_finite() && animation.max_strength > 0.0) {
                return Err(MagnetError::InvalidStrength(animation.max_strength));
            }

            let sources = animation.sources.iter().map(|&index| SourceId(index)).collect();
            simulation.add_animation(Box::new(StrengthCycle::new(sources, animation.step, animation.max_strength)));
        }

        simulation.retrace();
        Ok(simulation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_scene_builds() {
        let sim = SceneConfig::default().build().unwrap();
        assert_eq!(sim.scene.sources().len(), 3);
        assert_eq!(sim.scene.free_dipoles().len(), 1);
        assert_eq!(sim.animation_count(), 1);
        // Only the first dipole starts with any strength
        assert_eq!(sim.scene.active_sources().count(), 1);
        assert!(!sim.field_lines().is_empty());
    }

    #[test]
    fn omitted_fields_take_defaults() {
        let config = SceneConfig::from_yaml(
            "dipoles:\n  - position: [200.0, 150.0]\n    orientation_degrees: 90.0\n",
        )
        .unwrap();

        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.tick_rate, DEFAULT_TICK_RATE);
        assert_eq!(config.dipoles[0].strength, dipole::DEFAULT_STRENGTH);
        assert_eq!(config.dipoles[0].field_lines, dipole::DEFAULT_FIELD_LINES);
        assert!(config.animation.is_none());

        let sim = config.build().unwrap();
        assert_relative_eq!(sim.scene.sources()[0].orientation(), std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn animation_with_unknown_source_is_rejected() {
        let config = SceneConfig::from_yaml(
            "dipoles:\n  - position: [100.0, 100.0]\nanimation:\n  sources: [0, 3]\n",
        )
        .unwrap();

        assert!(matches!(
            config.build(),
            Err(MagnetError::UnknownSource { index: 3, count: 1 })
        ));
    }

    #[test]
    fn invalid_geometry_fails_the_build() {
        let config = SceneConfig::from_yaml(
            "dipoles:\n  - position: [100.0, 100.0]\n    separation: 0.0\n",
        )
        .unwrap();

        assert!(matches!(
            config.build(),
            Err(MagnetError::InvalidGeometry { what: "separation", .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(SceneConfig::from_yaml("dipoles: 12"), Err(MagnetError::Yaml(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            SceneConfig::load("scenarios/does_not_exist.yaml"),
            Err(MagnetError::Io(_))
        ));
    }
}
