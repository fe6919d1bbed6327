/*
 * Magnetism Simulation - Module Definitions
 *
 * This file defines the module structure for the magnetism simulation.
 * The simulation core (field, tracer, entities, scene, animation) has no
 * dependency on the window; app, input, renderer and ui wrap it in nannou.
 */

// Re-export key components for easier access
pub use animation::{Animation, StrengthCycle};
pub use bounds::Bounds;
pub use config::SceneConfig;
pub use debug::DebugInfo;
pub use dipole::Dipole;
pub use error::{MagnetError, MagnetResult};
pub use ferrite::{FreeDipole, MomentUpdate};
pub use params::SimulationParams;
pub use scene::{FerriteId, Scene, SourceId};
pub use simulation::Simulation;
pub use tracer::{FieldLine, FieldLineTracer, Polarity};
pub use viewport::Viewport;
pub use app::Model;

// Define modules
pub mod animation;
pub mod app;
pub mod bounds;
pub mod config;
pub mod debug;
pub mod dipole;
pub mod error;
pub mod ferrite;
pub mod field;
pub mod input;
pub mod params;
pub mod renderer;
pub mod scene;
pub mod simulation;
pub mod tracer;
pub mod ui;
pub mod viewport;
