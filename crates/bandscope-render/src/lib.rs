//! Bandscope Render - Visual styles over smoothed band state
//!
//! This crate turns a surface's band dynamics into a toolkit-neutral
//! [`DrawList`]:
//! - One strategy per visual style, chosen by [`render`]
//! - Particle simulation for the particle style
//! - Per-surface state (mailbox, dynamics, phase, particles) in [`Surface`]

#![warn(missing_docs)]

pub mod dispatcher;
pub mod draw;
pub mod modes;
pub mod particles;
pub mod surface;

pub use dispatcher::{render, RenderCapabilities, RenderContext, StatusBarOptions};
pub use draw::{hsva, DrawCommand, DrawList, LineCap, Stroke};
pub use modes::bar_span;
pub use particles::{Particle, ParticleState};
pub use surface::Surface;
