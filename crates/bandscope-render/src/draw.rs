//! Toolkit-neutral draw commands produced by the render strategies.
//!
//! The host windowing layer replays a [`DrawList`] onto whatever painter it
//! has; nothing here touches a platform API.

use ecolor::Color32;
use glam::Vec2;

/// End style of a stroked line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Rounded ends extending half the width past the endpoints
    #[default]
    Round,
    /// Square ends flush with the endpoints
    Flat,
}

/// Line or outline appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Width in pixels
    pub width: f32,
    /// Colour (unmultiplied alpha)
    pub color: Color32,
    /// End style
    pub cap: LineCap,
}

impl Stroke {
    /// Round-capped stroke
    pub fn new(width: f32, color: impl Into<Color32>) -> Self {
        Self {
            width,
            color: color.into(),
            cap: LineCap::Round,
        }
    }

    /// Same stroke with flat caps
    pub fn flat(mut self) -> Self {
        self.cap = LineCap::Flat;
        self
    }
}

/// One primitive to paint, in surface pixel coordinates (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear(Color32),
    /// Axis-aligned filled rectangle
    Rect {
        /// Top-left corner
        min: Vec2,
        /// Width and height
        size: Vec2,
        /// Fill colour
        fill: Color32,
    },
    /// Ellipse, filled and/or outlined
    Ellipse {
        /// Centre point
        center: Vec2,
        /// Horizontal and vertical radius
        radius: Vec2,
        /// Fill colour, if filled
        fill: Option<Color32>,
        /// Outline, if stroked
        stroke: Option<Stroke>,
    },
    /// Straight segment
    Line {
        /// Start point
        from: Vec2,
        /// End point
        to: Vec2,
        /// Line appearance
        stroke: Stroke,
    },
}

/// Ordered list of commands making up one rendered frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands in paint order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was drawn
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Append a raw command
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Fill the surface
    pub fn clear(&mut self, color: Color32) {
        self.push(DrawCommand::Clear(color));
    }

    /// Filled rectangle; zero or negative extents are dropped
    pub fn rect(&mut self, min: Vec2, size: Vec2, fill: Color32) {
        if size.x > 0.0 && size.y > 0.0 {
            self.push(DrawCommand::Rect { min, size, fill });
        }
    }

    /// Filled circle without outline
    pub fn circle_filled(&mut self, center: Vec2, radius: f32, fill: Color32) {
        if radius > 0.0 {
            self.push(DrawCommand::Ellipse {
                center,
                radius: Vec2::splat(radius),
                fill: Some(fill),
                stroke: None,
            });
        }
    }

    /// Outlined circle, optionally filled
    pub fn circle(&mut self, center: Vec2, radius: f32, fill: Option<Color32>, stroke: Stroke) {
        if radius > 0.0 {
            self.push(DrawCommand::Ellipse {
                center,
                radius: Vec2::splat(radius),
                fill,
                stroke: Some(stroke),
            });
        }
    }

    /// Line segment
    pub fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        self.push(DrawCommand::Line { from, to, stroke });
    }
}

/// Colour from hue in degrees (any range), saturation/value in 0-255, alpha in 0-255.
///
/// The hue is truncated to whole degrees and alpha is clamped.
pub fn hsva(hue: f32, saturation: u8, value: u8, alpha: f32) -> Color32 {
    let hue = (hue.rem_euclid(360.0) as u32 % 360) as f32 / 360.0;
    let [r, g, b] = ecolor::rgb_from_hsv((
        hue,
        saturation as f32 / 255.0,
        value as f32 / 255.0,
    ));
    Color32::from_rgba_unmultiplied(
        unit_to_u8(r),
        unit_to_u8(g),
        unit_to_u8(b),
        alpha.clamp(0.0, 255.0) as u8,
    )
}

/// Copy of `color` with a new alpha
pub fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        alpha.clamp(0.0, 255.0) as u8,
    )
}

fn unit_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
