//! Render strategies, one function per [`VisualStyle`](bandscope_core::VisualStyle).
//!
//! Every strategy appends to a [`DrawList`](crate::DrawList) and may assume
//! the dispatcher already checked for a non-empty band array and a
//! positive surface size.

pub mod bars;
pub mod lines;
pub mod radial;
pub mod status;
pub mod waveform;

use glam::Vec2;

/// Horizontal span `[x, next_x)` of bar `index` out of `count` across `width`.
///
/// Edges are rounded to whole pixels and the last bar always ends exactly at
/// `width`, so consecutive spans tile the surface without gaps.
pub fn bar_span(index: usize, count: usize, width: f32) -> (f32, f32) {
    let area = width / count as f32;
    let x = (index as f32 * area).round();
    let next = if index + 1 >= count {
        width
    } else {
        ((index + 1) as f32 * area).round()
    };
    (x, next)
}

/// Surface centre
pub(crate) fn center(size: Vec2) -> Vec2 {
    (size * 0.5).floor()
}

/// Half the shorter side, in whole pixels
pub(crate) fn half_extent(size: Vec2) -> f32 {
    (size.min_element() * 0.5).floor()
}

/// Point at `radius` from `origin` along `degrees` (screen coordinates, y down)
pub(crate) fn polar(origin: Vec2, radius: f32, degrees: f32) -> Vec2 {
    origin + Vec2::from_angle(degrees.to_radians()) * radius
}

/// Fraction `index / count` as used for hues and angles
pub(crate) fn fraction(index: usize, count: usize) -> f32 {
    index as f32 / count as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_spans_tile_width() {
        for (count, width) in [(96usize, 800.0f32), (96, 333.0), (7, 100.0), (1, 50.0)] {
            let spans: Vec<_> = (0..count).map(|i| bar_span(i, count, width)).collect();
            assert_eq!(spans[0].0, 0.0);
            assert_eq!(spans[count - 1].1, width);
            for w in spans.windows(2) {
                assert_eq!(w[0].1, w[1].0);
            }
        }
    }

    #[test]
    fn test_polar_axes() {
        let p = polar(Vec2::new(10.0, 10.0), 5.0, 90.0);
        assert!((p - Vec2::new(10.0, 15.0)).length() < 1e-5);
    }
}
