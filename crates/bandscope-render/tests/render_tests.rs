//! Rendering tests across every style and the per-surface lane

use std::sync::Arc;

use bandscope_core::{
    BandFrame, BandSink, BandVector, BarColoring, ColorTheme, DualSinkBroadcaster, FrameOrigin,
    StatusBarFill, VisualStyle, VisualizerConfig,
};
use bandscope_render::{
    render, DrawCommand, DrawList, ParticleState, RenderCapabilities, RenderContext,
    StatusBarOptions, Surface,
};
use glam::Vec2;
use proptest::prelude::*;

fn all_finite(list: &DrawList) -> bool {
    list.commands().iter().all(|cmd| match cmd {
        DrawCommand::Clear(_) => true,
        DrawCommand::Rect { min, size, .. } => min.is_finite() && size.is_finite(),
        DrawCommand::Ellipse { center, radius, stroke, .. } => {
            center.is_finite()
                && radius.is_finite()
                && stroke.map_or(true, |s| s.width.is_finite())
        }
        DrawCommand::Line { from, to, stroke } => {
            from.is_finite() && to.is_finite() && stroke.width.is_finite()
        }
    })
}

fn fill_strategy() -> impl Strategy<Value = StatusBarFill> {
    prop_oneof![
        Just(StatusBarFill::Solid),
        Just(StatusBarFill::Striped),
        Just(StatusBarFill::Dotted),
        Just(StatusBarFill::SolidWithCap),
    ]
}

fn coloring_strategy() -> impl Strategy<Value = BarColoring> {
    prop_oneof![
        Just(BarColoring::Theme),
        Just(BarColoring::Rainbow),
        Just(BarColoring::Gradient),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_every_style_draws_finite_commands(
        values in prop::collection::vec(0.0f32..=1.0, 1..=96),
        intensity in 0.0f32..=1.0,
        phase in 0.0f32..10_000.0,
        width in 1.0f32..2000.0,
        height in 1.0f32..1200.0,
        vector_math in any::<bool>(),
        fill in fill_strategy(),
        coloring in coloring_strategy(),
        seed in any::<u64>(),
    ) {
        let theme = ColorTheme::default();
        let mut particles = ParticleState::seeded(seed);
        particles.reset(20);
        particles.step(1.0 / 60.0, intensity);

        let ctx = RenderContext {
            values: &values,
            caps: &values,
            intensity,
            phase,
            size: Vec2::new(width, height),
            theme: &theme,
            status: StatusBarOptions { fill, coloring },
            particles: &particles,
            capabilities: RenderCapabilities { vector_math },
        };

        for style in VisualStyle::ALL {
            let list = render(style, &ctx);
            prop_assert_eq!(list.commands().first(), Some(&DrawCommand::Clear(theme.background)));
            prop_assert!(all_finite(&list), "{} produced a non-finite command", style);
        }
    }
}

#[test]
fn test_popup_starts_from_rest_while_strip_keeps_state() {
    let config = VisualizerConfig::default();
    let size = Vec2::new(400.0, 60.0);
    let mut strip = Surface::new("strip", VisualStyle::StatusBars, &config, size);
    let broadcaster = DualSinkBroadcaster::new(strip.sink());

    let loud = BandFrame::new(BandVector::from_values([0.9; 96]), FrameOrigin::Analyzer);
    for _ in 0..20 {
        broadcaster.broadcast(&loud);
        strip.tick(1.0 / 30.0);
    }
    let strip_before = strip.dynamics().values()[0];
    assert!(strip_before > 0.0);

    let mut popup = Surface::new("popup", VisualStyle::Spectrum, &config, size)
        .with_particles(ParticleState::seeded(1));
    broadcaster.open_popup(popup.sink());
    broadcaster.broadcast(&loud);
    strip.tick(1.0 / 30.0);
    popup.tick(1.0 / 30.0);

    // One update from rest versus twenty-one on the strip
    assert_eq!(popup.dynamics().updates(), 1);
    assert!(popup.dynamics().values()[0] < strip.dynamics().values()[0]);
    assert!(strip.dynamics().values()[0] >= strip_before);
}

#[test]
fn test_hidden_popup_skipped_by_broadcast() {
    let config = VisualizerConfig::default();
    let size = Vec2::new(200.0, 100.0);
    let strip = Surface::new("strip", VisualStyle::StatusBars, &config, size);
    let mut popup = Surface::new("popup", VisualStyle::RadialGrid, &config, size);

    let broadcaster = DualSinkBroadcaster::new(strip.sink());
    let popup_sink: Arc<dyn BandSink> = popup.sink();
    broadcaster.open_popup(popup_sink);
    popup.sink().set_visible(false);

    assert_eq!(broadcaster.broadcast(&BandFrame::silence()), 1);
    assert!(popup.tick(0.1).is_none());

    popup.sink().set_visible(true);
    let list = popup.tick(0.1).expect("visible popup renders");
    assert_eq!(popup.dynamics().updates(), 0);
    assert!(list.len() > 1);
}
