//! Property-based tests for the scroll controller.
//!
//! Random interleavings of pointer, wheel, tick, keyboard and bounds changes
//! must never leave the offset outside `[min(viewport - total, 0), 0]`, and
//! inertia must always come to rest.

use magic_words::view_state::{ScrollConfig, ScrollController, ScrollEvent, ScrollMode};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Event(ScrollEvent),
    ScrollBy(f64),
    Top,
    Bottom,
    Bounds { viewport: f64, total: f64 },
}

fn arb_event() -> impl Strategy<Value = ScrollEvent> {
    prop_oneof![
        (-200.0f64..200.0).prop_map(|y| ScrollEvent::PointerDown { y }),
        (-200.0f64..200.0).prop_map(|y| ScrollEvent::PointerMove { y }),
        Just(ScrollEvent::PointerUp),
        (-50.0f64..50.0).prop_map(|delta_y| ScrollEvent::Wheel { delta_y }),
        (0.0f64..4.0).prop_map(|dt| ScrollEvent::Tick { dt }),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => arb_event().prop_map(Op::Event),
        1 => (-100.0f64..100.0).prop_map(Op::ScrollBy),
        1 => Just(Op::Top),
        1 => Just(Op::Bottom),
        1 => (0.0f64..300.0, 0.0f64..1000.0)
            .prop_map(|(viewport, total)| Op::Bounds { viewport, total }),
    ]
}

fn arb_config() -> impl Strategy<Value = ScrollConfig> {
    (0.0f64..5.0, 0.1f64..0.99, 0.01f64..1.0, any::<bool>()).prop_map(
        |(inertia_threshold, decay_factor, stop_threshold, inertia_enabled)| ScrollConfig {
            inertia_threshold,
            decay_factor,
            stop_threshold,
            inertia_enabled,
        },
    )
}

fn assert_in_bounds(controller: &ScrollController) -> Result<(), TestCaseError> {
    let offset = controller.offset();
    let min = (controller.viewport_height() - controller.total_height()).min(0.0);
    prop_assert!(offset.is_finite(), "offset {offset} not finite");
    prop_assert!(offset <= 0.0, "offset {offset} above top");
    prop_assert!(offset >= min, "offset {offset} below {min}");
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn offset_stays_clamped(
        config in arb_config(),
        viewport in 0.0f64..300.0,
        total in 0.0f64..1000.0,
        ops in prop::collection::vec(arb_op(), 0..80),
    ) {
        let mut controller = ScrollController::with_bounds(config, viewport, total);
        assert_in_bounds(&controller)?;

        for op in ops {
            match op {
                Op::Event(event) => controller.apply(event),
                Op::ScrollBy(amount) => controller.scroll_by(amount),
                Op::Top => controller.scroll_to_top(),
                Op::Bottom => controller.scroll_to_bottom(),
                Op::Bounds { viewport, total } => controller.set_bounds(viewport, total),
            }
            assert_in_bounds(&controller)?;
        }
    }

    #[test]
    fn inertia_comes_to_rest(
        config in arb_config(),
        start in -100.0f64..0.0,
        delta in -40.0f64..40.0,
    ) {
        let mut controller = ScrollController::with_bounds(config, 100.0, 10_000.0);
        controller.scroll_by(-start);
        controller.pointer_down(0.0);
        controller.pointer_move(delta);
        controller.pointer_up();

        let mut ticks = 0;
        while controller.tick(1.0) {
            ticks += 1;
            prop_assert!(ticks < 10_000, "inertia never stopped");
        }
        prop_assert_eq!(controller.mode(), ScrollMode::Idle);
        prop_assert_eq!(controller.velocity(), 0.0);
        assert_in_bounds(&controller)?;
    }

    #[test]
    fn content_shorter_than_viewport_never_scrolls(
        viewport in 1.0f64..300.0,
        fraction in 0.0f64..1.0,
        ops in prop::collection::vec(arb_event(), 0..40),
    ) {
        let total = viewport * fraction;
        let mut controller = ScrollController::with_bounds(ScrollConfig::default(), viewport, total);
        for event in ops {
            controller.apply(event);
            prop_assert_eq!(controller.offset(), 0.0);
        }
    }
}
