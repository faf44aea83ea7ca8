use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use widget_core::prelude::*;

fn day(month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, d).expect("valid date")
}

fn is_aligned(value: f64, min: f64, step: f64) -> bool {
    let steps = (value - min) / step;
    (steps - steps.round()).abs() < 1e-9
}

#[test]
fn any_two_clicks_commit_an_ordered_range() {
    let days: Vec<NaiveDate> = (1..=28).step_by(3).map(|d| day(2, d)).collect();
    for first in &days {
        for second in &days {
            let mut state = RangePickerState::new(RangePickerConfig::default(), None, day(2, 1));
            reduce_range_picker(&mut state, RangePickerAction::SelectDate(*first)).expect("first");
            let effects = reduce_range_picker(&mut state, RangePickerAction::SelectDate(*second))
                .expect("second");

            let value = state.value().expect("committed");
            assert!(value.is_ordered(), "{first} then {second} gave {value:?}");
            assert_eq!(value.start.date(), *first.min(second));
            assert_eq!(value.end.date(), *first.max(second));
            let changes = effects
                .iter()
                .filter(|effect| matches!(effect, RangePickerEffect::Change { .. }))
                .count();
            assert_eq!(changes, 1);
        }
    }
}

#[test]
fn confirming_twice_fires_change_once() {
    let times = [
        NaiveTime::from_hms_opt(0, 0, 0).expect("time"),
        NaiveTime::from_hms_opt(8, 15, 0).expect("time"),
        NaiveTime::from_hms_opt(23, 59, 59).expect("time"),
    ];
    for start_time in times {
        for end_time in times {
            let mut state = RangePickerState::new(
                RangePickerConfig {
                    show_time: true,
                    ..RangePickerConfig::default()
                },
                None,
                day(1, 1),
            );
            reduce_range_picker(&mut state, RangePickerAction::SelectDate(day(1, 3))).expect("a");
            reduce_range_picker(&mut state, RangePickerAction::SelectDate(day(1, 3))).expect("b");
            for (side, time) in [(RangeSide::Start, start_time), (RangeSide::End, end_time)] {
                reduce_range_picker(&mut state, RangePickerAction::SetTime { side, time })
                    .expect("time");
            }

            let mut change_count = 0;
            for _ in 0..2 {
                let effects =
                    reduce_range_picker(&mut state, RangePickerAction::Confirm).expect("confirm");
                change_count += effects
                    .iter()
                    .filter(|effect| matches!(effect, RangePickerEffect::Change { .. }))
                    .count();
            }
            assert_eq!(change_count, 1);
            let value = state.value().expect("committed");
            assert!(value.is_ordered(), "{start_time}..{end_time} gave {value:?}");
        }
    }
}

#[test]
fn dragged_values_stay_aligned_and_bounded() {
    let steps = [1.0, 2.0, 3.0, 0.5];
    for step in steps {
        let config = SliderConfig {
            min: 0.0,
            max: 10.0,
            step,
            ..SliderConfig::default()
        };
        let mut state = SliderState::new(config, None).expect("slider");
        reduce_slider(&mut state, SliderAction::Resize { width_px: 200.0 });
        for pointer_x in (-60..=260).step_by(7) {
            reduce_slider(
                &mut state,
                SliderAction::PointerDown {
                    target: DragTarget::Handle(Handle::Upper),
                    pointer_x: 0.0,
                },
            );
            reduce_slider(
                &mut state,
                SliderAction::PointerMove {
                    pointer_x: f64::from(pointer_x),
                },
            );
            let effects = reduce_slider(
                &mut state,
                SliderAction::PointerUp {
                    pointer_x: f64::from(pointer_x),
                },
            );

            let SliderValue::Single(value) = state.value() else {
                panic!("single slider produced a range");
            };
            assert!((0.0..=10.0).contains(&value), "step {step}: {value}");
            assert!(is_aligned(value, 0.0, step), "step {step}: {value}");
            let after_changes = effects
                .iter()
                .filter(|effect| matches!(effect, SliderEffect::AfterChange(_)))
                .count();
            assert_eq!(after_changes, 1);
        }
    }
}

#[test]
fn range_handles_never_cross() {
    let config = SliderConfig {
        range: true,
        default_value: SliderValue::Range(3.0, 6.0),
        ..SliderConfig::default()
    };
    for handle in [Handle::Lower, Handle::Upper] {
        for pointer_x in (-200..=200).step_by(13) {
            let mut state = SliderState::new(config.clone(), None).expect("slider");
            reduce_slider(&mut state, SliderAction::Resize { width_px: 100.0 });
            reduce_slider(
                &mut state,
                SliderAction::PointerDown {
                    target: DragTarget::Handle(handle),
                    pointer_x: 0.0,
                },
            );
            reduce_slider(
                &mut state,
                SliderAction::PointerUp {
                    pointer_x: f64::from(pointer_x),
                },
            );
            let SliderValue::Range(lower, upper) = state.value() else {
                panic!("range slider produced a single value");
            };
            assert!(lower <= upper, "{handle:?} moved by {pointer_x}: {lower} > {upper}");
            assert!(lower >= 0.0 && upper <= 10.0);
        }
    }
}

#[test]
fn bar_drag_preserves_span_within_bounds() {
    let config = SliderConfig {
        range: true,
        default_value: SliderValue::Range(2.0, 5.0),
        ..SliderConfig::default()
    };
    for pointer_x in (-150..=150).step_by(10) {
        let mut state = SliderState::new(config.clone(), None).expect("slider");
        reduce_slider(&mut state, SliderAction::Resize { width_px: 100.0 });
        reduce_slider(
            &mut state,
            SliderAction::PointerDown {
                target: DragTarget::Bar,
                pointer_x: 0.0,
            },
        );
        reduce_slider(
            &mut state,
            SliderAction::PointerUp {
                pointer_x: f64::from(pointer_x),
            },
        );
        let SliderValue::Range(lower, upper) = state.value() else {
            panic!("range slider produced a single value");
        };
        assert_eq!(upper - lower, 3.0, "moved by {pointer_x}");
        assert!(lower >= 0.0 && upper <= 10.0);
    }
}

#[test]
fn keyboard_walk_stays_on_the_grid() {
    let config = SliderConfig {
        min: 1.0,
        max: 2.0,
        step: 0.1,
        default_value: SliderValue::Single(1.0),
        ..SliderConfig::default()
    };
    let mut state = SliderState::new(config, None).expect("slider");
    let keys = [
        SliderKey::Increase,
        SliderKey::Increase,
        SliderKey::PageIncrease,
        SliderKey::Decrease,
        SliderKey::Home,
        SliderKey::End,
        SliderKey::PageDecrease,
    ];
    for key in keys {
        reduce_slider(
            &mut state,
            SliderAction::Key {
                handle: Handle::Upper,
                key,
            },
        );
        let SliderValue::Single(value) = state.value() else {
            panic!("single slider produced a range");
        };
        assert!((1.0..=2.0).contains(&value), "{key:?}: {value}");
        assert!(is_aligned(value, 1.0, 0.1), "{key:?}: {value}");
    }
}

#[test]
fn handle_stays_under_the_pointer_on_uneven_spans() {
    for step in [3.0, 4.0, 7.0] {
        let config = SliderConfig {
            min: 0.0,
            max: 10.0,
            step,
            default_value: SliderValue::Single(0.0),
            ..SliderConfig::default()
        };
        for pointer_x in (0..=100).step_by(5) {
            let mut state = SliderState::new(config.clone(), None).expect("slider");
            reduce_slider(&mut state, SliderAction::Resize { width_px: 100.0 });
            reduce_slider(
                &mut state,
                SliderAction::PointerDown {
                    target: DragTarget::Handle(Handle::Upper),
                    pointer_x: 0.0,
                },
            );
            reduce_slider(
                &mut state,
                SliderAction::PointerUp {
                    pointer_x: f64::from(pointer_x),
                },
            );

            let geometry = *state.geometry();
            let SliderValue::Single(value) = state.value() else {
                panic!("single slider produced a range");
            };
            let rendered_px = geometry.percent_of(value) / 100.0 * geometry.width_px();
            let reachable_px = f64::from(pointer_x).min(geometry.offset_of(geometry.max_aligned()));
            assert!(
                (rendered_px - reachable_px).abs() <= geometry.segment_px() / 2.0 + 1e-9,
                "step {step}, pointer {pointer_x}: {value} drawn at {rendered_px}px"
            );
        }
    }
}

#[test]
fn typed_edit_after_a_commit_is_what_ok_confirms() {
    for typed_end in [day(1, 7), day(1, 20), day(2, 29)] {
        let mut state = RangePickerState::new(
            RangePickerConfig {
                show_time: true,
                ..RangePickerConfig::default()
            },
            None,
            day(1, 1),
        );
        for action in [
            RangePickerAction::SelectDate(day(1, 5)),
            RangePickerAction::SelectDate(day(1, 10)),
            RangePickerAction::Confirm,
            RangePickerAction::InputChange {
                side: RangeSide::End,
                text: format!("{typed_end} 00:00:00"),
            },
        ] {
            reduce_range_picker(&mut state, action).expect("reduce");
        }
        let effects = reduce_range_picker(&mut state, RangePickerAction::Confirm).expect("ok");

        let expected = DateRangeValue::from_dates(day(1, 5), typed_end);
        assert_eq!(state.value(), Some(expected));
        let ok = effects.iter().find_map(|effect| match effect {
            RangePickerEffect::Ok { value, .. } => Some(*value),
            _ => None,
        });
        assert_eq!(ok, Some(expected), "typed end {typed_end}");
    }
}

#[test]
fn controlled_ok_matches_the_change_it_follows() {
    let host = DateRangeValue::from_dates(day(3, 1), day(3, 2));
    let days = [day(1, 4), day(1, 9), day(1, 30)];
    for first in days {
        for second in days {
            let mut state = RangePickerState::new(
                RangePickerConfig {
                    show_time: true,
                    ..RangePickerConfig::default()
                },
                Some(host),
                day(1, 1),
            );
            reduce_range_picker(&mut state, RangePickerAction::SelectDate(first)).expect("a");
            reduce_range_picker(&mut state, RangePickerAction::SelectDate(second)).expect("b");
            let effects =
                reduce_range_picker(&mut state, RangePickerAction::Confirm).expect("confirm");

            let expected = DateRangeValue::from_dates(first.min(second), first.max(second));
            let ok = effects.iter().find_map(|effect| match effect {
                RangePickerEffect::Ok { value, .. } => Some(*value),
                _ => None,
            });
            assert_eq!(ok, Some(expected), "{first} then {second}");
            assert_eq!(state.value(), Some(host));
        }
    }
}
