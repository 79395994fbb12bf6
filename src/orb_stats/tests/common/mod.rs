#![allow(dead_code)]

use chrono::{Days, NaiveDate, NaiveTime};
use proptest::prelude::*;

use orb_data::models::{BoxColor, Dataset, Direction, DirectionColumn, OrbRow, TimeColumn};
use orb_stats::{DateRange, Predicate, Selection, View};

pub fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

pub fn day(offset: u64) -> NaiveDate {
    base_date() + Days::new(offset)
}

/// Five-minute slots between 09:30 and 10:25.
pub fn slot(i: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(9, 30, 0).expect("valid time") + chrono::Duration::minutes(5 * i as i64)
}

pub fn direction() -> impl Strategy<Value = Direction> + Clone {
    prop_oneof![Just(Direction::Long), Just(Direction::Short)]
}

pub fn box_color() -> impl Strategy<Value = BoxColor> + Clone {
    prop_oneof![
        Just(BoxColor::Green),
        Just(BoxColor::Red),
        Just(BoxColor::Neutral)
    ]
}

pub fn time() -> impl Strategy<Value = NaiveTime> + Clone {
    (0u32..12).prop_map(slot)
}

/// Mostly finite, occasionally infinite.
pub fn pct() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -2.0f64..4.0,
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

pub fn row() -> impl Strategy<Value = OrbRow> {
    (
        proptest::option::of((0u64..40).prop_map(day)),
        proptest::option::of(direction()),
        proptest::option::of(time()),
        proptest::option::of(direction()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(box_color()),
        proptest::option::of(direction()),
        (
            proptest::option::of(time()),
            proptest::option::of(time()),
            proptest::option::of(time()),
        ),
        (proptest::option::of(pct()), proptest::option::of(pct())),
        (proptest::option::of(time()), proptest::option::of(time())),
    )
        .prop_map(
            |(date, ocd, oct, ord, ot, bc, rcd, (rh, rl, oo), (ret, ext), (rt, et))| OrbRow {
                date,
                orb_conf_direction: ocd,
                orb_conf_time: oct,
                orb_range_direction: ord,
                orb_true: ot,
                box_color: bc,
                range_conf_direction: rcd,
                range_high_time: rh,
                range_low_time: rl,
                orb_open_touch_time: oo,
                max_ret_pct: ret,
                max_ext_pct: ext,
                max_ret_time: rt,
                max_ext_time: et,
            },
        )
}

pub fn dataset() -> impl Strategy<Value = Dataset> {
    proptest::collection::vec(row(), 0..40).prop_map(Dataset::from_rows)
}

pub fn selection<T, S>(values: S) -> impl Strategy<Value = Selection<T>>
where
    T: Clone + std::fmt::Debug + 'static,
    S: Strategy<Value = T> + Clone + 'static,
{
    prop_oneof![
        Just(Selection::Inactive),
        values.clone().prop_map(Selection::Value),
        proptest::collection::vec(values, 0..3).prop_map(Selection::AnyOf),
    ]
}

pub fn predicate() -> impl Strategy<Value = Predicate> {
    let weekday = prop_oneof![
        Just(chrono::Weekday::Mon),
        Just(chrono::Weekday::Tue),
        Just(chrono::Weekday::Wed),
        Just(chrono::Weekday::Thu),
        Just(chrono::Weekday::Fri),
    ];
    prop_oneof![
        selection(direction()).prop_map(|selection| Predicate::Direction {
            column: DirectionColumn::OrbConfDirection,
            selection,
        }),
        selection(direction()).prop_map(|selection| Predicate::Direction {
            column: DirectionColumn::RangeConfDirection,
            selection,
        }),
        selection(box_color()).prop_map(Predicate::BoxColor),
        selection(any::<bool>()).prop_map(Predicate::OrbTrue),
        selection(time()).prop_map(|selection| Predicate::Time {
            column: TimeColumn::OrbConfTime,
            selection,
        }),
        selection(weekday).prop_map(Predicate::Weekday),
        (0u64..40, 0u64..40)
            .prop_map(|(a, b)| Predicate::DateRange(DateRange::new(day(a), day(b)))),
    ]
}

/// Row identities of a view, for comparing two views of one dataset.
pub fn ids(view: &View<'_>) -> Vec<*const OrbRow> {
    view.rows().iter().map(|r| *r as *const OrbRow).collect()
}
