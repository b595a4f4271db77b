//! Whole-unit calendar arithmetic on naive moments.

use chrono::{Datelike, Months, NaiveDateTime, TimeDelta, Timelike};

use etl_model::{IntervalUnit, TimeInterval};

/// Number of whole `unit`s elapsed from `from` to `to`.
///
/// Truncates toward zero, so the result is negative when `to` is earlier.
/// Years and months are calendar-aware: Jan 31 to Feb 28 is zero whole
/// months, Jan 31 to Mar 1 is one.
pub fn elapsed_whole_units(from: NaiveDateTime, to: NaiveDateTime, unit: IntervalUnit) -> i64 {
    let delta = to - from;
    match unit {
        IntervalUnit::Year => elapsed_months(from, to) / 12,
        IntervalUnit::Month => elapsed_months(from, to),
        IntervalUnit::Week => delta.num_weeks(),
        IntervalUnit::Day => delta.num_days(),
        IntervalUnit::Hour => delta.num_hours(),
        IntervalUnit::Minute => delta.num_minutes(),
        IntervalUnit::Second => delta.num_seconds(),
        IntervalUnit::Millisecond => delta.num_milliseconds(),
    }
}

fn elapsed_months(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let months = i64::from(to.year() - from.year()) * 12 + i64::from(to.month())
        - i64::from(from.month());
    let from_offset = offset_in_month(from);
    let to_offset = offset_in_month(to);
    if months > 0 && to_offset < from_offset {
        months - 1
    } else if months < 0 && to_offset > from_offset {
        months + 1
    } else {
        months
    }
}

/// Position inside the month, comparable across months.
fn offset_in_month(moment: NaiveDateTime) -> (u32, u32, u32, u32, u32) {
    (
        moment.day(),
        moment.hour(),
        moment.minute(),
        moment.second(),
        moment.nanosecond(),
    )
}

/// Moves `moment` by `amount` units (negative moves backwards).
///
/// Month arithmetic clamps to the end of shorter months. Returns `None` on
/// overflow.
pub fn add_units(
    moment: NaiveDateTime,
    unit: IntervalUnit,
    amount: i64,
) -> Option<NaiveDateTime> {
    match unit {
        IntervalUnit::Year => add_months(moment, amount.checked_mul(12)?),
        IntervalUnit::Month => add_months(moment, amount),
        IntervalUnit::Week => moment.checked_add_signed(TimeDelta::try_weeks(amount)?),
        IntervalUnit::Day => moment.checked_add_signed(TimeDelta::try_days(amount)?),
        IntervalUnit::Hour => moment.checked_add_signed(TimeDelta::try_hours(amount)?),
        IntervalUnit::Minute => moment.checked_add_signed(TimeDelta::try_minutes(amount)?),
        IntervalUnit::Second => moment.checked_add_signed(TimeDelta::try_seconds(amount)?),
        IntervalUnit::Millisecond => {
            moment.checked_add_signed(TimeDelta::try_milliseconds(amount)?)
        }
    }
}

fn add_months(moment: NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    let months = Months::new(u32::try_from(amount.unsigned_abs()).ok()?);
    if amount >= 0 {
        moment.checked_add_months(months)
    } else {
        moment.checked_sub_months(months)
    }
}

/// Index of the bucket `moment` falls in, counting from `anchor`.
///
/// Buckets are `interval.count()` units wide. Moments before the anchor have
/// no bucket.
pub fn bucket_index(
    anchor: NaiveDateTime,
    moment: NaiveDateTime,
    interval: TimeInterval,
) -> Option<u64> {
    let units = elapsed_whole_units(anchor, moment, interval.unit());
    let units = u64::try_from(units).ok()?;
    Some(units / u64::from(interval.count()))
}

/// Start of bucket `index` relative to `anchor` (which may be negative).
pub fn bucket_start(
    anchor: NaiveDateTime,
    index: i64,
    interval: TimeInterval,
) -> Option<NaiveDateTime> {
    let units = index.checked_mul(i64::from(interval.count()))?;
    add_units(anchor, interval.unit(), units)
}
