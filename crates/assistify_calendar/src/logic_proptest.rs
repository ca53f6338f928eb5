#[cfg(test)]
mod tests {
    use crate::logic::{compute_free_slots, FreeSlot, WorkingHours};
    use assistify_common::services::CalendarEvent;
    use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc, Weekday};
    use proptest::prelude::*;

    // Fixed scan window: Monday 2025-05-05 plus two weeks.
    fn window_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap()
    }

    fn window_end() -> DateTime<Utc> {
        window_start() + Duration::days(14)
    }

    // (day offset, start minute of day, length in minutes) -> event
    fn build_events(raw: Vec<(i64, i64, i64)>) -> Vec<CalendarEvent> {
        raw.into_iter()
            .enumerate()
            .map(|(i, (day, minute, length))| {
                let start = window_start() + Duration::days(day) + Duration::minutes(minute);
                CalendarEvent {
                    event_id: format!("prop-{}", i),
                    summary: format!("Generated event {}", i),
                    start_time: start,
                    end_time: start + Duration::minutes(length),
                    description: None,
                    location: None,
                }
            })
            .collect()
    }

    fn event_strategy() -> impl Strategy<Value = Vec<(i64, i64, i64)>> {
        prop::collection::vec((0..14i64, 0..1410i64, 15..360i64), 0..8)
    }

    fn day_window(day: NaiveDate, hours: WorkingHours) -> (DateTime<Utc>, DateTime<Utc>) {
        let midnight = Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap());
        (
            midnight + Duration::hours(i64::from(hours.start_hour)),
            midnight + Duration::hours(i64::from(hours.end_hour)),
        )
    }

    fn overlaps_clipped_event(slot: &FreeSlot, event: &CalendarEvent, hours: WorkingHours) -> bool {
        let day = slot.start.date_naive();
        if !(event.start_time.date_naive() <= day && day <= event.end_time.date_naive()) {
            return false;
        }
        let (day_start, day_end) = day_window(day, hours);
        let clipped_start = event.start_time.clamp(day_start, day_end);
        let clipped_end = event.end_time.clamp(day_start, day_end);
        if clipped_start >= clipped_end {
            return false;
        }
        slot.start < clipped_end && slot.end > clipped_start
    }

    proptest! {
        // Every returned slot is at least as long as requested, and its
        // duration field matches its boundaries.
        #[test]
        fn prop_slots_meet_requested_duration(
            raw_events in event_strategy(),
            duration_minutes in 15..240i64,
        ) {
            let events = build_events(raw_events);
            let slots = compute_free_slots(
                &events,
                duration_minutes,
                window_start(),
                window_end(),
                WorkingHours::default(),
            );

            for slot in &slots {
                prop_assert!(slot.duration_minutes >= duration_minutes);
                prop_assert_eq!(
                    slot.duration_minutes,
                    (slot.end - slot.start).num_minutes()
                );
            }
        }

        // Slots stay inside the daily working window.
        #[test]
        fn prop_slots_stay_within_working_hours(
            raw_events in event_strategy(),
            duration_minutes in 15..240i64,
            start_hour in 0..12u32,
            end_hour in 13..23u32,
        ) {
            let events = build_events(raw_events);
            let hours = WorkingHours { start_hour, end_hour };
            let slots = compute_free_slots(
                &events,
                duration_minutes,
                window_start(),
                window_end(),
                hours,
            );

            for slot in &slots {
                prop_assert!(slot.start.time().hour() >= start_hour);
                prop_assert!(slot.end.time() <= chrono::NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap());
                prop_assert_eq!(slot.start.date_naive(), slot.end.date_naive());
            }
        }

        // No slot ever overlaps an event's interval clipped to the slot's day.
        #[test]
        fn prop_slots_never_overlap_events(
            raw_events in event_strategy(),
            duration_minutes in 15..240i64,
        ) {
            let events = build_events(raw_events);
            let hours = WorkingHours::default();
            let slots = compute_free_slots(
                &events,
                duration_minutes,
                window_start(),
                window_end(),
                hours,
            );

            for slot in &slots {
                for event in &events {
                    prop_assert!(
                        !overlaps_clipped_event(slot, event, hours),
                        "slot {:?}..{:?} overlaps event {:?}..{:?}",
                        slot.start, slot.end, event.start_time, event.end_time
                    );
                }
            }
        }

        // Weekends never contribute slots, whatever the event data looks like.
        #[test]
        fn prop_no_weekend_slots(
            raw_events in event_strategy(),
            duration_minutes in 15..240i64,
        ) {
            let events = build_events(raw_events);
            let slots = compute_free_slots(
                &events,
                duration_minutes,
                window_start(),
                window_end(),
                WorkingHours::default(),
            );

            for slot in &slots {
                let weekday = slot.start.date_naive().weekday();
                prop_assert!(weekday != Weekday::Sat && weekday != Weekday::Sun);
            }
        }

        // The concatenated result is in chronological order.
        #[test]
        fn prop_slots_are_chronological(
            raw_events in event_strategy(),
            duration_minutes in 15..240i64,
        ) {
            let events = build_events(raw_events);
            let slots = compute_free_slots(
                &events,
                duration_minutes,
                window_start(),
                window_end(),
                WorkingHours::default(),
            );

            for pair in slots.windows(2) {
                prop_assert!(pair[0].start <= pair[1].start);
            }
        }
    }
}
