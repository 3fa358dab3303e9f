//! Joining matches with the timetable and ordering the results.

use crate::domain::{RouteMatch, TravelDuration};

use super::matcher::Candidate;
use super::timetable::Timetable;

/// Build the final, ordered route matches.
///
/// Each candidate is left-joined with its timetable entry; a missing entry
/// leaves times and duration unset. Results are ordered by
/// [`RouteMatch::display_order`]: direct first, then departure time with
/// unknown times last, then train number.
pub fn assemble(candidates: Vec<Candidate<'_>>, timetable: &Timetable) -> Vec<RouteMatch> {
    let mut matches: Vec<RouteMatch> = candidates
        .into_iter()
        .map(|c| {
            let record = c.record;
            let entry = timetable.get(&record.train_number);
            let departure_time = entry.and_then(|t| t.departure_time);
            let arrival_time = entry.and_then(|t| t.arrival_time);

            RouteMatch {
                train_number: record.train_number.clone(),
                source_station: record.source_station.clone(),
                destination_station: record.destination_station.clone(),
                departure_time,
                arrival_time,
                travel_duration: TravelDuration::between_opt(departure_time, arrival_time),
                match_kind: c.kind,
                provenance: record.provenance.clone(),
            }
        })
        .collect();

    matches.sort_by(|a, b| a.display_order(b));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ClockTime, MatchKind, Provenance, ScheduleRecord, ServiceCalendar, SourceId,
        StationCode, TimetableRecord, TrainNumber,
    };

    fn record(train: &str, from: &str) -> ScheduleRecord {
        ScheduleRecord {
            train_number: TrainNumber::parse(train).unwrap(),
            source_station: StationCode::parse(from).unwrap(),
            destination_station: StationCode::parse("BCT").unwrap(),
            service_calendar: ServiceCalendar::daily(),
            provenance: Provenance::new(SourceId::new("schedules"), 0),
        }
    }

    fn tt(entries: &[(&str, &str, &str)]) -> Timetable {
        Timetable::from_records(entries.iter().map(|(n, d, a)| TimetableRecord {
            train_number: TrainNumber::parse(n).unwrap(),
            departure_time: ClockTime::parse(d).ok(),
            arrival_time: ClockTime::parse(a).ok(),
        }))
        .0
    }

    fn numbers(matches: &[RouteMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.train_number.as_str()).collect()
    }

    #[test]
    fn joins_times_and_computes_duration() {
        let r = record("101", "NDLS");
        let out = assemble(
            vec![Candidate {
                record: &r,
                kind: MatchKind::Direct,
            }],
            &tt(&[("101", "23:50", "00:10")]),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].departure_time, ClockTime::from_hm(23, 50));
        assert_eq!(out[0].arrival_time, ClockTime::from_hm(0, 10));
        assert_eq!(out[0].travel_duration.unwrap().to_string(), "0:20");
    }

    #[test]
    fn missing_timetable_leaves_fields_empty() {
        let r = record("101", "NDLS");
        let out = assemble(
            vec![Candidate {
                record: &r,
                kind: MatchKind::Direct,
            }],
            &Timetable::default(),
        );
        assert!(out[0].departure_time.is_none());
        assert!(out[0].arrival_time.is_none());
        assert!(out[0].travel_duration.is_none());
    }

    #[test]
    fn unparsable_arrival_gives_no_duration() {
        let r = record("101", "NDLS");
        let out = assemble(
            vec![Candidate {
                record: &r,
                kind: MatchKind::Direct,
            }],
            &tt(&[("101", "10:00", "--")]),
        );
        assert_eq!(out[0].departure_time, ClockTime::from_hm(10, 0));
        assert!(out[0].travel_duration.is_none());
    }

    #[test]
    fn ordering_kind_then_departure_then_number() {
        let recs = [
            record("500", "KOTA"), // intermediate, 06:00
            record("400", "NDLS"), // direct, no time
            record("300", "NDLS"), // direct, 18:00
            record("200", "NDLS"), // direct, 07:00
            record("100", "NDLS"), // direct, 18:00
            record("050", "KOTA"), // intermediate, no time
        ];
        let kinds = [
            MatchKind::Intermediate,
            MatchKind::Direct,
            MatchKind::Direct,
            MatchKind::Direct,
            MatchKind::Direct,
            MatchKind::Intermediate,
        ];
        let candidates = recs
            .iter()
            .zip(kinds)
            .map(|(record, kind)| Candidate { record, kind })
            .collect();
        let timetable = tt(&[
            ("500", "06:00", "10:00"),
            ("300", "18:00", "06:00"),
            ("200", "07:00", "12:00"),
            ("100", "18:00", "22:00"),
        ]);

        let out = assemble(candidates, &timetable);
        assert_eq!(numbers(&out), vec!["200", "100", "300", "400", "500", "050"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{
        ClockTime, MatchKind, Provenance, ScheduleRecord, ServiceCalendar, SourceId,
        StationCode, TimetableRecord, TrainNumber,
    };
    use proptest::prelude::*;

    proptest! {
        /// Direct matches always precede intermediate ones
        #[test]
        fn direct_first(
            rows in prop::collection::vec((any::<bool>(), prop::option::of(0u32..1440)), 0..30)
        ) {
            let recs: Vec<ScheduleRecord> = rows
                .iter()
                .enumerate()
                .map(|(i, _)| ScheduleRecord {
                    train_number: TrainNumber::parse(&i.to_string()).unwrap(),
                    source_station: StationCode::parse("NDLS").unwrap(),
                    destination_station: StationCode::parse("BCT").unwrap(),
                    service_calendar: ServiceCalendar::daily(),
                    provenance: Provenance::new(SourceId::new("s"), 0),
                })
                .collect();
            let candidates = recs
                .iter()
                .zip(&rows)
                .map(|(record, (direct, _))| Candidate {
                    record,
                    kind: if *direct { MatchKind::Direct } else { MatchKind::Intermediate },
                })
                .collect();
            let (timetable, _) = Timetable::from_records(rows.iter().enumerate().filter_map(
                |(i, (_, dep))| {
                    let dep = (*dep)?;
                    Some(TimetableRecord {
                        train_number: TrainNumber::parse(&i.to_string()).unwrap(),
                        departure_time: ClockTime::from_hm(dep / 60, dep % 60),
                        arrival_time: None,
                    })
                },
            ));

            let out = assemble(candidates, &timetable);
            prop_assert_eq!(out.len(), rows.len());
            let first_intermediate = out
                .iter()
                .position(|m| m.match_kind == MatchKind::Intermediate)
                .unwrap_or(out.len());
            prop_assert!(out[first_intermediate..]
                .iter()
                .all(|m| m.match_kind == MatchKind::Intermediate));
            for pair in out.windows(2) {
                prop_assert!(pair[0].display_order(&pair[1]).is_le());
            }
        }
    }
}
