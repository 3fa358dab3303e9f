//! Cross-source deduplication of matched records.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::domain::TrainNumber;

use super::matcher::Candidate;

/// Keep one candidate per train number.
///
/// The survivor is the occurrence with the lowest aggregation sequence,
/// i.e. the one from the highest-priority source. It takes the position of
/// the first occurrence of its train number, so output order is stable.
pub fn deduplicate(candidates: Vec<Candidate<'_>>) -> Vec<Candidate<'_>> {
    if candidates.len() <= 1 {
        return candidates;
    }

    let mut result: Vec<Candidate<'_>> = Vec::with_capacity(candidates.len());
    let mut slots: HashMap<&TrainNumber, usize> = HashMap::with_capacity(candidates.len());

    for candidate in candidates {
        match slots.entry(&candidate.record.train_number) {
            Entry::Occupied(slot) => {
                let existing = &mut result[*slot.get()];
                if candidate.sequence() < existing.sequence() {
                    *existing = candidate;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(result.len());
                result.push(candidate);
            }
        }
    }

    result
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{
        MatchKind, Provenance, ScheduleRecord, ServiceCalendar, SourceId, StationCode,
    };
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn records(trains: &[u8]) -> Vec<ScheduleRecord> {
        trains
            .iter()
            .enumerate()
            .map(|(seq, t)| {
                let mut provenance = Provenance::new(SourceId::new("s"), 0);
                provenance.sequence = seq;
                ScheduleRecord {
                    train_number: TrainNumber::parse(&t.to_string()).unwrap(),
                    source_station: StationCode::parse("NDLS").unwrap(),
                    destination_station: StationCode::parse("BCT").unwrap(),
                    service_calendar: ServiceCalendar::daily(),
                    provenance,
                }
            })
            .collect()
    }

    proptest! {
        /// No two survivors share a train number
        #[test]
        fn survivors_unique(trains in prop::collection::vec(0u8..10, 0..40)) {
            let recs = records(&trains);
            let cands: Vec<_> = recs
                .iter()
                .map(|r| Candidate { record: r, kind: MatchKind::Direct })
                .collect();
            let out = deduplicate(cands);

            let mut seen = HashSet::new();
            for c in &out {
                prop_assert!(seen.insert(c.record.train_number.clone()));
            }
            let distinct: HashSet<_> = trains.iter().collect();
            prop_assert_eq!(out.len(), distinct.len());
        }

        /// Each survivor is the lowest-sequence occurrence of its train
        #[test]
        fn survivor_is_first_in_table(trains in prop::collection::vec(0u8..10, 0..40)) {
            let recs = records(&trains);
            // Feed candidates in reverse to make sure order does not decide
            let cands: Vec<_> = recs
                .iter()
                .rev()
                .map(|r| Candidate { record: r, kind: MatchKind::Direct })
                .collect();
            for c in deduplicate(cands) {
                let first = recs
                    .iter()
                    .position(|r| r.train_number == c.record.train_number)
                    .unwrap();
                prop_assert_eq!(c.sequence(), first);
            }
        }
    }
}
