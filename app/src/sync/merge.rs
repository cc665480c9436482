//! Local/remote dataset reconciliation
//!
//! Pure functions that merge two divergent copies of the user's data into
//! one. Conflicts between records sharing an id resolve last-write-wins on
//! the record's modification timestamp; an exact tie keeps the local copy.
//! Records without an id (tolerated malformed input) bypass conflict
//! resolution and are kept as new. The functions are total over well-formed
//! input and have no side effects.

use chrono::{DateTime, Utc};
use fittrack_shared::models::{BodyAnalysis, SyncDataset, Workout, RECENT_EXERCISES_CAP};
use std::collections::{HashMap, HashSet};

/// Merge two workout lists, keyed by id, newer `last_modified` wins.
/// The result is sorted by workout date, newest first.
pub fn merge_workouts(local: Vec<Workout>, remote: Vec<Workout>) -> Vec<Workout> {
    let mut merged = merge_by_id(local, remote, |w| &w.id, Workout::last_modified);
    merged.sort_by(|a, b| b.date.cmp(&a.date));
    merged
}

/// Merge two body-analysis lists, keyed by id, newer `timestamp` wins.
/// The result is sorted by timestamp, newest first.
pub fn merge_body_analyses(
    local: Vec<BodyAnalysis>,
    remote: Vec<BodyAnalysis>,
) -> Vec<BodyAnalysis> {
    let mut merged = merge_by_id(local, remote, |a| &a.id, |a| a.timestamp);
    merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    merged
}

/// Merge two recent-exercise lists: local entries first, then remote,
/// deduplicated by first occurrence and capped at ten entries.
///
/// This intentionally reproduces concatenate-then-dedupe semantics rather
/// than a true recency ordering; the cap applies after deduplication.
pub fn merge_recent_exercises(local: Vec<String>, remote: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for name in local.into_iter().chain(remote) {
        if seen.insert(name.clone()) {
            merged.push(name);
            if merged.len() == RECENT_EXERCISES_CAP {
                break;
            }
        }
    }
    merged
}

/// Merge two datasets field by field. An absent side returns the other
/// unchanged.
pub fn merge_datasets(local: Option<SyncDataset>, remote: Option<SyncDataset>) -> SyncDataset {
    match (local, remote) {
        (Some(local), None) => local,
        (None, Some(remote)) => remote,
        (None, None) => SyncDataset::default(),
        (Some(local), Some(remote)) => SyncDataset {
            workouts: merge_workouts(local.workouts, remote.workouts),
            recent_exercises: merge_recent_exercises(
                local.recent_exercises,
                remote.recent_exercises,
            ),
            body_analyses: merge_body_analyses(local.body_analyses, remote.body_analyses),
        },
    }
}

/// Id-keyed last-write-wins merge shared by workouts and body analyses.
///
/// Local entries seed the result; a remote entry with an unknown id is
/// inserted, and one with a known id replaces the local entry only when its
/// modification time is strictly later. Entries with an empty id are kept
/// verbatim on both sides.
fn merge_by_id<T, K, M>(local: Vec<T>, remote: Vec<T>, key: K, modified: M) -> Vec<T>
where
    K: Fn(&T) -> &str,
    M: Fn(&T) -> DateTime<Utc>,
{
    let mut merged: Vec<T> = Vec::with_capacity(local.len() + remote.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in local {
        let id = key(&record).to_string();
        if id.is_empty() {
            merged.push(record);
            continue;
        }
        match index.get(&id) {
            // Duplicate id within one side: the later occurrence wins,
            // matching map-construction semantics.
            Some(&at) => merged[at] = record,
            None => {
                index.insert(id, merged.len());
                merged.push(record);
            }
        }
    }

    for record in remote {
        let id = key(&record).to_string();
        if id.is_empty() {
            merged.push(record);
            continue;
        }
        match index.get(&id) {
            Some(&at) => {
                if modified(&record) > modified(&merged[at]) {
                    merged[at] = record;
                }
            }
            None => {
                index.insert(id, merged.len());
                merged.push(record);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use fittrack_shared::models::{FitnessLevel, OverallHealth};
    use proptest::prelude::*;

    fn ts(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    fn workout(id: &str, date: &str, updated_at: Option<&str>) -> Workout {
        Workout {
            id: id.to_string(),
            date: ts(date),
            updated_at: updated_at.map(ts),
            device_id: "dev".to_string(),
            exercises: vec![],
        }
    }

    fn analysis(id: &str, timestamp: &str) -> BodyAnalysis {
        BodyAnalysis {
            id: id.to_string(),
            timestamp: ts(timestamp),
            body_fat_percentage: 20.0,
            muscle_mass: 40.0,
            fitness_level: FitnessLevel::Intermediate,
            overall_health: OverallHealth::Good,
            confidence: 80.0,
            notes: None,
        }
    }

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_later_updated_at_wins() {
        let local = vec![workout("a", "2024-01-01T00:00:00Z", Some("2024-01-01T00:00:00Z"))];
        let remote = vec![workout("a", "2024-01-01T00:00:00Z", Some("2024-01-05T00:00:00Z"))];

        let merged = merge_workouts(local, remote.clone());
        assert_eq!(merged, remote);
    }

    #[test]
    fn test_later_local_copy_survives() {
        let local = vec![workout("a", "2024-01-01T00:00:00Z", Some("2024-01-09T00:00:00Z"))];
        let remote = vec![workout("a", "2024-01-01T00:00:00Z", Some("2024-01-05T00:00:00Z"))];

        let merged = merge_workouts(local.clone(), remote);
        assert_eq!(merged, local);
    }

    #[test]
    fn test_exact_tie_keeps_local() {
        let mut local = workout("a", "2024-01-01T00:00:00Z", Some("2024-01-05T00:00:00Z"));
        local.device_id = "local-device".to_string();
        let mut remote = local.clone();
        remote.device_id = "remote-device".to_string();

        let merged = merge_workouts(vec![local], vec![remote]);
        assert_eq!(merged[0].device_id, "local-device");
    }

    #[test]
    fn test_updated_at_falls_back_to_date() {
        // Local has no updated_at; its date is older than the remote edit.
        let local = vec![workout("a", "2024-01-01T00:00:00Z", None)];
        let remote = vec![workout("a", "2024-01-01T00:00:00Z", Some("2024-01-02T00:00:00Z"))];

        let merged = merge_workouts(local, remote.clone());
        assert_eq!(merged, remote);
    }

    #[test]
    fn test_disjoint_ids_union_sorted_by_date() {
        let local = vec![workout("a", "2024-01-01T00:00:00Z", None)];
        let remote = vec![workout("b", "2024-02-01T00:00:00Z", None)];

        let merged = merge_workouts(local, remote);
        assert_eq!(merged.len(), 2);
        // Newest first
        assert_eq!(merged[0].id, "b");
        assert_eq!(merged[1].id, "a");
    }

    #[test]
    fn test_empty_id_records_are_kept_as_new() {
        let local = vec![workout("", "2024-01-01T00:00:00Z", None)];
        let remote = vec![workout("", "2024-01-02T00:00:00Z", None)];

        let merged = merge_workouts(local, remote);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_recent_exercises_concatenation_order() {
        let merged = merge_recent_exercises(names(&["x", "y"]), names(&["y", "z"]));
        assert_eq!(merged, names(&["x", "y", "z"]));
    }

    #[test]
    fn test_recent_exercises_capped_at_ten() {
        let local: Vec<String> = (0..8).map(|i| format!("local-{i}")).collect();
        let remote: Vec<String> = (0..8).map(|i| format!("remote-{i}")).collect();

        let merged = merge_recent_exercises(local.clone(), remote);
        assert_eq!(merged.len(), RECENT_EXERCISES_CAP);
        // Local entries come first
        assert_eq!(merged[..8], local[..]);
    }

    #[test]
    fn test_body_analyses_sorted_newest_first() {
        let local = vec![analysis("a", "2024-01-01T00:00:00Z")];
        let remote = vec![
            analysis("b", "2024-03-01T00:00:00Z"),
            analysis("c", "2024-02-01T00:00:00Z"),
        ];

        let merged = merge_body_analyses(local, remote);
        let ids: Vec<&str> = merged.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_merge_datasets_absent_sides() {
        let dataset = SyncDataset {
            workouts: vec![workout("a", "2024-01-01T00:00:00Z", None)],
            recent_exercises: names(&["Squat"]),
            body_analyses: vec![],
        };

        assert_eq!(merge_datasets(Some(dataset.clone()), None), dataset);
        assert_eq!(merge_datasets(None, Some(dataset.clone())), dataset);
        assert_eq!(merge_datasets(None, None), SyncDataset::default());
    }

    #[test]
    fn test_merge_datasets_merges_all_collections() {
        let local = SyncDataset {
            workouts: vec![workout("a", "2024-01-01T00:00:00Z", None)],
            recent_exercises: names(&["Squat"]),
            body_analyses: vec![analysis("x", "2024-01-01T00:00:00Z")],
        };
        let remote = SyncDataset {
            workouts: vec![workout("b", "2024-01-02T00:00:00Z", None)],
            recent_exercises: names(&["Bench Press"]),
            body_analyses: vec![analysis("y", "2024-01-02T00:00:00Z")],
        };

        let merged = merge_datasets(Some(local), Some(remote));
        assert_eq!(merged.workouts.len(), 2);
        assert_eq!(merged.recent_exercises, names(&["Squat", "Bench Press"]));
        assert_eq!(merged.body_analyses.len(), 2);
    }

    // Strategy helpers for property tests

    fn arb_workout() -> impl Strategy<Value = Workout> {
        ("[a-e]", 0i64..1_000_000, proptest::option::of(0i64..1_000_000)).prop_map(
            |(id, date_secs, updated_secs)| Workout {
                id,
                date: DateTime::from_timestamp(date_secs, 0).unwrap(),
                updated_at: updated_secs.map(|s| DateTime::from_timestamp(s, 0).unwrap()),
                device_id: "dev".to_string(),
                exercises: vec![],
            },
        )
    }

    fn dedupe_by_id(workouts: Vec<Workout>) -> Vec<Workout> {
        let mut by_id: HashMap<String, Workout> = HashMap::new();
        for w in workouts {
            by_id.insert(w.id.clone(), w);
        }
        let mut list: Vec<Workout> = by_id.into_values().collect();
        list.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        list
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_merge_is_idempotent(workouts in proptest::collection::vec(arb_workout(), 0..20)) {
            // Well-formed lists have unique ids; merging such a list with
            // itself changes nothing beyond sort order.
            let workouts = dedupe_by_id(workouts);
            let merged = merge_workouts(workouts.clone(), workouts.clone());
            prop_assert_eq!(dedupe_by_id(merged), workouts);
        }

        #[test]
        fn prop_merged_workouts_sorted_newest_first(
            local in proptest::collection::vec(arb_workout(), 0..20),
            remote in proptest::collection::vec(arb_workout(), 0..20),
        ) {
            let merged = merge_workouts(local, remote);
            for pair in merged.windows(2) {
                prop_assert!(pair[0].date >= pair[1].date);
            }
        }

        #[test]
        fn prop_merge_never_loses_an_id(
            local in proptest::collection::vec(arb_workout(), 0..20),
            remote in proptest::collection::vec(arb_workout(), 0..20),
        ) {
            let expected: HashSet<String> = local.iter().chain(&remote).map(|w| w.id.clone()).collect();
            let merged = merge_workouts(local, remote);
            let actual: HashSet<String> = merged.iter().map(|w| w.id.clone()).collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_recent_exercises_capped_and_unique(
            local in proptest::collection::vec("[a-h]", 0..30),
            remote in proptest::collection::vec("[a-h]", 0..30),
        ) {
            let merged = merge_recent_exercises(local, remote);
            prop_assert!(merged.len() <= RECENT_EXERCISES_CAP);
            let unique: HashSet<&String> = merged.iter().collect();
            prop_assert_eq!(unique.len(), merged.len());
        }
    }
}
