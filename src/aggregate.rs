use std::collections::HashMap;
use std::collections::HashSet;
use std::hash::Hash;

use chrono::{Days, NaiveDate};

use crate::datetime::period_start;
use crate::models::{Action, ActionKind, Bucket};

/// Groups items by key, keeping both the keys and the items of each group in
/// the order they were first seen.
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let k = key(&item);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }

    groups
}

/// Keeps the first submission of every subject. `actions` is expected to be
/// sorted by date, so "first" means earliest.
pub fn dedup_submissions(actions: &[Action]) -> Vec<Action> {
    let submissions = actions.iter().filter(|action| action.kind == ActionKind::Submit);

    group_by(submissions, |action| action.subject.clone())
        .into_iter()
        .filter_map(|(_, members)| members.first().map(|&first| first.clone()))
        .collect()
}

/// Counts submissions per period. Every submission lands in exactly one
/// bucket; buckets come out ordered by period start.
pub fn bucket_submissions(submissions: &[Action], bucket_days: u32) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = group_by(submissions, |action| period_start(&action.date, bucket_days))
        .into_iter()
        .map(|(period_start, members)| Bucket {
            period_start,
            count: members.len(),
            subjects: members.iter().map(|action| action.subject.clone()).collect(),
        })
        .collect();

    buckets.sort_by_key(|bucket| bucket.period_start);
    buckets
}

/// Walks from the first to the last period start in steps of `bucket_days`
/// and adds an empty bucket wherever no bucket exists yet.
///
/// Periods are anchored to the day of the month, so a step does not always
/// land on an existing period start and a filled series can hold an empty
/// bucket right next to a populated one.
pub fn fill_gaps(buckets: &[Bucket], bucket_days: u32) -> Vec<Bucket> {
    let (Some(first), Some(last)) = (
        buckets.iter().map(|b| b.period_start).min(),
        buckets.iter().map(|b| b.period_start).max(),
    ) else {
        return Vec::new();
    };

    let existing: HashSet<NaiveDate> = buckets.iter().map(|b| b.period_start).collect();
    let mut filled = buckets.to_vec();
    let step = Days::new(u64::from(bucket_days.max(1)));

    let mut counter = first;
    while counter < last {
        if !existing.contains(&counter) {
            filled.push(Bucket {
                period_start: counter,
                count: 0,
                subjects: Vec::new(),
            });
        }
        counter = match counter.checked_add_days(step) {
            Some(next) => next,
            None => break,
        };
    }

    filled.sort_by_key(|bucket| bucket.period_start);
    filled
}
