// Total ordering helpers shared by the selectors

use std::cmp::Ordering;

/// Custom wrapper to make f64 implement Eq and Ord
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct F64Wrapper(pub f64);

impl Eq for F64Wrapper {}

impl PartialOrd for F64Wrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for F64Wrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Search key ordered by value first, then by station id.
///
/// Ascending order puts the smallest value first and, among equal values,
/// the lexicographically smallest id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey {
    pub value: F64Wrapper,
    pub tie: String,
}

impl RankKey {
    pub fn new<S: Into<String>>(value: f64, tie: S) -> Self {
        Self {
            value: F64Wrapper(value),
            tie: tie.into(),
        }
    }
}

/// Picks the entry with the largest score, preferring the smallest id on ties
pub fn max_by_score_then_id<'a, I>(entries: I) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    entries.into_iter().fold(None, |best, (id, score)| match best {
        None => Some((id, score)),
        Some((best_id, best_score)) => match score.total_cmp(&best_score) {
            Ordering::Greater => Some((id, score)),
            Ordering::Equal if id < best_id => Some((id, score)),
            _ => Some((best_id, best_score)),
        },
    })
}
