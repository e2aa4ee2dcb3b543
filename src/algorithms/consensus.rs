// Consensus aggregator: reconciles the per-algorithm picks into one recommendation

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::error::EngineError;
use crate::models::{Algorithm, AlgorithmResult, Recommendation, Score, Station};

pub const UNANIMOUS: &str = "all algorithms agree";

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    votes: usize,
    score: Score,
}

/// Validates the results against the candidate list and picks the winner.
///
/// The results must hold exactly one entry per [`Algorithm`], each naming a
/// station from `stations`. The winner is, in order of precedence:
/// 1. the station every algorithm picked;
/// 2. otherwise the station with the most votes;
/// 3. on a vote tie, the larger summed score of the algorithms behind it;
/// 4. on a remaining tie, the lexicographically smallest station id.
pub fn reconcile(
    mut results: Vec<AlgorithmResult>,
    stations: &[Station],
) -> Result<Recommendation, EngineError> {
    if results.is_empty() {
        return Err(EngineError::NoResults);
    }

    let by_id: HashMap<&str, &Station> = stations.iter().map(|s| (s.id.as_str(), s)).collect();
    if let Some(bad) = results
        .iter()
        .find(|result| !by_id.contains_key(result.station_id.as_str()))
    {
        return Err(EngineError::InconsistentResult {
            algorithm: bad.algorithm,
            station_id: bad.station_id.clone(),
        });
    }

    results.sort_by_key(|result| result.algorithm);
    if let Some(pair) = results
        .windows(2)
        .find(|pair| pair[0].algorithm == pair[1].algorithm)
    {
        return Err(EngineError::DuplicateResult(pair[0].algorithm));
    }
    if let Some(&missing) = Algorithm::ALL
        .iter()
        .find(|algorithm| !results.iter().any(|r| r.algorithm == **algorithm))
    {
        return Err(EngineError::MissingResult(missing));
    }
    let total = results.len();

    // BTreeMap so every scan below runs in ascending id order
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
    for result in &results {
        let tally = tallies.entry(result.station_id.as_str()).or_default();
        tally.votes += 1;
        tally.score += result.score;
    }

    let (winner, consensus) = decide(&tallies, total, &by_id).ok_or(EngineError::NoResults)?;
    let best_station = by_id
        .get(winner)
        .map(|station| (*station).clone())
        .ok_or(EngineError::NoResults)?;

    log::info!(
        "recommending {} ({}): {}",
        best_station.id,
        best_station.name,
        consensus
    );

    Ok(Recommendation {
        best_station,
        consensus,
        details: results,
    })
}

fn decide<'a>(
    tallies: &BTreeMap<&'a str, Tally>,
    total: usize,
    stations: &HashMap<&str, &Station>,
) -> Option<(&'a str, String)> {
    let name = |id: &str| stations.get(id).map_or(id.to_string(), |s| s.name.clone());

    let top_votes = tallies.values().map(|t| t.votes).max()?;
    if top_votes == total {
        return tallies
            .keys()
            .next()
            .map(|&id| (id, UNANIMOUS.to_string()));
    }

    // Highest summed score first, then smallest id
    let mut tied: Vec<(&'a str, Tally)> = tallies
        .iter()
        .filter(|(_, t)| t.votes == top_votes)
        .map(|(&id, &t)| (id, t))
        .collect();
    tied.sort_by(|(a_id, a), (b_id, b)| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a_id.cmp(b_id))
    });

    let lead = format!("{} of {} algorithms chose", top_votes, total);
    let (id, winner) = *tied.first()?;

    let consensus = match tied.get(1) {
        None => format!("{} {} (plurality)", lead, name(id)),
        Some((_, runner_up)) if winner.score.total_cmp(&runner_up.score) == Ordering::Greater => {
            format!(
                "{} {}; tied on votes with {} other station(s), broken by summed score \
                 ({:.4} vs {:.4})",
                lead,
                name(id),
                tied.len() - 1,
                winner.score,
                runner_up.score
            )
        }
        Some(_) => format!(
            "{} {}; tied on votes and summed score, broken by smallest station id",
            lead,
            name(id)
        ),
    };
    Some((id, consensus))
}
