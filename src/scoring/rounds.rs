use std::collections::{BTreeMap, BTreeSet};

use crate::models::fixture::Fixture;

/// Whether every fixture in each round has a final score
fn round_completion(fixtures: &[Fixture]) -> BTreeMap<i32, bool> {
    let mut rounds: BTreeMap<i32, bool> = BTreeMap::new();
    for fixture in fixtures {
        let done = rounds.entry(fixture.fixture_round).or_insert(true);
        *done = *done && fixture.has_final_score();
    }
    rounds
}

/// The round members should currently be predicting.
///
/// This is the lowest round that still has an unfinished fixture. Once every
/// round is complete it is the last round. Returns `None` without fixtures.
pub fn current_round(fixtures: &[Fixture]) -> Option<i32> {
    let rounds = round_completion(fixtures);
    rounds
        .iter()
        .find(|(_, done)| !**done)
        .map(|(round, _)| *round)
        .or_else(|| rounds.keys().next_back().copied())
}

/// Rounds whose fixtures all have final scores
pub fn completed_rounds(fixtures: &[Fixture]) -> BTreeSet<i32> {
    round_completion(fixtures)
        .into_iter()
        .filter(|(_, done)| *done)
        .map(|(round, _)| round)
        .collect()
}
