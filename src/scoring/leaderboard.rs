use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use uuid::Uuid;

use crate::models::common::Scoreline;
use crate::models::fixture::Fixture;
use crate::models::league::{LeaderboardRow, LeaderboardScope, LeagueMembership};
use crate::models::prediction::{Prediction, PredictionResult};
use crate::scoring::rounds::completed_rounds;
use crate::scoring::scorer::{final_score, PredictionScorer, ScoringError};

/// Points and result counts accumulated for one member
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub points: i32,
    pub wins: i32,
    pub correct_outcomes: i32,
    pub losses: i32,
}

impl Tally {
    pub fn record(&mut self, result: PredictionResult) {
        self.points += result.points();
        match result {
            PredictionResult::Win => self.wins += 1,
            PredictionResult::CorrectOutcome => self.correct_outcomes += 1,
            PredictionResult::Loss => self.losses += 1,
        }
    }

    pub fn absorb(&mut self, other: &Tally) {
        self.points += other.points;
        self.wins += other.wins;
        self.correct_outcomes += other.correct_outcomes;
        self.losses += other.losses;
    }

    fn backfill(membership: &LeagueMembership) -> Self {
        Self {
            points: membership.backfill_points.unwrap_or(0),
            wins: membership.backfill_wins.unwrap_or(0),
            correct_outcomes: membership.backfill_draws.unwrap_or(0),
            losses: membership.backfill_losses.unwrap_or(0),
        }
    }
}

type RoundTallies = BTreeMap<i32, Tally>;

/// Rolls scored predictions up into ranked league standings.
///
/// A completed fixture applies to a member when it kicked off at or after
/// the member joined, or when the member predicted it anyway. Applicable
/// fixtures without a pick count as losses.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeaderboardAggregator {
    scorer: PredictionScorer,
}

impl LeaderboardAggregator {
    pub fn new() -> Self {
        Self { scorer: PredictionScorer::new() }
    }

    /// Build the ranked standings for one league.
    ///
    /// `current_round` selects the round shown in the weekly scope and is
    /// ignored for the full season. Any fixture with a partial score fails the
    /// whole computation.
    pub fn build(
        &self,
        memberships: &[LeagueMembership],
        fixtures: &[Fixture],
        predictions: &[Prediction],
        scope: LeaderboardScope,
        current_round: Option<i32>,
    ) -> Result<Vec<LeaderboardRow>, ScoringError> {
        let tallies = self.round_tallies(memberships, fixtures, predictions)?;

        let rows = match scope {
            LeaderboardScope::FullSeason => memberships
                .iter()
                .map(|member| {
                    let mut total = Tally::backfill(member);
                    if let Some(rounds) = tallies.get(&member.user_id) {
                        rounds.values().for_each(|t| total.absorb(t));
                    }
                    row(member, total, None)
                })
                .collect(),
            LeaderboardScope::Weekly => {
                let weeks_won = Self::weeks_won(memberships, fixtures, &tallies);
                memberships
                    .iter()
                    .map(|member| {
                        let week = current_round
                            .and_then(|round| round_tally(&tallies, member.user_id, round))
                            .unwrap_or_default();
                        let won = weeks_won.get(&member.user_id).copied().unwrap_or(0);
                        row(member, week, Some(won))
                    })
                    .collect()
            }
        };

        Ok(rank_rows(rows))
    }

    fn round_tallies(
        &self,
        memberships: &[LeagueMembership],
        fixtures: &[Fixture],
        predictions: &[Prediction],
    ) -> Result<HashMap<Uuid, RoundTallies>, ScoringError> {
        let members: HashSet<(Uuid, Uuid)> = memberships
            .iter()
            .map(|m| (m.league_id, m.user_id))
            .collect();
        let picks: HashMap<(Uuid, Uuid), Scoreline> = predictions
            .iter()
            .filter(|p| members.contains(&(p.league_id, p.user_id)))
            .map(|p| ((p.user_id, p.fixture_id), p.scoreline()))
            .collect();

        let mut tallies: HashMap<Uuid, RoundTallies> = HashMap::new();
        for fixture in fixtures {
            // Checked for every fixture so a broken row fails the whole table
            if final_score(fixture)?.is_none() {
                continue;
            }
            for member in memberships {
                let outcome = match picks.get(&(member.user_id, fixture.id)) {
                    Some(pick) => self.scorer.score(*pick, fixture)?,
                    None if fixture.kickoff >= member.joined_at => self.scorer.score_missing(fixture)?,
                    None => continue,
                };
                if let Some(result) = outcome.result() {
                    tallies
                        .entry(member.user_id)
                        .or_default()
                        .entry(fixture.fixture_round)
                        .or_default()
                        .record(result);
                }
            }
        }
        Ok(tallies)
    }

    /// Every member tied on a completed round's top score wins that week,
    /// even when that score is zero.
    fn weeks_won(
        memberships: &[LeagueMembership],
        fixtures: &[Fixture],
        tallies: &HashMap<Uuid, RoundTallies>,
    ) -> HashMap<Uuid, u32> {
        let mut won: HashMap<Uuid, u32> = HashMap::new();
        for round in completed_rounds(fixtures) {
            let points_of = |user_id: Uuid| {
                round_tally(tallies, user_id, round).map(|t| t.points).unwrap_or(0)
            };
            let Some(best) = memberships.iter().map(|m| points_of(m.user_id)).max() else {
                continue;
            };
            for member in memberships.iter().filter(|m| points_of(m.user_id) == best) {
                *won.entry(member.user_id).or_insert(0) += 1;
            }
        }
        won
    }
}

fn round_tally(tallies: &HashMap<Uuid, RoundTallies>, user_id: Uuid, round: i32) -> Option<Tally> {
    tallies.get(&user_id).and_then(|rounds| rounds.get(&round)).copied()
}

fn row(member: &LeagueMembership, tally: Tally, weeks_won: Option<u32>) -> LeaderboardRow {
    LeaderboardRow {
        rank: 0,
        user_id: member.user_id,
        display_name: member.display_name.clone(),
        points: tally.points,
        wins: tally.wins,
        correct_outcomes: tally.correct_outcomes,
        losses: tally.losses,
        weeks_won,
    }
}

/// Points, then exact scores, then correct outcomes, then name
fn standings_order(a: &LeaderboardRow, b: &LeaderboardRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.wins.cmp(&a.wins))
        .then(b.correct_outcomes.cmp(&a.correct_outcomes))
        .then_with(|| a.display_name.to_lowercase().cmp(&b.display_name.to_lowercase()))
        .then(a.user_id.cmp(&b.user_id))
}

/// Sort rows into standings order and number them from 1
pub fn rank_rows(mut rows: Vec<LeaderboardRow>) -> Vec<LeaderboardRow> {
    rows.sort_by(standings_order);
    for (position, row) in rows.iter_mut().enumerate() {
        row.rank = position as u32 + 1;
    }
    rows
}
