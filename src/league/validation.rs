use crate::league::error::LeagueError;
use crate::models::prediction::MAX_PREDICTED_GOALS;

pub const MAX_LEAGUE_NAME_CHARS: usize = 100;
pub const MAX_DISPLAY_NAME_CHARS: usize = 50;

/// Centralized validation for league and prediction input
#[derive(Debug, Default, Clone, Copy)]
pub struct LeagueValidator;

impl LeagueValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a league name and return it trimmed
    pub fn validate_league_name(&self, name: &str) -> Result<String, LeagueError> {
        self.validate_text("League name", name, MAX_LEAGUE_NAME_CHARS)
    }

    /// Validate a per-league display name and return it trimmed
    pub fn validate_display_name(&self, display_name: &str) -> Result<String, LeagueError> {
        self.validate_text("Display name", display_name, MAX_DISPLAY_NAME_CHARS)
    }

    /// Predicted goals must be within 0..=20 on both sides
    pub fn validate_prediction_scores(&self, home_score: i32, away_score: i32) -> Result<(), LeagueError> {
        for (side, score) in [("Home", home_score), ("Away", away_score)] {
            if !(0..=MAX_PREDICTED_GOALS).contains(&score) {
                return Err(LeagueError::Validation(format!(
                    "{} score must be between 0 and {}, got {}",
                    side, MAX_PREDICTED_GOALS, score
                )));
            }
        }
        Ok(())
    }

    /// Recorded results only need to be non-negative
    pub fn validate_result_scores(&self, home_score: i32, away_score: i32) -> Result<(), LeagueError> {
        if home_score < 0 || away_score < 0 {
            return Err(LeagueError::Validation(format!(
                "Scores cannot be negative: {}-{}",
                home_score, away_score
            )));
        }
        Ok(())
    }

    pub fn validate_round(&self, round: i32) -> Result<(), LeagueError> {
        if round < 1 {
            return Err(LeagueError::Validation(format!("Round must be positive: {}", round)));
        }
        Ok(())
    }

    fn validate_text(&self, field: &str, value: &str, max_chars: usize) -> Result<String, LeagueError> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(LeagueError::Validation(format!("{} cannot be empty", field)));
        }

        if trimmed.chars().count() > max_chars {
            return Err(LeagueError::Validation(format!(
                "{} too long (maximum {} characters)",
                field, max_chars
            )));
        }

        if trimmed.contains('\0') {
            return Err(LeagueError::Validation(format!("{} contains invalid characters", field)));
        }

        Ok(trimmed.to_string())
    }
}
