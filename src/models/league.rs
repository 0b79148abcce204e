// src/models/league.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardScope {
    #[default]
    FullSeason,
    Weekly,
}

impl fmt::Display for LeaderboardScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardScope::FullSeason => write!(f, "full_season"),
            LeaderboardScope::Weekly => write!(f, "weekly"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeagueRole {
    Player,
    Admin,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct League {
    pub id: Uuid,
    pub name: String,
    pub is_open: bool,
    pub invite_code: String,
    pub leaderboard_scope: LeaderboardScope,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct LeagueMembership {
    pub user_id: Uuid,
    pub league_id: Uuid,
    pub display_name: String,
    pub role: LeagueRole,
    pub joined_at: DateTime<Utc>,
    // Standings imported from before the league moved onto this system
    pub backfill_wins: Option<i32>,
    pub backfill_draws: Option<i32>,
    pub backfill_losses: Option<i32>,
    pub backfill_points: Option<i32>,
}

impl LeagueMembership {
    pub fn is_admin(&self) -> bool {
        self.role == LeagueRole::Admin
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct MemberSummary {
    pub user_id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: LeagueRole,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeagueWithMembers {
    #[serde(flatten)]
    pub league: League,
    pub members: Vec<MemberSummary>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct OpenLeagueSummary {
    pub id: Uuid,
    pub name: String,
    pub member_count: i64,
    pub leaderboard_scope: LeaderboardScope,
}

/// One derived leaderboard line. Never persisted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub user_id: Uuid,
    pub display_name: String,
    pub points: i32,
    pub wins: i32,
    #[serde(rename = "draws")]
    pub correct_outcomes: i32,
    pub losses: i32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weeks_won: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardRow>,
    pub scope: LeaderboardScope,
    pub current_round: Option<i32>,
}

// Request/Response DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateLeagueRequest {
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub leaderboard_scope: Option<LeaderboardScope>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JoinByCodeRequest {
    pub invite_code: String,
    pub display_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JoinLeagueRequest {
    pub display_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdateLeagueRequest {
    pub name: Option<String>,
    pub is_open: Option<bool>,
    pub leaderboard_scope: Option<LeaderboardScope>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OpenLeaguesQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub scope: Option<LeaderboardScope>,
    pub round: Option<i32>,
}

impl fmt::Display for LeaderboardQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope={:?}, round={:?}", self.scope, self.round)
    }
}
