use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::escape_like;
use crate::db::leagues as league_db;
use crate::league::error::{conflict_on_unique, LeagueError};
use crate::league::validation::LeagueValidator;
use crate::models::league::*;
use crate::utils::invite_code::{generate_invite_code, normalize_invite_code};

const INVITE_CODE_ATTEMPTS: usize = 5;
const DISPLAY_NAME_CONSTRAINT: &str = "uq_league_display_name";
const ALREADY_MEMBER: &str = "You are already a member of this league";

/// Service that manages leagues and who belongs to them
#[derive(Debug, Clone)]
pub struct LeagueService {
    pool: PgPool,
    validator: LeagueValidator,
}

impl LeagueService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            validator: LeagueValidator::new(),
        }
    }

    /// Create a league. The creator becomes its first admin member.
    pub async fn create_league(
        &self,
        user_id: Uuid,
        request: CreateLeagueRequest,
    ) -> Result<LeagueWithMembers, LeagueError> {
        let name = self.validator.validate_league_name(&request.name)?;
        let display_name = self.validator.validate_display_name(&request.display_name)?;
        let scope = request.leaderboard_scope.unwrap_or_default();

        let mut attempt = 0;
        let league = loop {
            attempt += 1;
            let invite_code = generate_invite_code();
            let mut tx = self.pool.begin().await?;

            let inserted = league_db::insert_league(&mut *tx, &name, request.is_open, &invite_code, scope, user_id).await;
            let league = match inserted {
                Ok(league) => league,
                Err(sqlx::Error::Database(e)) if e.is_unique_violation() && attempt < INVITE_CODE_ATTEMPTS => {
                    tracing::warn!("Invite code collision on {}, retrying", invite_code);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            league_db::insert_membership(&mut *tx, league.id, user_id, &display_name, LeagueRole::Admin).await?;
            tx.commit().await?;
            break league;
        };

        tracing::info!("League {} created by {} with scope {}", league.id, user_id, league.leaderboard_scope);
        self.with_members(league).await
    }

    /// Leagues the user belongs to, each with its member list
    pub async fn leagues_for_user(&self, user_id: Uuid) -> Result<Vec<LeagueWithMembers>, LeagueError> {
        let leagues = league_db::leagues_for_user(&self.pool, user_id).await?;
        let mut result = Vec::with_capacity(leagues.len());
        for league in leagues {
            result.push(self.with_members(league).await?);
        }
        Ok(result)
    }

    pub async fn open_leagues(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<OpenLeagueSummary>, LeagueError> {
        let search = search.map(str::trim).filter(|q| !q.is_empty()).map(escape_like);
        Ok(league_db::open_leagues(&self.pool, user_id, search.as_deref()).await?)
    }

    pub async fn join_by_code(
        &self,
        user_id: Uuid,
        request: JoinByCodeRequest,
    ) -> Result<LeagueWithMembers, LeagueError> {
        let code = normalize_invite_code(&request.invite_code);
        let league = league_db::find_league_by_invite_code(&self.pool, &code)
            .await?
            .ok_or_else(|| LeagueError::NotFound("No league with that invite code".to_string()))?;

        self.join(league, user_id, &request.display_name).await
    }

    /// Join an open league without a code
    pub async fn join_open_league(
        &self,
        user_id: Uuid,
        league_id: Uuid,
        request: JoinLeagueRequest,
    ) -> Result<LeagueWithMembers, LeagueError> {
        let league = self.require_league(league_id).await?;
        if !league.is_open {
            return Err(LeagueError::Forbidden("This league is invite only".to_string()));
        }

        self.join(league, user_id, &request.display_name).await
    }

    pub async fn update_league(
        &self,
        user_id: Uuid,
        league_id: Uuid,
        request: UpdateLeagueRequest,
    ) -> Result<League, LeagueError> {
        self.require_league_admin(league_id, user_id).await?;

        let name = match request.name.as_deref() {
            Some(name) => Some(self.validator.validate_league_name(name)?),
            None => None,
        };

        let league = league_db::update_league(
            &self.pool,
            league_id,
            name.as_deref(),
            request.is_open,
            request.leaderboard_scope,
        )
        .await?;

        tracing::info!("League {} updated by {}", league_id, user_id);
        Ok(league)
    }

    pub async fn require_league(&self, league_id: Uuid) -> Result<League, LeagueError> {
        league_db::get_league(&self.pool, league_id)
            .await?
            .ok_or_else(|| LeagueError::NotFound("League not found".to_string()))
    }

    /// The caller's membership, or Forbidden if they are not in the league
    pub async fn require_membership(&self, league_id: Uuid, user_id: Uuid) -> Result<LeagueMembership, LeagueError> {
        self.require_league(league_id).await?;
        league_db::get_membership(&self.pool, league_id, user_id)
            .await?
            .ok_or_else(|| LeagueError::Forbidden("You are not a member of this league".to_string()))
    }

    pub async fn require_league_admin(&self, league_id: Uuid, user_id: Uuid) -> Result<LeagueMembership, LeagueError> {
        let membership = self.require_membership(league_id, user_id).await?;
        if !membership.is_admin() {
            return Err(LeagueError::Forbidden("Only league admins can do this".to_string()));
        }
        Ok(membership)
    }

    async fn join(&self, league: League, user_id: Uuid, display_name: &str) -> Result<LeagueWithMembers, LeagueError> {
        let display_name = self.validator.validate_display_name(display_name)?;

        if league_db::get_membership(&self.pool, league.id, user_id).await?.is_some() {
            return Err(LeagueError::Conflict(ALREADY_MEMBER.to_string()));
        }

        league_db::insert_membership(&self.pool, league.id, user_id, &display_name, LeagueRole::Player)
            .await
            .map_err(join_conflict)?;

        tracing::info!("User {} joined league {} as {}", user_id, league.id, display_name);
        self.with_members(league).await
    }

    async fn with_members(&self, league: League) -> Result<LeagueWithMembers, LeagueError> {
        let members = league_db::member_summaries(&self.pool, league.id).await?;
        Ok(LeagueWithMembers { league, members })
    }
}

/// A second membership row for the same user loses the race on the primary
/// key; only the named constraint means the display name is taken.
fn join_conflict(e: sqlx::Error) -> LeagueError {
    match &e {
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation() && db_err.constraint() != Some(DISPLAY_NAME_CONSTRAINT) =>
        {
            LeagueError::Conflict(ALREADY_MEMBER.to_string())
        }
        _ => conflict_on_unique(e, "Display name already taken in this league"),
    }
}
