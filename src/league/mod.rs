//! League services: membership, predictions, fixtures and standings.
//! Each service owns a `PgPool` clone and maps failures to `LeagueError`.

pub mod error;
pub mod fixtures;
pub mod league;
pub mod predictions;
pub mod standings;
pub mod validation;
