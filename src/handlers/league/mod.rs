pub mod game_handler;
pub mod leaderboard_handler;
pub mod league_handler;
