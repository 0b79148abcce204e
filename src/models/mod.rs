pub mod auth;
pub mod common;
pub mod fixture;
pub mod league;
pub mod prediction;
pub mod user;
