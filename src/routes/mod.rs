use actix_web::web;

pub mod auth;
pub mod backend_health;
pub mod fixtures;
pub mod league;
pub mod predictions;
pub mod profile;
pub mod registration;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // League routes (require authentication)
    cfg.service(
        web::scope("/api/v1/leagues")
            .wrap(AuthMiddleware)
            .service(league::get_my_leagues)
            .service(league::create_league)
            .service(league::search_open_leagues)
            .service(league::join_league_by_code)
            .service(league::join_open_league)
            .service(league::update_league)
            .service(league::get_league_games)
            .service(league::update_league_game)
            .service(league::get_league_leaderboard)
    );
    // Prediction routes (require authentication)
    cfg.service(
        web::scope("/api/v1/predictions")
            .wrap(AuthMiddleware)
            .service(predictions::get_my_predictions)
            .service(predictions::submit_prediction)
            .service(predictions::check_results)
    );
    // Fixture routes (require authentication, recording results needs a global admin)
    cfg.service(
        web::scope("/api/v1/fixtures")
            .wrap(AuthMiddleware)
            .service(fixtures::get_fixtures)
            .service(fixtures::record_fixture_result)
    );
    // Registered last: a matching scope never falls through to later ones
    cfg.service(
        web::scope("/api/v1")
            .service(registration::register)
            .service(auth::login)
            .service(profile::authorized)
            .service(profile::update_account)
    );
}
