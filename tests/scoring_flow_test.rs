use serde_json::json;

mod common;
use common::league_helpers::{create_league, join_league, predict};
use common::utils::{body_json, spawn_app};

#[tokio::test]
async fn check_results_scores_completed_fixtures() {
    let test_app = spawn_app().await;
    let owner = test_app.create_user_and_login().await;
    let league = create_league(&test_app, &owner, "Office", "full_season", false).await;
    let exact = test_app.insert_upcoming_fixture(1, "Arsenal", "Chelsea").await;
    let outcome = test_app.insert_upcoming_fixture(1, "Everton", "Fulham").await;
    let wrong = test_app.insert_upcoming_fixture(1, "Leeds", "Burnley").await;
    let later = test_app.insert_upcoming_fixture(2, "Spurs", "Brentford").await;

    predict(&test_app, &owner, exact, 2, 1, Some(league.league_id)).await;
    predict(&test_app, &owner, outcome, 1, 0, Some(league.league_id)).await;
    predict(&test_app, &owner, wrong, 1, 2, Some(league.league_id)).await;
    predict(&test_app, &owner, later, 0, 0, Some(league.league_id)).await;

    test_app.finish_fixture(exact, 2, 1).await;
    test_app.finish_fixture(outcome, 3, 1).await;
    test_app.finish_fixture(wrong, 2, 0).await;

    let response = test_app.post("/api/v1/predictions/check-results", &owner.token, &json!({})).await;
    assert_eq!(200, response.status().as_u16());
    let summary = body_json(response).await["data"].clone();
    assert_eq!(
        summary,
        json!({
            "results_updated": 3,
            "wins": 1,
            "draws": 1,
            "losses": 1,
            "fixtures_not_found": 0,
            "fixtures_no_scores": 1
        })
    );

    let mine = body_json(test_app.get("/api/v1/predictions", &owner.token).await).await;
    let by_fixture = |id: uuid::Uuid| {
        mine["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["fixture_id"] == id.to_string())
            .unwrap()
            .clone()
    };
    assert_eq!(by_fixture(exact)["result"], "win");
    assert_eq!(by_fixture(exact)["points"], 3);
    assert_eq!(by_fixture(outcome)["result"], "correct_outcome");
    assert_eq!(by_fixture(outcome)["points"], 1);
    assert_eq!(by_fixture(wrong)["result"], "loss");
    assert_eq!(by_fixture(wrong)["points"], 0);
    assert!(by_fixture(later)["result"].is_null());

    // A second pass finds nothing stale
    let again = test_app.post("/api/v1/predictions/check-results", &owner.token, &json!({})).await;
    let summary = body_json(again).await["data"].clone();
    assert_eq!(summary["results_updated"], 0);
    assert_eq!(summary["wins"], 1);
}

#[tokio::test]
async fn check_results_only_touches_callers_predictions_unless_admin() {
    let test_app = spawn_app().await;
    let owner = test_app.create_user_and_login().await;
    let player = test_app.create_user_and_login().await;
    let admin = test_app.create_admin_and_login().await;
    let league = create_league(&test_app, &owner, "Office", "full_season", false).await;
    join_league(&test_app, &player, &league, "Striker").await;
    let fixture_id = test_app.insert_upcoming_fixture(1, "Arsenal", "Chelsea").await;

    predict(&test_app, &owner, fixture_id, 2, 1, None).await;
    predict(&test_app, &player, fixture_id, 0, 0, None).await;
    test_app.finish_fixture(fixture_id, 2, 1).await;

    let own = test_app.post("/api/v1/predictions/check-results", &owner.token, &json!({})).await;
    let summary = body_json(own).await["data"].clone();
    assert_eq!(summary["results_updated"], 1);
    assert_eq!(summary["wins"], 1);
    assert_eq!(summary["losses"], 0);

    let everyone = test_app.post("/api/v1/predictions/check-results", &admin.token, &json!({})).await;
    let summary = body_json(everyone).await["data"].clone();
    assert_eq!(summary["results_updated"], 1);
    assert_eq!(summary["wins"], 1);
    assert_eq!(summary["losses"], 1);
}

#[tokio::test]
async fn check_results_counts_missing_fixtures() {
    let test_app = spawn_app().await;
    let owner = test_app.create_user_and_login().await;
    let league = create_league(&test_app, &owner, "Office", "full_season", false).await;
    let fixture_id = test_app.insert_upcoming_fixture(1, "Arsenal", "Chelsea").await;
    predict(&test_app, &owner, fixture_id, 1, 0, Some(league.league_id)).await;

    // The sync replaced the fixture; the prediction keeps its stale id
    sqlx::query("DELETE FROM fixtures WHERE id = $1")
        .bind(fixture_id)
        .execute(&test_app.db_pool)
        .await
        .expect("Failed to delete fixture");

    let response = test_app.post("/api/v1/predictions/check-results", &owner.token, &json!({})).await;
    let summary = body_json(response).await["data"].clone();
    assert_eq!(summary["fixtures_not_found"], 1);
    assert_eq!(summary["results_updated"], 0);
}

#[tokio::test]
async fn partial_fixture_score_fails_the_pass() {
    let test_app = spawn_app().await;
    let owner = test_app.create_user_and_login().await;
    let league = create_league(&test_app, &owner, "Office", "full_season", false).await;
    let fixture_id = test_app.insert_upcoming_fixture(1, "Arsenal", "Chelsea").await;
    predict(&test_app, &owner, fixture_id, 1, 0, Some(league.league_id)).await;

    sqlx::query("UPDATE fixtures SET actual_home_score = 1, is_completed = TRUE WHERE id = $1")
        .bind(fixture_id)
        .execute(&test_app.db_pool)
        .await
        .expect("Failed to corrupt fixture");

    let response = test_app.post("/api/v1/predictions/check-results", &owner.token, &json!({})).await;
    assert_eq!(500, response.status().as_u16());
    assert_eq!(body_json(response).await["success"], false);
}
