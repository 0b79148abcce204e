use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::utils::{body_json, TestApp, TestUser};

pub struct TestLeague {
    pub league_id: Uuid,
    pub invite_code: String,
}

/// Create a league with `owner` as its admin
pub async fn create_league(app: &TestApp, owner: &TestUser, name: &str, scope: &str, is_open: bool) -> TestLeague {
    let response = app
        .post(
            "/api/v1/leagues",
            &owner.token,
            &json!({
                "name": name,
                "display_name": "Gaffer",
                "is_open": is_open,
                "leaderboard_scope": scope
            }),
        )
        .await;
    assert_eq!(201, response.status().as_u16());

    let body = body_json(response).await;
    TestLeague {
        league_id: Uuid::parse_str(body["data"]["id"].as_str().expect("No league id")).expect("Invalid league id"),
        invite_code: body["data"]["invite_code"].as_str().expect("No invite code").to_string(),
    }
}

pub async fn join_league(app: &TestApp, user: &TestUser, league: &TestLeague, display_name: &str) -> reqwest::Response {
    app.post(
        "/api/v1/leagues/join-by-code",
        &user.token,
        &json!({
            "invite_code": league.invite_code.to_lowercase(),
            "display_name": display_name
        }),
    )
    .await
}

pub async fn predict(
    app: &TestApp,
    user: &TestUser,
    fixture_id: Uuid,
    home: i32,
    away: i32,
    league_id: Option<Uuid>,
) -> reqwest::Response {
    let mut body = json!({
        "fixture_id": fixture_id,
        "home_team_score": home,
        "away_team_score": away
    });
    if let Some(league_id) = league_id {
        body["league_id"] = json!(league_id);
    }
    app.post("/api/v1/predictions", &user.token, &body).await
}

/// Pretend everyone joined a week ago, so earlier fixtures count for them
pub async fn backdate_memberships(app: &TestApp, league_id: Uuid) {
    sqlx::query("UPDATE league_memberships SET joined_at = NOW() - INTERVAL '7 days' WHERE league_id = $1")
        .bind(league_id)
        .execute(&app.db_pool)
        .await
        .expect("Failed to backdate memberships");
}

pub async fn leaderboard(app: &TestApp, user: &TestUser, league_id: Uuid, query: &str) -> Value {
    let response = app
        .get(&format!("/api/v1/leagues/{}/leaderboard{}", league_id, query), &user.token)
        .await;
    assert_eq!(200, response.status().as_u16());
    body_json(response).await["data"].clone()
}

/// Find a member's row by display name
pub fn row_for<'a>(leaderboard: &'a Value, display_name: &str) -> &'a Value {
    leaderboard["leaderboard"]
        .as_array()
        .expect("No leaderboard rows")
        .iter()
        .find(|row| row["display_name"] == display_name)
        .expect("Member missing from leaderboard")
}
