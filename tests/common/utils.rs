use chrono::{DateTime, Duration, Utc};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::Client;

use fantasy_predictor::run;
use fantasy_predictor::config::settings::{get_config, get_jwt_settings, DatabaseSettings};
use fantasy_predictor::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub client: Client,
}

pub struct TestUser {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    // Every test gets its own database, so ignore a DATABASE_URL override
    configuration.database.db_url = None;
    let connection_pool = configure_db(&configuration.database).await;
    let jwt_settings = get_jwt_settings(&configuration);

    let server = run(listener, connection_pool.clone(), jwt_settings, vec![])
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
        client: Client::new(),
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(&config.connection_string_without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn patch(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/v1/users"))
            .json(&json!({
                "email": email,
                "password": password,
                "username": email.split('@').next().unwrap_or("fan")
            }))
            .send()
            .await
            .expect("Failed to register user.")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/v1/login"))
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute login request.")
    }

    /// Register a fresh user and log them in
    pub async fn create_user_and_login(&self) -> TestUser {
        let email = format!("fan{}@example.com", Uuid::new_v4().simple());
        let password = "password123";

        let register_response = self.register(&email, password).await;
        assert_eq!(201, register_response.status().as_u16());
        let body: Value = register_response.json().await.expect("Failed to parse registration");
        let user_id = Uuid::parse_str(body["data"]["id"].as_str().expect("No user id"))
            .expect("Invalid user id");

        let token = self.login_token(&email, password).await;
        TestUser { user_id, email, token }
    }

    /// Register a user, promote them to global admin, then log in so the
    /// token carries the admin role
    pub async fn create_admin_and_login(&self) -> TestUser {
        let user = self.create_user_and_login().await;

        sqlx::query("UPDATE users SET role = 'admin' WHERE id = $1")
            .bind(user.user_id)
            .execute(&self.db_pool)
            .await
            .expect("Failed to promote user to admin");

        let token = self.login_token(&user.email, "password123").await;
        TestUser { token, ..user }
    }

    async fn login_token(&self, email: &str, password: &str) -> String {
        let login_response = self.login(email, password).await;
        assert_eq!(200, login_response.status().as_u16());
        let login_response: Value = login_response.json().await.expect("Failed to parse login response");
        login_response["token"].as_str().expect("No token in response").to_string()
    }

    /// Insert a fixture the way the external sync would
    pub async fn insert_fixture(&self, round: i32, kickoff: DateTime<Utc>, home: &str, away: &str) -> Uuid {
        let fixture_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO fixtures (id, fixture_round, kickoff, home_team, away_team)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(fixture_id)
        .bind(round)
        .bind(kickoff)
        .bind(home)
        .bind(away)
        .execute(&self.db_pool)
        .await
        .expect("Failed to insert fixture");
        fixture_id
    }

    pub async fn insert_upcoming_fixture(&self, round: i32, home: &str, away: &str) -> Uuid {
        self.insert_fixture(round, Utc::now() + Duration::days(2), home, away).await
    }

    /// Move a fixture's kickoff into the past, locking predictions
    pub async fn kick_off(&self, fixture_id: Uuid) {
        sqlx::query("UPDATE fixtures SET kickoff = NOW() - INTERVAL '2 hours' WHERE id = $1")
            .bind(fixture_id)
            .execute(&self.db_pool)
            .await
            .expect("Failed to move kickoff");
    }

    /// Kick off and record a final score directly, without rescoring
    pub async fn finish_fixture(&self, fixture_id: Uuid, home: i32, away: i32) {
        self.kick_off(fixture_id).await;
        sqlx::query(
            r#"
            UPDATE fixtures
            SET actual_home_score = $2, actual_away_score = $3, is_completed = TRUE
            WHERE id = $1
            "#,
        )
        .bind(fixture_id)
        .bind(home)
        .bind(away)
        .execute(&self.db_pool)
        .await
        .expect("Failed to finish fixture");
    }
}

pub async fn body_json(response: reqwest::Response) -> Value {
    response.json().await.expect("Response was not JSON")
}
