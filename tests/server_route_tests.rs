//! Route-level tests: the report server is bound to an ephemeral port
//! and exercised with a real HTTP client, with the league API mocked.

use ffl_dashboard::config::Config;
use ffl_dashboard::server::{AppState, build_router};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestServer {
    base_url: String,
    // Dropping these tears down the temp dirs after the test
    _cache_dir: TempDir,
    _draft_dir: TempDir,
}

async fn spawn_test_server(api_uri: &str) -> TestServer {
    let cache_dir = TempDir::new().unwrap();
    let draft_dir = TempDir::new().unwrap();

    std::fs::write(
        draft_dir.path().join("2022_draft.csv"),
        "Pick #,Round Pick #,Owner,Previous Owner(s),Pick,Team,Pos.\n\
         1,1.1,Mani Suresh,N/A,Justin Jefferson,MIN,WR\n\
         2,1.2,Ray Wang,N/A,Christian McCaffrey,SF,RB\n",
    )
    .unwrap();

    let config = Config {
        league_id: 7,
        swid: "{SWID-1}".to_string(),
        espn_s2: "s2-token".to_string(),
        api_domain: api_uri.to_string(),
        cache_dir: Some(cache_dir.path().to_string_lossy().to_string()),
        draft_dir: Some(draft_dir.path().to_string_lossy().to_string()),
        first_season: 2022,
        last_season: 2022,
        ..Config::default()
    };

    let state = Arc::new(AppState::new(config).unwrap());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{addr}"),
        _cache_dir: cache_dir,
        _draft_dir: draft_dir,
    }
}

fn season_json() -> serde_json::Value {
    json!({
        "teams": [
            {"id": 1, "owners": ["{A}"],
             "record": {"overall": {"wins": 1, "losses": 1, "pointsFor": 200.0, "pointsAgainst": 225.75}},
             "transactionCounter": {"acquisitions": 3, "drops": 2, "trades": 1}},
            {"id": 2, "owners": ["{B}"],
             "record": {"overall": {"wins": 1, "losses": 1, "pointsFor": 225.75, "pointsAgainst": 200.0}},
             "transactionCounter": {"acquisitions": 7, "drops": 6, "trades": 0}}
        ],
        "members": [
            {"id": "{A}", "firstName": "Mani", "lastName": "Suresh"},
            {"id": "{B}", "firstName": "Ray", "lastName": "Wang"}
        ],
        "schedule": [
            {"matchupPeriodId": 1,
             "home": {"teamId": 1, "totalPoints": 120.0},
             "away": {"teamId": 2, "totalPoints": 95.5}},
            {"matchupPeriodId": 2,
             "home": {"teamId": 2, "totalPoints": 130.25},
             "away": {"teamId": 1, "totalPoints": 80.0}}
        ]
    })
}

async fn mock_league_api() -> MockServer {
    let mock_server = MockServer::start().await;
    // Only season 2022 exists; other seasons fall through to a 404 and
    // contribute empty tables
    Mock::given(method("GET"))
        .and(path("/apis/v3/games/ffl/seasons/2022/segments/0/leagues/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(season_json()))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_index_lists_reports_and_owners() {
    let api = mock_league_api().await;
    let server = spawn_test_server(&api.uri()).await;

    let body = reqwest::get(format!("{}/", server.base_url))
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("/box_scores"));
    assert!(body.contains("/head_to_head"));
    // Owner names are normalized before they reach any page
    assert!(body.contains("Rohan Shiknis"));
    assert!(!body.contains("Mani Suresh"));
}

#[tokio::test]
async fn test_box_scores_post_filters_to_selected_year() {
    let api = mock_league_api().await;
    let server = spawn_test_server(&api.uri()).await;
    let client = reqwest::Client::new();

    let body = client
        .post(format!("{}/box_scores", server.base_url))
        .form(&[("year", "2022")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("120"));
    assert!(body.contains("130.25"));

    let empty_year = client
        .post(format!("{}/box_scores", server.base_url))
        .form(&[("year", "1999")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(!empty_year.contains("130.25"));
}

#[tokio::test]
async fn test_head_to_head_post_shows_selected_owner_only() {
    let api = mock_league_api().await;
    let server = spawn_test_server(&api.uri()).await;
    let client = reqwest::Client::new();

    let body = client
        .post(format!("{}/head_to_head", server.base_url))
        .form(&[("owner", "Ray Wang")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Ray Wang"));
    assert!(body.contains("Rohan Shiknis"));

    // Without a selection the page renders just the picker
    let unselected = client
        .get(format!("{}/head_to_head", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(unselected.contains("<form"));
}

#[tokio::test]
async fn test_records_page_reports_extremes() {
    let api = mock_league_api().await;
    let server = spawn_test_server(&api.uri()).await;

    let body = reqwest::get(format!("{}/records", server.base_url))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Highest single-week score"));
    assert!(body.contains("130.25"));
    assert!(body.contains("Lowest single-week score"));
}

#[tokio::test]
async fn test_draft_data_post_loads_year_csv() {
    let api = mock_league_api().await;
    let server = spawn_test_server(&api.uri()).await;
    let client = reqwest::Client::new();

    let body = client
        .post(format!("{}/draft_data", server.base_url))
        .form(&[("year", "2022")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Justin Jefferson"));
    // Draft owners get the same normalization as API data
    assert!(body.contains("Rohan Shiknis"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let api = mock_league_api().await;
    let server = spawn_test_server(&api.uri()).await;

    let status = reqwest::get(format!("{}/standings", server.base_url))
        .await
        .unwrap()
        .status();

    assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
}
