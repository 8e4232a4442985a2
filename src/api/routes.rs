use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{
    leaderboard::{get_players, get_skills, get_standings},
    matches::{get_match_detail, get_matches, get_team_matches},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/standings", get(get_standings))
        .route("/api/players", get(get_players))
        .route("/api/skills", get(get_skills))
        .route("/api/matches", get(get_matches))
        .route("/api/matches/:id", get(get_match_detail))
        .route("/api/teams/:id/matches", get(get_team_matches))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::settings::AppConfig;
    use crate::domain::SubMatch;
    use crate::store::{DocumentFile, TournamentStore};

    struct Seeded {
        _dir: tempfile::TempDir,
        state: Arc<AppState>,
        falcons: String,
        match_id: String,
    }

    fn seeded() -> Seeded {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tournament_data.json");
        let config = AppConfig::new().with_data_file(Some(path.clone()));
        let mut store = TournamentStore::open(
            DocumentFile::new(&path),
            config.storage.default_skill_levels.clone(),
        )
        .unwrap();

        let falcons = store.create_team("Falcons").unwrap();
        let owls = store.create_team("Owls").unwrap();
        let ann = store.add_player(&falcons, "Ann", "Expert").unwrap();
        let bo = store.add_player(&owls, "Bo", "Beginner").unwrap();
        let match_id = store
            .record_match(&falcons, &owls, vec![SubMatch::singles(&ann, &bo, &[ann.as_str()])])
            .unwrap();

        Seeded {
            _dir: dir,
            state: Arc::new(AppState::new(config)),
            falcons,
            match_id,
        }
    }

    async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
        let response = create_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_standings_are_camel_case() {
        let seeded = seeded();

        let (status, body) = get_json(seeded.state, "/api/standings").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["items"][0]["name"], "Falcons");
        assert_eq!(body["items"][0]["matchesPlayed"], 1);
        assert_eq!(body["items"][1]["losses"], 1);
    }

    #[tokio::test]
    async fn test_players_filtered_by_skill() {
        let seeded = seeded();

        let (_, all) = get_json(seeded.state.clone(), "/api/players").await;
        let (_, beginners) = get_json(seeded.state, "/api/players?skill=Beginner").await;

        assert_eq!(all["items"][0]["name"], "Ann");
        assert_eq!(all["items"][0]["points"], 1);
        assert_eq!(beginners["total"], 1);
        assert_eq!(beginners["items"][0]["teamName"], "Owls");
    }

    #[tokio::test]
    async fn test_match_detail_and_missing_match() {
        let seeded = seeded();
        let uri = format!("/api/matches/{}", seeded.match_id);

        let (status, detail) = get_json(seeded.state.clone(), &uri).await;
        let (missing, _) = get_json(seeded.state, "/api/matches/nope").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["score"], "1-0");
        assert_eq!(detail["winnerName"], "Falcons");
        assert_eq!(detail["subMatches"][0]["type"], "singles");
        assert_eq!(detail["subMatches"][0]["winners"][0], "Ann");
        assert_eq!(missing, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_team_matches() {
        let seeded = seeded();
        let uri = format!("/api/teams/{}/matches", seeded.falcons);

        let (status, body) = get_json(seeded.state.clone(), &uri).await;
        let (missing, _) = get_json(seeded.state, "/api/teams/ghost/matches").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"][0]["opponent"], "Owls");
        assert_eq!(missing, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_document_serves_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::new().with_data_file(Some(dir.path().join("absent.json")));
        let state = Arc::new(AppState::new(config));

        let (_, skills) = get_json(state.clone(), "/api/skills").await;
        let (_, matches) = get_json(state, "/api/matches").await;

        assert_eq!(skills[0], "Beginner");
        assert_eq!(matches["total"], 0);
    }
}
