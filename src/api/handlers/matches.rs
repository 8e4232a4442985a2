use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_response, AppState};
use crate::api::models::{ListResponse, MatchDetail, MatchItem, SubMatchDetail, TeamMatchItem};
use crate::domain::DRAW_LABEL;
use crate::store::{TournamentStore, DATE_FORMAT};

pub async fn get_matches(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = match state.load_store() {
        Ok(store) => store,
        Err(response) => return response,
    };

    let items = store
        .match_history()
        .into_iter()
        .map(|m| MatchItem {
            id: m.id,
            date: m.date,
            team1_name: m.team1_name,
            score: m.score,
            team2_name: m.team2_name,
            winner_name: m.winner_name,
        })
        .collect();

    Json(ListResponse::new(items)).into_response()
}

pub async fn get_match_detail(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
) -> impl IntoResponse {
    let store = match state.load_store() {
        Ok(store) => store,
        Err(response) => return response,
    };

    let record = match store.match_record(&match_id) {
        Ok(record) => record,
        Err(e) => return error_response(e),
    };

    let names = |ids: &Vec<String>| -> Vec<String> {
        ids.iter().map(|id| store.player_name(id).to_string()).collect()
    };
    let sub_matches = record
        .sub_matches
        .iter()
        .map(|game| SubMatchDetail {
            kind: game.kind.as_str().to_string(),
            team1_players: names(&game.team1_player_ids),
            team2_players: names(&game.team2_player_ids),
            winners: names(&game.winner_player_ids),
        })
        .collect();

    Json(MatchDetail {
        id: match_id.clone(),
        date: record.timestamp.format(DATE_FORMAT).to_string(),
        team1_id: record.team1_id.clone(),
        team1_name: live_team_name(&store, &record.team1_id, &record.team1_name),
        team2_id: record.team2_id.clone(),
        team2_name: live_team_name(&store, &record.team2_id, &record.team2_name),
        score: record.score(),
        winner_name: match record.winner_id.as_deref() {
            Some(winner_id) => live_team_name(&store, winner_id, &record.winner_name),
            None => DRAW_LABEL.to_string(),
        },
        sub_matches,
    })
    .into_response()
}

pub async fn get_team_matches(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
) -> impl IntoResponse {
    let store = match state.load_store() {
        Ok(store) => store,
        Err(response) => return response,
    };

    let rows = match store.team_match_history(&team_id) {
        Ok(rows) => rows,
        Err(e) => return error_response(e),
    };

    let items = rows
        .into_iter()
        .map(|m| TeamMatchItem {
            id: m.id,
            date: m.date,
            opponent: m.opponent,
            score: m.score,
            winner_name: m.winner_name,
        })
        .collect();

    Json(ListResponse::new(items)).into_response()
}

/// Current team name, or the one stored with the match once the team is gone
fn live_team_name(store: &TournamentStore, team_id: &str, recorded: &str) -> String {
    store
        .team(team_id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|_| recorded.to_string())
}
