use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, LeaderboardParams};
use crate::api::models::{ListResponse, PlayerItem, StandingItem};

pub async fn get_standings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = match state.load_store() {
        Ok(store) => store,
        Err(response) => return response,
    };

    let items = store
        .standings()
        .into_iter()
        .enumerate()
        .map(|(i, row)| StandingItem {
            rank: i + 1,
            team_id: row.team_id,
            name: row.name,
            wins: row.wins,
            losses: row.losses,
            draws: row.draws,
            matches_played: row.matches_played,
        })
        .collect();

    Json(ListResponse::new(items)).into_response()
}

pub async fn get_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> impl IntoResponse {
    let store = match state.load_store() {
        Ok(store) => store,
        Err(response) => return response,
    };

    let skill = params.skill.as_deref().filter(|s| !s.is_empty());
    let items = store
        .player_points(skill)
        .into_iter()
        .enumerate()
        .map(|(i, row)| PlayerItem {
            rank: i + 1,
            player_id: row.player_id,
            name: row.name,
            team_name: row.team_name,
            skill: row.skill,
            points: row.points,
        })
        .collect();

    Json(ListResponse::new(items)).into_response()
}

pub async fn get_skills(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.load_store() {
        Ok(store) => Json(store.skill_levels().to_vec()).into_response(),
        Err(response) => response,
    }
}
