use crate::error::GameError;
use crate::logic::GameLogic;
use crate::store::MemoryStore;
use crate::dictionary::WordList;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use warp::{
    http::StatusCode,
    reply::{json, with_status, Json, WithStatus},
    Rejection, Reply,
};
use words_common::{
    messages::{
        CreateResponse, ErrorKind, ErrorResponse, HistoryResponse, JoinResponse, LobbyResponse,
        PlayRequest, StateResponse, TryPlayResponse,
    },
    GameId, GameRng, Letter, PlayerId, PlayerName, Ruleset,
};

pub type Logic = Arc<GameLogic<MemoryStore, WordList, GameRng>>;

type Result<T> = std::result::Result<T, Rejection>;

#[derive(Deserialize, Debug)]
pub struct CreateQuery {
    name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JoinQuery {
    game_id: String,
    name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlayerQuery {
    game_id: String,
    player_id: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StartQuery {
    game_id: String,
    player_id: String,
    ruleset: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuery {
    game_id: String,
    player_id: String,
    letter: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    game_id: String,
}

// Game ids are typed by people, so accept them in any case
fn parse_game_id(game_id: &str) -> std::result::Result<GameId, GameError> {
    Ok(GameId::new(game_id.trim().to_uppercase())?)
}

// The game logic blocks on its locks, so keep it off the async workers
async fn run<T, F>(logic: Logic, f: F) -> std::result::Result<T, GameError>
where
    T: Send + 'static,
    F: FnOnce(&GameLogic<MemoryStore, WordList, GameRng>) -> std::result::Result<T, GameError>
        + Send
        + 'static,
{
    tokio::task::spawn_blocking(move || f(logic.as_ref())).await?
}

fn respond<T: Serialize>(result: std::result::Result<T, GameError>) -> WithStatus<Json> {
    match result {
        Ok(body) => with_status(json(&body), StatusCode::OK),
        Err(err) => {
            let kind = err.kind();
            match kind {
                ErrorKind::Validation => {
                    info!("Rejected request: {}", err);
                    with_status(
                        json(&ErrorResponse {
                            kind,
                            message: err.to_string(),
                        }),
                        StatusCode::BAD_REQUEST,
                    )
                }
                ErrorKind::System => {
                    error!("Request failed: {}", err);
                    with_status(
                        json(&ErrorResponse {
                            kind,
                            message: "Something went wrong on the server.".to_string(),
                        }),
                        StatusCode::INTERNAL_SERVER_ERROR,
                    )
                }
            }
        }
    }
}

#[tracing::instrument(skip(logic))]
pub async fn create_handler(query: CreateQuery, logic: Logic) -> Result<impl Reply> {
    let result = run(logic, move |logic| {
        let created = logic.create(PlayerName::new(query.name)?)?;
        Ok(CreateResponse::new(created.game_id, created.player.id().clone()))
    })
    .await;
    Ok(respond(result))
}

#[tracing::instrument(skip(logic))]
pub async fn join_handler(query: JoinQuery, logic: Logic) -> Result<impl Reply> {
    let result = run(logic, move |logic| {
        let game_id = parse_game_id(&query.game_id)?;
        let player_id = logic.join(&game_id, PlayerName::new(query.name)?)?;
        Ok(JoinResponse { player_id })
    })
    .await;
    Ok(respond(result))
}

#[tracing::instrument(skip(logic))]
pub async fn creating_handler(query: PlayerQuery, logic: Logic) -> Result<impl Reply> {
    let result = run(logic, move |logic| {
        let game_id = parse_game_id(&query.game_id)?;
        let player_id = PlayerId::new(query.player_id);
        let (players, has_started) = logic.lobby(&game_id, &player_id)?;
        Ok(LobbyResponse::new(&players, &player_id, has_started))
    })
    .await;
    Ok(respond(result))
}

#[tracing::instrument(skip(logic))]
pub async fn start_handler(query: StartQuery, logic: Logic) -> Result<impl Reply> {
    let result = run(logic, move |logic| {
        let game_id = parse_game_id(&query.game_id)?;
        let player_id = PlayerId::new(query.player_id);
        let ruleset = Ruleset::from_name_or_default(query.ruleset.as_deref().unwrap_or_default());
        let state = logic.start(&game_id, &player_id, ruleset)?;
        Ok(StateResponse::new(&state, &player_id))
    })
    .await;
    Ok(respond(result))
}

#[tracing::instrument(skip(logic))]
pub async fn wait_handler(query: PlayerQuery, logic: Logic) -> Result<impl Reply> {
    let result = run(logic, move |logic| {
        let game_id = parse_game_id(&query.game_id)?;
        let player_id = PlayerId::new(query.player_id);
        let state = logic.poll(&game_id, &player_id)?;
        Ok(StateResponse::new(&state, &player_id))
    })
    .await;
    Ok(respond(result))
}

#[tracing::instrument(skip(logic))]
pub async fn play_handler(body: PlayRequest, logic: Logic) -> Result<impl Reply> {
    let result = run(logic, move |logic| {
        let game_id = parse_game_id(&body.game_id)?;
        let player_id = PlayerId::new(body.player_id);
        let (state, _) = logic.play(&game_id, &player_id, &body.tile_placements)?;
        Ok(StateResponse::new(&state, &player_id))
    })
    .await;
    Ok(respond(result))
}

#[tracing::instrument(skip(logic))]
pub async fn try_play_handler(body: PlayRequest, logic: Logic) -> Result<impl Reply> {
    let result = run(logic, move |logic| {
        let game_id = parse_game_id(&body.game_id)?;
        let player_id = PlayerId::new(body.player_id);
        let play = logic.try_play(&game_id, &player_id, &body.tile_placements)?;
        Ok(TryPlayResponse::from(&play))
    })
    .await;
    Ok(respond(result))
}

#[tracing::instrument(skip(logic))]
pub async fn pass_handler(query: PlayerQuery, logic: Logic) -> Result<impl Reply> {
    let result = run(logic, move |logic| {
        let game_id = parse_game_id(&query.game_id)?;
        let player_id = PlayerId::new(query.player_id);
        let state = logic.pass(&game_id, &player_id)?;
        Ok(StateResponse::new(&state, &player_id))
    })
    .await;
    Ok(respond(result))
}

#[tracing::instrument(skip(logic))]
pub async fn swap_handler(query: SwapQuery, logic: Logic) -> Result<impl Reply> {
    let result = run(logic, move |logic| {
        let game_id = parse_game_id(&query.game_id)?;
        let player_id = PlayerId::new(query.player_id);
        let state = logic.swap(&game_id, &player_id, &Letter::new(query.letter))?;
        Ok(StateResponse::new(&state, &player_id))
    })
    .await;
    Ok(respond(result))
}

#[tracing::instrument(skip(logic))]
pub async fn history_handler(query: HistoryQuery, logic: Logic) -> Result<impl Reply> {
    let result = run(logic, move |logic| {
        let game_id = parse_game_id(&query.game_id)?;
        let (history, players) = logic.history(&game_id)?;
        Ok(HistoryResponse::new(history, &players))
    })
    .await;
    Ok(respond(result))
}

pub async fn health_handler() -> Result<impl Reply> {
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_game_id_ignores_case() {
        assert_eq!(parse_game_id(" abcd ").unwrap().as_str(), "ABCD");
        let err = parse_game_id("ab1d").unwrap_err();
        assert_eq!(err.to_string(), "Game AB1D is not valid.");
    }
}
