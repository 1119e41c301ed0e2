use crate::config::{read_config, Config, DEFAULT_CONFIG_PATH};
use crate::dictionary::WordList;
use crate::handler::Logic;
use crate::logic::GameLogic;
use crate::store::MemoryStore;
use anyhow::Context;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::info;
use warp::{
    http::{header, Method},
    Filter, Rejection, Reply,
};
use words_common::GameRng;

mod config;
mod dictionary;
mod error;
mod handler;
mod locks;
mod logic;
mod store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config: Config =
        read_config(&path).with_context(|| format!("config {} couldn't be read", path))?;

    let file_appender = tracing_appender::rolling::daily(
        &config.logging.directory,
        &config.logging.file_prefix,
    );
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dictionary = WordList::from_file(&config.dictionary.path).with_context(|| {
        format!(
            "dictionary {} couldn't be read",
            config.dictionary.path.display()
        )
    })?;
    info!(words = dictionary.len(), "loaded dictionary");

    let logic: Logic = Arc::new(GameLogic::new(
        MemoryStore::new(),
        dictionary,
        GameRng::default(),
    ));
    info!(address = %config.server.address, "starting server");

    warp::serve(routes(logic)).run(config.server.address).await;
    Ok(())
}

fn routes(logic: Logic) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health_route = warp::path!("health").and_then(handler::health_handler);

    let create = warp::path!("game" / "create")
        .and(warp::get())
        .and(warp::query())
        .and(with_logic(logic.clone()))
        .and_then(handler::create_handler);
    let join = warp::path!("game" / "join")
        .and(warp::get())
        .and(warp::query())
        .and(with_logic(logic.clone()))
        .and_then(handler::join_handler);
    let creating = warp::path!("game" / "creating")
        .and(warp::get())
        .and(warp::query())
        .and(with_logic(logic.clone()))
        .and_then(handler::creating_handler);
    let start = warp::path!("game" / "start")
        .and(warp::get())
        .and(warp::query())
        .and(with_logic(logic.clone()))
        .and_then(handler::start_handler);
    let wait = warp::path!("game" / "wait")
        .and(warp::get())
        .and(warp::query())
        .and(with_logic(logic.clone()))
        .and_then(handler::wait_handler);
    let play = warp::path!("game" / "play")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_logic(logic.clone()))
        .and_then(handler::play_handler);
    let try_play = warp::path!("game" / "tryplay")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_logic(logic.clone()))
        .and_then(handler::try_play_handler);
    let pass = warp::path!("game" / "pass")
        .and(warp::get())
        .and(warp::query())
        .and(with_logic(logic.clone()))
        .and_then(handler::pass_handler);
    let swap = warp::path!("game" / "swap")
        .and(warp::get())
        .and(warp::query())
        .and(with_logic(logic.clone()))
        .and_then(handler::swap_handler);
    let history = warp::path!("game" / "history")
        .and(warp::get())
        .and(warp::query())
        .and(with_logic(logic))
        .and_then(handler::history_handler);

    health_route
        .or(create)
        .or(join)
        .or(creating)
        .or(start)
        .or(wait)
        .or(play)
        .or(try_play)
        .or(pass)
        .or(swap)
        .or(history)
        .with(
            warp::cors()
                .allow_methods(&[Method::OPTIONS, Method::GET, Method::POST])
                .allow_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
                .max_age(300)
                .allow_any_origin(),
        )
}

fn with_logic(logic: Logic) -> impl Filter<Extract = (Logic,), Error = Infallible> + Clone {
    warp::any().map(move || logic.clone())
}
