#![allow(dead_code)]

use std::sync::Once;

use chrono::{DateTime, Local, TimeZone};
use ranking_core::{update, AppState, Category, Effect, ErrorKind, Msg, Product, RequestToken};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(ranking_logging::initialize_for_tests);
}

pub fn at(hour: u32, minute: u32, second: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 10, 14, hour, minute, second)
        .unwrap()
}

pub fn products(count: u32, prefix: &str) -> Vec<Product> {
    (1..=count)
        .map(|rank| Product {
            rank,
            name: format!("{prefix} item {rank}"),
            item_url: format!("https://item.example.com/{prefix}/{rank}"),
            price: u64::from(rank) * 1000,
            image_urls: vec![format!("https://img.example.com/{prefix}/{rank}.jpg")],
            shop_name: format!("{prefix} shop"),
            affiliate_url: format!("https://hb.example.com/{prefix}/{rank}"),
        })
        .collect()
}

/// Dispatches a message and returns the token of the issued fetch, if any.
pub fn dispatch(state: AppState, msg: Msg) -> (AppState, Option<RequestToken>) {
    let (state, effects) = update(state, msg);
    let token = effects.iter().find_map(|effect| match effect {
        Effect::FetchRanking { token, .. } => Some(*token),
    });
    (state, token)
}

pub fn select(state: AppState, category: Category) -> (AppState, RequestToken) {
    let (state, token) = dispatch(state, Msg::CategorySelected(category));
    (state, token.expect("fetch effect"))
}

pub fn succeed(state: AppState, token: RequestToken, result: Vec<Product>) -> AppState {
    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            token,
            result: Ok(result),
            completed_at: at(12, 0, 0),
        },
    );
    state
}

pub fn fail(state: AppState, token: RequestToken, kind: ErrorKind) -> AppState {
    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            token,
            result: Err(kind),
            completed_at: at(12, 0, 0),
        },
    );
    state
}
