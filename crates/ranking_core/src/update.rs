use crate::{AppState, Category, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::CategorySelected(category) => request_load(&mut state, category),
        Msg::RefreshClicked => {
            // Refresh always allocates a fresh token, even while the same category is loading.
            let category = state.category();
            request_load(&mut state, category)
        }
        Msg::FetchCompleted {
            token,
            result,
            completed_at,
        } => {
            // Stale completions fall through these calls untouched.
            match result {
                Ok(products) => {
                    state.apply_success(token, products, completed_at);
                }
                Err(kind) => {
                    state.apply_failure(token, kind);
                }
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn request_load(state: &mut AppState, category: Category) -> Vec<Effect> {
    let token = state.begin_load(category);
    vec![Effect::FetchRanking { token, category }]
}
