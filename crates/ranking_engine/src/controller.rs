use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::Local;
use ranking_core::{update, AppState, Category, Effect, ErrorKind, LoadPhase, LoadState, Msg};
use ranking_logging::{rank_debug, rank_error, rank_info, rank_warn};

use crate::{EngineEvent, EngineHandle};

/// Owns the load state and is the only caller of [`update`].
///
/// Operations are fire-and-forget: callers observe their effect through
/// [`LoadController::state`] or the snapshots sent to subscribers.
pub struct LoadController {
    state: AppState,
    engine: EngineHandle,
    subscribers: Vec<mpsc::Sender<LoadState>>,
}

impl LoadController {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            state: AppState::new(),
            engine,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state.view()
    }

    /// Receives a snapshot after every transition that changed the state.
    pub fn subscribe(&mut self) -> mpsc::Receiver<LoadState> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn select_category(&mut self, category: Category) {
        self.dispatch(Msg::CategorySelected(category));
    }

    pub fn refresh(&mut self) {
        self.dispatch(Msg::RefreshClicked);
    }

    /// Applies every completion already delivered by the engine. Returns how many were processed.
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        while let Some(event) = self.engine.try_recv() {
            self.apply_event(event);
            processed += 1;
        }
        processed
    }

    /// Waits up to `timeout` for one completion, then drains the rest.
    pub fn pump_blocking(&mut self, timeout: Duration) -> usize {
        match self.engine.recv_timeout(timeout) {
            Some(event) => {
                self.apply_event(event);
                1 + self.pump()
            }
            None => 0,
        }
    }

    /// Pumps until the current request resolves or `timeout` elapses.
    pub fn wait_until_settled(&mut self, timeout: Duration) -> LoadState {
        let deadline = Instant::now() + timeout;
        while self.state.phase() == LoadPhase::Loading {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                rank_warn!(
                    "request {} still loading after {:?}",
                    self.state.current_token(),
                    timeout
                );
                break;
            }
            self.pump_blocking(remaining);
        }
        self.state.view()
    }

    fn apply_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::FetchCompleted {
                token,
                category,
                result,
            } => {
                if !self.state.is_current(token) {
                    rank_debug!(
                        "discarding stale result for {} token={} (current {})",
                        category,
                        token,
                        self.state.current_token()
                    );
                    return;
                }
                let result = match result {
                    Ok(products) => {
                        rank_info!(
                            "ranking for {} token={} loaded {} products",
                            category,
                            token,
                            products.len()
                        );
                        Ok(products)
                    }
                    Err(err) => {
                        rank_warn!("ranking for {} token={} failed: {}", category, token, err);
                        Err(err.error_kind())
                    }
                };
                self.dispatch(Msg::FetchCompleted {
                    token,
                    result,
                    completed_at: Local::now(),
                });
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if was_dirty {
            self.notify();
        }
        self.run_effects(effects);
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchRanking { token, category } => {
                    rank_info!("FetchRanking token={} category={}", token, category);
                    if !self.engine.request(token, category) {
                        rank_error!("ranking engine unavailable; failing token={}", token);
                        self.dispatch(Msg::FetchCompleted {
                            token,
                            result: Err(ErrorKind::Network),
                            completed_at: Local::now(),
                        });
                    }
                }
            }
        }
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let view = self.state.view();
        self.subscribers
            .retain(|subscriber| subscriber.send(view.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use ranking_core::{Category, ErrorKind, LoadPhase, RequestToken};

    use super::LoadController;
    use crate::EngineHandle;

    #[test]
    fn lost_engine_fails_each_request_immediately() {
        let mut controller = LoadController::new(EngineHandle::disconnected());
        let snapshots = controller.subscribe();

        controller.select_category(Category::Food);
        let view = controller.state();
        assert!(!view.is_loading);
        assert_eq!(view.phase, LoadPhase::Failed);
        assert_eq!(view.last_error, Some(ErrorKind::Network));
        assert_eq!(view.current_token, RequestToken::new(1));

        // Loading, then the failure.
        let seen: Vec<_> = snapshots.try_iter().map(|view| view.phase).collect();
        assert_eq!(seen, vec![LoadPhase::Loading, LoadPhase::Failed]);

        controller.select_category(Category::Baby);
        let view = controller.wait_until_settled(Duration::from_millis(10));
        assert_eq!(view.current_category, Category::Baby);
        assert_eq!(view.current_token, RequestToken::new(2));
        assert_eq!(view.phase, LoadPhase::Failed);
        assert_eq!(view.last_error, Some(ErrorKind::Network));
    }
}
