//! Ranking core: category registry, product model and the pure load state machine.
mod category;
mod effect;
mod msg;
mod product;
mod state;
mod update;
mod view_model;

pub use category::{Category, UnknownCategory};
pub use effect::Effect;
pub use msg::Msg;
pub use product::Product;
pub use state::{AppState, ErrorKind, LoadPhase, RequestToken};
pub use update::update;
pub use view_model::LoadState;
