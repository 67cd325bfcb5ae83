//! Poll-detect-notify loop

mod engine;
mod state;

pub use engine::Poller;
pub use state::{CycleOutcome, LoopState};
