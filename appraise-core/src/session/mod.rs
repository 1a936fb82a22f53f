//! Assessment session: loader, engine, and lifecycle phases

mod engine;
mod loader;
mod state;

pub use engine::AssessmentEngine;
pub use loader::SessionLoader;
pub use state::SessionPhase;
