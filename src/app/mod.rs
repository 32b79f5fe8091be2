mod dispatch;
mod orchestrator;
mod runtime;
mod shutdown;
mod startup;
mod state;
mod types;


pub use orchestrator::VodnavOrchestrator;
pub use types::{ComponentState, EventOutcome, ShutdownReason};
