/// Component lifecycle states
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentState {
    Stopped,
    Starting,
    Running,
    Stopping,
    Failed,
}

/// System shutdown reason
#[derive(Debug, Clone, PartialEq)]
pub enum ShutdownReason {
    Signal(String),
    Error(String),
    UserRequest(String),
}

/// What the event loop does after handling one event
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Continue,
    Shutdown(ShutdownReason),
}
