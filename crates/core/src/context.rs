//! Execution context handed to `deploy` and `remove`
//!
//! Bundles the prior state snapshot with the capabilities a run may use:
//! committing a replacement state and emitting advisory progress lines.

use crate::error::StateError;
use crate::store::StateStore;
use crate::types::SubnetState;

/// Sink for advisory progress messages
pub trait ProgressLog: Send + Sync {
    fn log(&self, message: &str);
}

impl<F> ProgressLog for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        self(message)
    }
}

/// Progress sink that forwards to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ProgressLog for TracingLog {
    fn log(&self, message: &str) {
        tracing::info!(target: "vpcsync::progress", "{}", message);
    }
}

/// Capabilities and prior state for one reconciliation
pub struct Context<'a> {
    state: SubnetState,
    store: &'a dyn StateStore,
    log: &'a dyn ProgressLog,
}

impl<'a> Context<'a> {
    pub fn new(state: SubnetState, store: &'a dyn StateStore, log: &'a dyn ProgressLog) -> Self {
        Self { state, store, log }
    }

    /// Snapshot the store's current state and build a context around it
    pub fn load(store: &'a dyn StateStore, log: &'a dyn ProgressLog) -> Result<Self, StateError> {
        let state = store.load()?;
        Ok(Self::new(state, store, log))
    }

    /// State as it was when the context was built
    pub fn state(&self) -> &SubnetState {
        &self.state
    }

    /// Durably commit `state`
    pub fn save(&self, state: &SubnetState) -> Result<(), StateError> {
        self.store.save(state)
    }

    pub fn log(&self, message: &str) {
        self.log.log(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStateStore;
    use crate::types::DesiredSpec;
    use parking_lot::Mutex;

    #[test]
    fn test_load_snapshots_store() {
        let spec = DesiredSpec::new("vpc-abbaabba", "us-east-1a");
        let store = MemoryStateStore::with_state(SubnetState::created("subnet-abbaabba", &spec));
        let ctx = Context::load(&store, &TracingLog).unwrap();

        ctx.save(&SubnetState::default()).unwrap();

        // The snapshot does not follow later saves
        assert_eq!(ctx.state().subnet_id.as_deref(), Some("subnet-abbaabba"));
        assert!(store.current().is_empty());
    }

    #[test]
    fn test_closure_log_sink() {
        let lines = Mutex::new(Vec::new());
        let sink = |m: &str| lines.lock().push(m.to_string());
        let store = MemoryStateStore::new();
        let ctx = Context::new(SubnetState::default(), &store, &sink);

        ctx.log("creating subnet");

        assert_eq!(lines.lock().as_slice(), ["creating subnet"]);
    }
}
