use super::{ComponentState, VodnavOrchestrator};
use tracing::{debug, warn};

impl VodnavOrchestrator {
    /// Record a lifecycle transition and return the state it replaced
    pub async fn set_component_state(
        &self,
        component: &str,
        state: ComponentState,
    ) -> Option<ComponentState> {
        let previous = self
            .component_states
            .lock()
            .await
            .insert(component.to_string(), state.clone());

        match &previous {
            Some(prev) if *prev == state => {}
            Some(prev) => debug!("Component '{}': {:?} -> {:?}", component, prev, state),
            None => debug!("Component '{}' registered as {:?}", component, state),
        }
        if state == ComponentState::Failed {
            warn!("Component '{}' failed", component);
        }
        previous
    }

    pub async fn get_component_state(&self, component: &str) -> Option<ComponentState> {
        self.component_states.lock().await.get(component).cloned()
    }
}
