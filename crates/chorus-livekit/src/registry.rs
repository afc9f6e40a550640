use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::info;

/// Record that a voice agent is expected to serve a room.
///
/// Distinct from the agent's runtime process, which is managed by the
/// LiveKit worker system; removing a registration does not stop a running
/// agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRegistration {
    pub system_prompt: String,
    pub created_at: DateTime<Utc>,
}

/// Process-local registry mapping room names to agent registrations.
///
/// In-memory and non-persistent: a restart loses all registrations, and two
/// server instances would diverge. Single-instance deployments only.
///
/// Uses `std::sync::RwLock` intentionally: all operations are brief HashMap
/// accesses that never span an `.await` point, making a synchronous lock
/// safe and more efficient than `tokio::sync::RwLock`.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: RwLock<HashMap<String, AgentRegistration>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an agent for `room_name`, overwriting any existing entry.
    ///
    /// `created_at` is always stamped at call time, including on overwrite.
    pub fn attach(&self, room_name: &str, system_prompt: &str) -> AgentRegistration {
        let registration = AgentRegistration {
            system_prompt: system_prompt.to_owned(),
            created_at: Utc::now(),
        };
        let replaced = self
            .agents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(room_name.to_owned(), registration.clone())
            .is_some();
        info!(room = room_name, replaced, "agent registered for room");
        registration
    }

    pub fn get(&self, room_name: &str) -> Option<AgentRegistration> {
        self.agents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(room_name)
            .cloned()
    }

    /// Room names with a registered agent. Order is unspecified.
    pub fn list(&self) -> Vec<String> {
        self.agents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Removes the registration for `room_name`, reporting whether one
    /// existed. A second remove of the same room returns `false`.
    pub fn remove(&self, room_name: &str) -> bool {
        let removed = self
            .agents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(room_name)
            .is_some();
        if removed {
            info!(room = room_name, "agent registration removed");
        }
        removed
    }

    /// Snapshot of every registration for bulk introspection.
    pub fn details(&self) -> HashMap<String, AgentRegistration> {
        self.agents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn attach_then_get_returns_registration() {
        let registry = AgentRegistry::new();
        registry.attach("demo", "You are a helpful assistant.");

        let found = registry.get("demo").expect("registration present");
        assert_eq!(found.system_prompt, "You are a helpful assistant.");
        assert!(registry.get("other").is_none());
    }

    #[test]
    fn reattach_overwrites_and_refreshes_created_at() {
        let registry = AgentRegistry::new();
        let first = registry.attach("demo", "first prompt");
        let second = registry.attach("demo", "second prompt");

        let found = registry.get("demo").unwrap();
        assert_eq!(found.system_prompt, "second prompt");
        assert!(second.created_at >= first.created_at);
        assert_eq!(registry.list().len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let registry = AgentRegistry::new();
        registry.attach("demo", "prompt");

        assert!(registry.remove("demo"));
        assert!(!registry.remove("demo"));
        assert!(!registry.remove("never-registered"));
    }

    #[test]
    fn list_reflects_attach_and_remove() {
        let registry = AgentRegistry::new();
        registry.attach("A", "a");
        registry.attach("B", "b");
        registry.remove("A");

        let rooms: HashSet<String> = registry.list().into_iter().collect();
        assert_eq!(rooms, HashSet::from(["B".to_string()]));
    }

    #[test]
    fn details_snapshots_all_registrations() {
        let registry = AgentRegistry::new();
        registry.attach("A", "alpha");
        registry.attach("B", "beta");

        let details = registry.details();
        assert_eq!(details.len(), 2);
        assert_eq!(details["A"].system_prompt, "alpha");
        assert_eq!(details["B"].system_prompt, "beta");
    }
}
