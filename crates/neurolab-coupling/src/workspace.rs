// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! The workspace: a collection of components wired together by couplings.
//!
//! A component is anything with a per-tick `update` and, optionally,
//! attribute containers to expose as coupling endpoints. Components are
//! held behind `Arc<Mutex<_>>` so the parallel updater can distribute
//! them across a thread pool.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use crate::attribute::ContainerRef;
use crate::coupling::{consumers_from, producers_from, Consumer, Producer};
use crate::manager::CouplingManager;

/// One simulation component (a network, a sensor world, a plot...).
pub trait WorkspaceComponent: Send {
    fn name(&self) -> &str;

    /// Run one tick of this component's local simulation.
    fn update(&mut self);

    /// Attribute containers this component exposes for coupling. Handles
    /// must be stable across calls: endpoint identity is the container
    /// handle.
    fn containers(&self) -> Vec<ContainerRef> {
        Vec::new()
    }
}

pub type ComponentRef = Arc<Mutex<dyn WorkspaceComponent>>;

/// Components plus their coupling manager.
#[derive(Default)]
pub struct Workspace {
    components: Vec<ComponentRef>,
    coupling_manager: CouplingManager,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component, returning the shared handle.
    pub fn add_component<C: WorkspaceComponent + 'static>(&mut self, component: C) -> ComponentRef {
        info!(name = component.name(), "component added");
        let handle: ComponentRef = Arc::new(Mutex::new(component));
        self.components.push(handle.clone());
        handle
    }

    /// Unregister a component and drop every coupling touching its
    /// containers.
    pub fn remove_component(&mut self, component: &ComponentRef) {
        let target = Arc::as_ptr(component) as *const () as usize;
        self.components
            .retain(|c| Arc::as_ptr(c) as *const () as usize != target);
        for container in component.lock().containers() {
            self.coupling_manager.remove_attached(&container);
        }
    }

    pub fn components(&self) -> &[ComponentRef] {
        &self.components
    }

    pub fn coupling_manager(&self) -> &CouplingManager {
        &self.coupling_manager
    }

    pub fn coupling_manager_mut(&mut self) -> &mut CouplingManager {
        &mut self.coupling_manager
    }

    /// Every producer exposed by a component's containers.
    pub fn producers_of(&self, component: &ComponentRef) -> Vec<Producer> {
        component
            .lock()
            .containers()
            .iter()
            .flat_map(producers_from)
            .collect()
    }

    /// Every consumer exposed by a component's containers.
    pub fn consumers_of(&self, component: &ComponentRef) -> Vec<Consumer> {
        component
            .lock()
            .containers()
            .iter()
            .flat_map(consumers_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{container_ref, AttributeValue};
    use crate::coupling::test_support::Probe;
    use crate::coupling::{consumer, producer};

    struct ProbeComponent {
        name: String,
        probe: ContainerRef,
    }

    impl ProbeComponent {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_owned(),
                probe: container_ref(Probe::new(name)),
            }
        }
    }

    impl WorkspaceComponent for ProbeComponent {
        fn name(&self) -> &str {
            &self.name
        }

        fn update(&mut self) {
            // Ramp the level each tick so couplings have fresh data.
            let current = self
                .probe
                .read()
                .read("level")
                .and_then(|v| v.as_double())
                .unwrap_or(0.0);
            self.probe
                .write()
                .write("level", AttributeValue::Double(current + 1.0));
        }

        fn containers(&self) -> Vec<ContainerRef> {
            vec![self.probe.clone()]
        }
    }

    #[test]
    fn test_discovery_through_components() {
        let mut workspace = Workspace::new();
        let comp = workspace.add_component(ProbeComponent::new("alpha"));
        let producers = workspace.producers_of(&comp);
        let consumers = workspace.consumers_of(&comp);
        assert_eq!(producers.len(), 3);
        assert_eq!(consumers.len(), 2);
    }

    #[test]
    fn test_remove_component_drops_couplings() {
        let mut workspace = Workspace::new();
        let a = workspace.add_component(ProbeComponent::new("a"));
        let b = workspace.add_component(ProbeComponent::new("b"));
        let a_probe = a.lock().containers()[0].clone();
        let b_probe = b.lock().containers()[0].clone();
        workspace
            .coupling_manager_mut()
            .couple(
                producer(&a_probe, "level").unwrap(),
                consumer(&b_probe, "level").unwrap(),
            )
            .unwrap();
        assert_eq!(workspace.coupling_manager().len(), 1);
        workspace.remove_component(&a);
        assert_eq!(workspace.components().len(), 1);
        assert!(workspace.coupling_manager().is_empty());
    }
}
