// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! The workspace updater: drives the global tick.
//!
//! One tick = update every component, then flush couplings, then notify
//! listeners. In parallel mode component updates are distributed over a
//! rayon pool; the fork-join acts as the end-of-tick barrier, so no
//! coupling buffer is touched until every component's `update` has
//! returned. Components never share mutable state directly, which is why
//! a barrier (and not a lock) is the whole synchronization story.
//!
//! Whether production runs single- or multi-threaded is an explicit
//! configuration choice, never an ambient default baked into call sites.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::WorkspaceConfig;
use crate::workspace::Workspace;

/// How component updates are scheduled within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateMode {
    /// Components update one after another on the calling thread.
    SingleThreaded,
    /// Components update concurrently on a dedicated pool; `threads = 0`
    /// picks the pool's own default.
    Parallel { threads: usize },
}

impl Default for UpdateMode {
    fn default() -> Self {
        UpdateMode::SingleThreaded
    }
}

/// Observer of updater activity.
pub trait UpdaterListener: Send {
    fn component_update_started(&mut self, _component: &str, _tick: u64) {}
    fn component_update_finished(&mut self, _component: &str, _tick: u64) {}
    fn couplings_updated(&mut self, _tick: u64) {}
}

/// Handle for requesting a stop from another thread. A stop is honored
/// between ticks; an in-flight tick always completes.
#[derive(Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Drives workspace ticks, possibly using multiple threads.
pub struct WorkspaceUpdater {
    workspace: Workspace,
    mode: UpdateMode,
    /// Number of completed update cycles.
    tick: u64,
    running: Arc<AtomicBool>,
    listeners: Vec<Box<dyn UpdaterListener>>,
    pool: Option<rayon::ThreadPool>,
}

impl WorkspaceUpdater {
    pub fn new(workspace: Workspace, mode: UpdateMode) -> Self {
        let pool = match mode {
            UpdateMode::Parallel { threads } => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .ok(),
            UpdateMode::SingleThreaded => None,
        };
        Self {
            workspace,
            mode,
            tick: 0,
            running: Arc::new(AtomicBool::new(false)),
            listeners: Vec::new(),
            pool,
        }
    }

    pub fn from_config(workspace: Workspace, config: &WorkspaceConfig) -> Self {
        Self::new(workspace, config.update_mode)
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// The number of global update cycles that have run.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    pub fn add_listener(&mut self, listener: Box<dyn UpdaterListener>) {
        self.listeners.push(listener);
    }

    /// Handle for stopping a `run` loop from another context.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.running.clone())
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Execute one global tick: all components update, the barrier
    /// passes, then all couplings flush.
    pub fn update(&mut self) {
        self.tick += 1;
        let tick = self.tick;
        trace!(tick, "workspace update starting");

        let components: Vec<_> = self.workspace.components().to_vec();
        let names: Vec<String> = components.iter().map(|c| c.lock().name().to_owned()).collect();

        match self.mode {
            UpdateMode::Parallel { .. } if self.pool.is_some() => {
                for name in &names {
                    self.notify(|l, n, t| l.component_update_started(n, t), name, tick);
                }
                // Fork-join barrier: every component finishes before any
                // coupling buffer is read.
                let pool = self.pool.as_ref().unwrap();
                pool.install(|| {
                    components.par_iter().for_each(|component| {
                        component.lock().update();
                    });
                });
                for name in &names {
                    self.notify(|l, n, t| l.component_update_finished(n, t), name, tick);
                }
            }
            _ => {
                for (component, name) in components.iter().zip(&names) {
                    self.notify(|l, n, t| l.component_update_started(n, t), name, tick);
                    component.lock().update();
                    self.notify(|l, n, t| l.component_update_finished(n, t), name, tick);
                }
            }
        }

        self.workspace.coupling_manager_mut().update_all();
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in &mut listeners {
            listener.couplings_updated(tick);
        }
        self.listeners = listeners;
        debug!(tick, "workspace update finished");
    }

    fn notify(
        &mut self,
        f: impl Fn(&mut dyn UpdaterListener, &str, u64),
        name: &str,
        tick: u64,
    ) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in &mut listeners {
            f(listener.as_mut(), name, tick);
        }
        self.listeners = listeners;
    }

    /// Run ticks until stopped or until `max_ticks` have completed. The
    /// stop request is checked between ticks only: an in-flight tick
    /// finishes its discipline pass before the loop exits.
    pub fn run(&mut self, max_ticks: Option<u64>) {
        self.running.store(true, Ordering::SeqCst);
        let mut remaining = max_ticks;
        while self.running.load(Ordering::SeqCst) {
            if let Some(n) = remaining {
                if n == 0 {
                    break;
                }
                remaining = Some(n - 1);
            }
            self.update();
        }
        self.running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{container_ref, AttributeValue, ContainerRef};
    use crate::coupling::test_support::Probe;
    use crate::coupling::{consumer, producer};
    use crate::workspace::WorkspaceComponent;

    struct Counter {
        name: String,
        probe: ContainerRef,
    }

    impl Counter {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_owned(),
                probe: container_ref(Probe::new(name)),
            }
        }
    }

    impl WorkspaceComponent for Counter {
        fn name(&self) -> &str {
            &self.name
        }

        fn update(&mut self) {
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
    fn test_single_threaded_tick_flushes_after_updates() {
        let mut workspace = Workspace::new();
        let a = workspace.add_component(Counter::new("a"));
        let b = workspace.add_component(Counter::new("b"));
        let a_probe = a.lock().containers()[0].clone();
        let b_probe = b.lock().containers()[0].clone();
        workspace
            .coupling_manager_mut()
            .couple(
                producer(&a_probe, "level").unwrap(),
                consumer(&b_probe, "level").unwrap(),
            )
            .unwrap();

        let mut updater = WorkspaceUpdater::new(workspace, UpdateMode::SingleThreaded);
        updater.update();
        // Component a ramped to 1 during the tick; the coupling flushed
        // that post-update value into b, overwriting b's own ramp.
        assert_eq!(
            a_probe.read().read("level"),
            Some(AttributeValue::Double(1.0))
        );
        assert_eq!(
            b_probe.read().read("level"),
            Some(AttributeValue::Double(1.0))
        );
        assert_eq!(updater.tick(), 1);
    }

    #[test]
    fn test_parallel_mode_reaches_same_state() {
        let mut workspace = Workspace::new();
        let a = workspace.add_component(Counter::new("a"));
        let b = workspace.add_component(Counter::new("b"));
        let a_probe = a.lock().containers()[0].clone();
        let b_probe = b.lock().containers()[0].clone();
        workspace
            .coupling_manager_mut()
            .couple(
                producer(&a_probe, "level").unwrap(),
                consumer(&b_probe, "level").unwrap(),
            )
            .unwrap();

        let mut updater = WorkspaceUpdater::new(workspace, UpdateMode::Parallel { threads: 2 });
        for _ in 0..10 {
            updater.update();
        }
        assert_eq!(
            a_probe.read().read("level"),
            Some(AttributeValue::Double(10.0))
        );
        // b always ends the tick holding a's post-update value.
        assert_eq!(
            b_probe.read().read("level"),
            Some(AttributeValue::Double(10.0))
        );
    }

    #[test]
    fn test_run_honors_tick_limit() {
        let workspace = Workspace::new();
        let mut updater = WorkspaceUpdater::new(workspace, UpdateMode::SingleThreaded);
        updater.run(Some(5));
        assert_eq!(updater.tick(), 5);
        assert!(!updater.is_running());
    }

    #[test]
    fn test_stop_request_halts_between_ticks() {
        struct Stopper {
            handle: StopHandle,
            stop_at: u64,
        }
        impl UpdaterListener for Stopper {
            fn couplings_updated(&mut self, tick: u64) {
                if tick >= self.stop_at {
                    self.handle.stop();
                }
            }
        }

        let workspace = Workspace::new();
        let mut updater = WorkspaceUpdater::new(workspace, UpdateMode::SingleThreaded);
        let handle = updater.stop_handle();
        updater.add_listener(Box::new(Stopper { handle, stop_at: 3 }));
        updater.run(None);
        // The stop issued during tick 3 is honored between ticks: tick 3
        // completed, tick 4 never started.
        assert_eq!(updater.tick(), 3);
        assert!(!updater.is_running());
    }

    #[test]
    fn test_listener_sees_barrier_ordering() {
        struct Recorder {
            log: Arc<parking_lot::Mutex<Vec<String>>>,
        }
        impl UpdaterListener for Recorder {
            fn component_update_finished(&mut self, component: &str, _tick: u64) {
                self.log.lock().push(format!("finished {component}"));
            }
            fn couplings_updated(&mut self, _tick: u64) {
                self.log.lock().push("couplings".to_owned());
            }
        }

        let mut workspace = Workspace::new();
        workspace.add_component(Counter::new("a"));
        workspace.add_component(Counter::new("b"));
        let mut updater = WorkspaceUpdater::new(workspace, UpdateMode::SingleThreaded);
        let log = Arc::new(parking_lot::Mutex::new(Vec::new()));
        updater.add_listener(Box::new(Recorder { log: log.clone() }));
        updater.update();

        let log = log.lock();
        let couplings_at = log.iter().position(|e| e == "couplings").unwrap();
        // Couplings flush only after every component finished.
        assert_eq!(couplings_at, log.len() - 1);
        assert!(log[..couplings_at].iter().all(|e| e.starts_with("finished")));
    }
}
