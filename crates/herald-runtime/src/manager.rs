//! Event manager - event name to ordered handler list
//!
//! Dispatch is synchronous on the caller's thread. The handler list for
//! an event is snapshotted before the first handler runs and no lock is
//! held while handlers execute, so a handler may register, unregister
//! or trigger without affecting the dispatch it runs in.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use herald_core::{HandlerError, HeraldError, HeraldResult};
use herald_state::ParameterList;
use parking_lot::RwLock;

use crate::{DispatchConfig, FailurePolicy, Subscription, SubscriptionHandle};

static GLOBAL_MANAGER: OnceLock<EventManager> = OnceLock::new();

/// Callback registered against an event name
pub type Handler = Arc<dyn Fn(&ParameterList) -> Result<(), HandlerError> + Send + Sync>;

struct Registration {
    id: u64,
    handler: Handler,
}

/// Event name to ordered handler list
pub struct EventManager {
    events: RwLock<HashMap<String, Vec<Registration>>>,
    next_id: AtomicU64,
    config: DispatchConfig,
}

impl EventManager {
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    pub fn with_config(config: DispatchConfig) -> Self {
        EventManager {
            events: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            config,
        }
    }

    /// Process-wide manager, created on first use
    pub fn global() -> &'static EventManager {
        GLOBAL_MANAGER.get_or_init(EventManager::new)
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Append `handler` to the list for `event`
    pub fn register<F>(&self, event: &str, handler: F) -> SubscriptionHandle
    where
        F: Fn(&ParameterList) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.register_handler(event, Arc::new(handler))
    }

    /// Append an already shared handler to the list for `event`
    pub fn register_handler(&self, event: &str, handler: Handler) -> SubscriptionHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut events = self.events.write();
        let list = events.entry(event.to_string()).or_default();
        list.push(Registration { id, handler });
        tracing::debug!(event, id, handlers = list.len(), "handler registered");

        SubscriptionHandle {
            id,
            event: event.to_string(),
        }
    }

    /// Register `handler` for as long as the returned guard lives
    pub fn subscribe<F>(&self, event: &str, handler: F) -> Subscription<'_>
    where
        F: Fn(&ParameterList) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        let handle = self.register(event, handler);
        Subscription::new(self, handle)
    }

    /// Remove exactly the registration behind `handle`
    ///
    /// Returns false if it was already removed.
    pub fn unregister(&self, handle: &SubscriptionHandle) -> bool {
        // Dropped after the lock is released; handler state may call back in
        let removed = {
            let mut events = self.events.write();
            let Some(list) = events.get_mut(&handle.event) else {
                return false;
            };
            let Some(pos) = list.iter().position(|r| r.id == handle.id) else {
                return false;
            };

            let removed = list.remove(pos);
            if list.is_empty() {
                events.remove(&handle.event);
            }
            removed
        };

        tracing::debug!(event = %handle.event, id = removed.id, "handler unregistered");
        drop(removed);
        true
    }

    /// Remove every handler for `event`, returning how many there were
    pub fn unregister_all(&self, event: &str) -> usize {
        let Some(removed) = self.events.write().remove(event) else {
            return 0;
        };

        let count = removed.len();
        tracing::debug!(event, removed = count, "handlers cleared");
        drop(removed);
        count
    }

    pub fn handler_count(&self, event: &str) -> usize {
        self.events.read().get(event).map_or(0, Vec::len)
    }

    /// Names of every event with at least one handler, sorted
    pub fn events(&self) -> Vec<String> {
        let mut names: Vec<String> = self.events.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Invoke every handler for `event` with the configured policy
    ///
    /// Returns the number of handlers invoked. An event with no handlers
    /// is a no-op.
    pub fn trigger(&self, event: &str, params: &ParameterList) -> HeraldResult<usize> {
        self.trigger_with(event, params, self.config.policy)
    }

    /// Trigger with an empty parameter list
    pub fn trigger_empty(&self, event: &str) -> HeraldResult<usize> {
        self.trigger(event, &ParameterList::new())
    }

    /// Trigger with an explicit failure policy
    pub fn trigger_with(
        &self,
        event: &str,
        params: &ParameterList,
        policy: FailurePolicy,
    ) -> HeraldResult<usize> {
        let handlers = self.snapshot(event);
        if self.config.log_dispatch {
            tracing::debug!(
                event,
                handlers = handlers.len(),
                params = params.len(),
                ?policy,
                "dispatching"
            );
        }

        match policy {
            FailurePolicy::FailFast => {
                for (invoked, handler) in handlers.iter().enumerate() {
                    if let Err(source) = handler(params) {
                        tracing::warn!(event, error = %source, "handler failed");
                        tracing::trace!(
                            event,
                            skipped = handlers.len() - invoked - 1,
                            "dispatch aborted"
                        );
                        return Err(HeraldError::Handler {
                            event: event.to_string(),
                            source,
                        });
                    }
                }
                Ok(handlers.len())
            }
            FailurePolicy::Isolate => {
                let failures: Vec<HeraldError> = handlers
                    .iter()
                    .filter_map(|handler| handler(params).err())
                    .map(|source| {
                        tracing::warn!(event, error = %source, "handler failed");
                        HeraldError::Handler {
                            event: event.to_string(),
                            source,
                        }
                    })
                    .collect();

                if failures.is_empty() {
                    Ok(handlers.len())
                } else {
                    Err(HeraldError::HandlersFailed {
                        event: event.to_string(),
                        failures,
                    })
                }
            }
        }
    }

    fn snapshot(&self, event: &str) -> Vec<Handler> {
        self.events
            .read()
            .get(event)
            .map(|list| list.iter().map(|r| Arc::clone(&r.handler)).collect())
            .unwrap_or_default()
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let events = self.events.read();
        let mut map = f.debug_map();
        for (name, list) in events.iter() {
            map.entry(name, &list.len());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> Handler {
        let log = Arc::clone(log);
        Arc::new(move |_: &ParameterList| -> Result<(), HandlerError> {
            log.lock().push(name);
            Ok(())
        })
    }

    #[test]
    fn test_registration_order() {
        let manager = EventManager::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        for name in ["h1", "h2", "h3"] {
            manager.register_handler("ordered", recorder(&log, name));
        }

        assert_eq!(manager.trigger_empty("ordered").unwrap(), 3);
        assert_eq!(*log.lock(), vec!["h1", "h2", "h3"]);
    }

    #[test]
    fn test_unknown_event_is_noop() {
        let manager = EventManager::new();
        assert_eq!(manager.trigger_empty("nobody-listens").unwrap(), 0);
    }

    #[test]
    fn test_unregister_exact_handler() {
        let manager = EventManager::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        manager.register_handler("e", recorder(&log, "a"));
        let b = manager.register_handler("e", recorder(&log, "b"));
        manager.register_handler("e", recorder(&log, "c"));

        assert!(manager.unregister(&b));
        assert!(!manager.unregister(&b));
        manager.trigger_empty("e").unwrap();
        assert_eq!(*log.lock(), vec!["a", "c"]);
    }

    #[test]
    fn test_last_unregister_drops_event() {
        let manager = EventManager::new();
        let handle = manager.register("solo", |_| Ok(()));
        assert_eq!(manager.events(), vec!["solo"]);

        manager.unregister(&handle);
        assert!(manager.events().is_empty());
        assert_eq!(manager.handler_count("solo"), 0);
    }

    #[test]
    fn test_fail_fast_stops_dispatch() {
        let manager = EventManager::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        manager.register_handler("e", recorder(&log, "first"));
        manager.register("e", |_| Err("broken".into()));
        manager.register_handler("e", recorder(&log, "never"));

        match manager.trigger_empty("e") {
            Err(HeraldError::Handler { event, source }) => {
                assert_eq!(event, "e");
                assert_eq!(source.to_string(), "broken");
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(*log.lock(), vec!["first"]);
    }

    #[test]
    fn test_isolate_runs_everything() {
        let manager = EventManager::with_config(DispatchConfig {
            policy: FailurePolicy::Isolate,
            ..DispatchConfig::default()
        });
        let log = Arc::new(Mutex::new(Vec::new()));
        manager.register("e", |_| Err("one".into()));
        manager.register_handler("e", recorder(&log, "middle"));
        manager.register("e", |_| Err("two".into()));

        match manager.trigger_empty("e") {
            Err(HeraldError::HandlersFailed { failures, .. }) => {
                let messages: Vec<String> = failures.iter().map(|f| f.to_string()).collect();
                assert_eq!(
                    messages,
                    vec![
                        "Handler for event \"e\" failed: one",
                        "Handler for event \"e\" failed: two"
                    ]
                );
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(*log.lock(), vec!["middle"]);

        // Per-call override
        assert!(matches!(
            manager.trigger_with("e", &ParameterList::new(), FailurePolicy::FailFast),
            Err(HeraldError::Handler { .. })
        ));
    }

    #[test]
    fn test_subscription_guard() {
        let manager = EventManager::new();
        let hits = Arc::new(AtomicUsize::new(0));
        {
            let hits = Arc::clone(&hits);
            let _guard = manager.subscribe("scoped", move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
            manager.trigger_empty("scoped").unwrap();
        }
        manager.trigger_empty("scoped").unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let detached = manager.subscribe("kept", |_| Ok(())).detach();
        assert_eq!(manager.handler_count("kept"), 1);
        assert!(manager.unregister(&detached));
    }

    #[test]
    fn test_registration_during_dispatch_is_deferred() {
        let manager = Arc::new(EventManager::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let inner_manager = Arc::clone(&manager);
        let inner_hits = Arc::clone(&hits);
        manager.register("grow", move |_| {
            let hits = Arc::clone(&inner_hits);
            inner_manager.register("grow", move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
            Ok(())
        });

        assert_eq!(manager.trigger_empty("grow").unwrap(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(manager.handler_count("grow"), 2);

        // The handler added by the first dispatch runs in the second
        assert_eq!(manager.trigger_empty("grow").unwrap(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unregister_during_dispatch_is_deferred() {
        let manager = Arc::new(EventManager::new());
        let log = Arc::new(Mutex::new(Vec::new()));
        let victim: Arc<Mutex<Option<SubscriptionHandle>>> = Arc::new(Mutex::new(None));

        let inner_manager = Arc::clone(&manager);
        let inner_log = Arc::clone(&log);
        let inner_victim = Arc::clone(&victim);
        manager.register("shrink", move |_| {
            inner_log.lock().push("h1");
            if let Some(handle) = inner_victim.lock().take() {
                assert!(inner_manager.unregister(&handle));
            }
            Ok(())
        });
        let h2 = manager.register_handler("shrink", recorder(&log, "h2"));
        *victim.lock() = Some(h2);

        // h2 was in the snapshot, so it still runs this time
        assert_eq!(manager.trigger_empty("shrink").unwrap(), 2);
        assert_eq!(*log.lock(), vec!["h1", "h2"]);
        assert_eq!(manager.handler_count("shrink"), 1);

        assert_eq!(manager.trigger_empty("shrink").unwrap(), 1);
        assert_eq!(*log.lock(), vec!["h1", "h2", "h1"]);
    }

    #[test]
    fn test_dropping_handler_state_may_reenter() {
        let manager: &'static EventManager = Box::leak(Box::new(EventManager::new()));

        // Each owner handler holds a guard on the same manager
        let inner = manager.subscribe("inner", |_| Ok(()));
        let owner = manager.register("owner", move |_| {
            let _ = inner.handle();
            Ok(())
        });
        assert_eq!(manager.handler_count("inner"), 1);

        assert!(manager.unregister(&owner));
        assert_eq!(manager.handler_count("inner"), 0);

        let inner = manager.subscribe("inner", |_| Ok(()));
        manager.register("owner", move |_| {
            let _ = inner.handle();
            Ok(())
        });
        assert_eq!(manager.unregister_all("owner"), 1);
        assert_eq!(manager.handler_count("inner"), 0);
        assert!(manager.events().is_empty());
    }

    #[test]
    fn test_unregister_all() {
        let manager = EventManager::new();
        manager.register("bulk", |_| Ok(()));
        manager.register("bulk", |_| Ok(()));
        assert_eq!(manager.unregister_all("bulk"), 2);
        assert_eq!(manager.unregister_all("bulk"), 0);
    }

    #[test]
    fn test_handle_ids_are_unique() {
        let manager = EventManager::new();
        let a = manager.register("x", |_| Ok(()));
        let b = manager.register("y", |_| Ok(()));
        assert_ne!(a.id(), b.id());
        assert_eq!(b.event(), "y");
        assert_eq!(format!("{}", b), format!("y#{}", b.id()));
    }
}
