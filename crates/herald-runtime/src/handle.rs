//! Subscription handles

use std::fmt;

use crate::EventManager;

/// Identifies one handler registration
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    pub(crate) id: u64,
    pub(crate) event: String,
}

impl SubscriptionHandle {
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn event(&self) -> &str {
        &self.event
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({}#{})", self.event, self.id)
    }
}

impl fmt::Display for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.event, self.id)
    }
}

/// Registration that is removed when dropped
#[must_use = "dropping a Subscription unregisters its handler"]
pub struct Subscription<'a> {
    manager: &'a EventManager,
    handle: SubscriptionHandle,
    armed: bool,
}

impl<'a> Subscription<'a> {
    pub(crate) fn new(manager: &'a EventManager, handle: SubscriptionHandle) -> Self {
        Subscription {
            manager,
            handle,
            armed: true,
        }
    }

    pub fn handle(&self) -> &SubscriptionHandle {
        &self.handle
    }

    /// Keep the registration alive past this guard
    pub fn detach(mut self) -> SubscriptionHandle {
        self.armed = false;
        self.handle.clone()
    }
}

impl fmt::Debug for Subscription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("handle", &self.handle)
            .field("armed", &self.armed)
            .finish()
    }
}

impl Drop for Subscription<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.manager.unregister(&self.handle);
        }
    }
}
