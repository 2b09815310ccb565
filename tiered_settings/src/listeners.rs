// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notification.
//!
//! [`ChangeListeners`] is an ordered list of observers. The settings service
//! calls [`ChangeListeners::notify`] synchronously after every change.

use core::fmt;

use smallvec::SmallVec;

use crate::id::PropertyId;
use crate::settings::Tier;
use crate::value::Value;

/// Describes one change to a property.
#[derive(Clone, Copy, Debug)]
pub struct ChangeEvent<'a> {
    /// The property that changed.
    pub id: PropertyId,
    /// Its declared name.
    pub name: &'static str,
    /// The tier that was modified.
    pub tier: Tier,
    /// The effective value after the change.
    pub value: &'a Value,
}

/// Handle returned by [`ChangeListeners::add`], used to remove the listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ChangeEvent<'_>) + Send>;

/// Registered change observers, notified in registration order.
///
/// Observers run on the caller's thread with no isolation: a panicking
/// observer unwinds through the mutation that triggered it and the remaining
/// observers are not called.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use tiered_settings::{ChangeEvent, ChangeListeners, PropertyId, Tier, Value};
///
/// let mut listeners = ChangeListeners::new();
/// let calls = Arc::new(AtomicUsize::new(0));
/// let seen = Arc::clone(&calls);
/// let id = listeners.add(move |_| {
///     seen.fetch_add(1, Ordering::SeqCst);
/// });
///
/// let value = Value::Integer(1);
/// let event = ChangeEvent { id: PropertyId::new(0), name: "P", tier: Tier::Global, value: &value };
/// listeners.notify(&event);
/// assert!(listeners.remove(id));
/// listeners.notify(&event);
///
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
#[derive(Default)]
pub struct ChangeListeners {
    listeners: SmallVec<[(ListenerId, Listener); 4]>,
    next_id: u64,
}

impl ChangeListeners {
    /// Creates an empty listener list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Registers `listener` and returns the handle that removes it.
    ///
    /// Registering the same closure twice yields two independent listeners.
    pub fn add<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ChangeEvent<'_>) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Unknown handles are ignored.
    ///
    /// Returns `true` if a listener was removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter().position(|(lid, _)| *lid == id) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Calls every listener with `event`, in registration order.
    pub fn notify(&mut self, event: &ChangeEvent<'_>) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for ChangeListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeListeners")
            .field("count", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
