//! A small synchronous event emitter.
//!
//! Generalizes the callback-registry shape already used for UI callbacks
//! elsewhere in this codebase (a `Vec` of boxed closures, looked up and
//! invoked synchronously, each with a handle that removes it again) into a
//! minimal pub/sub primitive for the tree/selection/expansion change
//! events. Dispatch is synchronous and ordered: there is no queueing,
//! batching, or async delivery.

use std::cell::RefCell;
use std::rc::Rc;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    next_id: RefCell<u64>,
}

/// A subscriber list that dispatches events to all live subscribers, in
/// subscription order, on every `emit`.
pub struct Emitter<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Emitter<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                listeners: RefCell::new(Vec::new()),
                next_id: RefCell::new(0),
            }),
        }
    }

    /// Subscribe to this emitter. Returns a [`Disposable`] that removes
    /// the subscription when dropped or explicitly disposed.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Disposable {
        let mut id_slot = self.inner.next_id.borrow_mut();
        let id = *id_slot;
        *id_slot += 1;
        drop(id_slot);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        let inner = Rc::downgrade(&self.inner);
        Disposable::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
            }
        })
    }

    /// Dispatch `value` synchronously to every current subscriber.
    pub fn emit(&self, value: T) {
        let listeners = self.inner.listeners.borrow().clone();
        for (_, listener) in listeners {
            listener(&value);
        }
    }
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("subscriber_count", &self.inner.listeners.borrow().len())
            .finish()
    }
}

/// A handle that removes an event subscription. Dropping it without
/// calling [`Disposable::dispose`] still unsubscribes — disposal is
/// idempotent and happens at most once either way.
pub struct Disposable {
    remove: Option<Box<dyn FnOnce()>>,
}

impl Disposable {
    fn new(remove: impl FnOnce() + 'static) -> Self {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// Remove the subscription now.
    pub fn dispose(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for Disposable {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn subscribers_receive_emitted_values_in_order() {
        let emitter: Emitter<i32> = Emitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = seen.clone();
        let _d = emitter.subscribe(move |v| seen2.borrow_mut().push(*v));
        emitter.emit(1);
        emitter.emit(2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn disposing_stops_delivery() {
        let emitter: Emitter<i32> = Emitter::new();
        let count = Rc::new(Cell::new(0));
        let count2 = count.clone();
        let d = emitter.subscribe(move |_| count2.set(count2.get() + 1));
        emitter.emit(1);
        d.dispose();
        emitter.emit(2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn dropping_the_handle_also_unsubscribes() {
        let emitter: Emitter<i32> = Emitter::new();
        let count = Rc::new(Cell::new(0));
        let count2 = count.clone();
        {
            let _d = emitter.subscribe(move |_| count2.set(count2.get() + 1));
            emitter.emit(1);
        }
        emitter.emit(2);
        assert_eq!(count.get(), 1);
    }
}
