use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

type Handler<E> = Rc<RefCell<dyn FnMut(&E)>>;
type Handlers<E> = RefCell<Vec<Handler<E>>>;

/// A stream of events that handlers can be attached to, like the key events
/// of a whole window or the touch events of one container.
///
/// Cloning an `EventSource` yields another handle to the same listeners.
pub struct EventSource<E> {
    handlers: Rc<Handlers<E>>,
}

impl<E> Default for EventSource<E> {
    fn default() -> Self {
        EventSource {
            handlers: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<E> Clone for EventSource<E> {
    fn clone(&self) -> Self {
        EventSource {
            handlers: Rc::clone(&self.handlers),
        }
    }
}

impl<E: 'static> EventSource<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler`. It is detached again when the returned
    /// [`Subscription`] is dropped.
    pub fn listen(&self, handler: impl FnMut(&E) + 'static) -> Subscription<E> {
        let handler: Handler<E> = Rc::new(RefCell::new(handler));
        self.handlers.borrow_mut().push(Rc::clone(&handler));
        Subscription {
            handler,
            handlers: Rc::downgrade(&self.handlers),
        }
    }

    /// Deliver `event` to every handler attached right now, in the order they
    /// were attached. Handlers may attach or detach listeners while running;
    /// that takes effect from the next event.
    pub fn emit(&self, event: &E) {
        let handlers = self.handlers.borrow().clone();
        for handler in handlers {
            // Skip a handler that is already running further up the stack
            if let Ok(mut handler) = handler.try_borrow_mut() {
                (*handler)(event);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

/// Keeps a handler attached to its [`EventSource`]
#[must_use = "the handler is detached as soon as the subscription is dropped"]
pub struct Subscription<E> {
    handler: Handler<E>,
    handlers: Weak<Handlers<E>>,
}

impl<E> Drop for Subscription<E> {
    fn drop(&mut self) {
        if let Some(handlers) = self.handlers.upgrade() {
            handlers
                .borrow_mut()
                .retain(|item| !Rc::ptr_eq(item, &self.handler));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn dropping_the_subscription_detaches() {
        let source = EventSource::<u32>::new();
        let total = Rc::new(Cell::new(0));

        let subscription = source.listen({
            let total = Rc::clone(&total);
            move |n| total.set(total.get() + n)
        });
        source.emit(&3);
        assert_eq!(source.listener_count(), 1);

        drop(subscription);
        source.emit(&4);
        assert_eq!(total.get(), 3);
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn subscriptions_outliving_the_source_are_harmless() {
        let source = EventSource::<()>::new();
        let subscription = source.listen(|_| {});
        drop(source);
        drop(subscription);
    }

    #[test]
    fn handlers_run_in_order() {
        let source = EventSource::<char>::new();
        let seen = Rc::new(RefCell::new(String::new()));
        let _a = source.listen({
            let seen = Rc::clone(&seen);
            move |c| seen.borrow_mut().push(*c)
        });
        let _b = source.listen({
            let seen = Rc::clone(&seen);
            move |c| seen.borrow_mut().push(c.to_ascii_uppercase())
        });
        source.clone().emit(&'x');
        assert_eq!(*seen.borrow(), "xX");
    }
}
