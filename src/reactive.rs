//! Explicit change notification.
//!
//! Owners hold a [`Subscribers`] list and call [`Subscribers::notify`] after
//! each state change. Listeners stay registered for as long as the returned
//! [`Subscription`] is alive.

use std::cell::RefCell;
use std::rc::Rc;

pub type Subscriber = Rc<dyn Fn()>;

#[derive(Default, Clone)]
pub struct Subscribers {
    list: Rc<RefCell<Vec<Subscriber>>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, subscriber: Subscriber) -> Subscription {
        self.list.borrow_mut().push(subscriber.clone());
        Subscription {
            subscriber,
            list: Rc::clone(&self.list),
        }
    }

    /// Calls every listener registered at the time of the call. Listeners
    /// may subscribe, unsubscribe or read the owner's state re-entrantly.
    pub fn notify(&self) {
        let subscribers = self.list.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }
}

pub struct Subscription {
    subscriber: Subscriber,
    list: Rc<RefCell<Vec<Subscriber>>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut list = self.list.borrow_mut();
        list.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}
