use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::event::{ShapeModelEvent, ShapeModelListener};
use crate::model::ShapeModel;

/// Broadcasts structural changes to registered listeners.
///
/// The bus only keeps weak references: a listener stays subscribed for as
/// long as somebody else keeps it alive.
pub struct EventBus {
    listeners: RefCell<Vec<Weak<dyn ShapeModelListener>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &format!("<{} listeners>", self.listeners.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a listener to receive events
    pub fn subscribe<L: ShapeModelListener + 'static>(&self, listener: &Rc<L>) {
        let weak = Rc::downgrade(listener);
        let weak: Weak<dyn ShapeModelListener> = weak;
        self.listeners.borrow_mut().push(weak);
    }

    /// Unsubscribe a listener, matched by identity. Returns whether it was
    /// subscribed.
    pub fn unsubscribe<L: ShapeModelListener + 'static>(&self, listener: &Rc<L>) -> bool {
        let target = Rc::as_ptr(listener);
        let mut listeners = self.listeners.borrow_mut();
        match listeners.iter().position(|weak| std::ptr::addr_eq(weak.as_ptr(), target)) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of listeners that are still alive
    pub fn len(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Emit an event to all live listeners in subscription order
    pub fn emit(&self, model: &ShapeModel, event: &ShapeModelEvent) {
        // Snapshot first so listeners may (un)subscribe while being notified.
        let live: Vec<Rc<dyn ShapeModelListener>> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|weak| weak.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        for listener in live {
            listener.update(model, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::shape::Shape;

    #[derive(Default)]
    struct Counter {
        hits: Cell<usize>,
    }

    impl ShapeModelListener for Counter {
        fn update(&self, _model: &ShapeModel, _event: &ShapeModelEvent) {
            self.hits.set(self.hits.get() + 1);
        }
    }

    fn event() -> (ShapeModel, ShapeModelEvent) {
        let mut model = ShapeModel::with_world(100, 100);
        let child = model.insert(Shape::rectangle());
        let event = ShapeModelEvent::added(model.root(), child, 0);
        (model, event)
    }

    #[test]
    fn test_emit_reaches_every_subscriber() {
        let (model, event) = event();
        let bus = EventBus::new();
        let first = Rc::new(Counter::default());
        let second = Rc::new(Counter::default());
        bus.subscribe(&first);
        bus.subscribe(&second);

        bus.emit(&model, &event);
        assert_eq!(first.hits.get(), 1);
        assert_eq!(second.hits.get(), 1);
    }

    #[test]
    fn test_unsubscribe_matches_identity() {
        let (model, event) = event();
        let bus = EventBus::new();
        let first = Rc::new(Counter::default());
        let second = Rc::new(Counter::default());
        bus.subscribe(&first);
        bus.subscribe(&second);

        assert!(bus.unsubscribe(&first));
        assert!(!bus.unsubscribe(&first));
        bus.emit(&model, &event);
        assert_eq!(first.hits.get(), 0);
        assert_eq!(second.hits.get(), 1);
    }

    #[test]
    fn test_dropped_listeners_are_pruned() {
        let (model, event) = event();
        let bus = EventBus::new();
        {
            let gone = Rc::new(Counter::default());
            bus.subscribe(&gone);
            assert_eq!(bus.len(), 1);
        }
        assert!(bus.is_empty());

        bus.emit(&model, &event);
        assert_eq!(bus.listeners.borrow().len(), 0);
    }
}
