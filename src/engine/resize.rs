use std::cell::RefCell;
use std::rc::Rc;

use super::Viewport;

pub type ResizeListener = Rc<RefCell<dyn FnMut(Viewport)>>;

pub trait ResizeNotifier {
    fn subscribe(&self, listener: ResizeListener) -> u64;
    fn unsubscribe(&self, id: u64);
}

pub struct ResizeSubscription {
    notifier: Rc<dyn ResizeNotifier>,
    id: u64,
}

impl ResizeSubscription {
    pub fn new(notifier: Rc<dyn ResizeNotifier>, listener: ResizeListener) -> Self {
        let id = notifier.subscribe(listener);
        Self { notifier, id }
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.notifier.unsubscribe(self.id);
    }
}

pub struct ResizeDebouncer {
    settle_secs: f64,
    current: Option<Viewport>,
    pending: Option<(Viewport, f64)>,
}

impl ResizeDebouncer {
    pub fn new(settle_secs: f64) -> Self {
        Self {
            settle_secs,
            current: None,
            pending: None,
        }
    }

    pub fn observe(&mut self, viewport: Viewport, now_secs: f64) -> Option<Viewport> {
        if self.current.is_none() {
            self.current = Some(viewport);
            return Some(viewport);
        }

        if self.current == Some(viewport) {
            self.pending = None;
            return None;
        }

        match self.pending {
            Some((pending, since)) if pending == viewport => {
                if now_secs - since >= self.settle_secs {
                    self.current = Some(viewport);
                    self.pending = None;
                    Some(viewport)
                } else {
                    None
                }
            }
            _ => {
                self.pending = Some((viewport, now_secs));
                None
            }
        }
    }

    pub fn is_settling(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{ResizeDebouncer, ResizeListener, ResizeNotifier, ResizeSubscription};
    use crate::engine::Viewport;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct CountingNotifier {
        listeners: RefCell<HashMap<u64, ResizeListener>>,
        next_id: RefCell<u64>,
    }

    impl ResizeNotifier for CountingNotifier {
        fn subscribe(&self, listener: ResizeListener) -> u64 {
            let mut next_id = self.next_id.borrow_mut();
            *next_id += 1;
            self.listeners.borrow_mut().insert(*next_id, listener);
            *next_id
        }

        fn unsubscribe(&self, id: u64) {
            self.listeners.borrow_mut().remove(&id);
        }
    }

    #[test]
    fn subscription_unsubscribes_on_drop() {
        let notifier = Rc::new(CountingNotifier::default());
        let seen = Rc::new(RefCell::new(Vec::new()));

        {
            let sink = Rc::clone(&seen);
            let listener: ResizeListener = Rc::new(RefCell::new(move |viewport: Viewport| {
                sink.borrow_mut().push(viewport);
            }));
            let _subscription =
                ResizeSubscription::new(Rc::clone(&notifier) as Rc<dyn ResizeNotifier>, listener);
            assert_eq!(notifier.listeners.borrow().len(), 1);

            for listener in notifier.listeners.borrow().values() {
                (listener.borrow_mut())(Viewport::new(320.0, 240.0));
            }
        }

        assert_eq!(notifier.listeners.borrow().len(), 0);
        assert_eq!(seen.borrow().as_slice(), &[Viewport::new(320.0, 240.0)]);
    }

    #[test]
    fn first_observation_applies_immediately() {
        let mut debouncer = ResizeDebouncer::new(0.2);
        assert_eq!(
            debouncer.observe(Viewport::new(800.0, 600.0), 0.0),
            Some(Viewport::new(800.0, 600.0))
        );
    }

    #[test]
    fn changes_settle_after_the_quiet_period() {
        let mut debouncer = ResizeDebouncer::new(0.2);
        debouncer.observe(Viewport::new(800.0, 600.0), 0.0);

        assert_eq!(debouncer.observe(Viewport::new(900.0, 600.0), 0.05), None);
        assert!(debouncer.is_settling());
        assert_eq!(debouncer.observe(Viewport::new(900.0, 600.0), 0.1), None);
        assert_eq!(
            debouncer.observe(Viewport::new(900.0, 600.0), 0.3),
            Some(Viewport::new(900.0, 600.0))
        );
        assert!(!debouncer.is_settling());
    }

    #[test]
    fn a_newer_size_restarts_the_quiet_period() {
        let mut debouncer = ResizeDebouncer::new(0.2);
        debouncer.observe(Viewport::new(800.0, 600.0), 0.0);

        debouncer.observe(Viewport::new(900.0, 600.0), 0.05);
        debouncer.observe(Viewport::new(950.0, 600.0), 0.1);
        assert_eq!(debouncer.observe(Viewport::new(950.0, 600.0), 0.25), None);
        assert_eq!(
            debouncer.observe(Viewport::new(950.0, 600.0), 0.35),
            Some(Viewport::new(950.0, 600.0))
        );
    }

    #[test]
    fn returning_to_the_current_size_cancels_the_pending_change() {
        let mut debouncer = ResizeDebouncer::new(0.2);
        debouncer.observe(Viewport::new(800.0, 600.0), 0.0);

        debouncer.observe(Viewport::new(900.0, 600.0), 0.05);
        assert_eq!(debouncer.observe(Viewport::new(800.0, 600.0), 0.1), None);
        assert!(!debouncer.is_settling());
    }

    #[test]
    fn cancel_discards_pending_state() {
        let mut debouncer = ResizeDebouncer::new(0.2);
        debouncer.observe(Viewport::new(800.0, 600.0), 0.0);
        debouncer.observe(Viewport::new(900.0, 600.0), 0.05);

        debouncer.cancel();
        assert!(!debouncer.is_settling());
        assert_eq!(debouncer.observe(Viewport::new(900.0, 600.0), 10.0), None);
    }
}
