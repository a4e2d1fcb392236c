#[cfg(not(target_arch = "wasm32"))]
use std::{cell::RefCell, rc::Rc};
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
type PendingCallback = Rc<RefCell<Option<Box<dyn FnOnce()>>>>;

/// One-shot timer used for the post-submit confirmation interval.
/// Dropping the handle cancels the pending callback.
pub struct ConfirmationTimer {
    #[cfg(target_arch = "wasm32")]
    _timeout: gloo_timers::callback::Timeout,
    #[cfg(not(target_arch = "wasm32"))]
    pending: PendingCallback,
}

impl ConfirmationTimer {
    #[cfg(target_arch = "wasm32")]
    pub fn start(delay: Duration, callback: impl FnOnce() + 'static) -> Self {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Self {
            _timeout: gloo_timers::callback::Timeout::new(millis, callback),
        }
    }

    /// Host builds have no browser event loop: the callback is only held
    /// until the handle is dropped. Tests fire it through [`TimerWatch`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn start(delay: Duration, callback: impl FnOnce() + 'static) -> Self {
        log::debug!("confirmation timer armed for {:?} (host)", delay);
        Self {
            pending: Rc::new(RefCell::new(Some(Box::new(callback)))),
        }
    }

    pub fn cancel(self) {
        drop(self);
    }

    #[cfg(all(test, not(target_arch = "wasm32")))]
    pub fn watch(&self) -> TimerWatch {
        TimerWatch(Rc::clone(&self.pending))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Drop for ConfirmationTimer {
    fn drop(&mut self) {
        if self.pending.borrow_mut().take().is_some() {
            log::debug!("confirmation timer cancelled");
        }
    }
}

/// Test-side view of a host timer.
#[cfg(all(test, not(target_arch = "wasm32")))]
pub struct TimerWatch(PendingCallback);

#[cfg(all(test, not(target_arch = "wasm32")))]
impl TimerWatch {
    pub fn is_armed(&self) -> bool {
        self.0.borrow().is_some()
    }

    /// Runs the callback as the browser would at the deadline. Returns
    /// `false` when the timer was already cancelled or fired.
    pub fn fire(&self) -> bool {
        let callback = self.0.borrow_mut().take();
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}
