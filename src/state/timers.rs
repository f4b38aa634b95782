// Owned window timers. Every interval/timeout armed here is cleared on
// `clear_all` or drop, so no callback outlives the controller that armed it.
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::util::{cwarn, js_err};

/// Browser timer delays are signed 32-bit; larger values wrap to negative and
/// fire immediately.
pub fn delay_ms(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

/// One-shot timers by id. A fired callback records its id in `fired`; the
/// entry is dropped on the next `prune` (a closure cannot free itself while
/// it runs).
pub struct Pending<C> {
    entries: HashMap<i32, C>,
    fired: Rc<RefCell<Vec<i32>>>,
}

impl<C> Pending<C> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            fired: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn fired_handle(&self) -> Rc<RefCell<Vec<i32>>> {
        self.fired.clone()
    }

    pub fn insert(&mut self, id: i32, entry: C) {
        self.entries.insert(id, entry);
    }

    pub fn prune(&mut self) {
        let fired: Vec<i32> = self.fired.borrow_mut().drain(..).collect();
        for id in fired {
            self.entries.remove(&id);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Remove every entry, returning the ids still pending.
    pub fn drain_ids(&mut self) -> Vec<i32> {
        self.prune();
        self.entries.drain().map(|(id, _)| id).collect()
    }
}

pub struct TimerSet {
    window: Option<Window>,
    /// Named intervals; a name is armed at most once until cleared.
    intervals: HashMap<&'static str, (i32, Closure<dyn FnMut()>)>,
    timeouts: Pending<Closure<dyn FnMut()>>,
}

impl TimerSet {
    pub fn new() -> Self {
        let window = web_sys::window();
        if window.is_none() {
            cwarn("timers: no window; timers disabled");
        }
        Self {
            window,
            intervals: HashMap::new(),
            timeouts: Pending::new(),
        }
    }

    pub fn is_armed(&self, name: &str) -> bool {
        self.intervals.contains_key(name)
    }

    /// Arm a repeating timer. Returns false if `name` is already armed or the
    /// browser refused the timer.
    pub fn arm_interval<F>(&mut self, name: &'static str, ms: u32, f: F) -> bool
    where
        F: FnMut() + 'static,
    {
        if self.is_armed(name) {
            return false;
        }
        let Some(window) = &self.window else { return false; };
        let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            delay_ms(ms),
        ) {
            Ok(id) => {
                self.intervals.insert(name, (id, cb));
                true
            }
            Err(e) => {
                cwarn(&format!("timers: set_interval '{}' failed: {}", name, js_err(&e)));
                false
            }
        }
    }

    /// Run `f` once after `ms`.
    pub fn schedule<F>(&mut self, ms: u32, f: F)
    where
        F: FnOnce() + 'static,
    {
        self.timeouts.prune();
        let Some(window) = &self.window else { return; };
        let own_id = Rc::new(Cell::new(None::<i32>));
        let fired = self.timeouts.fired_handle();
        let mut f = Some(f);
        let cb = {
            let own_id = own_id.clone();
            Closure::wrap(Box::new(move || {
                if let Some(id) = own_id.get() {
                    fired.borrow_mut().push(id);
                }
                if let Some(f) = f.take() {
                    f();
                }
            }) as Box<dyn FnMut()>)
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            delay_ms(ms),
        ) {
            Ok(id) => {
                own_id.set(Some(id));
                self.timeouts.insert(id, cb);
            }
            Err(e) => cwarn(&format!("timers: set_timeout failed: {}", js_err(&e))),
        }
    }

    pub fn clear(&mut self, name: &str) {
        if let Some((id, _cb)) = self.intervals.remove(name) {
            if let Some(window) = &self.window {
                window.clear_interval_with_handle(id);
            }
        }
    }

    /// Cancel pending one-shot timers only.
    pub fn clear_timeouts(&mut self) {
        for id in self.timeouts.drain_ids() {
            if let Some(window) = &self.window {
                window.clear_timeout_with_handle(id);
            }
        }
    }

    pub fn clear_all(&mut self) {
        let names: Vec<&'static str> = self.intervals.keys().copied().collect();
        for name in names {
            self.clear(name);
        }
        self.clear_timeouts();
    }
}

impl Default for TimerSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TimerSet {
    fn drop(&mut self) {
        self.clear_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_ms_saturates() {
        assert_eq!(delay_ms(1500), 1500);
        assert_eq!(delay_ms(i32::MAX as u32), i32::MAX);
        assert_eq!(delay_ms(3_000_000_000), i32::MAX);
        assert_eq!(delay_ms(u32::MAX), i32::MAX);
    }

    #[test]
    fn test_fired_timeouts_are_pruned() {
        let mut pending: Pending<()> = Pending::new();
        let fired = pending.fired_handle();
        // 400 hide-out timers over a long round, each firing before the next
        for id in 0..400 {
            pending.prune();
            pending.insert(id, ());
            fired.borrow_mut().push(id);
        }
        pending.prune();
        assert_eq!(pending.len(), 0);
    }

    #[test]
    fn test_unfired_timeouts_stay_until_drained() {
        let mut pending: Pending<()> = Pending::new();
        let fired = pending.fired_handle();
        pending.insert(1, ());
        pending.insert(2, ());
        pending.insert(3, ());
        fired.borrow_mut().push(2);
        pending.prune();
        assert_eq!(pending.len(), 2);
        let mut left = pending.drain_ids();
        left.sort();
        assert_eq!(left, vec![1, 3]);
        assert_eq!(pending.len(), 0);
    }
}
