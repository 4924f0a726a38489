//! Cooperative timer queue.
//!
//! Gesture timers (press confirmation, tick loop) run on the UI thread, so
//! the queue is pumped by the host rather than by background threads: call
//! [`Scheduler::tick`] once per frame to advance against wall-clock time, or
//! [`Scheduler::advance`] to move virtual time explicitly (tests use this to
//! make timing deterministic). Due timers fire in deadline order, and a
//! callback may schedule further timers that still fire within the same pump
//! when their deadline falls inside the advanced window.

use log::trace;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_time::Instant;

pub type TimerId = u64;

struct Timer {
    id: TimerId,
    deadline_ms: u64,
    callback: Box<dyn FnOnce()>,
}

struct SchedulerInner {
    origin: Instant,
    now_ms: u64,
    next_id: TimerId,
    timers: Vec<Timer>,
}

impl SchedulerInner {
    /// Pops the earliest timer due at or before `target_ms`. Ties resolve in
    /// scheduling order since ids are monotonic.
    fn pop_due(&mut self, target_ms: u64) -> Option<Timer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline_ms <= target_ms)
            .min_by_key(|(_, t)| (t.deadline_ms, t.id))
            .map(|(i, _)| i)?;
        Some(self.timers.remove(index))
    }
}

/// Shared handle to the timer queue. Clones refer to the same queue.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                origin: Instant::now(),
                now_ms: 0,
                next_id: 0,
                timers: Vec::new(),
            })),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Number of timers waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Schedules `callback` to run `delay_ms` from now. Dropping the returned
    /// registration (or calling [`TimerRegistration::cancel`]) prevents it
    /// from firing.
    pub fn schedule(
        &self,
        delay_ms: u64,
        callback: impl FnOnce() + 'static,
    ) -> TimerRegistration {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let deadline_ms = inner.now_ms.saturating_add(delay_ms);
        inner.timers.push(Timer {
            id,
            deadline_ms,
            callback: Box::new(callback),
        });
        trace!("scheduler: timer {id} armed for t={deadline_ms}ms");
        TimerRegistration {
            scheduler: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Advances virtual time by `delta_ms`, firing every timer that falls due.
    pub fn advance(&self, delta_ms: u64) {
        let target = self.inner.borrow().now_ms.saturating_add(delta_ms);
        self.advance_to(target);
    }

    /// Advances virtual time to the wall-clock milliseconds elapsed since the
    /// scheduler was created. Hosts call this once per frame.
    pub fn tick(&self) {
        let target = {
            let inner = self.inner.borrow();
            inner.origin.elapsed().as_millis() as u64
        };
        self.advance_to(target);
    }

    fn advance_to(&self, target_ms: u64) {
        loop {
            // Take the next due timer with the borrow released before the
            // callback runs, since callbacks re-enter the scheduler.
            let timer = {
                let mut inner = self.inner.borrow_mut();
                if target_ms < inner.now_ms {
                    return;
                }
                match inner.pop_due(target_ms) {
                    Some(timer) => {
                        inner.now_ms = inner.now_ms.max(timer.deadline_ms);
                        Some(timer)
                    }
                    None => {
                        inner.now_ms = target_ms;
                        None
                    }
                }
            };
            match timer {
                Some(timer) => {
                    trace!("scheduler: timer {} fired at t={}ms", timer.id, timer.deadline_ms);
                    (timer.callback)();
                }
                None => return,
            }
        }
    }

}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned handle to a scheduled timer. Cancels on drop.
pub struct TimerRegistration {
    scheduler: Weak<RefCell<SchedulerInner>>,
    id: Option<TimerId>,
}

impl TimerRegistration {
    /// Cancels the timer if it has not fired yet. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(inner) = self.scheduler.upgrade() {
                inner.borrow_mut().timers.retain(|t| t.id != id);
            }
        }
    }
}

impl Drop for TimerRegistration {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn timers_fire_in_deadline_order() {
        let scheduler = Scheduler::new();
        let fired = Rc::new(RefCell::new(Vec::new()));

        let f = fired.clone();
        let _a = scheduler.schedule(200, move || f.borrow_mut().push("late"));
        let f = fired.clone();
        let _b = scheduler.schedule(100, move || f.borrow_mut().push("early"));

        scheduler.advance(300);
        assert_eq!(*fired.borrow(), vec!["early", "late"]);
    }

    #[test]
    fn reschedule_within_same_pump_fires() {
        // A 50ms self-rescheduling timer must fire repeatedly inside one
        // large advance, the way a tick loop does.
        let scheduler = Scheduler::new();
        let count = Rc::new(RefCell::new(0u32));

        fn arm(scheduler: &Scheduler, count: Rc<RefCell<u32>>, slot: Rc<RefCell<Option<TimerRegistration>>>) {
            let s = scheduler.clone();
            let slot_inner = slot.clone();
            let reg = scheduler.schedule(50, move || {
                *count.borrow_mut() += 1;
                if *count.borrow() < 4 {
                    arm(&s, count.clone(), slot_inner.clone());
                }
            });
            *slot.borrow_mut() = Some(reg);
        }

        let slot = Rc::new(RefCell::new(None));
        arm(&scheduler, count.clone(), slot.clone());
        scheduler.advance(200);
        assert_eq!(*count.borrow(), 4);
    }

    #[test]
    fn dropping_registration_cancels() {
        let scheduler = Scheduler::new();
        let fired = Rc::new(RefCell::new(false));

        let f = fired.clone();
        let reg = scheduler.schedule(10, move || *f.borrow_mut() = true);
        drop(reg);

        scheduler.advance(100);
        assert!(!*fired.borrow());
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn cancel_is_idempotent_after_fire() {
        let scheduler = Scheduler::new();
        let mut reg = scheduler.schedule(10, || {});
        scheduler.advance(20);
        reg.cancel();
        reg.cancel();
    }

    #[test]
    fn zero_delay_fires_on_next_pump() {
        let scheduler = Scheduler::new();
        let fired = Rc::new(RefCell::new(false));
        let f = fired.clone();
        let _reg = scheduler.schedule(0, move || *f.borrow_mut() = true);

        assert!(!*fired.borrow());
        scheduler.advance(0);
        assert!(*fired.borrow());
    }

    #[test]
    fn now_advances_with_fired_deadlines() {
        let scheduler = Scheduler::new();
        let s = scheduler.clone();
        let seen = Rc::new(RefCell::new(0u64));
        let seen_inner = seen.clone();
        let _reg = scheduler.schedule(40, move || *seen_inner.borrow_mut() = s.now_ms());

        scheduler.advance(100);
        assert_eq!(*seen.borrow(), 40);
        assert_eq!(scheduler.now_ms(), 100);
    }
}
