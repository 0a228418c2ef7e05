//! Deterministic virtual time for driving rolls off the browser.
//!
//! [`VirtualClock`] implements [`Clock`] with timers that only fire when the
//! driver advances time, so a full roll completes instantly while every sleep
//! still observes the designed ordering.
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::{Pin, pin};
use std::task::{Context, Poll, Waker};

use futures::task::noop_waker;

use crate::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    #[error("future stalled at {now_ms} ms with no pending timers")]
    Stalled { now_ms: u64 },
}

#[derive(Debug, Default)]
pub struct VirtualClock {
    now_ms: Cell<u64>,
    timers: RefCell<Vec<(u64, Waker)>>,
    sleeps: Cell<u64>,
}

impl VirtualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed virtual milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now_ms.get()
    }

    /// Number of sleeps requested so far.
    #[must_use]
    pub fn sleeps(&self) -> u64 {
        self.sleeps.get()
    }

    /// Jump to the earliest pending deadline and wake every timer due by then.
    /// Returns `false` when nothing is pending.
    pub fn advance(&self) -> bool {
        let next = self.timers.borrow().iter().map(|(deadline, _)| *deadline).min();
        let Some(deadline) = next else {
            return false;
        };
        self.advance_to(deadline);
        true
    }

    /// Move time forward to `deadline_ms` (never backwards) and wake due timers.
    pub fn advance_to(&self, deadline_ms: u64) {
        if deadline_ms > self.now_ms.get() {
            self.now_ms.set(deadline_ms);
        }
        let now = self.now_ms.get();
        let due: Vec<Waker> = {
            let mut timers = self.timers.borrow_mut();
            let (due, pending): (Vec<_>, Vec<_>) =
                timers.drain(..).partition(|(deadline, _)| *deadline <= now);
            *timers = pending;
            due.into_iter().map(|(_, waker)| waker).collect()
        };
        for waker in due {
            waker.wake();
        }
    }

    /// Drive `future` to completion, fast-forwarding time whenever it stalls.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Stalled`] if the future is pending with no timer
    /// left that could wake it.
    pub fn run<F: Future>(&self, future: F) -> Result<F::Output, ClockError> {
        let mut future = pin!(future);
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        loop {
            if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
                return Ok(output);
            }
            if !self.advance() {
                return Err(ClockError::Stalled {
                    now_ms: self.now(),
                });
            }
        }
    }

    fn register(&self, deadline_ms: u64, waker: &Waker) {
        self.timers.borrow_mut().push((deadline_ms, waker.clone()));
    }
}

impl Clock for VirtualClock {
    async fn sleep(&self, ms: u32) {
        self.sleeps.set(self.sleeps.get() + 1);
        VirtualSleep {
            clock: self,
            deadline_ms: self.now().saturating_add(u64::from(ms)),
        }
        .await;
    }
}

struct VirtualSleep<'a> {
    clock: &'a VirtualClock,
    deadline_ms: u64,
}

impl Future for VirtualSleep<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.clock.now() >= self.deadline_ms {
            return Poll::Ready(());
        }
        self.clock.register(self.deadline_ms, cx.waker());
        Poll::Pending
    }
}
