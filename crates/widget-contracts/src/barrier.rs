//! One-time readiness signals and a join over a finite set of them.
//!
//! A child raises its [`ReadySignal`] once, after its first render. The
//! owner collects the matching [`ReadyWaiter`]s into a [`ReadinessBarrier`]
//! and awaits it. There is no timeout: a child that never renders and is
//! never dropped keeps the barrier pending.

use futures::channel::oneshot;
use futures::future::join_all;

pub struct ReadySignal {
    sender: Option<oneshot::Sender<()>>,
}

impl ReadySignal {
    /// Raises the signal. Returns `false` if it was already raised.
    pub fn fire(&mut self) -> bool {
        match self.sender.take() {
            Some(sender) => {
                // The waiter may be gone already; that is fine.
                let _ = sender.send(());
                true
            }
            None => false,
        }
    }

    pub fn is_fired(&self) -> bool {
        self.sender.is_none()
    }
}

pub struct ReadyWaiter {
    receiver: oneshot::Receiver<()>,
    seen: bool,
}

impl ReadyWaiter {
    /// Whether the child is ready (or was dropped without ever rendering).
    pub fn is_ready(&mut self) -> bool {
        if !self.seen {
            self.seen = !matches!(self.receiver.try_recv(), Ok(None));
        }
        self.seen
    }
}

pub fn ready_channel() -> (ReadySignal, ReadyWaiter) {
    let (sender, receiver) = oneshot::channel();
    (
        ReadySignal {
            sender: Some(sender),
        },
        ReadyWaiter {
            receiver,
            seen: false,
        },
    )
}

#[derive(Default)]
pub struct ReadinessBarrier {
    waiters: Vec<ReadyWaiter>,
}

impl ReadinessBarrier {
    pub fn new(waiters: impl IntoIterator<Item = ReadyWaiter>) -> Self {
        Self {
            waiters: waiters.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.waiters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }

    /// Number of children that have not signalled yet.
    pub fn pending(&mut self) -> usize {
        self.waiters
            .iter_mut()
            .map(|w| w.is_ready())
            .filter(|ready| !ready)
            .count()
    }

    /// True when every child is ready right now, so no waiting is needed.
    pub fn all_ready(&mut self) -> bool {
        self.pending() == 0
    }

    /// Completes once every child has signalled or been dropped.
    pub async fn wait(self) {
        let pending = self
            .waiters
            .into_iter()
            .filter_map(|w| (!w.seen).then_some(w.receiver));
        join_all(pending).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::FutureExt;

    #[test]
    fn test_signal_fires_once() {
        let (mut signal, mut waiter) = ready_channel();
        assert!(!waiter.is_ready());
        assert!(signal.fire());
        assert!(!signal.fire());
        assert!(signal.is_fired());
        assert!(waiter.is_ready());
    }

    #[test]
    fn test_barrier_waits_for_every_child() {
        let (mut a, wa) = ready_channel();
        let (mut b, wb) = ready_channel();
        let mut barrier = ReadinessBarrier::new([wa, wb]);
        assert_eq!(barrier.len(), 2);
        assert_eq!(barrier.pending(), 2);

        a.fire();
        assert_eq!(barrier.pending(), 1);
        assert!(!barrier.all_ready());

        let mut wait = barrier.wait().boxed_local();
        assert!((&mut wait).now_or_never().is_none());

        b.fire();
        block_on(wait);
    }

    #[test]
    fn test_dropped_child_counts_as_ready() {
        let (signal, waiter) = ready_channel();
        let mut barrier = ReadinessBarrier::new([waiter]);
        drop(signal);
        assert!(barrier.all_ready());
        block_on(barrier.wait());
    }

    #[test]
    fn test_empty_barrier_is_ready() {
        let mut barrier = ReadinessBarrier::default();
        assert!(barrier.is_empty());
        assert!(barrier.all_ready());
        block_on(barrier.wait());
    }
}
