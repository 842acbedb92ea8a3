//! Area-change signaling
//!
//! The host raises a one-shot "area changed" event whenever the player
//! transitions instances. Entity identities are only unique within one area,
//! so the frame side must clear telemetry state before processing the first
//! post-transition snapshot.
//!
//! Delivery is a `tokio::sync::watch` generation counter: the host side
//! bumps it, the render loop drains it non-blockingly at frame start with
//! [`AreaWatcher::take_change`], and a background task may `await`
//! [`AreaWatcher::changed`] instead. Dropping the [`AreaSignal`] closes the
//! subscription, which is the "overlay disabled" cancellation path.

use tokio::sync::watch;

/// Host-side handle that raises area-change notifications.
#[derive(Debug)]
pub struct AreaSignal {
    tx: watch::Sender<u64>,
}

impl AreaSignal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx }
    }

    /// Subscribe a watcher. Watchers created after a notification do not
    /// observe it.
    pub fn subscribe(&self) -> AreaWatcher {
        let mut rx = self.tx.subscribe();
        rx.borrow_and_update();
        AreaWatcher { rx }
    }

    /// Raise the area-change notification.
    pub fn notify(&self) {
        self.tx.send_modify(|generation| *generation += 1);
        tracing::info!("area change signaled");
    }
}

impl Default for AreaSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame-side subscription to area changes.
#[derive(Debug)]
pub struct AreaWatcher {
    rx: watch::Receiver<u64>,
}

impl AreaWatcher {
    /// Non-blocking drain: true if one or more notifications arrived since
    /// the last call. Coalesces bursts into a single reset.
    pub fn take_change(&mut self) -> bool {
        let changed = self.rx.has_changed().unwrap_or(false);
        if changed {
            self.rx.borrow_and_update();
        }
        changed
    }

    /// Wait for the next notification. Returns `false` when the signal side
    /// has been dropped (overlay disabled) and no further notifications can
    /// arrive.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_change_drains_and_coalesces() {
        let signal = AreaSignal::new();
        let mut watcher = signal.subscribe();

        assert!(!watcher.take_change());

        signal.notify();
        signal.notify();
        assert!(watcher.take_change());
        // Both notifications drained in one poll.
        assert!(!watcher.take_change());
    }

    #[test]
    fn late_subscriber_sees_only_new_notifications() {
        let signal = AreaSignal::new();
        signal.notify();

        let mut watcher = signal.subscribe();
        assert!(!watcher.take_change());

        signal.notify();
        assert!(watcher.take_change());
    }

    #[tokio::test]
    async fn changed_wakes_on_notify() {
        let signal = AreaSignal::new();
        let mut watcher = signal.subscribe();

        let waiter = tokio::spawn(async move { watcher.changed().await });
        signal.notify();
        assert!(waiter.await.unwrap());
    }

    #[tokio::test]
    async fn dropping_signal_cancels_waiters() {
        let signal = AreaSignal::new();
        let mut watcher = signal.subscribe();
        drop(signal);

        assert!(!watcher.changed().await);
        assert!(!watcher.take_change());
    }
}
