use crate::application::ports::ConnectivityObserver;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// Watch-channel-backed connectivity signal. The host application feeds it
/// through `set_online` from whatever detection it has; this crate only
/// consumes the transitions.
pub struct ConnectivityMonitor {
    online: AtomicBool,
    tx: watch::Sender<bool>,
}

impl ConnectivityMonitor {
    pub fn new(initially_online: bool) -> Self {
        let (tx, _rx) = watch::channel(initially_online);
        Self {
            online: AtomicBool::new(initially_online),
            tx,
        }
    }

    /// Record the current connectivity state. Only actual transitions are
    /// published to subscribers; repeated identical signals are absorbed.
    pub fn set_online(&self, online: bool) {
        if self.online.swap(online, Ordering::SeqCst) != online {
            tracing::info!(online, "connectivity changed");
            self.tx.send_replace(online);
        }
    }
}

impl ConnectivityObserver for ConnectivityMonitor {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn transitions_reach_subscribers() {
        let monitor = ConnectivityMonitor::new(false);
        let mut rx = monitor.subscribe();
        assert!(!monitor.is_online());

        monitor.set_online(true);
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());
        assert!(monitor.is_online());
    }

    #[tokio::test]
    async fn repeated_signals_are_absorbed() {
        let monitor = ConnectivityMonitor::new(true);
        let mut rx = monitor.subscribe();

        monitor.set_online(true);
        monitor.set_online(true);
        assert!(!rx.has_changed().unwrap());

        monitor.set_online(false);
        assert!(rx.has_changed().unwrap());
    }
}
