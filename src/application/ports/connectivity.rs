use tokio::sync::watch;

/// Online/offline signal the host application feeds. The queue and scheduler
/// subscribe; detection itself happens outside this crate.
pub trait ConnectivityObserver: Send + Sync {
    fn is_online(&self) -> bool;
    /// Receiver that observes every online/offline transition.
    fn subscribe(&self) -> watch::Receiver<bool>;
}
