//! Background requests polled from the UI thread.
//!
//! A [`Pending`] owns the receiving end of one request. The page that
//! started the request keeps it; when the page is left the receiver is
//! dropped and a late result goes nowhere.

use std::future::Future;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

use tokio::runtime::Runtime;

pub struct Pending<T> {
    rx: Option<Receiver<T>>,
}

impl<T> Default for Pending<T> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<T: Send + 'static> Pending<T> {
    /// Run `fut` on `runtime` and deliver its output here.
    pub fn spawn<F>(runtime: &Runtime, fut: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = channel();
        runtime.spawn(async move {
            let _ = tx.send(fut.await);
        });
        Self { rx: Some(rx) }
    }
}

impl<T> Pending<T> {
    pub fn idle() -> Self {
        Self { rx: None }
    }

    pub fn is_loading(&self) -> bool {
        self.rx.is_some()
    }

    /// Take the result if it has arrived. A task that died without
    /// answering leaves the slot idle.
    pub fn poll(&mut self) -> Option<T> {
        let rx = self.rx.as_ref()?;
        match rx.try_recv() {
            Ok(value) => {
                self.rx = None;
                Some(value)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                tracing::warn!(target: "revisewise::ui", "background task ended without a result");
                self.rx = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn wait_for<T>(pending: &mut Pending<T>) -> Option<T> {
        for _ in 0..200 {
            if let Some(value) = pending.poll() {
                return Some(value);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_idle_is_not_loading() {
        let mut pending: Pending<u32> = Pending::idle();
        assert!(!pending.is_loading());
        assert_eq!(pending.poll(), None);
    }

    #[test]
    fn test_spawn_delivers_once() {
        let runtime = Runtime::new().unwrap();
        let mut pending = Pending::spawn(&runtime, async { 42 });

        assert!(pending.is_loading());
        assert_eq!(wait_for(&mut pending), Some(42));
        assert!(!pending.is_loading());
        assert_eq!(pending.poll(), None);
    }

    #[test]
    fn test_dropped_sender_goes_idle() {
        let (tx, rx) = channel::<u32>();
        drop(tx);
        let mut pending = Pending { rx: Some(rx) };
        assert_eq!(pending.poll(), None);
        assert!(!pending.is_loading());
    }
}
