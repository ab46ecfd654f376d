use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::task::JoinHandle;

use crate::lock;

type Action<A> = Arc<dyn Fn(A) -> BoxFuture<'static, ()> + Send + Sync>;

struct Slot<A> {
    action: Action<A>,
    pending: Option<JoinHandle<()>>,
    /// Bumped on every call and cancel; a timer only fires if it still owns
    /// the latest sequence number.
    seq: u64,
    closed: bool,
}

/// Runs an async action once calls have been quiet for `delay`.
///
/// Each [`Debouncer::call`] cancels the previously scheduled run and starts a
/// new timer with the latest arguments. The action always runs on a spawned
/// task, never inside `call`. Once the timer fires the run is detached from
/// the debouncer and later calls cannot abort it.
///
/// Calls must be made from within a Tokio runtime. Dropping the debouncer
/// cancels any scheduled run.
pub struct Debouncer<A> {
    delay: Duration,
    slot: Arc<Mutex<Slot<A>>>,
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn new<F, Fut>(delay: Duration, action: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            delay,
            slot: Arc::new(Mutex::new(Slot {
                action: boxed(action),
                pending: None,
                seq: 0,
                closed: false,
            })),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces the action. A run that fires later uses the new action.
    pub fn set_action<F, Fut>(&self, action: F)
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        lock(&self.slot).action = boxed(action);
    }

    pub fn call(&self, args: A) {
        let mut slot = lock(&self.slot);
        if slot.closed {
            return;
        }
        if let Some(handle) = slot.pending.take() {
            handle.abort();
        }
        slot.seq += 1;
        let seq = slot.seq;
        let shared = Arc::clone(&self.slot);
        let delay = self.delay;
        slot.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let action = {
                let mut slot = lock(&shared);
                if slot.seq != seq || slot.closed {
                    return;
                }
                slot.pending = None;
                Arc::clone(&slot.action)
            };
            action(args).await;
        }));
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.slot).pending.is_some()
    }

    /// Drops the scheduled run, if any.
    pub fn cancel(&self) {
        let mut slot = lock(&self.slot);
        slot.seq += 1;
        if let Some(handle) = slot.pending.take() {
            handle.abort();
        }
    }

    /// Cancels the scheduled run and ignores every later call.
    pub fn close(&self) {
        self.cancel();
        lock(&self.slot).closed = true;
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        let mut slot = lock(&self.slot);
        slot.closed = true;
        if let Some(handle) = slot.pending.take() {
            handle.abort();
        }
    }
}

fn boxed<A, F, Fut>(action: F) -> Action<A>
where
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move |args| action(args).boxed())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, Debouncer<u32>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let debouncer = Debouncer::new(Duration::from_millis(100), move |value| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().unwrap().push(value);
            }
        });
        (seen, debouncer)
    }

    #[tokio::test(start_paused = true)]
    async fn burst_runs_once_with_last_arguments() {
        let (seen, debouncer) = recorder();
        for value in 1..=5 {
            debouncer.call(value);
            tokio::time::sleep(Duration::from_millis(30)).await;
        }
        assert!(seen.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(*seen.lock().unwrap(), vec![5]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn never_runs_inside_the_call() {
        let (seen, debouncer) = recorder();
        debouncer.call(1);
        assert!(seen.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn quiet_gaps_produce_separate_runs() {
        let (seen, debouncer) = recorder();
        debouncer.call(1);
        tokio::time::sleep(Duration::from_millis(150)).await;
        debouncer.call(2);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_debouncer_never_fires() {
        let (seen, debouncer) = recorder();
        debouncer.call(1);
        drop(debouncer);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn latest_action_is_used() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&first);
        let debouncer = Debouncer::new(Duration::from_millis(50), move |_: ()| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        debouncer.call(());
        let counter = Arc::clone(&second);
        debouncer.set_action(move |_: ()| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_debouncer_ignores_calls() {
        let (seen, debouncer) = recorder();
        debouncer.call(1);
        debouncer.close();
        debouncer.call(2);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(seen.lock().unwrap().is_empty());
    }
}
