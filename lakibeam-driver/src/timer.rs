use crate::config::SharedInterval;
use crossbeam_channel::{bounded, select, Receiver, Sender};
use std::collections::HashMap;
use std::thread::JoinHandle;
use tracing::{debug, warn};

/// A callback fired on its own thread until cancelled.
#[derive(Debug)]
struct PeriodicTask {
    name: String,
    terminator_tx: Sender<bool>,
    thread: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    fn spawn<F>(name: &str, interval: SharedInterval, callback: F) -> PeriodicTask
    where
        F: FnMut() + Send + 'static,
    {
        let (terminator_tx, terminator_rx) = bounded(1);
        let thread = Some(std::thread::spawn(move || {
            run_periodically(interval, terminator_rx, callback);
        }));
        PeriodicTask {
            name: name.to_string(),
            terminator_tx,
            thread,
        }
    }

    fn cancel(&mut self) {
        // The thread may already be gone if the callback panicked.
        let _ = self.terminator_tx.try_send(true);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Timer \"{}\" panicked", self.name);
            }
        }
        debug!("Timer \"{}\" stopped", self.name);
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn run_periodically<F: FnMut()>(
    interval: SharedInterval,
    terminator_rx: Receiver<bool>,
    mut callback: F,
) {
    loop {
        // The period is read again every round so that updates apply
        // without restarting the timer.
        select! {
            recv(terminator_rx) -> _ => return,
            default(interval.duration()) => callback(),
        }
    }
}

/// Named periodic callbacks.
///
/// Dropping the registry cancels and joins every timer.
#[derive(Debug, Default)]
pub struct Timers {
    tasks: HashMap<String, PeriodicTask>,
}

impl Timers {
    pub fn new() -> Timers {
        Timers::default()
    }

    /// Starts calling `callback` every `interval`. A timer already registered
    /// under `name` is cancelled first.
    pub fn add_timer<F>(&mut self, name: &str, interval: SharedInterval, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.remove_timer(name);
        debug!("Timer \"{}\" every {:?}", name, interval.duration());
        let task = PeriodicTask::spawn(name, interval, callback);
        self.tasks.insert(name.to_string(), task);
    }

    /// Cancels the timer and waits for its thread. Returns false if no timer
    /// has this name.
    pub fn remove_timer(&mut self, name: &str) -> bool {
        self.tasks.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::sleep_ms;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter_timer(timers: &mut Timers, name: &str, seconds: f64) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        timers.add_timer(name, SharedInterval::new(seconds).unwrap(), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[test]
    fn test_timer_fires_until_removed() {
        let mut timers = Timers::new();
        let count = counter_timer(&mut timers, "tick", 0.005);
        sleep_ms(100);
        assert!(timers.contains("tick"));
        assert!(timers.remove_timer("tick"));
        assert!(!timers.contains("tick"));

        let fired = count.load(Ordering::SeqCst);
        assert!(fired > 0);
        sleep_ms(50);
        assert_eq!(count.load(Ordering::SeqCst), fired);

        assert!(!timers.remove_timer("tick"));
    }

    #[test]
    fn test_add_timer_replaces_same_name() {
        let mut timers = Timers::new();
        let first = counter_timer(&mut timers, "tick", 0.005);
        let second = counter_timer(&mut timers, "tick", 0.005);
        let stopped_at = first.load(Ordering::SeqCst);
        sleep_ms(50);
        assert_eq!(first.load(Ordering::SeqCst), stopped_at);
        assert!(second.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn test_interval_update_applies() {
        let mut timers = Timers::new();
        let interval = SharedInterval::new(0.005).unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        timers.add_timer("tick", interval.clone(), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        sleep_ms(50);
        assert!(count.load(Ordering::SeqCst) > 0);

        // the round in flight still uses the old period
        interval.set(60.).unwrap();
        sleep_ms(20);
        let slowed_at = count.load(Ordering::SeqCst);
        sleep_ms(50);
        assert_eq!(count.load(Ordering::SeqCst), slowed_at);
    }

    #[test]
    fn test_drop_cancels_timers() {
        let mut timers = Timers::new();
        let count = counter_timer(&mut timers, "a", 0.005);
        drop(timers);
        let stopped_at = count.load(Ordering::SeqCst);
        sleep_ms(30);
        assert_eq!(count.load(Ordering::SeqCst), stopped_at);
    }
}
