use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { generation: u64 },
}

/// Per-question countdown source.
///
/// Each `arm` spawns a ticking thread tagged with a fresh generation and
/// retires whatever was running before; a thread stops as soon as its
/// generation is no longer current. Ticks that were already queued by a
/// retired thread are dropped by [`Ticker::accept`].
pub struct Ticker {
    period: Duration,
    current: Arc<AtomicU64>,
    tx: mpsc::Sender<TimerEvent>,
    rx: mpsc::Receiver<TimerEvent>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            period,
            current: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
        }
    }

    pub fn per_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn arm(&mut self) -> u64 {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.current);
        let tx = self.tx.clone();
        let period = self.period;

        thread::spawn(move || loop {
            thread::sleep(period);
            if current.load(Ordering::SeqCst) != generation {
                break;
            }
            if tx.send(TimerEvent::Tick { generation }).is_err() {
                break;
            }
        });

        trace!(generation, "Timer armed");
        generation
    }

    pub fn cancel(&mut self) {
        let retired = self.current.fetch_add(1, Ordering::SeqCst);
        trace!(generation = retired, "Timer cancelled");
    }

    pub fn generation(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    /// True if `event` came from the timer that is armed right now.
    pub fn accept(&self, event: &TimerEvent) -> bool {
        match event {
            TimerEvent::Tick { generation } => *generation == self.generation(),
        }
    }

    /// Drain pending events, keeping only live ticks.
    pub fn try_iter(&self) -> impl Iterator<Item = TimerEvent> + '_ {
        self.rx.try_iter().filter(|ev| self.accept(ev))
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<TimerEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub fn format_seconds(total_secs: u32) -> String {
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armed_ticker_delivers_ticks() {
        let mut ticker = Ticker::new(Duration::from_millis(5));
        let generation = ticker.arm();
        let ev = ticker.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(ev, TimerEvent::Tick { generation });
        assert!(ticker.accept(&ev));
    }

    #[test]
    fn rearming_retires_previous_generation() {
        let mut ticker = Ticker::new(Duration::from_millis(5));
        let first = ticker.arm();
        let second = ticker.arm();
        assert_ne!(first, second);
        assert!(!ticker.accept(&TimerEvent::Tick { generation: first }));
        assert!(ticker.accept(&TimerEvent::Tick { generation: second }));
    }

    #[test]
    fn cancelled_ticks_are_dropped() {
        let mut ticker = Ticker::new(Duration::from_millis(5));
        ticker.arm();
        thread::sleep(Duration::from_millis(40));
        ticker.cancel();
        assert_eq!(ticker.try_iter().count(), 0);
        thread::sleep(Duration::from_millis(40));
        assert_eq!(ticker.try_iter().count(), 0);
    }

    #[test]
    fn formats_seconds() {
        assert_eq!(format_seconds(7), "7s");
        assert_eq!(format_seconds(75), "1m 15s");
    }
}
