use std::sync::atomic::{AtomicU64, Ordering};

/// Cumulative counters of the ingest path.
#[derive(Debug, Default)]
pub struct IngestStats {
    datagrams_received: AtomicU64,
    datagrams_decoded: AtomicU64,
    malformed_datagrams: AtomicU64,
    points_added: AtomicU64,
    frames_cleared: AtomicU64,
}

impl IngestStats {
    pub(crate) fn record_received(&self) {
        self.datagrams_received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cycle(&self, report: &CycleReport) {
        self.datagrams_decoded
            .fetch_add(report.datagrams_decoded as u64, Ordering::Relaxed);
        self.malformed_datagrams
            .fetch_add(report.malformed.len() as u64, Ordering::Relaxed);
        self.points_added
            .fetch_add(report.points_added as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_clear(&self) {
        self.frames_cleared.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            datagrams_received: self.datagrams_received.load(Ordering::Relaxed),
            datagrams_decoded: self.datagrams_decoded.load(Ordering::Relaxed),
            malformed_datagrams: self.malformed_datagrams.load(Ordering::Relaxed),
            points_added: self.points_added.load(Ordering::Relaxed),
            frames_cleared: self.frames_cleared.load(Ordering::Relaxed),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Datagrams pushed by the UDP reader thread.
    pub datagrams_received: u64,
    pub datagrams_decoded: u64,
    /// Datagrams dropped because of their length.
    pub malformed_datagrams: u64,
    pub points_added: u64,
    pub frames_cleared: u64,
}

/// Outcome of one drain cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub datagrams_decoded: usize,
    pub points_added: usize,
    /// Lengths of the datagrams dropped as malformed.
    pub malformed: Vec<usize>,
}
