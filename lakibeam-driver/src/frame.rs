use crate::config::SharedTransform;
use crate::error::LakiBeamError;
use crate::geometry::to_cartesian;
use crate::packet::decode;
use crate::queue::IngestQueue;
use crate::stats::{CycleReport, IngestStats};
use lakibeam_data::{Point, TransformParams};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{trace, warn};

/// Owns the points of the current frame.
///
/// `ingest_cycle` is called once per host update, `clear` by the periodic
/// timer. Both only hold the frame lock while touching the point vector.
#[derive(Debug)]
pub struct FrameAccumulator {
    queue: IngestQueue,
    transform: SharedTransform,
    points: Mutex<Vec<Point>>,
    stats: Arc<IngestStats>,
}

impl FrameAccumulator {
    pub fn new(queue: IngestQueue, transform: SharedTransform) -> FrameAccumulator {
        FrameAccumulator {
            queue,
            transform,
            points: Mutex::new(Vec::new()),
            stats: Arc::new(IngestStats::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Point>> {
        self.points.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drains the ingest queue and appends every usable return of every
    /// datagram to the frame.
    ///
    /// Malformed datagrams are skipped and listed in the report.
    pub fn ingest_cycle(&self) -> CycleReport {
        let datagrams = self.queue.drain_all();
        if datagrams.is_empty() {
            return CycleReport::default();
        }

        let params = self.transform.get();
        let mut report = CycleReport::default();
        let mut new_points = Vec::new();
        for datagram in datagrams {
            match packet_points(&datagram, &params) {
                Ok(points) => {
                    report.datagrams_decoded += 1;
                    new_points.extend(points);
                }
                Err(e) => {
                    warn!("Dropping datagram: {e}");
                    report.malformed.push(datagram.len());
                }
            }
        }
        report.points_added = new_points.len();

        self.lock().append(&mut new_points);
        self.stats.record_cycle(&report);
        trace!(
            "Ingested {} datagrams, {} points",
            report.datagrams_decoded,
            report.points_added
        );
        report
    }

    pub fn clear(&self) {
        self.lock().clear();
        self.stats.record_clear();
    }

    /// Copy of the points currently in the frame.
    pub fn snapshot(&self) -> Vec<Point> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn queue(&self) -> &IngestQueue {
        &self.queue
    }

    pub fn transform(&self) -> &SharedTransform {
        &self.transform
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    pub(crate) fn stats_handle(&self) -> Arc<IngestStats> {
        Arc::clone(&self.stats)
    }
}

fn packet_points(
    datagram: &[u8],
    params: &TransformParams,
) -> Result<Vec<Point>, LakiBeamError> {
    let blocks = decode(datagram, params.angular_step_degree)?;
    let points = blocks
        .iter()
        .flat_map(|block| block.usable_returns())
        .map(|r| {
            let (x, y) = to_cartesian(r.distance_mm, r.angle_degree, params);
            Point {
                x,
                y,
                distance_mm: r.distance_mm,
                intensity: r.intensity,
                angle_degree: r.angle_degree,
            }
        })
        .collect();
    Ok(points)
}
