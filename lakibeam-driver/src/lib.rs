//! Driver for the LakiBeam1 2D LiDAR.
//!
//! The sensor streams 1200-byte UDP packets. [`run_driver`] listens for them
//! on a background thread and returns a [`FrameAccumulator`]. Call
//! [`FrameAccumulator::ingest_cycle`] once per update to decode the pending
//! packets into points; the frame is cleared periodically so that only recent
//! points remain.

mod config;
mod constants;
mod driver_threads;
mod echo;
mod error;
mod frame;
mod geometry;
mod numeric;
mod packet;
mod queue;
mod stats;
mod time;
mod timer;

use crate::constants::{CLEAR_TIMER_NAME, SOCKET_READ_TIMEOUT_MS};
use crate::driver_threads::read_datagrams;
use crossbeam_channel::bounded;
use std::net::UdpSocket;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub use crate::config::{sensor_transform, LakiBeamConfig, SharedInterval, SharedTransform};
pub use crate::driver_threads::{join, DriverThreads};
pub use crate::error::LakiBeamError;
pub use crate::frame::FrameAccumulator;
pub use crate::geometry::to_cartesian;
pub use crate::packet::decode;
pub use crate::queue::IngestQueue;
pub use crate::stats::{CycleReport, IngestStats, StatsSnapshot};
pub use crate::timer::Timers;
pub use lakibeam_data::{MeasurementBlock, Point, ResolvedReturn, TransformParams};

/// Function to launch the LakiBeam driver.
///
/// Binds `0.0.0.0:listen_port`, starts the UDP reader thread and the timer
/// clearing the frame every `clear_interval` seconds.
/// Both threads stop when the returned `DriverThreads` is dropped.
pub fn run_driver(
    config: &LakiBeamConfig,
) -> Result<(DriverThreads, Arc<FrameAccumulator>), LakiBeamError> {
    config.validate()?;
    let clear_interval = SharedInterval::new(config.clear_interval)?;

    let socket = UdpSocket::bind(("0.0.0.0", config.listen_port))?;
    socket.set_read_timeout(Some(Duration::from_millis(SOCKET_READ_TIMEOUT_MS)))?;
    info!("Listening for LakiBeam packets on {}", socket.local_addr()?);

    let queue = IngestQueue::new();
    let transform = SharedTransform::new(config.transform.clone());
    let frame = Arc::new(FrameAccumulator::new(queue.clone(), transform));

    let (reader_terminator_tx, reader_terminator_rx) = bounded(10);
    let stats = frame.stats_handle();
    let sensor_port_hint = config.sensor_port_hint;
    let reader_thread = Some(std::thread::spawn(move || {
        read_datagrams(socket, queue, stats, sensor_port_hint, reader_terminator_rx);
    }));

    let mut timers = Timers::new();
    let clear_target = Arc::clone(&frame);
    timers.add_timer(CLEAR_TIMER_NAME, clear_interval.clone(), move || {
        clear_target.clear()
    });

    let driver_threads = DriverThreads {
        reader_terminator_tx,
        reader_thread,
        timers,
        clear_interval,
    };

    Ok((driver_threads, frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::fixtures::PacketBuilder;
    use crate::time::sleep_ms;

    fn config(clear_interval: f64) -> LakiBeamConfig {
        LakiBeamConfig {
            listen_port: portpicker::pick_unused_port().expect("No ports free"),
            clear_interval,
            transform: TransformParams::default(),
            ..Default::default()
        }
    }

    fn send(port: u16, datagram: &[u8]) {
        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        sender.send_to(datagram, ("127.0.0.1", port)).unwrap();
    }

    fn wait_for_datagrams(frame: &FrameAccumulator, n: u64) {
        for _ in 0..200 {
            if frame.stats().snapshot().datagrams_received >= n {
                return;
            }
            sleep_ms(10);
        }
        panic!("datagrams did not arrive");
    }

    #[test]
    fn test_run_driver_rejects_invalid_config() {
        let mut config = config(0.05);
        config.transform.scale = 10.;
        assert!(matches!(
            run_driver(&config),
            Err(LakiBeamError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_driver_normal_data() {
        let config = config(60.);
        let (threads, frame) = run_driver(&config).unwrap();

        let packet = PacketBuilder::new()
            .block(0, true, 0)
            .slot(0, 0, (1000, 10), (0, 0))
            .slot(0, 8, (3000, 5), (2000, 9))
            .block(1, false, 400)
            .slot(1, 0, (1000, 10), (0, 0))
            .build();
        send(config.listen_port, &packet);
        send(config.listen_port, &[0xFF, 0xEE, 0x00]);
        wait_for_datagrams(&frame, 2);

        let report = frame.ingest_cycle();
        assert_eq!(report.datagrams_decoded, 1);
        assert_eq!(report.malformed, vec![3]);

        let points = frame.snapshot();
        assert_eq!(points.len(), 2);
        assert!(f64::abs(points[0].x) < 1e-6);
        assert!(f64::abs(points[0].y - 1000.) < 1e-6);
        assert_eq!(points[1].distance_mm, 2000);
        assert!(f64::abs(points[1].angle_degree - 2.) < 1e-9);

        drop(threads);
    }

    #[test]
    fn test_run_driver_clears_frame() {
        let config = config(0.02);
        let (threads, frame) = run_driver(&config).unwrap();

        let packet = PacketBuilder::new()
            .block(0, true, 0)
            .slot(0, 0, (1000, 10), (0, 0))
            .build();
        send(config.listen_port, &packet);
        wait_for_datagrams(&frame, 1);
        frame.ingest_cycle();

        sleep_ms(200);
        assert!(frame.is_empty());
        assert!(frame.stats().snapshot().frames_cleared > 0);

        // stopping the driver stops the clear timer
        drop(threads);
        let cleared = frame.stats().snapshot().frames_cleared;
        sleep_ms(100);
        assert_eq!(frame.stats().snapshot().frames_cleared, cleared);
    }

    #[test]
    fn test_runtime_clear_interval() {
        let config = config(60.);
        let (threads, frame) = run_driver(&config).unwrap();
        assert!(f64::abs(threads.clear_interval().seconds() - 60.) < 1e-12);
        assert!(threads.clear_interval().set(0.).is_err());

        let transform = frame.transform();
        transform.set_flip(true, true);
        assert!(transform.get().flip_x);

        drop(threads);
    }
}
