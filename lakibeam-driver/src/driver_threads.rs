use crate::config::SharedInterval;
use crate::constants::MAX_DATAGRAM_SIZE;
use crate::queue::IngestQueue;
use crate::stats::IngestStats;
use crate::time::sleep_ms;
use crate::timer::Timers;
use crossbeam_channel::{Receiver, Sender};
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

/// Struct that contains driver threads.
#[derive(Debug)]
pub struct DriverThreads {
    pub(crate) reader_terminator_tx: Sender<bool>,
    pub(crate) reader_thread: Option<JoinHandle<()>>,
    pub(crate) timers: Timers,
    pub(crate) clear_interval: SharedInterval,
}

impl DriverThreads {
    /// Handle to change the frame clear period while the driver runs.
    pub fn clear_interval(&self) -> &SharedInterval {
        &self.clear_interval
    }
}

/// Reports the first datagram arriving from an unexpected source port.
struct SourcePortCheck {
    sensor_port_hint: u16,
    reported: bool,
}

impl SourcePortCheck {
    fn new(sensor_port_hint: u16) -> SourcePortCheck {
        SourcePortCheck {
            sensor_port_hint,
            reported: false,
        }
    }

    /// Returns true when this call logged a mismatch.
    fn check(&mut self, source: SocketAddr) -> bool {
        if self.reported || source.port() == self.sensor_port_hint {
            return false;
        }
        self.reported = true;
        debug!(
            "Datagram from {} while the sensor is expected on port {}",
            source, self.sensor_port_hint
        );
        true
    }
}

pub(crate) fn read_datagrams(
    socket: UdpSocket,
    queue: IngestQueue,
    stats: Arc<IngestStats>,
    sensor_port_hint: u16,
    reader_terminator_rx: Receiver<bool>,
) {
    let mut buffer = vec![0u8; MAX_DATAGRAM_SIZE];
    let mut source_check = SourcePortCheck::new(sensor_port_hint);
    loop {
        if do_terminate(&reader_terminator_rx) {
            debug!("UDP reader stopped");
            return;
        }

        match socket.recv_from(&mut buffer) {
            Ok((n_read, source)) => {
                source_check.check(source);
                queue.push(buffer[..n_read].to_vec());
                stats.record_received();
            }
            Err(e) if is_timeout(&e) => continue,
            Err(e) => {
                warn!("Failed to receive datagram: {e}");
                sleep_ms(10);
            }
        }
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
    )
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Function to join driver threads.
/// This function is automatically called when `driver_threads` is dropped.
pub fn join(driver_threads: &mut DriverThreads) {
    // Fails only when the reader is already gone
    let _ = driver_threads.reader_terminator_tx.try_send(true);

    if let Some(thread) = driver_threads.reader_thread.take() {
        if thread.join().is_err() {
            warn!("UDP reader thread panicked");
        }
        info!("LakiBeam driver stopped");
    }
    driver_threads.timers = Timers::new();
}

impl Drop for DriverThreads {
    fn drop(&mut self) {
        join(self);
    }
}
