pub(crate) const BLOCK_COUNT: usize = 12;
pub(crate) const BLOCK_SIZE: usize = 100;
pub(crate) const PACKET_SIZE: usize = BLOCK_COUNT * BLOCK_SIZE;
pub(crate) const BLOCK_HEADER_SIZE: usize = 4;
pub(crate) const SLOT_SIZE: usize = 6;
pub(crate) const BLOCK_FLAG: [u8; 2] = [0xFF, 0xEE];
// Azimuth is transmitted in 0.01 degree
pub(crate) const AZIMUTH_RESOLUTION: f64 = 0.01;
pub(crate) const DEFAULT_LISTEN_PORT: u16 = 2346;
pub(crate) const DEFAULT_SENSOR_PORT: u16 = 1206;
pub(crate) const DEFAULT_CLEAR_INTERVAL_SECONDS: f64 = 0.05;
pub(crate) const MAX_DATAGRAM_SIZE: usize = 2048;
pub(crate) const SOCKET_READ_TIMEOUT_MS: u64 = 10;
pub(crate) const CLEAR_TIMER_NAME: &str = "clear_frame";
// Ranges accepted for runtime configuration
pub(crate) const ROTATION_RANGE: (f64, f64) = (0., 360.);
pub(crate) const MAX_SCALE: f64 = 3.;
pub(crate) const OFFSET_RANGE: (f64, f64) = (-500., 500.);
// Output units per mm used when no scale is configured
pub(crate) const DEFAULT_SCALE: f64 = 0.04;
