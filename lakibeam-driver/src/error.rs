use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LakiBeamError {
    #[error("Packet must be always 1200 bytes. Actually {0} bytes.")]
    MalformedPacket(usize),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error(transparent)]
    IoError(#[from] io::Error),
}
