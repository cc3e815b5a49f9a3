use crate::constants::{
    BLOCK_FLAG, BLOCK_HEADER_SIZE, BLOCK_SIZE, PACKET_SIZE, SLOT_SIZE,
};
use crate::echo::{resolve, CandidateEcho};
use crate::error::LakiBeamError;
use crate::numeric::{to_azimuth, to_string};
use lakibeam_data::{MeasurementBlock, ResolvedReturn, SLOTS_PER_BLOCK};
use tracing::trace;

pub(crate) fn validate_packet_length(datagram: &[u8]) -> Result<(), LakiBeamError> {
    if datagram.len() != PACKET_SIZE {
        return Err(LakiBeamError::MalformedPacket(datagram.len()));
    }
    Ok(())
}

fn is_block_flag(element0: u8, element1: u8) -> bool {
    [element0, element1] == BLOCK_FLAG
}

fn slot_index(idx: usize) -> usize {
    BLOCK_HEADER_SIZE + idx * SLOT_SIZE
}

/// Decodes one 100-byte data block.
///
/// Blocks without the flag are still decoded so that the output always has
/// one entry per block; consumers check `valid` before using the returns.
pub(crate) fn decode_block(block: &[u8], angular_step_degree: f64) -> MeasurementBlock {
    let valid = is_block_flag(block[0], block[1]);
    if !valid {
        trace!("Block flag mismatched. Observed = {}.", to_string(&block[0..2]));
    }
    let azimuth_degree = to_azimuth(block[2], block[3]);

    let mut returns = [ResolvedReturn::default(); SLOTS_PER_BLOCK];
    for (idx, r) in returns.iter_mut().enumerate() {
        let i = slot_index(idx);
        let first = CandidateEcho::from_bytes(&block[i..i + 3]);
        let second = CandidateEcho::from_bytes(&block[i + 3..i + 6]);
        let (distance_mm, intensity) = resolve(first, second);
        *r = ResolvedReturn {
            distance_mm,
            intensity,
            angle_degree: azimuth_degree + (idx as f64) * angular_step_degree,
        };
    }

    MeasurementBlock {
        valid,
        azimuth_degree,
        returns,
    }
}

/// Decodes a whole datagram into its 12 data blocks.
///
/// # Arguments
///
/// * `datagram` - UDP payload, must be exactly 1200 bytes.
/// * `angular_step_degree` - Angle between two consecutive slots.
pub fn decode(
    datagram: &[u8],
    angular_step_degree: f64,
) -> Result<Vec<MeasurementBlock>, LakiBeamError> {
    validate_packet_length(datagram)?;
    Ok(datagram
        .chunks_exact(BLOCK_SIZE)
        .map(|block| decode_block(block, angular_step_degree))
        .collect())
}
