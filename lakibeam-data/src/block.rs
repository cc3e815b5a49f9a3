#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of measurement slots carried by one data block.
pub const SLOTS_PER_BLOCK: usize = 16;

/// One measurement slot after the two echoes have been merged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolvedReturn {
    /// Distance to an object in mm. Zero means the slot has no return.
    pub distance_mm: u16,
    /// Return strength of the selected echo.
    pub intensity: u8,
    /// Horizontal angle of the slot in degree. Not wrapped at 360.
    pub angle_degree: f64,
}

impl ResolvedReturn {
    pub fn has_return(&self) -> bool {
        self.distance_mm != 0
    }
}

/// Struct to hold one 100-byte data block of a packet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeasurementBlock {
    /// Whether the block starts with the 0xFF 0xEE flag.
    /// Returns of an invalid block are decoded but must not be used.
    pub valid: bool,
    /// Azimuth of the first slot in degree.
    pub azimuth_degree: f64,
    /// Merged returns, ordered by slot index.
    pub returns: [ResolvedReturn; SLOTS_PER_BLOCK],
}

impl MeasurementBlock {
    /// Returns that can be turned into points: the block is flagged valid
    /// and the slot carries a nonzero distance.
    pub fn usable_returns(&self) -> impl Iterator<Item = &ResolvedReturn> {
        let valid = self.valid;
        self.returns
            .iter()
            .filter(move |r| valid && r.has_return())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(valid: bool) -> MeasurementBlock {
        let mut returns = [ResolvedReturn::default(); SLOTS_PER_BLOCK];
        returns[3] = ResolvedReturn {
            distance_mm: 1200,
            intensity: 40,
            angle_degree: 10.75,
        };
        MeasurementBlock {
            valid,
            azimuth_degree: 10.0,
            returns,
        }
    }

    #[test]
    fn test_usable_returns() {
        let valid = block(true);
        let usable: Vec<_> = valid.usable_returns().collect();
        assert_eq!(usable.len(), 1);
        assert_eq!(usable[0].distance_mm, 1200);

        assert_eq!(block(false).usable_returns().count(), 0);
    }
}
