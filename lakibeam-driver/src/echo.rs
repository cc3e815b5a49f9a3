use crate::numeric::to_u16_le;

/// One of the two echoes reported for a slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CandidateEcho {
    pub(crate) distance: u16,
    pub(crate) intensity: u8,
}

impl CandidateEcho {
    /// Reads an echo from 3 bytes: LE distance followed by intensity.
    pub(crate) fn from_bytes(bytes: &[u8]) -> CandidateEcho {
        CandidateEcho {
            distance: to_u16_le(bytes[0], bytes[1]),
            intensity: bytes[2],
        }
    }
}

/// Picks the echo used for a slot.
///
/// A detected return is preferred over none. When both echoes hit something
/// the stronger one wins and a tie keeps the first echo.
pub(crate) fn resolve(first: CandidateEcho, second: CandidateEcho) -> (u16, u8) {
    match (first.distance, second.distance) {
        (0, 0) => (0, 0),
        (_, 0) => (first.distance, first.intensity),
        (0, _) => (second.distance, second.intensity),
        _ if second.intensity > first.intensity => (second.distance, second.intensity),
        _ => (first.distance, first.intensity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(distance: u16, intensity: u8) -> CandidateEcho {
        CandidateEcho {
            distance,
            intensity,
        }
    }

    #[test]
    fn test_resolve_no_return() {
        assert_eq!(resolve(echo(0, 0), echo(0, 0)), (0, 0));
        // intensity of an empty echo is ignored
        assert_eq!(resolve(echo(0, 90), echo(0, 12)), (0, 0));
    }

    #[test]
    fn test_resolve_single_return() {
        assert_eq!(resolve(echo(1500, 30), echo(0, 0)), (1500, 30));
        assert_eq!(resolve(echo(0, 0), echo(2400, 8)), (2400, 8));
        assert_eq!(resolve(echo(0, 200), echo(2400, 8)), (2400, 8));
    }

    #[test]
    fn test_resolve_stronger_echo() {
        assert_eq!(resolve(echo(1000, 10), echo(3000, 50)), (3000, 50));
        assert_eq!(resolve(echo(1000, 51), echo(3000, 50)), (1000, 51));
    }

    #[test]
    fn test_resolve_tie_keeps_first() {
        assert_eq!(resolve(echo(1000, 50), echo(3000, 50)), (1000, 50));
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(CandidateEcho::from_bytes(&[0xE8, 0x03, 0x7F]), echo(1000, 0x7F));
    }
}
