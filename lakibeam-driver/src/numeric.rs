use crate::constants::AZIMUTH_RESOLUTION;

pub(crate) fn to_u16_le(low: u8, high: u8) -> u16 {
    ((high as u16) << 8) + (low as u16)
}

pub(crate) fn degree_to_radian(degree: f64) -> f64 {
    degree * std::f64::consts::PI / 180.
}

pub(crate) fn to_azimuth(low: u8, high: u8) -> f64 {
    (to_u16_le(low, high) as f64) * AZIMUTH_RESOLUTION
}

pub(crate) fn to_string(data: &[u8]) -> String {
    data.iter()
        .map(|e| format!("{:02X}", e))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_u16_le() {
        assert_eq!(to_u16_le(0x34, 0x12), 0x1234);
        assert_eq!(to_u16_le(0xFF, 0x00), 0x00FF);
    }

    #[test]
    fn test_to_azimuth() {
        // 0x8CA0 = 36000 -> 360.00 degree
        assert!(f64::abs(to_azimuth(0xA0, 0x8C) - 360.) < 1e-9);
        assert!(f64::abs(to_azimuth(0x39, 0x30) - 123.45) < 1e-9);
    }

    #[test]
    fn test_to_string() {
        assert_eq!(to_string(&[0xFF, 0xEE, 0x01]), "FF EE 01");
    }
}
