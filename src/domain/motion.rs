// Motion sample domain model and angular unit handling

/// Channel order used by the motion store, table and CSV export.
pub const MOTION_CHANNELS: [&str; 6] = ["Acc X", "Acc Y", "Acc Z", "Gyro X", "Gyro Y", "Gyro Z"];

/// One decoded six-channel inertial observation. Channels the wire
/// payload did not carry arrive as NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionSample {
    pub acc_x: f64,
    pub acc_y: f64,
    pub acc_z: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
}

/// Scale an angular-rate reading for display by multiplying with 180/pi.
/// Total over all reals, including non-finite inputs.
pub fn scale_angular(value: f64) -> f64 {
    value * (180.0 / std::f64::consts::PI)
}

/// Round to two decimals, matching the dashboard's angular display format.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_scale_angular_uses_literal_factor() {
        // pi/2 in must come out as exactly (pi/2) * (180/pi) = 90.
        assert_eq!(scale_angular(PI / 2.0), (PI / 2.0) * (180.0 / PI));
        assert_eq!(scale_angular(PI / 2.0), 90.0);
        assert_eq!(scale_angular(0.0), 0.0);
        assert_eq!(scale_angular(-PI), -180.0);
    }

    #[test]
    fn test_scale_angular_is_total() {
        assert!(scale_angular(f64::NAN).is_nan());
        assert_eq!(scale_angular(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(-2.344), -2.34);
        assert_eq!(round2(90.0), 90.0);
        assert!(round2(f64::NAN).is_nan());
    }
}
