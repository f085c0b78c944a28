pub const FULL_CIRCLE: f64 = 360.0;
pub const HALF_CIRCLE: f64 = 180.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

/// Reduce any angle into `[0, 360)`.
///
/// Uses Euclidean remainder so negative inputs wrap forward. Tiny negative
/// inputs can round up to exactly 360 under `rem_euclid`, which is folded
/// back to 0.
pub fn normalize_angle(angle: f64) -> f64 {
    let r = angle.rem_euclid(FULL_CIRCLE);
    if r >= FULL_CIRCLE {
        0.0
    } else {
        r
    }
}

/// Signed shortest angular distance from `b` to `a`, in `[-180, 180)`.
///
/// A body moving forward across the 360/0 seam yields a small positive value:
/// `circular_difference(0.3, 359.8) == 0.5`.
pub fn circular_difference(a: f64, b: f64) -> f64 {
    normalize_angle(a - b + HALF_CIRCLE) - HALF_CIRCLE
}

/// 0-based division index and the remainder inside that division.
///
/// A value exactly on a boundary belongs to the division starting there.
/// The caller is responsible for a positive `width` and `count`.
pub fn division_index_and_remainder(angle: f64, width: f64, count: u32) -> (u32, f64) {
    let steps = (angle / width).floor();
    let mut remainder = angle - steps * width;
    let mut steps = steps as i64;
    if remainder >= width {
        remainder -= width;
        steps += 1;
    }
    if remainder < 0.0 {
        remainder = 0.0;
    }
    let index = steps.rem_euclid(count as i64) as u32;
    (index, remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_rounding_to_zero() {
        assert_eq!(normalize_angle(-1e-20), 0.0);
    }

    #[test]
    fn difference_is_signed() {
        assert!((circular_difference(10.0, 10.5) + 0.5).abs() < 1e-12);
        assert!((circular_difference(10.5, 10.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn boundary_belongs_to_next_division() {
        let (idx, rem) = division_index_and_remainder(24.0, 12.0, 30);
        assert_eq!(idx, 2);
        assert_eq!(rem, 0.0);
    }

    #[test]
    fn index_wraps_by_count() {
        let (idx, _) = division_index_and_remainder(370.0, 12.0, 30);
        assert_eq!(idx, 0);
    }
}
