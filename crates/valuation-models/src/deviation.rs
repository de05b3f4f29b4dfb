//! Price deviation from a fair value.

/// `(price - fair_value) / fair_value * 100`.
///
/// Positive means the price trades above fair value. `None` when the fair
/// value is not positive or the price is unusable.
#[must_use]
pub fn deviation_percent(price: f64, fair_value: f64) -> Option<f64> {
    if !(fair_value > 0.0 && fair_value.is_finite() && price.is_finite() && price > 0.0) {
        return None;
    }
    Some((price - fair_value) / fair_value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deviation_sign() {
        assert_eq!(deviation_percent(100.0, 80.0), Some(25.0));
        assert_eq!(deviation_percent(60.0, 80.0), Some(-25.0));
        assert_eq!(deviation_percent(80.0, 80.0), Some(0.0));
    }

    #[test]
    fn test_no_deviation_without_fair_value() {
        assert_eq!(deviation_percent(100.0, 0.0), None);
        assert_eq!(deviation_percent(100.0, -50.0), None);
        assert_eq!(deviation_percent(0.0, 80.0), None);
        assert_eq!(deviation_percent(f64::NAN, 80.0), None);
    }
}
