/// Round a float to two decimal places.
///
/// Uses the common multiply / round / divide trick. Halves round away from zero,
/// which matches half-up rounding for the non-negative weights this is used on.
#[inline]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(15.384615), 15.38);
        assert_eq!(round2(30.769230), 30.77);
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(10.0), 10.0);
    }
}
