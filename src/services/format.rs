// src/services/format.rs

/// Magnitude units, smallest first.
const UNITS: [&str; 4] = ["", "thousand", "million", "billion"];

/// Render a value as "<prefix> <value .2f> <unit>", scaling down by 1000
/// while a larger unit exists. The unit for values under 1000 is empty and
/// the trailing space stays, e.g. `format_magnitude(500.0, "R$")` is
/// `"R$ 500.00 "`.
pub fn format_magnitude(value: f64, prefix: &str) -> String {
    let mut value = value;
    let mut unit = UNITS[0];

    for (i, u) in UNITS.iter().enumerate() {
        unit = u;
        if value < 1000.0 || i == UNITS.len() - 1 {
            break;
        }
        value /= 1000.0;
    }

    format!("{} {:.2} {}", prefix, value, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_value_keeps_scale() {
        assert_eq!(format_magnitude(500.0, "R$"), "R$ 500.00 ");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(format_magnitude(1500.0, "R$"), "R$ 1.50 thousand");
        assert_eq!(format_magnitude(999_999.0, ""), " 1000.00 thousand");
    }

    #[test]
    fn test_millions() {
        assert_eq!(format_magnitude(1_500_000.0, "R$"), "R$ 1.50 million");
    }

    #[test]
    fn test_billions_get_their_own_unit() {
        assert_eq!(format_magnitude(1_000_000_000.0, "R$"), "R$ 1.00 billion");
    }

    #[test]
    fn test_count_without_prefix() {
        assert_eq!(format_magnitude(2357.0, ""), " 2.36 thousand");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_magnitude(0.0, "R$"), "R$ 0.00 ");
    }
}
