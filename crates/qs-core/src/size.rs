const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human readable size with binary prefixes and one decimal, e.g. `"1.5 KB"`.
/// Anything past the GB range is expressed in TB, however large.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} TB")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(s: &str) -> (f64, &str) {
        let (num, unit) = s.split_once(' ').unwrap();
        (num.parse().unwrap(), unit)
    }

    #[test]
    fn formats_small_values_in_bytes() {
        assert_eq!(format_size(0), "0.0 B");
        assert_eq!(format_size(1), "1.0 B");
        assert_eq!(format_size(1023), "1023.0 B");
    }

    #[test]
    fn switches_unit_at_1024() {
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
        assert_eq!(format_size(1024u64.pow(4)), "1.0 TB");
    }

    #[test]
    fn terminal_unit_is_unbounded() {
        assert_eq!(format_size(2048 * 1024u64.pow(4)), "2048.0 TB");
        let max = format_size(u64::MAX);
        let (_, unit) = split(&max);
        assert_eq!(unit, "TB");
    }

    #[test]
    fn non_terminal_units_stay_below_1024() {
        let mut samples = vec![0u64, 1, 512, 1023, 1024, 1025, 999_999, u64::MAX];
        for shift in 0..64 {
            samples.push(1u64 << shift);
            samples.push((1u64 << shift).saturating_sub(1));
        }
        for bytes in samples {
            let formatted = format_size(bytes);
            let (_, unit) = split(&formatted);
            if unit == "TB" {
                continue;
            }
            let exp = UNITS.iter().position(|u| *u == unit).unwrap() as i32;
            assert!((bytes as f64) / 1024f64.powi(exp) < 1024.0, "{bytes} -> {formatted}");
        }
    }
}
