//! Display formatting for estimates

/// Format an amount in Vietnamese đồng: `1282500000.0` -> `"1.282.500.000 ₫"`
pub fn format_vnd(value: f64) -> String {
    if value.is_nan() {
        return "NaN ₫".to_string();
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}∞ ₫", sign);
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };

    format!("{}{} ₫", sign, group_thousands(&digits, '.'))
}

/// Format an area with one decimal place
pub fn format_area(value: f64) -> String {
    format!("{:.1} m²", value)
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_vnd(1_282_500_000.0), "1.282.500.000 ₫");
        assert_eq!(format_vnd(3_800_000.0), "3.800.000 ₫");
        assert_eq!(format_vnd(999.0), "999 ₫");
        assert_eq!(format_vnd(0.0), "0 ₫");
        assert_eq!(format_vnd(1_000.4), "1.000 ₫");
        assert_eq!(format_vnd(-475_000_000.0), "-475.000.000 ₫");
    }

    #[test]
    fn test_format_vnd_non_finite() {
        assert_eq!(format_vnd(f64::NAN), "NaN ₫");
        assert_eq!(format_vnd(f64::INFINITY), "∞ ₫");
        assert_eq!(format_vnd(f64::NEG_INFINITY), "-∞ ₫");
    }

    #[test]
    fn test_format_area() {
        assert_eq!(format_area(270.0), "270.0 m²");
        assert_eq!(format_area(40.04), "40.0 m²");
    }
}
