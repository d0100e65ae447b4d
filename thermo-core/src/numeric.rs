use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMERIC_PREFIX: Regex =
        Regex::new(r"^\s*[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap();
    static ref NON_NUMERIC: Regex = Regex::new(r"[^0-9.\-]").unwrap();
}

/// Đọc số theo kiểu "parse float or zero": lấy tiền tố số hợp lệ ở đầu chuỗi,
/// phần còn lại bị bỏ qua. Không đọc được hoặc không hữu hạn thì trả về 0.
pub fn parse_numeric(raw: &str) -> f64 {
    let value = NUMERIC_PREFIX
        .find(raw)
        .and_then(|m| m.as_str().trim_start().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0);

    // -0 hiển thị thành "-0", chuẩn hóa về 0.
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Bỏ mọi ký tự không phải chữ số, `.` hoặc `-`.
pub fn strip_non_numeric(raw: &str) -> String {
    NON_NUMERIC.replace_all(raw, "").into_owned()
}

/// Làm sạch rồi đọc số: dùng cho mốc nhập tay và nhãn mốc đã hiển thị (`$1,500` → 1500).
pub fn parse_cleansed(raw: &str) -> f64 {
    parse_numeric(&strip_non_numeric(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_leading_numeric_prefix() {
        assert_eq!(parse_numeric("250"), 250.0);
        assert_eq!(parse_numeric("  12.5kg"), 12.5);
        assert_eq!(parse_numeric("1e3"), 1000.0);
        assert_eq!(parse_numeric(".5"), 0.5);
        assert_eq!(parse_numeric("-40"), -40.0);
        assert_eq!(parse_numeric("+7"), 7.0);
        assert_eq!(parse_numeric("5."), 5.0);
    }

    #[test]
    fn unparsable_input_is_zero() {
        assert_eq!(parse_numeric(""), 0.0);
        assert_eq!(parse_numeric("abc"), 0.0);
        assert_eq!(parse_numeric("$100"), 0.0);
        assert_eq!(parse_numeric("--5"), 0.0);
        assert_eq!(parse_numeric("1e999"), 0.0);
    }

    #[test]
    fn negative_zero_is_normalized() {
        let value = parse_numeric("-0");
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }

    #[test]
    fn cleansing_keeps_digits_dots_and_minus() {
        assert_eq!(strip_non_numeric("$1,500.25 USD"), "1500.25");
        assert_eq!(strip_non_numeric("ab-3c"), "-3");
        assert_eq!(parse_cleansed("€2 500"), 2500.0);
        assert_eq!(parse_cleansed("1-2"), 1.0);
    }
}
