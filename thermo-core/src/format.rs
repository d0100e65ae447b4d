use serde::{Deserialize, Serialize};

/// Tùy chọn hiển thị số. Gom nhóm hàng nghìn là tùy chọn, mặc định tắt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatOptions {
    #[serde(default)]
    pub thousands_separator: Option<String>,
}

impl FormatOptions {
    pub fn grouped(separator: impl Into<String>) -> Self {
        Self {
            thousands_separator: Some(separator.into()),
        }
    }
}

/// Định dạng số với 2 chữ số thập phân rồi bỏ số 0 và dấu chấm thừa ở cuối
/// (`2500.00` → `2500`, `2500.50` → `2500.5`).
pub fn format_number(value: f64) -> String {
    format_number_with(value, &FormatOptions::default())
}

pub fn format_number_with(value: f64, options: &FormatOptions) -> String {
    let fixed = format!("{value:.2}");
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let integer = match options.thousands_separator.as_deref() {
        Some(separator) if !separator.is_empty() => group_thousands(integer, separator),
        _ => integer.to_string(),
    };

    let formatted = if fraction.is_empty() {
        integer
    } else {
        format!("{integer}.{fraction}")
    };

    if formatted == "-0" {
        "0".to_string()
    } else {
        formatted
    }
}

/// Nhãn có tiền tố đơn vị, ví dụ `$2500.5`.
pub fn format_with_unit(unit: &str, value: f64, options: &FormatOptions) -> String {
    format!("{unit}{}", format_number_with(value, options))
}

fn group_thousands(integer: &str, separator: &str) -> String {
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped}")
}
