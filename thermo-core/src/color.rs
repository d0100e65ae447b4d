use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new(r"(?i)^#(?:[0-9a-f]{3}|[0-9a-f]{6})$").unwrap();
    // Chặn `;`, `{`, `}`, `<` để giá trị không thoát khỏi khối CSS inline.
    static ref FUNCTIONAL_COLOR: Regex = Regex::new(r"(?i)^rgba?\([^(){};<>]+\)$").unwrap();
}

/// Màu hợp lệ: `#rgb`, `#rrggbb` hoặc `rgb(...)`/`rgba(...)`.
pub fn is_valid_color(value: &str) -> bool {
    HEX_COLOR.is_match(value) || FUNCTIONAL_COLOR.is_match(value)
}

/// Trả về màu đã trim nếu hợp lệ, ngược lại giữ `fallback`.
pub fn sanitize_color(candidate: &str, fallback: &str) -> String {
    let candidate = candidate.trim();
    if is_valid_color(candidate) {
        candidate.to_string()
    } else {
        debug!(candidate, fallback, "màu không hợp lệ, giữ giá trị cũ");
        fallback.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hex_and_functional_colors() {
        for color in ["#fff", "#5B9CFF", "rgb(0, 0, 0)", "RGBA(10,20,30,0.5)"] {
            assert!(is_valid_color(color), "{color} phải hợp lệ");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for color in ["", "red", "#ffff", "#gggggg", "rgb()", "hsl(1,2%,3%)", "rgb(1;} body{x:y)"] {
            assert!(!is_valid_color(color), "{color} phải bị loại");
        }
    }

    #[test]
    fn invalid_input_falls_back() {
        assert_eq!(sanitize_color("  #abc ", "#000"), "#abc");
        assert_eq!(sanitize_color("blue", "#5b9cff"), "#5b9cff");
    }
}
