use tracing::trace;

use crate::format::{format_number_with, FormatOptions};
use crate::numeric::parse_cleansed;

/// Phân tích danh sách mốc dạng `"250, 500,750"`.
///
/// Mỗi mục được làm sạch rồi đọc số; giá trị ngoài `[0, target]` bị loại,
/// trùng lặp bị gộp, kết quả sắp xếp tăng dần. Kết quả phụ thuộc vào `target`,
/// nên khi target đổi phải phân tích lại từ chuỗi thô.
pub fn parse_milestones(raw: &str, target: f64) -> Vec<f64> {
    let mut values: Vec<f64> = Vec::new();

    for token in raw.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        let value = parse_cleansed(token);
        if !(0.0..=target).contains(&value) {
            trace!(token, value, target, "bỏ mốc nằm ngoài khoảng [0, target]");
            continue;
        }
        if values.contains(&value) {
            continue;
        }
        values.push(value);
    }

    values.sort_by(f64::total_cmp);
    values
}

/// Ghép lại danh sách mốc thành chuỗi có thể phân tích lại.
///
/// Không dùng dấu phân cách hàng nghìn vì dấu phẩy đã là dấu phân cách mốc.
pub fn join_milestones(values: &[f64]) -> String {
    let options = FormatOptions::default();
    values
        .iter()
        .map(|value| format_number_with(*value, &options))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_out_of_range_and_duplicates() {
        assert_eq!(parse_milestones("100,2000,100,500", 1000.0), vec![100.0, 500.0]);
    }

    #[test]
    fn sorts_ascending() {
        assert_eq!(
            parse_milestones("750, 250 ,500", 1000.0),
            vec![250.0, 500.0, 750.0]
        );
    }

    #[test]
    fn ignores_empty_tokens() {
        assert_eq!(parse_milestones(",, 10 ,,", 100.0), vec![10.0]);
        assert!(parse_milestones("", 100.0).is_empty());
        assert!(parse_milestones("   ", 100.0).is_empty());
    }

    #[test]
    fn cleanses_decorated_tokens() {
        assert_eq!(parse_milestones("$250,€500.5", 1000.0), vec![250.0, 500.5]);
    }

    #[test]
    fn unparsable_tokens_become_zero() {
        assert_eq!(parse_milestones("abc,50", 100.0), vec![0.0, 50.0]);
    }

    #[test]
    fn keeps_both_bounds_and_drops_negatives() {
        assert_eq!(parse_milestones("-5,0,100,100.01", 100.0), vec![0.0, 100.0]);
    }

    #[test]
    fn reparsing_joined_output_is_idempotent() {
        let parsed = parse_milestones("900,100.5,300,300,5000", 1000.0);
        let joined = join_milestones(&parsed);
        assert_eq!(joined, "100.5,300,900");
        assert_eq!(parse_milestones(&joined, 1000.0), parsed);
    }

    #[test]
    fn output_respects_invariants() {
        let target = 40.0;
        let parsed = parse_milestones("41,3,-1,39.5,3,abc,40,12,7.25", target);
        assert!(parsed.iter().all(|value| (0.0..=target).contains(value)));
        assert!(parsed.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
