//! Logic lõi của thanh tiến độ dạng nhiệt kế: hợp nhất cấu hình, phân tích mốc,
//! định dạng số, dựng view model và máy trạng thái hiển thị phía client.

mod color;
mod config;
mod format;
mod milestones;
mod numeric;
mod reveal;
mod settings;
mod view;

pub use color::{is_valid_color, sanitize_color};
pub use config::{ConfigResolver, InstanceAttributes, ThermometerConfig, RECOGNIZED_KEYS};
pub use format::{format_number, format_number_with, format_with_unit, FormatOptions};
pub use milestones::{join_milestones, parse_milestones};
pub use numeric::{parse_cleansed, parse_numeric, strip_non_numeric};
pub use reveal::{
    is_marker_met, marker_value, InstanceReading, RevealAction, RevealController, RevealState,
    VISIBILITY_THRESHOLD,
};
pub use settings::{
    SettingsUpdate, SiteSettings, DEFAULT_FILL_FROM, DEFAULT_FILL_TO, DEFAULT_TARGET,
};
pub use view::{MilestonePosition, RenderedThermometer, Renderer, ThermometerViewModel};

/// Lỗi ở các lớp biên (shortcode, file cài đặt, giá trị từ JS).
///
/// Đường hợp nhất cấu hình và dựng view model không bao giờ trả lỗi: dữ liệu sai
/// luôn được kẹp hoặc thay bằng giá trị mặc định.
#[derive(Debug, thiserror::Error)]
pub enum ThermoError {
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    #[error("Shortcode không được hỗ trợ: {0}")]
    UnsupportedShortcode(String),
}
