use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::format::FormatOptions;
use crate::milestones::parse_milestones;
use crate::numeric::parse_numeric;
use crate::settings::SiteSettings;

/// Các khóa thuộc tính được nhận diện trên mỗi instance.
pub const RECOGNIZED_KEYS: [&str; 6] = [
    "target",
    "current",
    "milestones",
    "label",
    "unit",
    "show_numbers",
];

/// Thuộc tính thô của một instance. Giá trị `None` nghĩa là lấy mặc định của site.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InstanceAttributes {
    pub target: Option<String>,
    pub current: Option<String>,
    pub milestones: Option<String>,
    pub label: Option<String>,
    pub unit: Option<String>,
    pub show_numbers: Option<String>,
}

impl InstanceAttributes {
    /// Gán một thuộc tính theo tên (không phân biệt hoa thường).
    /// Trả về `false` nếu khóa không được nhận diện.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        let slot = match key.to_ascii_lowercase().as_str() {
            "target" => &mut self.target,
            "current" => &mut self.current,
            "milestones" => &mut self.milestones,
            "label" => &mut self.label,
            "unit" => &mut self.unit,
            "show_numbers" => &mut self.show_numbers,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut attrs = Self::default();
        for (key, value) in pairs {
            if !attrs.set(key.as_ref(), value) {
                debug!(key = key.as_ref(), "bỏ qua thuộc tính không được hỗ trợ");
            }
        }
        attrs
    }
}

/// Cấu hình đã hợp nhất của một instance. Bất biến: `target > 0`, `current >= 0`,
/// mọi mốc nằm trong `[0, target]`, không trùng và tăng dần.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ThermometerConfig {
    target: f64,
    current: f64,
    raw_milestones: String,
    milestones: Vec<f64>,
    label: String,
    unit: String,
    show_numbers: bool,
    format: FormatOptions,
}

impl ThermometerConfig {
    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn raw_milestones(&self) -> &str {
        &self.raw_milestones
    }

    pub fn milestones(&self) -> &[f64] {
        &self.milestones
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn show_numbers(&self) -> bool {
        self.show_numbers
    }

    pub fn format(&self) -> &FormatOptions {
        &self.format
    }

    /// Đổi target; danh sách mốc được phân tích lại từ chuỗi thô.
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = resolve_target(target);
        self.milestones = parse_milestones(&self.raw_milestones, self.target);
        self
    }

    pub fn with_current(mut self, current: f64) -> Self {
        self.current = resolve_current(current);
        self
    }
}

/// Hợp nhất thuộc tính instance lên trên mặc định của site.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    settings: SiteSettings,
}

impl ConfigResolver {
    pub fn new(settings: SiteSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    pub fn resolve(&self, attrs: &InstanceAttributes) -> ThermometerConfig {
        let target = resolve_target(
            attrs
                .target
                .as_deref()
                .map(parse_numeric)
                .unwrap_or(self.settings.default_target),
        );
        let current = resolve_current(attrs.current.as_deref().map(parse_numeric).unwrap_or(0.0));

        let raw_milestones = attrs
            .milestones
            .clone()
            .unwrap_or_else(|| self.settings.default_milestones.clone());
        let milestones = parse_milestones(&raw_milestones, target);

        let show_numbers = match attrs.show_numbers.as_deref() {
            None => self.settings.default_show_numbers,
            Some(flag) if flag.trim().is_empty() => self.settings.default_show_numbers,
            Some(flag) => flag != "false",
        };

        ThermometerConfig {
            target,
            current,
            raw_milestones,
            milestones,
            label: attrs.label.clone().unwrap_or_default(),
            unit: attrs
                .unit
                .clone()
                .unwrap_or_else(|| self.settings.default_unit.clone()),
            show_numbers,
            format: self.settings.format_options(),
        }
    }
}

fn resolve_target(value: f64) -> f64 {
    let value = value.max(0.0);
    if value <= 0.0 || !value.is_finite() {
        debug!(value, "target không dương, ép về 1");
        1.0
    } else {
        value
    }
}

fn resolve_current(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
