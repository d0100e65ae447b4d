use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::sanitize_color;
use crate::format::FormatOptions;
use crate::numeric::parse_numeric;

pub const DEFAULT_TARGET: f64 = 1000.0;
pub const DEFAULT_FILL_FROM: &str = "#5b9cff";
pub const DEFAULT_FILL_TO: &str = "#3ac8a8";

/// Mặc định toàn site, được truyền tường minh vào `ConfigResolver`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteSettings {
    pub default_target: f64,
    pub default_unit: String,
    /// Ví dụ `250,500,750`.
    pub default_milestones: String,
    pub default_show_numbers: bool,
    /// Điểm đầu của gradient thanh tiến độ.
    pub fill_from: String,
    /// Điểm cuối của gradient thanh tiến độ.
    pub fill_to: String,
    pub thousands_separator: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            default_target: DEFAULT_TARGET,
            default_unit: String::new(),
            default_milestones: String::new(),
            default_show_numbers: true,
            fill_from: DEFAULT_FILL_FROM.to_string(),
            fill_to: DEFAULT_FILL_TO.to_string(),
            thousands_separator: None,
        }
    }
}

/// Dữ liệu thô từ form cài đặt. Trường vắng mặt giữ nguyên giá trị trước đó.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettingsUpdate {
    pub default_target: Option<String>,
    pub default_unit: Option<String>,
    pub default_milestones: Option<String>,
    pub default_show_numbers: Option<String>,
    pub fill_from: Option<String>,
    pub fill_to: Option<String>,
    pub thousands_separator: Option<String>,
}

impl SiteSettings {
    /// Áp dụng bản cập nhật sau khi làm sạch từng trường.
    pub fn apply(&self, update: &SettingsUpdate) -> SiteSettings {
        let mut next = self.clone();

        if let Some(raw) = update.default_target.as_deref() {
            next.default_target = parse_numeric(raw).max(0.0);
        }
        if let Some(unit) = update.default_unit.as_deref() {
            next.default_unit = unit.trim().to_string();
        }
        if let Some(milestones) = update.default_milestones.as_deref() {
            next.default_milestones = milestones.trim().to_string();
        }
        if let Some(flag) = update.default_show_numbers.as_deref() {
            next.default_show_numbers = flag != "false";
        }
        if let Some(color) = update.fill_from.as_deref() {
            next.fill_from = sanitize_color(color, &self.fill_from);
        }
        if let Some(color) = update.fill_to.as_deref() {
            next.fill_to = sanitize_color(color, &self.fill_to);
        }
        if let Some(separator) = update.thousands_separator.as_deref() {
            next.thousands_separator = Some(separator.to_string()).filter(|sep| !sep.is_empty());
        }

        debug!(?next, "đã áp dụng cài đặt site");
        next
    }

    /// Chuẩn hóa cài đặt đọc từ file: màu sai quay về mặc định, target âm về 0.
    pub fn sanitized(mut self) -> SiteSettings {
        let defaults = SiteSettings::default();
        self.default_target = if self.default_target.is_finite() {
            self.default_target.max(0.0)
        } else {
            0.0
        };
        self.fill_from = sanitize_color(&self.fill_from, &defaults.fill_from);
        self.fill_to = sanitize_color(&self.fill_to, &defaults.fill_to);
        self.thousands_separator = self.thousands_separator.filter(|sep| !sep.is_empty());
        self
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            thousands_separator: self.thousands_separator.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_hard_coded_values() {
        let settings = SiteSettings::default();
        assert_eq!(settings.default_target, 1000.0);
        assert_eq!(settings.default_unit, "");
        assert_eq!(settings.default_milestones, "");
        assert!(settings.default_show_numbers);
        assert_eq!(settings.fill_from, "#5b9cff");
        assert_eq!(settings.fill_to, "#3ac8a8");
    }

    #[test]
    fn partial_json_merges_over_defaults() {
        let settings: SiteSettings =
            serde_json::from_str(r#"{"default_unit":"$","default_target":5000}"#).unwrap();
        assert_eq!(settings.default_unit, "$");
        assert_eq!(settings.default_target, 5000.0);
        assert_eq!(settings.fill_to, DEFAULT_FILL_TO);
    }

    #[test]
    fn invalid_color_keeps_prior_value() {
        let prior = SiteSettings::default().apply(&SettingsUpdate {
            fill_from: Some("#112233".into()),
            ..SettingsUpdate::default()
        });
        assert_eq!(prior.fill_from, "#112233");

        let next = prior.apply(&SettingsUpdate {
            fill_from: Some("not-a-color".into()),
            fill_to: Some("rgba(0, 0, 0, 0.4)".into()),
            ..SettingsUpdate::default()
        });
        assert_eq!(next.fill_from, "#112233");
        assert_eq!(next.fill_to, "rgba(0, 0, 0, 0.4)");
    }

    #[test]
    fn show_numbers_is_false_only_for_literal_false() {
        let base = SiteSettings::default();
        let off = base.apply(&SettingsUpdate {
            default_show_numbers: Some("false".into()),
            ..SettingsUpdate::default()
        });
        assert!(!off.default_show_numbers);

        let on = off.apply(&SettingsUpdate {
            default_show_numbers: Some("no".into()),
            ..SettingsUpdate::default()
        });
        assert!(on.default_show_numbers);
    }

    #[test]
    fn target_is_clamped_at_zero() {
        let next = SiteSettings::default().apply(&SettingsUpdate {
            default_target: Some("-20".into()),
            default_unit: Some("  € ".into()),
            ..SettingsUpdate::default()
        });
        assert_eq!(next.default_target, 0.0);
        assert_eq!(next.default_unit, "€");
    }

    #[test]
    fn sanitized_repairs_loaded_values() {
        let loaded = SiteSettings {
            default_target: -1.0,
            fill_from: "javascript:alert(1)".into(),
            thousands_separator: Some(String::new()),
            ..SiteSettings::default()
        };
        let clean = loaded.sanitized();
        assert_eq!(clean.default_target, 0.0);
        assert_eq!(clean.fill_from, DEFAULT_FILL_FROM);
        assert_eq!(clean.thousands_separator, None);
    }
}
