use serde::{Deserialize, Serialize};

use crate::config::ThermometerConfig;
use crate::format::{format_number_with, format_with_unit};

/// Vị trí một mốc trên thanh, tính tại thời điểm render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MilestonePosition {
    pub value: f64,
    /// `value / target * 100`; luôn nằm trong `[0, 100]` vì mốc đã được lọc.
    pub percent_position: f64,
    pub met: bool,
    /// Nhãn hiển thị có tiền tố đơn vị, ví dụ `$2500`.
    pub label: String,
}

/// View model đã tính sẵn, không còn logic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThermometerViewModel {
    pub percent: f64,
    pub current: f64,
    pub target: f64,
    pub label: String,
    pub show_numbers: bool,
    pub current_label: String,
    pub target_label: String,
    /// Giá trị không kèm đơn vị cho `aria-valuenow`.
    pub current_text: String,
    /// Giá trị không kèm đơn vị cho `aria-valuemax`.
    pub target_text: String,
    pub milestone_positions: Vec<MilestonePosition>,
}

impl ThermometerViewModel {
    /// Dựng view model; là hàm thuần của cấu hình.
    pub fn from_config(config: &ThermometerConfig) -> Self {
        let target = config.target();
        let current = config.current();
        let format = config.format();
        let unit = config.unit();

        let percent = (current / target * 100.0).clamp(0.0, 100.0);

        let milestone_positions = config
            .milestones()
            .iter()
            .map(|&value| MilestonePosition {
                value,
                percent_position: value / target * 100.0,
                met: current >= value,
                label: format_with_unit(unit, value, format),
            })
            .collect();

        Self {
            percent,
            current,
            target,
            label: config.label().to_string(),
            show_numbers: config.show_numbers(),
            current_label: format_with_unit(unit, current, format),
            target_label: format_with_unit(unit, target, format),
            current_text: format_number_with(current, format),
            target_text: format_number_with(target, format),
            milestone_positions,
        }
    }

    /// Nhãn cho `aria-label`; mặc định là `Progress` khi không có tiêu đề.
    pub fn aria_label(&self) -> &str {
        if self.label.is_empty() {
            "Progress"
        } else {
            &self.label
        }
    }
}

/// Kết quả render một instance kèm id duy nhất để gắn vào DOM.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderedThermometer {
    pub id: String,
    pub view: ThermometerViewModel,
}

/// Cấp id `thermo-N` cho từng instance trong một request.
#[derive(Debug, Clone)]
pub struct Renderer {
    prefix: String,
    issued: u64,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::with_prefix("thermo-")
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            issued: 0,
        }
    }

    pub fn render(&mut self, config: &ThermometerConfig) -> RenderedThermometer {
        self.issued += 1;
        RenderedThermometer {
            id: format!("{}{}", self.prefix, self.issued),
            view: ThermometerViewModel::from_config(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigResolver, InstanceAttributes};
    use crate::settings::SiteSettings;

    fn view(pairs: &[(&str, &str)]) -> ThermometerViewModel {
        let config = ConfigResolver::default()
            .resolve(&InstanceAttributes::from_pairs(pairs.iter().copied()));
        ThermometerViewModel::from_config(&config)
    }

    #[test]
    fn quarter_progress_with_filtered_milestones() {
        let view = view(&[
            ("target", "1000"),
            ("current", "250"),
            ("milestones", "100,2000,100,500"),
        ]);
        assert_eq!(view.percent, 25.0);
        let values: Vec<f64> = view.milestone_positions.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![100.0, 500.0]);
        assert_eq!(view.milestone_positions[0].percent_position, 10.0);
        assert!(view.milestone_positions[0].met);
        assert_eq!(view.milestone_positions[1].percent_position, 50.0);
        assert!(!view.milestone_positions[1].met);
    }

    #[test]
    fn zero_target_clamps_to_full() {
        let view = view(&[("target", "0"), ("current", "50")]);
        assert_eq!(view.target, 1.0);
        assert_eq!(view.percent, 100.0);
    }

    #[test]
    fn over_target_clamps_percent_but_keeps_current_label() {
        let view = view(&[("target", "10000"), ("current", "12000"), ("unit", "$")]);
        assert_eq!(view.percent, 100.0);
        assert_eq!(view.current, 12000.0);
        assert_eq!(view.current_label, "$12000");
        assert_eq!(view.target_label, "$10000");
        assert_eq!(view.current_text, "12000");
    }

    #[test]
    fn milestone_equal_to_current_is_met() {
        let view = view(&[("target", "100"), ("current", "50"), ("milestones", "50")]);
        assert!(view.milestone_positions[0].met);
    }

    #[test]
    fn percent_stays_in_range() {
        for (target, current) in [("3", "1"), ("7", "0"), ("0.5", "9"), ("1000", "999.99")] {
            let view = view(&[("target", target), ("current", current)]);
            let expected = (view.current / view.target * 100.0).clamp(0.0, 100.0);
            assert_eq!(view.percent, expected);
            assert!((0.0..=100.0).contains(&view.percent));
        }
    }

    #[test]
    fn labels_use_grouping_from_settings() {
        let settings = SiteSettings {
            thousands_separator: Some(",".into()),
            default_unit: "$".into(),
            ..SiteSettings::default()
        };
        let config = ConfigResolver::new(settings).resolve(&InstanceAttributes::from_pairs([
            ("target", "10000"),
            ("current", "2500.5"),
            ("milestones", "5000"),
        ]));
        let view = ThermometerViewModel::from_config(&config);
        assert_eq!(view.current_label, "$2,500.5");
        assert_eq!(view.target_text, "10,000");
        assert_eq!(view.milestone_positions[0].label, "$5,000");
    }

    #[test]
    fn aria_label_defaults_to_progress() {
        assert_eq!(view(&[]).aria_label(), "Progress");
        assert_eq!(view(&[("label", "Quỹ")]).aria_label(), "Quỹ");
    }

    #[test]
    fn renderer_issues_unique_ids_and_pure_views() {
        let config = ConfigResolver::default().resolve(&InstanceAttributes::default());
        let mut renderer = Renderer::new();
        let first = renderer.render(&config);
        let second = renderer.render(&config);
        assert_eq!(first.id, "thermo-1");
        assert_eq!(second.id, "thermo-2");
        assert_eq!(first.view, second.view);
    }
}
