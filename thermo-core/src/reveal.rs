//! Máy trạng thái hiển thị phía client: `Pending → Observing → Animated`.
//!
//! Controller không chạm vào DOM; mỗi bước trả về danh sách `RevealAction` để
//! lớp host (IntersectionObserver, requestAnimationFrame) thực thi. Mọi dữ liệu
//! đầu vào được đọc lại từ thuộc tính đã render, không dùng chung view model.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::numeric::{parse_cleansed, parse_numeric};

/// Tỷ lệ hiển thị tối thiểu để kích hoạt hiệu ứng.
pub const VISIBILITY_THRESHOLD: f64 = 0.2;

/// Trình duyệt có thể báo tỷ lệ nhỉnh dưới ngưỡng ở đúng lần vượt ngưỡng.
const RATIO_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    Pending,
    Observing,
    Animated,
}

/// Giá trị đọc từ `data-percent`, `data-current`, `data-target` của phần tử gốc.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InstanceReading {
    pub percent: f64,
    pub current: f64,
    pub target: f64,
}

impl InstanceReading {
    pub fn from_attributes(
        percent: Option<&str>,
        current: Option<&str>,
        target: Option<&str>,
    ) -> Self {
        let target = target.map(parse_numeric).unwrap_or(0.0);
        let mut reading = Self {
            percent: 0.0,
            current: current.map(parse_numeric).unwrap_or(0.0),
            target: if target > 0.0 { target } else { 1.0 },
        };
        // Thiếu `data-percent` thì suy ra từ current/target.
        reading.percent = match percent.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => parse_numeric(raw),
            None => reading.derived_percent(),
        };
        reading
    }

    /// `clamp(current / target * 100, 0, 100)` tính từ thuộc tính đã render.
    pub fn derived_percent(&self) -> f64 {
        (self.current / self.target * 100.0).clamp(0.0, 100.0)
    }
}

/// Giá trị số của một mốc: ưu tiên `data-value`, nếu thiếu thì đọc lại từ nhãn.
pub fn marker_value(value_attr: Option<&str>, label_text: Option<&str>) -> f64 {
    match value_attr.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => parse_numeric(raw),
        None => label_text.map(parse_cleansed).unwrap_or(0.0),
    }
}

pub fn is_marker_met(marker_value: f64, current: f64) -> bool {
    marker_value <= current
}

/// Lệnh cho lớp host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RevealAction {
    Observe { key: String },
    Unobserve { key: String },
    /// Host đặt chiều rộng ở frame kế tiếp để trạng thái 0% được vẽ trước.
    AnimateFill { key: String, percent: f64 },
    SetMarkerMet { key: String, index: usize, met: bool },
}

impl RevealAction {
    pub fn key(&self) -> &str {
        match self {
            RevealAction::Observe { key }
            | RevealAction::Unobserve { key }
            | RevealAction::AnimateFill { key, .. }
            | RevealAction::SetMarkerMet { key, .. } => key,
        }
    }
}

#[derive(Debug, Clone)]
struct RevealInstance {
    key: String,
    reading: InstanceReading,
    state: RevealState,
}

#[derive(Debug, Clone)]
pub struct RevealController {
    visibility_supported: bool,
    instances: Vec<RevealInstance>,
}

impl RevealController {
    /// `visibility_supported = false` bỏ qua `Observing` và hiển thị ngay khi khởi tạo.
    pub fn new(visibility_supported: bool) -> Self {
        Self {
            visibility_supported,
            instances: Vec::new(),
        }
    }

    pub fn visibility_supported(&self) -> bool {
        self.visibility_supported
    }

    /// Ghi nhận một instance, tính lại trạng thái các mốc rồi gắn theo dõi.
    /// Instance trùng khóa bị bỏ qua.
    pub fn discover(
        &mut self,
        key: impl Into<String>,
        reading: InstanceReading,
        marker_values: &[f64],
    ) -> Vec<RevealAction> {
        let key = key.into();
        if self.find(&key).is_some() {
            debug!(%key, "instance đã được ghi nhận");
            return Vec::new();
        }

        let mut actions: Vec<RevealAction> = marker_values
            .iter()
            .enumerate()
            .map(|(index, value)| RevealAction::SetMarkerMet {
                key: key.clone(),
                index,
                met: is_marker_met(*value, reading.current),
            })
            .collect();

        let mut instance = RevealInstance {
            key: key.clone(),
            reading,
            state: RevealState::Pending,
        };

        if self.visibility_supported {
            instance.state = RevealState::Observing;
            actions.push(RevealAction::Observe { key });
        } else {
            instance.state = RevealState::Animated;
            actions.push(RevealAction::AnimateFill {
                key,
                percent: reading.percent,
            });
        }

        debug!(key = %instance.key, state = ?instance.state, "đã gắn instance");
        self.instances.push(instance);
        actions
    }

    /// Xử lý một sự kiện hiển thị. Chỉ lần đầu đạt ngưỡng mới kích hoạt hiệu ứng.
    pub fn on_visibility(&mut self, key: &str, ratio: f64) -> Vec<RevealAction> {
        let Some(instance) = self.instances.iter_mut().find(|instance| instance.key == key) else {
            return Vec::new();
        };

        if instance.state != RevealState::Observing
            || ratio + RATIO_TOLERANCE < VISIBILITY_THRESHOLD
        {
            return Vec::new();
        }

        instance.state = RevealState::Animated;
        debug!(key, ratio, "instance đã hiển thị, chạy hiệu ứng");
        vec![
            RevealAction::AnimateFill {
                key: key.to_string(),
                percent: instance.reading.percent,
            },
            RevealAction::Unobserve {
                key: key.to_string(),
            },
        ]
    }

    pub fn state(&self, key: &str) -> Option<RevealState> {
        self.find(key).map(|instance| instance.state)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    fn find(&self, key: &str) -> Option<&RevealInstance> {
        self.instances.iter().find(|instance| instance.key == key)
    }
}
