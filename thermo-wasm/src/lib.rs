//! Bridge WASM <-> JavaScript trung lập framework.

use std::cell::RefCell;

use serde::Deserialize;
use serde_json::Value;
use serde_wasm_bindgen::{from_value, to_value};
use thermo_core::{
    parse_milestones as core_parse_milestones, ConfigResolver, InstanceAttributes,
    RenderedThermometer, Renderer, SettingsUpdate, SiteSettings, ThermoError, ThermometerConfig,
};
use thermo_markup::{render_html, theme_css as markup_theme_css};
use wasm_bindgen::prelude::*;

/// Tiền tố id cho instance dựng qua bridge, tách biệt với id `thermo-N` từ server.
const BRIDGE_ID_PREFIX: &str = "thermo-wasm-";

thread_local! {
    static RENDERER: RefCell<Renderer> = RefCell::new(Renderer::with_prefix(BRIDGE_ID_PREFIX));
}

/// Render bằng một bộ cấp id dùng chung cho mọi lần gọi bridge.
fn render_shared(config: &ThermometerConfig) -> RenderedThermometer {
    RENDERER.with(|renderer| renderer.borrow_mut().render(config))
}

/// Thuộc tính instance từ JS; chấp nhận cả số lẫn chuỗi (`{ target: 1000 }`).
#[derive(Deserialize, Default)]
struct JsInstanceAttributes {
    #[serde(default)]
    target: Option<Value>,
    #[serde(default)]
    current: Option<Value>,
    #[serde(default)]
    milestones: Option<Value>,
    #[serde(default)]
    label: Option<Value>,
    #[serde(default)]
    unit: Option<Value>,
    #[serde(default)]
    show_numbers: Option<Value>,
}

impl From<JsInstanceAttributes> for InstanceAttributes {
    fn from(attrs: JsInstanceAttributes) -> Self {
        Self {
            target: attrs.target.and_then(js_text),
            current: attrs.current.and_then(js_text),
            milestones: attrs.milestones.and_then(js_text),
            label: attrs.label.and_then(js_text),
            unit: attrs.unit.and_then(js_text),
            show_numbers: attrs.show_numbers.and_then(js_text),
        }
    }
}

fn js_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(js_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

/// Hợp nhất thuộc tính với cài đặt site rồi trả về view model (kèm id).
#[wasm_bindgen]
pub fn render_thermometer(
    attributes: JsValue,
    settings: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let config = resolve_config(attributes, settings)?;
    let rendered = render_shared(&config);

    to_value(&rendered).map_err(|err| JsValue::from_str(&format!("Không serialize view model: {err}")))
}

/// Giống `render_thermometer` nhưng trả về HTML theo hợp đồng markup.
#[wasm_bindgen]
pub fn render_thermometer_html(
    attributes: JsValue,
    settings: Option<JsValue>,
) -> Result<String, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let config = resolve_config(attributes, settings)?;
    Ok(render_html(&render_shared(&config)))
}

/// Áp dụng bản cập nhật từ form cài đặt lên cài đặt hiện tại.
#[wasm_bindgen]
pub fn apply_settings_update(current: Option<JsValue>, update: JsValue) -> Result<JsValue, JsValue> {
    let current = read_settings(current)?;
    let update: SettingsUpdate = from_value(update)
        .map_err(|err| JsValue::from_str(&format_thermo_error(ThermoError::Parse(err.to_string()))))?;

    to_value(&current.apply(&update))
        .map_err(|err| JsValue::from_str(&format!("Không serialize cài đặt: {err}")))
}

#[wasm_bindgen]
pub fn theme_css(settings: Option<JsValue>) -> Result<String, JsValue> {
    Ok(markup_theme_css(&read_settings(settings)?))
}

#[wasm_bindgen]
pub fn parse_milestones(raw: &str, target: f64) -> Vec<f64> {
    core_parse_milestones(raw, target)
}

fn resolve_config(
    attributes: JsValue,
    settings: Option<JsValue>,
) -> Result<ThermometerConfig, JsValue> {
    let attrs: JsInstanceAttributes = if attributes.is_undefined() || attributes.is_null() {
        JsInstanceAttributes::default()
    } else {
        from_value(attributes).map_err(|err| {
            JsValue::from_str(&format_thermo_error(ThermoError::Parse(format!(
                "Không đọc được thuộc tính: {err}"
            ))))
        })?
    };

    let resolver = ConfigResolver::new(read_settings(settings)?);
    Ok(resolver.resolve(&InstanceAttributes::from(attrs)))
}

fn read_settings(settings: Option<JsValue>) -> Result<SiteSettings, JsValue> {
    match settings {
        Some(js_settings) if !js_settings.is_undefined() && !js_settings.is_null() => {
            let settings: SiteSettings = from_value(js_settings).map_err(|err| {
                JsValue::from_str(&format_thermo_error(ThermoError::Parse(format!(
                    "Không đọc được cài đặt: {err}"
                ))))
            })?;
            Ok(settings.sanitized())
        }
        _ => Ok(SiteSettings::default()),
    }
}

fn format_thermo_error(err: ThermoError) -> String {
    format!("Thermometer error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_numbers_and_lists_become_attribute_text() {
        let attrs: JsInstanceAttributes = serde_json::from_value(serde_json::json!({
            "target": 1000,
            "current": 250.5,
            "milestones": [100, "2000", 500],
            "show_numbers": false,
            "label": null
        }))
        .unwrap();
        let attrs = InstanceAttributes::from(attrs);

        assert_eq!(attrs.target.as_deref(), Some("1000"));
        assert_eq!(attrs.current.as_deref(), Some("250.5"));
        assert_eq!(attrs.milestones.as_deref(), Some("100,2000,500"));
        assert_eq!(attrs.show_numbers.as_deref(), Some("false"));
        assert_eq!(attrs.label, None);

        let config = ConfigResolver::default().resolve(&attrs);
        assert_eq!(config.milestones(), &[100.0, 500.0]);
        assert!(!config.show_numbers());
    }

    #[test]
    fn bridge_renders_get_distinct_ids() {
        let config = ConfigResolver::default().resolve(&InstanceAttributes::default());
        let first = render_shared(&config);
        let second = render_shared(&config);

        assert!(first.id.starts_with(BRIDGE_ID_PREFIX));
        assert_ne!(first.id, second.id);

        let mut controller = thermo_core::RevealController::new(true);
        let reading = thermo_core::InstanceReading::from_attributes(Some("0"), Some("0"), None);
        assert!(!controller.discover(first.id, reading, &[]).is_empty());
        assert!(!controller.discover(second.id, reading, &[]).is_empty());
        assert_eq!(controller.len(), 2);
    }
}
