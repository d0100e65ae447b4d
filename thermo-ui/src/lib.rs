//! Thành phần giao diện thanh nhiệt kế cho môi trường WebAssembly.
//!
//! Gồm bộ điều khiển hiển thị cho markup đã render sẵn từ server và một
//! component yew dựng cùng hợp đồng markup ở phía client.

#[cfg(target_arch = "wasm32")]
mod reveal;
mod styles;

pub use styles::DEFAULT_STYLES;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use crate::{reveal, styles};
    use serde_wasm_bindgen::from_value;
    use thermo_core::{MilestonePosition, RenderedThermometer};
    use wasm_bindgen::prelude::*;
    use web_sys::{console, Document, Element, Window};
    use yew::prelude::*;

    #[derive(Properties, PartialEq)]
    pub struct ThermometerViewProps {
        pub rendered: RenderedThermometer,
    }

    #[function_component(ThermometerView)]
    fn thermometer_view(props: &ThermometerViewProps) -> Html {
        let rendered = &props.rendered;
        let view = &rendered.view;

        use_effect_with(rendered.id.clone(), |_| {
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
            }
            if let Err(err) = reveal::scan() {
                console::error_1(&err);
            }
            || ()
        });

        html! {
            <div
                class="thermo"
                id={rendered.id.clone()}
                data-percent={view.percent.to_string()}
                data-current={view.current.to_string()}
                data-target={view.target.to_string()}
            >
                if !view.label.is_empty() {
                    <div class="thermo-title">{ view.label.clone() }</div>
                }
                <div
                    class="thermo-bar"
                    role="progressbar"
                    aria-label={view.aria_label().to_string()}
                    aria-valuemin="0"
                    aria-valuemax={view.target_text.clone()}
                    aria-valuenow={view.current_text.clone()}
                >
                    <div class="thermo-fill" style="width: 0%"></div>
                    { for view.milestone_positions.iter().map(render_marker) }
                </div>
                if view.show_numbers {
                    <div class="thermo-legend">
                        <span class="thermo-current">{ view.current_label.clone() }</span>
                        <span class="thermo-sep">{"/"}</span>
                        <span class="thermo-target">{ view.target_label.clone() }</span>
                    </div>
                }
            </div>
        }
    }

    fn render_marker(marker: &MilestonePosition) -> Html {
        html! {
            <div
                class={classes!("thermo-marker", marker.met.then_some("met"))}
                style={format!("left: {}%", marker.percent_position)}
                aria-hidden="true"
                data-value={marker.value.to_string()}
            >
                <span class="thermo-marker-dot"></span>
                <span class="thermo-marker-label">{ marker.label.clone() }</span>
            </div>
        }
    }

    /// Dựng component từ kết quả `render_thermometer` của thermo-wasm.
    #[wasm_bindgen]
    pub fn mount_thermometer(selector: &str, rendered: JsValue) -> Result<(), JsValue> {
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Selector lỗi: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("Không tìm thấy element theo selector"))?;

        let rendered: RenderedThermometer = from_value(rendered)?;

        yew::Renderer::<ThermometerView>::with_root_and_props(
            target,
            ThermometerViewProps { rendered },
        )
        .render();
        Ok(())
    }

    /// Gắn hiệu ứng cho mọi thanh nhiệt kế đã render sẵn trong trang.
    #[wasm_bindgen]
    pub fn init_thermometers() -> Result<(), JsValue> {
        if let Some(document) = web_sys::window().and_then(|window| window.document()) {
            styles::ensure_styles(&document)?;
        }
        reveal::init_when_ready()
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::{init_thermometers, mount_thermometer};

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_thermometer(_: &str, _: wasm_bindgen::JsValue) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "thermo-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_thermometers() -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "thermo-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
