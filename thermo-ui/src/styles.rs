#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Node};

#[cfg(target_arch = "wasm32")]
const STYLE_TAG_SELECTOR: &str = "style[data-thermo-ui]";

/// Default CSS for the thermometer pill. Gradient endpoints come from the
/// `--thermo-fill-from` / `--thermo-fill-to` tokens emitted by the site theme.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --thermo-font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --thermo-fill-from: #5b9cff;
  --thermo-fill-to: #3ac8a8;
  --thermo-track: #e6ebf2;
  --thermo-text: #1f2933;
  --thermo-muted: #52606d;
  --thermo-height: 22px;
  --thermo-duration: 1.2s;
}

.thermo {
  font-family: var(--thermo-font-family);
  color: var(--thermo-text);
  margin: 1.5em 0 2.5em;
}

.thermo-title {
  font-weight: 600;
  margin-bottom: 8px;
}

.thermo-bar {
  position: relative;
  height: var(--thermo-height);
  background: var(--thermo-track);
  border-radius: 999px;
  overflow: visible;
}

.thermo-fill {
  height: 100%;
  width: 0%;
  border-radius: 999px;
  background: linear-gradient(90deg, var(--thermo-fill-from), var(--thermo-fill-to));
  transition: width var(--thermo-duration) cubic-bezier(0.22, 1, 0.36, 1);
}

.thermo-marker {
  position: absolute;
  top: 0;
  height: 100%;
  transform: translateX(-50%);
  pointer-events: none;
}

.thermo-marker-dot {
  display: block;
  width: 4px;
  height: 100%;
  margin: 0 auto;
  background: rgba(255, 255, 255, 0.85);
  border-radius: 2px;
}

.thermo-marker-label {
  position: absolute;
  top: calc(100% + 4px);
  left: 50%;
  transform: translateX(-50%);
  font-size: 0.75rem;
  color: var(--thermo-muted);
  white-space: nowrap;
  font-variant-numeric: tabular-nums;
}

.thermo-marker.met .thermo-marker-label {
  color: var(--thermo-text);
  font-weight: 600;
}

.thermo-legend {
  display: flex;
  gap: 4px;
  justify-content: flex-end;
  margin-top: 28px;
  font-variant-numeric: tabular-nums;
}

.thermo-sep {
  color: var(--thermo-muted);
}

@media (prefers-reduced-motion: reduce) {
  .thermo-fill {
    transition: none;
  }
}
"#;

#[cfg(target_arch = "wasm32")]
pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-thermo-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
