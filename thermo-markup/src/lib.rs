//! Shortcode text and HTML markup adapters around `thermo-core`.
//!
//! The HTML produced here is the contract read back by the browser-side reveal
//! controller: `data-percent`, `data-current`, `data-target` on the root and
//! `data-value` plus a unit-prefixed label on each marker.

mod html;
mod shortcode;

pub use html::{escape_html, render_html, theme_css};
pub use shortcode::{expand_shortcodes, parse_shortcode, SHORTCODE_TAG};

use thermo_core::{ConfigResolver, Renderer, SiteSettings, ThermoError};

/// Load site settings from JSON. Missing keys take the built-in defaults and
/// invalid colours fall back to the default palette.
pub fn load_settings_str(settings_json: &str) -> Result<SiteSettings, ThermoError> {
    let settings: SiteSettings =
        serde_json::from_str(settings_json).map_err(|err| ThermoError::Parse(err.to_string()))?;
    Ok(settings.sanitized())
}

/// Render a single `[thermometer ...]` shortcode to HTML.
pub fn render_shortcode_str(
    shortcode: &str,
    resolver: &ConfigResolver,
    renderer: &mut Renderer,
) -> Result<String, ThermoError> {
    let attrs = parse_shortcode(shortcode)?;
    let config = resolver.resolve(&attrs);
    Ok(render_html(&renderer.render(&config)))
}
