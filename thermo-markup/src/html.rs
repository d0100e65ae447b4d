use thermo_core::{
    sanitize_color, MilestonePosition, RenderedThermometer, SiteSettings, DEFAULT_FILL_FROM,
    DEFAULT_FILL_TO,
};

/// Render one thermometer instance to HTML.
///
/// The fill starts at `width: 0%`; the browser controller widens it to
/// `data-percent` once the instance is visible.
pub fn render_html(rendered: &RenderedThermometer) -> String {
    let view = &rendered.view;
    let mut html = String::new();

    html.push_str(&format!(
        "<div class=\"thermo\" id=\"{}\" data-percent=\"{}\" data-current=\"{}\" data-target=\"{}\">\n",
        escape_html(&rendered.id),
        view.percent,
        view.current,
        view.target,
    ));

    if !view.label.is_empty() {
        html.push_str(&format!(
            "<div class=\"thermo-title\">{}</div>\n",
            escape_html(&view.label)
        ));
    }

    html.push_str(&format!(
        "<div class=\"thermo-bar\" role=\"progressbar\" aria-label=\"{}\" aria-valuemin=\"0\" aria-valuemax=\"{}\" aria-valuenow=\"{}\">\n",
        escape_html(view.aria_label()),
        escape_html(&view.target_text),
        escape_html(&view.current_text),
    ));
    html.push_str("<div class=\"thermo-fill\" style=\"width: 0%\"></div>\n");
    for marker in &view.milestone_positions {
        html.push_str(&render_marker(marker));
    }
    html.push_str("</div>\n");

    if view.show_numbers {
        html.push_str(&format!(
            "<div class=\"thermo-legend\"><span class=\"thermo-current\">{}</span><span class=\"thermo-sep\">/</span><span class=\"thermo-target\">{}</span></div>\n",
            escape_html(&view.current_label),
            escape_html(&view.target_label),
        ));
    }

    html.push_str("</div>\n");
    html
}

fn render_marker(marker: &MilestonePosition) -> String {
    let class = if marker.met {
        "thermo-marker met"
    } else {
        "thermo-marker"
    };
    format!(
        "<div class=\"{class}\" style=\"left: {}%\" aria-hidden=\"true\" data-value=\"{}\"><span class=\"thermo-marker-dot\"></span><span class=\"thermo-marker-label\">{}</span></div>\n",
        marker.percent_position,
        marker.value,
        escape_html(&marker.label),
    )
}

/// Site-wide gradient endpoints as CSS custom properties.
pub fn theme_css(settings: &SiteSettings) -> String {
    format!(
        ":root{{--thermo-fill-from: {}; --thermo-fill-to: {};}}",
        sanitize_color(&settings.fill_from, DEFAULT_FILL_FROM),
        sanitize_color(&settings.fill_to, DEFAULT_FILL_TO),
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}
