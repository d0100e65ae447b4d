use std::fs;

use pretty_assertions::assert_eq;
use thermo_core::{marker_value, ConfigResolver, InstanceReading, Renderer, SiteSettings};
use thermo_markup::{load_settings_str, render_shortcode_str, theme_css};

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"));
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("Không đọc được {path}: {err}"))
}

fn render_fixture(shortcode: &str, settings: SiteSettings) -> String {
    let resolver = ConfigResolver::new(settings);
    let mut renderer = Renderer::new();
    render_shortcode_str(fixture(shortcode).trim(), &resolver, &mut renderer)
        .expect("Không render được shortcode")
}

#[test]
fn fundraiser_shortcode_matches_golden() {
    let actual = render_fixture("fundraiser.shortcode", SiteSettings::default());
    assert_eq!(actual.trim_end(), fixture("fundraiser.html").trim_end());
}

#[test]
fn site_defaults_shortcode_matches_golden() {
    let settings = load_settings_str(&fixture("site_settings.json")).expect("Cài đặt không hợp lệ");
    let actual = render_fixture("site_defaults.shortcode", settings.clone());
    assert_eq!(actual.trim_end(), fixture("site_defaults.html").trim_end());
    assert_eq!(
        theme_css(&settings),
        ":root{--thermo-fill-from: #102030; --thermo-fill-to: rgb(58, 200, 168);}"
    );
}

/// Giá trị mốc đọc lại từ nhãn đã render phải khớp với giá trị trong `data-value`.
#[test]
fn marker_labels_reparse_to_embedded_values() {
    let settings = load_settings_str(&fixture("site_settings.json")).expect("Cài đặt không hợp lệ");
    let html = render_fixture("site_defaults.shortcode", settings);

    let reading = InstanceReading::from_attributes(Some("62.5"), Some("625"), Some("1000"));
    let mut checked = 0;
    for line in html.lines().filter(|line| line.contains("thermo-marker ") || line.contains("\"thermo-marker\"")) {
        let data_value = between(line, "data-value=\"", "\"");
        let label = between(line, "thermo-marker-label\">", "</span>");
        let from_label = marker_value(None, Some(label));
        assert_eq!(from_label, marker_value(Some(data_value), None));
        assert_eq!(line.contains(" met\""), from_label <= reading.current);
        checked += 1;
    }
    assert_eq!(checked, 3);
}

fn between<'a>(text: &'a str, start: &str, end: &str) -> &'a str {
    let from = text.find(start).expect("thiếu phần mở") + start.len();
    let to = text[from..].find(end).expect("thiếu phần đóng") + from;
    &text[from..to]
}
