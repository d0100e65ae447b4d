use lazy_static::lazy_static;
use regex::{Captures, Regex};
use thermo_core::{ConfigResolver, InstanceAttributes, Renderer, ThermoError};
use tracing::debug;

use crate::html::render_html;

/// Tag name recognised by the shortcode parser.
pub const SHORTCODE_TAG: &str = "thermometer";

lazy_static! {
    static ref SHORTCODE: Regex =
        Regex::new(r"(?s)^\s*\[\s*([A-Za-z0-9_-]+)(.*?)/?\]\s*$").unwrap();
    // Tag phải kết thúc ngay sau tên: `[thermometer-goal]` không khớp.
    static ref EMBEDDED: Regex =
        Regex::new(r"(?i)\[thermometer((?:\s[^\]]*?)?)/?\]").unwrap();
    static ref ATTRIBUTE: Regex = Regex::new(
        r#"([A-Za-z0-9_-]+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'\]]+))"#
    )
    .unwrap();
}

/// Parse `[thermometer target="10000" current="2500" ...]` into instance attributes.
///
/// Values may be double-quoted, single-quoted or bare. Unknown keys are ignored.
pub fn parse_shortcode(text: &str) -> Result<InstanceAttributes, ThermoError> {
    let captures = SHORTCODE
        .captures(text)
        .ok_or_else(|| ThermoError::Parse(format!("Expected a [{SHORTCODE_TAG} ...] shortcode")))?;

    let tag = &captures[1];
    if !tag.eq_ignore_ascii_case(SHORTCODE_TAG) {
        return Err(ThermoError::UnsupportedShortcode(tag.to_string()));
    }

    Ok(parse_attributes(captures.get(2).map_or("", |m| m.as_str())))
}

/// Replace every `[thermometer ...]` occurrence in `content` with rendered HTML.
pub fn expand_shortcodes(
    content: &str,
    resolver: &ConfigResolver,
    renderer: &mut Renderer,
) -> String {
    EMBEDDED
        .replace_all(content, |caps: &Captures| {
            let attrs = parse_attributes(caps.get(1).map_or("", |m| m.as_str()));
            let rendered = renderer.render(&resolver.resolve(&attrs));
            debug!(id = %rendered.id, "expanded thermometer shortcode");
            render_html(&rendered)
        })
        .into_owned()
}

fn parse_attributes(raw: &str) -> InstanceAttributes {
    InstanceAttributes::from_pairs(ATTRIBUTE.captures_iter(raw).map(|caps| {
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());
        (caps[1].to_string(), value.to_string())
    }))
}
