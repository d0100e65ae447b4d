use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use thermo_core::{ConfigResolver, Renderer, SiteSettings};
use thermo_markup::{expand_shortcodes, load_settings_str, parse_shortcode, render_html, theme_css};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "thermo-cli",
    about = "Render shortcode thanh nhiệt kế thành HTML hoặc JSON."
)]
struct Args {
    /// Shortcode cần render, ví dụ `[thermometer target="1000" current="250"]`.
    #[arg(short, long, conflicts_with = "input", required_unless_present = "input")]
    shortcode: Option<String>,

    /// File nội dung chứa một hoặc nhiều shortcode.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// File JSON cài đặt site.
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Thêm khối `<style>` chứa màu gradient của site.
    #[arg(long)]
    with_theme: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Html,
    Json,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = match &args.settings {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Không đọc được file {path:?}"))?;
            load_settings_str(&data).with_context(|| format!("Cài đặt không hợp lệ: {path:?}"))?
        }
        None => SiteSettings::default(),
    };
    debug!(?settings, "đã nạp cài đặt site");

    let resolver = ConfigResolver::new(settings);
    let mut renderer = Renderer::new();

    let output = match (&args.shortcode, &args.input, args.format) {
        (Some(shortcode), _, format) => {
            let attrs = parse_shortcode(shortcode)?;
            let rendered = renderer.render(&resolver.resolve(&attrs));
            info!(id = %rendered.id, percent = rendered.view.percent, "đã render");
            match format {
                OutputFormat::Html => render_html(&rendered),
                OutputFormat::Json => serde_json::to_string_pretty(&rendered)?,
            }
        }
        (None, Some(path), OutputFormat::Html) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Không đọc được file {path:?}"))?;
            expand_shortcodes(&content, &resolver, &mut renderer)
        }
        (None, Some(_), OutputFormat::Json) => {
            bail!("--format json chỉ hỗ trợ với --shortcode")
        }
        (None, None, _) => bail!("Cần --shortcode hoặc --input"),
    };

    if args.with_theme && args.format == OutputFormat::Html {
        println!("<style>{}</style>", theme_css(resolver.settings()));
    }
    println!("{}", output.trim_end());

    Ok(())
}
