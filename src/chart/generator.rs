//! SVG bar chart generation.
//!
//! Charts are written as plain SVG text:
//! - Bars in exactly the order of the aggregation result
//! - Single colour for plain charts, one colour per bar plus legend for
//!   categorical charts
//! - Zero baseline so negative values (e.g. profit) hang below the axis

use crate::aggregator::GroupValue;
use crate::dashboard::{ChartSection, ChartStyle, Outcome};
use crate::utils::config::DEFAULT_CHART_WIDTH;
use crate::utils::error::ChartError;
use log::info;

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: usize,
    pub height: usize,
    /// Longest x-axis label before truncation
    pub max_label_chars: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: 540,
            max_label_chars: 28,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

const BAR_COLOR: &str = "rgb(70, 130, 180)"; // Steel Blue

/// Categorical colours, cycled when there are more groups than entries
const PALETTE: &[&str] = &[
    "rgb(76, 120, 168)",
    "rgb(245, 133, 24)",
    "rgb(228, 87, 86)",
    "rgb(114, 183, 178)",
    "rgb(84, 162, 75)",
    "rgb(238, 202, 59)",
    "rgb(178, 121, 162)",
    "rgb(255, 157, 166)",
    "rgb(157, 117, 93)",
    "rgb(186, 176, 172)",
];

const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 170.0;
const Y_TICKS: usize = 5;

/// Colour of the bar at `index` for a chart style
pub fn bar_color(style: ChartStyle, index: usize) -> &'static str {
    match style {
        ChartStyle::Bar => BAR_COLOR,
        ChartStyle::Categorical => PALETTE[index % PALETTE.len()],
    }
}

/// Generate an SVG bar chart for a computed section
///
/// **Public** - main entry point for chart rendering
///
/// # Arguments
/// * `section` - Computed chart section
/// * `config` - Optional configuration (uses defaults if None)
///
/// # Returns
/// SVG document as a string
///
/// # Errors
/// * `ChartError::Unavailable` - the section holds a notice instead of data
/// * `ChartError::EmptyData` - the query produced no groups
///
/// # Example
/// ```ignore
/// let config = ChartConfig::new().with_width(1200);
/// let svg = generate_bar_chart(&report.sections[0], Some(&config))?;
/// write_svg(&svg, "charts/top_products_by_sales.svg")?;
/// ```
pub fn generate_bar_chart(
    section: &ChartSection,
    config: Option<&ChartConfig>,
) -> Result<String, ChartError> {
    let pairs = match &section.outcome {
        Outcome::Value(result) => &result.pairs,
        Outcome::Error(msg) => return Err(ChartError::Unavailable(msg.clone())),
    };
    if pairs.is_empty() {
        return Err(ChartError::EmptyData);
    }

    let config = config.cloned().unwrap_or_default();
    info!("Generating chart '{}' with {} bars", section.id, pairs.len());

    let legend_height = match section.style {
        ChartStyle::Categorical => 24.0 * pairs.len().div_ceil(4) as f64 + 16.0,
        ChartStyle::Bar => 0.0,
    };
    let width = config.width as f64;
    let height = config.height as f64;
    let total_height = height + legend_height;
    let plot_w = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
    let plot_h = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);

    let scale = ValueScale::new(pairs, MARGIN_TOP, plot_h);

    let mut svg = String::new();

    // Header
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        config.width, total_height, config.width, total_height
    ));
    svg.push_str(
        r#"<style>.bar:hover { opacity: 0.8; cursor: pointer; } text { font-family: sans-serif; }</style>"#,
    );
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        config.width, total_height
    ));

    // Title
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="28" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        width / 2.0,
        escape_xml(&section.title)
    ));

    render_y_axis(&mut svg, &scale, plot_w);
    render_bars(&mut svg, section.style, pairs, &scale, plot_w, &config);

    // Axis labels
    svg.push_str(&format!(
        r#"<text x="18" y="{:.1}" font-size="13" text-anchor="middle" transform="rotate(-90 18 {:.1})">{}</text>"#,
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0,
        escape_xml(&section.y_label)
    ));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="13" text-anchor="middle">{}</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        height - 12.0,
        escape_xml(&section.x_label)
    ));

    if section.style == ChartStyle::Categorical {
        render_legend(&mut svg, pairs, height);
    }

    svg.push_str("</svg>");

    info!("Chart generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

/// Maps values to y pixels, always including zero in the range
struct ValueScale {
    min: f64,
    max: f64,
    top: f64,
    height: f64,
}

impl ValueScale {
    fn new(pairs: &[GroupValue], top: f64, height: f64) -> Self {
        let max = pairs.iter().map(|p| p.value).fold(0.0_f64, f64::max);
        let min = pairs.iter().map(|p| p.value).fold(0.0_f64, f64::min);
        let (min, max) = if max - min <= f64::EPSILON {
            (0.0, 1.0)
        } else {
            (min, max)
        };
        Self {
            min,
            max,
            top,
            height,
        }
    }

    fn y(&self, value: f64) -> f64 {
        self.top + (self.max - value) / (self.max - self.min) * self.height
    }
}

fn render_y_axis(out: &mut String, scale: &ValueScale, plot_w: f64) {
    for i in 0..=Y_TICKS {
        let value = scale.min + (scale.max - scale.min) * i as f64 / Y_TICKS as f64;
        let y = scale.y(value);
        out.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="rgb(230, 230, 230)"/>"#,
            MARGIN_LEFT,
            y,
            MARGIN_LEFT + plot_w,
            y
        ));
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end" dy="4">{}</text>"#,
            MARGIN_LEFT - 6.0,
            y,
            format_tick(value)
        ));
    }

    // Zero baseline and y axis
    let zero = scale.y(0.0);
    out.push_str(&format!(
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black"/>"#,
        MARGIN_LEFT,
        zero,
        MARGIN_LEFT + plot_w,
        zero
    ));
    out.push_str(&format!(
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black"/>"#,
        MARGIN_LEFT,
        scale.top,
        MARGIN_LEFT,
        scale.top + scale.height
    ));
}

fn render_bars(
    out: &mut String,
    style: ChartStyle,
    pairs: &[GroupValue],
    scale: &ValueScale,
    plot_w: f64,
    config: &ChartConfig,
) {
    let slot = plot_w / pairs.len() as f64;
    let bar_w = slot * 0.7;
    let zero = scale.y(0.0);
    let label_y = scale.top + scale.height + 14.0;

    for (i, pair) in pairs.iter().enumerate() {
        let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_w) / 2.0;
        let y = scale.y(pair.value);
        let (top, h) = if y < zero { (y, zero - y) } else { (zero, y - zero) };
        let key = escape_xml(&pair.key);

        out.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" class="bar"><title>{}: {}</title></rect>"#,
            x,
            top,
            bar_w,
            h,
            bar_color(style, i),
            key,
            format_value(pair.value)
        ));

        let cx = x + bar_w / 2.0;
        let label = escape_xml(&truncate_label(&pair.key, config.max_label_chars));
        out.push_str(&format!(
            r#"<text x="{:.2}" y="{:.1}" font-size="11" text-anchor="end" transform="rotate(-45 {:.2} {:.1})">{}</text>"#,
            cx, label_y, cx, label_y, label
        ));
    }
}

fn render_legend(out: &mut String, pairs: &[GroupValue], graph_height: f64) {
    let legend_y = graph_height + 8.0;

    for (i, pair) in pairs.iter().enumerate() {
        let x = 20.0 + (i % 4) as f64 * 200.0;
        let y = legend_y + (i / 4) as f64 * 24.0;
        out.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="15" height="15" fill="{}" rx="2"/>"#,
            x,
            y,
            bar_color(ChartStyle::Categorical, i)
        ));
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="12">{}</text>"#,
            x + 20.0,
            y + 12.0,
            escape_xml(&truncate_label(&pair.key, 24))
        ));
    }
}

/// Shorten a label to `max` characters, ending in "..."
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max || max <= 3 {
        return label.to_string();
    }
    let kept: String = label.chars().take(max - 3).collect();
    format!("{}...", kept)
}

/// Escape text for use inside SVG elements and attributes
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Value as shown in tooltips and summaries
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

fn format_tick(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else if abs >= 10.0 || value == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
