use std::f64::consts::PI;

use crate::activity::LifetimeResult;
use crate::report::format_hours;
use crate::stats::Stats;

const PIE_SIZE: f64 = 300.0;
const BAR_WIDTH: f64 = 400.0;
const BAR_HEIGHT: f64 = 300.0;
const BAR_GAP: f64 = 20.0;
// Room kept free above and below the bars for titles and labels.
const BAR_RESERVED: f64 = 80.0;
const MIN_LABELED_SHARE: f64 = 0.05;
const LEGEND_ROW_HEIGHT: f64 = 18.0;

const START_Y: i32 = 30;
const LINE_HEIGHT: i32 = 20;
const GAP_BETWEEN_COLUMNS: f32 = 10.0;
const RIGHT_PADDING: f32 = 30.0;
const CHAR_WIDTH: f32 = 9.6;
const MIN_RIGHT_COL_CHARS: usize = 44;

#[derive(Clone, Copy, Debug)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
    pub accent: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                key: "#ffa657",
                value: "#a5d6ff",
                cc: "#616e7f",
                accent: "#a5b4fc",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                key: "#d73a49",
                value: "#0366d6",
                cc: "#6a737d",
                accent: "#4F46E5",
            },
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Splits a row into key, dot leader and value so that all rows of a column
/// end at `align_width` characters.
pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.chars().count() + value.chars().count();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    (key_part, dots, value.to_string())
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.chars().count()) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

fn document(width: f64, height: f64, colors: &ThemeColors, body: &str) -> String {
    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{width}px" height="{height}px"
     font-family="Arial,Helvetica,sans-serif">

<rect width="{width}px" height="{height}px" fill="{bg}" rx="15"/>

{body}
</svg>
"#,
        bg = colors.bg,
    )
}

fn point_on_circle(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + angle.cos() * r, cy + angle.sin() * r)
}

/// Slices, share labels and the centre disc of a pie chart.
fn pie_group(result: &LifetimeResult, stats: &Stats, cx: f64, cy: f64, colors: &ThemeColors) -> String {
    let radius = cx.min(cy) - 10.0;
    let mut out = String::new();
    let mut start = 0.0_f64;

    for (category, hours) in result.iter() {
        if stats.total_hours <= 0.0 || hours <= 0.0 {
            continue;
        }
        let share = hours / stats.total_hours;
        let end = start + share * 2.0 * PI;

        if share >= 1.0 {
            out.push_str(&format!(
                "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{radius:.2}\" fill=\"{}\"/>\n",
                category.color()
            ));
        } else {
            let (x0, y0) = point_on_circle(cx, cy, radius, start);
            let (x1, y1) = point_on_circle(cx, cy, radius, end);
            let large_arc = if end - start > PI { 1 } else { 0 };
            out.push_str(&format!(
                "<path d=\"M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z\" fill=\"{}\"/>\n",
                category.color()
            ));
        }

        if share > MIN_LABELED_SHARE {
            let mid = start + (end - start) / 2.0;
            let (lx, ly) = point_on_circle(cx, cy, radius * 0.7, mid);
            out.push_str(&format!(
                "<text x=\"{lx:.2}\" y=\"{ly:.2}\" fill=\"#FFFFFF\" font-size=\"12px\" font-weight=\"bold\" text-anchor=\"middle\" dominant-baseline=\"middle\">{:.1}%</text>\n",
                share * 100.0
            ));
        }

        start = end;
    }

    out.push_str(&format!(
        "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" fill=\"{}\"/>\n",
        radius * 0.3,
        colors.bg
    ));
    out.push_str(&format!(
        "<text x=\"{cx:.2}\" y=\"{cy:.2}\" fill=\"{}\" font-size=\"14px\" font-weight=\"bold\" text-anchor=\"middle\" dominant-baseline=\"middle\">Time Distribution</text>\n",
        colors.accent
    ));
    out
}

/// Color swatch and label for every non-zero category, two per row,
/// starting at `top`. Returns the markup and the height it takes.
fn legend_group(result: &LifetimeResult, top: f64, colors: &ThemeColors) -> (String, f64) {
    let mut out = String::new();
    let entries: Vec<_> = result.iter().filter(|(_, hours)| *hours > 0.0).collect();

    for (i, (category, _)) in entries.iter().enumerate() {
        let x = 20.0 + (i % 2) as f64 * PIE_SIZE / 2.0;
        let y = top + (i / 2) as f64 * LEGEND_ROW_HEIGHT;
        out.push_str(&format!(
            "<circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"6\" fill=\"{}\"/>\n<text x=\"{:.2}\" y=\"{y:.2}\" fill=\"{}\" font-size=\"12px\" dominant-baseline=\"middle\">{}</text>\n",
            category.color(),
            x + 12.0,
            colors.text,
            escape_xml(category.label())
        ));
    }

    let rows = entries.len().div_ceil(2);
    (out, rows as f64 * LEGEND_ROW_HEIGHT)
}

/// Share of each category as a pie, with a legend underneath.
pub fn pie_chart(result: &LifetimeResult, theme: Theme) -> String {
    let colors = theme.colors();
    let stats = Stats::new(result);
    let mut body = pie_group(result, &stats, PIE_SIZE / 2.0, PIE_SIZE / 2.0, &colors);
    let (legend, legend_height) = legend_group(result, PIE_SIZE + 5.0, &colors);
    body.push_str(&legend);
    document(PIE_SIZE, PIE_SIZE + legend_height + 10.0, &colors, &body)
}

fn bar_value_label(value: f64) -> String {
    if value > 1000.0 {
        format!("{:.1}k", value / 1000.0)
    } else {
        format!("{value:.0}")
    }
}

/// Non-zero categories as bars, largest first.
pub fn bar_chart(result: &LifetimeResult, theme: Theme) -> String {
    let colors = theme.colors();
    let stats = Stats::new(result);
    let bars = stats.ranked();

    let mut body = format!(
        "<text x=\"{:.2}\" y=\"20\" fill=\"{}\" font-size=\"14px\" font-weight=\"bold\" text-anchor=\"middle\">Activity Comparison</text>\n",
        BAR_WIDTH / 2.0,
        colors.accent
    );

    let max_value = bars.first().map(|&(_, v)| v).unwrap_or(0.0);
    let bar_width = BAR_WIDTH / bars.len().max(1) as f64 - BAR_GAP;
    let rotate_labels = bars.len() > 5;

    for (i, &(category, value)) in bars.iter().enumerate() {
        let bar_height = value / max_value * (BAR_HEIGHT - BAR_RESERVED);
        let x = i as f64 * (bar_width + BAR_GAP) + BAR_GAP;
        let y = BAR_HEIGHT - bar_height - 40.0;
        let mid_x = x + bar_width / 2.0;

        body.push_str(&format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{bar_width:.2}\" height=\"{bar_height:.2}\" fill=\"{}\"/>\n",
            category.color()
        ));
        body.push_str(&format!(
            "<text x=\"{mid_x:.2}\" y=\"{:.2}\" fill=\"{}\" font-size=\"10px\" text-anchor=\"middle\">{}</text>\n",
            y - 5.0,
            colors.text,
            bar_value_label(value)
        ));

        let label_y = BAR_HEIGHT - 15.0;
        let label = escape_xml(category.label());
        if rotate_labels {
            body.push_str(&format!(
                "<text transform=\"translate({mid_x:.2} {label_y:.2}) rotate(-45)\" fill=\"{}\" font-size=\"12px\" text-anchor=\"middle\">{label}</text>\n",
                colors.text
            ));
        } else {
            body.push_str(&format!(
                "<text x=\"{mid_x:.2}\" y=\"{label_y:.2}\" fill=\"{}\" font-size=\"12px\" text-anchor=\"middle\">{label}</text>\n",
                colors.text
            ));
        }
    }

    document(BAR_WIDTH, BAR_HEIGHT, &colors, &body)
}

// Builds the card's text column and returns (tspans, width, height)

fn build_card_column(stats: &Stats, age: f64, left_width_px: f32) -> (String, f32, f32) {
    enum Line {
        Header(String),
        Blank,
        Stat {
            key: String,
            value: String,
            color: Option<&'static str>,
        },
    }

    let mut rows: Vec<(String, String, Option<&'static str>)> = stats
        .ranked()
        .iter()
        .map(|&(c, hours)| (c.label().to_string(), format_hours(hours), Some(c.color())))
        .collect();
    let category_rows = rows.len();

    rows.push(("Age".to_string(), format!("{age:.2} years"), None));
    rows.push((
        "Tracked".to_string(),
        format!("{:.0} hours", stats.total_hours),
        None,
    ));
    rows.push((
        "Tracked years".to_string(),
        format!("{:.1}", stats.tracked_years),
        None,
    ));
    if let Some((top, pct)) = stats.top() {
        rows.push((
            "Top activity".to_string(),
            format!("{} ({pct:.1}%)", top.label()),
            None,
        ));
    }

    let align_width = rows
        .iter()
        .map(|(k, v, _)| k.chars().count() + 2 + v.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_RIGHT_COL_CHARS);

    let mut lines = vec![Line::Header(build_header_line("life@hours", align_width))];
    for (i, (key, value, color)) in rows.into_iter().enumerate() {
        if i == category_rows {
            lines.push(Line::Blank);
            lines.push(Line::Header(build_header_line("- Totals", align_width)));
        }
        lines.push(Line::Stat { key, value, color });
    }

    let height_px = lines.len() as f32 * LINE_HEIGHT as f32 + START_Y as f32;
    let x = left_width_px + GAP_BETWEEN_COLUMNS;

    let mut tspans = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = START_Y + (i as i32) * LINE_HEIGHT;
        match line {
            Line::Blank => {}
            Line::Header(text) => {
                tspans.push_str(&format!(
                    "<tspan x=\"{x}\" y=\"{y}\">{}</tspan>\n",
                    escape_xml(text)
                ));
            }
            Line::Stat { key, value, color } => {
                let (k, d, v) = build_stat_row(key, value, align_width);
                let bullet = match color {
                    Some(color) => format!("<tspan x=\"{x}\" y=\"{y}\" fill=\"{color}\">\u{25CF} </tspan>"),
                    None => format!("<tspan x=\"{x}\" y=\"{y}\" class=\"cc\">. </tspan>"),
                };
                tspans.push_str(&format!(
                    "{bullet}\n<tspan class=\"key\">{}</tspan><tspan class=\"cc\">{}</tspan><tspan class=\"value\">{}</tspan>\n",
                    escape_xml(&k),
                    escape_xml(&d),
                    escape_xml(&v)
                ));
            }
        }
    }

    let width = x + (align_width as f32 + 2.0) * CHAR_WIDTH + RIGHT_PADDING;
    (tspans, width, height_px)
}

/// Shareable summary: the pie on the left, per-activity totals on the right.
pub fn life_card(result: &LifetimeResult, stats: &Stats, age: f64, theme: Theme) -> String {
    let colors = theme.colors();

    let pie = pie_group(result, stats, PIE_SIZE / 2.0, PIE_SIZE / 2.0, &colors);
    let (column, w, column_h) = build_card_column(stats, age, PIE_SIZE as f32);
    let h = (PIE_SIZE as f32).max(column_h) + 30.0;

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="Arial,Helvetica,sans-serif">

<style>
.key      {{ fill: {key}; }}
.value    {{ fill: {value}; }}
.cc       {{ fill: {cc}; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<!-- LEFT PIE -->
{pie}
<!-- RIGHT COLUMN -->
<text fill="{text}" font-family="ConsolasFallback,Consolas,monospace" font-size="16px" xml:space="preserve">
{column}
</text>

</svg>
"#,
        bg = colors.bg,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
    )
}
