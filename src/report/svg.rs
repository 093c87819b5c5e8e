//! SVG bar chart rendering
//!
//! Draws a [`BarChart`] as a standalone `<svg>` element: title, value axis
//! with gridlines, one coloured bar per point with its value printed on it,
//! category labels and axis titles.

use super::chart::BarChart;
use super::html::escape;

/// Room reserved beside the plot for tick labels and axis titles
const Y_AXIS_GUTTER: f64 = 56.0;
const X_AXIS_GUTTER: f64 = 44.0;

/// Fraction of each category band covered by its bar
const BAR_FILL: f64 = 0.8;

/// Value range and tick spacing of the vertical axis
#[derive(Debug, Clone, Copy, PartialEq)]
struct ValueAxis {
    min: f64,
    max: f64,
    step: f64,
}

impl ValueAxis {
    fn for_values(values: impl Iterator<Item = f64>) -> Self {
        let (lo, hi) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if hi - lo <= f64::EPSILON {
            return Self {
                min: 0.0,
                max: 1.0,
                step: 0.2,
            };
        }

        // Headroom so labels on the tallest bar stay inside the plot
        let step = nice_step((hi - lo) * 1.05 / 5.0);
        Self {
            min: (lo / step).floor() * step,
            max: (hi * 1.05 / step).ceil() * step,
            step,
        }
    }

    fn ticks(&self) -> Vec<f64> {
        let count = ((self.max - self.min) / self.step).round() as usize;
        (0..=count)
            .map(|i| self.min + i as f64 * self.step)
            .collect()
    }

    fn decimals(&self) -> usize {
        (-self.step.log10().floor()).max(0.0) as usize
    }
}

/// Round a raw step up to 1, 2 or 5 times a power of ten
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Black or white, whichever reads better on `hex`
fn contrast_text(hex: &str) -> &'static str {
    let hex = hex.trim_start_matches('#');
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .map(f64::from)
            .unwrap_or(0.0)
    };
    let luminance = 0.299 * channel(0) + 0.587 * channel(2) + 0.114 * channel(4);
    if luminance > 150.0 {
        "#000000"
    } else {
        "#ffffff"
    }
}

pub fn render_svg(chart: &BarChart) -> String {
    let layout = &chart.layout;
    let width = f64::from(layout.width);
    let height = f64::from(layout.height);
    let tick_font = f64::from(layout.tick_font_size);
    let title_font = f64::from(layout.title_font_size);

    let left = f64::from(layout.margin.left) + Y_AXIS_GUTTER;
    let right = width - f64::from(layout.margin.right);
    let top = f64::from(layout.margin.top) + title_font;
    let bottom = height - f64::from(layout.margin.bottom) - X_AXIS_GUTTER;
    let plot_width = (right - left).max(1.0);
    let plot_height = (bottom - top).max(1.0);

    let axis = ValueAxis::for_values(chart.bars.iter().map(|b| b.value));
    let y_of = |v: f64| bottom - (v - axis.min) / (axis.max - axis.min) * plot_height;

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="chart" viewBox="0 0 {w} {h}" width="100%" role="img" aria-label="{title}">"#,
        w = layout.width,
        h = layout.height,
        title = escape(&chart.title),
    ));
    svg.push_str(&format!(
        r#"<rect width="{}" height="{}" fill="{}"/>"#,
        layout.width,
        layout.height,
        escape(&layout.paper_background)
    ));
    svg.push_str(&format!(
        r#"<rect x="{left:.1}" y="{top:.1}" width="{plot_width:.1}" height="{plot_height:.1}" fill="{}"/>"#,
        escape(&layout.plot_background)
    ));

    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="{}" fill="{}">{}</text>"#,
        f64::from(layout.margin.left),
        f64::from(layout.margin.top) * 0.5 + title_font * 0.5,
        layout.title_font_size,
        escape(&layout.title_color),
        escape(&chart.title)
    ));

    // Gridlines and tick labels
    let decimals = axis.decimals();
    for tick in axis.ticks() {
        let y = y_of(tick);
        svg.push_str(&format!(
            r#"<line x1="{left:.1}" y1="{y:.1}" x2="{right:.1}" y2="{y:.1}" stroke="{}"/>"#,
            escape(&layout.grid_color)
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{}" text-anchor="end">{:.*}</text>"#,
            left - 6.0,
            y + tick_font * 0.35,
            layout.tick_font_size,
            decimals,
            tick
        ));
    }

    // Bars
    if !chart.bars.is_empty() {
        let band = plot_width / chart.bars.len() as f64;
        let bar_width = band * BAR_FILL;
        let zero = y_of(0.0);

        for (i, bar) in chart.bars.iter().enumerate() {
            let x = left + i as f64 * band + (band - bar_width) / 2.0;
            let y = y_of(bar.value);
            let (bar_top, bar_height) = if y <= zero {
                (y, zero - y)
            } else {
                (zero, y - zero)
            };
            let center = x + bar_width / 2.0;

            svg.push_str(&format!(
                r#"<rect class="bar" x="{x:.1}" y="{bar_top:.1}" width="{bar_width:.1}" height="{bar_height:.1}" fill="{}"><title>{}: {}</title></rect>"#,
                escape(&bar.color),
                escape(&bar.category),
                escape(&bar.label)
            ));

            // Value inside the bar when it fits, above it otherwise
            let (label_y, label_fill) = if bar_height >= tick_font + 8.0 {
                (bar_top + tick_font + 4.0, contrast_text(&bar.color))
            } else {
                (bar_top - 4.0, "#000000")
            };
            svg.push_str(&format!(
                r#"<text x="{center:.1}" y="{label_y:.1}" font-size="{}" text-anchor="middle" fill="{label_fill}">{}</text>"#,
                layout.tick_font_size,
                escape(&bar.label)
            ));

            svg.push_str(&format!(
                r#"<text x="{center:.1}" y="{:.1}" font-size="{}" text-anchor="middle">{}</text>"#,
                bottom + tick_font + 6.0,
                layout.tick_font_size,
                escape(&bar.category)
            ));
        }
    }

    svg.push_str(&format!(
        r##"<line x1="{left:.1}" y1="{bottom:.1}" x2="{right:.1}" y2="{bottom:.1}" stroke="#444444"/>"##
    ));

    // Axis titles
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="{}" text-anchor="middle">{}</text>"#,
        left + plot_width / 2.0,
        bottom + X_AXIS_GUTTER - 4.0,
        layout.tick_font_size + 2,
        escape(&chart.x_title)
    ));
    let y_title_x = f64::from(layout.margin.left) + 4.0;
    let y_title_y = top + plot_height / 2.0;
    svg.push_str(&format!(
        r#"<text x="{y_title_x:.1}" y="{y_title_y:.1}" font-size="{}" text-anchor="middle" transform="rotate(-90 {y_title_x:.1} {y_title_y:.1})">{}</text>"#,
        layout.tick_font_size + 2,
        escape(&chart.y_title)
    ));

    svg.push_str("</svg>");
    svg
}
