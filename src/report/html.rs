//! HTML page generation
//!
//! Turns a [`DashboardView`] into one self-contained page. Styling comes from
//! the [`Theme`]; the chart is embedded as inline SVG, and the selectors are
//! a plain GET form that resubmits on change, so every interaction is one
//! fresh render pass.

use super::cards::{CardGrid, CardImage, StudentCard};
use super::render::{ChartControls, Dashboard, DashboardView, ViewContent};
use super::svg::render_svg;
use super::theme::Theme;

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn stylesheet(theme: &Theme) -> String {
    format!(
        r#"
body {{ margin: 0; background-color: {page_bg}; font-family: {font}; }}
h1, h2, h3, h4, h5, h6 {{ color: {heading}; }}
.layout {{ display: flex; min-height: 100vh; }}
.sidebar {{ width: 240px; padding: 24px; background-color: {sidebar_bg}; }}
.main {{ flex: 1; padding: 24px 48px; background-color: {page_bg}; }}
.error {{ padding: 16px; border-radius: 6px; background-color: #ffe6e6; color: #7d1a1a; }}
.card-row {{ display: grid; grid-template-columns: repeat(var(--card-columns), minmax(0, 1fr)); }}
.card-cell:empty {{ visibility: hidden; }}
.card {{ {card} }}
.card img {{ width: {image_width}px; border-radius: 4px; }}
.controls label {{ display: block; margin: 12px 0 4px; }}
.controls select {{ min-width: 240px; padding: 4px; }}
"#,
        page_bg = theme.page_background,
        font = theme.font_family,
        heading = theme.heading_color,
        sidebar_bg = theme.sidebar_background,
        card = theme.card_style(),
        image_width = theme.card_image_width_px,
    )
}

fn render_card(card: &StudentCard) -> String {
    let image = match &card.image {
        CardImage::Url(url) => format!(
            r#"<img src="{}" alt="{}">"#,
            escape(url),
            escape(&card.name)
        ),
        CardImage::Placeholder(text) => format!(r#"<p class="no-image">{}</p>"#, escape(text)),
    };

    format!(
        r#"<div class="card">{image}<p><strong>{name}</strong></p><p>Roll No: {roll}</p><p>Grade: {grade} | Division: {division}</p></div>"#,
        name = escape(&card.name),
        roll = escape(&card.roll_no),
        grade = escape(&card.grade),
        division = escape(&card.division),
    )
}

fn render_cards(grid: &CardGrid) -> String {
    let mut html = format!(
        r#"<section class="cards" style="--card-columns: {}">"#,
        grid.columns
    );
    for row in &grid.rows {
        html.push_str(r#"<div class="card-row">"#);
        for cell in &row.cells {
            html.push_str(r#"<div class="card-cell">"#);
            if let Some(card) = cell {
                html.push_str(&render_card(card));
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }
    html.push_str("</section>");
    html
}

fn render_options<'a>(options: impl Iterator<Item = (&'a str, &'a str)>, selected: &str) -> String {
    options
        .map(|(value, label)| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape(value),
                if value == selected { " selected" } else { "" },
                escape(label)
            )
        })
        .collect()
}

fn render_controls(controls: &ChartControls) -> String {
    let modes = render_options(
        controls
            .mode_options
            .iter()
            .map(|o| (o.value.as_str(), o.label.as_str())),
        controls.mode.as_param(),
    );
    let entities = render_options(
        controls.entity_options.iter().map(|e| (e.as_str(), e.as_str())),
        &controls.selected_entity,
    );

    format!(
        r#"<form class="controls" method="get" action="/">
<label for="mode">Select Graph Type</label>
<select id="mode" name="mode" onchange="this.form.submit()">{modes}</select>
<label for="entity">{entity_label}</label>
<select id="entity" name="{entity_param}" onchange="this.form.submit()">{entities}</select>
<noscript><button type="submit">Show</button></noscript>
</form>"#,
        entity_label = escape(&controls.entity_label),
        entity_param = escape(&controls.entity_param),
    )
}

fn render_dashboard(dashboard: &Dashboard) -> String {
    let header = &dashboard.header;
    format!(
        r#"<h3>Grade: {grade}, Division: {division}</h3>
<h4>Class Teacher: {teacher}</h4>
<hr>
<h3>Student Cards</h3>
{cards}
<hr>
<h3>Graphs</h3>
{controls}
<div class="chart-area">{chart}</div>"#,
        grade = escape(&header.grade),
        division = escape(&header.division),
        teacher = escape(&header.class_teacher),
        cards = render_cards(&dashboard.cards),
        controls = render_controls(&dashboard.controls),
        chart = render_svg(&dashboard.chart),
    )
}

/// Render a complete HTML document for one view
pub fn render_html(view: &DashboardView, theme: &Theme) -> String {
    let body = match &view.content {
        ViewContent::LoadFailure { message } => {
            format!(r#"<div class="error" role="alert">{}</div>"#, escape(message))
        }
        ViewContent::Ready(dashboard) => render_dashboard(dashboard),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<div class="layout">
<aside class="sidebar"><h2>{sidebar}</h2></aside>
<main class="main">
<h1>{title}</h1>
{body}
</main>
</div>
</body>
</html>
"#,
        title = escape(&view.page_title),
        style = stylesheet(theme),
        sidebar = escape(&view.sidebar_title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::report::render::render;
    use crate::report::selection::SelectionParams;
    use crate::roster::{ClassRoster, LoadError, StudentRecord, Subject};

    fn roster() -> ClassRoster {
        ClassRoster::new(
            (0..5)
                .map(|i| {
                    StudentRecord::new(format!("Student {}", i), (i + 1).to_string())
                        .class("7", "A", "Mrs. Kulkarni")
                        .picture(if i == 0 { "https://example.com/a.png" } else { "" })
                        .scores([80.0, 75.0, 90.0, 60.0, 70.0])
                })
                .collect(),
        )
    }

    fn page(params: &SelectionParams) -> String {
        let roster = roster();
        let theme = Theme::default();
        let view = render(Ok(&roster), params, &DashboardConfig::default(), &theme);
        render_html(&view, &theme)
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">O'Neil & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;O&#39;Neil &amp; co&lt;/a&gt;"
        );
    }

    #[test]
    fn test_page_sections() {
        let html = page(&SelectionParams::default());

        assert!(html.contains("<title>Class Dashboard</title>"));
        assert!(html.contains("<h2>Class Details</h2>"));
        assert!(html.contains("Grade: 7, Division: A"));
        assert!(html.contains("Class Teacher: Mrs. Kulkarni"));
        assert_eq!(html.matches(r#"<div class="card">"#).count(), 5);
        assert_eq!(html.matches(r#"<div class="card-row">"#).count(), 2);
        assert_eq!(html.matches("No Image Available").count(), 4);
        assert!(html.contains(r#"<img src="https://example.com/a.png""#));
        assert!(html.contains("Performance of Student 0"));
        assert!(html.contains(r#"<option value="student" selected>Student Performance</option>"#));
    }

    #[test]
    fn test_subject_selector() {
        let html = page(&SelectionParams::subject(Subject::Science));

        assert!(html.contains(r#"name="subject""#));
        assert!(html.contains(r#"<option value="Science" selected>Science</option>"#));
        assert!(html.contains("Science Performance"));
    }

    #[test]
    fn test_failure_page_has_no_dashboard() {
        let error = LoadError::EmptyRoster;
        let theme = Theme::default();
        let view = render(
            Err(&error),
            &SelectionParams::default(),
            &DashboardConfig::default(),
            &theme,
        );
        let html = render_html(&view, &theme);

        assert_eq!(html.matches(r#"role="alert""#).count(), 1);
        assert!(html.contains("Error loading spreadsheet: roster contains no students"));
        assert!(!html.contains(r#"<div class="card">"#));
        assert!(!html.contains("<svg"));
        assert!(!html.contains("<form"));
    }
}
