use std::fmt::Write;

use crate::models::Tone;

use super::{Badge, Chart, ChartKind, Renderer, Table, Theme};

const CHART_HEIGHT: f64 = 160.0;

/// Self-contained HTML page styled by a [`Theme`].
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    theme: Theme,
}

impl HtmlRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    fn row_color(&self, tone: Option<Tone>, derived: bool) -> &'static str {
        if derived {
            return self.theme.info;
        }
        tone.map(|tone| self.theme.tone_color(tone))
            .unwrap_or(self.theme.text)
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl Renderer for HtmlRenderer {
    fn render_table(&self, table: &Table) -> String {
        let t = &self.theme;
        let mut output = String::new();
        let _ = writeln!(output, "<div class=\"table-block\">");

        if let Some(caption) = &table.caption {
            let badge = table
                .group_badge
                .as_ref()
                .map(|badge| self.render_badge(badge))
                .unwrap_or_default();
            let _ = writeln!(
                output,
                "<div class=\"caption\">{badge} <strong>{}</strong></div>",
                escape(caption)
            );
        }

        let _ = writeln!(output, "<table>");
        let _ = write!(output, "<thead><tr><th class=\"corner\">{}</th>", escape(&table.corner));
        for header in &table.headers {
            let badge = header
                .badge
                .as_ref()
                .map(|badge| format!("<div>{}</div>", self.render_badge(badge)))
                .unwrap_or_default();
            let _ = write!(output, "<th>{}{badge}</th>", escape(&header.text));
        }
        let _ = writeln!(output, "</tr></thead>");

        let _ = writeln!(output, "<tbody>");
        for row in &table.rows {
            let color = self.row_color(row.tone, row.derived);
            let prefix = if row.indent {
                "<span class=\"dim\">↳</span> "
            } else if row.derived {
                "⚡ "
            } else {
                ""
            };
            let padding = if row.indent { 28 } else { 12 };
            let _ = write!(
                output,
                "<tr><td class=\"label\" style=\"padding-left:{padding}px;color:{}\">{prefix}{}</td>",
                if row.derived { t.info } else { t.text },
                escape(&row.label)
            );
            for cell in &row.cells {
                let _ = write!(output, "<td class=\"num\" style=\"color:{color}\">{}</td>", escape(cell));
            }
            let _ = writeln!(output, "</tr>");
        }
        let _ = writeln!(output, "</tbody></table></div>");
        output
    }

    fn render_chart(&self, chart: &Chart) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "<figure class=\"chart\">");
        let _ = writeln!(output, "<figcaption>{}</figcaption>", escape(&chart.title));

        match chart.kind {
            ChartKind::Pie => {
                let values = chart.series.first().map(|s| s.values.as_slice()).unwrap_or(&[]);
                let total: f64 = values.iter().sum();
                let mut stops = Vec::new();
                let mut start = 0.0;
                for (index, value) in values.iter().enumerate() {
                    let end = if total > 0.0 { start + value / total * 100.0 } else { start };
                    stops.push(format!(
                        "{} {start:.2}% {end:.2}%",
                        self.theme.series_color(index)
                    ));
                    start = end;
                }
                let _ = writeln!(
                    output,
                    "<div class=\"donut\" style=\"background:conic-gradient({})\"></div>",
                    stops.join(", ")
                );
                let _ = writeln!(output, "<ul class=\"legend\">");
                for (index, (category, value)) in chart.categories.iter().zip(values).enumerate() {
                    let _ = writeln!(
                        output,
                        "<li><span class=\"swatch\" style=\"background:{}\"></span>{} <b>({value})</b></li>",
                        self.theme.series_color(index),
                        escape(category)
                    );
                }
                let _ = writeln!(output, "</ul>");
            }
            ChartKind::Bar => {
                let max = chart.max_value();
                let _ = writeln!(output, "<div class=\"bars\">");
                for (index, category) in chart.categories.iter().enumerate() {
                    let _ = write!(output, "<div class=\"group\" title=\"{}\">", escape(category));
                    for (series_index, series) in chart.series.iter().enumerate() {
                        let value = series.values.get(index).copied().unwrap_or(0.0);
                        let height = if max > 0.0 { value / max * CHART_HEIGHT } else { 0.0 };
                        let _ = write!(
                            output,
                            "<span class=\"bar\" style=\"height:{height:.0}px;background:{}\" title=\"{}: {value}\"></span>",
                            self.theme.series_color(series_index),
                            escape(&series.name)
                        );
                    }
                    let _ = writeln!(output, "<small>{}</small></div>", escape(category));
                }
                let _ = writeln!(output, "</div>");
            }
        }

        let _ = writeln!(output, "</figure>");
        output
    }

    fn render_badge(&self, badge: &Badge) -> String {
        let color = self.theme.tone_color(badge.tone);
        format!(
            "<span class=\"badge\" style=\"color:{color};border-color:{color}33;background:{color}14\">{}</span>",
            escape(&badge.text)
        )
    }

    fn render_section(&self, title: &str, body: &str) -> String {
        format!("<section>\n<h2>{}</h2>\n{body}</section>\n", escape(title))
    }

    fn render_stat(&self, label: &str, value: &str, sub_label: Option<&str>, tone: Tone) -> String {
        let sub = sub_label
            .map(|sub| format!("<div class=\"sub\">{}</div>", escape(sub)))
            .unwrap_or_default();
        format!(
            "<div class=\"stat\"><div class=\"label\">{}</div><div class=\"value\" style=\"color:{}\">{}</div>{sub}</div>\n",
            escape(label),
            self.theme.tone_color(tone),
            escape(value)
        )
    }

    fn render_document(&self, title: &str, body: &str) -> String {
        let t = &self.theme;
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n\
             body{{margin:0;padding:24px;background:{bg};color:{text};font-family:system-ui,sans-serif}}\n\
             section{{background:{surface};border:1px solid {border};border-radius:10px;padding:16px;margin-bottom:16px}}\n\
             table{{border-collapse:separate;border-spacing:0;width:100%}}\n\
             th,td{{padding:8px 10px;border-bottom:1px solid {border};font-size:13px}}\n\
             td.num{{text-align:center;font-family:ui-monospace,monospace;font-variant-numeric:tabular-nums}}\n\
             .dim{{color:{dim}}}\n\
             .badge{{display:inline-flex;height:20px;padding:0 8px;border-radius:999px;border:1px solid;font-size:11px;font-weight:600;align-items:center}}\n\
             .stat{{display:inline-block;min-width:160px;margin:0 12px 12px 0;padding:12px 16px;border:1px solid {border};border-radius:10px}}\n\
             .stat .label,.stat .sub{{font-size:11px;color:{dim}}}\n\
             .stat .value{{font-size:20px;font-weight:700}}\n\
             .donut{{width:140px;height:140px;border-radius:50%;-webkit-mask:radial-gradient(circle,transparent 42%,#000 43%);mask:radial-gradient(circle,transparent 42%,#000 43%)}}\n\
             .swatch{{display:inline-block;width:7px;height:7px;border-radius:2px;margin-right:4px}}\n\
             .bars{{display:flex;align-items:flex-end;gap:8px;height:{height}px}}\n\
             .bar{{display:inline-block;width:8px;margin-right:2px;border-radius:4px 4px 0 0}}\n\
             h2{{font-size:14px;color:{accent}}}\n\
             </style>\n</head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
            title = escape(title),
            bg = t.background,
            text = t.text,
            surface = t.surface,
            border = t.border,
            dim = t.text_dim,
            accent = t.accent,
            height = CHART_HEIGHT + 24.0,
        )
    }
}
