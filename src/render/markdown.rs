use std::fmt::Write;

use super::{Badge, Chart, ChartKind, Renderer, Table};

const BAR_WIDTH: f64 = 30.0;

/// Plain Markdown output; tones are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render_table(&self, table: &Table) -> String {
        let mut output = String::new();

        if let Some(caption) = &table.caption {
            match &table.group_badge {
                Some(badge) => {
                    let _ = writeln!(output, "### {} {}", self.render_badge(badge), caption);
                }
                None => {
                    let _ = writeln!(output, "### {caption}");
                }
            }
            let _ = writeln!(output);
        }

        let _ = write!(output, "| {} |", table.corner);
        for header in &table.headers {
            match &header.badge {
                Some(badge) => {
                    let _ = write!(output, " {} {} |", header.text, self.render_badge(badge));
                }
                None => {
                    let _ = write!(output, " {} |", header.text);
                }
            }
        }
        let _ = writeln!(output);

        let _ = write!(output, "|---|");
        for _ in &table.headers {
            let _ = write!(output, "---:|");
        }
        let _ = writeln!(output);

        for row in &table.rows {
            let label = if row.indent {
                format!("↳ {}", row.label)
            } else if row.derived {
                format!("**{}**", row.label)
            } else {
                row.label.clone()
            };
            let _ = write!(output, "| {label} |");
            for cell in &row.cells {
                let _ = write!(output, " {cell} |");
            }
            let _ = writeln!(output);
        }

        let _ = writeln!(output);
        output
    }

    fn render_chart(&self, chart: &Chart) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "**{}**", chart.title);
        let _ = writeln!(output);
        let _ = writeln!(output, "```");

        let max = chart.max_value();
        let label_width = chart.categories.iter().map(|c| c.chars().count()).max().unwrap_or(0);

        match chart.kind {
            ChartKind::Pie => {
                let values = chart.series.first().map(|s| s.values.as_slice()).unwrap_or(&[]);
                let total: f64 = values.iter().sum();
                for (category, value) in chart.categories.iter().zip(values) {
                    let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
                    let _ = writeln!(
                        output,
                        "{category:<label_width$} {} {value} ({share:.0}%)",
                        bar(*value, max)
                    );
                }
            }
            ChartKind::Bar => {
                let name_width = chart.series.iter().map(|s| s.name.len()).max().unwrap_or(0);
                for (index, category) in chart.categories.iter().enumerate() {
                    let _ = writeln!(output, "{category}");
                    for series in &chart.series {
                        let value = series.values.get(index).copied().unwrap_or(0.0);
                        let _ = writeln!(
                            output,
                            "  {:<name_width$} {} {value}",
                            series.name,
                            bar(value, max)
                        );
                    }
                }
            }
        }

        let _ = writeln!(output, "```");
        let _ = writeln!(output);
        output
    }

    fn render_badge(&self, badge: &Badge) -> String {
        format!("`{}`", badge.text)
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let width = (value / max * BAR_WIDTH).round() as usize;
    "█".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tone;
    use crate::render::{HeaderCell, Row, Series};

    #[test]
    fn table_has_header_separator_and_rows() {
        let table = Table {
            caption: Some("GI (2 users)".to_string()),
            group_badge: Some(Badge {
                text: "DFG".to_string(),
                tone: Tone::Info,
            }),
            corner: "Metric".to_string(),
            headers: vec![
                HeaderCell {
                    text: "Dr. Sarah Chen".to_string(),
                    badge: None,
                },
                HeaderCell {
                    text: "Maria Lopez".to_string(),
                    badge: None,
                },
            ],
            rows: vec![Row {
                label: "Good Match".to_string(),
                indent: true,
                derived: false,
                tone: Some(Tone::Good),
                cells: vec!["16".to_string(), "15".to_string()],
            }],
        };
        let text = MarkdownRenderer.render_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "### `DFG` GI (2 users)");
        assert_eq!(lines[2], "| Metric | Dr. Sarah Chen | Maria Lopez |");
        assert_eq!(lines[3], "|---|---:|---:|");
        assert_eq!(lines[4], "| ↳ Good Match | 16 | 15 |");
    }

    #[test]
    fn pie_lists_shares() {
        let chart = Chart {
            title: "Role Distribution".to_string(),
            kind: ChartKind::Pie,
            categories: vec!["Provider".to_string(), "Non-Provider".to_string()],
            series: vec![Series {
                name: "Users".to_string(),
                values: vec![1.0, 3.0],
            }],
        };
        let text = MarkdownRenderer.render_chart(&chart);
        assert!(text.contains("Provider     ██████████ 1 (25%)"));
        assert!(text.contains("Non-Provider ██████████████████████████████ 3 (75%)"));
    }

    #[test]
    fn zero_max_draws_no_bar() {
        assert_eq!(bar(0.0, 0.0), "");
    }
}
