use std::str::FromStr;

use crate::models::Tone;

/// Colour palette for the HTML renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub text_dim: &'static str,
    pub accent: &'static str,
    pub good: &'static str,
    pub warn: &'static str,
    pub bad: &'static str,
    pub info: &'static str,
    pub purple: &'static str,
    pub series: [&'static str; 8],
}

impl Theme {
    pub const PRISM: Theme = Theme {
        name: "prism",
        background: "#f7f8fa",
        surface: "#ffffff",
        border: "#e5e7eb",
        text: "#111827",
        text_dim: "#6b7280",
        accent: "#284cd4",
        good: "#1a7f5a",
        warn: "#b25c00",
        bad: "#b42318",
        info: "#0e7490",
        purple: "#5b34da",
        series: [
            "#284cd4", "#1a7f5a", "#b25c00", "#5b34da", "#0e7490", "#b42318", "#64748b", "#334155",
        ],
    };

    pub const CLASSIC: Theme = Theme {
        name: "classic",
        background: "#f4f5f7",
        surface: "#ffffff",
        border: "#e2e5eb",
        text: "#1b1e27",
        text_dim: "#8c94ad",
        accent: "#3d5af1",
        good: "#12a56a",
        warn: "#d97b08",
        bad: "#dc3d43",
        info: "#0c95b0",
        purple: "#6f4fdc",
        series: [
            "#3d5af1", "#12a56a", "#d97b08", "#6f4fdc", "#0c95b0", "#dc3d43", "#c9a020", "#8b5cf6",
        ],
    };

    pub fn tone_color(&self, tone: Tone) -> &'static str {
        match tone {
            Tone::Good => self.good,
            Tone::Warn => self.warn,
            Tone::Bad => self.bad,
            Tone::Info => self.info,
            Tone::Muted => self.text_dim,
            Tone::Neutral => self.purple,
        }
    }

    pub fn series_color(&self, index: usize) -> &'static str {
        self.series[index % self.series.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::PRISM
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prism" => Ok(Theme::PRISM),
            "classic" => Ok(Theme::CLASSIC),
            other => Err(format!("unknown theme: {other} (expected prism or classic)")),
        }
    }
}
