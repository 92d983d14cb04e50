use std::str::FromStr;

use anyhow::{Result, bail};
use edlist_core::{CardView, RootView};
use serde::Serialize;

/// Output format for the printed page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Heading, draft, then one card per entry
    #[default]
    Text,
    /// JSON - machine-parseable
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => bail!("Invalid format '{}'. Use: text or json", s),
        }
    }
}

/// Serializable snapshot of the page.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub heading: &'static str,
    pub draft: DraftView,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Serialize)]
pub struct DraftView {
    pub name: String,
    pub from: String,
    pub to: String,
}

impl PageView {
    pub fn of(view: &RootView) -> Self {
        let panel = view.panel();
        let form = panel.form();
        Self {
            heading: view.heading(),
            draft: DraftView {
                name: form.name().to_owned(),
                from: form.from_text().to_owned(),
                to: form.to_text().to_owned(),
            },
            cards: panel.card_views(),
        }
    }
}

impl OutputFormat {
    /// Render the page in this format.
    pub fn render(self, view: &RootView) -> Result<String> {
        match self {
            Self::Text => Ok(view.render_text()),
            Self::Json => serde_json::to_string_pretty(&PageView::of(view))
                .map_err(|e| anyhow::anyhow!("JSON serialization failed: {}", e)),
        }
    }
}
