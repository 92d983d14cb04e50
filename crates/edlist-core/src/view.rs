//! Page chrome around the panel.

use std::fmt::Write as _;

use crate::panel::EducationListPanel;

pub const HEADING: &str = "EDUCATION";

/// Heading plus one list panel.
#[derive(Debug, Default)]
pub struct RootView {
    panel: EducationListPanel,
}

impl RootView {
    pub const fn new(panel: EducationListPanel) -> Self {
        Self { panel }
    }

    pub const fn heading(&self) -> &'static str {
        HEADING
    }

    pub const fn panel(&self) -> &EducationListPanel {
        &self.panel
    }

    pub const fn panel_mut(&mut self) -> &mut EducationListPanel {
        &mut self.panel
    }

    /// Plain-text rendering of the whole page: heading, draft, then cards.
    pub fn render_text(&self) -> String {
        let form = self.panel.form();
        let mut out = String::new();
        let _ = writeln!(out, "{HEADING}");
        let _ = writeln!(out);
        let _ = writeln!(out, "School Name: {}", form.name());
        let _ = writeln!(out, "From Year:   {}", form.from_text());
        let _ = writeln!(out, "To Year:     {}", form.to_text());
        let _ = writeln!(out);
        for card in self.panel.cards() {
            let _ = writeln!(out, "{}", card.title());
            let _ = writeln!(out, "  {}", card.date_range());
        }
        out
    }
}
