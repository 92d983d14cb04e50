use edlist_core::{DateField, EducationCard};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::{App, Focus, HitAreas};
use super::theme;

const PAGE_WIDTH: u16 = 64;
const CARD_HEIGHT: u16 = 4;

/// Create a styled block with rounded corners
fn styled_block(title: &str, is_focused: bool) -> Block<'_> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(theme::BORDER_TYPE)
        .border_style(if is_focused {
            Style::default().fg(theme::FOCUSED)
        } else {
            Style::default()
        })
}

/// Draw the whole page and return where everything landed.
pub fn draw(frame: &mut Frame, app: &App) -> HitAreas {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let page = centered_column(PAGE_WIDTH, outer[0]);

    let page_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Heading
            Constraint::Length(12), // Form
            Constraint::Min(CARD_HEIGHT + 2),
        ])
        .split(page);

    draw_heading(frame, app, page_chunks[0]);
    let mut hit = draw_form(frame, app, page_chunks[1]);
    draw_cards(frame, app, page_chunks[2], &mut hit);

    draw_status_bar(frame, app, outer[1]);

    if app.show_help {
        draw_help_popup(frame);
    }

    hit
}

fn centered_column(width: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y,
        width,
        area.height,
    )
}

#[allow(clippy::cast_possible_truncation)]
fn draw_heading(frame: &mut Frame, app: &App, area: Rect) {
    let width = (app.root.heading().len() as u16 + 6).min(area.width);
    let heading_area = centered_column(width, area);
    let heading = Paragraph::new(Span::styled(
        app.root.heading(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(styled_block("", false));
    frame.render_widget(heading, heading_area);
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) -> HitAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let form = app.root.panel().form();
    draw_input(frame, "School Name", form.name(), app.focus == Focus::Name, rows[0]);
    draw_input(
        frame,
        "From Year (m-d-y)",
        app.date_display(DateField::From),
        app.focus == Focus::From,
        rows[1],
    );
    draw_input(
        frame,
        "To Year (m-d-y)",
        app.date_display(DateField::To),
        app.focus == Focus::To,
        rows[2],
    );

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);
    draw_button(frame, "Save", theme::SAVE_BG, app.focus == Focus::Save, buttons[0]);
    draw_button(frame, "Reset", theme::RESET_BG, app.focus == Focus::Reset, buttons[1]);

    HitAreas {
        name: rows[0],
        from: rows[1],
        to: rows[2],
        save: buttons[0],
        reset: buttons[1],
        ..HitAreas::default()
    }
}

fn draw_input(frame: &mut Frame, label: &str, value: &str, is_focused: bool, area: Rect) {
    let line = if is_focused {
        Line::from(vec![
            Span::raw(value),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if value.is_empty() {
        Line::from(Span::styled(label, Style::default().fg(theme::MUTED)))
    } else {
        Line::from(value)
    };
    frame.render_widget(Paragraph::new(line).block(styled_block(label, is_focused)), area);
}

fn draw_button(
    frame: &mut Frame,
    label: &str,
    bg: ratatui::style::Color,
    is_focused: bool,
    area: Rect,
) {
    let mut style = Style::default().fg(theme::BUTTON_FG).bg(bg);
    if is_focused {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(styled_block("", is_focused));
    frame.render_widget(button, area);
}

/// First card index to show so that `selected` stays inside a window of
/// `capacity` cards, moving the previous window as little as possible.
pub fn visible_window(offset: usize, selected: usize, capacity: usize, len: usize) -> usize {
    let capacity = capacity.max(1);
    let mut offset = offset.min(len.saturating_sub(capacity));
    if selected < offset {
        offset = selected;
    } else if selected >= offset + capacity {
        offset = selected + 1 - capacity;
    }
    offset
}

fn draw_cards(frame: &mut Frame, app: &App, area: Rect, hit: &mut HitAreas) {
    let is_focused = app.focus == Focus::List;
    let cards = app.root.panel().cards();

    let block = styled_block("", is_focused);
    let inner = block.inner(area);

    let capacity = usize::from(inner.height / CARD_HEIGHT);
    let offset = visible_window(app.hit.list_offset, app.selected_card, capacity, cards.len());
    let shown = cards.len().saturating_sub(offset).min(capacity);

    let title = if cards.len() > shown {
        format!("Entries ({}) [{}-{}]", cards.len(), offset + 1, offset + shown)
    } else {
        format!("Entries ({})", cards.len())
    };
    frame.render_widget(block.title(title), area);

    hit.list = area;
    hit.list_offset = offset;

    for (row, (index, card)) in cards.iter().enumerate().skip(offset).take(shown).enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let card_area = Rect::new(
            inner.x,
            inner.y + row as u16 * CARD_HEIGHT,
            inner.width,
            CARD_HEIGHT,
        );
        let selected = is_focused && index == app.selected_card;
        draw_card(frame, card, selected, card_area);
        hit.cards.push((card_area, card.key()));
    }
}

fn draw_card(frame: &mut Frame, card: &EducationCard<'_>, selected: bool, area: Rect) {
    let border = if selected {
        theme::CARD_SELECTED_BORDER
    } else {
        theme::CARD_BORDER
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme::BORDER_TYPE)
        .border_style(Style::default().fg(border));

    let lines = vec![
        Line::from(Span::styled(
            card.title(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            card.date_range(),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(theme::CARD_FG).bg(theme::CARD_BG))
        .block(block);
    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = match app.focus {
        Focus::Name | Focus::From | Focus::To => &[
            ("Next", "Tab"),
            ("Save", "Ctrl+S"),
            ("Reset", "Ctrl+R"),
            ("Clear", "Ctrl+U"),
        ],
        Focus::Save | Focus::Reset => &[("Press", "Enter"), ("Next", "Tab"), ("Quit", "q")],
        Focus::List => &[("Edit", "Enter"), ("Move", "j/k"), ("Quit", "q")],
    };

    let mut spans = Vec::new();
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!("{status}  "),
            Style::default().fg(theme::FOCUSED),
        ));
    }
    for (i, (action, key)) in hints
        .iter()
        .chain(std::iter::once(&("Help", "F1")))
        .enumerate()
    {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(theme::HINT)));
        }
        spans.push(Span::styled(
            format!("{action}: {key}"),
            Style::default().fg(theme::HINT),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

fn draw_help_popup(frame: &mut Frame) {
    let popup_area = centered_rect(50, 19, frame.area());

    frame.render_widget(Clear, popup_area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Form", bold)),
        Line::from("  Tab/Shift+Tab  Next/previous field"),
        Line::from("  Enter          Commit date / press button"),
        Line::from("  Esc            Discard date typing"),
        Line::from("  Ctrl+U         Clear field"),
        Line::from("  Ctrl+S         Save entry"),
        Line::from("  Ctrl+R         Reset form"),
        Line::from(""),
        Line::from(Span::styled("Entries", bold)),
        Line::from("  j/k, Up/Down   Move selection"),
        Line::from("  g/G            Go to top/bottom"),
        Line::from("  Enter, click   Request edit"),
        Line::from(""),
        Line::from(Span::styled("General", bold)),
        Line::from("  F1             This help"),
        Line::from("  q, Ctrl+C      Quit"),
    ];

    let block = Block::default()
        .title("Keybindings")
        .borders(Borders::ALL)
        .border_type(theme::BORDER_TYPE)
        .border_style(Style::default().fg(theme::FOCUSED));

    frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
}

#[cfg(test)]
mod tests {
    use edlist_core::{EducationListPanel, FormDefaults, RecordForm, RootView, ZoneSetting};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn app() -> App {
        let form = RecordForm::new(FormDefaults::default(), ZoneSetting::Utc.offset());
        App::new(RootView::new(EducationListPanel::with_form(form)))
    }

    fn render(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut hit = HitAreas::default();
        terminal.draw(|frame| hit = draw(frame, app)).unwrap();
        app.hit = hit;

        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn row_of(lines: &[String], needle: &str) -> Option<usize> {
        lines.iter().position(|l| l.contains(needle))
    }

    #[test]
    fn window_follows_selection() {
        assert_eq!(visible_window(0, 0, 3, 10), 0);
        assert_eq!(visible_window(0, 5, 3, 10), 3);
        assert_eq!(visible_window(3, 1, 3, 10), 1);
        assert_eq!(visible_window(8, 9, 3, 10), 7);
        assert_eq!(visible_window(0, 0, 0, 0), 0);
    }

    #[test]
    fn renders_heading_form_and_newest_card_first() {
        let mut app = app();
        let lines = render(&mut app, 80, 50);

        assert!(row_of(&lines, "EDUCATION").is_some());
        assert!(row_of(&lines, "2022-01-01").is_some());
        assert!(row_of(&lines, "Save").is_some());

        let five = row_of(&lines, "School 5").unwrap();
        let four = row_of(&lines, "School 4").unwrap();
        assert!(five < four);
        assert!(row_of(&lines, "(2021-05-01)-(2021-09-01)").is_some());
        assert_eq!(app.hit.cards.len(), 5);
    }

    #[test]
    fn short_terminal_scrolls_the_card_list() {
        let mut app = app();
        app.set_focus(Focus::List);
        app.selected_card = 4;
        let lines = render(&mut app, 80, 28);

        assert!(row_of(&lines, "School 1").is_some());
        assert!(row_of(&lines, "School 5").is_none());
        assert!(app.hit.list_offset > 0);
        assert!(row_of(&lines, "Entries (5) [").is_some());
    }

    #[test]
    fn invalid_dates_render_as_nan() {
        let mut app = app();
        app.root.panel_mut().form_mut().set_name("Broken");
        app.root.panel_mut().form_mut().set_from("garbage");
        app.save();
        let lines = render(&mut app, 80, 50);
        assert!(row_of(&lines, "(NaN-NaN-NaN)-(2022-05-01)").is_some());
    }
}
