use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseButton, MouseEventKind};
use edlist_core::{DateField, EducationCard, RecordId, RootView};
use ratatui::{Terminal, layout::Rect, prelude::CrosstermBackend};

use super::event::{self, AppEvent, Command};
use super::ui;

/// Which widget receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Name,
    From,
    To,
    Save,
    Reset,
    List,
}

impl Focus {
    const ORDER: [Self; 6] = [
        Self::Name,
        Self::From,
        Self::To,
        Self::Save,
        Self::Reset,
        Self::List,
    ];

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn step(self, direction: i32) -> Self {
        let len = Self::ORDER.len() as i32;
        let at = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0) as i32;
        Self::ORDER[(at + direction).rem_euclid(len) as usize]
    }

    pub const fn date_field(self) -> Option<DateField> {
        match self {
            Self::From => Some(DateField::From),
            Self::To => Some(DateField::To),
            _ => None,
        }
    }

    pub const fn takes_text(self) -> bool {
        matches!(self, Self::Name | Self::From | Self::To)
    }
}

/// Screen regions from the last frame, for mouse hit testing.
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    pub name: Rect,
    pub from: Rect,
    pub to: Rect,
    pub save: Rect,
    pub reset: Rect,
    pub list: Rect,
    /// Visible cards, top to bottom.
    pub cards: Vec<(Rect, RecordId)>,
    /// First visible card index after the last draw.
    pub list_offset: usize,
}

/// Main application state
pub struct App {
    pub root: RootView,
    pub focus: Focus,
    /// Uncommitted text of the focused date field. Committed on Enter or when
    /// focus leaves, which is when the form parses and reformats it.
    pub date_buffer: String,
    /// Selected card in display order (0 = newest).
    pub selected_card: usize,
    pub should_quit: bool,
    pub show_help: bool,
    pub status: Option<String>,
    pub hit: HitAreas,
}

impl App {
    pub fn new(root: RootView) -> Self {
        Self {
            root,
            focus: Focus::Name,
            date_buffer: String::new(),
            selected_card: 0,
            should_quit: false,
            show_help: false,
            status: None,
            hit: HitAreas::default(),
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while !self.should_quit {
            let mut hit = HitAreas::default();
            terminal.draw(|frame| hit = ui::draw(frame, self))?;
            self.hit = hit;

            let event = event::next_event(Duration::from_millis(100))?;
            self.handle_event(event);
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Mouse(mouse) => self.handle_mouse(mouse.kind, mouse.column, mouse.row),
            AppEvent::Paste(text) => self.insert_text(&text),
            AppEvent::Resize { .. } | AppEvent::Tick => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let command = event::command_for(key);

        // Help is modal; any key closes it, Ctrl-C still quits.
        if self.show_help {
            self.show_help = false;
            if command == Some(Command::Quit) {
                self.should_quit = true;
            }
            return;
        }

        let Some(command) = command else {
            return;
        };

        match command {
            Command::Quit => self.should_quit = true,
            Command::ToggleHelp => self.show_help = true,
            Command::Save => self.save(),
            Command::Reset => self.reset(),
            Command::FocusNext => self.set_focus(self.focus.step(1)),
            Command::FocusPrev => self.set_focus(self.focus.step(-1)),
            Command::Up if self.focus == Focus::List => self.move_selection(-1),
            Command::Down if self.focus == Focus::List => self.move_selection(1),
            Command::Up => self.set_focus(self.focus.step(-1)),
            Command::Down => self.set_focus(self.focus.step(1)),
            Command::Top if self.focus == Focus::List => self.selected_card = 0,
            Command::Bottom if self.focus == Focus::List => {
                self.selected_card = self.card_count().saturating_sub(1);
            }
            Command::Top | Command::Bottom => {}
            Command::Activate => self.activate(),
            Command::Cancel => self.cancel(),
            Command::Backspace => self.backspace(),
            Command::ClearField => self.clear_field(),
            Command::Insert(c) if self.focus.takes_text() => self.insert_text(&c.to_string()),
            Command::Insert(c) => self.shortcut(c),
        }
    }

    pub fn handle_mouse(&mut self, kind: MouseEventKind, x: u16, y: u16) {
        if self.show_help {
            return;
        }

        match kind {
            MouseEventKind::Down(MouseButton::Left) => self.click(x, y),
            MouseEventKind::ScrollUp => self.move_selection(-1),
            MouseEventKind::ScrollDown => self.move_selection(1),
            _ => {}
        }
    }

    fn click(&mut self, x: u16, y: u16) {
        let pos = (x, y).into();
        let targets = [
            (self.hit.name, Focus::Name),
            (self.hit.from, Focus::From),
            (self.hit.to, Focus::To),
            (self.hit.save, Focus::Save),
            (self.hit.reset, Focus::Reset),
        ];
        if let Some((_, focus)) = targets.iter().find(|(area, _)| area.contains(pos)) {
            self.set_focus(*focus);
            if matches!(focus, Focus::Save | Focus::Reset) {
                self.activate();
            }
            return;
        }

        let clicked = self
            .hit
            .cards
            .iter()
            .enumerate()
            .find(|(_, (area, _))| area.contains(pos))
            .map(|(row, (_, id))| (row, *id));
        if let Some((row, id)) = clicked {
            self.set_focus(Focus::List);
            self.selected_card = self.hit.list_offset + row;
            self.request_edit(id);
        } else if self.hit.list.contains(pos) {
            self.set_focus(Focus::List);
        }
    }

    /// Move focus, committing a date field that is being left and loading
    /// the draft text of one being entered.
    pub fn set_focus(&mut self, focus: Focus) {
        if focus == self.focus {
            return;
        }
        self.commit_date();
        self.focus = focus;
        if let Some(field) = focus.date_field() {
            self.date_buffer = self.root.panel().form().date_text(field).to_owned();
        }
    }

    fn commit_date(&mut self) {
        if let Some(field) = self.focus.date_field() {
            let form = self.root.panel_mut().form_mut();
            form.set_date(field, &self.date_buffer);
            self.date_buffer = form.date_text(field).to_owned();
        }
    }

    fn activate(&mut self) {
        match self.focus {
            Focus::Name => self.set_focus(Focus::From),
            Focus::From | Focus::To => self.commit_date(),
            Focus::Save => self.save(),
            Focus::Reset => self.reset(),
            Focus::List => self.request_selected_edit(),
        }
    }

    /// Esc inside a date field only drops the typing; elsewhere it quits.
    fn cancel(&mut self) {
        if let Some(field) = self.focus.date_field() {
            self.date_buffer = self.root.panel().form().date_text(field).to_owned();
            return;
        }
        self.should_quit = true;
    }

    fn shortcut(&mut self, c: char) {
        match c {
            'q' => self.should_quit = true,
            '?' => self.show_help = true,
            ' ' => self.activate(),
            'j' if self.focus == Focus::List => self.move_selection(1),
            'k' if self.focus == Focus::List => self.move_selection(-1),
            'g' if self.focus == Focus::List => self.selected_card = 0,
            'G' if self.focus == Focus::List => self.selected_card = self.card_count().saturating_sub(1),
            _ => {}
        }
    }

    fn insert_text(&mut self, text: &str) {
        match self.focus {
            Focus::Name => {
                let form = self.root.panel_mut().form_mut();
                let name = format!("{}{text}", form.name());
                form.set_name(name);
            }
            Focus::From | Focus::To => self.date_buffer.push_str(text),
            Focus::Save | Focus::Reset | Focus::List => {}
        }
    }

    fn backspace(&mut self) {
        match self.focus {
            Focus::Name => {
                let form = self.root.panel_mut().form_mut();
                let mut name = form.name().to_owned();
                name.pop();
                form.set_name(name);
            }
            Focus::From | Focus::To => {
                self.date_buffer.pop();
            }
            Focus::Save | Focus::Reset | Focus::List => {}
        }
    }

    fn clear_field(&mut self) {
        match self.focus {
            Focus::Name => self.root.panel_mut().form_mut().set_name(""),
            Focus::From | Focus::To => self.date_buffer.clear(),
            Focus::Save | Focus::Reset | Focus::List => {}
        }
    }

    /// Save button. A date being typed is committed first, as leaving the
    /// field would.
    pub fn save(&mut self) {
        self.commit_date();
        let panel = self.root.panel_mut();
        let id = panel.save_draft();
        let name = panel.get(id).map(|r| r.school_name().to_owned()).unwrap_or_default();
        self.selected_card = 0;
        self.status = Some(format!("Saved '{name}' ({} entries)", panel.len()));
    }

    pub fn reset(&mut self) {
        self.root.panel_mut().reset_draft();
        if let Some(field) = self.focus.date_field() {
            self.date_buffer = self.root.panel().form().date_text(field).to_owned();
        }
        self.status = Some("Draft reset".to_owned());
    }

    fn request_selected_edit(&mut self) {
        let id = self
            .root
            .panel()
            .cards()
            .get(self.selected_card)
            .map(EducationCard::key);
        if let Some(id) = id {
            self.request_edit(id);
        }
    }

    fn request_edit(&mut self, id: RecordId) {
        let panel = self.root.panel();
        if panel.request_edit(id) {
            let name = panel.get(id).map(|r| r.school_name().to_owned()).unwrap_or_default();
            self.status = Some(format!("Edit requested: {name}"));
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn move_selection(&mut self, direction: i32) {
        let len = self.card_count();
        if len == 0 {
            return;
        }
        self.selected_card = (self.selected_card as i32 + direction).rem_euclid(len as i32) as usize;
    }

    fn card_count(&self) -> usize {
        self.root.panel().len()
    }

    /// Text shown in a date input: the scratch buffer while focused.
    pub fn date_display(&self, field: DateField) -> &str {
        if self.focus.date_field() == Some(field) {
            &self.date_buffer
        } else {
            self.root.panel().form().date_text(field)
        }
    }
}
