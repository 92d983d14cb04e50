use ratatui::style::Color;
use ratatui::widgets::block::BorderType;

// Focus
pub const FOCUSED: Color = Color::Green;
pub const MUTED: Color = Color::DarkGray;

// Border style
pub const BORDER_TYPE: BorderType = BorderType::Rounded;

// Cards
pub const CARD_BG: Color = Color::LightYellow;
pub const CARD_FG: Color = Color::Black;
pub const CARD_BORDER: Color = Color::Gray;
pub const CARD_SELECTED_BORDER: Color = Color::Cyan;

// Buttons
pub const SAVE_BG: Color = Color::Blue;
pub const RESET_BG: Color = Color::Red;
pub const BUTTON_FG: Color = Color::White;

// Hints
pub const HINT: Color = Color::Blue;
