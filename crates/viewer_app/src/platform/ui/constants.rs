use ratatui::style::Color;

pub const TOP_BAR_HEIGHT: u16 = 1;
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Left indent of everything below a card header.
pub const CARD_INDENT: usize = 2;

pub const RETURN_BUTTON_WIDTH: u16 = 10;
pub const RETURN_BUTTON_HEIGHT: u16 = 3;
/// Distance of the return button from the page's bottom-right corner.
pub const RETURN_BUTTON_MARGIN: u16 = 2;
pub const RETURN_BUTTON_LABEL: &str = "↓ back";

pub const TIME_FORMAT: &str = "%Y年%-m月%-d日 %H:%M:%S";

pub const COLOR_BAR: Color = Color::Blue;
pub const COLOR_MSG_NUM: Color = Color::DarkGray;
pub const COLOR_MSG_NUM_OP: Color = Color::LightYellow;
pub const COLOR_ADMIN: Color = Color::Yellow;
pub const COLOR_MALE: Color = Color::LightBlue;
pub const COLOR_FEMALE: Color = Color::LightRed;
pub const COLOR_QUOTE: Color = Color::Cyan;
pub const COLOR_MUTED: Color = Color::Gray;
