use crossterm::style::Color;

pub const BRAND: Color = Color::Rgb {
    r: 0x5a,
    g: 0x32,
    b: 0xff,
};
pub const BAR: Color = Color::Rgb {
    r: 0xa7,
    g: 0x8b,
    b: 0xfa,
};
pub const ERROR: Color = Color::Rgb {
    r: 0xfc,
    g: 0xa5,
    b: 0xa5,
};
pub const TEXT: Color = Color::White;
pub const SUBTLE: Color = Color::Grey;
pub const MUTED: Color = Color::DarkGrey;
pub const BACKGROUND: Color = Color::Black;
