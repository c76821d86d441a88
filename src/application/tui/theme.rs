use crossterm::style::Color as CrosstermColor;
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Selection
    pub anchor: ColorPair,
    pub in_range: ColorPair,
    pub cursor: ColorPair,
    pub today: ColorPair,

    // Grid
    pub header: ColorPair,
    pub weekend: ColorPair,
    pub day: ColorPair,
    pub dimmed: ColorPair,

    // Text
    pub title: ColorPair,
    pub help_text: ColorPair,
    pub status_text: ColorPair,
}

#[derive(Debug, Clone)]
pub struct ColorPair {
    pub fg: CrosstermColor,
    pub bg: Option<CrosstermColor>,
}

impl ColorPair {
    pub fn new(fg: CrosstermColor) -> Self {
        Self { fg, bg: None }
    }

    pub fn with_bg(fg: CrosstermColor, bg: CrosstermColor) -> Self {
        Self { fg, bg: Some(bg) }
    }

    pub fn to_ratatui(&self) -> RatatuiStyle {
        let mut style = RatatuiStyle::default().fg(Self::crossterm_to_ratatui(self.fg));
        if let Some(bg) = self.bg {
            style = style.bg(Self::crossterm_to_ratatui(bg));
        }
        style
    }

    pub fn to_ratatui_with_modifier(&self, modifier: Modifier) -> RatatuiStyle {
        self.to_ratatui().add_modifier(modifier)
    }

    pub fn crossterm_to_ratatui(color: CrosstermColor) -> RatatuiColor {
        match color {
            CrosstermColor::Black => RatatuiColor::Black,
            CrosstermColor::DarkRed => RatatuiColor::Red,
            CrosstermColor::DarkGreen => RatatuiColor::Green,
            CrosstermColor::DarkYellow => RatatuiColor::Yellow,
            CrosstermColor::DarkBlue => RatatuiColor::Blue,
            CrosstermColor::DarkMagenta => RatatuiColor::Magenta,
            CrosstermColor::DarkCyan => RatatuiColor::Cyan,
            CrosstermColor::Grey => RatatuiColor::Gray,
            CrosstermColor::DarkGrey => RatatuiColor::DarkGray,
            CrosstermColor::Red => RatatuiColor::LightRed,
            CrosstermColor::Green => RatatuiColor::LightGreen,
            CrosstermColor::Yellow => RatatuiColor::LightYellow,
            CrosstermColor::Blue => RatatuiColor::LightBlue,
            CrosstermColor::Magenta => RatatuiColor::LightMagenta,
            CrosstermColor::Cyan => RatatuiColor::LightCyan,
            CrosstermColor::White => RatatuiColor::White,
            CrosstermColor::Rgb { r, g, b } => RatatuiColor::Rgb(r, g, b),
            CrosstermColor::AnsiValue(v) => RatatuiColor::Indexed(v),
            _ => RatatuiColor::White,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                anchor: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Cyan),
                in_range: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::Rgb { r: 30, g: 60, b: 80 },
                ),
                cursor: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::Rgb { r: 70, g: 70, b: 70 },
                ),
                today: ColorPair::new(CrosstermColor::Yellow),

                header: ColorPair::new(CrosstermColor::DarkCyan),
                weekend: ColorPair::new(CrosstermColor::Rgb { r: 150, g: 150, b: 150 }),
                day: ColorPair::new(CrosstermColor::White),
                dimmed: ColorPair::new(CrosstermColor::DarkGrey),

                title: ColorPair::new(CrosstermColor::DarkCyan),
                help_text: ColorPair::new(CrosstermColor::DarkGrey),
                status_text: ColorPair::new(CrosstermColor::White),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                anchor: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                in_range: ColorPair::with_bg(
                    CrosstermColor::Black,
                    CrosstermColor::Rgb { r: 200, g: 220, b: 240 },
                ),
                cursor: ColorPair::with_bg(
                    CrosstermColor::Black,
                    CrosstermColor::Rgb { r: 220, g: 220, b: 220 },
                ),
                today: ColorPair::new(CrosstermColor::DarkYellow),

                header: ColorPair::new(CrosstermColor::DarkBlue),
                weekend: ColorPair::new(CrosstermColor::Grey),
                day: ColorPair::new(CrosstermColor::Black),
                dimmed: ColorPair::new(CrosstermColor::Grey),

                title: ColorPair::new(CrosstermColor::DarkBlue),
                help_text: ColorPair::new(CrosstermColor::DarkGrey),
                status_text: ColorPair::new(CrosstermColor::Black),
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                anchor: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::White),
                in_range: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkGrey),
                cursor: ColorPair::new(CrosstermColor::White),
                today: ColorPair::new(CrosstermColor::White),

                header: ColorPair::new(CrosstermColor::White),
                weekend: ColorPair::new(CrosstermColor::DarkGrey),
                day: ColorPair::new(CrosstermColor::White),
                dimmed: ColorPair::new(CrosstermColor::DarkGrey),

                title: ColorPair::new(CrosstermColor::White),
                help_text: ColorPair::new(CrosstermColor::Grey),
                status_text: ColorPair::new(CrosstermColor::White),
            },
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "minimal" => Self::minimal(),
            _ => Self::dark(), // default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_falls_back_to_dark() {
        assert_eq!(Theme::by_name("LIGHT").name, "Light");
        assert_eq!(Theme::by_name("neon").name, "Dark");
        assert_eq!(Theme::by_name("Minimal").name, "Minimal");
    }

    #[test]
    fn test_color_pair_to_ratatui() {
        let style =
            ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::DarkBlue).to_ratatui();
        assert_eq!(style.fg, Some(RatatuiColor::Black));
        assert_eq!(style.bg, Some(RatatuiColor::Blue));
    }
}
