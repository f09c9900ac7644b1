use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// Icon display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMode {
    Emoji,    // Standard emoji icons (📁, 📄, etc.)
    NerdFont, // Nerd Fonts icons (U+E5FF, etc.)
}

/// Icon theme using terminal colors (respects user's terminal theme)
#[derive(Debug, Clone)]
pub struct IconTheme {
    pub folder_color: Color,
    pub note_color: Color,
    pub media_color: Color,
    pub file_color: Color,
    pub action_color: Color,
    pub danger_color: Color,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self {
            folder_color: Color::Blue,
            note_color: Color::Cyan,
            media_color: Color::Magenta,
            file_color: Color::Gray,
            action_color: Color::Yellow,
            danger_color: Color::Red,
        }
    }
}

/// Icon renderer that handles both emoji and Nerd Font modes
#[derive(Debug, Clone)]
pub struct IconRenderer {
    mode: IconMode,
    theme: IconTheme,
}

impl IconRenderer {
    pub fn new(mode: IconMode, theme: IconTheme) -> Self {
        Self { mode, theme }
    }

    /// Span for one of the core's icon names; unknown names get the file icon
    pub fn icon(&self, name: &str) -> Span<'static> {
        let (emoji, nerd, color) = match name {
            "folder" => ("📁", "\u{E5FF}", self.theme.folder_color),
            "folder-open" => ("📂", "\u{F07C}", self.theme.folder_color),
            "document" => ("📝", "\u{F48A}", self.theme.note_color),
            "layout-dashboard" => ("🗂", "\u{F0E8}", self.theme.note_color),
            "image-file" => ("🖼", "\u{F1C5}", self.theme.media_color),
            "audio-file" => ("🎵", "\u{F1C7}", self.theme.media_color),
            "video-file" => ("🎬", "\u{F1C8}", self.theme.media_color),
            "pdf-file" => ("📕", "\u{F1C1}", self.theme.media_color),
            "create-new" => ("➕", "\u{F067}", self.theme.action_color),
            "pencil" => ("✏", "\u{F040}", self.theme.action_color),
            "trash" => ("🗑", "\u{F1F8}", self.theme.danger_color),
            "arrow-up-right" => ("↗", "\u{F08E}", self.theme.action_color),
            "" => (" ", " ", self.theme.file_color),
            _ => ("📄", "\u{F15B}", self.theme.file_color),
        };
        let symbol = match self.mode {
            IconMode::Emoji => emoji,
            IconMode::NerdFont => nerd,
        };
        Span::styled(symbol, Style::default().fg(color))
    }
}
