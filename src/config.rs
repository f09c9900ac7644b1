use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Vault directory used when none is given on the command line
    #[serde(default)]
    pub vault: Option<String>,
    #[serde(default = "default_icon_mode")]
    pub icon_mode: String,
    #[serde(default)]
    pub show_unsupported_files: bool,
    #[serde(default = "default_true")]
    pub auto_preview: bool,
    /// How far a cascaded menu may overlap its target, in cells
    #[serde(default = "default_h_overlap")]
    pub h_overlap: i32,
    #[serde(default)]
    pub v_overlap: i32,
    #[serde(default)]
    pub ignore: Vec<String>,
    #[serde(default = "default_preview_width")]
    pub preview_width: i32,
    #[serde(default = "default_preview_height")]
    pub preview_height: i32,
    /// External program for "Open in default app" and reveal
    #[serde(default)]
    pub open_command: Option<String>,
    /// Whether the file explorer features (new folder, move, reveal) are on
    #[serde(default = "default_true")]
    pub file_explorer: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault: None,
            icon_mode: default_icon_mode(),
            show_unsupported_files: false,
            auto_preview: true,
            h_overlap: default_h_overlap(),
            v_overlap: 0,
            ignore: Vec::new(),
            preview_width: default_preview_width(),
            preview_height: default_preview_height(),
            open_command: None,
            file_explorer: true,
        }
    }
}

fn default_icon_mode() -> String {
    "nerdfont".to_string()
}

fn default_true() -> bool {
    true
}

fn default_h_overlap() -> i32 {
    2
}

fn default_preview_width() -> i32 {
    60
}

fn default_preview_height() -> i32 {
    20
}
