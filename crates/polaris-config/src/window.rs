use serde::{Deserialize, Serialize};

fn default_title() -> String {
    "Polaris - Language, illuminated".to_string()
}

fn default_panel_width() -> u32 {
    500
}

fn default_panel_height() -> u32 {
    650
}

fn default_margin() -> u32 {
    20
}

fn default_min_height() -> u32 {
    400
}

fn default_max_height() -> u32 {
    900
}

fn default_content_padding() -> u32 {
    50
}

fn default_bubble_min_width() -> u32 {
    240
}

fn default_bubble_max_width() -> u32 {
    480
}

fn default_bubble_gap() -> u32 {
    8
}

fn default_min_selection() -> u32 {
    4
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_panel_width")]
    pub panel_width: u32,
    #[serde(default = "default_panel_height")]
    pub panel_height: u32,
    /// Distance of the panel from the top-right corner of the work area
    #[serde(default = "default_margin")]
    pub margin: u32,
    #[serde(default = "default_min_height")]
    pub min_height: u32,
    #[serde(default = "default_max_height")]
    pub max_height: u32,
    /// Added to the measured content height when fitting the panel
    #[serde(default = "default_content_padding")]
    pub content_padding: u32,
    #[serde(default = "default_bubble_min_width")]
    pub bubble_min_width: u32,
    #[serde(default = "default_bubble_max_width")]
    pub bubble_max_width: u32,
    #[serde(default = "default_bubble_gap")]
    pub bubble_gap: u32,
    /// Selections smaller than this (logical px, either side) are discarded
    #[serde(default = "default_min_selection")]
    pub min_selection: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            panel_width: default_panel_width(),
            panel_height: default_panel_height(),
            margin: default_margin(),
            min_height: default_min_height(),
            max_height: default_max_height(),
            content_padding: default_content_padding(),
            bubble_min_width: default_bubble_min_width(),
            bubble_max_width: default_bubble_max_width(),
            bubble_gap: default_bubble_gap(),
            min_selection: default_min_selection(),
        }
    }
}
