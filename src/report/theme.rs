//! Dashboard Theme
//!
//! Colours, spacing and fonts for the page, the cards and the charts.
//! Every field can be overridden from the `[theme]` table of the config file.

use serde::{Deserialize, Serialize};

/// Qualitative palette used for student performance bars
pub const PALETTE_SET1: [&str; 9] = [
    "#E41A1C", "#377EB8", "#4DAF4A", "#984EA3", "#FF7F00", "#FFFF33", "#A65628", "#F781BF",
    "#999999",
];

/// Qualitative palette used for subject performance bars
pub const PALETTE_SET2: [&str; 8] = [
    "#66C2A5", "#FC8D62", "#8DA0CB", "#E78AC3", "#A6D854", "#FFD92F", "#E5C494", "#B3B3B3",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Theme {
    pub font_family: String,
    pub page_background: String,
    pub heading_color: String,
    pub sidebar_background: String,

    pub card_background: String,
    pub card_text: String,
    pub card_padding_px: u32,
    pub card_radius_px: u32,
    pub card_margin_px: u32,
    pub card_shadow: String,
    pub card_image_width_px: u32,

    pub chart: ChartTheme,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font_family: "Arial, sans-serif".to_string(),
            page_background: "#f9f9f9".to_string(),
            heading_color: "#000000".to_string(),
            sidebar_background: "#f0f2f6".to_string(),
            card_background: "#000000".to_string(),
            card_text: "#ffffff".to_string(),
            card_padding_px: 15,
            card_radius_px: 10,
            card_margin_px: 15,
            card_shadow: "5px 5px 10px rgba(0, 0, 0, 0.3)".to_string(),
            card_image_width_px: 120,
            chart: ChartTheme::default(),
        }
    }
}

impl Theme {
    /// Inline style for one student card
    pub fn card_style(&self) -> String {
        format!(
            "background-color: {}; color: {}; padding: {}px; border-radius: {}px; \
             margin: {}px; box-shadow: {}; text-align: center; font-family: {};",
            self.card_background,
            self.card_text,
            self.card_padding_px,
            self.card_radius_px,
            self.card_margin_px,
            self.card_shadow,
            self.font_family,
        )
    }
}

/// Chart layout settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartTheme {
    pub width: u32,
    pub height: u32,
    pub title_font_size: u32,
    pub title_color: String,
    pub tick_font_size: u32,
    pub margin: Margins,
    pub plot_background: String,
    pub paper_background: String,
    pub grid_color: String,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            title_font_size: 22,
            title_color: "#000000".to_string(),
            tick_font_size: 12,
            margin: Margins::uniform(40),
            plot_background: "#ffffff".to_string(),
            paper_background: "#f9f9f9".to_string(),
            grid_color: "#ebebeb".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Margins {
    pub fn uniform(size: u32) -> Self {
        Self {
            left: size,
            right: size,
            top: size,
            bottom: size,
        }
    }
}
