//! Theme constants for the Othello GUI

use egui::Color32;

// Board colors - green felt
pub const BOARD_BG: Color32 = Color32::from_rgb(0, 110, 60);
pub const BOARD_BORDER: Color32 = Color32::from_rgb(20, 60, 35);
pub const GRID_LINE: Color32 = Color32::from_rgb(10, 50, 25);
pub const STAR_POINT: Color32 = Color32::from_rgb(10, 50, 25);
pub const LABEL: Color32 = Color32::from_rgb(220, 235, 225);

// Disc colors
pub const BLACK_DISC: Color32 = Color32::from_rgb(25, 25, 30);
pub const BLACK_DISC_HIGHLIGHT: Color32 = Color32::from_rgb(70, 70, 80);
pub const WHITE_DISC: Color32 = Color32::from_rgb(250, 250, 252);
pub const WHITE_DISC_SHADOW: Color32 = Color32::from_rgb(190, 190, 195);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);

pub fn legal_hint() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, 45)
}

pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 70)
}

// Panel text
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 30.0;
pub const DISC_RADIUS_RATIO: f32 = 0.42;
pub const STAR_POINT_RADIUS: f32 = 4.0;
pub const GRID_LINE_WIDTH: f32 = 1.5;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 5.0;
pub const HINT_RADIUS_RATIO: f32 = 0.12;

/// Grid intersections marked with a dot, as (x, y) of the cell to the lower right
pub const STAR_POINTS: [(u8, u8); 4] = [(3, 3), (7, 3), (3, 7), (7, 7)];
