//! Board rendering for the Othello GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};

use crate::board::{Piece, Player, Pos, BOARD_SIZE};
use crate::GameState;

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell if it is a legal move
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        position: &GameState,
        last_move: Option<Pos>,
        suggested_move: Option<Pos>,
        show_hints: bool,
        interactive: bool,
    ) -> Option<Pos> {
        let available_size = ui.available_size();

        // Calculate board size to fit available space
        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / BOARD_SIZE as f32;

        let (response, painter) =
            ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());

        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BORDER);
        painter.rect_filled(self.play_area(), CornerRadius::ZERO, BOARD_BG);

        self.draw_grid(&painter);
        self.draw_star_points(&painter);
        self.draw_coordinates(&painter);
        self.draw_discs(&painter, position);

        if let Some(pos) = last_move {
            self.draw_last_move_marker(&painter, pos);
        }

        if show_hints && interactive {
            for mv in position.valid_moves() {
                self.draw_hint(&painter, mv.at);
            }
        }

        if let Some(pos) = suggested_move {
            self.draw_suggestion(&painter, pos, position.next());
        }

        // Handle hover preview and click
        let mut clicked_pos = None;

        if interactive {
            if let Some(pointer_pos) = response.hover_pos() {
                if let Some(board_pos) = self.screen_to_board(pointer_pos) {
                    let is_valid = position.legal_move(board_pos);
                    self.draw_hover_preview(&painter, board_pos, position.next(), is_valid);

                    if response.clicked() && is_valid {
                        clicked_pos = Some(board_pos);
                    }
                }
            }
        }

        clicked_pos
    }

    fn play_area(&self) -> Rect {
        Rect::from_min_size(
            self.board_rect.min + Vec2::splat(BOARD_MARGIN),
            Vec2::splat(self.cell_size * BOARD_SIZE as f32),
        )
    }

    /// Draw the lines between cells
    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let area = self.play_area();

        for i in 0..=BOARD_SIZE {
            let offset = i as f32 * self.cell_size;

            painter.line_segment(
                [
                    Pos2::new(area.min.x + offset, area.min.y),
                    Pos2::new(area.min.x + offset, area.max.y),
                ],
                stroke,
            );
            painter.line_segment(
                [
                    Pos2::new(area.min.x, area.min.y + offset),
                    Pos2::new(area.max.x, area.min.y + offset),
                ],
                stroke,
            );
        }
    }

    fn draw_star_points(&self, painter: &Painter) {
        for (x, y) in STAR_POINTS {
            let corner = self.cell_rect(Pos::new(x, y)).min;
            painter.circle_filled(corner, STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// Draw coordinate labels (A-H, 1-8)
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(14.0);
        let half = BOARD_MARGIN * 0.5;

        for i in 1..=BOARD_SIZE as u8 {
            let column = self.cell_rect(Pos::new(i, 1)).center().x;
            let letter = ((b'A' + i - 1) as char).to_string();
            for y in [self.board_rect.min.y + half, self.board_rect.max.y - half] {
                painter.text(
                    Pos2::new(column, y),
                    egui::Align2::CENTER_CENTER,
                    &letter,
                    font.clone(),
                    LABEL,
                );
            }

            let row = self.cell_rect(Pos::new(1, i)).center().y;
            for x in [self.board_rect.min.x + half, self.board_rect.max.x - half] {
                painter.text(
                    Pos2::new(x, row),
                    egui::Align2::CENTER_CENTER,
                    i.to_string(),
                    font.clone(),
                    LABEL,
                );
            }
        }
    }

    fn draw_discs(&self, painter: &Painter, position: &GameState) {
        for player in [Player::Black, Player::White] {
            for pos in position.board().discs(player).iter_ones() {
                self.draw_disc(painter, pos, player.piece());
            }
        }
    }

    /// Draw a single disc with a shadow and highlight
    fn draw_disc(&self, painter: &Painter, pos: Pos, piece: Piece) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * DISC_RADIUS_RATIO;
        let shadow_offset = Vec2::new(2.0, 2.0);

        match piece {
            Piece::Black => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 70),
                );
                painter.circle_filled(center, radius, BLACK_DISC);
                painter.circle_filled(
                    center + Vec2::splat(-radius * 0.3),
                    radius * 0.2,
                    BLACK_DISC_HIGHLIGHT,
                );
            }
            Piece::White => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 50),
                );
                painter.circle_filled(center, radius, WHITE_DISC);
                painter.circle_stroke(
                    center,
                    radius * 0.85,
                    Stroke::new(radius * 0.1, WHITE_DISC_SHADOW),
                );
            }
            Piece::Empty => {}
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        painter.circle_filled(
            self.board_to_screen(pos),
            LAST_MOVE_MARKER_RADIUS,
            LAST_MOVE_MARKER,
        );
    }

    /// Small dot on each legal destination
    fn draw_hint(&self, painter: &Painter, pos: Pos) {
        painter.circle_filled(
            self.board_to_screen(pos),
            self.cell_size * HINT_RADIUS_RATIO,
            legal_hint(),
        );
    }

    fn draw_suggestion(&self, painter: &Painter, pos: Pos, turn: Player) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * DISC_RADIUS_RATIO;

        let (fill, text) = match turn {
            Player::Black => (Color32::from_rgba_unmultiplied(20, 20, 20, 100), WHITE_DISC),
            Player::White => (Color32::from_rgba_unmultiplied(240, 240, 240, 100), BLACK_DISC),
        };

        painter.circle_filled(center, radius, fill);
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "?",
            egui::FontId::proportional(16.0),
            text,
        );
    }

    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, turn: Player, is_valid: bool) {
        if is_valid {
            let color = match turn {
                Player::Black => Color32::from_rgba_unmultiplied(20, 20, 20, 90),
                Player::White => Color32::from_rgba_unmultiplied(240, 240, 240, 90),
            };
            painter.circle_filled(
                self.board_to_screen(pos),
                self.cell_size * DISC_RADIUS_RATIO,
                color,
            );
        } else {
            painter.rect_stroke(
                self.cell_rect(pos).shrink(2.0),
                CornerRadius::ZERO,
                Stroke::new(2.0, hover_invalid()),
                StrokeKind::Inside,
            );
        }
    }

    fn cell_rect(&self, pos: Pos) -> Rect {
        let min = self.board_rect.min
            + Vec2::splat(BOARD_MARGIN)
            + Vec2::new(
                f32::from(pos.x() - 1) * self.cell_size,
                f32::from(pos.y() - 1) * self.cell_size,
            );
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min - Vec2::splat(BOARD_MARGIN);
        let x = (relative.x / self.cell_size).floor() as i32 + 1;
        let y = (relative.y / self.cell_size).floor() as i32 + 1;
        Pos::try_new(x, y)
    }

    /// Centre of a cell in screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        self.cell_rect(pos).center()
    }
}
