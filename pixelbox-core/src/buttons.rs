//! Virtual button strip
//!
//! The strip is divided into `button_count` equal buckets along the
//! panel's Y axis. Each bucket uses closed bounds on both ends, so a
//! touch exactly on a boundary matches two buckets; the buckets are
//! checked in order and the later (higher) one wins.
//!
//! Each button owns a short run of indicator cells along the last grid
//! row (or the last column, when transposed) that lights up in the
//! button's color while it is selected.

use crate::color::Color;
use crate::config::{Action, ButtonConfig, ButtonTable, GridGeometry, PainterConfig, MAX_BUTTONS};
use crate::framebuffer::FrameBuffer;
use crate::mapping::Cell;

/// A button selection that was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Selection {
    /// Button index
    pub button: u8,
    /// Action that was performed
    pub action: Action,
}

/// Button strip state and action dispatch
#[derive(Debug, Clone)]
pub struct ButtonController {
    geometry: GridGeometry,
    buttons: ButtonTable,
    selected_color: Color,
    selected_button: Option<u8>,
    prev_selected_button: Option<u8>,
    snapshot_button: Option<u8>,
}

impl ButtonController {
    /// Create a controller with white selected and no button lit
    pub fn new(config: &PainterConfig) -> Self {
        let count = (config.grid.button_count as usize).min(MAX_BUTTONS);
        let buttons: ButtonTable = (0..count as u8).map(|i| config.button(i)).collect();

        Self {
            geometry: config.grid,
            buttons,
            selected_color: Color::WHITE,
            selected_button: None,
            prev_selected_button: None,
            snapshot_button: None,
        }
    }

    /// Remember which indicator is lit in the undo snapshot
    ///
    /// Call whenever the frame buffer takes a snapshot.
    pub fn mark_snapshot(&mut self) {
        self.snapshot_button = self.selected_button;
    }

    /// Color new strokes paint with
    pub fn selected_color(&self) -> Color {
        self.selected_color
    }

    /// Currently selected button
    pub fn selected_button(&self) -> Option<u8> {
        self.selected_button
    }

    /// Button selected before the current one
    pub fn prev_selected_button(&self) -> Option<u8> {
        self.prev_selected_button
    }

    /// Configuration of a button
    pub fn button(&self, index: u8) -> Option<&ButtonConfig> {
        self.buttons.get(index as usize)
    }

    /// Number of buttons on the strip
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Strip has no buttons
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Button bucket containing panel coordinate `y`
    ///
    /// Bucket `i` spans `[i * h / n, (i + 1) * h / n]`, bounds included.
    /// Every bucket is checked and the last match wins.
    pub fn bucket_for(&self, y: i32) -> Option<u8> {
        let n = self.buttons.len() as i64;
        let h = i64::from(self.geometry.touch_height);
        let scaled = i64::from(y) * n;

        let mut selected = None;
        for i in 0..n {
            if scaled >= i * h && scaled <= (i + 1) * h {
                selected = Some(i as u8);
            }
        }
        selected
    }

    /// Select the button under `y`
    ///
    /// `fresh` is true when the strip was just touched; while the strip
    /// stays held, re-selecting the current button does nothing.
    pub fn press_at(&mut self, y: i32, fresh: bool, fb: &mut FrameBuffer) -> Option<Selection> {
        let button = self.bucket_for(y)?;
        self.select(button, fresh, fb)
    }

    /// Select a button and apply its action to the buffer
    ///
    /// Only the buffer is touched; the caller commits it with a full
    /// redraw.
    pub fn select(&mut self, button: u8, fresh: bool, fb: &mut FrameBuffer) -> Option<Selection> {
        let config = *self.buttons.get(button as usize)?;
        if !fresh && self.selected_button == Some(button) {
            return None;
        }

        // Indicator currently lit in the buffer
        let mut lit = self.selected_button;
        self.prev_selected_button = self.selected_button;
        self.selected_button = Some(button);

        match config.action {
            Action::Clear => fb.fill(Color::BLACK),
            Action::Undo => {
                if fb.restore() {
                    lit = self.snapshot_button;
                }
            }
            Action::Erase => self.selected_color = Color::BLACK,
            Action::SetColor(color) => self.selected_color = color,
            Action::Unassigned => {}
        }

        if let Some(lit) = lit {
            if lit != button {
                self.light(lit, Color::BLACK, fb);
            }
        }
        self.light(button, config.indicator_color(), fb);

        Some(Selection {
            button,
            action: config.action,
        })
    }

    /// Cells making up a button's indicator
    pub fn indicator_cells(&self, button: u8) -> impl Iterator<Item = Cell> {
        let g = self.geometry;
        let count = self.buttons.len().max(1) as u16;
        let axis = if g.indicators_transposed { g.rows } else { g.cols };
        let span = axis / count;
        let start = u16::from(button) * span;

        (start..start + span).map(move |i| {
            if g.indicators_transposed {
                Cell::new(i, g.cols - 1)
            } else {
                Cell::new(g.rows - 1, i)
            }
        })
    }

    fn light(&self, button: u8, color: Color, fb: &mut FrameBuffer) {
        for cell in self.indicator_cells(button) {
            fb.set(cell, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (ButtonController, FrameBuffer) {
        let config = PainterConfig::default();
        (
            ButtonController::new(&config),
            FrameBuffer::new(16, 16).unwrap(),
        )
    }

    #[test]
    fn test_buckets() {
        let (buttons, _) = setup();
        assert_eq!(buttons.bucket_for(0), Some(0));
        assert_eq!(buttons.bucket_for(50), Some(0));
        assert_eq!(buttons.bucket_for(97), Some(1));
        assert_eq!(buttons.bucket_for(767), Some(7));
        assert_eq!(buttons.bucket_for(768), Some(7));
    }

    #[test]
    fn test_boundary_resolves_to_higher_bucket() {
        let (buttons, _) = setup();
        // 768 / 8 = 96 is the upper bound of bucket 0 and the lower bound of bucket 1
        assert_eq!(buttons.bucket_for(96), Some(1));
        assert_eq!(buttons.bucket_for(95), Some(0));
        assert_eq!(buttons.bucket_for(192), Some(2));
    }

    #[test]
    fn test_out_of_strip() {
        let (buttons, _) = setup();
        assert_eq!(buttons.bucket_for(769), None);
        assert_eq!(buttons.bucket_for(-1), None);
    }

    #[test]
    fn test_color_selection_lights_indicator() {
        let (mut buttons, mut fb) = setup();

        let selection = buttons.select(4, true, &mut fb).unwrap();
        assert_eq!(selection.action, Action::SetColor(Color::RED));
        assert_eq!(buttons.selected_color(), Color::RED);

        // Button 4 owns cells 8 and 9 of the last row
        assert_eq!(fb.get(Cell::new(15, 8)), Some(Color::RED));
        assert_eq!(fb.get(Cell::new(15, 9)), Some(Color::RED));
        assert_eq!(fb.lit_count(), 2);
    }

    #[test]
    fn test_selection_change_clears_previous_indicator() {
        let (mut buttons, mut fb) = setup();
        buttons.select(4, true, &mut fb);
        buttons.select(5, true, &mut fb);

        assert_eq!(buttons.prev_selected_button(), Some(4));
        assert_eq!(fb.get(Cell::new(15, 8)), Some(Color::BLACK));
        assert_eq!(fb.get(Cell::new(15, 10)), Some(Color::GREEN));
        assert_eq!(fb.lit_count(), 2);
    }

    #[test]
    fn test_held_same_button_is_noop() {
        let (mut buttons, mut fb) = setup();
        assert!(buttons.select(3, true, &mut fb).is_some());
        assert!(buttons.select(3, false, &mut fb).is_none());
        // A fresh press repeats the action
        assert!(buttons.select(3, true, &mut fb).is_some());
    }

    #[test]
    fn test_clear_keeps_own_indicator() {
        let (mut buttons, mut fb) = setup();
        fb.fill(Color::BLUE);

        buttons.select(0, true, &mut fb);

        assert_eq!(fb.lit_count(), 2);
        assert_eq!(fb.get(Cell::new(15, 0)), Some(Color::WHITE));
        assert_eq!(fb.get(Cell::new(15, 1)), Some(Color::WHITE));
    }

    #[test]
    fn test_erase_selects_black() {
        let (mut buttons, mut fb) = setup();
        buttons.select(2, true, &mut fb);
        assert_eq!(buttons.selected_color(), Color::BLACK);
        // Erase still shows a visible indicator
        assert_eq!(fb.get(Cell::new(15, 4)), Some(Color::WHITE));
    }

    #[test]
    fn test_undo_restores_and_relights() {
        let (mut buttons, mut fb) = setup();
        buttons.select(5, true, &mut fb); // green lit at 10..12
        fb.snapshot();
        buttons.mark_snapshot();
        fb.set(Cell::new(0, 0), Color::GREEN);
        buttons.select(6, true, &mut fb); // blue lit at 12..14

        buttons.select(1, true, &mut fb);

        assert_eq!(fb.get(Cell::new(0, 0)), Some(Color::BLACK));
        // Neither the snapshot's indicator nor the later one survives
        assert_eq!(fb.get(Cell::new(15, 10)), Some(Color::BLACK));
        assert_eq!(fb.get(Cell::new(15, 12)), Some(Color::BLACK));
        assert_eq!(fb.get(Cell::new(15, 2)), Some(Color::WHITE));
        assert_eq!(fb.lit_count(), 2);
        // Color is unchanged by undo
        assert_eq!(buttons.selected_color(), Color::BLUE);
    }

    #[test]
    fn test_undo_keeps_paint_on_indicator_row() {
        let (mut buttons, mut fb) = setup();
        fb.set(Cell::new(15, 0), Color::WHITE);
        fb.set(Cell::new(15, 6), Color::WHITE);
        fb.snapshot();
        buttons.mark_snapshot();
        fb.set(Cell::new(0, 0), Color::WHITE);

        buttons.select(1, true, &mut fb);

        assert_eq!(fb.get(Cell::new(0, 0)), Some(Color::BLACK));
        assert_eq!(fb.get(Cell::new(15, 0)), Some(Color::WHITE));
        assert_eq!(fb.get(Cell::new(15, 6)), Some(Color::WHITE));
        assert_eq!(fb.get(Cell::new(15, 2)), Some(Color::WHITE));
        assert_eq!(fb.lit_count(), 4);
    }

    #[test]
    fn test_undo_without_snapshot_clears_previous_indicator() {
        let (mut buttons, mut fb) = setup();
        buttons.select(4, true, &mut fb);

        buttons.select(1, true, &mut fb);

        assert_eq!(fb.get(Cell::new(15, 8)), Some(Color::BLACK));
        assert_eq!(fb.get(Cell::new(15, 2)), Some(Color::WHITE));
        assert_eq!(fb.lit_count(), 2);
    }

    #[test]
    fn test_transposed_indicators() {
        let mut config = PainterConfig::default();
        config.grid.indicators_transposed = true;
        let buttons = ButtonController::new(&config);

        let cells: std::vec::Vec<Cell> = buttons.indicator_cells(7).collect();
        assert_eq!(cells, [Cell::new(14, 15), Cell::new(15, 15)]);
    }

    #[test]
    fn test_unassigned_buttons_padded() {
        let mut config = PainterConfig::default();
        config.buttons.truncate(3);
        let mut buttons = ButtonController::new(&config);
        let mut fb = FrameBuffer::new(16, 16).unwrap();

        assert_eq!(buttons.len(), 8);
        let selection = buttons.press_at(700, true, &mut fb).unwrap();
        assert_eq!(selection.action, Action::Unassigned);
        assert_eq!(buttons.selected_color(), Color::WHITE);
    }
}
