//! Interaction state
//!
//! Everything the event loop mutates between touches. The held flags and
//! last cell live in the [`RegionArbiter`]; color and button selection live
//! in the [`ButtonController`](crate::buttons::ButtonController).
//! [`InteractionState`] is the combined read-only view.

pub mod arbiter;

pub use arbiter::{Region, RegionArbiter, RegionLayout, Transition};

use crate::color::Color;
use crate::mapping::Cell;

/// Snapshot of the loop's interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InteractionState {
    /// Canvas is held
    pub touch_held: bool,
    /// Button strip is held
    pub button_held: bool,
    /// Color new strokes paint with
    pub selected_color: Color,
    /// Currently selected button
    pub selected_button: Option<u8>,
    /// Button selected before the current one
    pub prev_selected_button: Option<u8>,
    /// Last painted cell of the current stroke
    pub last_cell: Option<Cell>,
}
