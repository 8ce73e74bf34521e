//! Field updates reported by the touch panel

/// Tracking id a multi-touch panel reports when the contact lifts
pub const LIFTOFF_TRACKING_ID: i32 = -1;

// Linux input event types
const EV_SYN: u16 = 0x00;
const EV_KEY: u16 = 0x01;
const EV_ABS: u16 = 0x03;

// Linux input event codes
const SYN_REPORT: u16 = 0x00;
const BTN_TOUCH: u16 = 0x14a;
const ABS_X: u16 = 0x00;
const ABS_Y: u16 = 0x01;
const ABS_MT_POSITION_X: u16 = 0x35;
const ABS_MT_POSITION_Y: u16 = 0x36;
const ABS_MT_TRACKING_ID: u16 = 0x39;

/// A single field update from the touch panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldEvent {
    /// Raw X coordinate of the contact
    PositionX(i32),
    /// Raw Y coordinate of the contact
    PositionY(i32),
    /// Contact tracking id (`-1` on liftoff)
    TrackingId(i32),
    /// Touch key pressed or released
    KeyTouch(bool),
    /// End of the current sample
    FrameSync,
}

impl FieldEvent {
    /// Translate a Linux `input_event` triple
    ///
    /// Returns `None` for event types and codes the painter ignores
    /// (pressure, touch major, `SYN_MT_REPORT`, misc scan codes, ...).
    /// Single-touch `ABS_X`/`ABS_Y` are accepted as positions.
    pub fn from_raw(event_type: u16, code: u16, value: i32) -> Option<Self> {
        match (event_type, code) {
            (EV_ABS, ABS_MT_POSITION_X) | (EV_ABS, ABS_X) => Some(FieldEvent::PositionX(value)),
            (EV_ABS, ABS_MT_POSITION_Y) | (EV_ABS, ABS_Y) => Some(FieldEvent::PositionY(value)),
            (EV_ABS, ABS_MT_TRACKING_ID) => Some(FieldEvent::TrackingId(value)),
            (EV_KEY, BTN_TOUCH) => Some(FieldEvent::KeyTouch(value != 0)),
            (EV_SYN, SYN_REPORT) => Some(FieldEvent::FrameSync),
            _ => None,
        }
    }

    /// Returns true if this event closes a sample
    pub fn is_sync(&self) -> bool {
        matches!(self, FieldEvent::FrameSync)
    }

    /// Returns true if this event reports a liftoff
    pub fn is_liftoff(&self) -> bool {
        matches!(
            self,
            FieldEvent::TrackingId(LIFTOFF_TRACKING_ID) | FieldEvent::KeyTouch(false)
        )
    }
}

/// One completed touch sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchFrame {
    /// Raw X coordinate
    pub x: i32,
    /// Raw Y coordinate
    pub y: i32,
    /// Tracking id of the contact, or `-1` if the panel never reported one
    pub tracking_id: i32,
    /// Contact is still on the panel
    pub down: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_multitouch() {
        assert_eq!(
            FieldEvent::from_raw(EV_ABS, ABS_MT_POSITION_X, 120),
            Some(FieldEvent::PositionX(120))
        );
        assert_eq!(
            FieldEvent::from_raw(EV_ABS, ABS_MT_POSITION_Y, 44),
            Some(FieldEvent::PositionY(44))
        );
        assert_eq!(
            FieldEvent::from_raw(EV_ABS, ABS_MT_TRACKING_ID, -1),
            Some(FieldEvent::TrackingId(LIFTOFF_TRACKING_ID))
        );
        assert_eq!(
            FieldEvent::from_raw(EV_SYN, SYN_REPORT, 0),
            Some(FieldEvent::FrameSync)
        );
    }

    #[test]
    fn test_from_raw_single_touch() {
        assert_eq!(
            FieldEvent::from_raw(EV_ABS, ABS_X, 7),
            Some(FieldEvent::PositionX(7))
        );
        assert_eq!(
            FieldEvent::from_raw(EV_KEY, BTN_TOUCH, 1),
            Some(FieldEvent::KeyTouch(true))
        );
        assert_eq!(
            FieldEvent::from_raw(EV_KEY, BTN_TOUCH, 0),
            Some(FieldEvent::KeyTouch(false))
        );
    }

    #[test]
    fn test_from_raw_ignored() {
        // ABS_MT_PRESSURE
        assert!(FieldEvent::from_raw(EV_ABS, 0x3a, 30).is_none());
        // SYN_MT_REPORT
        assert!(FieldEvent::from_raw(EV_SYN, 0x02, 0).is_none());
        // EV_MSC
        assert!(FieldEvent::from_raw(0x04, 0x04, 9).is_none());
    }

    #[test]
    fn test_is_liftoff() {
        assert!(FieldEvent::TrackingId(-1).is_liftoff());
        assert!(FieldEvent::KeyTouch(false).is_liftoff());
        assert!(!FieldEvent::TrackingId(3).is_liftoff());
        assert!(!FieldEvent::PositionX(0).is_liftoff());
    }
}
