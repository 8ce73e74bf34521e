//! Pixelbox Touch Event Protocol
//!
//! This crate defines the input side of the Pixelbox painter: the raw
//! field updates a multi-touch panel reports, and the reducer that folds
//! them into discrete touch samples.
//!
//! # Protocol Overview
//!
//! A touch panel reports one field at a time and closes each sample with
//! a sync marker:
//! ```text
//! TRACKING_ID 4 │ POSITION_X 312 │ POSITION_Y 90 │ KEY_TOUCH 1 │ SYNC
//! ```
//!
//! Fields persist between samples until the contact lifts, so a sample
//! may carry only the fields that changed. The reader keeps the most
//! recent value of each field and emits one [`TouchFrame`] per sync.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod events;
pub mod reader;

pub use events::{FieldEvent, TouchFrame, LIFTOFF_TRACKING_ID};
pub use reader::{Contact, EventStreamReader};
