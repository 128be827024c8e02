//! Audio identifiers for autoharvest.
//!
//! The host runtime owns playback; this crate only names sounds and describes
//! where they should play.
//!
//! - [`SoundId`] - Identifier for sound effects
//! - [`SoundEvent`] - A sound at a world position with volume and pitch

mod sounds;

pub use sounds::{SoundEvent, SoundId};
