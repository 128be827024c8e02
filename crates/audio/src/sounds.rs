//! Sound effect definitions.

use serde::{Deserialize, Serialize};

/// Identifiers for sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundId {
    // Block sounds
    /// Block being broken
    BlockBreak,
    /// Block being placed
    BlockPlace,
    /// Crop being harvested
    CropBreak,
    /// Seed being planted
    CropPlant,

    // Tool sounds
    /// Tilling soil with a hoe
    HoeTill,

    // UI sounds
    /// Picking up an item
    ItemPickup,
}

impl SoundId {
    /// Get the relative file path for this sound effect.
    pub fn file_path(&self) -> &'static str {
        match self {
            SoundId::BlockBreak => "sounds/block/break.wav",
            SoundId::BlockPlace => "sounds/block/place.wav",
            SoundId::CropBreak => "sounds/block/crop_break.wav",
            SoundId::CropPlant => "sounds/item/crop_plant.wav",
            SoundId::HoeTill => "sounds/item/hoe_till.wav",
            SoundId::ItemPickup => "sounds/ui/item_pickup.wav",
        }
    }

    /// Get the default volume for this sound (0.0 to 1.0).
    pub fn default_volume(&self) -> f32 {
        match self {
            SoundId::ItemPickup => 0.5,
            _ => 1.0,
        }
    }

    /// Whether this sound should use 3D positional audio.
    pub fn is_positional(&self) -> bool {
        // Pickups play at the listener
        !matches!(self, SoundId::ItemPickup)
    }
}

/// A sound to be played at a world position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundEvent {
    /// Which sound to play.
    pub sound: SoundId,
    /// World-space position of the emitter.
    pub position: [f64; 3],
    /// Volume multiplier (1.0 = default).
    pub volume: f32,
    /// Pitch multiplier (1.0 = unchanged).
    pub pitch: f32,
}

impl SoundEvent {
    /// Sound at `position` with its default volume and unchanged pitch.
    pub fn at(sound: SoundId, position: [f64; 3]) -> Self {
        Self {
            sound,
            position,
            volume: sound.default_volume(),
            pitch: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_break_properties() {
        let id = SoundId::CropBreak;
        assert!(id.file_path().ends_with("crop_break.wav"));
        assert!(id.is_positional());
        assert_eq!(id.default_volume(), 1.0);
    }

    #[test]
    fn test_sound_event_defaults() {
        let event = SoundEvent::at(SoundId::CropBreak, [0.5, 64.0, 0.5]);
        assert_eq!(event.volume, 1.0);
        assert_eq!(event.pitch, 1.0);
        assert_eq!(event.position, [0.5, 64.0, 0.5]);
    }
}
