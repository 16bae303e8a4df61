//! Audio settings
//!
//! The settings sub-record of the persisted profile. The crate only
//! stores and validates these; actually driving a mixer is the host's
//! job, via the `effective_*` helpers.

use serde::{Deserialize, Serialize};

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Hard mute overriding every channel
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            music_volume: 0.7,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Clamp all volumes into [0, 1]. Profiles are external data; an
    /// edited or corrupt file must not push gain past unity.
    pub fn clamped(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Gain the music channel should actually play at
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Gain the effects channel should actually play at
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_silences_every_channel() {
        let mut settings = Settings::default();
        settings.muted = true;
        assert_eq!(settings.effective_music_volume(), 0.0);
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_effective_volume_scales_by_master() {
        let settings = Settings {
            master_volume: 0.5,
            music_volume: 0.5,
            sfx_volume: 1.0,
            muted: false,
        };
        assert_eq!(settings.effective_music_volume(), 0.25);
        assert_eq!(settings.effective_sfx_volume(), 0.5);
    }

    #[test]
    fn test_clamped_repairs_out_of_range_values() {
        let settings = Settings {
            master_volume: 3.0,
            music_volume: -1.0,
            sfx_volume: 0.4,
            muted: false,
        }
        .clamped();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.music_volume, 0.0);
        assert_eq!(settings.sfx_volume, 0.4);
    }
}
