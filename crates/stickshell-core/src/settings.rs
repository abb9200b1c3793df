//! Persisted user settings abstraction.

/// Backlight brightness step, 0 (off) through 15 (full).
pub const BRIGHTNESS_MAX: u8 = 15;

/// Step used when nothing has been persisted yet.
pub const BRIGHTNESS_DEFAULT: u8 = 8;

/// User-tunable settings that should survive reboot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PersistedSettings {
    pub brightness: u8,
}

impl PersistedSettings {
    pub const fn new(brightness: u8) -> Self {
        Self { brightness }
    }
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self::new(BRIGHTNESS_DEFAULT)
    }
}

/// Abstract settings persistence backend.
pub trait SettingsStore {
    type Error;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error>;
    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}
