//! Brightness persistence in the last sector of a data partition.
//!
//! One fixed-size record, rewritten in place on every save. The record is
//! three flash words: magic + version, the brightness payload, and a
//! checksum over everything before it.

use embedded_storage::{ReadStorage, Storage};
use esp_bootloader_esp_idf::partitions::{
    DataPartitionSubType, PARTITION_TABLE_MAX_LEN, PartitionType, read_partition_table,
};
use esp_rom_sys::rom::spiflash::{
    ESP_ROM_SPIFLASH_RESULT_OK, esp_rom_spiflash_erase_sector, esp_rom_spiflash_read,
    esp_rom_spiflash_unlock, esp_rom_spiflash_write,
};
use stickshell_core::settings::{BRIGHTNESS_MAX, PersistedSettings, SettingsStore};

const FLASH_SECTOR_SIZE: u32 = 4096;
const DEFAULT_FLASH_CAPACITY_BYTES: usize = 16 * 1024 * 1024;

const SETTINGS_MAGIC: u32 = 0x314B_5453; // "STK1"
const SETTINGS_VERSION: u8 = 1;
const SETTINGS_RECORD_LEN: usize = 12;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FlashSettingsError {
    PartitionTable,
    SettingsPartitionMissing,
    PartitionTooSmall,
    FlashOpFailed(i32),
    Corrupted,
    Unsupported,
}

#[derive(Debug)]
struct RawFlash;

impl RawFlash {
    fn new() -> Result<Self, FlashSettingsError> {
        let rc = unsafe { esp_rom_spiflash_unlock() };
        if rc != ESP_ROM_SPIFLASH_RESULT_OK {
            return Err(FlashSettingsError::FlashOpFailed(rc));
        }
        Ok(Self)
    }

    fn erase_sector(&mut self, sector_addr: u32) -> Result<(), FlashSettingsError> {
        if !sector_addr.is_multiple_of(FLASH_SECTOR_SIZE) {
            return Err(FlashSettingsError::Unsupported);
        }

        let rc = unsafe { esp_rom_spiflash_erase_sector(sector_addr / FLASH_SECTOR_SIZE) };
        if rc != ESP_ROM_SPIFLASH_RESULT_OK {
            return Err(FlashSettingsError::FlashOpFailed(rc));
        }
        Ok(())
    }

    fn read_word(&mut self, addr: u32) -> Result<u32, FlashSettingsError> {
        if !addr.is_multiple_of(4) {
            return Err(FlashSettingsError::Unsupported);
        }

        let mut word = 0u32;
        let rc = unsafe { esp_rom_spiflash_read(addr, &mut word as *mut u32 as *const u32, 4) };
        if rc != ESP_ROM_SPIFLASH_RESULT_OK {
            return Err(FlashSettingsError::FlashOpFailed(rc));
        }
        Ok(word)
    }

    fn write_word(&mut self, addr: u32, word: u32) -> Result<(), FlashSettingsError> {
        if !addr.is_multiple_of(4) {
            return Err(FlashSettingsError::Unsupported);
        }

        let rc = unsafe { esp_rom_spiflash_write(addr, &word as *const u32, 4) };
        if rc != ESP_ROM_SPIFLASH_RESULT_OK {
            return Err(FlashSettingsError::FlashOpFailed(rc));
        }
        Ok(())
    }

    /// Byte read at any offset, assembled from word reads.
    fn read_bytes(&mut self, addr: u32, out: &mut [u8]) -> Result<(), FlashSettingsError> {
        if out.is_empty() {
            return Ok(());
        }

        let lead = (addr % 4) as usize;
        let start = addr - lead as u32;
        let mut filled = 0usize;

        let mut word_addr = start;
        while filled < out.len() {
            let bytes = self.read_word(word_addr)?.to_le_bytes();
            let skip = if word_addr == start { lead } else { 0 };
            for b in &bytes[skip..] {
                if filled == out.len() {
                    break;
                }
                out[filled] = *b;
                filled += 1;
            }
            word_addr += 4;
        }
        Ok(())
    }

    /// Word-aligned write into freshly erased flash, padding the tail of
    /// the last word with erased bytes.
    fn write_erased_bytes(&mut self, addr: u32, data: &[u8]) -> Result<(), FlashSettingsError> {
        if !addr.is_multiple_of(4) {
            return Err(FlashSettingsError::Unsupported);
        }

        for (i, chunk) in data.chunks(4).enumerate() {
            let mut bytes = [0xFFu8; 4];
            bytes[..chunk.len()].copy_from_slice(chunk);
            self.write_word(addr + (i as u32) * 4, u32::from_le_bytes(bytes))?;
        }
        Ok(())
    }
}

impl ReadStorage for RawFlash {
    type Error = FlashSettingsError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        self.read_bytes(offset, bytes)
    }

    fn capacity(&self) -> usize {
        DEFAULT_FLASH_CAPACITY_BYTES
    }
}

impl Storage for RawFlash {
    fn write(&mut self, _offset: u32, _bytes: &[u8]) -> Result<(), Self::Error> {
        Err(FlashSettingsError::Unsupported)
    }
}

#[derive(Debug)]
pub struct FlashSettingsStore {
    flash: RawFlash,
    settings_sector_addr: u32,
}

impl FlashSettingsStore {
    /// Locates the settings sector from the partition table: the last
    /// sector of the first writable undefined data partition, falling back
    /// to NVS.
    pub fn new() -> Result<Self, FlashSettingsError> {
        let mut flash = RawFlash::new()?;

        let mut table_buf = [0u8; PARTITION_TABLE_MAX_LEN];
        let table = read_partition_table(&mut flash, &mut table_buf)
            .map_err(|_| FlashSettingsError::PartitionTable)?;

        let mut data_undefined: Option<(u32, u32)> = None;
        let mut fallback_nvs: Option<(u32, u32)> = None;

        for entry in table.iter() {
            if entry.is_read_only() || entry.len() < FLASH_SECTOR_SIZE {
                continue;
            }

            match entry.partition_type() {
                PartitionType::Data(DataPartitionSubType::Undefined) => {
                    data_undefined = Some((entry.offset(), entry.len()));
                    break;
                }
                PartitionType::Data(DataPartitionSubType::Nvs) => {
                    if fallback_nvs.is_none() {
                        fallback_nvs = Some((entry.offset(), entry.len()));
                    }
                }
                _ => {}
            }
        }

        let (offset, len) = data_undefined
            .or(fallback_nvs)
            .ok_or(FlashSettingsError::SettingsPartitionMissing)?;

        if len < FLASH_SECTOR_SIZE {
            return Err(FlashSettingsError::PartitionTooSmall);
        }

        Ok(Self {
            flash,
            settings_sector_addr: offset + len - FLASH_SECTOR_SIZE,
        })
    }
}

impl SettingsStore for FlashSettingsStore {
    type Error = FlashSettingsError;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
        let mut buf = [0u8; SETTINGS_RECORD_LEN];
        self.flash.read_bytes(self.settings_sector_addr, &mut buf)?;

        // Erased sector: nothing persisted yet.
        if buf.iter().all(|b| *b == 0xFF) {
            return Ok(None);
        }

        let magic = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        if magic != SETTINGS_MAGIC {
            return Ok(None);
        }
        if buf[4] != SETTINGS_VERSION {
            return Ok(None);
        }

        let expected_checksum = u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
        if checksum32(&buf[..8]) != expected_checksum {
            return Err(FlashSettingsError::Corrupted);
        }

        let brightness = buf[5];
        if brightness > BRIGHTNESS_MAX {
            return Err(FlashSettingsError::Corrupted);
        }

        Ok(Some(PersistedSettings::new(brightness)))
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        let mut buf = [0xFFu8; SETTINGS_RECORD_LEN];
        buf[0..4].copy_from_slice(&SETTINGS_MAGIC.to_le_bytes());
        buf[4] = SETTINGS_VERSION;
        buf[5] = settings.brightness.min(BRIGHTNESS_MAX);
        buf[6] = 0;
        buf[7] = 0;
        let checksum = checksum32(&buf[..8]);
        buf[8..12].copy_from_slice(&checksum.to_le_bytes());

        self.flash.erase_sector(self.settings_sector_addr)?;
        self.flash
            .write_erased_bytes(self.settings_sector_addr, &buf)
    }
}

fn checksum32(bytes: &[u8]) -> u32 {
    let mut hash = 0x811C_9DC5u32;
    for b in bytes {
        hash ^= *b as u32;
        hash = hash.wrapping_mul(16_777_619);
    }
    hash
}
