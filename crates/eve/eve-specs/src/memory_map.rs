//! EVE address space
//!
//! The host sees a 22-bit address space. The register file lives at
//! `RAM_REG`; only the registers a host needs to find a booted chip and
//! hand it co-processor work are listed here, the full register map is in
//! the driver crate.

/// General purpose graphics RAM (1 MiB)
pub const RAM_G: u32 = 0x00_0000;
/// Size of `RAM_G` in bytes
pub const RAM_G_SIZE: u32 = 0x10_0000;
/// Font and bitmap ROM
pub const ROM: u32 = 0x20_0000;
/// Pointer to the ROM font table
pub const ROM_FONT_ADDR: u32 = 0x2F_FFFC;
/// Display list RAM
pub const RAM_DL: u32 = 0x30_0000;
/// Size of `RAM_DL` in bytes
pub const RAM_DL_SIZE: u16 = 8192;
/// Register file
pub const RAM_REG: u32 = 0x30_2000;
/// Co-processor command ring
pub const RAM_CMD: u32 = 0x30_8000;
/// Size of `RAM_CMD` in bytes
pub const RAM_CMD_SIZE: u16 = 4096;
/// Co-processor fault report, nul-terminated ASCII (BT81x)
pub const RAM_ERR_REPORT: u32 = 0x30_9800;
/// Size of the fault report
pub const RAM_ERR_REPORT_SIZE: usize = 128;
/// JT boot area
pub const RAM_JTBOOT: u32 = 0x30_B000;
/// Attached QSPI flash, reachable only through co-processor commands (BT81x)
pub const FLASH: u32 = 0x80_0000;

/// Chip identifier, valid after boot (`0x000118xx`, see [`ChipId`](crate::ChipId))
pub const REG_CHIP_ID: u32 = 0x0C_0000;

/// Widest address a transaction header can carry.
pub const ADDRESS_MASK: u32 = 0x3F_FFFF;

/// Value of `REG_ID` once the chip has booted.
pub const CHIP_ID_READY: u8 = 0x7C;

/// `REG_CMD_READ` value reported after an illegal co-processor command.
pub const CMD_READ_FAULT: u16 = 0x0FFF;

// ── Boot and ring handshake ────────────────────────────────────────────────

/// Reads [`CHIP_ID_READY`] once booted
pub const REG_ID: u32 = 0x30_2000;
/// Co-processor read pointer into `RAM_CMD`
pub const REG_CMD_READ: u32 = 0x30_20F8;
/// Host write pointer into `RAM_CMD`
pub const REG_CMD_WRITE: u32 = 0x30_20FC;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handshake_registers_in_register_file() {
        for reg in [REG_ID, REG_CMD_READ, REG_CMD_WRITE] {
            assert!((RAM_REG..RAM_CMD).contains(&reg));
        }
        assert_eq!(CMD_READ_FAULT, RAM_CMD_SIZE.wrapping_sub(1));
    }
}
