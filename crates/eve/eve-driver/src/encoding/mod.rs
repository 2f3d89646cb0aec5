//! Command encoding
//!
//! Display-list words are described by one static table, [`OPCODES`]: each
//! [`Opcode`] names its code and the bit range of every field. All typed
//! encoders in [`dl`] go through [`pack`], and [`decode`] reads a field
//! back out. Co-processor records are streamed by [`record::encode_record`].

pub mod dl;
pub mod record;

/// One encoded display-list word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DlWord(u32);

impl DlWord {
    /// Wrap an already encoded word.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The encoded word.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<DlWord> for u32 {
    fn from(word: DlWord) -> u32 {
        word.0
    }
}

/// Bit range `[right, left]` (inclusive) of a field within a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    /// Field name
    pub name: &'static str,
    /// Most significant bit
    pub left: u8,
    /// Least significant bit
    pub right: u8,
}

impl BitField {
    /// Describe a field occupying bits `right..=left`.
    pub const fn new(name: &'static str, left: u8, right: u8) -> Self {
        Self { name, left, right }
    }

    /// Number of bits.
    pub const fn width(&self) -> u8 {
        self.left.wrapping_sub(self.right).wrapping_add(1)
    }

    /// Mask of `width` low bits. Computed in `u64` so a 32-bit field does
    /// not shift by the full word width.
    #[allow(clippy::cast_possible_truncation)] // width <= 32
    pub const fn mask(&self) -> u32 {
        1u64.wrapping_shl(self.width() as u32).wrapping_sub(1) as u32
    }

    /// Place `value` in the field; excess high bits are dropped.
    pub const fn encode(&self, value: u32) -> u32 {
        (value & self.mask()).wrapping_shl(self.right as u32)
    }

    /// Extract the field from `word`.
    pub const fn decode(&self, word: u32) -> u32 {
        word.wrapping_shr(self.right as u32) & self.mask()
    }
}

/// A display-list opcode and its field layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// Programming guide name
    pub name: &'static str,
    /// Opcode bits, already in position
    pub code: u32,
    /// Fields in argument order
    pub fields: &'static [BitField],
}

impl Opcode {
    /// Bits reserved for the opcode: the top two bits for vertex words,
    /// the top byte for everything else.
    pub const fn code_mask(&self) -> u32 {
        if self.code & 0xC000_0000 != 0 {
            0xC000_0000
        } else {
            0xFF00_0000
        }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&'static BitField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Encode `values` into `op`'s fields.
///
/// Values are matched to fields in order; missing values encode as 0 and
/// extra values are ignored.
pub fn pack(op: &Opcode, values: &[u32]) -> DlWord {
    let word = op
        .fields
        .iter()
        .zip(values)
        .fold(op.code, |word, (field, &value)| word | field.encode(value));
    DlWord(word)
}

/// Read one field back out of an encoded word.
pub fn decode(word: DlWord, field: &BitField) -> u32 {
    field.decode(word.0)
}

/// Reinterpret a signed value as the bit pattern the chip expects;
/// [`BitField::encode`] truncates it to the field width.
pub(crate) const fn signed(value: i32) -> u32 {
    u32::from_ne_bytes(value.to_ne_bytes())
}

macro_rules! opcodes {
    ($( $ident:ident = $code:literal { $( $field:literal : $left:literal , $right:literal );* $(;)? } )*) => {
        /// Opcode descriptors, one per display-list command.
        pub mod op {
            use super::{BitField, Opcode};
            $(
                #[allow(missing_docs)]
                pub const $ident: Opcode = Opcode {
                    name: stringify!($ident),
                    code: $code,
                    fields: &[$( BitField::new($field, $left, $right) ),*],
                };
            )*
        }

        /// Every display-list opcode the driver can encode.
        pub static OPCODES: &[Opcode] = &[$( op::$ident ),*];
    };
}

opcodes! {
    DISPLAY            = 0x0000_0000 {}
    BITMAP_SOURCE      = 0x0100_0000 { "addr": 21, 0 }
    CLEAR_COLOR_RGB    = 0x0200_0000 { "red": 23, 16; "green": 15, 8; "blue": 7, 0 }
    CLEAR_COLOR        = 0x0200_0000 { "rgb": 23, 0 }
    TAG                = 0x0300_0000 { "tag": 7, 0 }
    COLOR_RGB          = 0x0400_0000 { "red": 23, 16; "green": 15, 8; "blue": 7, 0 }
    COLOR              = 0x0400_0000 { "rgb": 23, 0 }
    BITMAP_HANDLE      = 0x0500_0000 { "handle": 4, 0 }
    CELL               = 0x0600_0000 { "cell": 6, 0 }
    BITMAP_LAYOUT      = 0x0700_0000 { "format": 23, 19; "stride": 18, 9; "height": 8, 0 }
    BITMAP_SIZE        = 0x0800_0000 { "filter": 20, 20; "wrapx": 19, 19; "wrapy": 18, 18; "width": 17, 9; "height": 8, 0 }
    ALPHA_FUNC         = 0x0900_0000 { "func": 10, 8; "ref": 7, 0 }
    STENCIL_FUNC       = 0x0A00_0000 { "func": 19, 16; "ref": 15, 8; "mask": 7, 0 }
    BLEND_FUNC         = 0x0B00_0000 { "src": 5, 3; "dst": 2, 0 }
    STENCIL_OP         = 0x0C00_0000 { "sfail": 5, 3; "spass": 2, 0 }
    POINT_SIZE         = 0x0D00_0000 { "size": 12, 0 }
    LINE_WIDTH         = 0x0E00_0000 { "width": 11, 0 }
    CLEAR_COLOR_A      = 0x0F00_0000 { "alpha": 7, 0 }
    COLOR_A            = 0x1000_0000 { "alpha": 7, 0 }
    CLEAR_STENCIL      = 0x1100_0000 { "stencil": 7, 0 }
    CLEAR_TAG          = 0x1200_0000 { "tag": 7, 0 }
    STENCIL_MASK       = 0x1300_0000 { "mask": 7, 0 }
    TAG_MASK           = 0x1400_0000 { "mask": 0, 0 }
    BITMAP_TRANSFORM_A = 0x1500_0000 { "a": 16, 0 }
    BITMAP_TRANSFORM_B = 0x1600_0000 { "b": 16, 0 }
    BITMAP_TRANSFORM_C = 0x1700_0000 { "c": 23, 0 }
    BITMAP_TRANSFORM_D = 0x1800_0000 { "d": 16, 0 }
    BITMAP_TRANSFORM_E = 0x1900_0000 { "e": 16, 0 }
    BITMAP_TRANSFORM_F = 0x1A00_0000 { "f": 23, 0 }
    SCISSOR_XY         = 0x1B00_0000 { "x": 21, 11; "y": 10, 0 }
    SCISSOR_SIZE       = 0x1C00_0000 { "width": 23, 12; "height": 11, 0 }
    CALL               = 0x1D00_0000 { "dest": 15, 0 }
    JUMP               = 0x1E00_0000 { "dest": 15, 0 }
    BEGIN              = 0x1F00_0000 { "prim": 3, 0 }
    COLOR_MASK         = 0x2000_0000 { "red": 3, 3; "green": 2, 2; "blue": 1, 1; "alpha": 0, 0 }
    END                = 0x2100_0000 {}
    SAVE_CONTEXT       = 0x2200_0000 {}
    RESTORE_CONTEXT    = 0x2300_0000 {}
    RETURN             = 0x2400_0000 {}
    MACRO              = 0x2500_0000 { "index": 0, 0 }
    CLEAR              = 0x2600_0000 { "color": 2, 2; "stencil": 1, 1; "tag": 0, 0 }
    VERTEX_FORMAT      = 0x2700_0000 { "frac": 2, 0 }
    BITMAP_LAYOUT_H    = 0x2800_0000 { "stride": 3, 2; "height": 1, 0 }
    BITMAP_SIZE_H      = 0x2900_0000 { "width": 3, 2; "height": 1, 0 }
    PALETTE_SOURCE     = 0x2A00_0000 { "addr": 21, 0 }
    VERTEX_TRANSLATE_X = 0x2B00_0000 { "x": 16, 0 }
    VERTEX_TRANSLATE_Y = 0x2C00_0000 { "y": 16, 0 }
    NOP                = 0x2D00_0000 {}
    BITMAP_EXT_FORMAT  = 0x2E00_0000 { "format": 15, 0 }
    BITMAP_SWIZZLE     = 0x2F00_0000 { "r": 11, 9; "g": 8, 6; "b": 5, 3; "a": 2, 0 }
    VERTEX2F           = 0x4000_0000 { "x": 29, 15; "y": 14, 0 }
    VERTEX2II          = 0x8000_0000 { "x": 29, 21; "y": 20, 12; "handle": 11, 7; "cell": 6, 0 }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_handles_full_width() {
        let full = BitField::new("all", 31, 0);
        assert_eq!(full.width(), 32);
        assert_eq!(full.mask(), u32::MAX);
        assert_eq!(BitField::new("bit", 0, 0).mask(), 1);
        assert_eq!(BitField::new("nib", 7, 4).encode(0xFF), 0xF0);
    }

    #[test]
    fn test_table_has_unique_names() {
        for (i, a) in OPCODES.iter().enumerate() {
            for b in &OPCODES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
        assert_eq!(OPCODES.len(), 52);
    }

    #[test]
    fn test_fields_stay_clear_of_opcode_bits() {
        for op in OPCODES {
            for field in op.fields {
                assert_eq!(
                    field.encode(u32::MAX) & op.code_mask(),
                    0,
                    "{}.{} overlaps the opcode",
                    op.name,
                    field.name
                );
            }
        }
    }

    #[test]
    fn test_fields_do_not_overlap() {
        for op in OPCODES {
            let mut seen = 0u32;
            for field in op.fields {
                let bits = field.encode(u32::MAX);
                assert_eq!(seen & bits, 0, "{}.{}", op.name, field.name);
                seen |= bits;
            }
        }
    }

    #[test]
    fn test_known_words() {
        assert_eq!(pack(&op::CLEAR, &[1, 1, 1]).raw(), 0x2600_0007);
        assert_eq!(pack(&op::CLEAR_COLOR_RGB, &[1, 2, 3]).raw(), 0x0201_0203);
        assert_eq!(pack(&op::DISPLAY, &[]).raw(), 0);
        assert_eq!(pack(&op::VERTEX2II, &[1, 2, 3, 4]).raw(), 0x8020_2184);
        assert_eq!(pack(&op::BEGIN, &[9]).raw(), 0x1F00_0009);
    }

    #[test]
    fn test_missing_values_encode_as_zero() {
        assert_eq!(pack(&op::COLOR_RGB, &[0xFF]).raw(), 0x04FF_0000);
    }

    #[test]
    fn test_field_lookup() {
        let f = op::SCISSOR_XY.field("y").unwrap();
        assert_eq!((f.left, f.right), (10, 0));
        assert!(op::SCISSOR_XY.field("z").is_none());
    }

    #[test]
    fn test_signed_values_truncate_to_field() {
        let word = pack(&op::VERTEX2F, &[signed(-1), signed(-16)]);
        let x = decode(word, &op::VERTEX2F.fields[0]);
        let y = decode(word, &op::VERTEX2F.fields[1]);
        assert_eq!(x, 0x7FFF);
        assert_eq!(y, 0x7FF0);
    }
}
