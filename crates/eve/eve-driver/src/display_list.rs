//! Direct display-list writes
//!
//! Words written here go straight into `RAM_DL` at the local
//! [`DlIndex`]; the chip only shows them after a `REG_DLSWAP`. The index
//! wraps at 8 KiB like the memory it points into.

use platform::Transport;

use crate::builder::DisplayListBuilder;
use crate::encoding::DlWord;
use crate::memory_map::RAM_DL;
use crate::{DlIndex, Error, Eve};

impl<'p, T: Transport> Eve<'p, T> {
    /// Write one word at `RAM_DL + dl_index` and advance the index by 4.
    ///
    /// Returns the index after the write.
    pub fn dl_word(&mut self, word: DlWord) -> Result<DlIndex, Error<T::Error>> {
        let addr = RAM_DL.wrapping_add(u32::from(self.dl_index));
        self.write32(addr, word.raw())?;
        self.dl_index += 4;
        Ok(self.dl_index)
    }

    /// Move the display-list write position, usually back to 0 before
    /// building a new list.
    pub fn reset_dl_index(&mut self, index: DlIndex) {
        self.dl_index = index;
    }

    /// Builder view that writes directly into `RAM_DL`.
    pub fn dl(&mut self) -> DisplayList<'_, 'p, T> {
        DisplayList { eve: self }
    }
}

/// Display-list builder backed by `RAM_DL`.
///
/// Obtained from [`Eve::dl`]; every command is one write transaction.
pub struct DisplayList<'e, 'p, T: Transport> {
    eve: &'e mut Eve<'p, T>,
}

impl<T: Transport> DisplayList<'_, '_, T> {
    /// Write position after the last command.
    pub fn index(&self) -> DlIndex {
        self.eve.dl_index
    }
}

impl<T: Transport> DisplayListBuilder for DisplayList<'_, '_, T> {
    type Error = Error<T::Error>;

    fn append_word(&mut self, word: DlWord) -> Result<(), Self::Error> {
        self.eve.dl_word(word).map(|_| ())
    }
}
