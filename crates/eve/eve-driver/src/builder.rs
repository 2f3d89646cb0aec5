//! Display-list command builder
//!
//! The same display-list commands can go two ways: written straight into
//! `RAM_DL` ([`Eve::dl`](crate::Eve::dl)) or queued in the co-processor ring
//! ([`Eve::cmd`](crate::Eve::cmd)). Both views implement
//! [`DisplayListBuilder`] and only differ in where
//! [`append_word`](DisplayListBuilder::append_word) puts the word.

use crate::encoding::{dl, DlWord};
use crate::types::{BitmapFormat, BlendFunc, Filter, Func, Primitive, StencilOp, Swizzle, Wrap};

/// Sink for display-list words with one provided method per opcode.
pub trait DisplayListBuilder {
    /// Error type of the destination
    type Error;

    /// Append one encoded word.
    fn append_word(&mut self, word: DlWord) -> Result<(), Self::Error>;

    /// `ALPHA_FUNC`
    fn alpha_func(&mut self, func: Func, reference: u8) -> Result<(), Self::Error> {
        self.append_word(dl::alpha_func(func, reference))
    }

    /// `BEGIN`
    fn begin(&mut self, prim: Primitive) -> Result<(), Self::Error> {
        self.append_word(dl::begin(prim))
    }

    /// `BITMAP_EXT_FORMAT` (BT81x)
    fn bitmap_ext_format(&mut self, format: BitmapFormat) -> Result<(), Self::Error> {
        self.append_word(dl::bitmap_ext_format(format))
    }

    /// `BITMAP_HANDLE`
    fn bitmap_handle(&mut self, handle: u8) -> Result<(), Self::Error> {
        self.append_word(dl::bitmap_handle(handle))
    }

    /// `BITMAP_LAYOUT`
    fn bitmap_layout(
        &mut self,
        format: BitmapFormat,
        stride: u16,
        height: u16,
    ) -> Result<(), Self::Error> {
        self.append_word(dl::bitmap_layout(format, stride, height))
    }

    /// `BITMAP_LAYOUT_H`
    fn bitmap_layout_h(&mut self, stride_high: u8, height_high: u8) -> Result<(), Self::Error> {
        self.append_word(dl::bitmap_layout_h(stride_high, height_high))
    }

    /// `BITMAP_SIZE`
    fn bitmap_size(
        &mut self,
        filter: Filter,
        wrapx: Wrap,
        wrapy: Wrap,
        width: u16,
        height: u16,
    ) -> Result<(), Self::Error> {
        self.append_word(dl::bitmap_size(filter, wrapx, wrapy, width, height))
    }

    /// `BITMAP_SIZE_H`
    fn bitmap_size_h(&mut self, width_high: u8, height_high: u8) -> Result<(), Self::Error> {
        self.append_word(dl::bitmap_size_h(width_high, height_high))
    }

    /// `BITMAP_SOURCE`
    fn bitmap_source(&mut self, addr: u32) -> Result<(), Self::Error> {
        self.append_word(dl::bitmap_source(addr))
    }

    /// `BITMAP_SWIZZLE` (BT81x)
    fn bitmap_swizzle(
        &mut self,
        r: Swizzle,
        g: Swizzle,
        b: Swizzle,
        a: Swizzle,
    ) -> Result<(), Self::Error> {
        self.append_word(dl::bitmap_swizzle(r, g, b, a))
    }

    /// `BITMAP_TRANSFORM_A`
    fn bitmap_transform_a(&mut self, a: i32) -> Result<(), Self::Error> {
        self.append_word(dl::bitmap_transform_a(a))
    }

    /// `BITMAP_TRANSFORM_B`
    fn bitmap_transform_b(&mut self, b: i32) -> Result<(), Self::Error> {
        self.append_word(dl::bitmap_transform_b(b))
    }

    /// `BITMAP_TRANSFORM_C`
    fn bitmap_transform_c(&mut self, c: i32) -> Result<(), Self::Error> {
        self.append_word(dl::bitmap_transform_c(c))
    }

    /// `BITMAP_TRANSFORM_D`
    fn bitmap_transform_d(&mut self, d: i32) -> Result<(), Self::Error> {
        self.append_word(dl::bitmap_transform_d(d))
    }

    /// `BITMAP_TRANSFORM_E`
    fn bitmap_transform_e(&mut self, e: i32) -> Result<(), Self::Error> {
        self.append_word(dl::bitmap_transform_e(e))
    }

    /// `BITMAP_TRANSFORM_F`
    fn bitmap_transform_f(&mut self, f: i32) -> Result<(), Self::Error> {
        self.append_word(dl::bitmap_transform_f(f))
    }

    /// `BLEND_FUNC`
    fn blend_func(&mut self, src: BlendFunc, dst: BlendFunc) -> Result<(), Self::Error> {
        self.append_word(dl::blend_func(src, dst))
    }

    /// `CALL`
    fn call(&mut self, dest: u16) -> Result<(), Self::Error> {
        self.append_word(dl::call(dest))
    }

    /// `CELL`
    fn cell(&mut self, cell: u8) -> Result<(), Self::Error> {
        self.append_word(dl::cell(cell))
    }

    /// `CLEAR`
    fn clear(&mut self, color: bool, stencil: bool, tag: bool) -> Result<(), Self::Error> {
        self.append_word(dl::clear(color, stencil, tag))
    }

    /// `CLEAR_COLOR_A`
    fn clear_color_a(&mut self, alpha: u8) -> Result<(), Self::Error> {
        self.append_word(dl::clear_color_a(alpha))
    }

    /// `CLEAR_COLOR_RGB`
    fn clear_color_rgb(&mut self, red: u8, green: u8, blue: u8) -> Result<(), Self::Error> {
        self.append_word(dl::clear_color_rgb(red, green, blue))
    }

    /// `CLEAR_COLOR_RGB` from `0xRRGGBB`
    fn clear_color(&mut self, rgb: u32) -> Result<(), Self::Error> {
        self.append_word(dl::clear_color(rgb))
    }

    /// `CLEAR_STENCIL`
    fn clear_stencil(&mut self, value: u8) -> Result<(), Self::Error> {
        self.append_word(dl::clear_stencil(value))
    }

    /// `CLEAR_TAG`
    fn clear_tag(&mut self, tag: u8) -> Result<(), Self::Error> {
        self.append_word(dl::clear_tag(tag))
    }

    /// `COLOR_A`
    fn color_a(&mut self, alpha: u8) -> Result<(), Self::Error> {
        self.append_word(dl::color_a(alpha))
    }

    /// `COLOR_MASK`
    fn color_mask(
        &mut self,
        red: bool,
        green: bool,
        blue: bool,
        alpha: bool,
    ) -> Result<(), Self::Error> {
        self.append_word(dl::color_mask(red, green, blue, alpha))
    }

    /// `COLOR_RGB`
    fn color_rgb(&mut self, red: u8, green: u8, blue: u8) -> Result<(), Self::Error> {
        self.append_word(dl::color_rgb(red, green, blue))
    }

    /// `COLOR_RGB` from `0xRRGGBB`
    fn color(&mut self, rgb: u32) -> Result<(), Self::Error> {
        self.append_word(dl::color(rgb))
    }

    /// `DISPLAY`
    fn display(&mut self) -> Result<(), Self::Error> {
        self.append_word(dl::display())
    }

    /// `END`
    fn end(&mut self) -> Result<(), Self::Error> {
        self.append_word(dl::end())
    }

    /// `JUMP`
    fn jump(&mut self, dest: u16) -> Result<(), Self::Error> {
        self.append_word(dl::jump(dest))
    }

    /// `LINE_WIDTH`
    fn line_width(&mut self, width: u16) -> Result<(), Self::Error> {
        self.append_word(dl::line_width(width))
    }

    /// `MACRO`
    fn run_macro(&mut self, index: u8) -> Result<(), Self::Error> {
        self.append_word(dl::macro_(index))
    }

    /// `NOP`
    fn nop(&mut self) -> Result<(), Self::Error> {
        self.append_word(dl::nop())
    }

    /// `PALETTE_SOURCE`
    fn palette_source(&mut self, addr: u32) -> Result<(), Self::Error> {
        self.append_word(dl::palette_source(addr))
    }

    /// `POINT_SIZE`
    fn point_size(&mut self, size: u16) -> Result<(), Self::Error> {
        self.append_word(dl::point_size(size))
    }

    /// `RESTORE_CONTEXT`
    fn restore_context(&mut self) -> Result<(), Self::Error> {
        self.append_word(dl::restore_context())
    }

    /// `RETURN`
    fn ret(&mut self) -> Result<(), Self::Error> {
        self.append_word(dl::ret())
    }

    /// `SAVE_CONTEXT`
    fn save_context(&mut self) -> Result<(), Self::Error> {
        self.append_word(dl::save_context())
    }

    /// `SCISSOR_SIZE`
    fn scissor_size(&mut self, width: u16, height: u16) -> Result<(), Self::Error> {
        self.append_word(dl::scissor_size(width, height))
    }

    /// `SCISSOR_XY`
    fn scissor_xy(&mut self, x: u16, y: u16) -> Result<(), Self::Error> {
        self.append_word(dl::scissor_xy(x, y))
    }

    /// `STENCIL_FUNC`
    fn stencil_func(&mut self, func: Func, reference: u8, mask: u8) -> Result<(), Self::Error> {
        self.append_word(dl::stencil_func(func, reference, mask))
    }

    /// `STENCIL_MASK`
    fn stencil_mask(&mut self, mask: u8) -> Result<(), Self::Error> {
        self.append_word(dl::stencil_mask(mask))
    }

    /// `STENCIL_OP`
    fn stencil_op(&mut self, sfail: StencilOp, spass: StencilOp) -> Result<(), Self::Error> {
        self.append_word(dl::stencil_op(sfail, spass))
    }

    /// `TAG`
    fn tag(&mut self, tag: u8) -> Result<(), Self::Error> {
        self.append_word(dl::tag(tag))
    }

    /// `TAG_MASK`
    fn tag_mask(&mut self, enable: bool) -> Result<(), Self::Error> {
        self.append_word(dl::tag_mask(enable))
    }

    /// `VERTEX2F`
    fn vertex2f(&mut self, x: i16, y: i16) -> Result<(), Self::Error> {
        self.append_word(dl::vertex2f(x, y))
    }

    /// `VERTEX2II`
    fn vertex2ii(&mut self, x: u16, y: u16, handle: u8, cell: u8) -> Result<(), Self::Error> {
        self.append_word(dl::vertex2ii(x, y, handle, cell))
    }

    /// `VERTEX_FORMAT`
    fn vertex_format(&mut self, frac: u8) -> Result<(), Self::Error> {
        self.append_word(dl::vertex_format(frac))
    }

    /// `VERTEX_TRANSLATE_X`
    fn vertex_translate_x(&mut self, x: i32) -> Result<(), Self::Error> {
        self.append_word(dl::vertex_translate_x(x))
    }

    /// `VERTEX_TRANSLATE_Y`
    fn vertex_translate_y(&mut self, y: i32) -> Result<(), Self::Error> {
        self.append_word(dl::vertex_translate_y(y))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[derive(Default)]
    struct Words(Vec<u32>);

    impl DisplayListBuilder for Words {
        type Error = core::convert::Infallible;

        fn append_word(&mut self, word: DlWord) -> Result<(), Self::Error> {
            self.0.push(word.raw());
            Ok(())
        }
    }

    #[test]
    fn test_provided_methods_use_encoders() {
        let mut w = Words::default();
        w.clear_color_rgb(0, 0, 0).unwrap();
        w.clear(true, true, true).unwrap();
        w.begin(Primitive::Points).unwrap();
        w.vertex2f(160, 160).unwrap();
        w.end().unwrap();
        w.display().unwrap();
        assert_eq!(
            w.0,
            [
                0x0200_0000,
                0x2600_0007,
                0x1F00_0002,
                0x4050_00A0,
                0x2100_0000,
                0x0000_0000
            ]
        );
    }
}
