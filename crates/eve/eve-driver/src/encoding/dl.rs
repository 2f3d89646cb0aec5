//! Display-list word encoders
//!
//! One function per opcode. Each is a thin call into [`pack`] with the
//! matching [`op`] descriptor; out-of-range values are truncated to the
//! field width, never rejected.
//!
//! Vertex coordinates are passed through unchanged. `VERTEX2F` takes
//! 1/16 pixel units by default (see `VERTEX_FORMAT`).

use super::{op, pack, signed, DlWord};
use crate::types::{BitmapFormat, BlendFunc, Filter, Func, Primitive, StencilOp, Swizzle, Wrap};

#[inline]
fn b(flag: bool) -> u32 {
    u32::from(flag)
}

/// `ALPHA_FUNC`
pub fn alpha_func(func: Func, reference: u8) -> DlWord {
    pack(&op::ALPHA_FUNC, &[func as u32, u32::from(reference)])
}

/// `BEGIN`
pub fn begin(prim: Primitive) -> DlWord {
    pack(&op::BEGIN, &[prim as u32])
}

/// `BITMAP_EXT_FORMAT` (BT81x)
pub fn bitmap_ext_format(format: BitmapFormat) -> DlWord {
    pack(&op::BITMAP_EXT_FORMAT, &[format as u32])
}

/// `BITMAP_HANDLE`
pub fn bitmap_handle(handle: u8) -> DlWord {
    pack(&op::BITMAP_HANDLE, &[u32::from(handle)])
}

/// `BITMAP_LAYOUT`: low bits of stride and height.
///
/// Only the low five bits of `format` fit; extended formats go through
/// [`bitmap_ext_format`] with [`BitmapFormat::Glformat`] here.
pub fn bitmap_layout(format: BitmapFormat, stride: u16, height: u16) -> DlWord {
    pack(
        &op::BITMAP_LAYOUT,
        &[format as u32, u32::from(stride), u32::from(height)],
    )
}

/// `BITMAP_LAYOUT_H`: bits 10..9 of stride and height.
pub fn bitmap_layout_h(stride_high: u8, height_high: u8) -> DlWord {
    pack(
        &op::BITMAP_LAYOUT_H,
        &[u32::from(stride_high), u32::from(height_high)],
    )
}

/// `BITMAP_SIZE`
pub fn bitmap_size(filter: Filter, wrapx: Wrap, wrapy: Wrap, width: u16, height: u16) -> DlWord {
    pack(
        &op::BITMAP_SIZE,
        &[
            filter as u32,
            wrapx as u32,
            wrapy as u32,
            u32::from(width),
            u32::from(height),
        ],
    )
}

/// `BITMAP_SIZE_H`: bits 10..9 of width and height.
pub fn bitmap_size_h(width_high: u8, height_high: u8) -> DlWord {
    pack(
        &op::BITMAP_SIZE_H,
        &[u32::from(width_high), u32::from(height_high)],
    )
}

/// `BITMAP_SOURCE`
pub fn bitmap_source(addr: u32) -> DlWord {
    pack(&op::BITMAP_SOURCE, &[addr])
}

/// `BITMAP_SWIZZLE` (BT81x)
pub fn bitmap_swizzle(r: Swizzle, g: Swizzle, b: Swizzle, a: Swizzle) -> DlWord {
    pack(
        &op::BITMAP_SWIZZLE,
        &[r as u32, g as u32, b as u32, a as u32],
    )
}

/// `BITMAP_TRANSFORM_A`, signed 8.8 fixed point
pub fn bitmap_transform_a(a: i32) -> DlWord {
    pack(&op::BITMAP_TRANSFORM_A, &[signed(a)])
}

/// `BITMAP_TRANSFORM_B`, signed 8.8 fixed point
pub fn bitmap_transform_b(b: i32) -> DlWord {
    pack(&op::BITMAP_TRANSFORM_B, &[signed(b)])
}

/// `BITMAP_TRANSFORM_C`, signed 15.8 fixed point
pub fn bitmap_transform_c(c: i32) -> DlWord {
    pack(&op::BITMAP_TRANSFORM_C, &[signed(c)])
}

/// `BITMAP_TRANSFORM_D`, signed 8.8 fixed point
pub fn bitmap_transform_d(d: i32) -> DlWord {
    pack(&op::BITMAP_TRANSFORM_D, &[signed(d)])
}

/// `BITMAP_TRANSFORM_E`, signed 8.8 fixed point
pub fn bitmap_transform_e(e: i32) -> DlWord {
    pack(&op::BITMAP_TRANSFORM_E, &[signed(e)])
}

/// `BITMAP_TRANSFORM_F`, signed 15.8 fixed point
pub fn bitmap_transform_f(f: i32) -> DlWord {
    pack(&op::BITMAP_TRANSFORM_F, &[signed(f)])
}

/// `BLEND_FUNC`
pub fn blend_func(src: BlendFunc, dst: BlendFunc) -> DlWord {
    pack(&op::BLEND_FUNC, &[src as u32, dst as u32])
}

/// `CALL`: `dest` is a word offset into `RAM_DL`.
pub fn call(dest: u16) -> DlWord {
    pack(&op::CALL, &[u32::from(dest)])
}

/// `CELL`
pub fn cell(cell: u8) -> DlWord {
    pack(&op::CELL, &[u32::from(cell)])
}

/// `CLEAR`
pub fn clear(color: bool, stencil: bool, tag: bool) -> DlWord {
    pack(&op::CLEAR, &[b(color), b(stencil), b(tag)])
}

/// `CLEAR_COLOR_A`
pub fn clear_color_a(alpha: u8) -> DlWord {
    pack(&op::CLEAR_COLOR_A, &[u32::from(alpha)])
}

/// `CLEAR_COLOR_RGB`
pub fn clear_color_rgb(red: u8, green: u8, blue: u8) -> DlWord {
    pack(
        &op::CLEAR_COLOR_RGB,
        &[u32::from(red), u32::from(green), u32::from(blue)],
    )
}

/// `CLEAR_COLOR_RGB` from a packed `0xRRGGBB` value.
pub fn clear_color(rgb: u32) -> DlWord {
    pack(&op::CLEAR_COLOR, &[rgb])
}

/// `CLEAR_STENCIL`
pub fn clear_stencil(value: u8) -> DlWord {
    pack(&op::CLEAR_STENCIL, &[u32::from(value)])
}

/// `CLEAR_TAG`
pub fn clear_tag(tag: u8) -> DlWord {
    pack(&op::CLEAR_TAG, &[u32::from(tag)])
}

/// `COLOR_A`
pub fn color_a(alpha: u8) -> DlWord {
    pack(&op::COLOR_A, &[u32::from(alpha)])
}

/// `COLOR_MASK`
pub fn color_mask(red: bool, green: bool, blue: bool, alpha: bool) -> DlWord {
    pack(&op::COLOR_MASK, &[b(red), b(green), b(blue), b(alpha)])
}

/// `COLOR_RGB`
pub fn color_rgb(red: u8, green: u8, blue: u8) -> DlWord {
    pack(
        &op::COLOR_RGB,
        &[u32::from(red), u32::from(green), u32::from(blue)],
    )
}

/// `COLOR_RGB` from a packed `0xRRGGBB` value.
pub fn color(rgb: u32) -> DlWord {
    pack(&op::COLOR, &[rgb])
}

/// `DISPLAY`
pub fn display() -> DlWord {
    pack(&op::DISPLAY, &[])
}

/// `END`
pub fn end() -> DlWord {
    pack(&op::END, &[])
}

/// `JUMP`: `dest` is a word offset into `RAM_DL`.
pub fn jump(dest: u16) -> DlWord {
    pack(&op::JUMP, &[u32::from(dest)])
}

/// `LINE_WIDTH` in 1/16 pixel.
pub fn line_width(width: u16) -> DlWord {
    pack(&op::LINE_WIDTH, &[u32::from(width)])
}

/// `MACRO`
pub fn macro_(index: u8) -> DlWord {
    pack(&op::MACRO, &[u32::from(index)])
}

/// `NOP`
pub fn nop() -> DlWord {
    pack(&op::NOP, &[])
}

/// `PALETTE_SOURCE`
pub fn palette_source(addr: u32) -> DlWord {
    pack(&op::PALETTE_SOURCE, &[addr])
}

/// `POINT_SIZE`, radius in 1/16 pixel.
pub fn point_size(size: u16) -> DlWord {
    pack(&op::POINT_SIZE, &[u32::from(size)])
}

/// `RESTORE_CONTEXT`
pub fn restore_context() -> DlWord {
    pack(&op::RESTORE_CONTEXT, &[])
}

/// `RETURN`
pub fn ret() -> DlWord {
    pack(&op::RETURN, &[])
}

/// `SAVE_CONTEXT`
pub fn save_context() -> DlWord {
    pack(&op::SAVE_CONTEXT, &[])
}

/// `SCISSOR_SIZE`
pub fn scissor_size(width: u16, height: u16) -> DlWord {
    pack(&op::SCISSOR_SIZE, &[u32::from(width), u32::from(height)])
}

/// `SCISSOR_XY`
pub fn scissor_xy(x: u16, y: u16) -> DlWord {
    pack(&op::SCISSOR_XY, &[u32::from(x), u32::from(y)])
}

/// `STENCIL_FUNC`
pub fn stencil_func(func: Func, reference: u8, mask: u8) -> DlWord {
    pack(
        &op::STENCIL_FUNC,
        &[func as u32, u32::from(reference), u32::from(mask)],
    )
}

/// `STENCIL_MASK`
pub fn stencil_mask(mask: u8) -> DlWord {
    pack(&op::STENCIL_MASK, &[u32::from(mask)])
}

/// `STENCIL_OP`
pub fn stencil_op(sfail: StencilOp, spass: StencilOp) -> DlWord {
    pack(&op::STENCIL_OP, &[sfail as u32, spass as u32])
}

/// `TAG`
pub fn tag(tag: u8) -> DlWord {
    pack(&op::TAG, &[u32::from(tag)])
}

/// `TAG_MASK`
pub fn tag_mask(enable: bool) -> DlWord {
    pack(&op::TAG_MASK, &[b(enable)])
}

/// `VERTEX2F`: signed 15-bit coordinates in `VERTEX_FORMAT` units.
pub fn vertex2f(x: i16, y: i16) -> DlWord {
    pack(
        &op::VERTEX2F,
        &[signed(i32::from(x)), signed(i32::from(y))],
    )
}

/// `VERTEX2II`: whole pixels, plus bitmap handle and cell.
pub fn vertex2ii(x: u16, y: u16, handle: u8, cell: u8) -> DlWord {
    pack(
        &op::VERTEX2II,
        &[
            u32::from(x),
            u32::from(y),
            u32::from(handle),
            u32::from(cell),
        ],
    )
}

/// `VERTEX_FORMAT`: fractional bits of `VERTEX2F` coordinates (0..=4).
pub fn vertex_format(frac: u8) -> DlWord {
    pack(&op::VERTEX_FORMAT, &[u32::from(frac)])
}

/// `VERTEX_TRANSLATE_X`, 1/16 pixel
pub fn vertex_translate_x(x: i32) -> DlWord {
    pack(&op::VERTEX_TRANSLATE_X, &[signed(x)])
}

/// `VERTEX_TRANSLATE_Y`, 1/16 pixel
pub fn vertex_translate_y(y: i32) -> DlWord {
    pack(&op::VERTEX_TRANSLATE_Y, &[signed(y)])
}
