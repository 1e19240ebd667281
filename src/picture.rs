// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use core::convert::TryFrom;

use arrayref::array_ref;
use bitflags::bitflags;

use crate::{ColorU8, Error, IntRect, LengthU32, Pixel};

use crate::fixed_point::mul_255;

/// Number of bytes per pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Maximum picture width and height.
///
/// Coordinates must fit into `i16`.
pub const MAX_DIMENSION: u32 = i16::MAX as u32;

// Row stride is rounded up to a multiple of this number of pixels.
const STRIDE_ALIGNMENT: u32 = 4;

bitflags! {
    /// Derived picture properties.
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
    pub struct PictureFlags: u32 {
        /// Pixels were modified since the flag was last cleared.
        const DIRTY = 1 << 0;
        /// All pixels have equal red, green and blue channels.
        const GREYSCALE = 1 << 1;
        /// At least one pixel is not fully opaque.
        const COMPOSITE = 1 << 2;
        /// Picture is translucent, but alpha is only ever 0 or 255.
        const MASK = 1 << 3;
        /// Color channels are premultiplied by alpha.
        const ASSOCIATED = 1 << 4;
        /// No real data was written into the picture yet.
        const UNINITIALIZED = 1 << 5;
    }
}


/// A container that owns RGBA pixels.
///
/// Rows are `stride` pixels long. Padding pixels at the end of each row
/// are never read or written by picture operations.
///
/// Whether pixels are premultiplied is tracked by `PictureFlags::ASSOCIATED`.
#[derive(Clone)]
pub struct Picture {
    data: Vec<Pixel>,
    width: u32,
    height: u32,
    stride: u32,
    flags: PictureFlags,
}

impl Picture {
    /// Allocates a new picture.
    ///
    /// A picture is filled with transparent black by default, aka (0, 0, 0, 0).
    ///
    /// Zero size and sizes bigger than `MAX_DIMENSION` are an error.
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        let (stride, data) = alloc_pixels(width, height)?;
        Ok(Picture {
            data,
            width,
            height,
            stride,
            flags: PictureFlags::ASSOCIATED | PictureFlags::UNINITIALIZED,
        })
    }

    /// Creates a picture from straight (not premultiplied) RGBA bytes.
    ///
    /// `data` must contain exactly `width * height * 4` bytes without row padding.
    ///
    /// Flags are computed from the data. A picture without translucent pixels
    /// is marked as associated right away, since premultiplication is a no-op for it.
    pub fn from_rgba(width: u32, height: u32, data: &[u8]) -> Result<Self, Error> {
        let mut picture = Self::from_bytes(width, height, data)?;
        picture.flags.remove(PictureFlags::ASSOCIATED);
        picture.analyze();
        if !picture.flags.contains(PictureFlags::COMPOSITE) {
            picture.flags.insert(PictureFlags::ASSOCIATED);
        }

        Ok(picture)
    }

    /// Creates a picture from premultiplied RGBA bytes.
    ///
    /// Color channels bigger than alpha are clamped.
    pub fn from_premultiplied_rgba(width: u32, height: u32, data: &[u8]) -> Result<Self, Error> {
        let mut picture = Self::from_bytes(width, height, data)?;
        for row in picture.rows_mut() {
            for p in row {
                let a = p.alpha();
                *p = Pixel::from_rgba(p.red().min(a), p.green().min(a), p.blue().min(a), a);
            }
        }

        picture.analyze();
        Ok(picture)
    }

    fn from_bytes(width: u32, height: u32, data: &[u8]) -> Result<Self, Error> {
        let mut picture = Picture::new(width, height)?;
        let row_bytes = width as usize * BYTES_PER_PIXEL;
        let expected = row_bytes * height as usize;
        if data.len() != expected {
            return Err(Error::DataLength { expected, actual: data.len() });
        }

        for (row, src) in picture.rows_mut().zip(data.chunks_exact(row_bytes)) {
            for (x, p) in row.iter_mut().enumerate() {
                let c = array_ref![src, x * BYTES_PER_PIXEL, BYTES_PER_PIXEL];
                *p = Pixel::from_rgba(c[0], c[1], c[2], c[3]);
            }
        }

        picture.mark_modified();
        Ok(picture)
    }

    /// Returns straight (not premultiplied) RGBA bytes without row padding.
    pub fn to_rgba(&self) -> Vec<u8> {
        let associated = self.is_associated();
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize * BYTES_PER_PIXEL);
        for row in self.rows() {
            for p in row {
                let p = if associated { p.unassociate() } else { *p };
                data.extend_from_slice(&p.to_array());
            }
        }

        data
    }

    /// Decodes a PNG data into a `Picture`.
    ///
    /// Only 8-bit images are supported.
    /// Index PNGs are not supported.
    #[cfg(feature = "png-format")]
    pub fn decode_png(data: &[u8]) -> Result<Self, Error> {
        fn decoding_error<E: core::fmt::Display>(e: E) -> Error {
            Error::PngDecoding(e.to_string())
        }

        let mut decoder = png::Decoder::new(data);
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info().map_err(decoding_error)?;
        let mut img_data = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut img_data).map_err(decoding_error)?;
        img_data.truncate(info.buffer_size());

        if info.bit_depth != png::BitDepth::Eight {
            return Err(decoding_error("unsupported bit depth"));
        }

        let img_data = match info.color_type {
            png::ColorType::Rgb => {
                let mut rgba = Vec::with_capacity(img_data.len() / 3 * 4);
                for rgb in img_data.chunks(3) {
                    rgba.extend_from_slice(rgb);
                    rgba.push(crate::ALPHA_U8_OPAQUE);
                }

                rgba
            }
            png::ColorType::Rgba => img_data,
            png::ColorType::Grayscale => {
                let mut rgba = Vec::with_capacity(img_data.len() * 4);
                for gray in img_data {
                    rgba.extend_from_slice(&[gray, gray, gray, crate::ALPHA_U8_OPAQUE]);
                }

                rgba
            }
            png::ColorType::GrayscaleAlpha => {
                let mut rgba = Vec::with_capacity(img_data.len() * 2);
                for slice in img_data.chunks(2) {
                    rgba.extend_from_slice(&[slice[0], slice[0], slice[0], slice[1]]);
                }

                rgba
            }
            png::ColorType::Indexed => {
                return Err(decoding_error("indexed PNG is not supported"));
            }
        };

        Picture::from_rgba(info.width, info.height, &img_data)
    }

    /// Loads a PNG file into a `Picture`.
    #[cfg(feature = "png-format")]
    pub fn load_png<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error> {
        let data = std::fs::read(path).map_err(|e| Error::PngDecoding(e.to_string()))?;
        Self::decode_png(&data)
    }

    /// Encodes picture into a PNG data.
    ///
    /// Colors are unassociated first, since PNG stores straight alpha.
    #[cfg(feature = "png-format")]
    pub fn encode_png(&self) -> Result<Vec<u8>, Error> {
        fn encoding_error<E: core::fmt::Display>(e: E) -> Error {
            Error::PngEncoding(e.to_string())
        }

        let rgba = self.to_rgba();
        let mut data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().map_err(encoding_error)?;
            writer.write_image_data(&rgba).map_err(encoding_error)?;
        }

        Ok(data)
    }

    /// Saves picture as a PNG file.
    #[cfg(feature = "png-format")]
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Error> {
        let data = self.encode_png()?;
        std::fs::write(path, data).map_err(|e| Error::PngEncoding(e.to_string()))
    }

    /// Returns picture's width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns picture's height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of pixels in a row, including padding.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Returns picture's bounds as a rect at (0, 0).
    #[inline]
    pub fn bounds(&self) -> IntRect {
        // Dimensions are validated by `Picture::new`.
        let w = LengthU32::new(self.width).unwrap_or(LengthU32::MIN);
        let h = LengthU32::new(self.height).unwrap_or(LengthU32::MIN);
        IntRect::from_size(w, h)
    }

    /// Returns picture's flags.
    #[inline]
    pub fn flags(&self) -> PictureFlags {
        self.flags
    }

    /// Checks that pixels are premultiplied.
    #[inline]
    pub fn is_associated(&self) -> bool {
        self.flags.contains(PictureFlags::ASSOCIATED)
    }

    /// Checks that the picture has no translucent pixels.
    ///
    /// Valid only after `analyze` or an import.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        !self.flags.contains(PictureFlags::COMPOSITE)
    }

    /// Clears the dirty flag, returning its previous state.
    pub fn take_dirty(&mut self) -> bool {
        let dirty = self.flags.contains(PictureFlags::DIRTY);
        self.flags.remove(PictureFlags::DIRTY);
        dirty
    }

    pub(crate) fn set_associated(&mut self, associated: bool) {
        self.flags.set(PictureFlags::ASSOCIATED, associated);
    }

    pub(crate) fn set_translucency(&mut self, composite: bool) {
        self.flags.set(PictureFlags::COMPOSITE, composite);
        self.flags.remove(PictureFlags::MASK);
    }

    pub(crate) fn insert_flags(&mut self, flags: PictureFlags) {
        self.flags.insert(flags);
    }

    pub(crate) fn remove_flags(&mut self, flags: PictureFlags) {
        self.flags.remove(flags);
    }

    // Used by operations that move pixels around without changing them.
    pub(crate) fn copy_flags(&mut self, other: &Picture) {
        self.flags = other.flags;
        self.mark_modified();
    }

    pub(crate) fn mark_modified(&mut self) {
        self.flags.remove(PictureFlags::UNINITIALIZED);
        self.flags.insert(PictureFlags::DIRTY);
    }

    /// Returns a pixel.
    ///
    /// Returns `None` when position is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.data.get(self.index(x, y)).cloned()
    }

    /// Sets a pixel.
    ///
    /// The pixel must already be in the picture's association state.
    /// Returns `None` when position is out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, p: Pixel) -> Option<()> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.index(x, y);
        *self.data.get_mut(idx)? = p;
        self.mark_modified();
        Some(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride as usize + x as usize
    }

    /// Returns a row of pixels without padding.
    ///
    /// # Panics
    ///
    /// When `y` is out of bounds.
    #[inline]
    pub fn row(&self, y: u32) -> &[Pixel] {
        let start = self.index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Returns a mutable row of pixels without padding.
    ///
    /// # Panics
    ///
    /// When `y` is out of bounds.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [Pixel] {
        self.mark_modified();
        let start = self.index(0, y);
        let width = self.width as usize;
        &mut self.data[start..start + width]
    }

    /// Returns an iterator over rows without padding.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        let width = self.width as usize;
        self.data.chunks_exact(self.stride as usize).map(move |row| &row[..width])
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Pixel]> {
        self.mark_modified();
        let width = self.width as usize;
        self.data.chunks_exact_mut(self.stride as usize).map(move |row| &mut row[..width])
    }

    /// Returns an iterator over all pixels in row order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.rows().flat_map(|row| row.iter().cloned())
    }

    /// Returns the internal data, including row padding.
    ///
    /// Byteorder: RGBA
    pub fn data(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Premultiplies color channels by alpha.
    ///
    /// Does nothing when the picture is already associated.
    pub fn associate(&mut self) {
        if self.is_associated() {
            return;
        }

        for row in self.rows_mut() {
            for p in row {
                *p = p.associate();
            }
        }

        self.flags.insert(PictureFlags::ASSOCIATED);
    }

    /// Divides color channels by alpha.
    ///
    /// Does nothing when the picture is not associated.
    pub fn unassociate(&mut self) {
        if !self.is_associated() {
            return;
        }

        for row in self.rows_mut() {
            for p in row {
                *p = p.unassociate();
            }
        }

        self.flags.remove(PictureFlags::ASSOCIATED);
    }

    /// Recomputes `GREYSCALE`, `COMPOSITE` and `MASK` flags from pixels.
    pub fn analyze(&mut self) {
        let mut greyscale = true;
        let mut composite = false;
        let mut translucent = false;
        for p in self.pixels() {
            greyscale &= p.is_grey();
            match p.alpha() {
                crate::ALPHA_U8_OPAQUE => {}
                crate::ALPHA_U8_TRANSPARENT => composite = true,
                _ => {
                    composite = true;
                    translucent = true;
                }
            }
        }

        self.flags.set(PictureFlags::GREYSCALE, greyscale);
        self.flags.set(PictureFlags::COMPOSITE, composite);
        self.flags.set(PictureFlags::MASK, composite && !translucent);
    }

    /// Fills the entire picture with a specified color.
    pub fn fill(&mut self, color: ColorU8) {
        let p = Pixel::from(color.premultiply());
        for row in self.rows_mut() {
            for pixel in row {
                *pixel = p;
            }
        }

        self.set_fill_flags(color);
    }

    /// Fills a rectangle with a specified color.
    ///
    /// The rect is clipped to the picture bounds.
    pub fn fill_rect(&mut self, rect: IntRect, color: ColorU8) {
        let rect = match self.bounds().intersect(&rect) {
            Some(v) => v,
            None => return,
        };

        self.associate();
        let p = Pixel::from(color.premultiply());
        for y in rect.top()..rect.bottom() {
            let row = self.row_mut(y as u32);
            for pixel in &mut row[rect.left() as usize..rect.right() as usize] {
                *pixel = p;
            }
        }

        if !color.is_opaque() {
            self.set_translucency(true);
        }
        if !Pixel::from(color).is_grey() {
            self.flags.remove(PictureFlags::GREYSCALE);
        }
    }

    fn set_fill_flags(&mut self, color: ColorU8) {
        self.flags.insert(PictureFlags::ASSOCIATED);
        let p = Pixel::from(color);
        self.flags.set(PictureFlags::GREYSCALE, p.is_grey());
        self.flags.set(PictureFlags::COMPOSITE, !color.is_opaque());
        self.flags.set(PictureFlags::MASK, color.alpha() == 0);
    }

    /// Changes picture's size.
    ///
    /// Preserves the top-left region that fits into both sizes
    /// and fills the new area with transparent black.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == self.width && height == self.height {
            return Ok(());
        }

        let (stride, mut data) = alloc_pixels(width, height)?;
        let w = width.min(self.width) as usize;
        for y in 0..height.min(self.height) {
            let start = y as usize * stride as usize;
            data[start..start + w].copy_from_slice(&self.row(y)[..w]);
        }

        let grows = width > self.width || height > self.height;
        self.data = data;
        self.width = width;
        self.height = height;
        self.stride = stride;
        self.mark_modified();
        if grows {
            self.set_translucency(true);
        }

        Ok(())
    }

    /// Returns a copy of the picture that intersects the `rect`.
    ///
    /// Returns `None` when `rect` doesn't overlap the picture.
    pub fn clone_rect(&self, rect: IntRect) -> Option<Picture> {
        let rect = self.bounds().intersect(&rect)?;
        let mut new = Picture::new(rect.width(), rect.height()).ok()?;
        new.flags = self.flags;
        let x = rect.x() as usize;
        for (y, row) in (rect.top()..rect.bottom()).zip(new.rows_mut()) {
            row.copy_from_slice(&self.row(y as u32)[x..x + rect.width() as usize]);
        }

        Some(new)
    }

    /// Copies a region of `src` into the picture at the specified position.
    ///
    /// Pixels are replaced, not blended. The region is clipped to both pictures.
    /// `src` pixels are converted into this picture's association state.
    pub fn copy_from(&mut self, src: &Picture, src_rect: IntRect, dest_x: i32, dest_y: i32) {
        let (s, d) = match clip_regions(src, src_rect, self, dest_x, dest_y) {
            Some(v) => v,
            None => return,
        };

        let convert = src.is_associated() != self.is_associated();
        let associate = self.is_associated();
        for dy in 0..d.height() {
            let src_row = src.row(s.y() as u32 + dy);
            let src_row = &src_row[s.left() as usize..s.right() as usize];
            let dest_row = self.row_mut(d.y() as u32 + dy);
            let dest_row = &mut dest_row[d.left() as usize..d.right() as usize];
            if convert {
                for (dp, sp) in dest_row.iter_mut().zip(src_row) {
                    *dp = if associate { sp.associate() } else { sp.unassociate() };
                }
            } else {
                dest_row.copy_from_slice(src_row);
            }
        }

        if src.flags.contains(PictureFlags::COMPOSITE) {
            self.set_translucency(true);
        }
        if !src.flags.contains(PictureFlags::GREYSCALE) {
            self.flags.remove(PictureFlags::GREYSCALE);
        }
    }

    /// Mirrors the picture left-to-right.
    pub fn flip_horizontal(&mut self) {
        for row in self.rows_mut() {
            row.reverse();
        }
    }

    /// Mirrors the picture top-to-bottom.
    pub fn flip_vertical(&mut self) {
        let stride = self.stride as usize;
        let width = self.width as usize;
        let height = self.height as usize;
        for y in 0..height / 2 {
            let (top, bottom) = self.data.split_at_mut((height - 1 - y) * stride);
            top[y * stride..y * stride + width].swap_with_slice(&mut bottom[..width]);
        }

        self.mark_modified();
    }

    /// Converts colors into greys using BT.601 luminance.
    ///
    /// Alpha is preserved.
    pub fn greyscale(&mut self) {
        for row in self.rows_mut() {
            for p in row.iter_mut() {
                let l = luminance(*p);
                *p = Pixel::from_rgba(l, l, l, p.alpha());
            }
        }

        self.flags.insert(PictureFlags::GREYSCALE);
    }

    /// Scales picture's alpha by `opacity / 255`.
    pub fn fade(&mut self, opacity: u8) {
        if opacity == crate::ALPHA_U8_OPAQUE {
            return;
        }

        self.associate();
        let opacity = u32::from(opacity);
        for row in self.rows_mut() {
            for p in row.iter_mut() {
                *p = Pixel::from_rgba(
                    mul_255(u32::from(p.red()), opacity) as u8,
                    mul_255(u32::from(p.green()), opacity) as u8,
                    mul_255(u32::from(p.blue()), opacity) as u8,
                    mul_255(u32::from(p.alpha()), opacity) as u8,
                );
            }
        }

        self.set_translucency(true);
    }
}

impl PartialEq for Picture {
    /// Compares sizes and visible pixels.
    ///
    /// Row padding and flags are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width &&
        self.height == other.height &&
        self.rows().zip(other.rows()).all(|(a, b)| a == b)
    }
}

impl core::fmt::Debug for Picture {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Picture")
            .field("data", &"...")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("flags", &self.flags)
            .finish()
    }
}

/// Returns BT.601 luminance of a pixel.
#[inline]
pub(crate) fn luminance(p: Pixel) -> u8 {
    let l = 299 * u32::from(p.red()) + 587 * u32::from(p.green()) + 114 * u32::from(p.blue());
    ((l + 500) / 1000) as u8
}

/// Clips a source region placed at `(dest_x, dest_y)` against both pictures.
///
/// Returns matching source and destination rects of equal size.
pub(crate) fn clip_regions(
    src: &Picture,
    src_rect: IntRect,
    dest: &Picture,
    dest_x: i32,
    dest_y: i32,
) -> Option<(IntRect, IntRect)> {
    let s = src.bounds().intersect(&src_rect)?;
    // Shift the destination origin by the part of `src_rect` clipped away.
    let dx = dest_x.checked_add(s.x() - src_rect.x())?;
    let dy = dest_y.checked_add(s.y() - src_rect.y())?;
    let d = IntRect::from_xywh(dx, dy, s.width(), s.height())?;
    let d = dest.bounds().intersect(&d)?;
    let s = IntRect::from_xywh(s.x() + (d.x() - dx), s.y() + (d.y() - dy), d.width(), d.height())?;
    Some((s, d))
}

fn alloc_pixels(width: u32, height: u32) -> Result<(u32, Vec<Pixel>), Error> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(Error::InvalidDimension { width, height });
    }

    let stride = (width + STRIDE_ALIGNMENT - 1) / STRIDE_ALIGNMENT * STRIDE_ALIGNMENT;
    let len = usize::try_from(u64::from(stride) * u64::from(height))
        .map_err(|_| Error::AllocationFailed(usize::MAX))?;

    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| Error::AllocationFailed(len))?;
    data.resize(len, Pixel::TRANSPARENT);
    Ok((stride, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_aligned() {
        let picture = Picture::new(5, 3).unwrap();
        assert_eq!(picture.stride(), 8);
        assert_eq!(picture.data().len(), 8 * 3 * BYTES_PER_PIXEL);
        assert_eq!(picture.row(2).len(), 5);
    }

    #[test]
    fn clip_partially_outside() {
        let src = Picture::new(4, 4).unwrap();
        let dest = Picture::new(4, 4).unwrap();
        let (s, d) = clip_regions(&src, src.bounds(), &dest, -1, 2).unwrap();
        assert_eq!(s, IntRect::from_xywh(1, 0, 3, 2).unwrap());
        assert_eq!(d, IntRect::from_xywh(0, 2, 3, 2).unwrap());
    }

    #[test]
    fn clip_outside() {
        let src = Picture::new(4, 4).unwrap();
        let dest = Picture::new(4, 4).unwrap();
        assert!(clip_regions(&src, src.bounds(), &dest, 4, 0).is_none());
        assert!(clip_regions(&src, IntRect::from_xywh(10, 10, 2, 2).unwrap(), &dest, 0, 0).is_none());
    }

    #[test]
    fn luminance_of_primaries() {
        assert_eq!(luminance(Pixel::from_rgba(255, 255, 255, 255)), 255);
        assert_eq!(luminance(Pixel::from_rgba(0, 0, 0, 255)), 0);
        assert_eq!(luminance(Pixel::from_rgba(255, 0, 0, 255)), 76);
    }
}
