/*!
`tiny-picture` is a small raster picture engine.

It provides RGBA pictures with premultiplied alpha, brushes for painting
solid colors, gradients and patterns, compositing and blending,
filtered resampling, rotation, color quantization and dithering.

All operations are synchronous and work on in-memory pictures.
*/

#![doc(html_root_url = "https://docs.rs/tiny-picture/0.3.0")]
#![warn(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]

#![allow(clippy::collapsible_if)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::float_cmp)]
#![allow(clippy::identity_op)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

mod blend_mode;
mod brush;
mod color;
mod composite;
mod dither;
mod error;
mod filter;
mod fixed_point;
mod int_rect;
mod painter;
mod picture;
mod quantize;
mod random;
mod resample;
mod rotate;
mod scalar;

pub use blend_mode::BlendMode;
pub use brush::{BrushCommon, BrushKind, BrushType, PaintBrush, RepeatMode, SharedBrush};
pub use brush::{BrushCallback, BrushRegistry, ClientKey};
pub use brush::{Checker, Orientation, Stripe, Tile};
pub use brush::{ColorRamp, GradientStop};
pub use brush::{ConicalGradient, GradientColors, LinearGradient, RadialGradient};
pub use color::{ALPHA_U8_OPAQUE, ALPHA_U8_TRANSPARENT, AlphaU8};
pub use color::{Color, ColorU8, Pixel, PremultipliedColorU8};
pub use color::{demultiply_u8, premultiply_u8};
pub use composite::{apply_arithmetic, apply_arithmetic_scalar, blend, composite_over, cross_fade, ArithmeticOp};
pub use dither::{dither, ApproxTable};
pub use error::Error;
pub use filter::{parse_filter, Filter};
pub use fixed_point::FDot14;
pub use int_rect::IntRect;
pub use painter::Painter;
pub use picture::{Picture, PictureFlags, BYTES_PER_PIXEL, MAX_DIMENSION};
pub use quantize::{apply_lookup_table, quantize, split_color_space, Cube, Histogram, LookupTable, MAX_COLORS};
pub use random::{Jitter, Random};
pub use resample::{resample, scale_nearest, Sample, WeightTable};
pub use rotate::{rotate, rotate180, rotate270, rotate90, rotate_with, RotateMethod};

/// An integer length that is guarantee to be > 0
type LengthU32 = std::num::NonZeroU32;
