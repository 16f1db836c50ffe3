use crate::*;
use ::image::{Pixel, Rgb};

pub const MARKER: Rgb<u8> = Rgb([0, 0, 0]);

/// How the outline of a block is stroked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderStyle {
    /// Outline of `[x, x + size) x [y, y + size)`; never leaves the block.
    Inset,

    /// Outline of `[x, x + size] x [y, y + size]`, so the right and bottom
    /// strokes land on the neighbouring blocks and get averaged into them
    /// if those are processed later.
    Overlapping,
}

impl Default for BorderStyle {
    fn default() -> Self {
        BorderStyle::Inset
    }
}

/// Replaces the block at `(x, y)` with its mean color and outlines it.
///
/// Returns the mean. `(x, y)` must lie inside the image.
pub fn average_block(
    img: &mut RgbImage,
    x: u32,
    y: u32,
    square_size: u32,
    border: BorderStyle,
) -> Rgb<u8> {
    let (width, height) = img.dimensions();
    let region = Region::block(x, y, square_size, width, height);

    debug_assert!(!region.is_empty(), "block origin outside of image");

    let mut sums = [0u64; 3];

    for py in region.y0..region.y1 {
        for px in region.x0..region.x1 {
            let channels = img.get_pixel(px, py).channels();

            for (sum, &channel) in sums.iter_mut().zip(channels) {
                *sum += channel as u64;
            }
        }
    }

    let count = (region.width() as u64) * (region.height() as u64);
    let mean = Rgb([
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    ]);

    for py in region.y0..region.y1 {
        for px in region.x0..region.x1 {
            img.put_pixel(px, py, mean);
        }
    }

    draw_border(img, x, y, square_size, border);

    mean
}

fn draw_border(img: &mut RgbImage, x: u32, y: u32, square_size: u32, border: BorderStyle) {
    let (width, height) = img.dimensions();

    let span = match border {
        BorderStyle::Inset => square_size - 1,
        BorderStyle::Overlapping => square_size,
    };

    let right = x.saturating_add(span);
    let bottom = y.saturating_add(span);

    let mut plot = |px: u32, py: u32| {
        if px < width && py < height {
            img.put_pixel(px, py, MARKER);
        }
    };

    for px in x..=right.min(width.saturating_sub(1)) {
        plot(px, y);
        plot(px, bottom);
    }

    for py in y..=bottom.min(height.saturating_sub(1)) {
        plot(x, py);
        plot(right, py);
    }
}

/// Whether `(px, py)` lies on the inset outline of the block at `(x, y)`.
pub fn is_border(px: u32, py: u32, x: u32, y: u32, square_size: u32) -> bool {
    let right = x.saturating_add(square_size - 1);
    let bottom = y.saturating_add(square_size - 1);

    (px == x || px == right) && (y..=bottom).contains(&py)
        || (py == y || py == bottom) && (x..=right).contains(&px)
}
