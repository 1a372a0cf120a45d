use crate::model::Rect;
use image::RgbaImage;

/// Copy `src` into `canvas` so that it covers `dest`.
///
/// Pixels are copied as-is (no blending). When `src` differs in size from
/// `dest` it is sampled nearest-neighbour. Destination pixels falling outside
/// the canvas are skipped.
pub fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, dest: &Rect) {
    let (sw, sh) = src.dimensions();
    if sw == 0 || sh == 0 {
        return;
    }
    let (cw, ch) = canvas.dimensions();
    let same_size = sw == dest.width && sh == dest.height;
    for yy in 0..dest.height {
        let cy = dest.y + yy;
        if cy >= ch {
            break;
        }
        let sy = if same_size {
            yy
        } else {
            nearest(yy, dest.height, sh)
        };
        for xx in 0..dest.width {
            let cx = dest.x + xx;
            if cx >= cw {
                break;
            }
            let sx = if same_size {
                xx
            } else {
                nearest(xx, dest.width, sw)
            };
            canvas.put_pixel(cx, cy, *src.get_pixel(sx, sy));
        }
    }
}

/// Source index for destination index `d` when mapping `dst_len` onto `src_len` samples.
fn nearest(d: u32, dst_len: u32, src_len: u32) -> u32 {
    let s = ((d as u64 * 2 + 1) * src_len as u64) / (dst_len as u64 * 2);
    (s as u32).min(src_len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn copies_pixels_verbatim() {
        let mut src = RgbaImage::new(2, 2);
        src.put_pixel(0, 0, Rgba([1, 2, 3, 4]));
        src.put_pixel(1, 1, Rgba([5, 6, 7, 0]));
        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 9]));
        blit_rgba(&src, &mut canvas, &Rect::new(1, 1, 2, 2));
        assert_eq!(*canvas.get_pixel(1, 1), Rgba([1, 2, 3, 4]));
        // alpha 0 still overwrites: no blending
        assert_eq!(*canvas.get_pixel(2, 2), Rgba([5, 6, 7, 0]));
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([9, 9, 9, 9]));
    }

    #[test]
    fn upscales_nearest() {
        let mut src = RgbaImage::new(2, 1);
        src.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        src.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        let mut canvas = RgbaImage::new(4, 2);
        blit_rgba(&src, &mut canvas, &Rect::new(0, 0, 4, 2));
        assert_eq!(*canvas.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*canvas.get_pixel(2, 0), Rgba([0, 0, 255, 255]));
    }
}
