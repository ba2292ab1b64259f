//! In-memory RGB565 framebuffer.
//!
//! The toolkit renders the active screen into a [`FrameBuffer`]; the display
//! driver copies it out (SDL window in the simulator, SPI DMA on hardware).
//! Pixels outside the buffer are dropped.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Heap-backed framebuffer implementing `DrawTarget`.
pub struct FrameBuffer {
    size: Size,
    pixels: Box<[Rgb565]>,
}

impl FrameBuffer {
    /// Create a buffer of `width` x `height` pixels cleared to black.
    pub fn new(
        width: u32,
        height: u32,
    ) -> Self {
        let len = width as usize * height as usize;
        Self {
            size: Size::new(width, height),
            pixels: vec![Rgb565::BLACK; len].into_boxed_slice(),
        }
    }

    /// Row-major pixel data.
    #[inline]
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// Color at `point`, `None` outside the buffer.
    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<Rgb565> {
        self.index(point).map(|idx| self.pixels[idx])
    }

    #[inline]
    fn index(
        &self,
        point: Point,
    ) -> Option<usize> {
        if point.x >= 0 && point.y >= 0 && (point.x as u32) < self.size.width && (point.y as u32) < self.size.height {
            Some(point.y as usize * self.size.width as usize + point.x as usize)
        } else {
            None
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(idx) = self.index(point) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.size == Size::zero() {
            return Ok(());
        }
        let width = self.size.width as usize;
        for y in area.rows() {
            let row = y as usize * width;
            let start = row + area.top_left.x as usize;
            let end = start + area.size.width as usize;
            self.pixels[start..end].fill(color);
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::PrimitiveStyle;

    use super::*;

    #[test]
    fn test_new_is_black() {
        let fb = FrameBuffer::new(4, 3);
        assert_eq!(fb.pixels().len(), 12);
        assert!(fb.pixels().iter().all(|&c| c == Rgb565::BLACK));
    }

    #[test]
    fn test_out_of_bounds_pixels_are_dropped() {
        let mut fb = FrameBuffer::new(4, 4);
        Pixel(Point::new(-1, 0), Rgb565::RED).draw(&mut fb).ok();
        Pixel(Point::new(4, 0), Rgb565::RED).draw(&mut fb).ok();
        Pixel(Point::new(1, 2), Rgb565::RED).draw(&mut fb).ok();
        assert_eq!(fb.pixel(Point::new(1, 2)), Some(Rgb565::RED));
        assert_eq!(fb.pixel(Point::new(4, 0)), None);
        assert_eq!(fb.pixels().iter().filter(|&&c| c == Rgb565::RED).count(), 1);
    }

    #[test]
    fn test_fill_solid_clips_to_buffer() {
        let mut fb = FrameBuffer::new(10, 10);
        Rectangle::new(Point::new(8, 8), Size::new(5, 5))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::BLUE))
            .draw(&mut fb)
            .ok();
        assert_eq!(fb.pixel(Point::new(9, 9)), Some(Rgb565::BLUE));
        assert_eq!(fb.pixel(Point::new(7, 7)), Some(Rgb565::BLACK));
        assert_eq!(fb.pixels().iter().filter(|&&c| c == Rgb565::BLUE).count(), 4);
    }
}
