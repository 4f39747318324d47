//! Isolate the pixel mass of one point class by channel thresholding.
//!
//! Classes are printed as dark dots in a single color channel, so an
//! *inverted* binary threshold captures them: channel values strictly below
//! the threshold become foreground (255), everything else background (0).

use image::{GrayImage, RgbImage};

/// One of the three color channels of an [`RgbImage`], in RGB order.
///
/// Which channel marks which class is an encoding convention of the source
/// image, so it is explicit configuration rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Index of this channel within an RGB pixel.
    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

/// Configuration for mask extraction.
#[derive(Debug, Clone)]
pub struct MaskConfig {
    /// Intensity below which a channel value counts as foreground. The
    /// comparison is strict: a value equal to the threshold is background.
    /// Default: 50
    pub threshold: u8,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self { threshold: 50 }
    }
}

/// Extract the binary mask of one class from `image`.
///
/// The mask has the same dimensions as `image`; foreground pixels are 255 and
/// background pixels are 0. The input is not modified.
pub fn extract_mask(image: &RgbImage, channel: Channel, config: &MaskConfig) -> GrayImage {
    let idx = channel.index();
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let value = image.get_pixel(x, y).0[idx];
        if value < config.threshold {
            image::Luma([255])
        } else {
            image::Luma([0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn uniform_image(r: u8, g: u8, b: u8) -> RgbImage {
        RgbImage::from_pixel(4, 3, Rgb([r, g, b]))
    }

    #[test]
    fn threshold_is_exclusive_on_the_foreground_side() {
        let config = MaskConfig::default();

        let at_threshold = extract_mask(&uniform_image(50, 0, 0), Channel::Red, &config);
        assert!(at_threshold.pixels().all(|p| p.0[0] == 0));

        let below_threshold = extract_mask(&uniform_image(49, 0, 0), Channel::Red, &config);
        assert!(below_threshold.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn only_the_selected_channel_is_inspected() {
        // Dark in green, bright in red and blue.
        let img = uniform_image(200, 10, 200);
        let config = MaskConfig::default();

        let green = extract_mask(&img, Channel::Green, &config);
        assert!(green.pixels().all(|p| p.0[0] == 255));

        let red = extract_mask(&img, Channel::Red, &config);
        assert!(red.pixels().all(|p| p.0[0] == 0));

        let blue = extract_mask(&img, Channel::Blue, &config);
        assert!(blue.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn mask_matches_image_dimensions() {
        let mut img = RgbImage::from_pixel(7, 5, Rgb([255, 255, 255]));
        img.put_pixel(3, 2, Rgb([0, 255, 255]));

        let mask = extract_mask(&img, Channel::Red, &MaskConfig::default());
        assert_eq!(mask.dimensions(), (7, 5));
        assert_eq!(mask.get_pixel(3, 2).0[0], 255);
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
    }
}
