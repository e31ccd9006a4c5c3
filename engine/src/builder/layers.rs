//! Ship Layers
//!
//! Raster inputs of the builder: one structural layer and optional rope and
//! electrical layers, all the same size. Pixel `(0, 0)` is the bottom-left corner
//! of the ship, matching y-up ship space; image rows are flipped on import.

use std::path::Path;

use crate::error::{BuildError, BuildResult};
use crate::material::ColorKey;

/// A color-keyed raster, stored bottom row first.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterLayer {
    width: u32,
    height: u32,
    pixels: Vec<ColorKey>,
}

impl RasterLayer {
    /// A layer filled with [`ColorKey::EMPTY`].
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![ColorKey::EMPTY; (width * height) as usize],
        }
    }

    /// Build a layer from a function of ship-space pixel coordinates.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> ColorKey) -> Self {
        let mut layer = Self::empty(width, height);
        for y in 0..height {
            for x in 0..width {
                layer.set(x, y, f(x, y));
            }
        }
        layer
    }

    /// Convert an image, flipping rows so the image bottom becomes `y = 0`.
    pub fn from_rgb_image(image: &image::RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self::from_fn(width, height, |x, y| {
            let pixel = image.get_pixel(x, height - 1 - y);
            ColorKey(pixel.0)
        })
    }

    pub fn load_png(path: &Path) -> BuildResult<Self> {
        let image = image::open(path).map_err(|e| BuildError::LayerImage {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::from_rgb_image(&image.to_rgb8()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> ColorKey {
        self.pixels[(x + y * self.width) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, color: ColorKey) {
        self.pixels[(x + y * self.width) as usize] = color;
    }

    /// Non-empty pixels in scan order (bottom row first, left to right).
    pub fn non_empty_pixels(&self) -> impl Iterator<Item = (u32, u32, ColorKey)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| {
                let color = self.get(x, y);
                (!color.is_empty()).then_some((x, y, color))
            })
        })
    }
}

/// All layers describing one ship.
#[derive(Debug, Clone)]
pub struct ShipDefinition {
    pub name: String,
    pub structural: RasterLayer,
    pub ropes: Option<RasterLayer>,
    pub electrical: Option<RasterLayer>,
}

impl ShipDefinition {
    pub fn new(name: impl Into<String>, structural: RasterLayer) -> Self {
        Self {
            name: name.into(),
            structural,
            ropes: None,
            electrical: None,
        }
    }

    pub fn with_ropes(mut self, ropes: RasterLayer) -> Self {
        self.ropes = Some(ropes);
        self
    }

    pub fn with_electrical(mut self, electrical: RasterLayer) -> Self {
        self.electrical = Some(electrical);
        self
    }

    /// Check that the optional layers match the structural layer size.
    pub fn validate_sizes(&self) -> BuildResult<()> {
        let (width, height) = (self.structural.width(), self.structural.height());
        for (name, layer) in [("rope", &self.ropes), ("electrical", &self.electrical)] {
            if let Some(layer) = layer {
                if layer.width() != width || layer.height() != height {
                    return Err(BuildError::LayerSizeMismatch {
                        layer: name,
                        width,
                        height,
                        actual_width: layer.width(),
                        actual_height: layer.height(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_rows_are_flipped() {
        let mut image = image::RgbImage::from_pixel(2, 2, image::Rgb([255, 255, 255]));
        // Top-left pixel in image space
        image.put_pixel(0, 0, image::Rgb([1, 2, 3]));
        let layer = RasterLayer::from_rgb_image(&image);
        assert_eq!(layer.get(0, 1), ColorKey::new(1, 2, 3));
        assert!(layer.get(0, 0).is_empty());
    }

    #[test]
    fn non_empty_scan_order() {
        let layer = RasterLayer::from_fn(2, 2, |x, y| {
            if x == y { ColorKey::new(0, 0, 0) } else { ColorKey::EMPTY }
        });
        let pixels: Vec<(u32, u32)> = layer.non_empty_pixels().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(pixels, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn mismatched_layers_are_rejected() {
        let def = ShipDefinition::new("test", RasterLayer::empty(4, 4)).with_ropes(RasterLayer::empty(3, 4));
        assert!(matches!(
            def.validate_sizes(),
            Err(BuildError::LayerSizeMismatch { layer: "rope", .. })
        ));
    }
}
