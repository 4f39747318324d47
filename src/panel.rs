//! Explicit render target for composed side-by-side views.
//!
//! Rather than pushing panels into ambient plotting state, a [`PanelGrid`] is
//! created once per run, panels are placed into named cells, and the finished
//! composition is taken out as a single image.

use image::{GrayImage, Rgb, RgbImage};

/// A fixed grid of equally sized image cells composited onto one canvas.
///
/// Cells start out white. Placement indices and panel sizes are programmer
/// errors when out of range, not runtime conditions, and are asserted.
#[derive(Debug, Clone)]
pub struct PanelGrid {
    rows: u32,
    cols: u32,
    cell_width: u32,
    cell_height: u32,
    canvas: RgbImage,
}

impl PanelGrid {
    /// Create a `rows × cols` grid of `cell_width × cell_height` cells.
    pub fn new(rows: u32, cols: u32, cell_width: u32, cell_height: u32) -> Self {
        assert!(rows > 0 && cols > 0, "grid must have at least one cell");
        assert!(
            cell_width > 0 && cell_height > 0,
            "cells must have a non-zero size"
        );
        Self {
            rows,
            cols,
            cell_width,
            cell_height,
            canvas: RgbImage::from_pixel(cols * cell_width, rows * cell_height, Rgb([255, 255, 255])),
        }
    }

    /// Place a color panel into cell (`row`, `col`), anchored at the cell's
    /// top-left corner. The panel must fit the cell.
    pub fn place(&mut self, row: u32, col: u32, panel: &RgbImage) {
        assert!(row < self.rows && col < self.cols, "cell index out of range");
        assert!(
            panel.width() <= self.cell_width && panel.height() <= self.cell_height,
            "panel does not fit its cell"
        );

        let x0 = col * self.cell_width;
        let y0 = row * self.cell_height;
        for (x, y, pixel) in panel.enumerate_pixels() {
            self.canvas.put_pixel(x0 + x, y0 + y, *pixel);
        }
    }

    /// Place a grayscale panel (e.g. a class mask) into cell (`row`, `col`).
    pub fn place_gray(&mut self, row: u32, col: u32, panel: &GrayImage) {
        assert!(row < self.rows && col < self.cols, "cell index out of range");
        assert!(
            panel.width() <= self.cell_width && panel.height() <= self.cell_height,
            "panel does not fit its cell"
        );

        let x0 = col * self.cell_width;
        let y0 = row * self.cell_height;
        for (x, y, pixel) in panel.enumerate_pixels() {
            let v = pixel.0[0];
            self.canvas.put_pixel(x0 + x, y0 + y, Rgb([v, v, v]));
        }
    }

    /// Finish the composition and take the canvas.
    pub fn into_image(self) -> RgbImage {
        self.canvas
    }
}
