//! Page rasterization for pixel sampling.
//!
//! Contrast measurement needs actual pixel colors, not just declared fill
//! operators. This module defines the [`PageRenderer`] seam together with a
//! built-in flat rasterizer, and a per-scan cache so each page is rendered
//! at most once per zoom factor.
//!
//! # Example
//!
//! ```
//! use preflight::raster::{FlatRasterizer, PageRenderer};
//! use preflight::model::Page;
//!
//! let page = Page::letter(1);
//! let pixmap = FlatRasterizer.render(&page, 1.0).unwrap();
//! assert_eq!(pixmap.width(), 612);
//! ```

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::model::Page;
use std::cell::RefCell;
use std::rc::Rc;

/// An RGB raster with y pointing down, in device pixels.
#[derive(Debug, Clone)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Pixmap {
    /// Create a pixmap filled with the given color.
    pub fn new(width: u32, height: u32, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; (width as usize) * (height as usize)],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at (x, y), or `None` outside the raster.
    ///
    /// Signed coordinates let callers walk sampling windows across the
    /// raster edge without pre-clamping.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgb> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Set the pixel at (x, y); out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)] = color;
    }

    /// Fill a pixel-space rectangle, clipped to the raster.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb) {
        let x_start = x0.max(0);
        let y_start = y0.max(0);
        let x_end = x1.min(self.width as i64);
        let y_end = y1.min(self.height as i64);
        for y in y_start..y_end {
            let row = (y as usize) * (self.width as usize);
            for x in x_start..x_end {
                self.pixels[row + x as usize] = color;
            }
        }
    }
}

/// Renders a page to a pixmap at a given zoom factor.
///
/// The built-in [`FlatRasterizer`] covers text and vector fills; callers
/// with a full PDF renderer at hand can plug it in through
/// [`Preflight::with_renderer`](crate::Preflight::with_renderer) for
/// image-accurate sampling.
pub trait PageRenderer {
    /// Rasterize `page` at `zoom` device pixels per point.
    ///
    /// The pixmap origin is the top-left corner of the page; a point
    /// (x, y) in page space maps to pixel (x * zoom, (height - y) * zoom).
    fn render(&self, page: &Page, zoom: f32) -> Result<Pixmap>;
}

/// Flat rasterizer: white canvas, declared fills, then text run boxes.
///
/// Each text run is painted as a solid box in its fill color, which is
/// enough for window-averaged color sampling. Images are left unpainted,
/// so text over an image samples against the page background instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatRasterizer;

impl FlatRasterizer {
    fn to_device(page: &Page, zoom: f32, x: f32, y: f32) -> (i64, i64) {
        let px = (x * zoom).round() as i64;
        let py = ((page.height - y) * zoom).round() as i64;
        (px, py)
    }
}

impl PageRenderer for FlatRasterizer {
    fn render(&self, page: &Page, zoom: f32) -> Result<Pixmap> {
        if !(zoom.is_finite()) || zoom <= 0.0 {
            return Err(Error::Render(format!("invalid zoom factor: {}", zoom)));
        }
        let width = (page.width * zoom).ceil().max(1.0) as u32;
        let height = (page.height * zoom).ceil().max(1.0) as u32;
        if width > 20_000 || height > 20_000 {
            return Err(Error::Render(format!(
                "raster too large: {}x{} pixels",
                width, height
            )));
        }

        let mut pixmap = Pixmap::new(width, height, Rgb::WHITE);

        for fill in &page.fills {
            let (x0, y1) = Self::to_device(page, zoom, fill.rect.left, fill.rect.bottom);
            let (x1, y0) = Self::to_device(page, zoom, fill.rect.right, fill.rect.top);
            pixmap.fill_rect(x0, y0, x1, y1, fill.color);
        }

        for run in &page.runs {
            if run.is_blank() {
                continue;
            }
            let (x0, y1) = Self::to_device(page, zoom, run.bbox.left, run.bbox.bottom);
            let (x1, y0) = Self::to_device(page, zoom, run.bbox.right, run.bbox.top);
            pixmap.fill_rect(x0, y0, x1, y1, run.color);
        }

        Ok(pixmap)
    }
}

/// Single-slot pixmap cache keyed by page number and zoom factor.
///
/// Sampling walks pages in order and re-requests the same page for every
/// run on it, so holding just the most recent render is enough; a full map
/// would pin every page of a long document in memory at once. Checks run
/// sequentially, so interior mutability is enough here.
#[derive(Default)]
pub struct RenderCache {
    slot: RefCell<Option<((u32, u32), Rc<Pixmap>)>>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered pixmap for `page` at `zoom`, rendering on a slot miss.
    pub fn page_pixmap(
        &self,
        renderer: &dyn PageRenderer,
        page: &Page,
        zoom: f32,
    ) -> Result<Rc<Pixmap>> {
        let key = (page.number, zoom.to_bits());
        if let Some((cached_key, pixmap)) = self.slot.borrow().as_ref() {
            if *cached_key == key {
                return Ok(Rc::clone(pixmap));
            }
        }
        let pixmap = Rc::new(renderer.render(page, zoom)?);
        *self.slot.borrow_mut() = Some((key, Rc::clone(&pixmap)));
        Ok(pixmap)
    }

    /// Number of cached pixmaps (0 or 1).
    pub fn len(&self) -> usize {
        if self.slot.borrow().is_some() {
            1
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.borrow().is_none()
    }
}
