//! PNG output: an annotation layer composited over optional background and
//! foreground images.

use crate::draw::{CairoSurface, LabelFont};
use anyhow::{Context as _, Result};
use std::fs::File;
use std::path::Path;

/// Default canvas size when neither a background nor explicit dimensions are given.
pub const DEFAULT_SIZE: (i32, i32) = (800, 600);

/// Loads a PNG image drawn underneath the annotations.
pub fn load_image(path: &Path) -> Result<cairo::ImageSurface> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open image {}", path.display()))?;
    let image = cairo::ImageSurface::create_from_png(&mut file)
        .with_context(|| format!("Failed to decode PNG image {}", path.display()))?;
    log::debug!(
        "Loaded image {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Picks the canvas size: explicit dimensions win, then the first image's, then the default.
pub fn canvas_size(
    image: Option<&cairo::ImageSurface>,
    width: Option<i32>,
    height: Option<i32>,
) -> (i32, i32) {
    let (base_width, base_height) = image
        .map(|image| (image.width(), image.height()))
        .unwrap_or(DEFAULT_SIZE);
    (width.unwrap_or(base_width), height.unwrap_or(base_height))
}

/// Transparent layer the engine renders annotations onto.
///
/// Kept separate from the background because every frame clears the whole
/// drawing surface.
pub struct AnnotationLayer {
    image: cairo::ImageSurface,
    ctx: cairo::Context,
    width: i32,
    height: i32,
}

impl AnnotationLayer {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        anyhow::ensure!(
            width > 0 && height > 0,
            "Canvas size must be positive, got {}x{}",
            width,
            height
        );
        let image = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
            .context("Failed to create annotation layer")?;
        let ctx = cairo::Context::new(&image).context("Failed to create cairo context")?;
        Ok(Self {
            image,
            ctx,
            width,
            height,
        })
    }

    /// Drawing surface over this layer.
    pub fn surface(&self, font: &LabelFont) -> CairoSurface<'_> {
        CairoSurface::new(&self.ctx, self.width as f64, self.height as f64, font)
    }

    /// Composites the layer over `underlays` and writes the result as PNG.
    ///
    /// Underlays are painted in order (background first, then foreground),
    /// each anchored at the top-left corner.
    pub fn write_png(&self, underlays: &[cairo::ImageSurface], path: &Path) -> Result<()> {
        let output = cairo::ImageSurface::create(cairo::Format::ARgb32, self.width, self.height)
            .context("Failed to create output image")?;
        {
            let ctx = cairo::Context::new(&output).context("Failed to create cairo context")?;
            for image in underlays {
                ctx.set_source_surface(image, 0.0, 0.0)?;
                ctx.paint()?;
            }
            self.image.flush();
            ctx.set_source_surface(&self.image, 0.0, 0.0)?;
            ctx.paint()?;
        }
        output.flush();

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        output
            .write_to_png(&mut file)
            .with_context(|| format!("Failed to write PNG to {}", path.display()))?;

        log::info!("Wrote {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}
