// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card image loading for image parameters.  The bytes are decoded once to
// confirm they are a real image and to learn the MIME type; they are sent
// unchanged unless the profile asks for a smaller size.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use tracing::{debug, info, instrument};

use cardserv_core::error::{CardServicesError, Result};
use cardserv_core::production::ImageData;

/// An encoded image together with its decoded dimensions.
#[derive(Debug, Clone)]
pub struct CardImage {
    format: ImageFormat,
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl CardImage {
    /// Read and validate an image file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Validate encoded image bytes (PNG, JPEG, BMP...).
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&bytes)
            .map_err(|e| CardServicesError::Image(format!("unrecognised image data: {e}")))?;
        let decoded = image::load_from_memory_with_format(&bytes, format)
            .map_err(|e| CardServicesError::Image(format!("failed to decode {format:?} image: {e}")))?;
        debug!(
            ?format,
            width = decoded.width(),
            height = decoded.height(),
            "card image decoded"
        );
        Ok(Self {
            format,
            width: decoded.width(),
            height: decoded.height(),
            bytes,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Shrink to fit within the preferred box, preserving aspect ratio.
    ///
    /// Missing hints leave that dimension unconstrained.  Images that
    /// already fit are returned untouched; shrunk images are re-encoded as
    /// PNG.
    pub fn fit_within(self, preferred: (Option<u32>, Option<u32>)) -> Result<Self> {
        let max_w = preferred.0.unwrap_or(self.width);
        let max_h = preferred.1.unwrap_or(self.height);
        if self.width <= max_w && self.height <= max_h {
            return Ok(self);
        }

        let decoded = image::load_from_memory_with_format(&self.bytes, self.format)
            .map_err(|e| CardServicesError::Image(format!("failed to decode image: {e}")))?;
        let resized = decoded.resize(max_w, max_h, image::imageops::FilterType::Lanczos3);
        info!(
            from_w = self.width,
            from_h = self.height,
            to_w = resized.width(),
            to_h = resized.height(),
            "card image resized to preferred size"
        );
        Ok(Self {
            format: ImageFormat::Png,
            width: resized.width(),
            height: resized.height(),
            bytes: encode_png(&resized)?,
        })
    }

    /// The wire form bound to an image parameter.
    pub fn into_image_data(self) -> ImageData {
        ImageData {
            mime_type: self.mime_type().to_string(),
            data: self.bytes,
        }
    }
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| CardServicesError::Image(format!("PNG encoding failed: {e}")))?;
    Ok(buf.into_inner())
}
