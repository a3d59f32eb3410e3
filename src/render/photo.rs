use std::sync::Arc;

use anyhow::Context;

use crate::{
    config::ExportCompression,
    foundation::{
        error::{BoothError, BoothResult},
        raster::Raster,
    },
    render::export::encode_png,
};

/// Encoded source photo.
///
/// Cloning shares the bytes; photos are replaced wholesale, never edited in place.
#[derive(Clone, PartialEq, Eq)]
pub struct Photo {
    bytes: Arc<[u8]>,
}

impl std::fmt::Debug for Photo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Photo")
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Photo {
    /// Wrap encoded image bytes (PNG, JPEG, ...). Nothing is decoded yet.
    pub fn from_encoded(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Arc::from(bytes.into()),
        }
    }

    /// Read an encoded photo from disk.
    pub fn from_path(path: &std::path::Path) -> BoothResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read photo '{}'", path.display()))?;
        Ok(Self::from_encoded(bytes))
    }

    /// Encode a raster losslessly as a new photo.
    pub fn from_raster(raster: &Raster) -> BoothResult<Self> {
        Ok(Self::from_encoded(encode_png(
            raster,
            ExportCompression::Fast,
        )?))
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode at natural resolution.
    pub fn decode(&self) -> BoothResult<Raster> {
        let img = image::load_from_memory(&self.bytes)
            .map_err(|e| BoothError::decode(format!("photo: {e}")))?;
        Ok(Raster::from_image(img.to_rgba8()))
    }
}

/// Copy of `photos` with the entry at `index` swapped for `photo`.
///
/// `None` when `index` is out of range. Photos share their bytes, so the copy is cheap.
pub fn with_replaced_at(photos: &[Photo], index: usize, photo: Photo) -> Option<Vec<Photo>> {
    if index >= photos.len() {
        return None;
    }
    let mut out = photos.to_vec();
    out[index] = photo;
    Some(out)
}
