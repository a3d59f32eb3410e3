use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use image::{
    ImageEncoder,
    codecs::png::{CompressionType, FilterType, PngEncoder},
};

use crate::{
    config::{ExportCompression, ExportConfig},
    foundation::{
        error::{BoothError, BoothResult},
        raster::Raster,
    },
    render::surface::Surface,
};

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encoded composite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportBlob {
    /// PNG bytes from the streaming encoder.
    Png(Vec<u8>),
    /// `data:image/png;base64,...` URI from the fallback writer.
    DataUri(String),
}

impl ExportBlob {
    /// PNG bytes regardless of which path produced the blob.
    pub fn png_bytes(&self) -> BoothResult<Vec<u8>> {
        match self {
            ExportBlob::Png(bytes) => Ok(bytes.clone()),
            ExportBlob::DataUri(uri) => {
                let payload = uri
                    .strip_prefix(DATA_URI_PREFIX)
                    .ok_or_else(|| BoothError::encode("data uri is not a base64 png"))?;
                BASE64_STANDARD
                    .decode(payload)
                    .map_err(|e| BoothError::encode(format!("data uri payload: {e}")))
            }
        }
    }
}

/// Streaming PNG encode of a straight-alpha raster.
pub fn encode_png(raster: &Raster, compression: ExportCompression) -> BoothResult<Vec<u8>> {
    let compression = match compression {
        ExportCompression::Fast => CompressionType::Fast,
        ExportCompression::Default => CompressionType::Default,
        ExportCompression::Best => CompressionType::Best,
    };
    let mut out = Vec::new();
    PngEncoder::new_with_quality(&mut out, compression, FilterType::Adaptive)
        .write_image(
            raster.data(),
            raster.width(),
            raster.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| BoothError::encode(format!("png: {e}")))?;
    Ok(out)
}

/// Generic image writer producing a PNG data URI.
pub fn encode_data_uri(raster: &Raster) -> BoothResult<String> {
    let img = raster.to_image()?;
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, image::ImageFormat::Png)
        .map_err(|e| BoothError::encode(format!("png writer: {e}")))?;
    Ok(format!(
        "{DATA_URI_PREFIX}{}",
        BASE64_STANDARD.encode(cursor.into_inner())
    ))
}

/// Serialize a surface, falling back to a data URI when the PNG encoder fails.
#[tracing::instrument(skip(surface, config))]
pub fn export_surface(surface: &Surface, config: &ExportConfig) -> BoothResult<ExportBlob> {
    let raster = surface.to_raster()?;
    export_raster_with(&raster, |r| encode_png(r, config.compression))
}

pub(crate) fn export_raster_with(
    raster: &Raster,
    preferred: impl FnOnce(&Raster) -> BoothResult<Vec<u8>>,
) -> BoothResult<ExportBlob> {
    match preferred(raster) {
        Ok(bytes) => Ok(ExportBlob::Png(bytes)),
        Err(err) => {
            tracing::warn!(%err, "png encoder failed, using data uri fallback");
            encode_data_uri(raster).map(ExportBlob::DataUri)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
