use crate::foundation::error::{BoothError, BoothResult};

/// A decoded image: straight-alpha RGBA8, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap raw straight RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> BoothResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| BoothError::validation("raster size overflow"))?;
        if width == 0 || height == 0 {
            return Err(BoothError::validation("raster dimensions must be > 0"));
        }
        if data.len() != expected {
            return Err(BoothError::validation(format!(
                "raster byte length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Solid-color raster.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> BoothResult<Self> {
        let data = rgba.repeat((width as usize) * (height as usize));
        Self::from_rgba8(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Straight RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable straight RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Premultiplied copy of the pixel data.
    pub fn to_premul(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = crate::foundation::math::mul_div255(u16::from(*c), a);
            }
        }
        out
    }

    /// Build from premultiplied RGBA8 bytes.
    pub fn from_premul(width: u32, height: u32, mut data: Vec<u8>) -> BoothResult<Self> {
        for px in data.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        Self::from_rgba8(width, height, data)
    }

    /// Copy of the sub-rectangle `[x, x+w) × [y, y+h)`, clamped to the raster bounds.
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> BoothResult<Self> {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let w = w.clamp(1, self.width - x);
        let h = h.clamp(1, self.height - y);
        let row_bytes = (w as usize) * 4;
        let mut data = Vec::with_capacity(row_bytes * h as usize);
        for row in y..y + h {
            let start = ((row as usize) * (self.width as usize) + x as usize) * 4;
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        Self::from_rgba8(w, h, data)
    }

    /// Resample to `width × height` with a triangle filter.
    pub fn resized(&self, width: u32, height: u32) -> BoothResult<Self> {
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }
        let img = self.to_image()?;
        let out = image::imageops::resize(
            &img,
            width.max(1),
            height.max(1),
            image::imageops::FilterType::Triangle,
        );
        Ok(Self::from_image(out))
    }

    /// Borrow into an `image` buffer (copies).
    pub fn to_image(&self) -> BoothResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| BoothError::validation("raster does not fit an RgbaImage"))
    }

    /// Take ownership of an `image` buffer.
    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}
