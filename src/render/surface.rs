use crate::{
    effects::blend::over_in_place,
    foundation::{
        core::{Canvas, Rgba8},
        error::{BoothError, BoothResult},
        raster::Raster,
    },
    render::paint::{dims_u16, premul_bytes_to_pixmap},
};

/// Premultiplied RGBA8 render target.
pub struct Surface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Transparent surface covering `canvas`.
    pub fn new(canvas: Canvas) -> BoothResult<Self> {
        let (width, height) = dims_u16(canvas.width, canvas.height)?;
        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    /// Surface holding a copy of `raster`.
    pub fn from_raster(raster: &Raster) -> BoothResult<Self> {
        let (width, height) = dims_u16(raster.width(), raster.height())?;
        let pixmap = premul_bytes_to_pixmap(&raster.to_premul(), raster.width(), raster.height())?;
        Ok(Self {
            width,
            height,
            pixmap,
        })
    }

    /// Backing size.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    /// Fill every pixel with one color.
    pub fn clear(&mut self, color: Rgba8) {
        let premul = color.to_premul();
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    /// Overwrite every pixel with `shade(x, y)`.
    pub(crate) fn shade(&mut self, shade: impl Fn(u32, u32) -> Rgba8) {
        let width = usize::from(self.width);
        for (i, px) in self
            .pixmap
            .data_as_u8_slice_mut()
            .chunks_exact_mut(4)
            .enumerate()
        {
            let (x, y) = ((i % width) as u32, (i / width) as u32);
            px.copy_from_slice(&shade(x, y).to_premul());
        }
    }

    /// Rasterize one layer with `draw` and composite it over the current contents.
    pub(crate) fn draw_layer(
        &mut self,
        draw: impl FnOnce(&mut vello_cpu::RenderContext) -> BoothResult<()>,
    ) -> BoothResult<()> {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        draw(&mut ctx)?;
        ctx.flush();
        let mut layer = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut layer);
        over_in_place(
            self.pixmap.data_as_u8_slice_mut(),
            layer.data_as_u8_slice(),
        )
    }

    /// Premultiplied pixel bytes, row-major.
    pub fn premul_bytes(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Straight-alpha pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= u32::from(self.width) || y >= u32::from(self.height) {
            return None;
        }
        let i = (y as usize * usize::from(self.width) + x as usize) * 4;
        let px = self.premul_bytes().get(i..i + 4)?;
        let raster = Raster::from_premul(1, 1, px.to_vec()).ok()?;
        raster.pixel(0, 0)
    }

    /// Straight-alpha copy of the surface.
    pub fn to_raster(&self) -> BoothResult<Raster> {
        Raster::from_premul(
            u32::from(self.width),
            u32::from(self.height),
            self.premul_bytes().to_vec(),
        )
        .map_err(|e| BoothError::render(format!("surface readback: {e}")))
    }
}
