pub(crate) mod compositor;
pub(crate) mod export;
pub(crate) mod frame;
pub(crate) mod glyph;
pub(crate) mod paint;
pub(crate) mod photo;
pub(crate) mod surface;
