pub(crate) mod blend;
pub(crate) mod blur;
pub(crate) mod color;
pub(crate) mod filter;
pub(crate) mod tonal;
