pub(crate) mod fit;
pub(crate) mod shapes;
pub(crate) mod templates;
