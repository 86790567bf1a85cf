pub(crate) mod pixel;
pub(crate) mod square;
pub(crate) mod surface;
