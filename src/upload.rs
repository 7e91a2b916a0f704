pub(crate) mod packed;
pub(crate) mod planar;
pub(crate) mod shared;
pub(crate) mod strategy;
