pub(crate) mod interpolation;
pub(crate) mod state;
