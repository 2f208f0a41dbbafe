pub(crate) mod anchor;
pub(crate) mod layout;
pub(crate) mod sampler;
