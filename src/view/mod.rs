pub(crate) mod mount;
