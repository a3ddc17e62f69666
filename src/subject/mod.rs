pub(crate) mod attr;
pub(crate) mod protocol;
