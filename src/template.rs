pub(crate) mod builder;
pub(crate) mod classify;
pub(crate) mod document;
pub(crate) mod model;
