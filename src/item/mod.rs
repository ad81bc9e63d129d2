pub(crate) mod commands;
pub(crate) mod data;
