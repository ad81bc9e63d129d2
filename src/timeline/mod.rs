pub(crate) mod builder;
pub(crate) mod built;
pub(crate) mod config;
pub(crate) mod lines;
pub(crate) mod schedule;
