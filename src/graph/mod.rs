pub(crate) mod relation;
