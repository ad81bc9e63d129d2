pub(crate) mod aligner;
