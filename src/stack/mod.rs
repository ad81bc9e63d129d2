pub(crate) mod anim_stack;
pub(crate) mod appearance;
