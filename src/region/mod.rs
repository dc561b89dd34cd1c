pub(crate) mod blocks;
pub(crate) mod fault;
pub(crate) mod format;
pub(crate) mod integration;
pub(crate) mod layout;
pub(crate) mod queue;
pub(crate) mod slots;
