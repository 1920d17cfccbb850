//! CLI command implementations.

pub(crate) mod page;
pub(crate) mod update;

pub(crate) use page::PageArgs;
pub(crate) use update::UpdateArgs;
