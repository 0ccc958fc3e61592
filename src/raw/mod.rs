mod arena;
mod balancer;
mod handle;
mod locator;
mod node;
mod raw_tree;

pub(crate) use raw_tree::RawTree;
