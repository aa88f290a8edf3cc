mod avl_map;
mod iter;
mod node;
mod tests;

pub use avl_map::*;
pub use iter::*;
pub(crate) use node::*;
