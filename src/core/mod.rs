// Core modules implementing the node model, dispatch, links, and error modeling.
pub mod decode;
pub mod encode;
pub mod error;
pub mod kind;
pub mod link;
pub mod node;
