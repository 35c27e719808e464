//! Various commands that can be executed by flatvg
mod fuse;

pub use fuse::Fuse;
