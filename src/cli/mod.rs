mod args;
mod paths;

pub use args::{split_known_args, Cli};
pub use paths::resolve_root;
