pub mod drag;
pub mod filter;
pub mod partition;
pub mod resolver;
pub mod task_ops;
