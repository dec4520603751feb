pub mod config_io;
pub mod local;
pub mod store;
