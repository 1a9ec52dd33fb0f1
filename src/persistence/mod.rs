pub mod files;
pub mod millis;
pub mod store;

pub use files::{atomic_write, default_data_file, find_local_dir, init_local_dir, read_file};
pub use store::{AppData, JsonStore, Revision, Store};
