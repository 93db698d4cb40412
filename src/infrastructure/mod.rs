//! Filesystem locations inside the Zellij plugin sandbox, where the host
//! filesystem is mounted under `/host`.

pub mod paths;

pub use paths::{data_dir, expand_tilde, storage_file, trace_file};
