//! Runtime and tool detection

pub mod check;

pub use check::{check_java, check_maven, check_runtimes, probe_version, RuntimeInfo};
