//! Object store backends

mod disk;

pub use disk::DiskObjectStore;
