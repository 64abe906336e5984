//! File service: metadata in a repository, payloads in an object store

mod service;


pub use service::{FileService, FileUpload};
