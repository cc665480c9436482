//! Clients for the two external HTTP boundaries: the cloud-disk file API
//! used for sync, and the body-composition inference API.

mod disk;
mod inference;

pub use disk::CloudDiskClient;
pub use inference::InferenceClient;
