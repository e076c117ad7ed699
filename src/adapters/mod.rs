//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `classifier`   | CatClassifier      | SHA-256 digest stand-in      |
//! | `file_storage` | StoragePort        | one file per key on disk     |
//! | `log_sink`     | StatusListener     | `log` facade                 |
//! | `memory`       | StoragePort        | in-process `HashMap`         |
//! | `repository`   | StateStore         | any StoragePort (postcard)   |
//! |                | ConfigPort         |                              |

pub mod classifier;
pub mod file_storage;
pub mod log_sink;
pub mod memory;
pub mod repository;
