//! Photo uploads and cache-directory storage for stockroom
//!
//! - [`Multipart`] parses `multipart/form-data` bodies with multer, keeping
//!   binary file parts intact.
//! - [`LocalStorage`] owns the cache directory: it creates it at startup and
//!   writes uploads under timestamp-derived names.
//!
//! ```no_run
//! use stockroom_storage::*;
//!
//! # async fn example() -> Result<()> {
//! let storage = LocalStorage::new("./cache").await?;
//! let file = UploadedFile::from_bytes(&b"..."[..], "widget.png");
//! let metadata = storage.put_file(&file).await?;
//! println!("Stored as {}", metadata.key);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod file;
pub mod local;
pub mod multipart;
pub mod storage;

pub use error::*;
pub use file::*;
pub use local::*;
pub use multipart::*;
pub use storage::*;
