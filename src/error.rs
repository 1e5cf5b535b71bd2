use std::path::PathBuf;

use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every failing precondition surfaces immediately as one of these variants; the
/// library performs no internal recovery or retries. Single-value operations are
/// all-or-nothing, while bulk writes may leave a prefix written when an underlying
/// I/O call fails mid-run (see [`crate::BinFile::put_many`]).
///
/// # Error Categories
///
/// ## Lifecycle Errors
/// - [`Error::Unavailable`] - The file could not be opened for read+write access
/// - [`Error::Closed`] - Any operation attempted after [`crate::BinFile::close`]
///
/// ## Access Errors
/// - [`Error::OutOfBounds`] - Read positioned or extending past the current size,
///   or an iterator stepped below offset zero
/// - [`Error::FileError`] - Filesystem I/O errors during read/write/seek/flush
/// - [`Error::InvalidUtf8`] - String data read from the file was not valid UTF-8
///
/// ## Iterator Errors
/// - [`Error::Unbound`] - A weak handle resolved after the store was dropped
/// - [`Error::InvalidComparison`] - Comparing iterators where either side no
///   longer resolves to a live store
///
/// # Examples
///
/// ```rust,no_run
/// use binfile::{BinFile, ByteOrder, Error};
///
/// match BinFile::open("/no/such/dir/data.bin", false, ByteOrder::Little) {
///     Ok(bin) => println!("opened {}", bin.path().display()),
///     Err(Error::Unavailable { path, source }) => {
///         eprintln!("cannot open {}: {}", path.display(), source);
///     }
///     Err(e) => eprintln!("error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The file could not be opened for simultaneous read and write access.
    ///
    /// Returned only by [`crate::BinFile::open`]. The path and the underlying
    /// I/O error are preserved for diagnostics.
    #[error("could not open '{}' for read+write: {source}", path.display())]
    Unavailable {
        /// The path that failed to open
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The file was closed and can no longer be used.
    ///
    /// [`crate::BinFile::close`] is terminal: once it has run, every operation on
    /// the store - directly or through an iterator - fails with this variant.
    /// Nothing resurrects a closed store.
    #[error("operation attempted on a closed file")]
    Closed,

    /// An out of bound access was attempted.
    ///
    /// Raised when the read cursor would be placed past the current end of the
    /// file, when a read would extend past it, or when an iterator is moved
    /// below offset zero. Writes are exempt - writing at or past the end is how
    /// the file grows.
    #[error("out of bounds access on binary file")]
    OutOfBounds,

    /// A weak handle was resolved after the underlying store was dropped.
    ///
    /// Iterators observe the store without keeping it alive. Dereferencing or
    /// stepping an iterator whose store is gone fails with this variant rather
    /// than yielding stale data.
    #[error("store no longer exists behind this handle")]
    Unbound,

    /// Two iterators were compared but at least one of them does not resolve.
    ///
    /// Comparing iterators whose stores are gone is an error in its own right,
    /// not `false`: equality is only defined between iterators over the same
    /// live store.
    #[error("comparing iterators that do not resolve to a live store")]
    InvalidComparison,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors raised by the operating system during read,
    /// write, seek or flush calls on an already-open file.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// String data read from the file was not valid UTF-8.
    ///
    /// Strings are stored as raw bytes with no length or encoding marker;
    /// reading one back through [`crate::BinFile::get_string`] validates it.
    #[error("{0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
