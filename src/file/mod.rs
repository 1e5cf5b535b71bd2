//! Binary file store with independent read and write cursors.
//!
//! This module provides [`crate::BinFile`], the owner of an open file resource
//! that exposes it as a flat sequence of fixed-width typed values. All byte
//! order handling is delegated to the codec in [`crate::file::io`]; all
//! iteration concerns live in [`crate::file::iter`].
//!
//! # Architecture
//!
//! The store keeps two independent byte cursors, one advanced only by read
//! operations and one only by write operations. Every operation seeks the
//! underlying file to the relevant cursor before touching it, so the physical
//! file position is never trusted between calls and interleaved reads and
//! writes cannot corrupt each other. The file's size is derived on demand by
//! seeking to the end - it is never cached, so it is always current even after
//! the file has grown.
//!
//! # Key Components
//!
//! - [`crate::file::BinFile`] - The store: lifecycle, cursors, typed access
//! - [`crate::file::ByteOrder`] - Byte order configuration selected at open time
//! - [`crate::file::io`] - Value codec used by every typed operation
//! - [`crate::file::iter`] - Shared handles, proxies and iterators over a store
//!
//! # Reading and Writing
//!
//! Reads are bounds-checked against the current size: positioning the read
//! cursor past the end, or reading a value that would extend past it, fails
//! with [`crate::Error::OutOfBounds`]. Writes have no upper bound - writing at
//! or past the end is how the file grows. Bytes between the old end and a far
//! write offset are whatever the platform provides for sparse extension
//! (zeros on the supported platforms); callers must not rely on any
//! particular fill value.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use binfile::{BinFile, ByteOrder};
//!
//! let mut bin = BinFile::open("data.bin", true, ByteOrder::Little)?;
//! bin.put(0xAABBCCDDu32)?;
//! bin.put(1.5f64)?;
//!
//! let head: u32 = bin.get_at(0)?;
//! assert_eq!(head, 0xAABBCCDD);
//! assert_eq!(bin.size()?, 12);
//! # Ok::<(), binfile::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! [`crate::BinFile`] is strictly single-threaded: the cursors are shared
//! mutable state and exactly one logical actor is expected to drive a store at
//! a time. Sharing across iterators goes through `Rc`, which enforces the
//! single-threaded contract at compile time.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::file::io::{decode, decode_at, encode, Scalar};
use crate::{Error, Result};

pub mod io;
pub mod iter;

/// Byte order used to store multi-byte values on disk.
///
/// Selected once, at [`BinFile::open`] time. Integral values are
/// byte-reversed when the configured order differs from the host's native
/// order; floating-point values are always stored host-native regardless of
/// this setting (see [`crate::file::io`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl ByteOrder {
    /// The byte order of the machine this code is running on.
    #[must_use]
    pub const fn native() -> ByteOrder {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }
}

/// A binary file opened for typed random access.
///
/// `BinFile` owns the underlying file resource and mediates every access to
/// it: typed single-value and bulk reads and writes, uninterpreted byte runs,
/// seeking of the independent read and write cursors, and the open/closed
/// lifecycle. Iteration over a store goes through
/// [`crate::file::iter::BinHandle`], which shares a `BinFile` by reference
/// count.
///
/// Closing is terminal: after [`BinFile::close`] every operation fails with
/// [`crate::Error::Closed`], and nothing reopens the store.
///
/// # Examples
///
/// ```rust,no_run
/// use binfile::{BinFile, ByteOrder};
///
/// let mut bin = BinFile::open("records.bin", false, ByteOrder::Big)?;
/// bin.put_many(&[10u16, 20, 30])?;
/// assert_eq!(bin.get_many::<u16>(3)?, vec![10, 20, 30]);
/// # Ok::<(), binfile::Error>(())
/// ```
#[derive(Debug)]
pub struct BinFile {
    /// Path the store was opened from, kept for diagnostics
    path: PathBuf,
    /// The open file, `None` once closed
    file: Option<File>,
    /// Configured on-disk byte order
    order: ByteOrder,
    /// Configured order differs from the host order
    swap: bool,
    /// Byte offset advanced only by read operations
    read_pos: u64,
    /// Byte offset advanced only by write operations
    write_pos: u64,
}

impl BinFile {
    /// Open a binary file for simultaneous read and write access.
    ///
    /// The file is created if it does not exist. When `truncate` is `true`
    /// any existing content is discarded; otherwise it is preserved. Both
    /// cursors start at offset 0 either way.
    ///
    /// # Arguments
    /// * `path` - The file to open or create
    /// * `truncate` - Discard existing content
    /// * `order` - Byte order for multi-byte values, see [`ByteOrder`]
    ///
    /// # Errors
    /// Returns [`crate::Error::Unavailable`] if the file cannot be opened for
    /// read+write, carrying the path and the underlying I/O error.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use binfile::{BinFile, ByteOrder};
    ///
    /// let bin = BinFile::open("data.bin", true, ByteOrder::native())?;
    /// assert!(bin.is_open());
    /// # Ok::<(), binfile::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>, truncate: bool, order: ByteOrder) -> Result<BinFile> {
        let path = path.as_ref().to_path_buf();

        let file = match OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(truncate)
            .open(&path)
        {
            Ok(file) => file,
            Err(source) => return Err(Error::Unavailable { path, source }),
        };

        debug!(
            "opening binary file {:?} ({:?}, truncate: {})",
            path, order, truncate
        );

        Ok(BinFile {
            path,
            file: Some(file),
            order,
            swap: order != ByteOrder::native(),
            read_pos: 0,
            write_pos: 0,
        })
    }

    /// Current size of the file in bytes.
    ///
    /// Derived on demand by seeking the underlying file to its end; the
    /// tracked read and write cursors are not touched, so calling this
    /// mid-sequence never corrupts a cursor.
    ///
    /// # Errors
    /// Returns [`crate::Error::Closed`] if the store was closed, or
    /// [`crate::Error::FileError`] if the seek fails.
    pub fn size(&mut self) -> Result<u64> {
        let file = self.file.as_mut().ok_or(Error::Closed)?;
        Ok(file.seek(SeekFrom::End(0))?)
    }

    /// Position the read cursor at an absolute byte offset.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `offset` is past the current
    /// end of the file (the read cursor can never be positioned past it), or
    /// [`crate::Error::Closed`] if the store was closed.
    pub fn seek_read(&mut self, offset: u64) -> Result<()> {
        if offset > self.size()? {
            return Err(Error::OutOfBounds);
        }

        self.read_pos = offset;
        Ok(())
    }

    /// Position the write cursor at an absolute byte offset.
    ///
    /// There is no upper bound: writing at or past the current end is how the
    /// file grows.
    ///
    /// # Errors
    /// Returns [`crate::Error::Closed`] if the store was closed.
    pub fn seek_write(&mut self, offset: u64) -> Result<()> {
        if self.file.is_none() {
            return Err(Error::Closed);
        }

        self.write_pos = offset;
        Ok(())
    }

    /// Move the read cursor by `steps` elements of type `T`.
    ///
    /// The byte distance is `steps * size_of::<T>()`; negative values move
    /// backwards. Use `move_read_by::<u8>` for plain byte steps.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the resulting position is
    /// negative or past the current end, or [`crate::Error::Closed`] if the
    /// store was closed.
    pub fn move_read_by<T: Scalar>(&mut self, steps: i64) -> Result<()> {
        let target = Self::stepped(self.read_pos, steps, std::mem::size_of::<T>())?;
        self.seek_read(target)
    }

    /// Move the write cursor by `steps` elements of type `T`.
    ///
    /// The byte distance is `steps * size_of::<T>()`; negative values move
    /// backwards. Use `move_write_by::<u8>` for plain byte steps.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the resulting position is
    /// negative, or [`crate::Error::Closed`] if the store was closed.
    pub fn move_write_by<T: Scalar>(&mut self, steps: i64) -> Result<()> {
        let target = Self::stepped(self.write_pos, steps, std::mem::size_of::<T>())?;
        self.seek_write(target)
    }

    /// Read a value of type `T` at the read cursor.
    ///
    /// Decodes through the codec under the configured byte order and advances
    /// the read cursor by `size_of::<T>()`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()`
    /// bytes remain between the read cursor and the end of the file,
    /// [`crate::Error::Closed`] if the store was closed, or
    /// [`crate::Error::FileError`] if the underlying read fails.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use binfile::{BinFile, ByteOrder};
    ///
    /// let mut bin = BinFile::open("data.bin", true, ByteOrder::Little)?;
    /// bin.put(7u32)?;
    /// bin.seek_read(0)?;
    /// assert_eq!(bin.get::<u32>()?, 7);
    /// # Ok::<(), binfile::Error>(())
    /// ```
    pub fn get<T: Scalar>(&mut self) -> Result<T> {
        let size = self.size()?;
        let type_len = std::mem::size_of::<T>() as u64;

        let end = self.read_pos.checked_add(type_len).ok_or(Error::OutOfBounds)?;
        if end > size {
            return Err(Error::OutOfBounds);
        }

        let pos = self.read_pos;
        let swap = self.swap;

        let file = self.file.as_mut().ok_or(Error::Closed)?;
        file.seek(SeekFrom::Start(pos))?;

        let mut buf = vec![0u8; type_len as usize];
        file.read_exact(&mut buf)?;

        self.read_pos = end;
        decode(&buf, swap)
    }

    /// Read a value of type `T` at an explicit offset.
    ///
    /// Equivalent to [`BinFile::seek_read`] followed by [`BinFile::get`]; the
    /// read cursor ends up just past the value.
    ///
    /// # Errors
    /// As [`BinFile::seek_read`] and [`BinFile::get`].
    pub fn get_at<T: Scalar>(&mut self, offset: u64) -> Result<T> {
        self.seek_read(offset)?;
        self.get()
    }

    /// Read `count` consecutive values of type `T` at the read cursor.
    ///
    /// The whole run is bounds-checked up front and read in a single pass;
    /// each element is then decoded independently under the same byte order
    /// rule. The read cursor advances by `count * size_of::<T>()`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the full run does not fit
    /// between the read cursor and the end of the file,
    /// [`crate::Error::Closed`] if the store was closed, or
    /// [`crate::Error::FileError`] if the underlying read fails.
    pub fn get_many<T: Scalar>(&mut self, count: u64) -> Result<Vec<T>> {
        let size = self.size()?;
        let type_len = std::mem::size_of::<T>() as u64;

        let run = type_len.checked_mul(count).ok_or(Error::OutOfBounds)?;
        let end = self.read_pos.checked_add(run).ok_or(Error::OutOfBounds)?;
        if end > size {
            return Err(Error::OutOfBounds);
        }

        let pos = self.read_pos;
        let swap = self.swap;

        let file = self.file.as_mut().ok_or(Error::Closed)?;
        file.seek(SeekFrom::Start(pos))?;

        let mut buf = vec![0u8; run as usize];
        file.read_exact(&mut buf)?;

        let mut values = Vec::with_capacity(count as usize);
        let mut offset = 0_usize;
        for _ in 0..count {
            values.push(decode_at(&buf, &mut offset, swap)?);
        }

        self.read_pos = end;
        Ok(values)
    }

    /// Read `count` consecutive values of type `T` at an explicit offset.
    ///
    /// # Errors
    /// As [`BinFile::seek_read`] and [`BinFile::get_many`].
    pub fn get_many_at<T: Scalar>(&mut self, count: u64, offset: u64) -> Result<Vec<T>> {
        self.seek_read(offset)?;
        self.get_many(count)
    }

    /// Write a value of type `T` at the write cursor.
    ///
    /// Encodes through the codec under the configured byte order, extends the
    /// file if the cursor is at or past the end, and advances the write
    /// cursor by `size_of::<T>()`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Closed`] if the store was closed, or
    /// [`crate::Error::FileError`] if the underlying write fails.
    pub fn put<T: Scalar>(&mut self, value: T) -> Result<()> {
        let pos = self.write_pos;
        let bytes = encode(value, self.swap);

        let file = self.file.as_mut().ok_or(Error::Closed)?;
        file.seek(SeekFrom::Start(pos))?;
        file.write_all(bytes.as_ref())?;

        self.write_pos = pos + std::mem::size_of::<T>() as u64;
        Ok(())
    }

    /// Write a value of type `T` at an explicit offset.
    ///
    /// Equivalent to [`BinFile::seek_write`] followed by [`BinFile::put`];
    /// the write cursor ends up just past the value.
    ///
    /// # Errors
    /// As [`BinFile::put`].
    pub fn put_at<T: Scalar>(&mut self, value: T, offset: u64) -> Result<()> {
        self.seek_write(offset)?;
        self.put(value)
    }

    /// Write a slice of values of type `T` starting at the write cursor.
    ///
    /// Elements are written one at a time in order. The run is not atomic: if
    /// an underlying write fails mid-run, the already-written prefix stays in
    /// the file and the write cursor stays just past it.
    ///
    /// # Errors
    /// As [`BinFile::put`], per element.
    pub fn put_many<T: Scalar>(&mut self, values: &[T]) -> Result<()> {
        for value in values {
            self.put(*value)?;
        }
        Ok(())
    }

    /// Write a slice of values of type `T` starting at an explicit offset.
    ///
    /// # Errors
    /// As [`BinFile::put_many`].
    pub fn put_many_at<T: Scalar>(&mut self, values: &[T], offset: u64) -> Result<()> {
        self.seek_write(offset)?;
        self.put_many(values)
    }

    /// Write a slice of values converted to storage type `K` first.
    ///
    /// Each element is widened to `K` before encoding, so the run occupies
    /// `values.len() * size_of::<K>()` bytes on disk. Narrowing conversions
    /// are not offered; convert explicitly before writing instead.
    ///
    /// # Errors
    /// As [`BinFile::put`], per element.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use binfile::{BinFile, ByteOrder};
    ///
    /// let mut bin = BinFile::open("data.bin", true, ByteOrder::Little)?;
    /// // Stored as four-byte values despite the u8 input
    /// bin.put_many_as::<u32, _>(&[1u8, 2, 3])?;
    /// assert_eq!(bin.size()?, 12);
    /// # Ok::<(), binfile::Error>(())
    /// ```
    pub fn put_many_as<K, T>(&mut self, values: &[T]) -> Result<()>
    where
        K: Scalar + From<T>,
        T: Copy,
    {
        for value in values {
            self.put(K::from(*value))?;
        }
        Ok(())
    }

    /// Write a slice of values converted to storage type `K`, at an offset.
    ///
    /// # Errors
    /// As [`BinFile::put_many_as`].
    pub fn put_many_as_at<K, T>(&mut self, values: &[T], offset: u64) -> Result<()>
    where
        K: Scalar + From<T>,
        T: Copy,
    {
        self.seek_write(offset)?;
        self.put_many_as::<K, T>(values)
    }

    /// Read `len` uninterpreted bytes at the read cursor.
    ///
    /// No decoding is applied. The read cursor advances by `len`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `len` bytes remain
    /// before the end of the file, [`crate::Error::Closed`] if the store was
    /// closed, or [`crate::Error::FileError`] if the underlying read fails.
    pub fn get_bytes(&mut self, len: u64) -> Result<Vec<u8>> {
        self.get_many::<u8>(len)
    }

    /// Read `len` uninterpreted bytes at an explicit offset.
    ///
    /// # Errors
    /// As [`BinFile::seek_read`] and [`BinFile::get_bytes`].
    pub fn get_bytes_at(&mut self, len: u64, offset: u64) -> Result<Vec<u8>> {
        self.seek_read(offset)?;
        self.get_bytes(len)
    }

    /// Write uninterpreted bytes at the write cursor.
    ///
    /// No encoding is applied and no length is recorded; callers track run
    /// lengths out of band. The write cursor advances by `bytes.len()`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Closed`] if the store was closed, or
    /// [`crate::Error::FileError`] if the underlying write fails.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let pos = self.write_pos;

        let file = self.file.as_mut().ok_or(Error::Closed)?;
        file.seek(SeekFrom::Start(pos))?;
        file.write_all(bytes)?;

        self.write_pos = pos + bytes.len() as u64;
        Ok(())
    }

    /// Write uninterpreted bytes at an explicit offset.
    ///
    /// # Errors
    /// As [`BinFile::put_bytes`].
    pub fn put_bytes_at(&mut self, bytes: &[u8], offset: u64) -> Result<()> {
        self.seek_write(offset)?;
        self.put_bytes(bytes)
    }

    /// Read a string of `len` bytes at the read cursor.
    ///
    /// Strings carry no length or terminator on disk; `len` must come from
    /// the caller. The bytes are validated as UTF-8.
    ///
    /// # Errors
    /// As [`BinFile::get_bytes`], plus [`crate::Error::InvalidUtf8`] if the
    /// bytes are not valid UTF-8.
    pub fn get_string(&mut self, len: u64) -> Result<String> {
        Ok(String::from_utf8(self.get_bytes(len)?)?)
    }

    /// Read a string of `len` bytes at an explicit offset.
    ///
    /// # Errors
    /// As [`BinFile::get_string`].
    pub fn get_string_at(&mut self, len: u64, offset: u64) -> Result<String> {
        self.seek_read(offset)?;
        self.get_string(len)
    }

    /// Write a string's bytes at the write cursor.
    ///
    /// # Errors
    /// As [`BinFile::put_bytes`].
    pub fn put_string(&mut self, s: &str) -> Result<()> {
        self.put_bytes(s.as_bytes())
    }

    /// Write a string's bytes at an explicit offset.
    ///
    /// # Errors
    /// As [`BinFile::put_bytes`].
    pub fn put_string_at(&mut self, s: &str, offset: u64) -> Result<()> {
        self.seek_write(offset)?;
        self.put_string(s)
    }

    /// Flush written data through to the underlying device.
    ///
    /// # Errors
    /// Returns [`crate::Error::Closed`] if the store was closed, or
    /// [`crate::Error::FileError`] if the sync fails.
    pub fn flush(&mut self) -> Result<()> {
        let file = self.file.as_mut().ok_or(Error::Closed)?;
        file.sync_all()?;
        Ok(())
    }

    /// Close the store.
    ///
    /// Terminal and idempotent: the first call drops the file handle, later
    /// calls are no-ops. Every subsequent operation - direct or through an
    /// iterator - fails with [`crate::Error::Closed`]. Handles and iterators
    /// that still reference this store are not invalidated by closing; they
    /// fail cleanly on their next use instead.
    pub fn close(&mut self) {
        if self.file.take().is_some() {
            debug!("closing binary file {:?}", self.path);
        }
    }

    /// Path the store was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte order configured at open time.
    #[must_use]
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// `true` until [`BinFile::close`] has run.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Current read cursor, as a byte offset.
    #[must_use]
    pub fn read_pos(&self) -> u64 {
        self.read_pos
    }

    /// Current write cursor, as a byte offset.
    #[must_use]
    pub fn write_pos(&self) -> u64 {
        self.write_pos
    }

    // Apply a signed element-scaled step to a cursor position.
    fn stepped(pos: u64, steps: i64, type_len: usize) -> Result<u64> {
        let distance = steps
            .checked_mul(type_len as i64)
            .ok_or(Error::OutOfBounds)?;
        let target = (pos as i64)
            .checked_add(distance)
            .ok_or(Error::OutOfBounds)?;

        if target < 0 {
            return Err(Error::OutOfBounds);
        }
        Ok(target as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        (dir, path)
    }

    #[test]
    fn open_creates_missing_file() {
        let (_dir, path) = scratch("created.bin");
        let mut bin = BinFile::open(&path, false, ByteOrder::Little).unwrap();

        assert!(bin.is_open());
        assert_eq!(bin.size().unwrap(), 0);
        assert_eq!(bin.read_pos(), 0);
        assert_eq!(bin.write_pos(), 0);
        assert_eq!(bin.path(), path.as_path());
    }

    #[test]
    fn open_preserves_existing_content() {
        let (_dir, path) = scratch("kept.bin");
        std::fs::write(&path, [1u8, 2, 3, 4]).unwrap();

        let mut bin = BinFile::open(&path, false, ByteOrder::native()).unwrap();
        assert_eq!(bin.size().unwrap(), 4);
        assert_eq!(bin.get::<u8>().unwrap(), 1);
    }

    #[test]
    fn open_truncate_discards_content() {
        let (_dir, path) = scratch("cleared.bin");
        std::fs::write(&path, [1u8, 2, 3, 4]).unwrap();

        let mut bin = BinFile::open(&path, true, ByteOrder::native()).unwrap();
        assert_eq!(bin.size().unwrap(), 0);
    }

    #[test]
    fn open_failure_is_unavailable() {
        let result = BinFile::open("/nonexistent/dir/file.bin", false, ByteOrder::Little);
        assert!(matches!(result, Err(Error::Unavailable { .. })));
    }

    #[test]
    fn cursors_are_independent() {
        let (_dir, path) = scratch("cursors.bin");
        let mut bin = BinFile::open(&path, true, ByteOrder::Little).unwrap();

        bin.put(0x11u8).unwrap();
        bin.put(0x22u8).unwrap();
        assert_eq!(bin.write_pos(), 2);
        assert_eq!(bin.read_pos(), 0);

        assert_eq!(bin.get::<u8>().unwrap(), 0x11);
        assert_eq!(bin.read_pos(), 1);
        assert_eq!(bin.write_pos(), 2);

        // interleaved: the write picks up where the write cursor left off
        bin.put(0x33u8).unwrap();
        assert_eq!(bin.get::<u8>().unwrap(), 0x22);
        assert_eq!(bin.get::<u8>().unwrap(), 0x33);
    }

    #[test]
    fn size_leaves_cursors_alone() {
        let (_dir, path) = scratch("size.bin");
        let mut bin = BinFile::open(&path, true, ByteOrder::Little).unwrap();

        bin.put_many(&[1u32, 2, 3]).unwrap();
        bin.seek_read(4).unwrap();
        bin.seek_write(8).unwrap();

        assert_eq!(bin.size().unwrap(), 12);
        assert_eq!(bin.read_pos(), 4);
        assert_eq!(bin.write_pos(), 8);
        assert_eq!(bin.get::<u32>().unwrap(), 2);
    }

    #[test]
    fn seek_read_rejects_past_end() {
        let (_dir, path) = scratch("seekr.bin");
        let mut bin = BinFile::open(&path, true, ByteOrder::Little).unwrap();

        bin.put(0u32).unwrap();
        assert!(bin.seek_read(4).is_ok()); // exactly at the end is allowed
        assert!(matches!(bin.seek_read(5), Err(Error::OutOfBounds)));
    }

    #[test]
    fn seek_write_past_end_grows_on_put() {
        let (_dir, path) = scratch("grow.bin");
        let mut bin = BinFile::open(&path, true, ByteOrder::Little).unwrap();

        bin.put_at(0xABu8, 9).unwrap();
        assert_eq!(bin.size().unwrap(), 10);
        assert_eq!(bin.write_pos(), 10);
    }

    #[test]
    fn move_by_scales_by_element_size() {
        let (_dir, path) = scratch("move.bin");
        let mut bin = BinFile::open(&path, true, ByteOrder::Little).unwrap();

        bin.put_many(&[0u32; 4]).unwrap();

        bin.move_read_by::<u32>(3).unwrap();
        assert_eq!(bin.read_pos(), 12);
        bin.move_read_by::<u32>(-2).unwrap();
        assert_eq!(bin.read_pos(), 4);
        bin.move_read_by::<u8>(1).unwrap();
        assert_eq!(bin.read_pos(), 5);

        assert!(matches!(
            bin.move_read_by::<u32>(-2),
            Err(Error::OutOfBounds)
        ));

        bin.seek_write(0).unwrap();
        bin.move_write_by::<u64>(5).unwrap();
        assert_eq!(bin.write_pos(), 40); // past the end is fine for writes
        assert!(matches!(
            bin.move_write_by::<u64>(-6),
            Err(Error::OutOfBounds)
        ));
    }

    #[test]
    fn get_rejects_reads_past_end() {
        let (_dir, path) = scratch("bounds.bin");
        let mut bin = BinFile::open(&path, true, ByteOrder::Little).unwrap();

        bin.put_many(&[1u8, 2, 3]).unwrap();
        assert!(matches!(bin.get_at::<u32>(0), Err(Error::OutOfBounds)));
        assert!(matches!(bin.get_at::<u16>(2), Err(Error::OutOfBounds)));
        assert_eq!(bin.get_at::<u16>(1).unwrap(), u16::from_le_bytes([2, 3]));
    }

    #[test]
    fn get_many_checks_whole_run_up_front() {
        let (_dir, path) = scratch("run.bin");
        let mut bin = BinFile::open(&path, true, ByteOrder::Little).unwrap();

        bin.put_many(&[1u16, 2, 3]).unwrap();
        assert!(matches!(
            bin.get_many_at::<u16>(4, 0),
            Err(Error::OutOfBounds)
        ));
        // the failed run must not have moved the read cursor past anything
        assert_eq!(bin.get_many_at::<u16>(3, 0).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn put_at_advances_write_cursor_past_value() {
        let (_dir, path) = scratch("putat.bin");
        let mut bin = BinFile::open(&path, true, ByteOrder::Little).unwrap();

        bin.put_at(0xAABBu16, 4).unwrap();
        assert_eq!(bin.write_pos(), 6);
        assert_eq!(bin.size().unwrap(), 6);
    }

    #[test]
    fn put_many_as_widens_elements() {
        let (_dir, path) = scratch("cast.bin");
        let mut bin = BinFile::open(&path, true, ByteOrder::Little).unwrap();

        bin.put_many_as::<u32, u8>(&[1, 2, 3]).unwrap();
        assert_eq!(bin.size().unwrap(), 12);
        assert_eq!(bin.get_many_at::<u32>(3, 0).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn bytes_and_strings_round_trip() {
        let (_dir, path) = scratch("raw.bin");
        let mut bin = BinFile::open(&path, true, ByteOrder::Big).unwrap();

        bin.put_bytes(&[0xFF, 0xFE]).unwrap();
        bin.put_string("header").unwrap();

        assert_eq!(bin.get_bytes_at(2, 0).unwrap(), vec![0xFF, 0xFE]);
        assert_eq!(bin.get_string(6).unwrap(), "header");
        assert!(matches!(
            bin.get_string_at(3, 0),
            Err(Error::InvalidUtf8(_))
        ));
    }

    #[test]
    fn close_is_terminal_and_idempotent() {
        let (_dir, path) = scratch("close.bin");
        let mut bin = BinFile::open(&path, true, ByteOrder::Little).unwrap();

        bin.put(1u32).unwrap();
        bin.close();
        bin.close(); // second close is a no-op

        assert!(!bin.is_open());
        assert!(matches!(bin.size(), Err(Error::Closed)));
        assert!(matches!(bin.get::<u32>(), Err(Error::Closed)));
        assert!(matches!(bin.put(2u32), Err(Error::Closed)));
        assert!(matches!(bin.seek_read(0), Err(Error::Closed)));
        assert!(matches!(bin.seek_write(0), Err(Error::Closed)));
        assert!(matches!(bin.flush(), Err(Error::Closed)));
        assert!(matches!(bin.get_bytes(1), Err(Error::Closed)));
    }

    #[test]
    fn byte_order_is_reported() {
        let (_dir, path) = scratch("order.bin");
        let bin = BinFile::open(&path, true, ByteOrder::Big).unwrap();
        assert_eq!(bin.byte_order(), ByteOrder::Big);
    }
}
