//! Shared handles, proxies and random-access iterators over a [`BinFile`].
//!
//! A [`crate::file::iter::BinHandle`] owns a store by reference count and is
//! what multiple iterators share. Iterators themselves hold only a
//! [`crate::file::iter::WeakBinHandle`]: they observe the store without
//! keeping it alive, and every dereference or step re-validates that the
//! store still exists and is still open. A stale iterator therefore fails
//! with [`crate::Error::Unbound`] or [`crate::Error::Closed`] instead of
//! silently reading garbage.
//!
//! Dereferencing an iterator yields a [`crate::file::iter::BinCell`], a
//! transient proxy for one typed cell of the file: [`BinCell::get`] reads the
//! value at use time, [`BinCell::set`] writes it at use time, nothing is
//! cached in between.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use binfile::{BinFile, BinHandle, ByteOrder};
//!
//! let handle = BinHandle::new(BinFile::open("data.bin", true, ByteOrder::Little)?);
//! handle.with(|bin| bin.put_many(&[1u32, 2]))?;
//!
//! let mut it = handle.begin::<u32>();
//! let end = handle.end::<u32>()?;
//! let mut values = Vec::new();
//! while !it.try_eq(&end)? {
//!     values.push(it.read()?);
//!     it.advance()?;
//! }
//! assert_eq!(values, vec![1, 2]);
//! # Ok::<(), binfile::Error>(())
//! ```
//!
//! Stepping costs a validation per step; this is a deliberate trade for
//! safety, and these iterators are meant for expressive traversal rather
//! than bulk throughput - use [`crate::BinFile::get_many`] for that.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use crate::file::io::Scalar;
use crate::file::BinFile;
use crate::{Error, Result};

/// A shared, reference-counted handle to a [`BinFile`].
///
/// The handle is constructed alongside the store and owns it; the store never
/// references its own handle. Cloning a handle shares the same store.
/// Iterators derive [`WeakBinHandle`]s from it so they never extend the
/// store's lifetime.
///
/// Sharing is single-threaded (`Rc`), matching the store's concurrency
/// contract: exactly one logical actor drives a store at a time.
#[derive(Debug, Clone)]
pub struct BinHandle {
    inner: Rc<RefCell<BinFile>>,
}

impl BinHandle {
    /// Wrap a store in a shared handle, taking ownership of it.
    #[must_use]
    pub fn new(bin: BinFile) -> BinHandle {
        BinHandle {
            inner: Rc::new(RefCell::new(bin)),
        }
    }

    /// Create a non-owning observer of this handle's store.
    #[must_use]
    pub fn downgrade(&self) -> WeakBinHandle {
        WeakBinHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Run a closure against the underlying store.
    ///
    /// This is the direct-access escape hatch for operations that do not go
    /// through an iterator.
    ///
    /// # Panics
    /// Panics if called re-entrantly from within another `with` closure on
    /// the same handle; the single-actor contract forbids that shape anyway.
    pub fn with<R>(&self, f: impl FnOnce(&mut BinFile) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    /// Iterator over elements of type `T`, positioned at byte offset 0.
    #[must_use]
    pub fn begin<T: Scalar>(&self) -> BinIter<T> {
        BinIter::begin(self)
    }

    /// Iterator over elements of type `T`, positioned at the current end.
    ///
    /// The end offset is a snapshot of `size()` at construction time: growing
    /// the file afterwards does not move an already-constructed end iterator.
    ///
    /// # Errors
    /// Returns [`crate::Error::Closed`] if the store was already closed.
    pub fn end<T: Scalar>(&self) -> Result<BinIter<T>> {
        BinIter::end(self)
    }
}

/// A non-owning observer of a [`BinFile`] store.
///
/// Produced by [`BinHandle::downgrade`]. Resolving after the store is gone is
/// an error, never a null value.
#[derive(Debug, Clone)]
pub struct WeakBinHandle {
    inner: Weak<RefCell<BinFile>>,
}

impl WeakBinHandle {
    /// Resolve back into an owning handle.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unbound`] if the store has been dropped.
    pub fn upgrade(&self) -> Result<BinHandle> {
        match self.inner.upgrade() {
            Some(inner) => Ok(BinHandle { inner }),
            None => Err(Error::Unbound),
        }
    }
}

/// A transient proxy for one typed cell of a binary file.
///
/// A cell is just `(store, byte offset, element type)` - it caches nothing.
/// [`BinCell::get`] evaluates a typed read against the store at call time and
/// [`BinCell::set`] a typed write, each moving the corresponding store cursor
/// just past the cell, exactly as [`crate::BinFile::get_at`] and
/// [`crate::BinFile::put_at`] do.
#[derive(Debug)]
pub struct BinCell<T: Scalar> {
    bin: Rc<RefCell<BinFile>>,
    offset: u64,
    _elem: PhantomData<T>,
}

impl<T: Scalar> BinCell<T> {
    /// Read the cell's current value.
    ///
    /// # Errors
    /// As [`crate::BinFile::get_at`] - notably [`crate::Error::OutOfBounds`]
    /// if the cell lies past the current end, and [`crate::Error::Closed`] if
    /// the store was closed after this cell was produced.
    pub fn get(&self) -> Result<T> {
        self.bin.borrow_mut().get_at(self.offset)
    }

    /// Overwrite the cell's value.
    ///
    /// # Errors
    /// As [`crate::BinFile::put_at`].
    pub fn set(&self, value: T) -> Result<()> {
        self.bin.borrow_mut().put_at(value, self.offset)
    }

    /// Byte offset of the cell within the file.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

/// Exchange the values addressed by two cells.
///
/// Both current values are read first, then each is written to the other's
/// offset. The read/read/write/write order matters: with overlapping offsets
/// an in-place exchange would overwrite a value before it was materialized.
///
/// # Errors
/// As [`BinCell::get`] and [`BinCell::set`]; a failure between the two writes
/// leaves the first write applied.
pub fn swap_cells<T: Scalar>(a: &BinCell<T>, b: &BinCell<T>) -> Result<()> {
    let first = a.get()?;
    let second = b.get()?;
    a.set(second)?;
    b.set(first)
}

/// A random-access iterator over a binary file, typed by element.
///
/// An iterator is `(weak handle, byte offset)` with the element type fixed at
/// construction; its stride is `size_of::<T>()`. It is cheap and `Clone`,
/// carries no resources, and never keeps the store alive. Every dereference
/// and every step re-validates the weak handle, so iterators outliving their
/// store degrade into clean errors.
///
/// Comparison and distance are only defined between iterators over the same
/// live store; anything else is [`crate::Error::InvalidComparison`].
///
/// # Examples
///
/// ```rust,no_run
/// use binfile::{BinFile, BinHandle, ByteOrder};
///
/// let handle = BinHandle::new(BinFile::open("data.bin", true, ByteOrder::Little)?);
/// handle.with(|bin| bin.put_many(&[5u16, 6, 7]))?;
///
/// let it = handle.begin::<u16>().offset_by(2)?;
/// assert_eq!(it.read()?, 7);
/// it.write(9)?;
/// assert_eq!(it.read()?, 9);
/// # Ok::<(), binfile::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BinIter<T: Scalar> {
    bin: WeakBinHandle,
    offset: u64,
    _elem: PhantomData<T>,
}

impl<T: Scalar> BinIter<T> {
    const STRIDE: u64 = std::mem::size_of::<T>() as u64;

    /// Iterator at byte offset 0 of the handle's store.
    #[must_use]
    pub fn begin(handle: &BinHandle) -> BinIter<T> {
        BinIter {
            bin: handle.downgrade(),
            offset: 0,
            _elem: PhantomData,
        }
    }

    /// Iterator at the store's current end.
    ///
    /// The offset is `size()` sampled now - a snapshot, not live-tracking.
    ///
    /// # Errors
    /// Returns [`crate::Error::Closed`] if the store was already closed.
    pub fn end(handle: &BinHandle) -> Result<BinIter<T>> {
        let offset = handle.with(BinFile::size)?;
        Ok(BinIter {
            bin: handle.downgrade(),
            offset,
            _elem: PhantomData,
        })
    }

    /// Byte offset this iterator points at.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Dereference into a [`BinCell`] proxy for the addressed element.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unbound`] if the store is gone, or
    /// [`crate::Error::Closed`] if it was closed.
    pub fn cell(&self) -> Result<BinCell<T>> {
        let bin = self.resolve()?;
        Ok(BinCell {
            bin,
            offset: self.offset,
            _elem: PhantomData,
        })
    }

    /// Read the addressed value; shorthand for `cell()?.get()`.
    ///
    /// # Errors
    /// As [`BinIter::cell`] and [`BinCell::get`].
    pub fn read(&self) -> Result<T> {
        self.cell()?.get()
    }

    /// Write the addressed value; shorthand for `cell()?.set(value)`.
    ///
    /// # Errors
    /// As [`BinIter::cell`] and [`BinCell::set`].
    pub fn write(&self, value: T) -> Result<()> {
        self.cell()?.set(value)
    }

    /// Step forward by one element.
    ///
    /// Each step re-validates that the store is live and open before moving.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unbound`] or [`crate::Error::Closed`] from the
    /// validation, or [`crate::Error::OutOfBounds`] on offset overflow.
    pub fn advance(&mut self) -> Result<()> {
        self.resolve()?;
        self.offset = self
            .offset
            .checked_add(Self::STRIDE)
            .ok_or(Error::OutOfBounds)?;
        Ok(())
    }

    /// Step backward by one element.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] when already at offset 0, in
    /// addition to the validation errors of [`BinIter::advance`].
    pub fn retreat(&mut self) -> Result<()> {
        self.resolve()?;
        if self.offset < Self::STRIDE {
            return Err(Error::OutOfBounds);
        }
        self.offset -= Self::STRIDE;
        Ok(())
    }

    /// A new iterator displaced by `count` elements (negative for backwards).
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the resulting offset is
    /// negative, plus the validation errors of [`BinIter::advance`].
    pub fn offset_by(&self, count: i64) -> Result<BinIter<T>> {
        self.resolve()?;

        let distance = count
            .checked_mul(Self::STRIDE as i64)
            .ok_or(Error::OutOfBounds)?;
        let target = (self.offset as i64)
            .checked_add(distance)
            .ok_or(Error::OutOfBounds)?;
        if target < 0 {
            return Err(Error::OutOfBounds);
        }

        Ok(BinIter {
            bin: self.bin.clone(),
            offset: target as u64,
            _elem: PhantomData,
        })
    }

    /// Whether two iterators address the same element of the same store.
    ///
    /// True iff both resolve to the *same* store instance and the offsets are
    /// equal.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidComparison`] if either side no longer
    /// resolves - that case is an error, not `false`.
    pub fn try_eq(&self, other: &BinIter<T>) -> Result<bool> {
        let (Ok(a), Ok(b)) = (self.bin.upgrade(), other.bin.upgrade()) else {
            return Err(Error::InvalidComparison);
        };

        Ok(Rc::ptr_eq(&a.inner, &b.inner) && self.offset == other.offset)
    }

    /// Order two iterators over the same store by offset.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidComparison`] if either side fails to
    /// resolve or they resolve to different stores.
    pub fn try_cmp(&self, other: &BinIter<T>) -> Result<Ordering> {
        self.same_store(other)?;
        Ok(self.offset.cmp(&other.offset))
    }

    /// Signed distance from `other` to `self`, in elements.
    ///
    /// Computed as `(self.offset - other.offset) / size_of::<T>()`; offsets
    /// are assumed element-aligned for `T`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidComparison`] if either side fails to
    /// resolve or they resolve to different stores.
    pub fn distance(&self, other: &BinIter<T>) -> Result<i64> {
        self.same_store(other)?;
        Ok((self.offset as i64 - other.offset as i64) / Self::STRIDE as i64)
    }

    // Upgrade the weak handle and require the store to still be open.
    fn resolve(&self) -> Result<Rc<RefCell<BinFile>>> {
        let handle = self.bin.upgrade()?;
        if !handle.inner.borrow().is_open() {
            return Err(Error::Closed);
        }
        Ok(handle.inner)
    }

    fn same_store(&self, other: &BinIter<T>) -> Result<()> {
        let (Ok(a), Ok(b)) = (self.bin.upgrade(), other.bin.upgrade()) else {
            return Err(Error::InvalidComparison);
        };
        if !Rc::ptr_eq(&a.inner, &b.inner) {
            return Err(Error::InvalidComparison);
        }
        Ok(())
    }
}
