// Copyright 2026 binfile contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # binfile
//!
//! Endian-aware random access to binary files as sequences of fixed-width
//! typed values. `binfile` treats an on-disk file like a flat array: read and
//! write `u8` through `f64` at arbitrary byte offsets, with the byte order
//! chosen once at open time, and traverse the file lazily through a
//! random-access iterator whose validity is checked on every use.
//!
//! ## Features
//!
//! - **Typed cursor engine** - Independent read and write cursors, absolute
//!   and element-scaled relative seeking, single-value and bulk access
//! - **Configurable byte order** - Little or big endian per file; integral
//!   values are byte-reversed when the configuration differs from the host
//! - **Validity-checked iteration** - Iterators observe the store through a
//!   weak handle and fail cleanly when the store is dropped or closed,
//!   never reading stale data
//! - **Synchronous and predictable** - No background activity, no caching of
//!   file size or values; every operation maps onto plain seek/read/write
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use binfile::{BinFile, BinHandle, ByteOrder};
//!
//! let mut bin = BinFile::open("data.bin", true, ByteOrder::Little)?;
//! bin.put(1u32)?;
//! bin.put(2u32)?;
//!
//! // Traverse the same file as an array of u32
//! let handle = BinHandle::new(bin);
//! let mut it = handle.begin::<u32>();
//! let end = handle.end::<u32>()?;
//! while !it.try_eq(&end)? {
//!     println!("{}", it.read()?);
//!     it.advance()?;
//! }
//! # Ok::<(), binfile::Error>(())
//! ```
//!
//! ## Architecture
//!
//! Data flows iterator → proxy → store → codec → raw file bytes:
//!
//! - [`file::io`] - The codec: fixed-width value ⇄ bytes with the byte order
//!   reversal rule (floats are always host-native; see the module docs)
//! - [`file::BinFile`] - The store: file lifecycle, cursors, typed get/put
//! - [`file::iter`] - Shared [`BinHandle`]s, [`BinCell`] proxies and
//!   [`BinIter`] iterators on top of a store
//! - [`Error`] and [`Result`] - One error enum for every failure mode
//!
//! ## Concurrency
//!
//! Strictly single-threaded by design: a store's cursors are shared mutable
//! state and exactly one logical actor drives a store at a time. Handles are
//! `Rc`-based and do not cross threads.

pub(crate) mod error;
pub mod file;

/// Result type alias used throughout this library.
///
/// All fallible operations return this alias with [`Error`] as the error
/// type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type covering every failure mode of this library.
///
/// See the variant docs for the exact conditions; there is no internal
/// recovery, every violated precondition surfaces here.
pub use error::Error;

/// The binary file store and its byte order configuration.
///
/// [`BinFile`] owns the file resource; see [`file`] for the full module.
pub use file::{BinFile, ByteOrder};

/// Codec trait for the fixed-width primitive types a file can hold.
pub use file::io::Scalar;

/// Handles, proxies and iterators for traversing a store.
pub use file::iter::{swap_cells, BinCell, BinHandle, BinIter, WeakBinHandle};
