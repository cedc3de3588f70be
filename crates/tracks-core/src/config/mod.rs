//! Configuration store: default overlay, reconciliation and persistence.
//!
//! The store is split into four concerns so that the storage representation
//! is never coupled to the file format:
//!
//! - **`value`**    – The in-memory model: [`value::ConfigValue`] and the
//!   insertion-ordered [`value::ConfigDocument`].
//! - **`codec`**    – A stateless `decode`/`encode` pair between JSON text and
//!   the in-memory model.  Array normalization happens here.
//! - **`defaults`** – The [`defaults::DefaultsRegistry`] and the pure
//!   `reconcile` function that fills missing keys from it.
//! - **`store`**    – [`store::ConfigStore`], which owns the backing file path,
//!   drives the load → reconcile → persist sequence, and records the errors it
//!   recovered from.
//!
//! # Backing file format
//!
//! ```json
//! {
//!   "http": {
//!     "bind_address": "0.0.0.0",
//!     "port": 4567
//!   },
//!   "cors": [
//!     "*"
//!   ]
//! }
//! ```
//!
//! Arrays are always stored as arrays of strings: on load, every non-string
//! element is replaced by its JSON text, so `[1, 2, 3]` comes back as
//! `["1", "2", "3"]`.

pub mod codec;
pub mod defaults;
pub mod error;
pub mod store;
pub mod value;
