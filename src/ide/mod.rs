//! Read-side features — High-level APIs for editor handlers.
//!
//! This module provides the interface between the symbol cache and an
//! editor-protocol server. Each function corresponds to an editor request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No protocol types**: Uses our own types, converted at the protocol
//!    boundary
//! 3. **Composable**: `completions` does not filter by visibility; compose
//!    it with `visible_declarations` when the requester must not see
//!    private symbols
//!
//! ## Usage
//!
//! The recommended way to use this module is through `CacheHost`:
//!
//! ```ignore
//! use datapack::ide::CacheHost;
//!
//! let mut host = CacheHost::new(default_visibility);
//! host.open_document(uri, ty, id, &local_cache, &line_index);
//!
//! let view = host.snapshot_for(requesting_type, &requesting_id);
//! ```

mod completion;
mod host;
mod snapshot;

pub use completion::{CompletionItem, completions};
pub use host::CacheHost;
pub use snapshot::visible_declarations;
