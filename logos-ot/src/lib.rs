//! # logos-ot — Operational transformation for collaborative plain text
//!
//! A pure, synchronous algebra over edits to a linear text document. Every
//! function takes operations by reference and returns new values; there is no
//! shared mutable state, so independent documents can be processed from any
//! number of threads.
//!
//! ## Architecture
//!
//! ```text
//!                 ┌───────────┐
//!                 │ Operation │  retain / insert / delete
//!                 └─────┬─────┘
//!        ┌──────────────┼──────────────┬──────────────┐
//!        ▼              ▼              ▼              ▼
//!   ┌─────────┐   ┌───────────┐   ┌─────────┐   ┌─────────┐
//!   │  apply  │   │ transform │   │ compose │   │  wire   │
//!   └────┬────┘   └─────┬─────┘   └─────────┘   │ (JSON)  │
//!        ▼              │                       └─────────┘
//!   ┌─────────┐         │
//!   │ invert  │         │
//!   └────┬────┘         │
//!        ▼              ▼
//!   ┌───────────┐  ┌───────────┐
//!   │ UndoStack │  │ Authority │
//!   └───────────┘  └───────────┘
//! ```
//!
//! ## Modules
//!
//! - [`operation`] — `Operation` / `Step` value types and the builder
//! - [`transform`] — convergent rebasing of concurrent operations
//! - [`wire`] — validated JSON encoding
//! - [`authority`] — revision log for a single shared document
//! - [`undo`] — undo/redo history that survives remote edits
//!
//! ## Example
//!
//! ```
//! use logos_ot::{transform, Operation};
//!
//! let alice = Operation::new(3).delete(1).retain(2);
//! let bob = Operation::new(3).retain(3).insert("!");
//!
//! let after_alice = alice.apply("abc")?;
//! let bob_prime = transform(&alice, &bob, true)?;
//! assert_eq!(bob_prime.apply(&after_alice)?, "bc!");
//! # Ok::<(), logos_ot::OtError>(())
//! ```

pub mod error;
pub mod operation;
pub mod transform;
pub mod wire;
pub mod authority;
pub mod undo;

mod apply;
mod compose;
mod cursor;
mod invert;

pub use error::{OtError, Result};
pub use operation::{Operation, Step};
pub use transform::transform;
pub use authority::{Authority, AuthorityConfig, Revision};
pub use undo::UndoStack;
