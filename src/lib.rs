/*!

Construction, composition, and canonicalization of morphisms between rings and free modules.

The public surface lives in [`api`]. Logging is configured through [`log`].

*/

pub mod api;
pub mod abstractions;
mod core;

// We re-export abstractions that are meant to be used publicly.
pub use abstractions::{
  log,
  IString
};
