/*!

Types/type aliases that abstract over the implementing backing type.

A motivating example is the hash map used by the morphism caches. A number of external crates could provide a faster
map. This module redirects to whatever chosen implementation we want, so the rest of the crate never names the
backing type directly.

*/

mod string_join;

// Logging
pub mod log;

// Hash map used by the caches.
pub use std::collections::HashMap;

// Interned string.
pub use string_cache::DefaultAtom as IString;

// Join sequences with a separator
pub use string_join::{bracketed, join_string};
