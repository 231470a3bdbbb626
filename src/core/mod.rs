/*!

The engine proper. `module` is the small type model the morphisms act on, `morphism` holds the closed set of
morphism variants with their combinators, and `canonical` finds and memoizes the natural morphism between two module
types.

|                | role                                                              |
|:---------------|:------------------------------------------------------------------|
| `module`       | module types, elements, matrices, scalar arithmetic               |
| `morphism`     | the `Morphism` value, application, classification, combinators    |
| `canonical`    | canonical, embedding, and casting strategies and their caches     |
| `error`        | `MappingError`, `CompositionError`                                |
| `format`       | text rendering styles                                             |

*/

pub mod canonical;
pub mod error;
pub mod format;
pub mod module;
pub mod morphism;
