/*!

Canonicalization: given a domain and a codomain and no morphism, find the natural morphism between them, if there is
one.

There are three strategies, each memoized in its own process-wide `MorphismCache`.

| strategy  | entry point                                        | cache             | produces                               |
|:----------|:---------------------------------------------------|:------------------|:---------------------------------------|
| canonical | `canonical_morphism`, `ring_canonical_morphism`    | `CANONICAL_CACHE` | the natural map, lossy if need be      |
| embedding | `embedding`                                        | `EMBEDDING_CACHE` | structure preserving maps only         |
| casting   | `casting`                                          | `CASTING_CACHE`   | lossy conversions between rings        |

The canonical strategy collapses anything to or from a null module to the zero map, hands pairs of rings to ring
canonicalization, and otherwise tries an embedding before lifting the ring-level canonical morphism to the free
modules coordinate by coordinate. Ring canonicalization reduces `Z → Z_n` modulo `n`, and otherwise prefers an
embedding to a cast.

"No canonical morphism" is an ordinary answer and is returned as `None`. It is never cached, so a later call repeats
the search.

## Concurrency

The caches are the only shared mutable state in the crate. Each is a `parking_lot::RwLock` around a `HashMap`,
created on first use by a `once_cell` `Lazy`. No lock is held while a morphism is being constructed, which is what
lets the strategies call each other recursively. See [`cache`] for the insertion contract.

*/

mod cache;
mod casting;
mod embedding;

use once_cell::sync::Lazy;

use crate::{
  core::{
    module::ModuleType,
    morphism::Morphism
  },
  info
};

pub use cache::{CacheStatistics, MorphismCache};
pub use casting::casting;
pub use embedding::embedding;

static CANONICAL_CACHE: Lazy<MorphismCache> = Lazy::new(|| MorphismCache::new("canonical"));
static EMBEDDING_CACHE: Lazy<MorphismCache> = Lazy::new(|| MorphismCache::new("embedding"));
static CASTING_CACHE  : Lazy<MorphismCache> = Lazy::new(|| MorphismCache::new("casting"));

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Strategy {
  Canonical,
  Embedding,
  Casting,
}

/// The process-wide cache of the given strategy.
pub fn strategy_cache(strategy: Strategy) -> &'static MorphismCache {
  match strategy {
    Strategy::Canonical => &CANONICAL_CACHE,
    Strategy::Embedding => &EMBEDDING_CACHE,
    Strategy::Casting   => &CASTING_CACHE,
  }
}

/// The natural morphism from `domain` to `codomain`, if there is one.
pub fn canonical_morphism(domain: &ModuleType, codomain: &ModuleType) -> Option<Morphism> {
  if domain.is_ring() && codomain.is_ring() {
    return ring_canonical_morphism(domain, codomain);
  }

  let morphism = strategy_cache(Strategy::Canonical).get_or_construct(
    domain,
    codomain,
    || construct_canonical(domain, codomain)
  );
  if morphism.is_none() {
    info!(3, "no canonical morphism from {} to {}", domain, codomain);
  }
  morphism
}

fn construct_canonical(domain: &ModuleType, codomain: &ModuleType) -> Option<Morphism> {
  if domain.is_null() || codomain.is_null() {
    return Some(Morphism::zero(domain, codomain));
  }
  if domain == codomain {
    return Some(Morphism::identity(domain));
  }

  embedding(domain, codomain).or_else(|| {
    let ring_morphism = ring_canonical_morphism(&domain.ring(), &codomain.ring())?;
    Morphism::free_lift(ring_morphism, domain.dimension(), codomain.dimension())
  })
}

/// The natural morphism between two rings, if there is one. Shares its cache with `canonical_morphism`.
pub fn ring_canonical_morphism(domain: &ModuleType, codomain: &ModuleType) -> Option<Morphism> {
  assert!(
    domain.is_ring() && codomain.is_ring(),
    "ring canonicalization needs two rings, got {} and {}",
    domain,
    codomain
  );

  let morphism = strategy_cache(Strategy::Canonical).get_or_construct(
    domain,
    codomain,
    || construct_ring_canonical(domain, codomain)
  );
  if morphism.is_none() {
    info!(3, "no canonical ring morphism from {} to {}", domain, codomain);
  }
  morphism
}

fn construct_ring_canonical(domain: &ModuleType, codomain: &ModuleType) -> Option<Morphism> {
  if domain == codomain {
    return Some(Morphism::identity(domain));
  }
  if let (ModuleType::Z, ModuleType::Zn(modulus)) = (domain, codomain) {
    return Some(Morphism::modulo_reduction(*modulus, true));
  }
  embedding(domain, codomain).or_else(|| casting(domain, codomain))
}
