/*!

Memoization of canonical morphisms, keyed by `(domain, codomain)`.

A `MorphismCache` is append-only. Lookups take the read lock. Construction runs with no lock held, because the
strategies recurse into each other and into their own cache for the component types. Insertion takes the write lock
and keeps whichever value was inserted first, so two threads racing on the same key both return the same morphism.
Failed constructions are not recorded.

The counters are process statistics, not part of the cache's meaning. They are updated with relaxed atomics.

*/

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::{
  abstractions::HashMap,
  core::{
    module::ModuleType,
    morphism::Morphism
  }
};
#[cfg(feature = "cache_debug")]
use crate::{debug, trace};

type CacheKey = (ModuleType, ModuleType);

#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct CacheStatistics {
  pub hits      : usize,
  pub misses    : usize,
  pub insertions: usize,
  pub entries   : usize,
}

pub struct MorphismCache {
  name      : &'static str,
  entries   : RwLock<HashMap<CacheKey, Morphism>>,
  hits      : AtomicUsize,
  misses    : AtomicUsize,
  insertions: AtomicUsize,
}

impl MorphismCache {
  pub fn new(name: &'static str) -> MorphismCache {
    MorphismCache {
      name,
      entries   : RwLock::new(HashMap::new()),
      hits      : AtomicUsize::new(0),
      misses    : AtomicUsize::new(0),
      insertions: AtomicUsize::new(0),
    }
  }

  #[inline(always)]
  pub fn name(&self) -> &'static str {
    self.name
  }

  /// The cached morphism for the pair, without constructing anything. Does not touch the counters.
  pub fn get(&self, domain: &ModuleType, codomain: &ModuleType) -> Option<Morphism> {
    self.entries.read().get(&(domain.clone(), codomain.clone())).cloned()
  }

  pub fn contains(&self, domain: &ModuleType, codomain: &ModuleType) -> bool {
    self.entries.read().contains_key(&(domain.clone(), codomain.clone()))
  }

  pub fn len(&self) -> usize {
    self.entries.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn statistics(&self) -> CacheStatistics {
    CacheStatistics {
      hits      : self.hits.load(Ordering::Relaxed),
      misses    : self.misses.load(Ordering::Relaxed),
      insertions: self.insertions.load(Ordering::Relaxed),
      entries   : self.len(),
    }
  }

  /// Returns the cached morphism for `(domain, codomain)`, or runs `construct` and caches its result if it
  /// produced one.
  pub fn get_or_construct<F>(&self, domain: &ModuleType, codomain: &ModuleType, construct: F) -> Option<Morphism>
    where F: FnOnce() -> Option<Morphism>
  {
    let key = (domain.clone(), codomain.clone());

    if let Some(morphism) = self.entries.read().get(&key) {
      self.hits.fetch_add(1, Ordering::Relaxed);
      #[cfg(feature = "cache_debug")]
      trace!(5, "{} cache hit: {} → {}", self.name, domain, codomain);
      return Some(morphism.clone());
    }

    self.misses.fetch_add(1, Ordering::Relaxed);
    #[cfg(feature = "cache_debug")]
    debug!(4, "{} cache miss: {} → {}", self.name, domain, codomain);

    let morphism = construct()?;
    assert!(
      morphism.domain() == domain && morphism.codomain() == codomain,
      "{} cache asked for {} → {} but constructed {}",
      self.name,
      domain,
      codomain,
      morphism
    );

    let mut entries = self.entries.write();
    let cached = entries.entry(key).or_insert_with(|| {
      self.insertions.fetch_add(1, Ordering::Relaxed);
      #[cfg(feature = "cache_debug")]
      debug!(4, "{} cache insertion: {}", self.name, morphism);
      morphism
    });
    Some(cached.clone())
  }
}


#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use super::*;
  use crate::core::canonical::canonical_morphism;

  #[test]
  fn constructs_once_and_skips_failures() {
    let cache = MorphismCache::new("test");
    let calls = Cell::new(0);
    let construct = || {
      calls.set(calls.get() + 1);
      Some(Morphism::identity(&ModuleType::Z))
    };

    let first = cache.get_or_construct(&ModuleType::Z, &ModuleType::Z, construct);
    let second = cache.get_or_construct(&ModuleType::Z, &ModuleType::Z, construct);
    assert_eq!(first, second);
    assert_eq!(calls.get(), 1);

    let nothing = cache.get_or_construct(&ModuleType::Z, &ModuleType::Q, || None);
    assert!(nothing.is_none());
    assert!(!cache.contains(&ModuleType::Z, &ModuleType::Q));

    assert_eq!(
      cache.statistics(),
      CacheStatistics { hits: 1, misses: 2, insertions: 1, entries: 1 }
    );
  }

  #[test]
  fn racing_threads_agree_on_one_entry_per_key() {
    let cache = MorphismCache::new("test");
    let keys = [
      (ModuleType::Z, ModuleType::Q),
      (ModuleType::Z, ModuleType::R),
      (ModuleType::Q, ModuleType::C),
    ];
    let rounds = 4 * keys.len();

    let results: Vec<Vec<(CacheKey, Morphism)>> = std::thread::scope(|scope| {
      let (cache, keys) = (&cache, &keys);
      let workers: Vec<_> = (0..8).map(|offset| {
        scope.spawn(move || {
          keys.iter()
              .cycle()
              .skip(offset)
              .take(rounds)
              .map(|(domain, codomain)| {
                let morphism = cache.get_or_construct(domain, codomain, || Some(Morphism::zero(domain, codomain)));
                ((domain.clone(), codomain.clone()), morphism.unwrap())
              })
              .collect::<Vec<_>>()
        })
      }).collect();
      workers.into_iter().map(|worker| worker.join().unwrap()).collect()
    });

    for ((domain, codomain), morphism) in results.iter().flatten() {
      assert_eq!(Some(morphism), cache.get(domain, codomain).as_ref());
    }

    let statistics = cache.statistics();
    assert_eq!(statistics.entries, keys.len());
    assert_eq!(statistics.insertions, statistics.entries);
    assert_eq!(statistics.hits + statistics.misses, 8 * rounds);
  }

  #[test]
  fn canonical_morphisms_agree_across_threads() {
    let pairs = [
      (ModuleType::Z, ModuleType::zn(11)),
      (ModuleType::free(&ModuleType::Z, 2), ModuleType::free(&ModuleType::C, 3)),
      (ModuleType::R, ModuleType::Q),
    ];
    let results: Vec<Vec<Option<Morphism>>> = std::thread::scope(|scope| {
      let pairs = &pairs;
      let workers: Vec<_> = (0..6).map(|_| {
        scope.spawn(move || {
          pairs.iter().map(|(domain, codomain)| canonical_morphism(domain, codomain)).collect::<Vec<_>>()
        })
      }).collect();
      workers.into_iter().map(|worker| worker.join().unwrap()).collect()
    });

    for found in &results {
      assert!(found.iter().all(Option::is_some));
      assert_eq!(found, &results[0]);
    }
  }

  #[test]
  #[should_panic]
  fn rejects_mismatched_constructions() {
    let cache = MorphismCache::new("test");
    cache.get_or_construct(&ModuleType::Z, &ModuleType::Q, || Some(Morphism::identity(&ModuleType::Z)));
  }
}
