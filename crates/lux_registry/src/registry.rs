//! The process-wide registry: a separate ordered list per record family
//! plus a shared hash→location map, populated at program start by
//! generated registration code.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{RegistryError, Result};
use crate::meta::{Meta, RegistryFamily};

#[derive(Default)]
struct State {
    sealed: bool,
    families: HashMap<RegistryFamily, Vec<Arc<Meta>>>,
    by_hash: HashMap<u64, (RegistryFamily, usize)>,
    by_name: HashMap<String, u64>,
}

/// Resolves a string name or hash to a runtime meta record.
///
/// Registration happens during program initialization on a single thread;
/// the `RwLock` exists only to make `MetaRegistry` `Send + Sync` across the
/// `seal()` boundary, not to serialize steady-state reads — callers are
/// expected to stop registering (and call `seal()`) before any lookup
/// happens from more than one thread.
#[derive(Default)]
pub struct MetaRegistry {
    state: RwLock<State>,
}

impl MetaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent on hash: a second registration with the same hash is a
    /// no-op. Returns `RegistryError::Sealed` once `seal()` has been called.
    pub fn register(&self, meta: Meta) -> Result<()> {
        let mut state = self.state.write().expect("registry lock poisoned");
        if state.sealed {
            return Err(RegistryError::Sealed);
        }
        if state.by_hash.contains_key(&meta.hash) {
            return Ok(());
        }
        let family = meta.family();
        let name = meta.name.clone();
        let hash = meta.hash;
        let list = state.families.entry(family).or_default();
        let index = list.len();
        list.push(Arc::new(meta));
        state.by_hash.insert(hash, (family, index));
        state.by_name.insert(name, hash);
        Ok(())
    }

    pub fn has_hash(&self, hash: u64) -> bool {
        self.state.read().expect("registry lock poisoned").by_hash.contains_key(&hash)
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.state.read().expect("registry lock poisoned").by_name.contains_key(name)
    }

    pub fn find_by_hash(&self, hash: u64) -> Option<(RegistryFamily, Arc<Meta>)> {
        let state = self.state.read().expect("registry lock poisoned");
        let &(family, index) = state.by_hash.get(&hash)?;
        let meta = state.families.get(&family)?.get(index)?.clone();
        Some((family, meta))
    }

    pub fn find_by_name(&self, name: &str) -> Option<(RegistryFamily, Arc<Meta>)> {
        let hash = {
            let state = self.state.read().expect("registry lock poisoned");
            *state.by_name.get(name)?
        };
        self.find_by_hash(hash)
    }

    /// `at(kind, index) -> meta?` — lets generated code iterate a family
    /// without knowing the registered names.
    pub fn at(&self, family: RegistryFamily, index: usize) -> Option<Arc<Meta>> {
        self.state
            .read()
            .expect("registry lock poisoned")
            .families
            .get(&family)?
            .get(index)
            .cloned()
    }

    pub fn len(&self, family: RegistryFamily) -> usize {
        self.state
            .read()
            .expect("registry lock poisoned")
            .families
            .get(&family)
            .map_or(0, Vec::len)
    }

    /// Close the write phase. Every `register` call after this returns
    /// `RegistryError::Sealed`; lookups are unaffected.
    pub fn seal(&self) {
        self.state.write().expect("registry lock poisoned").sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.state.read().expect("registry lock poisoned").sealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{FundamentalMeta, MetaKind};

    fn fundamental(name: &str, hash: u64) -> Meta {
        Meta::new(
            name,
            hash,
            MetaKind::Fundamental(FundamentalMeta {
                spelling: name.to_string(),
                size: 4,
                align: 4,
            }),
        )
    }

    #[test]
    fn register_then_find_by_name_and_hash() {
        let registry = MetaRegistry::new();
        registry.register(fundamental("int", 42)).unwrap();

        assert!(registry.has_name("int"));
        assert!(registry.has_hash(42));
        let (family, meta) = registry.find_by_name("int").unwrap();
        assert_eq!(family, RegistryFamily::Fundamental);
        assert_eq!(meta.hash, 42);
    }

    /// Registering the same meta (same hash) twice must leave the registry
    /// unchanged after the first.
    #[test]
    fn duplicate_hash_registration_is_a_no_op() {
        let registry = MetaRegistry::new();
        registry.register(fundamental("int", 42)).unwrap();
        registry.register(fundamental("int_again", 42)).unwrap();

        assert_eq!(registry.len(RegistryFamily::Fundamental), 1);
        assert!(!registry.has_name("int_again"));
    }

    #[test]
    fn register_after_seal_is_rejected() {
        let registry = MetaRegistry::new();
        registry.register(fundamental("int", 42)).unwrap();
        registry.seal();

        let err = registry.register(fundamental("double", 43)).unwrap_err();
        assert!(matches!(err, RegistryError::Sealed));
        assert!(registry.has_hash(42));
        assert!(!registry.has_hash(43));
    }

    #[test]
    fn at_iterates_a_family_by_index() {
        let registry = MetaRegistry::new();
        registry.register(fundamental("int", 1)).unwrap();
        registry.register(fundamental("double", 2)).unwrap();

        assert_eq!(registry.at(RegistryFamily::Fundamental, 0).unwrap().name, "int");
        assert_eq!(registry.at(RegistryFamily::Fundamental, 1).unwrap().name, "double");
        assert!(registry.at(RegistryFamily::Fundamental, 2).is_none());
    }

    #[test]
    fn find_missing_hash_and_name_returns_none() {
        let registry = MetaRegistry::new();
        assert!(registry.find_by_hash(99).is_none());
        assert!(registry.find_by_name("missing").is_none());
        assert!(!registry.has_hash(99));
    }
}
