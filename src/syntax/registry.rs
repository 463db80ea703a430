//! Category registry
//!
//! An immutable, ordered collection of compiled categories. Order is
//! precedence: when two categories' matches overlap, the one that comes
//! first in `categories()` keeps the overlapping characters.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use super::category::{Category, PatternSpec, DEFAULT_SIZE_LIMIT};
use super::style::Style;
use crate::error::Result;

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// A compiled, read-only list of categories
#[derive(Debug)]
pub struct Registry<P = Style> {
    id: u64,
    name: String,
    categories: Vec<Category<P>>,
}

impl<P> Registry<P> {
    /// Start building a registry
    pub fn builder(name: &str) -> RegistryBuilder<P> {
        RegistryBuilder::new(name)
    }

    /// Process-unique identity of this registry
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Registry (language) name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Categories in precedence order
    pub fn categories(&self) -> &[Category<P>] {
        &self.categories
    }

    /// Look up a category by id
    pub fn category(&self, id: &str) -> Option<&Category<P>> {
        self.categories.iter().find(|c| c.id() == id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

struct PendingCategory<P> {
    id: String,
    spec: PatternSpec,
    paint: P,
    priority: i32,
}

/// Collects category definitions; `build` compiles them all up front
pub struct RegistryBuilder<P = Style> {
    name: String,
    pending: Vec<PendingCategory<P>>,
    size_limit: usize,
}

impl<P> RegistryBuilder<P> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            pending: Vec::new(),
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }

    /// Limit on the compiled size of each pattern
    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = bytes;
        self
    }

    /// Add a category with priority 0
    pub fn category(self, id: &str, spec: PatternSpec, paint: P) -> Self {
        self.category_with_priority(id, spec, paint, 0)
    }

    /// Add a category with an explicit priority (higher = painted first)
    pub fn category_with_priority(mut self, id: &str, spec: PatternSpec, paint: P, priority: i32) -> Self {
        self.pending.push(PendingCategory {
            id: id.to_string(),
            spec,
            paint,
            priority,
        });
        self
    }

    /// Non-consuming variant of `category_with_priority`
    pub fn push(&mut self, id: &str, spec: PatternSpec, paint: P, priority: i32) {
        self.pending.push(PendingCategory {
            id: id.to_string(),
            spec,
            paint,
            priority,
        });
    }

    /// Compile every pattern.
    ///
    /// The first pattern that fails to compile aborts the build with
    /// `PatternCompile`; a registry is never produced half-compiled.
    pub fn build(self) -> Result<Registry<P>> {
        let mut categories = Vec::with_capacity(self.pending.len());
        for pending in self.pending {
            categories.push(Category::compile(
                &pending.id,
                &pending.spec,
                pending.paint,
                pending.priority,
                self.size_limit,
            )?);
        }

        // Stable: equal priorities keep registration order
        categories.sort_by(|a, b| b.priority().cmp(&a.priority()));

        let registry = Registry {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            name: self.name,
            categories,
        };
        debug!(
            registry = %registry.name,
            categories = registry.categories.len(),
            "registry built"
        );
        Ok(registry)
    }
}
