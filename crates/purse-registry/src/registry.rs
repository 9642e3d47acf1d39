//! Reference-counted registry of inserted style elements.
//!
//! [`StyleRegistry`] sits between compiled [`StyleElement`]s and a
//! [`StyleSink`]. It keys live rule sets by their owned class name, so
//! however many elements (or independently built copies of one element)
//! reference the same compiled content, the sink sees one `add_rule`
//! sequence on the first insertion and one retraction sequence when the
//! last reference is released.
//!
//! # Invariants
//!
//! - An entry exists iff its ref count is at least 1.
//! - For every entry, its rules are held by the sink exactly once.
//! - Composed children are walked before the owned fragment, in argument
//!   order, on both insert and release.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use purse_types::{ClassName, OwnedFragment, StyleElement, StyleRule};

use crate::config::{InsertionMode, RegistryConfig};
use crate::error::{RegistryError, RegistryResult};
use crate::traits::{RuleHandle, StyleSink};

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Book-keeping for one live class name.
#[derive(Debug)]
pub struct RegistryEntry {
    ref_count: usize,
    handles: Vec<RuleHandle>,
}

impl RegistryEntry {
    /// Number of live registrations referencing this class name.
    pub fn ref_count(&self) -> usize {
        self.ref_count
    }

    /// Number of rules the sink holds for this class name.
    pub fn rule_count(&self) -> usize {
        self.handles.len()
    }
}

/// Proof of one successful [`StyleRegistry::insert`].
///
/// Pass it to [`StyleRegistry::release`] exactly once when the styled scope
/// ends. Because a `Registration` is consumed on release and cannot be
/// cloned, releasing twice is impossible.
#[must_use = "dropping a Registration leaks its references; pass it to StyleRegistry::release"]
#[derive(Debug)]
pub struct Registration {
    registry: u64,
    element: Arc<StyleElement>,
}

impl Registration {
    pub fn element(&self) -> &Arc<StyleElement> {
        &self.element
    }

    /// The full class list of the registered element.
    pub fn class_name(&self) -> &str {
        &self.element.class_name
    }
}

/// Proof of one successful [`StyleRegistry::insert_global`].
#[must_use = "dropping a GlobalRegistration leaks its rule; pass it to StyleRegistry::release_global"]
#[derive(Debug)]
pub struct GlobalRegistration {
    registry: u64,
    rule: StyleRule,
    handle: Option<RuleHandle>,
}

impl GlobalRegistration {
    pub fn rule(&self) -> &StyleRule {
        &self.rule
    }
}

/// Deduplicating, reference-counted front for a [`StyleSink`].
///
/// A registry is confined to one logical owner; it is not meant to be shared
/// across threads.
pub struct StyleRegistry<S> {
    id: u64,
    sink: S,
    config: RegistryConfig,
    entries: HashMap<ClassName, RegistryEntry>,
}

impl<S: StyleSink> StyleRegistry<S> {
    /// Create a registry with the default configuration.
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, RegistryConfig::default())
    }

    pub fn with_config(sink: S, config: RegistryConfig) -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            sink,
            config,
            entries: HashMap::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of live class names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live references to `class_name`, zero if it is not inserted.
    pub fn ref_count(&self, class_name: &ClassName) -> usize {
        self.entries.get(class_name).map_or(0, RegistryEntry::ref_count)
    }

    pub fn entry(&self, class_name: &ClassName) -> Option<&RegistryEntry> {
        self.entries.get(class_name)
    }

    pub fn contains(&self, class_name: &ClassName) -> bool {
        self.entries.contains_key(class_name)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    // ---------------------------------------------------------------
    // Style elements
    // ---------------------------------------------------------------

    /// Insert `element` and its composed subtree.
    ///
    /// Rules for a class name are added to the sink only if no live entry
    /// exists for it; otherwise its ref count is bumped. In strict mode a
    /// sink failure undoes everything this call did before returning the
    /// error.
    pub fn insert(&mut self, element: &Arc<StyleElement>) -> RegistryResult<Registration> {
        self.insert_element(element)?;
        Ok(Registration {
            registry: self.id,
            element: Arc::clone(element),
        })
    }

    /// Release one registration, retracting rules whose count drops to zero.
    pub fn release(&mut self, registration: Registration) {
        if registration.registry != self.id {
            warn!(
                class_name = %registration.element.class_name,
                "ignoring registration from another registry"
            );
            return;
        }
        self.remove_element(&registration.element);
    }

    fn insert_element(&mut self, element: &StyleElement) -> RegistryResult<()> {
        for (index, child) in element.composed.iter().enumerate() {
            if let Err(e) = self.insert_element(child) {
                self.unwind(&element.composed[..index]);
                return Err(e);
            }
        }

        if let Some(owned) = &element.owned {
            if let Err(e) = self.acquire(owned) {
                self.unwind(&element.composed);
                return Err(e);
            }
        }
        Ok(())
    }

    fn unwind(&mut self, inserted: &[Arc<StyleElement>]) {
        for child in inserted.iter().rev() {
            self.remove_element(child);
        }
    }

    fn acquire(&mut self, owned: &OwnedFragment) -> RegistryResult<()> {
        if let Some(entry) = self.entries.get_mut(&owned.class_name) {
            entry.ref_count += 1;
            return Ok(());
        }

        let mut handles = Vec::with_capacity(owned.style_rules.len());
        for rule in &owned.style_rules {
            match self.sink.add_rule(rule) {
                Ok(handle) => handles.push(handle),
                Err(source) => match self.config.mode {
                    InsertionMode::Strict => {
                        for handle in handles {
                            self.sink.retract(handle);
                        }
                        return Err(RegistryError::RuleRejected {
                            rule: rule.to_string(),
                            source,
                        });
                    }
                    InsertionMode::Relaxed => {
                        warn!(rule = %rule, error = %source, "could not add style rule");
                    }
                },
            }
        }

        debug!(class_name = %owned.class_name, rules = handles.len(), "inserted style rules");
        self.entries.insert(
            owned.class_name.clone(),
            RegistryEntry {
                ref_count: 1,
                handles,
            },
        );
        Ok(())
    }

    fn remove_element(&mut self, element: &StyleElement) {
        for child in &element.composed {
            self.remove_element(child);
        }
        if let Some(owned) = &element.owned {
            self.relinquish(&owned.class_name);
        }
    }

    fn relinquish(&mut self, class_name: &ClassName) {
        let Some(entry) = self.entries.get_mut(class_name) else {
            return;
        };
        entry.ref_count = entry.ref_count.saturating_sub(1);
        if entry.ref_count > 0 {
            return;
        }

        if let Some(entry) = self.entries.remove(class_name) {
            debug!(class_name = %class_name, rules = entry.handles.len(), "retracted style rules");
            for handle in entry.handles {
                self.sink.retract(handle);
            }
        }
    }

    // ---------------------------------------------------------------
    // Global rules
    // ---------------------------------------------------------------

    /// Insert a rule that is not tied to a class name.
    ///
    /// Global rules bypass deduplication: inserting the same text twice
    /// holds it twice.
    pub fn insert_global(&mut self, rule: &StyleRule) -> RegistryResult<GlobalRegistration> {
        let handle = match self.sink.add_global_rule(rule) {
            Ok(handle) => Some(handle),
            Err(source) => match self.config.mode {
                InsertionMode::Strict => {
                    return Err(RegistryError::RuleRejected {
                        rule: rule.to_string(),
                        source,
                    });
                }
                InsertionMode::Relaxed => {
                    warn!(rule = %rule, error = %source, "could not add global style rule");
                    None
                }
            },
        };
        Ok(GlobalRegistration {
            registry: self.id,
            rule: rule.clone(),
            handle,
        })
    }

    pub fn release_global(&mut self, registration: GlobalRegistration) {
        if registration.registry != self.id {
            warn!(rule = %registration.rule, "ignoring global registration from another registry");
            return;
        }
        if let Some(handle) = registration.handle {
            self.sink.retract(handle);
        }
    }
}

impl<S> std::fmt::Debug for StyleRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleRegistry")
            .field("id", &self.id)
            .field("mode", &self.config.mode)
            .field("entry_count", &self.entries.len())
            .finish()
    }
}
