use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use purse_compiler::Compiler;
use purse_hash::ContentHasher;
use purse_registry::{InMemorySink, RegistryConfig, StyleRegistry, StyleSink};
use purse_types::{Declarations, StyleElement, StyleInput};

use crate::error::{SdkError, SdkResult};
use crate::guard::{GlobalStyleGuard, SharedRegistry, StyleGuard};

/// High-level Purse API.
///
/// One `Purse` per styled tree. It is single-threaded: the registry sits in
/// an `Rc<RefCell<..>>` shared with the guards it hands out.
pub struct Purse<S: StyleSink> {
    compiler: RefCell<Compiler>,
    registry: SharedRegistry<S>,
}

impl Purse<InMemorySink> {
    /// A purse writing into a fresh [`InMemorySink`], in strict mode.
    pub fn in_memory() -> Self {
        Self::from_parts(
            Compiler::new(),
            StyleRegistry::with_config(InMemorySink::new(), RegistryConfig::strict()),
        )
    }
}

impl<S: StyleSink> Purse<S> {
    /// A purse over `sink` with the default configuration.
    pub fn new(sink: S) -> Self {
        Self::from_parts(Compiler::new(), StyleRegistry::new(sink))
    }

    pub fn builder() -> PurseBuilder<S> {
        PurseBuilder::new()
    }

    fn from_parts(compiler: Compiler, registry: StyleRegistry<S>) -> Self {
        Self {
            compiler: RefCell::new(compiler),
            registry: Rc::new(RefCell::new(registry)),
        }
    }

    // ---- Compilation ----

    /// Build a style element without inserting it.
    pub fn style<I>(&self, inputs: I) -> SdkResult<Arc<StyleElement>>
    where
        I: IntoIterator,
        I::Item: Into<StyleInput>,
    {
        let mut compiler = self
            .compiler
            .try_borrow_mut()
            .map_err(|_| SdkError::CompilerBusy)?;
        Ok(compiler.build(inputs)?)
    }

    // ---- Registration ----

    /// Build a style element and keep it inserted while the guard lives.
    pub fn use_styles<I>(&self, inputs: I) -> SdkResult<StyleGuard<S>>
    where
        I: IntoIterator,
        I::Item: Into<StyleInput>,
    {
        let element = self.style(inputs)?;
        self.use_element(&element)
    }

    /// Keep an already built element inserted while the guard lives.
    pub fn use_element(&self, element: &Arc<StyleElement>) -> SdkResult<StyleGuard<S>> {
        let registration = self
            .registry
            .try_borrow_mut()
            .map_err(|_| SdkError::RegistryBusy)?
            .insert(element)?;
        Ok(StyleGuard::new(Rc::clone(&self.registry), registration))
    }

    /// Insert `selector{declarations}` as a global rule while the guard lives.
    ///
    /// Global rules are not deduplicated.
    pub fn inject_global_styles(
        &self,
        selector: &str,
        declarations: &Declarations,
    ) -> SdkResult<GlobalStyleGuard<S>> {
        let rule = self
            .compiler
            .try_borrow_mut()
            .map_err(|_| SdkError::CompilerBusy)?
            .render_global_rule(selector, declarations);
        let registration = self
            .registry
            .try_borrow_mut()
            .map_err(|_| SdkError::RegistryBusy)?
            .insert_global(&rule)?;
        Ok(GlobalStyleGuard::new(Rc::clone(&self.registry), registration))
    }

    // ---- Inspection ----

    /// Run `f` with read access to the sink.
    pub fn with_sink<R>(&self, f: impl FnOnce(&S) -> R) -> SdkResult<R> {
        let registry = self
            .registry
            .try_borrow()
            .map_err(|_| SdkError::RegistryBusy)?;
        Ok(f(registry.sink()))
    }

    /// Number of distinct class names currently inserted.
    pub fn live_class_count(&self) -> usize {
        self.registry.try_borrow().map_or(0, |r| r.len())
    }
}

impl<S: StyleSink> std::fmt::Debug for Purse<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Purse")
            .field("live_class_count", &self.live_class_count())
            .finish()
    }
}

/// Builder for [`Purse`]. A sink is required.
pub struct PurseBuilder<S> {
    sink: Option<S>,
    config: RegistryConfig,
    hasher: ContentHasher,
}

impl<S: StyleSink> PurseBuilder<S> {
    pub fn new() -> Self {
        Self {
            sink: None,
            config: RegistryConfig::default(),
            hasher: ContentHasher::DEFAULT,
        }
    }

    pub fn sink(mut self, sink: S) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn hasher(mut self, hasher: ContentHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Fails with [`SdkError::MissingDependency`] if no sink was supplied.
    pub fn build(self) -> SdkResult<Purse<S>> {
        let sink = self.sink.ok_or(SdkError::MissingDependency("a style sink"))?;
        Ok(Purse::from_parts(
            Compiler::with_hasher(self.hasher),
            StyleRegistry::with_config(sink, self.config),
        ))
    }
}

impl<S: StyleSink> Default for PurseBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
