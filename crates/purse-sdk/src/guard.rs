//! Scope guards that release registrations on drop.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use tracing::warn;

use purse_registry::{GlobalRegistration, Registration, StyleRegistry, StyleSink};
use purse_types::{StyleElement, StyleRule};

pub(crate) type SharedRegistry<S> = Rc<RefCell<StyleRegistry<S>>>;

/// Keeps a style element inserted for as long as it lives.
#[must_use = "styles are released as soon as the guard is dropped"]
pub struct StyleGuard<S: StyleSink> {
    registry: SharedRegistry<S>,
    registration: Option<Registration>,
    element: Arc<StyleElement>,
}

impl<S: StyleSink> StyleGuard<S> {
    pub(crate) fn new(registry: SharedRegistry<S>, registration: Registration) -> Self {
        let element = Arc::clone(registration.element());
        Self {
            registry,
            registration: Some(registration),
            element,
        }
    }

    /// The class list to put on the styled node.
    pub fn class_name(&self) -> &str {
        &self.element.class_name
    }

    pub fn element(&self) -> &Arc<StyleElement> {
        &self.element
    }

    /// Release now instead of at end of scope.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        let Some(registration) = self.registration.take() else {
            return;
        };
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => registry.release(registration),
            Err(_) => warn!(
                class_name = %self.element.class_name,
                "style registry busy during release; styles leaked"
            ),
        }
    }
}

impl<S: StyleSink> Drop for StyleGuard<S> {
    fn drop(&mut self) {
        self.release_inner();
    }
}

impl<S: StyleSink> std::fmt::Debug for StyleGuard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleGuard")
            .field("class_name", &self.element.class_name)
            .field("live", &self.registration.is_some())
            .finish()
    }
}

/// Keeps one global rule inserted for as long as it lives.
#[must_use = "the global rule is retracted as soon as the guard is dropped"]
pub struct GlobalStyleGuard<S: StyleSink> {
    registry: SharedRegistry<S>,
    registration: Option<GlobalRegistration>,
}

impl<S: StyleSink> GlobalStyleGuard<S> {
    pub(crate) fn new(registry: SharedRegistry<S>, registration: GlobalRegistration) -> Self {
        Self {
            registry,
            registration: Some(registration),
        }
    }

    pub fn rule(&self) -> Option<&StyleRule> {
        self.registration.as_ref().map(GlobalRegistration::rule)
    }
}

impl<S: StyleSink> Drop for GlobalStyleGuard<S> {
    fn drop(&mut self) {
        let Some(registration) = self.registration.take() else {
            return;
        };
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => registry.release_global(registration),
            Err(_) => warn!(rule = %registration.rule(), "style registry busy during release; rule leaked"),
        }
    }
}

impl<S: StyleSink> std::fmt::Debug for GlobalStyleGuard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalStyleGuard")
            .field("live", &self.registration.is_some())
            .finish()
    }
}
