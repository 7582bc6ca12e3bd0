//! View registry and the navigation controller.
//!
//! [`ViewRegistry`] maps view ids to their surfaces and is frozen once the
//! engine starts. [`Navigator`] owns the active-view pointer and the visit
//! history; [`Navigator::go_to`] is the only way forward and
//! [`Navigator::go_back`] the only way back.
//!
//! Every transition validates its target before mutating anything, so a
//! failed transition leaves both the state and the surface untouched.

use super::Action;
use crate::domain::{NarrativeError, Result, Surface, View, ViewId};
use std::collections::HashMap;

/// Lookup table from view id to surface.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    views: HashMap<ViewId, Surface>,
    order: Vec<ViewId>,
}

impl ViewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a view.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::DuplicateView`] if the id is already taken.
    pub fn register(&mut self, id: ViewId, surface: Surface) -> Result<()> {
        if self.views.contains_key(&id) {
            return Err(NarrativeError::DuplicateView(id.to_string()));
        }
        self.order.push(id.clone());
        self.views.insert(id, surface);
        Ok(())
    }

    /// Resolves a view id to its surface.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::UnknownView`] if the id was never registered.
    pub fn resolve(&self, id: &ViewId) -> Result<&Surface> {
        self.views
            .get(id)
            .ok_or_else(|| NarrativeError::UnknownView(id.to_string()))
    }

    #[must_use]
    pub fn contains(&self, id: &ViewId) -> bool {
        self.views.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered views in registration order.
    pub fn views(&self) -> impl Iterator<Item = View> + '_ {
        self.order.iter().filter_map(|id| {
            self.views.get(id).map(|surface| View {
                id: id.clone(),
                surface: surface.clone(),
            })
        })
    }
}

/// Active view pointer plus visit history.
#[derive(Debug, Clone)]
pub struct Navigator {
    registry: ViewRegistry,
    entry: ViewId,
    active: ViewId,
    history: Vec<ViewId>,
}

impl Navigator {
    /// Creates a navigator positioned on `entry`.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::UnknownView`] if `entry` is not registered.
    pub fn new(registry: ViewRegistry, entry: ViewId) -> Result<Self> {
        registry.resolve(&entry)?;
        Ok(Self {
            registry,
            active: entry.clone(),
            entry,
            history: Vec::new(),
        })
    }

    #[must_use]
    pub const fn active(&self) -> &ViewId {
        &self.active
    }

    #[must_use]
    pub const fn entry(&self) -> &ViewId {
        &self.entry
    }

    #[must_use]
    pub fn history(&self) -> &[ViewId] {
        &self.history
    }

    #[must_use]
    pub const fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    #[must_use]
    pub fn is_at_entry(&self) -> bool {
        self.active == self.entry
    }

    /// Activates `target`, pushing the previously active view onto the history.
    ///
    /// Navigating to the already-active view is allowed and still records a
    /// history entry.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::UnknownView`] if `target` is not registered;
    /// nothing is mutated and no action is emitted in that case.
    pub fn go_to(&mut self, target: &ViewId, out: &mut Vec<Action>) -> Result<()> {
        self.registry.resolve(target)?;
        let previous = std::mem::replace(&mut self.active, target.clone());

        tracing::debug!(from = %previous, to = %target, depth = self.history.len() + 1, "navigating");

        out.push(Action::SetActive {
            view: previous.clone(),
            active: false,
        });
        out.push(Action::SetActive {
            view: target.clone(),
            active: true,
        });
        self.history.push(previous);
        Ok(())
    }

    /// Restores the most recently displaced view, shrinking the history by one.
    ///
    /// Returns `Ok(false)` without doing anything when the history is empty.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::UnknownView`] if the recorded view is no longer
    /// resolvable; the history entry is kept in that case.
    pub fn go_back(&mut self, out: &mut Vec<Action>) -> Result<bool> {
        let Some(previous) = self.history.last() else {
            tracing::debug!("history empty, ignoring back");
            return Ok(false);
        };
        self.registry.resolve(previous)?;
        let Some(previous) = self.history.pop() else {
            return Ok(false);
        };
        let displaced = std::mem::replace(&mut self.active, previous);

        tracing::debug!(from = %displaced, to = %self.active, depth = self.history.len(), "navigating back");

        out.push(Action::SetActive {
            view: displaced,
            active: false,
        });
        out.push(Action::SetActive {
            view: self.active.clone(),
            active: true,
        });
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ViewId = ViewId::from_static("a");
    const B: ViewId = ViewId::from_static("b");
    const C: ViewId = ViewId::from_static("c");

    fn navigator() -> Navigator {
        let mut registry = ViewRegistry::new();
        for id in [A, B, C] {
            registry.register(id, Surface::default()).unwrap();
        }
        Navigator::new(registry, A).unwrap()
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = ViewRegistry::new();
        registry.register(A, Surface::default()).unwrap();
        let err = registry.register(A, Surface::default()).unwrap_err();
        assert!(matches!(err, NarrativeError::DuplicateView(id) if id == "a"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_unknown_view_fails() {
        let registry = ViewRegistry::new();
        assert!(matches!(
            registry.resolve(&B),
            Err(NarrativeError::UnknownView(id)) if id == "b"
        ));
    }

    #[test]
    fn test_navigator_requires_registered_entry() {
        assert!(Navigator::new(ViewRegistry::new(), A).is_err());
    }

    #[test]
    fn test_go_to_pushes_previous_and_toggles_markers() {
        let mut nav = navigator();
        let mut out = Vec::new();
        nav.go_to(&B, &mut out).unwrap();

        assert_eq!(nav.active(), &B);
        assert_eq!(nav.history(), &[A]);
        assert_eq!(
            out,
            vec![
                Action::SetActive { view: A, active: false },
                Action::SetActive { view: B, active: true },
            ]
        );
    }

    #[test]
    fn test_go_to_unknown_view_leaves_state_untouched() {
        let mut nav = navigator();
        let mut out = Vec::new();
        let err = nav.go_to(&ViewId::from_static("missing"), &mut out).unwrap_err();

        assert!(err.is_programming_error());
        assert_eq!(nav.active(), &A);
        assert!(nav.history().is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_go_to_same_view_still_records_history() {
        let mut nav = navigator();
        let mut out = Vec::new();
        nav.go_to(&A, &mut out).unwrap();
        assert_eq!(nav.active(), &A);
        assert_eq!(nav.history(), &[A]);
    }

    #[test]
    fn test_go_back_on_empty_history_is_noop() {
        let mut nav = navigator();
        let mut out = Vec::new();
        assert!(!nav.go_back(&mut out).unwrap());
        assert_eq!(nav.active(), &A);
        assert!(out.is_empty());
    }

    #[test]
    fn test_go_back_restores_and_shrinks_history() {
        let mut nav = navigator();
        let mut out = Vec::new();
        nav.go_to(&B, &mut out).unwrap();
        nav.go_to(&C, &mut out).unwrap();
        out.clear();

        assert!(nav.go_back(&mut out).unwrap());
        assert_eq!(nav.active(), &B);
        assert_eq!(nav.history(), &[A]);
        assert_eq!(
            out,
            vec![
                Action::SetActive { view: C, active: false },
                Action::SetActive { view: B, active: true },
            ]
        );
    }
}
