//! Inheritance graph construction and validation
//!
//! The graph is derived from the registry on demand: one parent→children
//! edge per class, excluding the root. Validation is two separate passes
//! with distinct diagnostics: a fast self-inheritance check during the
//! build, then a full cycle search over the finished adjacency.

use std::collections::{HashMap, HashSet};

use super::diagnostics::{Diagnostics, SemantError};
use super::registry::ClassRegistry;
use crate::symbols::{Ident, Interner, Predefined};

#[derive(Debug, Default)]
pub struct InheritanceGraph {
    children: HashMap<Ident, Vec<Ident>>,
}

impl InheritanceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one edge per registered class, in registration order.
    ///
    /// A class naming itself as parent is reported immediately and stops the
    /// build, leaving the edges added so far (including the self-edge) in
    /// place. Returns `false` in that case.
    pub fn build(
        &mut self,
        registry: &ClassRegistry,
        names: &Predefined,
        interner: &Interner,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        for class in registry.classes() {
            if class.parent == names.no_class {
                continue;
            }

            self.children.entry(class.parent).or_default().push(class.name);

            if class.parent == class.name {
                diagnostics.error_at(
                    interner.resolve(class.location.file),
                    class.location.line,
                    &SemantError::SelfInheritance {
                        class: interner.resolve(class.name).to_string(),
                    },
                );
                return false;
            }
        }
        true
    }

    pub fn children_of(&self, class: Ident) -> &[Ident] {
        self.children.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Search for a cycle, starting a traversal from every not-yet-visited
    /// class in registration order. The first cycle found is reported at the
    /// traversal root that uncovered it (necessarily itself on the cycle:
    /// every node has one parent, so no children-edge enters a cycle from
    /// outside) and the search stops. Returns `true` if a cycle was found.
    pub fn detect_cycles(
        &self,
        registry: &ClassRegistry,
        interner: &Interner,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        let mut visited = HashSet::new();
        let mut on_stack = HashSet::new();

        for class in registry.classes() {
            if visited.contains(&class.name) {
                continue;
            }
            if self.finds_cycle(class.name, &mut visited, &mut on_stack) {
                diagnostics.error_at(
                    interner.resolve(class.location.file),
                    class.location.line,
                    &SemantError::InheritanceCycle {
                        class: interner.resolve(class.name).to_string(),
                    },
                );
                return true;
            }
        }
        false
    }

    /// Depth-first search with an explicit stack, so traversal depth is
    /// bounded by heap rather than the call stack even for degenerate
    /// thousand-class inheritance chains.
    fn finds_cycle(
        &self,
        start: Ident,
        visited: &mut HashSet<Ident>,
        on_stack: &mut HashSet<Ident>,
    ) -> bool {
        visited.insert(start);
        on_stack.insert(start);
        let mut stack: Vec<(Ident, usize)> = vec![(start, 0)];

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let children = self.children.get(&node).map(Vec::as_slice).unwrap_or(&[]);

            if next < children.len() {
                frame.1 += 1;
                let child = children[next];
                if on_stack.contains(&child) {
                    return true;
                }
                if visited.insert(child) {
                    on_stack.insert(child);
                    stack.push((child, 0));
                }
            } else {
                on_stack.remove(&node);
                stack.pop();
            }
        }
        false
    }
}
