//! Semantic analysis driver
//!
//! Runs the whole pass over a parsed program: registry population, the
//! Main-class check, parent resolution, inheritance-graph validation and the
//! per-class scope walk. Every check runs even when an earlier one failed;
//! the only halt gate is the final error count.

use super::diagnostics::{Diagnostics, SemantError};
use super::inheritance::InheritanceGraph;
use super::registry::{ClassRegistry, FeatureIndex};
use super::scope::ScopeBuilder;
use crate::ast::Program;
use crate::common::{CompileError, CompileResult};
use crate::symbols::{Interner, Predefined};

pub struct SemanticAnalyzer<'a> {
    interner: &'a Interner,
    names: &'a Predefined,
    registry: ClassRegistry,
    graph: InheritanceGraph,
    scopes: ScopeBuilder,
    diagnostics: Diagnostics,
}

impl<'a> SemanticAnalyzer<'a> {
    /// Analyzer reporting to standard error.
    pub fn new(interner: &'a Interner, names: &'a Predefined) -> Self {
        Self::with_diagnostics(interner, names, Diagnostics::new())
    }

    pub fn with_diagnostics(
        interner: &'a Interner,
        names: &'a Predefined,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            interner,
            names,
            registry: ClassRegistry::new(),
            graph: InheritanceGraph::new(),
            scopes: ScopeBuilder::new(),
            diagnostics,
        }
    }

    /// Run every check in order. Returns `true` when no error was recorded.
    pub fn analyze(&mut self, program: &Program) -> bool {
        self.registry.install_builtins(self.names);
        self.registry.register(&program.classes);

        self.check_main_defined();
        self.check_parents_exist();
        self.graph.build(
            &self.registry,
            self.names,
            self.interner,
            &mut self.diagnostics,
        );
        self.graph
            .detect_cycles(&self.registry, self.interner, &mut self.diagnostics);
        self.scopes.run(&self.registry);

        !self.diagnostics.has_errors()
    }

    /// [`analyze`](Self::analyze) with the verdict folded into a `Result`.
    pub fn check(&mut self, program: &Program) -> CompileResult<()> {
        if self.analyze(program) {
            Ok(())
        } else {
            Err(CompileError::semantic(self.diagnostics.count()))
        }
    }

    /// Advisory: a missing `Main` is reported but does not stop the pass.
    pub fn check_main_defined(&mut self) -> bool {
        if self.registry.contains(self.names.main_class) {
            return true;
        }
        self.diagnostics.error(&SemantError::MissingMainClass);
        false
    }

    /// Verify every class's parent resolves, stopping at the first that
    /// does not. Returns `false` on the first undefined parent.
    pub fn check_parents_exist(&mut self) -> bool {
        for class in self.registry.classes() {
            if class.parent == self.names.no_class {
                continue;
            }
            if self.registry.lookup(class.parent).is_none() {
                self.diagnostics.error_at(
                    self.interner.resolve(class.location.file),
                    class.location.line,
                    &SemantError::UndefinedParent {
                        class: self.interner.resolve(class.name).to_string(),
                        parent: self.interner.resolve(class.parent).to_string(),
                    },
                );
                return false;
            }
        }
        true
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn graph(&self) -> &InheritanceGraph {
        &self.graph
    }

    pub fn features(&self) -> &FeatureIndex {
        self.scopes.index()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Errors recorded so far.
    pub fn errors(&self) -> usize {
        self.diagnostics.count()
    }
}
