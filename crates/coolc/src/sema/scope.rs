//! Lexical scopes and the per-class feature walk
//!
//! Each class gets its own short-lived [`Scope`]: one outer frame for its
//! attributes, one nested frame per method for the formals. The walk also
//! fills the [`FeatureIndex`] consumed later during member resolution.

use std::collections::HashMap;

use super::registry::{ClassRegistry, FeatureIndex};
use crate::ast::{Attr, Class, Expr, Feature, Method};
use crate::symbols::Ident;

/// A stack of lexical frames mapping names to their declared types.
#[derive(Debug, Default)]
pub struct Scope {
    frames: Vec<HashMap<Ident, Ident>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_frame(&mut self) {
        self.frames.push(HashMap::new());
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    /// Bind a name to its declared type in the innermost frame. Rebinding a
    /// name already present in that frame replaces the earlier entry.
    pub fn bind(&mut self, name: Ident, ty: Ident) {
        self.frames
            .last_mut()
            .expect("bind outside any frame")
            .insert(name, ty);
    }

    /// Innermost-first lookup across all frames.
    pub fn lookup(&self, name: Ident) -> Option<Ident> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(&name).copied())
    }

    /// Lookup restricted to the innermost frame.
    pub fn lookup_local(&self, name: Ident) -> Option<Ident> {
        self.frames.last().and_then(|frame| frame.get(&name).copied())
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

/// Walks every class's features, binding names into a fresh scope per class.
pub struct ScopeBuilder {
    index: FeatureIndex,
}

impl ScopeBuilder {
    pub fn new() -> Self {
        Self {
            index: FeatureIndex::new(),
        }
    }

    pub fn index(&self) -> &FeatureIndex {
        &self.index
    }

    /// Walk all registered classes, each in isolation.
    pub fn run(&mut self, registry: &ClassRegistry) {
        for class in registry.classes() {
            self.walk_class(class);
        }
    }

    fn walk_class(&mut self, class: &Class) {
        let mut scope = Scope::new();
        scope.push_frame();

        for feature in &class.features {
            match feature {
                Feature::Attr(attr) => {
                    self.index.record_attr(class.name, attr);
                    self.walk_attr(&mut scope, attr);
                }
                Feature::Method(method) => {
                    self.index.record_method(class.name, method);
                    self.walk_method(&mut scope, method);
                }
            }
        }

        scope.pop_frame();
    }

    fn walk_attr(&mut self, scope: &mut Scope, attr: &Attr) {
        scope.bind(attr.name, attr.ty);
    }

    fn walk_method(&mut self, scope: &mut Scope, method: &Method) {
        scope.push_frame();
        for formal in &method.formals {
            scope.bind(formal.name, formal.ty);
        }
        if let Some(body) = &method.body {
            self.check_expression(scope, body);
        }
        scope.pop_frame();
    }

    /// Expression analysis attaches here: resolving identifiers against the
    /// scope, checking dispatches against the feature index, and writing the
    /// resolved type into `Expr::ty`. Until that lands, every body passes.
    fn check_expression(&mut self, _scope: &mut Scope, _expr: &Expr) -> bool {
        true
    }
}

impl Default for ScopeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Formal, SourceLoc};
    use crate::symbols::{Interner, Predefined};

    #[test]
    fn test_bind_and_lookup() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let y = interner.intern("y");
        let int = interner.intern("Int");
        let string = interner.intern("String");

        let mut scope = Scope::new();
        scope.push_frame();
        scope.bind(x, int);

        scope.push_frame();
        scope.bind(y, string);
        assert_eq!(scope.lookup(x), Some(int));
        assert_eq!(scope.lookup(y), Some(string));
        assert_eq!(scope.lookup_local(x), None);

        scope.pop_frame();
        assert_eq!(scope.lookup(y), None);
        assert_eq!(scope.lookup(x), Some(int));
    }

    #[test]
    fn test_inner_binding_shadows_outer() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let int = interner.intern("Int");
        let bool_ty = interner.intern("Bool");

        let mut scope = Scope::new();
        scope.push_frame();
        scope.bind(x, int);
        scope.push_frame();
        scope.bind(x, bool_ty);

        assert_eq!(scope.lookup(x), Some(bool_ty));
        scope.pop_frame();
        assert_eq!(scope.lookup(x), Some(int));
    }

    #[test]
    fn test_rebinding_in_same_frame_replaces() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let int = interner.intern("Int");
        let string = interner.intern("String");

        let mut scope = Scope::new();
        scope.push_frame();
        scope.bind(x, int);
        scope.bind(x, string);

        assert_eq!(scope.lookup(x), Some(string));
    }

    #[test]
    fn test_walk_indexes_attributes_and_methods() {
        let mut interner = Interner::new();
        let names = Predefined::new(&mut interner);
        let mut registry = ClassRegistry::new();
        registry.install_builtins(&names);

        let file = interner.intern("point.cl");
        let point = interner.intern("Point");
        let x = interner.intern("x");
        let shift = interner.intern("shift");
        let dx = interner.intern("dx");

        registry.insert(Class {
            name: point,
            parent: names.object,
            features: vec![
                Feature::Attr(Attr {
                    name: x,
                    ty: names.int,
                    init: None,
                    line: 2,
                }),
                Feature::Method(Method {
                    name: shift,
                    formals: vec![Formal {
                        name: dx,
                        ty: names.int,
                    }],
                    return_ty: point,
                    body: None,
                    line: 3,
                }),
            ],
            location: SourceLoc { file, line: 1 },
        });

        let mut builder = ScopeBuilder::new();
        builder.run(&registry);

        let attrs = builder.index().attrs_of(point);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].name, x);
        assert_eq!(attrs[0].ty, names.int);

        let methods = builder.index().methods_of(point);
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, shift);
        assert_eq!(methods[0].formals, vec![(dx, names.int)]);
        assert_eq!(methods[0].return_ty, point);

        // Builtins are walked too.
        assert_eq!(builder.index().methods_of(names.io).len(), 4);
        assert_eq!(builder.index().attrs_of(names.string).len(), 2);
    }
}
