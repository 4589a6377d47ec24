//! Class registry
//!
//! Single source of truth mapping class name to declaration. Seeded with the
//! five builtin classes before user classes are registered, so builtins are
//! available as ancestors and attribute types whether or not the program
//! mentions them. Iteration follows registration order (builtins first, then
//! user classes in declaration order), which keeps every later check's
//! first-reported diagnostic deterministic.

use std::collections::HashMap;

use crate::ast::{Attr, Class, Feature, Formal, Method, SourceLoc};
use crate::symbols::{Ident, Predefined};

pub struct ClassRegistry {
    order: Vec<Ident>,
    classes: HashMap<Ident, Class>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            classes: HashMap::new(),
        }
    }

    /// Register the runtime-provided classes.
    ///
    /// Bodies are empty: these methods are implemented by the runtime system,
    /// only their signatures matter to the analysis. `_prim_slot` marks the
    /// hidden primitive storage of `Int`, `Bool` and `String`.
    pub fn install_builtins(&mut self, names: &Predefined) {
        let location = SourceLoc {
            file: names.builtin_filename,
            line: 0,
        };

        // Object has no parent; abort/type_name/copy come with every object.
        let object_class = Class {
            name: names.object,
            parent: names.no_class,
            features: vec![
                method(names.abort, vec![], names.object),
                method(names.type_name, vec![], names.string),
                method(names.copy, vec![], names.self_type),
            ],
            location,
        };

        let io_class = Class {
            name: names.io,
            parent: names.object,
            features: vec![
                method(
                    names.out_string,
                    vec![formal(names.arg, names.string)],
                    names.self_type,
                ),
                method(
                    names.out_int,
                    vec![formal(names.arg, names.int)],
                    names.self_type,
                ),
                method(names.in_string, vec![], names.string),
                method(names.in_int, vec![], names.int),
            ],
            location,
        };

        let int_class = Class {
            name: names.int,
            parent: names.object,
            features: vec![attr(names.val, names.prim_slot)],
            location,
        };

        let bool_class = Class {
            name: names.boolean,
            parent: names.object,
            features: vec![attr(names.val, names.prim_slot)],
            location,
        };

        let string_class = Class {
            name: names.string,
            parent: names.object,
            features: vec![
                attr(names.val, names.int),
                attr(names.str_field, names.prim_slot),
                method(names.length, vec![], names.int),
                method(
                    names.concat,
                    vec![formal(names.arg, names.string)],
                    names.string,
                ),
                method(
                    names.substr,
                    vec![formal(names.arg, names.int), formal(names.arg2, names.int)],
                    names.string,
                ),
            ],
            location,
        };

        for class in [object_class, io_class, int_class, bool_class, string_class] {
            self.insert(class);
        }
    }

    /// Register the user program's classes in declaration order.
    pub fn register(&mut self, classes: &[Class]) {
        for class in classes {
            self.insert(class.clone());
        }
    }

    /// Insert one class. A colliding name replaces the earlier declaration
    /// in place, keeping its original iteration position.
    pub fn insert(&mut self, class: Class) {
        let name = class.name;
        if self.classes.insert(name, class).is_none() {
            self.order.push(name);
        }
    }

    /// Absent result signals an undefined class.
    pub fn lookup(&self, name: Ident) -> Option<&Class> {
        self.classes.get(&name)
    }

    pub fn contains(&self, name: Ident) -> bool {
        self.classes.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate in registration order.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.order.iter().map(|name| &self.classes[name])
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn method(name: Ident, formals: Vec<Formal>, return_ty: Ident) -> Feature {
    Feature::Method(Method {
        name,
        formals,
        return_ty,
        body: None,
        line: 0,
    })
}

fn attr(name: Ident, ty: Ident) -> Feature {
    Feature::Attr(Attr {
        name,
        ty,
        init: None,
        line: 0,
    })
}

fn formal(name: Ident, ty: Ident) -> Formal {
    Formal { name, ty }
}

/// Per-class index of declared attribute and method signatures, built during
/// the scope walk for later member resolution. Only a class's own declared
/// features are indexed; ancestor members are not folded in.
#[derive(Debug, Default)]
pub struct FeatureIndex {
    attrs: HashMap<Ident, Vec<AttrSig>>,
    methods: HashMap<Ident, Vec<MethodSig>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSig {
    pub name: Ident,
    pub ty: Ident,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSig {
    pub name: Ident,
    pub formals: Vec<(Ident, Ident)>,
    pub return_ty: Ident,
}

impl FeatureIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attr(&mut self, class: Ident, attr: &Attr) {
        self.attrs.entry(class).or_default().push(AttrSig {
            name: attr.name,
            ty: attr.ty,
        });
    }

    pub fn record_method(&mut self, class: Ident, method: &Method) {
        self.methods.entry(class).or_default().push(MethodSig {
            name: method.name,
            formals: method.formals.iter().map(|f| (f.name, f.ty)).collect(),
            return_ty: method.return_ty,
        });
    }

    pub fn attrs_of(&self, class: Ident) -> &[AttrSig] {
        self.attrs.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn methods_of(&self, class: Ident) -> &[MethodSig] {
        self.methods.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }
}
