//! Identifier interning
//!
//! Every name in the syntax tree (class, attribute, method, formal, type)
//! is interned once and compared by symbol identity afterwards.

use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

/// An interned identifier. Equality is identity over the interner's ids.
pub type Ident = DefaultSymbol;

/// Owning wrapper around the string interner.
pub struct Interner {
    names: StringInterner<DefaultBackend>,
}

impl Interner {
    pub fn new() -> Self {
        Self {
            names: StringInterner::default(),
        }
    }

    /// Intern a name, returning the existing symbol if already present.
    pub fn intern(&mut self, name: &str) -> Ident {
        self.names.get_or_intern(name)
    }

    /// Resolve a symbol back to its text.
    ///
    /// Symbols handed out by this interner always resolve; passing a symbol
    /// from a different interner is a caller bug.
    pub fn resolve(&self, id: Ident) -> &str {
        self.names
            .resolve(id)
            .expect("identifier from a foreign interner")
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixed identifiers the runtime system and the analysis rely on,
/// interned up front so later code compares symbols instead of strings.
///
/// The underscore-prefixed names are sentinels: they can never collide with
/// a user-written identifier and never denote a real program entity.
pub struct Predefined {
    // Class names
    pub object: Ident,
    pub io: Ident,
    pub int: Ident,
    pub boolean: Ident,
    pub string: Ident,
    pub main_class: Ident,
    // Method and attribute names of the builtin classes
    pub abort: Ident,
    pub type_name: Ident,
    pub copy: Ident,
    pub out_string: Ident,
    pub out_int: Ident,
    pub in_string: Ident,
    pub in_int: Ident,
    pub length: Ident,
    pub concat: Ident,
    pub substr: Ident,
    pub main_method: Ident,
    pub val: Ident,
    pub str_field: Ident,
    pub arg: Ident,
    pub arg2: Ident,
    // Special names
    pub self_name: Ident,
    pub self_type: Ident,
    // Sentinels
    pub no_class: Ident,
    pub no_type: Ident,
    pub prim_slot: Ident,
    /// Filename label attached to the builtin classes.
    pub builtin_filename: Ident,
}

impl Predefined {
    pub fn new(interner: &mut Interner) -> Self {
        Self {
            object: interner.intern("Object"),
            io: interner.intern("IO"),
            int: interner.intern("Int"),
            boolean: interner.intern("Bool"),
            string: interner.intern("String"),
            main_class: interner.intern("Main"),
            abort: interner.intern("abort"),
            type_name: interner.intern("type_name"),
            copy: interner.intern("copy"),
            out_string: interner.intern("out_string"),
            out_int: interner.intern("out_int"),
            in_string: interner.intern("in_string"),
            in_int: interner.intern("in_int"),
            length: interner.intern("length"),
            concat: interner.intern("concat"),
            substr: interner.intern("substr"),
            main_method: interner.intern("main"),
            val: interner.intern("_val"),
            str_field: interner.intern("_str_field"),
            arg: interner.intern("arg"),
            arg2: interner.intern("arg2"),
            self_name: interner.intern("self"),
            self_type: interner.intern("SELF_TYPE"),
            no_class: interner.intern("_no_class"),
            no_type: interner.intern("_no_type"),
            prim_slot: interner.intern("_prim_slot"),
            builtin_filename: interner.intern("<basic class>"),
        }
    }
}
