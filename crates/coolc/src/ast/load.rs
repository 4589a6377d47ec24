//! Syntax-tree ingestion
//!
//! The parser runs out of process and hands the tree over as JSON. This
//! module deserializes that wire format into a raw model with plain string
//! names, then lowers it into the interned [`ast`](crate::ast) types.
//!
//! A class with no `parent` on the wire defaults to `Object`, matching what
//! the parser emits for a declaration without an `inherits` clause. The
//! `_no_class` sentinel never appears in user input; it marks only the
//! builtin root.

use serde::Deserialize;

use super::{Attr, BinOp, CaseBranch, Class, Expr, ExprKind, Feature, Formal, Method, Program, SourceLoc};
use crate::common::CompileResult;
use crate::symbols::Interner;

/// Deserialize and lower a whole program.
pub fn program_from_json(source: &str, interner: &mut Interner) -> CompileResult<Program> {
    let raw: RawProgram = serde_json::from_str(source)?;
    Ok(lower_program(raw, interner))
}

#[derive(Debug, Deserialize)]
struct RawProgram {
    classes: Vec<RawClass>,
}

#[derive(Debug, Deserialize)]
struct RawClass {
    name: String,
    parent: Option<String>,
    filename: String,
    #[serde(default)]
    line: u32,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawFeature {
    Attribute {
        name: String,
        #[serde(rename = "type")]
        ty: String,
        #[serde(default)]
        line: u32,
        init: Option<RawExpr>,
    },
    Method {
        name: String,
        #[serde(default)]
        formals: Vec<RawFormal>,
        return_type: String,
        #[serde(default)]
        line: u32,
        body: Option<RawExpr>,
    },
}

#[derive(Debug, Deserialize)]
struct RawFormal {
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Debug, Deserialize)]
struct RawExpr {
    #[serde(default)]
    line: u32,
    #[serde(flatten)]
    kind: RawExprKind,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawExprKind {
    Assign {
        name: String,
        value: Box<RawExpr>,
    },
    Dispatch {
        receiver: Option<Box<RawExpr>>,
        static_type: Option<String>,
        method: String,
        #[serde(default)]
        args: Vec<RawExpr>,
    },
    Cond {
        pred: Box<RawExpr>,
        then_branch: Box<RawExpr>,
        else_branch: Box<RawExpr>,
    },
    Loop {
        pred: Box<RawExpr>,
        body: Box<RawExpr>,
    },
    Block {
        body: Vec<RawExpr>,
    },
    Let {
        name: String,
        #[serde(rename = "type")]
        ty: String,
        init: Option<Box<RawExpr>>,
        body: Box<RawExpr>,
    },
    Case {
        scrutinee: Box<RawExpr>,
        branches: Vec<RawBranch>,
    },
    New {
        #[serde(rename = "type")]
        ty: String,
    },
    Isvoid {
        expr: Box<RawExpr>,
    },
    Binary {
        op: RawBinOp,
        lhs: Box<RawExpr>,
        rhs: Box<RawExpr>,
    },
    Neg {
        expr: Box<RawExpr>,
    },
    Not {
        expr: Box<RawExpr>,
    },
    Ident {
        name: String,
    },
    Int {
        value: i64,
    },
    String {
        value: String,
    },
    Bool {
        value: bool,
    },
}

#[derive(Debug, Deserialize)]
struct RawBranch {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    line: u32,
    body: Box<RawExpr>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawBinOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Le,
    Eq,
}

fn lower_program(raw: RawProgram, interner: &mut Interner) -> Program {
    Program {
        classes: raw
            .classes
            .into_iter()
            .map(|c| lower_class(c, interner))
            .collect(),
    }
}

fn lower_class(raw: RawClass, interner: &mut Interner) -> Class {
    let parent = match raw.parent {
        Some(name) => interner.intern(&name),
        None => interner.intern("Object"),
    };
    Class {
        name: interner.intern(&raw.name),
        parent,
        features: raw
            .features
            .into_iter()
            .map(|f| lower_feature(f, interner))
            .collect(),
        location: SourceLoc {
            file: interner.intern(&raw.filename),
            line: raw.line,
        },
    }
}

fn lower_feature(raw: RawFeature, interner: &mut Interner) -> Feature {
    match raw {
        RawFeature::Attribute {
            name,
            ty,
            line,
            init,
        } => Feature::Attr(Attr {
            name: interner.intern(&name),
            ty: interner.intern(&ty),
            init: init.map(|e| lower_expr(e, interner)),
            line,
        }),
        RawFeature::Method {
            name,
            formals,
            return_type,
            line,
            body,
        } => Feature::Method(Method {
            name: interner.intern(&name),
            formals: formals
                .into_iter()
                .map(|f| Formal {
                    name: interner.intern(&f.name),
                    ty: interner.intern(&f.ty),
                })
                .collect(),
            return_ty: interner.intern(&return_type),
            body: body.map(|e| lower_expr(e, interner)),
            line,
        }),
    }
}

fn lower_expr(raw: RawExpr, interner: &mut Interner) -> Expr {
    let kind = match raw.kind {
        RawExprKind::Assign { name, value } => ExprKind::Assign {
            name: interner.intern(&name),
            value: Box::new(lower_expr(*value, interner)),
        },
        RawExprKind::Dispatch {
            receiver,
            static_type,
            method,
            args,
        } => ExprKind::Dispatch {
            receiver: receiver.map(|e| Box::new(lower_expr(*e, interner))),
            static_type: static_type.map(|t| interner.intern(&t)),
            method: interner.intern(&method),
            args: args.into_iter().map(|e| lower_expr(e, interner)).collect(),
        },
        RawExprKind::Cond {
            pred,
            then_branch,
            else_branch,
        } => ExprKind::Cond {
            pred: Box::new(lower_expr(*pred, interner)),
            then_branch: Box::new(lower_expr(*then_branch, interner)),
            else_branch: Box::new(lower_expr(*else_branch, interner)),
        },
        RawExprKind::Loop { pred, body } => ExprKind::Loop {
            pred: Box::new(lower_expr(*pred, interner)),
            body: Box::new(lower_expr(*body, interner)),
        },
        RawExprKind::Block { body } => {
            ExprKind::Block(body.into_iter().map(|e| lower_expr(e, interner)).collect())
        }
        RawExprKind::Let {
            name,
            ty,
            init,
            body,
        } => ExprKind::Let {
            name: interner.intern(&name),
            ty: interner.intern(&ty),
            init: init.map(|e| Box::new(lower_expr(*e, interner))),
            body: Box::new(lower_expr(*body, interner)),
        },
        RawExprKind::Case {
            scrutinee,
            branches,
        } => ExprKind::Case {
            scrutinee: Box::new(lower_expr(*scrutinee, interner)),
            branches: branches
                .into_iter()
                .map(|b| CaseBranch {
                    name: interner.intern(&b.name),
                    ty: interner.intern(&b.ty),
                    body: lower_expr(*b.body, interner),
                    line: b.line,
                })
                .collect(),
        },
        RawExprKind::New { ty } => ExprKind::New(interner.intern(&ty)),
        RawExprKind::Isvoid { expr } => ExprKind::IsVoid(Box::new(lower_expr(*expr, interner))),
        RawExprKind::Binary { op, lhs, rhs } => ExprKind::Binary {
            op: match op {
                RawBinOp::Add => BinOp::Add,
                RawBinOp::Sub => BinOp::Sub,
                RawBinOp::Mul => BinOp::Mul,
                RawBinOp::Div => BinOp::Div,
                RawBinOp::Lt => BinOp::Lt,
                RawBinOp::Le => BinOp::Le,
                RawBinOp::Eq => BinOp::Eq,
            },
            lhs: Box::new(lower_expr(*lhs, interner)),
            rhs: Box::new(lower_expr(*rhs, interner)),
        },
        RawExprKind::Neg { expr } => ExprKind::Neg(Box::new(lower_expr(*expr, interner))),
        RawExprKind::Not { expr } => ExprKind::Not(Box::new(lower_expr(*expr, interner))),
        RawExprKind::Ident { name } => ExprKind::Ident(interner.intern(&name)),
        RawExprKind::Int { value } => ExprKind::IntConst(value),
        RawExprKind::String { value } => ExprKind::StrConst(value),
        RawExprKind::Bool { value } => ExprKind::BoolConst(value),
    };
    Expr::new(kind, raw.line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_simple_class() {
        let json = r#"{
            "classes": [{
                "name": "Main",
                "parent": "IO",
                "filename": "main.cl",
                "line": 1,
                "features": [{
                    "kind": "method",
                    "name": "main",
                    "formals": [],
                    "return_type": "Object",
                    "line": 2,
                    "body": { "kind": "ident", "name": "self", "line": 2 }
                }]
            }]
        }"#;

        let mut interner = Interner::new();
        let program = program_from_json(json, &mut interner).unwrap();

        assert_eq!(program.classes.len(), 1);
        let class = &program.classes[0];
        assert_eq!(interner.resolve(class.name), "Main");
        assert_eq!(interner.resolve(class.parent), "IO");
        assert_eq!(interner.resolve(class.location.file), "main.cl");
        assert_eq!(class.location.line, 1);
        assert_eq!(class.features.len(), 1);

        match &class.features[0] {
            Feature::Method(m) => {
                assert_eq!(interner.resolve(m.name), "main");
                assert!(m.formals.is_empty());
                assert_eq!(interner.resolve(m.return_ty), "Object");
                let body = m.body.as_ref().unwrap();
                assert!(matches!(body.kind, ExprKind::Ident(_)));
                assert_eq!(body.ty, None);
            }
            Feature::Attr(_) => panic!("expected a method"),
        }
    }

    #[test]
    fn test_omitted_parent_defaults_to_object() {
        let json = r#"{
            "classes": [{
                "name": "A",
                "parent": null,
                "filename": "a.cl",
                "line": 3,
                "features": []
            }]
        }"#;

        let mut interner = Interner::new();
        let program = program_from_json(json, &mut interner).unwrap();
        let object = interner.intern("Object");

        assert_eq!(program.classes[0].parent, object);
    }

    #[test]
    fn test_names_intern_to_same_symbol() {
        let json = r#"{
            "classes": [
                { "name": "A", "parent": "B", "filename": "f.cl", "line": 1, "features": [] },
                { "name": "B", "parent": null, "filename": "f.cl", "line": 5, "features": [] }
            ]
        }"#;

        let mut interner = Interner::new();
        let program = program_from_json(json, &mut interner).unwrap();

        assert_eq!(program.classes[0].parent, program.classes[1].name);
        assert_eq!(
            program.classes[0].location.file,
            program.classes[1].location.file
        );
    }

    #[test]
    fn test_attribute_with_initializer() {
        let json = r#"{
            "classes": [{
                "name": "Counter",
                "parent": null,
                "filename": "counter.cl",
                "line": 1,
                "features": [{
                    "kind": "attribute",
                    "name": "count",
                    "type": "Int",
                    "line": 2,
                    "init": {
                        "kind": "binary", "op": "add", "line": 2,
                        "lhs": { "kind": "int", "value": 1, "line": 2 },
                        "rhs": { "kind": "int", "value": 2, "line": 2 }
                    }
                }]
            }]
        }"#;

        let mut interner = Interner::new();
        let program = program_from_json(json, &mut interner).unwrap();

        match &program.classes[0].features[0] {
            Feature::Attr(attr) => {
                assert_eq!(interner.resolve(attr.name), "count");
                assert_eq!(interner.resolve(attr.ty), "Int");
                let init = attr.init.as_ref().unwrap();
                match &init.kind {
                    ExprKind::Binary { op, .. } => assert_eq!(*op, BinOp::Add),
                    other => panic!("expected binary initializer, got {other:?}"),
                }
            }
            Feature::Method(_) => panic!("expected an attribute"),
        }
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        let mut interner = Interner::new();
        assert!(program_from_json("{ not json", &mut interner).is_err());
        assert!(program_from_json(r#"{"classes": [{"name": "A"}]}"#, &mut interner).is_err());
    }
}
