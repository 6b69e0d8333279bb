//! TypeScript renderer for resolved declarations.
//!
//! Collaborator of the engine, not part of it: consumes the declaration
//! sequence read-only and only produces concrete syntax. Kept separate so the
//! core stays formatting-agnostic.

use crate::ir::{InterfaceDecl, TypeExpr};

pub fn render_typescript(decls: &[InterfaceDecl]) -> String {
    let mut out = String::new();
    out.push_str("// Autogenerated by ast-osi. Do not edit.\n");
    for decl in decls {
        out.push('\n');
        if decl.properties.is_empty() {
            out.push_str(&format!("export interface {} {{}}\n", decl.name));
            continue;
        }
        out.push_str(&format!("export interface {} {{\n", decl.name));
        for property in &decl.properties {
            let optional = if property.optional { "?" } else { "" };
            out.push_str(&format!(
                "    {}{optional}: {};\n",
                property.name,
                type_text(&property.ty)
            ));
        }
        out.push_str("}\n");
    }
    out
}

fn type_text(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Any => "any".to_string(),
        TypeExpr::Name { name } => name.clone(),
        TypeExpr::Union { names } => names.join("|"),
        TypeExpr::List { element } => format!("{element}[]"),
        TypeExpr::UnionList { elements } => format!("Array<{}>", elements.join("|")),
    }
}
