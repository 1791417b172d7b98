use std::fmt::Write;

use crate::context::is_capture_var;
use crate::overriding::MethodSig;
use crate::store::TypeEnv;
use crate::ty::{Type, WildcardBound};

/// Render a type the way it reads in Java source: simple names, `.` for
/// nesting (`Map.Entry`), `&` between intersection components.
pub fn format_type(env: &dyn TypeEnv, ty: &Type) -> String {
    let mut out = String::new();
    write_type(env, ty, &mut out);
    out
}

fn write_type(env: &dyn TypeEnv, ty: &Type, out: &mut String) {
    match ty {
        Type::Primitive(p) => out.push_str(p.name()),
        Type::Null => out.push_str("null"),
        Type::Void => out.push_str("void"),
        Type::Unknown => out.push_str("<unknown>"),
        Type::Error => out.push_str("<error>"),
        Type::Named(name) => write_simple_name(name, out),
        Type::Class(ct) => {
            match env.class(ct.class) {
                Some(def) => write_simple_name(&def.name, out),
                None => {
                    let _ = write!(out, "{}", ct.class);
                }
            }
            if !ct.args.is_empty() {
                out.push('<');
                for (idx, arg) in ct.args.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    write_type(env, arg, out);
                }
                out.push('>');
            }
        }
        Type::Array(component) => {
            write_type(env, component, out);
            out.push_str("[]");
        }
        Type::Wildcard(WildcardBound::Unbounded) => out.push('?'),
        Type::Wildcard(WildcardBound::Extends(bound)) => {
            out.push_str("? extends ");
            write_type(env, bound, out);
        }
        Type::Wildcard(WildcardBound::Super(bound)) => {
            out.push_str("? super ");
            write_type(env, bound, out);
        }
        Type::TypeVar(id) => match env.type_param(*id) {
            Some(def) => out.push_str(&def.name),
            None if is_capture_var(*id) => out.push_str("CAP#?"),
            None => {
                let _ = write!(out, "{id}");
            }
        },
        Type::Infer(id) => {
            let _ = write!(out, "#{}", id.to_raw());
        }
        Type::Intersection(components) => {
            for (idx, component) in components.iter().enumerate() {
                if idx > 0 {
                    out.push_str(" & ");
                }
                write_type(env, component, out);
            }
        }
    }
}

/// `java.util.Map$Entry` reads as `Map.Entry`.
fn write_simple_name(binary_name: &str, out: &mut String) {
    let tail = match binary_name.rfind('.') {
        Some(idx) => &binary_name[idx + 1..],
        None => binary_name,
    };
    for ch in tail.chars() {
        out.push(if ch == '$' { '.' } else { ch });
    }
}

/// Render a method signature in Java declaration order:
/// `<T extends Serializable & Comparable> T max(T, T)`, with varargs
/// collapsed to `...` form.
pub fn format_method(env: &dyn TypeEnv, sig: &MethodSig) -> String {
    let mut out = String::new();
    if !sig.type_params.is_empty() {
        out.push('<');
        for (idx, (param, bound)) in sig
            .type_params
            .iter()
            .zip(sig.type_param_bounds.iter())
            .enumerate()
        {
            if idx > 0 {
                out.push_str(", ");
            }
            match env.type_param(*param) {
                Some(def) => out.push_str(&def.name),
                None => {
                    let _ = write!(out, "{param}");
                }
            }
            if *bound != crate::ty::object_type(env) {
                out.push_str(" extends ");
                write_type(env, bound, &mut out);
            }
        }
        out.push_str("> ");
    }
    write_type(env, &sig.return_type, &mut out);
    out.push(' ');
    out.push_str(&sig.name);
    out.push('(');
    for (idx, param) in sig.params.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        let last = idx + 1 == sig.params.len();
        match param {
            Type::Array(component) if last && sig.is_varargs => {
                write_type(env, component, &mut out);
                out.push_str("...");
            }
            _ => write_type(env, param, &mut out),
        }
    }
    out.push(')');
    out
}
