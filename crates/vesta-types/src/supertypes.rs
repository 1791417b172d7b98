use std::collections::HashSet;

use vesta_ids::{ClassId, TypeParamId};

use crate::error::TypeError;
use crate::same::are_same_types;
use crate::store::TypeEnv;
use crate::subst::Substitution;
use crate::ty::{erasure, object_type, Type, WildcardBound};

/// The reflexive, transitive supertype set of `ty`, insertion-ordered:
/// the type itself, then the superclass chain (each with its own full set),
/// then declared interfaces in declaration order, with `Object` as the
/// final fallback of interface chains.
///
/// # Panics
///
/// On the null type, whose supertype set is every reference type. Use
/// [`try_super_type_set`] where null can reach this query.
pub fn super_type_set(env: &dyn TypeEnv, ty: &Type) -> Vec<Type> {
    match try_super_type_set(env, ty) {
        Ok(set) => set,
        Err(err) => panic!("{err}"),
    }
}

pub fn try_super_type_set(env: &dyn TypeEnv, ty: &Type) -> Result<Vec<Type>, TypeError> {
    if matches!(ty, Type::Null) {
        return Err(TypeError::NullHasNoSupertypes);
    }
    let mut out = Vec::new();
    let mut seen_vars = HashSet::new();
    collect(env, ty, &mut out, &mut seen_vars);
    Ok(out)
}

fn push(out: &mut Vec<Type>, ty: Type) {
    if !out.contains(&ty) {
        out.push(ty);
    }
}

fn collect(
    env: &dyn TypeEnv,
    ty: &Type,
    out: &mut Vec<Type>,
    seen_vars: &mut HashSet<TypeParamId>,
) {
    match ty {
        Type::Null => {}
        Type::Void => push(out, Type::Void),
        Type::Unknown | Type::Error | Type::Infer(_) => {
            push(out, ty.clone());
            push(out, object_type(env));
        }
        Type::Named(name) => match env.lookup_class(name) {
            Some(id) => collect(env, &Type::class(id, Vec::new()), out, seen_vars),
            None => {
                push(out, ty.clone());
                push(out, object_type(env));
            }
        },
        Type::Primitive(p) => {
            push(out, ty.clone());
            for widened in p.widened() {
                push(out, Type::Primitive(*widened));
            }
            push(out, Type::class(env.well_known().box_of(*p), Vec::new()));
            push(out, object_type(env));
        }
        Type::Class(ct) => {
            push(out, ty.clone());
            let Some(def) = env.class(ct.class) else {
                push(out, object_type(env));
                return;
            };
            let raw_view = ct.erased_supertypes
                || (ct.args.is_empty() && !def.type_params.is_empty());
            let subst = Substitution::of(
                def.type_params
                    .iter()
                    .copied()
                    .zip(ct.args.iter().cloned()),
            );
            let instantiate = |sup: &Type| -> Type {
                if raw_view {
                    erasure(env, sup)
                } else {
                    subst.apply(sup)
                }
            };
            if let Some(sup) = &def.super_class {
                collect(env, &instantiate(sup), out, seen_vars);
            }
            for iface in &def.interfaces {
                collect(env, &instantiate(iface), out, seen_vars);
            }
            if def.is_interface() {
                push(out, object_type(env));
            }
        }
        Type::Array(component) => {
            push(out, ty.clone());
            if !component.is_primitive() && !matches!(**component, Type::Null) {
                let mut component_set = Vec::new();
                collect(env, component, &mut component_set, seen_vars);
                for sup in component_set {
                    push(out, Type::array(sup));
                }
            }
            push(out, Type::class(env.well_known().cloneable, Vec::new()));
            push(out, Type::class(env.well_known().serializable, Vec::new()));
            push(out, object_type(env));
        }
        Type::TypeVar(id) => {
            push(out, ty.clone());
            if seen_vars.insert(*id) {
                if let Some(def) = env.type_param(*id) {
                    for bound in &def.upper_bounds {
                        collect(env, bound, out, seen_vars);
                    }
                }
            }
            push(out, object_type(env));
        }
        Type::Wildcard(WildcardBound::Extends(upper)) => {
            push(out, ty.clone());
            collect(env, upper, out, seen_vars);
        }
        Type::Wildcard(_) => {
            push(out, ty.clone());
            push(out, object_type(env));
        }
        Type::Intersection(components) => {
            push(out, ty.clone());
            for component in components {
                collect(env, component, out, seen_vars);
            }
        }
    }
}

/// The supertype of `ty` whose erasure is `target`, parameterised as seen
/// from `ty`, or `None` if `target` is not a supertype.
///
/// The superclass chain is searched before declared interfaces, so a class
/// target resolves through the unambiguous single-inheritance chain; for an
/// intersection the first matching component wins.
pub fn as_super(env: &dyn TypeEnv, ty: &Type, target: ClassId) -> Option<Type> {
    if matches!(
        ty,
        Type::Null | Type::Void | Type::Primitive(_) | Type::Unknown | Type::Error
    ) {
        return None;
    }
    try_super_type_set(env, ty)
        .ok()?
        .into_iter()
        .find(|sup| sup.as_class().is_some_and(|ct| ct.class == target))
}

/// [`as_super`], additionally walking the chain of enclosing types when the
/// type itself has no match. Inner-class member resolution needs this.
pub fn as_outer_super(env: &dyn TypeEnv, ty: &Type, target: ClassId) -> Option<Type> {
    if let Some(found) = as_super(env, ty, target) {
        return Some(found);
    }
    let ct = ty.as_class()?;
    if let Some(enclosing) = &ct.enclosing {
        return as_outer_super(env, enclosing, target);
    }
    let enclosing_id = env.class(ct.class)?.enclosing?;
    as_outer_super(env, &Type::class(enclosing_id, Vec::new()), target)
}

/// The type arguments `ty` provides for `target`, when that view is
/// unambiguous.
///
/// Unlike [`as_super`], a type whose supertype set reaches `target` at two
/// conflicting parameterisations (possible through intersection types and
/// type-variable bounds) yields `None`, so the answer never depends on
/// component or bound order.
pub fn instantiate_supertype(
    env: &dyn TypeEnv,
    ty: &Type,
    target: ClassId,
) -> Option<Vec<Type>> {
    let set = try_super_type_set(env, ty).ok()?;
    let mut found: Option<Vec<Type>> = None;
    for sup in set {
        let Some(ct) = sup.as_class() else { continue };
        if ct.class != target {
            continue;
        }
        match &found {
            None => found = Some(ct.args.clone()),
            Some(prev) if are_same_types(env, prev, &ct.args) => {}
            Some(_) => return None,
        }
    }
    found
}
