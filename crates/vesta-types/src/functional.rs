use crate::lub::glb;
use crate::mentions::mentions_any;
use crate::overriding::{
    erased_signature, have_same_signature, is_return_type_substitutable, is_sub_signature,
    MethodSig,
};
use crate::store::{ClassKind, TypeEnv, Visibility};
use crate::subtype::{is_subtype, var_upper_bound};
use crate::supertypes::try_super_type_set;
use crate::ty::{generic_declaration, object_type, ClassType, Type, WildcardBound};

/// JLS 9.9: replace every wildcard argument with a proper witness: the
/// declared bound for `?`, `glb` of both bounds for `? extends`, the lower
/// bound for `? super`.
///
/// `None` when an F-bounded formal makes the witness inexpressible.
pub fn non_wildcard_parameterization(env: &dyn TypeEnv, ty: &Type) -> Option<Type> {
    let ct = ty.as_class()?;
    if !ct.args.iter().any(Type::is_wildcard) {
        return Some(ty.clone());
    }
    let def = env.class(ct.class)?;
    if def.type_params.len() != ct.args.len() {
        return None;
    }

    let mut args = Vec::with_capacity(ct.args.len());
    for (arg, formal) in ct.args.iter().zip(def.type_params.iter()) {
        let Type::Wildcard(w) = arg else {
            args.push(arg.clone());
            continue;
        };
        let declared = var_upper_bound(env, *formal);
        if mentions_any(env, &declared, &def.type_params) {
            return None;
        }
        args.push(match w {
            WildcardBound::Unbounded => declared,
            WildcardBound::Extends(upper) => glb(env, &[(**upper).clone(), declared]),
            WildcardBound::Super(lower) => (**lower).clone(),
        });
    }
    Some(Type::Class(ClassType {
        class: ct.class,
        args,
        enclosing: ct.enclosing.clone(),
        erased_supertypes: ct.erased_supertypes,
    }))
}

/// The function type of a functional interface (JLS 9.9): the single
/// abstract method the interface contributes, viewed from `ty`.
///
/// Raw types answer with the erasure of the declaration's function type;
/// wildcard parameterisations go through
/// [`non_wildcard_parameterization`] first. `None` when the type is not an
/// interface, is an annotation type, or no single method dominates.
pub fn find_functional_interface_method(env: &dyn TypeEnv, ty: &Type) -> Option<MethodSig> {
    let ct = ty.as_class()?;
    let def = env.class(ct.class)?;
    if def.kind != ClassKind::Interface {
        return None;
    }
    if ty.is_raw(env) {
        let declared = generic_declaration(env, ct.class);
        let sig = function_type_of(env, &declared)?;
        return Some(erased_signature(env, &sig));
    }
    if ct.args.iter().any(Type::is_wildcard) {
        let witnessed = non_wildcard_parameterization(env, ty)?;
        return function_type_of(env, &witnessed);
    }
    function_type_of(env, ty)
}

fn function_type_of(env: &dyn TypeEnv, ty: &Type) -> Option<MethodSig> {
    // Abstract methods that redeclare a public Object method don't count
    // towards the single abstract method (JLS 9.8).
    let object_ty = object_type(env);
    let object_sigs: Vec<MethodSig> = env
        .class(env.well_known().object)
        .map(|def| {
            def.methods
                .iter()
                .filter(|m| m.visibility == Visibility::Public)
                .map(|m| MethodSig::of(env, &object_ty, m))
                .collect()
        })
        .unwrap_or_default();

    let mut candidates: Vec<MethodSig> = Vec::new();
    for sup in try_super_type_set(env, ty).ok()? {
        let Some(ct) = sup.as_class() else { continue };
        let Some(def) = env.class(ct.class) else {
            continue;
        };
        if !def.is_interface() {
            continue;
        }
        for method in &def.methods {
            if !method.is_abstract {
                continue;
            }
            let sig = MethodSig::of(env, &sup, method);
            if object_sigs
                .iter()
                .any(|o| have_same_signature(env, &sig, o))
            {
                continue;
            }
            candidates.push(sig);
        }
    }

    if candidates.len() == 1 {
        return candidates.pop();
    }
    if candidates.is_empty() {
        return None;
    }

    // More than one abstract method survives (inherited redeclarations):
    // the function type is the candidate that subsumes every other.
    let dominant: Vec<&MethodSig> = candidates
        .iter()
        .enumerate()
        .filter(|(i, c)| {
            candidates.iter().enumerate().all(|(j, d)| {
                *i == j
                    || (is_sub_signature(env, c, d) && is_return_type_substitutable(env, c, d))
            })
        })
        .map(|(_, c)| c)
        .collect();

    let best = dominant
        .iter()
        .find(|c| {
            dominant
                .iter()
                .all(|d| is_subtype(env, &c.return_type, &d.return_type))
        })
        .or_else(|| dominant.first())?;
    tracing::trace!(method = %best.name, "functional interface method");
    Some((*best).clone())
}
