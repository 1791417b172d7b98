use crate::context::is_capture_var;
use crate::mentions::mentions_any;
use crate::store::TypeEnv;
use crate::subtype::{subtype_dyn, var_upper_bound};
use crate::ty::{object_type, ClassType, Type, WildcardBound};

/// Upward projection (JLS 4.10.5): the closest supertype of `ty` that
/// mentions no restricted variable (capture or inference variable).
/// Total: every type projects upwards.
pub fn project_upwards(env: &dyn TypeEnv, ty: &Type) -> Type {
    up(env, ty)
}

/// Downward projection: the closest such subtype, when one exists. `None`
/// is the "no downward projection" result and propagates through
/// composites.
pub fn project_downwards(env: &dyn TypeEnv, ty: &Type) -> Option<Type> {
    down(env, ty)
}

fn up(env: &dyn TypeEnv, ty: &Type) -> Type {
    match ty {
        Type::TypeVar(id) if is_capture_var(*id) => up(env, &var_upper_bound(env, *id)),
        Type::Infer(_) => object_type(env),
        Type::Wildcard(w) => Type::Wildcard(up_wildcard(env, w)),
        Type::Array(component) => Type::array(up(env, component)),
        Type::Intersection(components) => {
            Type::Intersection(components.iter().map(|c| up(env, c)).collect())
        }
        Type::Class(ct) => up_class(env, ct),
        _ => ty.clone(),
    }
}

fn up_wildcard(env: &dyn TypeEnv, w: &WildcardBound) -> WildcardBound {
    match w {
        WildcardBound::Unbounded => WildcardBound::Unbounded,
        WildcardBound::Extends(upper) => extends_wildcard(env, up(env, upper)),
        // A lower bound must shrink on the way up; when it cannot, the
        // wildcard loses its bound.
        WildcardBound::Super(lower) => match down(env, lower) {
            Some(projected) => WildcardBound::Super(Box::new(projected)),
            None => WildcardBound::Unbounded,
        },
    }
}

/// `? extends Object` is spelled `?`.
fn extends_wildcard(env: &dyn TypeEnv, upper: Type) -> WildcardBound {
    if upper == object_type(env) {
        WildcardBound::Unbounded
    } else {
        WildcardBound::Extends(Box::new(upper))
    }
}

fn up_class(env: &dyn TypeEnv, ct: &ClassType) -> Type {
    let original = Type::Class(ct.clone());
    if ct.args.is_empty() {
        return original;
    }
    let Some(def) = env.class(ct.class) else {
        return original;
    };
    if def.type_params.len() != ct.args.len() {
        return original;
    }

    let mut changed = false;
    let mut args = Vec::with_capacity(ct.args.len());
    for (arg, formal) in ct.args.iter().zip(def.type_params.iter()) {
        if let Type::Wildcard(w) = arg {
            let projected = Type::Wildcard(up_wildcard(env, w));
            changed |= projected != *arg;
            args.push(projected);
            continue;
        }
        let projected = up(env, arg);
        if projected == *arg {
            args.push(projected);
            continue;
        }
        changed = true;
        // An argument that moved must become a wildcard. `? super down(A)`
        // is the tighter choice, but only when the declared bound permits
        // it: an F-bounded formal, or a projection outgrowing the bound,
        // forces `? extends`.
        let bound = var_upper_bound(env, *formal);
        if mentions_any(env, &bound, &def.type_params)
            || !subtype_dyn(env, &bound, &projected, false)
        {
            args.push(Type::Wildcard(extends_wildcard(env, projected)));
        } else {
            match down(env, arg) {
                Some(lower) => args.push(Type::Wildcard(WildcardBound::Super(Box::new(lower)))),
                None => args.push(Type::Wildcard(WildcardBound::Unbounded)),
            }
        }
    }

    let enclosing = ct.enclosing.as_deref().map(|e| up(env, e));
    if let (Some(projected), Some(old)) = (&enclosing, ct.enclosing.as_deref()) {
        changed |= projected != old;
    }
    if !changed {
        return original;
    }
    Type::Class(ClassType {
        class: ct.class,
        args,
        enclosing: enclosing.map(Box::new),
        erased_supertypes: ct.erased_supertypes,
    })
}

fn down(env: &dyn TypeEnv, ty: &Type) -> Option<Type> {
    match ty {
        Type::TypeVar(id) if is_capture_var(*id) => {
            let lower = env.type_param(*id)?.lower_bound?;
            down(env, &lower)
        }
        Type::Infer(_) => None,
        Type::Null => None,
        Type::Wildcard(w) => Some(Type::Wildcard(down_wildcard(env, w)?)),
        Type::Array(component) => Some(Type::array(down(env, component)?)),
        Type::Intersection(components) => {
            let projected: Option<Vec<Type>> =
                components.iter().map(|c| down(env, c)).collect();
            Some(Type::Intersection(projected?))
        }
        Type::Class(ct) => down_class(env, ct),
        _ => Some(ty.clone()),
    }
}

fn down_wildcard(env: &dyn TypeEnv, w: &WildcardBound) -> Option<WildcardBound> {
    match w {
        WildcardBound::Unbounded => Some(WildcardBound::Unbounded),
        WildcardBound::Extends(upper) => Some(extends_wildcard(env, down(env, upper)?)),
        WildcardBound::Super(lower) => Some(WildcardBound::Super(Box::new(up(env, lower)))),
    }
}

fn down_class(env: &dyn TypeEnv, ct: &ClassType) -> Option<Type> {
    let original = Type::Class(ct.clone());
    if ct.args.is_empty() {
        return Some(original);
    }

    let mut changed = false;
    let mut args = Vec::with_capacity(ct.args.len());
    for arg in &ct.args {
        if let Type::Wildcard(w) = arg {
            let projected = Type::Wildcard(down_wildcard(env, w)?);
            changed |= projected != *arg;
            args.push(projected);
            continue;
        }
        // A non-wildcard argument has no room to move downwards.
        let projected = down(env, arg)?;
        if projected != *arg {
            return None;
        }
        args.push(projected);
    }

    let enclosing = match ct.enclosing.as_deref() {
        Some(e) => {
            let projected = down(env, e)?;
            changed |= projected != *e;
            Some(Box::new(projected))
        }
        None => None,
    };
    if !changed {
        return Some(original);
    }
    Some(Type::Class(ClassType {
        class: ct.class,
        args,
        enclosing,
        erased_supertypes: ct.erased_supertypes,
    }))
}
