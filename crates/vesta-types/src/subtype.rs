use crate::context::{is_capture_var, BoundKind, TyContext};
use crate::same::same_type;
use crate::store::TypeEnv;
use crate::supertypes::as_super;
use crate::ty::{object_type, ClassType, Type, WildcardBound};

/// Is `t` a subtype of `s` (JLS 4.10)?
///
/// When either side is an inference variable the check succeeds and records
/// the other side as a bound on it (lower bound when the variable is on the
/// supertype side, upper bound otherwise); an environment that owns no
/// inference variables will never be asked to.
pub fn is_subtype(env: &dyn TypeEnv, t: &Type, s: &Type) -> bool {
    let ctx = TyContext::new(env);
    subtype(&ctx, t, s, false)
}

/// [`is_subtype`] with unchecked conversion allowed: a raw subtype-side
/// view converts to any parameterisation of the same erasure (JLS 5.1.9).
pub fn is_subtype_unchecked(env: &dyn TypeEnv, t: &Type, s: &Type) -> bool {
    let ctx = TyContext::new(env);
    subtype(&ctx, t, s, true)
}

pub(crate) fn subtype_dyn(env: &dyn TypeEnv, t: &Type, s: &Type, unchecked: bool) -> bool {
    let ctx = TyContext::new(env);
    subtype(&ctx, t, s, unchecked)
}

pub(crate) fn subtype(ctx: &TyContext<'_>, t: &Type, s: &Type, unchecked: bool) -> bool {
    // By-name references resolve through the environment before anything
    // else; unresolvable names degrade to `Unknown`.
    if let Type::Named(name) = t {
        return subtype(ctx, &resolve_named(ctx, name), s, unchecked);
    }
    if let Type::Named(name) = s {
        return subtype(ctx, t, &resolve_named(ctx, name), unchecked);
    }

    if same_type(ctx, t, s, false) {
        return true;
    }

    if let Some(sc) = s.as_class() {
        if sc.class == ctx.well_known().object && !t.is_primitive() {
            return true;
        }
    }

    if let Type::Infer(id) = s {
        ctx.push_infer_bound(*id, BoundKind::Lower, t.clone());
        return true;
    }

    // An unresolved subtype side satisfies the check so one missing symbol
    // does not cascade into every enclosing expression. Deliberately
    // asymmetric: a resolved `t` still has to prove itself against an
    // unresolved `s`.
    if t.is_errorish() || is_unresolved_symbol(ctx, t) {
        return true;
    }

    if let Type::Intersection(components) = s {
        return components.iter().all(|c| subtype(ctx, t, c, unchecked));
    }

    let captured = ctx.capture_conversion(t);
    match &captured {
        Type::TypeVar(id) => {
            if is_type_range(s) {
                return match lower_of(ctx, s) {
                    Some(lower) => subtype(ctx, &captured, &lower, unchecked),
                    None => false,
                };
            }
            let upper = var_upper_bound(ctx, *id);
            subtype(ctx, &upper, s, unchecked)
        }
        Type::Null => !s.is_primitive(),
        Type::Void | Type::Unknown | Type::Error => true,
        Type::Infer(id) => {
            if matches!(s, Type::Null) || s.is_primitive() {
                return false;
            }
            ctx.push_infer_bound(*id, BoundKind::Upper, s.clone());
            true
        }
        // A wildcard in subtype position must have been captured away.
        Type::Wildcard(_) => false,
        Type::Class(ct) => class_subtype(ctx, ct, s, unchecked),
        Type::Intersection(components) => {
            components.iter().any(|c| subtype(ctx, c, s, unchecked))
        }
        Type::Array(component) => array_subtype(ctx, component, s, unchecked),
        Type::Primitive(p) => matches!(s, Type::Primitive(q) if p.widens_to(*q)),
        Type::Named(_) => true,
    }
}

fn resolve_named(env: &dyn TypeEnv, name: &str) -> Type {
    match env.lookup_class(name) {
        Some(id) => Type::class(id, Vec::new()),
        None => Type::Unknown,
    }
}

fn is_unresolved_symbol(env: &dyn TypeEnv, ty: &Type) -> bool {
    ty.as_class()
        .and_then(|ct| env.class(ct.class))
        .is_some_and(|def| def.is_unresolved)
}

/// A type-range: a wildcard, or a capture variable. Subtyping against one
/// goes through its recursive lower bound.
fn is_type_range(s: &Type) -> bool {
    match s {
        Type::Wildcard(_) => true,
        Type::TypeVar(id) => is_capture_var(*id),
        _ => false,
    }
}

fn class_subtype(ctx: &TyContext<'_>, tct: &ClassType, s: &Type, unchecked: bool) -> bool {
    let Some(sc) = s.as_class() else {
        return false;
    };
    let t_ty = Type::Class(tct.clone());
    let Some(super_decl) = as_super(ctx, &t_ty, sc.class) else {
        return false;
    };
    tracing::trace!(super_class = sc.class.to_raw(), unchecked, "class-to-class subtype");

    // Raw on the supertype side absorbs every parameterisation of the same
    // erasure; raw on the subtype side needs the unchecked flag (or an
    // all-wildcard supertype, which nothing can violate).
    if s.is_raw(ctx) {
        return true;
    }
    if super_decl.is_raw(ctx) {
        if unchecked {
            return true;
        }
        return !sc.args.is_empty()
            && sc
                .args
                .iter()
                .all(|a| matches!(a, Type::Wildcard(WildcardBound::Unbounded)));
    }
    let Some(decl) = super_decl.as_class() else {
        return false;
    };
    if decl.args.len() != sc.args.len() {
        return false;
    }
    if let (Some(a), Some(b)) = (&decl.enclosing, &sc.enclosing) {
        if !same_type(ctx, a, b, false) {
            return false;
        }
    }
    decl.args
        .iter()
        .zip(sc.args.iter())
        .all(|(t_arg, s_arg)| contains(ctx, s_arg, t_arg))
}

fn array_subtype(ctx: &TyContext<'_>, component: &Type, s: &Type, unchecked: bool) -> bool {
    match s {
        Type::Class(sc) => {
            let wk = ctx.well_known();
            sc.class == wk.object || sc.class == wk.cloneable || sc.class == wk.serializable
        }
        Type::Array(s_component) => {
            if component.is_primitive() || s_component.is_primitive() {
                component == &**s_component
            } else {
                subtype(ctx, component, s_component, unchecked)
            }
        }
        _ => false,
    }
}

/// Type-argument containment: does the argument `outer` contain the
/// argument `inner` (JLS 4.5.1), as used pairwise for `C<inner...> <:
/// C<outer...>`?
pub fn type_arg_contains(env: &dyn TypeEnv, outer: &Type, inner: &Type) -> bool {
    let ctx = TyContext::new(env);
    contains(&ctx, outer, inner)
}

pub(crate) fn contains(ctx: &TyContext<'_>, outer: &Type, inner: &Type) -> bool {
    if same_type(ctx, outer, inner, false) {
        return true;
    }
    let Type::Wildcard(w) = outer else {
        return false;
    };
    let upper_ok = match w {
        WildcardBound::Super(_) | WildcardBound::Unbounded => true,
        WildcardBound::Extends(u) => subtype(ctx, &upper_of(ctx, inner), u, false),
    };
    if !upper_ok {
        return false;
    }
    match w {
        WildcardBound::Extends(_) | WildcardBound::Unbounded => true,
        WildcardBound::Super(l) => match lower_of(ctx, inner) {
            Some(inner_lower) => subtype(ctx, l, &inner_lower, false),
            None => false,
        },
    }
}

/// The recursive upper bound of a term, unwrapping wildcards and capture
/// variables; a proper type is its own upper bound.
pub(crate) fn upper_of(env: &dyn TypeEnv, ty: &Type) -> Type {
    match ty {
        Type::Wildcard(WildcardBound::Extends(u)) => upper_of(env, u),
        Type::Wildcard(_) => object_type(env),
        Type::TypeVar(id) if is_capture_var(*id) => var_upper_bound(env, *id),
        _ => ty.clone(),
    }
}

/// The recursive lower bound of a term; `None` is the null type (upper
/// bounded wildcards and captures without a lower bound have no proper
/// lower bound).
pub(crate) fn lower_of(env: &dyn TypeEnv, ty: &Type) -> Option<Type> {
    match ty {
        Type::Wildcard(WildcardBound::Super(l)) => lower_of(env, l),
        Type::Wildcard(_) => None,
        Type::TypeVar(id) if is_capture_var(*id) => {
            let lower = env.type_param(*id)?.lower_bound?;
            lower_of(env, &lower)
        }
        _ => Some(ty.clone()),
    }
}

/// A variable's upper bound as a single term: its sole bound, or the
/// intersection of all of them, or `Object`.
pub(crate) fn var_upper_bound(env: &dyn TypeEnv, id: vesta_ids::TypeParamId) -> Type {
    match env.type_param(id) {
        Some(def) => {
            let mut bounds = def.upper_bounds;
            match bounds.len() {
                0 => object_type(env),
                1 => bounds.remove(0),
                _ => Type::Intersection(bounds),
            }
        }
        None => object_type(env),
    }
}
