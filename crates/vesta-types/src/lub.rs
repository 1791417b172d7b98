use vesta_ids::ClassId;

use crate::convert::binary_numeric_promotion;
use crate::same::same_type;
use crate::store::TypeEnv;
use crate::subtype::{lower_of, subtype_dyn, upper_of};
use crate::supertypes::try_super_type_set;
use crate::ty::{erasure, object_type, Type, WildcardBound};

/// The greatest lower bound of a set of types (JLS 5.1.10): a normalised
/// intersection with redundant supertype components pruned and components
/// in canonical order (the non-interface component first), so equivalent
/// inputs produce identical terms regardless of ordering.
pub fn glb(env: &dyn TypeEnv, types: &[Type]) -> Type {
    let mut components = glb_components(env, types.to_vec());
    match components.len() {
        0 => object_type(env),
        1 => components.remove(0),
        _ => Type::Intersection(components),
    }
}

/// The component list [`glb`] wraps: flattened, deduplicated, pruned and
/// canonically ordered. Errorish inputs absorb the whole bound.
pub(crate) fn glb_components(env: &dyn TypeEnv, input: Vec<Type>) -> Vec<Type> {
    let mut flat = Vec::new();
    for ty in input {
        match ty {
            Type::Intersection(components) => flat.extend(components),
            _ => flat.push(ty),
        }
    }
    if flat.iter().any(|t| matches!(t, Type::Error)) {
        return vec![Type::Error];
    }
    if flat.iter().any(|t| matches!(t, Type::Unknown)) {
        return vec![Type::Unknown];
    }

    let mut distinct: Vec<Type> = Vec::new();
    for ty in flat {
        if !distinct.iter().any(|d| same_type(env, d, &ty, false)) {
            distinct.push(ty);
        }
    }

    // A component that is a proper supertype of another carries no
    // information in an intersection.
    let pruned: Vec<Type> = distinct
        .iter()
        .filter(|c| {
            !distinct.iter().any(|d| {
                !same_type(env, d, c, false)
                    && subtype_dyn(env, d, c, false)
                    && !subtype_dyn(env, c, d, false)
            })
        })
        .cloned()
        .collect();

    let (mut classes, mut interfaces): (Vec<Type>, Vec<Type>) = pruned
        .into_iter()
        .partition(|c| !is_interface_component(env, c));
    classes.sort();
    interfaces.sort();
    classes.extend(interfaces);
    classes
}

fn is_interface_component(env: &dyn TypeEnv, ty: &Type) -> bool {
    erasure(env, ty)
        .as_class()
        .and_then(|ct| env.class(ct.class))
        .is_some_and(|def| def.is_interface())
}

/// The least upper bound of two types (JLS 4.10.4).
///
/// Recursive argument merges (F-bounded hierarchies like
/// `Comparable<String>` vs `Comparable<Integer>`) are cut to unbounded
/// wildcards instead of spinning out the infinite JLS type, and
/// `? extends Object` is always flattened to `?`.
pub fn lub(env: &dyn TypeEnv, a: &Type, b: &Type) -> Type {
    let mut in_progress = Vec::new();
    lub_inner(env, a, b, &mut in_progress)
}

fn lub_inner(
    env: &dyn TypeEnv,
    a: &Type,
    b: &Type,
    in_progress: &mut Vec<(Type, Type)>,
) -> Type {
    if matches!(a, Type::Error) || matches!(b, Type::Error) {
        return Type::Error;
    }
    if matches!(a, Type::Unknown) || matches!(b, Type::Unknown) {
        return Type::Unknown;
    }
    if same_type(env, a, b, false) {
        return a.clone();
    }
    if matches!(a, Type::Null) {
        return b.clone();
    }
    if matches!(b, Type::Null) {
        return a.clone();
    }

    match (a, b) {
        (Type::Primitive(p), Type::Primitive(q)) => {
            return match binary_numeric_promotion(*p, *q) {
                Some(r) => Type::Primitive(r),
                None => object_type(env),
            };
        }
        (Type::Primitive(p), _) => {
            let boxed = Type::class(env.well_known().box_of(*p), Vec::new());
            return lub_inner(env, &boxed, b, in_progress);
        }
        (_, Type::Primitive(q)) => {
            let boxed = Type::class(env.well_known().box_of(*q), Vec::new());
            return lub_inner(env, a, &boxed, in_progress);
        }
        _ => {}
    }

    if let (Type::Array(ac), Type::Array(bc)) = (a, b) {
        if !ac.is_primitive() && !bc.is_primitive() {
            return Type::array(lub_inner(env, ac, bc, in_progress));
        }
        // Arrays of distinct primitives only share the array interfaces.
        let wk = env.well_known();
        return glb(
            env,
            &[
                Type::class(wk.cloneable, Vec::new()),
                Type::class(wk.serializable, Vec::new()),
            ],
        );
    }

    if subtype_dyn(env, a, b, false) {
        return b.clone();
    }
    if subtype_dyn(env, b, a, false) {
        return a.clone();
    }

    let key = (a.clone(), b.clone());
    if in_progress.contains(&key) || in_progress.contains(&(b.clone(), a.clone())) {
        return object_type(env);
    }
    in_progress.push(key);
    let result = lub_candidates(env, a, b, in_progress);
    in_progress.pop();
    result
}

fn lub_candidates(
    env: &dyn TypeEnv,
    a: &Type,
    b: &Type,
    in_progress: &mut Vec<(Type, Type)>,
) -> Type {
    let sa = class_supers(env, a);
    let sb = class_supers(env, b);
    if sa.is_empty() || sb.is_empty() {
        return object_type(env);
    }

    // Erased candidate set: classes both sides reach.
    let mut candidates: Vec<ClassId> = Vec::new();
    for sup in &sa {
        let Some(ct) = sup.as_class() else { continue };
        if !candidates.contains(&ct.class)
            && sb
                .iter()
                .any(|s| s.as_class().is_some_and(|sc| sc.class == ct.class))
        {
            candidates.push(ct.class);
        }
    }

    // Minimal erased candidate set: drop every candidate another candidate
    // is a strict erased subtype of.
    let minimal: Vec<ClassId> = candidates
        .iter()
        .filter(|g| {
            !candidates
                .iter()
                .any(|h| h != *g && raw_strict_subtype(env, *h, **g))
        })
        .copied()
        .collect();

    let mut results = Vec::new();
    for g in minimal {
        let instantiations: Vec<&Type> = sa
            .iter()
            .chain(sb.iter())
            .filter(|s| s.as_class().is_some_and(|ct| ct.class == g))
            .collect();
        let merged = least_containing(env, g, &instantiations, in_progress);
        if !results.iter().any(|r| same_type(env, r, &merged, false)) {
            results.push(merged);
        }
    }

    let mut components = glb_components(env, results);
    match components.len() {
        0 => object_type(env),
        1 => components.remove(0),
        _ => Type::Intersection(components),
    }
}

fn class_supers(env: &dyn TypeEnv, ty: &Type) -> Vec<Type> {
    try_super_type_set(env, ty)
        .unwrap_or_default()
        .into_iter()
        .filter(|t| matches!(t, Type::Class(_)))
        .collect()
}

fn raw_strict_subtype(env: &dyn TypeEnv, a: ClassId, b: ClassId) -> bool {
    let ra = Type::class(a, Vec::new());
    let rb = Type::class(b, Vec::new());
    subtype_dyn(env, &ra, &rb, false) && !subtype_dyn(env, &rb, &ra, false)
}

/// Merge every instantiation of `g` into its least containing
/// parameterisation (JLS 4.10.4 lcta, wildcard-cut).
fn least_containing(
    env: &dyn TypeEnv,
    g: ClassId,
    instantiations: &[&Type],
    in_progress: &mut Vec<(Type, Type)>,
) -> Type {
    let Some(first) = instantiations.first().and_then(|t| t.as_class()) else {
        return Type::class(g, Vec::new());
    };
    let arity = first.args.len();
    if arity == 0
        || instantiations
            .iter()
            .any(|t| t.as_class().is_some_and(|ct| ct.args.len() != arity))
    {
        // A raw participant erases the whole view.
        return Type::class(g, Vec::new());
    }

    let mut args = Vec::with_capacity(arity);
    for j in 0..arity {
        let position: Vec<&Type> = instantiations
            .iter()
            .map(|t| match t.as_class() {
                Some(ct) => &ct.args[j],
                None => *t,
            })
            .collect();
        args.push(merge_argument(env, &position, in_progress));
    }
    Type::class(g, args)
}

fn merge_argument(
    env: &dyn TypeEnv,
    args: &[&Type],
    in_progress: &mut Vec<(Type, Type)>,
) -> Type {
    let Some(&first) = args.first() else {
        return Type::Wildcard(WildcardBound::Unbounded);
    };
    if args.iter().all(|&a| same_type(env, a, first, false)) {
        return first.clone();
    }

    // All lower-bounded: keep a lower bound (`? super glb(L...)`).
    if args
        .iter()
        .all(|a| matches!(a, Type::Wildcard(WildcardBound::Super(_))))
    {
        let lowers: Vec<Type> = args.iter().filter_map(|&a| lower_of(env, a)).collect();
        return Type::Wildcard(WildcardBound::Super(Box::new(glb(env, &lowers))));
    }

    let mut merged = upper_of(env, first);
    for &arg in &args[1..] {
        let upper = upper_of(env, arg);
        merged = lub_inner(env, &merged, &upper, in_progress);
    }
    if merged == object_type(env) {
        Type::Wildcard(WildcardBound::Unbounded)
    } else {
        Type::Wildcard(WildcardBound::Extends(Box::new(merged)))
    }
}
