use vesta_ids::ClassId;

use crate::overriding::{is_sub_signature, same_package, MethodSig};
use crate::store::{TypeEnv, Visibility};
use crate::supertypes::{as_super, try_super_type_set};
use crate::ty::Type;

/// JLS 6.6: is a member with `visibility`, declared in `owner`, visible
/// from code in `from`?
pub fn is_accessible(
    env: &dyn TypeEnv,
    visibility: Visibility,
    owner: ClassId,
    from: ClassId,
) -> bool {
    match visibility {
        Visibility::Public => true,
        Visibility::Private => nest_root(env, from) == nest_root(env, owner),
        Visibility::Protected => {
            same_package(env, owner, from)
                || (!is_interface(env, from)
                    && as_super(env, &Type::class(from, Vec::new()), owner).is_some())
        }
        Visibility::Package => same_package(env, owner, from) && !is_interface(env, from),
    }
}

fn is_interface(env: &dyn TypeEnv, id: ClassId) -> bool {
    env.class(id).is_some_and(|def| def.is_interface())
}

/// The outermost enclosing class: two classes share private members iff
/// they share a nest root.
pub fn nest_root(env: &dyn TypeEnv, id: ClassId) -> ClassId {
    let mut current = id;
    // The enclosing chain is finite in well-formed input; the hop cap only
    // protects against corrupted stores.
    for _ in 0..64 {
        match env.class(current).and_then(|def| def.enclosing) {
            Some(outer) => current = outer,
            None => break,
        }
    }
    current
}

/// The member-visibility predicate as a reusable filter over signatures.
pub fn accessible_method_filter<'e>(
    env: &'e dyn TypeEnv,
    from: ClassId,
) -> impl Fn(&MethodSig) -> bool + 'e {
    move |sig: &MethodSig| match sig.owner.as_class() {
        Some(ct) => is_accessible(env, sig.visibility, ct.class, from),
        // Synthetic owners (arrays) are always visible.
        None => true,
    }
}

/// Every method named `name` visible on `ty` from `from`, viewed from the
/// supertype that declares it, reduced to the most specific declarations.
///
/// Receivers with wildcard arguments should be capture-converted first
/// (`TyContext::capture_conversion`) so member types come out as capture
/// variables rather than raw wildcards.
pub fn methods_of(
    env: &dyn TypeEnv,
    ty: &Type,
    name: &str,
    static_only: bool,
    from: ClassId,
) -> Vec<MethodSig> {
    let Ok(supers) = try_super_type_set(env, ty) else {
        return Vec::new();
    };
    let filter = accessible_method_filter(env, from);
    let mut sigs = Vec::new();
    for sup in &supers {
        let Some(ct) = sup.as_class() else { continue };
        let Some(def) = env.class(ct.class) else {
            continue;
        };
        for method in &def.methods {
            if method.name != name || (static_only && !method.is_static) {
                continue;
            }
            let sig = MethodSig::of(env, sup, method);
            if filter(&sig) {
                sigs.push(sig);
            }
        }
    }
    most_specific(env, sigs)
}

/// Drop every signature another signature redeclares from a more specific
/// owner. This is the override-aware reduction member lookup wants; actual
/// overload selection between the survivors belongs to the caller.
pub fn most_specific(env: &dyn TypeEnv, sigs: Vec<MethodSig>) -> Vec<MethodSig> {
    let dominated: Vec<bool> = sigs
        .iter()
        .map(|m| {
            sigs.iter().any(|n| {
                n.owner != m.owner
                    && owner_below(env, n, m)
                    && is_sub_signature(env, n, m)
            })
        })
        .collect();
    sigs.into_iter()
        .zip(dominated)
        .filter_map(|(sig, dead)| (!dead).then_some(sig))
        .collect()
}

fn owner_below(env: &dyn TypeEnv, n: &MethodSig, m: &MethodSig) -> bool {
    let Some(m_owner) = m.owner.as_class().map(|ct| ct.class) else {
        return false;
    };
    as_super(env, &n.owner, m_owner).is_some()
}
