use serde::{Deserialize, Serialize};
use vesta_ids::ClassId;
use vesta_ids::TypeParamId;

use crate::same::same_type;
use crate::store::{MethodDef, TypeEnv, Visibility};
use crate::subst::Substitution;
use crate::subtype::{is_subtype, is_subtype_unchecked, var_upper_bound};
use crate::supertypes::as_super;
use crate::ty::{erasure, Type};

/// A method signature as *viewed* from a particular parameterisation of its
/// declaring type: the same declaration seen from `List<String>` and from
/// `List<Integer>` yields two different sigs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSig {
    pub owner: Type,
    pub name: String,
    pub visibility: Visibility,
    pub type_params: Vec<TypeParamId>,
    /// Declared upper bound of each type parameter, one per entry of
    /// `type_params`, already substituted by the owner view.
    pub type_param_bounds: Vec<Type>,
    pub params: Vec<Type>,
    pub return_type: Type,
    pub throws: Vec<Type>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_default: bool,
    pub is_varargs: bool,
    pub is_constructor: bool,
}

impl MethodSig {
    /// View a declared method from `owner`. A raw owner erases the whole
    /// member signature, type parameters included (JLS 4.8).
    pub fn of(env: &dyn TypeEnv, owner: &Type, def: &MethodDef) -> MethodSig {
        MethodSig::view(env, owner, def, false)
    }

    pub fn of_constructor(env: &dyn TypeEnv, owner: &Type, def: &MethodDef) -> MethodSig {
        MethodSig::view(env, owner, def, true)
    }

    fn view(env: &dyn TypeEnv, owner: &Type, def: &MethodDef, is_constructor: bool) -> MethodSig {
        let raw = owner.is_raw(env);
        let subst = owner_subst(env, owner);
        let map = |ty: &Type| -> Type {
            if raw {
                erasure(env, ty)
            } else {
                subst.apply(ty)
            }
        };
        let (type_params, type_param_bounds) = if raw {
            (Vec::new(), Vec::new())
        } else {
            (
                def.type_params.clone(),
                def.type_params
                    .iter()
                    .map(|p| subst.apply(&var_upper_bound(env, *p)))
                    .collect(),
            )
        };
        MethodSig {
            owner: owner.clone(),
            name: def.name.clone(),
            visibility: def.visibility,
            type_params,
            type_param_bounds,
            params: def.params.iter().map(&map).collect(),
            return_type: map(&def.return_type),
            throws: def.throws.iter().map(&map).collect(),
            is_static: def.is_static,
            is_abstract: def.is_abstract,
            is_default: def.is_default,
            is_varargs: def.is_varargs,
            is_constructor,
        }
    }
}

fn owner_subst(env: &dyn TypeEnv, owner: &Type) -> Substitution {
    let Some(ct) = owner.as_class() else {
        return Substitution::empty();
    };
    let Some(def) = env.class(ct.class) else {
        return Substitution::empty();
    };
    if def.type_params.len() != ct.args.len() {
        return Substitution::empty();
    }
    Substitution::of(
        def.type_params
            .iter()
            .copied()
            .zip(ct.args.iter().cloned()),
    )
}

/// Same formal type parameters (JLS 8.4.4): same count, and pairwise equal
/// bounds once `m2`'s parameters are renamed to `m1`'s.
pub fn have_same_type_params(env: &dyn TypeEnv, m1: &MethodSig, m2: &MethodSig) -> bool {
    if m1.type_params.len() != m2.type_params.len() {
        return false;
    }
    if m1.type_params.is_empty() {
        return true;
    }
    let rename = Substitution::renaming(&m2.type_params, &m1.type_params);
    m1.type_param_bounds
        .iter()
        .zip(m2.type_param_bounds.iter())
        .all(|(b1, b2)| same_type(env, b1, &rename.apply(b2), false))
}

/// Same signature (JLS 8.4.2): same name, same formal type parameters, and
/// pairwise same parameter types after adapting `m2`'s type parameters to
/// `m1`'s. Thrown types and return types are not part of the signature.
pub fn have_same_signature(env: &dyn TypeEnv, m1: &MethodSig, m2: &MethodSig) -> bool {
    if m1.name != m2.name || m1.params.len() != m2.params.len() {
        return false;
    }
    if !have_same_type_params(env, m1, m2) {
        return false;
    }
    let rename = Substitution::renaming(&m2.type_params, &m1.type_params);
    m1.params
        .iter()
        .zip(m2.params.iter())
        .all(|(p1, p2)| same_type(env, p1, &rename.apply(p2), false))
}

/// The fully erased view of a signature.
pub fn erased_signature(env: &dyn TypeEnv, sig: &MethodSig) -> MethodSig {
    MethodSig {
        owner: erasure(env, &sig.owner),
        name: sig.name.clone(),
        visibility: sig.visibility,
        type_params: Vec::new(),
        type_param_bounds: Vec::new(),
        params: sig.params.iter().map(|p| erasure(env, p)).collect(),
        return_type: erasure(env, &sig.return_type),
        throws: sig.throws.iter().map(|t| erasure(env, t)).collect(),
        is_static: sig.is_static,
        is_abstract: sig.is_abstract,
        is_default: sig.is_default,
        is_varargs: sig.is_varargs,
        is_constructor: sig.is_constructor,
    }
}

/// Subsignature (JLS 8.4.2): `m1` has the same signature as `m2`, or as the
/// erasure of `m2`. Asymmetric by design: a generic `m1` is never a
/// subsignature of a non-generic `m2`.
pub fn is_sub_signature(env: &dyn TypeEnv, m1: &MethodSig, m2: &MethodSig) -> bool {
    have_same_signature(env, m1, m2)
        || have_same_signature(env, m1, &erased_signature(env, m2))
}

/// Override-equivalence (JLS 8.4.2): either is a subsignature of the other.
pub fn are_override_equivalent(env: &dyn TypeEnv, m1: &MethodSig, m2: &MethodSig) -> bool {
    m1.params.len() == m2.params.len()
        && (is_sub_signature(env, m1, m2) || is_sub_signature(env, m2, m1))
}

/// Return-type substitutability (JLS 8.4.5).
pub fn is_return_type_substitutable(env: &dyn TypeEnv, m1: &MethodSig, m2: &MethodSig) -> bool {
    let r1 = &m1.return_type;
    let r2 = &m2.return_type;
    if matches!(r1, Type::Void) {
        return matches!(r2, Type::Void);
    }
    if r1.is_primitive() {
        return same_type(env, r1, r2, false);
    }
    if r1.is_raw(env) && is_subtype_unchecked(env, r1, r2) {
        return true;
    }
    let adapted = if !m1.type_params.is_empty() && m1.type_params.len() == m2.type_params.len()
    {
        Substitution::renaming(&m1.type_params, &m2.type_params).apply(r1)
    } else {
        r1.clone()
    };
    if is_subtype(env, &adapted, r2) {
        return true;
    }
    if !have_same_signature(env, m1, m2) {
        return same_type(env, r1, &erasure(env, r2), false);
    }
    false
}

/// Does `m1` override `m2`, seen from `origin` (JLS 8.4.8.1)?
///
/// Two paths succeed: a direct override through `m1`'s declaring
/// hierarchy, and the inherited-implementation path where a concrete `m1`
/// inherited into `origin` discharges an abstract or default `m2` that
/// reaches `origin` through another supertype. Static-vs-instance
/// mismatches are not this function's concern; callers diagnose them
/// separately.
pub fn overrides(env: &dyn TypeEnv, m1: &MethodSig, m2: &MethodSig, origin: &Type) -> bool {
    if m1.is_constructor || m2.is_constructor {
        return false;
    }
    let Some(owner1) = m1.owner.as_class().map(|ct| ct.class) else {
        return false;
    };
    let Some(owner2) = m2.owner.as_class().map(|ct| ct.class) else {
        return false;
    };
    tracing::trace!(m1 = %m1.name, m2 = %m2.name, "override check");

    if is_overridable_from(env, m2, owner1)
        && as_super(env, &m1.owner, owner2).is_some()
        && sub_signature_in_origin(env, m1, m2, &m1.owner)
    {
        return true;
    }

    let Some(origin_class) = origin.as_class().map(|ct| ct.class) else {
        return false;
    };
    !m1.is_abstract
        && (m2.is_abstract || m2.is_default)
        && is_overridable_from(env, m2, origin_class)
        && as_super(env, origin, owner2).is_some()
        && sub_signature_in_origin(env, m1, m2, origin)
}

/// JLS 8.4.6.1: can a method declared in `owner` be overridden from
/// `from`? Private members cannot; package members only within the
/// package.
fn is_overridable_from(env: &dyn TypeEnv, m: &MethodSig, from: ClassId) -> bool {
    let Some(owner) = m.owner.as_class().map(|ct| ct.class) else {
        return false;
    };
    match m.visibility {
        Visibility::Public | Visibility::Protected => true,
        Visibility::Package => same_package(env, owner, from),
        Visibility::Private => false,
    }
}

pub(crate) fn same_package(env: &dyn TypeEnv, a: ClassId, b: ClassId) -> bool {
    match (env.class(a), env.class(b)) {
        (Some(da), Some(db)) => da.package() == db.package(),
        _ => false,
    }
}

/// Override-equivalence after substituting both signatures into `origin`'s
/// parameterisation (both are erased instead when `origin` is raw).
///
/// Equivalence, not one-way subsignature: a generic redeclaration of an
/// erased inherited signature still overrides it, in either direction.
fn sub_signature_in_origin(
    env: &dyn TypeEnv,
    m1: &MethodSig,
    m2: &MethodSig,
    origin: &Type,
) -> bool {
    if origin.is_raw(env) {
        let e1 = erased_signature(env, m1);
        let e2 = erased_signature(env, m2);
        return is_sub_signature(env, &e1, &e2) || is_sub_signature(env, &e2, &e1);
    }
    let subst = owner_subst(env, origin);
    let m1v = apply_to_sig(env, m1, &subst);
    let m2v = apply_to_sig(env, m2, &subst);
    is_sub_signature(env, &m1v, &m2v) || is_sub_signature(env, &m2v, &m1v)
}

fn apply_to_sig(_env: &dyn TypeEnv, sig: &MethodSig, subst: &Substitution) -> MethodSig {
    if subst.is_empty() {
        return sig.clone();
    }
    MethodSig {
        owner: subst.apply(&sig.owner),
        name: sig.name.clone(),
        visibility: sig.visibility,
        type_params: sig.type_params.clone(),
        type_param_bounds: sig
            .type_param_bounds
            .iter()
            .map(|b| subst.apply(b))
            .collect(),
        params: sig.params.iter().map(|p| subst.apply(p)).collect(),
        return_type: subst.apply(&sig.return_type),
        throws: sig.throws.iter().map(|t| subst.apply(t)).collect(),
        is_static: sig.is_static,
        is_abstract: sig.is_abstract,
        is_default: sig.is_default,
        is_varargs: sig.is_varargs,
        is_constructor: sig.is_constructor,
    }
}
