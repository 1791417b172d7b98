use crate::context::BoundKind;
use crate::store::TypeEnv;
use crate::ty::{erasure, object_type, Type, WildcardBound};

/// Structural same-type, pure mode. Reflexive and symmetric.
pub fn is_same_type(env: &dyn TypeEnv, t: &Type, s: &Type) -> bool {
    same_type(env, t, s, false)
}

pub fn are_same_types(env: &dyn TypeEnv, ts: &[Type], ss: &[Type]) -> bool {
    ts.len() == ss.len()
        && ts
            .iter()
            .zip(ss.iter())
            .all(|(t, s)| same_type(env, t, s, false))
}

/// Same-type with an explicit mode.
///
/// In inference mode, a comparison that reaches an inference variable does
/// not compare: it records a bound on the variable (an equality bound, or
/// the wildcard's bound when compared against a wildcard) and succeeds.
/// That side effect is the contract the inference solver drives through
/// this module; in pure mode inference variables only equal themselves.
pub(crate) fn same_type(env: &dyn TypeEnv, t: &Type, s: &Type, in_inference: bool) -> bool {
    if t == s {
        return true;
    }
    if in_inference {
        // Dispatch from the inference-variable side.
        let (t, s) = if !matches!(t, Type::Infer(_)) && matches!(s, Type::Infer(_)) {
            (s, t)
        } else {
            (t, s)
        };
        if let Type::Infer(id) = t {
            return match s {
                Type::Primitive(_) => false,
                Type::Wildcard(WildcardBound::Unbounded) => {
                    env.push_infer_bound(*id, BoundKind::Upper, object_type(env));
                    true
                }
                Type::Wildcard(WildcardBound::Extends(upper)) => {
                    env.push_infer_bound(*id, BoundKind::Upper, (**upper).clone());
                    true
                }
                Type::Wildcard(WildcardBound::Super(lower)) => {
                    env.push_infer_bound(*id, BoundKind::Lower, (**lower).clone());
                    true
                }
                _ => {
                    env.push_infer_bound(*id, BoundKind::Eq, s.clone());
                    true
                }
            };
        }
    }

    match (t, s) {
        (Type::Class(tc), Type::Class(sc)) => {
            if tc.class != sc.class
                || tc.erased_supertypes != sc.erased_supertypes
                || tc.args.len() != sc.args.len()
            {
                return false;
            }
            let enclosing_same = match (&tc.enclosing, &sc.enclosing) {
                (None, None) => true,
                (Some(a), Some(b)) => same_type(env, a, b, in_inference),
                _ => false,
            };
            enclosing_same
                && tc
                    .args
                    .iter()
                    .zip(sc.args.iter())
                    .all(|(a, b)| same_type(env, a, b, in_inference))
        }
        (Type::Array(tc), Type::Array(sc)) => same_type(env, tc, sc, in_inference),
        (Type::Wildcard(tw), Type::Wildcard(sw)) => same_wildcard(env, tw, sw, in_inference),
        (Type::Intersection(tc), Type::Intersection(sc)) => {
            same_intersection(env, tc, sc, in_inference)
        }
        // Primitives, sentinels, null, type variables (declared and
        // capture), named references and pure-mode inference variables are
        // identity-only, which the `t == s` fast path already decided.
        _ => false,
    }
}

/// Wildcards are the same when polarity and bound agree; the unbounded
/// wildcard is upper-bounded by `Object`.
fn same_wildcard(
    env: &dyn TypeEnv,
    t: &WildcardBound,
    s: &WildcardBound,
    in_inference: bool,
) -> bool {
    let object = object_type(env);
    let upper = |w: &WildcardBound| -> Option<Type> {
        match w {
            WildcardBound::Unbounded => Some(object.clone()),
            WildcardBound::Extends(b) => Some((**b).clone()),
            WildcardBound::Super(_) => None,
        }
    };
    match (upper(t), upper(s)) {
        (Some(a), Some(b)) => same_type(env, &a, &b, in_inference),
        (None, None) => {
            let (WildcardBound::Super(a), WildcardBound::Super(b)) = (t, s) else {
                return false;
            };
            same_type(env, a, b, in_inference)
        }
        _ => false,
    }
}

/// Intersections are compared as a superclass component plus a bijection of
/// interface components keyed by erasure; the component order never
/// matters.
fn same_intersection(env: &dyn TypeEnv, ts: &[Type], ss: &[Type], in_inference: bool) -> bool {
    if ts.len() != ss.len() {
        return false;
    }
    let mut unmatched: Vec<&Type> = ss.iter().collect();
    for t in ts {
        let t_erasure = erasure(env, t);
        let found = unmatched.iter().position(|&s| {
            erasure(env, s) == t_erasure && same_type(env, t, s, in_inference)
        });
        match found {
            Some(idx) => {
                unmatched.swap_remove(idx);
            }
            None => return false,
        }
    }
    true
}
