use std::collections::HashSet;

use vesta_ids::TypeParamId;

use crate::context::is_capture_var;
use crate::store::TypeEnv;
use crate::ty::{Type, WildcardBound};

/// Bound graphs can be pathological (`<E extends Enum<E>>` is the benign
/// case); past this depth we answer `false` instead of overflowing, which
/// is the conservative answer for every caller.
const MAX_DEPTH: usize = 512;

/// Does `ty` reference any variable in `vars`?
///
/// Capture variables are transparent: a capture whose bounds mention a
/// variable mentions it too.
pub fn mentions(env: &dyn TypeEnv, ty: &Type, vars: &HashSet<TypeParamId>) -> bool {
    let mut seen = HashSet::new();
    mentions_inner(env, ty, vars, &mut seen, 0)
}

/// Convenience form over a slice of variables.
pub fn mentions_any(env: &dyn TypeEnv, ty: &Type, vars: &[TypeParamId]) -> bool {
    mentions(env, ty, &vars.iter().copied().collect())
}

fn mentions_inner(
    env: &dyn TypeEnv,
    ty: &Type,
    vars: &HashSet<TypeParamId>,
    seen: &mut HashSet<TypeParamId>,
    depth: usize,
) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }
    match ty {
        Type::TypeVar(id) => {
            if vars.contains(id) {
                return true;
            }
            if !is_capture_var(*id) || !seen.insert(*id) {
                return false;
            }
            let Some(def) = env.type_param(*id) else {
                return false;
            };
            def.upper_bounds
                .iter()
                .any(|b| mentions_inner(env, b, vars, seen, depth + 1))
                || def
                    .lower_bound
                    .as_ref()
                    .is_some_and(|b| mentions_inner(env, b, vars, seen, depth + 1))
        }
        Type::Class(ct) => {
            ct.args
                .iter()
                .any(|a| mentions_inner(env, a, vars, seen, depth + 1))
                || ct
                    .enclosing
                    .as_ref()
                    .is_some_and(|e| mentions_inner(env, e, vars, seen, depth + 1))
        }
        Type::Array(component) => mentions_inner(env, component, vars, seen, depth + 1),
        Type::Wildcard(WildcardBound::Extends(b) | WildcardBound::Super(b)) => {
            mentions_inner(env, b, vars, seen, depth + 1)
        }
        Type::Intersection(components) => components
            .iter()
            .any(|c| mentions_inner(env, c, vars, seen, depth + 1)),
        _ => false,
    }
}

/// Does `ty` syntactically contain a restricted variable (a capture or
/// inference variable)? These are the variables projection removes.
pub fn has_restricted_vars(ty: &Type) -> bool {
    match ty {
        Type::Infer(_) => true,
        Type::TypeVar(id) => is_capture_var(*id),
        Type::Class(ct) => {
            ct.args.iter().any(has_restricted_vars)
                || ct.enclosing.as_deref().is_some_and(has_restricted_vars)
        }
        Type::Array(component) => has_restricted_vars(component),
        Type::Wildcard(WildcardBound::Extends(b) | WildcardBound::Super(b)) => {
            has_restricted_vars(b)
        }
        Type::Intersection(components) => components.iter().any(has_restricted_vars),
        _ => false,
    }
}
