use std::collections::HashMap;

use vesta_ids::TypeParamId;

use crate::store::TypeParamDef;
use crate::ty::{ClassType, Type, WildcardBound};

/// A mapping from type variables (declared parameters or captures) to type
/// terms.
///
/// Application preserves identity: a term none of whose descendants hit the
/// mapping comes back as the same value without rebuilding, and a list with
/// no changed element comes back as `None` from [`Substitution::apply_slice`]
/// so callers can keep the original allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    map: HashMap<TypeParamId, Type>,
}

impl Substitution {
    pub fn empty() -> Substitution {
        Substitution::default()
    }

    pub fn of(entries: impl IntoIterator<Item = (TypeParamId, Type)>) -> Substitution {
        Substitution {
            map: entries.into_iter().collect(),
        }
    }

    /// A renaming substitution: each `from[i]` maps to the variable `to[i]`.
    pub fn renaming(from: &[TypeParamId], to: &[TypeParamId]) -> Substitution {
        Substitution::of(
            from.iter()
                .copied()
                .zip(to.iter().map(|id| Type::TypeVar(*id))),
        )
    }

    pub fn insert(&mut self, var: TypeParamId, ty: Type) {
        self.map.insert(var, ty);
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, var: TypeParamId) -> Option<&Type> {
        self.map.get(&var)
    }

    pub fn apply(&self, ty: &Type) -> Type {
        self.apply_opt(ty).unwrap_or_else(|| ty.clone())
    }

    /// `None` means no descendant was substituted and the input stands.
    pub fn apply_opt(&self, ty: &Type) -> Option<Type> {
        if self.map.is_empty() {
            return None;
        }
        match ty {
            Type::TypeVar(id) => {
                let replacement = self.map.get(id)?;
                if replacement == ty {
                    None
                } else {
                    Some(replacement.clone())
                }
            }
            Type::Class(ct) => {
                let args = self.apply_slice(&ct.args);
                let enclosing = ct.enclosing.as_ref().and_then(|e| self.apply_opt(e));
                if args.is_none() && enclosing.is_none() {
                    return None;
                }
                Some(Type::Class(ClassType {
                    class: ct.class,
                    args: args.unwrap_or_else(|| ct.args.clone()),
                    enclosing: match enclosing {
                        Some(e) => Some(Box::new(e)),
                        None => ct.enclosing.clone(),
                    },
                    erased_supertypes: ct.erased_supertypes,
                }))
            }
            Type::Array(component) => Some(Type::array(self.apply_opt(component)?)),
            Type::Wildcard(WildcardBound::Extends(bound)) => Some(Type::Wildcard(
                WildcardBound::Extends(Box::new(self.apply_opt(bound)?)),
            )),
            Type::Wildcard(WildcardBound::Super(bound)) => Some(Type::Wildcard(
                WildcardBound::Super(Box::new(self.apply_opt(bound)?)),
            )),
            Type::Intersection(components) => {
                Some(Type::Intersection(self.apply_slice(components)?))
            }
            _ => None,
        }
    }

    /// Element-wise application. `None` when no element changed; otherwise
    /// the clone happens once, at the first changed element.
    pub fn apply_slice(&self, tys: &[Type]) -> Option<Vec<Type>> {
        let mut out: Option<Vec<Type>> = None;
        for (idx, ty) in tys.iter().enumerate() {
            match self.apply_opt(ty) {
                Some(changed) => {
                    let vec = out.get_or_insert_with(|| tys[..idx].to_vec());
                    vec.push(changed);
                }
                None => {
                    if let Some(vec) = out.as_mut() {
                        vec.push(ty.clone());
                    }
                }
            }
        }
        out
    }

    /// Substitute inside a variable's bounds without touching its identity.
    pub fn apply_to_bounds(&self, def: &TypeParamDef) -> TypeParamDef {
        TypeParamDef {
            name: def.name.clone(),
            upper_bounds: self
                .apply_slice(&def.upper_bounds)
                .unwrap_or_else(|| def.upper_bounds.clone()),
            lower_bound: def.lower_bound.as_ref().map(|b| self.apply(b)),
        }
    }
}
