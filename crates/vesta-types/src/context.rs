use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vesta_ids::{ClassId, InferVarId, TypeParamId};

use crate::lub::glb_components;
use crate::store::{ClassDef, TypeEnv, TypeParamDef, WellKnownTypes};
use crate::subst::Substitution;
use crate::ty::{ClassType, Type, WildcardBound};

/// Capture variables live in the upper half of the [`TypeParamId`] space so
/// they can never collide with declared parameters interned in a store.
const CAPTURE_ID_BASE: u32 = 1 << 31;

static NEXT_CAPTURE: AtomicU32 = AtomicU32::new(0);
static NEXT_INFER: AtomicU32 = AtomicU32::new(0);

/// Is this a capture variable (as opposed to a declared type parameter)?
pub fn is_capture_var(id: TypeParamId) -> bool {
    id.to_raw() & CAPTURE_ID_BASE != 0
}

/// Which bound set of an inference variable a bound lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundKind {
    Upper,
    Lower,
    Eq,
}

/// The accumulated bounds of one inference variable. Bounds only grow over
/// the life of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferVarBounds {
    pub upper: Vec<Type>,
    pub lower: Vec<Type>,
    pub eq: Vec<Type>,
}

impl InferVarBounds {
    fn push(&mut self, kind: BoundKind, bound: Type) {
        let set = match kind {
            BoundKind::Upper => &mut self.upper,
            BoundKind::Lower => &mut self.lower,
            BoundKind::Eq => &mut self.eq,
        };
        if !set.contains(&bound) {
            set.push(bound);
        }
    }
}

/// One capture/inference session over a [`TypeEnv`].
///
/// The context owns the capture variables produced by
/// [`TyContext::capture_conversion`] and the inference variables produced by
/// [`TyContext::fresh_infer_var`], and resolves both wherever a `TypeEnv` is
/// expected; everything else delegates to the wrapped environment.
///
/// State is behind `RefCell` so that boolean queries (`is_subtype` with an
/// inference variable on either side, `is_same_type_in_inference`) can
/// record bounds through `&self`. A context is single-threaded; run
/// separate sessions on separate contexts.
pub struct TyContext<'e> {
    env: &'e dyn TypeEnv,
    captures: RefCell<HashMap<TypeParamId, TypeParamDef>>,
    infer_vars: RefCell<HashMap<InferVarId, InferVarBounds>>,
}

impl<'e> TyContext<'e> {
    pub fn new(env: &'e dyn TypeEnv) -> TyContext<'e> {
        TyContext {
            env,
            captures: RefCell::new(HashMap::new()),
            infer_vars: RefCell::new(HashMap::new()),
        }
    }

    /// Allocate a fresh inference variable owned by this session.
    pub fn fresh_infer_var(&self) -> InferVarId {
        let id = InferVarId::new(NEXT_INFER.fetch_add(1, Ordering::Relaxed));
        self.infer_vars
            .borrow_mut()
            .insert(id, InferVarBounds::default());
        id
    }

    /// JLS 5.1.10 capture conversion.
    ///
    /// Wildcard type arguments become fresh `CAP#n` type variables whose
    /// upper bounds are the GLB of the wildcard bound and the declared
    /// parameter bound (normalised and deterministically ordered), and whose
    /// lower bound is the wildcard's lower bound, if any. Declared bounds
    /// that mention sibling formals see the freshly captured arguments.
    /// Types without wildcard arguments are returned unchanged.
    pub fn capture_conversion(&self, ty: &Type) -> Type {
        let Type::Class(ct) = ty else {
            return ty.clone();
        };
        if !ct.args.iter().any(Type::is_wildcard) {
            return ty.clone();
        }
        let Some(def) = self.env.class(ct.class) else {
            return ty.clone();
        };
        if def.type_params.len() != ct.args.len() {
            return ty.clone();
        }

        // First pass: allocate ids so self- and sibling-referential bounds
        // can be substituted in the second pass.
        let mut new_args = Vec::with_capacity(ct.args.len());
        let mut fresh: Vec<Option<TypeParamId>> = Vec::with_capacity(ct.args.len());
        for arg in &ct.args {
            if arg.is_wildcard() {
                let raw = NEXT_CAPTURE.fetch_add(1, Ordering::Relaxed);
                let id = TypeParamId::new(CAPTURE_ID_BASE | raw);
                fresh.push(Some(id));
                new_args.push(Type::TypeVar(id));
            } else {
                fresh.push(None);
                new_args.push(arg.clone());
            }
        }

        let subst = Substitution::of(
            def.type_params
                .iter()
                .copied()
                .zip(new_args.iter().cloned()),
        );

        for (idx, arg) in ct.args.iter().enumerate() {
            let Some(cap_id) = fresh[idx] else { continue };
            let Type::Wildcard(wild) = arg else { continue };
            let declared: Vec<Type> = self
                .env
                .type_param(def.type_params[idx])
                .map(|p| p.upper_bounds.iter().map(|b| subst.apply(b)).collect())
                .unwrap_or_default();

            let (uppers, lower) = match wild {
                WildcardBound::Unbounded => (declared, None),
                WildcardBound::Extends(upper) => {
                    let mut all = vec![(**upper).clone()];
                    all.extend(declared);
                    (all, None)
                }
                WildcardBound::Super(lower) => (declared, Some((**lower).clone())),
            };
            let uppers = glb_components(self, uppers);

            let name = format!("CAP#{}", cap_id.to_raw() & !CAPTURE_ID_BASE);
            tracing::trace!(capture = %name, "capture conversion");
            self.captures.borrow_mut().insert(
                cap_id,
                TypeParamDef {
                    name,
                    upper_bounds: uppers,
                    lower_bound: lower,
                },
            );
        }

        Type::Class(ClassType {
            class: ct.class,
            args: new_args,
            enclosing: ct.enclosing.clone(),
            erased_supertypes: ct.erased_supertypes,
        })
    }

    pub fn is_subtype(&self, t: &Type, s: &Type) -> bool {
        crate::subtype::subtype(self, t, s, false)
    }

    pub fn is_subtype_unchecked(&self, t: &Type, s: &Type) -> bool {
        crate::subtype::subtype(self, t, s, true)
    }

    pub fn is_same_type(&self, t: &Type, s: &Type) -> bool {
        crate::same::same_type(self, t, s, false)
    }

    /// Same-type in inference mode: a comparison that reaches an inference
    /// variable owned by this session records an equality (or, against a
    /// wildcard, an upper/lower) bound on it and succeeds.
    pub fn is_same_type_in_inference(&self, t: &Type, s: &Type) -> bool {
        crate::same::same_type(self, t, s, true)
    }
}

impl TypeEnv for TyContext<'_> {
    fn class(&self, id: ClassId) -> Option<Arc<ClassDef>> {
        self.env.class(id)
    }

    fn class_id(&self, binary_name: &str) -> Option<ClassId> {
        self.env.class_id(binary_name)
    }

    fn type_param(&self, id: TypeParamId) -> Option<TypeParamDef> {
        if let Some(def) = self.captures.borrow().get(&id) {
            return Some(def.clone());
        }
        self.env.type_param(id)
    }

    fn well_known(&self) -> &WellKnownTypes {
        self.env.well_known()
    }

    fn infer_bounds(&self, id: InferVarId) -> Option<InferVarBounds> {
        if let Some(bounds) = self.infer_vars.borrow().get(&id) {
            return Some(bounds.clone());
        }
        self.env.infer_bounds(id)
    }

    fn push_infer_bound(&self, id: InferVarId, kind: BoundKind, bound: Type) {
        let mut vars = self.infer_vars.borrow_mut();
        if let Some(bounds) = vars.get_mut(&id) {
            bounds.push(kind, bound);
            return;
        }
        drop(vars);
        self.env.push_infer_bound(id, kind, bound);
    }
}
