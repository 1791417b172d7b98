use serde::{Deserialize, Serialize};
use vesta_ids::{ClassId, InferVarId, TypeParamId};

use crate::store::TypeEnv;

/// The eight Java primitive types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn is_numeric(self) -> bool {
        !matches!(self, PrimitiveType::Boolean)
    }

    /// JLS 5.1.2 widening primitive conversion targets, in widening order.
    pub fn widened(self) -> &'static [PrimitiveType] {
        use PrimitiveType::*;
        match self {
            Boolean => &[],
            Byte => &[Short, Int, Long, Float, Double],
            Short | Char => &[Int, Long, Float, Double],
            Int => &[Long, Float, Double],
            Long => &[Float, Double],
            Float => &[Double],
            Double => &[],
        }
    }

    /// Does `self` widen to `to` (reflexively)?
    pub fn widens_to(self, to: PrimitiveType) -> bool {
        self == to || self.widened().contains(&to)
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }
}

/// A wildcard type argument. Exactly one side carries a bound; `?` is
/// `Unbounded` (equivalent to `? extends Object`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WildcardBound {
    Unbounded,
    Extends(Box<Type>),
    Super(Box<Type>),
}

/// A class or interface type, possibly parameterised and possibly nested
/// inside an enclosing instance type.
///
/// Equality is structural over all four fields; a raw view of a generic
/// class (`args` empty while the declaration has formals) is a distinct
/// type from every parameterisation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassType {
    pub class: ClassId,
    pub args: Vec<Type>,
    pub enclosing: Option<Box<Type>>,
    /// Set on types derived from a raw view: their supertypes are erased
    /// (JLS 4.8).
    pub erased_supertypes: bool,
}

/// A Java type term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
    Primitive(PrimitiveType),
    /// The null type: bottom of the reference types.
    Null,
    /// The non-type of `void` methods and absent results.
    Void,
    /// An unresolved type. Compatible with everything on the subtype side
    /// so one missing symbol does not cascade.
    Unknown,
    /// A type that failed to check. Propagates like `Unknown`.
    Error,
    /// A by-name reference that has not been interned yet. Resolves through
    /// the environment on use; unresolvable names degrade to `Unknown`.
    Named(String),
    Class(ClassType),
    Array(Box<Type>),
    Wildcard(WildcardBound),
    /// A declared type parameter or a capture variable; see
    /// [`crate::is_capture_var`].
    TypeVar(TypeParamId),
    /// An inference variable owned by a [`crate::TyContext`].
    Infer(InferVarId),
    /// `C & I1 & ... & Ik`. At most one non-interface component, kept first;
    /// component order is otherwise canonical, not semantic.
    Intersection(Vec<Type>),
}

impl Type {
    pub fn class(class: ClassId, args: Vec<Type>) -> Type {
        Type::Class(ClassType {
            class,
            args,
            enclosing: None,
            erased_supertypes: false,
        })
    }

    pub fn boolean() -> Type {
        Type::Primitive(PrimitiveType::Boolean)
    }

    pub fn byte() -> Type {
        Type::Primitive(PrimitiveType::Byte)
    }

    pub fn char() -> Type {
        Type::Primitive(PrimitiveType::Char)
    }

    pub fn short() -> Type {
        Type::Primitive(PrimitiveType::Short)
    }

    pub fn int() -> Type {
        Type::Primitive(PrimitiveType::Int)
    }

    pub fn long() -> Type {
        Type::Primitive(PrimitiveType::Long)
    }

    pub fn float() -> Type {
        Type::Primitive(PrimitiveType::Float)
    }

    pub fn double() -> Type {
        Type::Primitive(PrimitiveType::Double)
    }

    pub fn array(component: Type) -> Type {
        Type::Array(Box::new(component))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    /// Unresolved or error: silently compatible on the subtype side.
    pub fn is_errorish(&self) -> bool {
        matches!(self, Type::Unknown | Type::Error)
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Type::Wildcard(_))
    }

    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            Type::Class(ct) => Some(ct),
            _ => None,
        }
    }

    /// A raw view of a generic class: no arguments where the declaration
    /// has formals.
    pub fn is_raw(&self, env: &dyn TypeEnv) -> bool {
        match self {
            Type::Class(ct) => {
                ct.args.is_empty()
                    && env
                        .class(ct.class)
                        .is_some_and(|def| !def.type_params.is_empty())
            }
            _ => false,
        }
    }

    pub fn is_parameterized(&self) -> bool {
        matches!(self, Type::Class(ct) if !ct.args.is_empty())
    }
}

/// The erasure of a term (JLS 4.6): type arguments stripped, type variables
/// replaced by the erasure of their leftmost bound.
pub fn erasure(env: &dyn TypeEnv, ty: &Type) -> Type {
    match ty {
        Type::Class(ct) => {
            let generic = env
                .class(ct.class)
                .is_some_and(|def| !def.type_params.is_empty());
            Type::Class(ClassType {
                class: ct.class,
                args: Vec::new(),
                enclosing: ct
                    .enclosing
                    .as_ref()
                    .map(|e| Box::new(erasure(env, e))),
                erased_supertypes: generic || ct.erased_supertypes,
            })
        }
        Type::Array(component) => Type::array(erasure(env, component)),
        Type::TypeVar(id) => match env.type_param(*id) {
            Some(def) => match def.upper_bounds.first() {
                Some(first) => erasure(env, first),
                None => object_type(env),
            },
            None => object_type(env),
        },
        Type::Intersection(components) => match components.first() {
            Some(first) => erasure(env, first),
            None => object_type(env),
        },
        Type::Wildcard(WildcardBound::Extends(bound)) => erasure(env, bound),
        Type::Wildcard(_) => object_type(env),
        Type::Infer(_) => object_type(env),
        Type::Named(name) => match env.lookup_class(name) {
            Some(id) => erasure(env, &Type::class(id, Vec::new())),
            None => Type::Unknown,
        },
        _ => ty.clone(),
    }
}

/// The declared (generic) form of a class: its own formals as arguments.
pub fn generic_declaration(env: &dyn TypeEnv, class: ClassId) -> Type {
    let args = match env.class(class) {
        Some(def) => def.type_params.iter().map(|p| Type::TypeVar(*p)).collect(),
        None => Vec::new(),
    };
    Type::class(class, args)
}

pub(crate) fn object_type(env: &dyn TypeEnv) -> Type {
    Type::class(env.well_known().object, Vec::new())
}
