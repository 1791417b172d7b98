//! Type algebra for the Java type system: nominal class types with
//! generics, wildcards, intersections, arrays, primitives and inference
//! variables, plus the relations a front-end asks of them: same-type,
//! subtyping, supertype enumeration, projection, overriding, functional
//! interface function types, and the JLS §5 conversion contexts.
//!
//! The crate is a pure function library over immutable terms, with one
//! deliberate exception: inference variables accrete bounds inside a
//! [`TyContext`] as a side effect of `is_subtype` and
//! `is_same_type_in_inference`, which is the hook an inference solver
//! drives. Symbol loading, overload resolution and source analysis live
//! elsewhere; this crate only consumes definitions interned in a
//! [`TypeStore`].

#![forbid(unsafe_code)]

mod context;
mod convert;
mod error;
mod format;
mod functional;
mod lub;
mod members;
mod mentions;
mod overriding;
mod project;
mod same;
mod store;
mod subst;
mod subtype;
mod supertypes;
mod ty;

pub use crate::context::{is_capture_var, BoundKind, InferVarBounds, TyContext};
pub use crate::convert::{
    assignment_conversion, assignment_conversion_with_const, binary_numeric_promotion,
    cast_conversion, conversion_cost, is_assignable, method_invocation_conversion,
    unary_numeric_promotion, ConstValue, Conversion, ConversionCost, ConversionStep,
    TypeWarning, UncheckedReason,
};
pub use crate::error::{Result, TypeError};
pub use crate::format::{format_method, format_type};
pub use crate::functional::{find_functional_interface_method, non_wildcard_parameterization};
pub use crate::lub::{glb, lub};
pub use crate::members::{
    accessible_method_filter, is_accessible, methods_of, most_specific, nest_root,
};
pub use crate::mentions::{has_restricted_vars, mentions, mentions_any};
pub use crate::overriding::{
    are_override_equivalent, erased_signature, have_same_signature, have_same_type_params,
    is_return_type_substitutable, is_sub_signature, overrides, MethodSig,
};
pub use crate::project::{project_downwards, project_upwards};
pub use crate::same::{are_same_types, is_same_type};
pub use crate::store::{
    ClassDef, ClassKind, FieldDef, MethodDef, TypeEnv, TypeParamDef, TypeStore, Visibility,
    WellKnownTypes,
};
pub use crate::subst::Substitution;
pub use crate::subtype::{is_subtype, is_subtype_unchecked, type_arg_contains};
pub use crate::supertypes::{
    as_outer_super, as_super, instantiate_supertype, super_type_set, try_super_type_set,
};
pub use crate::ty::{
    erasure, generic_declaration, ClassType, PrimitiveType, Type, WildcardBound,
};

pub use vesta_ids::{ClassId, InferVarId, TypeParamId};
