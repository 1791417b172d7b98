use serde::{Deserialize, Serialize};

use crate::same::is_same_type;
use crate::store::TypeEnv;
use crate::subtype::{is_subtype, is_subtype_unchecked};
use crate::ty::{erasure, PrimitiveType, Type};

/// One step of a JLS §5 conversion chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionStep {
    WideningPrimitive,
    NarrowingPrimitive,
    WideningReference,
    NarrowingReference,
    Boxing,
    Unboxing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UncheckedReason {
    /// Conversion between a raw type and a parameterisation of it.
    RawConversion,
    /// A cast whose target cannot be verified at run time.
    UncheckedCast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeWarning {
    Unchecked(UncheckedReason),
}

/// A conversion that was found to apply: the steps, in order, plus any
/// compile-time warnings it would carry. The identity conversion has no
/// steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub steps: Vec<ConversionStep>,
    pub warnings: Vec<TypeWarning>,
}

impl Conversion {
    fn of(steps: Vec<ConversionStep>) -> Conversion {
        Conversion {
            steps,
            warnings: Vec::new(),
        }
    }

    fn warn(mut self, warning: TypeWarning) -> Conversion {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
        self
    }
}

/// Coarse buckets for ranking applicable conversions; the order is the
/// preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConversionCost {
    Identity,
    Widening,
    Boxing,
    Unchecked,
    Narrowing,
}

pub fn conversion_cost(conversion: &Conversion) -> ConversionCost {
    if conversion.steps.iter().any(|s| {
        matches!(
            s,
            ConversionStep::NarrowingPrimitive | ConversionStep::NarrowingReference
        )
    }) {
        return ConversionCost::Narrowing;
    }
    if !conversion.warnings.is_empty() {
        return ConversionCost::Unchecked;
    }
    if conversion
        .steps
        .iter()
        .any(|s| matches!(s, ConversionStep::Boxing | ConversionStep::Unboxing))
    {
        return ConversionCost::Boxing;
    }
    if conversion.steps.is_empty() {
        ConversionCost::Identity
    } else {
        ConversionCost::Widening
    }
}

/// A compile-time constant, as far as constant narrowing cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstValue {
    Int(i64),
}

/// JLS 5.6.1.
pub fn unary_numeric_promotion(p: PrimitiveType) -> Option<PrimitiveType> {
    match p {
        PrimitiveType::Boolean => None,
        PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Char => {
            Some(PrimitiveType::Int)
        }
        other => Some(other),
    }
}

/// JLS 5.6.2.
pub fn binary_numeric_promotion(a: PrimitiveType, b: PrimitiveType) -> Option<PrimitiveType> {
    if !a.is_numeric() || !b.is_numeric() {
        return None;
    }
    for wide in [
        PrimitiveType::Double,
        PrimitiveType::Float,
        PrimitiveType::Long,
    ] {
        if a == wide || b == wide {
            return Some(wide);
        }
    }
    Some(PrimitiveType::Int)
}

/// JLS 5.2 assignment conversion (without the constant-narrowing clause;
/// see [`assignment_conversion_with_const`]).
pub fn assignment_conversion(env: &dyn TypeEnv, from: &Type, to: &Type) -> Option<Conversion> {
    loose_conversion(env, from, to)
}

/// JLS 5.2 including narrowing of a constant expression that fits the
/// target type.
pub fn assignment_conversion_with_const(
    env: &dyn TypeEnv,
    from: &Type,
    to: &Type,
    value: Option<ConstValue>,
) -> Option<Conversion> {
    if let Some(conversion) = loose_conversion(env, from, to) {
        return Some(conversion);
    }
    let (Type::Primitive(p), Type::Primitive(q)) = (from, to) else {
        return None;
    };
    let Some(ConstValue::Int(v)) = value else {
        return None;
    };
    if !matches!(
        p,
        PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Char | PrimitiveType::Int
    ) {
        return None;
    }
    let fits = match q {
        PrimitiveType::Byte => i64::from(i8::MIN) <= v && v <= i64::from(i8::MAX),
        PrimitiveType::Short => i64::from(i16::MIN) <= v && v <= i64::from(i16::MAX),
        PrimitiveType::Char => 0 <= v && v <= i64::from(u16::MAX),
        _ => false,
    };
    fits.then(|| Conversion::of(vec![ConversionStep::NarrowingPrimitive]))
}

/// JLS 5.3 method invocation conversion: the loose conversion contexts
/// share one rule set.
pub fn method_invocation_conversion(
    env: &dyn TypeEnv,
    from: &Type,
    to: &Type,
) -> Option<Conversion> {
    loose_conversion(env, from, to)
}

/// Would an assignment `to = from` compile (possibly with warnings)?
pub fn is_assignable(env: &dyn TypeEnv, from: &Type, to: &Type) -> bool {
    assignment_conversion(env, from, to).is_some()
}

fn loose_conversion(env: &dyn TypeEnv, from: &Type, to: &Type) -> Option<Conversion> {
    if is_same_type(env, from, to) {
        return Some(Conversion::default());
    }
    match (from, to) {
        (Type::Primitive(p), Type::Primitive(q)) => p
            .widens_to(*q)
            .then(|| Conversion::of(vec![ConversionStep::WideningPrimitive])),
        (Type::Primitive(p), _) => {
            let boxed = Type::class(env.well_known().box_of(*p), Vec::new());
            if is_same_type(env, &boxed, to) {
                return Some(Conversion::of(vec![ConversionStep::Boxing]));
            }
            if is_subtype(env, &boxed, to) {
                return Some(Conversion::of(vec![
                    ConversionStep::Boxing,
                    ConversionStep::WideningReference,
                ]));
            }
            // Widen to a sibling primitive whose wrapper is the target.
            for widened in p.widened() {
                let widened_box = Type::class(env.well_known().box_of(*widened), Vec::new());
                if is_same_type(env, &widened_box, to) {
                    return Some(Conversion::of(vec![
                        ConversionStep::WideningPrimitive,
                        ConversionStep::Boxing,
                    ]));
                }
            }
            None
        }
        (_, Type::Primitive(q)) => {
            let unboxed = from
                .as_class()
                .and_then(|ct| env.well_known().unboxed(ct.class))?;
            if unboxed == *q {
                Some(Conversion::of(vec![ConversionStep::Unboxing]))
            } else if unboxed.widens_to(*q) {
                Some(Conversion::of(vec![
                    ConversionStep::Unboxing,
                    ConversionStep::WideningPrimitive,
                ]))
            } else {
                None
            }
        }
        _ => {
            if is_subtype(env, from, to) {
                let conversion = Conversion::of(vec![ConversionStep::WideningReference]);
                return Some(match raw_warning(env, from, to) {
                    Some(warning) => conversion.warn(warning),
                    None => conversion,
                });
            }
            if is_subtype_unchecked(env, from, to) {
                return Some(
                    Conversion::of(vec![ConversionStep::WideningReference])
                        .warn(TypeWarning::Unchecked(UncheckedReason::RawConversion)),
                );
            }
            None
        }
    }
}

fn raw_warning(env: &dyn TypeEnv, from: &Type, to: &Type) -> Option<TypeWarning> {
    let raw_meets_parameterised = (from.is_raw(env) && to.is_parameterized())
        || (to.is_raw(env) && from.is_parameterized());
    raw_meets_parameterised.then_some(TypeWarning::Unchecked(UncheckedReason::RawConversion))
}

/// JLS 5.5 cast conversion. Accepts everything the loose contexts accept,
/// plus narrowing; casts that cannot be fully checked at run time carry an
/// unchecked warning.
pub fn cast_conversion(env: &dyn TypeEnv, from: &Type, to: &Type) -> Option<Conversion> {
    if let Type::Intersection(components) = to {
        let mut warnings = Vec::new();
        for component in components {
            let conversion = cast_conversion(env, from, component)?;
            for warning in conversion.warnings {
                if !warnings.contains(&warning) {
                    warnings.push(warning);
                }
            }
        }
        return Some(Conversion {
            steps: vec![ConversionStep::NarrowingReference],
            warnings,
        });
    }

    if let Some(conversion) = loose_conversion(env, from, to) {
        return Some(conversion);
    }

    match (from, to) {
        (Type::Primitive(p), Type::Primitive(q)) => (p.is_numeric() && q.is_numeric())
            .then(|| Conversion::of(vec![ConversionStep::NarrowingPrimitive])),
        (_, Type::Primitive(q)) => {
            // Downcast to the wrapper, then unbox.
            let boxed = Type::class(env.well_known().box_of(*q), Vec::new());
            is_subtype(env, &boxed, from).then(|| {
                Conversion::of(vec![
                    ConversionStep::NarrowingReference,
                    ConversionStep::Unboxing,
                ])
            })
        }
        (Type::Primitive(_), _) => None,
        _ => {
            let downcast = is_subtype(env, to, from);
            let erased_from = erasure(env, from);
            let erased_to = erasure(env, to);
            let erasure_related = is_subtype(env, &erased_from, &erased_to)
                || is_subtype(env, &erased_to, &erased_from)
                || is_interface_type(env, from)
                || is_interface_type(env, to);
            if !downcast && !erasure_related {
                return None;
            }
            let mut conversion = Conversion::of(vec![ConversionStep::NarrowingReference]);
            if to.is_parameterized() {
                conversion =
                    conversion.warn(TypeWarning::Unchecked(UncheckedReason::UncheckedCast));
            }
            if let Some(warning) = raw_warning(env, from, to) {
                conversion = conversion.warn(warning);
            }
            Some(conversion)
        }
    }
}

fn is_interface_type(env: &dyn TypeEnv, ty: &Type) -> bool {
    ty.as_class()
        .and_then(|ct| env.class(ct.class))
        .is_some_and(|def| def.is_interface())
}
