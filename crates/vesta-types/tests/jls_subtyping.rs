use vesta_types::{
    is_same_type, is_subtype, is_subtype_unchecked, type_arg_contains, ClassDef, PrimitiveType,
    Type, TypeEnv, TypeStore, WildcardBound,
};

fn wild_extends(bound: Type) -> Type {
    Type::Wildcard(WildcardBound::Extends(Box::new(bound)))
}

fn wild_super(bound: Type) -> Type {
    Type::Wildcard(WildcardBound::Super(Box::new(bound)))
}

#[test]
fn generic_subtyping_is_invariant_without_wildcards() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").unwrap();
    let string = env.well_known().string;
    let object = env.well_known().object;

    let list_string = Type::class(list, vec![Type::class(string, vec![])]);
    let list_object = Type::class(list, vec![Type::class(object, vec![])]);

    assert!(!is_subtype(&env, &list_string, &list_object));
    assert!(!is_subtype(&env, &list_object, &list_string));
}

#[test]
fn wildcard_containment_extends() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").unwrap();
    let string = env.well_known().string;
    let object = env.well_known().object;

    let list_string = Type::class(list, vec![Type::class(string, vec![])]);
    let list_extends_object = Type::class(list, vec![wild_extends(Type::class(object, vec![]))]);
    let list_extends_string = Type::class(list, vec![wild_extends(Type::class(string, vec![]))]);

    assert!(is_subtype(&env, &list_string, &list_extends_object));
    assert!(is_subtype(&env, &list_extends_string, &list_extends_object));
    assert!(!is_subtype(&env, &list_extends_object, &list_extends_string));
}

#[test]
fn wildcard_containment_super() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").unwrap();
    let string = env.well_known().string;
    let object = env.well_known().object;

    let list_super_object = Type::class(list, vec![wild_super(Type::class(object, vec![]))]);
    let list_super_string = Type::class(list, vec![wild_super(Type::class(string, vec![]))]);

    assert!(is_subtype(&env, &list_super_object, &list_super_string));
    assert!(!is_subtype(&env, &list_super_string, &list_super_object));
}

#[test]
fn raw_types_need_unchecked_towards_parameterisations() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").unwrap();
    let object = env.well_known().object;

    let raw_list = Type::class(list, vec![]);
    let list_object = Type::class(list, vec![Type::class(object, vec![])]);
    let list_wild = Type::class(list, vec![Type::Wildcard(WildcardBound::Unbounded)]);

    assert!(is_subtype_unchecked(&env, &raw_list, &list_object));
    assert!(!is_subtype(&env, &raw_list, &list_object));

    // `List <: List<?>` needs no unchecked conversion.
    assert!(is_subtype(&env, &raw_list, &list_wild));

    // Raw on the supertype side absorbs.
    let list_string = Type::class(
        list,
        vec![Type::class(env.well_known().string, vec![])],
    );
    assert!(is_subtype(&env, &list_string, &raw_list));
}

#[test]
fn class_hierarchy_subtyping_substitutes_type_arguments() {
    let env = TypeStore::with_minimal_jdk();
    let array_list = env.class_id("java.util.ArrayList").unwrap();
    let list = env.class_id("java.util.List").unwrap();
    let collection = env.class_id("java.util.Collection").unwrap();
    let string = env.well_known().string;

    let array_list_string = Type::class(array_list, vec![Type::class(string, vec![])]);
    let list_string = Type::class(list, vec![Type::class(string, vec![])]);
    let collection_string = Type::class(collection, vec![Type::class(string, vec![])]);
    let list_object = Type::class(list, vec![Type::class(env.well_known().object, vec![])]);

    assert!(is_subtype(&env, &array_list_string, &list_string));
    assert!(is_subtype(&env, &array_list_string, &collection_string));
    assert!(!is_subtype(&env, &array_list_string, &list_object));
}

#[test]
fn intersection_subtyping_is_order_independent() {
    let env = TypeStore::with_minimal_jdk();

    let cloneable = Type::class(env.well_known().cloneable, vec![]);
    let serializable = Type::class(env.well_known().serializable, vec![]);

    let ab = Type::Intersection(vec![cloneable.clone(), serializable.clone()]);
    let ba = Type::Intersection(vec![serializable.clone(), cloneable.clone()]);

    assert!(is_subtype(&env, &ab, &ba));
    assert!(is_subtype(&env, &ba, &ab));

    assert!(is_subtype(&env, &ab, &cloneable));
    assert!(is_subtype(&env, &ab, &serializable));

    assert!(!is_subtype(&env, &cloneable, &ab));
    assert!(!is_subtype(&env, &serializable, &ab));
}

#[test]
fn arrays_are_covariant_for_references_only() {
    let env = TypeStore::with_minimal_jdk();
    let string = Type::class(env.well_known().string, vec![]);
    let object = Type::class(env.well_known().object, vec![]);

    assert!(is_subtype(
        &env,
        &Type::array(string.clone()),
        &Type::array(object.clone())
    ));
    assert!(!is_subtype(&env, &Type::array(object), &Type::array(string)));

    // Primitive components are only compatible with themselves.
    assert!(is_subtype(
        &env,
        &Type::array(Type::int()),
        &Type::array(Type::int())
    ));
    assert!(!is_subtype(
        &env,
        &Type::array(Type::int()),
        &Type::array(Type::long())
    ));
    assert!(!is_subtype(
        &env,
        &Type::array(Type::int()),
        &Type::array(Type::class(env.well_known().integer, vec![]))
    ));

    // Array interfaces.
    let int_array = Type::array(Type::int());
    assert!(is_subtype(
        &env,
        &int_array,
        &Type::class(env.well_known().object, vec![])
    ));
    assert!(is_subtype(
        &env,
        &int_array,
        &Type::class(env.well_known().cloneable, vec![])
    ));
    assert!(is_subtype(
        &env,
        &int_array,
        &Type::class(env.well_known().serializable, vec![])
    ));
}

#[test]
fn primitives_follow_the_widening_lattice() {
    let env = TypeStore::with_minimal_jdk();

    assert!(is_subtype(&env, &Type::int(), &Type::long()));
    assert!(is_subtype(&env, &Type::char(), &Type::int()));
    assert!(is_subtype(&env, &Type::float(), &Type::double()));
    assert!(!is_subtype(&env, &Type::long(), &Type::int()));
    assert!(!is_subtype(&env, &Type::boolean(), &Type::int()));

    // No boxing at the subtype level, and primitives are not Objects.
    assert!(!is_subtype(
        &env,
        &Type::int(),
        &Type::class(env.well_known().integer, vec![])
    ));
    assert!(!is_subtype(
        &env,
        &Type::int(),
        &Type::class(env.well_known().object, vec![])
    ));
}

#[test]
fn null_is_the_bottom_of_reference_types() {
    let env = TypeStore::with_minimal_jdk();
    let string = Type::class(env.well_known().string, vec![]);

    assert!(is_subtype(&env, &Type::Null, &string));
    assert!(is_subtype(&env, &Type::Null, &Type::array(string)));
    assert!(!is_subtype(&env, &Type::Null, &Type::int()));
}

#[test]
fn unresolved_types_satisfy_the_subtype_side_only() {
    let mut env = TypeStore::with_minimal_jdk();
    let string = Type::class(env.well_known().string, vec![]);

    assert!(is_subtype(&env, &Type::Unknown, &string));
    assert!(is_subtype(&env, &Type::Error, &string));
    assert!(is_subtype(&env, &Type::Unknown, &Type::int()));

    // The supertype side still has to be proven.
    assert!(!is_subtype(&env, &string, &Type::Unknown));
    assert!(!is_subtype(&env, &string, &Type::Error));

    // A stub interned for an unresolvable symbol behaves like `Unknown`.
    let stub = env.add_class(ClassDef {
        name: "com.example.Missing".to_string(),
        is_unresolved: true,
        ..ClassDef::default()
    });
    let stub_ty = Type::class(stub, vec![]);
    assert!(is_subtype(&env, &stub_ty, &string));
    assert!(!is_subtype(&env, &string, &stub_ty));
}

#[test]
fn named_references_resolve_through_the_store() {
    let env = TypeStore::with_minimal_jdk();
    let string = Type::class(env.well_known().string, vec![]);

    let named_string = Type::Named("java.lang.String".to_string());
    let named_object = Type::Named("Object".to_string());
    let named_missing = Type::Named("com.example.NoSuchType".to_string());

    assert!(is_subtype(&env, &named_string, &named_object));
    assert!(is_subtype(&env, &named_missing, &string));
    assert!(!is_subtype(&env, &string, &named_missing));
}

#[test]
fn same_type_compares_wildcards_by_polarity_and_bound() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").unwrap();
    let number = Type::class(env.class_id("java.lang.Number").unwrap(), vec![]);
    let object = Type::class(env.well_known().object, vec![]);

    let extends_number = Type::class(list, vec![wild_extends(number.clone())]);
    let super_number = Type::class(list, vec![wild_super(number)]);

    assert!(is_same_type(&env, &extends_number, &extends_number.clone()));
    assert!(!is_same_type(&env, &extends_number, &super_number));

    // `?` and `? extends Object` are the same wildcard.
    let unbounded = Type::class(list, vec![Type::Wildcard(WildcardBound::Unbounded)]);
    let extends_object = Type::class(list, vec![wild_extends(object)]);
    assert!(is_same_type(&env, &unbounded, &extends_object));
}

#[test]
fn type_arg_containment_is_the_pairwise_predicate() {
    let env = TypeStore::with_minimal_jdk();
    let string = Type::class(env.well_known().string, vec![]);
    let object = Type::class(env.well_known().object, vec![]);

    assert!(type_arg_contains(
        &env,
        &wild_extends(object.clone()),
        &string
    ));
    assert!(!type_arg_contains(&env, &object, &string));
    assert!(type_arg_contains(&env, &wild_super(string.clone()), &object));
    assert!(!type_arg_contains(&env, &wild_super(object), &string));
    assert!(type_arg_contains(
        &env,
        &Type::Wildcard(WildcardBound::Unbounded),
        &string
    ));
}

#[test]
fn everything_is_a_subtype_of_object() {
    let env = TypeStore::with_minimal_jdk();
    let object = Type::class(env.well_known().object, vec![]);
    let list = env.class_id("java.util.List").unwrap();

    let samples = [
        Type::class(env.well_known().string, vec![]),
        Type::class(list, vec![Type::class(env.well_known().string, vec![])]),
        Type::class(env.well_known().cloneable, vec![]),
        Type::array(Type::Primitive(PrimitiveType::Double)),
        Type::Null,
        Type::Intersection(vec![
            Type::class(env.well_known().serializable, vec![]),
            Type::class(env.well_known().cloneable, vec![]),
        ]),
    ];
    for ty in &samples {
        assert!(is_subtype(&env, ty, &object), "{ty:?} should be <: Object");
    }

    assert!(!is_subtype(&env, &Type::int(), &object));
}
