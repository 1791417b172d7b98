use vesta_types::{
    super_type_set, try_super_type_set, ClassDef, Type, TypeEnv, TypeError, TypeStore,
};

use pretty_assertions::assert_eq;

#[test]
fn supertype_set_is_reflexive_and_reaches_object() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").unwrap();
    let string = env.well_known().string;
    let object = Type::class(env.well_known().object, vec![]);

    let list_string = Type::class(list, vec![Type::class(string, vec![])]);
    let set = super_type_set(&env, &list_string);

    assert_eq!(set.first(), Some(&list_string));
    assert!(set.contains(&object));
}

#[test]
fn class_chain_comes_before_interfaces() {
    let env = TypeStore::with_minimal_jdk();
    let array_list = env.class_id("java.util.ArrayList").unwrap();
    let list = env.class_id("java.util.List").unwrap();
    let string = env.well_known().string;
    let object = Type::class(env.well_known().object, vec![]);

    let array_list_string = Type::class(array_list, vec![Type::class(string, vec![])]);
    let set = super_type_set(&env, &array_list_string);

    let object_pos = set.iter().position(|t| *t == object).unwrap();
    let list_pos = set
        .iter()
        .position(|t| t.as_class().is_some_and(|ct| ct.class == list))
        .unwrap();
    assert!(
        object_pos < list_pos,
        "the superclass chain is walked before declared interfaces"
    );
}

#[test]
fn interfaces_fall_back_to_object_last() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").unwrap();
    let string = env.well_known().string;
    let object = Type::class(env.well_known().object, vec![]);

    let list_string = Type::class(list, vec![Type::class(string, vec![])]);
    let set = super_type_set(&env, &list_string);
    assert_eq!(set.last(), Some(&object));
}

#[test]
fn array_supertypes_promote_component_supertypes() {
    let env = TypeStore::with_minimal_jdk();
    let string = Type::class(env.well_known().string, vec![]);
    let object = Type::class(env.well_known().object, vec![]);
    let cloneable = Type::class(env.well_known().cloneable, vec![]);
    let serializable = Type::class(env.well_known().serializable, vec![]);

    let string_array = Type::array(string.clone());
    let set = super_type_set(&env, &string_array);

    assert!(set.contains(&string_array));
    assert!(set.contains(&Type::array(object.clone())));
    assert!(set.contains(&Type::array(serializable.clone())));
    assert!(set.contains(&cloneable));
    assert!(set.contains(&serializable));
    assert!(set.contains(&object));
}

#[test]
fn primitive_array_supertypes_are_the_array_interfaces() {
    let env = TypeStore::with_minimal_jdk();
    let int_array = Type::array(Type::int());
    let set = super_type_set(&env, &int_array);

    assert_eq!(
        set,
        vec![
            int_array.clone(),
            Type::class(env.well_known().cloneable, vec![]),
            Type::class(env.well_known().serializable, vec![]),
            Type::class(env.well_known().object, vec![]),
        ]
    );
}

#[test]
fn primitive_supertypes_follow_widening_plus_box() {
    let env = TypeStore::with_minimal_jdk();
    let set = super_type_set(&env, &Type::int());

    assert_eq!(
        set,
        vec![
            Type::int(),
            Type::long(),
            Type::float(),
            Type::double(),
            Type::class(env.well_known().integer, vec![]),
            Type::class(env.well_known().object, vec![]),
        ]
    );
}

#[test]
fn raw_views_erase_their_supertypes() {
    let env = TypeStore::with_minimal_jdk();
    let array_list = env.class_id("java.util.ArrayList").unwrap();
    let list = env.class_id("java.util.List").unwrap();

    let raw_array_list = Type::class(array_list, vec![]);
    let set = super_type_set(&env, &raw_array_list);

    let list_view = set
        .iter()
        .find(|t| t.as_class().is_some_and(|ct| ct.class == list))
        .expect("raw ArrayList still reaches List");
    let ct = list_view.as_class().unwrap();
    assert!(ct.args.is_empty());
    assert!(ct.erased_supertypes);
}

#[test]
fn f_bounded_variables_terminate() {
    let env = TypeStore::with_minimal_jdk();
    let enum_id = env.class_id("java.lang.Enum").unwrap();
    let enum_def = env.class(enum_id).unwrap();
    let e = enum_def.type_params[0];

    // `E extends Enum<E>`: the seen-set has to cut the cycle.
    let set = super_type_set(&env, &Type::TypeVar(e));
    assert!(set.contains(&Type::TypeVar(e)));
    assert!(set
        .iter()
        .any(|t| t.as_class().is_some_and(|ct| ct.class == enum_id)));
    assert!(set.contains(&Type::class(env.well_known().object, vec![])));
}

#[test]
fn null_type_has_no_supertype_set() {
    let env = TypeStore::with_minimal_jdk();
    assert_eq!(
        try_super_type_set(&env, &Type::Null),
        Err(TypeError::NullHasNoSupertypes)
    );
}

#[test]
#[should_panic(expected = "null type has no supertype set")]
fn null_type_supertype_set_panics() {
    let env = TypeStore::with_minimal_jdk();
    let _ = super_type_set(&env, &Type::Null);
}

#[test]
fn stub_classes_answer_with_themselves() {
    let mut env = TypeStore::with_minimal_jdk();
    let stub = env.add_class(ClassDef {
        name: "com.example.Stub".to_string(),
        is_unresolved: true,
        ..ClassDef::default()
    });

    // A stub with no superclass at all still answers with itself.
    let set = super_type_set(&env, &Type::class(stub, vec![]));
    assert_eq!(set.first(), Some(&Type::class(stub, vec![])));
}
