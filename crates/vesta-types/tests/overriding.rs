use vesta_types::{
    are_override_equivalent, erased_signature, have_same_signature, have_same_type_params,
    is_return_type_substitutable, is_sub_signature, overrides, ClassDef, ClassKind, MethodDef,
    MethodSig, Type, TypeEnv, TypeParamDef, TypeStore, Visibility,
};

/// `class A { Object id(Object) }` and `class B extends A { <T> T id(T) }`,
/// the classic generic redeclaration pair.
fn generic_override_fixture(env: &mut TypeStore) -> (MethodSig, MethodSig, Type, Type) {
    let object = env.well_known().object;
    let object_ty = Type::class(object, vec![]);

    let a = env.add_class(ClassDef {
        name: "com.example.A".to_string(),
        super_class: Some(object_ty.clone()),
        methods: vec![MethodDef {
            name: "id".to_string(),
            params: vec![object_ty.clone()],
            return_type: object_ty.clone(),
            ..MethodDef::default()
        }],
        ..ClassDef::default()
    });

    let t = env.add_type_param("T", vec![object_ty.clone()]);
    let b = env.add_class(ClassDef {
        name: "com.example.B".to_string(),
        super_class: Some(Type::class(a, vec![])),
        methods: vec![MethodDef {
            name: "id".to_string(),
            type_params: vec![t],
            params: vec![Type::TypeVar(t)],
            return_type: Type::TypeVar(t),
            ..MethodDef::default()
        }],
        ..ClassDef::default()
    });

    let env = &*env;
    let a_ty = Type::class(a, vec![]);
    let b_ty = Type::class(b, vec![]);
    let m2 = MethodSig::of(env, &a_ty, &env.class(a).unwrap().methods[0]);
    let m1 = MethodSig::of(env, &b_ty, &env.class(b).unwrap().methods[0]);
    (m1, m2, a_ty, b_ty)
}

#[test]
fn same_signature_requires_matching_type_params() {
    let mut env = TypeStore::with_minimal_jdk();
    let (m1, m2, _, _) = generic_override_fixture(&mut env);

    assert!(!have_same_signature(&env, &m1, &m2));
    assert!(have_same_signature(&env, &m2, &erased_signature(&env, &m1)));
}

#[test]
fn same_type_params_rename_before_comparing_bounds() {
    let mut env = TypeStore::with_minimal_jdk();
    let object_ty = Type::class(env.well_known().object, vec![]);
    let comparable = env.class_id("java.lang.Comparable").unwrap();

    // <T extends Comparable<T>> and <U extends Comparable<U>> agree.
    let t = env.add_type_param("T", vec![]);
    env.define_type_param(
        t,
        TypeParamDef {
            name: "T".to_string(),
            upper_bounds: vec![Type::class(comparable, vec![Type::TypeVar(t)])],
            lower_bound: None,
        },
    );
    let u = env.add_type_param("U", vec![]);
    env.define_type_param(
        u,
        TypeParamDef {
            name: "U".to_string(),
            upper_bounds: vec![Type::class(comparable, vec![Type::TypeVar(u)])],
            lower_bound: None,
        },
    );

    let owner = env.add_class(ClassDef {
        name: "com.example.Owner".to_string(),
        super_class: Some(object_ty.clone()),
        methods: vec![
            MethodDef {
                name: "m".to_string(),
                type_params: vec![t],
                params: vec![Type::TypeVar(t)],
                ..MethodDef::default()
            },
            MethodDef {
                name: "m".to_string(),
                type_params: vec![u],
                params: vec![Type::TypeVar(u)],
                ..MethodDef::default()
            },
        ],
        ..ClassDef::default()
    });

    let owner_ty = Type::class(owner, vec![]);
    let def = env.class(owner).unwrap();
    let m1 = MethodSig::of(&env, &owner_ty, &def.methods[0]);
    let m2 = MethodSig::of(&env, &owner_ty, &def.methods[1]);

    assert!(have_same_type_params(&env, &m1, &m2));
    assert!(have_same_signature(&env, &m1, &m2));
}

#[test]
fn sub_signature_is_asymmetric_around_erasure() {
    let mut env = TypeStore::with_minimal_jdk();
    let (m1, m2, _, _) = generic_override_fixture(&mut env);

    // The non-generic method matches the erasure of the generic one, not
    // the other way around.
    assert!(is_sub_signature(&env, &m2, &m1));
    assert!(!is_sub_signature(&env, &m1, &m2));
}

#[test]
fn override_equivalence_is_symmetric() {
    let mut env = TypeStore::with_minimal_jdk();
    let (m1, m2, _, _) = generic_override_fixture(&mut env);

    assert_eq!(
        are_override_equivalent(&env, &m1, &m2),
        are_override_equivalent(&env, &m2, &m1)
    );
    assert!(are_override_equivalent(&env, &m1, &m2));
}

#[test]
fn generic_redeclaration_is_return_type_substitutable_and_overrides() {
    let mut env = TypeStore::with_minimal_jdk();
    let (m1, m2, _, b_ty) = generic_override_fixture(&mut env);

    assert!(is_return_type_substitutable(&env, &m1, &m2));
    assert!(overrides(&env, &m1, &m2, &b_ty));
    assert!(!overrides(&env, &m2, &m1, &b_ty));
}

#[test]
fn covariant_returns_are_substitutable_and_primitives_are_not() {
    let mut env = TypeStore::with_minimal_jdk();
    let object_ty = Type::class(env.well_known().object, vec![]);
    let string_ty = Type::class(env.well_known().string, vec![]);

    let a = env.add_class(ClassDef {
        name: "com.example.Wide".to_string(),
        super_class: Some(object_ty.clone()),
        methods: vec![
            MethodDef {
                name: "get".to_string(),
                return_type: object_ty.clone(),
                ..MethodDef::default()
            },
            MethodDef {
                name: "count".to_string(),
                return_type: Type::long(),
                ..MethodDef::default()
            },
        ],
        ..ClassDef::default()
    });
    let b = env.add_class(ClassDef {
        name: "com.example.Narrow".to_string(),
        super_class: Some(Type::class(a, vec![])),
        methods: vec![
            MethodDef {
                name: "get".to_string(),
                return_type: string_ty,
                ..MethodDef::default()
            },
            MethodDef {
                name: "count".to_string(),
                return_type: Type::int(),
                ..MethodDef::default()
            },
        ],
        ..ClassDef::default()
    });

    let a_ty = Type::class(a, vec![]);
    let b_ty = Type::class(b, vec![]);
    let a_def = env.class(a).unwrap();
    let b_def = env.class(b).unwrap();

    let wide_get = MethodSig::of(&env, &a_ty, &a_def.methods[0]);
    let narrow_get = MethodSig::of(&env, &b_ty, &b_def.methods[0]);
    assert!(is_return_type_substitutable(&env, &narrow_get, &wide_get));
    assert!(overrides(&env, &narrow_get, &wide_get, &b_ty));

    // Primitive returns must match exactly: `int count()` does not
    // override `long count()`.
    let wide_count = MethodSig::of(&env, &a_ty, &a_def.methods[1]);
    let narrow_count = MethodSig::of(&env, &b_ty, &b_def.methods[1]);
    assert!(!is_return_type_substitutable(&env, &narrow_count, &wide_count));
}

#[test]
fn overrides_sees_methods_through_parameterised_supertypes() {
    let mut env = TypeStore::with_minimal_jdk();
    let object_ty = Type::class(env.well_known().object, vec![]);
    let string_ty = Type::class(env.well_known().string, vec![]);

    // interface Sink<T> { void put(T t); }  /  class StringSink implements Sink<String>
    let t = env.add_type_param("T", vec![object_ty.clone()]);
    let sink = env.add_class(ClassDef {
        name: "com.example.Sink".to_string(),
        kind: ClassKind::Interface,
        type_params: vec![t],
        methods: vec![MethodDef {
            name: "put".to_string(),
            params: vec![Type::TypeVar(t)],
            is_abstract: true,
            ..MethodDef::default()
        }],
        ..ClassDef::default()
    });
    let string_sink = env.add_class(ClassDef {
        name: "com.example.StringSink".to_string(),
        super_class: Some(object_ty),
        interfaces: vec![Type::class(sink, vec![string_ty.clone()])],
        methods: vec![MethodDef {
            name: "put".to_string(),
            params: vec![string_ty.clone()],
            ..MethodDef::default()
        }],
        ..ClassDef::default()
    });

    let impl_ty = Type::class(string_sink, vec![]);
    let sink_string = Type::class(sink, vec![string_ty]);
    let m1 = MethodSig::of(&env, &impl_ty, &env.class(string_sink).unwrap().methods[0]);
    let m2 = MethodSig::of(&env, &sink_string, &env.class(sink).unwrap().methods[0]);

    assert!(overrides(&env, &m1, &m2, &impl_ty));
}

#[test]
fn private_and_static_rules() {
    let mut env = TypeStore::with_minimal_jdk();
    let object_ty = Type::class(env.well_known().object, vec![]);

    let a = env.add_class(ClassDef {
        name: "com.example.Base".to_string(),
        super_class: Some(object_ty.clone()),
        methods: vec![
            MethodDef {
                name: "hidden".to_string(),
                visibility: Visibility::Private,
                ..MethodDef::default()
            },
            MethodDef {
                name: "helper".to_string(),
                is_static: true,
                ..MethodDef::default()
            },
        ],
        ..ClassDef::default()
    });
    let b = env.add_class(ClassDef {
        name: "com.example.Derived".to_string(),
        super_class: Some(Type::class(a, vec![])),
        methods: vec![
            MethodDef {
                name: "hidden".to_string(),
                visibility: Visibility::Private,
                ..MethodDef::default()
            },
            MethodDef {
                name: "helper".to_string(),
                is_static: true,
                ..MethodDef::default()
            },
        ],
        ..ClassDef::default()
    });

    let a_ty = Type::class(a, vec![]);
    let b_ty = Type::class(b, vec![]);
    let a_def = env.class(a).unwrap();
    let b_def = env.class(b).unwrap();

    // Private methods are never overridable.
    let base_hidden = MethodSig::of(&env, &a_ty, &a_def.methods[0]);
    let derived_hidden = MethodSig::of(&env, &b_ty, &b_def.methods[0]);
    assert!(!overrides(&env, &derived_hidden, &base_hidden, &b_ty));

    // Static-vs-instance is not this predicate's concern: the check still
    // answers structurally and callers flag the mismatch.
    let base_helper = MethodSig::of(&env, &a_ty, &a_def.methods[1]);
    let derived_helper = MethodSig::of(&env, &b_ty, &b_def.methods[1]);
    assert!(overrides(&env, &derived_helper, &base_helper, &b_ty));
}

#[test]
fn inherited_concrete_method_discharges_an_interface_requirement() {
    let mut env = TypeStore::with_minimal_jdk();
    let object_ty = Type::class(env.well_known().object, vec![]);

    // class Impl { public void run() }  /  interface Task { void run(); }
    // class Both extends Impl implements Task: Impl.run implements
    // Task.run *in* Both, though Impl never mentions Task.
    let task = env.add_class(ClassDef {
        name: "com.example.Task".to_string(),
        kind: ClassKind::Interface,
        methods: vec![MethodDef {
            name: "run".to_string(),
            is_abstract: true,
            ..MethodDef::default()
        }],
        ..ClassDef::default()
    });
    let impl_class = env.add_class(ClassDef {
        name: "com.example.Impl".to_string(),
        super_class: Some(object_ty.clone()),
        methods: vec![MethodDef {
            name: "run".to_string(),
            ..MethodDef::default()
        }],
        ..ClassDef::default()
    });
    let both = env.add_class(ClassDef {
        name: "com.example.Both".to_string(),
        super_class: Some(Type::class(impl_class, vec![])),
        interfaces: vec![Type::class(task, vec![])],
        ..ClassDef::default()
    });

    let impl_ty = Type::class(impl_class, vec![]);
    let task_ty = Type::class(task, vec![]);
    let both_ty = Type::class(both, vec![]);

    let m1 = MethodSig::of(&env, &impl_ty, &env.class(impl_class).unwrap().methods[0]);
    let m2 = MethodSig::of(&env, &task_ty, &env.class(task).unwrap().methods[0]);

    // Not through Impl's own hierarchy...
    assert!(!overrides(&env, &m1, &m2, &impl_ty));
    // ...but through the origin that inherits both.
    assert!(overrides(&env, &m1, &m2, &both_ty));
}
