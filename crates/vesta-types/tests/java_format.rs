use vesta_types::{
    format_method, format_type, ClassDef, MethodDef, MethodSig, Type, TypeEnv, TypeStore,
    WildcardBound,
};

use pretty_assertions::assert_eq;

#[test]
fn formats_wildcard_generic_array() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").unwrap();
    let string = env.well_known().string;

    let ty = Type::array(Type::class(
        list,
        vec![Type::Wildcard(WildcardBound::Extends(Box::new(
            Type::class(string, vec![]),
        )))],
    ));

    assert_eq!(format_type(&env, &ty), "List<? extends String>[]");
}

#[test]
fn formats_intersection_types() {
    let env = TypeStore::with_minimal_jdk();
    let serializable = env.well_known().serializable;
    let comparable = env.class_id("java.lang.Comparable").unwrap();

    let ty = Type::Intersection(vec![
        Type::class(serializable, vec![]),
        Type::class(comparable, vec![]),
    ]);

    assert_eq!(format_type(&env, &ty), "Serializable & Comparable");
}

#[test]
fn formats_nested_class_names() {
    let env = TypeStore::with_minimal_jdk();
    let entry = env.class_id("java.util.Map$Entry").unwrap();
    assert_eq!(format_type(&env, &Type::class(entry, vec![])), "Map.Entry");
}

#[test]
fn formats_primitives_wildcards_and_sentinels() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").unwrap();

    assert_eq!(format_type(&env, &Type::int()), "int");
    assert_eq!(format_type(&env, &Type::Null), "null");
    assert_eq!(format_type(&env, &Type::Void), "void");
    assert_eq!(format_type(&env, &Type::Unknown), "<unknown>");
    assert_eq!(
        format_type(
            &env,
            &Type::class(list, vec![Type::Wildcard(WildcardBound::Unbounded)])
        ),
        "List<?>"
    );
    assert_eq!(
        format_type(
            &env,
            &Type::class(
                list,
                vec![Type::Wildcard(WildcardBound::Super(Box::new(Type::class(
                    env.well_known().string,
                    vec![]
                ))))]
            )
        ),
        "List<? super String>"
    );
}

#[test]
fn formats_generic_and_varargs_methods() {
    let mut env = TypeStore::with_minimal_jdk();
    let serializable = env.well_known().serializable;
    let comparable = env.class_id("java.lang.Comparable").unwrap();
    let string = env.well_known().string;
    let object_ty = Type::class(env.well_known().object, vec![]);

    let owner = env.add_class(ClassDef {
        name: "com.example.Util".to_string(),
        super_class: Some(object_ty),
        ..ClassDef::default()
    });
    let owner_ty = Type::class(owner, vec![]);

    let t = env.add_type_param(
        "T",
        vec![
            Type::class(serializable, vec![]),
            Type::class(comparable, vec![]),
        ],
    );
    let generic = MethodDef {
        name: "max".to_string(),
        type_params: vec![t],
        params: vec![Type::TypeVar(t), Type::TypeVar(t)],
        return_type: Type::TypeVar(t),
        is_static: true,
        ..MethodDef::default()
    };
    let sig = MethodSig::of(&env, &owner_ty, &generic);
    assert_eq!(
        format_method(&env, &sig),
        "<T extends Serializable & Comparable> T max(T, T)"
    );

    let varargs = MethodDef {
        name: "join".to_string(),
        params: vec![Type::array(Type::class(string, vec![]))],
        return_type: Type::class(string, vec![]),
        is_static: true,
        is_varargs: true,
        ..MethodDef::default()
    };
    let sig = MethodSig::of(&env, &owner_ty, &varargs);
    assert_eq!(format_method(&env, &sig), "String join(String...)");
}
