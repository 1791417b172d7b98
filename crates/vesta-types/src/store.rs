use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vesta_ids::{ClassId, InferVarId, TypeParamId};

use crate::context::{BoundKind, InferVarBounds};
use crate::ty::{PrimitiveType, Type};

/// What kind of declaration a [`ClassDef`] is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Annotation,
    Enum,
    Record,
}

impl ClassKind {
    pub fn is_interface(self) -> bool {
        matches!(self, ClassKind::Interface | ClassKind::Annotation)
    }
}

/// JLS 6.6 member visibility.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

/// A declared type parameter or capture variable.
///
/// Declared parameters carry upper bounds only; capture variables may also
/// carry the lower bound derived from the wildcard they captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParamDef {
    pub name: String,
    pub upper_bounds: Vec<Type>,
    pub lower_bound: Option<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: Type,
    pub is_static: bool,
    pub is_final: bool,
}

/// A declared method. Constructors live in [`ClassDef::constructors`] with
/// the name `<init>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDef {
    pub name: String,
    pub visibility: Visibility,
    pub type_params: Vec<TypeParamId>,
    pub params: Vec<Type>,
    pub return_type: Type,
    pub throws: Vec<Type>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_default: bool,
    pub is_varargs: bool,
}

impl Default for MethodDef {
    fn default() -> Self {
        MethodDef {
            name: String::new(),
            visibility: Visibility::Public,
            type_params: Vec::new(),
            params: Vec::new(),
            return_type: Type::Void,
            throws: Vec::new(),
            is_static: false,
            is_abstract: false,
            is_default: false,
            is_varargs: false,
        }
    }
}

/// A class, interface, annotation, enum or record definition.
///
/// `name` is the binary name, dotted, with `$` separating nested classes
/// (`java.util.Map$Entry`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    pub kind: ClassKind,
    pub visibility: Visibility,
    /// Stub created for a name that could not be resolved. Such symbols
    /// satisfy subtype checks on the subtype side (see `is_subtype`).
    pub is_unresolved: bool,
    pub type_params: Vec<TypeParamId>,
    pub enclosing: Option<ClassId>,
    pub super_class: Option<Type>,
    pub interfaces: Vec<Type>,
    pub fields: Vec<FieldDef>,
    pub constructors: Vec<MethodDef>,
    pub methods: Vec<MethodDef>,
}

impl Default for ClassDef {
    fn default() -> Self {
        ClassDef {
            name: String::new(),
            kind: ClassKind::Class,
            visibility: Visibility::Public,
            is_unresolved: false,
            type_params: Vec::new(),
            enclosing: None,
            super_class: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }
}

impl ClassDef {
    pub fn is_interface(&self) -> bool {
        self.kind.is_interface()
    }

    /// The package part of the binary name (empty for the default package).
    pub fn package(&self) -> &str {
        package_of(&self.name)
    }
}

pub(crate) fn package_of(binary_name: &str) -> &str {
    match binary_name.rfind('.') {
        Some(idx) => &binary_name[..idx],
        None => "",
    }
}

/// Well-known `java.lang`/`java.io` class ids every store defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownTypes {
    pub object: ClassId,
    pub serializable: ClassId,
    pub cloneable: ClassId,
    pub string: ClassId,
    pub number: ClassId,
    pub throwable: ClassId,
    pub boolean: ClassId,
    pub byte: ClassId,
    pub character: ClassId,
    pub short: ClassId,
    pub integer: ClassId,
    pub long: ClassId,
    pub float: ClassId,
    pub double: ClassId,
}

impl WellKnownTypes {
    /// The wrapper class for a primitive (JLS 5.1.7).
    pub fn box_of(&self, p: PrimitiveType) -> ClassId {
        match p {
            PrimitiveType::Boolean => self.boolean,
            PrimitiveType::Byte => self.byte,
            PrimitiveType::Char => self.character,
            PrimitiveType::Short => self.short,
            PrimitiveType::Int => self.integer,
            PrimitiveType::Long => self.long,
            PrimitiveType::Float => self.float,
            PrimitiveType::Double => self.double,
        }
    }

    /// The primitive a wrapper class unboxes to, if `id` is a wrapper.
    pub fn unboxed(&self, id: ClassId) -> Option<PrimitiveType> {
        if id == self.boolean {
            Some(PrimitiveType::Boolean)
        } else if id == self.byte {
            Some(PrimitiveType::Byte)
        } else if id == self.character {
            Some(PrimitiveType::Char)
        } else if id == self.short {
            Some(PrimitiveType::Short)
        } else if id == self.integer {
            Some(PrimitiveType::Int)
        } else if id == self.long {
            Some(PrimitiveType::Long)
        } else if id == self.float {
            Some(PrimitiveType::Float)
        } else if id == self.double {
            Some(PrimitiveType::Double)
        } else {
            None
        }
    }
}

/// Read access to type definitions.
///
/// Implemented by [`TypeStore`] and by [`crate::TyContext`] (which overlays
/// its capture variables and inference state on the store it wraps). Every
/// algebra operation is written against this trait so a context can stand
/// in wherever a store can.
pub trait TypeEnv {
    fn class(&self, id: ClassId) -> Option<Arc<ClassDef>>;

    fn class_id(&self, binary_name: &str) -> Option<ClassId>;

    /// `class_id`, falling back to `java.lang.<name>` for simple names.
    fn lookup_class(&self, name: &str) -> Option<ClassId> {
        self.class_id(name)
            .or_else(|| self.class_id(&format!("java.lang.{name}")))
    }

    fn type_param(&self, id: TypeParamId) -> Option<TypeParamDef>;

    fn well_known(&self) -> &WellKnownTypes;

    /// The accumulated bounds of an inference variable, if this environment
    /// owns one by that id.
    fn infer_bounds(&self, id: InferVarId) -> Option<InferVarBounds>;

    /// Record a bound on an inference variable.
    ///
    /// Only an inference session can honor this; calling it on a bare store
    /// is a programming error and fails loudly.
    fn push_infer_bound(&self, id: InferVarId, kind: BoundKind, bound: Type);
}

/// The interning symbol table: class and type-parameter definitions plus
/// the well-known types. Read-only for the algebra once populated; safe to
/// share across threads behind `&`.
pub struct TypeStore {
    classes: Vec<Option<Arc<ClassDef>>>,
    by_name: HashMap<String, ClassId>,
    type_params: Vec<TypeParamDef>,
    well_known: WellKnownTypes,
}

impl Default for TypeStore {
    /// A store with the `java.lang` core: `Object`, `String`, `Number`, the
    /// wrapper classes, `Cloneable`, `java.io.Serializable`, `Comparable`,
    /// `CharSequence` and the `Throwable` chain.
    fn default() -> Self {
        TypeStore::with_lang_core()
    }
}

impl TypeStore {
    fn empty() -> TypeStore {
        let dummy = ClassId::new(u32::MAX);
        TypeStore {
            classes: Vec::new(),
            by_name: HashMap::new(),
            type_params: Vec::new(),
            well_known: WellKnownTypes {
                object: dummy,
                serializable: dummy,
                cloneable: dummy,
                string: dummy,
                number: dummy,
                throwable: dummy,
                boolean: dummy,
                byte: dummy,
                character: dummy,
                short: dummy,
                integer: dummy,
                long: dummy,
                float: dummy,
                double: dummy,
            },
        }
    }

    /// Reserve an id for a binary name without defining it yet. Idempotent.
    ///
    /// Needed to build self-referential definitions such as
    /// `Enum<E extends Enum<E>>`.
    pub fn intern_class_id(&mut self, binary_name: &str) -> ClassId {
        if let Some(id) = self.by_name.get(binary_name) {
            return *id;
        }
        let id = ClassId::new(self.classes.len() as u32);
        self.classes.push(None);
        self.by_name.insert(binary_name.to_string(), id);
        id
    }

    /// Define (or redefine) the class behind a reserved id.
    pub fn define_class(&mut self, id: ClassId, def: ClassDef) {
        self.by_name.insert(def.name.clone(), id);
        self.classes[id.to_raw() as usize] = Some(Arc::new(def));
    }

    /// Intern and define a new class. The name must not be defined yet; use
    /// [`TypeStore::upsert_class`] to overwrite.
    pub fn add_class(&mut self, def: ClassDef) -> ClassId {
        let id = self.intern_class_id(&def.name);
        debug_assert!(
            self.classes[id.to_raw() as usize].is_none(),
            "add_class: {} is already defined",
            def.name
        );
        self.define_class(id, def);
        id
    }

    /// Intern and define, overwriting any previous definition but keeping
    /// the id stable.
    pub fn upsert_class(&mut self, def: ClassDef) -> ClassId {
        let id = self.intern_class_id(&def.name);
        self.define_class(id, def);
        id
    }

    pub fn add_type_param(&mut self, name: &str, upper_bounds: Vec<Type>) -> TypeParamId {
        let id = TypeParamId::new(self.type_params.len() as u32);
        self.type_params.push(TypeParamDef {
            name: name.to_string(),
            upper_bounds,
            lower_bound: None,
        });
        id
    }

    pub fn define_type_param(&mut self, id: TypeParamId, def: TypeParamDef) {
        self.type_params[id.to_raw() as usize] = def;
    }

    /// [`TypeEnv::class_id`] for callers that treat a missing class as an
    /// error rather than a recoverable lookup miss.
    pub fn require_class(&self, binary_name: &str) -> crate::error::Result<ClassId> {
        self.class_id(binary_name)
            .ok_or_else(|| crate::error::TypeError::UnknownClass(binary_name.to_string()))
    }

    /// Everything in [`TypeStore::default`] plus a minimal collections,
    /// functional-interface and enum surface: enough of a JDK for generics,
    /// SAM and overriding queries without loading class files.
    pub fn with_minimal_jdk() -> TypeStore {
        let mut s = TypeStore::with_lang_core();
        let wk = s.well_known;
        let object_ty = Type::class(wk.object, vec![]);

        // java.util.Iterator<T>
        let t = s.add_type_param("T", vec![object_ty.clone()]);
        let iterator = s.add_class(ClassDef {
            name: "java.util.Iterator".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![t],
            methods: vec![
                MethodDef {
                    name: "hasNext".to_string(),
                    return_type: Type::boolean(),
                    is_abstract: true,
                    ..MethodDef::default()
                },
                MethodDef {
                    name: "next".to_string(),
                    return_type: Type::TypeVar(t),
                    is_abstract: true,
                    ..MethodDef::default()
                },
            ],
            ..ClassDef::default()
        });

        // java.lang.Iterable<T>
        let t = s.add_type_param("T", vec![object_ty.clone()]);
        let iterable = s.add_class(ClassDef {
            name: "java.lang.Iterable".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![t],
            methods: vec![MethodDef {
                name: "iterator".to_string(),
                return_type: Type::class(iterator, vec![Type::TypeVar(t)]),
                is_abstract: true,
                ..MethodDef::default()
            }],
            ..ClassDef::default()
        });

        // java.util.Collection<E>
        let e = s.add_type_param("E", vec![object_ty.clone()]);
        let collection = s.add_class(ClassDef {
            name: "java.util.Collection".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![e],
            interfaces: vec![Type::class(iterable, vec![Type::TypeVar(e)])],
            methods: vec![
                MethodDef {
                    name: "size".to_string(),
                    return_type: Type::int(),
                    is_abstract: true,
                    ..MethodDef::default()
                },
                MethodDef {
                    name: "add".to_string(),
                    params: vec![Type::TypeVar(e)],
                    return_type: Type::boolean(),
                    is_abstract: true,
                    ..MethodDef::default()
                },
                MethodDef {
                    name: "contains".to_string(),
                    params: vec![object_ty.clone()],
                    return_type: Type::boolean(),
                    is_abstract: true,
                    ..MethodDef::default()
                },
            ],
            ..ClassDef::default()
        });

        // java.util.List<E>
        let e = s.add_type_param("E", vec![object_ty.clone()]);
        let list = s.add_class(ClassDef {
            name: "java.util.List".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![e],
            interfaces: vec![Type::class(collection, vec![Type::TypeVar(e)])],
            methods: vec![
                MethodDef {
                    name: "get".to_string(),
                    params: vec![Type::int()],
                    return_type: Type::TypeVar(e),
                    is_abstract: true,
                    ..MethodDef::default()
                },
                MethodDef {
                    name: "set".to_string(),
                    params: vec![Type::int(), Type::TypeVar(e)],
                    return_type: Type::TypeVar(e),
                    is_abstract: true,
                    ..MethodDef::default()
                },
            ],
            ..ClassDef::default()
        });

        // java.util.ArrayList<E>
        let e = s.add_type_param("E", vec![object_ty.clone()]);
        s.add_class(ClassDef {
            name: "java.util.ArrayList".to_string(),
            kind: ClassKind::Class,
            type_params: vec![e],
            super_class: Some(object_ty.clone()),
            interfaces: vec![
                Type::class(list, vec![Type::TypeVar(e)]),
                Type::class(wk.cloneable, vec![]),
                Type::class(wk.serializable, vec![]),
            ],
            constructors: vec![MethodDef {
                name: "<init>".to_string(),
                ..MethodDef::default()
            }],
            methods: vec![
                MethodDef {
                    name: "get".to_string(),
                    params: vec![Type::int()],
                    return_type: Type::TypeVar(e),
                    ..MethodDef::default()
                },
                MethodDef {
                    name: "size".to_string(),
                    return_type: Type::int(),
                    ..MethodDef::default()
                },
            ],
            ..ClassDef::default()
        });

        // java.util.Map<K, V> and its nested Entry.
        let k = s.add_type_param("K", vec![object_ty.clone()]);
        let v = s.add_type_param("V", vec![object_ty.clone()]);
        let map = s.add_class(ClassDef {
            name: "java.util.Map".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![k, v],
            methods: vec![
                MethodDef {
                    name: "get".to_string(),
                    params: vec![object_ty.clone()],
                    return_type: Type::TypeVar(v),
                    is_abstract: true,
                    ..MethodDef::default()
                },
                MethodDef {
                    name: "put".to_string(),
                    params: vec![Type::TypeVar(k), Type::TypeVar(v)],
                    return_type: Type::TypeVar(v),
                    is_abstract: true,
                    ..MethodDef::default()
                },
            ],
            ..ClassDef::default()
        });
        let ek = s.add_type_param("K", vec![object_ty.clone()]);
        let ev = s.add_type_param("V", vec![object_ty.clone()]);
        s.add_class(ClassDef {
            name: "java.util.Map$Entry".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![ek, ev],
            enclosing: Some(map),
            methods: vec![
                MethodDef {
                    name: "getKey".to_string(),
                    return_type: Type::TypeVar(ek),
                    is_abstract: true,
                    ..MethodDef::default()
                },
                MethodDef {
                    name: "getValue".to_string(),
                    return_type: Type::TypeVar(ev),
                    is_abstract: true,
                    ..MethodDef::default()
                },
            ],
            ..ClassDef::default()
        });

        // java.lang.Enum<E extends Enum<E>>: the id must exist before the
        // F-bounded parameter can be spelled.
        let enum_id = s.intern_class_id("java.lang.Enum");
        let e = s.add_type_param("E", vec![object_ty.clone()]);
        s.define_type_param(
            e,
            TypeParamDef {
                name: "E".to_string(),
                upper_bounds: vec![Type::class(enum_id, vec![Type::TypeVar(e)])],
                lower_bound: None,
            },
        );
        let comparable = s
            .class_id("java.lang.Comparable")
            .expect("lang core defines java.lang.Comparable");
        s.define_class(
            enum_id,
            ClassDef {
                name: "java.lang.Enum".to_string(),
                kind: ClassKind::Class,
                type_params: vec![e],
                super_class: Some(object_ty.clone()),
                interfaces: vec![
                    Type::class(comparable, vec![Type::TypeVar(e)]),
                    Type::class(wk.serializable, vec![]),
                ],
                methods: vec![
                    MethodDef {
                        name: "name".to_string(),
                        return_type: Type::class(wk.string, vec![]),
                        ..MethodDef::default()
                    },
                    MethodDef {
                        name: "ordinal".to_string(),
                        return_type: Type::int(),
                        ..MethodDef::default()
                    },
                ],
                ..ClassDef::default()
            },
        );

        s.add_class(ClassDef {
            name: "java.lang.Record".to_string(),
            kind: ClassKind::Class,
            super_class: Some(object_ty.clone()),
            ..ClassDef::default()
        });

        s.add_class(ClassDef {
            name: "java.lang.annotation.Annotation".to_string(),
            kind: ClassKind::Interface,
            ..ClassDef::default()
        });

        // java.lang.Runnable
        s.add_class(ClassDef {
            name: "java.lang.Runnable".to_string(),
            kind: ClassKind::Interface,
            methods: vec![MethodDef {
                name: "run".to_string(),
                is_abstract: true,
                ..MethodDef::default()
            }],
            ..ClassDef::default()
        });

        // java.util.function.Function<T, R>
        let t = s.add_type_param("T", vec![object_ty.clone()]);
        let r = s.add_type_param("R", vec![object_ty.clone()]);
        s.add_class(ClassDef {
            name: "java.util.function.Function".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![t, r],
            methods: vec![MethodDef {
                name: "apply".to_string(),
                params: vec![Type::TypeVar(t)],
                return_type: Type::TypeVar(r),
                is_abstract: true,
                ..MethodDef::default()
            }],
            ..ClassDef::default()
        });

        // java.util.function.Supplier<T>
        let t = s.add_type_param("T", vec![object_ty.clone()]);
        s.add_class(ClassDef {
            name: "java.util.function.Supplier".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![t],
            methods: vec![MethodDef {
                name: "get".to_string(),
                return_type: Type::TypeVar(t),
                is_abstract: true,
                ..MethodDef::default()
            }],
            ..ClassDef::default()
        });

        // java.util.Comparator<T>: redeclares Object's equals, which the
        // functional-interface check must discount.
        let t = s.add_type_param("T", vec![object_ty.clone()]);
        s.add_class(ClassDef {
            name: "java.util.Comparator".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![t],
            methods: vec![
                MethodDef {
                    name: "compare".to_string(),
                    params: vec![Type::TypeVar(t), Type::TypeVar(t)],
                    return_type: Type::int(),
                    is_abstract: true,
                    ..MethodDef::default()
                },
                MethodDef {
                    name: "equals".to_string(),
                    params: vec![object_ty.clone()],
                    return_type: Type::boolean(),
                    is_abstract: true,
                    ..MethodDef::default()
                },
            ],
            ..ClassDef::default()
        });

        s
    }

    fn with_lang_core() -> TypeStore {
        let mut s = TypeStore::empty();

        let object = s.intern_class_id("java.lang.Object");
        let serializable = s.intern_class_id("java.io.Serializable");
        let cloneable = s.intern_class_id("java.lang.Cloneable");
        let string = s.intern_class_id("java.lang.String");
        let number = s.intern_class_id("java.lang.Number");
        let throwable = s.intern_class_id("java.lang.Throwable");
        let boolean = s.intern_class_id("java.lang.Boolean");
        let byte = s.intern_class_id("java.lang.Byte");
        let character = s.intern_class_id("java.lang.Character");
        let short = s.intern_class_id("java.lang.Short");
        let integer = s.intern_class_id("java.lang.Integer");
        let long = s.intern_class_id("java.lang.Long");
        let float = s.intern_class_id("java.lang.Float");
        let double = s.intern_class_id("java.lang.Double");

        s.well_known = WellKnownTypes {
            object,
            serializable,
            cloneable,
            string,
            number,
            throwable,
            boolean,
            byte,
            character,
            short,
            integer,
            long,
            float,
            double,
        };

        let object_ty = Type::class(object, vec![]);
        let string_ty = Type::class(string, vec![]);

        s.define_class(
            object,
            ClassDef {
                name: "java.lang.Object".to_string(),
                methods: vec![
                    MethodDef {
                        name: "toString".to_string(),
                        return_type: string_ty.clone(),
                        ..MethodDef::default()
                    },
                    MethodDef {
                        name: "equals".to_string(),
                        params: vec![object_ty.clone()],
                        return_type: Type::boolean(),
                        ..MethodDef::default()
                    },
                    MethodDef {
                        name: "hashCode".to_string(),
                        return_type: Type::int(),
                        ..MethodDef::default()
                    },
                    MethodDef {
                        name: "clone".to_string(),
                        visibility: Visibility::Protected,
                        return_type: object_ty.clone(),
                        ..MethodDef::default()
                    },
                ],
                ..ClassDef::default()
            },
        );

        s.define_class(
            serializable,
            ClassDef {
                name: "java.io.Serializable".to_string(),
                kind: ClassKind::Interface,
                ..ClassDef::default()
            },
        );
        s.define_class(
            cloneable,
            ClassDef {
                name: "java.lang.Cloneable".to_string(),
                kind: ClassKind::Interface,
                ..ClassDef::default()
            },
        );

        // java.lang.Comparable<T>
        let t = s.add_type_param("T", vec![object_ty.clone()]);
        let comparable = s.add_class(ClassDef {
            name: "java.lang.Comparable".to_string(),
            kind: ClassKind::Interface,
            type_params: vec![t],
            methods: vec![MethodDef {
                name: "compareTo".to_string(),
                params: vec![Type::TypeVar(t)],
                return_type: Type::int(),
                is_abstract: true,
                ..MethodDef::default()
            }],
            ..ClassDef::default()
        });

        // java.lang.CharSequence
        let char_sequence = s.add_class(ClassDef {
            name: "java.lang.CharSequence".to_string(),
            kind: ClassKind::Interface,
            methods: vec![
                MethodDef {
                    name: "length".to_string(),
                    return_type: Type::int(),
                    is_abstract: true,
                    ..MethodDef::default()
                },
                MethodDef {
                    name: "charAt".to_string(),
                    params: vec![Type::int()],
                    return_type: Type::char(),
                    is_abstract: true,
                    ..MethodDef::default()
                },
            ],
            ..ClassDef::default()
        });

        s.define_class(
            string,
            ClassDef {
                name: "java.lang.String".to_string(),
                super_class: Some(object_ty.clone()),
                interfaces: vec![
                    Type::class(serializable, vec![]),
                    Type::class(comparable, vec![string_ty.clone()]),
                    Type::class(char_sequence, vec![]),
                ],
                methods: vec![
                    MethodDef {
                        name: "length".to_string(),
                        return_type: Type::int(),
                        ..MethodDef::default()
                    },
                    MethodDef {
                        name: "charAt".to_string(),
                        params: vec![Type::int()],
                        return_type: Type::char(),
                        ..MethodDef::default()
                    },
                ],
                ..ClassDef::default()
            },
        );

        s.define_class(
            number,
            ClassDef {
                name: "java.lang.Number".to_string(),
                super_class: Some(object_ty.clone()),
                interfaces: vec![Type::class(serializable, vec![])],
                methods: vec![
                    MethodDef {
                        name: "intValue".to_string(),
                        return_type: Type::int(),
                        is_abstract: true,
                        ..MethodDef::default()
                    },
                    MethodDef {
                        name: "doubleValue".to_string(),
                        return_type: Type::double(),
                        is_abstract: true,
                        ..MethodDef::default()
                    },
                ],
                ..ClassDef::default()
            },
        );

        s.define_class(
            throwable,
            ClassDef {
                name: "java.lang.Throwable".to_string(),
                super_class: Some(object_ty.clone()),
                interfaces: vec![Type::class(serializable, vec![])],
                methods: vec![MethodDef {
                    name: "getMessage".to_string(),
                    return_type: string_ty.clone(),
                    ..MethodDef::default()
                }],
                ..ClassDef::default()
            },
        );
        let exception = s.add_class(ClassDef {
            name: "java.lang.Exception".to_string(),
            super_class: Some(Type::class(throwable, vec![])),
            ..ClassDef::default()
        });
        s.add_class(ClassDef {
            name: "java.lang.RuntimeException".to_string(),
            super_class: Some(Type::class(exception, vec![])),
            ..ClassDef::default()
        });

        // Wrapper classes. `Boolean` and `Character` extend Object, the
        // numeric wrappers extend Number; each is Comparable to itself.
        let wrapper = |s: &mut TypeStore, id: ClassId, name: &str, super_id: ClassId| {
            let self_ty = Type::class(id, vec![]);
            s.define_class(
                id,
                ClassDef {
                    name: name.to_string(),
                    super_class: Some(Type::class(super_id, vec![])),
                    interfaces: vec![
                        Type::class(serializable, vec![]),
                        Type::class(comparable, vec![self_ty]),
                    ],
                    ..ClassDef::default()
                },
            );
        };
        wrapper(&mut s, boolean, "java.lang.Boolean", object);
        wrapper(&mut s, character, "java.lang.Character", object);
        wrapper(&mut s, byte, "java.lang.Byte", number);
        wrapper(&mut s, short, "java.lang.Short", number);
        wrapper(&mut s, integer, "java.lang.Integer", number);
        wrapper(&mut s, long, "java.lang.Long", number);
        wrapper(&mut s, float, "java.lang.Float", number);
        wrapper(&mut s, double, "java.lang.Double", number);

        s
    }

}

impl TypeEnv for TypeStore {
    fn class(&self, id: ClassId) -> Option<Arc<ClassDef>> {
        self.classes.get(id.to_raw() as usize)?.clone()
    }

    fn class_id(&self, binary_name: &str) -> Option<ClassId> {
        self.by_name.get(binary_name).copied()
    }

    fn type_param(&self, id: TypeParamId) -> Option<TypeParamDef> {
        self.type_params.get(id.to_raw() as usize).cloned()
    }

    fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }

    fn infer_bounds(&self, _id: InferVarId) -> Option<InferVarBounds> {
        None
    }

    fn push_infer_bound(&self, id: InferVarId, _kind: BoundKind, _bound: Type) {
        panic!("inference variable {id} used outside an inference context");
    }
}
