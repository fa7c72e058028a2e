//! Minimal JDK declarations used by tests and small embedders.
//!
//! Only the supertype graph and a few members are modelled; the shapes (and the generic
//! parameter names) match the real JDK so resolved results read naturally.

use crate::expr::TypeExpr;
use crate::model::{
    ClassDecl, ClassId, FieldDecl, MethodDecl, PrimitiveType, TypeParamDecl, TypeParamSlot,
    TypeUniverse,
};

/// Binary name of the type-literal capture base class (see `GenericsResolver::capture`).
pub const TYPE_LITERAL_CLASS: &str = "nova.generics.TypeLiteral";

fn var(class: ClassId, index: u32) -> TypeExpr {
    TypeExpr::type_var(TypeParamSlot::class(class, index))
}

fn params(names: &[&str]) -> Vec<TypeParamDecl> {
    names.iter().map(|name| TypeParamDecl::new(*name)).collect()
}

pub(crate) fn define_minimal_jdk(u: &mut TypeUniverse) {
    let object = ClassId::OBJECT;
    let serializable = u.intern_class_id("java.io.Serializable");
    let cloneable = u.intern_class_id("java.lang.Cloneable");
    let comparable = u.intern_class_id("java.lang.Comparable");
    let char_sequence = u.intern_class_id("java.lang.CharSequence");
    let string = u.intern_class_id("java.lang.String");
    let number = u.intern_class_id("java.lang.Number");
    let void = u.intern_class_id("java.lang.Void");
    let iterable = u.intern_class_id("java.lang.Iterable");
    let collection = u.intern_class_id("java.util.Collection");
    let list = u.intern_class_id("java.util.List");
    let random_access = u.intern_class_id("java.util.RandomAccess");
    let abstract_collection = u.intern_class_id("java.util.AbstractCollection");
    let abstract_list = u.intern_class_id("java.util.AbstractList");
    let array_list = u.intern_class_id("java.util.ArrayList");
    let map = u.intern_class_id("java.util.Map");
    let abstract_map = u.intern_class_id("java.util.AbstractMap");
    let hash_map = u.intern_class_id("java.util.HashMap");
    let throwable = u.intern_class_id("java.lang.Throwable");
    let exception = u.intern_class_id("java.lang.Exception");
    let runtime_exception = u.intern_class_id("java.lang.RuntimeException");
    let io_exception = u.intern_class_id("java.io.IOException");
    let type_literal = u.intern_class_id(TYPE_LITERAL_CLASS);

    u.define_class(
        object,
        ClassDecl {
            super_class: None,
            methods: vec![
                MethodDecl::new("toString", vec![], TypeExpr::class(string)),
                MethodDecl::new("hashCode", vec![], TypeExpr::primitive(PrimitiveType::Int)),
                MethodDecl::new(
                    "equals",
                    vec![TypeExpr::class(object)],
                    TypeExpr::primitive(PrimitiveType::Boolean),
                ),
            ],
            ..ClassDecl::class("java.lang.Object")
        },
    );

    u.define_class(serializable, ClassDecl::interface("java.io.Serializable"));
    u.define_class(cloneable, ClassDecl::interface("java.lang.Cloneable"));
    u.define_class(random_access, ClassDecl::interface("java.util.RandomAccess"));
    u.define_class(char_sequence, ClassDecl::interface("java.lang.CharSequence"));
    u.define_class(
        comparable,
        ClassDecl {
            type_params: params(&["T"]),
            methods: vec![MethodDecl::new(
                "compareTo",
                vec![var(comparable, 0)],
                TypeExpr::primitive(PrimitiveType::Int),
            )],
            ..ClassDecl::interface("java.lang.Comparable")
        },
    );

    let comparable_of =
        |id: ClassId| TypeExpr::parameterized(comparable, vec![TypeExpr::class(id)]);

    u.define_class(
        string,
        ClassDecl {
            interfaces: vec![
                TypeExpr::class(serializable),
                comparable_of(string),
                TypeExpr::class(char_sequence),
            ],
            ..ClassDecl::class("java.lang.String")
        },
    );
    u.define_class(
        number,
        ClassDecl {
            interfaces: vec![TypeExpr::class(serializable)],
            ..ClassDecl::class("java.lang.Number")
        },
    );
    u.define_class(void, ClassDecl::class("java.lang.Void"));

    for primitive in PrimitiveType::ALL {
        let name = primitive.boxed_name();
        let id = u.intern_class_id(name);
        let super_class = match primitive {
            PrimitiveType::Boolean | PrimitiveType::Char => TypeExpr::class(object),
            _ => TypeExpr::class(number),
        };
        u.define_class(
            id,
            ClassDecl {
                super_class: Some(super_class),
                interfaces: vec![TypeExpr::class(serializable), comparable_of(id)],
                ..ClassDecl::class(name)
            },
        );
    }

    u.define_class(
        iterable,
        ClassDecl {
            type_params: params(&["T"]),
            ..ClassDecl::interface("java.lang.Iterable")
        },
    );
    u.define_class(
        collection,
        ClassDecl {
            type_params: params(&["E"]),
            interfaces: vec![TypeExpr::parameterized(iterable, vec![var(collection, 0)])],
            methods: vec![
                MethodDecl::new(
                    "add",
                    vec![var(collection, 0)],
                    TypeExpr::primitive(PrimitiveType::Boolean),
                ),
                MethodDecl::new(
                    "addAll",
                    vec![TypeExpr::parameterized(
                        collection,
                        vec![TypeExpr::wildcard_extends(var(collection, 0))],
                    )],
                    TypeExpr::primitive(PrimitiveType::Boolean),
                ),
                MethodDecl::new("size", vec![], TypeExpr::primitive(PrimitiveType::Int)),
            ],
            ..ClassDecl::interface("java.util.Collection")
        },
    );
    u.define_class(
        list,
        ClassDecl {
            type_params: params(&["E"]),
            interfaces: vec![TypeExpr::parameterized(collection, vec![var(list, 0)])],
            methods: vec![MethodDecl::new(
                "get",
                vec![TypeExpr::primitive(PrimitiveType::Int)],
                var(list, 0),
            )],
            ..ClassDecl::interface("java.util.List")
        },
    );
    u.define_class(
        abstract_collection,
        ClassDecl {
            type_params: params(&["E"]),
            interfaces: vec![TypeExpr::parameterized(
                collection,
                vec![var(abstract_collection, 0)],
            )],
            ..ClassDecl::class("java.util.AbstractCollection")
        },
    );
    u.define_class(
        abstract_list,
        ClassDecl {
            type_params: params(&["E"]),
            super_class: Some(TypeExpr::parameterized(
                abstract_collection,
                vec![var(abstract_list, 0)],
            )),
            interfaces: vec![TypeExpr::parameterized(list, vec![var(abstract_list, 0)])],
            ..ClassDecl::class("java.util.AbstractList")
        },
    );
    u.define_class(
        array_list,
        ClassDecl {
            type_params: params(&["E"]),
            super_class: Some(TypeExpr::parameterized(
                abstract_list,
                vec![var(array_list, 0)],
            )),
            interfaces: vec![
                TypeExpr::parameterized(list, vec![var(array_list, 0)]),
                TypeExpr::class(random_access),
                TypeExpr::class(cloneable),
                TypeExpr::class(serializable),
            ],
            fields: vec![FieldDecl::new(
                "elementData",
                TypeExpr::array(TypeExpr::class(object)),
            )],
            ..ClassDecl::class("java.util.ArrayList")
        },
    );

    u.define_class(
        map,
        ClassDecl {
            type_params: params(&["K", "V"]),
            methods: vec![
                MethodDecl::new("get", vec![TypeExpr::class(object)], var(map, 1)),
                MethodDecl::new("put", vec![var(map, 0), var(map, 1)], var(map, 1)),
            ],
            ..ClassDecl::interface("java.util.Map")
        },
    );
    u.define_class(
        abstract_map,
        ClassDecl {
            type_params: params(&["K", "V"]),
            interfaces: vec![TypeExpr::parameterized(
                map,
                vec![var(abstract_map, 0), var(abstract_map, 1)],
            )],
            ..ClassDecl::class("java.util.AbstractMap")
        },
    );
    u.define_class(
        hash_map,
        ClassDecl {
            type_params: params(&["K", "V"]),
            super_class: Some(TypeExpr::parameterized(
                abstract_map,
                vec![var(hash_map, 0), var(hash_map, 1)],
            )),
            interfaces: vec![
                TypeExpr::parameterized(map, vec![var(hash_map, 0), var(hash_map, 1)]),
                TypeExpr::class(cloneable),
                TypeExpr::class(serializable),
            ],
            ..ClassDecl::class("java.util.HashMap")
        },
    );

    u.define_class(
        throwable,
        ClassDecl {
            interfaces: vec![TypeExpr::class(serializable)],
            methods: vec![MethodDecl::new("getMessage", vec![], TypeExpr::class(string))],
            ..ClassDecl::class("java.lang.Throwable")
        },
    );
    u.define_class(
        exception,
        ClassDecl {
            super_class: Some(TypeExpr::class(throwable)),
            ..ClassDecl::class("java.lang.Exception")
        },
    );
    u.define_class(
        runtime_exception,
        ClassDecl {
            super_class: Some(TypeExpr::class(exception)),
            ..ClassDecl::class("java.lang.RuntimeException")
        },
    );
    u.define_class(
        io_exception,
        ClassDecl {
            super_class: Some(TypeExpr::class(exception)),
            ..ClassDecl::class("java.io.IOException")
        },
    );

    u.define_class(
        type_literal,
        ClassDecl {
            type_params: params(&["T"]),
            ..ClassDecl::class(TYPE_LITERAL_CLASS)
        },
    );
}
