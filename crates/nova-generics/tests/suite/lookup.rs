use nova_generics::{
    ClassDecl, GenericsResolver, HierarchyError, LookupError, MethodDecl, PrimitiveType,
    ResolutionError, ResolverConfig, TypeDescriptor, TypeExpr, TypeParamDecl, TypeUniverse,
    TYPE_LITERAL_CLASS,
};
use pretty_assertions::assert_eq;

use super::fixtures::{desc, fixture, id, var};

#[test]
fn field_types_are_seen_through_the_owner_instantiation() {
    let fx = fixture();
    let u = &fx.universe;
    let resolver = GenericsResolver::new(u, ResolverConfig::default());
    let character = desc(u, "java.lang.Character", vec![]);
    let owner = TypeDescriptor::class(fx.child, vec![character.clone()]);

    assert_eq!(
        resolver.field_type(&owner, "value").unwrap(),
        desc(u, "java.util.List", vec![character])
    );
    assert_eq!(
        resolver.field_type(&owner, "missing"),
        Err(LookupError::NoSuchField {
            class: "com.example.Child<java.lang.Character>".to_string(),
            field: "missing".to_string(),
        })
    );
}

#[test]
fn inherited_methods_resolve_against_the_declaring_ancestor() {
    let u = TypeUniverse::with_minimal_jdk();
    let resolver = GenericsResolver::new(&u, ResolverConfig::default());
    let string = desc(&u, "java.lang.String", vec![]);
    let array_list = id(&u, "java.util.ArrayList");
    let owner = TypeDescriptor::class(array_list, vec![string.clone()]);

    let get = resolver.find_method(array_list, "get", 1).unwrap();
    assert_eq!(get.class, id(&u, "java.util.List"));
    assert_eq!(
        resolver.method_parameter_types(&owner, get).unwrap(),
        vec![TypeDescriptor::primitive(PrimitiveType::Int)]
    );
    assert_eq!(resolver.method_return_type(&owner, get).unwrap(), string);

    let add_all = resolver.find_method(array_list, "addAll", 1).unwrap();
    let parameters = resolver.method_parameter_types(&owner, add_all).unwrap();
    assert_eq!(
        parameters[0].display(&u).to_string(),
        "java.util.Collection<? java.lang.String>"
    );
}

#[test]
fn map_methods_bind_both_parameters() {
    let u = TypeUniverse::with_minimal_jdk();
    let resolver = GenericsResolver::new(&u, ResolverConfig::default());
    let string = desc(&u, "java.lang.String", vec![]);
    let integer = desc(&u, "java.lang.Integer", vec![]);
    let hash_map = id(&u, "java.util.HashMap");
    let owner = TypeDescriptor::class(hash_map, vec![string.clone(), integer.clone()]);

    let put = resolver.find_method(hash_map, "put", 2).unwrap();
    let signature = resolver.method_signature(&owner, put).unwrap();
    assert_eq!(signature.parameters, vec![string, integer.clone()]);
    assert_eq!(signature.return_type, integer);
}

#[test]
fn thrown_type_variables_are_substituted() {
    let mut u = TypeUniverse::with_minimal_jdk();
    let exception = id(&u, "java.lang.Exception");
    let reader = u.intern_class_id("com.example.Reader");
    u.define_class(
        reader,
        ClassDecl {
            type_params: vec![TypeParamDecl::bounded("X", vec![TypeExpr::class(exception)])],
            methods: vec![MethodDecl {
                exceptions: vec![var(reader, 0)],
                ..MethodDecl::new("read", vec![], TypeExpr::void())
            }],
            ..ClassDecl::interface("com.example.Reader")
        },
    );
    let resolver = GenericsResolver::new(&u, ResolverConfig::default());
    let io_exception = desc(&u, "java.io.IOException", vec![]);
    let owner = TypeDescriptor::class(reader, vec![io_exception.clone()]);

    let read = resolver.find_method(reader, "read", 0).unwrap();
    assert_eq!(
        resolver.method_exception_types(&owner, read).unwrap(),
        vec![io_exception]
    );
    assert_eq!(
        resolver.method_return_type(&owner, read).unwrap(),
        TypeDescriptor::void()
    );
}

fn literal_universe() -> TypeUniverse {
    let mut u = TypeUniverse::with_minimal_jdk();
    let type_literal = id(&u, TYPE_LITERAL_CLASS);
    let list = id(&u, "java.util.List");
    let string = id(&u, "java.lang.String");

    // new TypeLiteral<List<String>>() {}
    u.add_class(ClassDecl {
        super_class: Some(TypeExpr::parameterized(
            type_literal,
            vec![TypeExpr::parameterized(list, vec![TypeExpr::class(string)])],
        )),
        ..ClassDecl::class("com.example.Main$1")
    });

    // class Holder<T> { TypeLiteral<T> literal = new TypeLiteral<T>() {}; }
    let holder = u.add_class(ClassDecl {
        type_params: vec![TypeParamDecl::new("T")],
        ..ClassDecl::class("com.example.Holder")
    });
    u.add_class(ClassDecl {
        super_class: Some(TypeExpr::parameterized(type_literal, vec![var(holder, 0)])),
        ..ClassDecl::class("com.example.Holder$1")
    });
    u
}

#[test]
fn type_literal_captures_its_argument() {
    let u = literal_universe();
    let resolver = GenericsResolver::new(&u, ResolverConfig::default());
    let literal = id(&u, "com.example.Main$1");

    let captured = resolver.capture(literal).unwrap();
    assert_eq!(
        captured,
        desc(
            &u,
            "java.util.List",
            vec![desc(&u, "java.lang.String", vec![])]
        )
    );
}

#[test]
fn type_literal_over_a_type_variable_follows_the_unbound_policy() {
    let u = literal_universe();
    let literal = id(&u, "com.example.Holder$1");

    let lenient = GenericsResolver::new(&u, ResolverConfig::default());
    assert_eq!(lenient.capture(literal).unwrap(), TypeDescriptor::OBJECT);

    let strict = GenericsResolver::new(&u, ResolverConfig::strict());
    assert!(matches!(
        strict.capture(literal),
        Err(LookupError::Resolution(ResolutionError::UnboundTypeParameter { ref name, .. }))
            if name == "com.example.Holder.T"
    ));
}

#[test]
fn type_literal_base_itself_captures_nothing() {
    let u = literal_universe();
    let resolver = GenericsResolver::new(&u, ResolverConfig::default());
    let base = id(&u, TYPE_LITERAL_CLASS);

    assert_eq!(
        resolver.capture(base),
        Err(LookupError::NotATypeLiteral {
            class: TYPE_LITERAL_CLASS.to_string(),
        })
    );
}

#[test]
fn strict_mode_reports_missing_owner_arguments() {
    let fx = fixture();
    let u = &fx.universe;
    let resolver = GenericsResolver::new(u, ResolverConfig::strict());
    let raw_child = TypeDescriptor::class(fx.child, vec![]);

    let err = resolver.field_type(&raw_child, "value").unwrap_err();
    assert!(
        matches!(
            err,
            LookupError::Hierarchy(HierarchyError::Resolution(
                ResolutionError::UnboundTypeParameter { .. }
            ))
        ),
        "{err:?}"
    );
}
