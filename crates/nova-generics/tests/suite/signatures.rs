use nova_classfile::{RawClass, RawMember, ACC_PUBLIC};
use nova_generics::{
    build_hierarchy, DeclaredType, GenericsResolver, LookupError, ResolutionError,
    ResolverConfig, SignatureLoader, TypeDescriptor, TypeParamSlot, TypeUniverse,
};
use pretty_assertions::assert_eq;

use super::fixtures::{desc, id};

fn class(name: &str, signature: &str) -> RawClass {
    RawClass {
        internal_name: name.to_string(),
        access_flags: ACC_PUBLIC,
        super_class: Some("java/lang/Object".to_string()),
        signature: Some(signature.to_string()),
        ..RawClass::default()
    }
}

/// ```java
/// class Parent<P> { P value; <R extends P> R narrow(Iterable<? super P> source) }
/// class Child<T> extends Parent<List<T>> {}
/// ```
fn parent_and_child() -> Vec<RawClass> {
    let mut parent = class("com/example/Parent", "<P:Ljava/lang/Object;>Ljava/lang/Object;");
    parent.fields = vec![RawMember {
        name: "value".to_string(),
        descriptor: "Ljava/lang/Object;".to_string(),
        signature: Some("TP;".to_string()),
        ..RawMember::default()
    }];
    parent.methods = vec![RawMember {
        name: "narrow".to_string(),
        descriptor: "(Ljava/lang/Iterable;)Ljava/lang/Object;".to_string(),
        signature: Some("<R:TP;>(Ljava/lang/Iterable<-TP;>;)TR;".to_string()),
        ..RawMember::default()
    }];

    let mut child = class(
        "com/example/Child",
        "<T:Ljava/lang/Object;>Lcom/example/Parent<Ljava/util/List<TT;>;>;",
    );
    child.super_class = Some("com/example/Parent".to_string());

    // Child first: the batch must resolve forward references.
    vec![child, parent]
}

fn load(universe: &mut TypeUniverse) {
    let stubs = parent_and_child()
        .iter()
        .map(|raw| raw.stub().unwrap())
        .collect::<Vec<_>>();
    SignatureLoader::new(universe).load_all(&stubs);
}

#[test]
fn loaded_child_propagates_into_loaded_parent() {
    let mut u = TypeUniverse::with_minimal_jdk();
    load(&mut u);
    let child = id(&u, "com.example.Child");
    let parent = id(&u, "com.example.Parent");
    let character = desc(&u, "java.lang.Character", vec![]);

    let hierarchy = build_hierarchy(&u, &DeclaredType::Class(child), &[character.clone()]).unwrap();
    assert_eq!(
        hierarchy
            .table_for_class(parent)
            .unwrap()
            .get(TypeParamSlot::class(parent, 0)),
        Some(&desc(&u, "java.util.List", vec![character]))
    );
}

#[test]
fn loaded_members_resolve_through_the_facade() {
    let mut u = TypeUniverse::with_minimal_jdk();
    load(&mut u);
    let child = id(&u, "com.example.Child");
    let parent = id(&u, "com.example.Parent");
    let string = desc(&u, "java.lang.String", vec![]);
    let list_of_strings = desc(&u, "java.util.List", vec![string.clone()]);
    let owner = TypeDescriptor::class(child, vec![string]);

    let resolver = GenericsResolver::new(&u, ResolverConfig::default());
    assert_eq!(resolver.field_type(&owner, "value").unwrap(), list_of_strings);

    let narrow = resolver.find_method(child, "narrow", 1).unwrap();
    assert_eq!(narrow.class, parent);
    let signature = resolver.method_signature(&owner, narrow).unwrap();
    assert_eq!(
        signature.parameters,
        vec![desc(
            &u,
            "java.lang.Iterable",
            vec![TypeDescriptor::bounded_unknown(list_of_strings)]
        )]
    );
    // `R` is a method type parameter and nothing binds it.
    assert_eq!(signature.return_type, TypeDescriptor::OBJECT);
}

#[test]
fn malformed_signature_is_reported_by_the_loader() {
    let mut u = TypeUniverse::with_minimal_jdk();
    let broken = class("com/example/Broken", "<T:Ljava/lang/Object;>Ljava/lang/Object");
    let err = SignatureLoader::new(&mut u).load_raw(&broken).unwrap_err();
    assert!(
        matches!(err, nova_classfile::Error::InvalidSignature { .. }),
        "{err:?}"
    );
    assert_eq!(u.class_id("com.example.Broken"), None);
}

/// ```java
/// class Outer<T> { class Inner { T get(); U stray(); } }
/// ```
fn outer_and_inner(u: &mut TypeUniverse) {
    let outer = class("com/example/Outer", "<T:Ljava/lang/Object;>Ljava/lang/Object;");
    let mut inner = RawClass {
        internal_name: "com/example/Outer$Inner".to_string(),
        access_flags: ACC_PUBLIC,
        super_class: Some("java/lang/Object".to_string()),
        ..RawClass::default()
    };
    inner.methods = vec![
        RawMember {
            name: "get".to_string(),
            descriptor: "()Ljava/lang/Object;".to_string(),
            signature: Some("()TT;".to_string()),
            ..RawMember::default()
        },
        RawMember {
            name: "stray".to_string(),
            descriptor: "()Ljava/lang/Object;".to_string(),
            signature: Some("()TU;".to_string()),
            ..RawMember::default()
        },
    ];
    let stubs = [outer, inner]
        .iter()
        .map(|raw| raw.stub().unwrap())
        .collect::<Vec<_>>();
    SignatureLoader::new(u).load_all(&stubs);
}

#[test]
fn enclosing_class_variables_follow_the_unbound_policy() {
    let mut u = TypeUniverse::with_minimal_jdk();
    outer_and_inner(&mut u);
    let outer = id(&u, "com.example.Outer");
    let inner = id(&u, "com.example.Outer$Inner");
    let owner = TypeDescriptor::class(inner, vec![]);

    let lenient = GenericsResolver::new(&u, ResolverConfig::default());
    let get = lenient.find_method(inner, "get", 0).unwrap();
    let stray = lenient.find_method(inner, "stray", 0).unwrap();
    assert_eq!(
        lenient.method_return_type(&owner, get).unwrap(),
        TypeDescriptor::OBJECT
    );
    assert_eq!(
        lenient.method_return_type(&owner, stray).unwrap(),
        TypeDescriptor::OBJECT
    );

    let strict = GenericsResolver::new(&u, ResolverConfig::strict());
    assert_eq!(
        strict.method_return_type(&owner, get),
        Err(LookupError::Resolution(
            ResolutionError::UnboundTypeParameter {
                name: "com.example.Outer.T".to_string(),
                slot: TypeParamSlot::class(outer, 0),
            }
        ))
    );
}
