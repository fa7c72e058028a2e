use nova_generics::{
    build_hierarchy, is_types_match, BindingTable, DeclaredType, PrimitiveType, ResolverVariant,
    TypeAnnotation, TypeDescriptor, TypeExpr, TypeResolver,
};
use pretty_assertions::assert_eq;

use super::fixtures::{desc, fixture, id, var};

#[test]
fn resolving_twice_yields_equal_descriptors() {
    let fx = fixture();
    let u = &fx.universe;
    let args = vec![
        desc(u, "java.lang.Short", vec![]),
        desc(u, "java.lang.Long", vec![]),
    ];
    let expr = &u.class(fx.boxed).unwrap().fields[0].ty;

    let first = {
        let hierarchy = build_hierarchy(u, &DeclaredType::Class(fx.boxed), &args).unwrap();
        let table = hierarchy.table_for_class(fx.boxed).unwrap();
        TypeResolver::new(u).resolve(table, expr).unwrap()
    };
    let second = {
        let hierarchy = build_hierarchy(u, &DeclaredType::Class(fx.boxed), &args).unwrap();
        let table = hierarchy.table_for_class(fx.boxed).unwrap();
        TypeResolver::new(u).resolve(table, expr).unwrap()
    };
    assert_eq!(first, second);
}

#[test]
fn parameterized_member_substitutes_in_order() {
    let fx = fixture();
    let u = &fx.universe;
    let short = desc(u, "java.lang.Short", vec![]);
    let long = desc(u, "java.lang.Long", vec![]);
    let hierarchy = build_hierarchy(
        u,
        &DeclaredType::Class(fx.boxed),
        &[short.clone(), long.clone()],
    )
    .unwrap();
    let table = hierarchy.table_for_class(fx.boxed).unwrap();

    let entries = &u.class(fx.boxed).unwrap().fields[0].ty;
    let resolved = TypeResolver::new(u).resolve(table, entries).unwrap();
    assert_eq!(resolved, desc(u, "java.util.Map", vec![short, long]));
    assert_eq!(
        resolved.display(u).to_string(),
        "java.util.Map<java.lang.Short, java.lang.Long>"
    );
}

#[test]
fn unbound_references_default_to_object_at_any_depth() {
    let fx = fixture();
    let u = &fx.universe;
    let list = id(u, "java.util.List");
    let table = BindingTable::empty(fx.boxed);
    let resolver = TypeResolver::new(u);

    assert_eq!(
        resolver.resolve(&table, &var(fx.boxed, 0)).unwrap(),
        TypeDescriptor::OBJECT
    );

    let nested = TypeExpr::parameterized(
        list,
        vec![TypeExpr::parameterized(
            list,
            vec![TypeExpr::annotated(
                vec![TypeAnnotation::new("javax.annotation.Nonnull")],
                var(fx.boxed, 1),
            )],
        )],
    );
    let resolved = resolver.resolve(&table, &nested).unwrap();
    assert_eq!(
        resolved,
        TypeDescriptor::class(
            list,
            vec![TypeDescriptor::class(list, vec![TypeDescriptor::OBJECT])]
        )
    );
}

#[test]
fn generic_array_round_trips_its_component() {
    let fx = fixture();
    let u = &fx.universe;
    let integer = desc(u, "java.lang.Integer", vec![]);
    let hierarchy = build_hierarchy(
        u,
        &DeclaredType::Class(fx.boxed),
        &[integer.clone(), integer.clone()],
    )
    .unwrap();
    let table = hierarchy.table_for_class(fx.boxed).unwrap();
    let resolver = TypeResolver::new(u);

    let firsts = &u.class(fx.boxed).unwrap().fields[1].ty;
    assert_eq!(resolver.pick(firsts).unwrap(), ResolverVariant::GenericArray);
    let resolved = resolver.resolve(table, firsts).unwrap();
    assert_eq!(
        resolved.declared_type(),
        &DeclaredType::array_of(integer.declared_type().clone())
    );
    assert_eq!(resolved.generic_arguments(), &[integer]);
    assert_eq!(resolved.display(u).to_string(), "java.lang.Integer[]");
}

#[test]
fn primitive_array_carries_its_component() {
    let fx = fixture();
    let u = &fx.universe;
    let int = TypeDescriptor::primitive(PrimitiveType::Int);
    let expr = TypeExpr::array(TypeExpr::primitive(PrimitiveType::Int));
    let resolver = TypeResolver::new(u);

    assert_eq!(resolver.pick(&expr).unwrap(), ResolverVariant::Declared);
    let resolved = resolver.resolve(&BindingTable::empty(fx.boxed), &expr).unwrap();
    assert_eq!(resolved, TypeDescriptor::array(int.clone()));
    assert_eq!(resolved.generic_arguments(), &[int]);
    assert_eq!(resolved.display(u).to_string(), "int[]");
}

#[test]
fn wildcard_differs_from_its_bound_only_by_the_flag() {
    let fx = fixture();
    let u = &fx.universe;
    let number = desc(u, "java.lang.Number", vec![]);
    let expr = TypeExpr::wildcard_extends(TypeExpr::class(id(u, "java.lang.Number")));

    let resolved = TypeResolver::new(u)
        .resolve(&BindingTable::empty(fx.boxed), &expr)
        .unwrap();
    assert!(resolved.is_bounded_unknown());
    assert_eq!(resolved.declared_type(), number.declared_type());
    assert_eq!(resolved.generic_arguments(), number.generic_arguments());
    assert_ne!(resolved, number);

    assert!(is_types_match(u, &resolved, &number));
    assert!(!is_types_match(u, &number, &resolved));
}

#[test]
fn unbounded_wildcard_resolves_to_object() {
    let fx = fixture();
    let u = &fx.universe;
    let resolved = TypeResolver::new(u)
        .resolve(&BindingTable::empty(fx.boxed), &TypeExpr::wildcard())
        .unwrap();
    assert_eq!(resolved, TypeDescriptor::bounded_unknown(TypeDescriptor::OBJECT));
    assert_eq!(resolved.display(u).to_string(), "? java.lang.Object");
}
