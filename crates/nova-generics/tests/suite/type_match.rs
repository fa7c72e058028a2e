use nova_generics::{
    is_types_match, ClassDecl, PrimitiveType, TypeDescriptor, TypeExpr, TypeUniverse,
};

use super::fixtures::{desc, id};

#[test]
fn match_is_asymmetric_along_the_class_hierarchy() {
    let u = TypeUniverse::with_minimal_jdk();
    let object = TypeDescriptor::OBJECT;
    let boolean = desc(&u, "java.lang.Boolean", vec![]);
    let number = desc(&u, "java.lang.Number", vec![]);
    let long = desc(&u, "java.lang.Long", vec![]);

    assert!(is_types_match(&u, &object, &boolean));
    assert!(!is_types_match(&u, &boolean, &object));
    assert!(is_types_match(&u, &number, &long));
    assert!(!is_types_match(&u, &long, &number));
}

#[test]
fn primitives_match_their_wrappers_in_both_directions() {
    let u = TypeUniverse::with_minimal_jdk();
    for primitive in PrimitiveType::ALL {
        let unboxed = TypeDescriptor::primitive(primitive);
        let boxed = desc(&u, primitive.boxed_name(), vec![]);
        assert!(is_types_match(&u, &unboxed, &boxed), "{}", primitive.java_name());
        assert!(is_types_match(&u, &boxed, &unboxed), "{}", primitive.java_name());
    }

    let long = TypeDescriptor::primitive(PrimitiveType::Long);
    let number = desc(&u, "java.lang.Number", vec![]);
    assert!(is_types_match(&u, &number, &long));
    assert!(!is_types_match(&u, &long, &number));
}

#[test]
fn interfaces_accept_implementors() {
    let u = TypeUniverse::with_minimal_jdk();
    let string = desc(&u, "java.lang.String", vec![]);
    let char_sequence = desc(&u, "java.lang.CharSequence", vec![]);
    let comparable_string = desc(&u, "java.lang.Comparable", vec![string.clone()]);
    let comparable_long = desc(
        &u,
        "java.lang.Comparable",
        vec![desc(&u, "java.lang.Long", vec![])],
    );

    assert!(is_types_match(&u, &char_sequence, &string));
    assert!(is_types_match(&u, &comparable_string, &string));
    assert!(!is_types_match(&u, &string, &char_sequence));
    // `String` declares no parameters; seen as a `Comparable` it is `Comparable<String>`.
    assert!(!is_types_match(&u, &comparable_long, &string));
}

#[test]
fn non_generic_subclasses_carry_their_supertype_arguments() {
    let mut u = TypeUniverse::with_minimal_jdk();
    let array_list = id(&u, "java.util.ArrayList");
    let integer = desc(&u, "java.lang.Integer", vec![]);
    let string = desc(&u, "java.lang.String", vec![]);
    let int_list = u.add_class(ClassDecl {
        super_class: Some(TypeExpr::parameterized(
            array_list,
            vec![TypeExpr::class(id(&u, "java.lang.Integer"))],
        )),
        ..ClassDecl::class("com.example.IntList")
    });
    let int_list = TypeDescriptor::class(int_list, vec![]);
    let list_of_integers = desc(&u, "java.util.List", vec![integer.clone()]);
    let list_of_strings = desc(&u, "java.util.List", vec![string]);
    let raw_list = desc(&u, "java.util.List", vec![]);

    assert!(is_types_match(&u, &list_of_integers, &int_list));
    assert!(!is_types_match(&u, &list_of_strings, &int_list));
    assert!(is_types_match(&u, &raw_list, &int_list));

    // Primitives are viewed through their wrapper.
    let comparable_integer = desc(&u, "java.lang.Comparable", vec![integer]);
    let int = TypeDescriptor::primitive(PrimitiveType::Int);
    assert!(is_types_match(&u, &comparable_integer, &int));
}

#[test]
fn bounded_unknown_candidates_need_a_bounded_unknown_acceptor() {
    let u = TypeUniverse::with_minimal_jdk();
    let number = desc(&u, "java.lang.Number", vec![]);
    let long = desc(&u, "java.lang.Long", vec![]);
    let some_number = TypeDescriptor::bounded_unknown(number.clone());
    let some_long = TypeDescriptor::bounded_unknown(long);

    assert!(is_types_match(&u, &some_number, &some_long));
    assert!(is_types_match(&u, &TypeDescriptor::OBJECT, &some_long));
    assert!(!is_types_match(&u, &number, &some_long));
}
