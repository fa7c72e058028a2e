#![no_main]

//! Loads an arbitrary class (a class signature line, then one method signature per line) into
//! the JDK subset, walks its hierarchy with every argument bound to `String` and resolves each
//! method against that instantiation. Must never panic or recurse without bound.

use libfuzzer_sys::fuzz_target;
use nova_classfile::{RawClass, RawMember, ACC_PUBLIC};
use nova_generics::{
    build_hierarchy, DeclaredType, GenericsResolver, MethodId, ResolverConfig, SignatureLoader,
    TypeDescriptor, TypeUniverse,
};

mod utils;

fuzz_target!(|data: &[u8]| {
    let (signature, methods) = utils::split_signatures(utils::signature_text(data));
    let raw = RawClass {
        internal_name: "fuzz/Target".to_string(),
        access_flags: ACC_PUBLIC,
        super_class: Some("java/lang/Object".to_string()),
        signature: Some(signature.to_string()),
        methods: methods
            .iter()
            .enumerate()
            .map(|(idx, sig)| RawMember {
                name: format!("m{idx}"),
                descriptor: "()V".to_string(),
                signature: Some(sig.to_string()),
                ..RawMember::default()
            })
            .collect(),
        ..RawClass::default()
    };

    let mut universe = TypeUniverse::with_minimal_jdk();
    let Ok(id) = SignatureLoader::new(&mut universe).load_raw(&raw) else {
        return;
    };
    let Some(string) = universe.class_id("java.lang.String") else {
        return;
    };
    let Some(decl) = universe.class(id) else {
        return;
    };
    let args = vec![TypeDescriptor::class(string, Vec::new()); decl.type_params.len()];
    let _ = build_hierarchy(&universe, &DeclaredType::Class(id), &args);

    let owner = TypeDescriptor::class(id, args);
    let resolver = GenericsResolver::new(&universe, ResolverConfig::default());
    for index in 0..decl.methods.len() {
        let method = MethodId {
            class: id,
            index: index as u32,
        };
        let _ = resolver.method_signature(&owner, method);
    }
});
