#![no_main]

use libfuzzer_sys::fuzz_target;

mod utils;

fuzz_target!(|data: &[u8]| {
    let text = utils::signature_text(data);
    let _ = nova_classfile::parse_class_signature(text);
    let _ = nova_classfile::parse_method_signature(text);
    let _ = nova_classfile::parse_field_signature(text);
    let _ = nova_classfile::parse_field_descriptor(text);
    let _ = nova_classfile::parse_method_descriptor(text);
});
