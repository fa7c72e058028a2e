//! The asymmetric "type match" relation between resolved descriptors.
//!
//! `is_types_match(acceptor, candidate)` answers whether a value described by `candidate` fits a
//! position described by `acceptor`. It is a lenient compatibility check, not assignability in
//! the JLS sense: generic arguments are compared covariantly and primitives match their
//! wrappers in both directions.

use crate::descriptor::TypeDescriptor;
use crate::hierarchy::build_hierarchy;
use crate::model::{ClassId, DeclaredType, TypeParamSlot, TypeUniverse};
use crate::resolver::slot_index;

pub fn is_types_match(
    universe: &TypeUniverse,
    acceptor: &TypeDescriptor,
    candidate: &TypeDescriptor,
) -> bool {
    if candidate.is_bounded_unknown() && !acceptor.is_bounded_unknown() && !acceptor.is_top() {
        return false;
    }

    let acceptor_type = boxed(universe, acceptor.declared_type());
    let candidate_type = boxed(universe, candidate.declared_type());
    if !is_assignable(universe, &acceptor_type, &candidate_type) {
        return false;
    }

    arguments_match(universe, acceptor, candidate)
}

/// Whether `candidate` is `acceptor` or a subtype of it, ignoring generic arguments.
pub fn is_assignable(
    universe: &TypeUniverse,
    acceptor: &DeclaredType,
    candidate: &DeclaredType,
) -> bool {
    if acceptor == candidate {
        return true;
    }
    match (acceptor, candidate) {
        (DeclaredType::Primitive(_) | DeclaredType::Void, _)
        | (_, DeclaredType::Primitive(_) | DeclaredType::Void) => false,
        (DeclaredType::Class(ClassId::OBJECT), _) => true,
        (DeclaredType::Class(acceptor), DeclaredType::Array(_)) => universe
            .class_name(*acceptor)
            .is_some_and(|name| name == "java.lang.Cloneable" || name == "java.io.Serializable"),
        (DeclaredType::Array(a), DeclaredType::Array(c)) => {
            if a.is_primitive_like() || c.is_primitive_like() {
                a == c
            } else {
                is_assignable(universe, a, c)
            }
        }
        (DeclaredType::Array(_), DeclaredType::Class(_)) => false,
        (DeclaredType::Class(a), DeclaredType::Class(c)) => universe.is_subclass(*c, *a),
    }
}

/// Primitive (and `void`) declared types replaced by their wrapper class when the universe
/// declares it.
pub fn boxed(universe: &TypeUniverse, declared: &DeclaredType) -> DeclaredType {
    let wrapper = match declared {
        DeclaredType::Primitive(p) => universe.class_id(p.boxed_name()),
        DeclaredType::Void => universe.class_id("java.lang.Void"),
        _ => None,
    };
    wrapper
        .map(DeclaredType::Class)
        .unwrap_or_else(|| declared.clone())
}

fn arguments_match(
    universe: &TypeUniverse,
    acceptor: &TypeDescriptor,
    candidate: &TypeDescriptor,
) -> bool {
    let acceptor_args = acceptor.generic_arguments();
    if acceptor_args.is_empty() || is_raw(universe, candidate) {
        return true;
    }

    let candidate_args = match acceptor.declared_type() {
        DeclaredType::Class(id) if candidate.declared_type() != acceptor.declared_type() => {
            let candidate = match boxed(universe, candidate.declared_type()) {
                DeclaredType::Class(wrapper) if candidate.declared_type().is_primitive_like() => {
                    TypeDescriptor::class(wrapper, vec![])
                }
                _ => candidate.clone(),
            };
            match view_as(universe, &candidate, *id) {
                Some(args) => args,
                None => return false,
            }
        }
        _ => candidate.generic_arguments().to_vec(),
    };

    acceptor_args.len() == candidate_args.len()
        && acceptor_args
            .iter()
            .zip(&candidate_args)
            .all(|(a, c)| is_types_match(universe, a, c))
}

/// A generic class used without arguments. A class that declares no type parameters is not
/// raw: its supertypes still carry whatever arguments its declaration gives them.
fn is_raw(universe: &TypeUniverse, ty: &TypeDescriptor) -> bool {
    if !ty.generic_arguments().is_empty() {
        return false;
    }
    match ty.declared_type() {
        DeclaredType::Class(id) => universe
            .class(*id)
            .is_some_and(|decl| !decl.type_params.is_empty()),
        _ => false,
    }
}

/// Arguments of `candidate` as seen through its ancestor `target`.
fn view_as(
    universe: &TypeUniverse,
    candidate: &TypeDescriptor,
    target: ClassId,
) -> Option<Vec<TypeDescriptor>> {
    let hierarchy = match build_hierarchy(
        universe,
        candidate.declared_type(),
        candidate.generic_arguments(),
    ) {
        Ok(hierarchy) => hierarchy,
        Err(err) => {
            tracing::debug!(
                target = "nova.generics",
                error = %err,
                "failed to build candidate hierarchy for type match"
            );
            return None;
        }
    };
    let table = hierarchy.table_for_class(target).ok()?;
    let params = universe.class(target)?.type_params.len();
    Some(
        (0..params)
            .map(|idx| {
                table
                    .get(TypeParamSlot::class(target, slot_index(idx)))
                    .cloned()
                    .unwrap_or(TypeDescriptor::OBJECT)
            })
            .collect(),
    )
}
