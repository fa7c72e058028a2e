//! Class-file stubs to [`ClassDecl`]s.
//!
//! Generic signatures are preferred; members without one fall back to their erased
//! descriptor. Class names the universe does not know become [`TypeExpr::Unresolved`], so a
//! batch should go through [`SignatureLoader::load_all`], which interns every name up front.

use nova_classfile::{
    BaseType, ClassStub, ClassTypeSignature, FieldStub, FieldType, MethodStub, RawClass,
    ReturnType, TypeArgument, TypeParameter, TypeSignature, ACC_STATIC,
};

use crate::expr::TypeExpr;
use crate::model::{
    ClassDecl, ClassId, ClassKind, FieldDecl, MethodDecl, MethodId, PrimitiveType,
    TypeParamDecl, TypeParamSlot, TypeUniverse,
};
use crate::resolver::slot_index;

const OBJECT_INTERNAL_NAME: &str = "java/lang/Object";

impl From<BaseType> for PrimitiveType {
    fn from(base: BaseType) -> Self {
        match base {
            BaseType::Boolean => PrimitiveType::Boolean,
            BaseType::Byte => PrimitiveType::Byte,
            BaseType::Char => PrimitiveType::Char,
            BaseType::Short => PrimitiveType::Short,
            BaseType::Int => PrimitiveType::Int,
            BaseType::Long => PrimitiveType::Long,
            BaseType::Float => PrimitiveType::Float,
            BaseType::Double => PrimitiveType::Double,
        }
    }
}

/// `java/util/Map$Entry` -> `java.util.Map$Entry`.
pub fn binary_name(internal_name: &str) -> String {
    internal_name.replace('/', ".")
}

pub struct SignatureLoader<'a> {
    universe: &'a mut TypeUniverse,
}

impl<'a> SignatureLoader<'a> {
    pub fn new(universe: &'a mut TypeUniverse) -> Self {
        Self { universe }
    }

    pub fn load_raw(&mut self, class: &RawClass) -> Result<ClassId, nova_classfile::Error> {
        let stub = class.stub()?;
        Ok(self.load(&stub))
    }

    /// Loads a batch of classes that may reference each other in any order.
    pub fn load_all(&mut self, stubs: &[ClassStub]) -> Vec<ClassId> {
        for stub in stubs {
            self.universe
                .intern_class_id(&binary_name(&stub.internal_name));
        }
        stubs.iter().map(|stub| self.load(stub)).collect()
    }

    /// Declares (or redeclares) the class described by `stub`.
    pub fn load(&mut self, stub: &ClassStub) -> ClassId {
        let name = binary_name(&stub.internal_name);
        let id = self.universe.intern_class_id(&name);
        let decl = DeclConverter {
            universe: &*self.universe,
            class: id,
        }
        .class_decl(name, stub);

        tracing::debug!(
            target = "nova.generics",
            class = %decl.name,
            type_params = decl.type_params.len(),
            fields = decl.fields.len(),
            methods = decl.methods.len(),
            "loaded class stub"
        );
        self.universe.define_class(id, decl);
        id
    }
}

struct DeclConverter<'u> {
    universe: &'u TypeUniverse,
    class: ClassId,
}

/// Type variables visible at one point of a declaration. Method variables shadow class
/// variables of the same name.
struct Scope<'n> {
    class: ClassId,
    class_vars: &'n [String],
    method: Option<(MethodId, &'n [String])>,
}

impl Scope<'_> {
    fn lookup(&self, name: &str) -> Option<TypeParamSlot> {
        if let Some((method, vars)) = self.method {
            if let Some(idx) = vars.iter().position(|v| v == name) {
                return Some(TypeParamSlot::method(method, slot_index(idx)));
            }
        }
        self.class_vars
            .iter()
            .position(|v| v == name)
            .map(|idx| TypeParamSlot::class(self.class, slot_index(idx)))
    }
}

fn param_names(params: &[TypeParameter]) -> Vec<String> {
    params.iter().map(|p| p.name.clone()).collect()
}

impl DeclConverter<'_> {
    fn class_decl(&self, name: String, stub: &ClassStub) -> ClassDecl {
        let signature = stub.signature.as_ref();
        let class_vars = signature
            .map(|sig| param_names(&sig.type_parameters))
            .unwrap_or_default();
        let scope = Scope {
            class: self.class,
            class_vars: &class_vars,
            method: None,
        };

        let type_params = signature
            .map(|sig| self.type_params(&sig.type_parameters, &scope))
            .unwrap_or_default();

        let kind = if stub.is_interface() {
            ClassKind::Interface
        } else {
            ClassKind::Class
        };

        let super_class = match (kind, signature) {
            (ClassKind::Interface, _) => None,
            _ if stub.internal_name == OBJECT_INTERNAL_NAME => None,
            (ClassKind::Class, Some(sig)) => Some(self.class_type(&sig.super_class, &scope)),
            (ClassKind::Class, None) => stub.super_class.as_deref().map(|s| self.class_ref(s)),
        };

        let interfaces = match signature {
            Some(sig) => sig
                .interfaces
                .iter()
                .map(|iface| self.class_type(iface, &scope))
                .collect(),
            None => stub.interfaces.iter().map(|i| self.class_ref(i)).collect(),
        };

        let fields = stub.fields.iter().map(|f| self.field(f, &scope)).collect();

        let methods = stub
            .methods
            .iter()
            .filter(|m| m.name != "<clinit>")
            .enumerate()
            .map(|(idx, m)| {
                let id = MethodId {
                    class: self.class,
                    index: slot_index(idx),
                };
                self.method(id, m, &class_vars)
            })
            .collect();

        ClassDecl {
            name,
            kind,
            type_params,
            super_class,
            interfaces,
            fields,
            methods,
        }
    }

    fn field(&self, field: &FieldStub, scope: &Scope<'_>) -> FieldDecl {
        let ty = match &field.signature {
            Some(sig) => self.type_sig(sig, scope),
            None => self.field_type(&field.parsed_descriptor),
        };
        FieldDecl {
            name: field.name.clone(),
            ty,
            is_static: field.access_flags & ACC_STATIC != 0,
        }
    }

    fn method(&self, id: MethodId, method: &MethodStub, class_vars: &[String]) -> MethodDecl {
        let is_static = method.access_flags & ACC_STATIC != 0;
        let Some(sig) = &method.signature else {
            let desc = &method.parsed_descriptor;
            return MethodDecl {
                name: method.name.clone(),
                type_params: Vec::new(),
                params: desc.params.iter().map(|p| self.field_type(p)).collect(),
                return_type: match &desc.return_type {
                    ReturnType::Void => TypeExpr::void(),
                    ReturnType::Type(ty) => self.field_type(ty),
                },
                exceptions: method
                    .exceptions
                    .iter()
                    .map(|e| self.class_ref(e))
                    .collect(),
                is_static,
            };
        };

        let method_vars = param_names(&sig.type_parameters);
        let scope = Scope {
            class: self.class,
            class_vars,
            method: Some((id, &method_vars)),
        };
        let exceptions = if sig.throws.is_empty() {
            method
                .exceptions
                .iter()
                .map(|e| self.class_ref(e))
                .collect()
        } else {
            sig.throws.iter().map(|t| self.type_sig(t, &scope)).collect()
        };

        MethodDecl {
            name: method.name.clone(),
            type_params: self.type_params(&sig.type_parameters, &scope),
            params: sig
                .parameters
                .iter()
                .map(|p| self.type_sig(p, &scope))
                .collect(),
            return_type: sig
                .return_type
                .as_ref()
                .map(|r| self.type_sig(r, &scope))
                .unwrap_or_else(TypeExpr::void),
            exceptions,
            is_static,
        }
    }

    /// Bounds are converted with every parameter of the list already in scope, so
    /// `<T extends Comparable<T>>` refers to itself.
    fn type_params(&self, params: &[TypeParameter], scope: &Scope<'_>) -> Vec<TypeParamDecl> {
        params
            .iter()
            .map(|p| {
                let bounds = p
                    .class_bound
                    .iter()
                    .chain(&p.interface_bounds)
                    .map(|b| self.type_sig(b, scope))
                    .collect();
                TypeParamDecl::bounded(p.name.clone(), bounds)
            })
            .collect()
    }

    fn type_sig(&self, sig: &TypeSignature, scope: &Scope<'_>) -> TypeExpr {
        match sig {
            TypeSignature::Base(base) => TypeExpr::primitive((*base).into()),
            TypeSignature::Array(component) => TypeExpr::array(self.type_sig(component, scope)),
            TypeSignature::Class(class) => self.class_type(class, scope),
            TypeSignature::TypeVariable(name) => {
                match scope.lookup(name).or_else(|| self.enclosing_type_var(name)) {
                    Some(slot) => TypeExpr::type_var(slot),
                    None => {
                        tracing::debug!(
                            target = "nova.generics",
                            type_var = %name,
                            "type variable is not declared in scope; using java.lang.Object"
                        );
                        TypeExpr::class(ClassId::OBJECT)
                    }
                }
            }
        }
    }

    /// A variable declared by a lexically enclosing class (`Outer$Inner` sees `Outer`'s
    /// parameters). Nothing binds such a slot in the inner class's hierarchy, so it resolves
    /// through the unbound policy.
    fn enclosing_type_var(&self, name: &str) -> Option<TypeParamSlot> {
        let mut current = self.universe.class_name(self.class)?;
        while let Some((outer, _)) = current.rsplit_once('$') {
            current = outer;
            let Some(id) = self.universe.class_id(outer) else {
                continue;
            };
            let Some(decl) = self.universe.class(id) else {
                continue;
            };
            if let Some(idx) = decl.type_params.iter().position(|p| p.name == name) {
                return Some(TypeParamSlot::class(id, slot_index(idx)));
            }
        }
        None
    }

    fn class_type(&self, class: &ClassTypeSignature, scope: &Scope<'_>) -> TypeExpr {
        let internal = class.internal_name();
        let Some(id) = self.universe.class_id(&binary_name(&internal)) else {
            return TypeExpr::Unresolved(binary_name(&internal));
        };
        let args = class.type_arguments();
        if args.is_empty() {
            return TypeExpr::class(id);
        }
        let args = args.iter().map(|arg| self.type_arg(arg, scope)).collect();
        TypeExpr::parameterized(id, args)
    }

    fn type_arg(&self, arg: &TypeArgument, scope: &Scope<'_>) -> TypeExpr {
        match arg {
            TypeArgument::Any => TypeExpr::wildcard(),
            TypeArgument::Exact(ty) => self.type_sig(ty, scope),
            TypeArgument::Extends(bound) => TypeExpr::wildcard_extends(self.type_sig(bound, scope)),
            TypeArgument::Super(bound) => TypeExpr::wildcard_super(self.type_sig(bound, scope)),
        }
    }

    fn field_type(&self, ty: &FieldType) -> TypeExpr {
        match ty {
            FieldType::Base(base) => TypeExpr::primitive((*base).into()),
            FieldType::Object(internal) => self.class_ref(internal),
            FieldType::Array(component) => TypeExpr::array(self.field_type(component)),
        }
    }

    fn class_ref(&self, internal_name: &str) -> TypeExpr {
        let name = binary_name(internal_name);
        match self.universe.class_id(&name) {
            Some(id) => TypeExpr::class(id),
            None => TypeExpr::Unresolved(name),
        }
    }
}
