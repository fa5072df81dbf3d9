use crate::attributes::{Attr, Attributes};
use crate::ids::{AssemblyId, EventId, FieldId, MethodId, PropertyId, TypeId};
use crate::members::{EventDef, FieldDef, MethodDef, PropertyDef};
use crate::types::{TypeDef, TypeKind, TypeParamDef, TypeRef};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssemblyDef {
    pub id: AssemblyId,
    pub name: String,
    pub attributes: Attributes,
}

/// Handles of the well-known runtime types every compilation references.
/// Registered first by the builder, so `object` is always `TypeId(0)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoreTypes {
    pub object: TypeId,
    pub string: TypeId,
    pub boolean: TypeId,
    pub int32: TypeId,
    pub double: TypeId,
    pub char: TypeId,
    pub array: TypeId,
    pub function: TypeId,
    pub exception: TypeId,
    pub script: TypeId,
    pub nullable: TypeId,
    pub record_base: TypeId,
    pub task_completion_source: TypeId,
    pub iterator_enumerator: TypeId,
    pub iterator_enumerable: TypeId,
    pub value_type_ctor_marker: TypeId,
}

/// The read-only symbol graph the core compiles against. Built once by the
/// external resolver (or a test fixture) and never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SymbolStore {
    pub assemblies: Vec<AssemblyDef>,
    pub types: Vec<TypeDef>,
    pub methods: Vec<MethodDef>,
    pub properties: Vec<PropertyDef>,
    pub events: Vec<EventDef>,
    pub fields: Vec<FieldDef>,
    pub core: CoreTypes,
}

impl SymbolStore {
    pub fn assembly(&self, id: AssemblyId) -> &AssemblyDef {
        &self.assemblies[id.0]
    }

    pub fn type_def(&self, id: TypeId) -> &TypeDef {
        &self.types[id.0]
    }

    pub fn method(&self, id: MethodId) -> &MethodDef {
        &self.methods[id.0]
    }

    pub fn property(&self, id: PropertyId) -> &PropertyDef {
        &self.properties[id.0]
    }

    pub fn event(&self, id: EventId) -> &EventDef {
        &self.events[id.0]
    }

    pub fn field(&self, id: FieldId) -> &FieldDef {
        &self.fields[id.0]
    }

    /// All base types (classes and interfaces), nearest first, deduplicated.
    pub fn all_bases(&self, id: TypeId) -> Vec<TypeId> {
        let mut out = Vec::new();
        let mut queue = Vec::new();
        let t = self.type_def(id);
        if let Some(b) = t.base_type {
            queue.push(b);
        }
        queue.extend(t.interfaces.iter().copied());
        while let Some(b) = queue.pop() {
            if out.contains(&b) {
                continue;
            }
            out.push(b);
            let bt = self.type_def(b);
            if let Some(bb) = bt.base_type {
                queue.push(bb);
            }
            queue.extend(bt.interfaces.iter().copied());
        }
        out
    }

    pub fn is_derived_from(&self, derived: TypeId, base: TypeId) -> bool {
        self.all_bases(derived).contains(&base)
    }

    /// Source-language full name: namespace, declaring chain and simple name.
    pub fn source_full_name(&self, id: TypeId) -> String {
        let t = self.type_def(id);
        let mut segments = vec![t.name.clone()];
        let mut cur = t.declaring_type;
        while let Some(d) = cur {
            let dt = self.type_def(d);
            segments.push(dt.name.clone());
            cur = dt.declaring_type;
        }
        segments.reverse();
        let joined = segments.join(".");
        let outermost_ns = {
            let mut t = t;
            while let Some(d) = t.declaring_type {
                t = self.type_def(d);
            }
            &t.namespace
        };
        if outermost_ns.is_empty() {
            joined
        } else {
            format!("{}.{}", outermost_ns, joined)
        }
    }

    /// Stable textual rendering of a type reference, used for ordering keys.
    pub fn type_ref_name(&self, r: &TypeRef) -> String {
        match r {
            TypeRef::Def(id) => self.source_full_name(*id),
            TypeRef::Inst { def, args } => {
                let args = args
                    .iter()
                    .map(|a| self.type_ref_name(a))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{}<{}>", self.source_full_name(*def), args)
            }
            TypeRef::Param(p) => format!("!{:?}:{}", p.owner, p.index),
            TypeRef::Array { elem, rank } => {
                format!("{}[{}]", self.type_ref_name(elem), ",".repeat(rank - 1))
            }
            TypeRef::Nullable(inner) => format!("{}?", self.type_ref_name(inner)),
        }
    }
}

/// Fixture-friendly builder. The external resolver populates the store
/// through this; tests do the same.
pub struct SymbolStoreBuilder {
    store: SymbolStore,
}

impl Default for SymbolStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolStoreBuilder {
    pub fn new() -> Self {
        let runtime = AssemblyDef {
            id: AssemblyId(0),
            name: "runtime".to_string(),
            attributes: Attributes::default(),
        };
        let placeholder = CoreTypes {
            object: TypeId(0),
            string: TypeId(0),
            boolean: TypeId(0),
            int32: TypeId(0),
            double: TypeId(0),
            char: TypeId(0),
            array: TypeId(0),
            function: TypeId(0),
            exception: TypeId(0),
            script: TypeId(0),
            nullable: TypeId(0),
            record_base: TypeId(0),
            task_completion_source: TypeId(0),
            iterator_enumerator: TypeId(0),
            iterator_enumerable: TypeId(0),
            value_type_ctor_marker: TypeId(0),
        };
        let mut b = SymbolStoreBuilder {
            store: SymbolStore {
                assemblies: vec![runtime],
                types: Vec::new(),
                methods: Vec::new(),
                properties: Vec::new(),
                events: Vec::new(),
                fields: Vec::new(),
                core: placeholder,
            },
        };
        b.register_core_types();
        b
    }

    fn imported_core(attrs: Vec<Attr>) -> Attributes {
        let mut v = vec![
            Attr::Imported {
                obeys_type_system: true,
            },
            Attr::IgnoreNamespace,
        ];
        v.extend(attrs);
        Attributes::new(v)
    }

    fn core_type(&mut self, kind: TypeKind, namespace: &str, name: &str, attrs: Vec<Attr>) -> TypeId {
        self.add_type(TypeDef {
            assembly: AssemblyId(0),
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
            attributes: Self::imported_core(attrs),
            ..TypeDef::default()
        })
    }

    fn register_core_types(&mut self) {
        let object = self.core_type(TypeKind::Class, "System", "Object", vec![]);
        let string = self.core_type(TypeKind::Class, "System", "String", vec![]);
        let boolean = self.core_type(TypeKind::Struct, "System", "Boolean", vec![]);
        let int32 = self.core_type(TypeKind::Struct, "System", "Int32", vec![]);
        let double = self.core_type(TypeKind::Struct, "System", "Double", vec![]);
        let char_ = self.core_type(TypeKind::Struct, "System", "Char", vec![]);
        let array = self.core_type(TypeKind::Class, "System", "Array", vec![]);
        let function = self.core_type(TypeKind::Class, "System", "Function", vec![]);
        let exception = self.core_type(TypeKind::Class, "System", "Exception", vec![]);
        let script = self.core_type(TypeKind::Class, "System", "Script", vec![]);
        let nullable = self.core_type(TypeKind::Struct, "System", "Nullable", vec![]);
        let record_base = self.core_type(TypeKind::Class, "System", "Record", vec![]);
        let task_completion_source = self.core_type(
            TypeKind::Class,
            "System.Threading.Tasks",
            "TaskCompletionSource",
            vec![],
        );
        let iterator_enumerator = self.core_type(
            TypeKind::Class,
            "System.Runtime.CompilerServices",
            "IteratorBlockEnumerator",
            vec![],
        );
        let iterator_enumerable = self.core_type(
            TypeKind::Class,
            "System.Runtime.CompilerServices",
            "IteratorBlockEnumerable",
            vec![],
        );
        let value_type_ctor_marker = self.add_type(TypeDef {
            assembly: AssemblyId(0),
            kind: TypeKind::Struct,
            namespace: "System.Runtime.CompilerServices".to_string(),
            name: "ValueTypeConstructorMarker".to_string(),
            attributes: Attributes::new(vec![Attr::NonScriptable]),
            ..TypeDef::default()
        });
        self.store.core = CoreTypes {
            object,
            string,
            boolean,
            int32,
            double,
            char: char_,
            array,
            function,
            exception,
            script,
            nullable,
            record_base,
            task_completion_source,
            iterator_enumerator,
            iterator_enumerable,
            value_type_ctor_marker,
        };
    }

    pub fn core(&self) -> &CoreTypes {
        &self.store.core
    }

    pub fn add_assembly(&mut self, name: impl Into<String>, attributes: Attributes) -> AssemblyId {
        let id = AssemblyId(self.store.assemblies.len());
        self.store.assemblies.push(AssemblyDef {
            id,
            name: name.into(),
            attributes,
        });
        id
    }

    pub fn add_type(&mut self, mut def: TypeDef) -> TypeId {
        let id = TypeId(self.store.types.len());
        def.id = id;
        if def.base_type.is_none()
            && matches!(def.kind, TypeKind::Class | TypeKind::Struct | TypeKind::Enum)
            && !self.store.types.is_empty()
        {
            def.base_type = Some(self.store.core.object);
        }
        if let Some(outer) = def.declaring_type {
            def.namespace = self.store.types[outer.0].namespace.clone();
        }
        self.store.types.push(def);
        id
    }

    /// Adds a method and registers it with its declaring type.
    pub fn add_method(&mut self, declaring: TypeId, def: MethodDef) -> MethodId {
        let id = self.add_detached_method(declaring, def);
        self.store.types[declaring.0].methods.push(id);
        id
    }

    /// Adds an accessor method reachable only through its property or event.
    pub fn add_detached_method(&mut self, declaring: TypeId, mut def: MethodDef) -> MethodId {
        let id = MethodId(self.store.methods.len());
        def.id = id;
        def.declaring_type = declaring;
        self.store.methods.push(def);
        id
    }

    pub fn add_property(&mut self, declaring: TypeId, mut def: PropertyDef) -> PropertyId {
        let id = PropertyId(self.store.properties.len());
        def.id = id;
        def.declaring_type = declaring;
        self.store.properties.push(def);
        self.store.types[declaring.0].properties.push(id);
        id
    }

    pub fn add_event(&mut self, declaring: TypeId, mut def: EventDef) -> EventId {
        let id = EventId(self.store.events.len());
        def.id = id;
        def.declaring_type = declaring;
        self.store.events.push(def);
        self.store.types[declaring.0].events.push(id);
        id
    }

    pub fn add_field(&mut self, declaring: TypeId, mut def: FieldDef) -> FieldId {
        let id = FieldId(self.store.fields.len());
        def.id = id;
        def.declaring_type = declaring;
        self.store.fields.push(def);
        self.store.types[declaring.0].fields.push(id);
        id
    }

    pub fn add_type_param(&mut self, ty: TypeId, name: impl Into<String>) {
        self.store.types[ty.0]
            .type_params
            .push(TypeParamDef { name: name.into() });
    }

    pub fn finish(self) -> SymbolStore {
        self.store
    }
}
