use crate::naming;
use crate::semantics::{
    ConstructorSemantics, DelegateSemantics, EventSemantics, FieldSemantics, MethodSemantics,
    PropertySemantics, TypeImpl, TypeSemantics,
};
use indexmap::{IndexMap, IndexSet};
use jsharp_model::{
    AssemblyId, CompilerOptions, DiagnosticCode, DiagnosticCollection, EventId, FieldId, MethodId,
    PropertyId, SourceLocation, SymbolStore, TypeDef, TypeId, TypeKind, TypeParamOwner,
    TypeParamRef,
};
use jsharp_script::TypeNameResolver;
use log::debug;

/// Identity of a member for the ignored-members set.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MemberKey {
    Method(MethodId),
    Constructor(MethodId),
    Property(PropertyId),
    Event(EventId),
    Field(FieldId),
}

/// The naming and semantics oracle. For every reachable type and member it
/// decides, once, how the symbol appears in script. All tables are written
/// during `prepare` and the `set_*_semantics` overrides, and read thereafter.
pub struct MetadataImporter {
    pub(crate) options: CompilerOptions,
    pub diagnostics: DiagnosticCollection,

    pub(crate) type_semantics: IndexMap<TypeId, TypeSemantics>,
    pub(crate) delegate_semantics: IndexMap<TypeId, DelegateSemantics>,
    pub(crate) method_semantics: IndexMap<MethodId, MethodSemantics>,
    pub(crate) constructor_semantics: IndexMap<MethodId, ConstructorSemantics>,
    pub(crate) property_semantics: IndexMap<PropertyId, PropertySemantics>,
    pub(crate) event_semantics: IndexMap<EventId, EventSemantics>,
    pub(crate) field_semantics: IndexMap<FieldId, FieldSemantics>,

    pub(crate) instance_names: IndexMap<TypeId, IndexSet<String>>,
    pub(crate) static_names: IndexMap<TypeId, IndexSet<String>>,
    pub(crate) type_param_names: IndexMap<TypeParamRef, String>,
    pub(crate) minimized_type_index: IndexMap<(AssemblyId, String), usize>,
    pub(crate) backing_field_index: IndexMap<TypeId, usize>,
    pub(crate) property_backing_names: IndexMap<PropertyId, String>,
    pub(crate) event_backing_names: IndexMap<EventId, String>,
    pub(crate) ignored_members: IndexSet<MemberKey>,
    pub(crate) prepared: IndexSet<TypeId>,
    /// Names that entered a reservation table for a type parameter rather
    /// than a member; the base-ambiguity check skips them.
    pub(crate) type_param_reserved: IndexSet<(TypeId, String)>,
}

impl MetadataImporter {
    pub fn new(options: CompilerOptions) -> Self {
        MetadataImporter {
            options,
            diagnostics: DiagnosticCollection::new(),
            type_semantics: IndexMap::new(),
            delegate_semantics: IndexMap::new(),
            method_semantics: IndexMap::new(),
            constructor_semantics: IndexMap::new(),
            property_semantics: IndexMap::new(),
            event_semantics: IndexMap::new(),
            field_semantics: IndexMap::new(),
            instance_names: IndexMap::new(),
            static_names: IndexMap::new(),
            type_param_names: IndexMap::new(),
            minimized_type_index: IndexMap::new(),
            backing_field_index: IndexMap::new(),
            property_backing_names: IndexMap::new(),
            event_backing_names: IndexMap::new(),
            ignored_members: IndexSet::new(),
            prepared: IndexSet::new(),
            type_param_reserved: IndexSet::new(),
        }
    }

    /// Populates the type-level record and all member records for `tid`.
    /// Every base type must already be prepared.
    pub fn prepare(&mut self, store: &SymbolStore, tid: TypeId) {
        if self.prepared.contains(&tid) {
            return;
        }
        let t = store.type_def(tid);
        for b in store.all_bases(tid) {
            if !self.prepared.contains(&b) {
                panic!(
                    "internal error: type {} prepared before its base {}",
                    store.source_full_name(tid),
                    store.source_full_name(b)
                );
            }
        }
        if let Some(outer) = t.declaring_type {
            if !self.prepared.contains(&outer) {
                panic!(
                    "internal error: nested type {} prepared before its declaring type",
                    store.source_full_name(tid)
                );
            }
        }
        debug!("preparing type {}", store.source_full_name(tid));
        self.instance_names.entry(tid).or_default();
        self.static_names.entry(tid).or_default();
        self.process_type(store, tid);
        self.process_type_members(store, tid);
        self.prepared.insert(tid);
    }

    // ----- lookups; missing records are driver bugs, not user faults -----

    pub fn get_type_semantics(&self, tid: TypeId) -> &TypeSemantics {
        self.type_semantics
            .get(&tid)
            .unwrap_or_else(|| panic!("internal error: type {} was not imported", tid))
    }

    pub fn get_delegate_semantics(&self, tid: TypeId) -> &DelegateSemantics {
        self.delegate_semantics
            .get(&tid)
            .unwrap_or_else(|| panic!("internal error: delegate {} was not imported", tid))
    }

    pub fn get_method_semantics(&self, mid: MethodId) -> &MethodSemantics {
        self.method_semantics
            .get(&mid)
            .unwrap_or_else(|| panic!("internal error: method {} was not imported", mid))
    }

    pub fn get_constructor_semantics(&self, mid: MethodId) -> &ConstructorSemantics {
        self.constructor_semantics
            .get(&mid)
            .unwrap_or_else(|| panic!("internal error: constructor {} was not imported", mid))
    }

    pub fn get_property_semantics(&self, pid: PropertyId) -> &PropertySemantics {
        self.property_semantics
            .get(&pid)
            .unwrap_or_else(|| panic!("internal error: property {} was not imported", pid))
    }

    pub fn get_event_semantics(&self, eid: EventId) -> &EventSemantics {
        self.event_semantics
            .get(&eid)
            .unwrap_or_else(|| panic!("internal error: event {} was not imported", eid))
    }

    pub fn get_field_semantics(&self, fid: FieldId) -> &FieldSemantics {
        self.field_semantics
            .get(&fid)
            .unwrap_or_else(|| panic!("internal error: field {} was not imported", fid))
    }

    pub fn get_type_parameter_name(&self, p: TypeParamRef) -> &str {
        self.type_param_names
            .get(&p)
            .map(|s| s.as_str())
            .unwrap_or_else(|| panic!("internal error: type parameter {:?} was not imported", p))
    }

    // ----- cooperative name reservation -----

    pub fn reserve_member_name(&mut self, tid: TypeId, name: &str, is_static: bool) {
        let table = if is_static {
            self.static_names.entry(tid).or_default()
        } else {
            self.instance_names.entry(tid).or_default()
        };
        table.insert(name.to_string());
    }

    pub fn is_member_name_available(
        &self,
        store: &SymbolStore,
        tid: TypeId,
        name: &str,
        is_static: bool,
    ) -> bool {
        if naming::is_reserved(name, is_static) {
            return false;
        }
        let own = if is_static {
            self.static_names.get(&tid)
        } else {
            self.instance_names.get(&tid)
        };
        if own.map(|t| t.contains(name)).unwrap_or(false) {
            return false;
        }
        if !is_static {
            for b in store.all_bases(tid) {
                if self
                    .instance_names
                    .get(&b)
                    .map(|t| t.contains(name))
                    .unwrap_or(false)
                {
                    return false;
                }
            }
        }
        true
    }

    // ----- authoritative overrides -----

    pub fn set_method_semantics(&mut self, mid: MethodId, semantics: MethodSemantics) {
        self.method_semantics.insert(mid, semantics);
        self.ignored_members.insert(MemberKey::Method(mid));
    }

    pub fn set_constructor_semantics(&mut self, mid: MethodId, semantics: ConstructorSemantics) {
        self.constructor_semantics.insert(mid, semantics);
        self.ignored_members.insert(MemberKey::Constructor(mid));
    }

    pub fn set_property_semantics(&mut self, pid: PropertyId, semantics: PropertySemantics) {
        self.property_semantics.insert(pid, semantics);
        self.ignored_members.insert(MemberKey::Property(pid));
    }

    pub fn set_event_semantics(&mut self, eid: EventId, semantics: EventSemantics) {
        self.event_semantics.insert(eid, semantics);
        self.ignored_members.insert(MemberKey::Event(eid));
    }

    pub fn set_field_semantics(&mut self, fid: FieldId, semantics: FieldSemantics) {
        self.field_semantics.insert(fid, semantics);
        self.ignored_members.insert(MemberKey::Field(fid));
    }

    // ----- backing field synthesis -----

    pub fn get_auto_property_backing_field_name(
        &mut self,
        store: &SymbolStore,
        pid: PropertyId,
    ) -> String {
        if let Some(name) = self.property_backing_names.get(&pid) {
            return name.clone();
        }
        let declaring = store.property(pid).declaring_type;
        let name = self.next_backing_field_name(declaring);
        self.property_backing_names.insert(pid, name.clone());
        name
    }

    pub fn get_auto_event_backing_field_name(
        &mut self,
        store: &SymbolStore,
        eid: EventId,
    ) -> String {
        if let Some(name) = self.event_backing_names.get(&eid) {
            return name.clone();
        }
        let declaring = store.event(eid).declaring_type;
        let name = self.next_backing_field_name(declaring);
        self.event_backing_names.insert(eid, name.clone());
        name
    }

    fn next_backing_field_name(&mut self, declaring: TypeId) -> String {
        let counter = self.backing_field_index.entry(declaring).or_insert(0);
        *counter += 1;
        let name = format!("${}", counter);
        self.reserve_member_name(declaring, &name, false);
        name
    }

    // ----- diagnostics -----

    pub(crate) fn report(
        &mut self,
        code: DiagnosticCode,
        message: String,
        location: Option<SourceLocation>,
    ) {
        self.diagnostics.report(code, message, location);
    }

    // ----- the type-level decision algorithm -----

    fn process_type(&mut self, store: &SymbolStore, tid: TypeId) {
        let t = store.type_def(tid);

        if t.kind == TypeKind::Delegate {
            self.process_delegate(store, tid);
        } else if t.attributes.has_bind_this_to_first_parameter() {
            self.report(
                DiagnosticCode::JSE7111,
                format!(
                    "{}: {}",
                    store.source_full_name(tid),
                    DiagnosticCode::JSE7111.message()
                ),
                t.location.clone(),
            );
        }

        // 1. Unusability propagation.
        let declarer_unusable = t
            .declaring_type
            .map(|d| !self.get_type_semantics(d).is_usable())
            .unwrap_or(false);
        if declarer_unusable || t.attributes.has_non_scriptable() {
            self.type_semantics.insert(tid, TypeSemantics::not_usable());
            return;
        }

        let is_imported = t.attributes.imported().is_some();

        // 2. Generic argument handling.
        let ignore_generic_arguments = self.resolve_type_generics(store, t);

        // 4. Script namespace (resolved first; the minimized-name counter is
        // keyed by it).
        let namespace = self.resolve_namespace(store, t);

        // 3. Script name.
        let mut name = self.resolve_type_name(store, t, is_imported, ignore_generic_arguments, &namespace);
        let mut namespace = namespace;
        if let Some(outer) = t.declaring_type {
            let outer_sem = self.get_type_semantics(outer);
            let (outer_ns, outer_name) = split_dotted(&outer_sem.dotted_name);
            namespace = outer_ns.to_string();
            name = format!("{}${}", outer_name, name);
        }

        // 5. Globally exposed types lose both namespace and name.
        if t.attributes.has_global_methods() || t.attributes.has_mixin() {
            if !t.is_static || t.declaring_type.is_some() {
                self.report(
                    DiagnosticCode::JSE7005,
                    format!(
                        "{}: {}",
                        store.source_full_name(tid),
                        DiagnosticCode::JSE7005.message()
                    ),
                    t.location.clone(),
                );
            }
            namespace = String::new();
            name = String::new();
        }

        // 6. Serializable types.
        let is_serializable = t.attributes.has_serializable()
            || t.base_type == Some(store.core.record_base) && tid != store.core.record_base;
        if is_serializable {
            self.check_serializable_rules(store, t);
        }

        // Named-values enums.
        let is_named_values = t.kind == TypeKind::Enum && t.attributes.has_named_values();
        if t.attributes.has_named_values() && t.attributes.has_numeric_values() {
            self.report(
                DiagnosticCode::JSE7003,
                format!(
                    "{}: {}",
                    store.source_full_name(tid),
                    DiagnosticCode::JSE7003.message()
                ),
                t.location.clone(),
            );
        }

        // 7. Type parameter names.
        self.reserve_type_parameters(store, tid);

        let dotted_name = if namespace.is_empty() {
            name
        } else if name.is_empty() {
            String::new()
        } else {
            format!("{}.{}", namespace, name)
        };

        self.type_semantics.insert(
            tid,
            TypeSemantics {
                impl_kind: TypeImpl::Normal,
                dotted_name,
                ignore_generic_arguments,
                generate_code: !is_imported,
                is_serializable,
                is_named_values,
                is_imported,
            },
        );
    }

    fn process_delegate(&mut self, store: &SymbolStore, tid: TypeId) {
        let t = store.type_def(tid);
        let semantics = DelegateSemantics {
            expand_params: t.attributes.has_expand_params(),
            bind_this_to_first_parameter: t.attributes.has_bind_this_to_first_parameter(),
        };
        self.delegate_semantics.insert(tid, semantics);
    }

    /// Tri-state resolution of generic argument handling for a type.
    fn resolve_type_generics(&mut self, store: &SymbolStore, t: &TypeDef) -> bool {
        let include = t.attributes.include_generic_arguments().or_else(|| {
            store
                .assembly(t.assembly)
                .attributes
                .generic_arguments_type_default()
        });
        match include {
            Some(include) => !include,
            None => {
                if t.is_generic() {
                    self.report(
                        DiagnosticCode::JSW7901,
                        format!(
                            "{}: {}",
                            store.source_full_name(t.id),
                            DiagnosticCode::JSW7901.message()
                        ),
                        t.location.clone(),
                    );
                }
                false
            }
        }
    }

    fn resolve_namespace(&mut self, store: &SymbolStore, t: &TypeDef) -> String {
        let explicit_ns = t.attributes.script_namespace();
        let ignore_ns = t.attributes.has_ignore_namespace();

        if t.declaring_type.is_some() {
            if explicit_ns.is_some() || ignore_ns {
                self.report(
                    DiagnosticCode::JSE7002,
                    format!(
                        "{}: {}",
                        store.source_full_name(t.id),
                        DiagnosticCode::JSE7002.message()
                    ),
                    t.location.clone(),
                );
            }
            // Composed from the declaring type; resolved by the caller.
            return String::new();
        }

        if explicit_ns.is_some() && ignore_ns {
            self.report(
                DiagnosticCode::JSE7003,
                format!(
                    "{}: {}",
                    store.source_full_name(t.id),
                    DiagnosticCode::JSE7003.message()
                ),
                t.location.clone(),
            );
        }
        if let Some(ns) = explicit_ns {
            if naming::is_valid_namespace(ns) {
                return ns.to_string();
            }
            self.report(
                DiagnosticCode::JSE7004,
                format!("'{}': {}", ns, DiagnosticCode::JSE7004.message()),
                t.location.clone(),
            );
            return t.namespace.clone();
        }
        if ignore_ns {
            return String::new();
        }
        if let Some(ns) = store.assembly(t.assembly).attributes.script_namespace() {
            if naming::is_valid_namespace(ns) {
                return ns.to_string();
            }
        }
        t.namespace.clone()
    }

    fn resolve_type_name(
        &mut self,
        store: &SymbolStore,
        t: &TypeDef,
        is_imported: bool,
        ignore_generic_arguments: bool,
        namespace: &str,
    ) -> String {
        if let Some(explicit) = t.attributes.script_name() {
            if naming::is_valid_identifier(explicit) {
                return explicit.to_string();
            }
            self.report(
                DiagnosticCode::JSE7001,
                format!("'{}': {}", explicit, DiagnosticCode::JSE7001.message()),
                t.location.clone(),
            );
        }
        if self.options.minimize_names && !t.is_public && !is_imported {
            let counter = self
                .minimized_type_index
                .entry((t.assembly, namespace.to_string()))
                .or_insert(0);
            let name = format!("${}", counter);
            *counter += 1;
            return name;
        }
        if t.is_generic() && !ignore_generic_arguments {
            format!("{}${}", t.name, t.type_params.len())
        } else {
            t.name.clone()
        }
    }

    fn check_serializable_rules(&mut self, store: &SymbolStore, t: &TypeDef) {
        let full_name = store.source_full_name(t.id);
        if t.kind != TypeKind::Interface {
            if let Some(base) = t.base_type {
                let base_ok = base == store.core.object
                    || base == store.core.record_base
                    || self.get_type_semantics(base).is_serializable;
                if !base_ok {
                    self.report(
                        DiagnosticCode::JSE7010,
                        format!("{}: {}", full_name, DiagnosticCode::JSE7010.message()),
                        t.location.clone(),
                    );
                }
            }
        }
        for &iface in &t.interfaces {
            if !self.get_type_semantics(iface).is_serializable {
                self.report(
                    DiagnosticCode::JSE7011,
                    format!("{}: {}", full_name, DiagnosticCode::JSE7011.message()),
                    t.location.clone(),
                );
            }
        }
        for &eid in &t.events {
            let e = store.event(eid);
            if !e.is_static {
                self.report(
                    DiagnosticCode::JSE7012,
                    format!(
                        "{}.{}: {}",
                        full_name,
                        e.name,
                        DiagnosticCode::JSE7012.message()
                    ),
                    e.location.clone(),
                );
            }
        }
        let mut overridable: Vec<(&str, Option<SourceLocation>)> = Vec::new();
        for &mid in &t.methods {
            let m = store.method(mid);
            if m.is_virtual || m.is_override {
                overridable.push((&m.name, m.location.clone()));
            }
        }
        for &pid in &t.properties {
            let p = store.property(pid);
            if p.is_virtual || p.is_override {
                overridable.push((&p.name, p.location.clone()));
            }
        }
        for &eid in &t.events {
            let e = store.event(eid);
            if e.is_virtual || e.is_override {
                overridable.push((&e.name, e.location.clone()));
            }
        }
        for (name, location) in overridable {
            self.report(
                DiagnosticCode::JSE7013,
                format!(
                    "{}.{}: {}",
                    full_name,
                    name,
                    DiagnosticCode::JSE7013.message()
                ),
                location,
            );
        }
        if t.kind == TypeKind::Interface {
            for &mid in &t.methods {
                let m = store.method(mid);
                if !m.is_static {
                    self.report(
                        DiagnosticCode::JSE7014,
                        format!(
                            "{}.{}: {}",
                            full_name,
                            m.name,
                            DiagnosticCode::JSE7014.message()
                        ),
                        m.location.clone(),
                    );
                }
            }
        }
    }

    fn reserve_type_parameters(&mut self, store: &SymbolStore, tid: TypeId) {
        let t = store.type_def(tid);
        let offset = self.type_param_nesting_offset(store, t);
        for (i, tp) in t.type_params.iter().enumerate() {
            let name = if self.options.minimize_names {
                format!("${}", offset + i + 1)
            } else {
                tp.name.clone()
            };
            self.type_param_names.insert(
                TypeParamRef {
                    owner: TypeParamOwner::Type(tid),
                    index: i,
                },
                name.clone(),
            );
            self.reserve_member_name(tid, &name, false);
            self.reserve_member_name(tid, &name, true);
            self.type_param_reserved.insert((tid, name));
        }
    }

    /// Total number of type parameters declared by enclosing types; minified
    /// type parameter names are numbered sequentially across the nesting.
    pub(crate) fn type_param_nesting_offset(&self, store: &SymbolStore, t: &TypeDef) -> usize {
        let mut offset = 0;
        let mut cur = t.declaring_type;
        while let Some(d) = cur {
            let dt = store.type_def(d);
            offset += dt.type_params.len();
            cur = dt.declaring_type;
        }
        offset
    }
}

impl TypeNameResolver for MetadataImporter {
    fn dotted_name(&self, id: TypeId) -> Option<String> {
        self.type_semantics.get(&id).and_then(|s| {
            if s.is_usable() {
                Some(s.dotted_name.clone())
            } else {
                None
            }
        })
    }
}

pub(crate) fn split_dotted(dotted: &str) -> (&str, &str) {
    match dotted.rsplit_once('.') {
        Some((ns, name)) => (ns, name),
        None => ("", dotted),
    }
}
