use crate::importer::{MemberKey, MetadataImporter};
use crate::naming;
use crate::semantics::{EventSemantics, FieldSemantics, MethodSemantics, PropertySemantics};
use crate::templates::{TemplateContext, validate_template};
use indexmap::IndexMap;
use jsharp_model::{
    Attributes, ConstValue, DiagnosticCode, EventId, FieldId, MethodDef, MethodId, PropertyId,
    SourceLocation, SymbolStore, TypeDef, TypeId, TypeKind, TypeParamOwner, TypeParamRef,
};

#[derive(Copy, Clone, Debug)]
enum MemberRef {
    Method(MethodId),
    Property(PropertyId),
    Field(FieldId),
    Event(EventId),
}

struct MemberEntry {
    member: MemberRef,
    preferred: Option<String>,
    specified: bool,
    sort: (String, u8, u8, String, usize, String, String, usize),
}

impl MetadataImporter {
    pub(crate) fn process_type_members(&mut self, store: &SymbolStore, tid: TypeId) {
        let t = store.type_def(tid);
        if t.kind == TypeKind::Delegate {
            return;
        }
        self.check_base_name_ambiguity(store, tid);

        if !self.get_type_semantics(tid).is_usable() {
            self.assign_all_not_usable(store, t);
            return;
        }

        let mut entries = Vec::new();
        for &mid in &t.methods {
            let m = store.method(mid);
            if m.is_ctor {
                continue;
            }
            let (preferred, specified) =
                self.determine_preferred_name(store, &m.attributes, &m.name, m.is_public, t);
            let group = preferred
                .clone()
                .unwrap_or_else(|| naming::default_case(&m.name));
            let params_joined = m
                .params
                .iter()
                .map(|p| store.type_ref_name(&p.ty))
                .collect::<Vec<_>>()
                .join(",");
            let return_name = m
                .return_type
                .as_ref()
                .map(|r| store.type_ref_name(r))
                .unwrap_or_default();
            entries.push(MemberEntry {
                member: MemberRef::Method(mid),
                preferred,
                specified,
                sort: (
                    group,
                    if specified { 0 } else { 1 },
                    0,
                    m.name.clone(),
                    m.params.len(),
                    params_joined,
                    return_name,
                    m.type_params.len(),
                ),
            });
        }
        for &pid in &t.properties {
            let p = store.property(pid);
            let (preferred, specified) =
                self.determine_preferred_name(store, &p.attributes, &p.name, p.is_public, t);
            let group = preferred
                .clone()
                .unwrap_or_else(|| naming::default_case(&p.name));
            entries.push(MemberEntry {
                member: MemberRef::Property(pid),
                preferred,
                specified,
                sort: (
                    group,
                    if specified { 0 } else { 1 },
                    1,
                    p.name.clone(),
                    0,
                    String::new(),
                    String::new(),
                    0,
                ),
            });
        }
        for &fid in &t.fields {
            let f = store.field(fid);
            let (preferred, specified) =
                self.determine_preferred_name(store, &f.attributes, &f.name, f.is_public, t);
            let group = preferred
                .clone()
                .unwrap_or_else(|| naming::default_case(&f.name));
            entries.push(MemberEntry {
                member: MemberRef::Field(fid),
                preferred,
                specified,
                sort: (
                    group,
                    if specified { 0 } else { 1 },
                    2,
                    f.name.clone(),
                    0,
                    String::new(),
                    String::new(),
                    0,
                ),
            });
        }
        for &eid in &t.events {
            let e = store.event(eid);
            let (preferred, specified) =
                self.determine_preferred_name(store, &e.attributes, &e.name, e.is_public, t);
            let group = preferred
                .clone()
                .unwrap_or_else(|| naming::default_case(&e.name));
            entries.push(MemberEntry {
                member: MemberRef::Event(eid),
                preferred,
                specified,
                sort: (
                    group,
                    if specified { 0 } else { 1 },
                    3,
                    e.name.clone(),
                    0,
                    String::new(),
                    String::new(),
                    0,
                ),
            });
        }
        entries.sort_by(|a, b| a.sort.cmp(&b.sort));

        for entry in entries {
            match entry.member {
                MemberRef::Method(mid) => {
                    if self.ignored_members.contains(&MemberKey::Method(mid)) {
                        continue;
                    }
                    let sem =
                        self.compute_method_semantics(store, mid, entry.preferred, entry.specified);
                    self.method_semantics.insert(mid, sem);
                }
                MemberRef::Property(pid) => {
                    if self.ignored_members.contains(&MemberKey::Property(pid)) {
                        continue;
                    }
                    let sem = self.compute_property_semantics(
                        store,
                        pid,
                        entry.preferred,
                        entry.specified,
                    );
                    self.property_semantics.insert(pid, sem);
                }
                MemberRef::Field(fid) => {
                    if self.ignored_members.contains(&MemberKey::Field(fid)) {
                        continue;
                    }
                    let sem =
                        self.compute_field_semantics(store, fid, entry.preferred, entry.specified);
                    self.field_semantics.insert(fid, sem);
                }
                MemberRef::Event(eid) => {
                    if self.ignored_members.contains(&MemberKey::Event(eid)) {
                        continue;
                    }
                    let sem =
                        self.compute_event_semantics(store, eid, entry.preferred, entry.specified);
                    self.event_semantics.insert(eid, sem);
                }
            }
        }

        self.process_constructors(store, tid);
    }

    fn assign_all_not_usable(&mut self, store: &SymbolStore, t: &TypeDef) {
        for &mid in &t.methods {
            let m = store.method(mid);
            if m.is_ctor {
                if !self.ignored_members.contains(&MemberKey::Constructor(mid)) {
                    self.constructor_semantics
                        .insert(mid, crate::semantics::ConstructorSemantics::NotUsable);
                }
            } else if !self.ignored_members.contains(&MemberKey::Method(mid)) {
                self.method_semantics.insert(mid, MethodSemantics::NotUsable);
            }
        }
        for &pid in &t.properties {
            let p = store.property(pid);
            if !self.ignored_members.contains(&MemberKey::Property(pid)) {
                self.property_semantics
                    .insert(pid, PropertySemantics::NotUsable);
            }
            for accessor in [p.getter, p.setter].into_iter().flatten() {
                self.method_semantics
                    .insert(accessor, MethodSemantics::NotUsable);
            }
        }
        for &eid in &t.events {
            let e = store.event(eid);
            if !self.ignored_members.contains(&MemberKey::Event(eid)) {
                self.event_semantics.insert(eid, EventSemantics::NotUsable);
            }
            for accessor in [e.adder, e.remover].into_iter().flatten() {
                self.method_semantics
                    .insert(accessor, MethodSemantics::NotUsable);
            }
        }
        for &fid in &t.fields {
            if !self.ignored_members.contains(&MemberKey::Field(fid)) {
                self.field_semantics.insert(fid, FieldSemantics::NotUsable);
            }
        }
    }

    /// Names contributed by two base types, neither derived from the other,
    /// are ambiguous in the derived type.
    fn check_base_name_ambiguity(&mut self, store: &SymbolStore, tid: TypeId) {
        let mut seen: IndexMap<String, TypeId> = IndexMap::new();
        for b in store.all_bases(tid) {
            let Some(table) = self.instance_names.get(&b) else {
                continue;
            };
            let names: Vec<String> = table
                .iter()
                .filter(|n| !n.starts_with('$'))
                .filter(|n| !self.type_param_reserved.contains(&(b, (*n).clone())))
                .cloned()
                .collect();
            for name in names {
                match seen.get(&name) {
                    Some(&prev) if prev != b => {
                        if !store.is_derived_from(prev, b) && !store.is_derived_from(b, prev) {
                            let message = format!(
                                "'{}' in {}: {} ({} and {})",
                                name,
                                store.source_full_name(tid),
                                DiagnosticCode::JSE7016.message(),
                                store.source_full_name(prev),
                                store.source_full_name(b)
                            );
                            let location = store.type_def(tid).location.clone();
                            self.report(DiagnosticCode::JSE7016, message, location);
                        }
                    }
                    Some(_) => {}
                    None => {
                        seen.insert(name, b);
                    }
                }
            }
        }
    }

    // ----- shared naming helpers -----

    pub(crate) fn determine_preferred_name(
        &mut self,
        store: &SymbolStore,
        attrs: &Attributes,
        source_name: &str,
        member_public: bool,
        t: &TypeDef,
    ) -> (Option<String>, bool) {
        if let Some(s) = attrs.script_name() {
            if naming::is_valid_identifier(s) {
                return (Some(s.to_string()), true);
            }
            self.report(
                DiagnosticCode::JSE7001,
                format!("'{}': {}", s, DiagnosticCode::JSE7001.message()),
                None,
            );
        }
        if attrs.has_preserve_case() {
            return (Some(source_name.to_string()), true);
        }
        if attrs.has_preserve_name() {
            return (Some(naming::default_case(source_name)), true);
        }
        let visible = t.is_public && member_public;
        let minimize_public = store
            .assembly(t.assembly)
            .attributes
            .has_minimize_public_names();
        // Imported members keep their externally fixed names.
        if self.options.minimize_names
            && t.attributes.imported().is_none()
            && (!visible || minimize_public)
        {
            return (None, false);
        }
        (Some(naming::default_case(source_name)), false)
    }

    /// Commits a script name for a member: explicit names are validated and
    /// kept even on conflict, derived names are made unique against the
    /// reservation tables, absent names come from the minimized counter.
    pub(crate) fn choose_name(
        &mut self,
        store: &SymbolStore,
        tid: TypeId,
        preferred: Option<&str>,
        specified: bool,
        is_static: bool,
        location: Option<SourceLocation>,
        description: &str,
    ) -> String {
        if specified {
            let name = preferred.expect("specified names are always present");
            if naming::is_reserved(name, is_static) {
                self.report(
                    DiagnosticCode::JSE7115,
                    format!("{}: '{}' {}", description, name, DiagnosticCode::JSE7115.message()),
                    location,
                );
            } else if !self.is_member_name_available(store, tid, name, is_static) {
                self.report(
                    DiagnosticCode::JSE7108,
                    format!("{}: '{}' {}", description, name, DiagnosticCode::JSE7108.message()),
                    location,
                );
            }
            self.reserve_member_name(tid, name, is_static);
            return name.to_string();
        }
        let name = match preferred {
            Some(p) => {
                if self.is_member_name_available(store, tid, p, is_static) {
                    p.to_string()
                } else {
                    let mut i = 1;
                    loop {
                        let candidate = format!("{}${}", p, i);
                        if self.is_member_name_available(store, tid, &candidate, is_static) {
                            break candidate;
                        }
                        i += 1;
                    }
                }
            }
            None => {
                let mut i = 0;
                loop {
                    let candidate = naming::encode_number(i);
                    if self.is_member_name_available(store, tid, &candidate, is_static) {
                        break candidate;
                    }
                    i += 1;
                }
            }
        };
        self.reserve_member_name(tid, &name, is_static);
        name
    }

    pub(crate) fn resolve_method_generics(&mut self, store: &SymbolStore, m: &MethodDef) -> bool {
        let assembly = store.type_def(m.declaring_type).assembly;
        let include = m.attributes.include_generic_arguments().or_else(|| {
            store
                .assembly(assembly)
                .attributes
                .generic_arguments_method_default()
        });
        match include {
            Some(include) => !include,
            None => {
                if m.is_generic() {
                    self.report(
                        DiagnosticCode::JSW7901,
                        format!(
                            "{}: {}",
                            self.method_description(store, m),
                            DiagnosticCode::JSW7901.message()
                        ),
                        m.location.clone(),
                    );
                }
                false
            }
        }
    }

    pub(crate) fn resolve_expand_params(&mut self, store: &SymbolStore, m: &MethodDef) -> bool {
        if !m.attributes.has_expand_params() {
            return false;
        }
        if m.has_param_array() {
            true
        } else {
            self.report(
                DiagnosticCode::JSE7112,
                format!(
                    "{}: {}",
                    self.method_description(store, m),
                    DiagnosticCode::JSE7112.message()
                ),
                m.location.clone(),
            );
            false
        }
    }

    fn method_description(&self, store: &SymbolStore, m: &MethodDef) -> String {
        format!("{}.{}", store.source_full_name(m.declaring_type), m.name)
    }

    // ----- the method pipeline -----

    pub(crate) fn compute_method_semantics(
        &mut self,
        store: &SymbolStore,
        mid: MethodId,
        preferred: Option<String>,
        specified: bool,
    ) -> MethodSemantics {
        let m = store.method(mid);
        let t = store.type_def(m.declaring_type);
        let tsem = self.get_type_semantics(m.declaring_type).clone();
        let desc = self.method_description(store, m);

        if m.attributes.has_non_scriptable() || !tsem.is_usable() {
            return MethodSemantics::NotUsable;
        }

        self.register_method_type_params(store, m, t);

        if m.attributes.has_intrinsic_operator() {
            if m.is_operator && !m.is_conversion_operator {
                return MethodSemantics::NativeOperator;
            }
            self.report(
                DiagnosticCode::JSE7102,
                format!("{}: {}", desc, DiagnosticCode::JSE7102.message()),
                m.location.clone(),
            );
        }

        if m.attributes.has_script_skip() {
            if m.type_params.is_empty() && m.is_static && m.params.len() == 1 {
                return MethodSemantics::inline(format!("{{{}}}", m.params[0].name));
            }
            if m.type_params.is_empty() && !m.is_static && m.params.is_empty() {
                return MethodSemantics::inline("{this}");
            }
            self.report(
                DiagnosticCode::JSE7103,
                format!("{}: {}", desc, DiagnosticCode::JSE7103.message()),
                m.location.clone(),
            );
        }

        if let Some(alias) = m.attributes.script_alias() {
            if m.is_static {
                let args = m
                    .params
                    .iter()
                    .map(|p| format!("{{{}}}", p.name))
                    .collect::<Vec<_>>()
                    .join(", ");
                return MethodSemantics::inline(format!("{}({})", alias, args));
            }
            self.report(
                DiagnosticCode::JSE7104,
                format!("{}: {}", desc, DiagnosticCode::JSE7104.message()),
                m.location.clone(),
            );
        }

        if let Some(ic) = m.attributes.inline_code() {
            let ctx = self.method_template_context(store, m, t);
            let mut valid = true;
            for code in [Some(&ic.code), ic.non_virtual_code.as_ref()]
                .into_iter()
                .flatten()
            {
                if let Err(reason) = validate_template(code, &ctx) {
                    self.report(
                        DiagnosticCode::JSE7101,
                        format!("{}: {}: {}", desc, DiagnosticCode::JSE7101.message(), reason),
                        m.location.clone(),
                    );
                    valid = false;
                }
            }
            if valid {
                if let Some(g) = &ic.generated_method_name {
                    if !self.is_member_name_available(store, m.declaring_type, g, m.is_static) {
                        self.report(
                            DiagnosticCode::JSE7108,
                            format!("{}: '{}' {}", desc, g, DiagnosticCode::JSE7108.message()),
                            m.location.clone(),
                        );
                    }
                    self.reserve_member_name(m.declaring_type, g, m.is_static);
                }
                return MethodSemantics::InlineCode {
                    template: ic.code.clone(),
                    non_virtual_template: ic.non_virtual_code.clone(),
                    generated_name: ic.generated_method_name.clone(),
                };
            }
        }

        if m.attributes.has_instance_method_on_first_argument() {
            if m.is_static && !m.params.is_empty() {
                let target_name = preferred
                    .clone()
                    .unwrap_or_else(|| naming::default_case(&m.name));
                let mut args = Vec::new();
                for (i, p) in m.params.iter().enumerate().skip(1) {
                    if p.is_params && i + 1 == m.params.len() {
                        args.push(format!("{{*{}}}", p.name));
                    } else {
                        args.push(format!("{{{}}}", p.name));
                    }
                }
                return MethodSemantics::inline(format!(
                    "{{{}}}.{}({})",
                    m.params[0].name,
                    target_name,
                    args.join(", ")
                ));
            }
            self.report(
                DiagnosticCode::JSE7113,
                format!("{}: {}", desc, DiagnosticCode::JSE7113.message()),
                m.location.clone(),
            );
        }

        let mut enumerate_as_array = false;
        if m.attributes.has_enumerate_as_array() {
            if !m.is_static && m.params.is_empty() && m.name == "GetEnumerator" {
                enumerate_as_array = true;
            } else {
                self.report(
                    DiagnosticCode::JSE7105,
                    format!("{}: {}", desc, DiagnosticCode::JSE7105.message()),
                    m.location.clone(),
                );
            }
        }

        if m.is_override {
            if let Some(base) = m.overridden {
                if specified {
                    self.report(
                        DiagnosticCode::JSE7106,
                        format!("{}: {}", desc, DiagnosticCode::JSE7106.message()),
                        m.location.clone(),
                    );
                }
                let base_sem = self.get_method_semantics(base).clone();
                return self.inherit_member_semantics(store, m, &tsem, base_sem, enumerate_as_array);
            }
        }

        if !m.is_override && !m.implemented_interface_methods.is_empty() {
            if let Some(sem) = self.inherit_from_interfaces(
                store,
                m,
                &tsem,
                preferred.as_deref(),
                specified,
                enumerate_as_array,
            ) {
                return sem;
            }
        }

        let ignore_generic_arguments = self.resolve_method_generics(store, m);
        let expand_params = self.resolve_expand_params(store, m);
        let name = self.choose_name(
            store,
            m.declaring_type,
            preferred.as_deref(),
            specified,
            m.is_static,
            m.location.clone(),
            &desc,
        );
        MethodSemantics::NormalMethod {
            name,
            ignore_generic_arguments,
            expand_params,
            enumerate_as_array,
            generate_code: !tsem.is_imported,
        }
    }

    fn register_method_type_params(&mut self, store: &SymbolStore, m: &MethodDef, t: &TypeDef) {
        let type_total = self.type_param_nesting_offset(store, t) + t.type_params.len();
        for (i, tp) in m.type_params.iter().enumerate() {
            let name = if self.options.minimize_names {
                format!("${}", type_total + i + 1)
            } else {
                tp.name.clone()
            };
            self.type_param_names.insert(
                TypeParamRef {
                    owner: TypeParamOwner::Method(m.id),
                    index: i,
                },
                name,
            );
        }
    }

    fn method_template_context<'a>(
        &self,
        _store: &SymbolStore,
        m: &'a MethodDef,
        t: &'a TypeDef,
    ) -> TemplateContext<'a> {
        let mut type_params: Vec<&'a str> = t.type_params.iter().map(|tp| tp.name.as_str()).collect();
        type_params.extend(m.type_params.iter().map(|tp| tp.name.as_str()));
        TemplateContext {
            this_allowed: !m.is_static,
            params: &m.params,
            type_params,
        }
    }

    /// Inherited semantics for an override or interface implementation.
    /// Inline code with a generated name collapses to a normal method on
    /// that name; enumerate-as-array propagates from the base.
    fn inherit_member_semantics(
        &mut self,
        store: &SymbolStore,
        m: &MethodDef,
        tsem: &crate::semantics::TypeSemantics,
        base: MethodSemantics,
        enumerate_as_array: bool,
    ) -> MethodSemantics {
        match base {
            MethodSemantics::InlineCode {
                generated_name: Some(name),
                ..
            } => {
                let ignore_generic_arguments = self.resolve_method_generics(store, m);
                let expand_params = self.resolve_expand_params(store, m);
                MethodSemantics::NormalMethod {
                    name,
                    ignore_generic_arguments,
                    expand_params,
                    enumerate_as_array,
                    generate_code: !tsem.is_imported,
                }
            }
            MethodSemantics::NormalMethod {
                name,
                ignore_generic_arguments,
                expand_params,
                enumerate_as_array: base_eaa,
                ..
            } => MethodSemantics::NormalMethod {
                name,
                ignore_generic_arguments,
                expand_params,
                enumerate_as_array: base_eaa || enumerate_as_array,
                generate_code: !tsem.is_imported,
            },
            other => other,
        }
    }

    fn inherit_from_interfaces(
        &mut self,
        store: &SymbolStore,
        m: &MethodDef,
        tsem: &crate::semantics::TypeSemantics,
        preferred: Option<&str>,
        specified: bool,
        enumerate_as_array: bool,
    ) -> Option<MethodSemantics> {
        let desc = self.method_description(store, m);
        let sems: Vec<MethodSemantics> = m
            .implemented_interface_methods
            .iter()
            .map(|&i| self.get_method_semantics(i).clone())
            .collect();
        let usable: Vec<&MethodSemantics> = sems.iter().filter(|s| s.is_usable()).collect();
        let first = (*usable.first()?).clone();
        let shape = |s: &MethodSemantics| {
            (
                std::mem::discriminant(s),
                s.name().map(|n| n.to_string()),
            )
        };
        let expected = shape(&first);
        let disagreement = usable.iter().copied().any(|s| shape(s) != expected);
        if disagreement {
            self.report(
                DiagnosticCode::JSE7107,
                format!("{}: {}", desc, DiagnosticCode::JSE7107.message()),
                m.location.clone(),
            );
        }
        if specified && preferred != first.name() {
            self.report(
                DiagnosticCode::JSE7107,
                format!("{}: {}", desc, DiagnosticCode::JSE7107.message()),
                m.location.clone(),
            );
        }
        Some(self.inherit_member_semantics(store, m, tsem, first, enumerate_as_array))
    }

    // ----- properties and events -----

    fn compute_property_semantics(
        &mut self,
        store: &SymbolStore,
        pid: PropertyId,
        preferred: Option<String>,
        specified: bool,
    ) -> PropertySemantics {
        let p = store.property(pid);
        let t = store.type_def(p.declaring_type);
        let tsem = self.get_type_semantics(p.declaring_type).clone();
        let desc = format!("{}.{}", store.source_full_name(p.declaring_type), p.name);

        if p.attributes.has_non_scriptable() || !tsem.is_usable() {
            for accessor in [p.getter, p.setter].into_iter().flatten() {
                self.method_semantics
                    .insert(accessor, MethodSemantics::NotUsable);
            }
            return PropertySemantics::NotUsable;
        }

        if tsem.is_serializable && !p.is_static {
            let getter_inline = p
                .getter
                .map(|g| store.method(g).attributes.inline_code().is_some())
                .unwrap_or(false);
            let setter_inline = p
                .setter
                .map(|s| store.method(s).attributes.inline_code().is_some())
                .unwrap_or(false);
            if !(getter_inline && setter_inline) {
                let name = self.choose_name(
                    store,
                    p.declaring_type,
                    preferred.as_deref(),
                    specified,
                    false,
                    p.location.clone(),
                    &desc,
                );
                for accessor in [p.getter, p.setter].into_iter().flatten() {
                    self.method_semantics
                        .insert(accessor, MethodSemantics::NotUsable);
                }
                return PropertySemantics::Field { name };
            }
        }

        if p.attributes.has_intrinsic_property() {
            let invalid = t.kind == TypeKind::Interface
                || p.is_override
                || p.is_virtual
                || p.is_abstract
                || !p.implemented_interface_properties.is_empty();
            if invalid {
                self.report(
                    DiagnosticCode::JSE7109,
                    format!("{}: {}", desc, DiagnosticCode::JSE7109.message()),
                    p.location.clone(),
                );
            } else if p.is_indexer {
                if p.index_params.len() == 1 {
                    for accessor in [p.getter, p.setter].into_iter().flatten() {
                        self.method_semantics
                            .insert(accessor, MethodSemantics::NativeIndexer);
                    }
                    return PropertySemantics::GetAndSetMethods {
                        get: p.getter.map(|_| MethodSemantics::NativeIndexer),
                        set: p.setter.map(|_| MethodSemantics::NativeIndexer),
                    };
                }
                self.report(
                    DiagnosticCode::JSE7109,
                    format!("{}: {}", desc, DiagnosticCode::JSE7109.message()),
                    p.location.clone(),
                );
            } else {
                let name = self.choose_name(
                    store,
                    p.declaring_type,
                    preferred.as_deref(),
                    specified,
                    p.is_static,
                    p.location.clone(),
                    &desc,
                );
                for accessor in [p.getter, p.setter].into_iter().flatten() {
                    self.method_semantics
                        .insert(accessor, MethodSemantics::NotUsable);
                }
                return PropertySemantics::Field { name };
            }
        }

        let get = p.getter.map(|g| {
            let (apref, aspec) =
                self.accessor_preferred(store, g, "get_", preferred.as_deref(), specified, t);
            let sem = self.compute_method_semantics(store, g, apref, aspec);
            self.method_semantics.insert(g, sem.clone());
            sem
        });
        let set = p.setter.map(|s| {
            let (apref, aspec) =
                self.accessor_preferred(store, s, "set_", preferred.as_deref(), specified, t);
            let sem = self.compute_method_semantics(store, s, apref, aspec);
            self.method_semantics.insert(s, sem.clone());
            sem
        });
        PropertySemantics::GetAndSetMethods { get, set }
    }

    fn compute_event_semantics(
        &mut self,
        store: &SymbolStore,
        eid: EventId,
        preferred: Option<String>,
        specified: bool,
    ) -> EventSemantics {
        let e = store.event(eid);
        let t = store.type_def(e.declaring_type);
        let tsem = self.get_type_semantics(e.declaring_type).clone();

        if e.attributes.has_non_scriptable() || !tsem.is_usable() {
            for accessor in [e.adder, e.remover].into_iter().flatten() {
                self.method_semantics
                    .insert(accessor, MethodSemantics::NotUsable);
            }
            return EventSemantics::NotUsable;
        }

        let add = e.adder.map(|a| {
            let (apref, aspec) =
                self.accessor_preferred(store, a, "add_", preferred.as_deref(), specified, t);
            let sem = self.compute_method_semantics(store, a, apref, aspec);
            self.method_semantics.insert(a, sem.clone());
            sem
        });
        let remove = e.remover.map(|r| {
            let (apref, aspec) =
                self.accessor_preferred(store, r, "remove_", preferred.as_deref(), specified, t);
            let sem = self.compute_method_semantics(store, r, apref, aspec);
            self.method_semantics.insert(r, sem.clone());
            sem
        });
        EventSemantics::AddAndRemoveMethods { add, remove }
    }

    /// Accessor methods default to `<prefix><owner name>`; their own naming
    /// attributes win over the owner-derived name.
    fn accessor_preferred(
        &mut self,
        store: &SymbolStore,
        mid: MethodId,
        prefix: &str,
        owner_preferred: Option<&str>,
        owner_specified: bool,
        t: &TypeDef,
    ) -> (Option<String>, bool) {
        let m = store.method(mid);
        let (own, own_specified) =
            self.determine_preferred_name(store, &m.attributes, &m.name, m.is_public, t);
        if own_specified {
            return (own, true);
        }
        match owner_preferred {
            Some(p) => (Some(format!("{}{}", prefix, p)), owner_specified),
            None => (None, false),
        }
    }

    // ----- fields -----

    fn compute_field_semantics(
        &mut self,
        store: &SymbolStore,
        fid: FieldId,
        preferred: Option<String>,
        specified: bool,
    ) -> FieldSemantics {
        let f = store.field(fid);
        let t = store.type_def(f.declaring_type);
        let tsem = self.get_type_semantics(f.declaring_type).clone();
        let desc = format!("{}.{}", store.source_full_name(f.declaring_type), f.name);

        if f.attributes.has_non_scriptable() || !tsem.is_usable() {
            return FieldSemantics::NotUsable;
        }

        if tsem.is_named_values {
            let value = preferred
                .clone()
                .unwrap_or_else(|| naming::default_case(&f.name));
            let name = self.choose_name(
                store,
                f.declaring_type,
                preferred.as_deref(),
                specified,
                f.is_static,
                f.location.clone(),
                &desc,
            );
            return FieldSemantics::StringConstant {
                name: Some(name),
                value,
            };
        }

        if f.is_const && (t.kind == TypeKind::Enum || preferred.is_none()) {
            let name = if t.kind == TypeKind::Enum {
                Some(self.choose_name(
                    store,
                    f.declaring_type,
                    preferred.as_deref(),
                    specified,
                    f.is_static,
                    f.location.clone(),
                    &desc,
                ))
            } else {
                None
            };
            return constant_semantics(f.const_value.as_ref(), name);
        }

        if f.attributes.has_inline_constant() {
            if f.is_const {
                return constant_semantics(f.const_value.as_ref(), None);
            }
            self.report(
                DiagnosticCode::JSE7114,
                format!("{}: {}", desc, DiagnosticCode::JSE7114.message()),
                f.location.clone(),
            );
        }

        let name = self.choose_name(
            store,
            f.declaring_type,
            preferred.as_deref(),
            specified,
            f.is_static,
            f.location.clone(),
            &desc,
        );
        FieldSemantics::Field { name }
    }
}

fn constant_semantics(value: Option<&ConstValue>, name: Option<String>) -> FieldSemantics {
    match value {
        Some(ConstValue::Bool(b)) => FieldSemantics::BooleanConstant {
            name,
            value: *b,
        },
        Some(ConstValue::Num(n)) => FieldSemantics::NumericConstant {
            name,
            value: *n,
        },
        Some(ConstValue::Str(s)) => FieldSemantics::StringConstant {
            name,
            value: s.clone(),
        },
        Some(ConstValue::Null) | None => FieldSemantics::NullConstant { name },
    }
}
