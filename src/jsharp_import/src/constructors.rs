use crate::importer::{MemberKey, MetadataImporter};
use crate::naming;
use crate::semantics::{ConstructorSemantics, JsonMember};
use crate::templates::{TemplateContext, validate_template};
use jsharp_model::{
    DiagnosticCode, MethodDef, MethodId, SymbolStore, TypeId, TypeRef,
};

impl MetadataImporter {
    pub(crate) fn process_constructors(&mut self, store: &SymbolStore, tid: TypeId) {
        let t = store.type_def(tid);
        let mut ctors: Vec<MethodId> = t
            .methods
            .iter()
            .copied()
            .filter(|&mid| store.method(mid).is_ctor)
            .collect();
        ctors.sort_by_key(|&mid| {
            let m = store.method(mid);
            let params_joined = m
                .params
                .iter()
                .map(|p| store.type_ref_name(&p.ty))
                .collect::<Vec<_>>()
                .join(",");
            (m.params.len(), params_joined)
        });

        let mut seen_nameless = 0usize;
        for mid in ctors {
            if self.ignored_members.contains(&MemberKey::Constructor(mid)) {
                continue;
            }
            let sem = self.compute_constructor_semantics(store, mid, &mut seen_nameless);
            self.constructor_semantics.insert(mid, sem);
        }
    }

    fn compute_constructor_semantics(
        &mut self,
        store: &SymbolStore,
        mid: MethodId,
        seen_nameless: &mut usize,
    ) -> ConstructorSemantics {
        let m = store.method(mid);
        let tid = m.declaring_type;
        let tsem = self.get_type_semantics(tid).clone();
        let desc = format!("{}..ctor", store.source_full_name(tid));

        if !tsem.is_usable() {
            return ConstructorSemantics::NotUsable;
        }

        // The marker parameter attaches attributes to the synthetic default
        // value-type constructor; such a constructor has no script presence.
        let marker = TypeRef::Def(store.core.value_type_ctor_marker);
        if m.params.iter().any(|p| p.ty == marker) {
            return ConstructorSemantics::NotUsable;
        }

        if m.is_static {
            return ConstructorSemantics::unnamed();
        }

        let expand_params = self.resolve_expand_params(store, m);

        if let Some(ic) = m.attributes.inline_code() {
            let ctx = TemplateContext {
                this_allowed: false,
                params: &m.params,
                type_params: store
                    .type_def(tid)
                    .type_params
                    .iter()
                    .map(|tp| tp.name.as_str())
                    .collect(),
            };
            match validate_template(&ic.code, &ctx) {
                Ok(()) => {
                    return ConstructorSemantics::InlineCode {
                        template: ic.code.clone(),
                        skip_in_initializer: false,
                    };
                }
                Err(reason) => {
                    self.report(
                        DiagnosticCode::JSE7101,
                        format!("{}: {}: {}", desc, DiagnosticCode::JSE7101.message(), reason),
                        m.location.clone(),
                    );
                }
            }
        }

        if m.attributes.has_alternate_signature() {
            return self.alternate_signature_semantics(store, m, expand_params);
        }

        if m.attributes.has_object_literal() || (tsem.is_serializable && tsem.is_imported) {
            match self.json_constructor_semantics(store, m, &desc) {
                Some(sem) => return sem,
                None => return ConstructorSemantics::unnamed(),
            }
        }

        // A lone params-array-of-object constructor on an imported type
        // builds a dictionary from its arguments.
        if tsem.is_imported && m.params.len() == 1 && m.params[0].is_params {
            if let TypeRef::Array { elem, .. } = &m.params[0].ty {
                if **elem == TypeRef::Def(store.core.object) {
                    return ConstructorSemantics::InlineCode {
                        template: format!("{{$System.Script}}.mkdict({{*{}}})", m.params[0].name),
                        skip_in_initializer: false,
                    };
                }
            }
        }

        if let Some(explicit) = m.attributes.script_name() {
            if explicit == "$ctor" {
                return ConstructorSemantics::Unnamed {
                    expand_params,
                    skip_in_initializer: false,
                    generate_code: !tsem.is_imported,
                };
            }
            if naming::is_valid_identifier(explicit) {
                let name = self.choose_name(
                    store,
                    tid,
                    Some(explicit),
                    true,
                    true,
                    m.location.clone(),
                    &desc,
                );
                return ConstructorSemantics::Named {
                    name,
                    expand_params,
                    skip_in_initializer: false,
                    generate_code: !tsem.is_imported,
                };
            }
            self.report(
                DiagnosticCode::JSE7001,
                format!("'{}': {}", explicit, DiagnosticCode::JSE7001.message()),
                m.location.clone(),
            );
        }

        *seen_nameless += 1;
        if *seen_nameless == 1 {
            if self.options.minimize_names && tsem.is_serializable {
                let name = self.choose_name(
                    store,
                    tid,
                    None,
                    false,
                    true,
                    m.location.clone(),
                    &desc,
                );
                return ConstructorSemantics::StaticMethod {
                    name,
                    expand_params,
                    skip_in_initializer: false,
                    generate_code: !tsem.is_imported,
                };
            }
            return ConstructorSemantics::Unnamed {
                expand_params,
                skip_in_initializer: false,
                generate_code: !tsem.is_imported,
            };
        }

        // Subsequent nameless constructors take sequential names.
        let mut i = *seen_nameless;
        let name = loop {
            let candidate = format!("$ctor{}", i);
            if self.is_member_name_available(store, tid, &candidate, true) {
                break candidate;
            }
            i += 1;
        };
        self.reserve_member_name(tid, &name, true);
        if tsem.is_serializable {
            ConstructorSemantics::StaticMethod {
                name,
                expand_params,
                skip_in_initializer: false,
                generate_code: !tsem.is_imported,
            }
        } else {
            ConstructorSemantics::Named {
                name,
                expand_params,
                skip_in_initializer: false,
                generate_code: !tsem.is_imported,
            }
        }
    }

    /// Alternate signatures share the main constructor's name and generate
    /// no code of their own.
    fn alternate_signature_semantics(
        &mut self,
        store: &SymbolStore,
        m: &MethodDef,
        expand_params: bool,
    ) -> ConstructorSemantics {
        let t = store.type_def(m.declaring_type);
        let main = t
            .methods
            .iter()
            .map(|&mid| store.method(mid))
            .find(|c| c.is_ctor && !c.is_static && !c.attributes.has_alternate_signature());
        let main_name = main.and_then(|c| c.attributes.script_name());
        match main_name {
            Some(name) if name != "$ctor" && naming::is_valid_identifier(name) => {
                ConstructorSemantics::Named {
                    name: name.to_string(),
                    expand_params,
                    skip_in_initializer: false,
                    generate_code: false,
                }
            }
            _ => ConstructorSemantics::Unnamed {
                expand_params,
                skip_in_initializer: false,
                generate_code: false,
            },
        }
    }

    /// Binds each parameter to the property or field whose lowercased name
    /// matches; a missing or differently typed member is a diagnostic and
    /// the constructor falls back to an unnamed one.
    fn json_constructor_semantics(
        &mut self,
        store: &SymbolStore,
        m: &MethodDef,
        desc: &str,
    ) -> Option<ConstructorSemantics> {
        let t = store.type_def(m.declaring_type);
        let mut map = Vec::new();
        let mut ok = true;
        for param in &m.params {
            let wanted = param.name.to_lowercase();
            let property = t
                .properties
                .iter()
                .copied()
                .find(|&pid| store.property(pid).name.to_lowercase() == wanted);
            let field = t
                .fields
                .iter()
                .copied()
                .find(|&fid| store.field(fid).name.to_lowercase() == wanted);
            let bound = match (property, field) {
                (Some(pid), _) => {
                    if store.property(pid).ty == param.ty {
                        Some(JsonMember::Property(pid))
                    } else {
                        None
                    }
                }
                (None, Some(fid)) => {
                    if store.field(fid).ty == param.ty {
                        Some(JsonMember::Field(fid))
                    } else {
                        None
                    }
                }
                (None, None) => None,
            };
            match bound {
                Some(member) => map.push(member),
                None => {
                    self.report(
                        DiagnosticCode::JSE7110,
                        format!(
                            "{}: parameter '{}': {}",
                            desc,
                            param.name,
                            DiagnosticCode::JSE7110.message()
                        ),
                        m.location.clone(),
                    );
                    ok = false;
                }
            }
        }
        if ok {
            Some(ConstructorSemantics::Json {
                parameter_to_member: map,
            })
        } else {
            None
        }
    }
}
