use anyhow::{Result, anyhow};
use jsharp_import::MetadataImporter;
use jsharp_model::{CompilerOptions, SymbolStore, TypeId};
use jsharp_rewriter::rewrite_body;
use jsharp_runtime::RuntimeCallEmitter;
use jsharp_script::Stmt;
use log::{debug, info};
use petgraph::algo::toposort;
use petgraph::graph::DiGraph;

/// One compilation over a symbol graph. Owns the importer tables for the
/// lifetime of the compilation; strictly single-threaded and synchronous.
pub struct Compilation {
    pub store: SymbolStore,
    pub options: CompilerOptions,
    pub importer: MetadataImporter,
}

impl Compilation {
    pub fn new(store: SymbolStore, options: CompilerOptions) -> Self {
        Compilation {
            store,
            options,
            importer: MetadataImporter::new(options),
        }
    }

    /// Prepares every type leaves-first over the inheritance graph, so each
    /// type sees its bases fully imported. A cycle means the external
    /// resolver handed over a malformed graph.
    pub fn prepare_all(&mut self) -> Result<()> {
        let mut graph = DiGraph::<TypeId, ()>::new();
        let nodes: Vec<_> = self
            .store
            .types
            .iter()
            .map(|t| graph.add_node(t.id))
            .collect();
        for t in &self.store.types {
            if let Some(b) = t.base_type {
                graph.add_edge(nodes[b.0], nodes[t.id.0], ());
            }
            for &i in &t.interfaces {
                graph.add_edge(nodes[i.0], nodes[t.id.0], ());
            }
            if let Some(d) = t.declaring_type {
                graph.add_edge(nodes[d.0], nodes[t.id.0], ());
            }
        }
        let order = toposort(&graph, None).map_err(|c| {
            anyhow!(
                "inheritance graph contains a cycle involving {}",
                self.store.source_full_name(graph[c.node_id()])
            )
        })?;
        for node in order {
            let tid = graph[node];
            debug!("importing {}", self.store.source_full_name(tid));
            self.importer.prepare(&self.store, tid);
        }
        info!(
            "imported {} types ({} diagnostics)",
            self.store.types.len(),
            self.importer.diagnostics.diagnostics.len()
        );
        Ok(())
    }

    /// The driver checks this after each phase and writes no output when set.
    pub fn has_errors(&self) -> bool {
        self.importer.diagnostics.has_errors()
    }

    /// A fresh runtime-call emitter over this compilation's tables.
    pub fn runtime_emitter(&self) -> RuntimeCallEmitter<'_> {
        RuntimeCallEmitter::new(&self.store, &self.importer, self.options)
    }

    /// Lowers a method body containing gotos into loop-and-switch form.
    pub fn rewrite_method_body(&self, body: &Stmt) -> Stmt {
        rewrite_body(body)
    }
}
