use jsharp_model::TypeId;
use std::fmt::{self, Write};
use thiserror::Error;

/// Resolves a type handle to its dotted script name at serialization time.
/// The metadata importer is the canonical implementation.
pub trait TypeNameResolver {
    fn dotted_name(&self, id: TypeId) -> Option<String>;
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("formatter error: {0}")]
    Fmt(#[from] fmt::Error),
    #[error("type reference {0} has no script name")]
    UnresolvedTypeRef(TypeId),
    #[error("goto '{0}' survived to serialization")]
    UnloweredGoto(String),
}

pub struct EmitCtx<'a> {
    pub indent: usize,
    pub resolver: Option<&'a dyn TypeNameResolver>,
}

impl Default for EmitCtx<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> EmitCtx<'a> {
    pub fn new() -> Self {
        EmitCtx {
            indent: 0,
            resolver: None,
        }
    }

    pub fn with_resolver(resolver: &'a dyn TypeNameResolver) -> Self {
        EmitCtx {
            indent: 0,
            resolver: Some(resolver),
        }
    }

    pub fn write_indent<W: Write>(&self, w: &mut W) -> Result<(), EmitError> {
        for _ in 0..self.indent {
            w.write_char('\t')?;
        }
        Ok(())
    }
}

pub trait Emit {
    fn emit<W: Write>(&self, w: &mut W, cx: &mut EmitCtx) -> Result<(), EmitError>;
}

pub struct Emitter<'a> {
    resolver: Option<&'a dyn TypeNameResolver>,
}

impl Default for Emitter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Emitter<'a> {
    pub fn new() -> Self {
        Emitter { resolver: None }
    }

    pub fn with_resolver(resolver: &'a dyn TypeNameResolver) -> Self {
        Emitter {
            resolver: Some(resolver),
        }
    }

    pub fn write<T: Emit>(&self, item: &T) -> Result<String, EmitError> {
        let mut s = String::new();
        let mut cx = EmitCtx {
            indent: 0,
            resolver: self.resolver,
        };
        item.emit(&mut s, &mut cx)?;
        Ok(s)
    }
}
