use crate::naming::is_valid_identifier;
use jsharp_model::Param;

/// What an inline template may refer to.
pub struct TemplateContext<'a> {
    pub this_allowed: bool,
    pub params: &'a [Param],
    pub type_params: Vec<&'a str>,
}

/// Validates an inline-code template. Placeholders:
/// `{this}` for the receiver, `{name}` for a parameter or type parameter,
/// `{*name}` for an expanded parameter array, `{$Some.Type}` for a type.
/// Braces whose content does not look like a placeholder are literal text,
/// so object-literal templates stay expressible.
pub fn validate_template(code: &str, ctx: &TemplateContext) -> Result<(), String> {
    let bytes = code.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'{' {
            i += 1;
            continue;
        }
        let close = match code[i + 1..].find('}') {
            Some(off) => i + 1 + off,
            None => {
                i += 1;
                continue;
            }
        };
        let content = &code[i + 1..close];
        if looks_like_placeholder(content) {
            check_placeholder(content, ctx)?;
            i = close + 1;
        } else {
            i += 1;
        }
    }
    Ok(())
}

fn looks_like_placeholder(content: &str) -> bool {
    !content.is_empty()
        && content
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '*' | '.'))
}

fn check_placeholder(placeholder: &str, ctx: &TemplateContext) -> Result<(), String> {
    if placeholder == "this" {
        if !ctx.this_allowed {
            return Err("'{this}' is not available here".to_string());
        }
        return Ok(());
    }
    if let Some(type_name) = placeholder.strip_prefix('$') {
        if !type_name.split('.').all(is_valid_identifier) {
            return Err(format!(
                "'{{{}}}' is not a valid type reference",
                placeholder
            ));
        }
        return Ok(());
    }
    if let Some(name) = placeholder.strip_prefix('*') {
        return match ctx.params.iter().find(|p| p.name == name) {
            Some(p) if p.is_params => Ok(()),
            Some(_) => Err(format!(
                "'{{*{}}}' expands a parameter that is not a parameter array",
                name
            )),
            None => Err(format!("unknown parameter '{}'", name)),
        };
    }
    if ctx.params.iter().any(|p| p.name == placeholder)
        || ctx.type_params.iter().any(|t| *t == placeholder)
    {
        return Ok(());
    }
    Err(format!("unknown placeholder '{{{}}}'", placeholder))
}
