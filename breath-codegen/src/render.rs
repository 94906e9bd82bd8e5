//! Template execution for one (type, generator) match.

use handlebars::RenderErrorReason;
use serde_json::Value;

use crate::{
    error::{Error, Result},
    metadata::TypeMetadata,
    registry::{TemplateDefinition, TemplateRegistry, member_default, split_member},
};

/// One template's output for one type, plus the imports the template declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFragment {
    /// Generator name that produced this fragment
    pub template: String,
    /// Type the fragment was rendered for
    pub type_name: String,
    pub imports: Vec<String>,
    pub code: String,
}

/// Render `template` against `metadata`.
///
/// Fails if the template references a binding that does not exist or a
/// helper receives the wrong argument type. A label or column the type does
/// not carry renders as an empty list or string.
pub fn render(
    registry: &TemplateRegistry,
    metadata: &TypeMetadata,
    template: &TemplateDefinition,
) -> Result<GeneratedFragment> {
    let mut data = handlebars::to_json(metadata);
    let code = loop {
        let e = match registry.handlebars().render(template.name(), &data) {
            Ok(code) => break code,
            Err(e) => e,
        };
        if !fill_missing_member(&mut data, e.reason()) {
            return Err(Error::template_render(
                template.name(),
                &metadata.type_name,
                e,
            ));
        }
    };

    tracing::debug!(
        template = template.name(),
        type_name = %metadata.type_name,
        bytes = code.len(),
        "rendered fragment"
    );

    Ok(GeneratedFragment {
        template: template.name().to_string(),
        type_name: metadata.type_name.clone(),
        imports: template.imports().to_vec(),
        code,
    })
}

/// Insert the empty value for a keyed member the type does not carry.
///
/// Returns `false` when the failure is anything else, including a member
/// that was already filled.
fn fill_missing_member(data: &mut Value, reason: &RenderErrorReason) -> bool {
    let RenderErrorReason::MissingVariable(Some(path)) = reason else {
        return false;
    };
    let Some((binding, key)) = split_member(path) else {
        return false;
    };
    let Some(default) = member_default(binding) else {
        return false;
    };
    let Some(members) = data.get_mut(binding).and_then(Value::as_object_mut) else {
        return false;
    };
    if members.contains_key(key) {
        return false;
    }

    tracing::trace!(binding, key, "defaulting missing member");
    members.insert(key.to_string(), default);
    true
}
