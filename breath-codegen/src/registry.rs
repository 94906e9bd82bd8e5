//! Compiled templates keyed by generator name.
//!
//! Every template body is compiled up front into one Handlebars registry, so
//! a broken template aborts the run before any file is touched. Rendering is
//! strict: referencing a binding that does not exist is an error rather than
//! an empty string. Members of the keyed bindings are the exception, since a
//! type only carries the labels and columns it declares: a missing
//! `LabeledColumns.<label>` is an empty list and a missing
//! `ToFieldName.<column>` is an empty string.
//!
//! Two helpers are available to every template:
//!
//! - `q` wraps a value in double quotes: `{{q TableName}}` -> `"users"`
//! - `joinq` renders a list as quoted, comma-separated items:
//!   `{{joinq TableColumns}}` -> `"id", "name"` (empty list renders nothing)
//!
//! `lookup` is replaced by a version that applies the same member defaults.

use breath_core::{join_quoted, quote};
use breath_manifest::{TemplateFile, TemplateSpec};
use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
    RenderErrorReason, ScopedJson,
};
use indexmap::IndexMap;
use serde_json::{Value, json};

use crate::error::{Error, Result};

/// A loaded template: its generator name and the imports its output requires.
///
/// The compiled body lives in the owning [`TemplateRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDefinition {
    name: String,
    imports: Vec<String>,
}

impl TemplateDefinition {
    /// Generator name this template is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Imports declared by the template, in declaration order.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }
}

/// Registry of compiled templates for one generation run.
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
    definitions: IndexMap<String, TemplateDefinition>,
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("definitions", &self.definitions)
            .finish_non_exhaustive()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    /// Create an empty registry with the built-in helpers installed.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        // Output is source code, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("q", Box::new(q_helper));
        handlebars.register_helper("joinq", Box::new(joinq_helper));
        handlebars.register_helper("lookup", Box::new(LookupHelper));

        Self {
            handlebars,
            definitions: IndexMap::new(),
        }
    }

    /// Compile every definition. Later duplicates replace earlier ones.
    pub fn load<I, N>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, TemplateSpec)>,
        N: Into<String>,
    {
        let mut registry = Self::new();
        for (name, spec) in definitions {
            registry.register(name, &spec)?;
        }
        Ok(registry)
    }

    /// Compile every template declared in a parsed template file.
    pub fn from_template_file(file: &TemplateFile) -> Result<Self> {
        Self::load(
            file.iter()
                .map(|(name, spec)| (name.to_string(), spec.clone())),
        )
    }

    /// Compile and register one template, replacing any template of the same name.
    pub fn register(&mut self, name: impl Into<String>, spec: &TemplateSpec) -> Result<()> {
        let name = name.into();
        self.handlebars
            .register_template_string(&name, &spec.func)
            .map_err(|e| Error::template_compile(&name, e))?;

        tracing::debug!(template = %name, imports = spec.import.len(), "compiled template");
        self.definitions.insert(
            name.clone(),
            TemplateDefinition {
                name,
                imports: spec.import.clone(),
            },
        );
        Ok(())
    }

    /// Look up a template by generator name (case-sensitive).
    pub fn get(&self, name: &str) -> Option<&TemplateDefinition> {
        self.definitions.get(name)
    }

    /// Check whether a generator name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Registered generator names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the registry holds no templates.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub(crate) fn handlebars(&self) -> &Handlebars<'static> {
        &self.handlebars
    }
}

/// Empty value for a member of a keyed binding, or `None` if `binding` is not keyed.
pub(crate) fn member_default(binding: &str) -> Option<Value> {
    match binding {
        "LabeledColumns" => Some(json!([])),
        "ToFieldName" => Some(json!("")),
        _ => None,
    }
}

/// Split a template path into its root binding and first member key.
///
/// Parent (`../`) and `@root.` prefixes are dropped, and a bracketed key
/// (`LabeledColumns.[full text]`) is unwrapped.
pub(crate) fn split_member(path: &str) -> Option<(&str, &str)> {
    let (binding, rest) = root_path(path).split_once(['.', '/'])?;
    let key = match rest.strip_prefix('[') {
        Some(bracketed) => bracketed.split_once(']').map_or(bracketed, |(key, _)| key),
        None => rest.split(['.', '/']).next().unwrap_or(rest),
    };
    (!key.is_empty()).then_some((binding, key))
}

fn root_path(mut path: &str) -> &str {
    while let Some(rest) = path.strip_prefix("../") {
        path = rest;
    }
    path.strip_prefix("@root.").unwrap_or(path)
}

/// First parameter of a helper, `None` when it is null.
///
/// A missing binding fails with its path so the renderer can tell keyed
/// members apart from typos.
fn first_param<'h>(
    h: &'h Helper<'_>,
    r: &Handlebars,
    helper: &'static str,
) -> std::result::Result<Option<&'h Value>, RenderError> {
    let param = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex(helper, 0))?;
    if param.is_value_missing() && r.strict_mode() {
        return Err(RenderError::strict_error(param.relative_path()));
    }
    Ok(Some(param.value()).filter(|value| !value.is_null()))
}

fn q_helper(
    h: &Helper,
    r: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = match first_param(h, r, "q")? {
        Some(value) => value
            .as_str()
            .ok_or(RenderErrorReason::InvalidParamType("string"))?,
        None => "",
    };
    out.write(&quote(value))?;
    Ok(())
}

fn joinq_helper(
    h: &Helper,
    r: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let Some(items) = first_param(h, r, "joinq")? else {
        return Ok(());
    };
    let items = items
        .as_array()
        .ok_or(RenderErrorReason::InvalidParamType("array"))?;
    let items: Vec<&str> = items
        .iter()
        .map(Value::as_str)
        .collect::<Option<_>>()
        .ok_or(RenderErrorReason::InvalidParamType("array of strings"))?;
    out.write(&join_quoted(&items))?;
    Ok(())
}

/// `lookup` that falls back to the member default of keyed bindings.
#[derive(Clone, Copy)]
struct LookupHelper;

impl HelperDef for LookupHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> std::result::Result<ScopedJson<'rc>, RenderError> {
        let collection = h
            .param(0)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("lookup", 0))?;
        let index = h
            .param(1)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("lookup", 1))?;

        let value = match collection.value() {
            Value::Array(items) => index
                .value()
                .as_u64()
                .and_then(|i| items.get(i as usize)),
            Value::Object(members) => index.value().as_str().and_then(|key| members.get(key)),
            _ => None,
        };
        if let Some(value) = value {
            return Ok(value.clone().into());
        }

        let default = collection
            .relative_path()
            .filter(|_| !collection.is_value_missing())
            .and_then(|path| member_default(root_path(path)));
        match default {
            Some(default) => Ok(default.into()),
            None if r.strict_mode() => Err(RenderError::strict_error(collection.relative_path())),
            None => Ok(Value::Null.into()),
        }
    }
}
