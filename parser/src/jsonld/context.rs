use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::jsonld::{JsonLdError, Result};
use crate::shared::{is_absolute_iri, resolve_iri};

/// Maximum number of term to term hops while expanding an IRI.
const MAX_EXPANSION_DEPTH: usize = 16;

/// Type coercion of a term (`@type` in a term definition).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeMapping {
    Id,
    Vocab,
    /// Datatype IRI, possibly compact, expanded on use.
    Datatype(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermDefinition {
    /// `None` when the term is mapped to `null` and must be ignored.
    pub iri: Option<String>,
    pub type_mapping: Option<TypeMapping>,
    /// `Some(None)` when the definition explicitly clears the language.
    pub language: Option<Option<String>>,
    pub list_container: bool,
}

/// An active context. Term definitions are stored as written and expanded
/// lazily, so definitions may refer to each other in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    document_base: Option<String>,
    pub base: Option<String>,
    pub vocab: Option<String>,
    pub language: Option<String>,
    terms: HashMap<String, TermDefinition>,
}

impl Context {
    pub fn new(base: Option<String>) -> Self {
        Context {
            document_base: base.clone(),
            base,
            ..Default::default()
        }
    }

    pub fn term(&self, key: &str) -> Option<&TermDefinition> {
        self.terms.get(key)
    }

    /// Returns the context resulting from applying `local` on top of `self`.
    pub fn parse(&self, local: &Value) -> Result<Context> {
        match local {
            Value::Null => Ok(Context::new(self.document_base.clone())),
            Value::String(url) => Err(JsonLdError::RemoteContext { url: url.clone() }),
            Value::Array(contexts) => contexts
                .iter()
                .try_fold(self.clone(), |active, ctx| active.parse(ctx)),
            Value::Object(map) => {
                if let Some(inner) = map.get("@context") {
                    return self.parse(inner);
                }
                self.parse_map(map)
            }
            _ => Err(JsonLdError::InvalidContext {
                message: format!("invalid context type: {local}"),
            }),
        }
    }

    fn parse_map(&self, map: &Map<String, Value>) -> Result<Context> {
        let mut result = self.clone();

        // @base first, @vocab may be relative to it
        if let Some(base) = map.get("@base") {
            result.base = match base {
                Value::Null => None,
                Value::String(iri) => {
                    Some(resolve_iri(self.base.as_deref(), iri).into_owned())
                }
                other => {
                    return Err(JsonLdError::InvalidContext {
                        message: format!("@base must be a string, got: {other}"),
                    })
                }
            };
        }
        for (key, value) in map.iter() {
            match key.as_str() {
                "@base" | "@version" | "@protected" | "@propagate" | "@import" => {}
                "@vocab" => {
                    result.vocab = match value {
                        Value::Null => None,
                        Value::String(vocab) if vocab.is_empty() => result.base.clone(),
                        Value::String(vocab) if vocab.starts_with("_:") => Some(vocab.clone()),
                        Value::String(vocab) => {
                            Some(resolve_iri(result.base.as_deref(), vocab).into_owned())
                        }
                        other => {
                            return Err(JsonLdError::InvalidContext {
                                message: format!("@vocab must be a string, got: {other}"),
                            })
                        }
                    };
                }
                "@language" => {
                    result.language = match value {
                        Value::Null => None,
                        Value::String(lang) => Some(lang.clone()),
                        other => {
                            return Err(JsonLdError::InvalidContext {
                                message: format!("@language must be a string, got: {other}"),
                            })
                        }
                    };
                }
                keyword if keyword.starts_with('@') => {}
                term => {
                    let definition = parse_term_definition(term, value)?;
                    result.terms.insert(term.to_string(), definition);
                }
            }
        }
        Ok(result)
    }

    /// Expands `value` to an absolute IRI when the context allows it.
    ///
    /// `vocab` selects vocabulary-relative expansion (properties, types)
    /// over document-relative expansion (`@id` values). `Ok(None)` means the
    /// term is mapped to `null`.
    pub fn expand_iri(&self, value: &str, vocab: bool) -> Result<Option<String>> {
        self.expand_iri_depth(value, vocab, 0)
    }

    fn expand_iri_depth(&self, value: &str, vocab: bool, depth: usize) -> Result<Option<String>> {
        if depth > MAX_EXPANSION_DEPTH {
            return Err(JsonLdError::InvalidContext {
                message: format!("cyclic IRI mapping involving '{value}'"),
            });
        }
        if value.starts_with('@') {
            return Ok(Some(value.to_string()));
        }
        if vocab {
            if let Some(definition) = self.terms.get(value) {
                match &definition.iri {
                    None => return Ok(None),
                    Some(iri) if iri != value => {
                        return self.expand_iri_depth(iri, true, depth + 1)
                    }
                    Some(_) => {}
                }
            }
        }
        if let Some((prefix, suffix)) = value.split_once(':') {
            if prefix == "_" || suffix.starts_with("//") {
                return Ok(Some(value.to_string()));
            }
            if let Some(TermDefinition {
                iri: Some(namespace),
                ..
            }) = self.terms.get(prefix)
            {
                if namespace != prefix {
                    if let Some(namespace) = self.expand_iri_depth(namespace, true, depth + 1)? {
                        return Ok(Some(format!("{namespace}{suffix}")));
                    }
                }
            }
            if is_absolute_iri(value) {
                return Ok(Some(value.to_string()));
            }
        }
        if vocab {
            Ok(Some(match &self.vocab {
                Some(vocab) => format!("{vocab}{value}"),
                None => value.to_string(),
            }))
        } else {
            Ok(Some(resolve_iri(self.base.as_deref(), value).into_owned()))
        }
    }
}

fn parse_term_definition(term: &str, value: &Value) -> Result<TermDefinition> {
    match value {
        Value::Null => Ok(TermDefinition::default()),
        Value::String(iri) => Ok(TermDefinition {
            iri: Some(iri.clone()),
            ..Default::default()
        }),
        Value::Object(map) => {
            let iri = match map.get("@id") {
                None => Some(term.to_string()),
                Some(Value::Null) => None,
                Some(Value::String(iri)) => Some(iri.clone()),
                Some(other) => {
                    return Err(JsonLdError::InvalidContext {
                        message: format!("@id of term '{term}' must be a string, got: {other}"),
                    })
                }
            };
            let type_mapping = match map.get("@type") {
                None => None,
                Some(Value::String(kind)) => Some(match kind.as_str() {
                    "@id" => TypeMapping::Id,
                    "@vocab" => TypeMapping::Vocab,
                    datatype => TypeMapping::Datatype(datatype.to_string()),
                }),
                Some(other) => {
                    return Err(JsonLdError::InvalidContext {
                        message: format!("@type of term '{term}' must be a string, got: {other}"),
                    })
                }
            };
            let language = match map.get("@language") {
                None => None,
                Some(Value::Null) => Some(None),
                Some(Value::String(lang)) => Some(Some(lang.clone())),
                Some(other) => {
                    return Err(JsonLdError::InvalidContext {
                        message: format!(
                            "@language of term '{term}' must be a string, got: {other}"
                        ),
                    })
                }
            };
            let list_container = match map.get("@container") {
                Some(Value::String(container)) => container == "@list",
                Some(Value::Array(containers)) => {
                    containers.iter().any(|c| c.as_str() == Some("@list"))
                }
                _ => false,
            };
            Ok(TermDefinition {
                iri,
                type_mapping,
                language,
                list_container,
            })
        }
        other => Err(JsonLdError::InvalidContext {
            message: format!("invalid definition for term '{term}': {other}"),
        }),
    }
}
