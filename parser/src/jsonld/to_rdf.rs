use std::borrow::Cow;

use serde_json::{Map, Number, Value};
use uuid::Uuid;

use crate::jsonld::context::{Context, TermDefinition, TypeMapping};
use crate::jsonld::{JsonLdError, JsonLdOptions, Result};
use crate::shared::{
    is_absolute_iri, Node, Statement, NS_TYPE, RDF_FIRST, RDF_NIL, RDF_REST, XSD_BOOLEAN,
    XSD_DOUBLE, XSD_INTEGER,
};

/// Converts a JSON-LD document to RDF statements, in document order.
///
/// Named graphs are flattened: the content of every `@graph` is emitted as
/// plain triples and no statement links a graph name to its content.
pub fn to_rdf(document: &Value, options: &JsonLdOptions) -> Result<Vec<Statement<'static>>> {
    let mut converter = Converter {
        options,
        statements: vec![],
    };
    let context = Context::new(options.base.clone());
    match document {
        Value::Array(nodes) => {
            for node in nodes {
                converter.top_level(node, &context)?;
            }
        }
        Value::Object(_) => converter.top_level(document, &context)?,
        other => {
            return Err(JsonLdError::InvalidDocument {
                message: format!("expected an object or an array, got: {other}"),
            })
        }
    }
    Ok(converter.statements)
}

fn iri(value: String) -> Node<'static> {
    Node::Iri(Cow::Owned(value))
}

fn fresh_blank_node() -> Node<'static> {
    Node::BlankNode(Cow::Owned(Uuid::new_v4().to_string()))
}

/// An expanded IRI or blank node identifier as a node.
fn reference(expanded: String) -> Node<'static> {
    match expanded.strip_prefix("_:") {
        Some(label) => Node::BlankNode(Cow::Owned(label.to_string())),
        None => iri(expanded),
    }
}

fn typed_literal(value: String, datatype: &str) -> Node<'static> {
    Node::Literal {
        value: Cow::Owned(value),
        datatype: Some(Cow::Owned(datatype.to_string())),
        lang: None,
    }
}

/// An object with `@graph` and no `@id` only groups nodes.
fn is_graph_container(map: &Map<String, Value>) -> bool {
    map.contains_key("@graph") && !map.contains_key("@id")
}

fn as_slice(value: &Value) -> &[Value] {
    match value {
        Value::Array(values) => values,
        single => std::slice::from_ref(single),
    }
}

/// Canonical `xsd:double` lexical form, e.g. `1.5E0`.
pub(crate) fn canonical_double(d: f64) -> String {
    let formatted = format!("{d:E}");
    match formatted.split_once('E') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => {
            format!("{mantissa}.0E{exponent}")
        }
        _ => formatted,
    }
}

/// A JSON number as a literal: integral values below 10^21 are integers,
/// everything else is a double.
fn number_literal(number: &Number, datatype: Option<&str>) -> Node<'static> {
    let (lexical, native_type) = if number.is_i64() || number.is_u64() {
        (number.to_string(), XSD_INTEGER)
    } else {
        let d = number.as_f64().unwrap_or_default();
        if d.fract() == 0.0 && d.abs() < 1e21 {
            (format!("{d:.0}"), XSD_INTEGER)
        } else {
            (canonical_double(d), XSD_DOUBLE)
        }
    };
    typed_literal(lexical, datatype.unwrap_or(native_type))
}

struct Converter<'o> {
    options: &'o JsonLdOptions,
    statements: Vec<Statement<'static>>,
}

impl Converter<'_> {
    fn emit(&mut self, subject: Node<'static>, predicate: Node<'static>, object: Node<'static>) {
        if !self.options.produce_generalized_rdf {
            let well_formed = |node: &Node| match node {
                Node::Iri(iri) => is_absolute_iri(iri),
                Node::Literal {
                    datatype: Some(datatype),
                    ..
                } => is_absolute_iri(datatype),
                _ => true,
            };
            if !matches!(predicate, Node::Iri(_))
                || !well_formed(&subject)
                || !well_formed(&predicate)
                || !well_formed(&object)
            {
                return;
            }
        }
        self.statements.push(Statement {
            subject,
            predicate,
            object,
        });
    }

    fn top_level(&mut self, value: &Value, ctx: &Context) -> Result<()> {
        match value {
            Value::Object(map) => {
                self.node(map, ctx)?;
                Ok(())
            }
            other => Err(JsonLdError::InvalidDocument {
                message: format!("expected a node object, got: {other}"),
            }),
        }
    }

    /// Emits the statements of a node object and returns its subject, or
    /// `None` for a graph container.
    fn node(
        &mut self,
        map: &Map<String, Value>,
        active: &Context,
    ) -> Result<Option<Node<'static>>> {
        let local;
        let ctx = match map.get("@context") {
            Some(context) => {
                local = active.parse(context)?;
                &local
            }
            None => active,
        };

        if let Some(graph) = map.get("@graph") {
            for value in as_slice(graph) {
                match value {
                    Value::Object(entry) => {
                        self.node(entry, ctx)?;
                    }
                    Value::Null => {}
                    other => {
                        return Err(JsonLdError::InvalidDocument {
                            message: format!("@graph entries must be node objects, got: {other}"),
                        })
                    }
                }
            }
        }

        let container = is_graph_container(map);
        let mut subject = match map.get("@id") {
            Some(Value::String(id)) => Some(match ctx.expand_iri(id, false)? {
                Some(expanded) => reference(expanded),
                None => fresh_blank_node(),
            }),
            Some(other) => return Err(JsonLdError::InvalidId { value: other.clone() }),
            None if container => None,
            None => Some(fresh_blank_node()),
        };

        for (key, value) in map {
            match key.as_str() {
                "@type" => {
                    let subject = subject.get_or_insert_with(fresh_blank_node).clone();
                    for kind in as_slice(value) {
                        let kind = kind.as_str().ok_or_else(|| JsonLdError::InvalidDocument {
                            message: format!("@type values must be strings, got: {kind}"),
                        })?;
                        if let Some(expanded) = ctx.expand_iri(kind, true)? {
                            self.emit(
                                subject.clone(),
                                iri(NS_TYPE.to_string()),
                                reference(expanded),
                            );
                        }
                    }
                }
                keyword if keyword.starts_with('@') => {}
                property => {
                    let Some(expanded) = ctx.expand_iri(property, true)? else {
                        continue;
                    };
                    let predicate = reference(expanded);
                    let definition = ctx.term(property).cloned().unwrap_or_default();
                    let objects = if definition.list_container && !is_list_object(value) {
                        vec![self.list(as_slice(value), &definition, ctx)?]
                    } else {
                        let mut objects = vec![];
                        self.objects(value, &definition, ctx, &mut objects)?;
                        objects
                    };
                    if objects.is_empty() {
                        continue;
                    }
                    let subject = subject.get_or_insert_with(fresh_blank_node).clone();
                    for object in objects {
                        self.emit(subject.clone(), predicate.clone(), object);
                    }
                }
            }
        }
        Ok(subject)
    }

    /// Converts a property value into zero or more objects.
    fn objects(
        &mut self,
        value: &Value,
        definition: &TermDefinition,
        ctx: &Context,
        out: &mut Vec<Node<'static>>,
    ) -> Result<()> {
        match value {
            Value::Null => {}
            Value::Array(values) => {
                for value in values {
                    self.objects(value, definition, ctx, out)?;
                }
            }
            Value::String(s) => {
                if let Some(node) = self.string(s, definition, ctx)? {
                    out.push(node);
                }
            }
            Value::Number(number) => {
                let datatype = self.coerced_datatype(definition, ctx)?;
                out.push(number_literal(number, datatype.as_deref()));
            }
            Value::Bool(b) => {
                let datatype = self.coerced_datatype(definition, ctx)?;
                out.push(typed_literal(
                    b.to_string(),
                    datatype.as_deref().unwrap_or(XSD_BOOLEAN),
                ));
            }
            Value::Object(map) => {
                if map.contains_key("@value") {
                    if let Some(node) = self.value_object(map, ctx)? {
                        out.push(node);
                    }
                } else if let Some(items) = map.get("@list") {
                    out.push(self.list(as_slice(items), definition, ctx)?);
                } else if let Some(items) = map.get("@set") {
                    self.objects(items, definition, ctx, out)?;
                } else if let Some(subject) = self.node(map, ctx)? {
                    out.push(subject);
                }
            }
        }
        Ok(())
    }

    fn coerced_datatype(
        &self,
        definition: &TermDefinition,
        ctx: &Context,
    ) -> Result<Option<String>> {
        match &definition.type_mapping {
            Some(TypeMapping::Datatype(datatype)) => ctx.expand_iri(datatype, true),
            _ => Ok(None),
        }
    }

    fn string(
        &mut self,
        s: &str,
        definition: &TermDefinition,
        ctx: &Context,
    ) -> Result<Option<Node<'static>>> {
        match &definition.type_mapping {
            Some(TypeMapping::Id) => Ok(ctx.expand_iri(s, false)?.map(reference)),
            Some(TypeMapping::Vocab) => Ok(ctx.expand_iri(s, true)?.map(reference)),
            Some(TypeMapping::Datatype(datatype)) => Ok(ctx
                .expand_iri(datatype, true)?
                .map(|datatype| typed_literal(s.to_string(), &datatype))),
            None => {
                let lang = match &definition.language {
                    Some(lang) => lang.clone(),
                    None => ctx.language.clone(),
                };
                Ok(Some(Node::Literal {
                    value: Cow::Owned(s.to_string()),
                    datatype: None,
                    lang: lang.map(Cow::Owned),
                }))
            }
        }
    }

    fn value_object(
        &mut self,
        map: &Map<String, Value>,
        ctx: &Context,
    ) -> Result<Option<Node<'static>>> {
        let language = map.get("@language");
        let datatype = match map.get("@type") {
            None => None,
            Some(Value::String(datatype)) => ctx.expand_iri(datatype, true)?,
            Some(other) => {
                return Err(JsonLdError::InvalidValue {
                    message: format!("@type must be a string, got: {other}"),
                })
            }
        };
        if matches!(language, Some(Value::String(_))) && datatype.is_some() {
            return Err(JsonLdError::LanguageWithType);
        }
        let value = map.get("@value").unwrap_or(&Value::Null);
        match value {
            Value::Null => Ok(None),
            Value::String(s) => match language {
                Some(Value::String(lang)) => Ok(Some(Node::Literal {
                    value: Cow::Owned(s.clone()),
                    datatype: None,
                    lang: Some(Cow::Owned(lang.clone())),
                })),
                Some(Value::Null) | None => Ok(Some(match datatype {
                    Some(datatype) => typed_literal(s.clone(), &datatype),
                    None => Node::Literal {
                        value: Cow::Owned(s.clone()),
                        datatype: None,
                        lang: None,
                    },
                })),
                Some(other) => Err(JsonLdError::InvalidValue {
                    message: format!("@language must be a string, got: {other}"),
                }),
            },
            Value::Number(number) => Ok(Some(number_literal(number, datatype.as_deref()))),
            Value::Bool(b) => Ok(Some(typed_literal(
                b.to_string(),
                datatype.as_deref().unwrap_or(XSD_BOOLEAN),
            ))),
            other => Err(JsonLdError::InvalidValue {
                message: format!("unsupported @value: {other}"),
            }),
        }
    }

    /// Emits an `rdf:first` / `rdf:rest` chain and returns its head.
    fn list(
        &mut self,
        items: &[Value],
        definition: &TermDefinition,
        ctx: &Context,
    ) -> Result<Node<'static>> {
        let mut members = vec![];
        for item in items {
            match item {
                Value::Object(map) if map.contains_key("@list") => {
                    let nested = map.get("@list").map(as_slice).unwrap_or_default();
                    members.push(self.list(nested, definition, ctx)?);
                }
                Value::Array(nested) => members.push(self.list(nested, definition, ctx)?),
                item => self.objects(item, definition, ctx, &mut members)?,
            }
        }
        if members.is_empty() {
            return Ok(iri(RDF_NIL.to_string()));
        }
        let cells: Vec<Node<'static>> = members.iter().map(|_| fresh_blank_node()).collect();
        for (idx, member) in members.into_iter().enumerate() {
            let rest = cells
                .get(idx + 1)
                .cloned()
                .unwrap_or_else(|| iri(RDF_NIL.to_string()));
            self.emit(cells[idx].clone(), iri(RDF_FIRST.to_string()), member);
            self.emit(cells[idx].clone(), iri(RDF_REST.to_string()), rest);
        }
        Ok(cells[0].clone())
    }
}

fn is_list_object(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.contains_key("@list"))
}
