//! Record lowering: the argument, reference, and state records of one shape.
//!
//! A shape is either an entity's root block or one node. Child nodes are always referred to by their own records,
//! qualified with the namespace module when the shape lives in the entity file.

use std::collections::HashMap;

use terragen_core::lang::runtime::{self, RuntimeItemId};
use terragen_core::naming;

use super::errors::LowerError;
use super::GraphLowering;
use crate::backend::ir::{
    Derive, IrExpr, IrField, IrImpl, IrItem, IrMethod, IrStmt, IrStruct, IrType, Receiver, SerdeArg, TraversalStep,
    Visibility,
};
use crate::backend::mapping;
use crate::frontend::graph::{Attribute, Docs, Node, NodeId};
use crate::frontend::NestingMode;

/// Members of one shape.
#[derive(Clone, Copy)]
pub(super) struct Shape<'g> {
    /// Dotted path of the shape inside the entity; empty for the root block.
    pub path: &'g [String],
    pub name: Option<&'g str>,
    pub attributes: &'g [Attribute],
    pub children: &'g [NodeId],
}

impl<'g> Shape<'g> {
    fn member_path(&self, member: &str) -> String {
        let mut parts: Vec<&str> = self.path.iter().map(String::as_str).collect();
        parts.extend(self.name);
        parts.push(member);
        parts.join(".")
    }
}

/// Names of the three records of one shape.
#[derive(Debug, Clone)]
pub(super) struct TriadNames {
    pub args: String,
    pub attributes: String,
    pub state: String,
}

impl TriadNames {
    /// The triad of a node: `<Pascal(unique_name)>`, `...Attributes`, `...State`.
    pub fn of_node(node: &Node) -> Self {
        let [args, attributes, state] = naming::record_triad(&node.unique_name);
        Self { args, attributes, state }
    }
}

/// Rejects two schema names that land on the same Rust member.
struct Members<'r> {
    record: &'r str,
    seen: HashMap<String, String>,
}

impl<'r> Members<'r> {
    fn new(record: &'r str) -> Self {
        Self {
            record,
            seen: HashMap::new(),
        }
    }

    fn claim(&mut self, schema_name: &str) -> Result<String, LowerError> {
        let member = naming::member_name(schema_name);
        if let Some(first) = self.seen.get(&member) {
            return Err(LowerError::DuplicateMember {
                record: self.record.to_string(),
                member,
                first: first.clone(),
                second: schema_name.to_string(),
            });
        }
        self.seen.insert(member.clone(), schema_name.to_string());
        Ok(member)
    }
}

fn description_lines(docs: &Docs) -> Vec<String> {
    let mut lines: Vec<String> = docs
        .description
        .iter()
        .flat_map(|d| d.lines())
        .map(|line| line.trim_end().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    if docs.deprecated {
        lines.push("**Deprecated.**".to_string());
    }
    if docs.sensitive {
        lines.push("Sensitive: the value is redacted in plans and logs.".to_string());
    }
    lines
}

fn required_marker(required: bool) -> String {
    if required { "Required." } else { "Optional." }.to_string()
}

fn cardinality_marker(node: &Node) -> Option<String> {
    match (node.min_items, node.max_items) {
        (0, 0) => None,
        (min, 0) => Some(format!("At least {min} item(s).")),
        (0, max) => Some(format!("At most {max} item(s).")),
        (min, max) if min == max => Some(format!("Exactly {min} item(s).")),
        (min, max) => Some(format!("Between {min} and {max} items.")),
    }
}

/// Wrap a node's record type in its collection wrappers, innermost first.
fn wrap_nesting(path: &[NestingMode], inner: IrType, reference: bool) -> IrType {
    path.iter().rev().fold(inner, |ty, mode| match (mode, reference) {
        (NestingMode::Single, _) => ty,
        (NestingMode::List, false) | (NestingMode::Set, false) => IrType::vec(ty),
        (NestingMode::Map, false) => IrType::map(ty),
        (NestingMode::List, true) => IrType::runtime_generic(RuntimeItemId::ListRef, ty),
        (NestingMode::Set, true) => IrType::runtime_generic(RuntimeItemId::SetRef, ty),
        (NestingMode::Map, true) => IrType::runtime_generic(RuntimeItemId::MapRef, ty),
    })
}

fn empty_check(ty: &IrType) -> Option<&'static str> {
    match ty {
        IrType::Option(_) => Some("Option::is_none"),
        IrType::Vec(_) => Some("Vec::is_empty"),
        IrType::Map(_) => Some("std::collections::BTreeMap::is_empty"),
        _ => None,
    }
}

fn serde_crate() -> SerdeArg {
    SerdeArg::Crate(runtime::full_path(RuntimeItemId::Serde))
}

impl GraphLowering<'_> {
    /// Record type of a child node in the file being lowered.
    fn node_type(&self, name: String, in_namespace: bool) -> IrType {
        let module = if in_namespace { None } else { Some(self.names.namespace.as_str()) };
        IrType::named_in(module, name)
    }

    /// The argument record: every argument attribute and every argument child node.
    pub(super) fn args_record(
        &self,
        shape: Shape<'_>,
        name: &str,
        docs: Vec<String>,
        in_namespace: bool,
    ) -> Result<IrStruct, LowerError> {
        let mut members = Members::new(name);
        let mut fields = Vec::new();

        for attr in shape.attributes.iter().filter(|a| a.is_argument) {
            let member = members.claim(&attr.name)?;
            let ty = mapping::argument_type(&attr.ty).map_err(|source| LowerError::Mapping {
                path: shape.member_path(&attr.name),
                source,
            })?;
            let ty = if attr.is_required { ty } else { IrType::option(ty) };
            let mut docs = description_lines(&attr.docs);
            docs.push(required_marker(attr.is_required));
            fields.push(argument_field(member, ty, &attr.name, attr.is_required, docs));
        }

        for node in shape.children.iter().map(|id| self.graph.node(*id)) {
            if !node.is_argument {
                continue;
            }
            let member = members.claim(&node.name)?;
            let record = self.node_type(TriadNames::of_node(node).args, in_namespace);
            // Singular blocks stay nullable even when required; the marker goes into the docs.
            let ty = if node.is_singular() {
                IrType::option(record)
            } else {
                wrap_nesting(&node.nesting_path, record, false)
            };
            let mut docs = description_lines(&node.docs);
            docs.push(required_marker(node.is_required));
            docs.extend(cardinality_marker(node));
            fields.push(argument_field(member, ty, &node.name, node.is_required, docs));
        }

        let mut derives = vec![Derive::Debug, Derive::Clone];
        if fields.iter().all(|f| empty_check(&f.ty).is_some()) {
            derives.push(Derive::Default);
        }
        derives.extend([Derive::PartialEq, Derive::Serialize]);

        Ok(IrStruct {
            name: name.to_string(),
            docs,
            derives,
            serde: vec![serde_crate()],
            fields,
            visibility: Visibility::Public,
        })
    }

    /// The reference record with its `FromReference` impl and one accessor per attribute and child node.
    pub(super) fn attributes_record(
        &self,
        shape: Shape<'_>,
        name: &str,
        docs: Vec<String>,
        in_namespace: bool,
    ) -> Result<Vec<IrItem>, LowerError> {
        let mut members = Members::new(name);
        let base = IrExpr::self_field("reference");
        let mut accessors = Vec::new();

        for attr in shape.attributes {
            let member = members.claim(&attr.name)?;
            let ty = mapping::reference_type(&attr.ty).map_err(|source| LowerError::Mapping {
                path: shape.member_path(&attr.name),
                source,
            })?;
            let value = IrExpr::FromReference {
                ty: ty.clone(),
                reference: Box::new(traverse(&base, TraversalStep::Attribute, &attr.name)),
            };
            accessors.push(IrMethod::getter(member, ty, value).with_docs(description_lines(&attr.docs)));
        }

        for node in shape.children.iter().map(|id| self.graph.node(*id)) {
            let member = members.claim(&node.name)?;
            let record = self.node_type(TriadNames::of_node(node).attributes, in_namespace);
            let ty = wrap_nesting(&node.nesting_path, record, true);
            let value = IrExpr::FromReference {
                ty: ty.clone(),
                reference: Box::new(traverse(&base, TraversalStep::Block, &node.name)),
            };
            accessors.push(IrMethod::getter(member, ty, value).with_docs(description_lines(&node.docs)));
        }

        let record = IrStruct {
            name: name.to_string(),
            docs,
            derives: vec![Derive::Debug, Derive::Clone, Derive::PartialEq],
            serde: Vec::new(),
            fields: vec![IrField::new("reference", IrType::runtime(RuntimeItemId::Reference)).private()],
            visibility: Visibility::Public,
        };
        let from_reference = IrImpl {
            target: name.to_string(),
            trait_id: Some(RuntimeItemId::FromReference),
            methods: vec![IrMethod {
                name: "from_reference".to_string(),
                docs: Vec::new(),
                visibility: Visibility::Private,
                receiver: Receiver::None,
                params: vec![("reference".to_string(), IrType::runtime(RuntimeItemId::Reference))],
                return_type: IrType::SelfType,
                body: vec![IrStmt::Expr(IrExpr::StructLit(vec![(
                    "reference".to_string(),
                    IrExpr::var("reference"),
                )]))],
            }],
        };

        let mut items = vec![IrItem::Struct(record), IrItem::Impl(from_reference)];
        if !accessors.is_empty() {
            items.push(IrItem::Impl(IrImpl {
                target: name.to_string(),
                trait_id: None,
                methods: accessors,
            }));
        }
        Ok(items)
    }

    /// The decoded-state record: every attribute and every child node, tolerant of `null` and missing keys.
    pub(super) fn state_record(
        &self,
        shape: Shape<'_>,
        name: &str,
        docs: Vec<String>,
        in_namespace: bool,
    ) -> Result<IrStruct, LowerError> {
        let mut members = Members::new(name);
        let mut fields = Vec::new();

        for attr in shape.attributes {
            let member = members.claim(&attr.name)?;
            let ty = mapping::state_type(&attr.ty).map_err(|source| LowerError::Mapping {
                path: shape.member_path(&attr.name),
                source,
            })?;
            fields.push(state_field(member, ty, &attr.name));
        }

        for node in shape.children.iter().map(|id| self.graph.node(*id)) {
            let member = members.claim(&node.name)?;
            let record = self.node_type(TriadNames::of_node(node).state, in_namespace);
            let ty = if node.is_singular() {
                IrType::option(record)
            } else {
                wrap_nesting(&node.nesting_path, record, false)
            };
            fields.push(state_field(member, ty, &node.name));
        }

        Ok(IrStruct {
            name: name.to_string(),
            docs,
            derives: vec![
                Derive::Debug,
                Derive::Clone,
                Derive::Default,
                Derive::PartialEq,
                Derive::Deserialize,
            ],
            serde: vec![serde_crate(), SerdeArg::Default],
            fields,
            visibility: Visibility::Public,
        })
    }
}

fn traverse(base: &IrExpr, step: TraversalStep, name: &str) -> IrExpr {
    IrExpr::Traverse {
        base: Box::new(base.clone()),
        step,
        name: name.to_string(),
    }
}

fn argument_field(member: String, ty: IrType, schema_name: &str, required: bool, docs: Vec<String>) -> IrField {
    let mut serde = vec![SerdeArg::Rename(schema_name.to_string())];
    if !required || matches!(ty, IrType::Option(_)) {
        serde.extend(empty_check(&ty).map(|path| SerdeArg::SkipSerializingIf(path.to_string())));
    }
    IrField::new(member, ty).with_docs(docs).with_serde(serde)
}

fn state_field(member: String, ty: IrType, schema_name: &str) -> IrField {
    IrField::new(member, ty).with_serde(vec![
        SerdeArg::Rename(schema_name.to_string()),
        SerdeArg::DeserializeWith(runtime::full_path(RuntimeItemId::NullAsDefault)),
    ])
}
