//! Graph builder: turn one schema block into leaf attributes and nested node subtrees.
//!
//! Nodes live in an arena ([`Graph::nodes`]) in pre-order; parents refer to children by [`NodeId`]. A node is either
//! a nested block or an attribute whose type embeds an object (possibly behind list/set/map wrappers). Such an
//! attribute is never a leaf.
//!
//! ## Notes
//! - Attributes are visited before blocks, each in lexicographic key order, so ids and output are deterministic.
//! - `map` block nesting is recorded as [`NestingMode::List`]. Terraform encodes map blocks as a keyed object, so this
//!   is not literally correct; it is kept for compatibility with existing bindings.

use super::errors::GraphError;
use super::schema;
use super::types::{NestingMode, ObjectType, TypeDescriptor};

/// Index of a node in [`Graph::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Documentation carried from the schema into generated docs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Docs {
    pub description: Option<String>,
    pub deprecated: bool,
    pub sensitive: bool,
}

/// A leaf attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub ty: TypeDescriptor,
    pub is_argument: bool,
    pub is_required: bool,
    pub docs: Docs,
}

/// A nested object shape: a block, or an object-typed attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    /// Names of the enclosing nodes, outermost first. Empty for top-level nodes.
    pub ancestors: Vec<String>,
    pub unique_name: String,
    /// Number of ancestors consumed into `unique_name`.
    pub unique_depth: usize,
    pub attributes: Vec<Attribute>,
    pub children: Vec<NodeId>,
    pub is_argument: bool,
    /// Collection wrappers between the parent and this shape, outermost first. Empty for exactly one instance.
    pub nesting_path: Vec<NestingMode>,
    pub is_required: bool,
    pub min_items: u64,
    /// 0 means unbounded.
    pub max_items: u64,
    pub docs: Docs,
}

impl Node {
    /// Whether the parent holds exactly one (optional) instance rather than a collection.
    pub fn is_singular(&self) -> bool {
        self.nesting_path.iter().all(|mode| *mode == NestingMode::Single)
    }
}

/// The compiled shape of one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub attributes: Vec<Attribute>,
    pub children: Vec<NodeId>,
    /// Every node at any depth, in pre-order.
    pub nodes: Vec<Node>,
}

impl Graph {
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn top_children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().map(|id| self.node(*id))
    }

    pub fn children_of<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> {
        node.children.iter().map(|id| self.node(*id))
    }
}

/// Build the graph of one entity's root block.
///
/// ## Errors
/// - [`GraphError::UnsupportedType`] when any attribute at any depth has a type outside the closed set.
/// - [`GraphError::UnsupportedNesting`] for an unknown block nesting mode.
#[tracing::instrument(skip_all, level = "trace")]
pub fn build_graph(block: &schema::Block) -> Result<Graph, GraphError> {
    let mut builder = GraphBuilder::default();
    let members = builder.visit_block(block, &[])?;
    Ok(Graph {
        attributes: members.attributes,
        children: members.children,
        nodes: builder.nodes,
    })
}

#[derive(Default)]
struct Members {
    attributes: Vec<Attribute>,
    children: Vec<NodeId>,
}

/// Argument/required context of a field about to be visited.
#[derive(Clone, Copy)]
struct Flags {
    is_argument: bool,
    is_required: bool,
}

#[derive(Default)]
struct GraphBuilder {
    nodes: Vec<Node>,
}

fn dotted(ancestors: &[String], name: &str) -> String {
    let mut path = ancestors.join(".");
    if !path.is_empty() {
        path.push('.');
    }
    path.push_str(name);
    path
}

fn attribute_docs(attr: &schema::Attribute) -> Docs {
    Docs {
        description: attr.description.clone(),
        deprecated: attr.deprecated,
        sensitive: attr.sensitive,
    }
}

fn attribute_nesting(mode: &str, path: &str) -> Result<Vec<NestingMode>, GraphError> {
    match mode {
        "single" | "" => Ok(Vec::new()),
        "list" => Ok(vec![NestingMode::List]),
        "set" => Ok(vec![NestingMode::Set]),
        "map" => Ok(vec![NestingMode::Map]),
        other => Err(GraphError::UnsupportedNesting {
            path: path.to_string(),
            mode: other.to_string(),
        }),
    }
}

fn block_nesting(mode: &str, path: &str) -> Result<Vec<NestingMode>, GraphError> {
    match mode {
        "single" | "group" => Ok(Vec::new()),
        "list" => Ok(vec![NestingMode::List]),
        "set" => Ok(vec![NestingMode::Set]),
        // Map blocks are treated as lists downstream (see module notes).
        "map" => Ok(vec![NestingMode::List]),
        other => Err(GraphError::UnsupportedNesting {
            path: path.to_string(),
            mode: other.to_string(),
        }),
    }
}

impl GraphBuilder {
    /// Reserve an arena slot so the node precedes its descendants.
    fn reserve(&mut self, name: &str, ancestors: &[String]) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            ancestors: ancestors.to_vec(),
            unique_name: name.to_string(),
            unique_depth: 0,
            attributes: Vec::new(),
            children: Vec::new(),
            is_argument: false,
            nesting_path: Vec::new(),
            is_required: false,
            min_items: 0,
            max_items: 0,
            docs: Docs::default(),
        });
        id
    }

    fn fill(&mut self, id: NodeId, members: Members) {
        let node = &mut self.nodes[id.0];
        node.attributes = members.attributes;
        node.children = members.children;
    }

    fn visit_block(&mut self, block: &schema::Block, ancestors: &[String]) -> Result<Members, GraphError> {
        let mut members = Members::default();
        for (name, attr) in &block.attributes {
            self.visit_schema_attribute(name, attr, ancestors, &mut members)?;
        }
        for (name, block_type) in &block.block_types {
            let id = self.visit_block_type(name, block_type, ancestors)?;
            members.children.push(id);
        }
        Ok(members)
    }

    fn visit_schema_attribute(
        &mut self,
        name: &str,
        attr: &schema::Attribute,
        ancestors: &[String],
        members: &mut Members,
    ) -> Result<(), GraphError> {
        let flags = Flags {
            is_argument: attr.is_argument(),
            is_required: attr.required,
        };
        let path = dotted(ancestors, name);

        if let Some(nested) = &attr.nested_type {
            let nesting_path = attribute_nesting(&nested.nesting_mode, &path)?;
            let id = self.reserve(name, ancestors);
            let inner = child_ancestors(ancestors, name);
            let mut inner_members = Members::default();
            for (field, field_attr) in &nested.attributes {
                self.visit_schema_attribute(field, field_attr, &inner, &mut inner_members)?;
            }
            self.fill(id, inner_members);
            let singular = nesting_path.is_empty();
            let node = &mut self.nodes[id.0];
            node.is_argument = flags.is_argument;
            node.is_required = flags.is_required;
            node.min_items = nested.min_items.unwrap_or(u64::from(flags.is_required));
            node.max_items = nested.max_items.unwrap_or(u64::from(singular));
            node.nesting_path = nesting_path;
            node.docs = attribute_docs(attr);
            members.children.push(id);
            return Ok(());
        }

        let ty = match &attr.ty {
            Some(raw) => TypeDescriptor::from_cty(raw)
                .map_err(|source| GraphError::UnsupportedType { path: path.clone(), source })?,
            None => {
                return Err(GraphError::UnsupportedType {
                    path,
                    source: super::errors::TypeError::Malformed("<missing>".to_string()),
                });
            }
        };
        self.visit_typed_field(name, &ty, flags, attribute_docs(attr), ancestors, members);
        Ok(())
    }

    /// Visit a field whose type is already decoded: promote it when it embeds an object, else record a leaf.
    fn visit_typed_field(
        &mut self,
        name: &str,
        ty: &TypeDescriptor,
        flags: Flags,
        docs: Docs,
        ancestors: &[String],
        members: &mut Members,
    ) {
        let Some((nesting_path, object)) = ty.embedded_object() else {
            members.attributes.push(Attribute {
                name: name.to_string(),
                ty: ty.clone(),
                is_argument: flags.is_argument,
                is_required: flags.is_required,
                docs,
            });
            return;
        };

        let id = self.reserve(name, ancestors);
        let inner = child_ancestors(ancestors, name);
        let inner_members = self.visit_object(object, flags.is_argument, &inner);
        self.fill(id, inner_members);
        let singular = nesting_path.is_empty();
        let node = &mut self.nodes[id.0];
        node.is_argument = flags.is_argument;
        node.is_required = flags.is_required;
        node.min_items = u64::from(flags.is_required);
        node.max_items = u64::from(singular);
        node.nesting_path = nesting_path;
        node.docs = docs;
        members.children.push(id);
    }

    /// Object fields are settable exactly when the enclosing attribute is, and mandatory unless marked optional.
    fn visit_object(&mut self, object: &ObjectType, parent_is_argument: bool, ancestors: &[String]) -> Members {
        let mut members = Members::default();
        for (name, ty) in &object.fields {
            let flags = Flags {
                is_argument: parent_is_argument,
                is_required: parent_is_argument && !object.optional.contains(name),
            };
            self.visit_typed_field(name, ty, flags, Docs::default(), ancestors, &mut members);
        }
        members
    }

    fn visit_block_type(
        &mut self,
        name: &str,
        block_type: &schema::BlockType,
        ancestors: &[String],
    ) -> Result<NodeId, GraphError> {
        let path = dotted(ancestors, name);
        let nesting_path = block_nesting(&block_type.nesting_mode, &path)?;
        let id = self.reserve(name, ancestors);
        let inner = child_ancestors(ancestors, name);
        let members = self.visit_block(&block_type.block, &inner)?;
        self.fill(id, members);
        let node = &mut self.nodes[id.0];
        node.is_argument = true;
        node.is_required = block_type.min_items == 1 && block_type.max_items == 1;
        node.min_items = block_type.min_items;
        node.max_items = block_type.max_items;
        node.nesting_path = nesting_path;
        node.docs = Docs {
            description: block_type.block.description.clone(),
            deprecated: block_type.block.deprecated,
            sensitive: false,
        };
        Ok(id)
    }
}

fn child_ancestors(ancestors: &[String], name: &str) -> Vec<String> {
    let mut inner = ancestors.to_vec();
    inner.push(name.to_string());
    inner
}
