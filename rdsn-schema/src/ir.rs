//! Intermediate representation for code generation.
//!
//! This module flattens the nested declaration tree of a [`SchemaFile`] into
//! an arena of nodes linked by parent/child indices. Emission order is then
//! computed over the arena with an explicit stack, so deeply nested schemas
//! never grow the call stack.

use crate::messages::MessageDef;
use crate::types::{EnumDef, SchemaFile};

/// Index of a declaration node in a [`SchemaIr`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(usize);

/// Declaration kind, borrowing the definition from the schema tree.
#[derive(Debug, Clone, Copy)]
pub enum DeclKind<'a> {
    /// Enum declaration.
    Enum(&'a EnumDef),
    /// Message declaration.
    Message(&'a MessageDef),
}

impl<'a> DeclKind<'a> {
    /// Returns the fully-qualified name of the declaration.
    #[must_use]
    pub fn full_name(&self) -> &'a str {
        match self {
            Self::Enum(e) => &e.full_name,
            Self::Message(m) => &m.full_name,
        }
    }

    /// Returns true for synthetic map-entry messages.
    #[must_use]
    pub fn is_map_entry(&self) -> bool {
        matches!(self, Self::Message(m) if m.map_entry)
    }
}

/// One declaration in the arena.
#[derive(Debug, Clone)]
pub struct DeclNode<'a> {
    /// The declaration.
    pub kind: DeclKind<'a>,
    /// Enclosing message, `None` for top-level declarations.
    pub parent: Option<DeclId>,
    /// Nested enums then nested messages, each in declaration order.
    pub children: Vec<DeclId>,
}

/// Arena representation of the declarations of one schema file.
#[derive(Debug, Clone)]
pub struct SchemaIr<'a> {
    /// Package name.
    pub package: &'a str,
    /// Top-level enums, in declaration order.
    pub enum_roots: Vec<DeclId>,
    /// Top-level messages, in declaration order.
    pub message_roots: Vec<DeclId>,
    nodes: Vec<DeclNode<'a>>,
}

impl<'a> SchemaIr<'a> {
    /// Builds the arena for a schema file.
    #[must_use]
    pub fn from_file(file: &'a SchemaFile) -> Self {
        let mut ir = Self {
            package: &file.package,
            enum_roots: Vec::new(),
            message_roots: Vec::new(),
            nodes: Vec::new(),
        };

        for enum_def in &file.enums {
            let id = ir.push(DeclKind::Enum(enum_def), None);
            ir.enum_roots.push(id);
        }

        let mut pending = Vec::new();
        for msg in &file.messages {
            let id = ir.push(DeclKind::Message(msg), None);
            ir.message_roots.push(id);
            pending.push((id, msg));
        }

        // Worklist order does not matter: each child list keeps declaration order.
        while let Some((parent, msg)) = pending.pop() {
            for enum_def in &msg.enums {
                let id = ir.push(DeclKind::Enum(enum_def), Some(parent));
                ir.nodes[parent.0].children.push(id);
            }
            for nested in &msg.messages {
                let id = ir.push(DeclKind::Message(nested), Some(parent));
                ir.nodes[parent.0].children.push(id);
                pending.push((id, nested));
            }
        }

        ir
    }

    fn push(&mut self, kind: DeclKind<'a>, parent: Option<DeclId>) -> DeclId {
        let id = DeclId(self.nodes.len());
        self.nodes.push(DeclNode {
            kind,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Returns the node for an id.
    ///
    /// # Panics
    /// Panics if the id does not belong to this arena.
    #[must_use]
    pub fn node(&self, id: DeclId) -> &DeclNode<'a> {
        &self.nodes[id.0]
    }

    /// Returns the emission order of the subtree rooted at `root`.
    ///
    /// Every child is fully expanded (its own children first) before the next
    /// sibling, and a node is listed only after all of its children. Map-entry
    /// messages are left out together with anything nested in them.
    #[must_use]
    pub fn flatten(&self, root: DeclId) -> Vec<DeclId> {
        let mut order = Vec::new();
        let mut stack = vec![(root, false)];

        while let Some((id, expanded)) = stack.pop() {
            let node = &self.nodes[id.0];
            if expanded {
                order.push(id);
                continue;
            }
            if node.kind.is_map_entry() {
                continue;
            }
            stack.push((id, true));
            for &child in node.children.iter().rev() {
                stack.push((child, false));
            }
        }

        order
    }

    /// Returns the emission order of every enum and message in the file:
    /// top-level enums first, then each top-level message subtree.
    #[must_use]
    pub fn emission_order(&self) -> Vec<DeclId> {
        let mut order = self.enum_roots.clone();
        for &root in &self.message_roots {
            order.extend(self.flatten(root));
        }
        order
    }
}
