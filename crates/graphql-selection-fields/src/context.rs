use indexmap::IndexMap;

use crate::ast::{Field, FragmentDefinition};

/// What the host framework knows about the field currently being resolved: every node of the
/// query selecting it, and the fragments defined by the document.
///
/// Read-only for this crate; nothing here is retained past a call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolveContext {
    field_nodes: Vec<Field>,
    fragments: IndexMap<String, FragmentDefinition>,
}

impl ResolveContext {
    pub fn new(
        field_nodes: impl IntoIterator<Item = Field>,
        fragments: impl IntoIterator<Item = FragmentDefinition>,
    ) -> Self {
        ResolveContext {
            field_nodes: field_nodes.into_iter().collect(),
            fragments: fragments
                .into_iter()
                .map(|fragment| (fragment.name.clone(), fragment))
                .collect(),
        }
    }

    pub fn with_field_node(mut self, field: Field) -> Self {
        self.field_nodes.push(field);
        self
    }

    /// Registers a fragment, replacing any previous definition with the same name.
    pub fn with_fragment(mut self, fragment: FragmentDefinition) -> Self {
        self.fragments.insert(fragment.name.clone(), fragment);
        self
    }

    pub fn field_nodes(&self) -> &[Field] {
        &self.field_nodes
    }

    pub fn fragment(&self, name: &str) -> Option<&FragmentDefinition> {
        self.fragments.get(name)
    }

    pub fn fragments(&self) -> impl ExactSizeIterator<Item = &FragmentDefinition> + '_ {
        self.fragments.values()
    }
}
