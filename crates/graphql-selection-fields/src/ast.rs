//! Owned selection nodes, as handed over by the host framework for the field being resolved.

/// An ordered list of selections, as written in the query.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    pub items: Vec<Selection>,
}

impl SelectionSet {
    pub fn new(items: impl IntoIterator<Item = Selection>) -> Self {
        SelectionSet {
            items: items.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Selection> {
        self.items.iter()
    }
}

impl FromIterator<Selection> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = Selection>>(iter: T) -> Self {
        SelectionSet::new(iter)
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a Selection;
    type IntoIter = std::slice::Iter<'a, Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl From<Field> for Selection {
    fn from(field: Field) -> Self {
        Selection::Field(field)
    }
}

impl From<FragmentSpread> for Selection {
    fn from(spread: FragmentSpread) -> Self {
        Selection::FragmentSpread(spread)
    }
}

impl From<InlineFragment> for Selection {
    fn from(fragment: InlineFragment) -> Self {
        Selection::InlineFragment(fragment)
    }
}

/// A field selection. Object typed fields carry a non-empty selection set, which can be
/// flattened in turn to walk down the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub alias: Option<String>,
    pub name: String,
    pub selection_set: SelectionSet,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Field {
            alias: None,
            name: name.into(),
            selection_set: SelectionSet::default(),
        }
    }

    pub fn with_alias(self, alias: impl Into<String>) -> Self {
        Field {
            alias: Some(alias.into()),
            ..self
        }
    }

    pub fn with_selections(self, items: impl IntoIterator<Item = Selection>) -> Self {
        Field {
            selection_set: SelectionSet::new(items),
            ..self
        }
    }

    /// The key under which the field appears in the response.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn is_leaf(&self) -> bool {
        self.selection_set.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSpread {
    pub fragment_name: String,
}

impl FragmentSpread {
    pub fn new(fragment_name: impl Into<String>) -> Self {
        FragmentSpread {
            fragment_name: fragment_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineFragment {
    pub type_condition: Option<String>,
    pub selection_set: SelectionSet,
}

impl InlineFragment {
    pub fn new(type_condition: Option<String>, items: impl IntoIterator<Item = Selection>) -> Self {
        InlineFragment {
            type_condition,
            selection_set: SelectionSet::new(items),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentDefinition {
    pub name: String,
    pub type_condition: String,
    pub selection_set: SelectionSet,
}

impl FragmentDefinition {
    pub fn new(
        name: impl Into<String>,
        type_condition: impl Into<String>,
        items: impl IntoIterator<Item = Selection>,
    ) -> Self {
        FragmentDefinition {
            name: name.into(),
            type_condition: type_condition.into(),
            selection_set: SelectionSet::new(items),
        }
    }
}

/// Any node exposing an ordered selection set that can be flattened.
pub trait HasSelectionSet {
    fn selection_set(&self) -> &SelectionSet;
}

impl HasSelectionSet for SelectionSet {
    fn selection_set(&self) -> &SelectionSet {
        self
    }
}

impl HasSelectionSet for Field {
    fn selection_set(&self) -> &SelectionSet {
        &self.selection_set
    }
}

impl HasSelectionSet for InlineFragment {
    fn selection_set(&self) -> &SelectionSet {
        &self.selection_set
    }
}

impl HasSelectionSet for FragmentDefinition {
    fn selection_set(&self) -> &SelectionSet {
        &self.selection_set
    }
}

impl<T: HasSelectionSet + ?Sized> HasSelectionSet for &T {
    fn selection_set(&self) -> &SelectionSet {
        (**self).selection_set()
    }
}
