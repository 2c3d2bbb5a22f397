//! Building a [`ResolveContext`] straight from query text, for hosts that do not hand over their
//! own selection tree.

use graphql_parser::query as parser;

use crate::{
    ast::{Field, FragmentDefinition, FragmentSpread, InlineFragment, Selection, SelectionSet},
    context::ResolveContext,
    error::{DocumentError, DocumentResult, FlattenResult},
    flatten::FragmentStack,
};

impl ResolveContext {
    /// Parses `source` and resolves `path`, a list of response keys starting from the operation
    /// root, to the nodes selecting that field.
    ///
    /// The operation is picked by name, or is the only one of the document when no name is
    /// given. Every node matching the last key is kept, in query order, including those
    /// reached through fragments.
    pub fn from_document(source: &str, operation_name: Option<&str>, path: &[&str]) -> DocumentResult<Self> {
        let document = graphql_parser::parse_query::<&str>(source)?;

        let mut operations = Vec::new();
        let mut fragments = Vec::new();

        for definition in &document.definitions {
            match definition {
                parser::Definition::Operation(operation) => operations.push(operation),
                parser::Definition::Fragment(fragment) => fragments.push(FragmentDefinition::from(fragment)),
            }
        }

        let operation = select_operation(&operations, operation_name)?;
        let root = SelectionSet::from(operation_selection_set(operation));

        let ctx = ResolveContext::new([], fragments);
        let field_nodes = FieldCollector::new(&ctx).collect(&root, path)?;

        tracing::debug!(
            path = %path.join("."),
            field_nodes = field_nodes.len(),
            "Resolved field nodes from document"
        );

        Ok(field_nodes.into_iter().fold(ctx, ResolveContext::with_field_node))
    }
}

fn select_operation<'d, 'a>(
    operations: &[&'d parser::OperationDefinition<'a, &'a str>],
    operation_name: Option<&str>,
) -> DocumentResult<&'d parser::OperationDefinition<'a, &'a str>> {
    match operation_name {
        Some(name) => operations
            .iter()
            .copied()
            .find(|operation| defined_name(operation) == Some(name))
            .ok_or_else(|| DocumentError::UnknownOperation { name: name.to_string() }),
        None => match operations {
            [] => Err(DocumentError::MissingOperation),
            [operation] => Ok(*operation),
            _ => Err(DocumentError::AmbiguousOperation),
        },
    }
}

fn defined_name<'a>(operation: &parser::OperationDefinition<'a, &'a str>) -> Option<&'a str> {
    match operation {
        parser::OperationDefinition::SelectionSet(_) => None,
        parser::OperationDefinition::Query(query) => query.name,
        parser::OperationDefinition::Mutation(mutation) => mutation.name,
        parser::OperationDefinition::Subscription(subscription) => subscription.name,
    }
}

fn operation_selection_set<'d, 'a>(
    operation: &'d parser::OperationDefinition<'a, &'a str>,
) -> &'d parser::SelectionSet<'a, &'a str> {
    match operation {
        parser::OperationDefinition::SelectionSet(selection_set) => selection_set,
        parser::OperationDefinition::Query(query) => &query.selection_set,
        parser::OperationDefinition::Mutation(mutation) => &mutation.selection_set,
        parser::OperationDefinition::Subscription(subscription) => &subscription.selection_set,
    }
}

/// Follows a response path down the operation, looking through fragments of both kinds.
struct FieldCollector<'a> {
    fragments: FragmentStack<'a>,
}

impl<'a> FieldCollector<'a> {
    fn new(ctx: &'a ResolveContext) -> Self {
        FieldCollector {
            fragments: FragmentStack::new(ctx),
        }
    }

    fn collect(mut self, root: &'a SelectionSet, path: &[&str]) -> DocumentResult<Vec<Field>> {
        if path.is_empty() {
            return Err(DocumentError::EmptyPath);
        }

        let mut selection_sets = vec![root];
        let mut fields = Vec::new();

        for (depth, response_key) in path.iter().enumerate() {
            fields.clear();

            for selection_set in selection_sets {
                self.collect_matching(selection_set, response_key, &mut fields)?;
            }

            if fields.is_empty() {
                return Err(DocumentError::FieldNotFound {
                    path: path[..=depth].iter().map(|key| key.to_string()).collect(),
                });
            }

            selection_sets = fields.iter().map(|&field| &field.selection_set).collect();
        }

        Ok(fields.into_iter().cloned().collect())
    }

    fn collect_matching(
        &mut self,
        selection_set: &'a SelectionSet,
        response_key: &str,
        fields: &mut Vec<&'a Field>,
    ) -> FlattenResult<()> {
        for selection in selection_set {
            match selection {
                Selection::Field(field) => {
                    if field.response_key() == response_key {
                        fields.push(field);
                    }
                }
                Selection::FragmentSpread(spread) => {
                    let fragment = self.fragments.enter(&spread.fragment_name)?;
                    self.collect_matching(&fragment.selection_set, response_key, fields)?;
                    self.fragments.exit();
                }
                Selection::InlineFragment(fragment) => {
                    self.collect_matching(&fragment.selection_set, response_key, fields)?;
                }
            }
        }

        Ok(())
    }
}

impl<'a> From<&parser::SelectionSet<'a, &'a str>> for SelectionSet {
    fn from(selection_set: &parser::SelectionSet<'a, &'a str>) -> Self {
        selection_set.items.iter().map(Selection::from).collect()
    }
}

impl<'a> From<&parser::Selection<'a, &'a str>> for Selection {
    fn from(selection: &parser::Selection<'a, &'a str>) -> Self {
        match selection {
            parser::Selection::Field(field) => Selection::Field(Field {
                alias: field.alias.map(str::to_string),
                name: field.name.to_string(),
                selection_set: SelectionSet::from(&field.selection_set),
            }),
            parser::Selection::FragmentSpread(spread) => Selection::FragmentSpread(FragmentSpread {
                fragment_name: spread.fragment_name.to_string(),
            }),
            parser::Selection::InlineFragment(fragment) => Selection::InlineFragment(InlineFragment {
                type_condition: fragment
                    .type_condition
                    .as_ref()
                    .map(|parser::TypeCondition::On(name)| name.to_string()),
                selection_set: SelectionSet::from(&fragment.selection_set),
            }),
        }
    }
}

impl<'a> From<&parser::FragmentDefinition<'a, &'a str>> for FragmentDefinition {
    fn from(fragment: &parser::FragmentDefinition<'a, &'a str>) -> Self {
        let parser::TypeCondition::On(type_condition) = &fragment.type_condition;

        FragmentDefinition {
            name: fragment.name.to_string(),
            type_condition: type_condition.to_string(),
            selection_set: SelectionSet::from(&fragment.selection_set),
        }
    }
}
