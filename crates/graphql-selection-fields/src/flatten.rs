use indexmap::IndexMap;

use crate::{
    ast::{Field, FragmentDefinition, HasSelectionSet, Selection, SelectionSet},
    context::ResolveContext,
    error::{FlattenError, FlattenResult},
    options::{FieldKey, FlattenOptions, InlineFragments},
};

/// Fields requested by a selection set, in the order they first appear once fragments are
/// inlined. A field selected again later keeps its position but points to the last node.
pub type FieldMap<'a> = IndexMap<&'a str, &'a Field>;

/// Flattens `node` with the default options.
pub fn flatten<'a, N>(ctx: &'a ResolveContext, node: &'a N) -> FlattenResult<FieldMap<'a>>
where
    N: HasSelectionSet + ?Sized,
{
    Flattener::new(ctx).flatten(node)
}

/// Flattens `node` into an existing map, so several selection sets can be merged.
pub fn flatten_into<'a, N>(ctx: &'a ResolveContext, node: &'a N, fields: &mut FieldMap<'a>) -> FlattenResult<()>
where
    N: HasSelectionSet + ?Sized,
{
    Flattener::new(ctx).flatten_into(node, fields)
}

/// Flattens the first field node of the context, the field currently being resolved.
pub fn flatten_root(ctx: &ResolveContext) -> FlattenResult<FieldMap<'_>> {
    Flattener::new(ctx).flatten_root()
}

#[derive(Debug, Clone, Copy)]
pub struct Flattener<'a> {
    ctx: &'a ResolveContext,
    options: FlattenOptions,
}

impl<'a> Flattener<'a> {
    pub fn new(ctx: &'a ResolveContext) -> Self {
        Flattener {
            ctx,
            options: FlattenOptions::default(),
        }
    }

    pub fn with_options(self, options: FlattenOptions) -> Self {
        Flattener { options, ..self }
    }

    pub fn options(&self) -> FlattenOptions {
        self.options
    }

    pub fn flatten_root(&self) -> FlattenResult<FieldMap<'a>> {
        let root = self.ctx.field_nodes().first().ok_or(FlattenError::MissingFieldNodes)?;
        self.flatten(root)
    }

    pub fn flatten<N>(&self, node: &'a N) -> FlattenResult<FieldMap<'a>>
    where
        N: HasSelectionSet + ?Sized,
    {
        let mut fields = FieldMap::new();
        self.flatten_into(node, &mut fields)?;
        Ok(fields)
    }

    pub fn flatten_into<N>(&self, node: &'a N, fields: &mut FieldMap<'a>) -> FlattenResult<()>
    where
        N: HasSelectionSet + ?Sized,
    {
        Expansion {
            flattener: *self,
            fields,
            fragments: FragmentStack::new(self.ctx),
        }
        .visit_selection_set(node.selection_set())
    }
}

struct Expansion<'a, 'f> {
    flattener: Flattener<'a>,
    fields: &'f mut FieldMap<'a>,
    fragments: FragmentStack<'a>,
}

impl<'a> Expansion<'a, '_> {
    fn visit_selection_set(&mut self, selection_set: &'a SelectionSet) -> FlattenResult<()> {
        for selection in selection_set {
            match selection {
                Selection::Field(field) => {
                    let key = match self.flattener.options.key {
                        FieldKey::Name => field.name.as_str(),
                        FieldKey::ResponseKey => field.response_key(),
                    };
                    // IndexMap keeps the slot of an existing key on insert.
                    self.fields.insert(key, field);
                }
                Selection::FragmentSpread(spread) => {
                    let fragment = self.fragments.enter(&spread.fragment_name)?;
                    self.visit_selection_set(&fragment.selection_set)?;
                    self.fragments.exit();
                }
                Selection::InlineFragment(fragment) => match self.flattener.options.inline_fragments {
                    InlineFragments::Expand => self.visit_selection_set(&fragment.selection_set)?,
                    InlineFragments::Skip => {
                        tracing::debug!(
                            type_condition = fragment.type_condition.as_deref(),
                            "Skipping inline fragment while flattening selection set"
                        );
                    }
                },
            }
        }

        Ok(())
    }
}

/// The fragments being expanded, innermost last. Spreading one of them again is a cycle.
pub(crate) struct FragmentStack<'a> {
    ctx: &'a ResolveContext,
    current_fragments_stack: Vec<&'a str>,
}

impl<'a> FragmentStack<'a> {
    pub(crate) fn new(ctx: &'a ResolveContext) -> Self {
        FragmentStack {
            ctx,
            current_fragments_stack: Vec::new(),
        }
    }

    /// Looks up the spread fragment and pushes it, to be balanced by [`FragmentStack::exit`].
    pub(crate) fn enter(&mut self, fragment_name: &'a str) -> FlattenResult<&'a FragmentDefinition> {
        if self.current_fragments_stack.contains(&fragment_name) {
            self.current_fragments_stack.push(fragment_name);
            return Err(FlattenError::FragmentCycle {
                cycle: std::mem::take(&mut self.current_fragments_stack)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            });
        }

        let Some(fragment) = self.ctx.fragment(fragment_name) else {
            return Err(FlattenError::UnknownFragment {
                name: fragment_name.to_string(),
            });
        };

        tracing::trace!(fragment = fragment_name, "Inlining fragment spread");
        self.current_fragments_stack.push(fragment_name);

        Ok(fragment)
    }

    pub(crate) fn exit(&mut self) {
        self.current_fragments_stack.pop();
    }
}
