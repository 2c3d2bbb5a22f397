#![allow(unused_crate_dependencies)]

use graphql_selection_fields::{
    ast::Field, flatten, flatten_into, flatten_root, FieldKey, FieldMap, FlattenError, FlattenOptions, Flattener,
    InlineFragments, ResolveContext,
};
use rstest::rstest;

const NESTED_FRAGMENTS: &str = r#"
    {
        metric {
            one,
            ...a
        }
    }

    fragment a on Metric {
        two,
        ...b
    }

    fragment b on Metric {
        three {
            four
        }
    }
"#;

fn metric_context(query: &str) -> ResolveContext {
    ResolveContext::from_document(query, None, &["metric"]).unwrap()
}

fn keys<'a>(fields: &FieldMap<'a>) -> Vec<&'a str> {
    fields.keys().copied().collect()
}

#[rstest]
#[case::root_level_fields("{ metric { one, two } }", &["one", "two"])]
#[case::fields_in_fragments("{ metric { one, ...a } } fragment a on Metric { two }", &["one", "two"])]
#[case::fields_in_nested_fragments(NESTED_FRAGMENTS, &["one", "two", "three"])]
#[case::fragment_before_fields("{ metric { ...a, one } } fragment a on Metric { two }", &["two", "one"])]
#[case::redefined_in_fragment("{ metric { one, two, ...a } } fragment a on Metric { one }", &["one", "two"])]
#[case::sibling_spreads("{ metric { ...a, three, ...a } } fragment a on Metric { one, two }", &["one", "two", "three"])]
fn flattens_field_nodes(#[case] query: &str, #[case] expected: &[&str]) {
    let ctx = metric_context(query);

    let fields = flatten(&ctx, &ctx.field_nodes()[0]).unwrap();

    assert_eq!(keys(&fields), expected);
}

#[test]
fn flatten_root_matches_first_field_node() {
    let ctx = metric_context("{ metric { one, two } }");

    let fields = flatten_root(&ctx).unwrap();

    assert_eq!(keys(&fields), ["one", "two"]);
    assert_eq!(fields, flatten(&ctx, &ctx.field_nodes()[0]).unwrap());
}

#[test]
fn walks_down_nested_types() {
    let ctx = metric_context(NESTED_FRAGMENTS);

    let fields_on_metric = flatten_root(&ctx).unwrap();
    let fields_on_sub_metric = flatten(&ctx, fields_on_metric["three"]).unwrap();

    assert_eq!(keys(&fields_on_sub_metric), ["four"]);
    assert!(fields_on_sub_metric["four"].is_leaf());
}

#[test]
fn fragment_redefinition_points_to_last_node() {
    let ctx = metric_context("{ metric { three { four }, ...a } } fragment a on Metric { three { five } }");

    let fields = flatten_root(&ctx).unwrap();
    let three = flatten(&ctx, fields["three"]).unwrap();

    assert_eq!(keys(&three), ["five"]);
}

#[test]
fn merges_every_field_node() {
    let ctx = ResolveContext::from_document(
        "{ metric { one } ...M } fragment M on Query { metric { two, one } }",
        None,
        &["metric"],
    )
    .unwrap();

    let mut fields = FieldMap::new();
    for node in ctx.field_nodes() {
        flatten_into(&ctx, node, &mut fields).unwrap();
    }

    assert_eq!(ctx.field_nodes().len(), 2);
    assert_eq!(keys(&fields), ["one", "two"]);
}

#[test]
fn unknown_fragment_is_an_error() {
    let ctx = metric_context("{ metric { one, ...missing } }");

    let error = flatten_root(&ctx).unwrap_err();

    assert_eq!(
        error,
        FlattenError::UnknownFragment {
            name: "missing".to_string()
        }
    );
    insta::assert_snapshot!(error, @"Unknown fragment named 'missing'");
}

#[test]
fn fragment_cycles_are_reported() {
    let ctx = metric_context(indoc::indoc! {r#"
        {
            metric {
                ...a
            }
        }

        fragment a on Metric {
            one
            ...b
        }

        fragment b on Metric {
            two
            ...a
        }
    "#});

    let error = flatten_root(&ctx).unwrap_err();

    assert_eq!(
        error,
        FlattenError::FragmentCycle {
            cycle: vec!["a".to_string(), "b".to_string(), "a".to_string()]
        }
    );
}

#[test]
fn inline_fragments_follow_options() {
    let ctx = metric_context("{ metric { one ... on Metric { two } ... { one: three } } }");

    let skipped = flatten_root(&ctx).unwrap();
    assert_eq!(keys(&skipped), ["one"]);

    let options: FlattenOptions = toml::from_str(indoc::indoc! {r#"
        key = "response_key"
        inline_fragments = "expand"
    "#})
    .unwrap();
    let expanded = Flattener::new(&ctx).with_options(options).flatten_root().unwrap();
    assert_eq!(keys(&expanded), ["one", "two"]);
    assert_eq!(expanded["one"].name, "three");

    let by_name = Flattener::new(&ctx)
        .with_options(options.with_key(FieldKey::Name))
        .flatten_root()
        .unwrap();
    assert_eq!(keys(&by_name), ["one", "two", "three"]);
}

#[test]
fn hand_built_context() {
    let ctx = ResolveContext::default()
        .with_field_node(Field::new("metric").with_selections([Field::new("one").into()]))
        .with_fragment(graphql_selection_fields::ast::FragmentDefinition::new(
            "unused",
            "Metric",
            [],
        ));

    let fields = Flattener::new(&ctx)
        .with_options(FlattenOptions::default().with_inline_fragments(InlineFragments::Skip))
        .flatten_root()
        .unwrap();

    insta::assert_debug_snapshot!(fields, @r###"
    {
        "one": Field {
            alias: None,
            name: "one",
            selection_set: SelectionSet {
                items: [],
            },
        },
    }
    "###);
}
