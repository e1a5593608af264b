use super::*;
use crate::{
    config::FilterConfig,
    filter::computed::project_arguments,
    naming::DefaultInflector,
    test_support::{blog_catalog, procedure},
};
use pgfilter_schema::types::oid;

#[test]
fn operator_names_resolve_back() {
    for op in Operator::ALL.iter().flat_map(|set| set.iter()).copied() {
        assert_eq!(Operator::from_name(op.name()), Some(op));
    }
    assert_eq!(Operator::from_name("equalto"), None);
    assert_eq!(Operator::from_name("args"), None);
}

#[test]
fn pattern_operators_only_on_strings() {
    let string_ops = ScalarKind::String.scalar_operators();
    let int_ops = ScalarKind::Int.scalar_operators();

    assert!(string_ops.contains(&Operator::StartsWith));
    assert!(!int_ops.contains(&Operator::StartsWith));
    assert!(int_ops.contains(&Operator::In));
    assert_eq!(ScalarKind::Json.scalar_operators(), Operator::STANDARD.to_vec());

    let list_ops = ScalarKind::list_operators();
    assert!(list_ops.contains(&Operator::Overlaps));
    assert!(!list_ops.contains(&Operator::In));
}

#[test]
fn builds_scalar_operators_types() {
    let catalog = blog_catalog();
    let config = FilterConfig::default();
    let mut builder = StandardOperatorsBuilder::new(&catalog, &config, &DefaultInflector);

    let int = builder.operators_type(oid::INT4, None, None).unwrap();
    assert_eq!(int.name, "IntFilter");
    assert_eq!(int.scalar, ScalarKind::Int);
    assert!(!int.is_list);
    assert!(int.args.is_none());

    let text = builder.operators_type(oid::TEXT, None, None).unwrap();
    assert_eq!(text.name, "StringFilter");
    assert!(text.supports(Operator::Includes));

    let status = builder.operators_type(Oid(6010), None, None).unwrap();
    assert_eq!(status.name, "AppPostStatusFilter");
    assert_eq!(status.scalar, ScalarKind::Enum("AppPostStatus".to_string()));
}

#[test]
fn domains_share_their_base_type() {
    let catalog = blog_catalog();
    let config = FilterConfig::default();
    let mut builder = StandardOperatorsBuilder::new(&catalog, &config, &DefaultInflector);

    let domain = builder.operators_type(Oid(6000), None, None).unwrap();
    let base = builder.operators_type(oid::INT4, None, None).unwrap();

    assert_eq!(domain, base);
}

#[test]
fn arrays_get_list_types_unless_disabled() {
    let catalog = blog_catalog();
    let config = FilterConfig::default();
    let mut builder = StandardOperatorsBuilder::new(&catalog, &config, &DefaultInflector);

    let labels = builder.operators_type(Oid(1009), None, None).unwrap();
    assert_eq!(labels.name, "StringListFilter");
    assert!(labels.is_list);
    assert_eq!(labels.operand_type(Operator::Contains), "[String]");
    assert_eq!(labels.operand_type(Operator::IsNull), "Boolean");

    let config = FilterConfig {
        arrays: false,
        ..FilterConfig::default()
    };
    let mut builder = StandardOperatorsBuilder::new(&catalog, &config, &DefaultInflector);
    assert!(builder.operators_type(Oid(1009), None, None).is_none());
}

#[test]
fn unfilterable_types_yield_none() {
    let catalog = blog_catalog();
    let config = FilterConfig {
        allowed_field_types: Some(vec!["Int".to_string()]),
        ..FilterConfig::default()
    };
    let mut builder = StandardOperatorsBuilder::new(&catalog, &config, &DefaultInflector);

    assert!(builder.operators_type(Oid(5001), None, None).is_none());
    assert!(builder.operators_type(oid::RECORD, None, None).is_none());
    assert!(builder.operators_type(Oid(424_242), None, None).is_none());
    assert!(builder.operators_type(oid::TEXT, None, None).is_none());
    assert!(builder.operators_type(oid::INT4, None, None).is_some());
}

#[test]
fn argument_carrying_types_are_named_per_column() {
    let catalog = blog_catalog();
    let config = FilterConfig::default();
    let mut builder = StandardOperatorsBuilder::new(&catalog, &config, &DefaultInflector);
    let arguments = project_arguments(&DefaultInflector, procedure(&catalog, "post_score"));
    let args = ComputedColumnArgs {
        table: "post",
        name: "score",
        arguments: &arguments,
    };

    let ty = builder.operators_type(oid::INT4, None, Some(&args)).unwrap();
    assert_eq!(ty.name, "PostScoreIntFilter");

    let args_type = ty.args.as_ref().unwrap();
    assert_eq!(args_type.name, "PostScoreArgs");
    let fields: Vec<_> = args_type
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.type_name.as_str()))
        .collect();
    assert_eq!(fields, [("a", "Int"), ("b", "String")]);

    let inputs = ty.fields();
    assert_eq!(inputs[0].name, "args");
    assert_eq!(inputs[0].type_ref, "PostScoreArgs");
    assert_eq!(inputs[1].name, "isNull");

    // memoized
    assert_eq!(builder.operators_type(oid::INT4, None, Some(&args)), Some(ty));
}
