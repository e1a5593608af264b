//! End-to-end computed column behavior over the blog fixture catalog.

use pgfilter_core::{
    config::FilterConfig,
    error::ResolveError,
    filter::{
        TableFilter,
        registry::RegisteredType,
        computed::{Eligibility, project_arguments},
        resolve::StandardFieldResolver,
    },
    naming::DefaultInflector,
    sql::{QueryContext, SqlFragment},
    value::{FilterValue, Value},
};
use pgfilter_schema::{
    Catalog,
    node::{Class, Procedure},
};

const BLOG: &str = include_str!("fixtures/blog.json");
const SHOP: &str = include_str!("fixtures/shop.json");

fn catalog() -> Catalog {
    Catalog::from_json_str(BLOG).unwrap()
}

fn post(catalog: &Catalog) -> &Class {
    catalog.class_by_name(Some("app"), "post").unwrap()
}

fn procedure<'a>(catalog: &'a Catalog, name: &str) -> &'a Procedure {
    catalog
        .procedures()
        .iter()
        .find(|p| p.name == name)
        .unwrap()
}

fn build(catalog: &Catalog, config: &FilterConfig) -> TableFilter {
    TableFilter::build(catalog, config, &DefaultInflector, post(catalog)).unwrap()
}

fn field_names(filter: &TableFilter) -> Vec<&str> {
    filter
        .computed
        .fields()
        .iter()
        .map(|f| f.field_name.as_str())
        .collect()
}

fn resolve(
    catalog: &Catalog,
    filter: &TableFilter,
    field: &str,
    json: &str,
) -> (Result<Option<SqlFragment>, ResolveError>, QueryContext) {
    let value: FilterValue = serde_json::from_str(json).unwrap();
    let resolver = StandardFieldResolver::new(catalog, &filter.registry);
    let mut query = QueryContext::new();

    let result = filter.computed.resolve(
        field,
        Some(&value),
        &SqlFragment::identifier("__local_0__"),
        &mut query,
        &resolver,
    );

    (result, query)
}

#[test]
fn untagged_procedures_are_hidden_when_disabled() {
    let catalog = catalog();
    let config = FilterConfig {
        computed_columns: false,
        ..FilterConfig::default()
    };
    let eligibility = Eligibility::new(&catalog, &config, &DefaultInflector);

    for procedure in catalog.procedures() {
        if !procedure.tags.has("filterable") {
            assert!(
                eligibility
                    .computed_column(post(&catalog), procedure)
                    .is_none(),
                "{}",
                procedure.name
            );
        }
    }

    assert_eq!(field_names(&build(&catalog, &config)), ["fullName"]);
}

#[test]
fn procedures_without_the_table_prefix_are_never_eligible() {
    let catalog = catalog();
    let config = FilterConfig::default();
    let eligibility = Eligibility::new(&catalog, &config, &DefaultInflector);
    let author = catalog.class_by_name(Some("app"), "author").unwrap();

    for procedure in catalog.procedures() {
        if !procedure.name.starts_with("author_") {
            assert!(
                eligibility.computed_column(author, procedure).is_none(),
                "{}",
                procedure.name
            );
        }
    }
    assert!(
        eligibility
            .computed_column(author, procedure(&catalog, "author_name"))
            .is_some()
    );
}

#[test]
fn projection_skips_the_row_and_output_arguments() {
    let catalog = catalog();

    let rank = project_arguments(&DefaultInflector, procedure(&catalog, "post_rank"));
    let names: Vec<_> = rank.iter().map(|arg| arg.name.as_str()).collect();
    assert_eq!(names, ["weight", "bonusPoints"]);

    let full_name = project_arguments(&DefaultInflector, procedure(&catalog, "post_full_name"));
    assert!(full_name.is_empty());
}

#[test]
fn synthesis_is_repeatable() {
    let catalog = catalog();
    let config = FilterConfig::default();

    let first = build(&catalog, &config);
    let second = build(&catalog, &config);

    assert_eq!(first.computed, second.computed);
    assert_eq!(first.registry, second.registry);
}

#[test]
fn arguments_bind_positionally_whatever_the_key_order() {
    let catalog = catalog();
    let filter = build(&catalog, &FilterConfig::default());

    let (result, query) = resolve(
        &catalog,
        &filter,
        "score",
        r#"{"equalTo": 5, "args": {"b": "two", "a": 1}}"#,
    );

    assert_eq!(
        result.unwrap().unwrap().as_str(),
        "\"app\".\"post_score\"(\"__local_0__\", $1, $2) = $3::\"pg_catalog\".\"int4\""
    );
    assert_eq!(
        query.params(),
        [Value::Int(1), Value::Text("two".to_string()), Value::Int(5)]
    );
}

#[test]
fn missing_argument_is_reported_by_name() {
    let catalog = catalog();
    let filter = build(&catalog, &FilterConfig::default());

    let (result, query) = resolve(&catalog, &filter, "computed", r#"{"equalTo": 1}"#);

    let err = result.unwrap_err();
    assert_eq!(
        err,
        ResolveError::MissingArgument {
            argument: "extra".to_string()
        }
    );
    assert_eq!(err.to_string(), "The value for argument extra is missing.");
    assert!(query.params().is_empty());
}

#[test]
fn second_table_argument_produces_no_field() {
    let catalog = catalog();
    let filter = build(&catalog, &FilterConfig::default());

    assert!(!field_names(&filter).contains(&"otherTable"));
    assert!(filter.computed.get("otherTable").is_none());
}

#[test]
fn set_returning_procedure_produces_no_field() {
    let catalog = catalog();
    let filter = build(&catalog, &FilterConfig::default());

    assert!(!field_names(&filter).contains(&"tags"));
}

#[test]
fn argument_free_field_binds_only_the_row() {
    let catalog = catalog();
    let filter = build(&catalog, &FilterConfig::default());

    let full_name = &filter.computed.fields()[1];
    assert_eq!(full_name.field_name, "fullName");
    assert!(!full_name.has_arguments_subfield);
    assert!(filter.registry.resolver(&full_name.operators_type_name, "args").is_none());

    let (result, query) = resolve(&catalog, &filter, "fullName", r#"{"equalTo": "Jane"}"#);

    assert_eq!(
        result.unwrap().unwrap().as_str(),
        "\"app\".\"post_full_name\"(\"__local_0__\") = $1::\"pg_catalog\".\"text\""
    );
    assert_eq!(query.params(), [Value::Text("Jane".to_string())]);
}

#[test]
fn config_file_controls_exposure() {
    let catalog = catalog();
    let config = FilterConfig::from_toml_str(
        r#"
        arrays = false
        allowed_field_types = ["Int", "String"]
        "#,
    )
    .unwrap();

    let filter = build(&catalog, &config);

    assert_eq!(
        field_names(&filter),
        ["score", "fullName", "computed", "rank", "bonus"]
    );
}

#[test]
fn tables_sharing_scalars_merge_into_one_registry() {
    let catalog = Catalog::from_json_str(SHOP).unwrap();
    let config = FilterConfig::default();
    let product = catalog.class_by_name(Some("app"), "product").unwrap();
    let invoice = catalog.class_by_name(Some("billing"), "invoice").unwrap();

    let products = TableFilter::build(&catalog, &config, &DefaultInflector, product).unwrap();
    let invoices = TableFilter::build(&catalog, &config, &DefaultInflector, invoice).unwrap();

    assert_eq!(field_names(&invoices), ["total", "memo", "state"]);

    let mut registry = products.registry.clone();
    registry.merge(invoices.registry.clone()).unwrap();

    // int2 and int4 columns, text and varchar columns, share their types
    let Some(RegisteredType::Operators(int)) = registry.get_type("IntFilter") else {
        panic!("missing IntFilter");
    };
    assert_eq!(int.name, "IntFilter");
    assert!(registry.get_type("StringFilter").is_some());

    // same-named enums from two schemas stay apart
    assert!(registry.get_type("AppStatusFilter").is_some());
    assert!(registry.get_type("BillingStatusFilter").is_some());

    assert_eq!(registry.fields("ProductFilter").len(), 10);
    assert_eq!(registry.fields("InvoiceFilter").len(), 3);

    // each column still casts to its own type
    let resolver = StandardFieldResolver::new(&catalog, &registry);
    let value: FilterValue = serde_json::from_str(r#"{"equalTo": 3}"#).unwrap();
    let mut query = QueryContext::new();
    let sql = invoices
        .computed
        .resolve(
            "total",
            Some(&value),
            &SqlFragment::identifier("__local_1__"),
            &mut query,
            &resolver,
        )
        .unwrap()
        .unwrap();

    assert_eq!(
        sql.as_str(),
        "\"billing\".\"invoice_total\"(\"__local_1__\") = $1::\"pg_catalog\".\"int2\""
    );
    assert_eq!(query.params(), [Value::Int(3)]);
}

#[test]
fn numeric_operand_is_bound_verbatim() {
    let catalog = Catalog::from_json_str(SHOP).unwrap();
    let product = catalog.class_by_name(Some("app"), "product").unwrap();
    let filter =
        TableFilter::build(&catalog, &FilterConfig::default(), &DefaultInflector, product)
            .unwrap();

    let (result, query) = resolve(
        &catalog,
        &filter,
        "price",
        r#"{"greaterThan": 12345678901234567890.000000000001}"#,
    );

    assert_eq!(
        result.unwrap().unwrap().as_str(),
        "\"app\".\"product_price\"(\"__local_0__\") > $1::\"pg_catalog\".\"numeric\""
    );
    assert_eq!(
        query.params(),
        [Value::Numeric("12345678901234567890.000000000001".to_string())]
    );
}
