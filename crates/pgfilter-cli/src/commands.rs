use clap::{Args, Subcommand};
use pgfilter_core::{
    Error,
    config::FilterConfig,
    filter::{
        TableFilter, computed::FilterField, registry::RegisteredType, resolve::StandardFieldResolver,
    },
    naming::DefaultInflector,
    sql::{QueryContext, SqlFragment},
    value::{FilterValue, Value},
};
use pgfilter_schema::Catalog;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error as ThisError;

///
/// CliError
///

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] Error),

    #[error("table '{0}' not found in catalog")]
    UnknownTable(String),

    #[error("invalid filter value: {0}")]
    InvalidValue(#[source] serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

///
/// Commands
///

#[derive(Subcommand)]
pub enum Commands {
    /// Print the filter type, computed column fields and registered types
    /// for a table.
    Fields(TableArgs),

    /// Resolve a filter value for one computed column field into SQL.
    Resolve(ResolveArgs),
}

impl Commands {
    pub fn run(self) -> Result<(), CliError> {
        match self {
            Self::Fields(args) => fields(&args),
            Self::Resolve(args) => resolve(&args),
        }
    }
}

///
/// TableArgs
///

#[derive(Args)]
pub struct TableArgs {
    /// Catalog snapshot (JSON).
    #[arg(long)]
    catalog: PathBuf,

    /// Table to build the filter for.
    #[arg(long)]
    table: String,

    /// Namespace of the table; any namespace when omitted.
    #[arg(long)]
    schema: Option<String>,

    /// Filter configuration (TOML).
    #[arg(long, env = "PGFILTER_CONFIG")]
    config: Option<PathBuf>,
}

///
/// ResolveArgs
///

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    table: TableArgs,

    /// Computed column field name.
    #[arg(long)]
    field: String,

    /// Filter value (JSON), e.g. '{"args": {"minScore": 3}, "equalTo": 5}'.
    #[arg(long)]
    value: String,

    /// Identifier of the row source.
    #[arg(long, default_value = "__local_0__")]
    alias: String,
}

#[derive(Serialize)]
struct FieldsReport<'a> {
    filter_type: &'a str,
    fields: &'a [FilterField],
    types: Vec<&'a RegisteredType>,
}

#[derive(Serialize)]
struct ResolveReport<'a> {
    sql: Option<String>,
    params: &'a [Value],
}

// Catalog, config and the built filter for one table.
fn load(args: &TableArgs) -> Result<(Catalog, TableFilter), CliError> {
    let catalog = Catalog::from_json_path(&args.catalog).map_err(Error::from)?;
    let config = match &args.config {
        Some(path) => FilterConfig::from_path(path).map_err(Error::from)?,
        None => FilterConfig::default(),
    };

    let table = catalog
        .class_by_name(args.schema.as_deref(), &args.table)
        .ok_or_else(|| CliError::UnknownTable(args.table.clone()))?;
    let filter =
        TableFilter::build(&catalog, &config, &DefaultInflector, table).map_err(Error::from)?;

    Ok((catalog, filter))
}

fn fields(args: &TableArgs) -> Result<(), CliError> {
    let (_, filter) = load(args)?;

    print_json(&FieldsReport {
        filter_type: filter.computed.filter_type(),
        fields: filter.computed.fields(),
        types: filter.registry.types().collect(),
    })
}

fn resolve(args: &ResolveArgs) -> Result<(), CliError> {
    let (catalog, filter) = load(&args.table)?;
    let value: FilterValue = serde_json::from_str(&args.value).map_err(CliError::InvalidValue)?;

    let mut query = QueryContext::new();
    let resolver = StandardFieldResolver::new(&catalog, &filter.registry);
    let sql = filter
        .computed
        .resolve(
            &args.field,
            Some(&value),
            &SqlFragment::identifier(&args.alias),
            &mut query,
            &resolver,
        )
        .map_err(Error::from)?;

    print_json(&ResolveReport {
        sql: sql.map(SqlFragment::into_string),
        params: query.params(),
    })
}

fn print_json(report: &impl Serialize) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(report)?;
    println!("{text}");

    Ok(())
}
