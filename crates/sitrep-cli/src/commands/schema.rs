use serde_json::Value;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output;
use crate::snapshot::Snapshot;

/// Handle `sitrep schema <type>`. Needs no configuration.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_of(args.type_name)?;
    let format = match flags.format {
        OutputFormat::Raw => OutputFormat::Raw,
        OutputFormat::Json | OutputFormat::Table => OutputFormat::Json,
    };
    output::emit(&schema, format)
}

fn schema_of(type_name: SchemaType) -> anyhow::Result<Value> {
    let schema = match type_name {
        SchemaType::Report => schemars::schema_for!(sitrep_core::SituationReport),
        SchemaType::Snapshot => schemars::schema_for!(Snapshot),
        SchemaType::Summary => schemars::schema_for!(sitrep_core::Summary),
    };
    Ok(serde_json::to_value(schema)?)
}
