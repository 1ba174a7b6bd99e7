//! `backstage validate` command implementation.
//!
//! Runs a JSON payload through the same schema the matching dashboard form
//! uses, which is handy for checking fixtures or scripted imports before
//! they reach the storefront API.

use anyhow::{Context, Result, anyhow, bail};
use backstage_schema::{ValidationErrors, schema_by_name};
use clap::ValueEnum;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Schemas selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaName {
    Product,
    EditProduct,
    Bundle,
    Single,
    Coupon,
    Profile,
}

impl SchemaName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaName::Product => "product",
            SchemaName::EditProduct => "edit-product",
            SchemaName::Bundle => "bundle",
            SchemaName::Single => "single",
            SchemaName::Coupon => "coupon",
            SchemaName::Profile => "profile",
        }
    }
}

/// Validate `payload`, returning the field errors when it fails.
pub fn validate_payload(schema: SchemaName, payload: &Value) -> Result<Option<ValidationErrors>> {
    let schema = schema_by_name(schema.as_str())
        .ok_or_else(|| anyhow!("unknown schema '{}'", schema.as_str()))?;
    Ok(schema.validate(payload).err())
}

pub fn run(schema: SchemaName, file: &Path) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let payload: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    match validate_payload(schema, &payload)? {
        None => {
            println!("✅ {} is a valid {} payload", file.display(), schema.as_str());
            Ok(())
        }
        Some(errors) => {
            println!("❌ {} failed {} validation:", file.display(), schema.as_str());
            for error in errors.iter() {
                println!("  ✗ {}: {}", error.field, error.message);
            }
            bail!("{} field error(s)", errors.len());
        }
    }
}
