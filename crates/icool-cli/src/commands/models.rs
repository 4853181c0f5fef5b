use crate::cli::ModelsArgs;
use crate::error::{CliError, Result};
use icoolgen::core::catalog::{self, ModelCatalog, ModelVariant, ParameterSlot};
use std::fmt::Write;

pub fn run(args: ModelsArgs) -> Result<()> {
    let text = match (args.family, args.model) {
        (None, _) => list_families(),
        (Some(family), None) => list_variants(find_family(&family)?),
        (Some(family), Some(model)) => {
            let catalog = find_family(&family)?;
            describe_variant(catalog, catalog.variant_for(&model)?)
        }
    };
    print!("{}", text);
    Ok(())
}

fn find_family(name: &str) -> Result<&'static ModelCatalog> {
    catalog::catalog_for(name).ok_or_else(|| CliError::UnknownFamily(name.to_string()))
}

fn list_families() -> String {
    let mut out = String::new();
    for c in catalog::catalogs() {
        let _ = writeln!(
            out,
            "{:<14} {:>2} models  (selected by '{}', {} values)",
            c.family,
            c.variants.len(),
            c.discriminator,
            c.width
        );
    }
    out
}

fn list_variants(catalog: &ModelCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} models:", catalog.family);
    for v in catalog.variants {
        let _ = writeln!(out, "{:>4}  {:<22} {}", v.ordinal, v.key, v.description);
    }
    out
}

fn describe_variant(catalog: &ModelCatalog, variant: &ModelVariant) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} = \"{}\" (model {}): {}",
        catalog.family, catalog.discriminator, variant.key, variant.ordinal, variant.description
    );
    if !variant.doc.is_empty() {
        let _ = writeln!(out, "{}", variant.doc);
    }
    if variant.parameters.is_empty() {
        let _ = writeln!(out, "  (no parameters)");
        return out;
    }
    let _ = writeln!(out, "  {:>3}  {:<18} {:<4} {:<12} Description", "Pos", "Name", "Type", "Range");
    for slot in variant.parameters {
        let _ = writeln!(
            out,
            "  {:>3}  {:<18} {:<4} {:<12} {}",
            slot.position,
            slot.name,
            slot.kind.code(),
            range(slot),
            slot.doc
        );
    }
    out
}

fn range(slot: &ParameterSlot) -> String {
    match (slot.min, slot.max) {
        (Some(lo), Some(hi)) => format!("{}..{}", lo, hi),
        _ => "-".to_string(),
    }
}
