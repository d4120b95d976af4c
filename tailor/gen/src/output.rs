//! Output assembly and file writing for generated code.
//!
//! The generator produces a single Go file holding one `Publicize` method
//! per named object type of the design:
//!
//! ```text
//! <output>/
//! └── publicize.go   # generated header, package clause, methods
//! ```
//!
//! Methods are emitted in type name order so that regenerating an unchanged
//! design produces an identical file. Files are written atomically (temp
//! file + rename).

use std::fs;
use std::path::Path;

use tailor_define::classify::has_own_method;
use tailor_define::{AttributeExpr, DataType, Root, TypeRegistry};
use tracing::{debug, info};

use crate::errors::GeneratorError;
use crate::publicizer::Publicizer;

/// Name of the generated file.
pub const OUTPUT_FILE: &str = "publicize.go";

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by tailor-gen, DO NOT EDIT.";

/// Named types that get a `Publicize` method.
///
/// These are exactly the registered user and media types for which
/// [`has_own_method`] holds, so every `.Publicize()` call the publicizer
/// emits has a method behind it. Aliases are skipped: they either point at
/// one of these types or are copied inline.
pub fn publicizable_types(registry: &TypeRegistry) -> Vec<(&str, &AttributeExpr)> {
    registry
        .iter()
        .filter(|(_, dt)| has_own_method(dt, registry))
        .filter_map(|(_, dt)| match dt {
            DataType::UserType(ut) => Some((ut.name.as_str(), &ut.attribute)),
            DataType::MediaType(mt) => Some((mt.name.as_str(), &mt.attribute)),
            _ => None,
        })
        .collect()
}

/// Assembles the Go source of the publicize file.
///
/// ## Errors
///
/// Returns [`GeneratorError::ConfigError`] for an invalid package name, or
/// the first synthesis error of any method.
pub fn assemble_file(root: &Root, package: &str) -> Result<String, GeneratorError> {
    validate_package(package)?;
    let publicizer = Publicizer::new(&root.types)?;

    let mut sections = vec![GENERATED_HEADER.to_string(), format!("package {package}")];
    for (name, attribute) in publicizable_types(&root.types) {
        debug!(type_name = name, "generating publicize method");
        sections.push(publicizer.publicize_method(name, attribute)?);
    }
    Ok(sections.join("\n\n") + "\n")
}

fn validate_package(package: &str) -> Result<(), GeneratorError> {
    let valid = package
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && package
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(GeneratorError::ConfigError(format!(
            "'{}' is not a valid Go package name",
            package
        )))
    }
}

/// Writes content to a file atomically using temp file + rename.
///
/// Readers see either the old or the new content, never a partial write.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Generates the publicize file for `root` and writes it to `output_dir`.
///
/// ## Arguments
///
/// * `root` - The evaluated design
/// * `package` - Go package name of the generated file
/// * `output_dir` - Directory to write [`OUTPUT_FILE`] to
/// * `dry_run` - If true, print the code instead of writing it
///
/// ## Returns
///
/// The generated code.
pub fn generate_and_write(
    root: &Root,
    package: &str,
    output_dir: &Path,
    dry_run: bool,
) -> Result<String, GeneratorError> {
    let code = assemble_file(root, package)?;

    if dry_run {
        println!("=== {} ===\n{}", OUTPUT_FILE, code);
    } else {
        let path = output_dir.join(OUTPUT_FILE);
        write_atomic(&path, &code)?;
        info!(path = %path.display(), bytes = code.len(), "wrote publicize code");
    }

    Ok(code)
}
