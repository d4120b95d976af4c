//! End-to-end tests: evaluate a design, generate code and inspect the file.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

use tailor_definitions::define_cellar;
use tailor_gen::output::{GENERATED_HEADER, OUTPUT_FILE, generate_and_write};

#[test]
fn cellar_generates_publicize_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let out_dir = temp_dir.path().join("app");

    let root = define_cellar().expect("cellar design should evaluate");
    generate_and_write(&root, "app", &out_dir, false).expect("Failed to generate code");

    let code = fs::read_to_string(out_dir.join(OUTPUT_FILE)).expect("Failed to read output");
    assert!(code.starts_with(GENERATED_HEADER));
    assert!(code.contains("package app"));
    for public in ["Account", "BottleMedia", "Category"] {
        assert!(
            code.contains(&format!("Publicize() *{} {{", public)),
            "missing method for {}",
            public
        );
    }
}

#[test]
fn account_method_matches_expected_text() {
    let root = define_cellar().expect("cellar design should evaluate");
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let code = generate_and_write(&root, "app", temp_dir.path(), true).expect("Failed to generate code");

    let expected = "\
// Publicize creates Account from account
func (ut *account) Publicize() *Account {
\tvar pub Account
\tpub.ID = *ut.ID
\tpub.Name = *ut.Name
\tif ut.CreatedAt != nil {
\t\tpub.CreatedAt = ut.CreatedAt
\t}
\tif ut.Labels != nil {
\t\tpub.Labels = ut.Labels
\t}
\treturn &pub
}";
    assert!(code.contains(expected), "unexpected output:\n{}", code);
}

#[test]
fn recursive_type_delegates_instead_of_inlining() {
    let root = define_cellar().expect("cellar design should evaluate");
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let code = generate_and_write(&root, "app", temp_dir.path(), true).expect("Failed to generate code");

    assert!(code.contains("\t\tpub.Subcategories = make([]*Category, len(ut.Subcategories))"));
    assert!(code.contains("\t\t\tpub.Subcategories[i2] = elem2.Publicize()"));
    assert!(code.contains("\t\tpub.Category = ut.Category.Publicize()"));
}

#[test]
fn bottle_media_covers_every_shape() {
    let root = define_cellar().expect("cellar design should evaluate");
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let code = generate_and_write(&root, "app", temp_dir.path(), true).expect("Failed to generate code");

    // required nested type, unguarded
    assert!(code.contains("\n\tpub.Account = ut.Account.Publicize()\n"));
    // optional inline object
    assert!(code.contains("\t\tpub.Origin = &struct {"));
    assert!(code.contains("\t\tpub.Origin.Country = *ut.Origin.Country"));
    // optional array of primitives
    assert!(code.contains("\t\tfor i2, elem2 := range ut.Ratings {"));
    // optional map with object values
    assert!(code.contains("\t\t\tpubv2 := v2.Publicize()"));
    assert!(code.contains("\t\t\tpub.Reviewers[pubk2] = pubv2"));
}

#[test]
fn regeneration_is_deterministic() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let first = generate_and_write(&define_cellar().unwrap(), "app", temp_dir.path(), false).unwrap();
    let second = generate_and_write(&define_cellar().unwrap(), "app", temp_dir.path(), false).unwrap();
    assert_eq!(first, second);
}

/// Checks that the generated file is syntactically valid Go.
#[test]
#[ignore = "requires gofmt on PATH"]
fn generated_code_parses_with_gofmt() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = define_cellar().expect("cellar design should evaluate");
    generate_and_write(&root, "app", temp_dir.path(), false).expect("Failed to generate code");

    let output = Command::new("gofmt")
        .arg("-e")
        .arg(temp_dir.path().join(OUTPUT_FILE))
        .output()
        .expect("Failed to run gofmt");

    assert!(
        output.status.success(),
        "gofmt rejected generated code:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
}
