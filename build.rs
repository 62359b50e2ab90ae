use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/diagnostic_codes.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let entries = catalog.get("entries").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'entries' field\n\
             The catalog must have a top-level 'entries' array.\n"
        );
    });

    let entries = entries.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'entries' must be an array\n\
             Got: {entries}\n"
        );
    });

    validate_entries(entries);

    println!(
        "cargo:warning=Validated catalog: {} entries",
        entries.len()
    );
}

fn validate_entries(entries: &[serde_json::Value]) {
    for (i, entry) in entries.iter().enumerate() {
        let code = entry
            .get("code")
            .and_then(|v| v.as_str())
            .unwrap_or("<unknown>");

        assert!(
            entry.get("code").and_then(|v| v.as_str()).is_some(),
            "\n\nCATALOG BUILD ERROR: Entry at index {i} missing 'code' field\n"
        );

        let name = entry.get("name").and_then(|v| v.as_str());
        assert!(
            name.is_some(),
            "\n\nCATALOG BUILD ERROR: Entry '{code}' (index {i}) missing 'name' field\n"
        );
        assert!(
            !name.unwrap_or_default().trim().is_empty(),
            "\n\nCATALOG BUILD ERROR: Entry '{code}' (index {i}) has a blank 'name'\n\
             Display names must be non-empty after trimming.\n"
        );

        // Stored levels are advisory, but a negative value is always a data error
        if let Some(level) = entry.get("level") {
            assert!(
                level.as_u64().is_some(),
                "\n\nCATALOG BUILD ERROR: Entry '{code}' (index {i}) has invalid 'level'\n\
                 Levels must be non-negative integers.\n"
            );
        }
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/diagnostic_codes.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
