//! Multi-file import semantics, exercised against a real directory tree.

extern crate springboard;
extern crate tempfile;

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use springboard::{compile_file, ErrorKind, SpringboardConf};

/// Write a tree of source files into a fresh temporary directory.
fn source_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for &(path, text) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, text).unwrap();
    }
    dir
}

fn compile_in(dir: &TempDir, root: &str) -> Result<String, springboard::SpringboardError> {
    compile_file(&dir.path().join(root), &SpringboardConf::new())
}

#[test]
fn imported_symbols_usable() {
    let dir = source_tree(&[
        ("std.sb", ": inc2 ++ ;\n: dots .. ;"),
        ("main.sb", "import \"std.sb\"\ninc2 dots"),
    ]);
    assert_eq!(compile_in(&dir, "main.sb").unwrap(), "++..");
}

#[test]
fn transitive_imports() {
    let dir = source_tree(&[
        ("base.sb", ": b +> ;"),
        ("mid.sb", "import \"base.sb\"\n: m b b ;"),
        ("main.sb", "import \"mid.sb\"\nm"),
    ]);
    assert_eq!(compile_in(&dir, "main.sb").unwrap(), "+>+>");
}

#[test]
fn nested_relative_imports() {
    // lib/helpers.sb imports its sibling through a path relative to lib/,
    // not to the root file's directory.
    let dir = source_tree(&[
        ("lib/cells.sb", ": zero [-] ;"),
        ("lib/helpers.sb", "import \"cells.sb\"\n: clear2 zero > zero ;"),
        ("main.sb", "import \"lib/helpers.sb\"\nclear2"),
    ]);
    assert_eq!(compile_in(&dir, "main.sb").unwrap(), "[-]>[-]");
}

#[test]
fn import_cycle_rejected() {
    let dir = source_tree(&[
        ("a.sb", "import \"b.sb\"\n: a0 + ;"),
        ("b.sb", "import \"a.sb\"\n: b0 - ;"),
        ("main.sb", "import \"a.sb\"\na0"),
    ]);
    let err = compile_in(&dir, "main.sb").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CircularDependency);
}

#[test]
fn transitive_import_cycle_rejected() {
    let dir = source_tree(&[
        ("a.sb", "import \"b.sb\""),
        ("b.sb", "import \"c.sb\""),
        ("c.sb", "import \"a.sb\""),
        ("main.sb", "import \"a.sb\""),
    ]);
    let err = compile_in(&dir, "main.sb").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CircularDependency);
    assert!(err.message().contains("a.sb"));
}

#[test]
fn diamond_import_accepted() {
    let dir = source_tree(&[
        ("shared.sb", ": s +- ;"),
        ("left.sb", "import \"shared.sb\"\n: l s ;"),
        ("right.sb", "import \"shared.sb\"\n: r s ;"),
        ("main.sb", "import \"left.sb\"\nimport \"right.sb\"\nl r"),
    ]);
    // The optimizer cancels the +- pairs; what matters is that resolution
    // succeeds even though shared.sb is reached twice.
    assert_eq!(compile_in(&dir, "main.sb").unwrap(), "");
}

#[test]
fn shadowing_across_imports_allowed() {
    // Two imports define the same symbol differently; the later one wins
    // silently. Only local redefinition is an error.
    let dir = source_tree(&[
        ("one.sb", ": a + ;"),
        ("two.sb", ": a - ;"),
        ("main.sb", "import \"one.sb\"\nimport \"two.sb\"\na"),
    ]);
    assert_eq!(compile_in(&dir, "main.sb").unwrap(), "-");
}

#[test]
fn local_redefinition_of_import_rejected() {
    let dir = source_tree(&[
        ("one.sb", ": a + ;"),
        ("main.sb", "import \"one.sb\"\n: a - ;\na"),
    ]);
    let err = compile_in(&dir, "main.sb").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SymbolRedefined);
}

#[test]
fn wide_import_lists_accepted() {
    // Import breadth is unbounded; only the nesting depth of the import
    // chain counts against the limit.
    let mut files: Vec<(String, String)> = Vec::new();
    let mut main = String::new();
    for i in 0..70 {
        files.push((format!("m{}.sb", i), format!(": m{} + ;", i)));
        main.push_str(&format!("import \"m{}.sb\"\n", i));
    }
    main.push_str("m0 m69");
    files.push(("main.sb".to_string(), main));
    let entries: Vec<(&str, &str)> = files
        .iter()
        .map(|(p, t)| (p.as_str(), t.as_str()))
        .collect();
    let dir = source_tree(&entries);
    assert_eq!(compile_in(&dir, "main.sb").unwrap(), "++");
}

#[test]
fn missing_import_rejected() {
    let dir = source_tree(&[("main.sb", "import \"ghost.sb\"\n+")]);
    let err = compile_in(&dir, "main.sb").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn missing_root_file_rejected() {
    let dir = source_tree(&[]);
    let err = compile_in(&dir, "main.sb").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!Path::new("main.sb").exists());
}

#[test]
fn import_supplies_forward_symbols() {
    // The importing file's code may reference symbols that only exist via
    // the import, and imported definitions may reference each other.
    let dir = source_tree(&[
        ("std.sb", ": inc2 ++ ;\n: inc4 inc2 inc2 ;"),
        ("main.sb", "import \"std.sb\"\ninc4"),
    ]);
    assert_eq!(compile_in(&dir, "main.sb").unwrap(), "++++");
}
