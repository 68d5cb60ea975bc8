//! End-to-end pipeline tests over a temporary project: tsconfig.json
//! plus sample sources on disk, through configuration, discovery,
//! parsing, and assembly.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use codemap::config::Config;
use codemap::discovery::find_source_files;
use codemap::frontend::build_program;
use codemap::output::generate_codemap;

const SAMPLE_CODE: &str = r#"
interface User {
  id: number;
  name: string;
}

type Status = 'active' | 'inactive';

class UserManager {
  private users: User[] = [];

  addUser(user: User): void {
    this.users.push(user);
  }

  getUser(id: number): User | undefined {
    return this.users.find(u => u.id === id);
  }
}

enum UserRole {
  Admin = 'ADMIN',
  User = 'USER'
}

const DEFAULT_STATUS: Status = 'active';
"#;

struct TempProject {
    root: PathBuf,
}

impl TempProject {
    fn new(name: &str) -> Result<Self> {
        let root = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root)?;
        fs::write(
            root.join("tsconfig.json"),
            r#"{
  "compilerOptions": { "target": "es2018", "module": "commonjs", "strict": true },
  "include": ["**/*"],
  "exclude": ["node_modules/**"]
}"#,
        )?;
        Ok(Self { root })
    }

    fn write_source(&self, rel: &str, content: &str) -> Result<()> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    fn generate(&self) -> Result<String> {
        let root = self.root.canonicalize()?;
        let config = Config::load(&root)?;
        let files = find_source_files(&root, &config)?;
        let (program, oracle) = build_program(&root, &files)?;
        Ok(generate_codemap(&program, &oracle))
    }
}

impl Drop for TempProject {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

#[test]
fn generates_codemap_for_basic_constructs() -> Result<()> {
    let project = TempProject::new("codemap_e2e_basic")?;
    project.write_source("sample.ts", SAMPLE_CODE)?;

    let map = project.generate()?;

    // Document structure
    assert!(map.starts_with("<file_map>"));
    assert!(map.ends_with("</file_map>"));
    assert_eq!(map.matches("<Complete Definitions>").count(), 1);

    // All declaration kinds
    assert!(map.contains("Interface: User"));
    assert!(map.contains("type Status ="));
    assert!(map.contains("Class: UserManager"));
    assert!(map.contains("Enum: UserRole"));
    assert!(map.contains("const DEFAULT_STATUS:"));

    // Class members
    assert!(map.contains("addUser"));
    assert!(map.contains("getUser"));

    // Interface properties resolve to their annotated types
    assert!(map.contains("- id: number"));
    assert!(map.contains("- name: string"));

    // Enum cases in declaration order, no values
    assert!(map.contains("Cases:\n  - Admin\n  - User"));
    assert!(!map.contains("ADMIN"));

    Ok(())
}

#[test]
fn empty_file_absent_from_body_but_present_in_tree() -> Result<()> {
    let project = TempProject::new("codemap_e2e_empty")?;
    project.write_source("sample.ts", "")?;

    let map = project.generate()?;

    assert!(map.contains("<file_map>"));
    assert!(map.contains("</file_map>"));
    assert!(map.contains("<Complete Definitions>"));

    let (tree_part, body_part) = map.split_once("<Complete Definitions>").unwrap();
    assert!(tree_part.contains("sample.ts"));
    assert!(!body_part.contains("sample.ts"));

    // No category headers anywhere
    for header in ["Classes:", "Interfaces:", "Types:", "Functions:", "Enums:", "Variables:"] {
        assert!(!map.contains(header), "unexpected header {header}");
    }

    Ok(())
}

#[test]
fn imports_only_file_behaves_like_empty_file() -> Result<()> {
    let project = TempProject::new("codemap_e2e_imports")?;
    project.write_source(
        "sample.ts",
        "import * as fs from 'fs';\nimport { join } from 'path';\n",
    )?;

    let map = project.generate()?;

    assert!(!map.contains("Interface:"));
    assert!(!map.contains("Class:"));
    assert!(!map.contains("Enum:"));
    let body = map.split_once("<Complete Definitions>").unwrap().1;
    assert!(!body.contains("Path:"));

    Ok(())
}

#[test]
fn sibling_files_merge_under_one_directory() -> Result<()> {
    let project = TempProject::new("codemap_e2e_tree")?;
    project.write_source("a/b.ts", "const x: number = 1;\n")?;
    project.write_source("a/c.ts", "const y: number = 2;\n")?;

    let map = project.generate()?;
    let tree_part = map.split_once("<Complete Definitions>").unwrap().0;

    assert_eq!(tree_part.matches("a\n").count(), 1, "prefix merged once");
    assert!(tree_part.contains("a\n  b.ts\n  c.ts\n"));

    Ok(())
}

#[test]
fn declaration_files_are_excluded() -> Result<()> {
    let project = TempProject::new("codemap_e2e_dts")?;
    project.write_source("app.ts", "const live: number = 1;\n")?;
    project.write_source("global.d.ts", "declare const VERSION: string;\n")?;

    let map = project.generate()?;
    assert!(map.contains("app.ts"));
    assert!(!map.contains("global.d.ts"));
    assert!(!map.contains("VERSION"));

    Ok(())
}

#[test]
fn repeated_runs_are_byte_identical() -> Result<()> {
    let project = TempProject::new("codemap_e2e_idempotent")?;
    project.write_source("sample.ts", SAMPLE_CODE)?;
    project.write_source("util/helpers.ts", "export function noop(): void {}\n")?;

    let first = project.generate()?;
    let second = project.generate()?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn missing_tsconfig_is_a_fatal_configuration_error() -> Result<()> {
    let root = std::env::temp_dir().join("codemap_e2e_noconfig");
    let _ = fs::remove_dir_all(&root);
    fs::create_dir_all(&root)?;

    let result = Config::load(Path::new(&root));
    assert!(result.is_err());

    fs::remove_dir_all(&root)?;
    Ok(())
}

#[test]
fn tsconfig_include_limits_the_analyzed_set() -> Result<()> {
    let project = TempProject::new("codemap_e2e_include")?;
    // Narrow the include patterns to src only.
    fs::write(
        project.root.join("tsconfig.json"),
        r#"{ "include": ["src/**/*"] }"#,
    )?;
    project.write_source("src/app.ts", "const inside: number = 1;\n")?;
    project.write_source("scripts/build.ts", "const outside: number = 2;\n")?;

    let map = project.generate()?;
    assert!(map.contains("app.ts"));
    assert!(!map.contains("build.ts"));

    Ok(())
}
