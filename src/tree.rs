//! File-tree construction and rendering.
//!
//! Builds a nested directory structure from the analyzed file set by
//! merging shared path prefixes, then renders it depth-first with
//! two-space indentation per level:
//!
//! ```text
//! src
//!   extractor.ts
//!   output.ts
//! tests
//!   codemap.test.ts
//! ```
//!
//! Siblings keep encounter order - callers wanting sorted output must
//! sort the input paths first. A path that is both a file and a
//! directory prefix of another path is a caller-side invariant violation;
//! the tree does not validate it and the output for such input is
//! unspecified.

use std::path::Path;

/// Prefix-merged directory tree over a set of relative file paths.
#[derive(Debug, Default)]
pub struct FileTree {
    root: TreeNode,
}

/// Children keyed by path segment, in encounter order. A node with no
/// children renders as a leaf (file); there is no other file marker.
#[derive(Debug, Default)]
struct TreeNode {
    children: Vec<(String, TreeNode)>,
}

impl TreeNode {
    fn child_mut(&mut self, segment: &str) -> &mut TreeNode {
        // Linear search keeps encounter order; sibling counts are small.
        if let Some(idx) = self.children.iter().position(|(name, _)| name == segment) {
            return &mut self.children[idx].1;
        }
        self.children.push((segment.to_string(), TreeNode::default()));
        &mut self.children.last_mut().unwrap().1
    }

    fn render_into(&self, out: &mut String, indent: usize) {
        for (name, child) in &self.children {
            for _ in 0..indent {
                out.push_str("  ");
            }
            out.push_str(name);
            out.push('\n');
            child.render_into(out, indent + 1);
        }
    }
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from an iterator of relative paths.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        let mut tree = Self::new();
        for path in paths {
            tree.insert(path);
        }
        tree
    }

    /// Insert one relative path, merging shared directory prefixes.
    /// Inserting the same path twice is a no-op.
    pub fn insert(&mut self, path: &Path) {
        let mut current = &mut self.root;
        for component in path.components() {
            let segment = component.as_os_str().to_string_lossy();
            current = current.child_mut(&segment);
        }
    }

    /// Render the tree as indented text, one segment per line, each level
    /// two spaces deeper than its parent. Empty tree renders as an empty
    /// string; otherwise the result ends with a newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.root.render_into(&mut out, 0);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_prefix_merged() {
        let mut tree = FileTree::new();
        tree.insert(Path::new("a/b.ts"));
        tree.insert(Path::new("a/c.ts"));
        assert_eq!(tree.render(), "a\n  b.ts\n  c.ts\n");
    }

    #[test]
    fn test_duplicate_insert_is_idempotent() {
        let mut tree = FileTree::new();
        tree.insert(Path::new("src/main.ts"));
        tree.insert(Path::new("src/main.ts"));
        assert_eq!(tree.render(), "src\n  main.ts\n");
    }

    #[test]
    fn test_siblings_keep_encounter_order() {
        let mut tree = FileTree::new();
        tree.insert(Path::new("zeta.ts"));
        tree.insert(Path::new("alpha.ts"));
        assert_eq!(tree.render(), "zeta.ts\nalpha.ts\n");
    }

    #[test]
    fn test_nested_indentation() {
        let mut tree = FileTree::new();
        tree.insert(Path::new("src/deep/inner.ts"));
        assert_eq!(tree.render(), "src\n  deep\n    inner.ts\n");
    }

    #[test]
    fn test_mixed_depth_interleaving() {
        let tree = FileTree::from_paths(
            ["index.ts", "src/app.ts", "src/util/strings.ts", "README.md"]
                .iter()
                .map(Path::new),
        );
        assert_eq!(
            tree.render(),
            "index.ts\nsrc\n  app.ts\n  util\n    strings.ts\nREADME.md\n"
        );
    }

    #[test]
    fn test_empty_tree_renders_empty() {
        assert_eq!(FileTree::new().render(), "");
    }
}
