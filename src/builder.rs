//! Builders that populate a [`TreeArena`] from external data.
//!
//! Two variants: a filesystem mirror (directories become internal
//! nodes, regular files become leaves weighted by byte length) and a
//! category tree fed by a nested mapping of colon-separated category
//! paths (the papers dataset). Construction is bottom-up so every
//! internal node's size is the sum of its subtree at adoption time.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use generational_arena::Index;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::arena::{LeafDetail, TreeArena};
use crate::errors::{TreeError, TreeResult};
use crate::path::{CategoryStyle, FileSystemStyle};

/// Builds a tree mirroring a directory structure.
///
/// A regular file becomes a leaf with the file's byte length as its
/// size; a directory becomes an internal node named by its base name
/// whose children are the recursive builds of its entries, in
/// file-name order.
pub struct FsTreeBuilder {
    pending_children: HashMap<PathBuf, Vec<Index>>,
}

impl Default for FsTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FsTreeBuilder {
    pub fn new() -> Self {
        Self {
            pending_children: HashMap::new(),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build_from_path(&mut self, root_path: &Path) -> TreeResult<TreeArena> {
        if !root_path.exists() {
            return Err(TreeError::PathNotFound(root_path.to_path_buf()));
        }
        self.pending_children.clear();

        let mut tree = TreeArena::with_style(Box::new(FileSystemStyle));
        let mut root_idx = None;

        // contents_first yields every directory after its entries, so
        // children are always built before their parent is inserted.
        for entry in WalkDir::new(root_path).sort_by_file_name().contents_first(true) {
            let entry = entry.map_err(|e| TreeError::PathResolution {
                path: root_path.to_path_buf(),
                reason: e.to_string(),
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();

            let idx = if entry.file_type().is_dir() {
                let children = self
                    .pending_children
                    .remove(entry.path())
                    .unwrap_or_default();
                tree.insert_internal(name, children)
            } else {
                let metadata = entry.metadata().map_err(|e| TreeError::PathResolution {
                    path: entry.path().to_path_buf(),
                    reason: e.to_string(),
                })?;
                tree.insert_leaf(name, metadata.len())
            };

            if entry.depth() == 0 {
                root_idx = Some(idx);
            } else if let Some(parent) = entry.path().parent() {
                self.pending_children
                    .entry(parent.to_path_buf())
                    .or_default()
                    .push(idx);
            }
        }

        if let Some(root) = root_idx {
            tree.set_root(root);
        }
        debug!("built filesystem tree with {} nodes", tree.len());
        Ok(tree)
    }
}

/// A terminal dataset record: primary size plus the two secondary
/// attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperRecord {
    pub citations: u64,
    pub authors: String,
    pub url: String,
}

/// A nested category mapping: one entry per category segment or paper
/// title.
pub type CategoryMap = BTreeMap<String, CategoryEntry>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryEntry {
    Record(PaperRecord),
    Nested(CategoryMap),
}

/// Builds a category tree from a nested mapping.
pub struct CategoryTreeBuilder;

impl CategoryTreeBuilder {
    /// One node per mapping key: leaves for records (size = citation
    /// count), internal nodes for nested maps, wrapped under a root
    /// named `root_name`.
    #[instrument(level = "debug", skip(map))]
    pub fn build(root_name: &str, map: &CategoryMap) -> TreeArena {
        let mut tree = TreeArena::with_style(Box::new(CategoryStyle));
        let children = Self::build_level(&mut tree, map);
        let root = tree.insert_internal(root_name, children);
        tree.set_root(root);
        debug!("built category tree with {} nodes", tree.len());
        tree
    }

    fn build_level(tree: &mut TreeArena, map: &CategoryMap) -> Vec<Index> {
        map.iter()
            .map(|(name, entry)| match entry {
                CategoryEntry::Record(record) => tree.insert_leaf_with_detail(
                    name.clone(),
                    record.citations,
                    LeafDetail {
                        authors: record.authors.clone(),
                        url: record.url.clone(),
                    },
                ),
                CategoryEntry::Nested(nested) => {
                    let children = Self::build_level(tree, nested);
                    tree.insert_internal(name.clone(), children)
                }
            })
            .collect()
    }
}

/// Read the papers dataset into a nested category mapping.
///
/// The file is comma-separated with a header line and the columns
/// authors, title, year, categories, url, citations; the categories
/// column holds a colon-separated path. With `by_year` the year is
/// prepended as the first category level.
#[instrument(level = "debug")]
pub fn load_dataset(path: &Path, by_year: bool) -> TreeResult<CategoryMap> {
    let file = File::open(path).map_err(|_| TreeError::PathNotFound(path.to_path_buf()))?;
    let reader = BufReader::new(file);

    let mut map = CategoryMap::new();
    for (line_no, line) in reader.lines().enumerate().skip(1) {
        let line = line.map_err(TreeError::FileReadError)?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_record(&line);
        if fields.len() < 6 {
            return Err(TreeError::InvalidFormat {
                path: path.to_path_buf(),
                reason: format!("line {}: expected 6 columns, got {}", line_no + 1, fields.len()),
            });
        }
        let citations = fields[5].trim().parse::<u64>().map_err(|_| TreeError::InvalidFormat {
            path: path.to_path_buf(),
            reason: format!("line {}: invalid citation count {:?}", line_no + 1, fields[5]),
        })?;
        let record = PaperRecord {
            citations,
            authors: fields[0].clone(),
            url: fields[4].clone(),
        };

        let mut segments: Vec<String> = fields[3].split(':').map(str::to_string).collect();
        if by_year {
            segments.insert(0, fields[2].clone());
        }
        insert_record(&mut map, &segments, fields[1].clone(), record).map_err(|reason| {
            TreeError::InvalidFormat {
                path: path.to_path_buf(),
                reason: format!("line {}: {}", line_no + 1, reason),
            }
        })?;
    }
    Ok(map)
}

fn insert_record(
    map: &mut CategoryMap,
    segments: &[String],
    title: String,
    record: PaperRecord,
) -> Result<(), String> {
    if segments.is_empty() {
        map.insert(title, CategoryEntry::Record(record));
        return Ok(());
    }
    let entry = map
        .entry(segments[0].clone())
        .or_insert_with(|| CategoryEntry::Nested(CategoryMap::new()));
    match entry {
        CategoryEntry::Nested(nested) => insert_record(nested, &segments[1..], title, record),
        CategoryEntry::Record(_) => Err(format!(
            "category {:?} collides with a paper title",
            segments[0]
        )),
    }
}

/// Split one comma-separated record, honoring double-quoted fields.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_record_plain() {
        assert_eq!(split_record("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_record_quoted_comma() {
        assert_eq!(
            split_record(r#"Smith, "Doe, J.",2019"#),
            vec!["Smith", " Doe, J.", "2019"]
        );
    }

    #[test]
    fn test_split_record_escaped_quote() {
        assert_eq!(split_record(r#""say ""hi""",x"#), vec![r#"say "hi""#, "x"]);
    }

    #[test]
    fn test_insert_record_nests_segments() {
        let mut map = CategoryMap::new();
        let record = PaperRecord {
            citations: 3,
            authors: "A".into(),
            url: "u".into(),
        };
        insert_record(
            &mut map,
            &["CS1".to_string(), "Testing".to_string()],
            "Paper".to_string(),
            record,
        )
        .unwrap();

        let CategoryEntry::Nested(level1) = &map["CS1"] else {
            panic!("expected nested entry");
        };
        let CategoryEntry::Nested(level2) = &level1["Testing"] else {
            panic!("expected nested entry");
        };
        assert!(matches!(level2["Paper"], CategoryEntry::Record(_)));
    }

    #[test]
    fn test_insert_record_title_category_collision() {
        let mut map = CategoryMap::new();
        let record = PaperRecord {
            citations: 1,
            authors: String::new(),
            url: String::new(),
        };
        insert_record(&mut map, &[], "Name".to_string(), record.clone()).unwrap();

        let result = insert_record(&mut map, &["Name".to_string()], "Other".to_string(), record);
        assert!(result.is_err());
    }
}
