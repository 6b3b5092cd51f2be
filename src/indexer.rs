//! Document indexer.
//!
//! Walks a file or folder, keeps files whose extension is in the configured
//! set, and turns each into a [`KnowledgeRecord`]: markup documents become a
//! flat list of [`ElementDescriptor`]s, everything else a line preview.
//! Indexing is read-only. Every subdirectory is descended into, hidden and
//! vendor folders included.

use anyhow::{bail, Context, Result};
use globset::{GlobBuilder, GlobMatcher};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::IndexerConfig;
use crate::models::{ElementDescriptor, KnowledgeRecord, SiteIndex};
use crate::selector::build_selector;

/// Element kinds extracted from markup documents.
static INTERESTING: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, p, img, a, span, div").expect("element selector must parse")
});

/// Index `path` (a file or a directory).
///
/// A file with an unsupported extension yields an empty index. A path that
/// does not exist is an error that aborts the command.
pub fn index_site(path: &Path, config: &IndexerConfig) -> Result<SiteIndex> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Cannot index {}: path does not exist", path.display()))?;

    let root_directory = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf());
    let matcher = extension_matcher(&config.extensions)?;

    let files = if metadata.is_file() {
        if is_supported(&matcher, path) {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        }
    } else if metadata.is_dir() {
        collect_files(path, &matcher, config.follow_symlinks)?
    } else {
        bail!("Cannot index {}: not a file or directory", path.display());
    };

    let records: Vec<KnowledgeRecord> = files
        .iter()
        .filter_map(|file| index_file(file, config.max_text_lines))
        .collect();

    tracing::info!(
        root = %path.display(),
        files = files.len(),
        records = records.len(),
        "site indexed"
    );

    Ok(SiteIndex {
        root_directory,
        files,
        records,
    })
}

fn collect_files(root: &Path, matcher: &GlobMatcher, follow_symlinks: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(follow_symlinks)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_supported(matcher, entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    Ok(files)
}

/// Build a case-insensitive `*.{ext,...}` matcher over file names.
fn extension_matcher(extensions: &[String]) -> Result<GlobMatcher> {
    let pattern = format!("*.{{{}}}", extensions.join(","));
    let glob = GlobBuilder::new(&pattern)
        .case_insensitive(true)
        .literal_separator(true)
        .build()
        .with_context(|| format!("Invalid extension list: {:?}", extensions))?;
    Ok(glob.compile_matcher())
}

fn is_supported(matcher: &GlobMatcher, path: &Path) -> bool {
    path.file_name().is_some_and(|name| matcher.is_match(name))
}

/// True for `.html` / `.htm` files (case-insensitive).
pub fn is_markup(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

/// Read and index one file. Unreadable files yield no record.
fn index_file(path: &Path, max_lines: usize) -> Option<KnowledgeRecord> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "skipping unreadable file");
            return None;
        }
    };
    let content = String::from_utf8_lossy(&bytes);

    if is_markup(path) {
        Some(index_html(path, &content))
    } else {
        Some(index_text(path, &content, max_lines))
    }
}

/// Extract headings, paragraphs, images, links, spans and divs.
pub fn index_html(path: &Path, html: &str) -> KnowledgeRecord {
    let document = Html::parse_document(html);
    let items = document
        .select(&INTERESTING)
        .map(|el| {
            let value = el.value();
            ElementDescriptor {
                tag_name: value.name().to_string(),
                text: el.text().collect::<String>().trim().to_string(),
                id: non_empty(value.attr("id")),
                class_name: non_empty(value.attr("class")),
                src: non_empty(value.attr("src")),
                href: non_empty(value.attr("href")),
                selector: build_selector(el),
                file: path.to_path_buf(),
            }
        })
        .collect();

    KnowledgeRecord::Html {
        file: path.to_path_buf(),
        items,
    }
}

pub fn index_text(path: &Path, content: &str, max_lines: usize) -> KnowledgeRecord {
    let lines = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .take(max_lines)
        .collect();

    KnowledgeRecord::Text {
        file: path.to_path_buf(),
        lines,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config() -> IndexerConfig {
        IndexerConfig::default()
    }

    fn site() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(
            root.join("index.html"),
            "<html><body><h1 id=\"top\">Home</h1><p class=\"lead\">Hello</p></body></html>",
        )
        .unwrap();
        fs::write(root.join("about.HTM"), "<h2>About</h2>").unwrap();
        fs::write(root.join("site.css"), "body { color: red; }\nh1 { margin: 0; }").unwrap();
        fs::write(root.join("notes.md"), "<h1>Not parsed</h1>\nsecond").unwrap();
        fs::write(root.join("script.js"), "console.log(1)").unwrap();
        fs::create_dir_all(root.join(".hidden/deep")).unwrap();
        fs::write(root.join(".hidden/deep/page.html"), "<p>deep</p>").unwrap();
        tmp
    }

    #[test]
    fn one_record_per_matching_file() {
        let tmp = site();
        let index = index_site(tmp.path(), &config()).unwrap();
        assert_eq!(index.files.len(), 5);
        assert_eq!(index.records.len(), 5);
        assert!(!index
            .files
            .iter()
            .any(|f| f.extension().unwrap() == "js"));
    }

    #[test]
    fn descends_into_hidden_directories() {
        let tmp = site();
        let index = index_site(tmp.path(), &config()).unwrap();
        assert!(index.files.iter().any(|f| f.ends_with(".hidden/deep/page.html")));
    }

    #[test]
    fn text_files_are_never_parsed_as_markup() {
        let tmp = site();
        let index = index_site(tmp.path(), &config()).unwrap();
        let notes = index
            .records
            .iter()
            .find(|r| r.file().ends_with("notes.md"))
            .unwrap();
        match notes {
            KnowledgeRecord::Text { lines, .. } => {
                assert_eq!(lines[0], "<h1>Not parsed</h1>");
            }
            KnowledgeRecord::Html { .. } => panic!("markdown indexed as markup"),
        }
    }

    #[test]
    fn markup_descriptors_carry_attributes_and_selectors() {
        let tmp = site();
        let index = index_site(&tmp.path().join("index.html"), &config()).unwrap();
        assert_eq!(index.root_directory, tmp.path());
        let (_, items) = index.html_records().next().unwrap();
        let h1 = items.iter().find(|i| i.tag_name == "h1").unwrap();
        assert_eq!(h1.text, "Home");
        assert_eq!(h1.id.as_deref(), Some("top"));
        assert_eq!(h1.selector, "body > h1#top");
        let p = items.iter().find(|i| i.tag_name == "p").unwrap();
        assert_eq!(p.class_name.as_deref(), Some("lead"));
    }

    #[test]
    fn unsupported_single_file_gives_empty_index() {
        let tmp = site();
        let index = index_site(&tmp.path().join("script.js"), &config()).unwrap();
        assert!(index.files.is_empty());
        assert!(index.records.is_empty());
    }

    #[test]
    fn missing_path_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = index_site(&tmp.path().join("nope"), &config()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn text_preview_is_truncated() {
        let content: String = (0..600).map(|i| format!("line {}\n", i)).collect();
        match index_text(Path::new("big.md"), &content, 500) {
            KnowledgeRecord::Text { lines, .. } => {
                assert_eq!(lines.len(), 500);
                assert_eq!(lines[499], "line 499");
            }
            KnowledgeRecord::Html { .. } => unreachable!(),
        }
    }
}
