use dirindex::data::{EntryKind, IndexMode};
use dirindex::engine::{EngineConfig, ScanReport, Strategy, TraversalEngine};
use dirindex::utils::base_name;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

fn scan(root: &Path, mode: IndexMode, strategy: Strategy) -> ScanReport {
    TraversalEngine::new(EngineConfig::new(mode, strategy))
        .expect("Failed to build engine")
        .run(root)
}

fn links(report: &ScanReport) -> BTreeSet<String> {
    report.entries.iter().map(|e| e.link.clone()).collect()
}

/// Links walkdir finds for the same tree, used as the reference answer.
fn expected_links(root: &Path, mode: IndexMode) -> BTreeSet<String> {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .map(|e| e.expect("walkdir failed"))
        .filter_map(|e| {
            let kind = if e.file_type().is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };
            if !mode.indexes(kind) {
                return None;
            }
            let rel = e.path().strip_prefix(root).unwrap();
            let mut link: String = rel
                .components()
                .map(|c| format!("/{}", c.as_os_str().to_string_lossy()))
                .collect();
            if kind == EntryKind::Dir {
                link.push('/');
            }
            Some(link)
        })
        .collect()
}

/// Builds a small but irregular tree:
///
/// ```text
/// temp/
/// ├── docs/
/// │   ├── guide.md
/// │   └── img/
/// │       └── logo.png
/// ├── empty/
/// ├── src/
/// │   ├── main.rs
/// │   └── engine/
/// │       ├── mod.rs
/// │       └── rounds/
/// │           └── barrier.rs
/// └── README
/// ```
fn sample_tree() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    fs::create_dir_all(root.join("docs/img")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::create_dir_all(root.join("src/engine/rounds")).unwrap();

    fs::write(root.join("docs/guide.md"), "# guide").unwrap();
    fs::write(root.join("docs/img/logo.png"), [0u8; 16]).unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
    fs::write(root.join("src/engine/mod.rs"), "").unwrap();
    fs::write(root.join("src/engine/rounds/barrier.rs"), "").unwrap();
    fs::write(root.join("README"), "readme").unwrap();

    temp_dir
}

#[test]
fn test_completeness_folder_mode() {
    let temp_dir = sample_tree();
    let root = temp_dir.path();

    let report = scan(root, IndexMode::FoldersOnly, Strategy::default());

    assert_eq!(links(&report), expected_links(root, IndexMode::FoldersOnly));
    // No duplicates: set size equals entry count
    assert_eq!(links(&report).len(), report.entries.len());
    assert_eq!(report.entries.len(), 6);
    assert!(report.entries.iter().all(|e| e.kind == EntryKind::Dir));
    assert!(report.is_complete());
}

#[test]
fn test_completeness_file_mode() {
    let temp_dir = sample_tree();
    let root = temp_dir.path();

    let report = scan(root, IndexMode::FoldersAndFiles, Strategy::default());

    assert_eq!(links(&report), expected_links(root, IndexMode::FoldersAndFiles));
    assert_eq!(report.entries.len(), 6);
    assert!(report.entries.iter().all(|e| e.kind == EntryKind::File));
    assert!(!links(&report).contains("/empty/"));
}

#[test]
fn test_rescan_is_idempotent_across_widths_and_strategies() {
    let temp_dir = sample_tree();
    let root = temp_dir.path();

    for mode in [IndexMode::FoldersOnly, IndexMode::FoldersAndFiles] {
        let baseline = links(&scan(root, mode, Strategy::Sequential));
        for workers in [1, 3, 20, 50] {
            let report = scan(root, mode, Strategy::RoundParallel { workers });
            assert_eq!(links(&report), baseline, "mode {mode:?}, width {workers}");
        }
    }
}

#[test]
fn test_rounds_match_tree_depth() {
    let temp_dir = sample_tree();
    let root = temp_dir.path();

    // Deepest directory is src/engine/rounds: root is depth 1, rounds is depth 4.
    for workers in [1, 2, 20] {
        let report = scan(root, IndexMode::FoldersOnly, Strategy::RoundParallel { workers });
        assert_eq!(report.rounds, 4, "width {workers}");
    }
}

#[test]
fn test_link_and_parent_folder_agree() {
    let temp_dir = sample_tree();
    let root = temp_dir.path();
    let root_name = base_name(root);

    for mode in [IndexMode::FoldersOnly, IndexMode::FoldersAndFiles] {
        let report = scan(root, mode, Strategy::default());
        for entry in &report.entries {
            assert!(entry.link.starts_with('/'));
            assert!(!entry.link.contains(&*root.to_string_lossy()));

            let trimmed = entry.link.trim_end_matches('/');
            let (parent_link, name) = trimmed.rsplit_once('/').unwrap();
            assert_eq!(name, entry.name);

            let expected_parent = parent_link
                .rsplit('/')
                .next()
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| root_name.clone());
            assert_eq!(entry.parent_folder, expected_parent, "{}", entry.link);

            let on_disk = root.join(trimmed.trim_start_matches('/'));
            assert_eq!(on_disk.is_dir(), entry.kind == EntryKind::Dir);
        }
    }
}

#[test]
fn test_scenario_from_two_children() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    fs::create_dir(root.join("a")).unwrap();
    fs::create_dir(root.join("b")).unwrap();
    fs::write(root.join("b/c.txt"), "c").unwrap();

    let folders = scan(root, IndexMode::FoldersOnly, Strategy::default());
    assert_eq!(folders.rounds, 2);
    let mut pairs: Vec<_> = folders
        .entries
        .iter()
        .map(|e| (e.name.as_str(), e.link.as_str()))
        .collect();
    pairs.sort();
    assert_eq!(pairs, vec![("a", "/a/"), ("b", "/b/")]);

    let files = scan(root, IndexMode::FoldersAndFiles, Strategy::default());
    assert_eq!(files.entries.len(), 1);
    assert_eq!(files.entries[0].name, "c.txt");
    assert_eq!(files.entries[0].link, "/b/c.txt");
    assert_eq!(files.entries[0].parent_folder, "b");
}

#[test]
fn test_timestamps_are_populated() {
    let temp_dir = sample_tree();
    let report = scan(temp_dir.path(), IndexMode::FoldersAndFiles, Strategy::default());
    let now = chrono::Utc::now();
    for entry in &report.entries {
        assert!((now - entry.modified_at).num_minutes().abs() < 10);
        assert!((now - entry.created_at).num_minutes().abs() < 10);
    }
}

#[cfg(unix)]
mod permissions {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Removes all permissions from `dir`; returns false if they are not
    /// enforced (e.g. running as root), in which case the test is skipped.
    fn lock(dir: &Path) -> bool {
        fs::set_permissions(dir, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(dir).is_ok() {
            unlock(dir);
            return false;
        }
        true
    }

    fn unlock(dir: &Path) {
        fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_unreadable_subtree_is_isolated() {
        let temp_dir = sample_tree();
        let root = temp_dir.path();
        let locked = root.join("src/engine");

        let all = expected_links(root, IndexMode::FoldersOnly);
        if !lock(&locked) {
            eprintln!("permissions not enforced, skipping");
            return;
        }

        let report = scan(root, IndexMode::FoldersOnly, Strategy::default());
        unlock(&locked);

        let expected: BTreeSet<String> = all
            .into_iter()
            .filter(|l| !l.starts_with("/src/engine/") || l == "/src/engine/")
            .collect();
        assert_eq!(links(&report), expected);
        assert!(links(&report).contains("/src/engine/"));
        assert!(!links(&report).contains("/src/engine/rounds/"));
        assert_eq!(report.unreadable_directories, 1);
    }

    #[test]
    fn test_unreadable_root_yields_empty_index() {
        let temp_dir = sample_tree();
        let root = temp_dir.path();

        if !lock(root) {
            eprintln!("permissions not enforced, skipping");
            return;
        }
        let report = scan(root, IndexMode::FoldersOnly, Strategy::default());
        unlock(root);

        assert!(report.entries.is_empty());
        assert_eq!(report.rounds, 1);
        assert_eq!(report.unreadable_directories, 1);
    }
}
