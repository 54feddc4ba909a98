use proptest::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use storegraph::tree::ContentHasher;
use tempfile::TempDir;

fn build_tree(root: &Path, files: &[(&String, &Vec<u8>)]) {
    fs::create_dir_all(root).unwrap();
    for (rel, contents) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn creation_order_does_not_change_hash(
        files in prop::collection::btree_map(
            "(d[a-c]/)?f[a-z]{1,4}",
            prop::collection::vec(any::<u8>(), 0..64),
            1..8,
        )
    ) {
        let temp = TempDir::new().unwrap();
        let forward: Vec<_> = files.iter().collect();
        let mut backward = forward.clone();
        backward.reverse();

        let first = temp.path().join("first");
        let second = temp.path().join("second");
        build_tree(&first, &forward);
        build_tree(&second, &backward);

        let hasher = ContentHasher::new();
        prop_assert_eq!(hasher.hash(&first).unwrap(), hasher.hash(&second).unwrap());
    }
}

#[test]
fn renaming_an_entry_changes_hash() {
    let temp = TempDir::new().unwrap();
    let mut files = BTreeMap::new();
    files.insert("fa".to_string(), b"same".to_vec());
    let one: Vec<_> = files.iter().collect();
    build_tree(&temp.path().join("one"), &one);

    let mut renamed = BTreeMap::new();
    renamed.insert("fb".to_string(), b"same".to_vec());
    let two: Vec<_> = renamed.iter().collect();
    build_tree(&temp.path().join("two"), &two);

    let hasher = ContentHasher::new();
    assert_ne!(
        hasher.hash(&temp.path().join("one")).unwrap(),
        hasher.hash(&temp.path().join("two")).unwrap()
    );
}

#[test]
fn empty_directory_differs_from_empty_file() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("dir");
    let file = temp.path().join("file");
    fs::create_dir(&dir).unwrap();
    fs::write(&file, b"").unwrap();

    let hasher = ContentHasher::new();
    assert_ne!(hasher.hash(&dir).unwrap(), hasher.hash(&file).unwrap());
}

#[test]
fn unreadable_tree_fails_instead_of_partial_hash() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing-tree");
    assert!(ContentHasher::new().hash(&missing).is_err());
}

#[cfg(unix)]
#[test]
fn socket_inside_store_path_fails_the_hash() {
    use std::os::unix::net::UnixListener;
    use storegraph::ClosureError;

    let temp = TempDir::new().unwrap();
    let root = temp.path().join("a-b-c");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("ok"), b"contents").unwrap();
    let _listener = UnixListener::bind(root.join("sock")).unwrap();

    let err = ContentHasher::new().hash(&root).unwrap_err();
    assert!(matches!(err, ClosureError::UnsupportedFileType(p) if p == root.join("sock")));
}
