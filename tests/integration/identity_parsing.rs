use std::fs;
use std::path::Path;
use storegraph::store::IdentityParser;
use storegraph::{AppType, ClosureError};

use super::support::FakeStore;

#[test]
fn classification_matrix() {
    let store = FakeStore::new();
    let parser = IdentityParser::new(store.dir());

    let exe = store.add_executable("aaa-tool-1.0", "tool", b"bin");
    assert_eq!(parser.parse(&exe).unwrap().app_type, AppType::Executable);

    let image = store.add_image("bbb-image-2.0", "sha256:00");
    assert_eq!(parser.parse(&image).unwrap().app_type, AppType::Container);

    let lib = store.add_library("ccc-libz-1.3");
    assert_eq!(parser.parse(&lib).unwrap().app_type, AppType::Unknown);

    let both = store.add_image("ddd-both-0.1", "sha256:00");
    fs::create_dir(both.join("bin")).unwrap();
    assert_eq!(parser.parse(&both).unwrap().app_type, AppType::Executable);
}

#[test]
fn short_names_are_invalid() {
    let store = FakeStore::new();
    let parser = IdentityParser::new(store.dir());

    let err = parser.parse(Path::new("/store/onlyonepart")).unwrap_err();
    // The directory does not exist, so listing fails first.
    assert!(matches!(err, ClosureError::Io { .. }));

    let onlyonepart = store.dir().join("onlyonepart");
    fs::create_dir(&onlyonepart).unwrap();
    let err = parser.parse(&onlyonepart).unwrap_err();
    assert!(matches!(err, ClosureError::InvalidPath(_)));
    assert!(err.to_string().contains("onlyonepart"));
}

#[test]
fn identity_fields() {
    let store = FakeStore::new();
    let path = store.add_library("0c6kzph7l0dcbx5a-gcc-lib-13.2.0");

    let identity = IdentityParser::new(store.dir()).parse(&path).unwrap();
    assert_eq!(identity.content_digest, "0c6kzph7l0dcbx5a");
    assert_eq!(identity.name, "gcc-lib");
    assert_eq!(identity.version, "13.2.0");
}
