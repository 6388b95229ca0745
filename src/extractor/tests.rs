#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

fn refs(list: &[&str]) -> Vec<AppRef> {
    list.iter().map(|s| s.parse().unwrap()).collect()
}

const SAMPLE_PAYLOAD: &str = r#"[{"import_path": "sample_app", "name": "app", "routes": [
    {"name": "create_user", "path": "/users/"},
    {"name": "get_item", "path": "/items/{item_id}"}
]}]"#;

#[test]
fn test_decode_payload() {
    let apps = decode_payload(SAMPLE_PAYLOAD, &refs(&["sample_app:app"])).unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].import_path, "sample_app");
    assert_eq!(apps[0].name, "app");
    assert_eq!(apps[0].routes[1].path, "/items/{item_id}");
}

#[test]
fn test_decode_payload_tolerates_trailing_newline() {
    let stdout = format!("{SAMPLE_PAYLOAD}\n");
    assert!(decode_payload(&stdout, &refs(&["sample_app:app"])).is_ok());
}

#[test]
fn test_decode_payload_invalid_json_includes_raw_output() {
    let err = decode_payload("Traceback? not json", &refs(&["sample_app:app"])).unwrap_err();
    assert!(matches!(err, CommandError::Extraction(_)));
    let msg = err.to_string();
    assert!(msg.contains("Failed to parse output from extractor"));
    assert!(msg.contains("Traceback? not json"));
}

#[test]
fn test_decode_payload_wrong_shape() {
    let err = decode_payload(r#"{"import_path": "x"}"#, &refs(&["x:app"])).unwrap_err();
    assert!(matches!(err, CommandError::Extraction(_)));
}

#[test]
fn test_decode_payload_count_mismatch() {
    let requested = refs(&["sample_app:app", "other:app"]);
    let err = decode_payload(SAMPLE_PAYLOAD, &requested).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Extractor returned 1 results for 2 app modules"
    );
}

#[test]
fn test_decode_payload_order_mismatch() {
    let err = decode_payload(SAMPLE_PAYLOAD, &refs(&["sample_app:api"])).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("'sample_app:app' where 'sample_app:api' was expected"));
}

#[test]
fn test_failure_error_with_import_hint() {
    let stderr = "ModuleNotFoundError importing missing_mod: No module named 'missing_mod'\n";
    let err = failure_error(stderr, Some(1));
    let msg = err.to_string();
    assert!(msg.starts_with("Failed to extract routes.\nError: ModuleNotFoundError"));
    assert!(msg.ends_with(IMPORT_FAILURE_HINT));
}

#[test]
fn test_failure_error_without_hint() {
    let stderr = "sample_app:router is not a FastAPI app (got APIRouter)";
    let err = failure_error(stderr, Some(1));
    assert!(!err.to_string().contains("Hint:"));
    assert!(err.to_string().contains("is not a FastAPI app"));
}

#[test]
fn test_is_import_failure() {
    assert!(is_import_failure("ImportError: cannot import name 'x'"));
    assert!(is_import_failure("ModuleNotFoundError: No module named 'fastapi'"));
    assert!(!is_import_failure("AttributeError: no attribute"));
}

#[test]
fn test_python_path_prepends_directory() {
    let dir = Path::new("/work/project");
    let existing = std::env::join_paths([PathBuf::from("/a"), PathBuf::from("/b")]).unwrap();
    let joined = python_path(dir, Some(existing)).unwrap();
    let entries: Vec<PathBuf> = std::env::split_paths(&joined).collect();
    assert_eq!(
        entries,
        [
            PathBuf::from("/work/project"),
            PathBuf::from("/a"),
            PathBuf::from("/b"),
        ]
    );
}

#[test]
fn test_python_path_without_existing() {
    let joined = python_path(Path::new("/work"), Some(OsString::new())).unwrap();
    assert_eq!(joined, OsString::from("/work"));
    let joined = python_path(Path::new("/work"), None).unwrap();
    assert_eq!(joined, OsString::from("/work"));
}

#[test]
fn test_extractor_script_contract() {
    assert!(EXTRACTOR_SCRIPT.contains("isinstance(app, FastAPI)"));
    assert!(EXTRACTOR_SCRIPT.contains("isinstance(route, APIRoute) and route.name"));
    assert!(EXTRACTOR_SCRIPT.contains("sys.exit(1)"));
}

#[cfg(unix)]
mod stub_interpreter {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    /// Write an executable shell script standing in for `python`.
    ///
    /// The script receives `-c <source> <ref>...`, records its arguments and
    /// PYTHONPATH next to itself, then runs `body`.
    fn stub(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("python");
        let script = format!(
            "#!/bin/sh\nhere=$(dirname \"$0\")\nprintf '%s' \"$PYTHONPATH\" > \"$here/pythonpath.txt\"\nshift 2\nprintf '%s\\n' \"$@\" > \"$here/args.txt\"\n{body}\n"
        );
        fs::write(&path, script).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn test_extract_success() {
        let bin_dir = tempfile::tempdir().unwrap();
        let app_dir = tempfile::tempdir().unwrap();
        let body = format!("cat <<'EOF'\n{SAMPLE_PAYLOAD}\nEOF");
        let python = stub(bin_dir.path(), &body);

        let extractor = PythonExtractor::new(&python, app_dir.path());
        let apps = extractor.extract(&refs(&["sample_app:app"])).unwrap();
        assert_eq!(apps[0].routes.len(), 2);

        let args = fs::read_to_string(bin_dir.path().join("args.txt")).unwrap();
        assert_eq!(args, "sample_app:app\n");

        let pythonpath = fs::read_to_string(bin_dir.path().join("pythonpath.txt")).unwrap();
        let first = std::env::split_paths(&pythonpath).next().unwrap();
        assert_eq!(first, app_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_extract_nonzero_exit() {
        let bin_dir = tempfile::tempdir().unwrap();
        let python = stub(
            bin_dir.path(),
            "echo \"ModuleNotFoundError importing nope: No module named 'nope'\" >&2\nexit 1",
        );

        let extractor = PythonExtractor::new(&python, bin_dir.path());
        let err = extractor.extract(&refs(&["nope:app"])).unwrap_err();
        assert!(matches!(err, CommandError::Extraction(_)));
        assert!(err.to_string().contains("No module named 'nope'"));
        assert!(err.to_string().contains(IMPORT_FAILURE_HINT));
    }

    #[test]
    fn test_extract_success_exit_with_garbage_output() {
        let bin_dir = tempfile::tempdir().unwrap();
        let python = stub(bin_dir.path(), "echo 'hello from import side effects'");

        let extractor = PythonExtractor::new(&python, bin_dir.path());
        let err = extractor.extract(&refs(&["sample_app:app"])).unwrap_err();
        assert!(err.to_string().contains("hello from import side effects"));
    }

    #[test]
    fn test_extract_missing_interpreter() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = PythonExtractor::new(dir.path().join("no-such-python"), dir.path());
        let err = extractor.extract(&refs(&["sample_app:app"])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to execute extractor subprocess"));
    }

    #[test]
    fn test_extract_missing_directory() {
        let bin_dir = tempfile::tempdir().unwrap();
        let python = stub(bin_dir.path(), "echo '[]'");
        let extractor = PythonExtractor::new(&python, bin_dir.path().join("gone"));
        let err = extractor.extract(&refs(&["sample_app:app"])).unwrap_err();
        assert!(err.to_string().contains("Failed to resolve directory"));
    }
}
