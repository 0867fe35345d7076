mod common;

use std::fs;

use common::{read_zip, write_zip};
use proceedings::archive::{strip_archive, strip_directory, StripOutcome};
use proceedings::Error;

#[test]
fn test_strip_removes_only_matching_entries() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.zip");
    let dst = dir.path().join("out.zip");
    write_zip(
        &src,
        &[("a.txt", b"alpha bytes"), ("b.mp4", b"video"), ("c/d.mp4", b"more video")],
    );

    let outcome = strip_archive(&src, &dst, ".mp4").unwrap();

    assert_eq!(outcome, StripOutcome { kept: 1, removed: 2 });
    assert_eq!(read_zip(&dst), vec![("a.txt".to_string(), b"alpha bytes".to_vec())]);
}

#[test]
fn test_strip_keeps_directory_entries_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.zip");
    let dst = dir.path().join("out.zip");
    write_zip(
        &src,
        &[
            ("code/", b""),
            ("code/main.py", b"print('hi')"),
            ("videos/", b""),
            ("videos/demo.mp4", b"video"),
            ("README.md", b"# readme"),
        ],
    );

    strip_archive(&src, &dst, ".mp4").unwrap();

    let names: Vec<_> = read_zip(&dst).into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["code/", "code/main.py", "videos/", "README.md"]);
}

#[test]
fn test_strip_suffix_is_case_sensitive() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.zip");
    let dst = dir.path().join("out.zip");
    write_zip(&src, &[("clip.MP4", b"video"), ("clip.mp4", b"video")]);

    let outcome = strip_archive(&src, &dst, ".mp4").unwrap();

    assert_eq!(outcome, StripOutcome { kept: 1, removed: 1 });
}

#[test]
fn test_strip_rejects_non_archive() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("broken.zip");
    fs::write(&src, b"definitely not a zip").unwrap();

    let err = strip_archive(&src, &dir.path().join("out.zip"), ".mp4").unwrap_err();

    assert!(matches!(err, Error::ArchiveRead { .. }));
}

#[test]
fn test_strip_missing_archive_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("gone.zip");

    let err = strip_archive(&src, &dir.path().join("out.zip"), ".mp4").unwrap_err();

    match err {
        Error::ArchiveRead { path, .. } => assert_eq!(path, src),
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[test]
fn test_directory_run_continues_past_unreadable_archive() {
    use std::os::unix::fs::PermissionsExt;

    let indir = tempfile::tempdir().unwrap();
    let outdir = tempfile::tempdir().unwrap();
    let locked = indir.path().join("a_supp.zip");
    write_zip(&locked, &[("a.txt", b"a")]);
    write_zip(&indir.path().join("b_supp.zip"), &[("b.txt", b"b"), ("b.mp4", b"v")]);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::File::open(&locked).is_ok() {
        // Privileged users ignore file modes.
        return;
    }

    let reports = strip_directory(indir.path(), outdir.path(), ".mp4").unwrap();

    assert_eq!(reports.len(), 2);
    assert!(matches!(reports[0].outcome, Err(Error::ArchiveRead { .. })));
    assert_eq!(*reports[1].outcome.as_ref().unwrap(), StripOutcome { kept: 1, removed: 1 });
    assert!(!outdir.path().join("a_supp.zip").exists());
    assert_eq!(read_zip(&outdir.path().join("b_supp.zip")).len(), 1);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}

#[test]
fn test_directory_run_continues_past_broken_archive() {
    let indir = tempfile::tempdir().unwrap();
    let outdir = tempfile::tempdir().unwrap();
    write_zip(&indir.path().join("a_supp.zip"), &[("a.txt", b"a"), ("a.mp4", b"v")]);
    fs::write(indir.path().join("b_supp.zip"), b"garbage").unwrap();
    write_zip(&indir.path().join("c_supp.zip"), &[("c.txt", b"c")]);
    fs::write(indir.path().join("notes.txt"), b"not an archive").unwrap();

    let reports = strip_directory(indir.path(), outdir.path(), ".mp4").unwrap();

    let names: Vec<_> = reports
        .iter()
        .map(|r| r.archive.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a_supp.zip", "b_supp.zip", "c_supp.zip"]);

    assert_eq!(*reports[0].outcome.as_ref().unwrap(), StripOutcome { kept: 1, removed: 1 });
    assert!(matches!(reports[1].outcome, Err(Error::ArchiveRead { .. })));
    assert_eq!(*reports[2].outcome.as_ref().unwrap(), StripOutcome { kept: 1, removed: 0 });

    assert_eq!(read_zip(&outdir.path().join("a_supp.zip")).len(), 1);
    assert!(!outdir.path().join("b_supp.zip").exists());
    assert!(outdir.path().join("c_supp.zip").exists());
    assert!(!outdir.path().join("notes.txt").exists());
}

#[test]
fn test_directory_run_refuses_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let err = strip_directory(dir.path(), dir.path(), ".mp4").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
