use std::fs;

use dircap::cap::Cap;
use dircap::scan;
use tempfile::TempDir;

mod common;
use common::{GIB, create_file_with_atime, tree_size};

#[test]
fn test_two_roots_evict_oldest_across_both() {
    let temp_dir = TempDir::new().unwrap();
    let dir_a = temp_dir.path().join("dirA");
    let dir_b = temp_dir.path().join("dirB");

    let t1 = create_file_with_atime(&dir_a.join("t1.bin"), GIB, 1_000);
    let t2 = create_file_with_atime(&dir_a.join("t2.bin"), GIB, 2_000);
    let t3 = create_file_with_atime(&dir_a.join("nested/t3.bin"), GIB, 3_000);
    let t0 = create_file_with_atime(&dir_b.join("t0.bin"), GIB, 500);

    let cap = Cap::builder()
        .root(&dir_a)
        .root(&dir_b)
        .max_size(2 * GIB)
        .quiet(true)
        .build()
        .unwrap();

    let report = cap.enforce().unwrap();

    assert_eq!(report.initial_total, 4 * GIB);
    assert_eq!(report.files_removed, 2);
    assert_eq!(report.bytes_freed, 2 * GIB);
    assert_eq!(report.final_total, 2 * GIB);

    assert!(!t0.exists());
    assert!(!t1.exists());
    assert!(t2.exists());
    assert!(t3.exists());

    assert_eq!(tree_size(&dir_a) + tree_size(&dir_b), 2 * GIB);
}

#[test]
fn test_dry_run_leaves_tree_intact() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    for (i, atime) in [40, 10, 30, 20].into_iter().enumerate() {
        create_file_with_atime(&root.join(format!("f{i}")), 1024, atime);
    }
    let before = tree_size(&root);

    let dry = Cap::builder()
        .root(&root)
        .max_size(1024)
        .dry_run(true)
        .quiet(true)
        .build()
        .unwrap()
        .enforce()
        .unwrap();

    assert_eq!(tree_size(&root), before);
    assert_eq!(fs::read_dir(&root).unwrap().count(), 4);
    assert_eq!(dry.bytes_freed, 3 * 1024);
    assert_eq!(dry.files_removed, 3);

    let live = Cap::builder()
        .root(&root)
        .max_size(1024)
        .quiet(true)
        .build()
        .unwrap()
        .enforce()
        .unwrap();

    assert_eq!(live.bytes_freed, dry.bytes_freed);
    assert_eq!(tree_size(&root), 1024);
    // Only the most recently accessed file survives.
    assert!(root.join("f0").exists());
}

#[test]
fn test_within_limit_is_a_no_op() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    create_file_with_atime(&root.join("a"), 100, 1);
    create_file_with_atime(&root.join("b"), 100, 2);

    let report = Cap::builder()
        .root(&root)
        .max_size(200)
        .quiet(true)
        .build()
        .unwrap()
        .enforce()
        .unwrap();

    assert_eq!(report.files_removed, 0);
    assert_eq!(report.final_total, 200);
    assert!(root.join("a").exists());
    assert!(root.join("b").exists());
}

#[test]
fn test_post_run_total_within_limit() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    let sizes = [5_000u64, 1, 777, 4_096, 12_345, 64, 9_999, 2_048];
    for (i, size) in sizes.iter().enumerate() {
        let depth = i % 3;
        let mut path = root.clone();
        for level in 0..depth {
            path.push(format!("level{level}"));
        }
        path.push(format!("file{i}"));
        create_file_with_atime(&path, *size, (i as i64 * 7919) % 1000);
    }

    let limit = 10_000;
    let report = Cap::builder()
        .root(&root)
        .max_size(limit)
        .quiet(true)
        .build()
        .unwrap()
        .enforce()
        .unwrap();

    let rescan = scan::collect(std::slice::from_ref(&root), 0, true).unwrap();
    assert!(rescan.total_bytes <= limit);
    assert_eq!(rescan.total_bytes, report.final_total);
}

#[test]
fn test_limit_zero_empties_every_root() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a");
    let b = temp_dir.path().join("b");
    create_file_with_atime(&a.join("x/y"), 10, 1);
    create_file_with_atime(&b.join("z"), 10, 2);

    let report = Cap::builder()
        .roots([&a, &b])
        .max_size(0)
        .quiet(true)
        .build()
        .unwrap()
        .enforce()
        .unwrap();

    assert_eq!(report.final_total, 0);
    assert_eq!(tree_size(&a) + tree_size(&b), 0);
    // Directories themselves are left in place.
    assert!(a.join("x").is_dir());
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_excluded() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    create_file_with_atime(&root.join("open/a"), 100, 1);
    let hidden = create_file_with_atime(&root.join("locked/b"), 100, 0);

    let locked = root.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        eprintln!("running with elevated privileges; skipping");
        return;
    }

    let result = Cap::builder()
        .root(&root)
        .max_size(50)
        .quiet(true)
        .build()
        .unwrap()
        .enforce();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let report = result.unwrap();

    // Only the readable file was counted and evicted.
    assert_eq!(report.initial_total, 100);
    assert_eq!(report.files_removed, 1);
    assert!(!root.join("open/a").exists());
    assert!(hidden.exists());
}
