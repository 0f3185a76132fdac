use std::fs::{self, File};
use std::path::{Path, PathBuf};

use filetime::FileTime;

#[allow(dead_code)]
pub const GIB: u64 = 1 << 30;

/// Create a file of `size` bytes with its access time set to `atime` seconds
/// after the epoch.
///
/// Files are sparse, so large sizes cost no disk space.
pub fn create_file_with_atime(path: &Path, size: u64, atime: i64) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }

    let file = File::create(path).unwrap();
    file.set_len(size).unwrap();
    drop(file);

    filetime::set_file_atime(path, FileTime::from_unix_time(atime, 0)).unwrap();
    path.to_path_buf()
}

/// Sum of regular file sizes below `root`, computed independently of the
/// crate under test.
pub fn tree_size(root: &Path) -> u64 {
    let mut total = 0;
    for entry in fs::read_dir(root).unwrap() {
        let entry = entry.unwrap();
        let file_type = entry.file_type().unwrap();
        if file_type.is_dir() {
            total += tree_size(&entry.path());
        } else if file_type.is_file() {
            total += entry.metadata().unwrap().len();
        }
    }
    total
}
