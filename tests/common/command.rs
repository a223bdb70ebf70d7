use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

#[fixture]
pub fn workspace_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn original_text() -> String {
    r#"fn main() {
    let s = String::new();
    std::io::stdin().read_line(&mut s).unwrap();
    for i in 0..1000000000 {
        println!("{}",  s);
    }

    println!("Done");
}"#
    .to_string()
}

#[fixture]
pub fn changed_text() -> String {
    r#"fn main() {
    let s = String::new();
    std::io::stdin().read_line(&mut s).unwrap();

    println!("Done");
    println!("Bye");
}"#
    .to_string()
}

/// A workspace holding `original.txt` and `changed.txt`.
#[fixture]
pub fn text_pair(workspace_dir: TempDir, original_text: String, changed_text: String) -> TempDir {
    write_pair(workspace_dir.path(), &original_text, &changed_text);
    workspace_dir
}

pub fn write_pair(dir: &Path, original: &str, changed: &str) -> (PathBuf, PathBuf) {
    let original = FileSpec::new(dir.join("original.txt"), original.to_string());
    let changed = FileSpec::new(dir.join("changed.txt"), changed.to_string());
    write_file(&original);
    write_file(&changed);

    (original.path, changed.path)
}

pub fn run_diffmerge_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("diffmerge").expect("Failed to find diffmerge binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success();
    String::from_utf8(output.get_output().stdout.clone()).expect("stdout is not UTF-8")
}
