use scan_order::{
    cli::resolve_list_path,
    config::Config,
    layout::{LayoutMode, OrderOptions},
    page_key::FilenamePatterns,
    pipeline::Pipeline,
    report::OrderReport,
    scan::from_paths,
};
use std::path::{Path, PathBuf};
use std::process::Command;

fn report_for(names: &[&str], mode: LayoutMode) -> OrderReport {
    Pipeline::new(OrderOptions::default().with_mode(mode), FilenamePatterns)
        .run(&from_paths(names.iter().copied()))
        .unwrap()
}

#[test]
fn list_has_one_terminated_line_per_entry() {
    let report = report_for(&["p2L.jpg", "p1R.jpg", "p1L.jpg"], LayoutMode::ForceDouble);
    assert_eq!(report.to_list(), "p1L.jpg\np1R.jpg\np2L.jpg\n");
}

#[test]
fn empty_sequence_renders_nothing() {
    let report = report_for(&[], LayoutMode::ForceDouble);
    assert!(report.entries.is_empty());
    assert_eq!(report.to_list(), "");
}

#[test]
fn out_flag_wins_over_config() {
    let mut cfg = Config::default();
    cfg.output.write_list_file = true;
    let out = Path::new("elsewhere/list.txt");
    let path = resolve_list_path(&cfg, Path::new("scans"), Some(out));
    assert_eq!(path, Some(PathBuf::from("elsewhere/list.txt")));
}

#[test]
fn configured_list_file_lands_in_input_dir() {
    let mut cfg = Config::default();
    assert_eq!(resolve_list_path(&cfg, Path::new("scans"), None), None);

    cfg.output.write_list_file = true;
    cfg.output.list_filename = "order.txt".into();
    assert_eq!(
        resolve_list_path(&cfg, Path::new("scans"), None),
        Some(PathBuf::from("scans/order.txt"))
    );
}

#[test]
fn write_list_creates_parent_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested/deeper/list.txt");
    let report = report_for(&["a10.jpg", "a2.jpg"], LayoutMode::ForceSingle);

    report.write_list(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a2.jpg\na10.jpg\n");
}

fn scan_order(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scan-order"));
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

#[test]
fn order_command_prints_lines_and_writes_list_file() {
    let tmp = tempfile::tempdir().unwrap();
    let scans = tmp.path().join("scans");
    std::fs::create_dir(&scans).unwrap();
    for name in ["p2L.jpg", "p1R.jpg", "p1L.jpg", "cover.png"] {
        std::fs::write(scans.join(name), b"").unwrap();
    }
    std::fs::write(
        tmp.path().join("scan-order.toml"),
        "[output]\nformat = \"lines\"\nwrite_list_file = true\nlist_filename = \"order.txt\"\n",
    )
    .unwrap();

    let out = scan_order(tmp.path())
        .args(["order", "--input", "scans"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let expected = ["p1L.jpg", "p1R.jpg", "p2L.jpg", "cover.png"]
        .iter()
        .map(|n| format!("{}\n", Path::new("scans").join(n).display()))
        .collect::<String>();
    assert_eq!(String::from_utf8_lossy(&out.stdout), expected);
    assert_eq!(std::fs::read_to_string(scans.join("order.txt")).unwrap(), expected);
}

#[test]
fn order_command_prints_nothing_for_empty_forced_run() {
    let tmp = tempfile::tempdir().unwrap();
    let list = tmp.path().join("list.txt");

    let out = scan_order(tmp.path())
        .args(["order", "--input", ".", "--layout", "double", "--format", "lines"])
        .arg("--out")
        .arg(&list)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stdout.is_empty());
    assert_eq!(std::fs::read_to_string(&list).unwrap(), "");
}
