//! End-to-end tests driving the compiled binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn utilkit() -> Command {
    Command::cargo_bin("utilkit").unwrap()
}

#[test]
fn text_words_counts() {
    utilkit()
        .args(["text", "words", "one two  three"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn text_case_snake() {
    utilkit()
        .args(["text", "case", "Hello World Again", "--to", "snake"])
        .assert()
        .success()
        .stdout("hello_world_again\n");
}

#[test]
fn text_case_unknown_style_fails() {
    utilkit()
        .args(["text", "case", "Hello", "--to", "shouting"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown case style"));
}

#[test]
fn text_truncate_appends_suffix() {
    utilkit()
        .args(["text", "truncate", "abcdefghij", "--max", "5"])
        .assert()
        .success()
        .stdout("ab...\n");
}

#[test]
fn text_emails_one_per_line() {
    utilkit()
        .args(["text", "emails", "ping a@example.com and b@example.org"])
        .assert()
        .success()
        .stdout("a@example.com\nb@example.org\n");
}

#[test]
fn net_encode_decode() {
    utilkit()
        .args(["net", "encode", "hello world"])
        .assert()
        .success()
        .stdout("hello%20world\n");

    utilkit()
        .args(["net", "decode", "hello%20world"])
        .assert()
        .success()
        .stdout("hello world\n");
}

#[test]
fn net_build_appends_params() {
    utilkit()
        .args([
            "net",
            "build",
            "https://example.com/search",
            "--param",
            "q=rust lang",
            "--param",
            "page=2",
        ])
        .assert()
        .success()
        .stdout("https://example.com/search?q=rust+lang&page=2\n");
}

#[test]
fn net_parse_rejects_garbage() {
    utilkit()
        .args(["net", "parse", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn time_add_days() {
    utilkit()
        .args(["time", "add-days", "2024-02-28", "2"])
        .assert()
        .success()
        .stdout("2024-03-01\n");
}

#[test]
fn time_between_is_absolute() {
    utilkit()
        .args(["time", "between", "2024-01-10", "2024-01-03"])
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn time_weekend() {
    utilkit()
        .args(["time", "weekend", "2024-01-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("weekend (Saturday)"));
}

#[test]
fn time_bad_date_fails() {
    utilkit()
        .args(["time", "age", "not-a-date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse"));
}

#[test]
fn file_size_human_readable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.bin");
    fs::write(&path, vec![0u8; 2048]).unwrap();

    utilkit()
        .args(["file", "size"])
        .arg(&path)
        .assert()
        .success()
        .stdout("2.00 KB\n");

    utilkit()
        .args(["file", "size", "--bytes"])
        .arg(&path)
        .assert()
        .success()
        .stdout("2048\n");
}

#[test]
fn file_copy_then_delete_with_yes() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("note.txt");
    let dest = dir.path().join("backup");
    fs::write(&src, "keep me").unwrap();

    utilkit()
        .args(["file", "copy"])
        .arg(&src)
        .arg("--dest")
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 1 file(s)"));
    assert_eq!(fs::read_to_string(dest.join("note.txt")).unwrap(), "keep me");

    utilkit()
        .args(["file", "delete", "--yes"])
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 file(s)"));
    assert!(!src.exists());
}

#[test]
fn file_compress_and_extract_round_trip() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("project");
    fs::create_dir_all(folder.join("sub")).unwrap();
    fs::write(folder.join("a.txt"), "alpha").unwrap();
    fs::write(folder.join("sub/b.txt"), "beta").unwrap();

    let archive = dir.path().join("project.zip");
    utilkit()
        .args(["file", "compress"])
        .arg(&folder)
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let out = dir.path().join("restored");
    utilkit()
        .args(["file", "extract"])
        .arg(&archive)
        .arg(&out)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(out.join("sub/b.txt")).unwrap(), "beta");
}

#[test]
fn file_compress_unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    utilkit()
        .args(["file", "compress"])
        .arg(dir.path())
        .arg(dir.path().join("out.rar"))
        .args(["--format", "rar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported archive format"));
}

#[test]
fn data_pretty_and_flatten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested.json");
    fs::write(&path, r#"{"user":{"name":"ada","id":7}}"#).unwrap();

    utilkit()
        .args(["data", "pretty"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"ada\""));

    utilkit()
        .args(["data", "flatten"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"user.name\": \"ada\""));
}

#[test]
fn data_json_csv_round_trip() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("rows.json");
    let csv = dir.path().join("rows.csv");
    let back = dir.path().join("rows_back.json");
    fs::write(
        &json,
        r#"[{"name":"ada","role":"engineer"},{"name":"lin","role":"analyst"}]"#,
    )
    .unwrap();

    utilkit()
        .args(["data", "json-to-csv"])
        .arg(&json)
        .arg(&csv)
        .assert()
        .success();
    let csv_content = fs::read_to_string(&csv).unwrap();
    assert!(csv_content.starts_with("name,role"));

    utilkit()
        .args(["data", "csv-to-json"])
        .arg(&csv)
        .arg(&back)
        .assert()
        .success();
    let restored = fs::read_to_string(&back).unwrap();
    assert!(restored.contains("\"ada\""));
    assert!(restored.contains("\"analyst\""));
}

#[test]
fn cmd_list_shows_catalog() {
    utilkit()
        .args(["cmd", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GIT"))
        .stdout(predicate::str::contains("git status"));
}

#[test]
fn cmd_list_unknown_category_names_alternatives() {
    utilkit()
        .args(["cmd", "list", "cooking"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Available categories"))
        .stderr(predicate::str::contains("file_operations"));
}

#[test]
fn cmd_sysinfo_prints_hostname_row() {
    utilkit()
        .args(["cmd", "sysinfo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hostname"));
}

#[test]
fn cmd_exec_reports_failure() {
    utilkit()
        .args(["cmd", "exec", "exit 3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exit code 3"));
}

#[test]
fn pdf_merge_without_inputs_fails() {
    let dir = TempDir::new().unwrap();
    utilkit()
        .args(["pdf", "merge"])
        .arg(dir.path().join("absent.pdf"))
        .arg("--output")
        .arg(dir.path().join("out.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No readable input documents"));
}

#[test]
fn image_resize_smoke() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    let img = image::RgbaImage::from_pixel(40, 20, image::Rgba([10, 20, 30, 255]));
    img.save(&input).unwrap();

    utilkit()
        .args(["image", "resize"])
        .arg(&input)
        .arg(&output)
        .args(["--width", "10", "--height", "10"])
        .assert()
        .success();
    assert_eq!(image::image_dimensions(&output).unwrap(), (10, 5));
}
