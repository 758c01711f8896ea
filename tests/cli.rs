use assert_cmd::Command;
use calamine::{open_workbook_auto, Data, Reader};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_pdf(path: &Path, text: &str) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    let kids: Vec<Object> = vec![page_id.into()];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("pdf_files")).unwrap();
    temp_dir
}

fn wordfreq(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pdf-wordfreq").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn report_rows(path: &Path) -> Vec<Vec<String>> {
    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::String(s) => s.clone(),
                    Data::Float(f) => format!("{}", *f as i64),
                    Data::Int(i) => i.to_string(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect()
}

#[test]
fn reports_keyword_frequencies_with_flags() {
    let temp_dir = workspace();
    write_pdf(
        &temp_dir.path().join("pdf_files/plan.pdf"),
        "risk risk mitigation plan risk",
    );

    wordfreq(temp_dir.path())
        .args([
            "--theme",
            "Ops",
            "--year",
            "2024",
            "--keywords",
            "Risk, mitigation",
            "--no-prompt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("File: plan.pdf"))
        .stdout(predicate::str::contains("The frequency of 'risk' is: 3"))
        .stdout(predicate::str::contains("The frequency of 'mitigation' is: 1"))
        .stdout(predicate::str::contains(
            "Ops_2024_word_frequency_report.xlsx' generated successfully!",
        ));

    let report = temp_dir
        .path()
        .join("output/Ops_2024_word_frequency_report.xlsx");
    let rows = report_rows(&report);
    assert_eq!(
        rows,
        vec![
            vec!["Theme", "Year", "File Name", "risk", "mitigation", "Keyword total"],
            vec!["Ops", "2024", "plan.pdf", "3", "1", "4"],
        ]
    );
}

#[test]
fn prompts_for_missing_values() {
    let temp_dir = workspace();
    write_pdf(&temp_dir.path().join("pdf_files/audit.pdf"), "audit findings audit");

    wordfreq(temp_dir.path())
        .write_stdin("Audit\nFY24\naudit,findings\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter the name of the theme: "))
        .stdout(predicate::str::contains("Enter the fiscal year: "))
        .stdout(predicate::str::contains("Enter keywords separated by comma: "))
        .stdout(predicate::str::contains("The frequency of 'audit' is: 2"));

    assert!(temp_dir
        .path()
        .join("output/Audit_FY24_word_frequency_report.xlsx")
        .exists());
}

#[test]
fn uses_configuration_file() {
    let temp_dir = workspace();
    write_pdf(&temp_dir.path().join("pdf_files/plan.pdf"), "risk");
    fs::write(
        temp_dir.path().join("wordfreq.toml"),
        "[report]\ntheme = \"Ops\"\nfiscal_year = \"2025\"\nkeywords = [\"Risk\"]\n\n[output]\ndirectory = \"reports\"\n",
    )
    .unwrap();

    wordfreq(temp_dir.path())
        .arg("--no-prompt")
        .assert()
        .success()
        .stdout(predicate::str::contains("The frequency of 'risk' is: 1"));

    assert!(temp_dir
        .path()
        .join("reports/Ops_2025_word_frequency_report.xlsx")
        .exists());
}

#[test]
fn empty_folder_writes_header_only_report() {
    let temp_dir = workspace();

    wordfreq(temp_dir.path())
        .args(["-t", "Ops", "-y", "2024", "-k", "risk", "--no-prompt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File:").not());

    let rows = report_rows(
        &temp_dir
            .path()
            .join("output/Ops_2024_word_frequency_report.xlsx"),
    );
    assert_eq!(rows, vec![vec!["Theme", "Year", "File Name", "risk", "Keyword total"]]);
}

#[test]
fn missing_folder_exits_with_invalid_path() {
    let temp_dir = TempDir::new().unwrap();

    wordfreq(temp_dir.path())
        .args(["missing", "-t", "Ops", "-y", "2024", "-k", "risk", "--no-prompt"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid input folder"));

    assert!(!temp_dir.path().join("output").exists());
}

#[test]
fn unreadable_document_aborts_by_default() {
    let temp_dir = workspace();
    fs::write(temp_dir.path().join("pdf_files/broken.pdf"), "not a pdf").unwrap();

    wordfreq(temp_dir.path())
        .args(["-t", "Ops", "-y", "2024", "-k", "risk", "--no-prompt"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("broken.pdf"));

    assert!(!temp_dir
        .path()
        .join("output/Ops_2024_word_frequency_report.xlsx")
        .exists());
}

#[test]
fn skip_errors_continues_past_unreadable_documents() {
    let temp_dir = workspace();
    fs::write(temp_dir.path().join("pdf_files/broken.pdf"), "not a pdf").unwrap();
    write_pdf(&temp_dir.path().join("pdf_files/plan.pdf"), "risk");

    wordfreq(temp_dir.path())
        .args(["-t", "Ops", "-y", "2024", "-k", "risk", "--skip-errors", "--no-prompt"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Skipped broken.pdf"))
        .stdout(predicate::str::contains("File: plan.pdf"));

    let rows = report_rows(
        &temp_dir
            .path()
            .join("output/Ops_2024_word_frequency_report.xlsx"),
    );
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][2], "plan.pdf");
}

#[test]
fn no_prompt_with_missing_values_fails() {
    let temp_dir = workspace();

    wordfreq(temp_dir.path())
        .args(["--theme", "Ops", "--no-prompt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--year"));
}

#[test]
fn generate_config_writes_sample() {
    let temp_dir = TempDir::new().unwrap();

    wordfreq(temp_dir.path())
        .arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("wordfreq.toml"));

    let content = fs::read_to_string(temp_dir.path().join("wordfreq.toml")).unwrap();
    assert!(content.contains("[report]"));
    assert!(content.contains("keywords"));
}

#[test]
fn dry_run_lists_documents_without_writing() {
    let temp_dir = workspace();
    fs::write(temp_dir.path().join("pdf_files/a.pdf"), "x").unwrap();
    fs::write(temp_dir.path().join("pdf_files/notes.txt"), "x").unwrap();

    wordfreq(temp_dir.path())
        .args(["--dry-run", "-t", "Ops", "-y", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.pdf"))
        .stdout(predicate::str::contains("notes.txt").not())
        .stdout(predicate::str::contains("Ops_2024_word_frequency_report.xlsx"));

    assert!(!temp_dir.path().join("output").exists());
}

#[test]
fn json_output_reports_run() {
    let temp_dir = workspace();
    write_pdf(&temp_dir.path().join("pdf_files/plan.pdf"), "risk risk");

    wordfreq(temp_dir.path())
        .args([
            "-t",
            "Ops",
            "-y",
            "2024",
            "-k",
            "risk",
            "--no-prompt",
            "--output-format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"document\""))
        .stdout(predicate::str::contains("\"report_path\""));
}

#[test]
fn json_output_keeps_prompts_off_stdout() {
    let temp_dir = workspace();
    write_pdf(&temp_dir.path().join("pdf_files/plan.pdf"), "risk");

    wordfreq(temp_dir.path())
        .args(["--output-format", "json"])
        .write_stdin("Ops\n2024\nrisk\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter the name of the theme").not())
        .stdout(predicate::str::contains("\"type\":\"document\""))
        .stderr(predicate::str::contains("Enter the name of the theme: "))
        .stderr(predicate::str::contains("Enter keywords separated by comma: "));
}
