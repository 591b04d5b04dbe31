//! End-to-end runs of the calculator with in-memory input and output.

use std::fs;
use std::io::Cursor;

use pay_cli::app::{EmployeeInput, Session};
use pay_cli::input::{NAME_PROMPT, NUMBER_PROMPT, Prompter, SALARY_PROMPT};
use pay_cli::report::{CALCULATING, WELCOME};
use pay_cli::settings::Settings;
use pay_core::{BandTable, BreakdownOptions, Category, ConfigurationError};
use pay_data::BandTableLoader;
use pretty_assertions::assert_eq;

const NO_PARKING_BANDS: &str = "\
incometax,12570,0.20
incometax,50270,0.40
incometax,125140,0.45
nationalinsurance,12570,0.12
nationalinsurance,50270,0.02
pension,32135.99,0.074
pension,43259.99,0.086
pension,51292.99,0.096
pension,67979.99,0.102
pension,92697.99,0.113
pension,inf,0.117
";

fn run_session(
    session: &Session,
    input: &str,
) -> String {
    let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    session
        .run(&mut prompter, &EmployeeInput::default())
        .expect("session should complete");
    String::from_utf8(prompter.into_output()).unwrap()
}

#[test]
fn test_full_transcript_with_standard_bands() {
    let session = Session::new(BandTable::standard(), BreakdownOptions::default()).unwrap();

    let output = run_session(&session, "Ada Lovelace\n1042\n40000\n");

    let expected = format!(
        "{WELCOME}{NAME_PROMPT}{NUMBER_PROMPT}{SALARY_PROMPT}{CALCULATING}\
         Employee: Ada Lovelace (#1042)\n\
         Gross salary: 3333.33\n\
         Pension deductions: 286.67\n\
         Taxable amount: 1999.17\n\
         Tax paid: 399.83\n\
         NI paid: 239.90\n\
         Monthly parking fee: 10.00\n\
         \n\
         Total deductions: 936.40\n\
         Monthly Net Pay: 2396.93\n"
    );
    assert_eq!(output, expected);
}

#[test]
fn test_invalid_answers_are_retried_in_place() {
    let session = Session::new(BandTable::standard(), BreakdownOptions::default()).unwrap();

    let output = run_session(&session, "Ada\nAda Lovelace\nx1\n1042\n-1\n40000\n");

    assert!(output.contains(
        "Names should be separated with a space and not begin or end with a space. \
         Please try again.\n"
    ));
    assert!(output.contains("Please enter employee number using numeric characters only (0-9).\n"));
    assert!(output.contains("Yearly gross salary cannot be negative. Please try again.\n"));
    assert_eq!(output.matches(NAME_PROMPT).count(), 1);
    assert!(output.ends_with("Monthly Net Pay: 2396.93\n"));
}

#[test]
fn test_settings_file_selects_bands_and_disables_parking() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bands.csv"), NO_PARKING_BANDS).unwrap();
    let config = dir.path().join("pay.toml");
    fs::write(&config, "bands_file = \"bands.csv\"\ninclude_parking_fee = false\n").unwrap();

    let settings = Settings::load(&config).unwrap();
    let bands = settings.bands_file.clone().unwrap();
    let table = BandTableLoader::load_from_path(&bands).unwrap();
    let session = Session::new(table, settings.options()).unwrap();

    let output = run_session(&session, "Ada Lovelace\n1042\n40000\n");

    assert!(output.contains("Monthly parking fee: 0.00\n"));
    assert!(output.contains("Total deductions: 926.40\n"));
    assert!(output.ends_with("Monthly Net Pay: 2406.93\n"));
}

#[test]
fn test_missing_parking_is_reported_before_prompting() {
    let dir = tempfile::tempdir().unwrap();
    let bands = dir.path().join("bands.csv");
    fs::write(&bands, NO_PARKING_BANDS).unwrap();
    let table = BandTableLoader::load_from_path(&bands).unwrap();

    let err = Session::new(table, BreakdownOptions::default()).unwrap_err();

    assert_eq!(err, ConfigurationError::MissingCategory(Category::Parking));
}

#[test]
fn test_zero_salary_owes_only_parking() {
    let session = Session::new(BandTable::standard(), BreakdownOptions::default()).unwrap();

    let output = run_session(&session, "Ada Lovelace\n7\n0\n");

    assert!(output.contains("Pension deductions: 0.00\n"));
    assert!(output.contains("Tax paid: 0.00\n"));
    assert!(output.contains("NI paid: 0.00\n"));
    assert!(output.contains("Total deductions: 10.00\n"));
    assert!(output.ends_with("Monthly Net Pay: 0.00\n"));
    assert_eq!(session.table(), &BandTable::standard());
}
