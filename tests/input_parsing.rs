//! Tests for loading domain lists from arguments, text files and CSV files.

use std::fs;

use mail_posture::error_handling::InputError;
use mail_posture::input::load_domains;
use mail_posture::Config;
use tempfile::TempDir;

async fn names(config: &Config) -> Result<Vec<String>, InputError> {
    let input = load_domains(config).await?;
    Ok(input.domains.iter().map(|d| d.to_string()).collect())
}

#[tokio::test]
async fn test_text_file_with_comments_and_invalid_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input_file = temp_dir.path().join("domains.txt");
    let content = r#"# Customer domains
example.com

EXAMPLE.org.
# Invalid entries below
not_a valid domain
localhost
example.com
"#;
    fs::write(&input_file, content).expect("Failed to write test file");

    let config = Config {
        file: Some(input_file),
        ..Default::default()
    };
    let input = load_domains(&config).await.unwrap();

    let domains: Vec<&str> = input.domains.iter().map(|d| d.as_str()).collect();
    assert_eq!(domains, vec!["example.com", "example.org"]);
    assert_eq!(input.rejected.len(), 2);
    assert_eq!(input.duplicates, 1);
}

#[tokio::test]
async fn test_csv_file_default_column() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input_file = temp_dir.path().join("domains.csv");
    fs::write(
        &input_file,
        "Name,Domain,Notes\nAcme,acme.example,\"main, primary\"\nGlobex,globex.example,\n",
    )
    .unwrap();

    let config = Config {
        file: Some(input_file),
        ..Default::default()
    };
    assert_eq!(
        names(&config).await.unwrap(),
        vec!["acme.example".to_string(), "globex.example".to_string()]
    );
}

#[tokio::test]
async fn test_csv_file_custom_column() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input_file = temp_dir.path().join("sites.CSV");
    fs::write(&input_file, "website\nexample.com\n").unwrap();

    let config = Config {
        file: Some(input_file),
        csv_column: "WebSite".to_string(),
        ..Default::default()
    };
    assert_eq!(names(&config).await.unwrap(), vec!["example.com".to_string()]);
}

#[tokio::test]
async fn test_csv_file_missing_column() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input_file = temp_dir.path().join("domains.csv");
    fs::write(&input_file, "Name,Host\nAcme,acme.example\n").unwrap();

    let config = Config {
        file: Some(input_file),
        ..Default::default()
    };
    let err = load_domains(&config).await.unwrap_err();
    assert!(matches!(err, InputError::MissingColumn { .. }));
    assert!(err.to_string().contains("'Domain'"));
}

#[tokio::test]
async fn test_arguments_come_before_file_entries() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input_file = temp_dir.path().join("domains.txt");
    fs::write(&input_file, "b.example\na.example\n").unwrap();

    let config = Config {
        domains: vec!["z.example".to_string()],
        file: Some(input_file),
        ..Default::default()
    };
    assert_eq!(
        names(&config).await.unwrap(),
        vec!["z.example", "b.example", "a.example"]
    );
}

#[tokio::test]
async fn test_only_invalid_input_is_no_domains() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input_file = temp_dir.path().join("domains.txt");
    fs::write(&input_file, "# nothing here\n\n-bad-.example\n").unwrap();

    let config = Config {
        file: Some(input_file),
        ..Default::default()
    };
    let err = load_domains(&config).await.unwrap_err();
    assert!(matches!(err, InputError::NoDomains));
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = Config {
        file: Some(temp_dir.path().join("absent.txt")),
        ..Default::default()
    };
    let err = load_domains(&config).await.unwrap_err();
    assert!(matches!(err, InputError::Io { .. }));
}
