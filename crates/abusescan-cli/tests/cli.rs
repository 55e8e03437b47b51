use assert_cmd::assert::OutputAssertExt;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::process::Output;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn check_body(ip: &str, score: u8, reports: u32) -> serde_json::Value {
    let last_reported = (reports > 0).then_some("2024-05-01T08:30:00+00:00");
    json!({
        "data": {
            "ipAddress": ip,
            "isPublic": true,
            "ipVersion": 4,
            "isWhitelisted": false,
            "abuseConfidenceScore": score,
            "countryCode": "DE",
            "usageType": "Data Center/Web Hosting/Transit",
            "isp": "Example GmbH",
            "domain": "example.de",
            "hostnames": [],
            "totalReports": reports,
            "numDistinctUsers": reports.min(3),
            "lastReportedAt": last_reported
        }
    })
}

/// A command isolated from the user's config, environment and terminal.
fn abusescan(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("abusescan").unwrap();
    cmd.current_dir(dir.path())
        .env("ABUSESCAN_CONFIG", dir.path().join("config.toml"))
        .env_remove("ABUSEIPDB_API_KEY")
        .env_remove("ABUSEIPDB_API_URL")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

async fn output(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

async fn mock_check(server: &MockServer, ip: &str, score: u8, reports: u32) {
    Mock::given(method("GET"))
        .and(path("/check"))
        .and(query_param("ipAddress", ip))
        .and(query_param("maxAgeInDays", "90"))
        .respond_with(ResponseTemplate::new(200).set_body_json(check_body(ip, score, reports)))
        .mount(server)
        .await;
}

fn write(dir: &TempDir, name: &str, contents: &str) {
    std::fs::write(dir.path().join(name), contents).unwrap();
}

fn read(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name)).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn scan_writes_only_flagged_hosts() {
    let server = MockServer::start().await;
    mock_check(&server, "192.0.2.10", 40, 0).await;
    mock_check(&server, "192.0.2.11", 0, 0).await;
    mock_check(&server, "192.0.2.12", 0, 6).await;

    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "ip.txt",
        "192.0.2.10\n\n192.0.2.11\nnothing-here.invalid\n192.0.2.12\n",
    );

    let mut cmd = abusescan(&dir);
    cmd.args(["--api-key", "test-key", "--api-url", &server.uri(), "scan"]);
    output(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Element nothing-here.invalid could not have been evaluated.",
        ))
        .stdout(predicate::str::contains("2 entries written to res.txt"));

    let report = read(&dir, "res.txt");
    assert!(report.starts_with("192.0.2.10 --> {IpAddress:192.0.2.10 "));
    assert!(report.contains("AbuseConfidenceScore:40"));
    assert!(report.contains("192.0.2.12 --> {IpAddress:192.0.2.12 "));
    assert!(report.contains("TotalReports:6"));
    assert!(!report.contains("192.0.2.11"));
    assert!(report.ends_with("}\n\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn scan_aborts_on_malformed_response() {
    let server = MockServer::start().await;
    mock_check(&server, "192.0.2.10", 90, 12).await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .and(query_param("ipAddress", "192.0.2.20"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": "))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .and(query_param("ipAddress", "192.0.2.30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(check_body("192.0.2.30", 50, 1)))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write(&dir, "hosts.txt", "192.0.2.10\n192.0.2.20\n192.0.2.30\n");

    let mut cmd = abusescan(&dir);
    cmd.args(["-k", "test-key", "--api-url", &server.uri()])
        .args(["scan", "-i", "hosts.txt", "-o", "out.txt"]);
    output(cmd)
        .await
        .assert()
        .failure()
        .stderr(predicate::str::contains("checking 192.0.2.20 (192.0.2.20) failed"));

    // Entries before the failure were flushed
    let report = read(&dir, "out.txt");
    assert!(report.starts_with("192.0.2.10 --> "));
    assert!(!report.contains("192.0.2.30"));
}

#[tokio::test(flavor = "multi_thread")]
async fn scan_keep_going_counts_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .and(query_param("ipAddress", "192.0.2.20"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mock_check(&server, "192.0.2.30", 50, 1).await;

    let dir = TempDir::new().unwrap();
    write(&dir, "ip.txt", "192.0.2.20\n192.0.2.30\n");

    let mut cmd = abusescan(&dir);
    cmd.args(["-k", "test-key", "--api-url", &server.uri()])
        .args(["scan", "--keep-going"]);
    output(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("could not be checked"));

    assert!(read(&dir, "res.txt").starts_with("192.0.2.30 --> "));
}

#[tokio::test(flavor = "multi_thread")]
async fn api_key_is_prompted_on_stdin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .and(header("Key", "typed-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(check_body("192.0.2.40", 0, 0)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write(&dir, "ip.txt", "192.0.2.40\n");

    let mut cmd = abusescan(&dir);
    cmd.args(["--api-url", &server.uri()]).write_stdin("typed-key\n");
    output(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("Insert your API Key: "))
        .stdout(predicate::str::contains("No reported abuse found."));

    assert_eq!(read(&dir, "res.txt"), "");
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_api_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    write(&dir, "ip.txt", "192.0.2.40\n");

    let mut cmd = abusescan(&dir);
    cmd.write_stdin("\n");
    output(cmd)
        .await
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn check_prints_record_as_json() {
    let server = MockServer::start().await;
    mock_check(&server, "198.51.100.9", 75, 20).await;

    let dir = TempDir::new().unwrap();
    let mut cmd = abusescan(&dir);
    cmd.args(["-k", "test-key", "--api-url", &server.uri()])
        .args(["check", "198.51.100.9", "-f", "json"]);
    let out = output(cmd).await;
    out.clone().assert().success();

    let record: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(record["ipAddress"], "198.51.100.9");
    assert_eq!(record["abuseConfidenceScore"], 75);
    assert_eq!(record["totalReports"], 20);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_host_list_fails() {
    let dir = TempDir::new().unwrap();
    let mut cmd = abusescan(&dir);
    cmd.args(["-k", "test-key", "scan", "-i", "absent.txt"]);
    output(cmd)
        .await
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open host list"));
    assert!(!dir.path().join("res.txt").exists());
}

#[test]
fn report_reads_back_text_report() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "res.txt",
        "bad.example --> {IpAddress:192.0.2.66 IsPublic:true IpVersion:4 IsWhitelisted:false \
         AbuseConfidenceScore:88 CountryCode:FR UsageType:Fixed Line ISP Isp:Example SA \
         Domain:example.fr Hostnames:[] TotalReports:14 NumDistinctUsers:5 \
         LastReportedAt:2024-05-01T08:30:00+00:00}\n\n",
    );

    let out = abusescan(&dir)
        .args(["report", "res.txt", "-f", "json"])
        .output()
        .unwrap();
    out.clone().assert().success();

    let entries: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(entries[0]["input"], "bad.example");
    assert_eq!(entries[0]["record"]["ipAddress"], "192.0.2.66");
    assert_eq!(entries[0]["record"]["abuseConfidenceScore"], 88);
    assert_eq!(entries[0]["record"]["usageType"], "Fixed Line ISP");
    assert_eq!(entries[0]["record"]["isp"], "Example SA");
}

#[test]
fn config_set_persists() {
    let dir = TempDir::new().unwrap();

    abusescan(&dir)
        .args(["config", "set", "resolver", "dns"])
        .assert()
        .success();
    abusescan(&dir)
        .args(["config", "set", "api_key", "abcdef0123456789"])
        .assert()
        .success()
        .stdout(predicate::str::contains("abcd...6789"));

    let saved = read(&dir, "config.toml");
    assert!(saved.contains("resolver = \"dns\""));
    assert!(saved.contains("api_key = \"abcdef0123456789\""));

    abusescan(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("resolver: dns"));

    abusescan(&dir)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[tokio::test(flavor = "multi_thread")]
async fn scan_uses_api_key_from_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .and(header("Key", "saved-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(check_body("192.0.2.50", 10, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write(&dir, "ip.txt", "192.0.2.50\n");

    abusescan(&dir)
        .args(["config", "set", "api_key", "saved-key"])
        .assert()
        .success();

    let mut cmd = abusescan(&dir);
    cmd.args(["--api-url", &server.uri(), "scan"]);
    output(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("Insert your API Key").not())
        .stdout(predicate::str::contains("1 entry written to res.txt"));

    assert!(read(&dir, "res.txt").starts_with("192.0.2.50 --> "));
}

#[test]
fn logs_have_no_color_codes_and_skips_are_reported_once() {
    let dir = TempDir::new().unwrap();
    write(&dir, "ip.txt", "nothing-here.invalid\n");

    // No request is made: the only host is skipped.
    let out = abusescan(&dir)
        .args(["-k", "test-key", "--api-url", "http://127.0.0.1:9", "scan"])
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    out.assert()
        .success()
        .stdout(predicate::str::contains(
            "Element nothing-here.invalid could not have been evaluated.",
        ));
    assert!(!stderr.contains("resolution failed"), "stderr: {stderr}");

    let out = abusescan(&dir)
        .args(["-v", "-k", "test-key", "--api-url", "http://127.0.0.1:9", "scan"])
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    assert!(stderr.contains("resolution failed"), "stderr: {stderr}");
    assert!(!stderr.contains('\u{1b}'), "stderr: {stderr}");
}
