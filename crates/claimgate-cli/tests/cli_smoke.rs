use serde_json::{Value, json};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

const PAYOUT: &str = "0x2222222222222222222222222222222222222222";
const ISSUE_URL: &str = "https://github.com/acme/widgets/issues/42";
const PR_URL: &str = "https://github.com/acme/widgets/pull/138";

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "claimgate-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_claimgate<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_claimgate");
    Command::new(bin)
        .args(args)
        .output()
        .expect("claimgate command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "expected valid JSON stdout, got error: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn write_timeline(path: &Path, body_text: &str) {
    let payload = json!({
        "issue": {
            "id": "I_kwDOGWnnz85GjwA1",
            "number": 42,
            "repository_owner": "acme",
            "repository_name": "widgets",
            "url": ISSUE_URL
        },
        "events": [
            { "kind": "other" },
            {
                "kind": "cross_referenced",
                "source": {
                    "type": "pull_request",
                    "url": PR_URL,
                    "author": "octocat",
                    "merged": true,
                    "merged_at": "2022-05-01T12:00:00Z",
                    "created_at": "2022-04-01T09:00:00Z",
                    "base_repository_owner": "acme",
                    "base_repository_name": "widgets",
                    "body_text": body_text
                }
            }
        ]
    });
    fs::write(
        path,
        serde_json::to_vec_pretty(&payload).expect("timeline should serialize"),
    )
    .expect("timeline should be written");
}

fn write_ledger(path: &Path, bounty_type: &str, open: bool) {
    let payload = json!({
        "bounties": {
            "I_kwDOGWnnz85GjwA1": {
                "bounty_type": bounty_type,
                "address": "0x46e09468616365256f11f4544e65ce0c70ee624b",
                "open": open,
                "solvent": true
            }
        }
    });
    fs::write(
        path,
        serde_json::to_vec_pretty(&payload).expect("ledger should serialize"),
    )
    .expect("ledger should be written");
}

fn resolve_args(dir: &Path, viewer: &str, submit: bool) -> Vec<String> {
    let mut args = vec![
        "resolve".to_string(),
        "--timeline".to_string(),
        dir.join("timeline.json").display().to_string(),
        "--viewer".to_string(),
        viewer.to_string(),
        "--ledger".to_string(),
        dir.join("ledger.json").display().to_string(),
        "--payout".to_string(),
        PAYOUT.to_string(),
        "--json".to_string(),
    ];
    if submit {
        args.push("--submit".to_string());
    }
    args
}

#[test]
fn resolve_reports_withdrawable_pull_request() {
    let dir = TempDirGuard::new("resolve-ok");
    write_timeline(&dir.path().join("timeline.json"), "Closes #42");
    write_ledger(&dir.path().join("ledger.json"), "single", true);

    let output = run_claimgate(resolve_args(dir.path(), "octocat", false));
    assert_success(&output);

    let payload = parse_json_stdout(&output);
    assert_eq!(payload["can_withdraw"], true);
    assert_eq!(payload["withdrawal"]["claimant"], "octocat");
    assert_eq!(payload["withdrawal"]["claimant_asset"], PR_URL);
    assert!(payload.get("claim").is_none());
}

#[test]
fn resolve_submit_emits_claim_receipt() {
    let dir = TempDirGuard::new("resolve-submit");
    write_timeline(&dir.path().join("timeline.json"), "Fixes #42");
    write_ledger(&dir.path().join("ledger.json"), "single", true);

    let output = run_claimgate(resolve_args(dir.path(), "octocat", true));
    assert_success(&output);

    let payload = parse_json_stdout(&output);
    let txn_hash = payload["claim"]["txn_hash"]
        .as_str()
        .expect("claim should carry a txn hash");
    assert!(txn_hash.starts_with("0x"));
}

#[test]
fn resolve_rejects_non_author() {
    let dir = TempDirGuard::new("resolve-author");
    write_timeline(&dir.path().join("timeline.json"), "Closes #42");
    write_ledger(&dir.path().join("ledger.json"), "single", true);

    let output = run_claimgate(resolve_args(dir.path(), "hubot", false));
    assert_failure(&output);

    let payload = parse_json_stdout(&output);
    assert_eq!(payload["can_withdraw"], false);
    assert_eq!(payload["type"], "NO_WITHDRAWABLE_PR_FOUND");
}

#[test]
fn resolve_submit_rejects_closed_single_bounty() {
    let dir = TempDirGuard::new("resolve-closed");
    write_timeline(&dir.path().join("timeline.json"), "Closes #42");
    write_ledger(&dir.path().join("ledger.json"), "single", false);

    let output = run_claimgate(resolve_args(dir.path(), "octocat", true));
    assert_failure(&output);

    let payload = parse_json_stdout(&output);
    assert_eq!(payload["type"], "BOUNTY_IS_CLAIMED");
}

#[test]
fn resolve_missing_timeline_fails_with_diagnostic() {
    let dir = TempDirGuard::new("resolve-missing");
    write_ledger(&dir.path().join("ledger.json"), "single", true);

    let output = run_claimgate(resolve_args(dir.path(), "octocat", false));
    assert_failure(&output);
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("failed to read issue timeline"),
        "stderr should name the missing input"
    );
}

#[test]
fn extract_reports_closers_and_tier() {
    let dir = TempDirGuard::new("extract");
    let text_path = dir.path().join("body.txt");
    fs::write(
        &text_path,
        "Closes #42 and resolves https://github.com/acme/widgets/issues/7\nTier-2-Winner",
    )
    .expect("body text should be written");

    let output = run_claimgate([
        "extract",
        text_path.display().to_string().as_str(),
        "--owner",
        "acme",
        "--repo",
        "widgets",
        "--json",
    ]);
    assert_success(&output);

    let payload = parse_json_stdout(&output);
    assert_eq!(payload["closes"], json!([7, 42]));
    assert_eq!(payload["tier_placement"], 2);
}

#[test]
fn claimant_id_is_deterministic() {
    let first = run_claimgate(["claimant-id", "octocat", PR_URL, "--json"]);
    let second = run_claimgate(["claimant-id", "octocat", PR_URL, "--json"]);
    assert_success(&first);
    assert_success(&second);

    let first_id = parse_json_stdout(&first)["claimant_id"]
        .as_str()
        .expect("claimant id should be present")
        .to_string();
    assert_eq!(
        parse_json_stdout(&second)["claimant_id"].as_str(),
        Some(first_id.as_str())
    );
    assert!(first_id.starts_with("0x"));
    assert_eq!(first_id.len(), 66);
}

#[test]
fn token_sign_then_verify_round_trips() {
    let signed = run_claimgate(["token", "sign", "gho_abc123", "--secret", "hunter2"]);
    assert_success(&signed);
    let signed_token = String::from_utf8_lossy(&signed.stdout).trim().to_string();

    let verified = run_claimgate([
        "token",
        "verify",
        signed_token.as_str(),
        "--secret",
        "hunter2",
    ]);
    assert_success(&verified);
    assert_eq!(
        String::from_utf8_lossy(&verified.stdout).trim(),
        "gho_abc123"
    );

    let rejected = run_claimgate([
        "token",
        "verify",
        signed_token.as_str(),
        "--secret",
        "wrong-secret",
    ]);
    assert_failure(&rejected);
}
