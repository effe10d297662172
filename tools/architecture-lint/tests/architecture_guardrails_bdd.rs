//! Behaviour tests for the architecture guardrails.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use architecture_lint::{ArchitectureLintError, LintSource, Violation};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

#[derive(Debug, Default)]
struct LintWorld {
    sources: Vec<LintSource>,
    result: Option<Result<(), ArchitectureLintError>>,
}

#[fixture]
fn world() -> Mutex<LintWorld> {
    Mutex::new(LintWorld::default())
}

fn add_source(world: &Mutex<LintWorld>, file: &str, contents: &str) {
    let mut world = world.lock().expect("world lock");
    world.sources.push(LintSource {
        file: PathBuf::from(file),
        contents: contents.to_owned(),
    })
}

#[given("an inbound module that imports the outbound layer")]
fn inbound_imports_outbound(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "inbound/cli/posts.rs",
        "use coursework::outbound::placeholder; fn flow() { let _ = placeholder::JsonPlaceholderClient::new; }",
    );
}

#[given("an inbound module that imports reqwest directly")]
fn inbound_imports_reqwest(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "inbound/cli/posts.rs",
        "use reqwest::Client; fn flow() { let _ = Client::new(); }",
    );
}

#[given("a domain module that imports clap")]
fn domain_imports_clap(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "domain/registration.rs",
        "use clap::Parser; #[derive(Parser)] struct Args;",
    );
}

#[given("an outbound module that imports the inbound layer")]
fn outbound_imports_inbound(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "outbound/placeholder/bad_cross_boundary.rs",
        "use crate::inbound::cli; fn flow() { let _ = 1; }",
    );
}

#[given("a domain module whose tests use the Tokio runtime")]
fn domain_tests_use_tokio(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "domain/posts.rs",
        "pub struct Post; #[cfg(test)] mod tests { use tokio::time::sleep; #[tokio::test] async fn waits() { let _ = sleep; } }",
    );
}

#[given("valid domain, inbound, and outbound modules")]
fn valid_modules(world: &Mutex<LintWorld>) {
    add_valid_modules(world);
}

#[given("valid modules mixed with multiple boundary violations")]
fn valid_modules_with_multiple_violations(world: &Mutex<LintWorld>) {
    add_valid_modules(world);
    add_source(
        world,
        "inbound/cli/bad_cross_boundary.rs",
        "use coursework::outbound::placeholder; fn flow() { let _ = placeholder::DEFAULT_ENDPOINT; }",
    );
    add_source(
        world,
        "domain/bad.rs",
        "use clap::Parser; #[derive(Parser)] struct Args;",
    );
}

fn add_valid_modules(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "domain/movies.rs",
        "pub struct MovieId(u64); impl MovieId { pub fn new(raw: u64) -> Self { Self(raw) } }",
    );
    add_source(
        world,
        "inbound/cli/movies.rs",
        "use crate::domain::movies::MovieId; fn flow() { let _id = MovieId::new(1); }",
    );
    add_source(
        world,
        "outbound/placeholder/http_client.rs",
        "use crate::domain::movies::MovieId; use reqwest::Client; pub struct Adapter(Client); impl Adapter { pub fn touch(&self, _id: MovieId) {} }",
    );
}

#[when("the architecture lint runs")]
fn run_architecture_lint(world: &Mutex<LintWorld>) {
    let sources = {
        let world = world.lock().expect("world lock");
        world.sources.clone()
    };

    let temp_dir = TempDir::new().expect("tempdir");
    let crate_dir = temp_dir.path().join(architecture_lint::LINTED_CRATE);
    let src_dir = crate_dir.join("src");
    for source in &sources {
        let path = src_dir.join(&source.file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, &source.contents).expect("write source file");
    }

    let result = architecture_lint::lint_crate_sources(&crate_dir);
    let mut world = world.lock().expect("world lock");
    world.result = Some(result);
}

#[then("the lint succeeds")]
fn lint_succeeds(world: &Mutex<LintWorld>) {
    let world = world.lock().expect("world lock");
    let outcome = world.result.as_ref().expect("lint must have run");
    assert!(outcome.is_ok(), "expected success, got: {outcome:?}");
}

fn assert_violation_in_file_contains(
    world: &Mutex<LintWorld>,
    expected_file: &str,
    expected_substring: &str,
) {
    let expected_file = PathBuf::from(expected_file);
    let violations = violations(world);
    assert!(
        violations.iter().any(|violation| {
            violation.file == expected_file && violation.message.contains(expected_substring)
        }),
        "expected violation in '{expected_file:?}' containing '{expected_substring}', got: {violations:?}"
    );
}

fn violations(world: &Mutex<LintWorld>) -> Vec<Violation> {
    let world = world.lock().expect("world lock");
    let outcome = world.result.as_ref().expect("lint must have run");
    extract_violations(outcome).expect("expected violations")
}

#[then("the lint fails due to outbound access from inbound")]
fn lint_fails_due_to_outbound_access(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(world, "inbound/cli/posts.rs", "crate::outbound");
}

#[then("the lint fails due to inbound access from outbound")]
fn lint_fails_due_to_inbound_access(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(
        world,
        "outbound/placeholder/bad_cross_boundary.rs",
        "crate::inbound",
    );
}

#[then("the lint fails due to HTTP client crate usage")]
fn lint_fails_due_to_http_client_crate(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(world, "inbound/cli/posts.rs", "external crate `reqwest`");
}

#[then("the lint fails due to CLI crate usage in the domain")]
fn lint_fails_due_to_cli_crate(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(world, "domain/registration.rs", "external crate `clap`");
}

#[then("the lint fails")]
fn lint_fails(world: &Mutex<LintWorld>) {
    let world = world.lock().expect("world lock");
    let outcome = world.result.as_ref().expect("lint must have run");
    assert!(outcome.is_err(), "expected failure, got: {outcome:?}");
}

#[then("all boundary violations are reported")]
fn all_boundary_violations_are_reported(world: &Mutex<LintWorld>) {
    let violations = violations(world);
    assert!(
        violations.len() >= 2,
        "expected at least 2 violations, got: {violations:?}"
    );
    assert_violation_in_file_contains(
        world,
        "inbound/cli/bad_cross_boundary.rs",
        "crate::outbound",
    );
    assert_violation_in_file_contains(world, "domain/bad.rs", "external crate `clap`");
}

fn extract_violations(outcome: &Result<(), ArchitectureLintError>) -> Option<Vec<Violation>> {
    match outcome {
        Ok(()) => None,
        Err(ArchitectureLintError::Violations(violations)) => Some(violations.clone()),
        Err(other) => panic!("expected violations error, got: {other:?}"),
    }
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Clean layers pass the lint"
)]
fn clean_layers_pass(world: Mutex<LintWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Inbound adapters may not reach the HTTP adapter"
)]
fn inbound_may_not_reach_outbound(world: Mutex<LintWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Inbound adapters may not use the HTTP client crate"
)]
fn inbound_may_not_use_reqwest(world: Mutex<LintWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "The domain may not use the CLI crate"
)]
fn domain_may_not_use_clap(world: Mutex<LintWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Outbound adapters may not reach the CLI adapter"
)]
fn outbound_may_not_reach_inbound(world: Mutex<LintWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Test-only code is exempt"
)]
fn test_only_code_is_exempt(world: Mutex<LintWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Every violation is reported"
)]
fn every_violation_is_reported(world: Mutex<LintWorld>) {
    drop(world);
}
