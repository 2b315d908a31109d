use crate::common::command::{empty_repository, run_bit_browse_command};
use crate::common::fixture::RepositoryFixture;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn empty_repository_has_no_history(empty_repository: RepositoryFixture) {
    run_bit_browse_command(empty_repository.path(), &["log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown revision"));
}
