use crate::common::command::{empty_repository, run_bit_browse_command};
use crate::common::fixture::{RepositoryFixture, SampleHistory};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn revision_flags_are_mutually_exclusive(empty_repository: RepositoryFixture) {
    SampleHistory::write(&empty_repository);

    run_bit_browse_command(
        empty_repository.path(),
        &["tree", "--branch", "master", "--tag", "v1.0"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("cannot be used with"));
}
