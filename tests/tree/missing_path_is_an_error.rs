use crate::common::command::{empty_repository, run_bit_browse_command};
use crate::common::fixture::{RepositoryFixture, SampleHistory};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn missing_path_is_an_error(empty_repository: RepositoryFixture) {
    SampleHistory::write(&empty_repository);

    run_bit_browse_command(empty_repository.path(), &["tree", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("path 'nope' not found in HEAD"));
}
