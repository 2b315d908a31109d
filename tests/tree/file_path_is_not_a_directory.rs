use crate::common::command::{empty_repository, run_bit_browse_command};
use crate::common::fixture::{RepositoryFixture, SampleHistory};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn file_path_is_not_a_directory(empty_repository: RepositoryFixture) {
    SampleHistory::write(&empty_repository);

    run_bit_browse_command(empty_repository.path(), &["tree", "README.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
