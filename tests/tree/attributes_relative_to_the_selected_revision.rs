use crate::common::command::{empty_repository, stdout_of};
use crate::common::fixture::{RepositoryFixture, SampleHistory};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn attributes_relative_to_the_selected_revision(empty_repository: RepositoryFixture) {
    let history = SampleHistory::write(&empty_repository);

    let stdout = stdout_of(&empty_repository, &["tree", "docs", "--rev", "HEAD~1"]);

    assert_eq!(
        stdout,
        format!(
            "100644 file guide.md\t{} 2024-01-31 02:05:09 PM Ada Lovelace\tInitial import\n",
            history.c1.to_short_oid()
        )
    );
}
