use crate::common::command::{empty_repository, stdout_of};
use crate::common::fixture::{RepositoryFixture, SampleHistory};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(&["log", "--oneline", "-n", "1"], 1)]
#[case(&["log", "--oneline", "--max-count", "2"], 2)]
#[case(&["log", "--oneline", "-n", "10"], 3)]
#[case(&["log", "--oneline", "-n", "0"], 0)]
fn limits_the_number_of_commits(
    empty_repository: RepositoryFixture,
    #[case] args: &[&str],
    #[case] expected: usize,
) {
    SampleHistory::write(&empty_repository);

    assert_eq!(stdout_of(&empty_repository, args).lines().count(), expected);
}
