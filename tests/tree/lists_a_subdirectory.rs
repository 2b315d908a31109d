use crate::common::command::{empty_repository, stdout_of};
use crate::common::fixture::{RepositoryFixture, SampleHistory};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("src")]
#[case("/src/")]
#[case("src//")]
fn lists_a_subdirectory(empty_repository: RepositoryFixture, #[case] path: &str) {
    let history = SampleHistory::write(&empty_repository);

    let expected = format!(
        "100644 file lib.rs\t{} 2024-01-31 03:05:09 PM Ada Lovelace\tRework the library\n\
         100644 file main.rs\t{} 2024-01-31 02:05:09 PM Ada Lovelace\tInitial import\n",
        history.c2.to_short_oid(),
        history.c1.to_short_oid(),
    );

    assert_eq!(stdout_of(&empty_repository, &["tree", path]), expected);
}
