use crate::common::command::{empty_repository, stdout_of};
use crate::common::fixture::{BASE_TIME, RepositoryFixture};
use fake::Fake;
use fake::faker::name::en::Name;
use pretty_assertions::assert_eq;
use rstest::rstest;
use super::field;

#[rstest]
fn describes_the_selected_revision(empty_repository: RepositoryFixture) {
    let author: String = Name().fake();
    let root = empty_repository.commit_as(
        &author,
        &[],
        BASE_TIME,
        &[("notes.txt", "first")],
        "Start notes",
    );
    let tip = empty_repository.commit(&[&root], BASE_TIME + 60, &[("notes.txt", "more")], "More");
    empty_repository.update_head(&tip);
    empty_repository.branch("first", &root);

    let stdout = stdout_of(&empty_repository, &["summary", "--branch", "first"]);

    assert_eq!(field(&stdout, "updated"), Some("2024-01-31 02:05:09 PM"));
    assert!(
        field(&stdout, "author").is_some_and(|value| value.starts_with(&author)),
        "author {author} missing from:\n{stdout}"
    );
    assert!(stdout.contains("tags:\n  (none)\n"));
}
