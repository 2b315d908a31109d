use crate::common::command::{empty_repository, stdout_of};
use crate::common::fixture::{BASE_TIME, HOUR, RepositoryFixture};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn interleaves_merged_branches_by_commit_time(empty_repository: RepositoryFixture) {
    let base = empty_repository.commit(&[], BASE_TIME, &[("a.txt", "0")], "Base");
    let left = empty_repository.commit(&[&base], BASE_TIME + HOUR, &[("a.txt", "l")], "Left");
    let right = empty_repository.commit(
        &[&base],
        BASE_TIME + 2 * HOUR,
        &[("a.txt", "r")],
        "Right",
    );
    let left2 = empty_repository.commit(
        &[&left],
        BASE_TIME + 3 * HOUR,
        &[("a.txt", "l2")],
        "Left again",
    );
    let merge = empty_repository.commit(
        &[&left2, &right],
        BASE_TIME + 4 * HOUR,
        &[("a.txt", "m")],
        "Merge",
    );
    empty_repository.update_head(&merge);

    let subjects = stdout_of(&empty_repository, &["log", "--oneline"])
        .lines()
        .map(|line| line.split_once(' ').map(|(_, subject)| subject.to_string()))
        .collect::<Option<Vec<_>>>()
        .expect("every line has an id and a subject");

    assert_eq!(subjects, vec!["Merge", "Left again", "Right", "Left", "Base"]);

    let medium = stdout_of(&empty_repository, &["log", "-n", "1"]);
    assert!(medium.contains(&format!(
        "Merge: {} {}",
        left2.to_short_oid(),
        right.to_short_oid()
    )));
}
