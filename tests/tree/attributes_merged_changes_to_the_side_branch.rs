use crate::common::command::{empty_repository, stdout_of};
use crate::common::fixture::{BASE_TIME, HOUR, RepositoryFixture};
use rstest::rstest;

#[rstest]
fn attributes_merged_changes_to_the_side_branch(empty_repository: RepositoryFixture) {
    let base = empty_repository.commit(
        &[],
        BASE_TIME,
        &[("a.txt", "a1"), ("b.txt", "b1")],
        "Base",
    );
    let feature = empty_repository.commit(
        &[&base],
        BASE_TIME + HOUR,
        &[("a.txt", "a1"), ("b.txt", "b2")],
        "Change b on a branch",
    );
    let main = empty_repository.commit(
        &[&base],
        BASE_TIME + 2 * HOUR,
        &[("a.txt", "a2"), ("b.txt", "b1")],
        "Change a",
    );
    let merge = empty_repository.commit(
        &[&main, &feature],
        BASE_TIME + 3 * HOUR,
        &[("a.txt", "a2"), ("b.txt", "b2")],
        "Merge branch",
    );
    empty_repository.update_head(&merge);

    let stdout = stdout_of(&empty_repository, &["tree"]);

    assert!(stdout.contains(&format!("a.txt\t{} ", main.to_short_oid())));
    assert!(stdout.contains(&format!("b.txt\t{} ", feature.to_short_oid())));
    assert!(!stdout.contains(&merge.to_short_oid()));
}
