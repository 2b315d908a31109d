use crate::common::command::empty_repository;
use crate::common::fixture::{RepositoryFixture, SampleHistory};
use bit_browse::artifacts::browse::error::BrowseError;
use bit_browse::artifacts::browse::resolve_last_modified;
use pretty_assertions::assert_eq;
use rstest::rstest;
use super::root_entries;

#[rstest]
fn deleted_commit_makes_the_store_unavailable(empty_repository: RepositoryFixture) {
    let history = SampleHistory::write(&empty_repository);
    empty_repository.delete_object(&history.c1);

    let error = resolve_last_modified(
        empty_repository.repository().database(),
        &history.c3,
        "",
        &root_entries(),
    )
    .unwrap_err();

    assert!(matches!(error, BrowseError::StoreUnavailable { .. }));
    assert_eq!(error.oid(), &history.c1);
}
