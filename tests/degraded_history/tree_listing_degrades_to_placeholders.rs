use crate::common::command::empty_repository;
use crate::common::fixture::{RepositoryFixture, SampleHistory};
use bit_browse::artifacts::branch::revision::Revision;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn tree_listing_degrades_to_placeholders(empty_repository: RepositoryFixture) {
    colored::control::set_override(false);
    let history = SampleHistory::write(&empty_repository);
    empty_repository.delete_object(&history.c1);

    empty_repository
        .repository()
        .tree(&Revision::try_parse("HEAD").unwrap(), "")
        .unwrap();

    assert_eq!(
        empty_repository.output(),
        "100644 file README.md\t- - -\t-\n\
         040000 dir docs\t- - -\t-\n\
         040000 dir src\t- - -\t-\n"
    );
}
