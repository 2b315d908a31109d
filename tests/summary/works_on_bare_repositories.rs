use crate::common::command::stdout_of;
use crate::common::fixture::{RepositoryFixture, SampleHistory};
use pretty_assertions::assert_eq;
use rstest::rstest;
use super::field;

#[rstest]
fn works_on_bare_repositories(
    #[from(crate::common::command::repository_dir)] repository_dir: assert_fs::TempDir,
) {
    let bare = RepositoryFixture::init_bare(repository_dir, "project.git");
    let history = SampleHistory::write(&bare);

    let stdout = stdout_of(&bare, &["summary"]);

    assert_eq!(field(&stdout, "name"), Some("project"));
    assert!(stdout.contains(&format!("master {}", history.c3.to_short_oid())));
}
