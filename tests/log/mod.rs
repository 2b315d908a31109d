mod empty_repository_has_no_history;
mod interleaves_merged_branches_by_commit_time;
mod limits_the_number_of_commits;
