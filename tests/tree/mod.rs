mod attributes_merged_changes_to_the_side_branch;
mod attributes_relative_to_the_selected_revision;
mod file_path_is_not_a_directory;
mod lists_a_subdirectory;
mod missing_path_is_an_error;
mod revision_flags_are_mutually_exclusive;
mod unknown_branch_is_an_error;
