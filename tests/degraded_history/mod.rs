mod corrupt_commit_is_malformed;
mod deleted_commit_makes_the_store_unavailable;
mod tree_listing_degrades_to_placeholders;

fn root_entries() -> Vec<String> {
    ["README.md", "docs", "src"]
        .iter()
        .map(|name| name.to_string())
        .collect()
}
