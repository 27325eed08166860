//! Default welcome templates and placeholder rendering.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// Welcome for an author's first issue in the repository.
pub const FIRST_TIME_ISSUE: &str = "Howdy {{author}} – thanks for your first issue!";

/// Welcome for an author who has opened issues or PRs before.
pub const RETURNING_ISSUE: &str = "Howdy again {{author}} – thanks for another issue!";

/// Welcome for an author's first pull request in the repository.
pub const FIRST_TIME_PR: &str = "Howdy {{author}} – thanks for your first PR!";

/// Welcome for an author who has opened issues or PRs before.
pub const RETURNING_PR: &str = "Howdy again {{author}} – thanks for another PR!";

/// Matches `{{author}}` with any whitespace inside the braces.
static AUTHOR_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{\s*author\s*\}\}").unwrap());

/// Replace every author placeholder in `template` with an `@login` mention.
pub fn render_welcome(template: &str, author: &str) -> String {
    let mention = format!("@{author}");

    AUTHOR_PLACEHOLDER.replace_all(template, NoExpand(&mention)).into_owned()
}
