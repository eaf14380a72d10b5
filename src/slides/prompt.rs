//! Deterministic prompt assembly for Marp slide generation.
//!
//! The prompt combines the repository README, pull request metadata, a
//! truncated diff, recent review comments, and commit summaries, then spells
//! out the output contract the model must follow: Marp frontmatter, `---`
//! slide separators with no trailing one, a fixed section order, and raw
//! Markdown with no enclosing code fence.

use minijinja::{Environment, context};
use serde::Serialize;

use crate::error::DeckError;
use crate::github::models::{PullRequest, PullRequestDetail};

/// Hard cap on diff characters included in the prompt. Truncation is silent
/// and may cut mid-line.
const DIFF_CHAR_LIMIT: usize = 3000;

/// At most this many review comments appear in the prompt, most recent
/// first.
const COMMENT_LIMIT: usize = 3;

/// Each comment body is cut to this many characters.
const COMMENT_CHAR_LIMIT: usize = 200;

/// At most this many commits appear in the prompt, in branch order.
const COMMIT_LIMIT: usize = 3;

const PROMPT_TEMPLATE: &str = r#"You are a helpful assistant that generates Marp-format Markdown slide decks.
The slides should explain the pull request below in a way that helps others understand what was changed and why.

## Repository README
{{ readme }}

## Pull Request Metadata
- Number: {{ number }}
- Title: {{ title }}
- Author: {{ author }}
- description: {{ description }}
- State: {{ state }}{% if merged %} (merged){% endif %}
- Created: {{ created_at }}
- Review comment count: {{ comment_count }}

## Pull Request Diff (shortened)
```diff
{{ diff }}
```
{% if comments %}
## Review Comments (most recent first)
{% for comment in comments %}- {{ comment.author }}: {{ comment.body }}
{% endfor %}{% endif %}{% if commits %}
## Commits
{% for commit in commits %}- {{ commit.date }} {{ commit.author }}: {{ commit.summary }}
{% endfor %}{% endif %}
### Please generate a Marp slide deck in Markdown format.
- Use headings for each slide (e.g., #, ##)
- Use slide breaks (---) between slides
- Start with a title slide
- Include slides for: context and motivation, problem and approach, one slide per diff hunk, technologies used{% if merged %}, reviewer feedback{% endif %}, timeline{% if merged %}, achievements{% endif %}, conclusion
- If no clear background or purpose is provided in the description, ask the author to clarify their intent. If any URLs (like issues or tickets) are included, refer to them.
- When showing code changes, include comments on the slide if any part of the diff is unclear, hard to read, or potentially suboptimal.
- Use code snippets (in diff or js format) where appropriate
- Write in {{ language }}.
- Output the slide content directly as Markdown. Do not wrap the entire response in a code block
- Do not end the final slide with a slide break like '---'
- Include the Marp frontmatter header at the top:

```
---
marp: true
---
```"#;

#[derive(Debug, Serialize)]
struct TemplateComment {
    author: String,
    body: String,
}

#[derive(Debug, Serialize)]
struct TemplateCommit {
    author: String,
    date: String,
    summary: String,
}

/// Assembles the slide-generation prompt for one pull request.
///
/// # Errors
///
/// Returns [`DeckError::Interface`] when template rendering fails.
pub fn build_prompt(
    pr: &PullRequest,
    detail: &PullRequestDetail,
    readme: &str,
    language: &str,
) -> Result<String, DeckError> {
    let comments: Vec<TemplateComment> = detail
        .comments
        .iter()
        .rev()
        .take(COMMENT_LIMIT)
        .map(|comment| TemplateComment {
            author: comment.author.clone(),
            body: truncate_chars(&comment.body, COMMENT_CHAR_LIMIT),
        })
        .collect();

    let commits: Vec<TemplateCommit> = detail
        .commits
        .iter()
        .take(COMMIT_LIMIT)
        .map(|commit| TemplateCommit {
            author: commit.author.clone(),
            date: commit.date.as_deref().map(format_date).unwrap_or_default(),
            summary: first_line(&commit.message).to_owned(),
        })
        .collect();

    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
    env.add_template("prompt", PROMPT_TEMPLATE)
        .map_err(|error| DeckError::Interface {
            message: format!("invalid prompt template: {error}"),
        })?;

    let ctx = context! {
        readme => readme,
        number => pr.number,
        title => pr.title,
        author => pr.author,
        description => pr.description,
        state => detail.state,
        merged => detail.merged,
        created_at => detail.created_at.clone().unwrap_or_default(),
        comment_count => detail.comments.len(),
        diff => truncate_chars(&detail.diff, DIFF_CHAR_LIMIT),
        comments => comments,
        commits => commits,
        language => language,
    };

    let template = env
        .get_template("prompt")
        .map_err(|error| DeckError::Interface {
            message: format!("failed to retrieve prompt template: {error}"),
        })?;

    template.render(ctx).map_err(|error| DeckError::Interface {
        message: format!("prompt rendering failed: {error}"),
    })
}

/// Keeps exactly the first `max_chars` characters, silently dropping the
/// rest.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}

/// Reduces an ISO 8601 timestamp to `YYYY-MM-DD`, passing unparseable
/// values through unchanged.
fn format_date(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map_or_else(|_| timestamp.to_owned(), |dt| dt.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::{DIFF_CHAR_LIMIT, build_prompt, truncate_chars};
    use crate::github::models::{CommitInfo, PullRequest, PullRequestDetail, ReviewComment};

    fn sample_pr() -> PullRequest {
        PullRequest {
            number: 42,
            title: "Add caching layer".to_owned(),
            description: "Speeds up repeated lookups.".to_owned(),
            author: "octocat".to_owned(),
        }
    }

    fn sample_detail() -> PullRequestDetail {
        PullRequestDetail {
            diff: "diff --git a/lib.rs b/lib.rs\n+cache\n".to_owned(),
            state: "closed".to_owned(),
            merged: false,
            comments: Vec::new(),
            created_at: Some("2025-03-01T09:00:00Z".to_owned()),
            commits: vec![CommitInfo {
                author: "octocat".to_owned(),
                date: Some("2025-02-28T10:00:00Z".to_owned()),
                message: "Add caching layer\n\nLonger explanation.".to_owned(),
            }],
        }
    }

    #[test]
    fn prompt_includes_metadata_and_omits_empty_comment_section() {
        let prompt = build_prompt(&sample_pr(), &sample_detail(), "# Widgets", "Japanese")
            .expect("prompt should render");

        assert!(prompt.contains("- Number: 42"));
        assert!(prompt.contains("- Title: Add caching layer"));
        assert!(!prompt.contains("## Review Comments"));
        assert!(prompt.contains("## Commits"));
        assert!(prompt.contains("2025-02-28 octocat: Add caching layer"));
        assert!(prompt.contains("Write in Japanese."));
        assert!(prompt.contains("marp: true"));
    }

    #[test]
    fn diff_is_cut_to_exactly_the_first_3000_characters() {
        let long_diff = "x".repeat(DIFF_CHAR_LIMIT + 500);
        let detail = PullRequestDetail {
            diff: long_diff,
            ..sample_detail()
        };

        let prompt = build_prompt(&sample_pr(), &detail, "", "English")
            .expect("prompt should render");

        let expected = "x".repeat(DIFF_CHAR_LIMIT);
        assert!(prompt.contains(&expected));
        assert!(!prompt.contains(&format!("{expected}x")));
    }

    #[test]
    fn unmerged_pull_requests_omit_merged_gated_sections() {
        let prompt = build_prompt(&sample_pr(), &sample_detail(), "", "English")
            .expect("prompt should render");

        assert!(!prompt.contains("reviewer feedback"));
        assert!(!prompt.contains("achievements"));
        assert!(prompt.contains("timeline"));
    }

    #[test]
    fn merged_pull_requests_include_feedback_and_achievements_sections() {
        let detail = PullRequestDetail {
            merged: true,
            ..sample_detail()
        };

        let prompt = build_prompt(&sample_pr(), &detail, "", "English")
            .expect("prompt should render");

        assert!(prompt.contains("reviewer feedback"));
        assert!(prompt.contains("achievements"));
    }

    #[test]
    fn only_the_three_most_recent_comments_appear_truncated() {
        let comments = (1..=5)
            .map(|index| ReviewComment {
                author: format!("reviewer{index}"),
                body: format!("comment {index} {}", "y".repeat(300)),
                created_at: None,
            })
            .collect();
        let detail = PullRequestDetail {
            comments,
            ..sample_detail()
        };

        let prompt = build_prompt(&sample_pr(), &detail, "", "English")
            .expect("prompt should render");

        assert!(prompt.contains("## Review Comments"));
        assert!(prompt.contains("reviewer5"));
        assert!(prompt.contains("reviewer3"));
        assert!(!prompt.contains("reviewer2"));

        // 200-character cap on each body.
        assert!(!prompt.contains(&"y".repeat(200)));
        assert!(prompt.contains(&"y".repeat(150)));
    }

    #[test]
    fn truncate_chars_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("日本語のテキスト", 3), "日本語");
    }
}
