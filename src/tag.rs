//! Groups [`Article`]s by tag for the tag listing pages.

use crate::article::Article;
use std::collections::HashMap;

/// The directory, relative to the output directory, holding the tag pages.
pub const TAG_DIRECTORY: &str = "tag";

/// The link to a tag's page relative to the output directory (e.g.,
/// `tag/rust.html`).
pub fn tag_link(tag: &str) -> String {
    format!("{}/{}.html", TAG_DIRECTORY, tag)
}

/// `TagIndex` represents the collection of [`Article`]s carrying one tag.
#[derive(Debug)]
pub struct TagIndex<'a> {
    /// The tag's name. This may be empty for articles without a `Tags:` line.
    pub name: &'a str,

    /// The articles carrying the tag, in the order they were passed to
    /// [`index_tags`].
    pub articles: Vec<&'a Article>,
}

/// Indexes a list of [`Article`]s by tag. Tags come out in the order they
/// are first seen, so generating the tag pages is stable from run to run. An
/// article listing the same tag twice appears twice in that tag's index.
pub fn index_tags(articles: &[Article]) -> Vec<TagIndex<'_>> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut indices: Vec<TagIndex> = Vec::new();

    for article in articles {
        for tag in article.tags.iter() {
            match positions.get(tag.as_str()) {
                None => {
                    positions.insert(tag.as_str(), indices.len());
                    indices.push(TagIndex {
                        name: tag.as_str(),
                        articles: vec![article],
                    });
                }
                Some(&position) => {
                    indices[position].articles.push(article);
                }
            }
        }
    }

    indices
}
