use crate::htmlrenderer::push_html;
use pulldown_cmark::{Options, Parser};
use std::io;

/// Converts the markdown source of an article to HTML, appending the result
/// to `out`. Raw HTML in the source is passed through and every link is
/// marked `rel="nofollow"`. Nothing is sanitized or rewritten.
pub fn to_html(out: &mut String, markdown: &str) -> io::Result<()> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    push_html(out, Parser::new_ext(markdown, options))
}

#[cfg(test)]
mod test {
    use super::*;

    fn fixture(wanted: &str, markdown: &str) -> io::Result<()> {
        let mut out = String::new();
        to_html(&mut out, markdown)?;
        assert_eq!(wanted, out);
        Ok(())
    }

    #[test]
    fn test_heading_level_is_kept() -> io::Result<()> {
        fixture(
            "<h1>Hello World</h1>\n<p>Hello <strong>world</strong>.</p>\n",
            "# Hello World\nHello **world**.",
        )
    }

    #[test]
    fn test_strikethrough() -> io::Result<()> {
        fixture("<p><del>gone</del></p>\n", "~~gone~~")
    }

    #[test]
    fn test_task_list() -> io::Result<()> {
        fixture(
            "<ul><li><input disabled=\"\" type=\"checkbox\" checked=\"\" />done</li>\n</ul>\n",
            "- [x] done",
        )
    }

    #[test]
    fn test_table() -> io::Result<()> {
        fixture(
            "<table><thead><tr><th>a</th><th align=\"right\">b</th></tr></thead>\
             <tbody><tr><td>1</td><td align=\"right\">2</td></tr></tbody></table>\n",
            "| a | b |\n|---|--:|\n| 1 | 2 |",
        )
    }
}
