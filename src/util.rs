use pulldown_cmark::escape::{escape_href, escape_html};
use std::fs::File;
use std::io;
use std::path::Path;

/// Opens `path` for reading. On failure, the error message names the `kind`
/// of file and its path so the operator can tell which input was at fault.
pub fn open(path: &Path, kind: &str) -> io::Result<File> {
    File::open(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Opening {} file `{}`: {}", kind, path.display(), e),
        )
    })
}

/// Escapes `s` for use as HTML text or as a quoted attribute value.
pub fn html_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // writing into a `String` can't fail
    let _ = escape_html(&mut out, s);
    out
}

/// Escapes `s` for use inside an `href` attribute.
pub fn href(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let _ = escape_href(&mut out, s);
    out
}
