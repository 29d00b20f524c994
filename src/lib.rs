//! The library code for the `articles` static site generator. The whole site
//! comes from a single notes file, and the architecture breaks down into two
//! steps:
//!
//! 1. Parsing articles out of the notes file ([`crate::parser`])
//! 2. Converting the articles into output files on disk ([`crate::write`])
//!
//! Parsing is line oriented: a line starting with `# ` opens a new article,
//! and the `Date:` and `Tags:` lines inside it are pulled out as metadata.
//! Everything else is markdown which is rendered to HTML on the spot
//! ([`crate::markdown`]).
//!
//! Writing produces three kinds of pages from fixed templates: the home
//! index, one page per article, and one listing page per tag. The articles
//! are grouped by tag in [`crate::tag`].
//!
//! [`crate::build::build_site`] stitches the two steps together.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod article;
pub mod build;
pub mod cli;
pub mod config;
pub mod htmlrenderer;
pub mod markdown;
pub mod parser;
pub mod tag;
pub mod write;

mod util;
