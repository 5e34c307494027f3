//! Markup rendering and content records for the chapel site
//!
//!     Authored text on the site (bulletin descriptions, minister bios, event and sermon notes)
//!     is written in a small markdown dialect and rendered to HTML for the public pages. This
//!     crate owns that dialect: one lexer, one intermediate representation, and one HTML
//!     serializer that every page goes through.
//!
//!     TLDR: for page code, call [`render`] (or [`render_with_options`]) on the raw field once
//!     and inject the result. For records, deserialize a [`content::ContentRecord`], validate
//!     it, and use `render_fields`.
//!
//! Architecture
//!
//!     Rendering is two-phase. The lexer (./formats/markdown) turns source into the IR
//!     (./ir/nodes.rs) in a single left-to-right walk, so once a span is recognized nothing
//!     re-enters it: URLs keep their underscores and code keeps its asterisks. Serializers then
//!     emit from the IR, escaping each text leaf and attribute exactly once on the way out.
//!
//!     Presentation of newlines (bare `<br>` or paragraphs) is decided while flattening the IR
//!     into events (./common/nested_to_flat.rs), so serializers stay simple.
//!
//!     This is a pure lib: no code here assumes a shell, reads env vars or prints. Logging goes
//!     through `tracing`; the binary decides where it ends up.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── escape.rs               # HTML escaping
//!     ├── format.rs               # Format trait, shared option parsing
//!     ├── registry.rs             # name and file extension → Format
//!     ├── render.rs               # render() entry point and RenderOptions
//!     ├── publish.rs              # serialize + write to disk
//!     ├── formats
//!     │   ├── markdown            # lexer (parser.rs, inline.rs) and serializer
//!     │   ├── html                # html5ever based serializer
//!     │   ├── text                # plain text excerpts
//!     │   └── tag                 # IR debug dump
//!     ├── ir                      # Intermediate Representation
//!     ├── common                  # IR → events, URL checks
//!     └── content                 # typed records and validation
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── html/
//!     ├── markdown/
//!     └── content/
//!
//!     Rust does not discover tests in subdirectories by default, so tests/lib.rs includes them
//!     as modules.
//!
//! Known limitations
//!
//!     Emphasis uses a "no delimiter character inside" rule, so `**a*b*c**` stays literal and
//!     bare `snake_case_words` get italics. Rendering is not idempotent: rendering already
//!     rendered HTML escapes the tags, so each raw field must be rendered exactly once.

pub mod common;
pub mod content;
pub mod error;
pub mod escape;
pub mod format;
pub mod formats;
pub mod ir;
pub mod publish;
pub mod registry;
pub mod render;

pub use error::FormatError;
pub use format::Format;
pub use registry::FormatRegistry;
pub use render::{render, render_with_options, LineBreaks, RenderOptions};
