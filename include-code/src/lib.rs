//! Code snippets for documentation, straight from the codebase
//!
//!     Documentation pages reference code with a one-line macro instead of a pasted copy:
//!
//!         #include_code setup /yarn-project/foo/src/index.ts typescript
//!
//!     and the source file marks the region with line comments:
//!
//!         // docs:start:setup
//!         const client = createClient();
//!         // docs:end:setup
//!
//!     This crate finds the region, cleans it up, and splices it into the page as a code block
//!     followed by a link back to the exact lines on GitHub.
//!
//!     This is a pure lib, that is, it powers include-code-cli but is shell agnostic: no code
//!     here should suppose a shell environment, be it printing to std streams, env vars etc.
//!
//! Architecture
//!
//!     Data flows one way, and nothing is cached between calls:
//!
//!         source file → extract → Snippet → resolver → ReplacementNode → host document → format
//!
//!     The file structure:
//!     .
//!     ├── error.rs                # ExtractError, FormatError
//!     ├── extract                 # The snippet extractor
//!     │   ├── markers.rs          # Marker classification, interleaved-line removal
//!     │   └── highlight.rs        # Highlight directives, dedent
//!     ├── invocation.rs           # `#include_code` line parsing
//!     ├── source_link.rs          # GitHub links and the attribution anchor
//!     ├── nodes.rs                # Host-agnostic replacement nodes
//!     ├── resolver.rs             # HostDocument seam, Resolver, Diagnostic
//!     ├── format.rs               # Output Format trait
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     └── formats
//!         ├── markdown            # comrak host document, CommonMark output
//!         └── html                # comrak HTML output
//!
//! Core Algorithms
//!
//!     The interesting part is extraction (./extract/mod.rs). Markers may name several
//!     identifiers, so regions overlap; extracting one identifier must scrub the markers of the
//!     others, but only inside its own bounds. This is done in two pure phases over the line
//!     array (plan, then apply) after a single classification scan.
//!
//! Errors
//!
//!     The extractor never recovers: every problem aborts that one extraction. The resolver
//!     treats invocations independently and turns failures into diagnostics, leaving the macro
//!     line in place, so one broken reference does not fail a whole documentation build.

pub mod error;
pub mod extract;
pub mod format;
pub mod formats;
pub mod invocation;
pub mod nodes;
pub mod registry;
pub mod resolver;
pub mod source_link;

pub use error::{ExtractError, FormatError, MarkerKind};
pub use extract::{extract_from_str, extract_snippet, Snippet};
pub use format::Format;
pub use formats::{include_code_markdown, Rendered};
pub use invocation::{IncludeOptions, Invocation};
pub use nodes::ReplacementNode;
pub use registry::FormatRegistry;
pub use resolver::{Diagnostic, HostDocument, Position, Resolver, ResolverOptions};
