/*! A small regular expression engine for editor highlighting.

Patterns are a constrained regex subset: literal ASCII text, parenthesized
groups, the quantifiers `?`/`*`/`+` (immediately after a closed group), and
the escapes `\\ \? \* \+ \( \) \c`. A pattern is validated, parsed into an
expression tree, lowered into a non-deterministic automaton and determinized
into a DFA; the scanner then reports every matching substring of the host
buffer as a half-open `(start, end)` pair of character offsets, including
matches that touch caret positions.

The host buffer is supplied through the [`TextSource`] capability; carets
are handled by splicing a reserved marker character into the text before
matching and mapping all reported offsets back to original-text
coordinates afterwards.

# Example

```rust
use editor_regexp::{match_all, Buffer};

let buffer = Buffer::new("abc abca", vec![]);
let matches = match_all(&buffer, "a(bc)?").unwrap();

assert!(matches.contains(&(0, 3))); // "abc"
assert!(matches.contains(&(4, 5))); // "a" alone
```

A pattern can also be compiled once and used to scan many buffers, possibly
in parallel:

```rust
use editor_regexp::{Buffer, Scanner};

let scanner = Scanner::compile("(ab)?(d)+").unwrap();
let matches = scanner.par_scan(&Buffer::new("d ddd abd", vec![]));

assert!(matches.contains(&(6, 9))); // "abd"
```
*/

#![deny(missing_docs)]

pub mod ast;
pub mod compiler;
pub mod parser;
pub mod scanner;

mod errors;

#[cfg(test)]
mod tests;

pub use errors::Error;
pub use scanner::match_all;
pub use scanner::Buffer;
pub use scanner::MatchSet;
pub use scanner::Scanner;
pub use scanner::Span;
pub use scanner::TextSource;
pub use scanner::CARET_MARK;
