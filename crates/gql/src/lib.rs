//! gql: a command-line front end for the GQL filter language.
//!
//! Filters such as `author:-joe+(tag:photo,image:-null)` are compiled to the JSON
//! structures query engines consume, checked with caret diagnostics, or rewritten in
//! canonical form. Frequently used filters can be saved in `.gql.toml` and referenced
//! as `@name`.

#![warn(missing_docs)]

pub mod cli;
