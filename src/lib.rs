//! Declarative multi-source resolution for command-line tools. Describe your
//! fields once, and one call reads flags, environment variables, an rc file
//! and the crate manifest in a ranked order.
//!
//! ```ignore
//! let schema = Schema::builder()
//!     .prefix("demo")
//!     .field(Field::new("verbose").kind(Kind::Bool).description("say more"))
//!     .field(Field::new("port").kind(Kind::Int).required())
//!     .field(Field::new("inputs").item_kind(Kind::Str).default_receiver())
//!     .build()?;
//!
//! let Some(resolved) = resolve_os(&schema) else {
//!     std::process::exit(1); // usage already printed
//! };
//! ```
//!
//! That single call matches `--demo-port=8080` (or `-p 8080`), falls back to
//! `DEMO_PORT`, then to a `port` key in `.demorc`, then to
//! `[package.metadata.demo]` in `Cargo.toml`, converts what it finds into
//! typed values, and hands back the result — or prints usage and returns
//! `None` on the first problem.
//!
//! # Design: the schema is the source of truth
//!
//! Every field is declared exactly once, as a [`Field`] registered on a
//! [`Schema`]. The declaration carries the name, the type tag, requiredness,
//! the help text and any custom conversion; flag spellings, env keys, rc-file
//! keys and usage lines all derive from it. There is no separate parser
//! definition to keep in sync.
//!
//! Registration is also where every structural rule is enforced: duplicate
//! long or short names, a second positional default receiver, an opaque key
//! without a display name, or a collision with the built-in help trigger all
//! fail [`SchemaBuilder::build`] before any resolution can run. A schema
//! either exists completely or not at all.
//!
//! # Sources and precedence
//!
//! ```text
//! Manifest            [package.metadata.<key>] in Cargo.toml
//!        ↑ overridden by
//! Rc file             .<prefix>rc (JSON by default; parser pluggable)
//!        ↑ overridden by
//! Environment         <PREFIX>_<NAME>, NO_<PREFIX>_<NAME> for booleans
//!        ↑ overridden by
//! Arguments           --<prefix>-<name>, -<short>, --no-<prefix>-<name>
//! ```
//!
//! Every source is **sparse**: it only writes the fields it actually has
//! values for, and unwritten fields fall through to the next source down.
//! The ranking is yours to change — [`SchemaBuilder::resolution`] takes the
//! sources highest-first, and any subset works (`[Env, Arg]` makes the
//! environment outrank the command line; a plain schema with no multi-source
//! options reads arguments only).
//!
//! # Token grammar
//!
//! The argument reader understands `--name value`, `--name=value`,
//! `-s value`, `-s=value`, and `--no-name` for booleans. Boolean flags are
//! presence-based: `--verbose` alone means true, `--no-verbose` false, and
//! an explicit `=true`/`=false` converts (and is flipped under the negated
//! spelling). Array-typed fields accumulate — `--in a --in b` and
//! `--in a,b` build the same list. One field per schema may be the
//! [`default_receiver`](Field::default_receiver): it swallows bare tokens,
//! which is how positional arguments work. `-h`/`--help` anywhere stops
//! everything and shows usage.
//!
//! # Conversion
//!
//! Raw strings become typed [`Value`]s through a [`Converters`] table keyed
//! by [`Kind`]. The builtin table covers booleans (`true`/`1`), integers
//! (fractional input truncates), floats, dates (RFC 3339 or slash formats),
//! JSON literals, `/pattern/flags` regexes and comma-split arrays. A field
//! can override its conversion with [`Field::converter`]; a caller can pass
//! an extended table to [`resolve`]. The default table is immutable — custom
//! behavior is always an override, never a mutation someone else observes.
//!
//! Rc-file and manifest values skip string conversion entirely: those
//! sources already hold typed data, and what they hold is assigned as-is.
//!
//! # Failure reporting
//!
//! Construction-time problems are ordinary `Result`s ([`SchemaError`]).
//! Resolution-time problems — an unknown flag, a failed conversion, a
//! missing required field, an unreadable rc file — never escape as errors:
//! they are rendered into one human-readable message and handed to the
//! failure callback, exactly once, together with the script name and the
//! descriptor list for usage rendering. The library never exits the
//! process; [`print_usage`] writes to stderr and leaves the exit decision
//! to you.

pub mod error;

mod args;
mod convert;
mod env;
mod field;
mod file;
mod help;
mod kind;
mod manifest;
mod names;
mod resolve;
mod schema;
mod value;

#[cfg(test)]
mod fixtures;

pub use convert::{Converter, ConverterResolveFn, Converters};
pub use error::{ConvertError, ResolveError, SchemaError};
pub use field::{Field, FieldDescriptor, Key};
pub use file::{RcParser, json_parser, toml_parser};
pub use help::{print_usage, render_usage};
pub use kind::Kind;
pub use resolve::{Resolved, resolve, resolve_os};
pub use schema::{Schema, SchemaBuilder, Source};
pub use value::Value;
