//! Short, URL-safe, random-looking unique identifiers
//!
//! ```rust
//! let id = acuid::unique();
//! println!("{id}"); // e.g., "rk5zzm2zkmt5djecxwj4"
//!
//! let id = acuid::unique_with(&acuid::Config {
//!     alphabet: acuid::Alphabet::Mixed,
//!     ..Default::default()
//! });
//! println!("{id}"); // e.g., "KaGFYkoJhPs3eNx9"
//! ```
//!
//! Identifiers are minted without coordination by any number of hosts and processes. They are not
//! sortable, carry no visible pattern, and stay short: 20 characters from `[a-z2-9]` (without `l`
//! and `o`) by default, or 16 characters from the URL-safe base64 alphabet.
//!
//! # Construction
//!
//! Every identifier packs four fields into 96 bits:
//!
//! ```text
//! +----------------+----------------+--------+--------+
//! |   mark (32)    |   host (32)    | pid(16)| seq(16)|
//! +----------------+----------------+--------+--------+
//! ```
//!
//! Where:
//!
//! - The `mark` is the Unix time in seconds. With a 16-bit host identity (see [`HostSetting`])
//!   it is measured in 1/65536 seconds instead and its low 16 bits take the high half of the
//!   `host` field.
//! - The `host` field holds the IPv4 address of the host, or a configured value.
//! - The `pid` field holds the low 16 bits of the process ID, or a configured value.
//! - The `seq` field is a counter that restarts at zero every time the mark advances.
//!
//! The 96 bits then pass through a keyless two-round Feistel network ([`scramble`]) so that
//! consecutive identifiers share no visible prefix, and are encoded as text. A requested length
//! beyond the 96 bits is filled with cryptographically strong random bytes.
//!
//! When more than 65,536 identifiers are generated within one mark, the counter spills into extra
//! 16-bit words appended to the identifier, which grows by four characters (three in the mixed-case
//! alphabet) per word. The scrambling is not encryption: identifiers are hard to guess only to the
//! extent that they carry random padding, and must not be used as secrets.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod buffer;
mod config;
mod encode;
mod error;
pub mod generator;
mod host;
mod pack;
mod scramble;
mod sequence;

pub use config::{Config, HostSetting};
pub use encode::Alphabet;
pub use error::{Error, Result};
#[doc(inline)]
pub use generator::{Generator, RandSource, StdSystemTime, TimeSource};
pub use host::check_addr;
pub use pack::HostMode;
pub use scramble::scramble;
pub use sequence::{SeqWords, Sequence};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{try_unique, try_unique_with, unique, unique_with};
