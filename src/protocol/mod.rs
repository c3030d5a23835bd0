//! Radio command protocol.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     Protocol Stack                         │
//! │                                                            │
//! │  ┌───────────┐   ┌──────────┐   ┌─────────────────────┐    │
//! │  │ Transport │──▶│  Codec   │──▶│  Parser             │    │
//! │  │ (trait)   │   │ (lines)  │   │  → RelayController  │    │
//! │  └───────────┘   └──────────┘   └─────────────────────┘    │
//! │       ▲                                    │               │
//! │       │            status line             │               │
//! │       └────────────────────────────────────┘               │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Message             | Meaning                                   |
//! |---------------------|-------------------------------------------|
//! | `G.`                | report status                             |
//! | `S.<i>.1.<ms>.`     | relay `i` ON for `ms` (clamped to max)    |
//! | `S.<i>.0.`          | relay `i` OFF                             |
//!
//! Replies are the status line, one `0`/`1` per relay.

pub mod codec;
pub mod link;
pub mod parser;
pub mod transport;
