//! Binary codec for sharing a whole tournament.
//!
//! [`encode`] packs configuration, roster and match history into a compact
//! versioned byte string, and [`encode_to_text`] turns that into a URL-safe
//! token. Decoding reverses both stages and either returns a valid record or
//! fails; it never returns a partial one.
//!
//! ```
//! use doubles_draw::codec::{decode_from_text, encode_to_text};
//! use doubles_draw::tournament::{Tournament, TournamentSettings};
//!
//! let mut rng = rand::rng();
//! let players = ["Ana", "Ben", "Cleo", "Dev"];
//! let t = Tournament::new(None, TournamentSettings::default(), &players, &mut rng).unwrap();
//! let token = encode_to_text(&t).unwrap();
//! assert_eq!(decode_from_text(&token).unwrap(), t);
//! ```

pub mod binary;
pub mod bitio;
pub mod errors;
pub mod text;
pub mod version;

pub use binary::{MAX_ENCODED_MATCHES, decode, encode};
pub use errors::{CodecError, CodecResult};
pub use text::{decode_from_text, encode_to_text};
pub use version::FormatVersion;
