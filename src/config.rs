//! Generator configuration.

use crate::{check_addr, host::default_pid, Alphabet, HostMode, Result};

/// Configures a [`Generator`](crate::Generator).
///
/// All fields have defaults, so a configuration usually names only what it changes:
///
/// ```rust
/// use acuid::{Alphabet, Config, HostSetting};
///
/// let config = Config {
///     alphabet: Alphabet::Mixed,
///     host: HostSetting::Narrow(0x2a),
///     ..Default::default()
/// };
/// assert_eq!(config.length, 0);
/// assert_eq!(config.pid, None);
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// The character set of identifiers.
    pub alphabet: Alphabet,

    /// The minimum identifier length in characters.
    ///
    /// Lengths below the alphabet's [`min_chars`](Alphabet::min_chars) are raised to it. Longer
    /// identifiers are extended with random bytes.
    pub length: usize,

    /// The host identity and, through it, the mark resolution.
    pub host: HostSetting,

    /// The process identity; the low 16 bits of the operating system process id when `None`.
    pub pid: Option<u16>,
}

impl Config {
    pub(crate) fn resolve_pid(&self) -> u16 {
        self.pid.unwrap_or_else(default_pid)
    }
}

/// Selects the host identity packed into identifiers.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HostSetting {
    /// The 32-bit address of this host (see [`check_addr`]) with whole-second marks.
    #[default]
    Default,

    /// An explicit 32-bit value unique to this host, with whole-second marks.
    Wide(u32),

    /// An explicit 16-bit value unique to this host.
    ///
    /// The 16 bits freed from the host field go to the time field, so marks tick every 1/65536
    /// of a second and far more identifiers fit before the sequence grows past one word.
    Narrow(u16),

    /// The low 16 bits of this host's address, as with [`Narrow`](Self::Narrow).
    NarrowDefault,
}

impl HostSetting {
    /// Returns true if this setting selects 1/65536-second marks.
    pub const fn is_narrow(self) -> bool {
        matches!(self, Self::Narrow(_) | Self::NarrowDefault)
    }

    pub(crate) fn resolve(self) -> Result<HostMode> {
        Ok(match self {
            Self::Default => HostMode::Wide(check_addr()?),
            Self::Wide(host) => HostMode::Wide(host),
            Self::Narrow(host) => HostMode::Narrow(host),
            Self::NarrowDefault => HostMode::Narrow(check_addr()? as u16),
        })
    }
}


#[cfg(feature = "serde")]
#[cfg(test)]
mod tests_serde {
    use super::{Config, HostSetting};
    use crate::Alphabet;
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    /// Serializes and deserializes every field
    #[test]
    fn serializes_and_deserializes_every_field() {
        let config = Config {
            alphabet: Alphabet::Mixed,
            length: 30,
            host: HostSetting::Narrow(7),
            pid: Some(9),
        };
        assert_tokens(
            &config,
            &[
                Token::Struct {
                    name: "Config",
                    len: 4,
                },
                Token::Str("alphabet"),
                Token::UnitVariant {
                    name: "Alphabet",
                    variant: "mixed",
                },
                Token::Str("length"),
                Token::U64(30),
                Token::Str("host"),
                Token::NewtypeVariant {
                    name: "HostSetting",
                    variant: "narrow",
                },
                Token::U16(7),
                Token::Str("pid"),
                Token::Some,
                Token::U16(9),
                Token::StructEnd,
            ],
        );
    }

    /// Takes defaults for missing fields
    #[test]
    fn takes_defaults_for_missing_fields() {
        let config = Config {
            alphabet: Alphabet::Mixed,
            ..Default::default()
        };
        assert_de_tokens(
            &config,
            &[
                Token::Struct {
                    name: "Config",
                    len: 1,
                },
                Token::Str("alphabet"),
                Token::UnitVariant {
                    name: "Alphabet",
                    variant: "mixed",
                },
                Token::StructEnd,
            ],
        );
    }
}
