use std::fmt::Display;
use std::str::FromStr;

use crate::error::TranscodeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Codec {
    AV1,
    H264,
    HEVC,
}

impl Codec {
    pub const ALL: [Codec; 3] = [Codec::AV1, Codec::H264, Codec::HEVC];

    pub fn name(&self) -> &'static str {
        match self {
            Codec::AV1 => "av1",
            Codec::H264 => "h264",
            Codec::HEVC => "hevc",
        }
    }

    /// Comma separated list of every accepted codec name.
    pub fn names() -> String {
        Codec::ALL.iter().map(|c| c.name()).collect::<Vec<&str>>().join(", ")
    }
}

impl FromStr for Codec {
    type Err = TranscodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Codec::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| TranscodeError::InvalidCodec(String::from(s)))
    }
}

impl Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
