use crate::error::MessageError;
use std::fmt;

/// Integer identifier carried by a watermark, read from its bits in big-endian order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

impl MessageId {
    pub fn from_bits(bits: &[u8]) -> Result<Self, MessageError> {
        if bits.is_empty() {
            return Err(MessageError::Empty);
        }
        if bits.len() > 64 {
            return Err(MessageError::TooLong(bits.len()));
        }

        let mut value = 0u64;
        for (position, &bit) in bits.iter().enumerate() {
            if bit > 1 {
                return Err(MessageError::InvalidBit {
                    position,
                    value: bit,
                });
            }
            value = (value << 1) | u64::from(bit);
        }
        Ok(Self(value))
    }

    /// Parse a string of `0`/`1` characters.
    pub fn from_bit_str(s: &str) -> Result<Self, MessageError> {
        let bits: Vec<u8> = s
            .bytes()
            .enumerate()
            .map(|(position, c)| match c {
                b'0' => Ok(0),
                b'1' => Ok(1),
                other => Err(MessageError::InvalidBit {
                    position,
                    value: other,
                }),
            })
            .collect::<Result<_, _>>()?;
        Self::from_bits(&bits)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
