// Byte order handling for little-endian disk files

/// Returns true when the host stores the most significant byte first.
pub fn is_big_endian_host() -> bool {
    let probe: u16 = 0x0001;
    probe.to_ne_bytes()[0] == 0
}

pub fn swap16(word: &mut u16) {
    *word = word.swap_bytes();
}

pub fn swap32(word: &mut u32) {
    *word = word.swap_bytes();
}

pub fn swap64(word: &mut u64) {
    *word = word.swap_bytes();
}

pub fn swap_float(word: &mut f32) {
    *word = f32::from_bits(word.to_bits().swap_bytes());
}

pub fn swap_double(word: &mut f64) {
    *word = f64::from_bits(word.to_bits().swap_bytes());
}

/// Per-handle decision on whether disk fields must be byte-swapped.
///
/// Files in scope are always little-endian, so the decision depends only on
/// the host. It is taken once when a store opens and applied to every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteOrderCodec {
    swap: bool,
}

impl ByteOrderCodec {
    pub fn little_endian_disk() -> Self {
        Self {
            swap: is_big_endian_host(),
        }
    }

    /// Codec with an explicit swap decision, used to exercise the foreign-order path.
    pub fn with_swap(swap: bool) -> Self {
        Self { swap }
    }

    pub fn swaps(&self) -> bool {
        self.swap
    }

    pub fn decode_f64(&self, bytes: [u8; 8]) -> f64 {
        let mut value = f64::from_ne_bytes(bytes);
        if self.swap {
            swap_double(&mut value);
        }
        value
    }

    pub fn encode_f64(&self, value: f64) -> [u8; 8] {
        let mut value = value;
        if self.swap {
            swap_double(&mut value);
        }
        value.to_ne_bytes()
    }

    /// Decode a buffer of consecutive 8-byte fields.
    pub fn decode_fields(&self, buf: &[u8]) -> Vec<f64> {
        buf.chunks_exact(8)
            .map(|chunk| {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(chunk);
                self.decode_f64(bytes)
            })
            .collect()
    }

    pub fn encode_fields(&self, fields: &[f64]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(fields.len() * 8);
        for value in fields {
            buf.extend_from_slice(&self.encode_f64(*value));
        }
        buf
    }
}
