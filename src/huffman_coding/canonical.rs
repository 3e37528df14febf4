//! Canonical code assignment from a code length table.
//!
//! Codes of equal length are consecutive integers, assigned in ascending
//! (length, symbol) order; every time the length steps up, the running code
//! shifts left by the difference. Because the assignment depends on nothing
//! but the lengths, the decoder rebuilds the exact encode-side table from
//! the 256 length bytes stored in the container.

use rustc_hash::FxHashMap;

/// Canonical code table: for each byte value, the assigned code aligned to
/// the least significant bit, and its bit length. Length zero means the
/// symbol never occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [(u64, u8); 256],
}

impl CodeTable {
    /// Code and bit length for one symbol.
    pub fn get(&self, symbol: u8) -> (u64, u8) {
        self.codes[symbol as usize]
    }

    /// Longest assigned code, in bits. Zero for an empty table.
    pub fn max_length(&self) -> u8 {
        self.codes.iter().map(|&(_, len)| len).max().unwrap_or(0)
    }
}

/// Assign canonical codes to every symbol with a non-zero length.
pub fn canonical_codes(lengths: &[u8; 256]) -> CodeTable {
    let mut index: Vec<(u8, u16)> = lengths
        .iter()
        .enumerate()
        .filter(|(_, &len)| len > 0)
        .map(|(sym, &len)| (len, sym as u16))
        .collect();
    index.sort_unstable();

    let mut codes = [(0_u64, 0_u8); 256];
    if let Some(&(first_length, _)) = index.first() {
        let mut code = 0_u64;
        let mut prev = first_length;
        for (len, sym) in index {
            // Shift in the extra trailing bits when the length steps up.
            if len != prev {
                code <<= len - prev;
                prev = len;
            }
            codes[sym as usize] = (code, len);
            code += 1;
        }
    }
    CodeTable { codes }
}

/// Reverse lookup from (code, length) to symbol, for the decode side.
pub fn decode_map(lengths: &[u8; 256]) -> FxHashMap<(u64, u8), u8> {
    let table = canonical_codes(lengths);
    let mut map = FxHashMap::default();
    for sym in 0..=255_u8 {
        let (code, len) = table.get(sym);
        if len > 0 {
            map.insert((code, len), sym);
        }
    }
    map
}
