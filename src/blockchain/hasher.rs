use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

use super::Block;
use crate::transaction::Transaction;

/// SHA-256 digest of a block's canonical bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BlockHash([u8; 32]);

impl BlockHash {
    /// Lowercase hex, 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for BlockHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Borrowed view of the hashed fields. Field order here is the wire order.
#[derive(Serialize)]
struct CanonicalBlock<'a> {
    timestamp: i64,
    nonce: u64,
    previous_hash: &'a BlockHash,
    transactions: &'a [Transaction],
}

fn canonical_json(
    timestamp: i64,
    nonce: u64,
    previous_hash: &BlockHash,
    transactions: &[Transaction],
) -> Vec<u8> {
    let view = CanonicalBlock {
        timestamp,
        nonce,
        previous_hash,
        transactions,
    };
    // Strings, integers and floats only: serde_json cannot fail here.
    serde_json::to_vec(&view).expect("canonical block serialization failed")
}

/// Canonical bytes of a block: JSON `{timestamp, nonce, previous_hash, transactions}`.
pub fn canonical_bytes(block: &Block) -> Vec<u8> {
    canonical_json(
        block.timestamp,
        block.nonce,
        &block.previous_hash,
        &block.transactions,
    )
}

/// Hash the block fields without assembling an owned `Block`.
pub fn hash_parts(
    timestamp: i64,
    nonce: u64,
    previous_hash: &BlockHash,
    transactions: &[Transaction],
) -> BlockHash {
    sha256(&canonical_json(timestamp, nonce, previous_hash, transactions))
}

pub fn hash_block(block: &Block) -> BlockHash {
    sha256(&canonical_bytes(block))
}

fn sha256(bytes: &[u8]) -> BlockHash {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[..]);
    BlockHash(out)
}

/// True when the hex digest starts with `difficulty` '0' characters.
pub fn meets_difficulty(hash: &BlockHash, difficulty: u32) -> bool {
    let hex = hash.to_hex();
    let difficulty = difficulty as usize;
    hex.len() >= difficulty && hex.bytes().take(difficulty).all(|c| c == b'0')
}
