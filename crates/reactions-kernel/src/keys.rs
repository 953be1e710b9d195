//! Byte layout of every key the reactions keeper writes.
//!
//! Each key starts with a one-byte [`KeyFamily`] discriminator followed by fixed-width
//! big-endian ids (8 bytes for subspace and post ids, 4 bytes for local ids). Fixed widths keep
//! numeric and byte order aligned, so a prefix scan over a scope returns its records sorted by
//! id and never picks up entries of a sibling scope.

pub const SUBSPACE_ID_LEN: usize = 8;
pub const POST_ID_LEN: usize = 8;
pub const LOCAL_ID_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum KeyFamily {
    NextRegisteredReactionId = 0x01,
    RegisteredReaction = 0x02,
    NextReactionId = 0x03,
    Reaction = 0x04,
    ReactionsParams = 0x05,
    SchemaVersion = 0x06,
}

impl KeyFamily {
    pub const ALL: [KeyFamily; 6] = [
        KeyFamily::NextRegisteredReactionId,
        KeyFamily::RegisteredReaction,
        KeyFamily::NextReactionId,
        KeyFamily::Reaction,
        KeyFamily::ReactionsParams,
        KeyFamily::SchemaVersion,
    ];

    pub const fn byte(self) -> u8 {
        self as u8
    }

    pub fn prefix(self) -> Vec<u8> {
        vec![self.byte()]
    }
}

fn key(family: KeyFamily, capacity: usize) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + capacity);
    key.push(family.byte());
    key
}

fn subspace_key(family: KeyFamily, subspace_id: u64) -> Vec<u8> {
    let mut key = key(family, SUBSPACE_ID_LEN + POST_ID_LEN + LOCAL_ID_LEN);
    key.extend_from_slice(&subspace_id.to_be_bytes());
    key
}

fn post_key(family: KeyFamily, subspace_id: u64, post_id: u64) -> Vec<u8> {
    let mut key = subspace_key(family, subspace_id);
    key.extend_from_slice(&post_id.to_be_bytes());
    key
}

pub fn next_registered_reaction_id_key(subspace_id: u64) -> Vec<u8> {
    subspace_key(KeyFamily::NextRegisteredReactionId, subspace_id)
}

pub fn registered_reactions_prefix(subspace_id: u64) -> Vec<u8> {
    subspace_key(KeyFamily::RegisteredReaction, subspace_id)
}

pub fn registered_reaction_key(subspace_id: u64, registered_reaction_id: u32) -> Vec<u8> {
    let mut key = registered_reactions_prefix(subspace_id);
    key.extend_from_slice(&registered_reaction_id.to_be_bytes());
    key
}

pub fn next_reaction_id_key(subspace_id: u64, post_id: u64) -> Vec<u8> {
    post_key(KeyFamily::NextReactionId, subspace_id, post_id)
}

pub fn subspace_reactions_prefix(subspace_id: u64) -> Vec<u8> {
    subspace_key(KeyFamily::Reaction, subspace_id)
}

pub fn post_reactions_prefix(subspace_id: u64, post_id: u64) -> Vec<u8> {
    post_key(KeyFamily::Reaction, subspace_id, post_id)
}

pub fn reaction_key(subspace_id: u64, post_id: u64, reaction_id: u32) -> Vec<u8> {
    let mut key = post_reactions_prefix(subspace_id, post_id);
    key.extend_from_slice(&reaction_id.to_be_bytes());
    key
}

pub fn reactions_params_key(subspace_id: u64) -> Vec<u8> {
    subspace_key(KeyFamily::ReactionsParams, subspace_id)
}

pub fn schema_version_key() -> Vec<u8> {
    KeyFamily::SchemaVersion.prefix()
}

/// Decode a stored 4-byte counter or local id.
///
/// Panics on any other length: every such value is written by this module, so a different
/// width means the store is corrupted.
pub fn u32_from_bytes(bytes: &[u8]) -> u32 {
    let Ok(raw) = <[u8; LOCAL_ID_LEN]>::try_from(bytes) else {
        panic!("malformed u32 value: expected {LOCAL_ID_LEN} bytes, got {}", bytes.len());
    };
    u32::from_be_bytes(raw)
}

pub fn u64_from_bytes(bytes: &[u8]) -> u64 {
    let Ok(raw) = <[u8; SUBSPACE_ID_LEN]>::try_from(bytes) else {
        panic!("malformed u64 value: expected {SUBSPACE_ID_LEN} bytes, got {}", bytes.len());
    };
    u64::from_be_bytes(raw)
}

/// Split a reaction key back into `(subspace_id, post_id, reaction_id)`.
pub fn parse_reaction_key(key: &[u8]) -> (u64, u64, u32) {
    assert_eq!(
        key.len(),
        1 + SUBSPACE_ID_LEN + POST_ID_LEN + LOCAL_ID_LEN,
        "malformed reaction key"
    );
    assert_eq!(key[0], KeyFamily::Reaction.byte(), "not a reaction key");
    let (subspace, rest) = key[1..].split_at(SUBSPACE_ID_LEN);
    let (post, id) = rest.split_at(POST_ID_LEN);
    (u64_from_bytes(subspace), u64_from_bytes(post), u32_from_bytes(id))
}
