//! Record id generation.
//!
//! # Invariants
//! - Ids have the form `<prefix>_<time><suffix>` where `time` is epoch
//!   milliseconds in base36 and `suffix` is eight random base36 characters.
//! - Two ids can only collide when minted in the same millisecond with equal
//!   random suffixes (one in 36^8 per pair). Saves additionally check
//!   the target collection and redraw on a clash.

use crate::model::collection::Collection;
use chrono::Utc;
use uuid::Uuid;

const SUFFIX_LEN: usize = 8;
const SUFFIX_SPACE: u128 = 36u128.pow(SUFFIX_LEN as u32);
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const MAX_REDRAWS: usize = 16;

/// Mints record ids from wall-clock time plus randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator;

impl IdGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Returns a fresh id for `prefix`, e.g. `m_mgq3x1k0a9f2kq7z`.
    pub fn new_id(&self, prefix: &str) -> String {
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let random = Uuid::new_v4().as_u128() % SUFFIX_SPACE;
        format!(
            "{prefix}_{}{:0>width$}",
            to_base36(u128::from(millis)),
            to_base36(random),
            width = SUFFIX_LEN
        )
    }

    /// Returns an id for a new record of `C` not present in `existing`.
    pub fn new_record_id<C: Collection>(&self, existing: &[C]) -> String {
        let prefix = C::KEY.id_prefix();
        let mut candidate = self.new_id(prefix);
        for _ in 0..MAX_REDRAWS {
            if !existing.iter().any(|record| record.id() == candidate) {
                break;
            }
            log::warn!(
                "event=id_collision module=id status=retry collection={}",
                C::KEY
            );
            candidate = self.new_id(prefix);
        }
        candidate
    }
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
