use super::query_parser::{MAX_TIME_MINUTES, MIN_TIME_MINUTES};

pub const BUCKET_STEP: u32 = 5;

/// Rounds to the nearest multiple of 5, halves rounding up.
fn round_to_step(minutes: u32) -> u32 {
    (minutes.saturating_add(BUCKET_STEP / 2) / BUCKET_STEP) * BUCKET_STEP
}

/// Ceilings to try, nearest first, widening outwards: the rounded target, then
/// target+5, target-5, target+10, target-10 and so on, all within [5, 60].
pub fn build_buckets(target_minutes: u32) -> Vec<u32> {
    let first = round_to_step(target_minutes).clamp(MIN_TIME_MINUTES, MAX_TIME_MINUTES);
    let mut buckets = vec![first];

    let mut offset = BUCKET_STEP;
    loop {
        let higher = first + offset;
        let lower = first.checked_sub(offset).filter(|m| *m >= MIN_TIME_MINUTES);
        let higher_fits = higher <= MAX_TIME_MINUTES;

        if !higher_fits && lower.is_none() {
            break;
        }
        if higher_fits {
            buckets.push(higher);
        }
        if let Some(lower) = lower {
            buckets.push(lower);
        }
        offset += BUCKET_STEP;
    }

    let mut seen = Vec::with_capacity(buckets.len());
    buckets.retain(|bucket| {
        if seen.contains(bucket) {
            false
        } else {
            seen.push(*bucket);
            true
        }
    });
    buckets
}
