use serde::Serialize;

/// Percentage of every income credited to the spending pool; the rest is saved.
pub const SPENDING_SHARE_PERCENT: u64 = 30;

/// The division of one income amount between the two pools.
///
/// `spending + savings == amount` for every amount; the spending share is
/// rounded half-up and savings takes the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocationSplit {
    pub amount: u64,
    pub spending: u64,
    pub savings: u64,
}

impl AllocationSplit {
    pub fn of(amount: u64) -> Self {
        let spending = spending_share(amount);
        Self {
            amount,
            spending,
            savings: amount - spending,
        }
    }
}

fn spending_share(amount: u64) -> u64 {
    let scaled = u128::from(amount) * u128::from(SPENDING_SHARE_PERCENT);
    // Never exceeds `amount`, so the narrowing is lossless.
    ((scaled + 50) / 100) as u64
}
