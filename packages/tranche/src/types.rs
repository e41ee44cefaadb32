use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::Uint128;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct VestingSchedule {
    pub total_allocation: Uint128,
    pub claimed_amount: Uint128,
    pub duration: u64,   //In seconds, shared by every schedule of a beneficiary
    pub start_time: u64, //Block time of creation in seconds
    pub active: bool,
}

impl VestingSchedule {
    pub fn new(total_allocation: Uint128, duration: u64, start_time: u64) -> Self {
        VestingSchedule {
            total_allocation,
            claimed_amount: Uint128::zero(),
            duration,
            start_time,
            active: true,
        }
    }

    /// Remaining unclaimed portion of the allocation
    pub fn remaining(&self) -> Uint128 {
        self.total_allocation - self.claimed_amount
    }
}
