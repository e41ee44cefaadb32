use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, Uint128};

use crate::types::VestingSchedule;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct InstantiateMsg {
    pub owner: Option<String>,
    ///In seconds, each must be a non-zero multiple of unlock_period. Defaults to [90 days, 180 days].
    pub allowed_durations: Option<Vec<u64>>,
    ///In seconds, granularity of gradual unlocks. Defaults to 30 days.
    pub unlock_period: Option<u64>,
}

//Schedules can't be removed or reordered, the store is a permanent audit record.
//To change the asset or the duration list you need to upgrade the contract.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    ///Set the vested asset denom, owner only. One-time, fails once set.
    SetAsset {
        denom: String,
    },
    ///Create a schedule for the sender, funded by the attached coins.
    CreateVesting {
        amount: Uint128,
        duration_index: u64,
    },
    ///Withdraw the claimable portion of the sender's schedule.
    Claim {
        schedule_index: u64,
    },
    ///Create schedules for a list of beneficiaries, owner only.
    ///If a beneficiary already has schedules their existing duration is reused
    ///and the supplied duration_index is ignored, unlike CreateVesting which errors.
    BatchCreateVesting {
        beneficiaries: Vec<String>,
        amounts: Vec<Uint128>,
        duration_indexes: Vec<u64>,
    },
    UpdateConfig {
        owner: Option<String>,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    Config {},
    VestedAmount {
        beneficiary: String,
        schedule_index: u64,
    },
    ClaimableAmount {
        beneficiary: String,
        schedule_index: u64,
    },
    Schedule {
        beneficiary: String,
        schedule_index: u64,
    },
    Schedules {
        beneficiary: String,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct Config {
    pub owner: Addr,
    ///Native denom being vested, None until SetAsset
    pub asset: Option<String>,
    pub allowed_durations: Vec<u64>,
    pub unlock_period: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct VestedResponse {
    pub vested_amount: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct ClaimableResponse {
    pub claimable_amount: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct ScheduleResponse {
    pub schedule_index: u64,
    pub total_allocation: Uint128,
    pub claimed_amount: Uint128,
    pub duration: u64,
    pub start_time: u64,
    pub active: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct SchedulesResponse {
    pub beneficiary: String,
    pub schedules: Vec<VestingSchedule>,
}

impl SchedulesResponse {
    pub fn get_total_vesting(&self) -> Uint128 {
        let mut total_vesting = Uint128::zero();

        for schedule in self.clone().schedules {
            total_vesting += schedule.remaining();
        }

        total_vesting
    }
}
