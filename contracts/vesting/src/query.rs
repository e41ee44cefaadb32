use cosmwasm_std::{Deps, Env, StdError, StdResult};
use tranche::types::VestingSchedule;
use tranche::vesting::{ClaimableResponse, ScheduleResponse, SchedulesResponse, VestedResponse};

use crate::{
    contract::{claimable_amount, vested_amount},
    state::{load_schedules, CONFIG},
};

fn find_schedule(deps: Deps, beneficiary: String, schedule_index: u64) -> StdResult<VestingSchedule> {
    let valid_beneficiary = deps.api.addr_validate(&beneficiary)?;

    match load_schedules(deps.storage, valid_beneficiary)?
        .into_iter()
        .nth(schedule_index as usize)
    {
        Some(schedule) => Ok(schedule),
        None => Err(StdError::GenericErr {
            msg: String::from("Schedule index is out of range"),
        }),
    }
}

/// Returns the vested amount of a beneficiary's schedule at the current block time
pub fn query_vested(
    deps: Deps,
    env: Env,
    beneficiary: String,
    schedule_index: u64,
) -> StdResult<VestedResponse> {
    let config = CONFIG.load(deps.storage)?;
    let schedule = find_schedule(deps, beneficiary, schedule_index)?;

    Ok(VestedResponse {
        vested_amount: vested_amount(&schedule, config.unlock_period, env.block.time.seconds()),
    })
}

///Returns the amount of tokens a beneficiary can currently claim from a schedule
pub fn query_claimable(
    deps: Deps,
    env: Env,
    beneficiary: String,
    schedule_index: u64,
) -> StdResult<ClaimableResponse> {
    let config = CONFIG.load(deps.storage)?;
    let schedule = find_schedule(deps, beneficiary, schedule_index)?;

    let claimable_amount =
        claimable_amount(&schedule, config.unlock_period, env.block.time.seconds())
            .map_err(|err| StdError::generic_err(err.to_string()))?;

    Ok(ClaimableResponse { claimable_amount })
}

/// Returns the details of a beneficiary's schedule
pub fn query_schedule(
    deps: Deps,
    beneficiary: String,
    schedule_index: u64,
) -> StdResult<ScheduleResponse> {
    let schedule = find_schedule(deps, beneficiary, schedule_index)?;

    Ok(ScheduleResponse {
        schedule_index,
        total_allocation: schedule.total_allocation,
        claimed_amount: schedule.claimed_amount,
        duration: schedule.duration,
        start_time: schedule.start_time,
        active: schedule.active,
    })
}

/// Returns the full ordered schedule list of a beneficiary
pub fn query_schedules(deps: Deps, beneficiary: String) -> StdResult<SchedulesResponse> {
    let valid_beneficiary = deps.api.addr_validate(&beneficiary)?;
    let schedules = load_schedules(deps.storage, valid_beneficiary)?;

    Ok(SchedulesResponse {
        beneficiary,
        schedules,
    })
}
