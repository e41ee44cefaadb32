#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, to_binary, Addr, BankMsg, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response,
    StdResult, Uint128,
};
use cw2::set_contract_version;

use tranche::helpers::{assert_sent_asset_balance, asset_to_coin};
use tranche::types::VestingSchedule;
use tranche::vesting::{Config, ExecuteMsg, InstantiateMsg, QueryMsg};

use crate::error::ContractError;
use crate::query::{query_claimable, query_schedule, query_schedules, query_vested};
use crate::state::{
    append_schedule, load_schedule, load_schedules, CONFIG, OWNERSHIP_TRANSFER, SCHEDULES,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:vesting";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

//Constants
const SECONDS_IN_A_DAY: u64 = 86400u64;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let unlock_period = msg.unlock_period.unwrap_or(30 * SECONDS_IN_A_DAY);
    let allowed_durations = msg
        .allowed_durations
        .unwrap_or_else(|| vec![90 * SECONDS_IN_A_DAY, 180 * SECONDS_IN_A_DAY]);

    if unlock_period == 0 {
        return Err(ContractError::CustomError {
            val: String::from("Unlock period must be above zero"),
        });
    }
    if allowed_durations.is_empty() {
        return Err(ContractError::CustomError {
            val: String::from("Allowed durations can't be empty"),
        });
    }
    //Whole-period granularity, a duration that isn't a multiple of the unlock period would strand dust
    if allowed_durations
        .iter()
        .any(|duration| *duration == 0 || duration % unlock_period != 0)
    {
        return Err(ContractError::CustomError {
            val: String::from("Allowed durations must be non-zero multiples of the unlock period"),
        });
    }

    let mut config = Config {
        owner: info.sender,
        asset: None,
        allowed_durations,
        unlock_period,
    };

    //Set Optionals
    if let Some(address) = msg.owner {
        config.owner = deps.api.addr_validate(&address)?;
    };

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("config", format!("{:?}", config))
        .add_attribute("contract_address", env.contract.address))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SetAsset { denom } => set_asset(deps, info, denom),
        ExecuteMsg::CreateVesting {
            amount,
            duration_index,
        } => create_vesting(deps, env, info, amount, duration_index),
        ExecuteMsg::Claim { schedule_index } => claim(deps, env, info, schedule_index),
        ExecuteMsg::BatchCreateVesting {
            beneficiaries,
            amounts,
            duration_indexes,
        } => batch_create_vesting(deps, env, info, beneficiaries, amounts, duration_indexes),
        ExecuteMsg::UpdateConfig { owner } => update_config(deps, info, owner),
    }
}

/// Set the vested asset denom, one-time
fn set_asset(deps: DepsMut, info: MessageInfo, denom: String) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    //The asset is permanent once set, schedules created against it must stay redeemable in it
    if config.asset.is_some() {
        return Err(ContractError::AssetAlreadySet {});
    }
    if denom.is_empty() {
        return Err(ContractError::CustomError {
            val: String::from("Invalid asset denom"),
        });
    }

    config.asset = Some(denom.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "set_asset"),
        attr("asset", denom),
    ]))
}

/// Create a schedule for the sender, funded by the coins sent with the message
fn create_vesting(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    duration_index: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let denom = match config.asset {
        Some(denom) => denom,
        None => return Err(ContractError::AssetNotConfigured {}),
    };
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }
    let duration = match config.allowed_durations.get(duration_index as usize) {
        Some(duration) => *duration,
        None => return Err(ContractError::InvalidDurationIndex {}),
    };

    //A beneficiary's first schedule fixes their duration for life
    let schedules = load_schedules(deps.storage, info.sender.clone())?;
    if let Some(first) = schedules.first() {
        if first.duration != duration {
            return Err(ContractError::DurationMismatch {});
        }
    }

    //The deposit is the transfer-in leg, the exact allocation must be attached
    assert_sent_asset_balance(&denom, amount, &info)
        .map_err(|_| ContractError::TransferFailed {})?;

    let start_time = env.block.time.seconds();
    append_schedule(
        deps.storage,
        info.sender.clone(),
        VestingSchedule::new(amount, duration, start_time),
    )?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "create_vesting"),
        attr("beneficiary", info.sender),
        attr("amount", String::from(amount)),
        attr("start_time", start_time.to_string()),
    ]))
}

/// Withdraw the claimable portion of the sender's schedule
fn claim(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    schedule_index: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let denom = match config.asset {
        Some(denom) => denom,
        None => return Err(ContractError::AssetNotConfigured {}),
    };

    let schedule = load_schedule(deps.storage, info.sender.clone(), schedule_index)?;

    let (updated_schedule, claimed_amount) =
        apply_claim(schedule, config.unlock_period, env.block.time.seconds())?;

    //Commit the claim before the transfer msg so a reentrant claim computes against post-claim state
    let mut schedules = load_schedules(deps.storage, info.sender.clone())?;
    schedules[schedule_index as usize] = updated_schedule;
    SCHEDULES.save(deps.storage, info.sender.clone(), &schedules)?;

    let message = CosmosMsg::Bank(BankMsg::Send {
        to_address: info.sender.to_string(),
        amount: vec![asset_to_coin(denom, claimed_amount)],
    });

    Ok(Response::new().add_message(message).add_attributes(vec![
        attr("method", "claim"),
        attr("beneficiary", info.sender),
        attr("amount", String::from(claimed_amount)),
    ]))
}

/// Create schedules for a list of beneficiaries, all-or-nothing.
/// Beneficiaries with existing schedules keep their duration, the supplied index is ignored for them.
fn batch_create_vesting(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    beneficiaries: Vec<String>,
    amounts: Vec<Uint128>,
    duration_indexes: Vec<u64>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    let denom = match config.asset {
        Some(denom) => denom,
        None => return Err(ContractError::AssetNotConfigured {}),
    };
    if beneficiaries.len() != amounts.len() || amounts.len() != duration_indexes.len() {
        return Err(ContractError::ArrayLengthMismatch {});
    }

    //Attached funds must cover the whole batch
    let mut total_amount = Uint128::zero();
    for amount in amounts.clone() {
        total_amount = total_amount.checked_add(amount)?;
    }
    assert_sent_asset_balance(&denom, total_amount, &info)
        .map_err(|_| ContractError::TransferFailed {})?;

    let start_time = env.block.time.seconds();

    //Validate every entry before touching state, the batch is all-or-nothing
    let mut validated_entries: Vec<(Addr, Uint128, u64)> = vec![];
    for (i, beneficiary) in beneficiaries.iter().enumerate() {
        let valid_beneficiary = deps.api.addr_validate(beneficiary)?;

        if amounts[i].is_zero() {
            return Err(ContractError::InvalidAmount {});
        }
        let indexed_duration = match config.allowed_durations.get(duration_indexes[i] as usize) {
            Some(duration) => *duration,
            None => return Err(ContractError::InvalidDurationIndex {}),
        };

        //Existing duration wins over the supplied index, these are admin-driven
        //transfers-from-approval and the ledger keeps one duration per beneficiary.
        //Earlier entries in this batch count as existing for repeat beneficiaries.
        let duration = match validated_entries
            .iter()
            .find(|(entry_beneficiary, _, _)| *entry_beneficiary == valid_beneficiary)
        {
            Some((_, _, entry_duration)) => *entry_duration,
            None => match load_schedules(deps.storage, valid_beneficiary.clone())?.first() {
                Some(first) => first.duration,
                None => indexed_duration,
            },
        };

        validated_entries.push((valid_beneficiary, amounts[i], duration));
    }

    for (valid_beneficiary, amount, duration) in validated_entries {
        append_schedule(
            deps.storage,
            valid_beneficiary,
            VestingSchedule::new(amount, duration, start_time),
        )?;
    }

    Ok(Response::new().add_attributes(vec![
        attr("method", "batch_create_vesting"),
        attr("beneficiaries", format!("{:?}", beneficiaries)),
        attr("amounts", format!("{:?}", amounts)),
    ]))
}

/// Update contract configuration
fn update_config(
    deps: DepsMut,
    info: MessageInfo,
    owner: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    //Assert Authority
    if info.sender != config.owner {
        //Check if ownership transfer is in progress & transfer if so
        match OWNERSHIP_TRANSFER.may_load(deps.storage)? {
            Some(pending_owner) if info.sender == pending_owner => config.owner = info.sender,
            _ => return Err(ContractError::Unauthorized {}),
        }
    }

    let mut attrs = vec![attr("method", "update_config")];

    if let Some(owner) = owner {
        let valid_addr = deps.api.addr_validate(&owner)?;

        //Set owner transfer state
        OWNERSHIP_TRANSFER.save(deps.storage, &valid_addr)?;
        attrs.push(attr("owner_transfer", valid_addr));
    };

    CONFIG.save(deps.storage, &config)?;
    attrs.push(attr("updated_config", format!("{:?}", config)));

    Ok(Response::new().add_attributes(attrs))
}

/// Cumulative unlocked portion of a schedule's allocation at the given block time.
/// Unlocks linearly in whole unlock periods, rounding down, any rounding dust
/// flushes with the final period where the full allocation unlocks.
pub fn vested_amount(
    schedule: &VestingSchedule,
    unlock_period: u64,
    current_block_time: u64, //in seconds
) -> Uint128 {
    if !schedule.active {
        return Uint128::zero();
    }

    let periods_passed = current_block_time.saturating_sub(schedule.start_time) / unlock_period;
    //Non-zero, allowed durations are validated as multiples of the unlock period
    let total_periods = schedule.duration / unlock_period;

    if periods_passed >= total_periods {
        schedule.total_allocation
    } else {
        schedule
            .total_allocation
            .multiply_ratio(periods_passed, total_periods)
    }
}

/// Vested minus already claimed. Claimed can never outrun vested, a negative
/// difference is a ledger defect and errors instead of reporting zero.
pub fn claimable_amount(
    schedule: &VestingSchedule,
    unlock_period: u64,
    current_block_time: u64,
) -> Result<Uint128, ContractError> {
    if !schedule.active {
        return Ok(Uint128::zero());
    }

    vested_amount(schedule, unlock_period, current_block_time)
        .checked_sub(schedule.claimed_amount)
        .map_err(|_| ContractError::AccountingInvariantViolation {})
}

/// Claim everything claimable on a schedule, deactivating it once fully claimed
pub fn apply_claim(
    mut schedule: VestingSchedule,
    unlock_period: u64,
    current_block_time: u64,
) -> Result<(VestingSchedule, Uint128), ContractError> {
    if !schedule.active {
        return Err(ContractError::InactiveSchedule {});
    }

    let claimable = claimable_amount(&schedule, unlock_period, current_block_time)?;
    if claimable.is_zero() {
        return Err(ContractError::NothingToClaim {});
    }

    schedule.claimed_amount += claimable;
    if schedule.claimed_amount == schedule.total_allocation {
        schedule.active = false;
    }

    Ok((schedule, claimable))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::VestedAmount {
            beneficiary,
            schedule_index,
        } => to_binary(&query_vested(deps, env, beneficiary, schedule_index)?),
        QueryMsg::ClaimableAmount {
            beneficiary,
            schedule_index,
        } => to_binary(&query_claimable(deps, env, beneficiary, schedule_index)?),
        QueryMsg::Schedule {
            beneficiary,
            schedule_index,
        } => to_binary(&query_schedule(deps, beneficiary, schedule_index)?),
        QueryMsg::Schedules { beneficiary } => to_binary(&query_schedules(deps, beneficiary)?),
    }
}
