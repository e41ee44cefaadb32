use tranche::types::VestingSchedule;
use tranche::vesting::Config;

use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;

pub const CONFIG: Item<Config> = Item::new("config");
pub const SCHEDULES: Map<Addr, Vec<VestingSchedule>> = Map::new("schedules"); //beneficiary, append-only list in creation order
pub const OWNERSHIP_TRANSFER: Item<Addr> = Item::new("ownership_transfer");

/// Returns a beneficiary's schedules in creation order, empty if none yet
pub fn load_schedules(storage: &dyn Storage, beneficiary: Addr) -> StdResult<Vec<VestingSchedule>> {
    Ok(SCHEDULES.may_load(storage, beneficiary)?.unwrap_or_default())
}

/// Returns the schedule at the given creation index
pub fn load_schedule(
    storage: &dyn Storage,
    beneficiary: Addr,
    schedule_index: u64,
) -> Result<VestingSchedule, ContractError> {
    let schedules = load_schedules(storage, beneficiary)?;

    match schedules.into_iter().nth(schedule_index as usize) {
        Some(schedule) => Ok(schedule),
        None => Err(ContractError::IndexOutOfRange {}),
    }
}

/// Appends a schedule to a beneficiary's list.
/// The first schedule fixes the beneficiary's duration for life, later appends must match it.
pub fn append_schedule(
    storage: &mut dyn Storage,
    beneficiary: Addr,
    schedule: VestingSchedule,
) -> Result<(), ContractError> {
    SCHEDULES.update(
        storage,
        beneficiary,
        |schedules: Option<Vec<VestingSchedule>>| -> Result<Vec<VestingSchedule>, ContractError> {
            let mut schedules = schedules.unwrap_or_default();

            if let Some(first) = schedules.first() {
                if first.duration != schedule.duration {
                    return Err(ContractError::DurationMismatch {});
                }
            }
            schedules.push(schedule);

            Ok(schedules)
        },
    )?;

    Ok(())
}
