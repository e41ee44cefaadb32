use cosmwasm_std::{Coin, MessageInfo, StdError, StdResult, Uint128};

/// Asserts that the exact required amount of the given denom was sent with the message.
/// Refactored Terraswap function.
pub fn assert_sent_asset_balance(
    denom: &str,
    required: Uint128,
    message_info: &MessageInfo,
) -> StdResult<()> {
    match message_info.funds.iter().find(|coin| coin.denom == denom) {
        Some(coin) => {
            if coin.amount != required {
                return Err(StdError::generic_err(
                    "Sent asset amount and required amount differ",
                ));
            }
        }
        None => {
            return Err(StdError::generic_err(
                "Incorrect denomination, sent asset denom and vested asset denom differ",
            ))
        }
    }

    Ok(())
}

/// Converts an amount of the vested asset to a Coin
pub fn asset_to_coin(denom: String, amount: Uint128) -> Coin {
    Coin { denom, amount }
}
