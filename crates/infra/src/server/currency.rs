//! Virtual currency endpoints

use std::collections::BTreeMap;

use playfab_domain::constants::SERVER_API;
use playfab_domain::{CallMethod, Result};
use serde_json::json;

use super::envelope::{data, field};
use super::JsonMap;
use crate::api::PlayFabClient;

impl PlayFabClient {
    /// Balances by currency code, read from the player's inventory.
    pub async fn get_virtual_currency(&self, play_fab_id: &str) -> Result<BTreeMap<String, i64>> {
        const FUNCTION: &str = "GetUserInventory";
        let body = json!({ "PlayFabId": play_fab_id });
        let response = self.call_json(CallMethod::Post, SERVER_API, FUNCTION, &body).await?;

        field(FUNCTION, &mut data(FUNCTION, &response)?, "VirtualCurrency")
    }

    /// Increase a balance. Returns the `data` object with the new balance.
    pub async fn add_user_virtual_currency(
        &self,
        amount: u64,
        currency_id: &str,
        play_fab_id: &str,
    ) -> Result<JsonMap> {
        self.modify_virtual_currency("AddUserVirtualCurrency", amount, currency_id, play_fab_id).await
    }

    /// Decrease a balance. Returns the `data` object with the new balance.
    pub async fn subtract_user_virtual_currency(
        &self,
        amount: u64,
        currency_id: &str,
        play_fab_id: &str,
    ) -> Result<JsonMap> {
        self.modify_virtual_currency("SubtractUserVirtualCurrency", amount, currency_id, play_fab_id)
            .await
    }

    async fn modify_virtual_currency(
        &self,
        function: &str,
        amount: u64,
        currency_id: &str,
        play_fab_id: &str,
    ) -> Result<JsonMap> {
        self.logger().debug(format_args!("starting {function}"));

        let body = json!({
            "Amount": amount,
            "PlayFabId": play_fab_id,
            "VirtualCurrency": currency_id,
        });
        let response = self.call_json(CallMethod::Post, SERVER_API, function, &body).await?;

        data(function, &response)
    }
}
