//! Player data, statistics, tags and notifications

use std::collections::BTreeMap;

use playfab_domain::constants::SERVER_API;
use playfab_domain::{CallMethod, Result};
use serde_json::{json, Value};

use super::envelope::{data, field, optional_field};
use super::JsonMap;
use crate::api::PlayFabClient;

impl PlayFabClient {
    /// Read-only player data for `keys`, keyed by data key.
    pub async fn get_user_read_only_data(&self, keys: &[&str], play_fab_id: &str) -> Result<JsonMap> {
        const FUNCTION: &str = "GetUserReadOnlyData";
        let body = json!({ "Keys": keys, "PlayFabId": play_fab_id });
        let response = self.call_json(CallMethod::Post, SERVER_API, FUNCTION, &body).await?;

        field(FUNCTION, &mut data(FUNCTION, &response)?, "Data")
    }

    pub async fn update_user_read_only_data(
        &self,
        values: &BTreeMap<String, String>,
        play_fab_id: &str,
    ) -> Result<()> {
        let body = json!({ "Data": values, "PlayFabId": play_fab_id });
        self.call_json(CallMethod::Post, SERVER_API, "UpdateUserReadOnlyData", &body).await?;
        Ok(())
    }

    /// Current values of the named statistics.
    pub async fn get_player_statistics(
        &self,
        statistic_names: &[&str],
        play_fab_id: &str,
    ) -> Result<Vec<JsonMap>> {
        const FUNCTION: &str = "GetPlayerStatistics";
        self.logger().debug(format_args!("starting {FUNCTION}"));

        let body = json!({ "PlayFabId": play_fab_id, "StatisticNames": statistic_names });
        let response = self.call_json(CallMethod::Get, SERVER_API, FUNCTION, &body).await?;

        field(FUNCTION, &mut data(FUNCTION, &response)?, "Statistics")
    }

    /// `statistics` entries are `{"StatisticName": .., "Value": ..}` objects.
    pub async fn update_player_statistics(&self, statistics: &[Value], play_fab_id: &str) -> Result<()> {
        self.logger().debug(format_args!("starting UpdatePlayerStatistics"));

        let body = json!({ "PlayFabId": play_fab_id, "Statistics": statistics });
        self.call_json(CallMethod::Post, SERVER_API, "UpdatePlayerStatistics", &body).await?;
        Ok(())
    }

    /// Combined player info selected by `request_parameters`.
    pub async fn get_player_combined_info(
        &self,
        request_parameters: &JsonMap,
        play_fab_id: &str,
    ) -> Result<JsonMap> {
        const FUNCTION: &str = "GetPlayerCombinedInfo";
        self.logger().debug(format_args!("starting {FUNCTION}"));

        let body = json!({ "PlayFabId": play_fab_id, "InfoRequestParameters": request_parameters });
        let response = self.call_json(CallMethod::Post, SERVER_API, FUNCTION, &body).await?;

        field(FUNCTION, &mut data(FUNCTION, &response)?, "InfoResultPayload")
    }

    pub async fn add_player_tag(&self, tag: &str, play_fab_id: &str) -> Result<()> {
        let body = json!({ "PlayFabId": play_fab_id, "TagName": tag });
        self.call_json(CallMethod::Post, SERVER_API, "AddPlayerTag", &body).await?;
        Ok(())
    }

    pub async fn remove_player_tag(&self, tag: &str, play_fab_id: &str) -> Result<()> {
        let body = json!({ "PlayFabId": play_fab_id, "TagName": tag });
        self.call_json(CallMethod::Post, SERVER_API, "RemovePlayerTag", &body).await?;
        Ok(())
    }

    /// Tags on a player. A response without `Tags` means the player has none.
    pub async fn get_player_tags(&self, play_fab_id: &str) -> Result<Vec<String>> {
        const FUNCTION: &str = "GetPlayerTags";
        let body = json!({ "PlayFabId": play_fab_id });
        let response = self.call_json(CallMethod::Post, SERVER_API, FUNCTION, &body).await?;

        optional_field(FUNCTION, &mut data(FUNCTION, &response)?, "Tags")
    }

    pub async fn send_push_notification(&self, message: &str, recipient: &str) -> Result<()> {
        let body = json!({ "Message": message, "Recipient": recipient });
        self.call_json(CallMethod::Post, SERVER_API, "SendPushNotification", &body).await?;
        Ok(())
    }
}
