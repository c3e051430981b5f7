//! Title-wide data endpoints

use playfab_domain::constants::SERVER_API;
use playfab_domain::{CallMethod, Result};
use serde_json::json;

use super::envelope::{data, field, optional_field};
use super::JsonMap;
use crate::api::PlayFabClient;

impl PlayFabClient {
    /// Public title data for `keys`. Unknown keys are simply absent.
    pub async fn get_title_data(&self, keys: &[&str]) -> Result<JsonMap> {
        self.title_data("GetTitleData", keys).await
    }

    /// Server-only title data for `keys`.
    pub async fn get_title_internal_data(&self, keys: &[&str]) -> Result<JsonMap> {
        self.title_data("GetTitleInternalData", keys).await
    }

    /// Roll a random result table. Returns the chosen item id.
    pub async fn evaluate_random_table(&self, table_id: &str, play_fab_id: &str) -> Result<String> {
        const FUNCTION: &str = "EvaluateRandomResultTable";
        let body = json!({
            "TableId": table_id,
            "PlayFabId": play_fab_id,
            "CatalogVersion": self.catalog_version(),
        });
        let response = self.call_json(CallMethod::Post, SERVER_API, FUNCTION, &body).await?;

        field(FUNCTION, &mut data(FUNCTION, &response)?, "ResultItemId")
    }

    async fn title_data(&self, function: &str, keys: &[&str]) -> Result<JsonMap> {
        self.logger().debug(format_args!("starting {function}"));

        let body = json!({ "Keys": keys });
        let response = self.call_json(CallMethod::Post, SERVER_API, function, &body).await?;

        optional_field(function, &mut data(function, &response)?, "Data")
    }
}
