//! Inventory, catalog and store endpoints

use playfab_domain::constants::SERVER_API;
use playfab_domain::{CallMethod, Result};
use serde_json::{json, Value};

use super::envelope::{data, field};
use super::JsonMap;
use crate::api::PlayFabClient;

impl PlayFabClient {
    /// Grant catalog items to a player. Returns the per-item grant results.
    pub async fn grant_items_to_user(&self, item_ids: &[&str], play_fab_id: &str) -> Result<Vec<Value>> {
        const FUNCTION: &str = "GrantItemsToUser";
        self.logger().debug(format_args!(
            "grant items to user playFabId: {play_fab_id}, itemIds {item_ids:?}"
        ));

        let body = json!({
            "ItemIds": item_ids,
            "PlayFabId": play_fab_id,
            "CatalogVersion": self.catalog_version(),
        });
        let response = self
            .call_json(CallMethod::Post, SERVER_API, FUNCTION, &body)
            .await
            .inspect_err(|e| self.logger().debug(format_args!("Failed Grant Items To User {e}")))?;

        field(FUNCTION, &mut data(FUNCTION, &response)?, "ItemGrantResults")
    }

    /// Item instances a player owns.
    pub async fn get_user_inventory(&self, play_fab_id: &str) -> Result<Vec<Value>> {
        const FUNCTION: &str = "GetUserInventory";
        let body = json!({ "PlayFabId": play_fab_id });
        let response = self.call_json(CallMethod::Post, SERVER_API, FUNCTION, &body).await?;

        field(FUNCTION, &mut data(FUNCTION, &response)?, "Inventory")
    }

    /// Consume uses of a consumable item instance. Returns the `data` object.
    ///
    /// Stricter than returning the raw body: a success response without a
    /// `data` object is a `PlayFabError::Decode`. Use [`PlayFabClient::call`]
    /// directly to get the unparsed body.
    pub async fn consume_item(
        &self,
        play_fab_id: &str,
        item_instance_id: &str,
        consume_count: u32,
    ) -> Result<JsonMap> {
        const FUNCTION: &str = "ConsumeItem";
        let body = json!({
            "PlayFabId": play_fab_id,
            "ItemInstanceId": item_instance_id,
            "ConsumeCount": consume_count,
        });
        let response = self.call_json(CallMethod::Post, SERVER_API, FUNCTION, &body).await?;

        data(FUNCTION, &response)
    }

    /// Revoke item instances. Empty slots are skipped; when nothing is left no
    /// call is made.
    pub async fn revoke_inventory_items(&self, items: &[Option<JsonMap>]) -> Result<()> {
        const FUNCTION: &str = "RevokeInventoryItems";
        let items: Vec<&JsonMap> = items.iter().flatten().collect();
        if items.is_empty() {
            return Ok(());
        }

        let body = json!({ "Items": items });
        self.call_json(CallMethod::Post, SERVER_API, FUNCTION, &body).await?;
        Ok(())
    }

    /// All items in the configured catalog version.
    pub async fn get_catalog_items(&self) -> Result<Vec<Value>> {
        const FUNCTION: &str = "GetCatalogItems";
        self.logger().debug(format_args!("starting {FUNCTION}"));

        let body = json!({ "CatalogVersion": self.catalog_version() });
        let response = self.call_json(CallMethod::Post, SERVER_API, FUNCTION, &body).await?;

        field(FUNCTION, &mut data(FUNCTION, &response)?, "Catalog")
    }

    /// Store contents as priced for a player, with the resolved store id.
    pub async fn get_store_items(&self, store_id: &str, play_fab_id: &str) -> Result<(Vec<Value>, String)> {
        const FUNCTION: &str = "GetStoreItems";
        self.logger().debug(format_args!("starting {FUNCTION}"));

        let body = json!({
            "CatalogVersion": self.catalog_version(),
            "StoreId": store_id,
            "PlayFabId": play_fab_id,
        });
        let response = self.call_json(CallMethod::Post, SERVER_API, FUNCTION, &body).await?;

        let mut data = data(FUNCTION, &response)?;
        let items = field(FUNCTION, &mut data, "Store")?;
        let resolved_store_id = field(FUNCTION, &mut data, "StoreId")?;
        self.logger().debug(format_args!("finished {FUNCTION}"));
        Ok((items, resolved_store_id))
    }

    /// Marketing metadata of a store.
    pub async fn get_store(&self, store_id: &str) -> Result<JsonMap> {
        const FUNCTION: &str = "GetStoreItems";
        self.logger().debug(format_args!("starting GetStore"));

        let body = json!({
            "CatalogVersion": self.catalog_version(),
            "StoreId": store_id,
        });
        let response = self.call_json(CallMethod::Post, SERVER_API, FUNCTION, &body).await?;

        let mut marketing: JsonMap = field(FUNCTION, &mut data(FUNCTION, &response)?, "MarketingData")?;
        field(FUNCTION, &mut marketing, "Metadata")
    }
}
