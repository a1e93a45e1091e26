// Documented handlers for the router in router_dump.json

pub struct ItemHandlers;

impl ItemHandlers {
    /// Fetch one item
    ///
    /// Items are looked up in the primary catalog.
    ///
    /// @route GET /api/v1/items/{itemId}
    /// @tag items
    /// @param itemId path - Item id
    /// @response 200 - The item
    /// @response 404 - No such item
    pub async fn get_item(&self) {}

    /// Remove an item
    /// @route DELETE /api/v1/items/{itemId}/
    /// @tag items
    /// @response 204 - Removed
    pub async fn delete_item(&self) {}
}

/// @route POST /users
/// @summary Register a user
/// @tag accounts
/// @response 201 - Created user
/// @response 409 - Email already registered
pub async fn create_user() {}

/// Helper without a route tag
pub fn audit() {}
