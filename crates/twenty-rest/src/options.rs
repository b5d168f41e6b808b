//! Pagination and ordering options for list requests.

/// Options for [`EntityService::find`](crate::EntityService::find).
///
/// # Example
///
/// ```rust
/// use twenty_rest::FindOptions;
///
/// let options = FindOptions::new().limit(50).order_by("createdAt[DescNullsLast]");
/// assert_eq!(
///     options.to_query(),
///     vec![
///         ("limit".to_string(), "50".to_string()),
///         ("order_by".to_string(), "createdAt[DescNullsLast]".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub limit: Option<u32>,
    pub order_by: Option<String>,
    pub starting_after: Option<String>,
    pub ending_before: Option<String>,
    /// How many levels of related objects the server should embed.
    pub depth: Option<u8>,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn starting_after(mut self, cursor: impl Into<String>) -> Self {
        self.starting_after = Some(cursor.into());
        self
    }

    pub fn ending_before(mut self, cursor: impl Into<String>) -> Self {
        self.ending_before = Some(cursor.into());
        self
    }

    pub fn depth(mut self, depth: u8) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Options for the page after `cursor`, keeping limit, order and depth.
    pub fn next_page(&self, cursor: impl Into<String>) -> Self {
        Self {
            starting_after: Some(cursor.into()),
            ending_before: None,
            ..self.clone()
        }
    }

    /// Query parameters, in a fixed order, for the options that are set.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(order_by) = &self.order_by {
            params.push(("order_by".to_string(), order_by.clone()));
        }
        if let Some(cursor) = &self.starting_after {
            params.push(("starting_after".to_string(), cursor.clone()));
        }
        if let Some(cursor) = &self.ending_before {
            params.push(("ending_before".to_string(), cursor.clone()));
        }
        if let Some(depth) = self.depth {
            params.push(("depth".to_string(), depth.to_string()));
        }
        params
    }
}
