//! Element query port: reading the UI tree and acting on its nodes.

use appdriver_domain::action::PerformActionResult;
use appdriver_domain::element::Element;
use appdriver_domain::error::DriverError;
use async_trait::async_trait;

/// Queries against the device's current UI tree.
#[async_trait]
pub trait ElementQuery: Send + Sync {
    /// Find elements whose `property_name` matches `pattern`.
    ///
    /// When `is_expression` is true, `pattern` is evaluated by the backend
    /// instead of compared literally. `ancestor_id` restricts the search to
    /// descendants of that element. Returns an empty list, not an error, when
    /// nothing matches.
    async fn find_elements(
        &self,
        property_name: &str,
        pattern: &str,
        is_expression: bool,
        ancestor_id: Option<&str>,
    ) -> Result<Vec<Element>, DriverError>;

    /// Every element in the current UI tree.
    async fn get_elements(&self) -> Result<Vec<Element>, DriverError>;

    /// Read one property of an element.
    ///
    /// Returns [`DriverError::ElementNotFound`] when `element_id` is stale or
    /// unknown.
    async fn get_property(
        &self,
        element_id: &str,
        property_name: &str,
    ) -> Result<String, DriverError>;

    /// Apply a named action to an element.
    ///
    /// Which actions exist is up to the backend.
    async fn perform_action(
        &self,
        action: &str,
        element_id: &str,
        arguments: &[String],
    ) -> Result<PerformActionResult, DriverError>;
}
