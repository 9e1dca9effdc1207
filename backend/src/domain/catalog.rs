//! Catalog entities: categories and products.
//!
//! Both carry a one-way Active → Inactive soft-delete flag and audit fields.
//! Constructors validate field invariants; referential checks (a product's
//! category must exist) are the catalog service's job because they need a
//! repository.

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use thiserror::Error as ThisError;
use uuid::Uuid;

/// Maximum length of a category or product name.
pub const NAME_MAX_LEN: usize = 100;

/// Image URL recorded when a product is created or edited without one.
pub const DEFAULT_PRODUCT_IMAGE: &str = "/images/default-product.png";

/// Field-level validation failures for catalog mutations.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum CatalogValidationError {
    /// Name was missing or blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Name exceeds [`NAME_MAX_LEN`] characters.
    #[error("name must be at most {NAME_MAX_LEN} characters")]
    NameTooLong,
    /// Price must be strictly positive.
    #[error("price must be greater than zero")]
    NonPositivePrice,
    /// Stock quantity must not be negative.
    #[error("quantity must be zero or greater")]
    NegativeQuantity,
}

impl CatalogValidationError {
    /// The input field the failure refers to, for error payloads.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong => "name",
            Self::NonPositivePrice => "price",
            Self::NegativeQuantity => "quantity",
        }
    }
}

/// Who performed a mutation, and when (UTC).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditStamp {
    pub at: DateTime<Utc>,
    pub by: String,
}

impl AuditStamp {
    /// Stamp for the given actor at the current instant.
    pub fn now(by: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            by: by.into(),
        }
    }
}

fn validate_name(raw: &str) -> Result<String, CatalogValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CatalogValidationError::EmptyName);
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(CatalogValidationError::NameTooLong);
    }
    Ok(trimmed.to_owned())
}

fn validate_price(price: &BigDecimal) -> Result<(), CatalogValidationError> {
    if price > &BigDecimal::zero() {
        Ok(())
    } else {
        Err(CatalogValidationError::NonPositivePrice)
    }
}

fn validate_quantity(quantity: i32) -> Result<(), CatalogValidationError> {
    if quantity < 0 {
        Err(CatalogValidationError::NegativeQuantity)
    } else {
        Ok(())
    }
}

fn default_image(image_url: Option<String>) -> String {
    image_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_owned())
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Raw category fields submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
}

/// Mutable category fields for an edit, validated before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChanges {
    name: String,
    description: Option<String>,
}

impl CategoryChanges {
    /// Validate edit fields.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, CatalogValidationError> {
        Ok(Self {
            name: validate_name(&name.into())?,
            description,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A product grouping with soft-delete and audit fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl Category {
    /// Create an active category from a draft, stamping creation audit
    /// fields from `stamp`.
    pub fn create(draft: CategoryDraft, stamp: AuditStamp) -> Result<Self, CatalogValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: validate_name(&draft.name)?,
            description: draft.description,
            is_active: true,
            created_at: stamp.at,
            created_by: stamp.by,
            updated_at: None,
            updated_by: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Raw product fields submitted by a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub quantity: i32,
    pub category_id: Uuid,
    pub image_url: Option<String>,
}

/// Mutable product fields for an edit, validated before use.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    name: String,
    description: Option<String>,
    price: BigDecimal,
    quantity: i32,
    category_id: Uuid,
    image_url: String,
}

impl ProductChanges {
    /// Validate edit fields; a blank image URL falls back to
    /// [`DEFAULT_PRODUCT_IMAGE`].
    pub fn new(draft: ProductDraft) -> Result<Self, CatalogValidationError> {
        let name = validate_name(&draft.name)?;
        validate_price(&draft.price)?;
        validate_quantity(draft.quantity)?;
        Ok(Self {
            name,
            description: draft.description,
            price: draft.price,
            quantity: draft.quantity,
            category_id: draft.category_id,
            image_url: default_image(draft.image_url),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> &BigDecimal {
        &self.price
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn category_id(&self) -> Uuid {
        self.category_id
    }

    pub fn image_url(&self) -> &str {
        self.image_url.as_str()
    }
}

/// A catalog item belonging to one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub quantity: i32,
    pub category_id: Uuid,
    pub image_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl Product {
    /// Create an active product from a draft, stamping creation audit
    /// fields from `stamp`. The category reference is checked separately.
    pub fn create(draft: ProductDraft, stamp: AuditStamp) -> Result<Self, CatalogValidationError> {
        let changes = ProductChanges::new(draft)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: changes.name,
            description: changes.description,
            price: changes.price,
            quantity: changes.quantity,
            category_id: changes.category_id,
            image_url: changes.image_url,
            is_active: true,
            created_at: stamp.at,
            created_by: stamp.by,
            updated_at: None,
            updated_by: None,
        })
    }
}
