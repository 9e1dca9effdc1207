//! Tests for the catalog service.

use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockCategoryRepository, MockProductRepository};
use crate::domain::ErrorCode;

fn service(
    categories: MockCategoryRepository,
    products: MockProductRepository,
) -> CatalogService<MockCategoryRepository, MockProductRepository> {
    CatalogService::new(Arc::new(categories), Arc::new(products))
}

fn admin() -> Principal {
    Principal::authenticated("alice", [crate::domain::Role::Admin])
}

fn clerk() -> Principal {
    Principal::authenticated("bob", [crate::domain::Role::User])
}

fn sample_category(id: Uuid) -> Category {
    Category {
        id,
        name: "Tools".to_owned(),
        description: Some("Hand tools".to_owned()),
        is_active: true,
        created_at: Utc::now(),
        created_by: "alice".to_owned(),
        updated_at: None,
        updated_by: None,
    }
}

fn sample_product(id: Uuid, category_id: Uuid) -> Product {
    Product {
        id,
        name: "Hammer".to_owned(),
        description: None,
        price: BigDecimal::from_str("9.99").expect("price"),
        quantity: 10,
        category_id,
        image_url: "/images/hammer.png".to_owned(),
        is_active: true,
        created_at: Utc::now(),
        created_by: "alice".to_owned(),
        updated_at: None,
        updated_by: None,
    }
}

fn category_draft() -> CategoryDraft {
    CategoryDraft {
        name: "Tools".to_owned(),
        description: None,
    }
}

fn product_draft(category_id: Uuid) -> ProductDraft {
    ProductDraft {
        name: "Hammer".to_owned(),
        description: None,
        price: BigDecimal::from_str("9.99").expect("price"),
        quantity: 10,
        category_id,
        image_url: None,
    }
}

#[tokio::test]
async fn list_categories_requires_authentication() {
    let svc = service(
        MockCategoryRepository::new(),
        MockProductRepository::new(),
    );
    let err = svc
        .list_categories(&Principal::guest())
        .await
        .expect_err("guest rejected");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn list_categories_returns_active_records() {
    let id = Uuid::new_v4();
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_list_active()
        .times(1)
        .returning(move || Ok(vec![sample_category(id)]));
    let svc = service(categories, MockProductRepository::new());

    let listed = svc.list_categories(&clerk()).await.expect("listing");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().map(|c| c.id), Some(id));
}

#[tokio::test]
async fn blank_search_term_falls_back_to_active_listing() {
    let category_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let mut products = MockProductRepository::new();
    products
        .expect_list_active()
        .times(1)
        .returning(move || Ok(vec![sample_product(product_id, category_id)]));
    products.expect_search_active().times(0);
    let svc = service(MockCategoryRepository::new(), products);

    let listed = svc
        .list_products(&clerk(), Some("   "))
        .await
        .expect("listing");
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn search_trims_term_before_querying() {
    let mut products = MockProductRepository::new();
    products
        .expect_search_active()
        .withf(|term| term == "ham")
        .times(1)
        .returning(|_| Ok(vec![]));
    let svc = service(MockCategoryRepository::new(), products);

    svc.list_products(&clerk(), Some("  ham "))
        .await
        .expect("search");
}

#[tokio::test]
async fn get_product_reports_not_found_for_inactive() {
    let id = Uuid::new_v4();
    let mut products = MockProductRepository::new();
    products
        .expect_find_active_by_id()
        .times(1)
        .returning(|_| Ok(None));
    let svc = service(MockCategoryRepository::new(), products);

    let err = svc
        .get_product(&clerk(), id)
        .await
        .expect_err("inactive hidden");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn create_category_rejects_non_admin() {
    let svc = service(
        MockCategoryRepository::new(),
        MockProductRepository::new(),
    );
    let err = svc
        .create_category(&clerk(), category_draft())
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn create_category_persists_and_stamps_actor() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_insert()
        .withf(|category| category.is_active && category.created_by == "alice")
        .times(1)
        .returning(|_| Ok(()));
    let svc = service(categories, MockProductRepository::new());

    let created = svc
        .create_category(&admin(), category_draft())
        .await
        .expect("created");
    assert_eq!(created.name, "Tools");
    assert_eq!(created.created_by, "alice");
}

#[tokio::test]
async fn create_category_rejects_blank_name_without_persisting() {
    let mut categories = MockCategoryRepository::new();
    categories.expect_insert().times(0);
    let svc = service(categories, MockProductRepository::new());

    let err = svc
        .create_category(
            &admin(),
            CategoryDraft {
                name: "  ".to_owned(),
                description: None,
            },
        )
        .await
        .expect_err("validation failure");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&serde_json::json!({ "field": "name" }))
    );
}

#[tokio::test]
async fn create_product_requires_existing_category() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_active_by_id()
        .times(1)
        .returning(|_| Ok(None));
    let mut products = MockProductRepository::new();
    products.expect_insert().times(0);
    let svc = service(categories, products);

    let err = svc
        .create_product(&admin(), product_draft(Uuid::new_v4()))
        .await
        .expect_err("unknown category");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&serde_json::json!({ "field": "categoryId" }))
    );
}

#[tokio::test]
async fn update_product_rejects_zero_price_without_persisting() {
    let mut products = MockProductRepository::new();
    products.expect_update().times(0);
    let svc = service(MockCategoryRepository::new(), products);

    let mut draft = product_draft(Uuid::new_v4());
    draft.price = BigDecimal::from(0);
    let err = svc
        .update_product(&admin(), Uuid::new_v4(), draft)
        .await
        .expect_err("zero price rejected");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&serde_json::json!({ "field": "price" }))
    );
}

#[tokio::test]
async fn update_category_reports_not_found_when_missing() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_active_by_id()
        .times(1)
        .returning(|_| Ok(None));
    categories.expect_update().times(0);
    let svc = service(categories, MockProductRepository::new());

    let err = svc
        .update_category(&admin(), Uuid::new_v4(), category_draft())
        .await
        .expect_err("missing record");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn update_category_zero_rows_resolves_to_not_found_when_vanished() {
    let id = Uuid::new_v4();
    let mut categories = MockCategoryRepository::new();
    let mut seq = mockall::Sequence::new();
    categories
        .expect_find_active_by_id()
        .times(1)
        .in_sequence(&mut seq)
        .returning(move |lookup| Ok(Some(sample_category(lookup))));
    categories
        .expect_update()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(UpdateStatus::ZeroRows));
    categories
        .expect_find_active_by_id()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(None));
    let svc = service(categories, MockProductRepository::new());

    let err = svc
        .update_category(&admin(), id, category_draft())
        .await
        .expect_err("vanished record");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn update_category_zero_rows_propagates_conflict_when_still_present() {
    let id = Uuid::new_v4();
    let mut categories = MockCategoryRepository::new();
    let mut seq = mockall::Sequence::new();
    categories
        .expect_find_active_by_id()
        .times(1)
        .in_sequence(&mut seq)
        .returning(move |lookup| Ok(Some(sample_category(lookup))));
    categories
        .expect_update()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(UpdateStatus::ZeroRows));
    categories
        .expect_find_active_by_id()
        .times(1)
        .in_sequence(&mut seq)
        .returning(move |lookup| Ok(Some(sample_category(lookup))));
    let svc = service(categories, MockProductRepository::new());

    let err = svc
        .update_category(&admin(), id, category_draft())
        .await
        .expect_err("conflict is fatal");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn update_product_stamps_audit_fields() {
    let category_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_active_by_id()
        .returning(move |lookup| Ok(Some(sample_category(lookup))));
    let mut products = MockProductRepository::new();
    products
        .expect_find_active_by_id()
        .returning(move |lookup| Ok(Some(sample_product(lookup, category_id))));
    products
        .expect_update()
        .withf(|_, changes, stamp| changes.name() == "Hammer" && stamp.by == "alice")
        .times(1)
        .returning(|_, _, _| Ok(UpdateStatus::Applied));
    let svc = service(categories, products);

    svc.update_product(&admin(), product_id, product_draft(category_id))
        .await
        .expect("update applied");
}

#[tokio::test]
async fn delete_category_is_idempotent() {
    let id = Uuid::new_v4();
    let mut categories = MockCategoryRepository::new();
    // Two calls, both succeed regardless of current state.
    categories
        .expect_set_inactive()
        .times(2)
        .returning(|_, _| Ok(()));
    let svc = service(categories, MockProductRepository::new());

    svc.delete_category(&admin(), id).await.expect("first delete");
    svc.delete_category(&admin(), id)
        .await
        .expect("second delete is a no-op");
}

#[tokio::test]
async fn repository_connection_failures_surface_as_service_unavailable() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_list_active()
        .returning(|| Err(CatalogRepositoryError::connection("pool exhausted")));
    let svc = service(categories, MockProductRepository::new());

    let err = svc
        .list_categories(&clerk())
        .await
        .expect_err("connection failure");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
