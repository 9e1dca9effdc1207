//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `migrations/` exactly;
//! `diesel print-schema` can regenerate them from a live database.

diesel::table! {
    /// Product groupings with soft-delete and audit columns.
    categories (id) {
        id -> Uuid,
        #[max_length = 100]
        name -> Varchar,
        description -> Nullable<Text>,
        is_active -> Bool,
        created_at -> Timestamptz,
        created_by -> Varchar,
        updated_at -> Nullable<Timestamptz>,
        updated_by -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Catalog items; `price` is numeric, never floating point.
    products (id) {
        id -> Uuid,
        #[max_length = 100]
        name -> Varchar,
        description -> Nullable<Text>,
        price -> Numeric,
        quantity -> Int4,
        category_id -> Uuid,
        image_url -> Text,
        is_active -> Bool,
        created_at -> Timestamptz,
        created_by -> Varchar,
        updated_at -> Nullable<Timestamptz>,
        updated_by -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Guest orders; hard-deleted, no soft-delete flag.
    orders (id) {
        id -> Uuid,
        #[max_length = 100]
        guest_name -> Varchar,
        guest_email -> Varchar,
        order_date -> Timestamptz,
        total_amount -> Numeric,
    }
}

diesel::table! {
    /// Order lines; unit price is captured at order time.
    order_lines (id) {
        id -> Uuid,
        order_id -> Uuid,
        product_id -> Uuid,
        quantity -> Int4,
        unit_price -> Numeric,
    }
}

diesel::joinable!(products -> categories (category_id));
diesel::joinable!(order_lines -> orders (order_id));
diesel::joinable!(order_lines -> products (product_id));

diesel::allow_tables_to_appear_in_same_query!(categories, products, orders, order_lines);
