//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a migration
//! changes the schema, regenerate them with `diesel print-schema` or update
//! them by hand.

diesel::table! {
    /// Reference list of cities. Seeded out-of-band.
    cities (code) {
        code -> Text,
        name -> Text,
        /// Two-letter state code.
        state -> Varchar,
    }
}

diesel::table! {
    cafes (id) {
        id -> Int4,
        name -> Text,
        description -> Text,
        url -> Text,
        address -> Text,
        /// Foreign key to `cities.code`.
        city_code -> Text,
        image_url -> Text,
    }
}

diesel::table! {
    /// Registered accounts. `username` carries a unique constraint.
    users (id) {
        id -> Int4,
        username -> Text,
        admin -> Bool,
        email -> Nullable<Text>,
        first_name -> Varchar,
        last_name -> Varchar,
        description -> Nullable<Text>,
        image_url -> Text,
        hashed_password -> Text,
    }
}

diesel::table! {
    /// Join table with the composite key `(user_id, cafe_id)`.
    likes (user_id, cafe_id) {
        user_id -> Int4,
        cafe_id -> Int4,
    }
}

diesel::joinable!(cafes -> cities (city_code));
diesel::joinable!(likes -> cafes (cafe_id));
diesel::joinable!(likes -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(cafes, cities, likes, users);
