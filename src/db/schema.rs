// SPDX-License-Identifier: MIT

//! Diesel table declarations, kept in sync with migrations/.

diesel::table! {
    users (id) {
        id -> BigInt,
        name -> Text,
        email -> Text,
        role -> Text,
        password_hash -> Text,
        bank_info -> Text,
    }
}

diesel::table! {
    trips (id) {
        id -> BigInt,
        user_id -> BigInt,
        title -> Text,
        start_date -> Text,
        end_date -> Text,
        daily_limit -> Double,
        status -> Text,
    }
}

diesel::table! {
    expenses (id) {
        id -> BigInt,
        trip_id -> BigInt,
        user_id -> BigInt,
        date -> Text,
        category -> Text,
        description -> Text,
        amount -> Double,
        receipt_path -> Text,
        status -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    deposits (id) {
        id -> BigInt,
        user_id -> BigInt,
        trip_id -> Nullable<BigInt>,
        amount -> Double,
        date -> Text,
        note -> Text,
    }
}

diesel::joinable!(trips -> users (user_id));
diesel::joinable!(expenses -> trips (trip_id));
diesel::joinable!(expenses -> users (user_id));
diesel::joinable!(deposits -> users (user_id));
diesel::joinable!(deposits -> trips (trip_id));

diesel::allow_tables_to_appear_in_same_query!(users, trips, expenses, deposits,);
