pub mod catalog_service;
pub mod telegram_api;
pub mod wishlist_service;
