pub mod catalog_dto;
pub mod telegram_dto;
pub mod wishlist_dto;
