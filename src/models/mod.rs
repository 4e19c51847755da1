pub mod tobacco;
pub mod wishlist_item;
