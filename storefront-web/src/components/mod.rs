pub mod cart_drawer;
pub mod pagination;
pub mod product_card;
pub mod product_filter;
pub mod product_list;
pub mod recommendations;
pub mod virtual_grid;

pub use cart_drawer::CartDrawer;
pub use pagination::Pagination;
pub use product_card::ProductCard;
pub use product_filter::ProductFilter;
pub use product_list::ProductList;
pub use recommendations::Recommendations;
pub use virtual_grid::VirtualGrid;
