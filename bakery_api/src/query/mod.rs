mod common;
pub use self::common::Query;

mod product;
pub use self::product::ProductQuery;
