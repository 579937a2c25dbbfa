mod envelope;
mod lenient;
pub use self::envelope::{strip_envelope, unwrap_item, ListEnvelope, Page, Paging};

mod category;
pub use self::category::{Category, CategoryID, CategoryPayload};

mod product;
pub use self::product::{Product, ProductID, ProductPayload};
