pub mod adjustment;
pub mod batch;
pub mod category;
pub mod goods_issue;
pub mod goods_receipt;
pub mod location;
pub mod partner;
pub mod product;
