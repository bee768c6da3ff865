#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use regmask_image as image;

#[doc(inline)]
pub use regmask_io as io;

#[doc(inline)]
pub use regmask_metric as metric;
