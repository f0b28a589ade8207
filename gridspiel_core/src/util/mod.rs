mod str_parsed;

pub use str_parsed::*;
